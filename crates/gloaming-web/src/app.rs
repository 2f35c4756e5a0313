use crate::input::{self, Listener};
use crate::surface::Surface;
use crate::{clock, dom_err};
use gloaming_audio::bridge::AudioBridge;
use gloaming_core::{GloamingError, Millis, SkyConfig};
use gloaming_ephemeris::Almanac;
use gloaming_sky::Engine;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Window};

type RafClosure = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// Main application struct. Owns the engine and everything it drives.
pub struct Application {
    engine: Engine<Almanac>,
    bridge: AudioBridge,
    surface: Surface,
    running: bool,
    raf_handle: Option<i32>,
}

impl Application {
    pub fn new(config: &SkyConfig, surface: Surface, now_ms: Millis) -> Result<Self, GloamingError> {
        let bridge = AudioBridge::new(&config.assets).map_err(dom_err)?;
        let engine = Engine::new(Almanac, config, now_ms);
        bridge.apply(&engine.preload_effects());
        Ok(Self {
            engine,
            bridge,
            surface,
            running: true,
            raf_handle: None,
        })
    }

    /// Recompute the sky. Runs once at startup and then on the interval.
    pub fn tick(&mut self, now_ms: Millis) {
        if !self.running {
            return;
        }
        let now = match clock::local_now() {
            Ok(now) => now,
            Err(e) => {
                log::warn!("Skipping tick: {e}");
                return;
            }
        };
        let report = self.engine.tick(&now, now_ms);
        if let Err(e) = self.surface.publish(&report) {
            log::warn!("Failed to publish tick: {e}");
        }
        self.bridge.apply(&report.audio);
    }

    fn animate(&mut self, now_ms: Millis) {
        let update = self.engine.animate(now_ms);
        if let Err(e) = self.surface.draw(&update.frame) {
            log::warn!("Failed to draw frame: {e}");
        }
        self.bridge.apply(&update.audio);
    }

    pub fn on_gesture(&mut self, now_ms: Millis) {
        let effects = self.engine.observe_gesture(now_ms);
        self.bridge.apply(&effects);
    }

    pub fn on_visibility(&mut self, visible: bool, now_ms: Millis) {
        let effects = self.engine.set_visible(visible, now_ms);
        self.bridge.apply(&effects);
    }

    pub fn on_focus(&mut self, focused: bool, now_ms: Millis) {
        let effects = self.engine.set_focused(focused, now_ms);
        self.bridge.apply(&effects);
    }

    fn shutdown(&mut self) {
        self.running = false;
        let effects = self.engine.shutdown();
        self.bridge.apply(&effects);
    }
}

/// Everything scheduled against the page. Dropping it tears the engine down:
/// the interval and animation loop stop, listeners detach, audio is released.
pub struct Runtime {
    window: Window,
    app: Rc<RefCell<Application>>,
    interval_handle: Option<i32>,
    interval: Option<Closure<dyn FnMut()>>,
    raf: RafClosure,
    listeners: Vec<Listener>,
}

impl Runtime {
    pub fn start(
        window: Window,
        document: &Document,
        config: &SkyConfig,
        surface: Surface,
    ) -> Result<Self, GloamingError> {
        let now_ms = clock::monotonic_ms(&window);
        let mut application = Application::new(config, surface, now_ms)?;
        application.on_visibility(!document.hidden(), now_ms);
        application.on_focus(document.has_focus().unwrap_or(true), now_ms);
        application.tick(now_ms);

        let mut runtime = Self {
            window,
            app: Rc::new(RefCell::new(application)),
            interval_handle: None,
            interval: None,
            raf: Rc::new(RefCell::new(None)),
            listeners: Vec::new(),
        };
        // a failure below drops `runtime`, which undoes whatever was set up
        runtime.listeners = input::register_listeners(&runtime.window, document, &runtime.app)?;
        runtime.start_interval(config.tick_period_ms)?;
        runtime.start_loop()?;
        log::info!("Sky running, recomputing every {} ms", config.tick_period_ms);
        Ok(runtime)
    }

    fn start_interval(&mut self, period_ms: Millis) -> Result<(), GloamingError> {
        let app = self.app.clone();
        let win = self.window.clone();
        let closure = Closure::<dyn FnMut()>::new(move || {
            let now = clock::monotonic_ms(&win);
            app.borrow_mut().tick(now);
        });
        let handle = self
            .window
            .set_interval_with_callback_and_timeout_and_arguments_0(
                closure.as_ref().unchecked_ref(),
                period_ms as i32,
            )
            .map_err(dom_err)?;
        self.interval_handle = Some(handle);
        self.interval = Some(closure);
        Ok(())
    }

    /// Start the requestAnimationFrame loop.
    /// The closure is created ONCE and re-registers itself each frame.
    fn start_loop(&mut self) -> Result<(), GloamingError> {
        let app = self.app.clone();
        let raf = self.raf.clone();
        let win = self.window.clone();

        *self.raf.borrow_mut() = Some(Closure::wrap(Box::new(move |timestamp: f64| {
            let mut app_ref = app.borrow_mut();
            if !app_ref.running {
                return;
            }
            app_ref.animate(timestamp);
            app_ref.raf_handle = match request_frame(&win, &raf) {
                Ok(handle) => Some(handle),
                Err(e) => {
                    log::error!("Animation loop stopped: {e}");
                    None
                }
            };
        }) as Box<dyn FnMut(f64)>));

        let handle = request_frame(&self.window, &self.raf)?;
        self.app.borrow_mut().raf_handle = Some(handle);
        Ok(())
    }
}

impl Drop for Runtime {
    fn drop(&mut self) {
        if let Some(handle) = self.interval_handle.take() {
            self.window.clear_interval_with_handle(handle);
        }
        let mut app = self.app.borrow_mut();
        if let Some(handle) = app.raf_handle.take() {
            let _ = self.window.cancel_animation_frame(handle);
        }
        app.shutdown();
        drop(app);
        // the rAF closure holds a clone of its own slot; break the cycle
        self.raf.borrow_mut().take();
        self.interval.take();
        self.listeners.clear();
        log::info!("Sky dismantled");
    }
}

fn request_frame(window: &Window, raf: &RafClosure) -> Result<i32, GloamingError> {
    let slot = raf.borrow();
    let closure = slot
        .as_ref()
        .ok_or_else(|| GloamingError::Dom("animation closure released".into()))?;
    window
        .request_animation_frame(closure.as_ref().unchecked_ref())
        .map_err(dom_err)
}
