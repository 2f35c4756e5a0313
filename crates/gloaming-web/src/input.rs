use crate::app::Application;
use crate::{clock, dom_err};
use gloaming_core::GloamingError;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Event, EventTarget, Window};

/// Any of these counts as the user gesture that unlocks audio.
pub const GESTURE_EVENTS: [&str; 5] = ["click", "touchstart", "keydown", "mousedown", "pointerdown"];

/// An attached event listener. Dropping it detaches the callback.
pub struct Listener {
    target: EventTarget,
    event: &'static str,
    closure: Closure<dyn FnMut(Event)>,
}

impl Listener {
    pub fn attach(
        target: &EventTarget,
        event: &'static str,
        handler: impl FnMut(Event) + 'static,
    ) -> Result<Self, GloamingError> {
        let closure = Closure::<dyn FnMut(Event)>::new(handler);
        target
            .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
            .map_err(dom_err)?;
        Ok(Self {
            target: target.clone(),
            event,
            closure,
        })
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.event, self.closure.as_ref().unchecked_ref());
    }
}

/// Register gesture, visibility and focus listeners ONCE at startup.
pub fn register_listeners(
    window: &Window,
    document: &Document,
    app: &Rc<RefCell<Application>>,
) -> Result<Vec<Listener>, GloamingError> {
    let window_target: &EventTarget = window.as_ref();
    let document_target: &EventTarget = document.as_ref();
    let mut listeners = Vec::with_capacity(GESTURE_EVENTS.len() + 3);

    for event in GESTURE_EVENTS {
        let app = app.clone();
        let win = window.clone();
        listeners.push(Listener::attach(window_target, event, move |_e: Event| {
            let now = clock::monotonic_ms(&win);
            app.borrow_mut().on_gesture(now);
        })?);
    }

    // visibilitychange
    {
        let app = app.clone();
        let win = window.clone();
        let doc = document.clone();
        listeners.push(Listener::attach(
            document_target,
            "visibilitychange",
            move |_e: Event| {
                let now = clock::monotonic_ms(&win);
                app.borrow_mut().on_visibility(!doc.hidden(), now);
            },
        )?);
    }

    // blur / focus
    for (event, focused) in [("blur", false), ("focus", true)] {
        let app = app.clone();
        let win = window.clone();
        listeners.push(Listener::attach(window_target, event, move |_e: Event| {
            let now = clock::monotonic_ms(&win);
            app.borrow_mut().on_focus(focused, now);
        })?);
    }

    log::info!("Registered {} page listeners", listeners.len());
    Ok(listeners)
}
