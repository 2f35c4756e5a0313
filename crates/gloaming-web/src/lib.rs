pub mod clock;
pub mod config;
pub mod surface;

#[cfg(target_arch = "wasm32")]
mod app;
#[cfg(target_arch = "wasm32")]
mod input;

#[cfg(target_arch = "wasm32")]
use gloaming_core::GloamingError;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
thread_local! {
    static RUNTIME: std::cell::RefCell<Option<app::Runtime>> = const { std::cell::RefCell::new(None) };
}

/// WASM entry point. Sets the panic hook and initializes logging.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).expect("logger init failed");
    log::info!("Gloaming starting...");

    // the background stays silent on failure; the console is the only report
    if let Err(e) = run() {
        log::error!("Gloaming failed to start: {e}");
    }
}

#[cfg(target_arch = "wasm32")]
fn run() -> Result<(), GloamingError> {
    let window = web_sys::window().ok_or_else(|| GloamingError::Dom("no global window".into()))?;
    let document = window
        .document()
        .ok_or_else(|| GloamingError::Dom("no document".into()))?;

    let config = config::embedded_config();
    let surface = surface::Surface::from_document(&document)?;
    let runtime = app::Runtime::start(window, &document, &config, surface)?;
    RUNTIME.with(|slot| *slot.borrow_mut() = Some(runtime));
    Ok(())
}

/// Stop every loop, detach every listener and release audio. Safe to call twice.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn dismantle() {
    let runtime = RUNTIME.with(|slot| slot.borrow_mut().take());
    drop(runtime);
}

#[cfg(target_arch = "wasm32")]
pub(crate) fn dom_err(e: JsValue) -> GloamingError {
    GloamingError::Dom(format!("{e:?}"))
}
