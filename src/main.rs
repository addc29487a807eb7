use std::rc::Rc;

use anyhow::Context;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Window};

// Modules
mod config;
mod controller;
mod error;
mod stores;
mod utils;

use config::ControllerConfig;
use controller::{InteractionController, PageElements};
use error::ControllerError;
use stores::feedback::{CopyServices, TimeoutScheduler};
use utils::{clipboard, notify::AlertNotifier};

fn main() {
    // Initialize panic hook for better error messages in browser console
    #[cfg(target_arch = "wasm32")]
    {
        console_error_panic_hook::set_once();
        wasm_logger::init(wasm_logger::Config::new(log::Level::Info));
    }

    log::info!("Starting promptdeck");

    if let Err(e) = run() {
        log::error!("promptdeck failed to start: {:#}", e);
    }
}

/// Attach now if the document is parsed, otherwise on `DOMContentLoaded`
fn run() -> anyhow::Result<()> {
    let window = web_sys::window().ok_or(ControllerError::NoWindow)?;
    let document = window.document().ok_or(ControllerError::NoDocument)?;
    let config = Rc::new(config::load(&window));

    if !is_loading(&document) {
        return start(&window, &document, config);
    }

    let target = document.clone();
    let on_ready: Closure<dyn FnMut(web_sys::Event)> = Closure::once(move |_event: web_sys::Event| {
        if let Err(e) = start(&window, &document, config) {
            log::error!("promptdeck failed to start: {:#}", e);
        }
    });
    target
        .add_event_listener_with_callback("DOMContentLoaded", on_ready.as_ref().unchecked_ref())
        .map_err(ControllerError::from)
        .context("waiting for DOMContentLoaded")?;
    on_ready.forget();
    Ok(())
}

fn is_loading(document: &Document) -> bool {
    js_sys::Reflect::get(document, &JsValue::from_str("readyState"))
        .ok()
        .and_then(|state| state.as_string())
        .is_some_and(|state| state == "loading")
}

fn start(window: &Window, document: &Document, config: Rc<ControllerConfig>) -> anyhow::Result<()> {
    let elements = PageElements::collect(document, &config).context("collecting page elements")?;
    let writer = clipboard::detect(window, document).context("selecting clipboard writer")?;
    let services = Rc::new(CopyServices::new(
        writer,
        Rc::new(AlertNotifier::new(window.clone())),
        Rc::new(TimeoutScheduler),
        &config,
    ));

    let controller = InteractionController::attach(elements, config, services)
        .context("attaching interaction controller")?;
    log::debug!("Active category after init: {:?}", controller.active_category());

    // Listeners live as long as the page
    controller.forget();
    Ok(())
}
