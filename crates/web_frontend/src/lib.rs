//! FoodPrint Forecast browser frontend

mod dom;
mod fetch;

pub use dom::{DomPage, Handlers};
pub use fetch::FetchBackend;

use foodprint_core::{EmissionResults, PageController};
use gloo::events::EventListener;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;

type Controller = PageController<FetchBackend, DomPage>;

#[wasm_bindgen(start)]
pub fn run_app() {
    // Set up console error panic hook for better debugging
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    let document = gloo::utils::document();
    if document.ready_state() == "loading" {
        EventListener::once(&document, "DOMContentLoaded", |_| start()).forget();
    } else {
        start();
    }
}

fn start() {
    if let Err(err) = mount() {
        gloo::console::error!("FoodPrint page failed to start:", err);
    }
}

fn mount() -> Result<(), JsValue> {
    let page = DomPage::from_document(gloo::utils::document())?;
    let messages = page.locale().messages();
    let controller: Rc<Controller> = Rc::new(PageController::new(FetchBackend, page, messages));

    // Handlers own the controller for the lifetime of the page.
    let on_submit = {
        let controller = controller.clone();
        Rc::new(move || {
            let controller = controller.clone();
            spawn_local(async move { controller.handle_upload_submit().await });
        })
    };
    let on_contribute = {
        let controller = controller.clone();
        Rc::new(move |emissions: EmissionResults| {
            let controller = controller.clone();
            spawn_local(async move { controller.handle_contribute_click(&emissions).await });
        })
    };
    controller.page().set_handlers(Handlers {
        on_submit,
        on_contribute,
    });

    spawn_local(async move { controller.initialize().await });
    Ok(())
}
