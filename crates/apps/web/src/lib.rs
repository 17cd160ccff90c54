//! Browser front end: a Leaflet map, an analyze button and a results panel
//! wired to the region describe service.

use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};

use analysis::{AnalysisRequestController, UiHandles};
use geoview::ViewportSelector;
use tracing::{error, info, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlButtonElement, HtmlElement};

pub mod client;
pub mod config;
pub mod dom;
pub mod error;
pub mod leaflet;
pub mod logging;

pub use client::GlooAnalysisClient;
pub use config::{ElementIds, WebConfig};
pub use dom::{DomResults, DomSpinner, DomTrigger};
pub use error::WebError;
pub use leaflet::LeafletMapWidget;

pub type WebController = AnalysisRequestController<
    LeafletMapWidget,
    GlooAnalysisClient,
    DomTrigger,
    DomResults,
    DomSpinner,
>;

static INITIALIZED: AtomicBool = AtomicBool::new(false);

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    // Hot reload can run the start hook twice.
    if INITIALIZED.swap(true, Ordering::SeqCst) {
        return Ok(());
    }
    console_error_panic_hook::set_once();

    let (config, config_error) = match WebConfig::from_window() {
        Ok(config) => (config, None),
        Err(err) => (WebConfig::default(), Some(err)),
    };
    logging::init(config.max_level());
    if let Some(err) = config_error {
        warn!(error = %err, "ignoring page configuration");
    }

    mount(&config).map(|_| ()).map_err(|err| {
        error!(error = %err, "region describe failed to start");
        JsValue::from(err)
    })
}

/// Resolves every element, mounts the map and attaches the click handler.
///
/// All elements are looked up before the map is created, so a missing id
/// leaves the page untouched.
pub fn mount(config: &WebConfig) -> Result<Rc<WebController>, WebError> {
    let document = dom::document()?;
    let ids = &config.elements;
    let map_container: HtmlElement = dom::element_by_id(&document, &ids.map, "HTMLElement")?;
    let button: HtmlButtonElement =
        dom::element_by_id(&document, &ids.trigger, "HTMLButtonElement")?;
    let results: HtmlElement = dom::element_by_id(&document, &ids.results, "HTMLElement")?;
    let spinner: HtmlElement = dom::element_by_id(&document, &ids.busy, "HTMLElement")?;

    let widget = LeafletMapWidget::mount(&map_container, &config.map)?;
    let controller = Rc::new(AnalysisRequestController::new(
        ViewportSelector::new(widget),
        GlooAnalysisClient::new(config.endpoint.clone()),
        UiHandles {
            trigger: DomTrigger::new(button),
            results: DomResults::new(results),
            busy: DomSpinner::new(spinner),
        },
        config.controller_config(),
    ));
    attach_trigger(&controller)?;

    info!(endpoint = %config.endpoint, "region describe ready");
    Ok(controller)
}

fn attach_trigger(controller: &Rc<WebController>) -> Result<(), WebError> {
    let handle = Rc::clone(controller);
    let on_click = Closure::<dyn FnMut()>::new(move || {
        let controller = Rc::clone(&handle);
        spawn_local(async move {
            controller.trigger().await;
        });
    });
    controller.ui().trigger.on_click(&on_click)?;
    // The listener lives for the lifetime of the page.
    on_click.forget();
    Ok(())
}
