use std::cell::Cell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement};

use reveal_engine::{AssetRequest, OverlayToggle, PageConfig, RevealError, Stage, ToggleLabels};

use crate::dom::{document, host_error, window, DomPage, DomWindow};
use crate::loader::fetch_asset;
use crate::scrolly::{constructor, init_scroll_video};
use crate::timers::WindowTimers;

/// Runs the page flow once: load, mount, reveal, then wire the scroll
/// video and the overlay toggle.
///
/// The page crate creates one from its config via `export_page!`, because
/// wasm-bindgen cannot export the flow directly.
pub struct PageRunner {
    config: PageConfig,
}

impl PageRunner {
    pub fn new(config: PageConfig) -> Self {
        Self { config }
    }

    /// Run on the browser's event loop.
    pub fn spawn(self) {
        wasm_bindgen_futures::spawn_local(async move {
            if let Err(e) = self.run().await {
                log::error!("page init failed: {}", e);
            }
        });
    }

    pub async fn run(&self) -> Result<(), RevealError> {
        let window = window()?;
        let document = document(&window)?;
        let ids = &self.config.ids;

        let Some(mount) = document.get_element_by_id(&ids.stage) else {
            log::warn!("no #{} element, nothing to do", ids.stage);
            return Ok(());
        };
        let overlay = document.get_element_by_id(&ids.overlay);
        let toggle_button = document.get_element_by_id(&ids.toggle_button);

        let page = DomPage::new(mount, overlay, self.config.overlay_visible_class.clone());
        let timers = WindowTimers::new(window.clone());

        let fetched = fetch_asset(&window, &AssetRequest::svg(&self.config)).await;
        let stage = Stage::new(&page, &timers, &self.config);
        if stage.start(fetched).is_none() {
            return Ok(());
        }

        let scroll_window = DomWindow::new(window.clone(), document.clone());
        let scroll_mount = document.get_element_by_id(&ids.scroll_container);
        match (scroll_mount, constructor(&window)) {
            (Some(scroll_mount), Some(ctor)) => {
                if let Err(e) = init_scroll_video(
                    &scroll_window,
                    &timers,
                    &ctor,
                    &scroll_mount,
                    &self.config.scroll_video,
                ) {
                    log::error!("scroll video failed: {:?}", e);
                }
            }
            _ => log::info!("scroll video not available, skipping"),
        }

        let body = document
            .body()
            .ok_or_else(|| RevealError::Host("no body".to_string()))?;
        bind_overlay_toggle(
            body,
            toggle_button,
            &self.config.body_hidden_class,
            &self.config.labels,
        )?;
        Ok(())
    }
}

/// Hide the overlay by default and let the button flip it.
fn bind_overlay_toggle(
    body: HtmlElement,
    button: Option<Element>,
    hidden_class: &str,
    labels: &ToggleLabels,
) -> Result<(), RevealError> {
    let state = Rc::new(Cell::new(OverlayToggle::new()));
    body.class_list().add_1(hidden_class).map_err(host_error)?;

    let Some(button) = button else {
        log::debug!("no toggle button");
        return Ok(());
    };

    let target = button.clone();
    let hidden_class = hidden_class.to_string();
    let labels = labels.clone();
    let on_click = Closure::<dyn Fn()>::new(move || {
        let mut toggle = state.get();
        let view = toggle.toggle(&labels);
        state.set(toggle);

        let synced = body
            .class_list()
            .toggle_with_force(&hidden_class, view.hidden)
            .and_then(|_| target.set_attribute("aria-pressed", view.aria_pressed));
        if let Err(e) = synced {
            log::error!("failed to toggle overlay: {:?}", e);
        }
        target.set_text_content(Some(&view.label));
    });
    button
        .add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())
        .map_err(host_error)?;
    on_click.forget();
    Ok(())
}
