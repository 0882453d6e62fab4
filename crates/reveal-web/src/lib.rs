pub mod dom;
pub mod loader;
pub mod page;
pub mod scrolly;
pub mod timers;

pub use page::PageRunner;

/// Generate the `#[wasm_bindgen]` exports for a page.
///
/// Generates:
/// - `page_init()`: start the page with the given config
/// - `page_init_with_config(json)`: same, with a JSON override (invalid JSON
///   is logged and the given config is used instead)
/// - `page_scroll_progress(scroll_y, scroll_height, viewport_height)`
///
/// # Usage
///
/// ```ignore
/// use wasm_bindgen::prelude::*;
///
/// mod page;
///
/// reveal_web::export_page!(page::collage_config(), "collage-page");
/// ```
///
/// The calling crate must depend on `wasm-bindgen`, `log`, `console_log`,
/// `console_error_panic_hook` and `reveal-engine`.
#[macro_export]
macro_rules! export_page {
    ($config:expr, $page_name:literal) => {
        fn init_logging() {
            console_error_panic_hook::set_once();
            let _ = console_log::init_with_level(log::Level::Info);
        }

        #[wasm_bindgen]
        pub fn page_init() {
            init_logging();
            $crate::PageRunner::new($config).spawn();
            log::info!("{}: initialized", $page_name);
        }

        #[wasm_bindgen]
        pub fn page_init_with_config(json: &str) {
            init_logging();
            let config = match reveal_engine::PageConfig::from_json(json) {
                Ok(config) => config,
                Err(e) => {
                    log::warn!("{}: invalid config override ({}), using defaults", $page_name, e);
                    $config
                }
            };
            $crate::PageRunner::new(config).spawn();
            log::info!("{}: initialized", $page_name);
        }

        #[wasm_bindgen]
        pub fn page_scroll_progress(scroll_y: f64, scroll_height: f64, viewport_height: f64) -> f64 {
            reveal_engine::scroll_progress(reveal_engine::ScrollMetrics::new(
                scroll_y,
                scroll_height,
                viewport_height,
            ))
        }
    };
}
