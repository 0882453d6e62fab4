use quick_xml::escape::escape;

use crate::api::config::PageConfig;
use crate::api::error::RevealError;
use crate::api::host::{PageHost, TimerHost};
use crate::assets::loader::AssetResponse;
use crate::assets::svg::{prepare_svg, PreparedSvg};
use crate::systems::reveal::{reveal_sequentially, RevealSchedule, RevealSignal};

/// Inline style of the fallback paragraph.
pub const FALLBACK_STYLE: &str = "color: white; text-align: center; margin-top: 50px;";

/// Drives the stage after the asset request has completed:
/// inject, reveal, then show the overlay.
pub struct Stage<'a, H: PageHost, T: TimerHost> {
    host: &'a H,
    timers: &'a T,
    config: &'a PageConfig,
}

impl<'a, H: PageHost, T: TimerHost> Stage<'a, H, T> {
    pub fn new(host: &'a H, timers: &'a T, config: &'a PageConfig) -> Self {
        Self {
            host,
            timers,
            config,
        }
    }

    /// Parse and mount the fetched SVG.
    pub fn mount(&self, response: AssetResponse) -> Result<PreparedSvg, RevealError> {
        let text = response.into_text()?;
        let svg = prepare_svg(&text, &self.config.reveal)?;
        self.host.mount_svg(&svg)?;
        Ok(svg)
    }

    /// Mount and start the reveal. The overlay is shown once the returned
    /// signal resolves.
    pub fn run(&self, response: AssetResponse) -> Result<RevealSignal, RevealError> {
        let svg = self.mount(response)?;
        let layers = self.host.layers()?;
        if layers.len() != svg.layer_count {
            log::warn!(
                "mounted {} layers, prepared markup had {}",
                layers.len(),
                svg.layer_count
            );
        }

        let schedule = RevealSchedule::from(&self.config.reveal);
        let signal = reveal_sequentially(self.timers, &layers, &schedule);
        let host = self.host.clone();
        signal.on_resolved(move || host.show_overlay());
        Ok(signal)
    }

    /// `run`, with every failure logged and replaced by the fallback message.
    ///
    /// `fetched` is the outcome of the request itself; a transport failure
    /// arrives here as `Err`.
    pub fn start(&self, fetched: Result<AssetResponse, RevealError>) -> Option<RevealSignal> {
        match fetched.and_then(|response| self.run(response)) {
            Ok(signal) => Some(signal),
            Err(err) => {
                log::error!("Failed to load SVG: {}", err);
                self.host.mount_fallback(&self.fallback_html());
                None
            }
        }
    }

    pub fn fallback_html(&self) -> String {
        format!(
            "<p style=\"{}\">{}</p>",
            FALLBACK_STYLE,
            escape(self.config.fallback_message.as_str())
        )
    }
}
