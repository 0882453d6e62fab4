pub mod api;
pub mod assets;
pub mod systems;

#[cfg(test)]
pub(crate) mod testing;

// Re-export key types at crate root for convenience
pub use api::config::{ElementIds, PageConfig, RevealConfig, ScrollVideoConfig, ToggleLabels};
pub use api::error::{LoadError, ParseError, RevealError};
pub use api::host::{LayerHandle, PageHost, ScrollHost, TimerHost, VideoSink};
pub use assets::loader::{AssetRequest, AssetResponse};
pub use assets::svg::{prepare_svg, is_layer, PreparedSvg, LAYER_SELECTOR};
pub use systems::overlay::{OverlayToggle, ToggleView};
pub use systems::reveal::{reveal_sequentially, RevealSchedule, RevealSignal};
pub use systems::scroll::{
    attach_scroll, bind_scroll_video, scroll_progress, ScrollMetrics, ScrollVideoOptions,
};
pub use systems::stage::{Stage, FALLBACK_STYLE};
