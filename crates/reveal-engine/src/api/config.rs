use serde::{Deserialize, Serialize};

/// Configuration for a reveal page, provided by the page crate.
///
/// Every field has a default, so a JSON override only needs to name the
/// values it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    /// Relative path of the SVG asset (default: `./assets/collage.svg`).
    pub svg_path: String,
    /// DOM element ids the page looks up.
    pub ids: ElementIds,
    /// Class added to the overlay once the reveal has finished.
    pub overlay_visible_class: String,
    /// Body class present while the overlay is hidden.
    pub body_hidden_class: String,
    /// Layer reveal timing and transition.
    pub reveal: RevealConfig,
    /// Toggle button labels.
    pub labels: ToggleLabels,
    /// Plain-text message shown in the stage when loading fails.
    pub fallback_message: String,
    /// Scroll-driven video settings.
    pub scroll_video: ScrollVideoConfig,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            svg_path: "./assets/collage.svg".to_string(),
            ids: ElementIds::default(),
            overlay_visible_class: "is-visible".to_string(),
            body_hidden_class: "overlay-hidden".to_string(),
            reveal: RevealConfig::default(),
            labels: ToggleLabels::default(),
            fallback_message:
                "Failed to load collage. Please use a local server to view this properly."
                    .to_string(),
            scroll_video: ScrollVideoConfig::default(),
        }
    }
}

impl PageConfig {
    /// Parse a (possibly partial) config from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Fixed element identifiers consumed from the page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ElementIds {
    /// Mount container for the SVG.
    pub stage: String,
    pub overlay: String,
    /// Mount point for the scroll-driven video.
    pub scroll_container: String,
    pub toggle_button: String,
}

impl Default for ElementIds {
    fn default() -> Self {
        Self {
            stage: "stage".to_string(),
            overlay: "gibs-overlay".to_string(),
            scroll_container: "scrolly-iphone".to_string(),
            toggle_button: "toggle-overlay-btn".to_string(),
        }
    }
}

/// Timing of the staggered layer reveal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RevealConfig {
    /// Delay before the first layer is revealed, in milliseconds (default: 100).
    pub base_delay_ms: u32,
    /// Extra delay per layer index, in milliseconds (default: 200).
    pub stagger_ms: u32,
    /// CSS opacity transition duration in seconds (default: 0.6).
    pub fade_secs: f32,
    /// CSS timing function for the fade (default: `ease-in-out`).
    pub fade_easing: String,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            base_delay_ms: 100,
            stagger_ms: 200,
            fade_secs: 0.6,
            fade_easing: "ease-in-out".to_string(),
        }
    }
}

/// Toggle button text for each overlay state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToggleLabels {
    /// Shown while the overlay is hidden.
    pub show: String,
    /// Shown while the overlay is visible.
    pub hide: String,
}

impl Default for ToggleLabels {
    fn default() -> Self {
        Self {
            show: "Show Phone".to_string(),
            hide: "Hide Phone".to_string(),
        }
    }
}

/// Settings handed to the external scroll-video constructor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrollVideoConfig {
    pub src: String,
    pub cover: bool,
    pub sticky: bool,
    pub full: bool,
    pub track_scroll: bool,
    pub transition_speed: f64,
    /// Listeners are attached again after this delay in case `onReady`
    /// never fires (default: 500).
    pub fallback_attach_ms: u32,
}

impl Default for ScrollVideoConfig {
    fn default() -> Self {
        Self {
            src: "./assets/gibs-Detail.mp4".to_string(),
            cover: true,
            sticky: false,
            full: false,
            track_scroll: false,
            transition_speed: 8.0,
            fallback_attach_ms: 500,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_page_constants() {
        let config = PageConfig::default();
        assert_eq!(config.svg_path, "./assets/collage.svg");
        assert_eq!(config.ids.stage, "stage");
        assert_eq!(config.ids.overlay, "gibs-overlay");
        assert_eq!(config.ids.scroll_container, "scrolly-iphone");
        assert_eq!(config.ids.toggle_button, "toggle-overlay-btn");
        assert_eq!(config.reveal.stagger_ms, 200);
        assert_eq!(config.scroll_video.fallback_attach_ms, 500);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let json = r#"{
            "svg_path": "./other.svg",
            "reveal": { "stagger_ms": 50 },
            "labels": { "show": "Open" }
        }"#;
        let config = PageConfig::from_json(json).unwrap();
        assert_eq!(config.svg_path, "./other.svg");
        assert_eq!(config.reveal.stagger_ms, 50);
        assert_eq!(config.reveal.base_delay_ms, 100);
        assert_eq!(config.labels.show, "Open");
        assert_eq!(config.labels.hide, "Hide Phone");
        assert_eq!(config.ids, ElementIds::default());
    }

    #[test]
    fn empty_object_is_default() {
        let config = PageConfig::from_json("{}").unwrap();
        assert_eq!(config, PageConfig::default());
    }

    #[test]
    fn invalid_json_is_an_error() {
        assert!(PageConfig::from_json("{ not json").is_err());
    }
}
