use reveal_engine::PageConfig;

/// The collage page: a Figma-exported SVG at `./assets/collage.svg`, an
/// iPhone overlay and a scroll-driven detail video.
///
/// To export the SVG from Figma, select the collage frame and export it as
/// SVG with "include id attribute" enabled.
pub fn collage_config() -> PageConfig {
    PageConfig::default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collage_uses_page_defaults() {
        let config = collage_config();
        assert_eq!(config.svg_path, "./assets/collage.svg");
        assert_eq!(config.scroll_video.src, "./assets/gibs-Detail.mp4");
        assert_eq!(config.overlay_visible_class, "is-visible");
        assert_eq!(config.body_hidden_class, "overlay-hidden");
    }
}
