use crate::api::config::ToggleLabels;

/// Overlay visibility, toggled by the user. Starts hidden.
///
/// The body class is a projection of `hidden`; this struct is the source of
/// truth.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverlayToggle {
    hidden: bool,
}

/// What the page shows for a toggle state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToggleView {
    /// Whether the body carries the hidden class.
    pub hidden: bool,
    /// Value of the button's `aria-pressed` attribute.
    pub aria_pressed: &'static str,
    /// Button text.
    pub label: String,
}

impl OverlayToggle {
    pub fn new() -> Self {
        Self { hidden: true }
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    /// Flip the state and return the new view.
    pub fn toggle(&mut self, labels: &ToggleLabels) -> ToggleView {
        self.hidden = !self.hidden;
        self.view(labels)
    }

    pub fn view(&self, labels: &ToggleLabels) -> ToggleView {
        ToggleView {
            hidden: self.hidden,
            aria_pressed: if self.hidden { "false" } else { "true" },
            label: if self.hidden {
                labels.show.clone()
            } else {
                labels.hide.clone()
            },
        }
    }
}

impl Default for OverlayToggle {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_hidden() {
        let toggle = OverlayToggle::default();
        assert!(toggle.is_hidden());
        let view = toggle.view(&ToggleLabels::default());
        assert_eq!(view.aria_pressed, "false");
        assert_eq!(view.label, "Show Phone");
    }

    #[test]
    fn click_parity_decides_state() {
        let labels = ToggleLabels::default();
        let mut toggle = OverlayToggle::new();
        for clicks in 1..=6 {
            let view = toggle.toggle(&labels);
            let even = clicks % 2 == 0;
            assert_eq!(view.hidden, even, "after {clicks} clicks");
            assert_eq!(view.aria_pressed, if even { "false" } else { "true" });
            assert_eq!(view.label, if even { "Show Phone" } else { "Hide Phone" });
        }
    }

    #[test]
    fn uses_configured_labels() {
        let labels = ToggleLabels {
            show: "Open".to_string(),
            hide: "Close".to_string(),
        };
        let mut toggle = OverlayToggle::new();
        assert_eq!(toggle.toggle(&labels).label, "Close");
        assert_eq!(toggle.toggle(&labels).label, "Open");
    }
}
