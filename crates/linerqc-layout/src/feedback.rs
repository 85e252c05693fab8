//! Visual feedback descriptors for the external canvas renderer.

use serde::{Deserialize, Serialize};

use crate::snap::SnapLine;

/// Overlay description recomputed every update tick. The engine never draws.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisualFeedback {
    pub show_snap_lines: bool,
    pub snap_lines: Vec<SnapLine>,
    pub show_constraint_indicator: bool,
    pub constraint_message: String,
}

impl VisualFeedback {
    /// Nothing to draw.
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn from_tick(lines: Vec<SnapLine>, violation: Option<&str>) -> Self {
        Self {
            show_snap_lines: !lines.is_empty(),
            snap_lines: lines,
            show_constraint_indicator: violation.is_some(),
            constraint_message: violation.unwrap_or_default().to_string(),
        }
    }

    /// Combine two overlays (e.g. a resize and an unrelated move).
    #[must_use]
    pub fn merged(mut self, other: &VisualFeedback) -> Self {
        self.snap_lines.extend_from_slice(&other.snap_lines);
        self.show_snap_lines = !self.snap_lines.is_empty();
        if other.show_constraint_indicator {
            if self.show_constraint_indicator {
                self.constraint_message.push_str("; ");
            }
            self.constraint_message.push_str(&other.constraint_message);
            self.show_constraint_indicator = true;
        }
        self
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        !self.show_snap_lines && !self.show_constraint_indicator
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_SNAP_LINE_COLOR;

    fn line(x: f64) -> SnapLine {
        SnapLine {
            x1: x,
            y1: 0.0,
            x2: x,
            y2: 10.0,
            color: DEFAULT_SNAP_LINE_COLOR,
        }
    }

    #[test]
    fn flags_follow_content() {
        let feedback = VisualFeedback::from_tick(vec![line(1.0)], None);
        assert!(feedback.show_snap_lines);
        assert!(!feedback.show_constraint_indicator);
        assert!(feedback.constraint_message.is_empty());
        assert!(VisualFeedback::none().is_empty());
    }

    #[test]
    fn merge_concatenates_lines_and_messages() {
        let a = VisualFeedback::from_tick(vec![line(1.0)], Some("width clamped to minimum"));
        let b = VisualFeedback::from_tick(vec![line(2.0)], Some("outside container"));
        let merged = a.merged(&b);
        assert_eq!(merged.snap_lines.len(), 2);
        assert_eq!(
            merged.constraint_message,
            "width clamped to minimum; outside container"
        );
    }

    #[test]
    fn serializes_camel_case() {
        let json = serde_json::to_value(VisualFeedback::none()).expect("serialize feedback");
        assert_eq!(json["showSnapLines"], false);
        assert_eq!(json["constraintMessage"], "");
    }
}
