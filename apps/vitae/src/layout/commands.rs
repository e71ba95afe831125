//! Drawing commands produced by the layout engine and played by a writing surface.
//!
//! Coordinates are PDF points with the origin at the top-left of the page; `y` of a
//! `PlaceText` is the text baseline.

use serde::{Deserialize, Serialize};

pub use crate::layout::font_metrics::FontStyle;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0, 0, 0);

    /// Components scaled to `0.0..=1.0`, as PDF color operators expect.
    pub fn unit(self) -> (f32, f32, f32) {
        (
            f32::from(self.0) / 255.0,
            f32::from(self.1) / 255.0,
            f32::from(self.2) / 255.0,
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PageCommand {
    PlaceText {
        x: f32,
        y: f32,
        text: String,
        style: FontStyle,
        size: f32,
        color: Rgb,
    },
    DrawRule {
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
    },
    StartNewPage,
}

/// Number of pages a command stream occupies once played.
pub fn pages_in(commands: &[PageCommand]) -> usize {
    commands
        .iter()
        .filter(|command| matches!(command, PageCommand::StartNewPage))
        .count()
        + 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pages_in_counts_breaks() {
        assert_eq!(pages_in(&[]), 1);
        let commands = vec![
            PageCommand::DrawRule {
                x1: 0.0,
                y1: 10.0,
                x2: 100.0,
                y2: 10.0,
            },
            PageCommand::StartNewPage,
            PageCommand::StartNewPage,
        ];
        assert_eq!(pages_in(&commands), 3);
    }

    #[test]
    fn test_command_wire_format() {
        let json = serde_json::to_value(PageCommand::PlaceText {
            x: 48.0,
            y: 60.0,
            text: "Jane".to_string(),
            style: FontStyle::BoldItalic,
            size: 24.0,
            color: Rgb(26, 54, 93),
        })
        .unwrap();
        assert_eq!(json["kind"], "place_text");
        assert_eq!(json["style"], "bold_italic");
        assert_eq!(json["color"], serde_json::json!([26, 54, 93]));
    }

    #[test]
    fn test_rgb_unit() {
        let (r, g, b) = Rgb(255, 0, 51).unit();
        assert_eq!((r, g), (1.0, 0.0));
        assert!((b - 0.2).abs() < 1e-6);
    }
}
