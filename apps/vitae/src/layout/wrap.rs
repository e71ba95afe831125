//! Greedy word wrap against the static metric tables.

use crate::layout::font_metrics::{FontMetricTable, FontStyle};

/// Wraps `text` into lines no wider than `max_width` points.
///
/// Whitespace runs collapse to single spaces. A token wider than `max_width` on its
/// own is emitted unbroken on its own line and may overflow. Empty text yields no lines.
pub fn wrap_text(
    text: &str,
    metrics: &FontMetricTable,
    style: FontStyle,
    size_pt: f32,
    max_width: f32,
) -> Vec<String> {
    let space_w = metrics.space_width_pt(style, size_pt);
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut current_width = 0.0_f32;

    for word in text.split_whitespace() {
        let word_w = metrics.text_width(word, style, size_pt);
        if current.is_empty() {
            current.push_str(word);
            current_width = word_w;
        } else if current_width + space_w + word_w > max_width {
            // Line full: flush it and start the next one with this word.
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
            current_width = word_w;
        } else {
            current.push(' ');
            current.push_str(word);
            current_width += space_w + word_w;
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}
