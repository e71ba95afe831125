//! Static font-metric tables for the two PDF base-14 families the templates use.
//!
//! Widths are in em units (AFM glyph widths / 1000), so a string's width in points is
//! `measure_str(s) * size_pt`. Tables cover ASCII 0x20..=0x7E (95 printable characters),
//! index = `(char as usize) - 32`. Bold and italic faces are not tabulated: they are
//! approximated by a per-style scale factor of at least 1.0, which keeps page estimates
//! conservative (text never measures narrower than it prints).

use serde::{Deserialize, Serialize};

// ────────────────────────────────────────────────────────────────────────────
// Font family and style
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontFamily {
    /// MIT and Oxford templates.
    Times,
    /// Stanford, Minimalist and Creative templates.
    Helvetica,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FontStyle {
    Regular,
    Bold,
    Italic,
    BoldItalic,
}

impl FontStyle {
    pub const ALL: [FontStyle; 4] = [
        FontStyle::Regular,
        FontStyle::Bold,
        FontStyle::Italic,
        FontStyle::BoldItalic,
    ];
}

impl FontFamily {
    /// PostScript name of the base-14 face for `style`.
    pub fn base_font(self, style: FontStyle) -> &'static str {
        match (self, style) {
            (FontFamily::Times, FontStyle::Regular) => "Times-Roman",
            (FontFamily::Times, FontStyle::Bold) => "Times-Bold",
            (FontFamily::Times, FontStyle::Italic) => "Times-Italic",
            (FontFamily::Times, FontStyle::BoldItalic) => "Times-BoldItalic",
            (FontFamily::Helvetica, FontStyle::Regular) => "Helvetica",
            (FontFamily::Helvetica, FontStyle::Bold) => "Helvetica-Bold",
            (FontFamily::Helvetica, FontStyle::Italic) => "Helvetica-Oblique",
            (FontFamily::Helvetica, FontStyle::BoldItalic) => "Helvetica-BoldOblique",
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Font metric table
// ────────────────────────────────────────────────────────────────────────────

/// Static character-width table for a font family (regular face).
///
/// Width array slot layout:
/// ```text
/// [0]=sp  [1]=!   [2]="   [3]=#   [4]=$   [5]=%   [6]=&   [7]='
/// [8]=(   [9]=)   [10]=*  [11]=+  [12]=,  [13]=-  [14]=.  [15]=/
/// [16..25]=0-9
/// [26]=:  [27]=;  [28]=<  [29]==  [30]=>  [31]=?  [32]=@
/// [33..58]=A-Z
/// [59]=[  [60]=\  [61]=]  [62]=^  [63]=_  [64]=`
/// [65..90]=a-z
/// [91]={  [92]=|  [93]=}  [94]=~
/// ```
pub struct FontMetricTable {
    widths: [f32; 95],
    /// Fallback width for non-ASCII characters (codepoints > 0x7E).
    pub average_char_width: f32,
    pub space_width: f32,
    /// Width multipliers for `[Regular, Bold, Italic, BoldItalic]`.
    style_scale: [f32; 4],
}

impl FontMetricTable {
    /// Measures a string in em units of the regular face.
    ///
    /// Non-ASCII characters fall back to `average_char_width`.
    pub fn measure_str(&self, s: &str) -> f32 {
        s.chars()
            .map(|c| {
                let code = c as usize;
                if (32..=126).contains(&code) {
                    self.widths[code - 32]
                } else {
                    self.average_char_width
                }
            })
            .sum()
    }

    pub fn style_scale(&self, style: FontStyle) -> f32 {
        match style {
            FontStyle::Regular => self.style_scale[0],
            FontStyle::Bold => self.style_scale[1],
            FontStyle::Italic => self.style_scale[2],
            FontStyle::BoldItalic => self.style_scale[3],
        }
    }

    /// Width in points of `s` set in `style` at `size_pt`.
    pub fn text_width(&self, s: &str, style: FontStyle, size_pt: f32) -> f32 {
        self.measure_str(s) * self.style_scale(style) * size_pt
    }

    /// Width in points of one inter-word space.
    pub fn space_width_pt(&self, style: FontStyle, size_pt: f32) -> f32 {
        self.space_width * self.style_scale(style) * size_pt
    }
}

/// Returns the static metric table for a family.
pub fn get_metrics(family: &FontFamily) -> &'static FontMetricTable {
    match family {
        FontFamily::Times => &TIMES_TABLE,
        FontFamily::Helvetica => &HELVETICA_TABLE,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Static width tables  (95 ASCII printable characters each)
// ────────────────────────────────────────────────────────────────────────────

/// Times-Roman AFM widths.
static TIMES_TABLE: FontMetricTable = FontMetricTable {
    #[rustfmt::skip]
    widths: [
        // sp     !      "      #      $      %      &      '      (      )      *      +      ,      -      .      /
        0.250, 0.333, 0.408, 0.500, 0.500, 0.833, 0.778, 0.180, 0.333, 0.333, 0.500, 0.564, 0.250, 0.333, 0.250, 0.278,
        // 0      1      2      3      4      5      6      7      8      9
        0.500, 0.500, 0.500, 0.500, 0.500, 0.500, 0.500, 0.500, 0.500, 0.500,
        // :      ;      <      =      >      ?      @
        0.278, 0.278, 0.564, 0.564, 0.564, 0.444, 0.921,
        // A      B      C      D      E      F      G      H      I      J      K      L      M
        0.722, 0.667, 0.667, 0.722, 0.611, 0.556, 0.722, 0.722, 0.333, 0.389, 0.722, 0.611, 0.889,
        // N      O      P      Q      R      S      T      U      V      W      X      Y      Z
        0.722, 0.722, 0.556, 0.722, 0.667, 0.556, 0.611, 0.722, 0.722, 0.944, 0.722, 0.722, 0.611,
        // [      \      ]      ^      _      `
        0.333, 0.278, 0.333, 0.469, 0.500, 0.333,
        // a      b      c      d      e      f      g      h      i      j      k      l      m
        0.444, 0.500, 0.444, 0.500, 0.444, 0.333, 0.500, 0.500, 0.278, 0.278, 0.500, 0.278, 0.778,
        // n      o      p      q      r      s      t      u      v      w      x      y      z
        0.500, 0.500, 0.500, 0.500, 0.333, 0.389, 0.278, 0.500, 0.500, 0.722, 0.500, 0.500, 0.444,
        // {      |      }      ~
        0.480, 0.200, 0.480, 0.541,
    ],
    average_char_width: 0.500,
    space_width: 0.250,
    style_scale: [1.0, 1.08, 1.0, 1.08],
};

/// Helvetica AFM widths.
static HELVETICA_TABLE: FontMetricTable = FontMetricTable {
    #[rustfmt::skip]
    widths: [
        // sp     !      "      #      $      %      &      '      (      )      *      +      ,      -      .      /
        0.278, 0.278, 0.355, 0.556, 0.556, 0.889, 0.667, 0.191, 0.333, 0.333, 0.389, 0.584, 0.278, 0.333, 0.278, 0.278,
        // 0      1      2      3      4      5      6      7      8      9
        0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556,
        // :      ;      <      =      >      ?      @
        0.278, 0.278, 0.584, 0.584, 0.584, 0.556, 1.015,
        // A      B      C      D      E      F      G      H      I      J      K      L      M
        0.667, 0.667, 0.722, 0.722, 0.667, 0.611, 0.778, 0.722, 0.278, 0.500, 0.667, 0.556, 0.833,
        // N      O      P      Q      R      S      T      U      V      W      X      Y      Z
        0.722, 0.778, 0.667, 0.778, 0.722, 0.667, 0.611, 0.722, 0.667, 0.944, 0.667, 0.667, 0.611,
        // [      \      ]      ^      _      `
        0.278, 0.278, 0.278, 0.469, 0.556, 0.333,
        // a      b      c      d      e      f      g      h      i      j      k      l      m
        0.556, 0.556, 0.500, 0.556, 0.556, 0.278, 0.556, 0.556, 0.222, 0.222, 0.500, 0.222, 0.833,
        // n      o      p      q      r      s      t      u      v      w      x      y      z
        0.556, 0.556, 0.556, 0.556, 0.333, 0.500, 0.278, 0.556, 0.500, 0.722, 0.500, 0.500, 0.500,
        // {      |      }      ~
        0.334, 0.260, 0.334, 0.584,
    ],
    average_char_width: 0.556,
    space_width: 0.278,
    style_scale: [1.0, 1.08, 1.0, 1.08],
};

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_measure_str_empty_is_zero() {
        assert_eq!(get_metrics(&FontFamily::Times).measure_str(""), 0.0);
    }

    #[test]
    fn test_measure_str_ascii_characters() {
        let metrics = get_metrics(&FontFamily::Helvetica);
        // "Rust" = R(0.722) + u(0.556) + s(0.500) + t(0.278) = 2.056
        let width = metrics.measure_str("Rust");
        assert!(
            (width - 2.056).abs() < 1e-3,
            "Rust width should be ~2.056, got {width}"
        );
    }

    #[test]
    fn test_measure_str_non_ascii_falls_back() {
        let metrics = get_metrics(&FontFamily::Times);
        let width = metrics.measure_str("é");
        assert!(
            (width - metrics.average_char_width).abs() < 1e-4,
            "non-ASCII should use average_char_width"
        );
    }

    #[test]
    fn test_text_width_scales_with_size() {
        let metrics = get_metrics(&FontFamily::Times);
        let at_10 = metrics.text_width("Resume", FontStyle::Regular, 10.0);
        let at_20 = metrics.text_width("Resume", FontStyle::Regular, 20.0);
        assert!((at_20 - 2.0 * at_10).abs() < 1e-3);
    }

    #[test]
    fn test_styled_faces_never_measure_narrower() {
        for family in [FontFamily::Times, FontFamily::Helvetica] {
            let metrics = get_metrics(&family);
            let regular = metrics.text_width("Senior Engineer", FontStyle::Regular, 11.0);
            for style in FontStyle::ALL {
                assert!(metrics.text_width("Senior Engineer", style, 11.0) >= regular);
            }
        }
    }

    #[test]
    fn test_times_narrower_than_helvetica() {
        let text = "Architected distributed caching layer";
        let times = get_metrics(&FontFamily::Times).measure_str(text);
        let helvetica = get_metrics(&FontFamily::Helvetica).measure_str(text);
        assert!(times < helvetica, "Times ({times}) should be narrower than Helvetica ({helvetica})");
    }

    #[test]
    fn test_base_font_names() {
        assert_eq!(FontFamily::Times.base_font(FontStyle::Regular), "Times-Roman");
        assert_eq!(
            FontFamily::Helvetica.base_font(FontStyle::BoldItalic),
            "Helvetica-BoldOblique"
        );
    }
}
