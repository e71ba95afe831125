//! PDF writing surface: plays `PageCommand`s into a PDF 1.4 file using the base-14
//! fonts (no embedding), WinAnsi encoded.
//!
//! Output is byte-for-byte deterministic for a given command stream: the document
//! info carries no timestamp.

use bytes::Bytes;
use thiserror::Error;

use crate::layout::commands::{PageCommand, Rgb};
use crate::layout::font_metrics::{FontFamily, FontStyle};
use crate::layout::templates::LayoutConfig;

#[derive(Debug, Error)]
pub enum SurfaceError {
    #[error("non-finite coordinate in {0}")]
    InvalidCoordinate(&'static str),

    #[error("font size must be positive, got {0}")]
    InvalidFontSize(f32),
}

/// A page-rendering surface. Coordinates follow `PageCommand`: top-left origin,
/// `y` is the text baseline.
pub trait RenderSurface {
    fn start_page(&mut self) -> Result<(), SurfaceError>;

    fn place_text(
        &mut self,
        x: f32,
        y: f32,
        text: &str,
        style: FontStyle,
        size: f32,
        color: Rgb,
    ) -> Result<(), SurfaceError>;

    fn draw_rule(&mut self, x1: f32, y1: f32, x2: f32, y2: f32) -> Result<(), SurfaceError>;

    /// Number of pages started so far.
    fn page_count(&self) -> usize;
}

/// Plays a command stream onto `surface`. The first page is started implicitly, so
/// the played document has `StartNewPage` count + 1 pages.
pub fn play<S: RenderSurface>(
    commands: &[PageCommand],
    surface: &mut S,
) -> Result<(), SurfaceError> {
    surface.start_page()?;
    for command in commands {
        match command {
            PageCommand::PlaceText {
                x,
                y,
                text,
                style,
                size,
                color,
            } => surface.place_text(*x, *y, text, *style, *size, *color)?,
            PageCommand::DrawRule { x1, y1, x2, y2 } => surface.draw_rule(*x1, *y1, *x2, *y2)?,
            PageCommand::StartNewPage => surface.start_page()?,
        }
    }
    Ok(())
}

fn check_finite(what: &'static str, values: &[f32]) -> Result<(), SurfaceError> {
    if values.iter().all(|v| v.is_finite()) {
        Ok(())
    } else {
        Err(SurfaceError::InvalidCoordinate(what))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// PDF surface
// ────────────────────────────────────────────────────────────────────────────

const RULE_WIDTH: f32 = 0.5;
const RULE_GRAY: f32 = 0.2;
const PRODUCER: &str = "vitae";

pub struct PdfSurface {
    family: FontFamily,
    page_width: f32,
    page_height: f32,
    title: String,
    /// One content stream per page.
    pages: Vec<String>,
}

impl PdfSurface {
    pub fn new(config: &LayoutConfig, title: &str) -> Self {
        PdfSurface {
            family: config.font,
            page_width: config.page_width,
            page_height: config.page_height,
            title: title.to_string(),
            pages: Vec::new(),
        }
    }

    fn current_page(&mut self) -> &mut String {
        if self.pages.is_empty() {
            self.pages.push(String::new());
        }
        let last = self.pages.len() - 1;
        &mut self.pages[last]
    }

    fn font_resource(style: FontStyle) -> &'static str {
        match style {
            FontStyle::Regular => "F1",
            FontStyle::Bold => "F2",
            FontStyle::Italic => "F3",
            FontStyle::BoldItalic => "F4",
        }
    }

    /// Serializes the document: catalog, page tree, page/content pairs, fonts, info,
    /// cross-reference table and trailer.
    pub fn finish(mut self) -> Bytes {
        if self.pages.is_empty() {
            self.pages.push(String::new());
        }
        let page_count = self.pages.len();
        let font_start = 3 + page_count * 2;
        let info_id = font_start + FontStyle::ALL.len();

        let mut pdf: Vec<u8> = Vec::new();
        let mut offsets: Vec<usize> = Vec::new();
        pdf.extend_from_slice(b"%PDF-1.4\n%\xE2\xE3\xCF\xD3\n");

        offsets.push(pdf.len());
        pdf.extend_from_slice(b"1 0 obj\n<< /Type /Catalog /Pages 2 0 R >>\nendobj\n");

        let kids = (0..page_count)
            .map(|index| format!("{} 0 R", 3 + index * 2))
            .collect::<Vec<_>>()
            .join(" ");
        offsets.push(pdf.len());
        pdf.extend_from_slice(
            format!("2 0 obj\n<< /Type /Pages /Kids [{kids}] /Count {page_count} >>\nendobj\n")
                .as_bytes(),
        );

        let fonts = (0..FontStyle::ALL.len())
            .map(|index| format!("/F{} {} 0 R", index + 1, font_start + index))
            .collect::<Vec<_>>()
            .join(" ");
        for (index, stream) in self.pages.iter().enumerate() {
            let page_id = 3 + index * 2;
            offsets.push(pdf.len());
            pdf.extend_from_slice(
                format!(
                    "{page_id} 0 obj\n<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {:.2} {:.2}] /Contents {} 0 R /Resources << /Font << {fonts} >> >> >>\nendobj\n",
                    self.page_width,
                    self.page_height,
                    page_id + 1,
                )
                .as_bytes(),
            );
            offsets.push(pdf.len());
            pdf.extend_from_slice(
                format!(
                    "{} 0 obj\n<< /Length {} >>\nstream\n{stream}endstream\nendobj\n",
                    page_id + 1,
                    stream.len(),
                )
                .as_bytes(),
            );
        }

        for (index, style) in FontStyle::ALL.iter().enumerate() {
            offsets.push(pdf.len());
            pdf.extend_from_slice(
                format!(
                    "{} 0 obj\n<< /Type /Font /Subtype /Type1 /BaseFont /{} /Encoding /WinAnsiEncoding >>\nendobj\n",
                    font_start + index,
                    self.family.base_font(*style),
                )
                .as_bytes(),
            );
        }

        offsets.push(pdf.len());
        pdf.extend_from_slice(
            format!(
                "{info_id} 0 obj\n<< /Title ({}) /Producer ({PRODUCER}) >>\nendobj\n",
                escape_pdf_string(&self.title)
            )
            .as_bytes(),
        );

        let xref_start = pdf.len();
        pdf.extend_from_slice(format!("xref\n0 {}\n", offsets.len() + 1).as_bytes());
        pdf.extend_from_slice(b"0000000000 65535 f \n");
        for offset in &offsets {
            pdf.extend_from_slice(format!("{offset:010} 00000 n \n").as_bytes());
        }
        pdf.extend_from_slice(
            format!(
                "trailer\n<< /Size {} /Root 1 0 R /Info {info_id} 0 R >>\nstartxref\n{xref_start}\n%%EOF\n",
                offsets.len() + 1
            )
            .as_bytes(),
        );
        Bytes::from(pdf)
    }
}

impl RenderSurface for PdfSurface {
    fn start_page(&mut self) -> Result<(), SurfaceError> {
        self.pages.push(String::new());
        Ok(())
    }

    fn place_text(
        &mut self,
        x: f32,
        y: f32,
        text: &str,
        style: FontStyle,
        size: f32,
        color: Rgb,
    ) -> Result<(), SurfaceError> {
        check_finite("place_text", &[x, y, size])?;
        if size <= 0.0 {
            return Err(SurfaceError::InvalidFontSize(size));
        }
        let (r, g, b) = color.unit();
        let pdf_y = self.page_height - y;
        let op = format!(
            "BT /{} {size:.2} Tf {r:.3} {g:.3} {b:.3} rg {x:.2} {pdf_y:.2} Td ({}) Tj ET\n",
            Self::font_resource(style),
            escape_pdf_string(text),
        );
        self.current_page().push_str(&op);
        Ok(())
    }

    fn draw_rule(&mut self, x1: f32, y1: f32, x2: f32, y2: f32) -> Result<(), SurfaceError> {
        check_finite("draw_rule", &[x1, y1, x2, y2])?;
        let height = self.page_height;
        let op = format!(
            "{RULE_WIDTH:.2} w {RULE_GRAY:.2} G {x1:.2} {:.2} m {x2:.2} {:.2} l S\n",
            height - y1,
            height - y2,
        );
        self.current_page().push_str(&op);
        Ok(())
    }

    fn page_count(&self) -> usize {
        self.pages.len()
    }
}

/// Escapes a string for a PDF literal, mapping to WinAnsi byte codes.
///
/// Latin-1 characters keep their code point, a few typographic characters map to
/// their WinAnsi slots, anything else becomes `?`.
pub fn escape_pdf_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '(' => out.push_str("\\("),
            ')' => out.push_str("\\)"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            ' '..='~' => out.push(c),
            _ => match win_ansi_code(c) {
                Some(code) => out.push_str(&format!("\\{code:03o}")),
                None => out.push('?'),
            },
        }
    }
    out
}

fn win_ansi_code(c: char) -> Option<u8> {
    let code = match c {
        '€' => 0x80,
        '‚' => 0x82,
        '„' => 0x84,
        '…' => 0x85,
        '‘' => 0x91,
        '’' => 0x92,
        '“' => 0x93,
        '”' => 0x94,
        '•' => 0x95,
        '–' => 0x96,
        '—' => 0x97,
        '™' => 0x99,
        '\u{A0}'..='\u{FF}' => c as u32,
        _ => return None,
    };
    u8::try_from(code).ok()
}

/// Plays an already laid out command stream into PDF bytes.
pub fn encode_pdf(
    commands: &[PageCommand],
    config: &LayoutConfig,
    title: &str,
) -> Result<Bytes, SurfaceError> {
    let mut surface = PdfSurface::new(config, title);
    play(commands, &mut surface)?;
    Ok(surface.finish())
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::engine::layout_profile;
    use crate::layout::templates::{MIT, STANFORD};
    use crate::models::profile::{ExperienceEntry, Profile};

    fn as_text(bytes: &Bytes) -> String {
        String::from_utf8_lossy(bytes).into_owned()
    }

    #[test]
    fn test_escape_pdf_string() {
        assert_eq!(escape_pdf_string("(a) \\ b"), "\\(a\\) \\\\ b");
        assert_eq!(escape_pdf_string("•"), "\\225");
        assert_eq!(escape_pdf_string("café"), "caf\\351");
        assert_eq!(escape_pdf_string("€5"), "\\2005");
        assert_eq!(escape_pdf_string("中"), "?");
    }

    #[test]
    fn test_document_structure() {
        let commands = layout_profile(&Profile::sample(), &MIT);
        let pdf = encode_pdf(&commands, &MIT, "Alex Developer").unwrap();
        let text = as_text(&pdf);
        assert!(text.starts_with("%PDF-1.4\n"));
        assert!(text.ends_with("%%EOF\n"));
        assert!(text.contains("/Count 1"));
        assert!(text.contains("/BaseFont /Times-Roman"));
        assert!(text.contains("/BaseFont /Times-Bold "));
        assert!(text.contains("(Alex Developer) Tj"));
        assert!(text.contains("/Title (Alex Developer)"));
    }

    #[test]
    fn test_xref_offsets_point_at_objects() {
        let commands = layout_profile(&Profile::sample(), &STANFORD);
        let pdf = encode_pdf(&commands, &STANFORD, "Resume").unwrap();
        // Offsets are byte positions; the header comment is not UTF-8, so stay on bytes.
        let xref = pdf.windows(5).position(|w| w == b"xref\n").unwrap();
        let table = String::from_utf8_lossy(&pdf[xref..]).into_owned();
        let entries: Vec<usize> = table
            .lines()
            .skip(3)
            .take_while(|line| line.ends_with(" n "))
            .map(|line| line[..10].parse().unwrap())
            .collect();
        assert!(!entries.is_empty());
        for (index, offset) in entries.iter().enumerate() {
            let expected = format!("{} 0 obj", index + 1);
            assert!(
                pdf[*offset..].starts_with(expected.as_bytes()),
                "object {} not at offset {offset}",
                index + 1
            );
        }
        let startxref: usize = table
            .lines()
            .skip_while(|line| *line != "startxref")
            .nth(1)
            .unwrap()
            .parse()
            .unwrap();
        assert_eq!(startxref, xref);
    }

    #[test]
    fn test_page_count_matches_commands() {
        let mut profile = Profile::sample();
        profile.experience = (1..=6)
            .map(|id| ExperienceEntry {
                id,
                title: "Engineer".to_string(),
                description: "- Shipped a feature that moved a metric\n".repeat(20),
                ..ExperienceEntry::default()
            })
            .collect();
        let commands = layout_profile(&profile, &MIT);
        let expected = commands
            .iter()
            .filter(|c| matches!(c, PageCommand::StartNewPage))
            .count()
            + 1;
        assert!(expected > 1);

        let mut surface = PdfSurface::new(&MIT, "Resume");
        play(&commands, &mut surface).unwrap();
        assert_eq!(surface.page_count(), expected);
        let text = as_text(&surface.finish());
        assert!(text.contains(&format!("/Count {expected}")));
        assert_eq!(text.matches("/Type /Page ").count(), expected);
    }

    #[test]
    fn test_output_is_deterministic() {
        let commands = layout_profile(&Profile::sample(), &MIT);
        let first = encode_pdf(&commands, &MIT, "Resume").unwrap();
        let second = encode_pdf(&commands, &MIT, "Resume").unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_non_finite_coordinate_rejected() {
        let commands = vec![PageCommand::DrawRule {
            x1: 0.0,
            y1: f32::NAN,
            x2: 10.0,
            y2: 10.0,
        }];
        let err = encode_pdf(&commands, &MIT, "Resume").unwrap_err();
        assert!(matches!(err, SurfaceError::InvalidCoordinate("draw_rule")));
    }

    #[test]
    fn test_y_is_flipped_to_bottom_origin() {
        let mut surface = PdfSurface::new(&MIT, "t");
        surface.start_page().unwrap();
        surface
            .place_text(48.0, 100.0, "Hi", FontStyle::Regular, 10.0, Rgb::BLACK)
            .unwrap();
        let text = as_text(&surface.finish());
        assert!(text.contains("48.00 741.89 Td (Hi) Tj"));
    }
}
