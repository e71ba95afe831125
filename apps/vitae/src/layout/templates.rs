//! Template catalogue. Each template is a constant `LayoutConfig`; the engine itself
//! is template-agnostic.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::layout::commands::Rgb;
use crate::layout::font_metrics::FontFamily;
use crate::models::profile::SectionKind;

/// A4 portrait in PDF points.
pub const A4_WIDTH: f32 = 595.28;
pub const A4_HEIGHT: f32 = 841.89;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateId {
    #[default]
    Mit,
    Oxford,
    Stanford,
    Minimalist,
    Creative,
}

impl TemplateId {
    pub const ALL: [TemplateId; 5] = [
        TemplateId::Mit,
        TemplateId::Oxford,
        TemplateId::Stanford,
        TemplateId::Minimalist,
        TemplateId::Creative,
    ];

    pub fn id(self) -> &'static str {
        match self {
            TemplateId::Mit => "mit",
            TemplateId::Oxford => "oxford",
            TemplateId::Stanford => "stanford",
            TemplateId::Minimalist => "minimalist",
            TemplateId::Creative => "creative",
        }
    }

    /// Display name, also used in PDF filenames.
    pub fn name(self) -> &'static str {
        match self {
            TemplateId::Mit => "MIT",
            TemplateId::Oxford => "Oxford",
            TemplateId::Stanford => "Stanford",
            TemplateId::Minimalist => "Minimalist",
            TemplateId::Creative => "Creative",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            TemplateId::Mit => "Compact serif layout, education first, ruled uppercase headings",
            TemplateId::Oxford => "Traditional serif layout with wide margins and a references note",
            TemplateId::Stanford => "Sans-serif layout with a navy accent and a summary excerpt in the header",
            TemplateId::Minimalist => "Airy sans-serif layout without rules",
            TemplateId::Creative => "Sans-serif layout with a purple accent, experience first",
        }
    }

    /// Case-insensitive lookup; `None` for unknown ids.
    pub fn from_id(raw: &str) -> Option<TemplateId> {
        let raw = raw.trim();
        TemplateId::ALL
            .into_iter()
            .find(|template| template.id().eq_ignore_ascii_case(raw))
    }

    /// Like `from_id`, but unknown ids fall back to the default template.
    pub fn resolve(raw: &str) -> TemplateId {
        TemplateId::from_id(raw).unwrap_or_else(|| {
            let fallback = TemplateId::default();
            warn!(requested = raw, fallback = fallback.id(), "Unknown template id, using fallback");
            fallback
        })
    }

    pub fn config(self) -> LayoutConfig {
        match self {
            TemplateId::Mit => MIT,
            TemplateId::Oxford => OXFORD,
            TemplateId::Stanford => STANFORD,
            TemplateId::Minimalist => MINIMALIST,
            TemplateId::Creative => CREATIVE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Margins {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Margins {
    const fn uniform(pt: f32) -> Self {
        Margins {
            top: pt,
            right: pt,
            bottom: pt,
            left: pt,
        }
    }
}

/// Everything the layout engine needs to know about a template.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutConfig {
    pub template: TemplateId,
    pub page_width: f32,
    pub page_height: f32,
    pub margins: Margins,
    pub font: FontFamily,

    /// `(longer_than_chars, size)` pairs checked in order; first hit wins.
    pub name_sizes: &'static [(usize, f32)],
    pub name_size_default: f32,
    pub heading_size: f32,
    pub body_size: f32,
    pub detail_size: f32,
    /// Line advance as a multiple of the font size.
    pub line_height: f32,

    pub section_gap: f32,
    pub entry_gap: f32,
    /// Space between a heading (or its rule) and the section body.
    pub heading_gap: f32,
    pub bullet_indent: f32,
    /// Joins GPA and CGPA on an education entry.
    pub grade_separator: &'static str,

    pub text_color: Rgb,
    pub muted_color: Rgb,
    pub accent_color: Rgb,

    pub section_order: [SectionKind; 5],
    pub summary_title: &'static str,
    pub uppercase_headings: bool,
    pub ruled_headings: bool,
    /// Entries lead with the organization (company / school) instead of the role.
    pub org_first: bool,
    pub center_header: bool,
    /// Summary excerpt budget (chars) printed in the header; the full summary
    /// section is then only laid out when the summary is longer than the budget.
    pub header_summary_excerpt: Option<usize>,
    pub footer_note: Option<&'static str>,
}

impl LayoutConfig {
    pub fn content_left(&self) -> f32 {
        self.margins.left
    }

    pub fn content_right(&self) -> f32 {
        self.page_width - self.margins.right
    }

    pub fn content_width(&self) -> f32 {
        self.content_right() - self.content_left()
    }

    pub fn content_top(&self) -> f32 {
        self.margins.top
    }

    pub fn content_bottom(&self) -> f32 {
        self.page_height - self.margins.bottom
    }

    pub fn content_height(&self) -> f32 {
        self.content_bottom() - self.content_top()
    }

    /// Name size picked by the length of the trimmed name.
    pub fn name_size(&self, name: &str) -> f32 {
        let length = name.trim().chars().count();
        self.name_sizes
            .iter()
            .find(|(longer_than, _)| length > *longer_than)
            .map(|(_, size)| *size)
            .unwrap_or(self.name_size_default)
    }
}

const GRAY_900: Rgb = Rgb(17, 24, 39);
const GRAY_800: Rgb = Rgb(31, 41, 55);
const GRAY_700: Rgb = Rgb(55, 65, 81);
const GRAY_600: Rgb = Rgb(75, 85, 99);

const EDUCATION_FIRST: [SectionKind; 5] = [
    SectionKind::Education,
    SectionKind::Experience,
    SectionKind::Summary,
    SectionKind::Skills,
    SectionKind::Languages,
];

const SUMMARY_THEN_EDUCATION: [SectionKind; 5] = [
    SectionKind::Summary,
    SectionKind::Education,
    SectionKind::Experience,
    SectionKind::Skills,
    SectionKind::Languages,
];

const SUMMARY_THEN_EXPERIENCE: [SectionKind; 5] = [
    SectionKind::Summary,
    SectionKind::Experience,
    SectionKind::Education,
    SectionKind::Skills,
    SectionKind::Languages,
];

pub const MIT: LayoutConfig = LayoutConfig {
    template: TemplateId::Mit,
    page_width: A4_WIDTH,
    page_height: A4_HEIGHT,
    margins: Margins::uniform(48.0),
    font: FontFamily::Times,
    name_sizes: &[(35, 13.5), (28, 16.5), (20, 19.5)],
    name_size_default: 24.0,
    heading_size: 9.0,
    body_size: 8.25,
    detail_size: 7.5,
    line_height: 1.3,
    section_gap: 10.0,
    entry_gap: 6.0,
    heading_gap: 4.0,
    bullet_indent: 10.0,
    grade_separator: " | ",
    text_color: GRAY_900,
    muted_color: GRAY_600,
    accent_color: GRAY_900,
    section_order: EDUCATION_FIRST,
    summary_title: "Summary",
    uppercase_headings: true,
    ruled_headings: true,
    org_first: true,
    center_header: false,
    header_summary_excerpt: None,
    footer_note: None,
};

pub const OXFORD: LayoutConfig = LayoutConfig {
    template: TemplateId::Oxford,
    page_width: A4_WIDTH,
    page_height: A4_HEIGHT,
    margins: Margins::uniform(72.0),
    font: FontFamily::Times,
    name_sizes: &[(35, 15.0), (28, 18.0), (20, 21.0)],
    name_size_default: 24.0,
    heading_size: 10.5,
    body_size: 9.0,
    detail_size: 8.25,
    line_height: 1.45,
    section_gap: 14.0,
    entry_gap: 8.0,
    heading_gap: 6.0,
    bullet_indent: 12.0,
    grade_separator: " | ",
    text_color: GRAY_900,
    muted_color: GRAY_600,
    accent_color: GRAY_800,
    section_order: SUMMARY_THEN_EDUCATION,
    summary_title: "Personal Statement",
    uppercase_headings: true,
    ruled_headings: true,
    org_first: true,
    center_header: true,
    header_summary_excerpt: None,
    footer_note: Some("References available upon request"),
};

pub const STANFORD: LayoutConfig = LayoutConfig {
    template: TemplateId::Stanford,
    page_width: A4_WIDTH,
    page_height: A4_HEIGHT,
    margins: Margins::uniform(48.0),
    font: FontFamily::Helvetica,
    name_sizes: &[(30, 15.0), (24, 18.0), (18, 21.0)],
    name_size_default: 24.0,
    heading_size: 9.75,
    body_size: 8.25,
    detail_size: 7.5,
    line_height: 1.3,
    section_gap: 12.0,
    entry_gap: 6.0,
    heading_gap: 4.0,
    bullet_indent: 10.0,
    grade_separator: " • ",
    text_color: GRAY_900,
    muted_color: GRAY_600,
    accent_color: Rgb(26, 54, 93),
    section_order: SUMMARY_THEN_EXPERIENCE,
    summary_title: "About",
    uppercase_headings: true,
    ruled_headings: true,
    org_first: false,
    center_header: false,
    header_summary_excerpt: Some(120),
    footer_note: None,
};

pub const MINIMALIST: LayoutConfig = LayoutConfig {
    template: TemplateId::Minimalist,
    page_width: A4_WIDTH,
    page_height: A4_HEIGHT,
    margins: Margins::uniform(72.0),
    font: FontFamily::Helvetica,
    name_sizes: &[(35, 16.5), (28, 19.5), (20, 22.5)],
    name_size_default: 27.0,
    heading_size: 9.0,
    body_size: 8.25,
    detail_size: 7.5,
    line_height: 1.4,
    section_gap: 16.0,
    entry_gap: 8.0,
    heading_gap: 6.0,
    bullet_indent: 10.0,
    grade_separator: " | ",
    text_color: GRAY_900,
    muted_color: GRAY_600,
    accent_color: GRAY_700,
    section_order: SUMMARY_THEN_EXPERIENCE,
    summary_title: "Profile",
    uppercase_headings: true,
    ruled_headings: false,
    org_first: false,
    center_header: false,
    header_summary_excerpt: None,
    footer_note: None,
};

pub const CREATIVE: LayoutConfig = LayoutConfig {
    template: TemplateId::Creative,
    page_width: A4_WIDTH,
    page_height: A4_HEIGHT,
    margins: Margins::uniform(48.0),
    font: FontFamily::Helvetica,
    name_sizes: &[(35, 15.0), (28, 18.0), (20, 21.0)],
    name_size_default: 27.0,
    heading_size: 10.5,
    body_size: 8.25,
    detail_size: 7.5,
    line_height: 1.3,
    section_gap: 12.0,
    entry_gap: 7.0,
    heading_gap: 5.0,
    bullet_indent: 10.0,
    grade_separator: " | ",
    text_color: GRAY_900,
    muted_color: GRAY_600,
    accent_color: Rgb(118, 75, 162),
    section_order: SUMMARY_THEN_EXPERIENCE,
    summary_title: "About Me",
    uppercase_headings: true,
    ruled_headings: true,
    org_first: false,
    center_header: false,
    header_summary_excerpt: None,
    footer_note: None,
};
