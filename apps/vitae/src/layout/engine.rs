//! Page Layout Engine: turns a Profile into positioned `PageCommand`s for one template.
//!
//! # Architecture
//! - The document is a list of `Section`s (header, populated body sections in template
//!   order, optional footer).
//! - Each section is first built into horizontal *bands* (`Line`s) that know their height,
//!   so the space a section needs is known before anything is placed.
//! - `reduce_section` is a pure reducer `(Cursor, &Section) -> (Cursor, commands)`;
//!   `layout_profile` folds it over the sections and `page_count` is the same fold
//!   keeping only the cursor.
//!
//! # Pagination
//! Before a section is placed the engine asks for the whole section to fit when it fits
//! on a page, otherwise for its heading plus first entry (a heading is never stranded
//! at the bottom of a page). Every text band re-checks the bottom margin, so no
//! baseline lands below it. A page that is still empty never breaks.

use tracing::debug;

use crate::layout::commands::{FontStyle, PageCommand, Rgb};
use crate::layout::font_metrics::{get_metrics, FontMetricTable};
use crate::layout::templates::{LayoutConfig, TemplateId};
use crate::layout::wrap::wrap_text;
use crate::models::profile::{EducationEntry, ExperienceEntry, Profile, SectionKind};
use crate::render::formatters::{
    collapse_blank_lines, date_range, display_url, github_display, grade_line, join_present,
    split_bullets, truncate_excerpt,
};

const BULLET: &str = "•";
/// Horizontal gap kept between an entry's left label and its right-aligned date.
const DATE_GUTTER: f32 = 8.0;
/// Distance of a heading rule below the heading band.
const RULE_OFFSET: f32 = 2.0;

// ────────────────────────────────────────────────────────────────────────────
// Fold state
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cursor {
    /// Top of the next band, in points from the top edge.
    pub y: f32,
    pub page_index: usize,
}

impl Cursor {
    pub fn start(config: &LayoutConfig) -> Self {
        Cursor {
            y: config.content_top(),
            page_index: 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Section {
    /// Name, contact and links. Always laid out.
    Header,
    Body(SectionKind),
    Footer(&'static str),
}

/// The sections to lay out for `profile`, in document order.
pub fn sections(profile: &Profile, config: &LayoutConfig) -> Vec<Section> {
    let mut sections = vec![Section::Header];
    for kind in config.section_order {
        if !profile.is_populated(kind) {
            continue;
        }
        // With a header excerpt the full summary only earns a section when it was cut.
        if kind == SectionKind::Summary {
            if let Some(budget) = config.header_summary_excerpt {
                if flat_summary(profile).chars().count() <= budget {
                    continue;
                }
            }
        }
        sections.push(Section::Body(kind));
    }
    if let Some(note) = config.footer_note {
        sections.push(Section::Footer(note));
    }
    sections
}

/// The summary on one line, as the header excerpt shows it.
fn flat_summary(profile: &Profile) -> String {
    profile.summary.split_whitespace().collect::<Vec<_>>().join(" ")
}

// ────────────────────────────────────────────────────────────────────────────
// Bands
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy)]
struct Run {
    style: FontStyle,
    size: f32,
    color: Rgb,
}

#[derive(Debug, Clone)]
enum Item {
    /// `baseline` is measured from the top of the band.
    Text {
        x: f32,
        baseline: f32,
        text: String,
        run: Run,
    },
    Rule {
        x1: f32,
        x2: f32,
        offset: f32,
    },
}

/// One horizontal band. A band without items is vertical whitespace.
#[derive(Debug, Clone)]
struct Line {
    advance: f32,
    items: Vec<Item>,
}

impl Line {
    fn gap(advance: f32) -> Self {
        Line {
            advance,
            items: Vec::new(),
        }
    }
}

/// Bands grouped by what must stay together: `[heading, entry, entry, ...]`.
type Block = Vec<Line>;

fn block_height(block: &Block) -> f32 {
    block.iter().map(|line| line.advance).sum()
}

#[derive(Debug, Clone, Copy)]
enum Align {
    Left(f32),
    Center,
}

/// Read-only inputs shared by every reduction step.
pub struct LayoutContext<'a> {
    pub profile: &'a Profile,
    pub config: &'a LayoutConfig,
    metrics: &'static FontMetricTable,
}

impl<'a> LayoutContext<'a> {
    pub fn new(profile: &'a Profile, config: &'a LayoutConfig) -> Self {
        LayoutContext {
            profile,
            config,
            metrics: get_metrics(&config.font),
        }
    }

    fn run(&self, style: FontStyle, size: f32, color: Rgb) -> Run {
        Run { style, size, color }
    }

    fn width_of(&self, text: &str, run: Run) -> f32 {
        self.metrics.text_width(text, run.style, run.size)
    }

    /// Wraps `text` into `width` and returns one band per wrapped line.
    fn text_lines(&self, text: &str, run: Run, align: Align, width: f32) -> Vec<Line> {
        wrap_text(text, self.metrics, run.style, run.size, width)
            .into_iter()
            .map(|line| {
                let x = match align {
                    Align::Left(x) => x,
                    Align::Center => (self.config.page_width - self.width_of(&line, run)) / 2.0,
                };
                Line {
                    advance: run.size * self.config.line_height,
                    items: vec![Item::Text {
                        x,
                        baseline: run.size,
                        text: line,
                        run,
                    }],
                }
            })
            .collect()
    }

    fn body_lines(&self, text: &str, run: Run) -> Vec<Line> {
        self.text_lines(
            text,
            run,
            Align::Left(self.config.content_left()),
            self.config.content_width(),
        )
    }

    fn heading(&self, kind: SectionKind) -> Vec<Line> {
        let title = match kind {
            SectionKind::Summary => self.config.summary_title,
            SectionKind::Experience => "Experience",
            SectionKind::Education => "Education",
            SectionKind::Skills => "Skills",
            SectionKind::Languages => "Languages",
        };
        let title = if self.config.uppercase_headings {
            title.to_uppercase()
        } else {
            title.to_string()
        };
        let run = self.run(FontStyle::Bold, self.config.heading_size, self.config.accent_color);
        let mut lines = self.body_lines(&title, run);
        if self.config.ruled_headings {
            lines.push(Line {
                advance: self.config.heading_gap,
                items: vec![Item::Rule {
                    x1: self.config.content_left(),
                    x2: self.config.content_right(),
                    offset: RULE_OFFSET,
                }],
            });
        } else {
            lines.push(Line::gap(self.config.heading_gap));
        }
        lines
    }

    /// Left label (wrapped) with an optional right-aligned date on its first line.
    fn entry_head(&self, label: &str, date: &str) -> Vec<Line> {
        let config = self.config;
        let label_run = self.run(FontStyle::Bold, config.body_size, config.text_color);
        let date_run = self.run(FontStyle::Regular, config.detail_size, config.muted_color);
        let date = date.trim();
        let date_width = if date.is_empty() {
            0.0
        } else {
            self.width_of(date, date_run) + DATE_GUTTER
        };

        let mut lines = self.text_lines(
            label,
            label_run,
            Align::Left(config.content_left()),
            config.content_width() - date_width,
        );
        if !date.is_empty() {
            let item = Item::Text {
                x: config.content_right() - self.width_of(date, date_run),
                baseline: label_run.size,
                text: date.to_string(),
                run: date_run,
            };
            if lines.is_empty() {
                lines.push(Line::gap(label_run.size * config.line_height));
            }
            lines[0].items.push(item);
        }
        lines
    }

    fn bullets(&self, description: &str) -> Vec<Line> {
        let config = self.config;
        let run = self.run(FontStyle::Regular, config.body_size, config.text_color);
        let text_x = config.content_left() + config.bullet_indent;
        let mut lines = Vec::new();
        for bullet in split_bullets(description) {
            let mut wrapped = self.text_lines(
                &bullet,
                run,
                Align::Left(text_x),
                config.content_width() - config.bullet_indent,
            );
            if let Some(first) = wrapped.first_mut() {
                first.items.push(Item::Text {
                    x: config.content_left() + 2.0,
                    baseline: run.size,
                    text: BULLET.to_string(),
                    run,
                });
            }
            lines.append(&mut wrapped);
        }
        lines
    }

    fn experience_entry(&self, job: &ExperienceEntry) -> Block {
        let config = self.config;
        let (lead, second) = if config.org_first {
            (&job.company, &job.title)
        } else {
            (&job.title, &job.company)
        };
        let second_color = if config.org_first {
            config.text_color
        } else {
            config.accent_color
        };
        let mut block = self.entry_head(lead, &date_range(&job.start_date, &job.end_date, " - "));
        block.extend(self.body_lines(
            second,
            self.run(FontStyle::Italic, config.body_size, second_color),
        ));
        block.extend(self.bullets(&job.description));
        block
    }

    fn education_entry(&self, edu: &EducationEntry) -> Block {
        let config = self.config;
        let (lead, second) = if config.org_first {
            (&edu.school, &edu.degree)
        } else {
            (&edu.degree, &edu.school)
        };
        let mut block = self.entry_head(lead, &edu.year);
        block.extend(self.body_lines(
            second,
            self.run(FontStyle::Italic, config.body_size, config.text_color),
        ));
        if let Some(grades) = grade_line(edu, config.grade_separator) {
            block.extend(self.body_lines(
                &grades,
                self.run(FontStyle::Regular, config.detail_size, config.muted_color),
            ));
        }
        block
    }

    fn paragraph_lines(&self, text: &str) -> Vec<Line> {
        let run = self.run(FontStyle::Regular, self.config.body_size, self.config.text_color);
        collapse_blank_lines(text)
            .lines()
            .flat_map(|paragraph| {
                if paragraph.is_empty() {
                    vec![Line::gap(run.size * (self.config.line_height - 1.0) + run.size / 2.0)]
                } else {
                    self.body_lines(paragraph, run)
                }
            })
            .collect()
    }

    fn header(&self) -> Vec<Block> {
        let config = self.config;
        let profile = self.profile;
        let align = if config.center_header {
            Align::Center
        } else {
            Align::Left(config.content_left())
        };
        let width = config.content_width();
        let detail = self.run(FontStyle::Regular, config.detail_size, config.muted_color);

        let mut lines = self.text_lines(
            &profile.full_name,
            self.run(
                FontStyle::Bold,
                config.name_size(&profile.full_name),
                config.accent_color,
            ),
            align,
            width,
        );

        let contact = join_present(&[&profile.email, &profile.phone, &profile.location], " | ");
        lines.extend(self.text_lines(&contact, detail, align, width));

        let github = if profile.github.trim().is_empty() {
            String::new()
        } else {
            github_display(&profile.github)
        };
        let links = join_present(
            &[
                &display_url(&profile.linkedin),
                &github,
                &display_url(&profile.portfolio),
            ],
            " | ",
        );
        lines.extend(self.text_lines(&links, detail, align, width));

        if let Some(budget) = config.header_summary_excerpt {
            if profile.is_populated(SectionKind::Summary) {
                let excerpt = truncate_excerpt(&flat_summary(profile), budget);
                lines.push(Line::gap(config.detail_size / 2.0));
                lines.extend(self.text_lines(
                    &excerpt,
                    self.run(FontStyle::Italic, config.detail_size, config.muted_color),
                    align,
                    width,
                ));
            }
        }
        vec![lines]
    }

    fn body(&self, kind: SectionKind) -> Vec<Block> {
        let config = self.config;
        let profile = self.profile;
        let mut heading = vec![Line::gap(config.section_gap)];
        heading.extend(self.heading(kind));
        let mut blocks = vec![heading];

        let body_run = self.run(FontStyle::Regular, config.body_size, config.text_color);
        match kind {
            SectionKind::Summary => blocks.push(self.paragraph_lines(&profile.summary)),
            SectionKind::Experience => {
                for (index, job) in profile.experience.iter().enumerate() {
                    let mut block = if index > 0 {
                        vec![Line::gap(config.entry_gap)]
                    } else {
                        Vec::new()
                    };
                    block.extend(self.experience_entry(job));
                    blocks.push(block);
                }
            }
            SectionKind::Education => {
                for (index, edu) in profile.education.iter().enumerate() {
                    let mut block = if index > 0 {
                        vec![Line::gap(config.entry_gap)]
                    } else {
                        Vec::new()
                    };
                    block.extend(self.education_entry(edu));
                    blocks.push(block);
                }
            }
            SectionKind::Skills => {
                blocks.push(self.body_lines(&profile.skill_list().join(", "), body_run));
            }
            SectionKind::Languages => {
                let entries: Vec<String> = profile
                    .languages
                    .iter()
                    .map(|lang| join_present(&[&lang.language, lang.proficiency.as_str()], " - "))
                    .filter(|entry| !entry.is_empty())
                    .collect();
                blocks.push(self.body_lines(&entries.join(" | "), body_run));
            }
        }
        blocks
    }

    fn footer(&self, note: &str) -> Vec<Block> {
        let config = self.config;
        let mut lines = vec![Line::gap(config.section_gap)];
        lines.extend(self.text_lines(
            note,
            self.run(FontStyle::Italic, config.detail_size, config.muted_color),
            Align::Center,
            config.content_width(),
        ));
        vec![lines]
    }

    fn blocks(&self, section: &Section) -> Vec<Block> {
        match section {
            Section::Header => self.header(),
            Section::Body(kind) => self.body(*kind),
            Section::Footer(note) => self.footer(note),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Placement
// ────────────────────────────────────────────────────────────────────────────

struct Placer<'a> {
    cursor: Cursor,
    config: &'a LayoutConfig,
    commands: Vec<PageCommand>,
}

impl<'a> Placer<'a> {
    fn is_fresh(&self) -> bool {
        self.cursor.y <= self.config.content_top()
    }

    fn ensure_space(&mut self, needed: f32) {
        if !self.is_fresh() && self.cursor.y + needed > self.config.content_bottom() {
            self.commands.push(PageCommand::StartNewPage);
            self.cursor = Cursor {
                y: self.config.content_top(),
                page_index: self.cursor.page_index + 1,
            };
        }
    }

    fn place(&mut self, line: &Line) {
        if line.items.is_empty() {
            // Whitespace is dropped at the top of a page.
            if !self.is_fresh() {
                self.cursor.y += line.advance;
            }
            return;
        }
        self.ensure_space(line.advance);
        let top = self.cursor.y;
        for item in &line.items {
            let command = match item {
                Item::Text {
                    x,
                    baseline,
                    text,
                    run,
                } => PageCommand::PlaceText {
                    x: *x,
                    y: top + baseline,
                    text: text.clone(),
                    style: run.style,
                    size: run.size,
                    color: run.color,
                },
                Item::Rule { x1, x2, offset } => PageCommand::DrawRule {
                    x1: *x1,
                    y1: top + offset,
                    x2: *x2,
                    y2: top + offset,
                },
            };
            self.commands.push(command);
        }
        self.cursor.y += line.advance;
    }
}

/// Lays out one section starting at `cursor`. Pure: same inputs, same output.
pub fn reduce_section(
    cursor: Cursor,
    section: &Section,
    ctx: &LayoutContext<'_>,
) -> (Cursor, Vec<PageCommand>) {
    let blocks = ctx.blocks(section);
    let total: f32 = blocks.iter().map(block_height).sum();
    let needed = if total <= ctx.config.content_height() {
        total
    } else {
        // keep-with-next: heading plus the first entry
        blocks.iter().take(2).map(block_height).sum()
    };

    let mut placer = Placer {
        cursor,
        config: ctx.config,
        commands: Vec::new(),
    };
    placer.ensure_space(needed);
    for line in blocks.iter().flatten() {
        placer.place(line);
    }
    (placer.cursor, placer.commands)
}

// ────────────────────────────────────────────────────────────────────────────
// Entry points
// ────────────────────────────────────────────────────────────────────────────

/// Full command stream for `profile` laid out with `config`.
pub fn layout_profile(profile: &Profile, config: &LayoutConfig) -> Vec<PageCommand> {
    let ctx = LayoutContext::new(profile, config);
    let (cursor, commands) = sections(profile, config).iter().fold(
        (Cursor::start(config), Vec::new()),
        |(cursor, mut commands), section| {
            let (next, emitted) = reduce_section(cursor, section, &ctx);
            commands.extend(emitted);
            (next, commands)
        },
    );
    debug!(
        template = config.template.id(),
        commands = commands.len(),
        pages = cursor.page_index + 1,
        "Profile laid out"
    );
    commands
}

pub fn layout_for_template(profile: &Profile, template: TemplateId) -> Vec<PageCommand> {
    layout_profile(profile, &template.config())
}

/// Dry run: the page count `layout_profile` would produce, keeping only the cursor.
pub fn page_count(profile: &Profile, config: &LayoutConfig) -> usize {
    let ctx = LayoutContext::new(profile, config);
    sections(profile, config)
        .iter()
        .fold(Cursor::start(config), |cursor, section| {
            reduce_section(cursor, section, &ctx).0
        })
        .page_index
        + 1
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::commands::pages_in;
    use crate::layout::templates::{MIT, OXFORD, STANFORD};

    fn jane_doe() -> Profile {
        Profile {
            full_name: "Jane Doe".to_string(),
            ..Profile::default()
        }
    }

    fn texts(commands: &[PageCommand]) -> Vec<&str> {
        commands
            .iter()
            .filter_map(|command| match command {
                PageCommand::PlaceText { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    fn assert_inside_margins(commands: &[PageCommand], config: &LayoutConfig) {
        for command in commands {
            if let PageCommand::PlaceText { y, size, text, .. } = command {
                assert!(
                    *y <= config.content_bottom(),
                    "'{text}' baseline {y} below bottom margin {}",
                    config.content_bottom()
                );
                assert!(*y - size >= config.content_top() - 0.01, "'{text}' above top margin");
            }
        }
    }

    fn long_job(id: u64, bullets: usize) -> ExperienceEntry {
        ExperienceEntry {
            id,
            title: "Engineer".to_string(),
            company: "Acme".to_string(),
            start_date: "2020".to_string(),
            end_date: "Present".to_string(),
            description: (0..bullets)
                .map(|i| format!("- Delivered improvement number {i} across the platform"))
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }

    #[test]
    fn test_name_only_profile_is_single_text_command() {
        let commands = layout_profile(&jane_doe(), &MIT);
        assert_eq!(commands.len(), 1);
        match &commands[0] {
            PageCommand::PlaceText {
                x, text, style, size, ..
            } => {
                assert_eq!(text, "Jane Doe");
                assert_eq!(*style, FontStyle::Bold);
                assert_eq!(*size, 24.0);
                assert_eq!(*x, MIT.content_left());
            }
            other => panic!("unexpected command {other:?}"),
        }
        assert_eq!(page_count(&jane_doe(), &MIT), 1);
    }

    #[test]
    fn test_every_template_lays_out_sample_on_one_page() {
        let sample = Profile::sample();
        for template in TemplateId::ALL {
            let config = template.config();
            let commands = layout_profile(&sample, &config);
            assert!(!commands.is_empty());
            assert_eq!(pages_in(&commands), 1, "{template:?}");
            assert_eq!(page_count(&sample, &config), 1, "{template:?}");
            assert_inside_margins(&commands, &config);
        }
    }

    #[test]
    fn test_layout_is_deterministic() {
        let sample = Profile::sample();
        assert_eq!(
            layout_for_template(&sample, TemplateId::Creative),
            layout_for_template(&sample, TemplateId::Creative)
        );
    }

    #[test]
    fn test_dates_are_right_aligned() {
        let commands = layout_profile(&Profile::sample(), &MIT);
        let metrics = get_metrics(&MIT.font);
        let date = commands
            .iter()
            .find_map(|command| match command {
                PageCommand::PlaceText {
                    x,
                    text,
                    style,
                    size,
                    ..
                } if text == "2021 - Present" => Some((*x, metrics.text_width(text, *style, *size))),
                _ => None,
            })
            .expect("date placed");
        assert!((date.0 + date.1 - MIT.content_right()).abs() < 0.01);
    }

    #[test]
    fn test_org_first_templates_lead_with_company() {
        let sample = Profile::sample();
        let mit = layout_profile(&sample, &MIT);
        let mit_texts = texts(&mit);
        let company = mit_texts.iter().position(|t| *t == "Tech Solutions Inc.").unwrap();
        let title = mit_texts.iter().position(|t| *t == "Senior Frontend Engineer").unwrap();
        assert!(company < title);

        let stanford = layout_profile(&sample, &STANFORD);
        let stanford_texts = texts(&stanford);
        let company = stanford_texts.iter().position(|t| *t == "Tech Solutions Inc.").unwrap();
        let title = stanford_texts
            .iter()
            .position(|t| *t == "Senior Frontend Engineer")
            .unwrap();
        assert!(title < company);
    }

    #[test]
    fn test_unpopulated_sections_emit_nothing() {
        let mut profile = Profile::sample();
        profile.experience.clear();
        profile.skills = " , ".to_string();
        let commands = layout_profile(&profile, &MIT);
        let texts = texts(&commands);
        assert!(!texts.contains(&"EXPERIENCE"));
        assert!(!texts.contains(&"SKILLS"));
        assert!(texts.contains(&"EDUCATION"));
        let rules = commands
            .iter()
            .filter(|c| matches!(c, PageCommand::DrawRule { .. }))
            .count();
        // education, summary, languages
        assert_eq!(rules, 3);
    }

    #[test]
    fn test_long_profile_paginates_inside_margins() {
        let mut profile = jane_doe();
        profile.experience = (1..=6).map(|id| long_job(id, 12)).collect();
        let commands = layout_profile(&profile, &MIT);
        assert!(pages_in(&commands) >= 2);
        assert_eq!(pages_in(&commands), page_count(&profile, &MIT));
        assert_inside_margins(&commands, &MIT);
    }

    #[test]
    fn test_y_is_monotonic_within_each_page() {
        let mut profile = Profile::sample();
        profile.experience = (1..=8).map(|id| long_job(id, 10)).collect();
        let commands = layout_profile(&profile, &OXFORD);
        let mut last_y = 0.0_f32;
        for command in &commands {
            match command {
                PageCommand::StartNewPage => last_y = 0.0,
                PageCommand::PlaceText { y, .. } => {
                    assert!(*y >= last_y - 0.01, "y went back up: {y} after {last_y}");
                    last_y = *y;
                }
                PageCommand::DrawRule { y1, .. } => {
                    assert!(*y1 >= last_y - 0.01);
                    last_y = *y1;
                }
            }
        }
    }

    #[test]
    fn test_heading_never_ends_a_page() {
        let mut profile = Profile::sample();
        profile.experience = (1..=10).map(|id| long_job(id, 4)).collect();
        profile.education = (1..=10)
            .map(|id| EducationEntry {
                id,
                degree: "Certificate".to_string(),
                school: "Open University".to_string(),
                year: "2015".to_string(),
                ..EducationEntry::default()
            })
            .collect();
        let headings = ["EDUCATION", "EXPERIENCE", "SUMMARY", "SKILLS", "LANGUAGES"];
        let commands = layout_profile(&profile, &MIT);
        assert!(pages_in(&commands) >= 2);
        let mut last_text: Option<&str> = None;
        for command in &commands {
            match command {
                PageCommand::PlaceText { text, .. } => last_text = Some(text),
                PageCommand::StartNewPage => {
                    let text = last_text.unwrap_or_default();
                    assert!(!headings.contains(&text), "page ends with heading {text}");
                }
                PageCommand::DrawRule { .. } => {}
            }
        }
    }

    #[test]
    fn test_page_count_grows_with_content() {
        let mut previous = 0;
        for bullets in (0..=120).step_by(8) {
            let mut profile = jane_doe();
            profile.experience = vec![long_job(1, bullets)];
            let pages = page_count(&profile, &MIT);
            assert!(pages >= previous, "{bullets} bullets: {pages} < {previous}");
            previous = pages;
        }
        assert!(previous > 1);
    }

    #[test]
    fn test_entries_taller_than_a_page_add_a_break_each() {
        let n = 3;
        let mut long = jane_doe();
        long.experience = (1..=n).map(|id| long_job(id, 90)).collect();
        let mut emptied = long.clone();
        for job in &mut emptied.experience {
            job.description.clear();
        }
        let breaks = |profile: &Profile| pages_in(&layout_profile(profile, &MIT)) - 1;
        assert!(breaks(&long) >= breaks(&emptied) + (n as usize - 1));
    }

    #[test]
    fn test_overlong_token_is_emitted_unbroken() {
        let mut profile = jane_doe();
        let token = "x".repeat(300);
        profile.skills = token.clone();
        let commands = layout_profile(&profile, &MIT);
        assert!(texts(&commands).contains(&token.as_str()));
    }

    #[test]
    fn test_stanford_summary_excerpt() {
        let mut profile = jane_doe();
        profile.summary = "Short summary.".to_string();
        let short = layout_profile(&profile, &STANFORD);
        assert!(texts(&short).contains(&"Short summary."));
        assert!(!texts(&short).contains(&"ABOUT"));

        profile.summary = "word ".repeat(40);
        let long = layout_profile(&profile, &STANFORD);
        let long_texts = texts(&long);
        assert!(long_texts.contains(&"ABOUT"));
        assert!(long_texts.iter().any(|t| t.ends_with("...")));
    }

    #[test]
    fn test_stanford_excerpt_ignores_line_break_padding() {
        let mut profile = jane_doe();
        profile.summary = format!("Short summary.{}End.", "\n".repeat(150));
        assert!(!sections(&profile, &STANFORD).contains(&Section::Body(SectionKind::Summary)));

        let commands = layout_profile(&profile, &STANFORD);
        assert_eq!(texts(&commands), ["Jane Doe", "Short summary. End."]);
    }

    #[test]
    fn test_grade_separator_follows_template() {
        let mut profile = jane_doe();
        profile.education.push(EducationEntry {
            id: 1,
            degree: "MSc".to_string(),
            gpa: Some("3.9".to_string()),
            cgpa: Some("9.1".to_string()),
            ..EducationEntry::default()
        });
        let stanford = layout_profile(&profile, &STANFORD);
        assert!(texts(&stanford).contains(&"GPA: 3.9 • CGPA: 9.1"));
        let mit = layout_profile(&profile, &MIT);
        assert!(texts(&mit).contains(&"GPA: 3.9 | CGPA: 9.1"));
    }

    #[test]
    fn test_oxford_footer_is_last() {
        let commands = layout_profile(&Profile::sample(), &OXFORD);
        assert_eq!(
            texts(&commands).last().copied(),
            Some("References available upon request")
        );
    }
}
