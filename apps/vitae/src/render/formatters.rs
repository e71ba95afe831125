//! Field formatters: small pure functions turning one profile field into a fragment
//! that is safe to embed in a given target grammar.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::models::profile::EducationEntry;

// ────────────────────────────────────────────────────────────────────────────
// URLs
// ────────────────────────────────────────────────────────────────────────────

const PROTOCOLS: [&str; 2] = ["https://", "http://"];

fn strip_protocol(url: &str) -> Option<&str> {
    PROTOCOLS.iter().find_map(|proto| {
        url.get(..proto.len())
            .filter(|head| head.eq_ignore_ascii_case(proto))
            .map(|_| &url[proto.len()..])
    })
}

/// URL for display: the leading `http://` / `https://` is dropped.
pub fn display_url(url: &str) -> String {
    let url = url.trim();
    strip_protocol(url).unwrap_or(url).to_string()
}

/// Navigable URL: `https://` is prepended when no protocol is present.
pub fn link_url(url: &str) -> String {
    let url = url.trim();
    if strip_protocol(url).is_some() {
        url.to_string()
    } else {
        format!("https://{url}")
    }
}

pub fn github_url(handle: &str) -> String {
    format!("https://github.com/{}", handle.trim())
}

pub fn github_display(handle: &str) -> String {
    format!("github.com/{}", handle.trim())
}

// ────────────────────────────────────────────────────────────────────────────
// Text blocks and lists
// ────────────────────────────────────────────────────────────────────────────

const BULLET_MARKERS: [char; 2] = ['-', '•'];

/// Splits a multi-line achievement block into bullet strings.
///
/// Blank lines are dropped and leading `-` / `•` markers are stripped. Lines that are
/// nothing but markers are dropped too, which keeps the function idempotent under
/// `split_bullets(&split_bullets(x).join("\n"))`.
pub fn split_bullets(text: &str) -> Vec<String> {
    text.lines()
        .map(|line| {
            let mut rest = line.trim();
            while let Some(stripped) = rest.strip_prefix(BULLET_MARKERS) {
                rest = stripped.trim_start();
            }
            rest.trim_end()
        })
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Splits a comma-separated field, trimming items and dropping empty ones.
pub fn split_list(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

/// Truncates to `budget` characters (not bytes, not words) and appends `...`.
pub fn truncate_excerpt(text: &str, budget: usize) -> String {
    if text.chars().count() <= budget {
        return text.to_string();
    }
    let mut excerpt: String = text.chars().take(budget).collect();
    excerpt.push_str("...");
    excerpt
}

/// Trims trailing whitespace per line, removes leading/trailing blank lines and
/// collapses runs of blank lines into a single one.
pub fn collapse_blank_lines(text: &str) -> String {
    let mut out: Vec<&str> = Vec::new();
    let mut pending_blank = false;
    for line in text.lines().map(str::trim_end) {
        if line.trim().is_empty() {
            pending_blank = !out.is_empty();
            continue;
        }
        if pending_blank {
            out.push("");
            pending_blank = false;
        }
        out.push(line);
    }
    out.join("\n")
}

/// Joins the non-blank parts with `separator`.
pub fn join_present(parts: &[&str], separator: &str) -> String {
    parts
        .iter()
        .map(|p| p.trim())
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(separator)
}

/// `start<sep>end`, or whichever side is present.
pub fn date_range(start: &str, end: &str, separator: &str) -> String {
    join_present(&[start, end], separator)
}

/// `GPA: x` and `CGPA: y` joined by `separator`; `None` when neither grade is set.
pub fn grade_line(entry: &EducationEntry, separator: &str) -> Option<String> {
    let grades: Vec<String> = [("GPA", entry.gpa()), ("CGPA", entry.cgpa())]
        .into_iter()
        .filter_map(|(label, value)| value.map(|v| format!("{label}: {v}")))
        .collect();
    if grades.is_empty() {
        None
    } else {
        Some(grades.join(separator))
    }
}

/// Filename stem derived from the person's name: whitespace runs, path separators and
/// control characters become `_`.
pub fn file_stem(full_name: &str) -> String {
    let stem = full_name
        .split_whitespace()
        .map(|word| {
            word.chars()
                .map(|c| {
                    if matches!(c, '/' | '\\') || c.is_control() {
                        '_'
                    } else {
                        c
                    }
                })
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("_");
    if stem.is_empty() {
        "Resume".to_string()
    } else {
        stem
    }
}

// ────────────────────────────────────────────────────────────────────────────
// LaTeX escaping
// ────────────────────────────────────────────────────────────────────────────

/// Characters that are syntactically significant in LaTeX body text.
pub const LATEX_ESCAPES: &[(char, &str)] = &[
    ('\\', r"\textbackslash{}"),
    ('&', r"\&"),
    ('%', r"\%"),
    ('$', r"\$"),
    ('#', r"\#"),
    ('_', r"\_"),
    ('{', r"\{"),
    ('}', r"\}"),
    ('~', r"\textasciitilde{}"),
    ('^', r"\textasciicircum{}"),
];

/// Escapes free text for LaTeX body mode. Single pass, so replacement text is
/// never escaped a second time.
pub fn escape_latex(text: &str) -> String {
    escape_with(text, LATEX_ESCAPES)
}

const LATEX_URL_ESCAPES: &[(char, &str)] = &[
    ('\\', "%5C"),
    ('%', r"\%"),
    ('#', r"\#"),
    ('{', "%7B"),
    ('}', "%7D"),
];

/// Escapes a URL for the first argument of `\href`.
pub fn escape_latex_url(url: &str) -> String {
    escape_with(url, LATEX_URL_ESCAPES)
}

fn escape_with(text: &str, table: &[(char, &str)]) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match table.iter().find(|(special, _)| *special == c) {
            Some((_, replacement)) => out.push_str(replacement),
            None => out.push(c),
        }
    }
    out
}

// ────────────────────────────────────────────────────────────────────────────
// Skill badges
// ────────────────────────────────────────────────────────────────────────────

struct Badge {
    needles: &'static [&'static str],
    label: &'static str,
    color: &'static str,
    logo: &'static str,
    logo_color: &'static str,
}

/// First match wins; `node` precedes the bare `js` needle and `typescript` precedes `java`.
#[rustfmt::skip]
const SKILL_BADGES: &[Badge] = &[
    Badge { needles: &["node"], label: "Node.js", color: "43853D", logo: "node.js", logo_color: "white" },
    Badge { needles: &["typescript"], label: "TypeScript", color: "007ACC", logo: "typescript", logo_color: "white" },
    Badge { needles: &["javascript", "js"], label: "JavaScript", color: "F7DF1E", logo: "javascript", logo_color: "black" },
    Badge { needles: &["react"], label: "React", color: "20232A", logo: "react", logo_color: "61DAFB" },
    Badge { needles: &["python"], label: "Python", color: "3776AB", logo: "python", logo_color: "white" },
    Badge { needles: &["java"], label: "Java", color: "ED8B00", logo: "java", logo_color: "white" },
    Badge { needles: &["sql"], label: "SQL", color: "4479A1", logo: "mysql", logo_color: "white" },
    Badge { needles: &["git"], label: "Git", color: "F05032", logo: "git", logo_color: "white" },
    Badge { needles: &["docker"], label: "Docker", color: "2496ED", logo: "docker", logo_color: "white" },
    Badge { needles: &["aws"], label: "AWS", color: "232F3E", logo: "amazon-aws", logo_color: "white" },
    Badge { needles: &["css"], label: "CSS3", color: "1572B6", logo: "css3", logo_color: "white" },
    Badge { needles: &["html"], label: "HTML5", color: "E34F26", logo: "html5", logo_color: "white" },
];

/// Same set `encodeURIComponent` leaves alone.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// shields.io badge image for a skill, with a generic blue badge as fallback.
pub fn skill_badge(skill: &str) -> String {
    let lower = skill.to_lowercase();
    match SKILL_BADGES
        .iter()
        .find(|badge| badge.needles.iter().any(|needle| lower.contains(needle)))
    {
        Some(badge) => format!(
            "![{label}](https://img.shields.io/badge/{label}-{color}?style=for-the-badge&logo={logo}&logoColor={logo_color})",
            label = badge.label,
            color = badge.color,
            logo = badge.logo,
            logo_color = badge.logo_color,
        ),
        None => format!(
            "![{skill}](https://img.shields.io/badge/{encoded}-blue?style=for-the-badge)",
            encoded = utf8_percent_encode(skill, URI_COMPONENT),
        ),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
