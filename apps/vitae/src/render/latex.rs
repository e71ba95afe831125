//! LaTeX source generator (article class, A4, 2cm margins).
//!
//! Every free-text field passes through `escape_latex`; URLs inside `\href{}` go
//! through `escape_latex_url` and their display text through `escape_latex`.

use crate::models::profile::{EducationEntry, Profile, SectionKind};
use crate::render::formatters::{
    collapse_blank_lines, date_range, display_url, escape_latex, escape_latex_url,
    github_display, github_url, grade_line, link_url, split_bullets,
};

const PREAMBLE: &str = r"\documentclass[11pt,a4paper]{article}
\usepackage[utf8]{inputenc}
\usepackage{geometry}
\geometry{left=2cm, right=2cm, top=2cm, bottom=2cm}
\usepackage{enumitem}
\usepackage{hyperref}";

fn href(url: &str, label: &str) -> String {
    format!(r"\href{{{}}}{{{}}}", escape_latex_url(url), escape_latex(label))
}

fn present(parts: Vec<String>, separator: &str) -> String {
    parts
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(separator)
}

fn contact_block(profile: &Profile) -> Option<String> {
    let contact = present(
        [&profile.email, &profile.phone, &profile.location]
            .iter()
            .map(|field| escape_latex(field.trim()))
            .collect(),
        " -- ",
    );

    let mut links = Vec::new();
    if !profile.linkedin.trim().is_empty() {
        links.push(href(&link_url(&profile.linkedin), &display_url(&profile.linkedin)));
    }
    if !profile.github.trim().is_empty() {
        links.push(format!(
            "GitHub: {}",
            href(&github_url(&profile.github), &github_display(&profile.github))
        ));
    }
    if !profile.portfolio.trim().is_empty() {
        links.push(href(&link_url(&profile.portfolio), &display_url(&profile.portfolio)));
    }
    let links = links.join(" -- ");

    let lines = present(vec![contact, links], " \\\\\n    ");
    if lines.is_empty() {
        None
    } else {
        Some(format!("\\begin{{center}}\n    {lines}\n\\end{{center}}"))
    }
}

fn experience_section(profile: &Profile) -> String {
    let mut out = vec![
        r"\section*{Experience}".to_string(),
        r"\begin{itemize}[leftmargin=*]".to_string(),
    ];
    for job in &profile.experience {
        let title = job.title.trim();
        let company = job.company.trim();
        let mut head = match (title.is_empty(), company.is_empty()) {
            (false, false) => format!(
                r"\textbf{{{}}} at \textit{{{}}}",
                escape_latex(title),
                escape_latex(company)
            ),
            (false, true) => format!(r"\textbf{{{}}}", escape_latex(title)),
            (true, false) => format!(r"\textit{{{}}}", escape_latex(company)),
            (true, true) => String::new(),
        };
        let dates = date_range(&job.start_date, &job.end_date, " -- ");
        if !dates.is_empty() {
            head.push_str(&format!(r" \hfill {}", escape_latex(&dates)));
        }
        out.push(format!(r"    \item {head}").trim_end().to_string());

        let bullets = split_bullets(&job.description);
        if !bullets.is_empty() {
            out.push(r"    \begin{itemize}".to_string());
            for bullet in bullets {
                out.push(format!(r"        \item {}", escape_latex(&bullet)));
            }
            out.push(r"    \end{itemize}".to_string());
        }
        out.push(r"    \vspace{0.2cm}".to_string());
    }
    out.push(r"\end{itemize}".to_string());
    out.join("\n")
}

fn education_section(profile: &Profile) -> String {
    let mut out = vec![
        r"\section*{Education}".to_string(),
        r"\begin{itemize}[leftmargin=*]".to_string(),
    ];
    for edu in &profile.education {
        let degree = edu.degree.trim();
        let mut head = present(
            vec![
                if degree.is_empty() {
                    String::new()
                } else {
                    format!(r"\textbf{{{}}}", escape_latex(degree))
                },
                escape_latex(edu.school.trim()),
            ],
            ", ",
        );
        let year = edu.year.trim();
        if !year.is_empty() {
            head.push_str(&format!(r" \hfill {}", escape_latex(year)));
        }
        // The separator is markup, so only the grade values are escaped.
        let escaped = EducationEntry {
            gpa: edu.gpa().map(escape_latex),
            cgpa: edu.cgpa().map(escape_latex),
            ..EducationEntry::default()
        };
        let grades = grade_line(&escaped, r" $\bullet$ ");
        let head = head.trim();
        match grades {
            // `\\` needs a line to end; grades alone go on the item line.
            Some(grades) if head.is_empty() => out.push(format!(r"    \item {grades}")),
            Some(grades) => {
                out.push(format!(r"    \item {head}"));
                out.push(format!(r"    \\ {grades}"));
            }
            None => out.push(format!(r"    \item {head}").trim_end().to_string()),
        }
    }
    out.push(r"\end{itemize}".to_string());
    out.join("\n")
}

fn languages_section(profile: &Profile) -> String {
    let mut out = vec![
        r"\section*{Languages}".to_string(),
        r"\begin{itemize}[leftmargin=*]".to_string(),
    ];
    for lang in &profile.languages {
        out.push(format!(
            r"    \item \textbf{{{}}}: {}",
            escape_latex(lang.language.trim()),
            escape_latex(lang.proficiency.as_str())
        ));
    }
    out.push(r"\end{itemize}".to_string());
    out.join("\n")
}

/// Full LaTeX document. Sections appear in the order summary, experience,
/// education, skills, languages, each only when populated.
pub fn generate_latex(profile: &Profile) -> String {
    let mut parts = vec![
        PREAMBLE.to_string(),
        format!(
            "\\title{{\\vspace{{-2cm}}{}}}\n\\date{{}}\n\\author{{}}",
            escape_latex(profile.full_name.trim())
        ),
        "\\begin{document}".to_string(),
        "\\maketitle\n\\vspace{-1.5cm}".to_string(),
    ];
    if let Some(contact) = contact_block(profile) {
        parts.push(contact);
    }
    parts.push("\\hrule\n\\vspace{0.5cm}".to_string());

    if profile.is_populated(SectionKind::Summary) {
        let summary = collapse_blank_lines(&profile.summary);
        parts.push(format!(
            "\\section*{{Professional Summary}}\n{}",
            escape_latex(&summary)
        ));
    }
    if profile.is_populated(SectionKind::Experience) {
        parts.push(experience_section(profile));
    }
    if profile.is_populated(SectionKind::Education) {
        parts.push(education_section(profile));
    }
    if profile.is_populated(SectionKind::Skills) {
        parts.push(format!(
            "\\section*{{Skills}}\n{}",
            escape_latex(&profile.skill_list().join(", "))
        ));
    }
    if profile.is_populated(SectionKind::Languages) {
        parts.push(languages_section(profile));
    }

    parts.push("\\end{document}".to_string());
    let mut doc = parts.join("\n\n");
    doc.push('\n');
    doc
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
