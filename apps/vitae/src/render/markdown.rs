//! Markdown generators: a plain resume and a GitHub-profile README flavour.
//!
//! Both build a list of non-empty blocks and join them with exactly one blank line,
//! so an omitted section can never leave a stray separator behind. Free text goes
//! through `collapse_blank_lines`, which keeps blank lines inside a block single.

use crate::models::profile::{Profile, SectionKind};
use crate::render::formatters::{
    collapse_blank_lines, date_range, github_display, github_url, grade_line, join_present,
    link_url, skill_badge, split_bullets,
};

/// Accumulates blocks, silently skipping empty ones.
#[derive(Default)]
struct Blocks(Vec<String>);

impl Blocks {
    fn push(&mut self, block: impl Into<String>) {
        let block = collapse_blank_lines(&block.into());
        if !block.is_empty() {
            self.0.push(block);
        }
    }

    fn finish(self) -> String {
        self.0.join("\n\n")
    }
}

fn bold(text: &str) -> String {
    let text = text.trim();
    if text.is_empty() {
        String::new()
    } else {
        format!("**{text}**")
    }
}

fn bullet_list(description: &str) -> String {
    split_bullets(description)
        .iter()
        .map(|line| format!("- {line}"))
        .collect::<Vec<_>>()
        .join("\n")
}

fn heading(level: usize, text: &str) -> String {
    let text = text.trim();
    if text.is_empty() {
        String::new()
    } else {
        format!("{} {text}", "#".repeat(level))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Plain resume
// ────────────────────────────────────────────────────────────────────────────

/// Plain Markdown resume. Section order: identity, contact, links, summary,
/// experience, education, skills, languages.
pub fn generate_markdown(profile: &Profile) -> String {
    let mut blocks = Blocks::default();

    blocks.push(heading(1, &profile.full_name));
    blocks.push(join_present(
        &[&profile.email, &profile.phone, &profile.location],
        " | ",
    ));

    let mut links = Vec::new();
    if !profile.linkedin.trim().is_empty() {
        links.push(format!("[LinkedIn]({})", link_url(&profile.linkedin)));
    }
    if !profile.github.trim().is_empty() {
        links.push(format!("[GitHub]({})", github_url(&profile.github)));
    }
    if !profile.portfolio.trim().is_empty() {
        links.push(format!("[Portfolio]({})", link_url(&profile.portfolio)));
    }
    blocks.push(links.join(" | "));

    if profile.is_populated(SectionKind::Summary) {
        blocks.push("## Professional Summary");
        blocks.push(profile.summary.as_str());
    }

    if profile.is_populated(SectionKind::Experience) {
        blocks.push("## Experience");
        for job in &profile.experience {
            let meta = join_present(
                &[
                    &bold(&job.company),
                    &date_range(&job.start_date, &job.end_date, " - "),
                ],
                " | ",
            );
            blocks.push(join_lines(&[heading(3, &job.title), meta]));
            blocks.push(bullet_list(&job.description));
        }
    }

    if profile.is_populated(SectionKind::Education) {
        blocks.push("## Education");
        for edu in &profile.education {
            let grades = grade_line(edu, " | ").unwrap_or_default();
            let meta = join_present(&[&bold(&edu.school), &edu.year, &grades], " | ");
            blocks.push(join_lines(&[heading(3, &edu.degree), meta]));
        }
    }

    if profile.is_populated(SectionKind::Skills) {
        blocks.push("## Skills");
        blocks.push(profile.skill_list().join(", "));
    }

    if profile.is_populated(SectionKind::Languages) {
        blocks.push("## Languages");
        blocks.push(
            profile
                .languages
                .iter()
                .map(|lang| format!("- {} - {}", bold(&lang.language), lang.proficiency))
                .collect::<Vec<_>>()
                .join("\n"),
        );
    }

    blocks.finish()
}

/// Joins the non-empty lines of a block with single newlines.
fn join_lines(lines: &[String]) -> String {
    lines
        .iter()
        .filter(|line| !line.is_empty())
        .cloned()
        .collect::<Vec<_>>()
        .join("\n")
}

// ────────────────────────────────────────────────────────────────────────────
// GitHub README flavour
// ────────────────────────────────────────────────────────────────────────────

const STATS_THEME: &str = "theme=radical&hide_border=true";

/// GitHub-profile README: centered header with badge links, stats cards when a
/// GitHub handle is present, skill badges, then experience, education, languages.
pub fn generate_readme(profile: &Profile) -> String {
    let mut blocks = Blocks::default();

    blocks.push(r#"<div align="center">"#);
    blocks.push(heading(1, &profile.full_name));

    let mut contacts = Vec::new();
    if !profile.email.trim().is_empty() {
        contacts.push(format!("📧 {}", profile.email.trim()));
    }
    if !profile.phone.trim().is_empty() {
        contacts.push(format!("📱 {}", profile.phone.trim()));
    }
    if !profile.location.trim().is_empty() {
        contacts.push(format!("📍 {}", profile.location.trim()));
    }
    blocks.push(contacts.join(" • "));

    let mut badges = Vec::new();
    if !profile.linkedin.trim().is_empty() {
        badges.push(format!(
            "[![LinkedIn](https://img.shields.io/badge/LinkedIn-0077B5?style=for-the-badge&logo=linkedin&logoColor=white)]({})",
            link_url(&profile.linkedin)
        ));
    }
    if !profile.github.trim().is_empty() {
        badges.push(format!(
            "[![GitHub](https://img.shields.io/badge/GitHub-100000?style=for-the-badge&logo=github&logoColor=white)]({})",
            github_url(&profile.github)
        ));
    }
    if !profile.portfolio.trim().is_empty() {
        badges.push(format!(
            "[![Portfolio](https://img.shields.io/badge/Portfolio-255E63?style=for-the-badge&logo=About.me&logoColor=white)]({})",
            link_url(&profile.portfolio)
        ));
    }
    blocks.push(badges.join("\n"));
    blocks.push("</div>");
    blocks.push("---");

    let handle = profile.github.trim();
    if !handle.is_empty() {
        blocks.push("## 📊 GitHub Stats");
        blocks.push(r#"<div align="center">"#);
        blocks.push(format!(
            "![GitHub Stats](https://github-readme-stats.vercel.app/api?username={handle}&show_icons=true&{STATS_THEME})\n\
             ![Top Langs](https://github-readme-stats.vercel.app/api/top-langs/?username={handle}&layout=compact&{STATS_THEME})\n\
             ![GitHub Streak](https://github-readme-streak-stats.herokuapp.com/?user={handle}&{STATS_THEME})"
        ));
        blocks.push("</div>");
    }

    if profile.is_populated(SectionKind::Summary) {
        blocks.push("## 💼 Professional Summary");
        blocks.push(profile.summary.as_str());
    }

    if profile.is_populated(SectionKind::Skills) {
        blocks.push("## 🛠️ Skills & Technologies");
        blocks.push(
            profile
                .skill_list()
                .iter()
                .map(|skill| skill_badge(skill))
                .collect::<Vec<_>>()
                .join(" "),
        );
    }

    if profile.is_populated(SectionKind::Experience) {
        blocks.push("## 💻 Experience");
        for (index, job) in profile.experience.iter().enumerate() {
            if index > 0 {
                blocks.push("---");
            }
            let meta = join_present(
                &[
                    &bold(&job.company),
                    &date_range(&job.start_date, &job.end_date, " - "),
                ],
                " • ",
            );
            blocks.push(join_lines(&[heading(3, &job.title), meta]));
            blocks.push(bullet_list(&job.description));
        }
    }

    if profile.is_populated(SectionKind::Education) {
        blocks.push("## 🎓 Education");
        for edu in &profile.education {
            let grades = grade_line(edu, " • ").unwrap_or_default();
            let meta = join_present(&[&bold(&edu.school), &edu.year, &grades], " • ");
            blocks.push(join_lines(&[heading(3, &edu.degree), meta]));
        }
    }

    if profile.is_populated(SectionKind::Languages) {
        blocks.push("## 🌐 Languages");
        blocks.push(
            profile
                .languages
                .iter()
                .map(|lang| format!("{} - {}", bold(&lang.language), lang.proficiency))
                .collect::<Vec<_>>()
                .join(" • "),
        );
    }

    blocks.push("---");
    blocks.push(r#"<div align="center">"#);
    blocks.push(format!("*{}*", github_display_footer(profile)));
    blocks.push("</div>");

    blocks.finish()
}

fn github_display_footer(profile: &Profile) -> String {
    let handle = profile.github.trim();
    if handle.is_empty() {
        "Generated with Vitae".to_string()
    } else {
        format!("Generated with Vitae for {}", github_display(handle))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::profile::{EducationEntry, ExperienceEntry};
    use pretty_assertions::assert_eq;

    fn jane_doe() -> Profile {
        Profile {
            full_name: "Jane Doe".to_string(),
            ..Profile::default()
        }
    }

    fn headings(output: &str) -> Vec<&str> {
        output.lines().filter(|l| l.starts_with('#')).collect()
    }

    fn assert_no_stray_separators(output: &str) {
        assert!(!output.contains("\n\n\n"), "two consecutive blank lines");
        assert!(!output.ends_with('\n'), "trailing newline");
        assert!(!output.starts_with('\n'), "leading blank line");
    }

    #[test]
    fn test_name_only_profile_renders_single_heading() {
        let output = generate_markdown(&jane_doe());
        assert_eq!(output, "# Jane Doe");
        assert_eq!(headings(&output), vec!["# Jane Doe"]);
    }

    #[test]
    fn test_readme_name_only_has_no_section_headings() {
        let output = generate_readme(&jane_doe());
        assert_eq!(headings(&output), vec!["# Jane Doe"]);
        assert_no_stray_separators(&output);
    }

    #[test]
    fn test_sample_markdown_layout() {
        let mut profile = jane_doe();
        profile.email = "jane@example.com".to_string();
        profile.location = "Berlin".to_string();
        profile.linkedin = "linkedin.com/in/jane".to_string();
        profile.experience.push(ExperienceEntry {
            id: 1,
            title: "Engineer".to_string(),
            company: "Acme".to_string(),
            start_date: "2020".to_string(),
            end_date: "Present".to_string(),
            description: "- did X\n\n- did Y".to_string(),
        });
        profile.education.push(EducationEntry {
            id: 1,
            degree: "BSc".to_string(),
            school: "TU".to_string(),
            year: "2019".to_string(),
            gpa: Some("3.9".to_string()),
            cgpa: None,
        });
        profile.skills = "Rust, , Go".to_string();

        let expected = "# Jane Doe\n\n\
                        jane@example.com | Berlin\n\n\
                        [LinkedIn](https://linkedin.com/in/jane)\n\n\
                        ## Experience\n\n\
                        ### Engineer\n**Acme** | 2020 - Present\n\n\
                        - did X\n- did Y\n\n\
                        ## Education\n\n\
                        ### BSc\n**TU** | 2019 | GPA: 3.9\n\n\
                        ## Skills\n\n\
                        Rust, Go";
        assert_eq!(generate_markdown(&profile), expected);
    }

    #[test]
    fn test_empty_sections_never_appear() {
        let mut profile = Profile::sample();
        profile.summary = "  ".to_string();
        profile.experience.clear();
        profile.skills = " , ".to_string();
        let output = generate_markdown(&profile);
        assert!(!output.contains("## Professional Summary"));
        assert!(!output.contains("## Experience"));
        assert!(!output.contains("## Skills"));
        assert!(output.contains("## Education"));
        assert!(output.contains("## Languages"));
        assert_no_stray_separators(&output);

        let readme = generate_readme(&profile);
        assert!(!readme.contains("Professional Summary"));
        assert!(!readme.contains("Experience"));
        assert!(!readme.contains("Skills & Technologies"));
        assert_no_stray_separators(&readme);
    }

    #[test]
    fn test_blank_lines_in_free_text_are_collapsed() {
        let mut profile = jane_doe();
        profile.summary = "\n\nFirst paragraph.\n\n\n\nSecond paragraph.\n\n".to_string();
        let output = generate_markdown(&profile);
        assert!(output.contains("First paragraph.\n\nSecond paragraph."));
        assert_no_stray_separators(&output);
    }

    #[test]
    fn test_entry_with_empty_fields_leaves_no_gaps() {
        let mut profile = jane_doe();
        profile.experience.push(ExperienceEntry::default());
        profile.education.push(EducationEntry::default());
        let output = generate_markdown(&profile);
        assert_eq!(output, "# Jane Doe\n\n## Experience\n\n## Education");
    }

    #[test]
    fn test_blank_name_leaves_no_bare_heading() {
        let profile = Profile {
            email: "jane@example.com".to_string(),
            ..Profile::default()
        };
        let output = generate_markdown(&profile);
        assert_eq!(output, "jane@example.com");
        assert_no_stray_separators(&output);

        let readme = generate_readme(&profile);
        assert!(headings(&readme).is_empty());
        assert!(!readme.lines().any(|line| line.trim() == "#"));
    }

    #[test]
    fn test_sample_profile_is_deterministic_and_clean() {
        let sample = Profile::sample();
        let first = generate_markdown(&sample);
        assert_eq!(first, generate_markdown(&sample));
        assert_no_stray_separators(&first);

        let readme = generate_readme(&sample);
        assert_eq!(readme, generate_readme(&sample));
        assert_no_stray_separators(&readme);
        assert!(readme.contains("username=alexdev"));
        assert!(readme.contains("![Node.js]"));
        assert!(readme.contains("\n\n---\n\n### Web Developer"));
    }

    #[test]
    fn test_languages_listed_with_proficiency() {
        let output = generate_markdown(&Profile::sample());
        assert!(output.ends_with("## Languages\n\n- **English** - Native\n- **Spanish** - Intermediate"));
    }
}
