//! The normalized resume Profile: the single input of every generator and of the
//! page layout engine.
//!
//! Field names serialize in camelCase so that a persisted draft from the form UI
//! deserializes directly. Every field defaults, which keeps older drafts (e.g. ones
//! saved before `languages` existed) loadable.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::render::formatters::split_list;

// ────────────────────────────────────────────────────────────────────────────
// Profile
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Profile {
    // identity
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    // links
    /// Professional-network URL, protocol optional.
    pub linkedin: String,
    /// Code-hosting handle (not a URL).
    pub github: String,
    pub portfolio: String,

    pub summary: String,
    /// Comma-separated by convention.
    pub skills: String,
    /// Display order, most recent first by convention.
    pub experience: Vec<ExperienceEntry>,
    pub education: Vec<EducationEntry>,
    pub languages: Vec<LanguageEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExperienceEntry {
    pub id: u64,
    pub title: String,
    pub company: String,
    pub start_date: String,
    pub end_date: String,
    /// One achievement per line, optionally prefixed with `-` or `•`.
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EducationEntry {
    pub id: u64,
    pub degree: String,
    pub school: String,
    pub year: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gpa: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cgpa: Option<String>,
}

impl EducationEntry {
    /// GPA if present and non-blank.
    pub fn gpa(&self) -> Option<&str> {
        non_blank(self.gpa.as_deref())
    }

    /// CGPA if present and non-blank.
    pub fn cgpa(&self) -> Option<&str> {
        non_blank(self.cgpa.as_deref())
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LanguageEntry {
    pub id: u64,
    pub language: String,
    pub proficiency: Proficiency,
}

// ────────────────────────────────────────────────────────────────────────────
// Proficiency
// ────────────────────────────────────────────────────────────────────────────

/// Language proficiency, drawn from a closed set of five levels.
///
/// Deserialization never fails: foreign strings land in `Unrecognized` and are
/// rejected by [`Profile::validate`] at the input surface instead.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Proficiency {
    Native,
    Fluent,
    Advanced,
    #[default]
    Intermediate,
    Basic,
    Unrecognized(String),
}

impl Proficiency {
    pub const LEVELS: [Proficiency; 5] = [
        Proficiency::Native,
        Proficiency::Fluent,
        Proficiency::Advanced,
        Proficiency::Intermediate,
        Proficiency::Basic,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            Proficiency::Native => "Native",
            Proficiency::Fluent => "Fluent",
            Proficiency::Advanced => "Advanced",
            Proficiency::Intermediate => "Intermediate",
            Proficiency::Basic => "Basic",
            Proficiency::Unrecognized(raw) => raw,
        }
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, Proficiency::Unrecognized(_))
    }
}

impl From<String> for Proficiency {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "Native" => Proficiency::Native,
            "Fluent" => Proficiency::Fluent,
            "Advanced" => Proficiency::Advanced,
            "Intermediate" => Proficiency::Intermediate,
            "Basic" => Proficiency::Basic,
            _ => Proficiency::Unrecognized(raw),
        }
    }
}

impl From<Proficiency> for String {
    fn from(level: Proficiency) -> Self {
        match level {
            Proficiency::Unrecognized(raw) => raw,
            other => other.as_str().to_string(),
        }
    }
}

impl fmt::Display for Proficiency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Section presence
// ────────────────────────────────────────────────────────────────────────────

/// The conditional body sections. The identity header is not listed: it is
/// always rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionKind {
    Summary,
    Experience,
    Education,
    Skills,
    Languages,
}

impl Profile {
    /// Single source of truth for conditional omission. Every generator and the
    /// layout engine ask this before emitting a section.
    pub fn is_populated(&self, section: SectionKind) -> bool {
        match section {
            SectionKind::Summary => !self.summary.trim().is_empty(),
            SectionKind::Experience => !self.experience.is_empty(),
            SectionKind::Education => !self.education.is_empty(),
            SectionKind::Skills => !self.skill_list().is_empty(),
            SectionKind::Languages => !self.languages.is_empty(),
        }
    }

    pub fn skill_list(&self) -> Vec<String> {
        split_list(&self.skills)
    }

    /// Checks the constraints the input surface enforces but the model tolerates.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let expected = Proficiency::LEVELS
            .iter()
            .map(Proficiency::as_str)
            .collect::<Vec<_>>()
            .join(", ");
        let issues: Vec<String> = self
            .languages
            .iter()
            .filter(|entry| !entry.proficiency.is_recognized())
            .map(|entry| {
                format!(
                    "language '{}' has unsupported proficiency '{}' (expected one of {expected})",
                    entry.language, entry.proficiency
                )
            })
            .collect();

        if issues.is_empty() {
            Ok(())
        } else {
            Err(ValidationError { issues })
        }
    }

    /// The built-in sample snapshot loaded at session start and on reset.
    pub fn sample() -> Self {
        Profile {
            full_name: "Alex Developer".to_string(),
            email: "alex@example.com".to_string(),
            phone: "(555) 123-4567".to_string(),
            location: "San Francisco, CA".to_string(),
            linkedin: "linkedin.com/in/alexdev".to_string(),
            github: "alexdev".to_string(),
            portfolio: "https://alexdev.com".to_string(),
            summary: "Detail-oriented software engineer with 5+ years of experience building \
                      scalable web applications. Passionate about clean code and user-centric design."
                .to_string(),
            skills: "JavaScript, React, Node.js, Python, SQL, Git, AWS, TypeScript, Docker"
                .to_string(),
            experience: vec![
                ExperienceEntry {
                    id: 1,
                    title: "Senior Frontend Engineer".to_string(),
                    company: "Tech Solutions Inc.".to_string(),
                    start_date: "2021".to_string(),
                    end_date: "Present".to_string(),
                    description: "Led the migration of a legacy codebase to React.\n\
                                  Improved page load times by 40%.\n\
                                  Mentored junior developers."
                        .to_string(),
                },
                ExperienceEntry {
                    id: 2,
                    title: "Web Developer".to_string(),
                    company: "Creative Agency".to_string(),
                    start_date: "2018".to_string(),
                    end_date: "2021".to_string(),
                    description: "Developed responsive websites for 20+ clients using HTML, CSS, and JavaScript.\n\
                                  Collaborated with designers to ensure pixel-perfect implementation."
                        .to_string(),
                },
            ],
            education: vec![EducationEntry {
                id: 1,
                degree: "B.S. Computer Science".to_string(),
                school: "University of Technology".to_string(),
                year: "2018".to_string(),
                gpa: None,
                cgpa: None,
            }],
            languages: vec![
                LanguageEntry {
                    id: 1,
                    language: "English".to_string(),
                    proficiency: Proficiency::Native,
                },
                LanguageEntry {
                    id: 2,
                    language: "Spanish".to_string(),
                    proficiency: Proficiency::Intermediate,
                },
            ],
        }
    }
}

#[derive(Debug, Clone, Error)]
#[error("{}", .issues.join("; "))]
pub struct ValidationError {
    pub issues: Vec<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
