//! Draft reducer: field-level edits and list add/remove produce a new Profile snapshot.
//!
//! The form UI never hands a half-edited profile to the generators: each edit is
//! applied to an immutable snapshot and yields the next one.

use serde::{Deserialize, Serialize};

use crate::models::profile::{
    EducationEntry, ExperienceEntry, LanguageEntry, Proficiency, Profile,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ProfileField {
    FullName,
    Email,
    Phone,
    Location,
    Linkedin,
    Github,
    Portfolio,
    Summary,
    Skills,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ExperienceField {
    Title,
    Company,
    StartDate,
    EndDate,
    Description,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EducationField {
    Degree,
    School,
    Year,
    Gpa,
    Cgpa,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LanguageField {
    Language,
    Proficiency,
}

/// One user edit. Edits addressing an unknown entry id leave the profile unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum ProfileEdit {
    SetField {
        field: ProfileField,
        value: String,
    },
    AddExperience,
    UpdateExperience {
        id: u64,
        field: ExperienceField,
        value: String,
    },
    RemoveExperience {
        id: u64,
    },
    AddEducation,
    UpdateEducation {
        id: u64,
        field: EducationField,
        value: String,
    },
    RemoveEducation {
        id: u64,
    },
    AddLanguage,
    UpdateLanguage {
        id: u64,
        field: LanguageField,
        value: String,
    },
    RemoveLanguage {
        id: u64,
    },
    /// Back to the built-in sample snapshot.
    Reset,
}

impl Profile {
    /// Applies an edit using the wall clock for new entry ids.
    pub fn apply(&self, edit: ProfileEdit) -> Profile {
        let now_ms = u64::try_from(chrono::Utc::now().timestamp_millis()).unwrap_or_default();
        self.apply_at(edit, now_ms)
    }

    /// Applies an edit with an explicit clock reading (milliseconds), used for new ids.
    pub fn apply_at(&self, edit: ProfileEdit, now_ms: u64) -> Profile {
        let mut next = self.clone();
        match edit {
            ProfileEdit::SetField { field, value } => *profile_field(&mut next, field) = value,

            ProfileEdit::AddExperience => {
                let id = next_entry_id(next.experience.iter().map(|e| e.id), now_ms);
                next.experience.insert(
                    0,
                    ExperienceEntry {
                        id,
                        ..ExperienceEntry::default()
                    },
                );
            }
            ProfileEdit::UpdateExperience { id, field, value } => {
                if let Some(entry) = next.experience.iter_mut().find(|e| e.id == id) {
                    let slot = match field {
                        ExperienceField::Title => &mut entry.title,
                        ExperienceField::Company => &mut entry.company,
                        ExperienceField::StartDate => &mut entry.start_date,
                        ExperienceField::EndDate => &mut entry.end_date,
                        ExperienceField::Description => &mut entry.description,
                    };
                    *slot = value;
                }
            }
            ProfileEdit::RemoveExperience { id } => next.experience.retain(|e| e.id != id),

            ProfileEdit::AddEducation => {
                let id = next_entry_id(next.education.iter().map(|e| e.id), now_ms);
                next.education.insert(
                    0,
                    EducationEntry {
                        id,
                        ..EducationEntry::default()
                    },
                );
            }
            ProfileEdit::UpdateEducation { id, field, value } => {
                if let Some(entry) = next.education.iter_mut().find(|e| e.id == id) {
                    match field {
                        EducationField::Degree => entry.degree = value,
                        EducationField::School => entry.school = value,
                        EducationField::Year => entry.year = value,
                        EducationField::Gpa => entry.gpa = Some(value),
                        EducationField::Cgpa => entry.cgpa = Some(value),
                    }
                }
            }
            ProfileEdit::RemoveEducation { id } => next.education.retain(|e| e.id != id),

            ProfileEdit::AddLanguage => {
                let id = next_entry_id(next.languages.iter().map(|e| e.id), now_ms);
                next.languages.insert(
                    0,
                    LanguageEntry {
                        id,
                        language: String::new(),
                        proficiency: Proficiency::Intermediate,
                    },
                );
            }
            ProfileEdit::UpdateLanguage { id, field, value } => {
                if let Some(entry) = next.languages.iter_mut().find(|e| e.id == id) {
                    match field {
                        LanguageField::Language => entry.language = value,
                        LanguageField::Proficiency => entry.proficiency = Proficiency::from(value),
                    }
                }
            }
            ProfileEdit::RemoveLanguage { id } => next.languages.retain(|e| e.id != id),

            ProfileEdit::Reset => next = Profile::sample(),
        }
        next
    }
}

fn profile_field(profile: &mut Profile, field: ProfileField) -> &mut String {
    match field {
        ProfileField::FullName => &mut profile.full_name,
        ProfileField::Email => &mut profile.email,
        ProfileField::Phone => &mut profile.phone,
        ProfileField::Location => &mut profile.location,
        ProfileField::Linkedin => &mut profile.linkedin,
        ProfileField::Github => &mut profile.github,
        ProfileField::Portfolio => &mut profile.portfolio,
        ProfileField::Summary => &mut profile.summary,
        ProfileField::Skills => &mut profile.skills,
    }
}

/// Clock-derived id, bumped past every id already in the list so two adds within
/// the same millisecond stay distinct.
fn next_entry_id(existing: impl Iterator<Item = u64>, now_ms: u64) -> u64 {
    match existing.max() {
        Some(max) if max >= now_ms => max + 1,
        _ => now_ms,
    }
}
