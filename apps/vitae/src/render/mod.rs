//! Text generators: one canonical `Profile -> String` projection per format.
//!
//! Generators are pure and deterministic. The PDF target is not here: it goes
//! through the page layout engine and the writing surface in `export`.

pub mod formatters;
pub mod json;
pub mod latex;
pub mod markdown;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::profile::Profile;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

/// Text encodings of a profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextFormat {
    Markdown,
    Readme,
    Latex,
    Json,
}

/// Dispatches to the generator for `format`.
pub fn render_text(format: TextFormat, profile: &Profile) -> Result<String, RenderError> {
    match format {
        TextFormat::Markdown => Ok(markdown::generate_markdown(profile)),
        TextFormat::Readme => Ok(markdown::generate_readme(profile)),
        TextFormat::Latex => Ok(latex::generate_latex(profile)),
        TextFormat::Json => json::generate_json(profile),
    }
}
