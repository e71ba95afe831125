//! Export Pipeline: (Profile, target, template) → artifact → sink → outcome.
//!
//! Text targets are rendered inline. The PDF target runs layout and encoding inside
//! `tokio::task::spawn_blocking`: both are CPU-bound and must not stall the executor.
//! Failures are reported once per target as a failed `ExportOutcome`; nothing here
//! retries.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use crate::export::pdf::{encode_pdf, SurfaceError};
use crate::export::sink::{Artifact, ArtifactSink, SinkError};
use crate::layout::layout_profile;
use crate::layout::templates::TemplateId;
use crate::models::profile::Profile;
use crate::render::formatters::file_stem;
use crate::render::{render_text, RenderError, TextFormat};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportTarget {
    Markdown,
    Readme,
    Latex,
    Json,
    Pdf,
}

impl ExportTarget {
    pub const ALL: [ExportTarget; 5] = [
        ExportTarget::Markdown,
        ExportTarget::Readme,
        ExportTarget::Latex,
        ExportTarget::Json,
        ExportTarget::Pdf,
    ];

    pub fn id(self) -> &'static str {
        match self {
            ExportTarget::Markdown => "markdown",
            ExportTarget::Readme => "readme",
            ExportTarget::Latex => "latex",
            ExportTarget::Json => "json",
            ExportTarget::Pdf => "pdf",
        }
    }

    pub fn from_id(raw: &str) -> Option<ExportTarget> {
        let raw = raw.trim();
        ExportTarget::ALL
            .into_iter()
            .find(|target| target.id().eq_ignore_ascii_case(raw))
    }

    pub fn extension(self) -> &'static str {
        match self {
            ExportTarget::Markdown | ExportTarget::Readme => "md",
            ExportTarget::Latex => "tex",
            ExportTarget::Json => "json",
            ExportTarget::Pdf => "pdf",
        }
    }

    pub fn content_type(self) -> &'static str {
        match self {
            ExportTarget::Markdown | ExportTarget::Readme => "text/markdown",
            ExportTarget::Latex => "text/plain",
            ExportTarget::Json => "application/json",
            ExportTarget::Pdf => "application/pdf",
        }
    }

    pub fn text_format(self) -> Option<TextFormat> {
        match self {
            ExportTarget::Markdown => Some(TextFormat::Markdown),
            ExportTarget::Readme => Some(TextFormat::Readme),
            ExportTarget::Latex => Some(TextFormat::Latex),
            ExportTarget::Json => Some(TextFormat::Json),
            ExportTarget::Pdf => None,
        }
    }

    /// `Jane_Doe_Resume.md`, `Jane_Doe_README.md`, `Jane_Doe_Resume_Oxford.pdf`.
    pub fn filename(self, profile: &Profile, template: TemplateId) -> String {
        let stem = file_stem(&profile.full_name);
        match self {
            ExportTarget::Readme => format!("{stem}_README.md"),
            ExportTarget::Pdf => format!("{stem}_Resume_{}.pdf", template.name()),
            other => format!("{stem}_Resume.{}", other.extension()),
        }
    }
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("render failed: {0}")]
    Render(#[from] RenderError),

    #[error("PDF surface failed: {0}")]
    Surface(#[from] SurfaceError),

    #[error("saving failed: {0}")]
    Sink(#[from] SinkError),

    #[error("layout worker failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Per-target result reported back to the caller.
#[derive(Debug, Clone, Serialize)]
pub struct ExportOutcome {
    pub target: ExportTarget,
    pub success: bool,
    pub filename: String,
    /// Sink location on success.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Error description on failure.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Produces the artifact for one target without saving it.
pub async fn build_artifact(
    profile: Arc<Profile>,
    target: ExportTarget,
    template: TemplateId,
) -> Result<Artifact, ExportError> {
    let filename = target.filename(&profile, template);
    let body = match target.text_format() {
        Some(format) => render_text(format, &profile)?.into(),
        None => {
            let layout_profile_ref = Arc::clone(&profile);
            tokio::task::spawn_blocking(move || {
                let config = template.config();
                let commands = layout_profile(&layout_profile_ref, &config);
                encode_pdf(&commands, &config, layout_profile_ref.full_name.trim())
            })
            .await??
        }
    };
    Ok(Artifact {
        filename,
        content_type: target.content_type(),
        body,
    })
}

/// Builds and saves one target.
pub async fn export_one(
    profile: Arc<Profile>,
    target: ExportTarget,
    template: TemplateId,
    sink: &dyn ArtifactSink,
) -> ExportOutcome {
    let filename = target.filename(&profile, template);
    let result = async {
        let artifact = build_artifact(profile, target, template).await?;
        Ok::<_, ExportError>(sink.save(&artifact).await?)
    }
    .await;

    match result {
        Ok(saved) => {
            info!(export = target.id(), filename = %saved.filename, "Export complete");
            ExportOutcome {
                target,
                success: true,
                filename: saved.filename,
                location: Some(saved.location),
                message: None,
            }
        }
        Err(err) => {
            warn!(export = target.id(), filename = %filename, error = %err, "Export failed");
            ExportOutcome {
                target,
                success: false,
                filename,
                location: None,
                message: Some(err.to_string()),
            }
        }
    }
}

/// Exports every requested target, in order, one outcome per target. A failing
/// target does not stop the others.
pub async fn export_all(
    profile: Arc<Profile>,
    targets: &[ExportTarget],
    template: TemplateId,
    sink: &dyn ArtifactSink,
) -> Vec<ExportOutcome> {
    let mut outcomes = Vec::with_capacity(targets.len());
    for target in targets {
        outcomes.push(export_one(Arc::clone(&profile), *target, template, sink).await);
    }
    outcomes
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::sink::{FsSink, MemorySink};

    fn sample() -> Arc<Profile> {
        Arc::new(Profile::sample())
    }

    #[test]
    fn test_filenames() {
        let profile = Profile {
            full_name: "Jane  Q Doe".to_string(),
            ..Profile::default()
        };
        assert_eq!(
            ExportTarget::Markdown.filename(&profile, TemplateId::Mit),
            "Jane_Q_Doe_Resume.md"
        );
        assert_eq!(
            ExportTarget::Readme.filename(&profile, TemplateId::Mit),
            "Jane_Q_Doe_README.md"
        );
        assert_eq!(
            ExportTarget::Latex.filename(&profile, TemplateId::Mit),
            "Jane_Q_Doe_Resume.tex"
        );
        assert_eq!(
            ExportTarget::Pdf.filename(&profile, TemplateId::Oxford),
            "Jane_Q_Doe_Resume_Oxford.pdf"
        );
        assert_eq!(
            ExportTarget::Json.filename(&Profile::default(), TemplateId::Mit),
            "Resume_Resume.json"
        );
    }

    #[test]
    fn test_target_ids_and_content_types() {
        assert_eq!(ExportTarget::from_id("PDF"), Some(ExportTarget::Pdf));
        assert_eq!(ExportTarget::from_id("docx"), None);
        assert_eq!(ExportTarget::Latex.content_type(), "text/plain");
        assert_eq!(ExportTarget::Json.content_type(), "application/json");
    }

    #[tokio::test]
    async fn test_build_pdf_artifact() {
        let artifact = build_artifact(sample(), ExportTarget::Pdf, TemplateId::Stanford)
            .await
            .unwrap();
        assert_eq!(artifact.content_type, "application/pdf");
        assert_eq!(artifact.filename, "Alex_Developer_Resume_Stanford.pdf");
        assert!(artifact.body.starts_with(b"%PDF-1.4"));
    }

    #[tokio::test]
    async fn test_build_text_artifact_matches_generator() {
        let artifact = build_artifact(sample(), ExportTarget::Markdown, TemplateId::Mit)
            .await
            .unwrap();
        let expected = render_text(TextFormat::Markdown, &Profile::sample()).unwrap();
        assert_eq!(artifact.body, expected.as_bytes());
    }

    #[tokio::test]
    async fn test_export_all_reports_one_outcome_per_target() {
        let sink = MemorySink::default();
        let outcomes = export_all(sample(), &ExportTarget::ALL, TemplateId::Mit, &sink).await;
        assert_eq!(outcomes.len(), 5);
        assert!(outcomes.iter().all(|o| o.success));
        assert_eq!(
            outcomes.iter().map(|o| o.target).collect::<Vec<_>>(),
            ExportTarget::ALL.to_vec()
        );
        assert_eq!(sink.saved.lock().unwrap().len(), 5);
    }

    #[tokio::test]
    async fn test_sink_failure_becomes_failed_outcome() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("occupied");
        std::fs::write(&blocker, "file").unwrap();
        let sink = FsSink::new(&blocker);

        let outcomes = export_all(
            sample(),
            &[ExportTarget::Json, ExportTarget::Pdf],
            TemplateId::Mit,
            &sink,
        )
        .await;
        assert_eq!(outcomes.len(), 2);
        for outcome in &outcomes {
            assert!(!outcome.success);
            assert!(outcome.location.is_none());
            assert!(outcome.message.as_deref().unwrap().starts_with("saving failed"));
        }
        assert_eq!(outcomes[0].filename, "Alex_Developer_Resume.json");
    }

    #[tokio::test]
    async fn test_name_with_slash_still_exports() {
        let profile = Arc::new(Profile {
            full_name: "Jane Doe / Smith".to_string(),
            ..Profile::default()
        });
        let sink = MemorySink::default();
        let outcome = export_one(profile, ExportTarget::Markdown, TemplateId::Mit, &sink).await;
        assert!(outcome.success, "{:?}", outcome.message);
        assert_eq!(outcome.filename, "Jane_Doe___Smith_Resume.md");
    }

    #[tokio::test]
    async fn test_export_to_directory() {
        let dir = tempfile::tempdir().unwrap();
        let sink = FsSink::new(dir.path());
        let outcome = export_one(sample(), ExportTarget::Latex, TemplateId::Mit, &sink).await;
        assert!(outcome.success, "{:?}", outcome.message);
        let written =
            std::fs::read_to_string(dir.path().join("Alex_Developer_Resume.tex")).unwrap();
        assert!(written.starts_with("\\documentclass"));
    }
}
