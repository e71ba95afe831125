use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::Config;
use crate::errors::AppError;
use crate::export::{build_artifact, export_all, ExportOutcome, ExportTarget};
use crate::layout::{layout_for_template, page_count, pages_in, PageCommand, TemplateId};
use crate::models::Profile;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct TemplateQuery {
    pub template: Option<String>,
}

/// Explicit ids resolve with fallback; an absent id means the configured default.
fn pick_template(requested: Option<&str>, config: &Config) -> TemplateId {
    requested.map_or(config.default_template, TemplateId::resolve)
}

fn parse_target(raw: &str) -> Result<ExportTarget, AppError> {
    ExportTarget::from_id(raw).ok_or_else(|| {
        AppError::Validation(format!(
            "Unknown export target '{raw}' (expected markdown, readme, latex, json or pdf)"
        ))
    })
}

/// `attachment` with an ASCII fallback name plus the RFC 5987 UTF-8 form.
fn content_disposition(filename: &str) -> String {
    let fallback: String = filename
        .chars()
        .map(|c| if c.is_ascii_graphic() && c != '"' && c != '\\' { c } else { '_' })
        .collect();
    format!(
        "attachment; filename=\"{fallback}\"; filename*=UTF-8''{}",
        utf8_percent_encode(filename, NON_ALPHANUMERIC)
    )
}

/// POST /api/v1/render/:target?template=<id>
pub async fn handle_render(
    State(state): State<AppState>,
    Path(target): Path<String>,
    Query(params): Query<TemplateQuery>,
    Json(profile): Json<Profile>,
) -> Result<Response, AppError> {
    let target = parse_target(&target)?;
    profile.validate()?;
    let template = pick_template(params.template.as_deref(), &state.config);

    let artifact = build_artifact(Arc::new(profile), target, template).await?;
    info!(
        export = target.id(),
        template = template.id(),
        bytes = artifact.body.len(),
        "Rendered artifact"
    );

    let headers = [
        (header::CONTENT_TYPE, artifact.content_type.to_string()),
        (header::CONTENT_DISPOSITION, content_disposition(&artifact.filename)),
    ];
    Ok((headers, artifact.body).into_response())
}

#[derive(Serialize)]
pub struct LayoutResponse {
    pub template: TemplateId,
    pub page_count: usize,
    pub commands: Vec<PageCommand>,
}

/// POST /api/v1/layout?template=<id>
pub async fn handle_layout(
    State(state): State<AppState>,
    Query(params): Query<TemplateQuery>,
    Json(profile): Json<Profile>,
) -> Result<Json<LayoutResponse>, AppError> {
    profile.validate()?;
    let template = pick_template(params.template.as_deref(), &state.config);

    let commands = tokio::task::spawn_blocking(move || layout_for_template(&profile, template))
        .await
        .map_err(anyhow::Error::from)?;
    Ok(Json(LayoutResponse {
        template,
        page_count: pages_in(&commands),
        commands,
    }))
}

#[derive(Serialize)]
pub struct PageEstimate {
    pub template: TemplateId,
    pub page_count: usize,
}

/// POST /api/v1/layout/pages
/// Dry-run page count of the profile under every template, for the template picker.
pub async fn handle_page_estimates(
    Json(profile): Json<Profile>,
) -> Result<Json<Vec<PageEstimate>>, AppError> {
    profile.validate()?;
    let estimates = tokio::task::spawn_blocking(move || {
        TemplateId::ALL
            .into_iter()
            .map(|template| PageEstimate {
                template,
                page_count: page_count(&profile, &template.config()),
            })
            .collect::<Vec<_>>()
    })
    .await
    .map_err(anyhow::Error::from)?;
    Ok(Json(estimates))
}

#[derive(Deserialize)]
pub struct ExportRequest {
    pub profile: Profile,
    pub targets: Vec<String>,
    pub template: Option<String>,
}

/// POST /api/v1/exports
pub async fn handle_exports(
    State(state): State<AppState>,
    Json(req): Json<ExportRequest>,
) -> Result<Json<Vec<ExportOutcome>>, AppError> {
    let targets = req
        .targets
        .iter()
        .map(|raw| parse_target(raw))
        .collect::<Result<Vec<_>, _>>()?;
    if targets.is_empty() {
        return Err(AppError::Validation("At least one export target is required".into()));
    }
    req.profile.validate()?;
    let template = pick_template(req.template.as_deref(), &state.config);

    let outcomes = export_all(Arc::new(req.profile), &targets, template, state.sink.as_ref()).await;
    Ok(Json(outcomes))
}
