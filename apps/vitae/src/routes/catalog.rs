use axum::{extract::Path, Json};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::layout::templates::Margins;
use crate::layout::{FontFamily, TemplateId};
use crate::models::edit::ProfileEdit;
use crate::models::Profile;

#[derive(Debug, Serialize)]
pub struct TemplateInfo {
    pub id: TemplateId,
    pub name: &'static str,
    pub description: &'static str,
    pub font: FontFamily,
    pub margins: Margins,
}

impl From<TemplateId> for TemplateInfo {
    fn from(template: TemplateId) -> Self {
        let config = template.config();
        TemplateInfo {
            id: template,
            name: template.name(),
            description: template.description(),
            font: config.font,
            margins: config.margins,
        }
    }
}

/// GET /api/v1/templates
pub async fn handle_list_templates() -> Json<Vec<TemplateInfo>> {
    Json(TemplateId::ALL.into_iter().map(TemplateInfo::from).collect())
}

/// GET /api/v1/templates/:id
pub async fn handle_get_template(Path(id): Path<String>) -> Result<Json<TemplateInfo>, AppError> {
    let template =
        TemplateId::from_id(&id).ok_or_else(|| AppError::NotFound(format!("Template {id} not found")))?;
    Ok(Json(template.into()))
}

/// GET /api/v1/profile/sample
pub async fn handle_sample_profile() -> Json<Profile> {
    Json(Profile::sample())
}

#[derive(Deserialize)]
pub struct EditRequest {
    pub profile: Profile,
    pub edit: ProfileEdit,
}

/// POST /api/v1/profile/edit
pub async fn handle_edit_profile(Json(req): Json<EditRequest>) -> Result<Json<Profile>, AppError> {
    req.profile.validate()?;
    let next = req.profile.apply(req.edit);
    next.validate()?;
    Ok(Json(next))
}
