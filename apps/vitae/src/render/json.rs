//! JSON dump of the Profile: pretty-printed, 2-space indent, keys in struct field order.

use crate::models::profile::Profile;
use crate::render::RenderError;

pub fn generate_json(profile: &Profile) -> Result<String, RenderError> {
    Ok(serde_json::to_string_pretty(profile)?)
}
