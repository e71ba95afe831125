use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::layout::TemplateId;

/// Application configuration loaded from environment variables.
/// Every variable has a default; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Directory the filesystem sink writes exports into.
    pub export_dir: PathBuf,
    /// Template used when a request names none.
    pub default_template: TemplateId,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            port: env_or("PORT", "8080")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: env_or("RUST_LOG", "info"),
            export_dir: PathBuf::from(env_or("EXPORT_DIR", "./exports")),
            default_template: parse_template(&env_or("DEFAULT_TEMPLATE", "mit"))?,
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Startup is strict about the configured default, unlike per-request ids which fall back.
fn parse_template(raw: &str) -> Result<TemplateId> {
    TemplateId::from_id(raw).with_context(|| {
        let known: Vec<&str> = TemplateId::ALL.iter().map(|t| t.id()).collect();
        format!(
            "DEFAULT_TEMPLATE '{raw}' is not a known template (expected one of {})",
            known.join(", ")
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_template() {
        assert_eq!(parse_template(" Oxford ").unwrap(), TemplateId::Oxford);
        let err = parse_template("harvard").unwrap_err().to_string();
        assert!(err.contains("harvard"));
        assert!(err.contains("mit, oxford"));
    }
}
