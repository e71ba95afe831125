// Page layout: static font metrics, template catalogue, word wrap and the
// section fold that turns a Profile into positioned page commands.
// Layout is CPU-bound; async callers run it inside tokio::task::spawn_blocking.

pub mod commands;
pub mod engine;
pub mod font_metrics;
pub mod templates;
pub mod wrap;

// Re-export the public API consumed by export and the HTTP handlers.
pub use commands::{pages_in, PageCommand};
pub use engine::{layout_for_template, layout_profile, page_count};
pub use font_metrics::FontFamily;
pub use templates::TemplateId;
