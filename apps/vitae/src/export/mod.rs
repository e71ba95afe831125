// Export: the PDF writing surface, artifact sinks, and the pipeline that ties a
// Profile, a target and a template to a saved artifact.

pub mod pdf;
pub mod pipeline;
pub mod sink;

pub use pipeline::{build_artifact, export_all, ExportError, ExportOutcome, ExportTarget};
pub use sink::{ArtifactSink, FsSink};
