//! Chart-backend client and the sequential publish pipeline.
//!
//! The pipeline replaces a remote chart's data, stamps its notes with a
//! freshness marker, and republishes it, in that strict order. Each stage is
//! gated on the previous stage's acknowledgement; a failed stage tags
//! itself in the error and skips everything after it, with no rollback of
//! the stages already applied.

pub mod backend;
pub mod datawrapper;
pub mod notes;
pub mod pipeline;

pub use backend::{BackendError, ChartBackend, PublishedChart};
pub use pipeline::{publish_chart, PublishError, PublishOptions, Stage};
