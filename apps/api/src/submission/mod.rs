// Final-step handling: normalize the validated form, hand it to a sink,
// and project it for preview.

pub mod preview;
pub mod sink;
pub mod transform;

pub use preview::render_preview_md;
pub use sink::{InMemorySink, PgSink, SubmissionSink};
pub use transform::transform;
