// Resume analysis: extract → prompt → model → answer.
// The pipeline lives in `analyzer`; the HTTP surface in `handlers`.

pub mod analyzer;
pub mod handlers;

pub use analyzer::Analyzer;
