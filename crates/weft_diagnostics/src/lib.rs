//! Operator-visible diagnostics for the Weft image-assembly tool.
//!
//! Weft reports non-fatal conditions (skipped module references, missing
//! optional manifests, accepted block listings) through a [`DiagnosticSink`]
//! rather than printing from deep inside library code. The CLI drains the
//! sink and renders everything at the end of a run.

#![warn(missing_docs)]

pub mod diagnostic;
pub mod renderer;
pub mod severity;
pub mod sink;

pub use diagnostic::Diagnostic;
pub use renderer::render_to_stderr;
pub use severity::Severity;
pub use sink::DiagnosticSink;
