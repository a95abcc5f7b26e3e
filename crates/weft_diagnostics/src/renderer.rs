//! Terminal rendering for accumulated diagnostics.

use crate::diagnostic::Diagnostic;
use crate::severity::Severity;

/// Renders a single diagnostic as a one-line terminal message.
///
/// Produces output like `warning: no module found at /path/to/dir`. Info
/// diagnostics are rendered bare, without a severity prefix.
pub fn render(diag: &Diagnostic) -> String {
    match diag.severity {
        Severity::Info => diag.message.clone(),
        _ => format!("{}: {}", diag.severity, diag.message),
    }
}

/// Renders every diagnostic to stderr in emission order.
///
/// When `quiet` is set, only error-severity diagnostics are printed.
pub fn render_to_stderr(diagnostics: &[Diagnostic], quiet: bool) {
    for diag in diagnostics {
        if quiet && diag.severity < Severity::Error {
            continue;
        }
        eprintln!("{}", render(diag));
    }
}
