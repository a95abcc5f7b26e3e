//! The diagnostic record emitted by Weft components.

use crate::severity::Severity;
use serde::{Deserialize, Serialize};

/// A single diagnostic message with a severity.
///
/// Weft operates on build trees rather than source text, so diagnostics
/// carry no source spans. The message should name the affected path or block
/// so the operator can act on it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// How severe the condition is.
    pub severity: Severity,
    /// Human-readable description of the condition.
    pub message: String,
}

impl Diagnostic {
    /// Creates an informational diagnostic.
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Info,
            message: message.into(),
        }
    }

    /// Creates a warning diagnostic.
    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            message: message.into(),
        }
    }

    /// Creates an error diagnostic.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            message: message.into(),
        }
    }
}
