//! Severity-tagged validation findings.

use std::fmt;

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Severity::Info => "INFO",
            Severity::Warning => "WARNING",
            Severity::Error => "ERROR",
        };
        f.write_str(label)
    }
}

/// A single validation finding attached to a claim.
///
/// Diagnostics are immutable once created; the engine appends them to a
/// [`DiagnosticSet`] and nothing downstream modifies them.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    /// Back-reference to the claim the finding belongs to.
    pub claim_id: String,
    pub severity: Severity,
    pub message: String,
    /// Offending field, when the rule targets one.
    pub field: Option<String>,
    pub timestamp: DateTime<Local>,
}

impl Diagnostic {
    pub fn new(
        claim_id: impl Into<String>,
        severity: Severity,
        message: impl Into<String>,
        field: Option<&str>,
    ) -> Self {
        Self {
            claim_id: claim_id.into(),
            severity,
            message: message.into(),
            field: field.map(ToOwned::to_owned),
            timestamp: Local::now(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - [{}] Claim {}: {}",
            self.timestamp, self.severity, self.claim_id, self.message
        )?;
        if let Some(field) = &self.field {
            write!(f, " (Field: {field})")?;
        }
        Ok(())
    }
}

/// Append-only collection of diagnostics for one run.
#[derive(Debug, Clone, Default)]
pub struct DiagnosticSet {
    pub diagnostics: Vec<Diagnostic>,
}

impl DiagnosticSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    pub fn extend(&mut self, diagnostics: impl IntoIterator<Item = Diagnostic>) {
        self.diagnostics.extend(diagnostics);
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.diagnostics.iter()
    }

    pub fn error_count(&self) -> usize {
        self.count_of(Severity::Error)
    }

    pub fn warning_count(&self) -> usize {
        self.count_of(Severity::Warning)
    }

    pub fn info_count(&self) -> usize {
        self.count_of(Severity::Info)
    }

    pub fn has_errors_for(&self, claim_id: &str) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.severity == Severity::Error && d.claim_id == claim_id)
    }

    fn count_of(&self, severity: Severity) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == severity)
            .count()
    }
}

impl IntoIterator for DiagnosticSet {
    type Item = Diagnostic;
    type IntoIter = std::vec::IntoIter<Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.diagnostics.into_iter()
    }
}
