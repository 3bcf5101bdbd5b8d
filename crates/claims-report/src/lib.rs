//! Diagnostics sink: persists validation output.
//!
//! Two artifacts per run: a plain-text validation log for auditors (run
//! summary header, then one line per diagnostic) and a JSON payload for
//! machine consumption.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{Local, Utc};
use serde::Serialize;

use claims_model::{DiagnosticSet, Severity};

const RULE_LINE: &str =
    "--------------------------------------------------------------------------------";

/// Claim counts for the run summary header.
#[derive(Debug, Clone, Copy)]
pub struct RunSummary {
    pub total_claims: usize,
    pub valid_claims: usize,
}

/// Write the plain-text validation log.
///
/// One line per diagnostic in emission order, preceded by a run summary.
/// The file name carries a generation timestamp to avoid collisions.
pub fn write_validation_log(
    output_dir: &Path,
    summary: RunSummary,
    diagnostics: &DiagnosticSet,
) -> Result<PathBuf> {
    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("create {}", output_dir.display()))?;
    let file_name = format!("validation_log_{}.txt", Local::now().format("%Y%m%d_%H%M%S"));
    let path = output_dir.join(file_name);

    let mut log = String::new();
    log.push_str("837I Claim Validation Log\n");
    log.push_str(RULE_LINE);
    log.push('\n');
    log.push_str(&format!("Date/Time: {}\n", Local::now()));
    log.push_str(&format!("Total Claims: {}\n", summary.total_claims));
    log.push_str(&format!("Valid Claims: {}\n", summary.valid_claims));
    log.push_str(RULE_LINE);
    log.push_str("\n\n");
    for diagnostic in diagnostics.iter() {
        log.push_str(&diagnostic.to_string());
        log.push('\n');
    }

    std::fs::write(&path, log).with_context(|| format!("write {}", path.display()))?;
    Ok(path)
}

#[derive(Debug, Serialize)]
pub struct DiagnosticsPayload {
    pub schema: &'static str,
    pub schema_version: u32,
    pub generated_at: String,
    pub total_claims: usize,
    pub valid_claims: usize,
    pub error_count: usize,
    pub warning_count: usize,
    pub info_count: usize,
    pub diagnostics: Vec<DiagnosticJson>,
}

#[derive(Debug, Serialize)]
pub struct DiagnosticJson {
    pub severity: Severity,
    pub claim_id: String,
    pub field: Option<String>,
    pub message: String,
    pub timestamp: String,
}

const PAYLOAD_SCHEMA: &str = "edi837.diagnostics";
const PAYLOAD_SCHEMA_VERSION: u32 = 1;

/// Write the JSON diagnostics payload as `diagnostics.json`.
pub fn write_diagnostics_json(
    output_dir: &Path,
    summary: RunSummary,
    diagnostics: &DiagnosticSet,
) -> Result<PathBuf> {
    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("create {}", output_dir.display()))?;
    let path = output_dir.join("diagnostics.json");
    let payload = DiagnosticsPayload {
        schema: PAYLOAD_SCHEMA,
        schema_version: PAYLOAD_SCHEMA_VERSION,
        generated_at: Utc::now().to_rfc3339(),
        total_claims: summary.total_claims,
        valid_claims: summary.valid_claims,
        error_count: diagnostics.error_count(),
        warning_count: diagnostics.warning_count(),
        info_count: diagnostics.info_count(),
        diagnostics: diagnostics
            .iter()
            .map(|diagnostic| DiagnosticJson {
                severity: diagnostic.severity,
                claim_id: diagnostic.claim_id.clone(),
                field: diagnostic.field.clone(),
                message: diagnostic.message.clone(),
                timestamp: diagnostic.timestamp.to_rfc3339(),
            })
            .collect(),
    };
    let json = serde_json::to_string_pretty(&payload)?;
    std::fs::write(&path, format!("{json}\n")).with_context(|| format!("write {}", path.display()))?;
    Ok(path)
}
