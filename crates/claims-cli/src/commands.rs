use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use comfy_table::Table;
use tracing::{info, info_span, warn};

use claims_model::SubmissionConfig;
use claims_report::{RunSummary, write_diagnostics_json, write_validation_log};
use claims_validate::{rule_catalog, validate_claims};
use edi_837i::{Edi837Writer, SequentialControlNumbers, batch_claims, write_documents};

use crate::cli::SubmitArgs;
use crate::summary::apply_table_style;
use crate::types::{DocumentSummary, SubmitResult};

/// List the payer rule set in application order.
pub fn run_rules() -> Result<()> {
    let mut table = Table::new();
    table.set_header(vec!["Field", "Severity", "Rule"]);
    apply_table_style(&mut table);
    for rule in rule_catalog() {
        table.add_row(vec![
            rule.field.to_string(),
            rule.severity.to_string(),
            rule.description.to_string(),
        ]);
    }
    println!("{table}");
    Ok(())
}

/// Run the full submission pipeline: ingest, validate, report, batch,
/// encode, write.
pub fn run_submit(args: &SubmitArgs) -> Result<SubmitResult> {
    let span = info_span!("submit", record_set = %args.input_dir.display());
    let _guard = span.enter();

    let config = load_config(args)?;
    let output_dir = args
        .output_dir
        .clone()
        .unwrap_or_else(|| args.input_dir.join("output"));

    info!("loading claim record-set");
    let claims = claims_ingest::load_claims(&args.input_dir)
        .context("load claim record-set")?;
    info!(claims = claims.len(), "retrieved claims");

    info!("validating claims");
    let outcome = validate_claims(&claims, &config);
    let summary = RunSummary {
        total_claims: claims.len(),
        valid_claims: outcome.valid_claims.len(),
    };
    info!(
        valid = summary.valid_claims,
        errors = outcome.diagnostics.error_count(),
        warnings = outcome.diagnostics.warning_count(),
        infos = outcome.diagnostics.info_count(),
        "validation complete"
    );

    let validation_log = write_validation_log(&output_dir, summary, &outcome.diagnostics)
        .context("write validation log")?;
    let diagnostics_json = write_diagnostics_json(&output_dir, summary, &outcome.diagnostics)
        .context("write diagnostics payload")?;

    let mut documents = Vec::new();
    if args.dry_run {
        info!("dry run: skipping document generation");
    } else if outcome.valid_claims.is_empty() {
        warn!("no valid claims to process");
    } else {
        let batches = batch_claims(&outcome.valid_claims, config.batch_size);
        let encoded = if args.sequential_control_numbers {
            Edi837Writer::with_control_source(&config, SequentialControlNumbers::default())
                .encode_batches(&batches)
        } else {
            Edi837Writer::new(&config).encode_batches(&batches)
        };
        let paths = write_documents(&output_dir, &encoded).context("write 837I documents")?;
        documents = paths
            .into_iter()
            .zip(encoded.iter())
            .map(|(path, document)| DocumentSummary {
                path,
                claims: document.claim_count,
                segments: document.segment_count,
            })
            .collect();
    }

    Ok(SubmitResult {
        total_claims: summary.total_claims,
        valid_claims: summary.valid_claims,
        error_count: outcome.diagnostics.error_count(),
        warning_count: outcome.diagnostics.warning_count(),
        info_count: outcome.diagnostics.info_count(),
        output_dir,
        validation_log,
        diagnostics_json,
        documents,
        dry_run: args.dry_run,
    })
}

fn load_config(args: &SubmitArgs) -> Result<SubmissionConfig> {
    let mut config = match &args.config {
        Some(path) => read_config(path)?,
        None => SubmissionConfig::default(),
    };
    if let Some(batch_size) = args.batch_size {
        config.batch_size = batch_size.max(1);
    }
    Ok(config)
}

fn read_config(path: &Path) -> Result<SubmissionConfig> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("read submission profile {}", path.display()))?;
    serde_json::from_str(&text)
        .with_context(|| format!("parse submission profile {}", path.display()))
}
