//! Validation Engine for institutional claims.
//!
//! Applies the payer rule set to every claim in a fixed order, collecting
//! severity-tagged diagnostics. A claim is retained for encoding iff it
//! produced no `Error`-level finding; warnings and advisories never
//! disqualify. Diagnostics come back for all input claims, valid or not.

mod rules;

use tracing::debug;

use claims_model::{ClaimRecord, Diagnostic, DiagnosticSet, Severity, SubmissionConfig};

/// Result of running the rule set over a claim sequence.
#[derive(Debug, Default)]
pub struct ValidationOutcome {
    /// Claims with zero error-level findings, in input order.
    pub valid_claims: Vec<ClaimRecord>,
    /// Findings for every input claim, in rule order per claim.
    pub diagnostics: DiagnosticSet,
}

/// Validate claims against the payer profile.
///
/// Pure over the input apart from wall-clock timestamps on each finding.
/// Includes the subscriber-information second pass, which runs only over
/// claims that already passed the hard compliance rules.
pub fn validate_claims(claims: &[ClaimRecord], config: &SubmissionConfig) -> ValidationOutcome {
    let mut outcome = ValidationOutcome::default();

    for claim in claims {
        let findings = validate_claim(claim, config);
        let has_errors = findings.iter().any(|d| d.severity == Severity::Error);
        debug!(
            claim_id = %claim.claim_id,
            findings = findings.len(),
            valid = !has_errors,
            "validated claim"
        );
        outcome.diagnostics.extend(findings);
        if !has_errors {
            outcome.valid_claims.push(claim.clone());
        }
    }

    outcome
        .diagnostics
        .extend(validate_subscriber_info(&outcome.valid_claims));
    outcome
}

/// Run the ordered rule set over a single claim.
///
/// The order only affects diagnostic ordering; every rule is independent.
fn validate_claim(claim: &ClaimRecord, config: &SubmissionConfig) -> Vec<Diagnostic> {
    let mut findings = Vec::new();
    findings.extend(rules::transaction_type_issue(claim, config));
    findings.extend(rules::filing_indicator_issue(claim, config));
    findings.extend(rules::entity_type_issue(claim));
    findings.extend(rules::accept_assignment_issue(claim));
    findings.extend(rules::benefits_assignment_issue(claim));
    findings.extend(rules::release_info_issue(claim));
    findings.extend(rules::procedure_qualifier_issues(claim));
    findings.extend(rules::hi_segment_advisories(claim));
    findings
}

/// Subscriber-information second pass.
///
/// Emits one payer-sequencing advisory per already-valid claim.
pub fn validate_subscriber_info(claims: &[ClaimRecord]) -> Vec<Diagnostic> {
    claims
        .iter()
        .map(rules::subscriber_sequencing_advisory)
        .collect()
}

/// One entry of the payer rule catalog, for operator-facing listings.
#[derive(Debug, Clone)]
pub struct RuleInfo {
    pub field: &'static str,
    pub severity: Severity,
    pub description: &'static str,
}

/// The payer rule set in application order.
pub fn rule_catalog() -> Vec<RuleInfo> {
    vec![
        RuleInfo {
            field: "transaction_type_code",
            severity: Severity::Error,
            description: "BHT06 must be one of the accepted transaction type codes",
        },
        RuleInfo {
            field: "claim_filing_indicator_code",
            severity: Severity::Error,
            description: "SBR09 must match the payer's claim filing indicator",
        },
        RuleInfo {
            field: "entity_type_qualifier",
            severity: Severity::Error,
            description: "NM102 must be '1' (Person)",
        },
        RuleInfo {
            field: "provider_accept_assignment_code",
            severity: Severity::Error,
            description: "CLM07 must be 'A'",
        },
        RuleInfo {
            field: "benefits_assignment_cert_indicator",
            severity: Severity::Error,
            description: "CLM08 must be 'Y'",
        },
        RuleInfo {
            field: "release_info_code",
            severity: Severity::Error,
            description: "CLM09 must be 'Y'",
        },
        RuleInfo {
            field: "procedure_code_qualifier",
            severity: Severity::Warning,
            description: "SV202-1 should be 'HC' on every service line",
        },
        RuleInfo {
            field: "HI_segment_principal_procedure",
            severity: Severity::Info,
            description: "HI01-2 is only used when HI01-1 equals BR",
        },
        RuleInfo {
            field: "HI_segment_other_procedure",
            severity: Severity::Info,
            description: "HI01-2 is only used when HI01-1 equals BQ",
        },
        RuleInfo {
            field: "HI_segment_HCPCS",
            severity: Severity::Warning,
            description: "HCPCS codes belong at the service-line level, not the HI segment",
        },
        RuleInfo {
            field: "SBR01",
            severity: Severity::Info,
            description: "SBR01 should reflect the number of other payers (valid claims only)",
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use claims_model::ServiceLine;

    fn compliant_claim(id: &str) -> ClaimRecord {
        ClaimRecord {
            claim_id: id.to_string(),
            transaction_type_code: "CH".to_string(),
            claim_filing_indicator_code: "MC".to_string(),
            entity_type_qualifier: "1".to_string(),
            provider_accept_assignment_code: "A".to_string(),
            benefits_assignment_cert_indicator: "Y".to_string(),
            release_info_code: "Y".to_string(),
            ..ClaimRecord::default()
        }
    }

    #[test]
    fn compliant_claim_is_retained_with_advisories_only() {
        let claims = vec![compliant_claim("CLM001")];
        let outcome = validate_claims(&claims, &SubmissionConfig::default());
        assert_eq!(outcome.valid_claims.len(), 1);
        assert_eq!(outcome.diagnostics.error_count(), 0);
        // Two HI INFO advisories + one subscriber-pass INFO, one HI warning.
        assert_eq!(outcome.diagnostics.info_count(), 3);
        assert_eq!(outcome.diagnostics.warning_count(), 1);
    }

    #[test]
    fn error_claim_is_excluded_but_still_diagnosed() {
        let mut bad = compliant_claim("CLM002");
        bad.claim_filing_indicator_code = "BL".to_string();
        let claims = vec![compliant_claim("CLM001"), bad];
        let outcome = validate_claims(&claims, &SubmissionConfig::default());
        assert_eq!(outcome.valid_claims.len(), 1);
        assert_eq!(outcome.valid_claims[0].claim_id, "CLM001");
        assert_eq!(outcome.diagnostics.error_count(), 1);
        assert!(outcome.diagnostics.has_errors_for("CLM002"));
        // The invalid claim still contributed its advisories.
        assert!(
            outcome
                .diagnostics
                .iter()
                .any(|d| d.claim_id == "CLM002" && d.severity == Severity::Info)
        );
        // But not the subscriber second-pass advisory.
        assert!(
            !outcome
                .diagnostics
                .iter()
                .any(|d| d.claim_id == "CLM002" && d.field.as_deref() == Some("SBR01"))
        );
    }

    #[test]
    fn warnings_never_disqualify() {
        let mut claim = compliant_claim("CLM003");
        claim.service_lines = vec![ServiceLine {
            line_number: 1,
            procedure_code_qualifier: "ZZ".to_string(),
            ..ServiceLine::default()
        }];
        let outcome = validate_claims(&[claim], &SubmissionConfig::default());
        assert_eq!(outcome.valid_claims.len(), 1);
        assert!(outcome.diagnostics.warning_count() >= 2);
    }

    #[test]
    fn verdict_matches_error_presence_for_every_claim() {
        let mut claims = Vec::new();
        for (i, code) in ["CH", "XX", "RP", "QQ"].iter().enumerate() {
            let mut claim = compliant_claim(&format!("CLM{i:03}"));
            claim.transaction_type_code = (*code).to_string();
            claims.push(claim);
        }
        let outcome = validate_claims(&claims, &SubmissionConfig::default());
        for claim in &claims {
            let retained = outcome
                .valid_claims
                .iter()
                .any(|c| c.claim_id == claim.claim_id);
            assert_eq!(retained, !outcome.diagnostics.has_errors_for(&claim.claim_id));
        }
    }

    #[test]
    fn revalidation_yields_identical_counts() {
        let mut bad = compliant_claim("CLM010");
        bad.release_info_code = "N".to_string();
        let claims = vec![compliant_claim("CLM009"), bad];
        let config = SubmissionConfig::default();
        let first = validate_claims(&claims, &config);
        let second = validate_claims(&claims, &config);
        assert_eq!(
            first
                .valid_claims
                .iter()
                .map(|c| c.claim_id.clone())
                .collect::<Vec<_>>(),
            second
                .valid_claims
                .iter()
                .map(|c| c.claim_id.clone())
                .collect::<Vec<_>>()
        );
        assert_eq!(first.diagnostics.error_count(), second.diagnostics.error_count());
        assert_eq!(
            first.diagnostics.warning_count(),
            second.diagnostics.warning_count()
        );
        assert_eq!(first.diagnostics.info_count(), second.diagnostics.info_count());
    }
}
