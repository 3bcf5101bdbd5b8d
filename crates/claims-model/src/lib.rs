pub mod config;
pub mod diagnostic;
pub mod record;

pub use config::{DEFAULT_BATCH_SIZE, SubmissionConfig};
pub use diagnostic::{Diagnostic, DiagnosticSet, Severity};
pub use record::{ClaimRecord, Patient, Payer, Provider, ServiceLine, Subscriber};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn claim_record_round_trips_through_json() {
        let claim = ClaimRecord {
            claim_id: "CLM001".to_string(),
            transaction_type_code: "CH".to_string(),
            claim_amount: "1250.00".to_string(),
            secondary_diagnosis_codes: vec!["E11.9".to_string(), "I10".to_string()],
            service_lines: vec![ServiceLine {
                line_number: 1,
                revenue_code: "0450".to_string(),
                procedure_code_qualifier: "HC".to_string(),
                procedure_code: "99284".to_string(),
                charge_amount: "1250.00".to_string(),
                units: 1,
                service_date: "2024-03-01".to_string(),
            }],
            ..ClaimRecord::default()
        };
        let json = serde_json::to_string(&claim).expect("serialize claim");
        let round: ClaimRecord = serde_json::from_str(&json).expect("deserialize claim");
        assert_eq!(round.claim_id, "CLM001");
        assert_eq!(round.service_lines.len(), 1);
        assert_eq!(round.secondary_diagnosis_codes, claim.secondary_diagnosis_codes);
    }
}
