//! Submission profile configuration.
//!
//! Everything a trading-partner agreement fixes lives here: envelope
//! identities, the accepted transaction/filing codes, and the batch size.
//! Defaults mirror the Kentucky Medicaid profile; a deployment overrides
//! them with a JSON file.

use serde::{Deserialize, Serialize};

pub const DEFAULT_BATCH_SIZE: usize = 100;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SubmissionConfig {
    /// ISA06/GS02 sender identifier assigned by the payer.
    pub sender_id: String,
    /// ISA08/GS03 receiver identifier.
    pub receiver_id: String,
    /// 1000A NM109 submitter identifier.
    pub submitter_id: String,
    pub submitter_contact_name: String,
    pub submitter_contact_phone: String,
    /// BHT02 transaction set purpose code.
    pub purpose_code: String,
    /// Accepted BHT06 transaction type codes.
    pub transaction_type_codes: Vec<String>,
    /// Accepted SBR09 claim filing indicator code.
    pub claim_filing_indicator_code: String,
    /// Maximum claims per generated document.
    pub batch_size: usize,
}

impl Default for SubmissionConfig {
    fn default() -> Self {
        Self {
            sender_id: "KYSUBMITTER".to_string(),
            receiver_id: "KYMEDICAID".to_string(),
            submitter_id: "KYSUBMIT".to_string(),
            submitter_contact_name: "SUBMITTER CONTACT".to_string(),
            submitter_contact_phone: "8005551234".to_string(),
            purpose_code: "00".to_string(),
            transaction_type_codes: vec!["CH".to_string(), "RP".to_string()],
            claim_filing_indicator_code: "MC".to_string(),
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }
}

impl SubmissionConfig {
    pub fn accepts_transaction_type(&self, code: &str) -> bool {
        self.transaction_type_codes.iter().any(|c| c == code)
    }
}
