//! In-memory representation of an institutional claim and its related
//! entities.
//!
//! Records are built once per run by the ingest layer and are never mutated
//! after validation begins. Date and amount fields are carried as the raw
//! strings supplied by the record store: the encoder reformats parseable
//! dates and passes everything else through unchanged, so no information is
//! lost between ingest and the wire.

use serde::{Deserialize, Serialize};

/// One institutional claim with its resolved joins and service lines.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClaimRecord {
    pub claim_id: String,
    /// BHT06 transaction type code ("CH" or "RP" for accepted claims).
    pub transaction_type_code: String,
    /// 2000B SBR09 claim filing indicator code.
    pub claim_filing_indicator_code: String,
    /// 2010BA NM102 entity type qualifier.
    pub entity_type_qualifier: String,
    /// 2300 CLM07 provider accept assignment code.
    pub provider_accept_assignment_code: String,
    /// 2300 CLM08 benefits assignment certification indicator.
    pub benefits_assignment_cert_indicator: String,
    /// 2300 CLM09 release of information code.
    pub release_info_code: String,
    pub claim_control_number: String,
    pub patient_control_number: String,
    pub claim_amount: String,
    pub place_of_service_code: String,
    pub claim_frequency_type_code: String,
    pub patient_status_code: String,
    pub admission_date: String,
    pub discharge_date: String,
    pub statement_from_date: String,
    pub statement_to_date: String,
    pub principal_diagnosis_code: String,
    /// Secondary diagnosis codes in store order; the encoder emits at most
    /// eight of them.
    #[serde(default)]
    pub secondary_diagnosis_codes: Vec<String>,
    #[serde(default)]
    pub referring_provider_npi: Option<String>,
    #[serde(default)]
    pub attending_provider_npi: Option<String>,
    pub patient: Patient,
    pub provider: Provider,
    pub payer: Payer,
    pub subscriber: Subscriber,
    /// Service lines in store order. Line numbers are assumed unique within
    /// a claim; uniqueness is an input contract, not enforced here.
    #[serde(default)]
    pub service_lines: Vec<ServiceLine>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Patient {
    pub first_name: String,
    pub last_name: String,
    pub gender: String,
    pub dob: String,
    pub address_line_1: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Provider {
    pub npi: String,
    /// Organization name; when present the billing-provider loop uses the
    /// organization NM1 variant, otherwise the person variant.
    #[serde(default)]
    pub organization_name: Option<String>,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    pub taxonomy_code: String,
    pub address_line_1: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    #[serde(default)]
    pub legacy_provider_id: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Payer {
    pub payer_name: String,
    pub payer_id_code: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Subscriber {
    pub insured_first_name: String,
    pub insured_last_name: String,
    pub insured_id: String,
    pub relationship_code: String,
    #[serde(default)]
    pub policy_number: Option<String>,
    #[serde(default)]
    pub group_number: Option<String>,
}

/// One 2400-loop service line.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServiceLine {
    pub line_number: u32,
    pub revenue_code: String,
    pub procedure_code_qualifier: String,
    pub procedure_code: String,
    pub charge_amount: String,
    pub units: u32,
    pub service_date: String,
}
