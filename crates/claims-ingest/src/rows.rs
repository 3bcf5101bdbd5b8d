//! Raw CSV row shapes, one struct per record-set file.

use serde::Deserialize;

use claims_model::ServiceLine;

#[derive(Debug, Deserialize)]
pub struct ClaimRow {
    pub claim_id: String,
    pub patient_id: String,
    pub provider_id: String,
    pub payer_id: String,
    pub subscriber_id: String,
    pub transaction_type_code: String,
    pub claim_filing_indicator_code: String,
    pub entity_type_qualifier: String,
    pub provider_accept_assignment_code: String,
    pub benefits_assignment_cert_indicator: String,
    pub release_info_code: String,
    pub claim_control_number: String,
    pub patient_control_number: String,
    pub claim_amount: String,
    pub place_of_service_code: String,
    pub claim_frequency_type_code: String,
    pub patient_status_code: String,
    #[serde(default)]
    pub admission_date: String,
    #[serde(default)]
    pub discharge_date: String,
    #[serde(default)]
    pub statement_from_date: String,
    #[serde(default)]
    pub statement_to_date: String,
    pub principal_diagnosis_code: String,
    #[serde(default)]
    pub secondary_diagnosis_codes: String,
    #[serde(default)]
    pub referring_provider_npi: Option<String>,
    #[serde(default)]
    pub attending_provider_npi: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PatientRow {
    pub patient_id: String,
    pub first_name: String,
    pub last_name: String,
    pub gender: String,
    pub dob: String,
    pub address_line_1: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
}

#[derive(Debug, Deserialize)]
pub struct ProviderRow {
    pub provider_id: String,
    pub npi: String,
    #[serde(default)]
    pub organization_name: Option<String>,
    #[serde(default)]
    pub provider_first_name: Option<String>,
    #[serde(default)]
    pub provider_last_name: Option<String>,
    pub taxonomy_code: String,
    pub address_line_1: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    #[serde(default)]
    pub legacy_provider_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PayerRow {
    pub payer_id: String,
    pub payer_name: String,
    pub payer_id_code: String,
}

#[derive(Debug, Deserialize)]
pub struct SubscriberRow {
    pub subscriber_id: String,
    pub insured_first_name: String,
    pub insured_last_name: String,
    pub insured_id: String,
    pub relationship_code: String,
    #[serde(default)]
    pub policy_number: Option<String>,
    #[serde(default)]
    pub group_number: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ServiceLineRow {
    pub claim_id: String,
    pub line_number: u32,
    pub revenue_code: String,
    pub procedure_code_qualifier: String,
    pub procedure_code: String,
    pub charge_amount: String,
    pub units: u32,
    #[serde(default)]
    pub service_date: String,
}

impl ServiceLineRow {
    pub fn into_service_line(self) -> ServiceLine {
        ServiceLine {
            line_number: self.line_number,
            revenue_code: self.revenue_code,
            procedure_code_qualifier: self.procedure_code_qualifier,
            procedure_code: self.procedure_code,
            charge_amount: self.charge_amount,
            units: self.units,
            service_date: self.service_date,
        }
    }
}
