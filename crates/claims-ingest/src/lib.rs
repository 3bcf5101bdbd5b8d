//! Claim record-set ingest.
//!
//! Loads the six CSV files that make up a claim record-set and resolves the
//! joins in memory: each claim resolves to exactly one patient, provider,
//! payer, and subscriber, plus zero or more service lines. A missing
//! required join is an input-integrity error and aborts the run before
//! validation begins; it is never reported as a per-claim finding.

mod rows;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info};

use claims_model::{ClaimRecord, Patient, Payer, Provider, ServiceLine, Subscriber};

use crate::rows::{ClaimRow, PatientRow, PayerRow, ProviderRow, ServiceLineRow, SubscriberRow};

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("record-set file not found: {0}")]
    MissingFile(PathBuf),
    #[error("failed to read {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    #[error("claim {claim_id} references missing {entity} {key}")]
    MissingJoin {
        claim_id: String,
        entity: &'static str,
        key: String,
    },
}

pub type Result<T> = std::result::Result<T, IngestError>;

/// File names expected inside a record-set directory.
const CLAIMS_FILE: &str = "claims.csv";
const PATIENTS_FILE: &str = "patients.csv";
const PROVIDERS_FILE: &str = "providers.csv";
const PAYERS_FILE: &str = "payers.csv";
const SUBSCRIBERS_FILE: &str = "subscribers.csv";
const SERVICE_LINES_FILE: &str = "service_lines.csv";

/// Load a complete claim record-set from `input_dir`.
///
/// Claims come back in file order; each claim's service lines keep the
/// order they appear in `service_lines.csv`.
pub fn load_claims(input_dir: &Path) -> Result<Vec<ClaimRecord>> {
    let claim_rows: Vec<ClaimRow> = read_rows(&input_dir.join(CLAIMS_FILE))?;
    let patients: BTreeMap<String, PatientRow> =
        index_by(read_rows(&input_dir.join(PATIENTS_FILE))?, |r: &PatientRow| {
            r.patient_id.clone()
        });
    let providers: BTreeMap<String, ProviderRow> =
        index_by(read_rows(&input_dir.join(PROVIDERS_FILE))?, |r: &ProviderRow| {
            r.provider_id.clone()
        });
    let payers: BTreeMap<String, PayerRow> =
        index_by(read_rows(&input_dir.join(PAYERS_FILE))?, |r: &PayerRow| {
            r.payer_id.clone()
        });
    let subscribers: BTreeMap<String, SubscriberRow> = index_by(
        read_rows(&input_dir.join(SUBSCRIBERS_FILE))?,
        |r: &SubscriberRow| r.subscriber_id.clone(),
    );
    let line_rows: Vec<ServiceLineRow> = read_rows(&input_dir.join(SERVICE_LINES_FILE))?;

    let mut lines_by_claim: BTreeMap<String, Vec<ServiceLine>> = BTreeMap::new();
    for row in line_rows {
        lines_by_claim
            .entry(row.claim_id.clone())
            .or_default()
            .push(row.into_service_line());
    }

    let mut claims = Vec::with_capacity(claim_rows.len());
    for row in claim_rows {
        let patient = patients.get(&row.patient_id).ok_or_else(|| missing_join(
            &row.claim_id,
            "patient",
            &row.patient_id,
        ))?;
        let provider = providers.get(&row.provider_id).ok_or_else(|| {
            missing_join(&row.claim_id, "provider", &row.provider_id)
        })?;
        let payer = payers
            .get(&row.payer_id)
            .ok_or_else(|| missing_join(&row.claim_id, "payer", &row.payer_id))?;
        let subscriber = subscribers.get(&row.subscriber_id).ok_or_else(|| {
            missing_join(&row.claim_id, "subscriber", &row.subscriber_id)
        })?;
        let service_lines = lines_by_claim.remove(&row.claim_id).unwrap_or_default();
        debug!(
            claim_id = %row.claim_id,
            service_lines = service_lines.len(),
            "resolved claim joins"
        );
        claims.push(build_claim(row, patient, provider, payer, subscriber, service_lines));
    }

    info!(claims = claims.len(), "loaded claim record-set");
    Ok(claims)
}

fn missing_join(claim_id: &str, entity: &'static str, key: &str) -> IngestError {
    IngestError::MissingJoin {
        claim_id: claim_id.to_string(),
        entity,
        key: key.to_string(),
    }
}

fn read_rows<T: serde::de::DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    if !path.exists() {
        return Err(IngestError::MissingFile(path.to_path_buf()));
    }
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|source| IngestError::Csv {
            path: path.to_path_buf(),
            source,
        })?;
    let mut rows = Vec::new();
    for record in reader.deserialize() {
        let row = record.map_err(|source| IngestError::Csv {
            path: path.to_path_buf(),
            source,
        })?;
        rows.push(row);
    }
    Ok(rows)
}

fn index_by<T>(rows: Vec<T>, key: impl Fn(&T) -> String) -> BTreeMap<String, T> {
    let mut map = BTreeMap::new();
    for row in rows {
        map.insert(key(&row), row);
    }
    map
}

fn build_claim(
    row: ClaimRow,
    patient: &PatientRow,
    provider: &ProviderRow,
    payer: &PayerRow,
    subscriber: &SubscriberRow,
    service_lines: Vec<ServiceLine>,
) -> ClaimRecord {
    ClaimRecord {
        claim_id: row.claim_id,
        transaction_type_code: row.transaction_type_code,
        claim_filing_indicator_code: row.claim_filing_indicator_code,
        entity_type_qualifier: row.entity_type_qualifier,
        provider_accept_assignment_code: row.provider_accept_assignment_code,
        benefits_assignment_cert_indicator: row.benefits_assignment_cert_indicator,
        release_info_code: row.release_info_code,
        claim_control_number: row.claim_control_number,
        patient_control_number: row.patient_control_number,
        claim_amount: row.claim_amount,
        place_of_service_code: row.place_of_service_code,
        claim_frequency_type_code: row.claim_frequency_type_code,
        patient_status_code: row.patient_status_code,
        admission_date: row.admission_date,
        discharge_date: row.discharge_date,
        statement_from_date: row.statement_from_date,
        statement_to_date: row.statement_to_date,
        principal_diagnosis_code: row.principal_diagnosis_code,
        secondary_diagnosis_codes: split_codes(&row.secondary_diagnosis_codes),
        referring_provider_npi: non_empty(row.referring_provider_npi),
        attending_provider_npi: non_empty(row.attending_provider_npi),
        patient: Patient {
            first_name: patient.first_name.clone(),
            last_name: patient.last_name.clone(),
            gender: patient.gender.clone(),
            dob: patient.dob.clone(),
            address_line_1: patient.address_line_1.clone(),
            city: patient.city.clone(),
            state: patient.state.clone(),
            zip_code: patient.zip_code.clone(),
        },
        provider: Provider {
            npi: provider.npi.clone(),
            organization_name: non_empty(provider.organization_name.clone()),
            first_name: provider.provider_first_name.clone().unwrap_or_default(),
            last_name: provider.provider_last_name.clone().unwrap_or_default(),
            taxonomy_code: provider.taxonomy_code.clone(),
            address_line_1: provider.address_line_1.clone(),
            city: provider.city.clone(),
            state: provider.state.clone(),
            zip_code: provider.zip_code.clone(),
            legacy_provider_id: non_empty(provider.legacy_provider_id.clone()),
        },
        payer: Payer {
            payer_name: payer.payer_name.clone(),
            payer_id_code: payer.payer_id_code.clone(),
        },
        subscriber: Subscriber {
            insured_first_name: subscriber.insured_first_name.clone(),
            insured_last_name: subscriber.insured_last_name.clone(),
            insured_id: subscriber.insured_id.clone(),
            relationship_code: subscriber.relationship_code.clone(),
            policy_number: non_empty(subscriber.policy_number.clone()),
            group_number: non_empty(subscriber.group_number.clone()),
        },
        service_lines,
    }
}

/// Split a comma-separated code field, trimming whitespace and dropping
/// empty entries.
fn split_codes(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|code| !code.is_empty())
        .map(ToOwned::to_owned)
        .collect()
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
