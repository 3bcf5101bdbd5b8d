//! 837I document writer.
//!
//! Walks a batch of validated claims and emits the full segment sequence:
//! interchange/group/transaction envelope, submitter and receiver loops,
//! per-claim hierarchical loops with service lines, and the matching
//! trailers. The SE segment count is tracked while writing, so the trailer
//! is exact by construction and no placeholder substitution happens.
//!
//! The writer does not re-validate: it trusts the validation gate and
//! renders missing optional data as empty elements.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use tracing::{info, warn};

use claims_model::{ClaimRecord, SubmissionConfig};

use crate::control::{ControlNumberSource, ControlNumbers, RandomControlNumbers};
use crate::dates::compact_date;
use crate::error::{EdiError, Result};
use crate::segment::{Segment, SegmentBuffer};

pub const ISA_CONTROL_VERSION: &str = "00501";
/// 837I implementation guide version identifier.
pub const GS_VERSION: &str = "005010X223A2";

/// At most eight secondary diagnosis codes fit in the HI segment.
const MAX_SECONDARY_DIAGNOSES: usize = 8;

/// One encoded 837I document.
#[derive(Debug, Clone)]
pub struct Edi837Document {
    pub file_name: String,
    pub content: String,
    pub claim_count: usize,
    /// Count carried in the SE trailer: segments from ST through SE
    /// inclusive.
    pub segment_count: usize,
    pub control_numbers: ControlNumbers,
}

/// 837I encoder for a fixed submission profile.
pub struct Edi837Writer<'a, C: ControlNumberSource = RandomControlNumbers> {
    config: &'a SubmissionConfig,
    control: C,
}

impl<'a> Edi837Writer<'a, RandomControlNumbers> {
    pub fn new(config: &'a SubmissionConfig) -> Self {
        Self {
            config,
            control: RandomControlNumbers,
        }
    }
}

impl<'a, C: ControlNumberSource> Edi837Writer<'a, C> {
    pub fn with_control_source(config: &'a SubmissionConfig, control: C) -> Self {
        Self { config, control }
    }

    /// Encode one document per non-empty batch, in batch order.
    pub fn encode_batches(&mut self, batches: &[Vec<ClaimRecord>]) -> Vec<Edi837Document> {
        let mut documents = Vec::with_capacity(batches.len());
        for (index, batch) in batches.iter().enumerate() {
            match self.encode_batch(batch, index + 1) {
                Some(document) => documents.push(document),
                None => warn!(batch = index + 1, "skipping empty claim batch"),
            }
        }
        documents
    }

    /// Encode a single batch; `batch_seq` is 1-based and lands in the file
    /// name. An empty batch yields no document.
    pub fn encode_batch(
        &mut self,
        batch: &[ClaimRecord],
        batch_seq: usize,
    ) -> Option<Edi837Document> {
        let first = batch.first()?;
        let numbers = self.control.next();
        let now = Local::now();
        let now_date = now.format("%Y%m%d").to_string();
        let now_time = now.format("%H%M").to_string();

        let mut buffer = SegmentBuffer::new();
        self.write_interchange_header(&mut buffer, &numbers, &now_date, &now_time);
        self.write_group_header(&mut buffer, &numbers, &now_date, &now_time);

        // The SE count covers ST through SE inclusive.
        let st_position = buffer.len();
        buffer.push(
            Segment::new("ST")
                .element("837")
                .element(&numbers.st)
                .element(GS_VERSION),
        );
        buffer.push(
            Segment::new("BHT")
                .element("0019")
                .element(&self.config.purpose_code)
                .element(&first.claim_control_number)
                .element(&now_date)
                .element(&now_time)
                .element(&first.transaction_type_code),
        );
        self.write_submitter_loop(&mut buffer);
        self.write_receiver_loop(&mut buffer);

        // Hierarchical ids are shared across the whole batch and never
        // reset between claims.
        let mut hierarchical_id = 1u32;
        for claim in batch {
            self.write_claim(&mut buffer, claim, &mut hierarchical_id);
        }

        let segment_count = buffer.len() - st_position + 1;
        buffer.push(
            Segment::new("SE")
                .element(segment_count.to_string())
                .element(&numbers.st),
        );
        buffer.push(Segment::new("GE").element("1").element(&numbers.gs));
        buffer.push(Segment::new("IEA").element("1").element(&numbers.isa));

        Some(Edi837Document {
            file_name: document_file_name(&self.config.receiver_id, now, batch_seq),
            content: buffer.finish(),
            claim_count: batch.len(),
            segment_count,
            control_numbers: numbers,
        })
    }

    fn write_interchange_header(
        &self,
        buffer: &mut SegmentBuffer,
        numbers: &ControlNumbers,
        date: &str,
        time: &str,
    ) {
        buffer.push(
            Segment::new("ISA")
                .element("00")
                .element(" ".repeat(10))
                .element("00")
                .element(" ".repeat(10))
                .element("ZZ")
                .element(format!("{:<15}", self.config.sender_id))
                .element("ZZ")
                .element(format!("{:<15}", self.config.receiver_id))
                .element(date)
                .element(time)
                .element("^")
                .element(ISA_CONTROL_VERSION)
                .element(&numbers.isa)
                .element("0")
                .element("P")
                .element(":"),
        );
    }

    fn write_group_header(
        &self,
        buffer: &mut SegmentBuffer,
        numbers: &ControlNumbers,
        date: &str,
        time: &str,
    ) {
        buffer.push(
            Segment::new("GS")
                .element("HC")
                .element(&self.config.sender_id)
                .element(&self.config.receiver_id)
                .element(date)
                .element(time)
                .element(&numbers.gs)
                .element("X")
                .element(GS_VERSION),
        );
    }

    /// 1000A submitter loop and its EDI contact segment.
    fn write_submitter_loop(&self, buffer: &mut SegmentBuffer) {
        buffer.push(
            Segment::new("NM1")
                .element("41")
                .element("2")
                .element(&self.config.sender_id)
                .blanks(4)
                .element("46")
                .element(&self.config.submitter_id),
        );
        buffer.push(
            Segment::new("PER")
                .element("IC")
                .element(&self.config.submitter_contact_name)
                .element("TE")
                .element(&self.config.submitter_contact_phone),
        );
    }

    /// 1000B receiver loop.
    fn write_receiver_loop(&self, buffer: &mut SegmentBuffer) {
        buffer.push(
            Segment::new("NM1")
                .element("40")
                .element("2")
                .element(&self.config.receiver_id)
                .blanks(4)
                .element("46")
                .element(&self.config.receiver_id),
        );
    }

    fn write_claim(
        &self,
        buffer: &mut SegmentBuffer,
        claim: &ClaimRecord,
        hierarchical_id: &mut u32,
    ) {
        let provider_hierarchical_id = *hierarchical_id;
        self.write_billing_provider_loop(buffer, claim, provider_hierarchical_id);
        *hierarchical_id += 1;

        self.write_subscriber_loop(buffer, claim, *hierarchical_id, provider_hierarchical_id);
        *hierarchical_id += 1;

        self.write_claim_information(buffer, claim);
        self.write_service_lines(buffer, claim);
        self.write_conditional_providers(buffer, claim);
    }

    /// 2000A billing-provider hierarchical level: HL, name, address,
    /// taxonomy.
    fn write_billing_provider_loop(
        &self,
        buffer: &mut SegmentBuffer,
        claim: &ClaimRecord,
        hierarchical_id: u32,
    ) {
        buffer.push(
            Segment::new("HL")
                .element(hierarchical_id.to_string())
                .element("")
                .element("20")
                .element("1"),
        );

        let provider = &claim.provider;
        let name = match &provider.organization_name {
            Some(organization) => Segment::new("NM1")
                .element("85")
                .element("2")
                .element(organization),
            None => Segment::new("NM1")
                .element("85")
                .element("1")
                .element(&provider.last_name)
                .element(&provider.first_name),
        };
        buffer.push(name.blanks(4).element("XX").element(&provider.npi));

        buffer.push(Segment::new("N3").element(&provider.address_line_1));
        buffer.push(
            Segment::new("N4")
                .element(&provider.city)
                .element(&provider.state)
                .element(&provider.zip_code),
        );
        buffer.push(
            Segment::new("PRV")
                .element("BI")
                .element("PXC")
                .element(&provider.taxonomy_code),
        );
    }

    /// 2000B subscriber hierarchical level: HL, SBR, name, address,
    /// demographics, payer name.
    fn write_subscriber_loop(
        &self,
        buffer: &mut SegmentBuffer,
        claim: &ClaimRecord,
        hierarchical_id: u32,
        parent_id: u32,
    ) {
        buffer.push(
            Segment::new("HL")
                .element(hierarchical_id.to_string())
                .element(parent_id.to_string())
                .element("22")
                .element("0"),
        );

        let subscriber = &claim.subscriber;
        buffer.push(
            Segment::new("SBR")
                .element("P")
                .element(&subscriber.relationship_code)
                .element(subscriber.group_number.clone().unwrap_or_default())
                .blanks(4)
                .element(&claim.claim_filing_indicator_code),
        );
        buffer.push(
            Segment::new("NM1")
                .element("IL")
                .element(&claim.entity_type_qualifier)
                .element(&subscriber.insured_last_name)
                .element(&subscriber.insured_first_name)
                .blanks(3)
                .element("MI")
                .element(&subscriber.insured_id),
        );

        let patient = &claim.patient;
        buffer.push(Segment::new("N3").element(&patient.address_line_1));
        buffer.push(
            Segment::new("N4")
                .element(&patient.city)
                .element(&patient.state)
                .element(&patient.zip_code),
        );
        buffer.push(
            Segment::new("DMG")
                .element("D8")
                .element(compact_date(&patient.dob))
                .element(&patient.gender),
        );
        buffer.push(
            Segment::new("NM1")
                .element("PR")
                .element("2")
                .element(&claim.payer.payer_name)
                .blanks(4)
                .element("PI")
                .element(&claim.payer.payer_id_code),
        );
    }

    /// 2300 claim information: CLM, CL1, date segments, HI diagnoses.
    fn write_claim_information(&self, buffer: &mut SegmentBuffer, claim: &ClaimRecord) {
        buffer.push(
            Segment::new("CLM")
                .element(&claim.patient_control_number)
                .element(&claim.claim_amount)
                .blanks(4)
                .element(&claim.provider_accept_assignment_code)
                .element(&claim.benefits_assignment_cert_indicator)
                .element(&claim.release_info_code),
        );
        buffer.push(
            Segment::new("CL1")
                .element(&claim.place_of_service_code)
                .element(&claim.claim_frequency_type_code)
                .element(&claim.patient_status_code),
        );
        buffer.push(
            Segment::new("DTP")
                .element("435")
                .element("D8")
                .element(compact_date(&claim.admission_date)),
        );
        buffer.push(
            Segment::new("DTP")
                .element("096")
                .element("D8")
                .element(compact_date(&claim.discharge_date)),
        );
        buffer.push(Segment::new("DTP").element("434").element("RD8").element(format!(
            "{}-{}",
            compact_date(&claim.statement_from_date),
            compact_date(&claim.statement_to_date),
        )));

        let mut diagnoses = Segment::new("HI").composite(&["ABK", &claim.principal_diagnosis_code]);
        for code in claim
            .secondary_diagnosis_codes
            .iter()
            .take(MAX_SECONDARY_DIAGNOSES)
        {
            diagnoses = diagnoses.composite(&["ABF", code.trim()]);
        }
        buffer.push(diagnoses);
    }

    /// 2400 service-line loops in stored order.
    fn write_service_lines(&self, buffer: &mut SegmentBuffer, claim: &ClaimRecord) {
        for line in &claim.service_lines {
            buffer.push(Segment::new("LX").element(line.line_number.to_string()));
            buffer.push(
                Segment::new("SV2")
                    .element(&line.revenue_code)
                    .composite(&[&line.procedure_code_qualifier, &line.procedure_code])
                    .element(&line.charge_amount)
                    .element("UN")
                    .element(line.units.to_string()),
            );
            buffer.push(
                Segment::new("DTP")
                    .element("472")
                    .element("D8")
                    .element(compact_date(&line.service_date)),
            );
        }
    }

    /// Referring and attending provider loops, present only when the
    /// corresponding NPI is.
    fn write_conditional_providers(&self, buffer: &mut SegmentBuffer, claim: &ClaimRecord) {
        if let Some(npi) = &claim.referring_provider_npi {
            buffer.push(
                Segment::new("NM1")
                    .element("DN")
                    .element("1")
                    .element("REFERRING")
                    .element("PROVIDER")
                    .blanks(3)
                    .element("XX")
                    .element(npi),
            );
        }
        if let Some(npi) = &claim.attending_provider_npi {
            buffer.push(
                Segment::new("NM1")
                    .element("71")
                    .element("1")
                    .element("ATTENDING")
                    .element("PROVIDER")
                    .blanks(3)
                    .element("XX")
                    .element(npi),
            );
            buffer.push(
                Segment::new("PRV")
                    .element("AT")
                    .element("PXC")
                    .element(&claim.provider.taxonomy_code),
            );
        }
    }
}

fn document_file_name(receiver_id: &str, now: DateTime<Local>, batch_seq: usize) -> String {
    format!("837I_{receiver_id}_{}_{batch_seq}.txt", now.format("%Y%m%d"))
}

/// Write encoded documents into `output_dir`, one file each.
pub fn write_documents(output_dir: &Path, documents: &[Edi837Document]) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(output_dir)?;
    let mut paths = Vec::with_capacity(documents.len());
    for document in documents {
        let path = output_dir.join(&document.file_name);
        fs::write(&path, &document.content).map_err(|source| EdiError::WriteDocument {
            path: path.clone(),
            source,
        })?;
        info!(
            path = %path.display(),
            claims = document.claim_count,
            "generated 837I file"
        );
        paths.push(path);
    }
    Ok(paths)
}
