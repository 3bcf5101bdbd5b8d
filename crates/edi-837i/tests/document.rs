//! Integration tests for 837I document generation.

use claims_model::{ClaimRecord, Patient, Payer, Provider, ServiceLine, Subscriber, SubmissionConfig};
use edi_837i::{
    Edi837Document, Edi837Writer, SequentialControlNumbers, batch_claims, write_documents,
};

fn test_claim(id: &str, lines: usize) -> ClaimRecord {
    ClaimRecord {
        claim_id: id.to_string(),
        transaction_type_code: "CH".to_string(),
        claim_filing_indicator_code: "MC".to_string(),
        entity_type_qualifier: "1".to_string(),
        provider_accept_assignment_code: "A".to_string(),
        benefits_assignment_cert_indicator: "Y".to_string(),
        release_info_code: "Y".to_string(),
        claim_control_number: format!("CCN-{id}"),
        patient_control_number: format!("PCN-{id}"),
        claim_amount: "1250.00".to_string(),
        place_of_service_code: "11".to_string(),
        claim_frequency_type_code: "1".to_string(),
        patient_status_code: "01".to_string(),
        admission_date: "2024-03-01".to_string(),
        discharge_date: "2024-03-05".to_string(),
        statement_from_date: "2024-03-01".to_string(),
        statement_to_date: "2024-03-05".to_string(),
        principal_diagnosis_code: "E11.9".to_string(),
        secondary_diagnosis_codes: Vec::new(),
        referring_provider_npi: None,
        attending_provider_npi: None,
        patient: Patient {
            first_name: "JANE".to_string(),
            last_name: "DOE".to_string(),
            gender: "F".to_string(),
            dob: "1980-01-15".to_string(),
            address_line_1: "1 MAIN ST".to_string(),
            city: "LOUISVILLE".to_string(),
            state: "KY".to_string(),
            zip_code: "40202".to_string(),
        },
        provider: Provider {
            npi: "1234567890".to_string(),
            organization_name: Some("MERCY HOSPITAL".to_string()),
            taxonomy_code: "282N00000X".to_string(),
            address_line_1: "2 HOSPITAL WAY".to_string(),
            city: "LEXINGTON".to_string(),
            state: "KY".to_string(),
            zip_code: "40507".to_string(),
            ..Provider::default()
        },
        payer: Payer {
            payer_name: "KYMEDICAID".to_string(),
            payer_id_code: "KYMEDICAID".to_string(),
        },
        subscriber: Subscriber {
            insured_first_name: "JANE".to_string(),
            insured_last_name: "DOE".to_string(),
            insured_id: "SUB123".to_string(),
            relationship_code: "18".to_string(),
            policy_number: None,
            group_number: Some("GRP1".to_string()),
        },
        service_lines: (1..=lines as u32)
            .map(|n| ServiceLine {
                line_number: n,
                revenue_code: "0450".to_string(),
                procedure_code_qualifier: "HC".to_string(),
                procedure_code: "99284".to_string(),
                charge_amount: "625.00".to_string(),
                units: 1,
                service_date: "2024-03-02".to_string(),
            })
            .collect(),
    }
}

fn encode(batch: &[ClaimRecord]) -> Edi837Document {
    let config = SubmissionConfig::default();
    let mut writer = Edi837Writer::with_control_source(&config, SequentialControlNumbers::default());
    writer.encode_batch(batch, 1).expect("non-empty batch")
}

/// SE02 must equal the literal number of segment terminators between the
/// ST and SE segments inclusive.
fn assert_trailer_integrity(document: &Edi837Document) {
    let lines: Vec<&str> = document.content.lines().collect();
    let st = lines
        .iter()
        .position(|l| l.starts_with("ST*"))
        .expect("ST segment");
    let se = lines
        .iter()
        .position(|l| l.starts_with("SE*"))
        .expect("SE segment");
    let terminators: usize = lines[st..=se].iter().map(|l| l.matches('~').count()).sum();
    let declared: usize = lines[se]
        .trim_end_matches('~')
        .split('*')
        .nth(1)
        .expect("SE count element")
        .parse()
        .expect("numeric SE count");
    assert_eq!(declared, terminators);
    assert_eq!(document.segment_count, declared);
}

#[test]
fn envelope_opens_and_closes_with_matching_control_numbers() {
    let document = encode(&[test_claim("CLM001", 1)]);
    let lines: Vec<&str> = document.content.lines().collect();
    assert!(lines[0].starts_with("ISA*00*"));
    assert!(lines[1].starts_with("GS*HC*KYSUBMITTER*KYMEDICAID*"));
    assert_eq!(lines[2], "ST*837*0001*005010X223A2~");
    assert!(lines.last().expect("last line").starts_with("IEA*1*000000001"));
    assert!(document.content.contains("SE*"));
    assert!(document.content.contains("GE*1*000000001~"));
    assert!(document.content.contains("IEA*1*000000001~"));
}

#[test]
fn trailer_count_is_exact() {
    let document = encode(&[test_claim("CLM001", 2), test_claim("CLM002", 0)]);
    assert_trailer_integrity(&document);
}

#[test]
fn hierarchical_ids_are_unique_and_linked() {
    let batch = vec![
        test_claim("CLM001", 1),
        test_claim("CLM002", 1),
        test_claim("CLM003", 1),
    ];
    let document = encode(&batch);

    let mut seen_ids = Vec::new();
    let mut provider_ids = Vec::new();
    for line in document.content.lines() {
        if !line.starts_with("HL*") {
            continue;
        }
        let elements: Vec<&str> = line.trim_end_matches('~').split('*').collect();
        let id: u32 = elements[1].parse().expect("HL id");
        assert!(!seen_ids.contains(&id), "duplicate HL id {id}");
        if let Some(last) = seen_ids.last() {
            assert!(id > *last, "HL ids must be strictly increasing");
        }
        seen_ids.push(id);
        match elements[3] {
            "20" => {
                assert!(elements[2].is_empty(), "provider level has no parent");
                provider_ids.push(id);
            }
            "22" => {
                let parent: u32 = elements[2].parse().expect("subscriber parent id");
                assert!(
                    provider_ids.contains(&parent),
                    "subscriber parent {parent} must be an earlier provider level"
                );
            }
            other => panic!("unexpected HL level code {other}"),
        }
    }
    // One provider and one subscriber level per claim.
    assert_eq!(seen_ids.len(), batch.len() * 2);
}

#[test]
fn secondary_diagnoses_truncate_at_eight_in_order() {
    let mut claim = test_claim("CLM001", 0);
    claim.secondary_diagnosis_codes = (1..=10).map(|n| format!("D{n:02}")).collect();
    let document = encode(&[claim]);
    let hi = document
        .content
        .lines()
        .find(|l| l.starts_with("HI*"))
        .expect("HI segment");
    assert!(hi.starts_with("HI*ABK:E11.9"));
    let secondary: Vec<&str> = hi
        .trim_end_matches('~')
        .split('*')
        .filter(|e| e.starts_with("ABF:"))
        .collect();
    assert_eq!(
        secondary,
        vec![
            "ABF:D01", "ABF:D02", "ABF:D03", "ABF:D04", "ABF:D05", "ABF:D06", "ABF:D07", "ABF:D08",
        ]
    );
}

#[test]
fn empty_admission_date_is_an_empty_element_not_an_error() {
    let mut claim = test_claim("CLM001", 0);
    claim.admission_date = String::new();
    let document = encode(&[claim]);
    assert!(document.content.contains("DTP*435*D8*~"));
}

#[test]
fn unparseable_dates_pass_through_unmodified() {
    let mut claim = test_claim("CLM001", 0);
    claim.discharge_date = "03/05/2024".to_string();
    let document = encode(&[claim]);
    assert!(document.content.contains("DTP*096*D8*03/05/2024~"));
}

#[test]
fn person_provider_uses_last_and_first_name_variant() {
    let mut claim = test_claim("CLM001", 0);
    claim.provider.organization_name = None;
    claim.provider.last_name = "SMITH".to_string();
    claim.provider.first_name = "ALICE".to_string();
    let document = encode(&[claim]);
    assert!(
        document
            .content
            .contains("NM1*85*1*SMITH*ALICE*****XX*1234567890~")
    );
}

#[test]
fn conditional_provider_segments_follow_the_npis() {
    let mut claim = test_claim("CLM001", 0);
    claim.referring_provider_npi = Some("9998887776".to_string());
    claim.attending_provider_npi = Some("5554443332".to_string());
    let document = encode(&[claim]);
    assert!(
        document
            .content
            .contains("NM1*DN*1*REFERRING*PROVIDER****XX*9998887776~")
    );
    assert!(
        document
            .content
            .contains("NM1*71*1*ATTENDING*PROVIDER****XX*5554443332~")
    );
    assert!(document.content.contains("PRV*AT*PXC*282N00000X~"));

    let without = encode(&[test_claim("CLM002", 0)]);
    assert!(!without.content.contains("NM1*DN*"));
    assert!(!without.content.contains("NM1*71*"));
}

#[test]
fn empty_batch_yields_no_document() {
    let config = SubmissionConfig::default();
    let mut writer = Edi837Writer::with_control_source(&config, SequentialControlNumbers::default());
    assert!(writer.encode_batch(&[], 1).is_none());
    assert!(writer.encode_batches(&[Vec::new()]).is_empty());
}

#[test]
fn two_claims_one_batch_produces_one_document() {
    let config = SubmissionConfig::default();
    let mut writer = Edi837Writer::with_control_source(&config, SequentialControlNumbers::default());
    let batches = batch_claims(&[test_claim("A", 0), test_claim("B", 0)], 100);
    let documents = writer.encode_batches(&batches);
    assert_eq!(documents.len(), 1);
    assert_eq!(documents[0].claim_count, 2);
    assert_trailer_integrity(&documents[0]);
}

#[test]
fn documents_land_on_disk_with_dated_names() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = SubmissionConfig::default();
    let mut writer = Edi837Writer::with_control_source(&config, SequentialControlNumbers::default());
    let batches = batch_claims(&[test_claim("A", 1)], 1);
    let documents = writer.encode_batches(&batches);
    let paths = write_documents(dir.path(), &documents).expect("write documents");
    assert_eq!(paths.len(), 1);
    let name = paths[0].file_name().expect("file name").to_string_lossy();
    assert!(name.starts_with("837I_KYMEDICAID_"));
    assert!(name.ends_with("_1.txt"));
    let content = std::fs::read_to_string(&paths[0]).expect("read back");
    assert_eq!(content, documents[0].content);
}

mod properties {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn trailer_integrity_holds_for_any_batch_shape(
            claim_count in 1usize..12,
            batch_size in 1usize..6,
            line_counts in proptest::collection::vec(0usize..4, 1..12),
        ) {
            let claims: Vec<ClaimRecord> = (0..claim_count)
                .map(|i| {
                    let lines = line_counts[i % line_counts.len()];
                    test_claim(&format!("CLM{i:03}"), lines)
                })
                .collect();
            let config = SubmissionConfig::default();
            let mut writer =
                Edi837Writer::with_control_source(&config, SequentialControlNumbers::default());
            let batches = batch_claims(&claims, batch_size);
            let documents = writer.encode_batches(&batches);
            prop_assert_eq!(documents.len(), claims.len().div_ceil(batch_size));
            let encoded_claims: usize = documents.iter().map(|d| d.claim_count).sum();
            prop_assert_eq!(encoded_claims, claims.len());
            for document in &documents {
                assert_trailer_integrity(document);
            }
        }
    }
}
