use std::path::PathBuf;

#[derive(Debug)]
pub struct SubmitResult {
    pub total_claims: usize,
    pub valid_claims: usize,
    pub error_count: usize,
    pub warning_count: usize,
    pub info_count: usize,
    pub output_dir: PathBuf,
    pub validation_log: PathBuf,
    pub diagnostics_json: PathBuf,
    pub documents: Vec<DocumentSummary>,
    pub dry_run: bool,
}

#[derive(Debug)]
pub struct DocumentSummary {
    pub path: PathBuf,
    pub claims: usize,
    pub segments: usize,
}
