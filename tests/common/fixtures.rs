//! A small recruiting export and the pipeline configuration that screens it.

use std::sync::Arc;

use scorely::candidate::{CandidateStore, RawColumns};
use scorely::config::{Config, PipelineConfig};
use scorely::filter::{FilterOutcome, RejectionFilter, RuleSet};
use scorely::provider::MockScoringProvider;
use scorely::ranking::RankingOrchestrator;

pub const IDEAL_PROFILE: &str = "Staff distributed systems engineer";

pub const ROWS_JSON: &str = r#"[
    {"First Name": "Dana", "Last Name": "Levi", "Current Company": "Riskified",
     "Title": "Backend Engineer", "Summary": "Payments platform in Rust"},
    {"First Name": "Avi", "Last Name": "Cohen", "Current Company": "Bank Leumi",
     "Title": "Backend Engineer", "Summary": "Core banking services"},
    {"First Name": "dana", "Last Name": "LEVI", "Current Company": "riskified",
     "Title": "Backend Engineer", "Summary": "Payments platform in Rust"},
    {"First Name": "Noa", "Last Name": "Bar", "Current Company": "Globex",
     "Title": "Consultant", "Summary": "Freelance backend work"},
    {"First Name": "Yossi", "Last Name": "Mizrahi", "Current Company": "Acme",
     "Title": "Staff Engineer", "Summary": "Distributed systems"},
    {"First Name": "Maya", "Last Name": "Katz", "Current Company": "Initech",
     "Title": "Marketing Manager", "Summary": "Brand campaigns"},
    {"First Name": "Omer", "Last Name": "Peretz", "Current Company": "Hooli",
     "Title": "Engineer", "Summary": "Enterprise software at Google"},
    {"First Name": "Tal", "Last Name": "Ben", "Current Company": "Vandelay",
     "Title": "Engineer", "Summary": "Data pipelines", "Years": 7}
]"#;

pub const PIPELINE_JSON: &str = r#"{
    "column_mapping": {
        "first_name": "First Name",
        "last_name": "Last Name",
        "company": "Current Company",
        "title": "Title"
    },
    "rejection": {
        "past_candidates": "Tal Ben",
        "preset_no_go": ["Bank Leumi"],
        "hot_signals": ["Riskified"]
    },
    "red_flags": { "preset": ["job_hopping", "freelance_consultant", "enterprise_only"] },
    "ideal_profiles": ["Staff distributed systems engineer"],
    "job_description": "Senior backend engineer for a payments team",
    "selected_columns": ["Title", "Summary"]
}"#;

pub const DANA_SUMMARY: &str = "Backend Engineer | Payments platform in Rust";
pub const YOSSI_SUMMARY: &str = "Staff Engineer | Distributed systems";
pub const MAYA_SUMMARY: &str = "Marketing Manager | Brand campaigns";
pub const OMER_SUMMARY: &str = "Engineer | Enterprise software at Google";

pub fn rows() -> Vec<RawColumns> {
    serde_json::from_str(ROWS_JSON).expect("fixture rows are valid JSON")
}

pub fn pipeline() -> PipelineConfig {
    let pipeline = PipelineConfig::from_json_str(PIPELINE_JSON).expect("fixture pipeline parses");
    pipeline.validate().expect("fixture pipeline is valid");
    pipeline
}

/// Ingests and filters the fixture rows, applying tags to the store.
pub fn screened() -> (CandidateStore, FilterOutcome) {
    let pipeline = pipeline();
    let mut store = CandidateStore::ingest(rows(), &pipeline.column_mapping).unwrap();
    let rules = RuleSet::from_config(&pipeline).unwrap();
    let outcome = RejectionFilter::new(rules).filter(store.records());
    store.apply_tags(&outcome.tags);
    (store, outcome)
}

/// Mock provider with a pinned similarity for every surviving summary.
pub fn provider() -> MockScoringProvider {
    MockScoringProvider::new()
        .with_similarity(DANA_SUMMARY, 0.72)
        .with_similarity(YOSSI_SUMMARY, 0.90)
        .with_similarity(MAYA_SUMMARY, 0.30)
        .with_similarity(OMER_SUMMARY, 0.75)
        .with_analysis_for(
            OMER_SUMMARY,
            "Summary: enterprise background, little startup exposure.\n\
             Concerns:\n- no payments domain\n- large-company pace\n\
             Score: 65\nExplanation: solid engineer, weaker domain fit",
        )
}

pub fn orchestrator(provider: Arc<MockScoringProvider>) -> RankingOrchestrator {
    RankingOrchestrator::from_config(provider, &Config::default(), &pipeline()).unwrap()
}
