use super::*;
use crate::config::Config;

fn request(model: &str) -> AnalysisRequest {
    AnalysisRequest {
        summary: "Backend engineer | Acme".to_string(),
        job_description: "Senior Rust engineer".to_string(),
        ideal_texts: vec!["Ideal A".to_string(), "Ideal B".to_string()],
        model: model.to_string(),
    }
}

#[test]
fn test_prompt_numbers_ideal_profiles() {
    let prompt = build_analysis_prompt(&request("gpt-4o"));

    assert!(prompt.starts_with("You are an expert recruiter."));
    assert!(prompt.contains("Job Description:\nSenior Rust engineer\n\n"));
    assert!(prompt.contains("Profile 1: Ideal A\nProfile 2: Ideal B"));
    assert!(prompt.contains("Candidate Profile:\nBackend engineer | Acme"));
    assert!(prompt.contains("- Explanation for the score (0-100)"));
    assert!(prompt.contains("Do NOT copy text from the ideal profiles"));
}

#[test]
fn test_model_cost_table() {
    let usage = TokenUsage::new(1000, 1000);
    assert!((model_cost("gpt-4o", usage) - 0.020).abs() < 1e-9);
    assert!((model_cost("gpt-4-turbo", usage) - 0.040).abs() < 1e-9);
    assert!((model_cost("gpt-3.5-turbo", usage) - 0.002).abs() < 1e-9);
    assert!((model_cost("text-embedding-3-small", TokenUsage::new(1000, 0)) - 0.00002).abs() < 1e-12);
    assert_eq!(model_cost("unknown-model", usage), 0.0);
}

#[test]
fn test_usage_ledger_accumulates_per_model() {
    let ledger = UsageLedger::new();
    ledger.record("gpt-4o", Some(TokenUsage::new(1000, 0)));
    ledger.record("gpt-4o", Some(TokenUsage::new(0, 1000)));
    ledger.record("gpt-3.5-turbo", None);

    let report = ledger.report();
    assert_eq!(report.calls("gpt-4o"), 2);
    assert_eq!(report.calls("gpt-3.5-turbo"), 1);
    assert_eq!(report.calls("missing"), 0);
    assert_eq!(report.models["gpt-4o"].prompt_tokens, 1000);
    assert!((report.total_cost_usd - 0.020).abs() < 1e-9);
}

#[test]
fn test_status_classification() {
    assert!(matches!(
        ProviderError::from_status(401, "bad key".into()),
        ProviderError::Unauthorized { .. }
    ));
    assert!(matches!(
        ProviderError::from_status(429, "slow down".into()),
        ProviderError::QuotaExceeded { .. }
    ));
    assert!(matches!(
        ProviderError::from_status(400, r#"{"error":{"code":"insufficient_quota"}}"#.into()),
        ProviderError::QuotaExceeded { .. }
    ));
    assert!(matches!(
        ProviderError::from_status(500, "boom".into()),
        ProviderError::Status { status: 500, .. }
    ));
}

#[test]
fn test_chat_message_classification() {
    let err = ProviderError::from_chat_message("Incorrect API key provided".into());
    assert!(err.is_account_problem());
    let err = ProviderError::from_chat_message("You exceeded your current quota".into());
    assert!(matches!(err, ProviderError::QuotaExceeded { .. }));
    let err = ProviderError::from_chat_message("connection reset".into());
    assert!(matches!(err, ProviderError::Chat(_)));
    assert!(!err.is_account_problem());
}

#[tokio::test]
async fn test_openai_embed_requires_api_key() {
    let config = Config {
        api_key: None,
        ..Config::default()
    };
    let provider = OpenAiProvider::new(&config).unwrap();

    let err = provider.embed("some text").await.unwrap_err();
    assert!(matches!(err, ProviderError::MissingApiKey));

    let err = provider.embed("   ").await.unwrap_err();
    assert!(matches!(err, ProviderError::EmptyInput { .. }));
}

#[tokio::test]
async fn test_mock_provider_embeddings() {
    let mock = MockScoringProvider::new()
        .with_similarity("close", 0.9)
        .failing_embed_for("broken");

    let close = mock.embed("close").await.unwrap();
    assert_eq!(close.values.len(), 2);
    assert!((close.values[0] - 0.9).abs() < 1e-6);

    let fallback = mock.embed("anything").await.unwrap();
    assert_eq!(fallback.values, MockScoringProvider::IDEAL.to_vec());

    assert!(mock.embed("broken").await.is_err());
    assert_eq!(mock.embed_calls(), 3);
}

#[tokio::test]
async fn test_mock_provider_analysis() {
    let mock = MockScoringProvider::new()
        .with_analysis("Score: 72")
        .with_analysis_for("special", "Score: 91");

    let analysis = mock.score_with_context(&request("gpt-4o")).await.unwrap();
    assert_eq!(analysis.text, "Score: 72");
    assert_eq!(analysis.model, "gpt-4o");

    let mut special = request("gpt-3.5-turbo");
    special.summary = "special".to_string();
    assert_eq!(mock.score_with_context(&special).await.unwrap().text, "Score: 91");

    mock.set_fail_analysis(true);
    assert!(mock.score_with_context(&special).await.is_err());
    assert_eq!(mock.models_used(), vec!["gpt-4o", "gpt-3.5-turbo", "gpt-3.5-turbo"]);
}
