use super::*;
use crate::config::ConfigError;
use crate::filter::HotSignal;
use crate::provider::{MockScoringProvider, UsageLedger};

fn input(similarity: f32, hot_signal: HotSignal) -> RouteInput<'static> {
    RouteInput {
        summary: "Backend engineer | Acme",
        similarity,
        hot_signal,
        job_description: "Senior backend engineer",
        ideal_texts: &[],
    }
}

fn scored(outcome: RouteOutcome) -> ScoredCandidate {
    match outcome {
        RouteOutcome::Scored(s) => s,
        other => panic!("expected a scored candidate, got {other:?}"),
    }
}

#[test]
fn test_thresholds_validate() {
    assert!(Thresholds::default().validate().is_ok());
    assert!(Thresholds::new(0.5, 0.5).is_ok());

    let err = Thresholds::new(1.2, 0.6).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidThreshold { name: "top", .. }));

    let err = Thresholds::new(0.5, 0.7).unwrap_err();
    assert!(matches!(err, ConfigError::ThresholdOrder { .. }));
}

#[test]
fn test_classify_boundaries() {
    let t = Thresholds::default();
    let cat = |score| classify(score, HotSignal::None, &t).category;

    assert_eq!(cat(100), Some(Category::Top));
    assert_eq!(cat(85), Some(Category::Top));
    assert_eq!(cat(84), Some(Category::Good));
    assert_eq!(cat(70), Some(Category::Good));
    assert_eq!(cat(69), Some(Category::Hidden));
    assert_eq!(cat(50), Some(Category::Hidden));
    assert_eq!(cat(49), None);
}

#[test]
fn test_hot_override() {
    let t = Thresholds::default();

    let c = classify(70, HotSignal::Listed, &t);
    assert_eq!(c.category, Some(Category::Hot));
    assert!(c.confirmed_hot);

    let c = classify(95, HotSignal::Partial, &t);
    assert_eq!(c.category, Some(Category::Hot));
    assert!(!c.confirmed_hot);

    let c = classify(69, HotSignal::Listed, &t);
    assert_eq!(c.category, Some(Category::Hidden));
    assert!(!c.confirmed_hot);
}

#[test]
fn test_extract_score_last_match_wins() {
    assert_eq!(extract_score("Score: 65 ... final score = 82"), Some(82));
    assert_eq!(extract_score("Final SCORE - 77"), Some(77));
    assert_eq!(extract_score("Score (0-100): 77"), None);
    assert_eq!(extract_score("Score: 250"), Some(100));
    assert_eq!(extract_score("Score: 00"), None);
    assert_eq!(extract_score("Score: 7"), None);
    assert_eq!(extract_score("no number here"), None);
}

#[test]
fn test_analysis_sections() {
    let text = "Summary: good fit.\n\n**Main Concerns:**\n- No Kubernetes\n- Short tenure\n\n**Explanation for the score:** Strong backend work. Score: 78";
    let sections = AnalysisSections::parse(text);
    assert_eq!(sections.concerns, vec!["No Kubernetes", "Short tenure"]);
    assert_eq!(sections.explanation, "Strong backend work. Score: 78");

    let plain = AnalysisSections::parse("Just a fit summary.");
    assert!(plain.concerns.is_empty());
    assert_eq!(plain.explanation, "Just a fit summary.");
}

#[test]
fn test_plan_paths() {
    let router = ScoringRouter::new(ScoringPolicy::new(Thresholds::default(), true));
    assert_eq!(router.plan(0.90), RoutePlan::Direct);
    assert_eq!(router.plan(0.85), RoutePlan::Direct);
    assert_eq!(router.plan(0.84), RoutePlan::Hybrid(ModelTier::Full));
    assert_eq!(router.plan(0.65), RoutePlan::Hybrid(ModelTier::Economy));
    assert_eq!(router.plan(0.60), RoutePlan::Hybrid(ModelTier::Economy));
    assert_eq!(router.plan(0.40), RoutePlan::Skip);
}

#[test]
fn test_fallback_score() {
    assert_eq!(ScoringRouter::fallback_score(0.65), 75);
    assert_eq!(ScoringRouter::fallback_score(0.95), 100);
}

#[tokio::test]
async fn test_fast_path_makes_no_call() {
    let provider = MockScoringProvider::new();
    let ledger = UsageLedger::new();
    let router = ScoringRouter::default();

    let result = scored(
        router
            .route(&provider, &ledger, input(0.90, HotSignal::None))
            .await
            .unwrap(),
    );

    assert_eq!(result.score, 90);
    assert_eq!(result.path, ScoringPath::Similarity);
    assert_eq!(result.classification.category, Some(Category::Top));
    assert_eq!(provider.analysis_calls(), 0);
    assert!(ledger.report().models.is_empty());
}

#[tokio::test]
async fn test_economy_routing_uses_cheaper_model() {
    let provider = MockScoringProvider::new().with_analysis("Score: 72");
    let ledger = UsageLedger::new();
    let router = ScoringRouter::new(ScoringPolicy::new(Thresholds::default(), true));

    let result = scored(
        router
            .route(&provider, &ledger, input(0.65, HotSignal::None))
            .await
            .unwrap(),
    );

    assert_eq!(provider.models_used(), vec!["gpt-3.5-turbo"]);
    assert_eq!(result.model.as_deref(), Some("gpt-3.5-turbo"));
    assert_eq!(result.ai_score, Some(72));
    assert_eq!(result.score, 72);
    assert_eq!(result.classification.category, Some(Category::Good));
    assert_eq!(ledger.report().calls("gpt-3.5-turbo"), 1);
}

#[tokio::test]
async fn test_full_model_without_economy_mode() {
    let provider = MockScoringProvider::new();
    let ledger = UsageLedger::new();
    let router = ScoringRouter::default();

    router
        .route(&provider, &ledger, input(0.65, HotSignal::None))
        .await
        .unwrap();
    assert_eq!(provider.models_used(), vec!["gpt-4o"]);
}

#[tokio::test]
async fn test_low_similarity_is_skipped() {
    let provider = MockScoringProvider::new();
    let ledger = UsageLedger::new();
    let router = ScoringRouter::default();

    let outcome = router
        .route(&provider, &ledger, input(0.40, HotSignal::Listed))
        .await
        .unwrap();

    assert_eq!(outcome, RouteOutcome::Skipped { similarity: 0.40 });
    assert_eq!(provider.analysis_calls(), 0);
}

#[tokio::test]
async fn test_similarity_just_under_borderline_is_skipped() {
    let provider = MockScoringProvider::new();
    let ledger = UsageLedger::new();
    let router = ScoringRouter::default();

    // Rounds to 0.600 but stays under the borderline.
    let outcome = router
        .route(&provider, &ledger, input(0.5996, HotSignal::None))
        .await
        .unwrap();

    assert_eq!(outcome, RouteOutcome::Skipped { similarity: 0.6 });
    assert_eq!(provider.analysis_calls(), 0);
}

#[tokio::test]
async fn test_similarity_just_under_top_takes_hybrid_path() {
    let provider = MockScoringProvider::new().with_analysis("Score: 72");
    let ledger = UsageLedger::new();
    let router = ScoringRouter::default();

    let result = scored(
        router
            .route(&provider, &ledger, input(0.8496, HotSignal::None))
            .await
            .unwrap(),
    );

    assert_eq!(result.path, ScoringPath::Hybrid);
    assert_eq!(result.score, 72);
    assert_eq!(result.similarity, 0.85);
    assert_eq!(provider.analysis_calls(), 1);
}

#[tokio::test]
async fn test_economy_cutoff_compares_unrounded_similarity() {
    let provider = MockScoringProvider::new().with_analysis("Score: 72");
    let ledger = UsageLedger::new();
    let router = ScoringRouter::new(ScoringPolicy::new(Thresholds::default(), true));

    assert_eq!(router.plan(0.7996), RoutePlan::Hybrid(ModelTier::Economy));
    assert_eq!(router.plan(0.80), RoutePlan::Hybrid(ModelTier::Full));

    let result = scored(
        router
            .route(&provider, &ledger, input(0.7996, HotSignal::None))
            .await
            .unwrap(),
    );
    assert_eq!(provider.models_used(), vec!["gpt-3.5-turbo"]);
    assert_eq!(result.similarity, 0.8);
}

#[tokio::test]
async fn test_missing_score_uses_fallback() {
    let provider = MockScoringProvider::new().with_analysis("Looks promising overall.");
    let ledger = UsageLedger::new();
    let router = ScoringRouter::default();

    let result = scored(
        router
            .route(&provider, &ledger, input(0.70, HotSignal::None))
            .await
            .unwrap(),
    );

    assert_eq!(result.ai_score, None);
    assert_eq!(result.score, 80);
    assert_eq!(result.explanation, "Looks promising overall.");
}

#[tokio::test]
async fn test_low_ai_score_is_below_threshold() {
    let provider = MockScoringProvider::new().with_analysis("Weak match. Score: 40");
    let ledger = UsageLedger::new();
    let router = ScoringRouter::default();

    let outcome = router
        .route(&provider, &ledger, input(0.70, HotSignal::None))
        .await
        .unwrap();

    assert_eq!(
        outcome,
        RouteOutcome::BelowThreshold {
            score: 40,
            similarity: 0.70
        }
    );
}

#[tokio::test]
async fn test_hybrid_hot_override() {
    let provider = MockScoringProvider::new().with_analysis("Score: 74");
    let ledger = UsageLedger::new();
    let router = ScoringRouter::default();

    let result = scored(
        router
            .route(&provider, &ledger, input(0.66, HotSignal::Listed))
            .await
            .unwrap(),
    );
    assert_eq!(result.classification.category, Some(Category::Hot));
    assert!(result.classification.confirmed_hot);
}

#[tokio::test]
async fn test_provider_error_propagates() {
    let provider = MockScoringProvider::new().failing_analysis();
    let ledger = UsageLedger::new();
    let router = ScoringRouter::default();

    let err = router
        .route(&provider, &ledger, input(0.70, HotSignal::None))
        .await
        .unwrap_err();
    assert!(err.provider().is_some_and(|e| e.is_account_problem()));

    let err = router
        .route(&provider, &ledger, input(f32::NAN, HotSignal::None))
        .await
        .unwrap_err();
    assert!(matches!(err, ScoringError::InvalidSimilarity { .. }));
}

#[test]
fn test_category_serde() {
    assert_eq!(serde_json::to_string(&Category::Hidden).unwrap(), "\"hidden\"");
    let t: Thresholds = serde_json::from_str(r#"{"top": 0.9}"#).unwrap();
    assert_eq!(t.top, 0.9);
    assert_eq!(t.borderline, 0.60);
}
