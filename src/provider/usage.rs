use std::collections::BTreeMap;

use parking_lot::Mutex;
use serde::Serialize;
use tracing::debug;

use super::types::TokenUsage;

/// Estimated USD cost of a call, from per-1K-token list prices.
///
/// Unknown models cost nothing rather than guessing.
pub fn model_cost(model: &str, usage: TokenUsage) -> f64 {
    let prompt = f64::from(usage.prompt_tokens) / 1000.0;
    let completion = f64::from(usage.completion_tokens) / 1000.0;
    match model {
        "gpt-4o" => prompt * 0.005 + completion * 0.015,
        "gpt-4-turbo" => prompt * 0.01 + completion * 0.03,
        "gpt-3.5-turbo" => prompt * 0.0005 + completion * 0.0015,
        "text-embedding-3-small" => (prompt + completion) * 0.00002,
        _ => 0.0,
    }
}

/// Accumulated usage for one model.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ModelUsage {
    pub calls: u64,
    pub prompt_tokens: u64,
    pub completion_tokens: u64,
    pub cost_usd: f64,
}

/// Point-in-time copy of the ledger.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UsageReport {
    pub models: BTreeMap<String, ModelUsage>,
    pub total_cost_usd: f64,
}

impl UsageReport {
    pub fn calls(&self, model: &str) -> u64 {
        self.models.get(model).map(|u| u.calls).unwrap_or(0)
    }
}

/// Per-model token and cost accounting, shared between the similarity engine
/// and the router.
#[derive(Debug, Default)]
pub struct UsageLedger {
    models: Mutex<BTreeMap<String, ModelUsage>>,
}

impl UsageLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one call. Calls without reported usage still count.
    pub fn record(&self, model: &str, usage: Option<TokenUsage>) -> f64 {
        let usage = usage.unwrap_or_default();
        let cost = model_cost(model, usage);

        let mut models = self.models.lock();
        let entry = models.entry(model.to_string()).or_default();
        entry.calls += 1;
        entry.prompt_tokens += u64::from(usage.prompt_tokens);
        entry.completion_tokens += u64::from(usage.completion_tokens);
        entry.cost_usd += cost;

        debug!(
            model,
            prompt_tokens = usage.prompt_tokens,
            completion_tokens = usage.completion_tokens,
            cost_usd = cost,
            "Provider usage recorded"
        );

        cost
    }

    pub fn report(&self) -> UsageReport {
        let models = self.models.lock().clone();
        let total_cost_usd = models.values().map(|u| u.cost_usd).sum();
        UsageReport {
            models,
            total_cost_usd,
        }
    }
}
