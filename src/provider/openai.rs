//! OpenAI-compatible provider: embeddings over plain `reqwest`, analysis via `genai`.

use async_trait::async_trait;
use genai::Client as ChatClient;
use genai::chat::{ChatMessage, ChatOptions, ChatRequest};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::ScoringProvider;
use super::error::ProviderError;
use super::prompt::build_analysis_prompt;
use super::types::{Analysis, AnalysisRequest, Embedding, TokenUsage};
use crate::config::Config;
use crate::constants::{ANALYSIS_MAX_TOKENS, ANALYSIS_TEMPERATURE};

#[derive(Debug, Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    input: &'a str,
}

#[derive(Debug, Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingData>,
    #[serde(default)]
    usage: Option<EmbeddingUsage>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingData {
    embedding: Vec<f32>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingUsage {
    #[serde(default)]
    prompt_tokens: u32,
}

/// Remote provider speaking the OpenAI HTTP API.
///
/// The chat client resolves its own credentials from `OPENAI_API_KEY`.
pub struct OpenAiProvider {
    http: reqwest::Client,
    chat: ChatClient,
    embeddings_url: String,
    embedding_model: String,
    api_key: Option<String>,
}

impl std::fmt::Debug for OpenAiProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiProvider")
            .field("embeddings_url", &self.embeddings_url)
            .field("embedding_model", &self.embedding_model)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl OpenAiProvider {
    pub fn new(config: &Config) -> Result<Self, ProviderError> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;

        Ok(Self {
            http,
            chat: ChatClient::default(),
            embeddings_url: config.embeddings_url(),
            embedding_model: config.embedding_model.clone(),
            api_key: config.api_key.clone(),
        })
    }

    fn headers(&self) -> Result<HeaderMap, ProviderError> {
        let key = self.api_key.as_deref().ok_or(ProviderError::MissingApiKey)?;
        let mut headers = HeaderMap::new();
        let bearer = HeaderValue::from_str(&format!("Bearer {key}"))
            .map_err(|_| ProviderError::MissingApiKey)?;
        headers.insert(AUTHORIZATION, bearer);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        Ok(headers)
    }
}

#[async_trait]
impl ScoringProvider for OpenAiProvider {
    fn embedding_model(&self) -> &str {
        &self.embedding_model
    }

    async fn embed(&self, text: &str) -> Result<Embedding, ProviderError> {
        if text.trim().is_empty() {
            return Err(ProviderError::EmptyInput { what: "embedding" });
        }

        debug!(
            model = %self.embedding_model,
            text_len = text.len(),
            "Embedding request"
        );

        let request = EmbeddingRequest {
            model: &self.embedding_model,
            input: text,
        };

        let response = self
            .http
            .post(&self.embeddings_url)
            .headers(self.headers()?)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::from_status(status, body));
        }

        let body: EmbeddingResponse = response.json().await?;
        let usage = body.usage.map(|u| TokenUsage::new(u.prompt_tokens, 0));

        body.data
            .into_iter()
            .next()
            .map(|d| Embedding {
                values: d.embedding,
                usage,
            })
            .filter(|e| !e.values.is_empty())
            .ok_or(ProviderError::EmptyResponse { what: "embedding" })
    }

    async fn score_with_context(
        &self,
        request: &AnalysisRequest,
    ) -> Result<Analysis, ProviderError> {
        if request.summary.trim().is_empty() {
            return Err(ProviderError::EmptyInput { what: "profile summary" });
        }

        let prompt = build_analysis_prompt(request);
        debug!(
            model = %request.model,
            prompt_len = prompt.len(),
            "Analysis request"
        );

        let chat_req = ChatRequest::new(vec![ChatMessage::user(prompt)]);
        let options = ChatOptions::default()
            .with_temperature(ANALYSIS_TEMPERATURE)
            .with_max_tokens(ANALYSIS_MAX_TOKENS);

        let resp = self
            .chat
            .exec_chat(&request.model, chat_req, Some(&options))
            .await
            .map_err(|e| ProviderError::from_chat_message(e.to_string()))?;

        let usage = TokenUsage::new(
            token_count(resp.usage.prompt_tokens),
            token_count(resp.usage.completion_tokens),
        );

        let text = resp
            .first_text()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or(ProviderError::EmptyResponse { what: "analysis" })?
            .to_string();

        Ok(Analysis {
            text,
            model: request.model.clone(),
            usage: Some(usage),
        })
    }
}

fn token_count(value: Option<i32>) -> u32 {
    value.and_then(|v| u32::try_from(v).ok()).unwrap_or(0)
}
