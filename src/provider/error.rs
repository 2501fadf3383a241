use thiserror::Error;

/// Failures talking to the remote scoring provider.
///
/// These are recovered per candidate: the run counts them and moves on.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("no API key configured (set SCORELY_API_KEY or OPENAI_API_KEY)")]
    MissingApiKey,

    #[error("refusing to send empty {what} text")]
    EmptyInput { what: &'static str },

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("provider returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("provider rejected credentials: {message}")]
    Unauthorized { message: String },

    #[error("provider quota exceeded: {message}")]
    QuotaExceeded { message: String },

    #[error("provider returned no {what}")]
    EmptyResponse { what: &'static str },

    #[error("chat request failed: {0}")]
    Chat(String),
}

impl ProviderError {
    /// Classifies a non-success HTTP response.
    pub fn from_status(status: u16, body: String) -> Self {
        if status == 401 || status == 403 {
            return ProviderError::Unauthorized { message: body };
        }
        if status == 429 || Self::mentions_quota(&body) {
            return ProviderError::QuotaExceeded { message: body };
        }
        ProviderError::Status { status, body }
    }

    /// Classifies a chat client error from its message.
    pub fn from_chat_message(message: String) -> Self {
        let lower = message.to_lowercase();
        if lower.contains("401")
            || lower.contains("unauthorized")
            || lower.contains("invalid api key")
            || lower.contains("incorrect api key")
        {
            ProviderError::Unauthorized { message }
        } else if lower.contains("429") || Self::mentions_quota(&lower) {
            ProviderError::QuotaExceeded { message }
        } else {
            ProviderError::Chat(message)
        }
    }

    /// Auth and quota problems will repeat for every remaining candidate.
    pub fn is_account_problem(&self) -> bool {
        matches!(
            self,
            ProviderError::MissingApiKey
                | ProviderError::Unauthorized { .. }
                | ProviderError::QuotaExceeded { .. }
        )
    }

    fn mentions_quota(text: &str) -> bool {
        let lower = text.to_lowercase();
        lower.contains("insufficient_quota") || lower.contains("quota") || lower.contains("billing")
    }
}
