//! Data types and fixed copy for the AI feedback flow.

use thiserror::Error;

/// The one user-facing message for every failure category. The cause
/// distinction is logged, never surfaced.
pub const RETRY_MESSAGE: &str = "Oops! Something went wrong with the magic. Try again!";

/// Shown when the endpoint answers successfully but with empty text.
pub const EMPTY_RESPONSE_FALLBACK: &str = "I'm lost for words, what a masterpiece!";

/// The fixed judge prompt submitted alongside every drawing.
pub const JUDGE_PROMPT: &str = "\
You are a friendly, enthusiastic judge of a children's mascot-drawing contest. \
Look at this mascot drawing for the \"Digital Diamond\" forum. \
Describe what you see with great excitement, invent a name for the character, \
and give the drawing a score from 1 to 10 (a plus is allowed!). \
Use emoji and keep it short, no more than 3-4 sentences.";

/// Errors that can occur while requesting a critique.
#[derive(Debug, Error)]
pub enum FeedbackError {
    /// The configured API key environment variable is unset or empty.
    #[error("API key environment variable '{0}' is not set")]
    MissingApiKey(String),

    /// The configured endpoint is not a valid URL.
    #[error("invalid feedback endpoint: {0}")]
    InvalidEndpoint(#[from] url::ParseError),

    /// The endpoint answered with a non-success status (quota, auth, …).
    #[error("feedback endpoint returned {0}")]
    Endpoint(reqwest::StatusCode),

    /// The request never completed or the body could not be read.
    #[error("feedback request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

impl FeedbackError {
    /// The retryable message shown to the user for any failure.
    pub fn user_message(&self) -> &'static str {
        RETRY_MESSAGE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_failure_collapses_to_the_same_user_message() {
        let missing = FeedbackError::MissingApiKey("GEMINI_API_KEY".into());
        let endpoint = FeedbackError::Endpoint(reqwest::StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(missing.user_message(), RETRY_MESSAGE);
        assert_eq!(endpoint.user_message(), RETRY_MESSAGE);
    }
}
