//! Gemini-backed critic client.

use async_trait::async_trait;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use log::{debug, warn};
use serde_json::{Value, json};
use url::Url;

use super::types::{EMPTY_RESPONSE_FALLBACK, FeedbackError, JUDGE_PROMPT};
use crate::config::FeedbackConfig;

/// A service that can critique a finished drawing.
///
/// The drawing surface treats this as fire-and-forget: the request is issued
/// after a gesture completes, never blocks further drawing, and is not
/// cancellable; a new drawing simply supersedes interest in a stale answer.
#[async_trait]
pub trait CriticBackend {
    /// Submits PNG bytes and returns the critic's text verbatim.
    async fn critique(&self, png: &[u8]) -> Result<String, FeedbackError>;
}

/// Client for a Gemini-style `generateContent` endpoint.
///
/// The API key is read from the environment on every request, so a key
/// exported after startup is picked up without a restart.
pub struct GeminiCritic {
    endpoint: Url,
    model: String,
    api_key_env: String,
    client: reqwest::Client,
}

impl GeminiCritic {
    pub fn from_config(config: &FeedbackConfig) -> Result<Self, FeedbackError> {
        Ok(Self {
            endpoint: Url::parse(&config.endpoint)?,
            model: config.model.clone(),
            api_key_env: config.api_key_env.clone(),
            client: reqwest::Client::new(),
        })
    }

    fn api_key(&self) -> Result<String, FeedbackError> {
        match std::env::var(&self.api_key_env) {
            Ok(key) if !key.is_empty() => Ok(key),
            _ => Err(FeedbackError::MissingApiKey(self.api_key_env.clone())),
        }
    }

    fn request_url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.endpoint.as_str().trim_end_matches('/'),
            self.model
        )
    }
}

#[async_trait]
impl CriticBackend for GeminiCritic {
    async fn critique(&self, png: &[u8]) -> Result<String, FeedbackError> {
        let api_key = self.api_key()?;

        let body = json!({
            "contents": [{
                "parts": [
                    {
                        "inline_data": {
                            "mime_type": "image/png",
                            "data": STANDARD.encode(png),
                        }
                    },
                    { "text": JUDGE_PROMPT },
                ]
            }]
        });

        debug!(
            "Requesting critique from {} ({} byte image)",
            self.request_url(),
            png.len()
        );

        let response = self
            .client
            .post(self.request_url())
            .header("x-goog-api-key", api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            warn!("Feedback endpoint returned {status}");
            return Err(FeedbackError::Endpoint(status));
        }

        let payload: Value = response.json().await?;
        match extract_text(&payload) {
            Some(text) => Ok(text),
            None => Ok(EMPTY_RESPONSE_FALLBACK.to_string()),
        }
    }
}

/// Concatenated text parts of the first candidate, or `None` when the model
/// returned nothing usable.
fn extract_text(payload: &Value) -> Option<String> {
    let parts = payload
        .get("candidates")?
        .get(0)?
        .get("content")?
        .get("parts")?
        .as_array()?;

    let text: String = parts
        .iter()
        .filter_map(|part| part.get("text").and_then(Value::as_str))
        .collect();

    if text.trim().is_empty() { None } else { Some(text) }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn critic(endpoint: &str) -> GeminiCritic {
        GeminiCritic::from_config(&FeedbackConfig {
            endpoint: endpoint.to_string(),
            model: "gemini-2.5-flash".to_string(),
            api_key_env: "GEMSKETCH_TEST_NO_SUCH_KEY".to_string(),
        })
        .unwrap()
    }

    #[test]
    fn request_url_joins_endpoint_and_model() {
        let critic = critic("https://generativelanguage.googleapis.com/v1beta");
        assert_eq!(
            critic.request_url(),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.5-flash:generateContent"
        );

        // A trailing slash on the endpoint does not double up.
        let critic = critic_with_slash();
        assert_eq!(
            critic.request_url(),
            "https://example.test/v1/models/gemini-2.5-flash:generateContent"
        );
    }

    fn critic_with_slash() -> GeminiCritic {
        critic("https://example.test/v1/")
    }

    #[test]
    fn invalid_endpoint_is_rejected_at_construction() {
        let result = GeminiCritic::from_config(&FeedbackConfig {
            endpoint: "not a url".to_string(),
            ..FeedbackConfig::default()
        });
        assert!(matches!(result, Err(FeedbackError::InvalidEndpoint(_))));
    }

    #[tokio::test]
    async fn missing_api_key_fails_before_any_request() {
        let critic = critic("https://example.test/v1");
        let result = critic.critique(&[1, 2, 3]).await;
        assert!(matches!(result, Err(FeedbackError::MissingApiKey(_))));
    }

    #[test]
    fn extract_text_reads_first_candidate() {
        let payload = json!({
            "candidates": [{
                "content": {
                    "parts": [
                        { "text": "What a hero! " },
                        { "text": "I name him Sparky. 9+/10" }
                    ]
                }
            }]
        });
        assert_eq!(
            extract_text(&payload).as_deref(),
            Some("What a hero! I name him Sparky. 9+/10")
        );
    }

    #[test]
    fn extract_text_treats_blank_answers_as_empty() {
        let payload = json!({
            "candidates": [{ "content": { "parts": [{ "text": "   " }] } }]
        });
        assert_eq!(extract_text(&payload), None);

        let payload = json!({ "candidates": [] });
        assert_eq!(extract_text(&payload), None);

        let payload = json!({});
        assert_eq!(extract_text(&payload), None);
    }
}
