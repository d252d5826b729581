//! AI feedback ("ask the crystal") client.
//!
//! Sends a finished drawing to a generative-AI endpoint with a fixed judge
//! prompt and returns the critique text. All failures collapse to one
//! retryable user-facing message.

pub mod gemini;
pub mod types;

pub use gemini::{CriticBackend, GeminiCritic};
pub use types::{EMPTY_RESPONSE_FALLBACK, FeedbackError, JUDGE_PROMPT, RETRY_MESSAGE};
