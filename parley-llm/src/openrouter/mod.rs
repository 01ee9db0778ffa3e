//! OpenRouter API integration with OpenAI-compatible format.

pub mod client;

pub use client::{DEFAULT_BASE_URL, DEFAULT_MODEL, FALLBACK_REPLY, OpenRouterClient};
