pub mod openrouter;
pub mod provider;

pub use openrouter::{DEFAULT_BASE_URL, DEFAULT_MODEL, FALLBACK_REPLY, OpenRouterClient};
pub use provider::{Provider, ProviderError};
