//! Configuration management for parley.
//!
//! All configuration is secrets, and all secrets come from environment
//! variables. There is no configuration file.
//!
//! # Environment Variables
//!
//! - `OPENROUTER_API_KEY` - OpenRouter API key

mod secrets;

pub use secrets::{Secrets, SecretsError};

/// Load .env file if it exists (for development convenience).
///
/// This is called automatically by `Secrets::from_env()` but is also
/// exported for use in other contexts.
pub fn load_dotenv() {
    let _ = dotenvy::dotenv();
}
