//! Secrets configuration loaded from environment variables only.
//!
//! This module handles sensitive configuration like API keys that should
//! never be stored in files. All secrets are read from environment variables.

use std::env;

/// Secrets loaded exclusively from environment variables.
///
/// These are sensitive values that should never be written to disk
/// or committed to version control.
#[derive(Debug, Clone, Default)]
pub struct Secrets {
    /// OpenRouter API key (env: OPENROUTER_API_KEY)
    pub openrouter_api_key: Option<String>,
}

/// Errors that can occur when loading secrets
#[derive(Debug, thiserror::Error)]
pub enum SecretsError {
    #[error("No OpenRouter API key configured. Set OPENROUTER_API_KEY")]
    MissingOpenRouterKey,
}

impl Secrets {
    /// Load secrets from environment variables.
    ///
    /// This function also loads .env file if present (for development),
    /// but production should rely on actual environment variables.
    pub fn from_env() -> Result<Self, SecretsError> {
        // Load .env file if present (development convenience)
        let _ = dotenvy::dotenv();

        Self::from_env_inner()
    }

    /// Internal method to load from environment without loading .env
    pub(crate) fn from_env_inner() -> Result<Self, SecretsError> {
        let secrets = Self {
            // An empty or whitespace-only value counts as unset
            openrouter_api_key: env::var("OPENROUTER_API_KEY")
                .ok()
                .filter(|key| !key.trim().is_empty()),
        };

        if secrets.openrouter_api_key.is_none() {
            return Err(SecretsError::MissingOpenRouterKey);
        }

        Ok(secrets)
    }

    /// Get the OpenRouter API key (if configured).
    pub fn openrouter_api_key(&self) -> Option<&str> {
        self.openrouter_api_key.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Use a mutex to ensure tests that modify environment variables don't run concurrently
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    fn clear_env() {
        unsafe {
            env::remove_var("OPENROUTER_API_KEY");
        }
    }

    #[test]
    fn test_secrets_from_env() {
        let _lock = ENV_MUTEX.lock().unwrap();
        clear_env();
        unsafe {
            env::set_var("OPENROUTER_API_KEY", "sk-or-test");
        }

        let secrets = Secrets::from_env().unwrap();
        assert_eq!(secrets.openrouter_api_key, Some("sk-or-test".to_string()));
        assert_eq!(secrets.openrouter_api_key(), Some("sk-or-test"));
    }

    #[test]
    fn test_missing_key_error() {
        let _lock = ENV_MUTEX.lock().unwrap();
        clear_env();

        let result = Secrets::from_env_inner();
        assert!(result.is_err());
        assert!(matches!(
            result.unwrap_err(),
            SecretsError::MissingOpenRouterKey
        ));
    }

    #[test]
    fn test_empty_key_counts_as_missing() {
        let _lock = ENV_MUTEX.lock().unwrap();
        clear_env();
        unsafe {
            env::set_var("OPENROUTER_API_KEY", "");
        }

        let result = Secrets::from_env_inner();
        assert!(matches!(
            result.unwrap_err(),
            SecretsError::MissingOpenRouterKey
        ));
    }

    #[test]
    fn test_whitespace_key_counts_as_missing() {
        let _lock = ENV_MUTEX.lock().unwrap();
        clear_env();
        unsafe {
            env::set_var("OPENROUTER_API_KEY", "   ");
        }

        let result = Secrets::from_env_inner();
        assert!(matches!(
            result.unwrap_err(),
            SecretsError::MissingOpenRouterKey
        ));
    }
}
