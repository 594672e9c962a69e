//! Pre-flight checks before running a query.
//!
//! A missing credential is reported up front instead of after the agent's
//! first model call fails.

use crate::config::Settings;
use crate::error::{ResearchError, Result};

/// Validate that the configured provider has credentials.
pub fn check(settings: &Settings) -> Result<()> {
    if settings.llm.has_api_key() {
        return Ok(());
    }

    let env = settings.llm.provider.api_key_env();
    Err(ResearchError::Config(format!(
        "{} not set. Set it with: export {}='...' or add api_key under [llm] in the config file",
        env, env
    )))
}

/// Validate a research query before it reaches the engine.
pub fn check_query(query: &str) -> Result<&str> {
    let query = query.trim();
    if query.is_empty() {
        return Err(ResearchError::InvalidInput(
            "research query must not be empty".to_string(),
        ));
    }
    Ok(query)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_key_names_env_var() {
        let settings = Settings::default();
        let err = check(&settings).unwrap_err();
        assert!(err.to_string().contains("ANTHROPIC_API_KEY"));
    }

    #[test]
    fn test_key_present() {
        let mut settings = Settings::default();
        settings.llm.api_key = Some("sk-test".to_string());
        assert!(check(&settings).is_ok());
    }

    #[test]
    fn test_check_query() {
        assert_eq!(check_query("  dark matter \n").unwrap(), "dark matter");
        assert!(matches!(check_query("   "), Err(ResearchError::InvalidInput(_))));
    }
}
