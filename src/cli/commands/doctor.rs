//! Doctor command - verify provider credentials and configuration.

use crate::cli::Output;
use crate::config::Settings;
use console::style;
use std::path::Path;

/// Check result for a single item.
#[derive(Debug)]
pub struct CheckResult {
    pub name: String,
    pub status: CheckStatus,
    pub message: String,
    pub hint: Option<String>,
}

#[derive(Debug, PartialEq)]
pub enum CheckStatus {
    Ok,
    Warning,
    Error,
}

impl CheckResult {
    fn ok(name: &str, message: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Ok,
            message: message.to_string(),
            hint: None,
        }
    }

    fn warning(name: &str, message: &str, hint: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Warning,
            message: message.to_string(),
            hint: Some(hint.to_string()),
        }
    }

    fn error(name: &str, message: &str, hint: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Error,
            message: message.to_string(),
            hint: Some(hint.to_string()),
        }
    }

    fn print(&self) {
        let icon = match self.status {
            CheckStatus::Ok => style("✓").green(),
            CheckStatus::Warning => style("!").yellow(),
            CheckStatus::Error => style("✗").red(),
        };

        println!("  {} {} - {}", icon, style(&self.name).bold(), self.message);

        if let Some(hint) = &self.hint {
            println!("    {} {}", style("→").dim(), style(hint).dim());
        }
    }
}

/// Run all diagnostic checks.
pub fn run_doctor(settings: &Settings, config_path: Option<&str>) -> anyhow::Result<()> {
    Output::header("Research Doctor");
    println!();

    let mut checks = Vec::new();

    println!("{}", style("Model Provider").bold());
    let provider_checks = vec![
        CheckResult::ok("Provider", &settings.llm.provider.to_string()),
        CheckResult::ok("Model", &settings.llm.model),
        CheckResult::ok("API base", &settings.llm.api_base()),
        check_api_key(settings),
    ];
    for check in &provider_checks {
        check.print();
    }
    checks.extend(provider_checks);

    println!();

    println!("{}", style("Tools").bold());
    let tool_checks = check_tools(settings);
    for check in &tool_checks {
        check.print();
    }
    checks.extend(tool_checks);

    println!();

    println!("{}", style("Configuration").bold());
    let config_check = check_config_file(&Settings::config_path(config_path));
    config_check.print();
    checks.push(config_check);

    println!();

    let errors = checks.iter().filter(|c| c.status == CheckStatus::Error).count();
    let warnings = checks.iter().filter(|c| c.status == CheckStatus::Warning).count();

    if errors > 0 {
        Output::error(&format!(
            "{} error(s) found. Please fix them before running research.",
            errors
        ));
        anyhow::bail!("doctor found {} error(s)", errors);
    } else if warnings > 0 {
        Output::warning(&format!("All checks passed with {} warning(s).", warnings));
    } else {
        Output::success("All checks passed! Ready to research.");
    }

    Ok(())
}

/// Check that the provider's API key was resolved at startup.
fn check_api_key(settings: &Settings) -> CheckResult {
    let env = settings.llm.provider.api_key_env();
    match settings.llm.api_key.as_deref() {
        Some(key) if key.len() > 12 => CheckResult::ok(env, &format!("configured ({})", mask_key(key))),
        Some(key) if !key.is_empty() => CheckResult::warning(
            env,
            "set but looks unusually short",
            "Double-check the key in your environment or config file",
        ),
        _ if settings.llm.api_base.is_some() => CheckResult::warning(
            env,
            "not set",
            "Fine for local OpenAI-compatible servers that need no key",
        ),
        _ => CheckResult::error(env, "not set", &format!("Set with: export {}='...'", env)),
    }
}

fn check_tools(settings: &Settings) -> Vec<CheckResult> {
    let tools = &settings.tools;
    let mut results = Vec::new();

    let toggles = [
        ("search", tools.enable_search, tools.search_endpoint.clone()),
        ("wikipedia", tools.enable_wikipedia, tools.wikipedia_endpoint.clone()),
        (
            "save_text_to_file",
            tools.enable_save,
            settings.save_path().display().to_string(),
        ),
    ];

    for (name, enabled, target) in toggles {
        if enabled {
            results.push(CheckResult::ok(name, &target));
        } else {
            results.push(CheckResult::warning(
                name,
                "disabled",
                "Enable it under [tools] in the config file",
            ));
        }
    }

    results
}

/// Check if the config file in use exists.
fn check_config_file(config_path: &Path) -> CheckResult {
    if config_path.exists() {
        CheckResult::ok("Config file", &format!("{}", config_path.display()))
    } else {
        CheckResult::warning(
            "Config file",
            "using defaults",
            "Create with: research config init",
        )
    }
}

/// Keep the first and last four characters of a key.
fn mask_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() <= 8 {
        return "****".to_string();
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}...{}", head, tail)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_result_error() {
        let result = CheckResult::error("test", "failed", "fix it");
        assert_eq!(result.status, CheckStatus::Error);
        assert_eq!(result.hint, Some("fix it".to_string()));
    }

    #[test]
    fn test_mask_key() {
        assert_eq!(mask_key("sk-ant-0123456789abcd"), "sk-a...abcd");
        assert_eq!(mask_key("short"), "****");
    }

    #[test]
    fn test_missing_key_is_error() {
        let settings = Settings::default();
        assert_eq!(check_api_key(&settings).status, CheckStatus::Error);
    }

    #[test]
    fn test_missing_key_with_local_base_is_warning() {
        let mut settings = Settings::default();
        settings.llm.api_base = Some("http://localhost:11434/v1".to_string());
        assert_eq!(check_api_key(&settings).status, CheckStatus::Warning);
    }

    #[test]
    fn test_disabled_tool_warns() {
        let mut settings = Settings::default();
        settings.tools.enable_save = false;
        let checks = check_tools(&settings);
        assert_eq!(checks[2].status, CheckStatus::Warning);
        assert_eq!(checks[0].status, CheckStatus::Ok);
    }

    #[test]
    fn test_config_file_check_uses_given_path() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let check = check_config_file(file.path());
        assert_eq!(check.status, CheckStatus::Ok);
        assert_eq!(check.message, file.path().display().to_string());

        let missing = file.path().with_extension("missing.toml");
        assert_eq!(check_config_file(&missing).status, CheckStatus::Warning);
    }
}
