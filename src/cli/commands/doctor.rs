//! Doctor command - verify system requirements and configuration.

use crate::cli::Output;
use crate::config::Settings;
use console::style;

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
            println!("      {}", style(hint).dim());
        }
    }
}

/// Run all environment checks and report.
pub fn run_doctor(settings: &Settings) -> anyhow::Result<()> {
    Output::header("Destek Doctor");
    println!();

    let checks = vec![
        check_knowledge_file(settings),
        check_html_file(settings),
        check_api_key(),
        check_config_file(),
    ];

    for check in &checks {
        check.print();
    }
    println!();

    let errors = checks.iter().filter(|c| c.status == CheckStatus::Error).count();
    if errors == 0 {
        Output::success("All checks passed.");
    } else {
        Output::error(&format!("{} check(s) failed.", errors));
    }

    Ok(())
}

fn check_knowledge_file(settings: &Settings) -> CheckResult {
    let path = settings.knowledge_path();
    if path.is_file() {
        CheckResult::ok("Knowledge file", &format!("found at {}", path.display()))
    } else {
        CheckResult::error(
            "Knowledge file",
            &format!("not found at {}", path.display()),
            "Create the knowledge text file or point knowledge.path at it.",
        )
    }
}

fn check_html_file(settings: &Settings) -> CheckResult {
    let path = settings.html_path();
    if path.is_file() {
        CheckResult::ok("Chat page", &format!("found at {}", path.display()))
    } else {
        CheckResult::error(
            "Chat page",
            &format!("not found at {}", path.display()),
            "Create the HTML page or point knowledge.html_path at it.",
        )
    }
}

fn check_api_key() -> CheckResult {
    match std::env::var("OPENAI_API_KEY") {
        Ok(key) if !key.trim().is_empty() => CheckResult::ok("API key", "OPENAI_API_KEY is set"),
        _ => CheckResult::error(
            "API key",
            "OPENAI_API_KEY is not set",
            "Export OPENAI_API_KEY with your provider credential.",
        ),
    }
}

fn check_config_file() -> CheckResult {
    let path = Settings::default_config_path();
    if path.is_file() {
        CheckResult::ok("Config file", &format!("using {}", path.display()))
    } else {
        CheckResult::warning(
            "Config file",
            "not present, using built-in defaults",
            &format!("Create {} to customize settings.", path.display()),
        )
    }
}
