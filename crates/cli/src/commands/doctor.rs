//! Doctor command - validate configuration and show status

use anyhow::Result;
use sentimind_domain::CategoryPalette;
use serde::Serialize;
use std::path::PathBuf;

use crate::args::DoctorArgs;
use crate::commands::build_service;
use crate::config::AppConfig;

#[derive(Debug, Serialize)]
struct DoctorReport {
    config: CheckResult,
    service: CheckResult,
    categories: CheckResult,
    overall: String,
}

#[derive(Debug, Serialize)]
struct CheckResult {
    status: String,
    message: String,
    details: Option<serde_json::Value>,
}

impl CheckResult {
    fn ok(message: impl Into<String>) -> Self {
        Self {
            status: "ok".to_string(),
            message: message.into(),
            details: None,
        }
    }

    fn warn(message: impl Into<String>) -> Self {
        Self {
            status: "warn".to_string(),
            message: message.into(),
            details: None,
        }
    }

    fn error(message: impl Into<String>) -> Self {
        Self {
            status: "error".to_string(),
            message: message.into(),
            details: None,
        }
    }

    fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }

    fn is_ok(&self) -> bool {
        self.status == "ok"
    }

    fn is_error(&self) -> bool {
        self.status == "error"
    }
}

pub async fn execute(args: DoctorArgs, config_path: Option<PathBuf>) -> Result<()> {
    let mut report = DoctorReport {
        config: CheckResult::error("Not checked"),
        service: CheckResult::error("Not checked"),
        categories: CheckResult::error("Not checked"),
        overall: "error".to_string(),
    };

    // Check config
    let config = match AppConfig::load(config_path.as_deref()) {
        Ok(c) => {
            report.config = CheckResult::ok("Configuration loaded successfully");
            Some(c)
        }
        Err(e) => {
            report.config = CheckResult::error(format!("Failed to load config: {}", e));
            None
        }
    };

    if let Some(ref config) = config {
        let (service, categories) = check_service(config).await;
        report.service = service;
        report.categories = categories;
    }

    // Determine overall status
    let checks = [&report.config, &report.service, &report.categories];
    report.overall = if checks.iter().any(|c| c.is_error()) {
        "error".to_string()
    } else if checks.iter().all(|c| c.is_ok()) {
        "ok".to_string()
    } else {
        "warn".to_string()
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }

    if report.overall == "error" {
        std::process::exit(1);
    }

    Ok(())
}

/// Reach the service and compare its categories with the display table
async fn check_service(config: &AppConfig) -> (CheckResult, CheckResult) {
    let service = match build_service(config) {
        Ok(service) => service,
        Err(e) => {
            return (
                CheckResult::error(format!("Invalid backend configuration: {}", e)),
                CheckResult::error("Not checked"),
            );
        }
    };

    let target = match config.api.backend.trim() {
        "rest" => format!("rest ({})", config.api.base_url),
        other => other.to_string(),
    };

    match service.list_categories().await {
        Ok(categories) => {
            let palette = CategoryPalette::standard();
            let unstyled: Vec<&String> = categories
                .iter()
                .filter(|name| !palette.contains(name))
                .collect();

            let categories_check = if categories.is_empty() {
                CheckResult::warn("Service reported no categories")
            } else if unstyled.is_empty() {
                CheckResult::ok(format!("{} categories, all styled", categories.len()))
            } else {
                CheckResult::warn(format!(
                    "{} categories, {} shown with the default style",
                    categories.len(),
                    unstyled.len()
                ))
                .with_details(serde_json::json!({ "unstyled": unstyled }))
            };

            (
                CheckResult::ok(format!("Backend: {}, reachable", target)),
                categories_check,
            )
        }
        Err(e) => (
            CheckResult::error(format!("Backend: {}, unreachable: {}", target, e)),
            CheckResult::error("Not checked"),
        ),
    }
}

fn print_report(report: &DoctorReport) {
    println!("sentimind Doctor Report");
    println!("=======================");
    println!();

    print_check("Config", &report.config);
    print_check("Service", &report.service);
    print_check("Categories", &report.categories);

    println!();
    let symbol = match report.overall.as_str() {
        "ok" => "✓",
        "warn" => "⚠",
        _ => "✗",
    };
    println!("{} Overall: {}", symbol, report.overall.to_uppercase());

    if report.overall != "error" {
        println!();
        println!("Ready! Try: sentimind tui");
    }
}

fn print_check(name: &str, result: &CheckResult) {
    let symbol = match result.status.as_str() {
        "ok" => "✓",
        "warn" => "⚠",
        _ => "✗",
    };
    println!("{} {}: {}", symbol, name, result.message);
}
