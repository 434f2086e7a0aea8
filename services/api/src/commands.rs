use crate::infra::{employee_service, load_request, override_registry_url};
use chrono::{Local, NaiveDate};
use clap::Args;
use employee_registry::config::AppConfig;
use employee_registry::employees::{domain::parse_iso_date, validate_on, ValidationOutcome};
use employee_registry::error::AppError;
use employee_registry::telemetry;
use serde_json::json;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct ValidateArgs {
    /// JSON file holding one registration request
    #[arg(long)]
    pub(crate) request: PathBuf,
    /// Date the job-start rule compares against (YYYY-MM-DD, defaults to today)
    #[arg(long, value_parser = parse_iso_date)]
    pub(crate) today: Option<NaiveDate>,
}

#[derive(Args, Debug)]
pub(crate) struct RegisterArgs {
    /// JSON file holding one registration request
    #[arg(long)]
    pub(crate) request: PathBuf,
    /// Override the configured employee registry base URL
    #[arg(long)]
    pub(crate) registry_url: Option<String>,
}

pub(crate) fn run_validate(args: ValidateArgs) -> Result<(), AppError> {
    let request = load_request(&args.request)?;
    let today = args.today.unwrap_or_else(|| Local::now().date_naive());
    let report = validation_report(&validate_on(&request, today));
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

pub(crate) async fn run_register(args: RegisterArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;
    override_registry_url(&mut config, args.registry_url)?;
    telemetry::init(&config.telemetry, config.environment)?;

    let request = load_request(&args.request)?;
    let service = employee_service(&config.registry)?;
    let registration = tokio::task::spawn_blocking(move || service.register(&request)).await?;

    println!("outcome: {}", registration.outcome.label());
    println!("{}", serde_json::to_string_pretty(&registration.response)?);
    Ok(())
}

fn validation_report(outcome: &ValidationOutcome) -> serde_json::Value {
    match outcome {
        ValidationOutcome::Valid => json!({ "valid": true }),
        ValidationOutcome::Invalid { status, message } => json!({
            "valid": false,
            "status": status,
            "errorMessage": message,
        }),
    }
}
