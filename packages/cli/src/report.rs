//! `report`: fill in and submit an incident report.

use std::sync::Arc;

use dialoguer::{Confirm, Input, Select};
use disaster_map_report::{ReportSession, SubmitOutcome, SubmitStatus};
use disaster_map_report_models::DraftField;
use disaster_map_source::{EndpointConfig, HttpFeed};

/// Input format of the timestamp field.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// Prompts for every field and submits the report. A failed submission
/// keeps the entered values as defaults for another try.
///
/// # Errors
///
/// Returns an error if the HTTP client cannot be built or a prompt fails.
pub async fn run(endpoints: EndpointConfig) -> Result<(), Box<dyn std::error::Error>> {
    println!("Report New Incident");
    println!("Submit disaster information to help emergency response teams");
    println!();

    let feed = Arc::new(HttpFeed::new(endpoints)?);
    let session = ReportSession::new(feed);

    loop {
        for field in DraftField::all() {
            let current = session.snapshot().draft().get(*field).to_string();
            let value = prompt(*field, &current)?;
            session.set_field(*field, value);
        }

        let retry = match session.submit().await {
            SubmitOutcome::Submitted | SubmitOutcome::Failed => {
                let status = session.snapshot().status();
                if let Some(message) = status.message() {
                    let icon = if status == SubmitStatus::Success { "✓" } else { "✕" };
                    println!("{icon} {message}");
                }
                status == SubmitStatus::Error
            }
            SubmitOutcome::Invalid(e) => {
                for issue in &e.issues {
                    println!("✕ {issue}");
                }
                true
            }
            SubmitOutcome::Busy => false,
        };

        let question = if retry {
            "Edit and try again?"
        } else {
            "Report another incident?"
        };
        if !Confirm::new()
            .with_prompt(question)
            .default(retry)
            .interact()?
        {
            break;
        }
    }

    Ok(())
}

fn prompt(field: DraftField, current: &str) -> Result<String, dialoguer::Error> {
    let label = format!("{} {}", field.icon(), field.label());

    if let Some(options) = field.options() {
        let labels: Vec<&str> = options.iter().map(|(_, label)| label.as_str()).collect();
        let default = options
            .iter()
            .position(|(value, _)| value == current)
            .unwrap_or(0);
        let idx = Select::new()
            .with_prompt(label)
            .items(&labels)
            .default(default)
            .interact()?;
        return Ok(options[idx].0.clone());
    }

    let default = if current.is_empty() && field == DraftField::Timestamp {
        chrono::Local::now().format(TIMESTAMP_FORMAT).to_string()
    } else {
        current.to_string()
    };

    let mut input = Input::<String>::new().with_prompt(label);
    if default.is_empty() {
        if let Some(placeholder) = field.placeholder() {
            println!("  {placeholder}");
        }
    } else {
        input = input.default(default);
    }
    input.interact_text()
}
