//! Combined cost and risk report

use anyhow::Result;
use colored::Colorize;
use estimator_lib::{FactSnapshot, ReportRequest, Section};

use super::{costs::print_cost_report, risk::print_risk_analysis, Backend};
use crate::output::{print_header, print_json, print_warning, OutputFormat};

/// Generate a report with both sections. A failing section does not fail the command.
pub async fn show_report(
    backend: &Backend,
    snapshot: &FactSnapshot,
    request: &ReportRequest,
    format: OutputFormat,
) -> Result<()> {
    let response = backend.report(snapshot, request).await?;

    if format == OutputFormat::Json {
        return print_json(&response);
    }

    let report = &response.report;
    print_header("Cluster Cost & Risk Report");
    println!(
        "Cluster:                {}",
        report.cluster.as_deref().unwrap_or("unknown").cyan()
    );
    println!(
        "Generated:              {}",
        response.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
    println!();

    match &report.costs {
        Section::Available { data } => print_cost_report(data),
        Section::Unavailable { reason } => {
            print_warning(&format!("Cost analysis unavailable: {}", reason))
        }
    }
    println!();

    match &report.risk {
        Section::Available { data } => print_risk_analysis(data),
        Section::Unavailable { reason } => {
            print_warning(&format!("Risk analysis unavailable: {}", reason))
        }
    }
    Ok(())
}
