//! Security risk cost command

use anyhow::Result;
use colored::Colorize;
use estimator_lib::{risk::RiskCostAnalysis, FactSnapshot};
use tabled::Tabled;

use super::Backend;
use crate::output::{
    color_severity, format_compact, format_compact_range, format_currency, format_hours,
    print_header, print_json, print_subheader, print_table, OutputFormat,
};

#[derive(Tabled)]
struct CategoryRow {
    #[tabled(rename = "Category")]
    name: String,
    #[tabled(rename = "Severity")]
    severity: String,
    #[tabled(rename = "Count")]
    count: u32,
    #[tabled(rename = "Exposure")]
    exposure: String,
    #[tabled(rename = "Range")]
    range: String,
}

#[derive(Tabled)]
struct PhaseRow {
    #[tabled(rename = "Phase")]
    name: String,
    #[tabled(rename = "Priority")]
    priority: String,
    #[tabled(rename = "Duration")]
    duration: String,
    #[tabled(rename = "Hours")]
    hours: String,
    #[tabled(rename = "Cost")]
    cost: String,
}

/// Show security risk exposure and the remediation plan
pub async fn show_risk(
    backend: &Backend,
    snapshot: &FactSnapshot,
    industry: &str,
    format: OutputFormat,
) -> Result<()> {
    let analysis = backend.risk(snapshot, industry).await?;

    match format {
        OutputFormat::Json => print_json(&analysis)?,
        OutputFormat::Table => print_risk_analysis(&analysis),
    }
    Ok(())
}

/// Risk analysis as tables
pub fn print_risk_analysis(analysis: &RiskCostAnalysis) {
    print_header("Security Risk Exposure");
    println!("Security score:         {}/100", analysis.security_score);
    println!("Industry profile:       {}", analysis.industry.to_string().cyan());
    println!(
        "Total exposure:         {} ({})",
        format_compact(analysis.total_risk_exposure.best).red().bold(),
        format_compact_range(&analysis.total_risk_exposure)
    );
    println!();

    print_subheader("Risk Categories");
    let rows: Vec<CategoryRow> = analysis
        .risk_categories
        .iter()
        .map(|c| CategoryRow {
            name: c.name.clone(),
            severity: color_severity(c.severity),
            count: c.count,
            exposure: format_compact(c.risk_exposure.best),
            range: format_compact_range(&c.risk_exposure),
        })
        .collect();
    print_table(rows, "No costed security findings");

    for category in &analysis.risk_categories {
        println!();
        println!("{} {}", "▶".cyan(), category.name.bold());
        println!("  {}", category.description);
        for incident in &category.typical_incidents {
            println!("  - {}", incident);
        }
        for example in &category.industry_examples {
            println!("  {}", example.dimmed());
        }
    }
    println!();

    let plan = &analysis.remediation_plan;
    print_subheader("Remediation Plan");
    println!(
        "Effort:                 {} ({} critical, {} high, {} medium)",
        format_hours(plan.total_hours),
        format_hours(plan.critical_hours),
        format_hours(plan.high_hours),
        format_hours(plan.medium_hours)
    );
    println!("Timeline:               {}", plan.timeline);
    println!("Estimated cost:         {}", format_currency(plan.estimated_cost));
    println!("Risk reduction:         {}", format_compact(plan.risk_reduction));
    println!("ROI:                    {}", format!("{:.1}x", plan.roi).green().bold());
    println!("Payback:                {:.2} months", plan.payback_months);
    println!();

    let rows: Vec<PhaseRow> = plan
        .phases
        .iter()
        .map(|p| PhaseRow {
            name: p.name.clone(),
            priority: p.priority.clone(),
            duration: p.duration.clone(),
            hours: format_hours(p.hours),
            cost: format_currency(p.cost),
        })
        .collect();
    print_table(rows, "No remediation phases");
    println!();

    print_subheader("Recommendations");
    for (i, rec) in analysis.priority_recommendations.iter().enumerate() {
        println!("  {}. {}", i + 1, rec);
    }
}
