//! Cost-related CLI commands

use anyhow::{Context, Result};
use colored::Colorize;
use estimator_lib::{cost::NamespaceCostEstimate, CostReport, FactSnapshot};
use tabled::Tabled;

use super::Backend;
use crate::output::{
    color_level, color_waste, format_currency, format_range, format_share, print_header,
    print_json, print_subheader, print_table, OutputFormat,
};

/// Row for the namespace cost table
#[derive(Tabled)]
struct NamespaceCostRow {
    #[tabled(rename = "Namespace")]
    namespace: String,
    #[tabled(rename = "Share")]
    share: String,
    #[tabled(rename = "Best")]
    best: String,
    #[tabled(rename = "Range")]
    range: String,
    #[tabled(rename = "Confidence")]
    confidence: String,
    #[tabled(rename = "Waste")]
    waste: String,
    #[tabled(rename = "Flags")]
    flags: String,
}

/// Row for the optimization scenario table
#[derive(Tabled)]
struct ScenarioRow {
    #[tabled(rename = "Scenario")]
    name: String,
    #[tabled(rename = "Savings")]
    savings: String,
    #[tabled(rename = "Range")]
    range: String,
    #[tabled(rename = "Effort")]
    effort: String,
    #[tabled(rename = "Risk")]
    risk: String,
    #[tabled(rename = "Timeline")]
    timeline: String,
}

/// Show cost analysis
pub async fn show_costs(
    backend: &Backend,
    snapshot: &FactSnapshot,
    monthly_cost: Option<f64>,
    namespace: Option<String>,
    format: OutputFormat,
) -> Result<()> {
    let monthly_cost = monthly_cost
        .context("Monthly cluster cost is required: pass --monthly-cost or set CCRE_MONTHLY_COST")?;
    let report = backend.costs(snapshot, monthly_cost).await?;

    if let Some(ns) = &namespace {
        let estimate = report
            .estimate
            .namespace(ns)
            .with_context(|| format!("Namespace '{}' not found in estimate", ns))?;
        return match format {
            OutputFormat::Json => print_json(estimate),
            OutputFormat::Table => {
                print_namespace(&report, estimate);
                Ok(())
            }
        };
    }

    match format {
        OutputFormat::Json => print_json(&report)?,
        OutputFormat::Table => print_cost_report(&report),
    }
    Ok(())
}

/// Full cost report as tables
pub fn print_cost_report(report: &CostReport) {
    let estimate = &report.estimate;
    let utilization = &report.utilization;

    print_header("Cost Analysis");
    println!(
        "Monthly cluster cost:   {}",
        format_currency(estimate.total_cluster_cost).cyan()
    );
    println!(
        "CPU requested:          {:.1} / {:.1} cores ({:.1}%)",
        utilization.total_cpu_requested, utilization.total_cpu_cores, utilization.cpu_utilization
    );
    println!(
        "Memory requested:       {:.1} / {:.1} GB ({:.1}%)",
        utilization.total_memory_requested,
        utilization.total_memory_gb,
        utilization.memory_utilization
    );
    println!(
        "Method:                 {} (confidence: {})",
        estimate.method, estimate.confidence
    );
    println!();

    print_subheader("Namespace Costs");
    let rows: Vec<NamespaceCostRow> = estimate
        .namespace_costs
        .iter()
        .map(|ns| {
            let usage = utilization.namespaces.iter().find(|u| u.name() == ns.namespace);
            NamespaceCostRow {
                namespace: ns.namespace.clone(),
                share: format_share(ns.weighted_share),
                best: format_currency(ns.estimated_cost.best),
                range: format_range(&ns.estimated_cost),
                confidence: ns.confidence.to_string(),
                waste: usage.map(|u| color_waste(u.waste_score)).unwrap_or_default(),
                flags: usage.map(|u| u.flags.join(" ")).unwrap_or_default(),
            }
        })
        .collect();
    print_table(rows, "No namespaces in snapshot");
    println!();

    print_subheader("Optimization Scenarios");
    let rows: Vec<ScenarioRow> = estimate
        .optimization_scenarios
        .iter()
        .map(|s| ScenarioRow {
            name: s.name.clone(),
            savings: format_currency(s.savings.best),
            range: format_range(&s.savings),
            effort: color_level(s.effort),
            risk: color_level(s.risk),
            timeline: s.timeline.clone(),
        })
        .collect();
    print_table(rows, "No optimizations above the minimum savings threshold");

    for scenario in &estimate.optimization_scenarios {
        println!();
        println!("{} {}", "▶".cyan(), scenario.name.bold());
        println!("  {}", scenario.description);
        println!("  {}", scenario.impact.dimmed());
        for (i, action) in scenario.actions.iter().enumerate() {
            println!("  {}. {}", i + 1, action);
        }
    }
    println!();

    let savings = &estimate.total_savings_potential;
    let pct = savings.best / estimate.total_cluster_cost * 100.0;
    println!(
        "{} {} ({}, {:.1}% of monthly cost)",
        "Total Savings Potential:".bold(),
        format_currency(savings.best).green().bold(),
        format_range(savings),
        pct
    );
    println!();

    print_subheader("Assumptions");
    for assumption in &estimate.assumptions {
        println!("  • {}", assumption);
    }
    println!();
    print_subheader("Disclaimers");
    for disclaimer in &estimate.disclaimers {
        println!("  • {}", disclaimer.dimmed());
    }
}

fn print_namespace(report: &CostReport, estimate: &NamespaceCostEstimate) {
    print_header(&format!("Cost Analysis: {}", estimate.namespace));
    println!("Best estimate:          {}", format_currency(estimate.estimated_cost.best).cyan());
    println!("Range:                  {}", format_range(&estimate.estimated_cost));
    println!(
        "Share of cluster:       {} (CPU {}, memory {})",
        format_share(estimate.weighted_share),
        format_share(estimate.cpu_share),
        format_share(estimate.memory_share)
    );
    println!(
        "Confidence:             {} ({:.2})",
        estimate.confidence, estimate.confidence_score
    );

    if let Some(usage) = report
        .utilization
        .namespaces
        .iter()
        .find(|u| u.name() == estimate.namespace)
    {
        println!("Waste score:            {}", color_waste(usage.waste_score));
        if !usage.flags.is_empty() {
            println!("Flags:                  {}", usage.flags.join(" "));
        }
    }

    let hints: Vec<_> = report
        .utilization
        .optimizations
        .iter()
        .filter(|o| o.namespace == estimate.namespace)
        .collect();
    if !hints.is_empty() {
        println!();
        print_subheader("Suggestions");
        for hint in hints {
            println!("  [{}] {}", color_level(hint.priority), hint.description);
            println!("      {}", hint.action.dimmed());
        }
    }
}
