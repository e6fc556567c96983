//! Cluster Cost & Risk Estimator CLI
//!
//! Estimates namespace costs, optimization savings and security risk
//! exposure from a fact snapshot, either in-process or through a running
//! estimator service.

mod client;
mod commands;
mod config;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{costs, load_snapshot, profiles, report, risk, Backend};
use estimator_lib::ReportRequest;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Cluster Cost & Risk Estimator CLI
#[derive(Parser)]
#[command(name = "ccre")]
#[command(author, version, about = "Cluster Cost & Risk Estimator", long_about = None)]
pub struct Cli {
    /// Estimator service URL. Estimates are computed locally when unset.
    #[arg(long, env = "CCRE_API_URL")]
    pub api_url: Option<String>,

    /// Output format
    #[arg(long, short, default_value = "table")]
    pub format: output::OutputFormat,

    /// Enable verbose output
    #[arg(long, short)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Namespace costs and optimization scenarios
    Costs {
        /// Fact snapshot file (JSON)
        #[arg(long)]
        facts: PathBuf,

        /// Monthly cluster cost in USD
        #[arg(long, env = "CCRE_MONTHLY_COST")]
        monthly_cost: Option<f64>,

        /// Show a single namespace
        #[arg(long, short)]
        namespace: Option<String>,
    },

    /// Security risk exposure and remediation plan
    Risk {
        /// Fact snapshot file (JSON)
        #[arg(long)]
        facts: PathBuf,

        /// Industry profile (generic, pharma, fintech, startup or an alias)
        #[arg(long, short, env = "CCRE_INDUSTRY")]
        industry: Option<String>,
    },

    /// Combined cost and risk report
    Report {
        /// Fact snapshot file (JSON)
        #[arg(long)]
        facts: PathBuf,

        /// Monthly cluster cost in USD. The cost section is skipped when unset.
        #[arg(long, env = "CCRE_MONTHLY_COST")]
        monthly_cost: Option<f64>,

        /// Industry profile (generic, pharma, fintech, startup or an alias)
        #[arg(long, short, env = "CCRE_INDUSTRY")]
        industry: Option<String>,
    },

    /// List industry profiles
    Profiles,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .with_writer(std::io::stderr)
        .compact()
        .init();

    if let Err(err) = run(cli).await {
        output::print_error(&format!("{:#}", err));
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = config::Config::load()?;
    let api_url = config.api_url(cli.api_url);
    let backend = Backend::from_api_url(api_url.as_deref())?;

    if let Some(url) = &api_url {
        tracing::debug!(url = %url, "Using remote estimator service");
    }

    match cli.command {
        Commands::Costs {
            facts,
            monthly_cost,
            namespace,
        } => {
            let snapshot = load_snapshot(&facts)?;
            costs::show_costs(
                &backend,
                &snapshot,
                config.monthly_cost(monthly_cost),
                namespace,
                cli.format,
            )
            .await?;
        }
        Commands::Risk { facts, industry } => {
            let snapshot = load_snapshot(&facts)?;
            risk::show_risk(&backend, &snapshot, &config.industry(industry), cli.format).await?;
        }
        Commands::Report {
            facts,
            monthly_cost,
            industry,
        } => {
            let snapshot = load_snapshot(&facts)?;
            let request = ReportRequest {
                monthly_cost: config.monthly_cost(monthly_cost),
                industry: Some(config.industry(industry)),
            };
            if request.monthly_cost.is_none() && cli.format == output::OutputFormat::Table {
                output::print_info("No monthly cost given; only the risk section will be computed");
            }
            report::show_report(&backend, &snapshot, &request, cli.format).await?;
        }
        Commands::Profiles => {
            profiles::list_profiles(&backend, cli.format).await?;
        }
    }

    Ok(())
}
