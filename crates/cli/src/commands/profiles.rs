//! Industry profile listing

use anyhow::Result;
use tabled::Tabled;

use super::Backend;
use crate::output::{format_currency, print_header, print_json, print_table, OutputFormat};

#[derive(Tabled)]
struct ProfileRow {
    #[tabled(rename = "Industry")]
    industry: String,
    #[tabled(rename = "Rate/h")]
    rate: String,
    #[tabled(rename = "Privileged")]
    privileged: String,
    #[tabled(rename = "hostPath")]
    host_path: String,
    #[tabled(rename = "hostPID")]
    host_pid: String,
    #[tabled(rename = "Root")]
    root: String,
    #[tabled(rename = "hostNetwork")]
    host_network: String,
    #[tabled(rename = "No Limits")]
    missing_limits: String,
    #[tabled(rename = "Default SA")]
    default_sa: String,
}

/// List the industry presets and their per-incident costs
pub async fn list_profiles(backend: &Backend, format: OutputFormat) -> Result<()> {
    let profiles = backend.profiles().await?;

    if format == OutputFormat::Json {
        return print_json(&profiles);
    }

    print_header("Industry Profiles");
    let rows: Vec<ProfileRow> = profiles
        .iter()
        .map(|p| {
            let c = &p.breach_costs;
            ProfileRow {
                industry: p.industry.to_string(),
                rate: format_currency(p.engineer_hourly_rate),
                privileged: format_currency(c.privileged_container),
                host_path: format_currency(c.host_path),
                host_pid: format_currency(c.host_pid),
                root: format_currency(c.running_as_root),
                host_network: format_currency(c.host_network),
                missing_limits: format_currency(c.missing_limits),
                default_sa: format_currency(c.default_service_account),
            }
        })
        .collect();
    print_table(rows, "No profiles available");
    Ok(())
}
