//! Risk category constants
//!
//! Probabilities are annual incident likelihoods per affected workload. They
//! are heuristics kept verbatim so reports stay comparable across runs.

use crate::models::{RiskCategoryKind, Severity};

/// Illustrative industry example attached to a category
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Example {
    Text(&'static str),
    /// Rendered as `{prefix}$<unit cost>K{suffix}` using the active profile
    UnitCost {
        prefix: &'static str,
        suffix: &'static str,
    },
}

impl Example {
    pub fn render(&self, unit_cost: f64) -> String {
        match self {
            Example::Text(text) => text.to_string(),
            Example::UnitCost { prefix, suffix } => {
                format!("{prefix}${:.0}K{suffix}", unit_cost / 1000.0)
            }
        }
    }
}

/// Fixed parameters and narrative for one costed category
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CategorySpec {
    pub kind: RiskCategoryKind,
    pub name: &'static str,
    pub severity: Severity,
    pub probability: f64,
    pub description: &'static str,
    pub typical_incidents: &'static [&'static str],
    pub industry_examples: &'static [Example],
}

/// Costed categories in report order
pub const CATALOG: [CategorySpec; 7] = [
    CategorySpec {
        kind: RiskCategoryKind::PrivilegedContainers,
        name: "Privileged Containers",
        severity: Severity::Critical,
        probability: 0.15,
        description: "Containers with privileged mode can escape to host and compromise entire cluster",
        typical_incidents: &[
            "Container escape leading to node compromise",
            "Lateral movement across cluster",
            "Data exfiltration from host filesystem",
        ],
        industry_examples: &[
            Example::Text("Tesla 2018: Cryptomining via privileged container ($50K+ in compute costs)"),
            Example::Text("Average container escape incident cost: $25K (Ponemon 2023)"),
        ],
    },
    CategorySpec {
        kind: RiskCategoryKind::HostPathVolumes,
        name: "Host Path Volumes",
        severity: Severity::Critical,
        probability: 0.20,
        description: "Direct host filesystem access enables data exfiltration and credential theft",
        typical_incidents: &[
            "Access to /etc/shadow for credential theft",
            "Docker socket exploitation",
            "Reading application secrets from host",
        ],
        industry_examples: &[
            Example::Text("Docker socket abuse: Average incident cost $35K"),
            Example::Text("Credential theft via hostPath: 23% of K8s breaches (Aqua Security 2023)"),
        ],
    },
    CategorySpec {
        kind: RiskCategoryKind::HostPid,
        name: "Host PID Namespace",
        severity: Severity::Critical,
        probability: 0.12,
        description: "Access to host processes enables process injection and privilege escalation",
        typical_incidents: &[
            "Process injection into privileged processes",
            "Information disclosure via /proc",
            "Signal-based denial of service",
        ],
        industry_examples: &[Example::UnitCost {
            prefix: "Host PID exploitation: ",
            suffix: " average incident cost",
        }],
    },
    CategorySpec {
        kind: RiskCategoryKind::RunningAsRoot,
        name: "Containers Running as Root",
        severity: Severity::High,
        probability: 0.10,
        description: "Root user in containers amplifies damage from application vulnerabilities",
        typical_incidents: &[
            "CVE exploitation with root privileges",
            "Container filesystem modification",
            "Capability abuse for lateral movement",
        ],
        industry_examples: &[
            Example::Text("Log4Shell + root user: 3x more damage than non-root"),
            Example::Text("Root containers: 67% of critical K8s CVEs (StackRox 2022)"),
        ],
    },
    CategorySpec {
        kind: RiskCategoryKind::HostNetwork,
        name: "Host Network Usage",
        severity: Severity::High,
        probability: 0.08,
        description: "Bypasses network policies enabling lateral movement and service impersonation",
        typical_incidents: &[
            "Bypass of network segmentation",
            "Service impersonation attacks",
            "Cluster-wide port scanning",
        ],
        industry_examples: &[Example::UnitCost {
            prefix: "Network policy bypass: ",
            suffix: " average incident",
        }],
    },
    CategorySpec {
        kind: RiskCategoryKind::MissingResourceLimits,
        name: "Missing Resource Limits",
        severity: Severity::Medium,
        probability: 0.25,
        description: "Enables resource exhaustion attacks causing cluster-wide outages",
        typical_incidents: &[
            "Memory leak causing node eviction",
            "CPU spike affecting cluster performance",
            "OOMKilled cascading failures",
        ],
        industry_examples: &[
            Example::UnitCost {
                prefix: "Average cost of 1-hour production outage: ",
                suffix: "",
            },
            Example::Text("Resource exhaustion: 18% of K8s incidents (CNCF 2023)"),
        ],
    },
    CategorySpec {
        kind: RiskCategoryKind::DefaultServiceAccount,
        name: "Default Service Account Usage",
        severity: Severity::Medium,
        probability: 0.06,
        description: "Default service accounts often have excessive permissions enabling privilege escalation",
        typical_incidents: &[
            "Over-privileged API access from compromised pod",
            "Secret enumeration via service account token",
            "Namespace-wide resource manipulation",
        ],
        industry_examples: &[Example::Text("Service account abuse: $6K average incident")],
    },
];

/// Catalog entry for a category, if it is costed
pub fn spec_for(kind: RiskCategoryKind) -> Option<&'static CategorySpec> {
    CATALOG.iter().find(|spec| spec.kind == kind)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_probabilities() {
        let probability = |kind| spec_for(kind).map(|s| s.probability);
        assert_eq!(probability(RiskCategoryKind::PrivilegedContainers), Some(0.15));
        assert_eq!(probability(RiskCategoryKind::HostPathVolumes), Some(0.20));
        assert_eq!(probability(RiskCategoryKind::HostPid), Some(0.12));
        assert_eq!(probability(RiskCategoryKind::RunningAsRoot), Some(0.10));
        assert_eq!(probability(RiskCategoryKind::HostNetwork), Some(0.08));
        assert_eq!(probability(RiskCategoryKind::MissingResourceLimits), Some(0.25));
        assert_eq!(probability(RiskCategoryKind::DefaultServiceAccount), Some(0.06));
        assert_eq!(probability(RiskCategoryKind::HostIpc), None);
    }

    #[test]
    fn test_every_costed_category_has_narrative() {
        for spec in &CATALOG {
            assert!(!spec.description.is_empty(), "{}", spec.name);
            assert_eq!(spec.typical_incidents.len(), 3, "{}", spec.name);
            assert!(!spec.industry_examples.is_empty(), "{}", spec.name);
        }
    }

    #[test]
    fn test_unit_cost_example_renders_thousands() {
        let example = Example::UnitCost {
            prefix: "Host PID exploitation: ",
            suffix: " average incident cost",
        };
        assert_eq!(
            example.render(40_000.0),
            "Host PID exploitation: $40K average incident cost"
        );
        assert_eq!(Example::Text("fixed").render(1.0), "fixed");
    }
}
