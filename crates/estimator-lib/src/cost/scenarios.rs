//! Optimization scenario generation
//!
//! Each scenario is evaluated independently and only emitted when the cost
//! it addresses clears a threshold scaled to the size of the cluster.

use crate::models::{Band, CostRange, Level};
use crate::utilization::{ClusterUtilization, NamespaceUtilization};
use serde::{Deserialize, Serialize};

/// Clusters costing at least this much per month use absolute thresholds
pub const LARGE_CLUSTER_COST: f64 = 2000.0;

/// Namespaces never considered for autoscaling recommendations
pub const SYSTEM_NAMESPACES: [&str; 2] = ["kube-system", "istio-system"];

/// Uncertainty band on the cost a scenario addresses
pub const CURRENT_COST_BAND: Band = Band::new(0.9, 1.0, 1.1);

/// Minimum monthly cost a scenario must address to be worth the effort
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScenarioThreshold {
    /// Absolute floor for clusters at or above `LARGE_CLUSTER_COST`
    pub large_cluster_floor: f64,
    /// Fraction of total cost used for smaller clusters
    pub small_cluster_fraction: f64,
    /// Absolute floor for smaller clusters
    pub small_cluster_floor: f64,
}

impl ScenarioThreshold {
    pub fn minimum(&self, total_cost: f64) -> f64 {
        if total_cost >= LARGE_CLUSTER_COST {
            self.large_cluster_floor
        } else {
            (total_cost * self.small_cluster_fraction).max(self.small_cluster_floor)
        }
    }
}

/// Kind of optimization scenario
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScenarioKind {
    SpotMigration,
    IdleDeletion,
    RightSizing,
    Autoscaling,
}

/// Fixed parameters of one scenario kind
#[derive(Debug, Clone, Copy)]
pub struct ScenarioRule {
    pub kind: ScenarioKind,
    pub name: &'static str,
    pub threshold: ScenarioThreshold,
    /// Savings as a fraction of the addressed cost. Bands are +/-0.1 around
    /// best, like `CURRENT_COST_BAND`, so the after-cost is a single point.
    pub savings: Band,
    pub effort: Level,
    pub risk: Level,
    pub timeline: &'static str,
}

pub const SPOT_MIGRATION: ScenarioRule = ScenarioRule {
    kind: ScenarioKind::SpotMigration,
    name: "Migrate to Spot Instances",
    threshold: ScenarioThreshold {
        large_cluster_floor: 50.0,
        small_cluster_fraction: 0.05,
        small_cluster_floor: 20.0,
    },
    savings: Band::new(0.60, 0.70, 0.80),
    effort: Level::Medium,
    risk: Level::Low,
    timeline: "1-2 weeks",
};

pub const IDLE_DELETION: ScenarioRule = ScenarioRule {
    kind: ScenarioKind::IdleDeletion,
    name: "Delete Idle Namespaces",
    threshold: ScenarioThreshold {
        large_cluster_floor: 30.0,
        small_cluster_fraction: 0.03,
        small_cluster_floor: 15.0,
    },
    savings: Band::new(0.90, 1.00, 1.10),
    effort: Level::Low,
    risk: Level::Low,
    timeline: "1 day",
};

pub const RIGHT_SIZING: ScenarioRule = ScenarioRule {
    kind: ScenarioKind::RightSizing,
    name: "Right-size Over-provisioned Workloads",
    threshold: ScenarioThreshold {
        large_cluster_floor: 50.0,
        small_cluster_fraction: 0.05,
        small_cluster_floor: 20.0,
    },
    savings: Band::new(0.40, 0.50, 0.60),
    effort: Level::Medium,
    risk: Level::Medium,
    timeline: "2-3 weeks",
};

pub const AUTOSCALING: ScenarioRule = ScenarioRule {
    kind: ScenarioKind::Autoscaling,
    name: "Add Horizontal Pod Autoscalers",
    threshold: ScenarioThreshold {
        large_cluster_floor: 100.0,
        small_cluster_fraction: 0.10,
        small_cluster_floor: 30.0,
    },
    savings: Band::new(0.15, 0.25, 0.35),
    effort: Level::Medium,
    risk: Level::Low,
    timeline: "1-2 weeks",
};

/// Spot-eligible ratio a namespace must exceed for spot migration
const SPOT_MIN_RATIO: f64 = 0.5;
/// Minimum spot-eligible pods for spot migration
const SPOT_MIN_PODS: u32 = 2;
/// Waste score above which a namespace is treated as idle
const IDLE_MIN_WASTE: f64 = 70.0;
/// Minimum allocated cost for an idle namespace to be listed
const IDLE_MIN_COST: f64 = 20.0;
/// Pod count range for autoscaling candidates (inclusive)
const HPA_MIN_PODS: u32 = 3;
const HPA_MAX_PODS: u32 = 20;
/// Minimum allocated cost for an autoscaling candidate
const HPA_MIN_COST: f64 = 100.0;

/// A costed, actionable optimization
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizationScenario {
    pub kind: ScenarioKind,
    pub name: String,
    pub description: String,
    pub current_cost: CostRange,
    pub after_cost: CostRange,
    /// `current_cost - after_cost`, componentwise
    pub savings: CostRange,
    pub impact: String,
    pub effort: Level,
    pub risk: Level,
    pub timeline: String,
    pub actions: Vec<String>,
}

/// Namespaces that qualified for a scenario and the cost they account for
#[derive(Debug, Default)]
struct Candidates {
    cost: f64,
    cpu: f64,
    memory: f64,
    labels: Vec<String>,
}

impl Candidates {
    fn clears(&self, rule: &ScenarioRule, total_cost: f64) -> bool {
        let minimum = rule.threshold.minimum(total_cost);
        if self.labels.is_empty() || self.cost < minimum {
            tracing::debug!(
                scenario = rule.name,
                cost = self.cost,
                minimum,
                "Scenario below threshold, skipping"
            );
            return false;
        }
        true
    }
}

/// Generates optimization scenarios for a cluster
#[derive(Debug, Clone, Copy)]
pub struct ScenarioGenerator {
    total_cost: f64,
}

impl ScenarioGenerator {
    /// `total_cost` must already be validated as positive
    pub fn new(total_cost: f64) -> Self {
        Self { total_cost }
    }

    /// Scenarios in a fixed order: spot, idle, right-size, autoscaling
    pub fn generate(&self, utilization: &ClusterUtilization) -> Vec<OptimizationScenario> {
        [
            self.spot_migration(utilization),
            self.idle_deletion(utilization),
            self.right_sizing(utilization),
            self.autoscaling(utilization),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    fn namespace_cost(&self, usage: &NamespaceUtilization) -> f64 {
        self.total_cost * usage.weighted_share
    }

    pub fn spot_migration(&self, utilization: &ClusterUtilization) -> Option<OptimizationScenario> {
        let mut found = Candidates::default();

        for ns in &utilization.namespaces {
            let fact = &ns.fact;
            let spot_ratio = fact.spot_ratio();
            if spot_ratio > SPOT_MIN_RATIO && fact.spot_eligible_pods >= SPOT_MIN_PODS {
                found.cost += self.namespace_cost(ns) * spot_ratio;
                found.cpu += fact.cpu_cores_requested * spot_ratio;
                found.memory += fact.memory_gb_requested * spot_ratio;
                found.labels.push(format!(
                    "{} ({}/{} pods)",
                    fact.name, fact.spot_eligible_pods, fact.pod_count
                ));
            }
        }

        if !found.clears(&SPOT_MIGRATION, self.total_cost) {
            return None;
        }

        Some(build(
            &SPOT_MIGRATION,
            found.cost,
            format!(
                "Move {} namespaces to spot node pools ({:.1} CPU cores, {:.1} GB memory)",
                found.labels.len(),
                found.cpu,
                found.memory
            ),
            format!(
                "{:.1} CPU cores, {:.1} GB memory eligible for spot ({:.0}% cost reduction)",
                found.cpu,
                found.memory,
                SPOT_MIGRATION.savings.best * 100.0
            ),
            vec![
                "Create a spot node pool with an appropriate VM size".to_string(),
                format!("Add tolerations to deployments in: {}", found.labels.join(", ")),
                "Add a node selector for the spot pool (e.g. kubernetes.azure.com/scalesetpriority=spot)"
                    .to_string(),
                "Test application tolerance for evictions (spot instances can be reclaimed)"
                    .to_string(),
                "Set appropriate PodDisruptionBudgets to handle evictions gracefully".to_string(),
            ],
        ))
    }

    pub fn idle_deletion(&self, utilization: &ClusterUtilization) -> Option<OptimizationScenario> {
        let mut found = Candidates::default();

        for ns in &utilization.namespaces {
            if ns.waste_score <= IDLE_MIN_WASTE {
                continue;
            }
            let cost = self.namespace_cost(ns);
            if cost <= IDLE_MIN_COST {
                continue;
            }
            let fact = &ns.fact;
            found.cost += cost;
            found.cpu += fact.cpu_cores_requested;
            found.memory += fact.memory_gb_requested;
            let reason = if fact.idle_pods > 0 {
                format!("{} idle pods", fact.idle_pods)
            } else {
                "high waste score".to_string()
            };
            found.labels.push(format!("{} ({})", fact.name, reason));
        }

        if !found.clears(&IDLE_DELETION, self.total_cost) {
            return None;
        }

        Some(build(
            &IDLE_DELETION,
            found.cost,
            format!(
                "Remove {} idle namespaces ({:.1} CPU, {:.1} GB memory)",
                found.labels.len(),
                found.cpu,
                found.memory
            ),
            format!(
                "Free {:.1} CPU cores, {:.1} GB memory ({:.0}% of cluster)",
                found.cpu,
                found.memory,
                found.cpu / utilization.total_cpu_cores * 100.0
            ),
            vec![
                format!(
                    "Verify these namespaces are truly unused: {}",
                    found.labels.join(", ")
                ),
                "Check for any important data or configs that need backup".to_string(),
                "Delete idle namespaces: kubectl delete namespace <name>".to_string(),
                "Monitor for any application dependencies".to_string(),
            ],
        ))
    }

    pub fn right_sizing(&self, utilization: &ClusterUtilization) -> Option<OptimizationScenario> {
        let mut found = Candidates::default();

        for ns in utilization.namespaces.iter().filter(|ns| ns.is_overprovisioned()) {
            found.cost += self.namespace_cost(ns);
            found.cpu += ns.fact.cpu_cores_requested;
            found.memory += ns.fact.memory_gb_requested;
            found.labels.push(ns.fact.name.clone());
        }

        if !found.clears(&RIGHT_SIZING, self.total_cost) {
            return None;
        }

        Some(build(
            &RIGHT_SIZING,
            found.cost,
            format!(
                "Reduce resource requests for {} over-provisioned namespaces",
                found.labels.len()
            ),
            format!(
                "Free {:.1} CPU cores through right-sizing",
                found.cpu * RIGHT_SIZING.savings.best
            ),
            vec![
                "Install metrics-server to track actual usage".to_string(),
                "Monitor actual CPU/memory usage for 1-2 weeks".to_string(),
                format!("Adjust resource requests in: {}", abbreviate(&found.labels)),
                "Test performance after changes".to_string(),
            ],
        ))
    }

    pub fn autoscaling(&self, utilization: &ClusterUtilization) -> Option<OptimizationScenario> {
        let mut found = Candidates::default();

        for ns in &utilization.namespaces {
            let fact = &ns.fact;
            if !(HPA_MIN_PODS..=HPA_MAX_PODS).contains(&fact.pod_count) {
                continue;
            }
            if SYSTEM_NAMESPACES.contains(&fact.name.as_str()) {
                continue;
            }
            let cost = self.namespace_cost(ns);
            if cost <= HPA_MIN_COST {
                continue;
            }
            found.cost += cost;
            found.cpu += fact.cpu_cores_requested;
            found.memory += fact.memory_gb_requested;
            found
                .labels
                .push(format!("{} ({} pods)", fact.name, fact.pod_count));
        }

        if !found.clears(&AUTOSCALING, self.total_cost) {
            return None;
        }

        Some(build(
            &AUTOSCALING,
            found.cost,
            format!(
                "Configure HPA for {} namespaces to scale based on load",
                found.labels.len()
            ),
            format!(
                "Dynamic scaling for {:.1} CPU cores (save ~{:.0}% during off-peak)",
                found.cpu,
                AUTOSCALING.savings.best * 100.0
            ),
            vec![
                "Install metrics-server if not already present: kubectl apply -f https://github.com/kubernetes-sigs/metrics-server/releases/latest/download/components.yaml".to_string(),
                format!("Configure HPA for deployments in: {}", found.labels.join(", ")),
                "Example: kubectl autoscale deployment <name> --cpu-percent=70 --min=2 --max=10"
                    .to_string(),
                "Monitor scaling behavior and adjust thresholds as needed".to_string(),
                "Set appropriate PodDisruptionBudgets to maintain availability during scale-down"
                    .to_string(),
            ],
        ))
    }
}

fn build(
    rule: &ScenarioRule,
    cost: f64,
    description: String,
    impact: String,
    actions: Vec<String>,
) -> OptimizationScenario {
    let current_cost = CostRange::from_band(cost, CURRENT_COST_BAND);
    let remaining = cost * (CURRENT_COST_BAND.best - rule.savings.best);
    let after_cost = CostRange::new(remaining, remaining, remaining);

    OptimizationScenario {
        kind: rule.kind,
        name: rule.name.to_string(),
        description,
        current_cost,
        after_cost,
        savings: current_cost - after_cost,
        impact,
        effort: rule.effort,
        risk: rule.risk,
        timeline: rule.timeline.to_string(),
        actions,
    }
}

/// "a, b, c" for up to three items, "a, b, and N more" beyond that
pub fn abbreviate(items: &[String]) -> String {
    if items.len() <= 3 {
        return items.join(", ");
    }
    format!("{}, {}, and {} more", items[0], items[1], items.len() - 2)
}
