//! Resource utilization analysis
//!
//! Derives per-namespace shares of cluster capacity, a 0-100 waste score
//! and descriptive flags from the inspector's request totals.

use crate::error::Result;
use crate::models::{ClusterCapacityFact, Level, NamespaceUsageFact};
use serde::{Deserialize, Serialize};

/// Maximum waste points from the idle-pod ratio
pub const IDLE_WASTE_POINTS: f64 = 40.0;

/// Waste points for a namespace that looks over-provisioned
pub const OVERPROVISION_WASTE_POINTS: f64 = 30.0;

/// Maximum waste points from the spot-eligible ratio
pub const SPOT_WASTE_POINTS: f64 = 30.0;

/// Average requested cores per pod above which a namespace looks over-provisioned
pub const OVERPROVISION_CPU_PER_POD: f64 = 2.0;

/// Namespaces with fewer pods than this are candidates for over-provisioning
pub const OVERPROVISION_MAX_PODS: u32 = 5;

/// Spot-eligible ratio above which a namespace is flagged `SPOT-OK`
pub const SPOT_OK_RATIO: f64 = 0.5;

/// Minimum idle age, in days, the inspector uses to classify an idle pod
pub const IDLE_DAYS_PER_POD: u32 = 7;

/// Utilization derived for a single namespace
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamespaceUtilization {
    #[serde(flatten)]
    pub fact: NamespaceUsageFact,
    /// Requested CPU as a percentage of allocatable CPU
    pub cpu_percent: f64,
    /// Requested memory as a percentage of allocatable memory
    pub mem_percent: f64,
    /// `(cpu_percent + mem_percent) / 200`
    pub weighted_share: f64,
    /// 0-100 heuristic, higher means more likely wasted spend
    pub waste_score: f64,
    pub flags: Vec<String>,
}

impl NamespaceUtilization {
    pub fn name(&self) -> &str {
        &self.fact.name
    }

    /// Few pods with large per-pod CPU requests
    pub fn is_overprovisioned(&self) -> bool {
        self.fact.pod_count > 0
            && self.fact.pod_count < OVERPROVISION_MAX_PODS
            && self.fact.avg_cpu_per_pod() > OVERPROVISION_CPU_PER_POD
    }
}

/// Kind of per-namespace optimization hint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OptimizationKind {
    IdleNamespace,
    SpotMigration,
    Rightsizing,
}

/// A namespace-level optimization hint (no cost attached)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Optimization {
    pub priority: Level,
    pub kind: OptimizationKind,
    pub namespace: String,
    pub description: String,
    pub action: String,
    pub impact: String,
}

/// Cluster-wide utilization summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusterUtilization {
    pub total_cpu_cores: f64,
    pub total_memory_gb: f64,
    pub total_cpu_requested: f64,
    pub total_memory_requested: f64,
    pub cpu_utilization: f64,
    pub memory_utilization: f64,
    /// Sorted by descending weighted share, then by name
    pub namespaces: Vec<NamespaceUtilization>,
    pub optimizations: Vec<Optimization>,
}

/// Computes utilization from namespace usage facts
#[derive(Debug, Clone, Default)]
pub struct UtilizationAnalyzer;

impl UtilizationAnalyzer {
    pub fn new() -> Self {
        Self
    }

    /// Analyze every namespace against the cluster capacity.
    ///
    /// Fails with `DivisionByZero` when either capacity total is zero and
    /// with `InvalidInput` when a fact is inconsistent.
    pub fn analyze(
        &self,
        namespaces: &[NamespaceUsageFact],
        capacity: &ClusterCapacityFact,
    ) -> Result<ClusterUtilization> {
        capacity.validate()?;

        let mut analyzed = Vec::with_capacity(namespaces.len());
        let mut total_cpu_requested = 0.0;
        let mut total_memory_requested = 0.0;

        for fact in namespaces {
            fact.validate()?;
            total_cpu_requested += fact.cpu_cores_requested;
            total_memory_requested += fact.memory_gb_requested;
            analyzed.push(self.analyze_namespace(fact, capacity));
        }

        analyzed.sort_by(|a, b| {
            b.weighted_share
                .total_cmp(&a.weighted_share)
                .then_with(|| a.fact.name.cmp(&b.fact.name))
        });

        let optimizations = analyzed.iter().flat_map(optimization_hints).collect();

        tracing::debug!(
            namespaces = analyzed.len(),
            total_cpu_requested,
            total_memory_requested,
            "Analyzed namespace utilization"
        );

        Ok(ClusterUtilization {
            total_cpu_cores: capacity.total_cpu_cores,
            total_memory_gb: capacity.total_memory_gb,
            total_cpu_requested,
            total_memory_requested,
            cpu_utilization: total_cpu_requested / capacity.total_cpu_cores * 100.0,
            memory_utilization: total_memory_requested / capacity.total_memory_gb * 100.0,
            namespaces: analyzed,
            optimizations,
        })
    }

    fn analyze_namespace(
        &self,
        fact: &NamespaceUsageFact,
        capacity: &ClusterCapacityFact,
    ) -> NamespaceUtilization {
        let cpu_percent = fact.cpu_cores_requested / capacity.total_cpu_cores * 100.0;
        let mem_percent = fact.memory_gb_requested / capacity.total_memory_gb * 100.0;

        let mut usage = NamespaceUtilization {
            fact: fact.clone(),
            cpu_percent,
            mem_percent,
            weighted_share: (cpu_percent + mem_percent) / 200.0,
            waste_score: 0.0,
            flags: Vec::new(),
        };
        usage.waste_score = waste_score(&usage);
        usage.flags = flags(fact);
        usage
    }
}

/// Idle ratio, likely over-provisioning and spot eligibility, in points
pub fn waste_score(usage: &NamespaceUtilization) -> f64 {
    let mut score = usage.fact.idle_ratio() * IDLE_WASTE_POINTS;

    if usage.is_overprovisioned() {
        score += OVERPROVISION_WASTE_POINTS;
    }

    score += usage.fact.spot_ratio() * SPOT_WASTE_POINTS;

    score.clamp(0.0, 100.0)
}

/// Lower bound on how long the namespace has been idle
fn idle_days(fact: &NamespaceUsageFact) -> u64 {
    u64::from(fact.idle_pods) * u64::from(IDLE_DAYS_PER_POD)
}

fn flags(fact: &NamespaceUsageFact) -> Vec<String> {
    let mut flags = Vec::new();

    if fact.idle_pods > 0 {
        flags.push(format!("IDLE-{}d", idle_days(fact)));
    }
    if fact.spot_ratio() > SPOT_OK_RATIO {
        flags.push("SPOT-OK".to_string());
    }
    if fact.avg_cpu_per_pod() > OVERPROVISION_CPU_PER_POD {
        flags.push("OVER-PROV".to_string());
    }

    flags
}

fn optimization_hints(usage: &NamespaceUtilization) -> Vec<Optimization> {
    let fact = &usage.fact;
    let mut hints = Vec::new();

    if fact.idle_pods > 0 && usage.waste_score > 50.0 {
        hints.push(Optimization {
            priority: Level::High,
            kind: OptimizationKind::IdleNamespace,
            namespace: fact.name.clone(),
            description: format!(
                "{} idle for {}+ days ({:.1} CPU, {:.1} GB)",
                fact.name,
                idle_days(fact),
                fact.cpu_cores_requested,
                fact.memory_gb_requested
            ),
            action: format!("kubectl delete namespace {}", fact.name),
            impact: format!(
                "Frees {:.1} CPU, {:.1} GB ({:.1}% of cluster)",
                fact.cpu_cores_requested, fact.memory_gb_requested, usage.cpu_percent
            ),
        });
    }

    if fact.spot_eligible_pods > 2 {
        hints.push(Optimization {
            priority: Level::Medium,
            kind: OptimizationKind::SpotMigration,
            namespace: fact.name.clone(),
            description: format!(
                "{} has {} pods eligible for spot",
                fact.name, fact.spot_eligible_pods
            ),
            action: "Add spot node toleration and nodeSelector".to_string(),
            impact: format!(
                "Save ~70% on {:.1} CPU cores",
                fact.cpu_cores_requested * fact.spot_ratio()
            ),
        });
    }

    if usage.is_overprovisioned() {
        hints.push(Optimization {
            priority: Level::Medium,
            kind: OptimizationKind::Rightsizing,
            namespace: fact.name.clone(),
            description: format!(
                "{} appears over-provisioned (avg {:.1} CPU/pod)",
                fact.name,
                fact.avg_cpu_per_pod()
            ),
            action: "Review actual usage and adjust resource requests".to_string(),
            impact: "Potentially free up 50-70% of requested resources".to_string(),
        });
    }

    hints
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EstimationError;
    use proptest::prelude::*;

    fn fact(name: &str, cpu: f64, mem: f64, pods: u32, idle: u32, spot: u32) -> NamespaceUsageFact {
        NamespaceUsageFact {
            name: name.to_string(),
            cpu_cores_requested: cpu,
            memory_gb_requested: mem,
            pod_count: pods,
            idle_pods: idle,
            spot_eligible_pods: spot,
        }
    }

    fn capacity(cpu: f64, mem: f64) -> ClusterCapacityFact {
        ClusterCapacityFact {
            total_cpu_cores: cpu,
            total_memory_gb: mem,
        }
    }

    #[test]
    fn test_percentages_and_weighted_share() {
        let result = UtilizationAnalyzer::new()
            .analyze(&[fact("web", 10.0, 40.0, 20, 0, 0)], &capacity(100.0, 200.0))
            .unwrap();

        let web = &result.namespaces[0];
        assert!((web.cpu_percent - 10.0).abs() < 1e-9);
        assert!((web.mem_percent - 20.0).abs() < 1e-9);
        assert!((web.weighted_share - 0.15).abs() < 1e-9);
        assert!((result.cpu_utilization - 10.0).abs() < 1e-9);
        assert!((result.memory_utilization - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_capacity_fails() {
        let err = UtilizationAnalyzer::new()
            .analyze(&[fact("web", 1.0, 1.0, 1, 0, 0)], &capacity(0.0, 10.0))
            .unwrap_err();
        assert_eq!(err, EstimationError::DivisionByZero("total_cpu_cores"));

        let err = UtilizationAnalyzer::new()
            .analyze(&[], &capacity(10.0, 0.0))
            .unwrap_err();
        assert_eq!(err, EstimationError::DivisionByZero("total_memory_gb"));
    }

    #[test]
    fn test_waste_score_components() {
        let analyzer = UtilizationAnalyzer::new();
        let cap = capacity(100.0, 100.0);

        // All idle, over-provisioned (3 pods, 3 cores each), all spot-eligible
        let result = analyzer
            .analyze(&[fact("batch", 9.0, 6.0, 3, 3, 3)], &cap)
            .unwrap();
        assert!((result.namespaces[0].waste_score - 100.0).abs() < 1e-9);

        // Half idle only
        let result = analyzer
            .analyze(&[fact("dev", 2.0, 2.0, 4, 2, 0)], &cap)
            .unwrap();
        assert!((result.namespaces[0].waste_score - 20.0).abs() < 1e-9);

        // Many pods: no over-provisioning points even at high CPU per pod
        let result = analyzer
            .analyze(&[fact("ml", 60.0, 10.0, 10, 0, 0)], &cap)
            .unwrap();
        assert_eq!(result.namespaces[0].waste_score, 0.0);
    }

    #[test]
    fn test_flags() {
        let result = UtilizationAnalyzer::new()
            .analyze(&[fact("staging", 9.0, 6.0, 3, 2, 2)], &capacity(100.0, 100.0))
            .unwrap();
        assert_eq!(
            result.namespaces[0].flags,
            vec!["IDLE-14d".to_string(), "SPOT-OK".to_string(), "OVER-PROV".to_string()]
        );

        // Exactly half spot-eligible is not SPOT-OK
        let result = UtilizationAnalyzer::new()
            .analyze(&[fact("web", 1.0, 1.0, 4, 0, 2)], &capacity(100.0, 100.0))
            .unwrap();
        assert!(result.namespaces[0].flags.is_empty());
    }

    #[test]
    fn test_idle_days_do_not_overflow() {
        let huge = fact("archive", 1.0, 1.0, 700_000_000, 700_000_000, 700_000_000);
        assert!(huge.validate().is_ok());

        let result = UtilizationAnalyzer::new()
            .analyze(&[huge], &capacity(100.0, 100.0))
            .unwrap();
        assert_eq!(result.namespaces[0].flags[0], "IDLE-4900000000d");
        assert_eq!(result.optimizations[0].kind, OptimizationKind::IdleNamespace);
        assert!(result.optimizations[0]
            .description
            .contains("idle for 4900000000+ days"));
    }

    #[test]
    fn test_sorted_by_weighted_share_then_name() {
        let result = UtilizationAnalyzer::new()
            .analyze(
                &[
                    fact("small", 1.0, 1.0, 2, 0, 0),
                    fact("beta", 10.0, 10.0, 5, 0, 0),
                    fact("alpha", 10.0, 10.0, 5, 0, 0),
                ],
                &capacity(100.0, 100.0),
            )
            .unwrap();
        let names: Vec<&str> = result.namespaces.iter().map(|n| n.name()).collect();
        assert_eq!(names, vec!["alpha", "beta", "small"]);
    }

    #[test]
    fn test_optimization_hints() {
        let result = UtilizationAnalyzer::new()
            .analyze(&[fact("staging", 9.0, 6.0, 3, 3, 3)], &capacity(100.0, 100.0))
            .unwrap();
        let kinds: Vec<OptimizationKind> = result.optimizations.iter().map(|o| o.kind).collect();
        assert_eq!(
            kinds,
            vec![
                OptimizationKind::IdleNamespace,
                OptimizationKind::SpotMigration,
                OptimizationKind::Rightsizing
            ]
        );
        assert_eq!(result.optimizations[0].action, "kubectl delete namespace staging");
        assert_eq!(result.optimizations[0].priority, Level::High);
    }

    #[test]
    fn test_serializes_flat_with_plain_floats() {
        let result = UtilizationAnalyzer::new()
            .analyze(&[fact("web", 10.0, 40.0, 20, 0, 0)], &capacity(100.0, 200.0))
            .unwrap();
        let json = serde_json::to_value(&result.namespaces[0]).unwrap();
        assert_eq!(json["name"], "web");
        assert!(json["cpu_percent"].is_f64());
        assert!(json["weighted_share"].is_f64());
    }

    proptest! {
        /// Shares sum to one when capacity equals the sum of requests.
        #[test]
        fn weighted_shares_sum_to_one(
            requests in prop::collection::vec((0.1f64..64.0, 0.1f64..256.0, 1u32..50), 1..20)
        ) {
            let facts: Vec<NamespaceUsageFact> = requests
                .iter()
                .enumerate()
                .map(|(i, (cpu, mem, pods))| fact(&format!("ns-{i}"), *cpu, *mem, *pods, 0, 0))
                .collect();
            let cap = capacity(
                facts.iter().map(|f| f.cpu_cores_requested).sum(),
                facts.iter().map(|f| f.memory_gb_requested).sum(),
            );

            let result = UtilizationAnalyzer::new().analyze(&facts, &cap).unwrap();
            let total: f64 = result.namespaces.iter().map(|n| n.weighted_share).sum();
            prop_assert!((total - 1.0).abs() < 1e-6);
        }

        #[test]
        fn waste_score_stays_in_bounds(
            pods in 1u32..40,
            idle_pct in 0u32..=100,
            spot_pct in 0u32..=100,
            cpu in 0.0f64..200.0,
        ) {
            let idle = pods * idle_pct / 100;
            let spot = pods * spot_pct / 100;
            let result = UtilizationAnalyzer::new()
                .analyze(&[fact("ns", cpu, 1.0, pods, idle, spot)], &capacity(256.0, 256.0))
                .unwrap();
            let score = result.namespaces[0].waste_score;
            prop_assert!((0.0..=100.0).contains(&score));
        }
    }
}
