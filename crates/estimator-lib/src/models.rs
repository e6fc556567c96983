//! Core data models for the estimation engine
//!
//! Facts are produced by the external cluster inspector and consumed
//! read-only. Derived values live next to the component that computes them.

use crate::error::{EstimationError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::iter::Sum;
use std::ops::{Add, Sub};

/// A low/best/high estimate in dollars
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CostRange {
    pub low: f64,
    pub best: f64,
    pub high: f64,
}

impl CostRange {
    pub const ZERO: CostRange = CostRange {
        low: 0.0,
        best: 0.0,
        high: 0.0,
    };

    pub fn new(low: f64, best: f64, high: f64) -> Self {
        Self { low, best, high }
    }

    /// Scale a base amount by a low/best/high factor band
    pub fn from_band(base: f64, band: Band) -> Self {
        Self {
            low: base * band.low,
            best: base * band.best,
            high: base * band.high,
        }
    }

    /// True when `0 <= low <= best <= high`
    pub fn is_monotonic(&self) -> bool {
        0.0 <= self.low && self.low <= self.best && self.best <= self.high
    }
}

impl Add for CostRange {
    type Output = CostRange;

    fn add(self, rhs: CostRange) -> CostRange {
        CostRange {
            low: self.low + rhs.low,
            best: self.best + rhs.best,
            high: self.high + rhs.high,
        }
    }
}

impl Sub for CostRange {
    type Output = CostRange;

    fn sub(self, rhs: CostRange) -> CostRange {
        CostRange {
            low: self.low - rhs.low,
            best: self.best - rhs.best,
            high: self.high - rhs.high,
        }
    }
}

impl Sum for CostRange {
    fn sum<I: Iterator<Item = CostRange>>(iter: I) -> CostRange {
        iter.fold(CostRange::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a CostRange> for CostRange {
    fn sum<I: Iterator<Item = &'a CostRange>>(iter: I) -> CostRange {
        iter.copied().sum()
    }
}

/// Multiplicative factors applied to a base amount
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Band {
    pub low: f64,
    pub best: f64,
    pub high: f64,
}

impl Band {
    pub const fn new(low: f64, best: f64, high: f64) -> Self {
        Self { low, best, high }
    }
}

/// Coarse three-level label used for confidence, effort, risk and priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Level {
    Low,
    Medium,
    High,
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Level::Low => "Low",
            Level::Medium => "Medium",
            Level::High => "High",
        };
        f.write_str(s)
    }
}

/// Severity of a security risk category
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "critical",
            Severity::High => "high",
            Severity::Medium => "medium",
            Severity::Low => "low",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resource requests observed for one namespace
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamespaceUsageFact {
    pub name: String,
    pub cpu_cores_requested: f64,
    pub memory_gb_requested: f64,
    pub pod_count: u32,
    #[serde(default)]
    pub idle_pods: u32,
    #[serde(default)]
    pub spot_eligible_pods: u32,
}

impl NamespaceUsageFact {
    /// Fraction of pods the inspector classified as idle (0 when there are no pods)
    pub fn idle_ratio(&self) -> f64 {
        ratio(self.idle_pods, self.pod_count)
    }

    /// Fraction of pods eligible for spot capacity (0 when there are no pods)
    pub fn spot_ratio(&self) -> f64 {
        ratio(self.spot_eligible_pods, self.pod_count)
    }

    /// Average requested CPU cores per pod (0 when there are no pods)
    pub fn avg_cpu_per_pod(&self) -> f64 {
        if self.pod_count == 0 {
            return 0.0;
        }
        self.cpu_cores_requested / self.pod_count as f64
    }

    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(EstimationError::invalid("namespace name is empty"));
        }
        if !is_non_negative(self.cpu_cores_requested) {
            return Err(EstimationError::invalid(format!(
                "namespace {}: cpu_cores_requested must be a non-negative number",
                self.name
            )));
        }
        if !is_non_negative(self.memory_gb_requested) {
            return Err(EstimationError::invalid(format!(
                "namespace {}: memory_gb_requested must be a non-negative number",
                self.name
            )));
        }
        if self.idle_pods > self.pod_count {
            return Err(EstimationError::invalid(format!(
                "namespace {}: idle_pods ({}) exceeds pod_count ({})",
                self.name, self.idle_pods, self.pod_count
            )));
        }
        if self.spot_eligible_pods > self.pod_count {
            return Err(EstimationError::invalid(format!(
                "namespace {}: spot_eligible_pods ({}) exceeds pod_count ({})",
                self.name, self.spot_eligible_pods, self.pod_count
            )));
        }
        Ok(())
    }
}

/// Total allocatable capacity across all nodes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClusterCapacityFact {
    pub total_cpu_cores: f64,
    pub total_memory_gb: f64,
}

impl ClusterCapacityFact {
    /// Reject capacities that would make every percentage meaningless
    pub fn validate(&self) -> Result<()> {
        if !is_non_negative(self.total_cpu_cores) {
            return Err(EstimationError::invalid(
                "total_cpu_cores must be a non-negative number",
            ));
        }
        if !is_non_negative(self.total_memory_gb) {
            return Err(EstimationError::invalid(
                "total_memory_gb must be a non-negative number",
            ));
        }
        if self.total_cpu_cores == 0.0 {
            return Err(EstimationError::DivisionByZero("total_cpu_cores"));
        }
        if self.total_memory_gb == 0.0 {
            return Err(EstimationError::DivisionByZero("total_memory_gb"));
        }
        Ok(())
    }
}

/// Closed set of security misconfiguration categories counted by the inspector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskCategoryKind {
    PrivilegedContainers,
    HostPathVolumes,
    HostPid,
    HostIpc,
    HostNetwork,
    RunningAsRoot,
    MissingResourceLimits,
    DefaultServiceAccount,
    AddedCapabilities,
    PrivilegeEscalation,
}

impl RiskCategoryKind {
    pub const ALL: [RiskCategoryKind; 10] = [
        RiskCategoryKind::PrivilegedContainers,
        RiskCategoryKind::HostPathVolumes,
        RiskCategoryKind::HostPid,
        RiskCategoryKind::HostIpc,
        RiskCategoryKind::HostNetwork,
        RiskCategoryKind::RunningAsRoot,
        RiskCategoryKind::MissingResourceLimits,
        RiskCategoryKind::DefaultServiceAccount,
        RiskCategoryKind::AddedCapabilities,
        RiskCategoryKind::PrivilegeEscalation,
    ];
}

/// Per-category counts of security findings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SecurityRiskCounts {
    pub privileged_containers: u32,
    pub host_path_volumes: u32,
    pub host_pid: u32,
    pub host_ipc: u32,
    pub host_network: u32,
    pub running_as_root: u32,
    pub missing_resource_limits: u32,
    pub default_service_account: u32,
    pub added_capabilities: u32,
    pub privilege_escalation: u32,
}

impl SecurityRiskCounts {
    pub fn count(&self, kind: RiskCategoryKind) -> u32 {
        match kind {
            RiskCategoryKind::PrivilegedContainers => self.privileged_containers,
            RiskCategoryKind::HostPathVolumes => self.host_path_volumes,
            RiskCategoryKind::HostPid => self.host_pid,
            RiskCategoryKind::HostIpc => self.host_ipc,
            RiskCategoryKind::HostNetwork => self.host_network,
            RiskCategoryKind::RunningAsRoot => self.running_as_root,
            RiskCategoryKind::MissingResourceLimits => self.missing_resource_limits,
            RiskCategoryKind::DefaultServiceAccount => self.default_service_account,
            RiskCategoryKind::AddedCapabilities => self.added_capabilities,
            RiskCategoryKind::PrivilegeEscalation => self.privilege_escalation,
        }
    }

    /// Sum of all counters
    pub fn total(&self) -> u64 {
        RiskCategoryKind::ALL
            .iter()
            .map(|kind| self.count(*kind) as u64)
            .sum()
    }
}

/// Security findings for one cluster
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SecurityFacts {
    /// 0-100 score computed by the inspector, passed through unchanged
    #[serde(default)]
    pub security_score: u8,
    #[serde(default)]
    pub risks: SecurityRiskCounts,
}

/// Everything the inspector observed in a single scan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactSnapshot {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cluster: Option<String>,
    pub capacity: ClusterCapacityFact,
    #[serde(default)]
    pub namespaces: Vec<NamespaceUsageFact>,
    #[serde(default)]
    pub security: SecurityFacts,
}

impl SecurityFacts {
    pub fn validate(&self) -> Result<()> {
        if self.security_score > 100 {
            return Err(EstimationError::invalid(format!(
                "security_score {} is outside 0-100",
                self.security_score
            )));
        }
        Ok(())
    }
}

impl FactSnapshot {
    /// Check namespace facts and the security score.
    ///
    /// Capacity is validated by the utilization analyzer, which owns the
    /// division by it.
    pub fn validate(&self) -> Result<()> {
        self.validate_namespaces()?;
        self.security.validate()
    }

    /// Per-namespace consistency and unique names
    pub fn validate_namespaces(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for ns in &self.namespaces {
            ns.validate()?;
            if !seen.insert(ns.name.as_str()) {
                return Err(EstimationError::invalid(format!(
                    "duplicate namespace: {}",
                    ns.name
                )));
            }
        }
        Ok(())
    }
}

fn ratio(part: u32, whole: u32) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    part as f64 / whole as f64
}

fn is_non_negative(value: f64) -> bool {
    value.is_finite() && value >= 0.0
}
