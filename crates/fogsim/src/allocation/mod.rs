//! VM allocation decisions, policies and the per-step solver.

mod policy;
mod solver;

pub use policy::{BaselinePolicy, OptimalPolicy, PolicyDecision, VmAllocationPolicy};
pub use solver::VmAllocationSolver;

use serde::{Deserialize, Serialize};

/// A single demand sample fed to a performance model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PerformanceSample {
    /// Aggregate request arrival rate, requests per time unit.
    pub arrival_rate: f64,
    /// Processing capacity of one VM instance, requests per time unit.
    pub service_rate: f64,
    /// Currently allocated number of VM instances.
    pub num_vms: usize,
}

/// Allocation decision for one time step. Immutable once produced; the solver
/// retains the full history for reporting.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AllocationDecision {
    pub time_step: usize,
    /// Number of VM instances to allocate.
    pub num_vms: usize,
    /// Average response time achieved with `num_vms` instances.
    pub response_time: f64,
    /// Allocation cost, `num_vms` times the per-VM cost.
    pub cost: f64,
    /// Whether the delay target is met within the configured bounds.
    pub feasible: bool,
    /// Failure description for steps whose decision could not be computed.
    pub diagnostic: Option<String>,
}

/// Solver configuration. Set once at construction, never mutated mid-run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VmAllocationConfig {
    /// Maximum acceptable average response time.
    pub target_delay: f64,
    /// Search precision around the target delay, guards the feasibility check
    /// against floating-point noise at the boundary.
    pub tolerance: f64,
    /// Cost of running one VM instance for one time step.
    pub cost_per_vm: f64,
    /// Upper bound on the number of VM instances.
    pub max_vms: usize,
}

impl VmAllocationConfig {
    pub fn new(target_delay: f64, tolerance: f64, cost_per_vm: f64, max_vms: usize) -> Self {
        assert!(target_delay > 0., "target delay must be positive");
        assert!(tolerance > 0., "tolerance must be positive");
        assert!(cost_per_vm >= 0., "cost per VM must be non-negative");
        Self {
            target_delay,
            tolerance,
            cost_per_vm,
            max_vms,
        }
    }
}
