//! VM allocation policies.

use crate::allocation::{PerformanceSample, VmAllocationConfig};
use crate::error::FogError;
use crate::scorer::ExternalScorer;
use crate::service_performance::ServicePerformanceModel;

/// Raw policy outcome, before the solver attaches cost accounting and the
/// step index.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolicyDecision {
    pub num_vms: usize,
    pub response_time: f64,
    pub feasible: bool,
}

/// Trait for implementation of VM allocation policies.
///
/// A policy is defined as a function of the current demand sample, the solver
/// configuration and a performance model, which returns the VM count to
/// allocate together with the achieved response time. Policies may assume a
/// positive, finite arrival rate; degenerate samples are filtered out by the
/// solver beforehand.
pub trait VmAllocationPolicy {
    fn decide(
        &self,
        sample: &PerformanceSample,
        config: &VmAllocationConfig,
        model: &dyn ServicePerformanceModel,
    ) -> Result<PolicyDecision, FogError>;
}

////////////////////////////////////////////////////////////////////////////////

/// Baseline policy, which directly asks the performance model for the minimum
/// feasible VM count at the target delay.
pub struct BaselinePolicy;

impl BaselinePolicy {
    pub fn new() -> Self {
        Self {}
    }
}

impl Default for BaselinePolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl VmAllocationPolicy for BaselinePolicy {
    fn decide(
        &self,
        sample: &PerformanceSample,
        config: &VmAllocationConfig,
        model: &dyn ServicePerformanceModel,
    ) -> Result<PolicyDecision, FogError> {
        match model.min_num_vms(
            sample.arrival_rate,
            sample.service_rate,
            config.target_delay,
            config.tolerance,
        ) {
            Ok(num_vms) if num_vms <= config.max_vms => {
                let response_time =
                    model.average_response_time(sample.arrival_rate, sample.service_rate, num_vms)?;
                Ok(PolicyDecision {
                    num_vms,
                    response_time,
                    feasible: true,
                })
            }
            // The required count exceeds the capacity bound or no count meets
            // the target at all: cap at max_vms and mark infeasible.
            Ok(_) | Err(FogError::NotFeasible(_)) => {
                let response_time = if config.max_vms > 0 {
                    model.average_response_time(sample.arrival_rate, sample.service_rate, config.max_vms)?
                } else {
                    f64::INFINITY
                };
                Ok(PolicyDecision {
                    num_vms: config.max_vms,
                    response_time,
                    feasible: false,
                })
            }
            Err(err) => Err(err),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////

/// Optimal policy, which minimizes the allocation cost subject to the delay
/// constraint and the capacity bound.
///
/// Since the cost grows with the VM count while the response time is
/// non-increasing in it, the feasible counts form an upper interval of
/// `[1, max_vms]` and the cost optimum is its left edge, found by bisection
/// over the 1-D integer domain.
///
/// Constraint evaluation can be delegated to an [`ExternalScorer`] for
/// objectives without a closed form; scorer failures surface immediately as
/// [`FogError::ForeignCall`].
pub struct OptimalPolicy {
    scorer: Option<Box<dyn ExternalScorer>>,
    scorer_module: String,
    scorer_function: String,
}

impl OptimalPolicy {
    pub fn new() -> Self {
        Self {
            scorer: None,
            scorer_module: String::new(),
            scorer_function: String::new(),
        }
    }

    /// Creates a policy that evaluates the response time constraint through an
    /// external scorer, calling `function` from `module` with the arguments
    /// `[arrival_rate, service_rate, num_vms]`.
    pub fn with_scorer(scorer: Box<dyn ExternalScorer>, module: &str, function: &str) -> Self {
        Self {
            scorer: Some(scorer),
            scorer_module: module.to_string(),
            scorer_function: function.to_string(),
        }
    }

    fn response_time(
        &self,
        sample: &PerformanceSample,
        num_vms: usize,
        model: &dyn ServicePerformanceModel,
    ) -> Result<f64, FogError> {
        match &self.scorer {
            Some(scorer) => scorer.evaluate(
                &self.scorer_module,
                &self.scorer_function,
                &[sample.arrival_rate, sample.service_rate, num_vms as f64],
            ),
            None => model.average_response_time(sample.arrival_rate, sample.service_rate, num_vms),
        }
    }
}

impl Default for OptimalPolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl VmAllocationPolicy for OptimalPolicy {
    fn decide(
        &self,
        sample: &PerformanceSample,
        config: &VmAllocationConfig,
        model: &dyn ServicePerformanceModel,
    ) -> Result<PolicyDecision, FogError> {
        if config.max_vms == 0 {
            return Ok(PolicyDecision {
                num_vms: 0,
                response_time: f64::INFINITY,
                feasible: false,
            });
        }
        let max_delay = config.target_delay + config.tolerance;
        let rt_at_bound = self.response_time(sample, config.max_vms, model)?;
        if !(rt_at_bound <= max_delay) {
            // Even the full capacity misses the target: the unconstrained
            // optimum lies beyond max_vms, so cap and mark infeasible.
            return Ok(PolicyDecision {
                num_vms: config.max_vms,
                response_time: rt_at_bound,
                feasible: false,
            });
        }
        let mut lo = 1;
        let mut hi = config.max_vms;
        let mut best_rt = rt_at_bound;
        while lo < hi {
            let mid = lo + (hi - lo) / 2;
            let rt = self.response_time(sample, mid, model)?;
            if rt <= max_delay {
                hi = mid;
                best_rt = rt;
            } else {
                lo = mid + 1;
            }
        }
        Ok(PolicyDecision {
            num_vms: hi,
            response_time: best_rt,
            feasible: true,
        })
    }
}
