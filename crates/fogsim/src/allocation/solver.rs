//! Per-step VM allocation solver.

use log::warn;

use crate::allocation::{AllocationDecision, PerformanceSample, VmAllocationConfig, VmAllocationPolicy};
use crate::error::FogError;
use crate::service_performance::ServicePerformanceModel;

/// Produces one [`AllocationDecision`] per time step and owns the resulting
/// decision history.
///
/// The performance model is a read-only collaborator injected by reference.
/// Domain and invalid-input failures abort only the current step, which is
/// recorded as infeasible with a diagnostic so that a batch run never loses
/// the rest of its trace. Foreign-call failures are propagated immediately.
pub struct VmAllocationSolver<'a> {
    model: &'a dyn ServicePerformanceModel,
    policy: Box<dyn VmAllocationPolicy>,
    config: VmAllocationConfig,
    decisions: Vec<AllocationDecision>,
    time_step: usize,
}

impl<'a> VmAllocationSolver<'a> {
    pub fn new(
        model: &'a dyn ServicePerformanceModel,
        policy: Box<dyn VmAllocationPolicy>,
        config: VmAllocationConfig,
    ) -> Self {
        Self {
            model,
            policy,
            config,
            decisions: Vec::new(),
            time_step: 0,
        }
    }

    /// Computes and records the allocation decision for the next time step.
    ///
    /// Returns an error only when an external scorer fails; every other
    /// failure is folded into the recorded decision.
    pub fn step(&mut self, arrival_rate: f64, service_rate: f64) -> Result<&AllocationDecision, FogError> {
        let time_step = self.time_step;
        self.time_step += 1;
        let decision = match self.try_decide(time_step, arrival_rate, service_rate) {
            Ok(decision) => decision,
            Err(err @ FogError::ForeignCall(_)) => return Err(err),
            Err(err) => {
                warn!("step {}: {}", time_step, err);
                AllocationDecision {
                    time_step,
                    num_vms: 0,
                    response_time: 0.,
                    cost: 0.,
                    feasible: false,
                    diagnostic: Some(err.to_string()),
                }
            }
        };
        self.decisions.push(decision);
        Ok(self.decisions.last().unwrap())
    }

    fn try_decide(
        &self,
        time_step: usize,
        arrival_rate: f64,
        service_rate: f64,
    ) -> Result<AllocationDecision, FogError> {
        if !arrival_rate.is_finite() || !service_rate.is_finite() || arrival_rate < 0. {
            return Err(FogError::InvalidInput(format!(
                "bad sample at step {} (arrival rate: {}, service rate: {})",
                time_step, arrival_rate, service_rate
            )));
        }
        if service_rate <= 0. {
            return Err(FogError::Domain(format!(
                "service rate must be positive, got {}",
                service_rate
            )));
        }
        if arrival_rate == 0. {
            return Ok(AllocationDecision {
                time_step,
                num_vms: 0,
                response_time: 0.,
                cost: 0.,
                feasible: true,
                diagnostic: None,
            });
        }
        let sample = PerformanceSample {
            arrival_rate,
            service_rate,
            num_vms: self.decisions.last().map(|d| d.num_vms).unwrap_or(0),
        };
        let outcome = self.policy.decide(&sample, &self.config, self.model)?;
        Ok(AllocationDecision {
            time_step,
            num_vms: outcome.num_vms,
            response_time: outcome.response_time,
            cost: outcome.num_vms as f64 * self.config.cost_per_vm,
            feasible: outcome.feasible,
            diagnostic: None,
        })
    }

    pub fn decisions(&self) -> &[AllocationDecision] {
        &self.decisions
    }

    pub fn config(&self) -> &VmAllocationConfig {
        &self.config
    }

    pub fn into_decisions(self) -> Vec<AllocationDecision> {
        self.decisions
    }
}
