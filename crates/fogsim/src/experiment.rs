//! Step-by-step provisioning experiment driver.

use std::fs::File;

use log::debug;

use crate::allocation::{AllocationDecision, VmAllocationSolver};
use crate::error::FogError;
use crate::mobility::UserMobilityModel;

/// Drives a mobility model and an allocation solver through a fixed number of
/// time steps.
///
/// Per-step demand is derived from the mobility model as
/// `num_users * arrival_rate_per_user`, optionally clamped to a maximum
/// aggregate rate. The experiment owns the mobility model and the solver; the
/// decision trace accumulated by the solver can be inspected, summarized and
/// saved in CSV format.
pub struct Experiment<'a> {
    mobility: Box<dyn UserMobilityModel>,
    solver: VmAllocationSolver<'a>,
    arrival_rate_per_user: f64,
    max_arrival_rate: Option<f64>,
    service_rate: f64,
}

/// Aggregate statistics over a finished run.
#[derive(Debug, Clone, PartialEq)]
pub struct ExperimentSummary {
    pub num_steps: usize,
    pub total_cost: f64,
    pub max_num_vms: usize,
    /// Mean response time over feasible steps with non-zero load.
    pub mean_response_time: f64,
    pub infeasible_steps: usize,
}

impl<'a> Experiment<'a> {
    pub fn new(
        mobility: Box<dyn UserMobilityModel>,
        solver: VmAllocationSolver<'a>,
        arrival_rate_per_user: f64,
        service_rate: f64,
    ) -> Self {
        assert!(
            arrival_rate_per_user >= 0.,
            "per-user arrival rate must be non-negative"
        );
        Self {
            mobility,
            solver,
            arrival_rate_per_user,
            max_arrival_rate: None,
            service_rate,
        }
    }

    /// Clamps the aggregate arrival rate produced by the mobility model.
    pub fn with_max_arrival_rate(mut self, max_arrival_rate: f64) -> Self {
        self.max_arrival_rate = Some(max_arrival_rate);
        self
    }

    /// Runs the experiment for `num_steps` time steps.
    ///
    /// Fails only on a foreign-call error; all other per-step failures are
    /// recorded in the trace and the run continues.
    pub fn run(&mut self, num_steps: usize) -> Result<(), FogError> {
        for _ in 0..num_steps {
            let num_users = self.mobility.next();
            let mut arrival_rate = num_users as f64 * self.arrival_rate_per_user;
            if let Some(max_rate) = self.max_arrival_rate {
                arrival_rate = arrival_rate.min(max_rate);
            }
            let decision = self.solver.step(arrival_rate, self.service_rate)?;
            debug!(
                "step {}: users: {}, arrival rate: {}, VMs: {}, response time: {}, cost: {}, feasible: {}",
                decision.time_step,
                num_users,
                arrival_rate,
                decision.num_vms,
                decision.response_time,
                decision.cost,
                decision.feasible
            );
        }
        Ok(())
    }

    pub fn decisions(&self) -> &[AllocationDecision] {
        self.solver.decisions()
    }

    pub fn summary(&self) -> ExperimentSummary {
        let decisions = self.decisions();
        let mut total_cost = 0.;
        let mut max_num_vms = 0;
        let mut infeasible_steps = 0;
        let mut rt_sum = 0.;
        let mut rt_count = 0;
        for decision in decisions {
            total_cost += decision.cost;
            max_num_vms = max_num_vms.max(decision.num_vms);
            if decision.feasible {
                if decision.num_vms > 0 {
                    rt_sum += decision.response_time;
                    rt_count += 1;
                }
            } else {
                infeasible_steps += 1;
            }
        }
        ExperimentSummary {
            num_steps: decisions.len(),
            total_cost,
            max_num_vms,
            mean_response_time: if rt_count > 0 { rt_sum / rt_count as f64 } else { 0. },
            infeasible_steps,
        }
    }

    /// Saves the decision trace in CSV format.
    pub fn save_trace(&self, path: &str) -> Result<(), std::io::Error> {
        let file = File::create(path)?;
        let mut wtr = csv::Writer::from_writer(file);
        for decision in self.decisions() {
            wtr.serialize(decision)?;
        }
        wtr.flush()?;
        Ok(())
    }
}
