//! Service performance models.

mod mmc;

pub use mmc::MmcModel;

use crate::error::FogError;

/// Trait for implementation of service performance models.
///
/// A performance model maps a demand sample (arrival rate, per-VM service rate,
/// number of VM instances) to the expected average response time, and inversely
/// finds the minimum number of VM instances whose response time meets a target
/// delay. Allocation policies treat the model as a black box, so queueing
/// disciplines can be swapped without touching the solver.
pub trait ServicePerformanceModel {
    /// Returns the expected average response time for the given demand and
    /// capacity.
    ///
    /// Fails with [`FogError::Domain`] when the service rate is not positive or
    /// when a positive arrival rate meets zero capacity, and with
    /// [`FogError::InvalidInput`] on non-finite or negative rates.
    fn average_response_time(&self, arrival_rate: f64, service_rate: f64, num_vms: usize) -> Result<f64, FogError>;

    /// Returns the smallest number of VM instances whose average response time
    /// does not exceed `target_delay` within `tol`.
    ///
    /// The search assumes the response time is non-increasing in the VM count.
    /// Fails with [`FogError::NotFeasible`] when no count within the model's
    /// search bound satisfies the target.
    fn min_num_vms(&self, arrival_rate: f64, service_rate: f64, target_delay: f64, tol: f64)
        -> Result<usize, FogError>;
}
