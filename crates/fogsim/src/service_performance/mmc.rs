//! Service performance model based on the M/M/c queue.

use log::warn;

use crate::error::FogError;
use crate::service_performance::ServicePerformanceModel;

/// Multi-server M/M/c queueing model.
///
/// Every VM instance is modeled as one of `c` identical servers with
/// exponential service times; the average response time follows from the
/// Erlang-C formula.
pub struct MmcModel {
    search_limit: usize,
}

impl MmcModel {
    /// Upper bound for the VM count scan in `min_num_vms`.
    pub const DEFAULT_SEARCH_LIMIT: usize = 100_000;

    pub fn new() -> Self {
        Self {
            search_limit: Self::DEFAULT_SEARCH_LIMIT,
        }
    }

    /// Creates a model with a custom bound for the minimum VM count search.
    pub fn with_search_limit(search_limit: usize) -> Self {
        Self { search_limit }
    }
}

impl Default for MmcModel {
    fn default() -> Self {
        Self::new()
    }
}

impl MmcModel {
    fn check_rates(arrival_rate: f64, service_rate: f64) -> Result<(), FogError> {
        if !arrival_rate.is_finite() || !service_rate.is_finite() {
            return Err(FogError::InvalidInput(format!(
                "non-finite rates (arrival rate: {}, service rate: {})",
                arrival_rate, service_rate
            )));
        }
        if arrival_rate < 0. {
            return Err(FogError::InvalidInput(format!(
                "negative arrival rate: {}",
                arrival_rate
            )));
        }
        if service_rate <= 0. {
            return Err(FogError::Domain(format!(
                "service rate must be positive, got {}",
                service_rate
            )));
        }
        Ok(())
    }

    /// Probability that an arriving request finds all `c` servers busy
    /// (Erlang-C). Computed through the Erlang-B recurrence, whose
    /// intermediates stay in [0, 1]; the textbook factorial and power terms
    /// grow like e^offered_load and overflow `f64` already for offered loads
    /// around 700.
    fn erlang_c(lambda: f64, mu: f64, c: usize) -> f64 {
        let rho = lambda / (c as f64 * mu);
        let offered_load = lambda / mu;
        let mut blocking = 1.;
        for k in 1..=c {
            blocking = offered_load * blocking / (k as f64 + offered_load * blocking);
        }
        blocking / (1. - rho * (1. - blocking))
    }
}

impl ServicePerformanceModel for MmcModel {
    fn average_response_time(&self, arrival_rate: f64, service_rate: f64, num_vms: usize) -> Result<f64, FogError> {
        Self::check_rates(arrival_rate, service_rate)?;
        if arrival_rate == 0. {
            return Ok(0.);
        }
        if num_vms == 0 {
            return Err(FogError::Domain(format!(
                "no VM instances for a positive arrival rate {}",
                arrival_rate
            )));
        }
        let c = num_vms;
        let rho = arrival_rate / (c as f64 * service_rate);
        if rho >= 1. {
            warn!(
                "system is not stable (lambda: {}, mu: {}, c: {})",
                arrival_rate, service_rate, c
            );
            return Ok(f64::INFINITY);
        }
        if c == 1 {
            return Ok((1. / service_rate) / (1. - rho));
        }
        let pm = Self::erlang_c(arrival_rate, service_rate, c);
        let mean_in_system = c as f64 * rho + (rho / (1. - rho)) * pm;
        Ok(mean_in_system / arrival_rate)
    }

    fn min_num_vms(
        &self,
        arrival_rate: f64,
        service_rate: f64,
        target_delay: f64,
        tol: f64,
    ) -> Result<usize, FogError> {
        Self::check_rates(arrival_rate, service_rate)?;
        if !target_delay.is_finite() || !tol.is_finite() || target_delay <= 0. || tol < 0. {
            return Err(FogError::InvalidInput(format!(
                "bad target delay {} or tolerance {}",
                target_delay, tol
            )));
        }
        if arrival_rate == 0. {
            return Ok(0);
        }
        // The response time can never drop below the service time of a single
        // request, no matter how many servers are added.
        if target_delay + tol < 1. / service_rate {
            return Err(FogError::NotFeasible(format!(
                "target delay {} is below the service time {}",
                target_delay,
                1. / service_rate
            )));
        }
        for c in 1..=self.search_limit {
            // Skip unstable counts.
            if arrival_rate / (c as f64 * service_rate) >= 1. {
                continue;
            }
            let rt = self.average_response_time(arrival_rate, service_rate, c)?;
            if rt <= target_delay + tol {
                return Ok(c);
            }
        }
        Err(FogError::NotFeasible(format!(
            "no VM count up to {} meets the target delay {}",
            self.search_limit, target_delay
        )))
    }
}
