//! Experiment scenario configuration.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::allocation::{BaselinePolicy, OptimalPolicy, VmAllocationConfig, VmAllocationPolicy};
use crate::mobility::{FixedMobility, RandomWaypointMobility, StepMobility, UserMobilityModel};

/// Holds raw scenario config parsed from YAML file.
#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
struct RawScenarioConfig {
    pub num_steps: Option<usize>,
    pub arrival_rate_per_user: Option<f64>,
    pub max_arrival_rate: Option<f64>,
    pub service_rate: Option<f64>,
    pub target_delay: Option<f64>,
    pub delay_tolerance: Option<f64>,
    pub cost_per_vm: Option<f64>,
    pub max_vms: Option<usize>,
    pub mobility: Option<String>,
    pub policy: Option<String>,
}

/// Represents experiment scenario configuration.
#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub struct ScenarioConfig {
    /// Number of simulated time steps.
    pub num_steps: usize,
    /// Request arrival rate generated by a single user.
    pub arrival_rate_per_user: f64,
    /// Optional clamp on the aggregate arrival rate.
    pub max_arrival_rate: Option<f64>,
    /// Processing capacity of one VM instance.
    pub service_rate: f64,
    /// Maximum acceptable average response time.
    pub target_delay: f64,
    /// Search precision around the target delay.
    pub delay_tolerance: f64,
    /// Cost of running one VM instance for one time step.
    pub cost_per_vm: f64,
    /// Upper bound on the number of VM instances.
    pub max_vms: usize,
    /// User mobility model used to produce demand, e.g. "Fixed[n=30]".
    pub mobility: String,
    /// VM allocation policy used by the solver.
    pub policy: String,
}

impl ScenarioConfig {
    /// Creates scenario config by reading parameter values from YAML file
    /// (uses default values if some parameters are absent).
    pub fn from_file(file_name: &str) -> Self {
        let raw: RawScenarioConfig = serde_yaml::from_str(
            &std::fs::read_to_string(file_name).unwrap_or_else(|_| panic!("Can't read file {}", file_name)),
        )
        .unwrap_or_else(|_| panic!("Can't parse YAML from file {}", file_name));

        Self {
            num_steps: raw.num_steps.unwrap_or(100),
            arrival_rate_per_user: raw.arrival_rate_per_user.unwrap_or(0.1),
            max_arrival_rate: raw.max_arrival_rate,
            service_rate: raw.service_rate.unwrap_or(1.),
            target_delay: raw.target_delay.unwrap_or(1.),
            delay_tolerance: raw.delay_tolerance.unwrap_or(1e-6),
            cost_per_vm: raw.cost_per_vm.unwrap_or(1.),
            max_vms: raw.max_vms.unwrap_or(100),
            mobility: raw.mobility.unwrap_or_else(|| "Fixed[n=10]".to_string()),
            policy: raw.policy.unwrap_or_else(|| "Baseline".to_string()),
        }
    }

    pub fn vm_allocation_config(&self) -> VmAllocationConfig {
        VmAllocationConfig::new(self.target_delay, self.delay_tolerance, self.cost_per_vm, self.max_vms)
    }
}

/// Extracts component name and options from the string in `Name[options]`
/// format.
pub fn parse_config_value(config_str: &str) -> (String, Option<String>) {
    match config_str.split_once('[') {
        Some((l, r)) => (l.to_string(), Some(r.to_string().replace(']', ""))),
        None => (config_str.to_string(), None),
    }
}

/// Parses options string from config value, returns map with option names and
/// values.
pub fn parse_options(options_str: &str) -> HashMap<String, String> {
    let mut options = HashMap::new();
    for option_str in options_str.split(',') {
        if let Some((name, value)) = option_str.split_once('=') {
            options.insert(name.to_string(), value.to_string());
        }
    }
    options
}

fn parse_option<T: std::str::FromStr>(options: &HashMap<String, String>, name: &str, config_str: &str) -> T {
    options
        .get(name)
        .unwrap_or_else(|| panic!("Missing mandatory option '{}' in: {}", name, config_str))
        .parse::<T>()
        .unwrap_or_else(|_| panic!("Can't parse option '{}' in: {}", name, config_str))
}

/// Resolves a mobility model from its config string.
///
/// Supported values:
/// - `Fixed[n=30]` — constant number of users;
/// - `Step[n=5:10;9:10]` — piecewise-constant profile of
///   `users:duration` segments;
/// - `RandomWaypoint[nr_nodes=300,max_x=100,max_y=100,min_v=10,max_v=100,max_wt=0,seed=65535]` —
///   random waypoint movement (only `nr_nodes`, `max_x` and `max_y` are
///   mandatory).
///
/// `seed_override` replaces the configured random waypoint seed when present.
pub fn mobility_model_resolver(config_str: &str, seed_override: Option<u64>) -> Box<dyn UserMobilityModel> {
    let (model_name, options_str) = parse_config_value(config_str);
    let options = parse_options(&options_str.unwrap_or_default());
    match model_name.as_str() {
        "Fixed" => {
            let num_users = parse_option::<usize>(&options, "n", config_str);
            Box::new(FixedMobility::new(num_users))
        }
        "Step" => {
            let profile_str = options
                .get("n")
                .unwrap_or_else(|| panic!("Missing mandatory option 'n' in: {}", config_str));
            let profile = profile_str
                .split(';')
                .map(|segment| {
                    let (num_users, duration) = segment
                        .split_once(':')
                        .unwrap_or_else(|| panic!("Bad step segment '{}' in: {}", segment, config_str));
                    let num_users = num_users
                        .parse::<usize>()
                        .unwrap_or_else(|_| panic!("Bad step segment '{}' in: {}", segment, config_str));
                    let duration = duration
                        .parse::<usize>()
                        .unwrap_or_else(|_| panic!("Bad step segment '{}' in: {}", segment, config_str));
                    (duration, num_users)
                })
                .collect();
            Box::new(StepMobility::new(profile))
        }
        "RandomWaypoint" => {
            let num_nodes = parse_option::<usize>(&options, "nr_nodes", config_str);
            let max_x = parse_option::<f64>(&options, "max_x", config_str);
            let max_y = parse_option::<f64>(&options, "max_y", config_str);
            let min_v = options
                .get("min_v")
                .map(|v| v.parse::<f64>().unwrap())
                .unwrap_or(RandomWaypointMobility::DEFAULT_MIN_V);
            let max_v = options
                .get("max_v")
                .map(|v| v.parse::<f64>().unwrap())
                .unwrap_or(RandomWaypointMobility::DEFAULT_MAX_V);
            let max_wt = options
                .get("max_wt")
                .map(|v| v.parse::<f64>().unwrap())
                .unwrap_or(RandomWaypointMobility::DEFAULT_MAX_WT);
            let seed = seed_override.unwrap_or_else(|| {
                options
                    .get("seed")
                    .map(|v| v.parse::<u64>().unwrap())
                    .unwrap_or(RandomWaypointMobility::DEFAULT_SEED)
            });
            Box::new(RandomWaypointMobility::with_params(
                num_nodes, max_x, max_y, min_v, max_v, max_wt, seed,
            ))
        }
        _ => panic!("Can't resolve: {}", config_str),
    }
}

/// Resolves a VM allocation policy from its config string.
pub fn allocation_policy_resolver(config_str: &str) -> Box<dyn VmAllocationPolicy> {
    match config_str {
        "Baseline" => Box::new(BaselinePolicy::new()),
        "Optimal" => Box::new(OptimalPolicy::new()),
        _ => panic!("Can't resolve: {}", config_str),
    }
}
