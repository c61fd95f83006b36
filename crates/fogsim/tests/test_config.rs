use std::fs;

use fogsim::config::{
    allocation_policy_resolver, mobility_model_resolver, parse_config_value, parse_options, ScenarioConfig,
};

#[test]
fn config_value_splits_into_name_and_options() {
    assert_eq!(parse_config_value("Baseline"), ("Baseline".to_string(), None));
    let (name, options) = parse_config_value("Fixed[n=30]");
    assert_eq!(name, "Fixed");
    assert_eq!(options.unwrap(), "n=30");
}

#[test]
fn options_string_parses_into_a_map() {
    let options = parse_options("nr_nodes=300,max_x=100,max_y=50");
    assert_eq!(options.get("nr_nodes").unwrap(), "300");
    assert_eq!(options.get("max_x").unwrap(), "100");
    assert_eq!(options.get("max_y").unwrap(), "50");
}

#[test]
fn fixed_mobility_resolves_from_a_config_string() {
    let mut model = mobility_model_resolver("Fixed[n=30]", None);
    assert_eq!(model.next(), 30);
    assert_eq!(model.next(), 30);
}

#[test]
fn step_mobility_resolves_from_a_config_string() {
    let mut model = mobility_model_resolver("Step[n=5:10;9:10]", None);
    let counts: Vec<usize> = (0..15).map(|_| model.next()).collect();
    assert_eq!(&counts[..10], &[5; 10]);
    assert_eq!(&counts[10..], &[9; 5]);
}

#[test]
fn random_waypoint_resolves_and_honors_the_seed_override() {
    let mut a = mobility_model_resolver("RandomWaypoint[nr_nodes=100,max_x=100,max_y=100,seed=1]", Some(42));
    let mut b = mobility_model_resolver("RandomWaypoint[nr_nodes=100,max_x=100,max_y=100,seed=2]", Some(42));
    let seq_a: Vec<usize> = (0..20).map(|_| a.next()).collect();
    let seq_b: Vec<usize> = (0..20).map(|_| b.next()).collect();
    assert_eq!(seq_a, seq_b);
}

#[test]
#[should_panic]
fn unknown_mobility_model_panics() {
    mobility_model_resolver("Teleport[n=1]", None);
}

#[test]
#[should_panic]
fn unknown_policy_panics() {
    allocation_policy_resolver("Clairvoyant");
}

#[test]
fn scenario_defaults_fill_absent_fields() {
    let path = std::env::temp_dir().join("fogsim_test_scenario_defaults.yaml");
    fs::write(&path, "num_steps: 5\n").unwrap();
    let config = ScenarioConfig::from_file(path.to_str().unwrap());
    assert_eq!(config.num_steps, 5);
    assert_eq!(config.service_rate, 1.);
    assert_eq!(config.max_vms, 100);
    assert_eq!(config.policy, "Baseline");
    assert_eq!(config.mobility, "Fixed[n=10]");
    assert_eq!(config.max_arrival_rate, None);
    fs::remove_file(&path).unwrap();
}

#[test]
fn scenario_reads_all_fields() {
    let path = std::env::temp_dir().join("fogsim_test_scenario_full.yaml");
    fs::write(
        &path,
        concat!(
            "num_steps: 20\n",
            "arrival_rate_per_user: 0.2\n",
            "max_arrival_rate: 50\n",
            "service_rate: 2.5\n",
            "target_delay: 1.5\n",
            "delay_tolerance: 0.001\n",
            "cost_per_vm: 3\n",
            "max_vms: 42\n",
            "mobility: \"Step[n=5:10;9:10]\"\n",
            "policy: \"Optimal\"\n",
        ),
    )
    .unwrap();
    let config = ScenarioConfig::from_file(path.to_str().unwrap());
    assert_eq!(config.num_steps, 20);
    assert_eq!(config.arrival_rate_per_user, 0.2);
    assert_eq!(config.max_arrival_rate, Some(50.));
    assert_eq!(config.service_rate, 2.5);
    assert_eq!(config.target_delay, 1.5);
    assert_eq!(config.delay_tolerance, 0.001);
    assert_eq!(config.cost_per_vm, 3.);
    assert_eq!(config.max_vms, 42);
    assert_eq!(config.policy, "Optimal");
    let vm_config = config.vm_allocation_config();
    assert_eq!(vm_config.max_vms, 42);
    assert_eq!(vm_config.cost_per_vm, 3.);
    fs::remove_file(&path).unwrap();
}
