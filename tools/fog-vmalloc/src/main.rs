use clap::Parser;
use log::info;

use fogsim::allocation::VmAllocationSolver;
use fogsim::config::{allocation_policy_resolver, mobility_model_resolver, ScenarioConfig};
use fogsim::experiment::Experiment;
use fogsim::service_performance::MmcModel;

fn init_logger() {
    use env_logger::Builder;
    use std::io::Write;
    Builder::from_default_env()
        .format(|buf, record| writeln!(buf, "{}", record.args()))
        .init();
}

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to an experiment scenario in YAML format.
    #[arg(long)]
    scenario: String,

    /// Path to the output CSV trace file.
    #[arg(long)]
    trace_file: Option<String>,

    /// Overrides the mobility model seed.
    #[arg(long)]
    seed: Option<u64>,

    /// Overrides the number of simulated steps.
    #[arg(long)]
    num_steps: Option<usize>,
}

fn main() {
    init_logger();
    let args = Args::parse();
    let config = ScenarioConfig::from_file(&args.scenario);
    info!("scenario: {:?}", config);

    let model = MmcModel::new();
    let policy = allocation_policy_resolver(&config.policy);
    let solver = VmAllocationSolver::new(&model, policy, config.vm_allocation_config());
    let mobility = mobility_model_resolver(&config.mobility, args.seed);
    let mut experiment = Experiment::new(mobility, solver, config.arrival_rate_per_user, config.service_rate);
    if let Some(max_rate) = config.max_arrival_rate {
        experiment = experiment.with_max_arrival_rate(max_rate);
    }

    let num_steps = args.num_steps.unwrap_or(config.num_steps);
    if let Err(err) = experiment.run(num_steps) {
        eprintln!("experiment failed: {}", err);
        std::process::exit(1);
    }

    println!(
        "{:>6} {:>6} {:>14} {:>10} {:>9}  {}",
        "step", "vms", "resp.time", "cost", "feasible", "diagnostic"
    );
    for d in experiment.decisions() {
        println!(
            "{:>6} {:>6} {:>14.6} {:>10.2} {:>9}  {}",
            d.time_step,
            d.num_vms,
            d.response_time,
            d.cost,
            d.feasible,
            d.diagnostic.as_deref().unwrap_or("")
        );
    }

    let summary = experiment.summary();
    println!("describing {} steps", summary.num_steps);
    println!("- total cost = {}", summary.total_cost);
    println!("- max VMs = {}", summary.max_num_vms);
    println!("- mean response time = {}", summary.mean_response_time);
    println!("- infeasible steps = {}", summary.infeasible_steps);

    if let Some(path) = &args.trace_file {
        experiment
            .save_trace(path)
            .unwrap_or_else(|e| panic!("Can't save trace to {}: {}", path, e));
        println!("trace saved to {}", path);
    }
}
