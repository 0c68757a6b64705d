use anyhow::Context;
use clap::{Parser, Subcommand};
use std::fs::File;

use os_sim::api::simulation_dto::{CpuConfigDto, SimulationConfigDto};
use os_sim::api::memory_dto::MemoryConfigDto;
use os_sim::domain::workload::{WorkloadSpec, bernoulli_processes, memory_requests_for};
use os_sim::loader::parser::write_json_file;
use os_sim::simulation::{ConfigOverrides, compare_policies, run_simulation};
use os_sim::{load_config, logger, report};

/// OS simulator: CPU scheduling (FCFS/SPN/RR) and linear memory (first-fit/best-fit).
#[derive(Debug, Parser)]
#[command(name = "os-sim", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Simulate the config's scheduler and memory requests.
    Run {
        /// Path to the JSON config file.
        #[arg(short, long)]
        config: String,

        /// Override the scheduling policy (FCFS | SPN | RR).
        #[arg(long)]
        policy: Option<String>,

        /// Override the round-robin quantum.
        #[arg(long)]
        quantum: Option<i64>,

        /// Override the context switch cost in ticks.
        #[arg(long)]
        context_switch: Option<i64>,

        /// Override the memory strategy (first-fit | best-fit).
        #[arg(long)]
        strategy: Option<String>,

        /// Also write the metrics table to this CSV file.
        #[arg(long)]
        csv: Option<String>,
    },
    /// Run FCFS, SPN and RR over the config's workload and compare the summaries.
    Compare {
        #[arg(short, long)]
        config: String,

        #[arg(long)]
        quantum: Option<i64>,
    },
    /// Write a random workload config.
    Generate {
        #[arg(short, long)]
        out: String,

        #[arg(long, default_value_t = 50)]
        ticks: u64,

        #[arg(long, default_value_t = 0.3)]
        p_arrival: f64,

        #[arg(long, default_value_t = 0)]
        seed: u64,
    },
}

fn main() -> anyhow::Result<()> {
    logger::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Run { config, policy, quantum, context_switch, strategy, csv } => {
            let overrides = ConfigOverrides { algorithm: policy, quantum, context_switch, strategy };
            let config = load_config(&config, &overrides).with_context(|| format!("Could not load config '{}'", config))?;

            let sim_report = run_simulation(&config)?;
            print!("{}", report::render(&sim_report));

            if let Some(path) = csv {
                let file = File::create(&path).with_context(|| format!("Could not create CSV file '{}'", path))?;
                report::write_csv(file, &sim_report.cpu.table)?;
                log::info!("Metrics table written to '{}'.", path);
            }
        }
        Command::Compare { config, quantum } => {
            let overrides = ConfigOverrides { quantum, ..ConfigOverrides::default() };
            let config = load_config(&config, &overrides).with_context(|| format!("Could not load config '{}'", config))?;

            let reports = compare_policies(&config)?;
            print!("{}", report::render_comparison(&reports));
        }
        Command::Generate { out, ticks, p_arrival, seed } => {
            let spec = WorkloadSpec { ticks, p_arrival, seed, ..WorkloadSpec::default() };
            let processes = bernoulli_processes(&spec);
            let memory_requests = memory_requests_for(&processes, &spec);

            let dto = SimulationConfigDto { cpu: CpuConfigDto::default(), processes, memory: MemoryConfigDto::default(), memory_requests };
            write_json_file(&out, &dto).with_context(|| format!("Could not write workload '{}'", out))?;
            log::info!("Wrote {} processes and {} memory requests to '{}'.", dto.processes.len(), dto.memory_requests.len(), out);
        }
    }

    Ok(())
}
