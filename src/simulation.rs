use serde::Serialize;

use crate::api::simulation_dto::SimulationConfigDto;
use crate::domain::memory::requests::ingest_requests;
use crate::domain::memory::{AllocationOutcome, AllocationStrategy, LinearAllocator, MemoryBlock, MemoryRequest, process_requests};
use crate::domain::metrics::{MetricsSummary, ProcessMetrics, summarize};
use crate::domain::process::{ProcessRecord, Ticks, ingest_processes};
use crate::domain::scheduler::{PolicyKind, RunSlice, SchedulerEngine, SchedulingPolicy};
use crate::error::{InputError, ParameterError, Result};

/// A fully validated simulation run.
#[derive(Debug, Clone)]
pub struct SimulationConfig {
    pub policy: SchedulingPolicy,
    pub context_switch: Ticks,
    pub processes: Vec<ProcessRecord>,
    pub memory_size: u64,
    pub strategy: AllocationStrategy,
    pub memory_requests: Vec<MemoryRequest>,
}

/// Command line overrides applied on top of the config file before validation.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub algorithm: Option<String>,
    pub quantum: Option<i64>,
    pub context_switch: Option<i64>,
    pub strategy: Option<String>,
}

impl ConfigOverrides {
    pub fn apply(&self, dto: &mut SimulationConfigDto) {
        if let Some(algorithm) = &self.algorithm {
            dto.cpu.algorithm = algorithm.clone();
        }
        if let Some(quantum) = self.quantum {
            dto.cpu.quantum = quantum;
        }
        if let Some(context_switch) = self.context_switch {
            dto.cpu.context_switch = context_switch;
        }
        if let Some(strategy) = &self.strategy {
            dto.memory.strategy = strategy.clone();
        }
    }
}

impl SimulationConfig {
    /// Validates a parsed config. Parameters are checked before the workload,
    /// and nothing is simulated if any check fails.
    pub fn from_dto(dto: &SimulationConfigDto) -> Result<Self> {
        let policy = SchedulingPolicy::from_name(&dto.cpu.algorithm, dto.cpu.quantum)?;
        let strategy = dto.memory.strategy.parse::<AllocationStrategy>()?;
        if dto.cpu.context_switch < 0 {
            return Err(ParameterError::InvalidContextSwitch(dto.cpu.context_switch).into());
        }

        let processes = ingest_processes(&dto.processes)?;

        if dto.memory.size < 1 {
            return Err(InputError::InvalidMemorySize(dto.memory.size).into());
        }
        let memory_requests = ingest_requests(&dto.memory_requests)?;

        Ok(SimulationConfig {
            policy,
            context_switch: dto.cpu.context_switch as Ticks,
            processes,
            memory_size: dto.memory.size as u64,
            strategy,
            memory_requests,
        })
    }

    /// Same workload under another policy. RR reuses this run's quantum, or
    /// the default of 2 if this run is not round-robin.
    pub fn with_policy(&self, kind: PolicyKind) -> Result<Self> {
        let quantum = self.policy.time_slice().unwrap_or(DEFAULT_QUANTUM) as i64;
        Ok(SimulationConfig { policy: SchedulingPolicy::new(kind, quantum)?, ..self.clone() })
    }
}

const DEFAULT_QUANTUM: Ticks = 2;

/// Scheduling half of a report.
#[derive(Debug, Clone, Serialize)]
pub struct CpuReport {
    pub policy: SchedulingPolicy,
    pub context_switch: Ticks,
    pub table: Vec<ProcessMetrics>,
    pub summary: MetricsSummary,
    pub timeline: Vec<RunSlice>,
    pub context_switches: usize,
    pub idle_ticks: Ticks,
}

/// Memory half of a report.
#[derive(Debug, Clone, Serialize)]
pub struct MemoryReport {
    pub strategy: AllocationStrategy,
    pub total_size: u64,
    pub outcomes: Vec<AllocationOutcome>,
    pub final_blocks: Vec<MemoryBlock>,
    pub free_space: u64,
    pub fragmentation: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct SimulationReport {
    pub cpu: CpuReport,
    pub memory: MemoryReport,
}

pub fn run_cpu(config: &SimulationConfig) -> Result<CpuReport> {
    let engine = SchedulerEngine::new(config.processes.clone(), config.policy, config.context_switch)?;
    let outcome = engine.run();
    let (table, summary) = summarize(&outcome.completed);

    log::info!(
        "{} finished {} processes at t={} (throughput {:.3}).",
        config.policy,
        table.len(),
        summary.total_time,
        summary.throughput
    );

    Ok(CpuReport {
        policy: config.policy,
        context_switch: config.context_switch,
        table,
        summary,
        timeline: outcome.timeline,
        context_switches: outcome.context_switches,
        idle_ticks: outcome.idle_ticks,
    })
}

pub fn run_memory(config: &SimulationConfig) -> Result<MemoryReport> {
    let mut allocator = LinearAllocator::new(config.memory_size)?;
    let outcomes = process_requests(&mut allocator, &config.memory_requests, config.strategy);

    Ok(MemoryReport {
        strategy: config.strategy,
        total_size: allocator.total_size(),
        outcomes,
        free_space: allocator.free_space(),
        fragmentation: allocator.fragmentation(),
        final_blocks: allocator.blocks().to_vec(),
    })
}

/// Runs the scheduler and the allocator of one config. Both own their state
/// for the duration of the call.
pub fn run_simulation(config: &SimulationConfig) -> Result<SimulationReport> {
    let cpu = run_cpu(config)?;
    let memory = run_memory(config)?;
    Ok(SimulationReport { cpu, memory })
}

/// Runs FCFS, SPN and RR over independent copies of the same workload.
pub fn compare_policies(config: &SimulationConfig) -> Result<Vec<CpuReport>> {
    PolicyKind::ALL.iter().map(|&kind| run_cpu(&config.with_policy(kind)?)).collect()
}
