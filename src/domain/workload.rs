use rand::prelude::*;

use crate::api::memory_dto::MemoryRequestDto;
use crate::api::simulation_dto::ProcessDto;

/// Parameters of a random workload.
///
/// On every tick in `0..ticks` a process arrives with probability `p_arrival`;
/// it is short (`short_service`) with probability `p_short`, else long.
#[derive(Debug, Clone)]
pub struct WorkloadSpec {
    pub ticks: u64,
    pub p_arrival: f64,
    pub p_short: f64,
    pub short_service: i64,
    pub long_service: i64,
    pub max_request: i64,
    pub seed: u64,
}

impl Default for WorkloadSpec {
    fn default() -> Self {
        WorkloadSpec { ticks: 50, p_arrival: 0.3, p_short: 0.3, short_service: 2, long_service: 6, max_request: 256, seed: 0 }
    }
}

/// Bernoulli arrivals. Pids are assigned from 1 in arrival order.
pub fn bernoulli_processes(spec: &WorkloadSpec) -> Vec<ProcessDto> {
    let mut rng = StdRng::seed_from_u64(spec.seed);
    let mut processes = Vec::new();

    for t in 0..spec.ticks {
        if rng.random::<f64>() < spec.p_arrival {
            let service = if rng.random::<f64>() < spec.p_short { spec.short_service } else { spec.long_service };

            processes.push(ProcessDto { pid: processes.len() as u32 + 1, arrival: t as i64, service });
        }
    }

    processes
}

/// One allocation per process with a uniform size in `1..=max_request`;
/// roughly every third process frees its memory again later in the batch.
pub fn memory_requests_for(processes: &[ProcessDto], spec: &WorkloadSpec) -> Vec<MemoryRequestDto> {
    let mut rng = StdRng::seed_from_u64(spec.seed.wrapping_add(1));
    let mut requests = Vec::with_capacity(processes.len());
    let mut to_free = Vec::new();

    for process in processes {
        let size = rng.random_range(1..=spec.max_request.max(1));
        requests.push(MemoryRequestDto { pid: process.pid, size: Some(size), action: "allocate".to_string() });

        if rng.random_bool(1.0 / 3.0) {
            to_free.push(process.pid);
        }
        if to_free.len() > 2 {
            let pid = to_free.remove(0);
            requests.push(MemoryRequestDto { pid, size: None, action: "free".to_string() });
        }
    }

    requests
}
