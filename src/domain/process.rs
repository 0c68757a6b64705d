use serde::Serialize;
use std::collections::HashSet;

use crate::api::simulation_dto::ProcessDto;
use crate::error::{InputError, Result};

pub type Pid = u32;
pub type Ticks = u64;

/// Process control record driven by the scheduler engine.
///
/// `remaining`, `start` and `finish` are written only while a simulation runs.
/// Once `finish` is set the record is treated as immutable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProcessRecord {
    pub pid: Pid,

    /// Tick at which the process becomes eligible to run.
    pub arrival: Ticks,

    /// Total CPU ticks required.
    pub service: Ticks,

    /// CPU ticks still owed. Invariant: `remaining <= service`.
    pub remaining: Ticks,

    /// Tick of the first dispatch.
    pub start: Option<Ticks>,

    /// Tick of completion.
    pub finish: Option<Ticks>,
}

impl ProcessRecord {
    pub fn new(pid: Pid, arrival: Ticks, service: Ticks) -> Self {
        ProcessRecord { pid, arrival, service, remaining: service, start: None, finish: None }
    }

    pub fn is_finished(&self) -> bool {
        self.finish.is_some()
    }

    /// Converts a process descriptor, rejecting negative arrivals and empty service.
    pub fn from_dto(dto: &ProcessDto) -> Result<Self> {
        if dto.arrival < 0 {
            return Err(InputError::NegativeArrival { pid: dto.pid, arrival: dto.arrival }.into());
        }
        if dto.service < 1 {
            return Err(InputError::InvalidService { pid: dto.pid, service: dto.service }.into());
        }

        Ok(ProcessRecord::new(dto.pid, dto.arrival as Ticks, dto.service as Ticks))
    }
}

/// Builds the process list of one run. Fails on the first invalid descriptor or
/// repeated pid, so no partial list ever reaches the scheduler.
pub fn ingest_processes(dtos: &[ProcessDto]) -> Result<Vec<ProcessRecord>> {
    let mut seen: HashSet<Pid> = HashSet::with_capacity(dtos.len());
    let mut records = Vec::with_capacity(dtos.len());

    for dto in dtos {
        if !seen.insert(dto.pid) {
            return Err(InputError::DuplicatePid(dto.pid).into());
        }
        records.push(ProcessRecord::from_dto(dto)?);
    }

    log::debug!("Ingested {} processes.", records.len());
    Ok(records)
}
