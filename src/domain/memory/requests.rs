use serde::Serialize;

use crate::api::memory_dto::MemoryRequestDto;
use crate::domain::memory::allocator::LinearAllocator;
use crate::domain::memory::block::Allocation;
use crate::domain::memory::strategy::AllocationStrategy;
use crate::domain::process::Pid;
use crate::error::{InputError, ParameterError, Result};

/// One validated entry of a memory request batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MemoryRequest {
    Allocate { pid: Pid, size: u64 },
    Free { pid: Pid },
}

impl MemoryRequest {
    pub fn from_dto(dto: &MemoryRequestDto) -> Result<Self> {
        match dto.action.trim().to_ascii_lowercase().as_str() {
            "allocate" => {
                let size = dto.size.ok_or(InputError::MissingRequestSize(dto.pid))?;
                if size < 1 {
                    return Err(InputError::InvalidRequestSize { pid: dto.pid, size }.into());
                }
                Ok(MemoryRequest::Allocate { pid: dto.pid, size: size as u64 })
            }
            "free" => Ok(MemoryRequest::Free { pid: dto.pid }),
            _ => Err(ParameterError::UnknownAction(dto.action.clone()).into()),
        }
    }
}

/// Result of one request, reported inline so the batch continues after a miss.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RequestResult {
    Allocated(Allocation),
    NotFound,
    Freed,
    NothingToFree,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AllocationOutcome {
    pub request: MemoryRequest,
    pub result: RequestResult,
}

impl AllocationOutcome {
    pub fn allocation(&self) -> Option<Allocation> {
        match self.result {
            RequestResult::Allocated(allocation) => Some(allocation),
            _ => None,
        }
    }
}

pub fn ingest_requests(dtos: &[MemoryRequestDto]) -> Result<Vec<MemoryRequest>> {
    dtos.iter().map(MemoryRequest::from_dto).collect()
}

/// Applies `requests` in order. A request that finds no block does not abort the batch.
pub fn process_requests(allocator: &mut LinearAllocator, requests: &[MemoryRequest], strategy: AllocationStrategy) -> Vec<AllocationOutcome> {
    let outcomes: Vec<AllocationOutcome> = requests
        .iter()
        .map(|request| {
            let result = match *request {
                MemoryRequest::Allocate { pid, size } => match allocator.allocate(pid, size, strategy) {
                    Some(allocation) => RequestResult::Allocated(allocation),
                    None => RequestResult::NotFound,
                },
                MemoryRequest::Free { pid } => {
                    if allocator.free(pid) {
                        RequestResult::Freed
                    } else {
                        RequestResult::NothingToFree
                    }
                }
            };
            AllocationOutcome { request: *request, result }
        })
        .collect();

    let misses = outcomes.iter().filter(|outcome| outcome.result == RequestResult::NotFound).count();
    log::info!("Processed {} memory requests with {} ({} not found).", outcomes.len(), strategy, misses);

    outcomes
}
