use thiserror::Error;

use crate::domain::process::Pid;

#[derive(Debug, Error)]
pub enum Error {
    #[error("File not found or could not be read: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse simulation config JSON: {0}")]
    DeserializationError(#[from] serde_json::Error),

    #[error("Failed to write CSV report: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(#[from] InputError),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(#[from] ParameterError),
}

/// Rejected workload data, detected while ingesting the configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InputError {
    #[error("duplicate pid {0} in process list")]
    DuplicatePid(Pid),

    #[error("process {pid} has negative arrival {arrival}")]
    NegativeArrival { pid: Pid, arrival: i64 },

    #[error("process {pid} has service {service}, must be at least 1")]
    InvalidService { pid: Pid, service: i64 },

    #[error("memory size {0} must be at least 1")]
    InvalidMemorySize(i64),

    #[error("memory request of pid {pid} has size {size}, must be at least 1")]
    InvalidRequestSize { pid: Pid, size: i64 },

    #[error("memory request of pid {0} is missing its size")]
    MissingRequestSize(Pid),
}

/// Rejected simulation parameters. Raised before any tick is simulated.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParameterError {
    #[error("unknown scheduling policy '{0}' (use FCFS | SPN | RR)")]
    UnknownPolicy(String),

    #[error("round-robin quantum {0} is invalid, must be at least 2")]
    InvalidQuantum(i64),

    #[error("context switch cost {0} must not be negative")]
    InvalidContextSwitch(i64),

    #[error("unknown memory strategy '{0}' (use first-fit | best-fit)")]
    UnknownStrategy(String),

    #[error("unknown memory request action '{0}' (use allocate | free)")]
    UnknownAction(String),
}

pub type Result<T> = std::result::Result<T, Error>;
