use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::domain::process::{Pid, ProcessRecord, Ticks};
use crate::error::{ParameterError, Result};

pub const MIN_QUANTUM: Ticks = 2;

/// Scheduling policy names as they appear in a config file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PolicyKind {
    Fcfs,
    Spn,
    RoundRobin,
}

impl PolicyKind {
    pub const ALL: [PolicyKind; 3] = [PolicyKind::Fcfs, PolicyKind::Spn, PolicyKind::RoundRobin];
}

impl FromStr for PolicyKind {
    type Err = ParameterError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "FCFS" => Ok(PolicyKind::Fcfs),
            "SPN" => Ok(PolicyKind::Spn),
            "RR" => Ok(PolicyKind::RoundRobin),
            _ => Err(ParameterError::UnknownPolicy(s.to_string())),
        }
    }
}

impl fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PolicyKind::Fcfs => write!(f, "FCFS"),
            PolicyKind::Spn => write!(f, "SPN"),
            PolicyKind::RoundRobin => write!(f, "RR"),
        }
    }
}

/// A validated scheduling policy. Only round-robin carries a quantum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SchedulingPolicy {
    /// **First-Come-First-Served**: FIFO by `(arrival, pid)`, runs to completion.
    Fcfs,
    /// **Shortest-Process-Next**: picks the smallest service time when the CPU frees up.
    /// Non-preemptive, a later and shorter arrival never interrupts the running process.
    Spn,
    /// **Round-Robin**: preemptive with a fixed quantum.
    RoundRobin { quantum: Ticks },
}

impl SchedulingPolicy {
    /// Builds a policy from its kind. The quantum is only checked for round-robin.
    pub fn new(kind: PolicyKind, quantum: i64) -> Result<Self> {
        match kind {
            PolicyKind::Fcfs => Ok(SchedulingPolicy::Fcfs),
            PolicyKind::Spn => Ok(SchedulingPolicy::Spn),
            PolicyKind::RoundRobin => {
                if quantum < MIN_QUANTUM as i64 {
                    return Err(ParameterError::InvalidQuantum(quantum).into());
                }
                Ok(SchedulingPolicy::RoundRobin { quantum: quantum as Ticks })
            }
        }
    }

    /// Parses a policy name such as `"rr"` together with its quantum.
    pub fn from_name(name: &str, quantum: i64) -> Result<Self> {
        let kind = name.parse::<PolicyKind>()?;
        Self::new(kind, quantum)
    }

    pub fn kind(&self) -> PolicyKind {
        match self {
            SchedulingPolicy::Fcfs => PolicyKind::Fcfs,
            SchedulingPolicy::Spn => PolicyKind::Spn,
            SchedulingPolicy::RoundRobin { .. } => PolicyKind::RoundRobin,
        }
    }

    /// Maximum ticks a process may run per dispatch. `None` means run to completion.
    pub fn time_slice(&self) -> Option<Ticks> {
        match self {
            SchedulingPolicy::RoundRobin { quantum } => Some(*quantum),
            _ => None,
        }
    }

    pub fn is_preemptive(&self) -> bool {
        self.time_slice().is_some()
    }

    /// Ordering key among ready processes. Lower keys are dispatched first.
    ///
    /// Arrival and pid always break ties, so the outcome never depends on the
    /// order in which the workload was listed.
    pub fn selection_key(&self, process: &ProcessRecord) -> (Ticks, Ticks, Pid) {
        match self {
            SchedulingPolicy::Spn => (process.service, process.arrival, process.pid),
            SchedulingPolicy::Fcfs | SchedulingPolicy::RoundRobin { .. } => (0, process.arrival, process.pid),
        }
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if let SchedulingPolicy::RoundRobin { quantum } = self {
            if *quantum < MIN_QUANTUM {
                return Err(ParameterError::InvalidQuantum(*quantum as i64).into());
            }
        }
        Ok(())
    }
}

impl fmt::Display for SchedulingPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchedulingPolicy::RoundRobin { quantum } => write!(f, "RR (quantum {})", quantum),
            other => write!(f, "{}", other.kind()),
        }
    }
}
