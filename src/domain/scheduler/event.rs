use serde::Serialize;

use crate::domain::process::{Pid, Ticks};

/// Observable state changes produced by one engine step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum SchedulerEvent {
    Arrived { pid: Pid, at: Ticks },
    Dispatched { pid: Pid, at: Ticks },
    ContextSwitch { from: Pid, to: Pid, cost: Ticks },
    Preempted { pid: Pid, at: Ticks, remaining: Ticks },
    Completed { pid: Pid, at: Ticks },
    // CPU idle with nothing ready, clock jumps to the next arrival
    Idle { from: Ticks, until: Ticks },
}

/// One uninterrupted stretch of CPU time given to a process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RunSlice {
    pub pid: Pid,
    pub start: Ticks,
    pub end: Ticks,
}

impl RunSlice {
    pub fn len(&self) -> Ticks {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.end == self.start
    }
}
