use serde::Serialize;
use std::collections::VecDeque;

use crate::domain::process::{ProcessRecord, Ticks};
use crate::domain::scheduler::event::{RunSlice, SchedulerEvent};
use crate::domain::scheduler::policy::SchedulingPolicy;
use crate::domain::scheduler::ready_queue::{ReadyQueue, Slot};
use crate::error::Result;

#[derive(Debug, Clone, Copy)]
struct Running {
    slot: Slot,
    slice_start: Ticks,
    slice_used: Ticks,
}

/// Everything a finished simulation produced.
#[derive(Debug, Clone, Serialize)]
pub struct SimulationOutcome {
    pub policy: SchedulingPolicy,

    /// Finished records in completion order.
    pub completed: Vec<ProcessRecord>,

    /// Every dispatch in chronological order.
    pub timeline: Vec<RunSlice>,

    pub context_switches: usize,
    pub idle_ticks: Ticks,
}

/// Discrete-time CPU scheduler.
///
/// Records live in an arena owned by the engine; the pending list, ready queue
/// and completed list only hold arena slots. A record is mutated by exactly one
/// place at a time: while it sits in the ready queue nothing touches it, while
/// it is running only [`SchedulerEngine::step`] charges it.
#[derive(Debug)]
pub struct SchedulerEngine {
    policy: SchedulingPolicy,
    context_switch: Ticks,
    now: Ticks,
    processes: Vec<ProcessRecord>,
    pending: VecDeque<Slot>,
    ready: ReadyQueue,
    running: Option<Running>,
    last_dispatched: Option<Slot>,
    completed: Vec<Slot>,
    timeline: Vec<RunSlice>,
    context_switches: usize,
    idle_ticks: Ticks,
}

impl SchedulerEngine {
    /// Creates an engine for one run. Fails before any tick if the policy
    /// parameters are invalid.
    pub fn new(processes: Vec<ProcessRecord>, policy: SchedulingPolicy, context_switch: Ticks) -> Result<Self> {
        policy.validate()?;

        let mut pending: Vec<Slot> = (0..processes.len()).collect();
        pending.sort_by_key(|&slot| (processes[slot].arrival, processes[slot].pid));

        log::debug!("Scheduler engine created: policy {}, {} processes, context switch {}.", policy, processes.len(), context_switch);

        Ok(SchedulerEngine {
            ready: ReadyQueue::for_policy(&policy),
            policy,
            context_switch,
            now: 0,
            processes,
            pending: pending.into(),
            running: None,
            last_dispatched: None,
            completed: Vec::new(),
            timeline: Vec::new(),
            context_switches: 0,
            idle_ticks: 0,
        })
    }

    pub fn now(&self) -> Ticks {
        self.now
    }

    pub fn is_done(&self) -> bool {
        self.pending.is_empty() && self.ready.is_empty() && self.running.is_none()
    }

    pub fn processes(&self) -> &[ProcessRecord] {
        &self.processes
    }

    /// Advances the simulation by one step.
    ///
    /// Under round-robin a step charges a single tick. The non-preemptive
    /// policies charge the whole remaining burst in one step, and an idle CPU
    /// jumps straight to the next arrival; both yield the same timings as
    /// stepping tick by tick.
    pub fn step(&mut self) -> Vec<SchedulerEvent> {
        let mut events = Vec::new();
        if self.is_done() {
            return events;
        }

        self.admit_arrivals(&mut events);

        if self.running.is_none() {
            match self.ready.pop() {
                Some(slot) => self.dispatch(slot, &mut events),
                None => {
                    if let Some(&next) = self.pending.front() {
                        let until = self.processes[next].arrival;
                        events.push(SchedulerEvent::Idle { from: self.now, until });
                        self.idle_ticks += until - self.now;
                        self.now = until;
                    }
                    self.debug_check(None);
                    return events;
                }
            }
        }

        let charged = self.charge(&mut events);
        self.debug_check(charged);
        events
    }

    /// Runs until every process has finished.
    pub fn run(mut self) -> SimulationOutcome {
        while !self.is_done() {
            let _ = self.step();
        }
        self.into_outcome()
    }

    fn into_outcome(self) -> SimulationOutcome {
        let SchedulerEngine { policy, processes, completed, timeline, context_switches, idle_ticks, .. } = self;
        let completed = completed.into_iter().map(|slot| processes[slot].clone()).collect();

        SimulationOutcome { policy, completed, timeline, context_switches, idle_ticks }
    }

    fn admit_arrivals(&mut self, events: &mut Vec<SchedulerEvent>) {
        while let Some(&slot) = self.pending.front() {
            let process = &self.processes[slot];
            if process.arrival > self.now {
                break;
            }
            let _ = self.pending.pop_front();
            events.push(SchedulerEvent::Arrived { pid: process.pid, at: process.arrival });
            self.ready.push(slot, self.policy.selection_key(process));
        }
    }

    fn dispatch(&mut self, slot: Slot, events: &mut Vec<SchedulerEvent>) {
        if let Some(previous) = self.last_dispatched {
            if previous != slot && self.context_switch > 0 {
                self.now += self.context_switch;
                self.context_switches += 1;
                events.push(SchedulerEvent::ContextSwitch {
                    from: self.processes[previous].pid,
                    to: self.processes[slot].pid,
                    cost: self.context_switch,
                });
            }
        }

        let process = &mut self.processes[slot];
        if process.start.is_none() {
            process.start = Some(self.now);
        }
        log::trace!("t={} dispatch pid {} (remaining {})", self.now, process.pid, process.remaining);
        events.push(SchedulerEvent::Dispatched { pid: process.pid, at: self.now });

        self.running = Some(Running { slot, slice_start: self.now, slice_used: 0 });
        self.last_dispatched = Some(slot);
    }

    /// Charges the running process and returns its slot.
    fn charge(&mut self, events: &mut Vec<SchedulerEvent>) -> Option<Slot> {
        let mut running = self.running.take()?;

        let time_slice = self.policy.time_slice();
        let process = &mut self.processes[running.slot];
        debug_assert!(process.remaining > 0, "Running process {} has no remaining service", process.pid);

        let burst = if self.policy.is_preemptive() { 1 } else { process.remaining };
        self.now += burst;
        process.remaining -= burst;
        running.slice_used += burst;

        let pid = process.pid;
        if process.remaining == 0 {
            process.finish = Some(self.now);
            log::trace!("t={} pid {} completed", self.now, pid);
            events.push(SchedulerEvent::Completed { pid, at: self.now });
            self.timeline.push(RunSlice { pid, start: running.slice_start, end: self.now });
            self.completed.push(running.slot);
        } else if Some(running.slice_used) == time_slice {
            let remaining = process.remaining;
            log::trace!("t={} pid {} preempted (remaining {})", self.now, pid, remaining);
            self.timeline.push(RunSlice { pid, start: running.slice_start, end: self.now });

            // Arrivals up to this tick queue ahead of the preempted process.
            self.admit_arrivals(events);
            let key = self.policy.selection_key(&self.processes[running.slot]);
            self.ready.push(running.slot, key);
            events.push(SchedulerEvent::Preempted { pid, at: self.now, remaining });
        } else {
            self.running = Some(running);
        }
        Some(running.slot)
    }

    /// Only the slot charged in this step can have changed.
    fn debug_check(&self, charged: Option<Slot>) {
        if !cfg!(debug_assertions) {
            return;
        }
        let Some(slot) = charged else {
            return;
        };
        let process = &self.processes[slot];
        debug_assert!(process.remaining <= process.service, "pid {} remaining exceeds service", process.pid);
        if let Some(start) = process.start {
            debug_assert!(start >= process.arrival, "pid {} started before arrival", process.pid);
        }
        if process.is_finished() {
            if let (Some(start), Some(finish)) = (process.start, process.finish) {
                debug_assert!(finish >= start + process.service, "pid {} finished too early", process.pid);
            }
            debug_assert!(!self.ready.contains(slot), "Completed pid {} still present in ready queue", process.pid);
        }
        if let Some(running) = self.running {
            debug_assert!(!self.ready.contains(running.slot), "Running pid {} must not appear in the ready queue", self.processes[running.slot].pid);
        }
    }
}

/// Runs one complete simulation and returns the finished records in completion order.
pub fn simulate(processes: Vec<ProcessRecord>, policy: SchedulingPolicy, context_switch: Ticks) -> Result<Vec<ProcessRecord>> {
    Ok(SchedulerEngine::new(processes, policy, context_switch)?.run().completed)
}
