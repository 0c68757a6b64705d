use std::cmp::Reverse;
use std::collections::{BinaryHeap, VecDeque};

use crate::domain::process::{Pid, Ticks};
use crate::domain::scheduler::policy::SchedulingPolicy;

/// Index of a process inside the engine's record arena.
pub type Slot = usize;

pub type SelectionKey = (Ticks, Ticks, Pid);

/// Ready processes waiting for the CPU.
///
/// FCFS and RR share a FIFO queue: processes are admitted in `(arrival, pid)`
/// order and preempted ones go to the back. SPN keeps a min-heap on the
/// policy's selection key.
#[derive(Debug)]
pub enum ReadyQueue {
    Fifo { slots: VecDeque<Slot> },
    Shortest { slots: BinaryHeap<Reverse<(SelectionKey, Slot)>> },
}

impl ReadyQueue {
    pub fn for_policy(policy: &SchedulingPolicy) -> Self {
        match policy {
            SchedulingPolicy::Spn => ReadyQueue::Shortest { slots: BinaryHeap::new() },
            SchedulingPolicy::Fcfs | SchedulingPolicy::RoundRobin { .. } => ReadyQueue::Fifo { slots: VecDeque::new() },
        }
    }

    pub fn push(&mut self, slot: Slot, key: SelectionKey) {
        match self {
            ReadyQueue::Fifo { slots } => slots.push_back(slot),
            ReadyQueue::Shortest { slots } => slots.push(Reverse((key, slot))),
        }
    }

    pub fn pop(&mut self) -> Option<Slot> {
        match self {
            ReadyQueue::Fifo { slots } => slots.pop_front(),
            ReadyQueue::Shortest { slots } => slots.pop().map(|Reverse((_, slot))| slot),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            ReadyQueue::Fifo { slots } => slots.len(),
            ReadyQueue::Shortest { slots } => slots.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, slot: Slot) -> bool {
        match self {
            ReadyQueue::Fifo { slots } => slots.contains(&slot),
            ReadyQueue::Shortest { slots } => slots.iter().any(|Reverse((_, s))| *s == slot),
        }
    }
}
