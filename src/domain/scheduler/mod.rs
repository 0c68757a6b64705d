pub mod engine;
pub mod event;
pub mod policy;
pub mod ready_queue;

pub use engine::{SchedulerEngine, SimulationOutcome, simulate};
pub use event::{RunSlice, SchedulerEvent};
pub use policy::{PolicyKind, SchedulingPolicy};
