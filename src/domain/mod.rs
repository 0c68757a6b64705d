pub mod memory;
pub mod metrics;
pub mod process;
pub mod scheduler;
pub mod workload;
