pub mod allocator;
pub mod block;
pub mod requests;
pub mod strategy;

pub use allocator::LinearAllocator;
pub use block::{Address, Allocation, MemoryBlock};
pub use requests::{AllocationOutcome, MemoryRequest, RequestResult, process_requests};
pub use strategy::AllocationStrategy;
