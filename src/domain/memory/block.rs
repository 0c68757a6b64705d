use serde::Serialize;

use crate::domain::process::Pid;

pub type Address = u64;

/// A contiguous range `[start, start + size)` of the managed memory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MemoryBlock {
    pub start: Address,
    pub size: u64,

    /// Set iff the block is allocated.
    pub owner: Option<Pid>,
}

impl MemoryBlock {
    pub fn free(start: Address, size: u64) -> Self {
        MemoryBlock { start, size, owner: None }
    }

    pub fn allocated(start: Address, size: u64, owner: Pid) -> Self {
        MemoryBlock { start, size, owner: Some(owner) }
    }

    pub fn is_free(&self) -> bool {
        self.owner.is_none()
    }

    /// First address after the block.
    pub fn end(&self) -> Address {
        self.start + self.size
    }

    pub fn fits(&self, requested_size: u64) -> bool {
        self.is_free() && self.size >= requested_size
    }
}

/// Placement returned for a successful allocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Allocation {
    pub block_start: Address,
    pub block_size: u64,
}
