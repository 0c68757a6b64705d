use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::domain::memory::block::MemoryBlock;
use crate::error::ParameterError;

/// Block selection strategy of the linear allocator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum AllocationStrategy {
    /// First free block, in address order, that is large enough.
    FirstFit,
    /// Smallest free block that is large enough, lowest address on ties.
    BestFit,
}

impl AllocationStrategy {
    /// Returns the index of the block to allocate from, or `None` if no free block fits.
    pub fn select(&self, blocks: &[MemoryBlock], requested_size: u64) -> Option<usize> {
        let mut candidates = blocks.iter().enumerate().filter(|(_, block)| block.fits(requested_size));

        match self {
            AllocationStrategy::FirstFit => candidates.next().map(|(index, _)| index),
            // min_by_key keeps the first minimum, which is the lowest start.
            AllocationStrategy::BestFit => candidates.min_by_key(|(_, block)| block.size).map(|(index, _)| index),
        }
    }
}

impl FromStr for AllocationStrategy {
    type Err = ParameterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "first-fit" => Ok(AllocationStrategy::FirstFit),
            "best-fit" => Ok(AllocationStrategy::BestFit),
            _ => Err(ParameterError::UnknownStrategy(s.to_string())),
        }
    }
}

impl fmt::Display for AllocationStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AllocationStrategy::FirstFit => write!(f, "first-fit"),
            AllocationStrategy::BestFit => write!(f, "best-fit"),
        }
    }
}
