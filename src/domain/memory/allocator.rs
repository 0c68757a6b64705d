use crate::domain::memory::block::{Address, Allocation, MemoryBlock};
use crate::domain::memory::strategy::AllocationStrategy;
use crate::domain::process::Pid;
use crate::error::{InputError, Result};

/// Contiguous memory of a fixed size, managed as an ordered list of blocks.
///
/// The block list always covers `[0, total_size)` without gaps or overlaps,
/// sorted by start address. After every [`LinearAllocator::free`] no two
/// neighbouring blocks are both free.
#[derive(Debug, Clone)]
pub struct LinearAllocator {
    total_size: u64,
    blocks: Vec<MemoryBlock>,
}

impl LinearAllocator {
    /// Creates an allocator with a single free block spanning the whole range.
    pub fn new(total_size: u64) -> Result<Self> {
        if total_size == 0 {
            return Err(InputError::InvalidMemorySize(0).into());
        }
        Ok(LinearAllocator { total_size, blocks: vec![MemoryBlock::free(0, total_size)] })
    }

    pub fn total_size(&self) -> u64 {
        self.total_size
    }

    pub fn blocks(&self) -> &[MemoryBlock] {
        &self.blocks
    }

    /// Places `requested_size` units for `pid`.
    ///
    /// Returns `None` when no free block is large enough; the block list is
    /// left untouched in that case. An exact fit is taken in place, otherwise
    /// the chosen block is split into the allocation and a free remainder
    /// directly behind it.
    pub fn allocate(&mut self, pid: Pid, requested_size: u64, strategy: AllocationStrategy) -> Option<Allocation> {
        if requested_size == 0 {
            log::warn!("Ignoring empty allocation request of pid {}.", pid);
            return None;
        }

        let Some(index) = strategy.select(&self.blocks, requested_size) else {
            log::debug!("No free block of size >= {} for pid {} ({}).", requested_size, pid, strategy);
            return None;
        };

        let block = &mut self.blocks[index];
        let block_start = block.start;

        if block.size == requested_size {
            block.owner = Some(pid);
        } else {
            let remainder = MemoryBlock::free(block.start + requested_size, block.size - requested_size);
            *block = MemoryBlock::allocated(block_start, requested_size, pid);
            self.blocks.insert(index + 1, remainder);
        }

        log::debug!("pid {} allocated [{}, {}) using {}.", pid, block_start, block_start + requested_size, strategy);
        self.debug_check();

        Some(Allocation { block_start, block_size: requested_size })
    }

    /// Releases every block owned by `pid` and merges adjacent free blocks.
    ///
    /// Returns `false` if `pid` owned nothing.
    pub fn free(&mut self, pid: Pid) -> bool {
        let mut changed = false;
        for block in self.blocks.iter_mut().filter(|block| block.owner == Some(pid)) {
            block.owner = None;
            changed = true;
        }

        if !changed {
            log::debug!("pid {} owns no memory, nothing to free.", pid);
            return false;
        }

        self.coalesce();
        log::debug!("pid {} released its memory, {} blocks remain.", pid, self.blocks.len());
        self.debug_check();
        true
    }

    /// Merges every run of neighbouring free blocks into its first block.
    fn coalesce(&mut self) {
        let mut index = 0;
        while index + 1 < self.blocks.len() {
            if self.blocks[index].is_free() && self.blocks[index + 1].is_free() {
                let next = self.blocks.remove(index + 1);
                self.blocks[index].size += next.size;
            } else {
                index += 1;
            }
        }
    }

    /// Units currently allocated to `pid`.
    pub fn owned_by(&self, pid: Pid) -> u64 {
        self.blocks.iter().filter(|block| block.owner == Some(pid)).map(|block| block.size).sum()
    }

    pub fn free_space(&self) -> u64 {
        self.blocks.iter().filter(|block| block.is_free()).map(|block| block.size).sum()
    }

    pub fn largest_free_block(&self) -> Option<&MemoryBlock> {
        self.blocks.iter().filter(|block| block.is_free()).max_by_key(|block| block.size)
    }

    /// External fragmentation: `1 - largest_free / total_free`.
    ///
    /// **0.0** means all free memory is one block (or nothing is free),
    /// values towards **1.0** mean the free memory is scattered in small pieces.
    pub fn fragmentation(&self) -> f64 {
        let free_space = self.free_space();
        match self.largest_free_block() {
            Some(largest) if free_space > 0 => 1.0 - (largest.size as f64 / free_space as f64),
            _ => 0.0,
        }
    }

    /// Verifies the block list layout. Any `Err` is a defect in the allocator.
    pub fn check_layout(&self) -> std::result::Result<(), String> {
        let mut expected_start: Address = 0;

        for (index, block) in self.blocks.iter().enumerate() {
            if block.size == 0 {
                return Err(format!("block {} at {} is empty", index, block.start));
            }
            if block.start != expected_start {
                return Err(format!("block {} starts at {}, expected {}", index, block.start, expected_start));
            }
            expected_start = block.end();
        }

        if expected_start != self.total_size {
            return Err(format!("blocks cover {} units, expected {}", expected_start, self.total_size));
        }

        Ok(())
    }

    /// Returns `true` if no two neighbouring blocks are both free.
    pub fn is_coalesced(&self) -> bool {
        self.blocks.windows(2).all(|pair| !(pair[0].is_free() && pair[1].is_free()))
    }

    fn debug_check(&self) {
        if cfg!(debug_assertions) {
            if let Err(violation) = self.check_layout() {
                log::error!("Memory layout violated: {} --> Signals an error in the implementation.", violation);
                debug_assert!(false, "memory layout violated: {}", violation);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_leaves_free_remainder_behind_allocation() {
        let mut allocator = LinearAllocator::new(64).unwrap();
        let allocation = allocator.allocate(7, 24, AllocationStrategy::FirstFit).unwrap();

        assert_eq!(allocation, Allocation { block_start: 0, block_size: 24 });
        assert_eq!(allocator.blocks(), &[MemoryBlock::allocated(0, 24, 7), MemoryBlock::free(24, 40)]);
    }

    #[test]
    fn exact_fit_does_not_split() {
        let mut allocator = LinearAllocator::new(32).unwrap();
        allocator.allocate(1, 32, AllocationStrategy::BestFit).unwrap();

        assert_eq!(allocator.blocks().len(), 1);
        assert_eq!(allocator.free_space(), 0);
        assert!(allocator.allocate(2, 1, AllocationStrategy::FirstFit).is_none());
    }

    #[test]
    fn coalesce_merges_runs_on_both_sides() {
        let mut allocator = LinearAllocator::new(40).unwrap();
        for pid in 1..=4 {
            allocator.allocate(pid, 10, AllocationStrategy::FirstFit).unwrap();
        }

        assert!(allocator.free(1));
        assert!(allocator.free(3));
        assert_eq!(allocator.blocks().len(), 4);

        assert!(allocator.free(2));
        assert_eq!(allocator.blocks(), &[MemoryBlock::free(0, 30), MemoryBlock::allocated(30, 10, 4)]);
        assert!(allocator.is_coalesced());
    }

    #[test]
    fn zero_sized_memory_is_rejected() {
        assert!(LinearAllocator::new(0).is_err());
    }

    #[test]
    fn empty_request_is_not_placed() {
        let mut allocator = LinearAllocator::new(8).unwrap();
        assert!(allocator.allocate(1, 0, AllocationStrategy::FirstFit).is_none());
        assert_eq!(allocator.blocks().len(), 1);
    }
}
