//! Paging unit: page table, frame allocation with replacement, and
//! logical-to-physical address translation.

mod error;
pub mod event;
pub mod frame_allocator;
pub mod page_table;
pub mod replacement;
pub mod translator;

pub use error::MmuError;
pub use event::{EventLog, EventSink, NullSink, PagingEvent};
pub use frame_allocator::{FrameAllocator, LoadOutcome};
pub use page_table::{PageTable, PageTableEntry, PageTableIterator};
pub use replacement::{Fifo, Lru, PolicyKind, ReplacementPolicy, RoundRobin, UnknownPolicy};
pub use translator::{Mmu, PagingStats, SharedMmu};

pub use memory::{MemoryError, PhysicalMemory};
