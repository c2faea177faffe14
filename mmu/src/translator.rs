use std::sync::{Arc, Mutex, MutexGuard};

use memory::PhysicalMemory;

use crate::event::{EventSink, NullSink, PagingEvent};
use crate::frame_allocator::{FrameAllocator, LoadOutcome};
use crate::page_table::PageTable;
use crate::replacement::{Fifo, ReplacementPolicy};
use crate::MmuError;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PagingStats {
    pub translations: u64,
    pub hits: u64,
    pub cold_faults: u64,
    pub evictions: u64,
}

impl PagingStats {
    pub fn faults(&self) -> u64 {
        self.cold_faults + self.evictions
    }

    fn record_load(&mut self, outcome: LoadOutcome) {
        match outcome {
            LoadOutcome::Cold { .. } => self.cold_faults += 1,
            LoadOutcome::Evicted { .. } => self.evictions += 1,
        }
    }
}

/// Paging unit: owns the page table and physical memory and translates
/// logical addresses, loading pages on demand.
///
/// Offsets are bounded by `PAGE_SIZE`; frames are `FRAME_SIZE` apart in the
/// physical address space.
pub struct Mmu<
    const PAGE_SIZE: usize,
    const FRAME_SIZE: usize,
    const NUM_PAGES: usize,
    const NUM_FRAMES: usize,
> {
    page_table: PageTable<NUM_PAGES>,
    memory: PhysicalMemory<NUM_FRAMES>,
    allocator: FrameAllocator,
    sink: Box<dyn EventSink>,
    stats: PagingStats,
}

impl<const PAGE_SIZE: usize, const FRAME_SIZE: usize, const NUM_PAGES: usize, const NUM_FRAMES: usize>
    Mmu<PAGE_SIZE, FRAME_SIZE, NUM_PAGES, NUM_FRAMES>
{
    pub fn init(policy: Box<dyn ReplacementPolicy>, sink: Box<dyn EventSink>) -> Self {
        assert!(PAGE_SIZE > 0, "Page size must not be zero");
        assert!(
            PAGE_SIZE <= FRAME_SIZE,
            "Page size {} does not fit in frame size {}",
            PAGE_SIZE,
            FRAME_SIZE
        );
        log::debug!(
            "paging unit: {} pages of {} bytes, {} frames of {} bytes, {} replacement",
            NUM_PAGES,
            PAGE_SIZE,
            NUM_FRAMES,
            FRAME_SIZE,
            policy.name()
        );
        Self {
            page_table: PageTable::init(),
            memory: PhysicalMemory::init(),
            allocator: FrameAllocator::init(policy),
            sink,
            stats: PagingStats::default(),
        }
    }

    pub const fn address_space() -> usize {
        NUM_PAGES * PAGE_SIZE
    }

    /// Splits a logical address into `(page number, offset)`.
    pub fn split(logical_address: i64) -> Result<(usize, usize), MmuError> {
        let address = usize::try_from(logical_address)
            .ok()
            .filter(|&address| address < Self::address_space())
            .ok_or(MmuError::AddressOutOfRange(logical_address))?;
        Ok((address / PAGE_SIZE, address % PAGE_SIZE))
    }

    pub fn translate(&mut self, logical_address: i64) -> Result<usize, MmuError> {
        let (page_number, offset) = Self::split(logical_address)?;

        let frame = match self.page_table.lookup(page_number)? {
            Some(frame) => {
                log::trace!("page {} hit in frame {}", page_number, frame);
                self.allocator.touch(frame);
                self.stats.hits += 1;
                frame
            }
            None => {
                self.load_page(page_number)?;
                self.page_table.lookup(page_number)?.ok_or_else(|| {
                    MmuError::InconsistentState(format!(
                        "page {} unmapped right after loading",
                        page_number
                    ))
                })?
            }
        };

        let physical_address = frame * FRAME_SIZE + offset;
        self.stats.translations += 1;
        self.sink.notify(PagingEvent::TranslationResult {
            logical_address: page_number * PAGE_SIZE + offset,
            page_number,
            offset,
            physical_address,
        });
        Ok(physical_address)
    }

    /// Brings `page_number` into memory and returns its frame. Fails with
    /// `AlreadyResident` when the page is mapped already.
    pub fn load_page(&mut self, page_number: usize) -> Result<usize, MmuError> {
        let outcome = self.allocator.load_page(
            page_number,
            &mut self.page_table,
            &mut self.memory,
            self.sink.as_mut(),
        )?;
        self.stats.record_load(outcome);
        Ok(outcome.frame())
    }

    pub fn frame_of(&self, page_number: usize) -> Result<Option<usize>, MmuError> {
        self.page_table.lookup(page_number)
    }

    pub fn occupant(&self, frame: usize) -> Result<Option<usize>, MmuError> {
        Ok(self.memory.occupant(frame)?)
    }

    pub fn page_table(&self) -> &PageTable<NUM_PAGES> {
        &self.page_table
    }

    pub fn memory(&self) -> &PhysicalMemory<NUM_FRAMES> {
        &self.memory
    }

    pub fn stats(&self) -> PagingStats {
        self.stats
    }

    pub fn policy_name(&self) -> &'static str {
        self.allocator.policy_name()
    }

    /// Checks that every resident page sits in the frame the table records and
    /// that every occupied frame is mapped back by the table.
    pub fn check_consistency(&self) -> Result<(), MmuError> {
        for (page, frame) in self.page_table.iter() {
            match self.memory.occupant(frame) {
                Ok(Some(occupant)) if occupant == page => {}
                Ok(occupant) => {
                    return Err(MmuError::InconsistentState(format!(
                        "page {} maps to frame {} which holds {:?}",
                        page, frame, occupant
                    )))
                }
                Err(_) => {
                    return Err(MmuError::InconsistentState(format!(
                        "page {} maps to missing frame {}",
                        page, frame
                    )))
                }
            }
        }
        for (frame, occupant) in self.memory.iter() {
            if let Some(page) = occupant {
                if self.page_table.lookup(page)? != Some(frame) {
                    return Err(MmuError::InconsistentState(format!(
                        "frame {} holds page {} which the table does not map there",
                        frame, page
                    )));
                }
            }
        }
        Ok(())
    }
}

impl<const PAGE_SIZE: usize, const FRAME_SIZE: usize, const NUM_PAGES: usize, const NUM_FRAMES: usize>
    Default for Mmu<PAGE_SIZE, FRAME_SIZE, NUM_PAGES, NUM_FRAMES>
{
    fn default() -> Self {
        Self::init(Box::new(Fifo::default()), Box::new(NullSink))
    }
}

/// Cloneable handle to one `Mmu`. A single lock covers the page table,
/// physical memory, policy and sink, so loads and evictions are atomic to
/// every holder of the handle.
pub struct SharedMmu<
    const PAGE_SIZE: usize,
    const FRAME_SIZE: usize,
    const NUM_PAGES: usize,
    const NUM_FRAMES: usize,
> {
    inner: Arc<Mutex<Mmu<PAGE_SIZE, FRAME_SIZE, NUM_PAGES, NUM_FRAMES>>>,
}

impl<const PAGE_SIZE: usize, const FRAME_SIZE: usize, const NUM_PAGES: usize, const NUM_FRAMES: usize>
    Clone for SharedMmu<PAGE_SIZE, FRAME_SIZE, NUM_PAGES, NUM_FRAMES>
{
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<const PAGE_SIZE: usize, const FRAME_SIZE: usize, const NUM_PAGES: usize, const NUM_FRAMES: usize>
    SharedMmu<PAGE_SIZE, FRAME_SIZE, NUM_PAGES, NUM_FRAMES>
{
    pub fn new(mmu: Mmu<PAGE_SIZE, FRAME_SIZE, NUM_PAGES, NUM_FRAMES>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(mmu)),
        }
    }

    fn lock(
        &self,
    ) -> Result<MutexGuard<'_, Mmu<PAGE_SIZE, FRAME_SIZE, NUM_PAGES, NUM_FRAMES>>, MmuError> {
        self.inner.lock().map_err(|_| MmuError::Poisoned)
    }

    pub fn translate(&self, logical_address: i64) -> Result<usize, MmuError> {
        self.lock()?.translate(logical_address)
    }

    pub fn load_page(&self, page_number: usize) -> Result<usize, MmuError> {
        self.lock()?.load_page(page_number)
    }

    pub fn stats(&self) -> Result<PagingStats, MmuError> {
        Ok(self.lock()?.stats())
    }

    pub fn check_consistency(&self) -> Result<(), MmuError> {
        self.lock()?.check_consistency()
    }

    /// Runs `f` with exclusive access to the paging unit.
    pub fn with<R>(
        &self,
        f: impl FnOnce(&mut Mmu<PAGE_SIZE, FRAME_SIZE, NUM_PAGES, NUM_FRAMES>) -> R,
    ) -> Result<R, MmuError> {
        let mut mmu = self.lock()?;
        Ok(f(&mut *mmu))
    }
}
