use memory::PhysicalMemory;

use crate::event::{EventSink, PagingEvent};
use crate::page_table::PageTable;
use crate::replacement::ReplacementPolicy;
use crate::MmuError;

/// What a page load had to do to make room.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    Cold { frame: usize },
    Evicted { frame: usize, evicted_page: usize },
}

impl LoadOutcome {
    pub fn frame(&self) -> usize {
        match *self {
            LoadOutcome::Cold { frame } | LoadOutcome::Evicted { frame, .. } => frame,
        }
    }
}

/// Places pages in physical memory, evicting through the replacement policy
/// once every frame is taken. Page table and physical memory are only
/// touched after all checks have passed.
pub struct FrameAllocator {
    policy: Box<dyn ReplacementPolicy>,
}

impl FrameAllocator {
    pub fn init(policy: Box<dyn ReplacementPolicy>) -> Self {
        Self { policy }
    }

    pub fn policy_name(&self) -> &'static str {
        self.policy.name()
    }

    /// Reports a hit on `frame` to the policy.
    pub fn touch(&mut self, frame: usize) {
        self.policy.accessed(frame);
    }

    pub fn load_page<const NUM_PAGES: usize, const NUM_FRAMES: usize>(
        &mut self,
        page_number: usize,
        page_table: &mut PageTable<NUM_PAGES>,
        memory: &mut PhysicalMemory<NUM_FRAMES>,
        sink: &mut dyn EventSink,
    ) -> Result<LoadOutcome, MmuError> {
        if let Some(frame) = page_table.lookup(page_number)? {
            return Err(MmuError::AlreadyResident {
                page: page_number,
                frame,
            });
        }

        if let Some(frame) = memory.find_empty() {
            memory.load(frame, page_number)?;
            page_table.bind(page_number, frame)?;
            self.policy.loaded(frame);
            log::debug!("page {} loaded into free frame {}", page_number, frame);
            sink.notify(PagingEvent::ColdFault {
                page: page_number,
                frame,
            });
            return Ok(LoadOutcome::Cold { frame });
        }

        log::debug!("No free frames, asking {} for a victim", self.policy.name());
        let frame = self
            .policy
            .victim(NUM_FRAMES)
            .ok_or(MmuError::EvictionPolicyError)?;
        let evicted_page = match memory.occupant(frame) {
            Ok(Some(page)) => page,
            Ok(None) | Err(_) => {
                log::debug!("{} proposed unusable victim frame {}", self.policy.name(), frame);
                return Err(MmuError::EvictionPolicyError);
            }
        };

        page_table.unbind(evicted_page)?;
        self.policy.evicted(frame);
        memory.load(frame, page_number)?;
        page_table.bind(page_number, frame)?;
        self.policy.loaded(frame);
        log::debug!(
            "page {} evicted from frame {} for page {}",
            evicted_page,
            frame,
            page_number
        );
        sink.notify(PagingEvent::EvictionFault {
            evicted_page,
            new_page: page_number,
            frame,
        });
        Ok(LoadOutcome::Evicted {
            frame,
            evicted_page,
        })
    }
}
