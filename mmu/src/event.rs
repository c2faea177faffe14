use std::sync::{Arc, Mutex, MutexGuard};

/// Notifications emitted by the paging unit. Formatting is left to the sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PagingEvent {
    ColdFault {
        page: usize,
        frame: usize,
    },
    EvictionFault {
        evicted_page: usize,
        new_page: usize,
        frame: usize,
    },
    TranslationResult {
        logical_address: usize,
        page_number: usize,
        offset: usize,
        physical_address: usize,
    },
}

impl PagingEvent {
    pub fn is_fault(&self) -> bool {
        !matches!(self, PagingEvent::TranslationResult { .. })
    }
}

pub trait EventSink: Send {
    fn notify(&mut self, event: PagingEvent);
}

/// Drops every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl EventSink for NullSink {
    fn notify(&mut self, _event: PagingEvent) {}
}

impl EventSink for Vec<PagingEvent> {
    fn notify(&mut self, event: PagingEvent) {
        self.push(event);
    }
}

/// Recording sink whose clones share one buffer, so the events stay readable
/// after the sink has been handed to an `Mmu`.
#[derive(Debug, Default, Clone)]
pub struct EventLog {
    events: Arc<Mutex<Vec<PagingEvent>>>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<PagingEvent>> {
        match self.events.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    pub fn events(&self) -> Vec<PagingEvent> {
        self.lock().clone()
    }

    /// Returns the recorded events and empties the log.
    pub fn take(&self) -> Vec<PagingEvent> {
        std::mem::take(&mut *self.lock())
    }

    pub fn faults(&self) -> Vec<PagingEvent> {
        self.lock().iter().copied().filter(PagingEvent::is_fault).collect()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}

impl EventSink for EventLog {
    fn notify(&mut self, event: PagingEvent) {
        self.lock().push(event);
    }
}
