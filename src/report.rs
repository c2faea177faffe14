use mmu::{EventSink, PagingEvent, PagingStats};

pub fn format_event(event: &PagingEvent) -> String {
    match *event {
        PagingEvent::ColdFault { page, frame } => {
            format!("Page {} loaded into frame {}", page, frame)
        }
        PagingEvent::EvictionFault {
            evicted_page,
            new_page,
            frame,
        } => format!(
            "Page fault occurred. Evicting page {} from frame {} to load page {}",
            evicted_page, frame, new_page
        ),
        PagingEvent::TranslationResult {
            logical_address,
            page_number,
            offset,
            physical_address,
        } => format!(
            "Logical Address: 0x{:04x} => Page Number: 0x{:02x}  Offset: 0x{:02x}  Physical Address: 0x{:04x}",
            logical_address, page_number, offset, physical_address
        ),
    }
}

pub fn format_stats(stats: &PagingStats) -> String {
    format!(
        "{} translations, {} hits, {} cold faults, {} evictions",
        stats.translations, stats.hits, stats.cold_faults, stats.evictions
    )
}

/// Writes every paging event to the `log` facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl EventSink for LogSink {
    fn notify(&mut self, event: PagingEvent) {
        log::info!("{}", format_event(&event));
    }
}
