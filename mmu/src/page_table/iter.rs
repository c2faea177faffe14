use super::PageTableEntry;

/// Walks the resident mappings of a page table as `(page, frame)` pairs.
pub struct PageTableIterator<'a> {
    current: usize,
    entries: &'a [Option<PageTableEntry>],
}

impl<'a> PageTableIterator<'a> {
    pub(super) fn new(entries: &'a [Option<PageTableEntry>]) -> Self {
        Self {
            current: 0,
            entries,
        }
    }
}

impl<'a> Iterator for PageTableIterator<'a> {
    type Item = (usize, usize);

    fn next(&mut self) -> Option<Self::Item> {
        while self.current < self.entries.len() {
            let page_number = self.current;
            self.current += 1;
            if let Some(entry) = self.entries[page_number] {
                return Some((page_number, entry.get_frame_number()));
            }
        }
        None
    }
}
