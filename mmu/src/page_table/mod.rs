mod iter;
mod page_table_entry;

pub use page_table_entry::PageTableEntry;

use crate::MmuError;

pub use self::iter::PageTableIterator;

/// Page number ---> frame mapping. Every entry starts out unmapped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageTable<const NUM_PAGES: usize> {
    entries: Vec<Option<PageTableEntry>>,
}

impl<const NUM_PAGES: usize> PageTable<NUM_PAGES> {
    pub fn init() -> Self {
        assert!(NUM_PAGES > 0, "Page table needs at least one page");
        let mut entries = Vec::with_capacity(NUM_PAGES);
        for _ in 0..NUM_PAGES {
            entries.push(None);
        }
        Self { entries }
    }

    fn check_page(&self, page_number: usize) -> Result<(), MmuError> {
        if page_number >= NUM_PAGES {
            return Err(MmuError::InvalidPageNumber(page_number));
        }
        Ok(())
    }

    fn get_entry(&self, page_number: usize) -> Option<PageTableEntry> {
        *self.entries.get(page_number)?
    }

    /// Frame holding `page_number`, or `None` when the page is unmapped.
    pub fn lookup(&self, page_number: usize) -> Result<Option<usize>, MmuError> {
        self.check_page(page_number)?;
        Ok(self
            .get_entry(page_number)
            .map(|entry| entry.get_frame_number()))
    }

    pub fn is_resident(&self, page_number: usize) -> bool {
        self.get_entry(page_number).is_some()
    }

    pub fn bind(&mut self, page_number: usize, frame_number: usize) -> Result<(), MmuError> {
        self.check_page(page_number)?;
        match self.entries[page_number].as_mut() {
            Some(entry) => entry.set_frame_number(frame_number),
            None => self.entries[page_number] = Some(PageTableEntry::resident_in(frame_number)),
        }
        Ok(())
    }

    pub fn unbind(&mut self, page_number: usize) -> Result<(), MmuError> {
        self.check_page(page_number)?;
        self.entries[page_number] = None;
        Ok(())
    }

    pub fn resident_count(&self) -> usize {
        self.entries.iter().filter(|entry| entry.is_some()).count()
    }

    pub fn iter(&self) -> PageTableIterator<'_> {
        PageTableIterator::new(&self.entries)
    }
}

impl<const NUM_PAGES: usize> Default for PageTable<NUM_PAGES> {
    fn default() -> Self {
        Self::init()
    }
}

#[cfg(test)]
mod tests {
    use crate::MmuError;

    use super::PageTable;

    #[test]
    fn starts_unmapped() {
        let table: PageTable<64> = PageTable::init();
        for page in 0..64 {
            assert_eq!(table.lookup(page), Ok(None));
        }
        assert_eq!(table.resident_count(), 0);
        assert_eq!(table.iter().count(), 0);
    }

    #[test]
    fn create_mapping() {
        let mut table: PageTable<64> = PageTable::init();
        table.bind(12, 43).unwrap();
        table.bind(4, 45).unwrap();
        assert_eq!(table.lookup(12), Ok(Some(43)));
        assert_eq!(table.lookup(4), Ok(Some(45)));

        table.bind(12, 49).unwrap();
        assert_eq!(table.lookup(12), Ok(Some(49)));
        assert_eq!(table.resident_count(), 2);
    }

    #[test]
    fn unbind_page() {
        let mut table: PageTable<8> = PageTable::init();
        table.bind(1, 3).unwrap();
        assert!(table.is_resident(1));
        table.unbind(1).unwrap();
        assert!(!table.is_resident(1));
        assert_eq!(table.lookup(1), Ok(None));
    }

    #[test]
    fn out_of_range_page() {
        let mut table: PageTable<8> = PageTable::init();
        assert_eq!(table.lookup(8), Err(MmuError::InvalidPageNumber(8)));
        assert_eq!(table.bind(8, 0), Err(MmuError::InvalidPageNumber(8)));
        assert_eq!(table.unbind(100), Err(MmuError::InvalidPageNumber(100)));
        assert_eq!(table.resident_count(), 0);
    }

    #[test]
    fn iterate_resident_pages() {
        let mut table: PageTable<16> = PageTable::init();
        table.bind(9, 0).unwrap();
        table.bind(2, 1).unwrap();
        table.bind(15, 2).unwrap();
        let mappings: Vec<_> = table.iter().collect();
        assert_eq!(mappings, vec![(2, 1), (9, 0), (15, 2)]);
    }
}
