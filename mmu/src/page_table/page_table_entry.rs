/// This table maps a logical page to the frame in physical memory holding it
/// Each entry represent a map from page ---> frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageTableEntry {
    frame_number: usize,
}

impl PageTableEntry {
    pub(super) fn resident_in(frame_number: usize) -> Self {
        PageTableEntry { frame_number }
    }

    pub fn get_frame_number(&self) -> usize {
        self.frame_number
    }

    pub(super) fn set_frame_number(&mut self, frame_number: usize) {
        self.frame_number = frame_number;
    }
}
