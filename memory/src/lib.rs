use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemoryError {
    OverCapacity { frame: usize },
}

impl fmt::Display for MemoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MemoryError::OverCapacity { frame } => {
                write!(f, "frame {} is outside physical memory", frame)
            }
        }
    }
}

impl std::error::Error for MemoryError {}

/// Physical memory seen as an array of frame slots.
/// Each slot is either empty or holds the number of the page resident there.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhysicalMemory<const NUM_FRAMES: usize> {
    frames: [Option<usize>; NUM_FRAMES],
}

impl<const NUM_FRAMES: usize> PhysicalMemory<NUM_FRAMES> {
    pub fn init() -> Self {
        assert!(NUM_FRAMES > 0, "Physical memory needs at least one frame");
        Self {
            frames: [None; NUM_FRAMES],
        }
    }

    pub const fn capacity(&self) -> usize {
        NUM_FRAMES
    }

    pub fn check_frame(&self, frame: usize) -> Result<(), MemoryError> {
        if frame >= NUM_FRAMES {
            return Err(MemoryError::OverCapacity { frame });
        }
        Ok(())
    }

    /// Page currently held by `frame`, `None` when the frame is empty.
    pub fn occupant(&self, frame: usize) -> Result<Option<usize>, MemoryError> {
        self.check_frame(frame)?;
        Ok(self.frames[frame])
    }

    /// Places `page_number` in `frame` and returns the page it replaced.
    pub fn load(&mut self, frame: usize, page_number: usize) -> Result<Option<usize>, MemoryError> {
        self.check_frame(frame)?;
        log::trace!("frame {} <- page {}", frame, page_number);
        Ok(self.frames[frame].replace(page_number))
    }

    pub fn clear(&mut self, frame: usize) -> Result<Option<usize>, MemoryError> {
        self.check_frame(frame)?;
        Ok(self.frames[frame].take())
    }

    /// First empty frame in ascending order.
    pub fn find_empty(&self) -> Option<usize> {
        self.frames.iter().position(|slot| slot.is_none())
    }

    pub fn is_full(&self) -> bool {
        self.find_empty().is_none()
    }

    pub fn occupied(&self) -> usize {
        self.frames.iter().filter(|slot| slot.is_some()).count()
    }

    /// Frame that currently holds `page_number`, if any.
    pub fn frame_holding(&self, page_number: usize) -> Option<usize> {
        self.frames
            .iter()
            .position(|slot| *slot == Some(page_number))
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, Option<usize>)> + '_ {
        self.frames.iter().copied().enumerate()
    }
}

impl<const NUM_FRAMES: usize> Default for PhysicalMemory<NUM_FRAMES> {
    fn default() -> Self {
        Self::init()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_is_empty() {
        let mem = PhysicalMemory::<8>::init();
        assert_eq!(mem.capacity(), 8);
        assert_eq!(mem.occupied(), 0);
        assert_eq!(mem.find_empty(), Some(0));
        assert!(!mem.is_full());
        for (_, slot) in mem.iter() {
            assert_eq!(slot, None);
        }
    }

    #[test]
    fn test_load_and_read() {
        let mut mem = PhysicalMemory::<4>::init();
        assert_eq!(mem.load(2, 17).unwrap(), None);
        assert_eq!(mem.occupant(2).unwrap(), Some(17));
        assert_eq!(mem.frame_holding(17), Some(2));
        assert_eq!(mem.load(2, 5).unwrap(), Some(17));
        assert_eq!(mem.occupant(2).unwrap(), Some(5));
        assert_eq!(mem.frame_holding(17), None);
    }

    #[test]
    fn test_find_empty_scans_ascending() {
        let mut mem = PhysicalMemory::<3>::init();
        mem.load(0, 10).unwrap();
        mem.load(2, 12).unwrap();
        assert_eq!(mem.find_empty(), Some(1));
        mem.load(1, 11).unwrap();
        assert_eq!(mem.find_empty(), None);
        assert!(mem.is_full());
        assert_eq!(mem.clear(0).unwrap(), Some(10));
        assert_eq!(mem.find_empty(), Some(0));
    }

    #[test]
    fn test_invalid_frame() {
        let mut mem = PhysicalMemory::<4>::init();
        assert_eq!(mem.load(4, 1), Err(MemoryError::OverCapacity { frame: 4 }));
        assert_eq!(mem.occupant(9), Err(MemoryError::OverCapacity { frame: 9 }));
        assert_eq!(mem.clear(4), Err(MemoryError::OverCapacity { frame: 4 }));
        assert_eq!(mem.occupied(), 0);
    }
}
