use std::fmt;

use memory::MemoryError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MmuError {
    InvalidPageNumber(usize),
    AddressOutOfRange(i64),
    /// The page was asked to load while the table already maps it.
    AlreadyResident { page: usize, frame: usize },
    /// The replacement policy could not name an occupied frame to evict.
    EvictionPolicyError,
    InconsistentState(String),
    Poisoned,
    Memory(MemoryError),
}

impl fmt::Display for MmuError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MmuError::InvalidPageNumber(page) => write!(f, "Invalid Page Number: {}", page),
            MmuError::AddressOutOfRange(address) => {
                write!(f, "logical address {} is out of range", address)
            }
            MmuError::AlreadyResident { page, frame } => {
                write!(f, "page {} is already resident in frame {}", page, frame)
            }
            MmuError::EvictionPolicyError => write!(f, "replacement policy found no victim frame"),
            MmuError::InconsistentState(reason) => write!(f, "inconsistent paging state: {}", reason),
            MmuError::Poisoned => write!(f, "paging unit lock poisoned"),
            MmuError::Memory(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for MmuError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MmuError::Memory(err) => Some(err),
            _ => None,
        }
    }
}

impl From<MemoryError> for MmuError {
    fn from(err: MemoryError) -> Self {
        MmuError::Memory(err)
    }
}
