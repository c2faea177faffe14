use std::collections::VecDeque;
use std::fmt;
use std::str::FromStr;

/// Chooses which occupied frame gives way when physical memory is full.
///
/// The allocator reports every placement (`loaded`), every hit (`accessed`)
/// and every eviction (`evicted`). `victim` must not change the policy state:
/// the allocator only commits an eviction after validating the answer.
pub trait ReplacementPolicy: Send {
    fn loaded(&mut self, frame: usize);

    fn accessed(&mut self, _frame: usize) {}

    fn evicted(&mut self, _frame: usize) {}

    fn victim(&self, num_frames: usize) -> Option<usize>;

    fn name(&self) -> &'static str;
}

/// Evicts frames in the order their current pages were loaded.
#[derive(Debug, Default, Clone)]
pub struct Fifo {
    queue: VecDeque<usize>,
}

impl ReplacementPolicy for Fifo {
    fn loaded(&mut self, frame: usize) {
        self.queue.retain(|&queued| queued != frame);
        self.queue.push_back(frame);
    }

    fn evicted(&mut self, frame: usize) {
        self.queue.retain(|&queued| queued != frame);
    }

    fn victim(&self, num_frames: usize) -> Option<usize> {
        self.queue.iter().copied().find(|&frame| frame < num_frames)
    }

    fn name(&self) -> &'static str {
        "fifo"
    }
}

/// Evicts the frame touched longest ago, measured by a logical clock.
#[derive(Debug, Default, Clone)]
pub struct Lru {
    clock: u64,
    stamps: Vec<Option<u64>>,
}

impl Lru {
    fn stamp(&mut self, frame: usize) {
        if frame >= self.stamps.len() {
            self.stamps.resize(frame + 1, None);
        }
        self.clock += 1;
        self.stamps[frame] = Some(self.clock);
    }
}

impl ReplacementPolicy for Lru {
    fn loaded(&mut self, frame: usize) {
        self.stamp(frame);
    }

    fn accessed(&mut self, frame: usize) {
        self.stamp(frame);
    }

    fn evicted(&mut self, frame: usize) {
        if let Some(stamp) = self.stamps.get_mut(frame) {
            *stamp = None;
        }
    }

    fn victim(&self, num_frames: usize) -> Option<usize> {
        self.stamps
            .iter()
            .take(num_frames)
            .enumerate()
            .filter_map(|(frame, stamp)| stamp.map(|stamp| (frame, stamp)))
            .min_by_key(|&(_, stamp)| stamp)
            .map(|(frame, _)| frame)
    }

    fn name(&self) -> &'static str {
        "lru"
    }
}

/// Sweeps a hand over the frames in ascending order.
#[derive(Debug, Default, Clone)]
pub struct RoundRobin {
    hand: usize,
}

impl ReplacementPolicy for RoundRobin {
    fn loaded(&mut self, _frame: usize) {}

    fn evicted(&mut self, frame: usize) {
        self.hand = frame + 1;
    }

    fn victim(&self, num_frames: usize) -> Option<usize> {
        if num_frames == 0 {
            return None;
        }
        Some(self.hand % num_frames)
    }

    fn name(&self) -> &'static str {
        "round-robin"
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PolicyKind {
    #[default]
    Fifo,
    Lru,
    RoundRobin,
}

impl PolicyKind {
    pub fn build(self) -> Box<dyn ReplacementPolicy> {
        match self {
            PolicyKind::Fifo => Box::new(Fifo::default()),
            PolicyKind::Lru => Box::new(Lru::default()),
            PolicyKind::RoundRobin => Box::new(RoundRobin::default()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownPolicy(pub String);

impl fmt::Display for UnknownPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown replacement policy '{}' (expected fifo, lru or round-robin)",
            self.0
        )
    }
}

impl std::error::Error for UnknownPolicy {}

impl FromStr for PolicyKind {
    type Err = UnknownPolicy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "fifo" => Ok(PolicyKind::Fifo),
            "lru" => Ok(PolicyKind::Lru),
            "round-robin" | "roundrobin" | "rr" => Ok(PolicyKind::RoundRobin),
            _ => Err(UnknownPolicy(s.to_string())),
        }
    }
}
