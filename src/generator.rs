use rand::{rngs::StdRng, Rng, SeedableRng};

/// Uniform sampler of logical addresses in `[0, limit)`.
pub struct AddressGenerator {
    rng: StdRng,
    limit: usize,
}

impl AddressGenerator {
    pub fn new(limit: usize, seed: Option<u64>) -> Self {
        assert!(limit > 0, "Address space must not be empty");
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { rng, limit }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn next_address(&mut self) -> i64 {
        self.rng.gen_range(0..self.limit) as i64
    }
}

impl Iterator for AddressGenerator {
    type Item = i64;

    fn next(&mut self) -> Option<Self::Item> {
        Some(self.next_address())
    }
}
