use mmu::Mmu;

use crate::generator::AddressGenerator;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TrialSummary {
    pub translated: usize,
    pub rejected: usize,
}

/// Translates `trials` generated addresses. A rejected address is reported
/// and the run goes on.
pub fn run_trials<
    const PAGE_SIZE: usize,
    const FRAME_SIZE: usize,
    const NUM_PAGES: usize,
    const NUM_FRAMES: usize,
>(
    mmu: &mut Mmu<PAGE_SIZE, FRAME_SIZE, NUM_PAGES, NUM_FRAMES>,
    generator: &mut AddressGenerator,
    trials: usize,
) -> TrialSummary {
    let mut summary = TrialSummary::default();
    for address in generator.take(trials) {
        match mmu.translate(address) {
            Ok(_) => summary.translated += 1,
            Err(err) => {
                log::warn!("translation of {} rejected: {}", address, err);
                summary.rejected += 1;
            }
        }
    }
    summary
}
