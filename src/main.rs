use mmu::Mmu;
use paging_sim::{
    args::{parse_args, ArgsError, RunConfig},
    generator::AddressGenerator,
    report::{format_stats, LogSink},
    simulation::run_trials,
};

const PAGE_SIZE: usize = 256;
const FRAME_SIZE: usize = 1024;
const NUM_PAGES: usize = 1024;
const NUM_FRAMES: usize = 8;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match parse_args(std::env::args().skip(1)) {
        Ok(config) => config,
        Err(ArgsError::HelpRequested) => {
            println!("{}", ArgsError::HelpRequested);
            return;
        }
        Err(err) => {
            eprintln!("{}\n\n{}", err, ArgsError::HelpRequested);
            RunConfig::default()
        }
    };

    let mut mmu: Mmu<PAGE_SIZE, FRAME_SIZE, NUM_PAGES, NUM_FRAMES> =
        Mmu::init(config.policy.build(), Box::new(LogSink));
    let mut generator = AddressGenerator::new(
        Mmu::<PAGE_SIZE, FRAME_SIZE, NUM_PAGES, NUM_FRAMES>::address_space(),
        config.seed,
    );

    log::info!(
        "---- Translating {} addresses ({} replacement) ----",
        config.trials,
        mmu.policy_name()
    );
    let summary = run_trials(&mut mmu, &mut generator, config.trials);
    log::info!(
        "---- {} translated, {} rejected: {} ----",
        summary.translated,
        summary.rejected,
        format_stats(&mmu.stats())
    );
}
