use std::fmt;

use mmu::PolicyKind;

pub const DEFAULT_TRIALS: usize = 10;

pub const USAGE: &str = "Usage: paging-sim [TRIALS] [SEED] [POLICY]\n\
    \n\
    TRIALS  number of random addresses to translate (default 10)\n\
    SEED    seed for the address generator (default: random)\n\
    POLICY  fifo, lru or round-robin (default fifo)";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunConfig {
    pub trials: usize,
    pub seed: Option<u64>,
    pub policy: PolicyKind,
}

impl Default for RunConfig {
    fn default() -> Self {
        RunConfig {
            trials: DEFAULT_TRIALS,
            seed: None,
            policy: PolicyKind::default(),
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum ArgsError {
    HelpRequested,
    InvalidTrials(String),
    InvalidSeed(String),
    InvalidPolicy(String),
    UnexpectedArgument(String),
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::HelpRequested => write!(f, "{}", USAGE),
            ArgsError::InvalidTrials(arg) => write!(f, "invalid trial count '{}'", arg),
            ArgsError::InvalidSeed(arg) => write!(f, "invalid seed '{}'", arg),
            ArgsError::InvalidPolicy(arg) => write!(f, "invalid replacement policy '{}'", arg),
            ArgsError::UnexpectedArgument(arg) => write!(f, "unexpected argument '{}'", arg),
        }
    }
}

impl std::error::Error for ArgsError {}

/// Parses the arguments that follow the program name.
pub fn parse_args<I>(args: I) -> Result<RunConfig, ArgsError>
where
    I: IntoIterator<Item = String>,
{
    let mut config = RunConfig::default();
    let mut positional = 0;
    for arg in args {
        if arg == "-h" || arg == "--help" {
            return Err(ArgsError::HelpRequested);
        }
        match positional {
            0 => {
                config.trials = arg.parse().map_err(|_| ArgsError::InvalidTrials(arg.clone()))?
            }
            1 => config.seed = Some(arg.parse().map_err(|_| ArgsError::InvalidSeed(arg.clone()))?),
            2 => {
                config.policy = arg
                    .parse()
                    .map_err(|_| ArgsError::InvalidPolicy(arg.clone()))?
            }
            _ => return Err(ArgsError::UnexpectedArgument(arg)),
        }
        positional += 1;
    }
    Ok(config)
}
