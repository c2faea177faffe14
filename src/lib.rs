//! Demand-paging simulator: the driver pieces around the `mmu` crate.

pub mod args;
pub mod generator;
pub mod report;
pub mod simulation;

pub use mmu;
