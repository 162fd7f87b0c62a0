#![forbid(unsafe_code)]
//! galton: branching random walks on Galton boards.
//!
//! Modules:
//! - board: lattice geometry (additive and multiplicative) and static layout
//! - rule: branch probability rules (fair coin, Pólya urn)
//! - draws: random sources feeding branch decisions
//! - sim: trajectories, bin stacking, batch runs and events
//! - stats: histograms and exact terminal distributions
//! - preset: the normal, lognormal and Pareto boards
pub mod board;
pub mod draws;
pub mod error;
pub mod preset;
pub mod rule;
pub mod sim;
pub mod stats;

/// Convenient re-exports for common types. Import with `use galton::prelude::*;`.
pub mod prelude {
    pub use crate::board::{Board, BoardSpec, Geometry, Peg};
    pub use crate::draws::{DrawSource, RngDraws, ScriptedDraws};
    pub use crate::error::{Error, Result};
    pub use crate::preset::{Distribution, Scenario};
    pub use crate::rule::{BranchRule, BranchingRule, FairCoin, PegBias, PolyaUrn};
    pub use crate::sim::events::{BatchEvent, EventSink, FnSink, MultiSink, VecSink};
    pub use crate::sim::{
        run_batch, run_batch_from, run_batch_with_events, simulate, BatchConfig, BatchResult,
        BatchRunner, BinOccupancy, BinStacker, Branch, Particle, ParticleStream, StackSlot,
        Trajectory,
    };
    pub use crate::stats::{beta_binomial_pmf, binomial_pmf, terminal_distribution, Histogram};
}
