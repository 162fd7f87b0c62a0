//! Particle simulation: trajectories, bin stacking and batch orchestration.
pub mod batch;
pub mod events;
pub mod stacking;
pub mod trajectory;

pub use batch::{
    run_batch, run_batch_from, run_batch_with_events, BatchConfig, BatchResult, BatchRunner,
    ParticleStream,
};
pub use stacking::{BinOccupancy, BinStacker, StackSlot};
pub use trajectory::{simulate, Branch, Particle, Trajectory};
