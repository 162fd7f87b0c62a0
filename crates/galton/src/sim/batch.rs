//! Batch orchestration: drop many particles through one board and stack them.
//!
//! Particles are simulated and stacked strictly one after another from a single draw
//! stream. Stacking order is observable, so the same seed always reproduces the same
//! paths and the same stacks.
use std::iter::FusedIterator;

use glam::Vec2;
use rand::rngs::StdRng;
use rand::SeedableRng;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::board::Board;
use crate::draws::{DrawSource, RngDraws};
use crate::error::Result;
use crate::rule::BranchingRule;
use crate::sim::events::{BatchEvent, EventSink};
use crate::sim::stacking::{BinOccupancy, BinStacker};
use crate::sim::trajectory::{simulate_validated, Particle};
use crate::stats::Histogram;

/// Configuration for a batch run.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchConfig {
    /// Number of particles to drop.
    pub particle_count: usize,
    /// Seed of the batch's pseudo-random stream.
    pub seed: u64,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            particle_count: 100,
            seed: 42,
        }
    }
}

impl BatchConfig {
    /// Creates a new [`BatchConfig`] for `particle_count` particles.
    pub fn new(particle_count: usize) -> Self {
        Self {
            particle_count,
            ..Default::default()
        }
    }

    /// Sets the seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}

/// Result of a batch run.
#[non_exhaustive]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchResult {
    /// Particles in processing order.
    pub particles: Vec<Particle>,
    /// Final per-bin counts.
    pub occupancy: BinOccupancy,
}

impl BatchResult {
    /// `(path, final position)` pairs in processing order.
    pub fn landings(&self) -> impl Iterator<Item = (&[Vec2], Vec2)> + '_ {
        self.particles
            .iter()
            .map(|p| (p.path(), p.final_position()))
    }

    pub fn histogram(&self) -> Histogram {
        Histogram::new(self.occupancy.counts().to_vec())
    }
}

/// Lazy, in-order particle generator.
///
/// Yields `Ok(particle)` for each particle, or a single `Err` after which it is exhausted.
pub struct ParticleStream<'a, D: DrawSource> {
    board: &'a Board,
    rule: &'a dyn BranchingRule,
    draws: D,
    stacker: BinStacker,
    remaining: usize,
    failed: bool,
}

impl<'a, D: DrawSource> ParticleStream<'a, D> {
    /// Validates `rule` and prepares a stream of `particle_count` particles.
    pub fn new(
        board: &'a Board,
        rule: &'a dyn BranchingRule,
        particle_count: usize,
        draws: D,
    ) -> Result<Self> {
        rule.validate()?;
        Ok(Self {
            board,
            rule,
            draws,
            stacker: BinStacker::for_board(board),
            remaining: particle_count,
            failed: false,
        })
    }

    /// Occupancy after the particles yielded so far.
    pub fn occupancy(&self) -> &BinOccupancy {
        self.stacker.occupancy()
    }

    pub fn into_occupancy(self) -> BinOccupancy {
        self.stacker.into_occupancy()
    }
}

impl<D: DrawSource> Iterator for ParticleStream<'_, D> {
    type Item = Result<Particle>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.remaining == 0 {
            return None;
        }
        match simulate_validated(self.board, self.rule, &mut self.draws) {
            Ok(trajectory) => {
                self.remaining -= 1;
                let slot = self.stacker.allocate(trajectory.bin);
                Some(Ok(trajectory.land(self.board, slot)))
            }
            Err(e) => {
                self.failed = true;
                Some(Err(e))
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.failed {
            (0, Some(0))
        } else {
            (0, Some(self.remaining))
        }
    }
}

impl<D: DrawSource> FusedIterator for ParticleStream<'_, D> {}

/// Runs a batch seeded from `config.seed`.
pub fn run_batch(
    board: &Board,
    rule: &dyn BranchingRule,
    config: &BatchConfig,
) -> Result<BatchResult> {
    run_batch_with_events(board, rule, config, &mut ())
}

pub fn run_batch_with_events(
    board: &Board,
    rule: &dyn BranchingRule,
    config: &BatchConfig,
    sink: &mut dyn EventSink,
) -> Result<BatchResult> {
    let mut draws = RngDraws::new(StdRng::seed_from_u64(config.seed));
    run_batch_from(board, rule, config.particle_count, &mut draws, Some(sink))
}

/// Runs a batch over an explicit draw source.
pub fn run_batch_from(
    board: &Board,
    rule: &dyn BranchingRule,
    particle_count: usize,
    draws: &mut dyn DrawSource,
    sink: Option<&mut dyn EventSink>,
) -> Result<BatchResult> {
    if let Some(s) = sink {
        run_batch_internal(board, rule, particle_count, draws, s)
    } else {
        run_batch_internal(board, rule, particle_count, draws, &mut ())
    }
}

fn run_batch_internal(
    board: &Board,
    rule: &dyn BranchingRule,
    particle_count: usize,
    draws: &mut dyn DrawSource,
    sink: &mut dyn EventSink,
) -> Result<BatchResult> {
    let mut stream = ParticleStream::new(board, rule, particle_count, draws)?;

    info!(
        "Batch: {} particles over {} rows.",
        particle_count,
        board.rows()
    );
    if particle_count == 0 {
        warn!("Batch has no particles.");
    }
    sink.send(BatchEvent::BatchStarted {
        rows: board.rows(),
        particle_count,
    });

    let mut particles = Vec::with_capacity(particle_count);
    for (index, next) in stream.by_ref().enumerate() {
        let particle = next?;
        debug!(
            "Particle {}: bin {} slot {}.",
            index,
            particle.bin(),
            particle.slot()
        );
        sink.send(BatchEvent::ParticleLanded {
            index,
            bin: particle.bin(),
            slot: particle.slot(),
            position: particle.final_position(),
        });
        particles.push(particle);
    }

    let occupancy = stream.into_occupancy();
    info!("Batch finished | bins: {:?}.", occupancy.counts());
    sink.send(BatchEvent::BatchFinished {
        counts: occupancy.counts().to_vec(),
    });

    Ok(BatchResult {
        particles,
        occupancy,
    })
}

/// Runs batches of one rule on one board.
pub struct BatchRunner<'a> {
    /// Board the particles fall through.
    pub board: &'a Board,
    /// Branch rule applied at every peg.
    pub rule: &'a dyn BranchingRule,
}

impl<'a> BatchRunner<'a> {
    pub fn try_new(board: &'a Board, rule: &'a dyn BranchingRule) -> Result<Self> {
        rule.validate()?;
        Ok(Self { board, rule })
    }

    pub fn run(&self, config: &BatchConfig) -> Result<BatchResult> {
        run_batch(self.board, self.rule, config)
    }

    pub fn run_with_events(
        &self,
        config: &BatchConfig,
        sink: &mut dyn EventSink,
    ) -> Result<BatchResult> {
        run_batch_with_events(self.board, self.rule, config, sink)
    }

    /// Lazy stream over the batch described by `config`.
    pub fn stream(&self, config: &BatchConfig) -> Result<ParticleStream<'a, RngDraws<StdRng>>> {
        ParticleStream::new(
            self.board,
            self.rule,
            config.particle_count,
            RngDraws::new(StdRng::seed_from_u64(config.seed)),
        )
    }
}
