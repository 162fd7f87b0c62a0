//! Ready-made boards for the three classic terminal distributions.
//!
//! | preset      | geometry        | rule           | balls | seed |
//! |-------------|-----------------|----------------|-------|------|
//! | `Normal`    | additive 0.35   | fair coin      | 50    | 42   |
//! | `Lognormal` | base 1.3, x2.0  | fair coin      | 50    | 2    |
//! | `Pareto`    | base 1.3, x2.0  | Pólya(1, 3)    | 150   | 1    |
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::board::{Board, BoardSpec};
use crate::error::Result;
use crate::rule::BranchRule;
use crate::sim::batch::{run_batch, BatchConfig, BatchResult};

pub const PRESET_ROWS: u32 = 12;
pub const ADDITIVE_SPACING: f32 = 0.35;
pub const MULTIPLICATIVE_BASE: f32 = 1.3;
pub const MULTIPLICATIVE_ROW_SPACING: f32 = 0.45;
pub const MULTIPLICATIVE_START_Y: f32 = 3.2;
pub const MULTIPLICATIVE_X_SCALE: f32 = 2.0;
pub const PARETO_ALPHA: f64 = 1.0;
pub const PARETO_BETA: f64 = 3.0;

/// Which terminal distribution a preset board demonstrates.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Distribution {
    /// Fair coin on an additive board: binomial, approximately normal.
    Normal,
    /// Fair coin on a multiplicative board: approximately lognormal.
    Lognormal,
    /// Pólya rule on a multiplicative board: right-skewed, heavy tailed.
    Pareto,
}

impl Distribution {
    pub const ALL: [Distribution; 3] = [
        Distribution::Normal,
        Distribution::Lognormal,
        Distribution::Pareto,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Distribution::Normal => "normal",
            Distribution::Lognormal => "lognormal",
            Distribution::Pareto => "pareto",
        }
    }

    pub fn board_spec(&self) -> BoardSpec {
        match self {
            Distribution::Normal => BoardSpec::additive(PRESET_ROWS, ADDITIVE_SPACING),
            Distribution::Lognormal | Distribution::Pareto => BoardSpec::multiplicative(
                PRESET_ROWS,
                MULTIPLICATIVE_BASE,
                MULTIPLICATIVE_X_SCALE,
                MULTIPLICATIVE_ROW_SPACING,
            )
            .with_start_y(MULTIPLICATIVE_START_Y),
        }
    }

    pub fn rule(&self) -> BranchRule {
        match self {
            Distribution::Normal | Distribution::Lognormal => BranchRule::FairCoin,
            Distribution::Pareto => BranchRule::Polya {
                alpha: PARETO_ALPHA,
                beta: PARETO_BETA,
            },
        }
    }

    pub fn batch_config(&self) -> BatchConfig {
        match self {
            Distribution::Normal => BatchConfig::new(50).with_seed(42),
            Distribution::Lognormal => BatchConfig::new(50).with_seed(2),
            Distribution::Pareto => BatchConfig::new(150).with_seed(1),
        }
    }

    pub fn scenario(&self) -> Scenario {
        Scenario {
            distribution: *self,
            board: self.board_spec(),
            rule: self.rule(),
            batch: self.batch_config(),
        }
    }
}

impl std::str::FromStr for Distribution {
    type Err = crate::error::Error;

    fn from_str(s: &str) -> Result<Self> {
        Distribution::ALL
            .into_iter()
            .find(|d| d.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown distribution '{s}'").into())
    }
}

/// Board, rule and batch settings for one run.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct Scenario {
    pub distribution: Distribution,
    pub board: BoardSpec,
    pub rule: BranchRule,
    pub batch: BatchConfig,
}

impl Scenario {
    /// Overrides the particle count.
    pub fn with_particle_count(mut self, particle_count: usize) -> Self {
        self.batch.particle_count = particle_count;
        self
    }

    /// Overrides the seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.batch.seed = seed;
        self
    }

    /// Builds the board and runs the batch.
    pub fn run(&self) -> Result<(Board, BatchResult)> {
        let board = Board::try_new(self.board.clone())?;
        let result = run_batch(&board, &self.rule, &self.batch)?;
        Ok((board, result))
    }
}
