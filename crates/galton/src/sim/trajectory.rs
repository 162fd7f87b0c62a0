//! Single-particle simulation through the peg rows.
use glam::Vec2;

use crate::board::Board;
use crate::draws::DrawSource;
use crate::error::{Error, Result};
use crate::rule::BranchingRule;
use crate::sim::stacking::StackSlot;

/// Outcome of one branch decision.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Branch {
    /// Stay on the same column index.
    Hold,
    /// Move to column index + 1.
    Increment,
}

/// A particle's fall through the pegs, before it is stacked in its bin.
#[derive(Clone, Debug, PartialEq)]
pub struct Trajectory {
    /// Start point followed by one point per decision, each at its peg row's height.
    pub path: Vec<Vec2>,
    /// One entry per peg row.
    pub outcomes: Vec<Branch>,
    /// Final column index, the number of increments.
    pub bin: u32,
}

impl Trajectory {
    /// Appends the stacked resting point and freezes the particle.
    pub fn land(self, board: &Board, slot: StackSlot) -> Particle {
        let mut path = self.path;
        path.push(Vec2::new(board.bin_center(self.bin).x, slot.vertical_offset));
        Particle {
            path,
            outcomes: self.outcomes,
            bin: self.bin,
            slot: slot.index,
        }
    }
}

/// A simulated ball: full path, bin and position in the bin's stack.
///
/// Only [`Trajectory::land`] builds one, so the path always holds the start point and
/// the resting point.
#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    path: Vec<Vec2>,
    outcomes: Vec<Branch>,
    bin: u32,
    slot: u32,
}

impl Particle {
    /// `rows + 2` points: start, one per decision, stacked resting point.
    pub fn path(&self) -> &[Vec2] {
        &self.path
    }

    pub fn outcomes(&self) -> &[Branch] {
        &self.outcomes
    }

    pub fn bin(&self) -> u32 {
        self.bin
    }

    /// Zero-based arrival order within the bin.
    pub fn slot(&self) -> u32 {
        self.slot
    }

    pub fn start_position(&self) -> Vec2 {
        self.path[0]
    }

    /// Resting point in the bin stack.
    pub fn final_position(&self) -> Vec2 {
        self.path[self.path.len() - 1]
    }

    pub fn vertical_offset(&self) -> f32 {
        self.final_position().y
    }

    pub fn increments(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| **o == Branch::Increment)
            .count()
    }
}

/// Drops one particle through `board`, taking one draw per row from `draws`.
///
/// A draw `u` increments the column when `u < p`. The point recorded after the decision
/// on row `k` sits at that row's height, horizontally at lattice column `column` of row
/// `k + 1`. Fails with [`Error::InvalidConfig`] if `rule` does not validate, and with
/// [`Error::InvalidProbability`] if the rule leaves `[0, 1]`; the value is never clamped.
pub fn simulate(
    board: &Board,
    rule: &dyn BranchingRule,
    draws: &mut dyn DrawSource,
) -> Result<Trajectory> {
    rule.validate()?;
    simulate_validated(board, rule, draws)
}

/// [`simulate`] for a rule the caller has already validated.
pub(crate) fn simulate_validated(
    board: &Board,
    rule: &dyn BranchingRule,
    draws: &mut dyn DrawSource,
) -> Result<Trajectory> {
    let rows = board.rows();
    let mut path = Vec::with_capacity(rows as usize + 2);
    let mut outcomes = Vec::with_capacity(rows as usize);
    path.push(board.start_position());

    let mut column = 0u32;
    for row in 0..rows {
        let p = rule.branch_probability(row, column);
        if !(0.0..=1.0).contains(&p) {
            return Err(Error::InvalidProbability {
                row,
                column,
                probability: p,
            });
        }
        let u = draws.next_draw()?;
        if u < p {
            column += 1;
            outcomes.push(Branch::Increment);
        } else {
            outcomes.push(Branch::Hold);
        }
        path.push(Vec2::new(board.position(row + 1, column).x, board.row_y(row)));
    }

    Ok(Trajectory {
        path,
        outcomes,
        bin: column,
    })
}
