//! Static board decoration: pegs, bin dividers and the bin floor.
//!
//! The presentation layer draws these once per board. They go through the same
//! transform as [`Board::position`], so a multiplicative board's dividers bracket its
//! bin centers the same way additive ones do.
use glam::Vec2;

use crate::board::Board;

/// A peg on the board.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Peg {
    pub row: u32,
    pub col: u32,
    pub position: Vec2,
}

impl Board {
    /// All pegs, row by row from the top, left to right within a row.
    pub fn pegs(&self) -> impl Iterator<Item = Peg> + '_ {
        (0..self.rows()).flat_map(move |row| {
            (0..=row).map(move |col| Peg {
                row,
                col,
                position: self.position(row, col),
            })
        })
    }

    /// Number of pegs, `rows * (rows + 1) / 2`.
    pub fn peg_count(&self) -> usize {
        let rows = self.rows() as usize;
        rows * (rows + 1) / 2
    }

    /// X coordinates of the `rows + 2` walls separating the bins, left to right.
    ///
    /// Wall `i` sits half a column to the left of bin `i`.
    pub fn bin_dividers(&self) -> Vec<f32> {
        let half = self.rows() as f32 / 2.0;
        (0..=self.rows() + 1)
            .map(|i| self.x_at_offset(i as f32 - half - 0.5))
            .collect()
    }

    /// Horizontal extent of the floor: the outermost dividers.
    pub fn floor_span(&self) -> (f32, f32) {
        let half = self.rows() as f32 / 2.0;
        (
            self.x_at_offset(-half - 0.5),
            self.x_at_offset(self.rows() as f32 + 0.5 - half),
        )
    }

    /// Top edge of the bin walls, half a row below the last peg row.
    pub fn bin_top_y(&self) -> f32 {
        let spec = self.spec();
        spec.start_y - spec.rows as f32 * spec.row_spacing + spec.row_spacing / 2.0
    }

    /// The floor every bin stacks up from.
    pub fn bin_floor_y(&self) -> f32 {
        self.bin_top_y() - self.spec().bin_height
    }
}
