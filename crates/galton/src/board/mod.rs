//! Board geometry: maps discrete `(row, col)` lattice coordinates to 2D positions.
//!
//! A [`BoardSpec`] is the authoring form (plain fields, builder setters, [`BoardSpec::validate`]).
//! [`Board::try_new`] validates it once and freezes it, memoizing the constants the
//! multiplicative transform needs so every lookup is a single `powf`.
//!
//! Rows are numbered from the top. Row `r` holds pegs at columns `0..=r`; row `rows`
//! is the virtual landing row whose positions are the bin centers.
use glam::Vec2;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

pub mod layout;

pub use layout::Peg;

/// Horizontal spacing rule of a board.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq)]
#[non_exhaustive]
pub enum Geometry {
    /// Linear lattice: `x = (col - row / 2) * col_spacing`.
    Additive { col_spacing: f32 },
    /// Exponential lattice: column offset `e` maps to `(base^e - midpoint) * x_scale`.
    ///
    /// Equal column steps are equal multiplicative steps in value space, so a fair coin
    /// on this board lands balls in an approximately lognormal layout.
    Multiplicative { base: f32, x_scale: f32 },
}

/// Construction parameters for a [`Board`].
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq)]
#[non_exhaustive]
pub struct BoardSpec {
    /// Number of peg rows (branch decisions per particle).
    pub rows: u32,
    /// Horizontal spacing rule.
    pub geometry: Geometry,
    /// Vertical distance between consecutive rows.
    pub row_spacing: f32,
    /// Vertical coordinate of peg row 0.
    pub start_y: f32,
    /// Height of the bin walls below the last row.
    pub bin_height: f32,
    /// Radius of a ball; stacked balls are spaced by its diameter.
    pub ball_radius: f32,
}

impl BoardSpec {
    pub const DEFAULT_START_Y: f32 = 3.0;
    pub const DEFAULT_BIN_HEIGHT: f32 = 1.5;
    pub const DEFAULT_BALL_RADIUS: f32 = 0.06;

    /// Additive board with the same spacing between rows and columns.
    pub fn additive(rows: u32, spacing: f32) -> Self {
        Self {
            rows,
            geometry: Geometry::Additive {
                col_spacing: spacing,
            },
            row_spacing: spacing,
            start_y: Self::DEFAULT_START_Y,
            bin_height: Self::DEFAULT_BIN_HEIGHT,
            ball_radius: Self::DEFAULT_BALL_RADIUS,
        }
    }

    /// Multiplicative board with the given base and horizontal scale.
    pub fn multiplicative(rows: u32, base: f32, x_scale: f32, row_spacing: f32) -> Self {
        Self {
            rows,
            geometry: Geometry::Multiplicative { base, x_scale },
            row_spacing,
            start_y: Self::DEFAULT_START_Y,
            bin_height: Self::DEFAULT_BIN_HEIGHT,
            ball_radius: Self::DEFAULT_BALL_RADIUS,
        }
    }

    /// Sets the vertical coordinate of peg row 0.
    pub fn with_start_y(mut self, start_y: f32) -> Self {
        self.start_y = start_y;
        self
    }

    /// Sets the bin wall height.
    pub fn with_bin_height(mut self, bin_height: f32) -> Self {
        self.bin_height = bin_height;
        self
    }

    /// Sets the ball radius.
    pub fn with_ball_radius(mut self, ball_radius: f32) -> Self {
        self.ball_radius = ball_radius;
        self
    }

    /// Validates the board description, returning an error if invalid.
    pub fn validate(&self) -> Result<()> {
        if self.rows == 0 {
            return Err(Error::InvalidConfig("rows must be >= 1".into()));
        }
        positive("row_spacing", self.row_spacing)?;
        positive("bin_height", self.bin_height)?;
        positive("ball_radius", self.ball_radius)?;
        if !self.start_y.is_finite() {
            return Err(Error::InvalidConfig("start_y must be finite".into()));
        }
        let floor = self.start_y - self.rows as f32 * self.row_spacing - self.bin_height;
        if !floor.is_finite() {
            return Err(Error::InvalidConfig(format!(
                "{} rows of spacing {} overflow the board height",
                self.rows, self.row_spacing
            )));
        }
        match self.geometry {
            Geometry::Additive { col_spacing } => positive("col_spacing", col_spacing)?,
            Geometry::Multiplicative { base, x_scale } => {
                if !(base.is_finite() && base > 1.0) {
                    return Err(Error::InvalidConfig(format!(
                        "multiplicative base must be finite and > 1, got {base}"
                    )));
                }
                positive("x_scale", x_scale)?;
                let widest = base.powf(self.rows as f32 / 2.0) * x_scale;
                if !widest.is_finite() {
                    return Err(Error::InvalidConfig(format!(
                        "base {base} over {} rows overflows the board width",
                        self.rows
                    )));
                }
            }
        }
        Ok(())
    }
}

fn positive(name: &str, value: f32) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(Error::InvalidConfig(format!(
            "{name} must be finite and > 0, got {value}"
        )))
    }
}

/// A validated, immutable board.
#[derive(Clone, Debug, PartialEq)]
pub struct Board {
    spec: BoardSpec,
    /// Midpoint of `[base^(-rows/2), base^(rows/2)]`; zero on additive boards.
    midpoint: f32,
}

impl Board {
    /// Validates `spec` and freezes it into a board.
    pub fn try_new(spec: BoardSpec) -> Result<Self> {
        spec.validate()?;
        let midpoint = match spec.geometry {
            Geometry::Additive { .. } => 0.0,
            Geometry::Multiplicative { base, .. } => {
                let half = spec.rows as f32 / 2.0;
                (base.powf(-half) + base.powf(half)) / 2.0
            }
        };
        Ok(Self { spec, midpoint })
    }

    pub fn spec(&self) -> &BoardSpec {
        &self.spec
    }

    pub fn rows(&self) -> u32 {
        self.spec.rows
    }

    /// Number of bins, `rows + 1`.
    pub fn bin_count(&self) -> usize {
        self.spec.rows as usize + 1
    }

    pub fn geometry(&self) -> Geometry {
        self.spec.geometry
    }

    pub fn ball_radius(&self) -> f32 {
        self.spec.ball_radius
    }

    /// Midpoint subtracted by the multiplicative transform (zero for additive boards).
    pub fn midpoint(&self) -> f32 {
        self.midpoint
    }

    /// Position of lattice point `(row, col)`.
    ///
    /// Panics if `row > rows` or `col > row`.
    pub fn position(&self, row: u32, col: u32) -> Vec2 {
        assert!(
            row <= self.spec.rows,
            "row {row} outside board with {} rows",
            self.spec.rows
        );
        assert!(col <= row, "column {col} outside row {row}");
        Vec2::new(
            self.x_at_offset(col as f32 - row as f32 / 2.0),
            self.row_y(row),
        )
    }

    /// Center of bin `bin` on the landing row.
    pub fn bin_center(&self, bin: u32) -> Vec2 {
        self.position(self.spec.rows, bin)
    }

    /// Where every particle enters: one row step above peg `(0, 0)`.
    pub fn start_position(&self) -> Vec2 {
        Vec2::new(
            self.position(0, 0).x,
            self.spec.start_y + self.spec.row_spacing,
        )
    }

    pub fn row_y(&self, row: u32) -> f32 {
        self.spec.start_y - row as f32 * self.spec.row_spacing
    }

    /// Horizontal coordinate for a signed column offset from the board's center line.
    pub(crate) fn x_at_offset(&self, offset: f32) -> f32 {
        match self.spec.geometry {
            Geometry::Additive { col_spacing } => offset * col_spacing,
            Geometry::Multiplicative { base, x_scale } => {
                (base.powf(offset) - self.midpoint) * x_scale
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn additive() -> Board {
        Board::try_new(BoardSpec::additive(12, 0.35)).unwrap()
    }

    fn multiplicative() -> Board {
        Board::try_new(BoardSpec::multiplicative(12, 1.3, 2.0, 0.45).with_start_y(3.2)).unwrap()
    }

    #[test]
    fn validate_rejects_degenerate_boards() {
        assert!(BoardSpec::additive(0, 0.35).validate().is_err());
        assert!(BoardSpec::additive(4, 0.0).validate().is_err());
        assert!(BoardSpec::additive(4, f32::NAN).validate().is_err());
        assert!(BoardSpec::additive(4, 0.35)
            .with_ball_radius(-0.1)
            .validate()
            .is_err());
        assert!(BoardSpec::additive(4, 0.35)
            .with_bin_height(0.0)
            .validate()
            .is_err());
        assert!(BoardSpec::multiplicative(4, 1.0, 2.0, 0.45)
            .validate()
            .is_err());
        assert!(BoardSpec::multiplicative(4, 0.8, 2.0, 0.45)
            .validate()
            .is_err());
        assert!(BoardSpec::multiplicative(4, 1.3, 0.0, 0.45)
            .validate()
            .is_err());
        assert!(matches!(
            Board::try_new(BoardSpec::additive(0, 1.0)),
            Err(Error::InvalidConfig(_))
        ));
    }

    #[test]
    fn validate_rejects_boards_too_wide_to_represent() {
        let err = BoardSpec::multiplicative(700, 1.3, 2.0, 0.45)
            .validate()
            .unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));
        assert!(Board::try_new(BoardSpec::multiplicative(40, 1e6, 2.0, 0.45)).is_err());
        assert!(BoardSpec::multiplicative(60, 1.3, 1e36, 0.45)
            .validate()
            .is_err());
        assert!(BoardSpec::additive(4, 0.35)
            .with_start_y(-f32::MAX)
            .with_bin_height(f32::MAX)
            .validate()
            .is_err());
    }

    #[test]
    fn largest_valid_multiplicative_board_stays_finite() {
        // 1.3^(600/2) is about 1.5e34, still inside f32.
        let board = Board::try_new(BoardSpec::multiplicative(600, 1.3, 2.0, 0.45)).unwrap();
        assert!(board.midpoint().is_finite());
        let rows = board.rows();
        let mut previous = f32::NEG_INFINITY;
        for bin in [0, 1, rows / 2, rows - 1, rows] {
            let x = board.bin_center(bin).x;
            assert!(x.is_finite(), "bin {bin} at {x}");
            assert!(x >= previous);
            previous = x;
        }
        assert!(board.bin_center(rows).x > board.bin_center(rows - 1).x);
    }

    #[test]
    fn additive_lattice_is_symmetric() {
        let board = additive();
        assert_eq!(board.position(0, 0), Vec2::new(0.0, 3.0));
        for row in 0..=board.rows() {
            for col in 0..=row {
                let a = board.position(row, col);
                let b = board.position(row, row - col);
                assert_eq!(a.x, -b.x);
                assert_eq!(a.y, b.y);
            }
        }
        let p = board.position(4, 3);
        assert_eq!(p.x, (3.0 - 2.0) * 0.35);
        assert_eq!(p.y, 3.0 - 4.0 * 0.35);
    }

    #[test]
    fn position_is_deterministic() {
        for board in [additive(), multiplicative()] {
            for row in 0..=board.rows() {
                for col in 0..=row {
                    let a = board.position(row, col);
                    let b = board.position(row, col);
                    assert_eq!(a.x.to_bits(), b.x.to_bits());
                    assert_eq!(a.y.to_bits(), b.y.to_bits());
                }
            }
        }
    }

    #[test]
    fn multiplicative_bin_centers_follow_powers_of_base() {
        let board = multiplicative();
        let rows = board.rows();
        let base = 1.3f32;
        let half = rows as f32 / 2.0;
        let midpoint = (base.powf(-half) + base.powf(half)) / 2.0;
        assert_eq!(board.midpoint(), midpoint);

        let mut previous = f32::NEG_INFINITY;
        for i in 0..=rows {
            let x = board.position(rows, i).x;
            let expected = (base.powf(i as f32 - rows as f32 / 2.0) - midpoint) * 2.0;
            assert_eq!(x, expected);
            assert!(x > previous, "bin {i} not right of bin {}", i.wrapping_sub(1));
            previous = x;
        }
    }

    #[test]
    fn multiplicative_center_peg_sits_at_unit_value() {
        let board = multiplicative();
        let p = board.position(0, 0);
        assert_eq!(p.x, (1.0 - board.midpoint()) * 2.0);
        assert_eq!(p.y, 3.2);
    }

    #[test]
    fn start_position_is_one_row_above_first_peg() {
        let board = multiplicative();
        let start = board.start_position();
        assert_eq!(start.x, board.position(0, 0).x);
        assert!((start.y - (3.2 + 0.45)).abs() < 1e-6);
    }

    #[test]
    fn landing_row_is_addressable() {
        let board = additive();
        assert_eq!(board.bin_center(0), board.position(12, 0));
        assert_eq!(board.bin_center(12).x, 6.0 * 0.35);
    }

    #[test]
    #[should_panic(expected = "column 3 outside row 2")]
    fn column_beyond_row_panics() {
        additive().position(2, 3);
    }

    #[test]
    #[should_panic(expected = "outside board")]
    fn row_beyond_landing_row_panics() {
        additive().position(13, 0);
    }
}
