//! Branch rules: the probability that a particle moves to the next column at a peg.
//!
//! A rule sees only the peg row and how many increments the particle has taken so far.
//! It never consults batch state, so any particle can be replayed from its draws alone.
//!
//! - [`FairCoin`]: 0.5 everywhere. Used on both additive and multiplicative boards; the
//!   lognormal shape comes from the multiplicative geometry, not from the coin.
//! - [`PolyaUrn`]: `(column_so_far + alpha) / (row + alpha + beta)`. Prior increments make
//!   further increments more likely, which skews the terminal histogram right.
//! - [`BranchRule`]: tagged enum over the two, for configuration and serialization.
use std::f64::consts::FRAC_PI_2;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Trait for branch probability rules.
pub trait BranchingRule: Send + Sync {
    /// Probability of the increment outcome at `row` after `column_so_far` increments.
    fn branch_probability(&self, row: u32, column_so_far: u32) -> f64;

    /// Checks the rule's parameters before a batch draws from it.
    fn validate(&self) -> Result<()> {
        Ok(())
    }
}

/// Unbiased coin.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FairCoin;

impl BranchingRule for FairCoin {
    #[inline]
    fn branch_probability(&self, _row: u32, _column_so_far: u32) -> f64 {
        0.5
    }
}

/// Path-dependent Pólya urn coin.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PolyaUrn {
    alpha: f64,
    beta: f64,
}

impl PolyaUrn {
    /// Creates a Pólya rule; both shape parameters must be finite and > 0.
    pub fn new(alpha: f64, beta: f64) -> Result<Self> {
        let rule = Self { alpha, beta };
        rule.validate()?;
        Ok(rule)
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn beta(&self) -> f64 {
        self.beta
    }
}

impl BranchingRule for PolyaUrn {
    #[inline]
    fn branch_probability(&self, row: u32, column_so_far: u32) -> f64 {
        polya_probability(self.alpha, self.beta, row, column_so_far)
    }

    fn validate(&self) -> Result<()> {
        validate_shape(self.alpha, self.beta)
    }
}

#[inline]
fn polya_probability(alpha: f64, beta: f64, row: u32, column_so_far: u32) -> f64 {
    (column_so_far as f64 + alpha) / (row as f64 + alpha + beta)
}

fn validate_shape(alpha: f64, beta: f64) -> Result<()> {
    if !(alpha.is_finite() && alpha > 0.0) {
        return Err(Error::InvalidConfig(format!(
            "polya alpha must be finite and > 0, got {alpha}"
        )));
    }
    if !(beta.is_finite() && beta > 0.0) {
        return Err(Error::InvalidConfig(format!(
            "polya beta must be finite and > 0, got {beta}"
        )));
    }
    Ok(())
}

/// Configurable branch rule.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum BranchRule {
    #[default]
    FairCoin,
    Polya {
        alpha: f64,
        beta: f64,
    },
}

impl BranchRule {
    /// Validated Pólya rule.
    pub fn polya(alpha: f64, beta: f64) -> Result<Self> {
        validate_shape(alpha, beta)?;
        Ok(Self::Polya { alpha, beta })
    }

    /// Decoration hint for the peg at `(row, col)`, treating `col` as the increments so far.
    pub fn peg_bias(&self, row: u32, col: u32) -> PegBias {
        PegBias::from_probability(self.branch_probability(row, col))
    }
}

impl From<FairCoin> for BranchRule {
    fn from(_: FairCoin) -> Self {
        BranchRule::FairCoin
    }
}

impl From<PolyaUrn> for BranchRule {
    fn from(rule: PolyaUrn) -> Self {
        BranchRule::Polya {
            alpha: rule.alpha,
            beta: rule.beta,
        }
    }
}

impl BranchingRule for BranchRule {
    #[inline]
    fn branch_probability(&self, row: u32, column_so_far: u32) -> f64 {
        match *self {
            BranchRule::FairCoin => FairCoin.branch_probability(row, column_so_far),
            BranchRule::Polya { alpha, beta } => {
                polya_probability(alpha, beta, row, column_so_far)
            }
        }
    }

    fn validate(&self) -> Result<()> {
        match *self {
            BranchRule::FairCoin => Ok(()),
            BranchRule::Polya { alpha, beta } => validate_shape(alpha, beta),
        }
    }
}

/// How strongly a peg pushes particles to the right.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PegBias {
    /// Increment probability at this peg.
    pub probability: f64,
    /// Suggested rotation in radians: zero for a fair peg, `-pi/4` when it always increments.
    pub tilt: f64,
}

impl PegBias {
    pub fn from_probability(probability: f64) -> Self {
        Self {
            probability,
            tilt: (0.5 - probability) * FRAC_PI_2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fair_coin_is_constant() {
        for row in 0..20 {
            for k in 0..=row {
                assert_eq!(FairCoin.branch_probability(row, k), 0.5);
                assert_eq!(BranchRule::FairCoin.branch_probability(row, k), 0.5);
            }
        }
    }

    #[test]
    fn polya_first_row_is_alpha_share() {
        let rule = PolyaUrn::new(1.0, 3.0).unwrap();
        assert_eq!(rule.branch_probability(0, 0), 0.25);
        let rule = PolyaUrn::new(2.5, 0.5).unwrap();
        assert_eq!(rule.branch_probability(0, 0), 2.5 / 3.0);
    }

    #[test]
    fn polya_rises_with_increments_and_falls_with_rows() {
        let rule = BranchRule::polya(1.0, 3.0).unwrap();
        for row in 0..12u32 {
            for k in 0..row {
                assert!(rule.branch_probability(row, k + 1) > rule.branch_probability(row, k));
            }
            for k in 0..=row {
                assert!(
                    rule.branch_probability(row + 1, k) < rule.branch_probability(row, k),
                    "row {row} k {k}"
                );
            }
        }
    }

    #[test]
    fn polya_stays_a_probability_on_reachable_states() {
        let rule = PolyaUrn::new(0.3, 0.2).unwrap();
        for row in 0..50u32 {
            for k in 0..=row {
                let p = rule.branch_probability(row, k);
                assert!(p > 0.0 && p < 1.0, "p({row}, {k}) = {p}");
            }
        }
    }

    #[test]
    fn enum_and_struct_agree() {
        let urn = PolyaUrn::new(1.0, 3.0).unwrap();
        let rule: BranchRule = urn.into();
        for row in 0..12 {
            for k in 0..=row {
                assert_eq!(
                    urn.branch_probability(row, k),
                    rule.branch_probability(row, k)
                );
            }
        }
    }

    #[test]
    fn non_positive_shape_is_rejected() {
        assert!(PolyaUrn::new(0.0, 3.0).is_err());
        assert!(PolyaUrn::new(1.0, -1.0).is_err());
        assert!(BranchRule::polya(f64::NAN, 1.0).is_err());
        assert!(BranchRule::polya(1.0, f64::INFINITY).is_err());
        let unchecked = BranchRule::Polya {
            alpha: -1.0,
            beta: 3.0,
        };
        assert!(matches!(unchecked.validate(), Err(Error::InvalidConfig(_))));
        assert!(BranchRule::FairCoin.validate().is_ok());
    }

    #[test]
    fn peg_bias_tilts_against_probability() {
        let fair = BranchRule::FairCoin.peg_bias(3, 1);
        assert_eq!(fair.probability, 0.5);
        assert_eq!(fair.tilt, 0.0);

        let polya = BranchRule::polya(1.0, 3.0).unwrap();
        let first = polya.peg_bias(0, 0);
        assert_eq!(first.probability, 0.25);
        assert!(first.tilt > 0.0);
        assert_eq!(PegBias::from_probability(1.0).tilt, -FRAC_PI_2 / 2.0);
    }
}
