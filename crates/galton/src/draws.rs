//! Random sources feeding branch decisions.
//!
//! A batch consumes one [`DrawSource`] from start to finish; every particle takes its
//! draws from the same stream in order. [`RngDraws`] adapts any [`Rng`] and never
//! runs dry. [`ScriptedDraws`] replays a fixed list, which is how a single particle is
//! reproduced from a recorded draw sequence.
use rand::Rng;

use crate::error::{Error, Result};

/// A stream of uniform values in `[0, 1)`.
pub trait DrawSource {
    /// Next uniform value, or an error if the source cannot produce one.
    fn next_draw(&mut self) -> Result<f64>;
}

impl<D: DrawSource + ?Sized> DrawSource for &mut D {
    #[inline]
    fn next_draw(&mut self) -> Result<f64> {
        (**self).next_draw()
    }
}

/// Generate a random double in the range [0, 1) from the top 53 bits of a `u64`.
#[inline]
pub(crate) fn unit_f64(rng: &mut dyn Rng) -> f64 {
    (rng.next_u64() >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
}

/// Draws backed by a random number generator.
#[derive(Debug, Clone)]
pub struct RngDraws<R> {
    rng: R,
}

impl<R: Rng> RngDraws<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    pub fn into_inner(self) -> R {
        self.rng
    }
}

impl<R: Rng> DrawSource for RngDraws<R> {
    #[inline]
    fn next_draw(&mut self) -> Result<f64> {
        Ok(unit_f64(&mut self.rng))
    }
}

/// A finite, pre-recorded list of draws.
#[derive(Debug, Clone, Default)]
pub struct ScriptedDraws {
    values: Vec<f64>,
    cursor: usize,
}

impl ScriptedDraws {
    pub fn new(values: impl Into<Vec<f64>>) -> Self {
        Self {
            values: values.into(),
            cursor: 0,
        }
    }

    /// Number of draws handed out so far.
    pub fn consumed(&self) -> usize {
        self.cursor
    }

    /// Number of draws left.
    pub fn remaining(&self) -> usize {
        self.values.len() - self.cursor
    }
}

impl DrawSource for ScriptedDraws {
    fn next_draw(&mut self) -> Result<f64> {
        let Some(&value) = self.values.get(self.cursor) else {
            return Err(Error::DrawsExhausted {
                drawn: self.cursor,
            });
        };
        if !(0.0..1.0).contains(&value) {
            return Err(Error::InvalidDraw {
                index: self.cursor,
                value,
            });
        }
        self.cursor += 1;
        Ok(value)
    }
}
