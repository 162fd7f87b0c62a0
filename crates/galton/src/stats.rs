//! Histogram summaries and exact terminal distributions.
//!
//! [`terminal_distribution`] propagates probability mass row by row through any
//! [`BranchingRule`], giving the exact law of the final bin. For the built-in rules it
//! agrees with the closed forms: [`binomial_pmf`] for the fair coin and
//! [`beta_binomial_pmf`] for the Pólya rule.
use crate::rule::{BranchRule, BranchingRule};

/// Per-bin particle counts with summary statistics.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Histogram {
    counts: Vec<u32>,
}

impl Histogram {
    pub fn new(counts: Vec<u32>) -> Self {
        Self { counts }
    }

    pub fn counts(&self) -> &[u32] {
        &self.counts
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().map(|&c| c as u64).sum()
    }

    /// Mean bin index; zero for an empty histogram.
    pub fn mean(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        let weighted: f64 = self
            .counts
            .iter()
            .enumerate()
            .map(|(bin, &c)| bin as f64 * c as f64)
            .sum();
        weighted / total as f64
    }

    /// Population variance of the bin index; zero for an empty histogram.
    pub fn variance(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        let mean = self.mean();
        let sq: f64 = self
            .counts
            .iter()
            .enumerate()
            .map(|(bin, &c)| (bin as f64 - mean).powi(2) * c as f64)
            .sum();
        sq / total as f64
    }

    /// Fullest bin (lowest index on ties), or `None` when empty.
    pub fn mode(&self) -> Option<u32> {
        if self.total() == 0 {
            return None;
        }
        let mut best = 0usize;
        for (bin, &c) in self.counts.iter().enumerate() {
            if c > self.counts[best] {
                best = bin;
            }
        }
        Some(best as u32)
    }

    pub fn max_count(&self) -> u32 {
        self.counts.iter().copied().max().unwrap_or(0)
    }

    /// Counts divided by the total; all zeros when empty.
    pub fn frequencies(&self) -> Vec<f64> {
        let total = self.total();
        if total == 0 {
            return vec![0.0; self.counts.len()];
        }
        self.counts
            .iter()
            .map(|&c| c as f64 / total as f64)
            .collect()
    }

    /// Total variation distance between the empirical frequencies and `expected`.
    ///
    /// Bins missing from either side count as zero.
    pub fn total_variation(&self, expected: &[f64]) -> f64 {
        let freq = self.frequencies();
        let len = freq.len().max(expected.len());
        let sum: f64 = (0..len)
            .map(|i| {
                let f = freq.get(i).copied().unwrap_or(0.0);
                let e = expected.get(i).copied().unwrap_or(0.0);
                (f - e).abs()
            })
            .sum();
        sum / 2.0
    }
}

/// Exact distribution of the final bin after `rows` decisions under `rule`.
///
/// Returns `rows + 1` probabilities summing to one (up to rounding).
pub fn terminal_distribution(rule: &dyn BranchingRule, rows: u32) -> Vec<f64> {
    let mut mass = vec![0.0f64; rows as usize + 1];
    mass[0] = 1.0;
    for row in 0..rows {
        // Walk columns downwards so each cell is read before it receives mass.
        for col in (0..=row).rev() {
            let m = mass[col as usize];
            if m == 0.0 {
                continue;
            }
            let p = rule.branch_probability(row, col);
            mass[col as usize + 1] += m * p;
            mass[col as usize] = m * (1.0 - p);
        }
    }
    mass
}

/// Binomial(`n`, `p`) probabilities for `k = 0..=n`.
pub fn binomial_pmf(n: u32, p: f64) -> Vec<f64> {
    let mut out = Vec::with_capacity(n as usize + 1);
    let mut choose = 1.0f64;
    for k in 0..=n {
        out.push(choose * p.powi(k as i32) * (1.0 - p).powi((n - k) as i32));
        choose *= (n - k) as f64 / (k + 1) as f64;
    }
    out
}

/// Beta-binomial(`n`, `alpha`, `beta`) probabilities for `k = 0..=n`.
pub fn beta_binomial_pmf(n: u32, alpha: f64, beta: f64) -> Vec<f64> {
    let mut p = (0..n)
        .map(|j| (beta + j as f64) / (alpha + beta + j as f64))
        .product::<f64>();
    let mut out = Vec::with_capacity(n as usize + 1);
    for k in 0..=n {
        out.push(p);
        if k < n {
            let remaining = (n - k) as f64;
            p *= remaining / (k + 1) as f64 * (k as f64 + alpha) / (remaining - 1.0 + beta);
        }
    }
    out
}

impl BranchRule {
    /// Closed-form law of the final bin on a board with `rows` rows.
    pub fn terminal_distribution(&self, rows: u32) -> Vec<f64> {
        match *self {
            BranchRule::FairCoin => binomial_pmf(rows, 0.5),
            BranchRule::Polya { alpha, beta } => beta_binomial_pmf(rows, alpha, beta),
        }
    }
}
