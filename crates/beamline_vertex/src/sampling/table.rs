//! Prefix-sum table for weighted discrete selection.
use rand::RngCore;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::sampling::rand01;

/// Cumulative interaction probabilities over an ordered set of segments.
///
/// `cumulative()[i]` is the sum of weights `0..=i`, so the table is non-decreasing and
/// its last entry equals [`CumulativeTable::total`].
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct CumulativeTable {
    cumulative: Vec<f64>,
    total: f64,
    last_positive: usize,
}

impl CumulativeTable {
    /// Build a table from weights in insertion order.
    ///
    /// Fails with [`Error::Configuration`] for an empty input, a negative or non-finite
    /// weight, or a non-positive total.
    pub fn build<I>(weights: I) -> Result<Self>
    where
        I: IntoIterator<Item = f64>,
    {
        let mut cumulative = Vec::new();
        let mut total = 0.0;
        let mut last_positive = None;

        for (i, w) in weights.into_iter().enumerate() {
            if !w.is_finite() || w < 0.0 {
                return Err(Error::Configuration(format!(
                    "interaction probability of segment {i} must be finite and >= 0, got {w}"
                )));
            }
            total += w;
            cumulative.push(total);
            if w > 0.0 {
                last_positive = Some(i);
            }
        }

        if cumulative.is_empty() {
            return Err(Error::Configuration(
                "no interactable beamline segments".into(),
            ));
        }
        let Some(last_positive) = last_positive.filter(|_| total > 0.0 && total.is_finite())
        else {
            return Err(Error::Configuration(format!(
                "total interaction probability must be > 0, got {total}"
            )));
        };

        Ok(Self {
            cumulative,
            total,
            last_positive,
        })
    }

    /// Recompute the table in place. On error the previous table is kept.
    pub fn rebuild<I>(&mut self, weights: I) -> Result<()>
    where
        I: IntoIterator<Item = f64>,
    {
        *self = Self::build(weights)?;
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.cumulative.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cumulative.is_empty()
    }

    /// Total probability mass.
    pub fn total(&self) -> f64 {
        self.total
    }

    pub fn cumulative(&self) -> &[f64] {
        &self.cumulative
    }

    /// Weight of segment `index` recovered from the prefix sums.
    pub fn weight(&self, index: usize) -> Option<f64> {
        let hi = *self.cumulative.get(index)?;
        let lo = if index == 0 {
            0.0
        } else {
            self.cumulative[index - 1]
        };
        Some(hi - lo)
    }

    /// Smallest index `i` with `cumulative[i] > u`.
    ///
    /// A draw landing exactly on a boundary belongs to the next segment. A draw equal to
    /// the total selects the last segment with non-zero weight, which is the final entry
    /// unless the table ends in zero-weight segments; those are skipped so that a zero
    /// weight is never selected. Draws outside `[0, total]` cannot be bracketed and
    /// return [`Error::Sampling`].
    pub fn select(&self, u: f64) -> Result<usize> {
        if self.cumulative.is_empty() {
            return Err(Error::Sampling("selection from an empty table".into()));
        }
        if !(0.0..=self.total).contains(&u) {
            return Err(Error::Sampling(format!(
                "draw {u} outside [0, {}]",
                self.total
            )));
        }

        let i = self.cumulative.partition_point(|&c| c <= u);
        if i < self.cumulative.len() {
            Ok(i)
        } else {
            Ok(self.last_positive)
        }
    }

    /// Draw `u` uniformly in `[0, total)` and select.
    pub fn draw(&self, rng: &mut dyn RngCore) -> Result<usize> {
        self.select(rand01(rng) * self.total)
    }
}
