//! Trailing-window simple moving average over a [`Series`].
//!
//! The mean at position `i` covers values `[i - window + 1, i]`. It is absent
//! until `window` samples have been seen, and absent for every window that
//! contains an absent input value. Non-finite inputs count as absent.
//!
//! ```rust
//! use smachart_core::{rolling, Sample, Series, UtcDateTime};
//!
//! let day = |d: i64| UtcDateTime::from_unix_seconds(d * 86_400).unwrap();
//! let series: Series = [10.0, 20.0, 30.0, 40.0]
//!     .into_iter()
//!     .enumerate()
//!     .map(|(i, v)| Sample::observed(day(i as i64), v))
//!     .collect();
//!
//! let result = rolling::compute(&series, 2)?;
//! assert_eq!(result.means(), vec![None, Some(15.0), Some(25.0), Some(35.0)]);
//! # Ok::<(), smachart_core::ValidationError>(())
//! ```

use std::num::NonZeroUsize;

use serde::{Deserialize, Serialize};

use crate::{Sample, Series, UtcDateTime, ValidationError};

/// One output row, aligned with the input sample at the same position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RollingPoint {
    pub ts: UtcDateTime,
    pub value: Option<f64>,
    pub mean: Option<f64>,
}

/// Rolling mean aligned 1:1 with its input series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RollingResult {
    pub window: usize,
    pub points: Vec<RollingPoint>,
}

impl RollingResult {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RollingPoint> {
        self.points.iter()
    }

    pub fn values(&self) -> Vec<Option<f64>> {
        self.points.iter().map(|point| point.value).collect()
    }

    pub fn means(&self) -> Vec<Option<f64>> {
        self.points.iter().map(|point| point.mean).collect()
    }

    /// Count of positions with a defined mean.
    pub fn defined_means(&self) -> usize {
        self.points.iter().filter(|point| point.mean.is_some()).count()
    }

    /// Most recent defined mean, if any.
    pub fn last_mean(&self) -> Option<f64> {
        self.points.iter().rev().find_map(|point| point.mean)
    }
}

/// Stateless rolling-mean operator with a validated window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RollingMeanSeries {
    window: NonZeroUsize,
}

impl RollingMeanSeries {
    pub fn new(window: usize) -> Result<Self, ValidationError> {
        NonZeroUsize::new(window)
            .map(|window| Self { window })
            .ok_or(ValidationError::InvalidWindow { window })
    }

    pub const fn window(&self) -> usize {
        self.window.get()
    }

    /// Computes the trailing mean in a single pass.
    ///
    /// # Errors
    ///
    /// [`ValidationError::UnorderedSeries`] when timestamps are not strictly
    /// increasing. A series shorter than the window is not an error.
    pub fn compute(&self, series: &Series) -> Result<RollingResult, ValidationError> {
        series.check_ordering()?;

        let window = self.window.get();
        let samples = series.samples();
        let divisor = window as f64;
        let mut sum = CompensatedSum::default();
        let mut missing_in_window = 0_usize;
        let mut points = Vec::with_capacity(samples.len());

        for (index, sample) in samples.iter().enumerate() {
            let value = sample.finite_value();
            match value {
                Some(value) => sum.add(value),
                None => missing_in_window += 1,
            }

            if index >= window {
                match samples[index - window].finite_value() {
                    Some(value) => sum.add(-value),
                    None => missing_in_window -= 1,
                }
            }

            let current = &samples[(index + 1).saturating_sub(window)..=index];
            if !sum.total().is_finite() {
                // Overflowed; later windows must not inherit inf or NaN.
                sum = CompensatedSum::over(current.iter().filter_map(|s| s.finite_value()));
            }

            let mean = if index + 1 < window || missing_in_window > 0 {
                None
            } else if window == 1 {
                value
            } else if sum.total().is_finite() {
                Some(sum.total() / divisor)
            } else {
                scaled_mean(current, divisor)
            };

            if missing_in_window == window {
                // Nothing present is left in the window.
                sum = CompensatedSum::default();
            }

            points.push(RollingPoint {
                ts: sample.ts,
                value,
                mean,
            });
        }

        Ok(RollingResult { window, points })
    }
}

/// Computes the `window`-sample trailing mean of `series`.
///
/// # Errors
///
/// [`ValidationError::InvalidWindow`] for `window == 0`, and
/// [`ValidationError::UnorderedSeries`] for non-increasing timestamps.
pub fn compute(series: &Series, window: usize) -> Result<RollingResult, ValidationError> {
    RollingMeanSeries::new(window)?.compute(series)
}

/// Mean of a full window whose plain sum exceeds `f64::MAX`.
fn scaled_mean(window: &[Sample], divisor: f64) -> Option<f64> {
    let scaled = window
        .iter()
        .filter_map(|s| s.finite_value())
        .map(|v| v / divisor);
    let mean = CompensatedSum::over(scaled).total();
    mean.is_finite().then_some(mean)
}

/// Neumaier-compensated accumulator for the enter/leave running sum.
#[derive(Debug, Default, Clone, Copy)]
struct CompensatedSum {
    sum: f64,
    compensation: f64,
}

impl CompensatedSum {
    fn over(values: impl Iterator<Item = f64>) -> Self {
        values.fold(Self::default(), |mut acc, value| {
            acc.add(value);
            acc
        })
    }

    fn add(&mut self, value: f64) {
        let total = self.sum + value;
        if self.sum.abs() >= value.abs() {
            self.compensation += (self.sum - total) + value;
        } else {
            self.compensation += (value - total) + self.sum;
        }
        self.sum = total;
    }

    fn total(&self) -> f64 {
        self.sum + self.compensation
    }
}
