//! Numeric comparison of expressions.

use cspace_cas::ComputerAlgebra;
use cspace_core::ExprHandle;

use crate::error::ApproxError;

/// The threshold below which two sampled functions are taken as equal.
pub const DEFAULT_TOLERANCE: f64 = 1e-10;

/// Where [`supremum_norm`] samples.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SamplingConfig {
    /// Left end of the interval.
    pub lower: f64,
    /// Right end of the interval.
    pub upper: f64,
    /// Number of equally spaced points, end points included.
    pub num_points: usize,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            lower: -1.0,
            upper: 1.0,
            num_points: 1000,
        }
    }
}

impl SamplingConfig {
    /// `num_points` equally spaced points of `[lower, upper]`.
    ///
    /// A single point samples `lower`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn points(&self) -> Vec<f64> {
        if self.num_points == 1 {
            return vec![self.lower];
        }
        let step = (self.upper - self.lower) / (self.num_points - 1) as f64;
        (0..self.num_points)
            .map(|i| self.lower + step * i as f64)
            .collect()
    }
}

/// Estimates `sup |f - g|` over the configured interval by sampling.
///
/// A NaN sample (for instance a pole hit exactly) makes the result NaN.
///
/// # Errors
///
/// [`ApproxError::NoSamplePoints`] for an empty configuration, or the
/// service's error when another symbol than `x` is free.
pub fn supremum_norm<C: ComputerAlgebra + ?Sized>(
    cas: &C,
    f: ExprHandle,
    g: ExprHandle,
    x: ExprHandle,
    config: &SamplingConfig,
) -> Result<f64, ApproxError> {
    if config.num_points == 0 {
        return Err(ApproxError::NoSamplePoints);
    }
    let points = config.points();
    let f_values = cas.evaluate_numeric(f, x, &points)?;
    let g_values = cas.evaluate_numeric(g, x, &points)?;
    Ok(f_values
        .iter()
        .zip(&g_values)
        .map(|(u, v)| (u - v).abs())
        .fold(0.0, |max, diff| if diff.is_nan() || diff > max { diff } else { max }))
}
