//! Bounded fixed-point iteration.

use crate::error::{SolverError, SolverResult};
use tracing::trace;

/// Fixed-point iteration configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedPointConfig {
    /// Stop once successive iterates differ by no more than this (m)
    pub tolerance: f64,
    /// Iteration cap; exceeding it is a divergence
    pub max_iterations: usize,
    /// Starting slant for segment 0 (m)
    pub initial_slant: f64,
}

impl Default for FixedPointConfig {
    fn default() -> Self {
        Self {
            tolerance: 1e-3,
            max_iterations: 500,
            initial_slant: 0.0,
        }
    }
}

impl FixedPointConfig {
    pub fn validate(&self) -> SolverResult<()> {
        if !self.tolerance.is_finite() || self.tolerance <= 0.0 {
            return Err(SolverError::InvalidConfig {
                what: "tolerance must be positive",
            });
        }
        if self.max_iterations == 0 {
            return Err(SolverError::InvalidConfig {
                what: "max_iterations must be at least 1",
            });
        }
        if !self.initial_slant.is_finite() {
            return Err(SolverError::InvalidConfig {
                what: "initial slant must be finite",
            });
        }
        Ok(())
    }
}

/// Fixed-point iteration result.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedPointResult {
    /// Converged iterate
    pub x: f64,
    /// Number of updates applied
    pub iterations: usize,
    /// Difference between the last two iterates
    pub final_error: f64,
}

/// Iterate `x ← update(x)` from `x0` until `|x_new − x| <= tolerance`.
///
/// At least one update is always applied. A non-finite iterate, or running
/// past `max_iterations`, yields `SolverError::Divergence`.
pub fn fixed_point_solve<F>(
    x0: f64,
    mut update: F,
    config: &FixedPointConfig,
) -> SolverResult<FixedPointResult>
where
    F: FnMut(f64) -> SolverResult<f64>,
{
    config.validate()?;

    let mut x = x0;
    let mut error = f64::INFINITY;

    for iter in 1..=config.max_iterations {
        let x_new = update(x)?;
        error = x_new - x;
        trace!(iteration = iter, x = x_new, error, "fixed-point step");

        if !x_new.is_finite() {
            return Err(SolverError::Divergence {
                iterations: iter,
                last_error: error,
            });
        }

        x = x_new;
        if error.abs() <= config.tolerance {
            return Ok(FixedPointResult {
                x,
                iterations: iter,
                final_error: error,
            });
        }
    }

    Err(SolverError::Divergence {
        iterations: config.max_iterations,
        last_error: error,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contraction_converges() {
        // x = cos(x), fixed point ≈ 0.739085
        let config = FixedPointConfig {
            tolerance: 1e-10,
            ..FixedPointConfig::default()
        };
        let result = fixed_point_solve(0.0, |x| Ok(x.cos()), &config).unwrap();
        assert!((result.x - 0.739_085_133_215).abs() < 1e-9);
        assert!(result.final_error.abs() <= 1e-10);
        assert!(result.iterations > 1);
    }

    #[test]
    fn starting_at_fixed_point_takes_one_step() {
        let config = FixedPointConfig::default();
        let result = fixed_point_solve(4.0, |x| Ok(0.5 * x + 2.0), &config).unwrap();
        assert_eq!(result.iterations, 1);
        assert_eq!(result.x, 4.0);
        assert_eq!(result.final_error, 0.0);
    }

    #[test]
    fn expansion_hits_iteration_cap() {
        let config = FixedPointConfig {
            max_iterations: 20,
            ..FixedPointConfig::default()
        };
        let err = fixed_point_solve(1.0, |x| Ok(2.0 * x), &config).unwrap_err();
        assert!(matches!(
            err,
            SolverError::Divergence { iterations: 20, .. }
        ));
    }

    #[test]
    fn non_finite_iterate_is_divergence() {
        let config = FixedPointConfig::default();
        let err = fixed_point_solve(1.0, |x| Ok(x * 1e300), &config).unwrap_err();
        assert!(matches!(err, SolverError::Divergence { iterations: 2, .. }));

        let err = fixed_point_solve(0.0, |_| Ok(f64::NAN), &config).unwrap_err();
        assert!(matches!(err, SolverError::Divergence { iterations: 1, .. }));
    }

    #[test]
    fn update_errors_propagate() {
        let config = FixedPointConfig::default();
        let err = fixed_point_solve(
            0.0,
            |_| {
                Err(SolverError::Numeric {
                    what: "boom".to_string(),
                })
            },
            &config,
        )
        .unwrap_err();
        assert!(matches!(err, SolverError::Numeric { .. }));
    }

    #[test]
    fn invalid_config_rejected() {
        let config = FixedPointConfig {
            tolerance: 0.0,
            ..FixedPointConfig::default()
        };
        assert!(matches!(
            fixed_point_solve(0.0, |x| Ok(x), &config),
            Err(SolverError::InvalidConfig { .. })
        ));

        let config = FixedPointConfig {
            max_iterations: 0,
            ..FixedPointConfig::default()
        };
        assert!(fixed_point_solve(0.0, |x| Ok(x), &config).is_err());
    }
}
