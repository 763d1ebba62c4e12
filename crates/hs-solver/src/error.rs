//! Error types for solver operations.

use hs_components::ComponentError;
use hs_core::error::HsError;
use hs_fluids::FluidError;
use thiserror::Error;

/// Errors that can occur while solving a section.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SolverError {
    #[error("Invalid solver configuration: {what}")]
    InvalidConfig { what: &'static str },

    #[error(
        "Fixed-point iteration diverged after {iterations} iterations (last error {last_error:e})"
    )]
    Divergence { iterations: usize, last_error: f64 },

    #[error("Component error: {0}")]
    Component(#[from] ComponentError),

    #[error("Fluid error: {0}")]
    Fluid(#[from] FluidError),

    #[error("Numeric error: {what}")]
    Numeric { what: String },
}

pub type SolverResult<T> = Result<T, SolverError>;

impl From<SolverError> for HsError {
    fn from(e: SolverError) -> Self {
        match e {
            SolverError::InvalidConfig { what } => HsError::InvalidArg { what },
            SolverError::Divergence { .. } => HsError::Invariant {
                what: "fixed-point convergence",
            },
            SolverError::Component(err) => err.into(),
            SolverError::Fluid(err) => err.into(),
            SolverError::Numeric { .. } => HsError::InvalidArg { what: "numeric" },
        }
    }
}
