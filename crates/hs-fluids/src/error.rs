//! Fluid property and flow equation errors.

use hs_core::HsError;
use thiserror::Error;

/// Result type for fluid operations.
pub type FluidResult<T> = Result<T, FluidError>;

/// Errors that can occur during fluid property and flow calculations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FluidError {
    /// Non-physical values (non-positive density, diameter, etc.).
    #[error("Non-physical value for {what}")]
    NonPhysical { what: &'static str },

    /// Math domain violation, e.g. the friction-factor logarithm argument.
    #[error("Domain error in {what}: argument {argument}")]
    Domain { what: &'static str, argument: f64 },

    /// Intermediate value became NaN or infinite.
    #[error("Non-finite value for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },

    /// Invalid argument.
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },
}

impl From<HsError> for FluidError {
    fn from(err: HsError) -> Self {
        match err {
            HsError::NonFinite { what, value } => FluidError::NonFinite { what, value },
            HsError::NotPositive { what, .. } => FluidError::NonPhysical { what },
            HsError::InvalidArg { what } => FluidError::InvalidArg { what },
            HsError::Invariant { what } => FluidError::InvalidArg { what },
        }
    }
}

impl From<FluidError> for HsError {
    fn from(err: FluidError) -> Self {
        match err {
            FluidError::NonPhysical { what } => HsError::Invariant { what },
            FluidError::Domain { what, argument } => HsError::NonFinite {
                what,
                value: argument,
            },
            FluidError::NonFinite { what, value } => HsError::NonFinite { what, value },
            FluidError::InvalidArg { what } => HsError::InvalidArg { what },
        }
    }
}
