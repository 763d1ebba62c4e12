//! Error types for component operations.

use hs_core::error::HsError;
use thiserror::Error;

/// Errors that can occur while resolving or selecting catalog parts.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ComponentError {
    #[error("Non-physical value: {what}")]
    NonPhysical { what: &'static str },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Unsupported pipe schedule: {schedule}")]
    UnsupportedSchedule { schedule: u32 },

    #[error("Unknown pipe material: {name}")]
    UnknownMaterial { name: String },

    #[error("Catalog is empty: {what}")]
    EmptyCatalog { what: &'static str },

    #[error("No pump meets required head {required_head_m:.3} m (largest rated head {max_rated_head_m:.3} m)")]
    NoEligiblePump {
        required_head_m: f64,
        max_rated_head_m: f64,
    },
}

pub type ComponentResult<T> = Result<T, ComponentError>;

impl From<ComponentError> for HsError {
    fn from(e: ComponentError) -> Self {
        match e {
            ComponentError::NonPhysical { what } => HsError::InvalidArg { what },
            ComponentError::InvalidArg { what } => HsError::InvalidArg { what },
            ComponentError::UnsupportedSchedule { .. } => HsError::InvalidArg {
                what: "pipe schedule",
            },
            ComponentError::UnknownMaterial { .. } => HsError::InvalidArg {
                what: "pipe material",
            },
            ComponentError::EmptyCatalog { what } => HsError::InvalidArg { what },
            ComponentError::NoEligiblePump { .. } => HsError::Invariant {
                what: "no eligible pump",
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = ComponentError::NonPhysical { what: "diameter" };
        assert!(err.to_string().contains("diameter"));

        let err = ComponentError::NoEligiblePump {
            required_head_m: 42.0,
            max_rated_head_m: 30.0,
        };
        let msg = err.to_string();
        assert!(msg.contains("42.000"));
        assert!(msg.contains("30.000"));
    }

    #[test]
    fn error_conversion() {
        let comp_err = ComponentError::InvalidArg { what: "test" };
        let hs_err: HsError = comp_err.into();
        assert!(matches!(hs_err, HsError::InvalidArg { .. }));
    }
}
