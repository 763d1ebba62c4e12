use thiserror::Error;

pub type HsResult<T> = Result<T, HsError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum HsError {
    #[error("Non-finite numeric value for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Value for {what} must be positive, got {value}")]
    NotPositive { what: &'static str, value: f64 },

    #[error("Invariant violated: {what}")]
    Invariant { what: &'static str },
}
