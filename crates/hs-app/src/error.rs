//! Error types for the hs-app service layer.

use std::path::PathBuf;

/// Application error type that wraps errors from the backend crates and gives
/// the CLI one error to report.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Project error: {0}")]
    Project(String),

    #[error("Project validation failed: {0}")]
    Validation(String),

    #[error("Runtime compilation failed: {0}")]
    Compile(String),

    #[error("Solver error: {0}")]
    Solver(String),

    #[error("Candidate not found: {0}")]
    CandidateNotFound(String),

    #[error("Failed to write report: {path}")]
    ReportWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for hs-app operations.
pub type AppResult<T> = Result<T, AppError>;

impl From<hs_project::ProjectError> for AppError {
    fn from(err: hs_project::ProjectError) -> Self {
        match err {
            hs_project::ProjectError::Validation(v) => AppError::Validation(v.to_string()),
            other => AppError::Project(other.to_string()),
        }
    }
}

impl From<hs_project::ValidationError> for AppError {
    fn from(err: hs_project::ValidationError) -> Self {
        AppError::Validation(err.to_string())
    }
}

impl From<hs_solver::SolverError> for AppError {
    fn from(err: hs_solver::SolverError) -> Self {
        AppError::Solver(err.to_string())
    }
}

impl From<hs_components::ComponentError> for AppError {
    fn from(err: hs_components::ComponentError) -> Self {
        AppError::Compile(err.to_string())
    }
}

impl From<hs_fluids::FluidError> for AppError {
    fn from(err: hs_fluids::FluidError) -> Self {
        AppError::Compile(err.to_string())
    }
}
