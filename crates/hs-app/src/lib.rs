//! Shared application service layer for hydrosweep.
//!
//! Turns a project file into a solver runtime, sweeps the pipe × heat
//! exchanger design space, reduces the feasible designs to one optimum per
//! objective and builds the serialisable report the CLI prints or saves.

pub mod error;
pub mod optimum;
pub mod project_service;
pub mod query;
pub mod report;
pub mod run_service;
pub mod runtime_compile;
pub mod search;

// Re-export key types for convenience
pub use error::{AppError, AppResult};
pub use optimum::{Objective, OptimalDesignSet};
pub use project_service::{
    CatalogListing, ProjectSummary, list_catalog, load_project, save_project, summarize_project,
    validate_project,
};
pub use query::{FlowSummary, PipeVelocity, flow_summary};
pub use report::{CandidateRecord, OptimumRecord, SectionRecord, SweepReport};
pub use run_service::{CandidateQuery, SweepRequest, SweepResponse, execute_sweep, solve_candidate};
pub use runtime_compile::{SweepRuntime, compile_project};
pub use search::{
    CandidateFailure, CandidateOutcome, DesignCandidate, DesignTotals, FeasibleDesign,
    SearchOptions, SweepOutcome, enumerate_candidates, evaluate_candidate, run_sweep,
};
