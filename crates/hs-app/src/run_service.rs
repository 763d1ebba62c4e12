//! Sweep execution service.

use hs_components::{Material, PumpTarget, Schedule};
use hs_project::schema::Project;
use std::time::Instant;

use crate::error::{AppError, AppResult};
use crate::report::SweepReport;
use crate::runtime_compile::{SweepRuntime, compile_project};
use crate::search::{
    CandidateOutcome, SearchOptions, SweepOutcome, enumerate_candidates, evaluate_candidate,
    run_sweep,
};

/// Request to sweep a project's design space.
#[derive(Debug, Clone)]
pub struct SweepRequest<'a> {
    pub project: &'a Project,
    /// Overrides the project's pump selection target
    pub target: Option<PumpTarget>,
    pub options: SearchOptions,
}

#[derive(Debug, Clone)]
pub struct SweepResponse {
    pub runtime: SweepRuntime,
    pub sweep: SweepOutcome,
    pub report: SweepReport,
    pub elapsed_s: f64,
}

fn compile_with_target(project: &Project, target: Option<PumpTarget>) -> AppResult<SweepRuntime> {
    let mut runtime = compile_project(project)?;
    if let Some(target) = target {
        runtime.target = target;
    }
    Ok(runtime)
}

pub fn execute_sweep(request: &SweepRequest<'_>) -> AppResult<SweepResponse> {
    let start = Instant::now();
    let runtime = compile_with_target(request.project, request.target)?;
    let sweep = run_sweep(&runtime, &request.options);
    let report = SweepReport::build(&runtime, &sweep);

    Ok(SweepResponse {
        runtime,
        sweep,
        report,
        elapsed_s: start.elapsed().as_secs_f64(),
    })
}

/// Identifies one candidate of the design space.
#[derive(Debug, Clone)]
pub struct CandidateQuery {
    pub outer_diameter_in: f64,
    pub schedule: u32,
    pub material: String,
    pub heat_exchanger: String,
    pub target: Option<PumpTarget>,
}

/// Solve a single candidate with full per-section detail.
pub fn solve_candidate(
    project: &Project,
    query: &CandidateQuery,
) -> AppResult<(SweepRuntime, CandidateOutcome)> {
    let runtime = compile_with_target(project, query.target)?;
    let schedule = Schedule::try_from(query.schedule)?;
    let material: Material = query.material.parse()?;

    let candidate = enumerate_candidates(&runtime)
        .into_iter()
        .find(|c| {
            c.pipe.outer_diameter_in == query.outer_diameter_in
                && c.pipe.schedule == schedule
                && c.pipe.material == material
                && c.heat_exchanger.name == query.heat_exchanger
        })
        .ok_or_else(|| {
            AppError::CandidateNotFound(format!(
                "{} in sch {} {} + {}",
                query.outer_diameter_in, schedule, material, query.heat_exchanger
            ))
        })?;

    let outcome = evaluate_candidate(&runtime, &candidate);
    Ok((runtime, outcome))
}
