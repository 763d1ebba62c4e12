//! Design-space search.
//!
//! Every (pipe, heat exchanger) pair is evaluated independently against the
//! shared runtime. A candidate either becomes a `FeasibleDesign` with totals
//! over all sections, or records why it was rejected. Rejections never stop
//! the sweep.

use hs_components::{ComponentError, HeatExchanger, PipeSpec, resolve_pipe};
use hs_solver::{SectionResult, SectionSolver, SolverError};
use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, info};

use crate::optimum::OptimalDesignSet;
use crate::runtime_compile::SweepRuntime;

/// One point of the design space.
#[derive(Debug, Clone, PartialEq)]
pub struct DesignCandidate {
    /// Position in enumeration order
    pub index: usize,
    pub pipe: PipeSpec,
    pub heat_exchanger: HeatExchanger,
}

impl DesignCandidate {
    pub fn label(&self) -> String {
        format!("{} + {}", self.pipe, self.heat_exchanger.name)
    }
}

/// Sums over every section of a feasible design.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DesignTotals {
    pub length_m: f64,
    /// Pipe, pump and heat exchanger purchases
    pub capital_cost: f64,
    /// $/hr
    pub operating_cost: f64,
    /// Capital plus lifetime operating cost
    pub lifetime_cost: f64,
    pub power_kw: f64,
}

impl DesignTotals {
    fn is_finite(&self) -> bool {
        [
            self.length_m,
            self.capital_cost,
            self.operating_cost,
            self.lifetime_cost,
            self.power_kw,
        ]
        .iter()
        .all(|v| v.is_finite())
    }
}

/// A candidate whose every section solved and found a pump.
#[derive(Debug, Clone, PartialEq)]
pub struct FeasibleDesign {
    pub candidate: DesignCandidate,
    /// Head required upstream of the exchanger
    pub p2_head_m: f64,
    pub sections: Vec<SectionResult>,
    pub totals: DesignTotals,
}

/// Why a candidate was rejected.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CandidateFailure {
    /// Exchanger inlet head exceeds the pipe's rating
    InfeasiblePressure {
        p2_head_m: f64,
        max_head_m: f64,
        excess_m: f64,
    },
    SolverDivergence {
        section: String,
        iterations: usize,
        last_error: f64,
    },
    NoEligiblePump {
        section: String,
        required_head_m: f64,
        max_rated_head_m: f64,
    },
    NumericFault {
        section: Option<String>,
        message: String,
    },
}

impl CandidateFailure {
    pub fn kind(&self) -> &'static str {
        match self {
            CandidateFailure::InfeasiblePressure { .. } => "infeasible_pressure",
            CandidateFailure::SolverDivergence { .. } => "solver_divergence",
            CandidateFailure::NoEligiblePump { .. } => "no_eligible_pump",
            CandidateFailure::NumericFault { .. } => "numeric_fault",
        }
    }

    fn from_solver(section: &str, err: SolverError) -> Self {
        match err {
            SolverError::Divergence {
                iterations,
                last_error,
            } => CandidateFailure::SolverDivergence {
                section: section.to_string(),
                iterations,
                last_error,
            },
            SolverError::Component(ComponentError::NoEligiblePump {
                required_head_m,
                max_rated_head_m,
            }) => CandidateFailure::NoEligiblePump {
                section: section.to_string(),
                required_head_m,
                max_rated_head_m,
            },
            other => CandidateFailure::NumericFault {
                section: Some(section.to_string()),
                message: other.to_string(),
            },
        }
    }

    fn numeric(message: impl ToString) -> Self {
        CandidateFailure::NumericFault {
            section: None,
            message: message.to_string(),
        }
    }
}

impl std::fmt::Display for CandidateFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CandidateFailure::InfeasiblePressure {
                p2_head_m,
                max_head_m,
                excess_m,
            } => write!(
                f,
                "pressure {p2_head_m:.2} m exceeds rating {max_head_m:.2} m by {excess_m:.2} m"
            ),
            CandidateFailure::SolverDivergence {
                section,
                iterations,
                last_error,
            } => write!(
                f,
                "section {section} diverged after {iterations} iterations (last error {last_error:e})"
            ),
            CandidateFailure::NoEligiblePump {
                section,
                required_head_m,
                max_rated_head_m,
            } => write!(
                f,
                "section {section} needs {required_head_m:.2} m, largest pump gives {max_rated_head_m:.2} m"
            ),
            CandidateFailure::NumericFault { section, message } => match section {
                Some(section) => write!(f, "section {section}: {message}"),
                None => write!(f, "{message}"),
            },
        }
    }
}

/// Verdict for one candidate.
#[derive(Debug, Clone, PartialEq)]
pub enum CandidateOutcome {
    Feasible(FeasibleDesign),
    Rejected {
        candidate: DesignCandidate,
        failure: CandidateFailure,
    },
}

impl CandidateOutcome {
    pub fn candidate(&self) -> &DesignCandidate {
        match self {
            CandidateOutcome::Feasible(design) => &design.candidate,
            CandidateOutcome::Rejected { candidate, .. } => candidate,
        }
    }

    pub fn feasible(&self) -> Option<&FeasibleDesign> {
        match self {
            CandidateOutcome::Feasible(design) => Some(design),
            CandidateOutcome::Rejected { .. } => None,
        }
    }

    pub fn failure(&self) -> Option<&CandidateFailure> {
        match self {
            CandidateOutcome::Feasible(_) => None,
            CandidateOutcome::Rejected { failure, .. } => Some(failure),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchOptions {
    /// Evaluate candidates on the rayon thread pool
    pub parallel: bool,
}

/// Every outcome in enumeration order plus the optimum set.
#[derive(Debug, Clone)]
pub struct SweepOutcome {
    pub outcomes: Vec<CandidateOutcome>,
    pub optima: OptimalDesignSet,
}

impl SweepOutcome {
    pub fn feasible_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.feasible().is_some()).count()
    }

    pub fn rejected_count(&self) -> usize {
        self.outcomes.len() - self.feasible_count()
    }
}

/// Cartesian product in OD → schedule → material → heat exchanger order.
pub fn enumerate_candidates(runtime: &SweepRuntime) -> Vec<DesignCandidate> {
    runtime
        .pipes
        .iter()
        .flat_map(|pipe| {
            runtime
                .heat_exchangers
                .iter()
                .map(move |hx| (*pipe, hx.clone()))
        })
        .enumerate()
        .map(|(index, (pipe, heat_exchanger))| DesignCandidate {
            index,
            pipe,
            heat_exchanger,
        })
        .collect()
}

/// Evaluate a single candidate against the runtime.
pub fn evaluate_candidate(runtime: &SweepRuntime, candidate: &DesignCandidate) -> CandidateOutcome {
    let outcome = match try_evaluate(runtime, candidate) {
        Ok(design) => CandidateOutcome::Feasible(design),
        Err(failure) => CandidateOutcome::Rejected {
            candidate: candidate.clone(),
            failure,
        },
    };

    match &outcome {
        CandidateOutcome::Feasible(design) => debug!(
            candidate = candidate.index,
            design = %candidate.label(),
            capital = design.totals.capital_cost,
            lifetime = design.totals.lifetime_cost,
            power_kw = design.totals.power_kw,
            "feasible"
        ),
        CandidateOutcome::Rejected { failure, .. } => debug!(
            candidate = candidate.index,
            design = %candidate.label(),
            reason = %failure,
            "rejected"
        ),
    }
    outcome
}

fn try_evaluate(
    runtime: &SweepRuntime,
    candidate: &DesignCandidate,
) -> Result<FeasibleDesign, CandidateFailure> {
    let pipe = resolve_pipe(&candidate.pipe).map_err(CandidateFailure::numeric)?;
    let hx = &candidate.heat_exchanger;
    let heads = runtime
        .hydraulics
        .pressures_to_head(pipe.inner_diameter, hx.k_factor, runtime.min_pressure)
        .map_err(CandidateFailure::numeric)?;

    if heads.p2 > pipe.max_head {
        return Err(CandidateFailure::InfeasiblePressure {
            p2_head_m: heads.p2.value,
            max_head_m: pipe.max_head.value,
            excess_m: (heads.p2 - pipe.max_head).value,
        });
    }

    let solver = SectionSolver::new(
        &runtime.hydraulics,
        &runtime.site,
        &runtime.fixed_point,
        &runtime.pumps,
        &runtime.economics,
        runtime.target,
    );

    let sections = runtime
        .routes
        .iter()
        .map(|route| {
            solver
                .solve(&pipe, &heads, route)
                .map_err(|err| CandidateFailure::from_solver(&route.id, err))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let totals = summarize(&sections, hx);
    if !totals.is_finite() {
        return Err(CandidateFailure::numeric("non-finite design totals"));
    }

    Ok(FeasibleDesign {
        candidate: candidate.clone(),
        p2_head_m: heads.p2.value,
        sections,
        totals,
    })
}

/// One heat exchanger is bought per section.
fn summarize(sections: &[SectionResult], hx: &HeatExchanger) -> DesignTotals {
    let mut totals = DesignTotals {
        length_m: 0.0,
        capital_cost: 0.0,
        operating_cost: 0.0,
        lifetime_cost: 0.0,
        power_kw: 0.0,
    };
    let mut lifetime_operating = 0.0;
    for section in sections {
        totals.length_m += section.length.value;
        totals.capital_cost += section.capital_cost() + hx.capital_cost;
        totals.operating_cost += section.operating_cost();
        totals.power_kw += section.power_kw();
        lifetime_operating += section.lifetime_operating_cost();
    }
    totals.lifetime_cost = totals.capital_cost + lifetime_operating;
    totals
}

/// Evaluate the whole design space and reduce it to the optimum set.
///
/// With `options.parallel` the evaluations run on rayon, but the outcomes are
/// collected in enumeration order and folded sequentially, so ties break the
/// same way in both modes.
pub fn run_sweep(runtime: &SweepRuntime, options: &SearchOptions) -> SweepOutcome {
    let candidates = enumerate_candidates(runtime);
    info!(
        project = %runtime.name,
        candidates = candidates.len(),
        sections = runtime.routes.len(),
        target = %runtime.target,
        parallel = options.parallel,
        "starting design sweep"
    );

    let outcomes: Vec<CandidateOutcome> = if options.parallel {
        candidates
            .par_iter()
            .map(|c| evaluate_candidate(runtime, c))
            .collect()
    } else {
        candidates
            .iter()
            .map(|c| evaluate_candidate(runtime, c))
            .collect()
    };

    let mut optima = OptimalDesignSet::new();
    for design in outcomes.iter().filter_map(CandidateOutcome::feasible) {
        optima.offer(design);
    }

    let sweep = SweepOutcome { outcomes, optima };
    info!(
        feasible = sweep.feasible_count(),
        rejected = sweep.rejected_count(),
        "design sweep finished"
    );
    sweep
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime_compile::compile_project;
    use hs_project::schema::{HeatExchangerDef, Project, PumpDef};

    fn runtime(hx: Vec<(f64, f64)>) -> SweepRuntime {
        let project = Project::with_catalogs(
            "search",
            hx.into_iter()
                .enumerate()
                .map(|(i, (capital_cost, k_factor))| HeatExchangerDef {
                    name: format!("HX-{i}"),
                    capital_cost,
                    k_factor,
                })
                .collect(),
            vec![
                PumpDef {
                    name: "P-40".to_string(),
                    speed_rpm: 1750.0,
                    capital_cost: 2500.0,
                    rated_head_m: 40.0,
                    efficiency: 0.6,
                },
                PumpDef {
                    name: "P-70".to_string(),
                    speed_rpm: 3500.0,
                    capital_cost: 4800.0,
                    rated_head_m: 70.0,
                    efficiency: 0.7,
                },
            ],
        );
        compile_project(&project).unwrap()
    }

    #[test]
    fn enumeration_is_od_schedule_material_hx() {
        let rt = runtime(vec![(1000.0, 2.0), (1500.0, 1.0)]);
        let candidates = enumerate_candidates(&rt);
        assert_eq!(candidates.len(), 11 * 2 * 2 * 2);
        assert_eq!(candidates[0].heat_exchanger.name, "HX-0");
        assert_eq!(candidates[1].heat_exchanger.name, "HX-1");
        assert_eq!(candidates[1].pipe, candidates[0].pipe);
        assert_ne!(candidates[2].pipe, candidates[0].pipe);
        assert!(candidates.iter().enumerate().all(|(i, c)| c.index == i));
    }

    #[test]
    fn huge_k_is_infeasible_pressure_without_solving() {
        let rt = runtime(vec![(1000.0, 1.0e6)]);
        let candidate = enumerate_candidates(&rt).remove(0);
        assert_eq!(candidate.pipe.outer_diameter_in, 1.0);

        match evaluate_candidate(&rt, &candidate) {
            CandidateOutcome::Rejected {
                failure:
                    CandidateFailure::InfeasiblePressure {
                        p2_head_m,
                        max_head_m,
                        excess_m,
                    },
                ..
            } => {
                assert_eq!(max_head_m, 154.71);
                assert!(p2_head_m > max_head_m);
                assert!((excess_m - (p2_head_m - max_head_m)).abs() < 1e-9);
            }
            other => panic!("expected infeasible pressure, got {other:?}"),
        }
    }

    #[test]
    fn feasible_totals_add_up() {
        let rt = runtime(vec![(1000.0, 2.0)]);
        let candidate = enumerate_candidates(&rt)
            .into_iter()
            .find(|c| c.pipe.outer_diameter_in == 4.0)
            .unwrap();

        let design = match evaluate_candidate(&rt, &candidate) {
            CandidateOutcome::Feasible(design) => design,
            other => panic!("expected feasible, got {other:?}"),
        };
        assert_eq!(design.sections.len(), 4);

        let length: f64 = design.sections.iter().map(|s| s.length.value).sum();
        let capital: f64 = design
            .sections
            .iter()
            .map(|s| s.pipe_cost + s.pump.capital_cost + 1000.0)
            .sum();
        let lifetime_op: f64 = design
            .sections
            .iter()
            .map(|s| s.pump.duty.lifetime_operating_cost)
            .sum();
        assert!((design.totals.length_m - length).abs() < 1e-9);
        assert!((design.totals.capital_cost - capital).abs() < 1e-6);
        assert!((design.totals.lifetime_cost - (capital + lifetime_op)).abs() < 1e-3);
    }

    #[test]
    fn undersized_pipes_are_rejected_not_fatal() {
        let rt = runtime(vec![(1000.0, 2.0)]);
        let sweep = run_sweep(&rt, &SearchOptions::default());
        assert_eq!(sweep.outcomes.len(), rt.candidate_count());

        let one_inch = &sweep.outcomes[0];
        assert_eq!(one_inch.candidate().pipe.outer_diameter_in, 1.0);
        assert!(matches!(
            one_inch.failure(),
            Some(CandidateFailure::SolverDivergence { .. })
        ));
        assert!(sweep.feasible_count() > 0);
    }

    #[test]
    fn parallel_matches_sequential() {
        let rt = runtime(vec![(1000.0, 2.0), (800.0, 6.0), (2500.0, 0.5)]);
        let seq = run_sweep(&rt, &SearchOptions { parallel: false });
        let par = run_sweep(&rt, &SearchOptions { parallel: true });
        assert_eq!(seq.outcomes, par.outcomes);
        assert_eq!(seq.optima, par.optima);
    }

    #[test]
    fn failure_kinds_serialize_tagged() {
        let failure = CandidateFailure::NoEligiblePump {
            section: "S2".to_string(),
            required_head_m: 90.0,
            max_rated_head_m: 70.0,
        };
        let json = serde_json::to_value(&failure).unwrap();
        assert_eq!(json["kind"], "no_eligible_pump");
        assert_eq!(json["section"], "S2");
        assert_eq!(failure.kind(), "no_eligible_pump");
    }
}
