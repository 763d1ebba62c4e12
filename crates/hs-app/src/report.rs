//! Serializable sweep report.

use serde::Serialize;
use std::path::Path;

use crate::error::{AppError, AppResult};
use crate::optimum::Objective;
use crate::runtime_compile::SweepRuntime;
use crate::search::{
    CandidateFailure, CandidateOutcome, DesignCandidate, DesignTotals, FeasibleDesign,
    SweepOutcome,
};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SweepReport {
    pub project: String,
    pub target: String,
    pub flow_m3_per_s: f64,
    pub candidate_count: usize,
    pub feasible_count: usize,
    pub rejected_count: usize,
    pub candidates: Vec<CandidateRecord>,
    pub optima: Vec<OptimumRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CandidateRecord {
    pub index: usize,
    pub outer_diameter_in: f64,
    pub schedule: u32,
    pub material: String,
    pub heat_exchanger: String,
    pub feasible: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure: Option<CandidateFailure>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub totals: Option<DesignTotals>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub sections: Vec<SectionRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectionRecord {
    pub id: String,
    pub length_m: f64,
    pub slant_m: f64,
    pub iterations: usize,
    pub required_head_m: f64,
    pub pump: String,
    pub pump_power_kw: f64,
    pub pipe_cost: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OptimumRecord {
    pub objective: Objective,
    pub value: f64,
    pub unit: String,
    pub candidate_index: usize,
    pub design: String,
    pub totals: DesignTotals,
}

impl CandidateRecord {
    fn base(candidate: &DesignCandidate) -> Self {
        Self {
            index: candidate.index,
            outer_diameter_in: candidate.pipe.outer_diameter_in,
            schedule: candidate.pipe.schedule.number(),
            material: candidate.pipe.material.to_string(),
            heat_exchanger: candidate.heat_exchanger.name.clone(),
            feasible: false,
            failure: None,
            totals: None,
            sections: Vec::new(),
        }
    }

    pub fn from_outcome(outcome: &CandidateOutcome) -> Self {
        match outcome {
            CandidateOutcome::Feasible(design) => Self {
                feasible: true,
                totals: Some(design.totals),
                sections: section_records(design),
                ..Self::base(&design.candidate)
            },
            CandidateOutcome::Rejected { candidate, failure } => Self {
                failure: Some(failure.clone()),
                ..Self::base(candidate)
            },
        }
    }
}

pub fn section_records(design: &FeasibleDesign) -> Vec<SectionRecord> {
    design
        .sections
        .iter()
        .map(|s| SectionRecord {
            id: s.route_id.clone(),
            length_m: s.length.value,
            slant_m: s.slant().value,
            iterations: s.iterations(),
            required_head_m: s.required_head().value,
            pump: s.pump.name.clone(),
            pump_power_kw: s.power_kw(),
            pipe_cost: s.pipe_cost,
        })
        .collect()
}

impl SweepReport {
    pub fn build(runtime: &SweepRuntime, sweep: &SweepOutcome) -> Self {
        let optima = sweep
            .optima
            .iter()
            .map(|(objective, design)| OptimumRecord {
                objective,
                value: objective.key(&design.totals),
                unit: objective.unit().to_string(),
                candidate_index: design.candidate.index,
                design: design.candidate.label(),
                totals: design.totals,
            })
            .collect();

        Self {
            project: runtime.name.clone(),
            target: runtime.target.to_string(),
            flow_m3_per_s: runtime.hydraulics.flow.value,
            candidate_count: sweep.outcomes.len(),
            feasible_count: sweep.feasible_count(),
            rejected_count: sweep.rejected_count(),
            candidates: sweep
                .outcomes
                .iter()
                .map(CandidateRecord::from_outcome)
                .collect(),
            optima,
        }
    }

    pub fn to_json(&self) -> AppResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn write_json(&self, path: &Path) -> AppResult<()> {
        let content = self.to_json()?;
        std::fs::write(path, content).map_err(|source| AppError::ReportWrite {
            path: path.to_path_buf(),
            source,
        })
    }
}
