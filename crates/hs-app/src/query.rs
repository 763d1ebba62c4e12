//! Flow and pipe queries that need no sweep.

use hs_components::resolve_pipe;

use crate::error::AppResult;
use crate::runtime_compile::SweepRuntime;

/// Derived design flow.
#[derive(Debug, Clone, PartialEq)]
pub struct FlowSummary {
    pub annual_energy_kwh: f64,
    pub flow_m3_per_hour: f64,
    pub flow_m3_per_s: f64,
    pub pipes: Vec<PipeVelocity>,
}

/// Bore and mean velocity of one pipe in the design space.
#[derive(Debug, Clone, PartialEq)]
pub struct PipeVelocity {
    pub label: String,
    pub inner_diameter_m: f64,
    pub velocity_m_per_s: f64,
    /// Pressure rating as head
    pub max_head_m: f64,
}

pub fn flow_summary(runtime: &SweepRuntime) -> AppResult<FlowSummary> {
    let hyd = &runtime.hydraulics;
    let pipes = runtime
        .pipes
        .iter()
        .map(|spec| -> AppResult<PipeVelocity> {
            let pipe = resolve_pipe(spec)?;
            Ok(PipeVelocity {
                label: spec.to_string(),
                inner_diameter_m: pipe.inner_diameter.value,
                velocity_m_per_s: hyd.velocity(pipe.inner_diameter)?.value,
                max_head_m: pipe.max_head.value,
            })
        })
        .collect::<AppResult<Vec<_>>>()?;

    Ok(FlowSummary {
        annual_energy_kwh: runtime.demand.annual_energy_kwh(),
        flow_m3_per_hour: hyd.flow.value * 3600.0,
        flow_m3_per_s: hyd.flow.value,
        pipes,
    })
}
