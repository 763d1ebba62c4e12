//! Project validation logic.

use crate::schema::{Project, SCHEMA_VERSION};
use hs_core::numeric::{ensure_finite, ensure_positive};
use std::collections::HashSet;

#[derive(thiserror::Error, Debug)]
pub enum ValidationError {
    #[error("Duplicate ID: {id} in {context}")]
    DuplicateId { id: String, context: String },

    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Empty list: {what}")]
    Empty { what: String },

    #[error("Unsupported feature: {feature} - {reason}")]
    Unsupported { feature: String, reason: String },

    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },
}

fn invalid(field: impl Into<String>, value: f64, reason: &str) -> ValidationError {
    ValidationError::InvalidValue {
        field: field.into(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

fn positive(field: impl Into<String>, value: f64) -> Result<(), ValidationError> {
    ensure_positive(value, "value")
        .map(|_| ())
        .map_err(|_| invalid(field, value, "must be positive"))
}

fn non_negative(field: impl Into<String>, value: f64) -> Result<(), ValidationError> {
    match ensure_finite(value, "value") {
        Ok(v) if v >= 0.0 => Ok(()),
        _ => Err(invalid(field, value, "must be non-negative")),
    }
}

fn finite(field: impl Into<String>, value: f64) -> Result<(), ValidationError> {
    ensure_finite(value, "value")
        .map(|_| ())
        .map_err(|_| invalid(field, value, "must be finite"))
}

fn not_empty<T>(items: &[T], what: &str) -> Result<(), ValidationError> {
    if items.is_empty() {
        return Err(ValidationError::Empty {
            what: what.to_string(),
        });
    }
    Ok(())
}

fn unique<'a>(
    ids: impl IntoIterator<Item = &'a String>,
    context: &str,
) -> Result<(), ValidationError> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(ValidationError::DuplicateId {
                id: id.clone(),
                context: context.to_string(),
            });
        }
    }
    Ok(())
}

pub fn validate_project(project: &Project) -> Result<(), ValidationError> {
    if project.version == 0 || project.version > SCHEMA_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: project.version,
        });
    }

    validate_physics(project)?;
    validate_geometry(project)?;
    validate_design_space(project)?;
    validate_catalogs(project)?;
    Ok(())
}

fn validate_physics(project: &Project) -> Result<(), ValidationError> {
    let fluid = &project.fluid;
    positive("fluid.density_kg_m3", fluid.density_kg_m3)?;
    positive("fluid.viscosity_pa_s", fluid.viscosity_pa_s)?;
    positive("fluid.gravity_m_s2", fluid.gravity_m_s2)?;

    let demand = &project.demand;
    not_empty(&demand.blocks, "demand.blocks")?;
    for (i, block) in demand.blocks.iter().enumerate() {
        non_negative(format!("demand.blocks[{i}].load_kw"), block.load_kw)?;
        non_negative(format!("demand.blocks[{i}].hours_per_year"), block.hours_per_year)?;
    }
    positive("demand.multiplier", demand.multiplier)?;
    positive(
        "demand.specific_heat_kj_per_kg_k",
        demand.specific_heat_kj_per_kg_k,
    )?;
    positive("demand.temperature_rise_k", demand.temperature_rise_k)?;
    let energy: f64 = demand
        .blocks
        .iter()
        .map(|b| b.load_kw * b.hours_per_year)
        .sum();
    positive("demand annual energy", energy)?;

    let econ = &project.economics;
    non_negative("economics.min_pressure_pa", econ.min_pressure_pa)?;
    non_negative("economics.lifetime_years", econ.lifetime_years)?;
    non_negative("economics.energy_unit_cost", econ.energy_unit_cost)?;

    positive("solver.tolerance_m", project.solver.tolerance_m)?;
    if project.solver.max_iterations == 0 {
        return Err(invalid(
            "solver.max_iterations",
            0.0,
            "must be at least 1",
        ));
    }
    Ok(())
}

fn validate_geometry(project: &Project) -> Result<(), ValidationError> {
    let site = &project.site;
    non_negative("site.trench_depth_m", site.trench_depth_m)?;
    finite("site.supply_elevation_m", site.supply_elevation_m)?;
    finite("site.return_elevation_m", site.return_elevation_m)?;

    not_empty(&project.sections, "sections")?;
    unique(project.sections.iter().map(|s| &s.id), "sections")?;
    for section in &project.sections {
        finite(format!("sections[{}].z0_m", section.id), section.z0_m)?;
        finite(format!("sections[{}].z2_m", section.id), section.z2_m)?;
        non_negative(format!("sections[{}].adjacent_m", section.id), section.adjacent_m)?;
    }
    Ok(())
}

fn validate_design_space(project: &Project) -> Result<(), ValidationError> {
    let space = &project.design_space;
    not_empty(&space.outer_diameters_in, "design_space.outer_diameters_in")?;
    for (i, od) in space.outer_diameters_in.iter().enumerate() {
        positive(format!("design_space.outer_diameters_in[{i}]"), *od)?;
    }

    not_empty(&space.schedules, "design_space.schedules")?;
    for schedule in &space.schedules {
        if !matches!(schedule, 40 | 80) {
            return Err(ValidationError::Unsupported {
                feature: format!("pipe schedule {schedule}"),
                reason: "only schedules 40 and 80 are tabulated".to_string(),
            });
        }
    }

    not_empty(&space.materials, "design_space.materials")?;
    Ok(())
}

fn validate_catalogs(project: &Project) -> Result<(), ValidationError> {
    not_empty(&project.heat_exchangers, "heat_exchangers")?;
    unique(
        project.heat_exchangers.iter().map(|hx| &hx.name),
        "heat_exchangers",
    )?;
    for hx in &project.heat_exchangers {
        non_negative(format!("heat_exchangers[{}].capital_cost", hx.name), hx.capital_cost)?;
        non_negative(format!("heat_exchangers[{}].k_factor", hx.name), hx.k_factor)?;
    }

    not_empty(&project.pumps, "pumps")?;
    unique(project.pumps.iter().map(|p| &p.name), "pumps")?;
    for pump in &project.pumps {
        non_negative(format!("pumps[{}].capital_cost", pump.name), pump.capital_cost)?;
        finite(format!("pumps[{}].rated_head_m", pump.name), pump.rated_head_m)?;
        finite(format!("pumps[{}].speed_rpm", pump.name), pump.speed_rpm)?;
        if !(pump.efficiency > 0.0 && pump.efficiency <= 1.0) {
            return Err(invalid(
                format!("pumps[{}].efficiency", pump.name),
                pump.efficiency,
                "must be in (0, 1]",
            ));
        }
    }
    Ok(())
}
