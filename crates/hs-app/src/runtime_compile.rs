//! Runtime compilation of a `Project` into solver-ready values.

use hs_components::{
    HeatExchanger, Material, PipeSpec, Pump, PumpCatalog, PumpEconomics, PumpTarget, Schedule,
};
use hs_core::units::{Pressure, kgpm3, m, mps2, pa, pas};
use hs_fluids::{DemandProfile, FluidProperties, Hydraulics, LoadBlock};
use hs_project::schema::{
    DemandDef, DesignSpaceDef, FluidDef, MaterialDef, Project, PumpDef, TargetDef,
};
use hs_solver::{FixedPointConfig, SectionRoute, SiteGeometry};

use crate::error::{AppError, AppResult};

/// Everything a sweep needs, with the project's plain numbers turned into
/// validated physical types.
#[derive(Debug, Clone)]
pub struct SweepRuntime {
    pub name: String,
    pub demand: DemandProfile,
    pub hydraulics: Hydraulics,
    pub site: SiteGeometry,
    pub fixed_point: FixedPointConfig,
    pub routes: Vec<SectionRoute>,
    /// Minimum pressure that must remain after each exchanger
    pub min_pressure: Pressure,
    pub economics: PumpEconomics,
    pub target: PumpTarget,
    /// Pipe design space in enumeration order: OD, then schedule, then material
    pub pipes: Vec<PipeSpec>,
    pub heat_exchangers: Vec<HeatExchanger>,
    pub pumps: PumpCatalog,
}

impl SweepRuntime {
    pub fn candidate_count(&self) -> usize {
        self.pipes.len() * self.heat_exchangers.len()
    }
}

/// Compile a validated project.
pub fn compile_project(project: &Project) -> AppResult<SweepRuntime> {
    let fluid = build_fluid(&project.fluid)?;
    let demand = build_demand(&project.demand);
    let hydraulics = Hydraulics::from_demand(fluid, &demand)?;

    let site = SiteGeometry {
        trench_depth: m(project.site.trench_depth_m),
        supply_elevation: m(project.site.supply_elevation_m),
        return_elevation: m(project.site.return_elevation_m),
    };
    site.validate()?;

    let fixed_point = FixedPointConfig {
        tolerance: project.solver.tolerance_m,
        max_iterations: project.solver.max_iterations,
        initial_slant: 0.0,
    };
    fixed_point.validate()?;

    let routes = project
        .sections
        .iter()
        .map(|s| SectionRoute::new(s.id.clone(), m(s.z0_m), m(s.z2_m), m(s.adjacent_m)))
        .collect();

    let heat_exchangers = project
        .heat_exchangers
        .iter()
        .map(|hx| HeatExchanger::new(hx.name.clone(), hx.capital_cost, hx.k_factor))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(SweepRuntime {
        name: project.name.clone(),
        demand,
        hydraulics,
        site,
        fixed_point,
        routes,
        min_pressure: pa(project.economics.min_pressure_pa),
        economics: PumpEconomics {
            lifetime_years: project.economics.lifetime_years,
            energy_unit_cost: project.economics.energy_unit_cost,
        },
        target: convert_target(project.economics.target),
        pipes: build_pipes(&project.design_space)?,
        heat_exchangers,
        pumps: build_pumps(&project.pumps)?,
    })
}

pub fn build_fluid(def: &FluidDef) -> AppResult<FluidProperties> {
    Ok(FluidProperties::new(
        kgpm3(def.density_kg_m3),
        pas(def.viscosity_pa_s),
        mps2(def.gravity_m_s2),
    )?)
}

pub fn build_demand(def: &DemandDef) -> DemandProfile {
    DemandProfile {
        blocks: def
            .blocks
            .iter()
            .map(|b| LoadBlock {
                load_kw: b.load_kw,
                hours_per_year: b.hours_per_year,
            })
            .collect(),
        multiplier: def.multiplier,
        specific_heat_kj_per_kg_k: def.specific_heat_kj_per_kg_k,
        temperature_rise_k: def.temperature_rise_k,
    }
}

pub fn build_pumps(defs: &[PumpDef]) -> AppResult<PumpCatalog> {
    let pumps = defs
        .iter()
        .map(|p| {
            Pump::new(
                p.name.clone(),
                p.speed_rpm,
                p.capital_cost,
                m(p.rated_head_m),
                p.efficiency,
            )
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(PumpCatalog::new(pumps)?)
}

/// Expand the design space in OD → schedule → material order.
pub fn build_pipes(def: &DesignSpaceDef) -> AppResult<Vec<PipeSpec>> {
    let schedules = def
        .schedules
        .iter()
        .map(|&s| Schedule::try_from(s))
        .collect::<Result<Vec<_>, _>>()?;

    let mut pipes =
        Vec::with_capacity(def.outer_diameters_in.len() * schedules.len() * def.materials.len());
    for &od in &def.outer_diameters_in {
        for &schedule in &schedules {
            for &material in &def.materials {
                pipes.push(PipeSpec::new(od, schedule, convert_material(material)));
            }
        }
    }

    if pipes.is_empty() {
        return Err(AppError::Compile("design space is empty".to_string()));
    }
    Ok(pipes)
}

pub fn convert_material(def: MaterialDef) -> Material {
    match def {
        MaterialDef::Steel => Material::Steel,
        MaterialDef::Pvc => Material::Pvc,
    }
}

pub fn convert_target(def: TargetDef) -> PumpTarget {
    match def {
        TargetDef::Cost => PumpTarget::Cost,
        TargetDef::Power => PumpTarget::Power,
    }
}
