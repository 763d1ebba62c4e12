//! Project schema definitions.
//!
//! Everything except the two catalogs has defaults, so a minimal project file
//! is a name, a version, the heat exchangers and the pumps.

use serde::{Deserialize, Serialize};

pub const SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Project {
    pub version: u32,
    pub name: String,
    #[serde(default)]
    pub fluid: FluidDef,
    #[serde(default)]
    pub demand: DemandDef,
    #[serde(default)]
    pub economics: EconomicsDef,
    #[serde(default)]
    pub site: SiteDef,
    #[serde(default)]
    pub solver: SolverDef,
    #[serde(default = "default_sections")]
    pub sections: Vec<SectionDef>,
    #[serde(default)]
    pub design_space: DesignSpaceDef,
    pub heat_exchangers: Vec<HeatExchangerDef>,
    pub pumps: Vec<PumpDef>,
}

impl Project {
    /// A project using every default, with the given catalogs.
    pub fn with_catalogs(
        name: impl Into<String>,
        heat_exchangers: Vec<HeatExchangerDef>,
        pumps: Vec<PumpDef>,
    ) -> Self {
        Self {
            version: SCHEMA_VERSION,
            name: name.into(),
            fluid: FluidDef::default(),
            demand: DemandDef::default(),
            economics: EconomicsDef::default(),
            site: SiteDef::default(),
            solver: SolverDef::default(),
            sections: default_sections(),
            design_space: DesignSpaceDef::default(),
            heat_exchangers,
            pumps,
        }
    }

    /// Number of candidates the design space enumerates.
    pub fn candidate_count(&self) -> usize {
        self.design_space.outer_diameters_in.len()
            * self.design_space.schedules.len()
            * self.design_space.materials.len()
            * self.heat_exchangers.len()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FluidDef {
    pub density_kg_m3: f64,
    pub viscosity_pa_s: f64,
    pub gravity_m_s2: f64,
}

impl Default for FluidDef {
    fn default() -> Self {
        Self {
            density_kg_m3: 1000.0,
            viscosity_pa_s: 0.001_000_5,
            gravity_m_s2: 9.81,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoadBlockDef {
    pub load_kw: f64,
    pub hours_per_year: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DemandDef {
    pub blocks: Vec<LoadBlockDef>,
    pub multiplier: f64,
    pub specific_heat_kj_per_kg_k: f64,
    pub temperature_rise_k: f64,
}

impl Default for DemandDef {
    fn default() -> Self {
        Self {
            blocks: vec![
                LoadBlockDef {
                    load_kw: 15_000.0,
                    hours_per_year: 15.0,
                },
                LoadBlockDef {
                    load_kw: 12_000.0,
                    hours_per_year: 45.0,
                },
                LoadBlockDef {
                    load_kw: 5_000.0,
                    hours_per_year: 80.0,
                },
            ],
            multiplier: 4.0,
            specific_heat_kj_per_kg_k: 4.2,
            temperature_rise_k: 20.0,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TargetDef {
    #[default]
    Cost,
    Power,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EconomicsDef {
    /// Minimum system pressure at every exchanger outlet
    pub min_pressure_pa: f64,
    pub lifetime_years: f64,
    /// Price applied to kW·3600 per hour of operation
    pub energy_unit_cost: f64,
    /// Pump selection objective
    pub target: TargetDef,
}

impl Default for EconomicsDef {
    fn default() -> Self {
        Self {
            min_pressure_pa: 100_000.0,
            lifetime_years: 50.0,
            energy_unit_cost: 0.16,
            target: TargetDef::Cost,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SiteDef {
    pub trench_depth_m: f64,
    pub supply_elevation_m: f64,
    pub return_elevation_m: f64,
}

impl Default for SiteDef {
    fn default() -> Self {
        Self {
            trench_depth_m: 5.0,
            supply_elevation_m: 60.0,
            return_elevation_m: 62.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SolverDef {
    pub tolerance_m: f64,
    pub max_iterations: usize,
}

impl Default for SolverDef {
    fn default() -> Self {
        Self {
            tolerance_m: 0.001,
            max_iterations: 500,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SectionDef {
    pub id: String,
    pub z0_m: f64,
    pub z2_m: f64,
    pub adjacent_m: f64,
}

pub fn default_sections() -> Vec<SectionDef> {
    [
        ("S1", 72.0, 63.0, 800.0),
        ("S2", 63.0, 93.0, 400.0),
        ("S3", 93.0, 75.0, 800.0),
        ("S4", 75.0, 72.0, 500.0),
    ]
    .into_iter()
    .map(|(id, z0_m, z2_m, adjacent_m)| SectionDef {
        id: id.to_string(),
        z0_m,
        z2_m,
        adjacent_m,
    })
    .collect()
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum MaterialDef {
    #[serde(alias = "steel")]
    Steel,
    #[serde(rename = "PVC", alias = "Pvc", alias = "pvc")]
    Pvc,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DesignSpaceDef {
    pub outer_diameters_in: Vec<f64>,
    pub schedules: Vec<u32>,
    pub materials: Vec<MaterialDef>,
}

impl Default for DesignSpaceDef {
    fn default() -> Self {
        Self {
            outer_diameters_in: (0..11).map(|i| 1.0 + 0.5 * f64::from(i)).collect(),
            schedules: vec![40, 80],
            materials: vec![MaterialDef::Steel, MaterialDef::Pvc],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HeatExchangerDef {
    pub name: String,
    pub capital_cost: f64,
    pub k_factor: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PumpDef {
    pub name: String,
    #[serde(default)]
    pub speed_rpm: f64,
    pub capital_cost: f64,
    pub rated_head_m: f64,
    pub efficiency: f64,
}
