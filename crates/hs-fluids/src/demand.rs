//! Annual thermal demand and the volumetric flow it implies.
//!
//! The heat delivered per year is spread evenly over the hours of a year and
//! carried by water warmed through a fixed temperature rise, which fixes the
//! design flow shared by every candidate in a sweep.

use crate::error::{FluidError, FluidResult};
use crate::properties::FluidProperties;
use hs_core::numeric::{ensure_finite, ensure_positive};
use hs_core::units::{VolumeRate, constants, m3ps};

/// One block of the load-duration profile.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoadBlock {
    pub load_kw: f64,
    pub hours_per_year: f64,
}

impl LoadBlock {
    pub const fn new(load_kw: f64, hours_per_year: f64) -> Self {
        Self {
            load_kw,
            hours_per_year,
        }
    }

    pub fn energy_kwh(&self) -> f64 {
        self.load_kw * self.hours_per_year
    }
}

/// Annual demand schedule.
#[derive(Debug, Clone, PartialEq)]
pub struct DemandProfile {
    pub blocks: Vec<LoadBlock>,
    /// Number of identical consumers sharing the profile.
    pub multiplier: f64,
    /// kJ/(kg·K)
    pub specific_heat_kj_per_kg_k: f64,
    /// Supply-to-return temperature rise (K)
    pub temperature_rise_k: f64,
}

impl Default for DemandProfile {
    fn default() -> Self {
        Self {
            blocks: vec![
                LoadBlock::new(15_000.0, 15.0),
                LoadBlock::new(12_000.0, 45.0),
                LoadBlock::new(5_000.0, 80.0),
            ],
            multiplier: 4.0,
            specific_heat_kj_per_kg_k: 4.2,
            temperature_rise_k: 20.0,
        }
    }
}

impl DemandProfile {
    /// Total delivered energy in kWh/yr.
    pub fn annual_energy_kwh(&self) -> f64 {
        self.multiplier * self.blocks.iter().map(LoadBlock::energy_kwh).sum::<f64>()
    }

    /// Volumetric flow needed to carry the demand, in m³/hr.
    pub fn flow_m3_per_hour(&self, fluid: &FluidProperties) -> FluidResult<f64> {
        if self.blocks.is_empty() {
            return Err(FluidError::InvalidArg {
                what: "demand profile has no load blocks",
            });
        }
        ensure_positive(self.multiplier, "demand multiplier")?;
        ensure_positive(self.specific_heat_kj_per_kg_k, "specific heat")?;
        ensure_positive(self.temperature_rise_k, "temperature rise")?;

        let kj_per_year = self.annual_energy_kwh() * 3600.0;
        let kj_per_hour = kj_per_year / constants::HOURS_PER_YEAR;
        let m3_per_hour = kj_per_hour
            / (self.specific_heat_kj_per_kg_k * self.temperature_rise_k * fluid.density.value);

        Ok(ensure_positive(m3_per_hour, "design flow")?)
    }

    /// Volumetric flow needed to carry the demand, in SI (m³/s).
    pub fn flow_rate(&self, fluid: &FluidProperties) -> FluidResult<VolumeRate> {
        let per_second = self.flow_m3_per_hour(fluid)? / 3600.0;
        Ok(m3ps(ensure_finite(per_second, "design flow")?))
    }
}
