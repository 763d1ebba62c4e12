//! Pipe-flow equations evaluated against a fixed fluid and design flow.

use crate::demand::DemandProfile;
use crate::error::{FluidError, FluidResult};
use crate::properties::FluidProperties;
use hs_core::numeric::{ensure_finite, ensure_positive};
use hs_core::units::{Length, Pressure, Velocity, VolumeRate, m, mps};
use std::f64::consts::PI;

/// Heads either side of a heat exchanger (m of fluid).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeadPair {
    /// Minimum system pressure expressed as head, upstream of the exchanger.
    pub p0: Length,
    /// Head required upstream so that `p0` remains after the exchanger loss.
    pub p2: Length,
}

/// Explicit hydraulic context: the liquid plus the flow every pipe carries.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hydraulics {
    pub fluid: FluidProperties,
    pub flow: VolumeRate,
}

impl Hydraulics {
    pub fn new(fluid: FluidProperties, flow: VolumeRate) -> FluidResult<Self> {
        ensure_positive(flow.value, "volumetric flow")?;
        Ok(Self { fluid, flow })
    }

    /// Derive the design flow from an annual demand profile.
    pub fn from_demand(fluid: FluidProperties, demand: &DemandProfile) -> FluidResult<Self> {
        let flow = demand.flow_rate(&fluid)?;
        Self::new(fluid, flow)
    }

    /// Mean velocity in a round pipe: 4Q / (π d²).
    pub fn velocity(&self, diameter: Length) -> FluidResult<Velocity> {
        let d = diameter.value;
        if !d.is_finite() || d <= 0.0 {
            return Err(FluidError::NonPhysical {
                what: "pipe inner diameter must be positive",
            });
        }
        let v = 4.0 * self.flow.value / (d * d * PI);
        Ok(mps(ensure_finite(v, "velocity")?))
    }

    /// Flow-length Reynolds group, ρ·v²·L / μ.
    ///
    /// This is velocity squared times run length, not the usual ρvD/μ. Every
    /// friction factor and head loss downstream is calibrated against it.
    pub fn reynolds(&self, length: Length, diameter: Length) -> FluidResult<f64> {
        let v = self.velocity(diameter)?.value;
        let re = self.fluid.density.value * v * v * length.value / self.fluid.viscosity.value;
        Ok(ensure_finite(re, "Reynolds number")?)
    }

    /// Darcy friction factor, Haaland form with the roughness term raised to 1.11.
    pub fn friction_factor(
        &self,
        length: Length,
        diameter: Length,
        roughness: Length,
    ) -> FluidResult<f64> {
        let re = self.reynolds(length, diameter)?;
        let relative = roughness.value / diameter.value / 3.7;
        let argument = relative.powf(1.11) + 6.9 / re;

        if argument.is_nan() || argument <= 0.0 {
            return Err(FluidError::Domain {
                what: "friction factor log10",
                argument,
            });
        }

        let f = (-1.8 * argument.log10()).powi(-2);
        Ok(ensure_finite(f, "friction factor")?)
    }

    /// Darcy–Weisbach head loss over `length`.
    pub fn head_loss(
        &self,
        length: Length,
        diameter: Length,
        roughness: Length,
    ) -> FluidResult<Length> {
        let v = self.velocity(diameter)?.value;
        let f = self.friction_factor(length, diameter, roughness)?;
        let hl = f * length.value * v * v / (2.0 * diameter.value * self.fluid.gravity.value);
        Ok(m(ensure_finite(hl, "head loss")?))
    }

    /// Convert the minimum system pressure to head and add the exchanger's
    /// minor loss `k·v²/2g` on top.
    pub fn pressures_to_head(
        &self,
        diameter: Length,
        k_factor: f64,
        min_pressure: Pressure,
    ) -> FluidResult<HeadPair> {
        let p0 = min_pressure.value / self.fluid.specific_weight();
        let v = self.velocity(diameter)?.value;
        let p2 = p0 + k_factor * v * v / (2.0 * self.fluid.gravity.value);
        Ok(HeadPair {
            p0: m(ensure_finite(p0, "p0 head")?),
            p2: m(ensure_finite(p2, "p2 head")?),
        })
    }
}
