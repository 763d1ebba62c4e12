//! Constant liquid properties.

use crate::error::FluidResult;
use hs_core::numeric::ensure_positive;
use hs_core::units::{Accel, Density, DynVisc, constants, kgpm3, pas};

/// Liquid properties held constant for an entire sweep.
///
/// The network carries water at a single temperature, so density and
/// viscosity never vary with state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FluidProperties {
    pub density: Density,
    pub viscosity: DynVisc,
    pub gravity: Accel,
}

impl FluidProperties {
    /// Create a property set, validating that every value is positive and finite.
    pub fn new(density: Density, viscosity: DynVisc, gravity: Accel) -> FluidResult<Self> {
        ensure_positive(density.value, "density")?;
        ensure_positive(viscosity.value, "viscosity")?;
        ensure_positive(gravity.value, "gravity")?;
        Ok(Self {
            density,
            viscosity,
            gravity,
        })
    }

    /// Water near 20 °C.
    pub fn water() -> Self {
        Self {
            density: kgpm3(1000.0),
            viscosity: pas(0.001_000_5),
            gravity: constants::g(),
        }
    }

    /// ρ·g in Pa per metre of head.
    pub fn specific_weight(&self) -> f64 {
        self.density.value * self.gravity.value
    }
}

impl Default for FluidProperties {
    fn default() -> Self {
        Self::water()
    }
}
