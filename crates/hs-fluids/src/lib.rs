//! hs-fluids: fluid properties and pipe-flow equations for hydrosweep.
//!
//! Provides:
//! - Constant liquid properties (density, viscosity, gravity)
//! - Annual demand profile and the volumetric flow derived from it
//! - `Hydraulics`, the explicit context carrying both, with the velocity,
//!   Reynolds, friction factor, head loss and pressure-head equations
//!
//! Nothing here is global: every solver receives a `Hydraulics` value, so tests
//! and alternate demand profiles substitute their own.
//!
//! # Example
//!
//! ```no_run
//! use hs_fluids::{DemandProfile, FluidProperties, Hydraulics};
//! use hs_core::units::m;
//!
//! let fluid = FluidProperties::water();
//! let hyd = Hydraulics::from_demand(fluid, &DemandProfile::default()).unwrap();
//! let v = hyd.velocity(m(0.043)).unwrap();
//! println!("Velocity: {} m/s", v.value);
//! ```

pub mod demand;
pub mod error;
pub mod hydraulics;
pub mod properties;

// Re-exports for ergonomics
pub use demand::{DemandProfile, LoadBlock};
pub use error::{FluidError, FluidResult};
pub use hydraulics::{HeadPair, Hydraulics};
pub use properties::FluidProperties;
