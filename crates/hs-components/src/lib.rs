//! hs-components: catalog parts for the distribution network.
//!
//! Provides:
//! - Pipe catalog resolver (outer diameter × schedule × material)
//! - Heat exchangers characterised by capital cost and k-factor
//! - Booster pump catalog and the cost/power pump selector
//!
//! Every catalog part implements `CatalogItem`, so reports and listings can
//! treat pipes, exchangers and pumps alike.
//!
//! # Example
//!
//! ```no_run
//! use hs_components::{Material, PipeSpec, Schedule, resolve_pipe};
//!
//! let pipe = resolve_pipe(&PipeSpec::new(2.0, Schedule::Forty, Material::Steel)).unwrap();
//! println!("Inner diameter: {} m", pipe.inner_diameter.value);
//! ```

pub mod common;
pub mod error;
pub mod heat_exchanger;
pub mod pipe;
pub mod pump;
pub mod traits;

// Re-exports
pub use error::{ComponentError, ComponentResult};
pub use heat_exchanger::HeatExchanger;
pub use pipe::{Material, PipeSpec, ResolvedPipe, Schedule, resolve_pipe};
pub use pump::{
    Pump, PumpCatalog, PumpDuty, PumpEconomics, PumpSelection, PumpTarget, evaluate_pump,
    select_pump,
};
pub use traits::CatalogItem;
