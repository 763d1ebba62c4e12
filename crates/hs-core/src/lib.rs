//! hs-core: stable foundation for hydrosweep.
//!
//! Contains:
//! - units (uom SI types + constructors)
//! - numeric (Real + finiteness and positivity guards)
//! - error (shared error types)

pub mod error;
pub mod numeric;
pub mod units;

// Re-exports: nice ergonomics for downstream crates
pub use error::{HsError, HsResult};
pub use numeric::*;
pub use units::*;
