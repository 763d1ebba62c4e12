//! Section solver for the two-segment distribution run.
//!
//! Each section is a downhill segment from the source to the trench, where the
//! slant drop `y` depends on the friction loss over a length that itself
//! depends on `y`, followed by a closed-form return segment that fixes the head
//! the booster pump has to supply. Segment 0 is solved by a bounded
//! fixed-point iteration; segment 1 and the pump selection follow directly.

pub mod error;
pub mod fixed_point;
pub mod geometry;
pub mod section;

pub use error::{SolverError, SolverResult};
pub use fixed_point::{FixedPointConfig, FixedPointResult, fixed_point_solve};
pub use geometry::{SectionRoute, SiteGeometry};
pub use section::{SectionResult, SectionSolver, Segment0Solution, Segment1Solution};
