//! Two-segment section solver.
//!
//! ## Segment 0
//!
//! From the section start at `z0` the pipe drops to the trench floor and then
//! runs along a slant whose vertical drop `y` is unknown:
//!
//! ```text
//! L(y)  = (z0 − floor) + sqrt(adjacent² + y²)
//! y_new = return_elevation − z0 − trench − p0 + h_loss(L(y))
//! ```
//!
//! The slant is the fixed point of this map. Only after convergence is `y`
//! clamped to be non-negative and the length recomputed.
//!
//! ## Segment 1
//!
//! ```text
//! L1    = z2 − floor + y
//! H_req = z2 − return_elevation + p2 + h_loss(L1) + trench + y
//! ```

use crate::error::{SolverError, SolverResult};
use crate::fixed_point::{FixedPointConfig, fixed_point_solve};
use crate::geometry::{SectionRoute, SiteGeometry};
use hs_components::{
    PumpCatalog, PumpEconomics, PumpSelection, PumpTarget, ResolvedPipe, select_pump,
};
use hs_core::units::{Length, m};
use hs_fluids::{FluidError, HeadPair, Hydraulics};
use tracing::debug;

/// Converged segment 0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment0Solution {
    /// Pipe length from the section start to the end of the slant
    pub length: Length,
    /// Slant drop after clamping to zero
    pub slant: Length,
    /// Slant drop as the iteration left it
    pub raw_slant: Length,
    pub iterations: usize,
    pub final_error: f64,
}

/// Closed-form segment 1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment1Solution {
    pub length: Length,
    pub head_loss: Length,
    /// Head the booster pump must supply
    pub required_head: Length,
}

/// Fully solved section: both segments plus the chosen pump.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionResult {
    pub route_id: String,
    pub segment0: Segment0Solution,
    pub segment1: Segment1Solution,
    /// Total pipe length of the section
    pub length: Length,
    /// Installed pipe cost for `length`
    pub pipe_cost: f64,
    pub pump: PumpSelection,
}

impl SectionResult {
    pub fn slant(&self) -> Length {
        self.segment0.slant
    }

    pub fn iterations(&self) -> usize {
        self.segment0.iterations
    }

    pub fn required_head(&self) -> Length {
        self.segment1.required_head
    }

    /// Pipe plus pump purchase cost.
    pub fn capital_cost(&self) -> f64 {
        self.pipe_cost + self.pump.capital_cost
    }

    /// $/hr
    pub fn operating_cost(&self) -> f64 {
        self.pump.operating_cost()
    }

    pub fn lifetime_operating_cost(&self) -> f64 {
        self.pump.duty.lifetime_operating_cost
    }

    /// Capital plus lifetime operating cost.
    pub fn lifetime_cost(&self) -> f64 {
        self.capital_cost() + self.lifetime_operating_cost()
    }

    pub fn power_kw(&self) -> f64 {
        self.pump.power_kw()
    }
}

/// Solves sections against one fluid, site, pump catalog and objective.
#[derive(Debug, Clone, Copy)]
pub struct SectionSolver<'a> {
    hydraulics: &'a Hydraulics,
    site: &'a SiteGeometry,
    config: &'a FixedPointConfig,
    pumps: &'a PumpCatalog,
    economics: &'a PumpEconomics,
    target: PumpTarget,
}

impl<'a> SectionSolver<'a> {
    pub fn new(
        hydraulics: &'a Hydraulics,
        site: &'a SiteGeometry,
        config: &'a FixedPointConfig,
        pumps: &'a PumpCatalog,
        economics: &'a PumpEconomics,
        target: PumpTarget,
    ) -> Self {
        Self {
            hydraulics,
            site,
            config,
            pumps,
            economics,
            target,
        }
    }

    pub fn hydraulics(&self) -> &Hydraulics {
        self.hydraulics
    }

    pub fn target(&self) -> PumpTarget {
        self.target
    }

    /// Solve segment 0 for its length and slant, starting from
    /// `config.initial_slant`.
    pub fn segment0(
        &self,
        pipe: &ResolvedPipe,
        p0: Length,
        route: &SectionRoute,
    ) -> SolverResult<Segment0Solution> {
        let floor = self.site.trench_floor().value;
        let z0 = route.z0.value;
        let adjacent = route.adjacent.value;
        let run_length = |y: f64| (z0 - floor) + (adjacent * adjacent + y * y).sqrt();
        let offset =
            self.site.return_elevation.value - z0 - self.site.trench_depth.value - p0.value;

        let solution = fixed_point_solve(
            self.config.initial_slant,
            |y| {
                let hl = match self.hydraulics.head_loss(
                    m(run_length(y)),
                    pipe.inner_diameter,
                    pipe.roughness,
                ) {
                    Ok(hl) => hl.value,
                    // Runaway slant; reported as divergence by the iteration.
                    Err(FluidError::NonFinite { .. }) => f64::INFINITY,
                    Err(err) => return Err(err.into()),
                };
                Ok(offset + hl)
            },
            self.config,
        )?;

        let slant = solution.x.max(0.0);
        Ok(Segment0Solution {
            length: m(run_length(slant)),
            slant: m(slant),
            raw_slant: m(solution.x),
            iterations: solution.iterations,
            final_error: solution.final_error,
        })
    }

    /// Solve segment 1 for its length and the required pump head.
    pub fn segment1(
        &self,
        pipe: &ResolvedPipe,
        p2: Length,
        slant: Length,
        route: &SectionRoute,
    ) -> SolverResult<Segment1Solution> {
        let y = slant.value;
        let z2 = route.z2.value;
        let length = z2 - self.site.trench_floor().value + y;
        let head_loss =
            self.hydraulics
                .head_loss(m(length), pipe.inner_diameter, pipe.roughness)?;
        let required = z2 - self.site.return_elevation.value
            + p2.value
            + head_loss.value
            + self.site.trench_depth.value
            + y;

        if !required.is_finite() {
            return Err(SolverError::Numeric {
                what: format!("required head for section {} is {required}", route.id),
            });
        }

        Ok(Segment1Solution {
            length: m(length),
            head_loss,
            required_head: m(required),
        })
    }

    /// Solve both segments and choose the booster pump.
    pub fn solve(
        &self,
        pipe: &ResolvedPipe,
        heads: &HeadPair,
        route: &SectionRoute,
    ) -> SolverResult<SectionResult> {
        let seg0 = self.segment0(pipe, heads.p0, route)?;
        debug!(
            section = %route.id,
            length = seg0.length.value,
            slant = seg0.slant.value,
            error = seg0.final_error,
            iterations = seg0.iterations,
            "segment 0 solved"
        );

        let seg1 = self.segment1(pipe, heads.p2, seg0.slant, route)?;
        debug!(
            section = %route.id,
            length = seg1.length.value,
            head_loss = seg1.head_loss.value,
            required_head = seg1.required_head.value,
            "segment 1 solved"
        );

        let pump = select_pump(
            self.pumps,
            seg1.required_head,
            self.hydraulics,
            self.economics,
            self.target,
        )?;
        debug!(
            section = %route.id,
            pump = %pump.name,
            capital = pump.capital_cost,
            operating = pump.operating_cost(),
            lifetime = pump.total_cost(),
            power_kw = pump.power_kw(),
            "pump selected"
        );

        let length = seg0.length + seg1.length;
        Ok(SectionResult {
            route_id: route.id.clone(),
            segment0: seg0,
            segment1: seg1,
            length,
            pipe_cost: pipe.run_cost(length),
            pump,
        })
    }
}
