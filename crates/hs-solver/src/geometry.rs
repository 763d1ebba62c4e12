//! Site geometry shared by every section, and the per-section route.

use crate::error::{SolverError, SolverResult};
use hs_core::units::{Length, m};

/// Fixed elevations of the distribution site.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SiteGeometry {
    /// Minimum cover over the buried pipe
    pub trench_depth: Length,
    /// Ground elevation of the supply junction
    pub supply_elevation: Length,
    /// Ground elevation of the return junction
    pub return_elevation: Length,
}

impl Default for SiteGeometry {
    fn default() -> Self {
        Self {
            trench_depth: m(5.0),
            supply_elevation: m(60.0),
            return_elevation: m(62.0),
        }
    }
}

impl SiteGeometry {
    pub fn validate(&self) -> SolverResult<()> {
        for (value, what) in [
            (self.trench_depth.value, "trench depth"),
            (self.supply_elevation.value, "supply elevation"),
            (self.return_elevation.value, "return elevation"),
        ] {
            if !value.is_finite() {
                return Err(SolverError::InvalidConfig { what });
            }
        }
        if self.trench_depth.value < 0.0 {
            return Err(SolverError::InvalidConfig {
                what: "trench depth must be non-negative",
            });
        }
        Ok(())
    }

    /// Elevation of the trench bottom under the supply junction.
    pub fn trench_floor(&self) -> Length {
        self.supply_elevation - self.trench_depth
    }
}

/// One section of the network: start/end elevations and horizontal run.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionRoute {
    pub id: String,
    /// Elevation at the section start
    pub z0: Length,
    /// Elevation at the section end
    pub z2: Length,
    /// Horizontal distance covered by the slanted run
    pub adjacent: Length,
}

impl SectionRoute {
    pub fn new(id: impl Into<String>, z0: Length, z2: Length, adjacent: Length) -> Self {
        Self {
            id: id.into(),
            z0,
            z2,
            adjacent,
        }
    }

    /// The four sections of the reference campus loop.
    pub fn default_network() -> Vec<SectionRoute> {
        vec![
            SectionRoute::new("S1", m(72.0), m(63.0), m(800.0)),
            SectionRoute::new("S2", m(63.0), m(93.0), m(400.0)),
            SectionRoute::new("S3", m(93.0), m(75.0), m(800.0)),
            SectionRoute::new("S4", m(75.0), m(72.0), m(500.0)),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_site() {
        let site = SiteGeometry::default();
        assert_eq!(site.trench_floor().value, 55.0);
        assert!(site.validate().is_ok());
    }

    #[test]
    fn negative_trench_rejected() {
        let site = SiteGeometry {
            trench_depth: m(-1.0),
            ..SiteGeometry::default()
        };
        assert!(site.validate().is_err());
    }

    #[test]
    fn default_network_closes_the_loop() {
        let routes = SectionRoute::default_network();
        assert_eq!(routes.len(), 4);
        for pair in routes.windows(2) {
            assert_eq!(pair[0].z2, pair[1].z0);
        }
        assert_eq!(routes[3].z2, routes[0].z0);
    }
}
