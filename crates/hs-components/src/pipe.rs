//! Pipe catalog resolver.
//!
//! Maps a nominal (outer diameter, schedule, material) triple to the values the
//! hydraulic solver needs: inner diameter, absolute roughness, installed cost
//! per metre and the rated pressure expressed as head.

use crate::common::check_finite;
use crate::error::{ComponentError, ComponentResult};
use crate::traits::CatalogItem;
use hs_core::units::{Length, inch, m};
use std::fmt;
use std::str::FromStr;

/// Outer diameters at or below this size (inches) take the cheaper trench.
const SMALL_TRENCH_MAX_OD_IN: f64 = 2.0;
const SMALL_TRENCH_COST: f64 = 35.0;
const LARGE_TRENCH_COST: f64 = 50.0;

/// Standardised wall-thickness class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Schedule {
    Forty,
    Eighty,
}

impl Schedule {
    pub const ALL: [Schedule; 2] = [Schedule::Forty, Schedule::Eighty];

    pub fn number(self) -> u32 {
        match self {
            Schedule::Forty => 40,
            Schedule::Eighty => 80,
        }
    }

    /// Wall thickness in inches; linear in outer diameter.
    pub fn wall_thickness_in(self, outer_diameter_in: f64) -> f64 {
        match self {
            Schedule::Forty => 0.021 * outer_diameter_in + 0.112,
            Schedule::Eighty => 0.039 * outer_diameter_in + 0.14,
        }
    }

    /// Rated working pressure as metres of water head.
    pub fn max_head_m(self) -> f64 {
        match self {
            Schedule::Forty => 154.71,
            Schedule::Eighty => 225.04,
        }
    }
}

impl TryFrom<u32> for Schedule {
    type Error = ComponentError;

    fn try_from(schedule: u32) -> Result<Self, Self::Error> {
        match schedule {
            40 => Ok(Schedule::Forty),
            80 => Ok(Schedule::Eighty),
            _ => Err(ComponentError::UnsupportedSchedule { schedule }),
        }
    }
}

impl fmt::Display for Schedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}

/// Pipe wall material.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Material {
    Steel,
    Pvc,
}

impl Material {
    pub const ALL: [Material; 2] = [Material::Steel, Material::Pvc];

    /// Absolute roughness in metres.
    pub fn roughness_m(self) -> f64 {
        match self {
            Material::Steel => 0.1 / 1000.0,
            Material::Pvc => 0.001 / 1000.0,
        }
    }
}

impl FromStr for Material {
    type Err = ComponentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "steel" => Ok(Material::Steel),
            "pvc" => Ok(Material::Pvc),
            _ => Err(ComponentError::UnknownMaterial {
                name: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for Material {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Material::Steel => write!(f, "Steel"),
            Material::Pvc => write!(f, "PVC"),
        }
    }
}

/// Nominal pipe as ordered from a catalog.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PipeSpec {
    /// Nominal outer diameter in inches
    pub outer_diameter_in: f64,
    pub schedule: Schedule,
    pub material: Material,
}

impl PipeSpec {
    pub fn new(outer_diameter_in: f64, schedule: Schedule, material: Material) -> Self {
        Self {
            outer_diameter_in,
            schedule,
            material,
        }
    }

    /// Installed cost per metre: material price plus trenching.
    pub fn unit_cost(&self) -> f64 {
        let od = self.outer_diameter_in;
        let material = match (self.schedule, self.material) {
            (Schedule::Forty, Material::Steel) => 10.0 * od + 30.0,
            (Schedule::Forty, Material::Pvc) => 5.0 * od + 40.0,
            (Schedule::Eighty, Material::Steel) => 15.0 * od + 60.0,
            (Schedule::Eighty, Material::Pvc) => 10.0 * od + 80.0,
        };
        let trench = if od <= SMALL_TRENCH_MAX_OD_IN {
            SMALL_TRENCH_COST
        } else {
            LARGE_TRENCH_COST
        };
        material + trench
    }
}

impl fmt::Display for PipeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} in sch {} {}",
            self.outer_diameter_in, self.schedule, self.material
        )
    }
}

/// Hydraulic and cost properties derived from a `PipeSpec`.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedPipe {
    pub spec: PipeSpec,
    pub wall_thickness_in: f64,
    pub inner_diameter: Length,
    pub roughness: Length,
    /// Installed cost per metre of run
    pub unit_cost: f64,
    /// Rated pressure as head
    pub max_head: Length,
    label: String,
}

impl ResolvedPipe {
    /// Cost of `length` of installed pipe.
    pub fn run_cost(&self, length: Length) -> f64 {
        self.unit_cost * length.value
    }
}

impl CatalogItem for ResolvedPipe {
    fn name(&self) -> &str {
        &self.label
    }

    /// Priced per metre for pipe.
    fn capital_cost(&self) -> f64 {
        self.unit_cost
    }
}

/// Resolve a catalog pipe to inner diameter, roughness, unit cost and rated head.
///
/// Rejecting designs whose operating head exceeds `max_head` is left to the caller.
pub fn resolve_pipe(spec: &PipeSpec) -> ComponentResult<ResolvedPipe> {
    let od = spec.outer_diameter_in;
    check_finite(od, "outer diameter")?;
    if od <= 0.0 {
        return Err(ComponentError::InvalidArg {
            what: "outer diameter must be positive",
        });
    }

    let wall = spec.schedule.wall_thickness_in(od);
    let inner_in = od - 2.0 * wall;
    if inner_in <= 0.0 {
        return Err(ComponentError::NonPhysical {
            what: "wall thickness leaves no bore",
        });
    }

    Ok(ResolvedPipe {
        spec: *spec,
        wall_thickness_in: wall,
        inner_diameter: inch(inner_in),
        roughness: m(spec.material.roughness_m()),
        unit_cost: spec.unit_cost(),
        max_head: m(spec.schedule.max_head_m()),
        label: spec.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_inch_schedule_40_steel() {
        let pipe = resolve_pipe(&PipeSpec::new(2.0, Schedule::Forty, Material::Steel)).unwrap();
        // 10·2 + 30 material, +35 trench at OD ≤ 2
        assert!((pipe.unit_cost - 85.0).abs() < 1e-12);
        assert!((pipe.wall_thickness_in - 0.154).abs() < 1e-12);
        assert!((pipe.inner_diameter.value - (2.0 - 0.308) * 0.0254).abs() < 1e-12);
        assert!((pipe.inner_diameter.value - 0.04298).abs() < 1e-5);
        assert!((pipe.roughness.value - 0.0001).abs() < 1e-15);
        assert_eq!(pipe.max_head.value, 154.71);
    }

    #[test]
    fn bore_converts_from_inches() {
        let pipe = resolve_pipe(&PipeSpec::new(4.0, Schedule::Forty, Material::Steel)).unwrap();
        let bore_in = 4.0 - 2.0 * pipe.wall_thickness_in;
        assert!((pipe.inner_diameter.value - inch(bore_in).value).abs() < 1e-15);
        assert!((pipe.inner_diameter.value - bore_in * 0.0254).abs() < 1e-12);
    }

    #[test]
    fn trench_surcharge_steps_above_two_inches() {
        let small = PipeSpec::new(2.0, Schedule::Forty, Material::Pvc).unit_cost();
        let large = PipeSpec::new(2.5, Schedule::Forty, Material::Pvc).unit_cost();
        assert!((small - (5.0 * 2.0 + 40.0 + 35.0)).abs() < 1e-12);
        assert!((large - (5.0 * 2.5 + 40.0 + 50.0)).abs() < 1e-12);
    }

    #[test]
    fn schedule_80_costs_and_rating() {
        let spec = PipeSpec::new(4.0, Schedule::Eighty, Material::Steel);
        let pipe = resolve_pipe(&spec).unwrap();
        assert!((pipe.unit_cost - (15.0 * 4.0 + 60.0 + 50.0)).abs() < 1e-12);
        assert!((pipe.wall_thickness_in - (0.039 * 4.0 + 0.14)).abs() < 1e-12);
        assert_eq!(pipe.max_head.value, 225.04);

        let pvc = PipeSpec::new(4.0, Schedule::Eighty, Material::Pvc).unit_cost();
        assert!((pvc - (10.0 * 4.0 + 80.0 + 50.0)).abs() < 1e-12);
    }

    #[test]
    fn roughness_depends_only_on_material() {
        for schedule in Schedule::ALL {
            let steel = resolve_pipe(&PipeSpec::new(3.0, schedule, Material::Steel)).unwrap();
            let pvc = resolve_pipe(&PipeSpec::new(3.0, schedule, Material::Pvc)).unwrap();
            assert_eq!(steel.roughness.value, 1e-4);
            assert_eq!(pvc.roughness.value, 1e-6);
        }
    }

    #[test]
    fn rejects_non_positive_diameter() {
        let err = resolve_pipe(&PipeSpec::new(0.0, Schedule::Forty, Material::Steel)).unwrap_err();
        assert!(matches!(err, ComponentError::InvalidArg { .. }));
        assert!(resolve_pipe(&PipeSpec::new(f64::NAN, Schedule::Forty, Material::Pvc)).is_err());
    }

    #[test]
    fn rejects_diameter_smaller_than_walls() {
        // 0.2 in schedule 80: wall 0.1478 in, bore would be negative.
        let err = resolve_pipe(&PipeSpec::new(0.2, Schedule::Eighty, Material::Steel)).unwrap_err();
        assert!(matches!(err, ComponentError::NonPhysical { .. }));
    }

    #[test]
    fn schedule_conversion() {
        assert_eq!(Schedule::try_from(40).unwrap(), Schedule::Forty);
        assert_eq!(Schedule::try_from(80).unwrap(), Schedule::Eighty);
        assert!(matches!(
            Schedule::try_from(160),
            Err(ComponentError::UnsupportedSchedule { schedule: 160 })
        ));
    }

    #[test]
    fn material_parsing() {
        assert_eq!("Steel".parse::<Material>().unwrap(), Material::Steel);
        assert_eq!(" pvc ".parse::<Material>().unwrap(), Material::Pvc);
        assert!("copper".parse::<Material>().is_err());
    }

    #[test]
    fn display_and_catalog_name() {
        let pipe = resolve_pipe(&PipeSpec::new(1.5, Schedule::Eighty, Material::Pvc)).unwrap();
        assert_eq!(pipe.name(), "1.5 in sch 80 PVC");
        assert_eq!(pipe.capital_cost(), pipe.unit_cost);
    }

    #[test]
    fn run_cost_scales_with_length() {
        let pipe = resolve_pipe(&PipeSpec::new(2.0, Schedule::Forty, Material::Steel)).unwrap();
        assert!((pipe.run_cost(m(100.0)) - 8500.0).abs() < 1e-9);
    }
}
