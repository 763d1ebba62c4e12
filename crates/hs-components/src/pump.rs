//! Booster pump catalog and selection.
//!
//! ## Model
//!
//! A pump is eligible for a section when its rated head covers the section's
//! required head. For each eligible pump:
//!
//! ```text
//! P_hyd   = H · ρ · g · Q                        (W)
//! P_elec  = P_hyd / η / 1000                     (kW)
//! C_op    = P_elec · 3600 · energy_unit_cost     ($/hr)
//! C_life  = C_op · 24 · 365 · lifetime_years
//! C_total = capital + C_life
//! ```
//!
//! The selector keeps the first pump with the strictly lowest total cost (or
//! electrical power), so ties resolve in catalog order.

use crate::common::{check_finite, check_non_negative};
use crate::error::{ComponentError, ComponentResult};
use crate::traits::CatalogItem;
use hs_core::units::{Length, Power, constants, kw, w};
use hs_fluids::Hydraulics;
use std::fmt;
use std::str::FromStr;

/// Catalog booster pump.
#[derive(Clone, Debug, PartialEq)]
pub struct Pump {
    pub name: String,
    /// Rated shaft speed, informational only
    pub speed_rpm: f64,
    pub capital_cost: f64,
    /// Head delivered at the design flow
    pub rated_head: Length,
    /// Wire-to-water efficiency (0 < eta <= 1)
    pub efficiency: f64,
}

impl Pump {
    /// Create a new pump.
    ///
    /// # Errors
    /// Returns error if parameters are out of physical bounds.
    pub fn new(
        name: impl Into<String>,
        speed_rpm: f64,
        capital_cost: f64,
        rated_head: Length,
        efficiency: f64,
    ) -> ComponentResult<Self> {
        if !(efficiency > 0.0 && efficiency <= 1.0) {
            return Err(ComponentError::InvalidArg {
                what: "pump efficiency must be in (0,1]",
            });
        }
        check_non_negative(capital_cost, "pump capital cost")?;
        check_finite(rated_head.value, "pump rated head")?;
        check_finite(speed_rpm, "pump speed")?;

        Ok(Self {
            name: name.into(),
            speed_rpm,
            capital_cost,
            rated_head,
            efficiency,
        })
    }

    pub fn covers(&self, required_head: Length) -> bool {
        self.rated_head.value >= required_head.value
    }
}

impl CatalogItem for Pump {
    fn name(&self) -> &str {
        &self.name
    }

    fn capital_cost(&self) -> f64 {
        self.capital_cost
    }

    fn describe(&self) -> String {
        format!(
            "{} ({:.0} rpm, {:.1} m, eta {:.2}, ${:.2})",
            self.name, self.speed_rpm, self.rated_head.value, self.efficiency, self.capital_cost
        )
    }
}

/// What the selector minimises.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PumpTarget {
    /// Capital plus lifetime operating cost
    #[default]
    Cost,
    /// Electrical power draw
    Power,
}

impl FromStr for PumpTarget {
    type Err = ComponentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cost" => Ok(PumpTarget::Cost),
            "power" => Ok(PumpTarget::Power),
            _ => Err(ComponentError::InvalidArg {
                what: "pump target must be 'cost' or 'power'",
            }),
        }
    }
}

impl fmt::Display for PumpTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PumpTarget::Cost => write!(f, "cost"),
            PumpTarget::Power => write!(f, "power"),
        }
    }
}

/// Energy pricing and project horizon.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PumpEconomics {
    pub lifetime_years: f64,
    /// Price applied to kW·3600 each hour
    pub energy_unit_cost: f64,
}

impl Default for PumpEconomics {
    fn default() -> Self {
        Self {
            lifetime_years: 50.0,
            energy_unit_cost: 0.16,
        }
    }
}

/// Operating point of one pump at one required head.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PumpDuty {
    pub hydraulic_power: Power,
    pub electrical_power: Power,
    /// $/hr
    pub operating_cost: f64,
    pub lifetime_operating_cost: f64,
    /// Capital plus lifetime operating cost
    pub total_cost: f64,
}

impl PumpDuty {
    pub fn electrical_kw(&self) -> f64 {
        self.electrical_power.value / 1000.0
    }
}

/// Compute power and cost of running `pump` against `required_head`.
pub fn evaluate_pump(
    pump: &Pump,
    required_head: Length,
    hydraulics: &Hydraulics,
    economics: &PumpEconomics,
) -> PumpDuty {
    let hydraulic_w =
        required_head.value * hydraulics.fluid.specific_weight() * hydraulics.flow.value;
    let electrical_kw = hydraulic_w / pump.efficiency / 1000.0;
    let operating_cost = electrical_kw * 3600.0 * economics.energy_unit_cost;
    let lifetime_operating_cost =
        operating_cost * constants::HOURS_PER_YEAR * economics.lifetime_years;

    PumpDuty {
        hydraulic_power: w(hydraulic_w),
        electrical_power: kw(electrical_kw),
        operating_cost,
        lifetime_operating_cost,
        total_cost: pump.capital_cost + lifetime_operating_cost,
    }
}

/// The pump chosen for a section.
#[derive(Debug, Clone, PartialEq)]
pub struct PumpSelection {
    /// Position in the catalog
    pub index: usize,
    pub name: String,
    pub rated_head: Length,
    pub capital_cost: f64,
    pub duty: PumpDuty,
}

impl PumpSelection {
    pub fn operating_cost(&self) -> f64 {
        self.duty.operating_cost
    }

    pub fn total_cost(&self) -> f64 {
        self.duty.total_cost
    }

    pub fn power_kw(&self) -> f64 {
        self.duty.electrical_kw()
    }
}

/// Read-only, non-empty pump table.
#[derive(Debug, Clone, PartialEq)]
pub struct PumpCatalog {
    pumps: Vec<Pump>,
}

impl PumpCatalog {
    pub fn new(pumps: Vec<Pump>) -> ComponentResult<Self> {
        if pumps.is_empty() {
            return Err(ComponentError::EmptyCatalog { what: "pumps" });
        }
        Ok(Self { pumps })
    }

    pub fn len(&self) -> usize {
        self.pumps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pumps.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Pump> {
        self.pumps.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Pump> {
        self.pumps.iter()
    }

    /// Pumps whose rated head covers `required_head`, with catalog indices.
    pub fn eligible(&self, required_head: Length) -> impl Iterator<Item = (usize, &Pump)> {
        self.pumps
            .iter()
            .enumerate()
            .filter(move |(_, pump)| pump.covers(required_head))
    }

    pub fn max_rated_head(&self) -> Length {
        self.pumps
            .iter()
            .map(|p| p.rated_head)
            .fold(self.pumps[0].rated_head, |a, b| if b > a { b } else { a })
    }
}

/// Choose the best eligible pump for `required_head`.
///
/// # Errors
/// `NoEligiblePump` when no rated head reaches `required_head`.
pub fn select_pump(
    catalog: &PumpCatalog,
    required_head: Length,
    hydraulics: &Hydraulics,
    economics: &PumpEconomics,
    target: PumpTarget,
) -> ComponentResult<PumpSelection> {
    check_finite(required_head.value, "required pump head")?;

    let mut best: Option<(usize, &Pump, PumpDuty)> = None;
    for (index, pump) in catalog.eligible(required_head) {
        let duty = evaluate_pump(pump, required_head, hydraulics, economics);
        let better = match &best {
            None => true,
            Some((_, _, incumbent)) => match target {
                PumpTarget::Cost => duty.total_cost < incumbent.total_cost,
                PumpTarget::Power => duty.electrical_power < incumbent.electrical_power,
            },
        };
        if better {
            best = Some((index, pump, duty));
        }
    }

    let (index, pump, duty) = best.ok_or_else(|| ComponentError::NoEligiblePump {
        required_head_m: required_head.value,
        max_rated_head_m: catalog.max_rated_head().value,
    })?;

    Ok(PumpSelection {
        index,
        name: pump.name.clone(),
        rated_head: pump.rated_head,
        capital_cost: pump.capital_cost,
        duty,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use hs_core::units::{m, m3ps};
    use hs_fluids::FluidProperties;

    fn hydraulics() -> Hydraulics {
        Hydraulics::new(FluidProperties::water(), m3ps(0.006_333)).unwrap()
    }

    fn pump(name: &str, cost: f64, head: f64, eta: f64) -> Pump {
        Pump::new(name, 1750.0, cost, m(head), eta).unwrap()
    }

    #[test]
    fn pump_invalid_efficiency() {
        assert!(Pump::new("bad", 1750.0, 100.0, m(10.0), 1.5).is_err());
        assert!(Pump::new("bad", 1750.0, 100.0, m(10.0), 0.0).is_err());
        assert!(Pump::new("bad", 1750.0, 100.0, m(10.0), f64::NAN).is_err());
    }

    #[test]
    fn empty_catalog_rejected() {
        assert_eq!(
            PumpCatalog::new(vec![]).unwrap_err(),
            ComponentError::EmptyCatalog { what: "pumps" }
        );
    }

    #[test]
    fn duty_formulas() {
        let hyd = hydraulics();
        let econ = PumpEconomics::default();
        let p = pump("p", 2000.0, 50.0, 0.8);
        let duty = evaluate_pump(&p, m(20.0), &hyd, &econ);

        let hyd_w = 20.0 * 1000.0 * 9.81 * 0.006_333;
        let elec_kw = hyd_w / 0.8 / 1000.0;
        let op = elec_kw * 3600.0 * 0.16;
        let life = op * 24.0 * 365.0 * 50.0;

        assert!((duty.hydraulic_power.value - hyd_w).abs() < 1e-9);
        assert!((duty.electrical_kw() - elec_kw).abs() < 1e-9);
        assert!((duty.operating_cost - op).abs() < 1e-9);
        assert!((duty.lifetime_operating_cost - life).abs() < 1e-3);
        assert!((duty.total_cost - (2000.0 + life)).abs() < 1e-3);
    }

    #[test]
    fn single_pump_selected_for_zero_head_under_either_target() {
        let hyd = hydraulics();
        let econ = PumpEconomics::default();
        let catalog = PumpCatalog::new(vec![pump("only", 500.0, 10.0, 0.7)]).unwrap();

        for target in [PumpTarget::Cost, PumpTarget::Power] {
            let sel = select_pump(&catalog, m(0.0), &hyd, &econ, target).unwrap();
            assert_eq!(sel.name, "only");
            assert_eq!(sel.index, 0);
            assert_eq!(sel.power_kw(), 0.0);
            assert_eq!(sel.total_cost(), 500.0);
        }
    }

    #[test]
    fn no_eligible_pump() {
        let hyd = hydraulics();
        let econ = PumpEconomics::default();
        let catalog =
            PumpCatalog::new(vec![pump("a", 500.0, 10.0, 0.7), pump("b", 800.0, 30.0, 0.7)])
                .unwrap();

        let err = select_pump(&catalog, m(31.0), &hyd, &econ, PumpTarget::Cost).unwrap_err();
        assert_eq!(
            err,
            ComponentError::NoEligiblePump {
                required_head_m: 31.0,
                max_rated_head_m: 30.0,
            }
        );
    }

    #[test]
    fn rated_head_equal_to_requirement_is_eligible() {
        let hyd = hydraulics();
        let econ = PumpEconomics::default();
        let catalog = PumpCatalog::new(vec![pump("exact", 500.0, 25.0, 0.7)]).unwrap();
        assert!(select_pump(&catalog, m(25.0), &hyd, &econ, PumpTarget::Cost).is_ok());
    }

    #[test]
    fn cost_and_power_targets_can_disagree() {
        let hyd = hydraulics();
        let econ = PumpEconomics {
            lifetime_years: 1.0,
            energy_unit_cost: 0.16,
        };
        // Cheap but inefficient vs expensive and efficient.
        let catalog = PumpCatalog::new(vec![
            pump("cheap", 100.0, 40.0, 0.4),
            pump("efficient", 50_000_000.0, 40.0, 0.9),
        ])
        .unwrap();

        let by_cost = select_pump(&catalog, m(20.0), &hyd, &econ, PumpTarget::Cost).unwrap();
        let by_power = select_pump(&catalog, m(20.0), &hyd, &econ, PumpTarget::Power).unwrap();
        assert_eq!(by_cost.name, "cheap");
        assert_eq!(by_power.name, "efficient");
    }

    #[test]
    fn ties_keep_catalog_order() {
        let hyd = hydraulics();
        let econ = PumpEconomics::default();
        let catalog = PumpCatalog::new(vec![
            pump("first", 700.0, 40.0, 0.75),
            pump("second", 700.0, 40.0, 0.75),
        ])
        .unwrap();

        for target in [PumpTarget::Cost, PumpTarget::Power] {
            let sel = select_pump(&catalog, m(12.0), &hyd, &econ, target).unwrap();
            assert_eq!(sel.name, "first");
        }
    }

    #[test]
    fn target_parsing() {
        assert_eq!("cost".parse::<PumpTarget>().unwrap(), PumpTarget::Cost);
        assert_eq!("Power".parse::<PumpTarget>().unwrap(), PumpTarget::Power);
        assert!("speed".parse::<PumpTarget>().is_err());
        assert_eq!(PumpTarget::Power.to_string(), "power");
    }
}
