//! Best-so-far designs, one per objective.

use serde::Serialize;
use std::fmt;

use crate::search::{DesignTotals, FeasibleDesign};

/// Quantity a design can be ranked by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Objective {
    CapitalCost,
    OperatingCost,
    LifetimeCost,
    Power,
}

impl Objective {
    pub const ALL: [Objective; 4] = [
        Objective::CapitalCost,
        Objective::OperatingCost,
        Objective::LifetimeCost,
        Objective::Power,
    ];

    /// Value to minimise.
    pub fn key(self, totals: &DesignTotals) -> f64 {
        match self {
            Objective::CapitalCost => totals.capital_cost,
            Objective::OperatingCost => totals.operating_cost,
            Objective::LifetimeCost => totals.lifetime_cost,
            Objective::Power => totals.power_kw,
        }
    }

    pub fn unit(self) -> &'static str {
        match self {
            Objective::CapitalCost | Objective::LifetimeCost => "$",
            Objective::OperatingCost => "$/hr",
            Objective::Power => "kW",
        }
    }

    fn slot(self) -> usize {
        match self {
            Objective::CapitalCost => 0,
            Objective::OperatingCost => 1,
            Objective::LifetimeCost => 2,
            Objective::Power => 3,
        }
    }
}

impl fmt::Display for Objective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Objective::CapitalCost => "capital cost",
            Objective::OperatingCost => "operating cost",
            Objective::LifetimeCost => "lifetime cost",
            Objective::Power => "power",
        };
        write!(f, "{label}")
    }
}

/// One best design per `Objective`. A slot is replaced only by a strictly
/// smaller key, so the first design offered wins ties.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OptimalDesignSet {
    slots: [Option<FeasibleDesign>; 4],
}

impl OptimalDesignSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Offer a design to every slot. Returns the objectives it now holds.
    pub fn offer(&mut self, design: &FeasibleDesign) -> Vec<Objective> {
        let mut won = Vec::new();
        for objective in Objective::ALL {
            let key = objective.key(&design.totals);
            let slot = &mut self.slots[objective.slot()];
            let better = match slot {
                None => true,
                Some(incumbent) => key < objective.key(&incumbent.totals),
            };
            if better {
                *slot = Some(design.clone());
                won.push(objective);
            }
        }
        won
    }

    pub fn best(&self, objective: Objective) -> Option<&FeasibleDesign> {
        self.slots[objective.slot()].as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    /// Filled slots in `Objective::ALL` order.
    pub fn iter(&self) -> impl Iterator<Item = (Objective, &FeasibleDesign)> {
        Objective::ALL
            .into_iter()
            .filter_map(|objective| self.best(objective).map(|d| (objective, d)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::DesignCandidate;
    use hs_components::{HeatExchanger, Material, PipeSpec, Schedule};
    use proptest::prelude::*;

    fn design(index: usize, capital: f64, operating: f64, lifetime: f64, power: f64) -> FeasibleDesign {
        FeasibleDesign {
            candidate: DesignCandidate {
                index,
                pipe: PipeSpec::new(3.0, Schedule::Forty, Material::Steel),
                heat_exchanger: HeatExchanger::new("HX", 100.0, 1.0).unwrap(),
            },
            p2_head_m: 12.0,
            sections: vec![],
            totals: DesignTotals {
                length_m: 1000.0,
                capital_cost: capital,
                operating_cost: operating,
                lifetime_cost: lifetime,
                power_kw: power,
            },
        }
    }

    #[test]
    fn empty_set() {
        let set = OptimalDesignSet::new();
        assert!(set.is_empty());
        assert!(set.best(Objective::Power).is_none());
        assert_eq!(set.iter().count(), 0);
    }

    #[test]
    fn slots_update_independently() {
        let mut set = OptimalDesignSet::new();
        assert_eq!(set.offer(&design(0, 100.0, 5.0, 900.0, 3.0)).len(), 4);

        let won = set.offer(&design(1, 50.0, 6.0, 950.0, 2.0));
        assert_eq!(won, vec![Objective::CapitalCost, Objective::Power]);

        assert_eq!(set.best(Objective::CapitalCost).unwrap().candidate.index, 1);
        assert_eq!(set.best(Objective::OperatingCost).unwrap().candidate.index, 0);
        assert_eq!(set.best(Objective::LifetimeCost).unwrap().candidate.index, 0);
        assert_eq!(set.best(Objective::Power).unwrap().candidate.index, 1);
    }

    #[test]
    fn ties_keep_first_seen() {
        let mut set = OptimalDesignSet::new();
        set.offer(&design(0, 100.0, 5.0, 900.0, 3.0));
        assert!(set.offer(&design(1, 100.0, 5.0, 900.0, 3.0)).is_empty());
        for (_, best) in set.iter() {
            assert_eq!(best.candidate.index, 0);
        }
    }

    proptest! {
        #[test]
        fn each_slot_holds_the_first_minimum(
            rows in prop::collection::vec(
                (0.0_f64..1e6, 0.0_f64..100.0, 0.0_f64..1e7, 0.0_f64..50.0),
                1..40,
            )
        ) {
            let designs: Vec<_> = rows
                .iter()
                .enumerate()
                .map(|(i, &(c, o, l, p))| design(i, c, o, l, p))
                .collect();
            let mut set = OptimalDesignSet::new();
            for d in &designs {
                set.offer(d);
            }

            for objective in Objective::ALL {
                let best = set.best(objective).unwrap();
                let min = designs
                    .iter()
                    .map(|d| objective.key(&d.totals))
                    .fold(f64::INFINITY, f64::min);
                let first = designs
                    .iter()
                    .position(|d| objective.key(&d.totals) == min)
                    .unwrap();
                prop_assert_eq!(best.candidate.index, first);
            }
        }
    }
}
