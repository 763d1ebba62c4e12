//! Heat exchanger catalog entry.

use crate::common::check_non_negative;
use crate::error::ComponentResult;
use crate::traits::CatalogItem;

/// Heat exchanger seen by the hydraulics as a single minor loss.
#[derive(Debug, Clone, PartialEq)]
pub struct HeatExchanger {
    pub name: String,
    pub capital_cost: f64,
    /// Dimensionless loss coefficient applied to v²/2g
    pub k_factor: f64,
}

impl HeatExchanger {
    /// Create a heat exchanger.
    ///
    /// # Errors
    /// Returns error if cost or k-factor is negative or non-finite.
    pub fn new(name: impl Into<String>, capital_cost: f64, k_factor: f64) -> ComponentResult<Self> {
        check_non_negative(capital_cost, "heat exchanger capital cost")?;
        check_non_negative(k_factor, "heat exchanger k-factor")?;
        Ok(Self {
            name: name.into(),
            capital_cost,
            k_factor,
        })
    }
}

impl CatalogItem for HeatExchanger {
    fn name(&self) -> &str {
        &self.name
    }

    fn capital_cost(&self) -> f64 {
        self.capital_cost
    }

    fn describe(&self) -> String {
        format!(
            "{} (${:.2}, k = {:.2})",
            self.name, self.capital_cost, self.k_factor
        )
    }
}
