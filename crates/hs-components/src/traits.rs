//! Core traits for catalog parts.

/// A purchasable part listed in a catalog.
///
/// Implementors are plain data and safe to share across the search threads.
pub trait CatalogItem: Send + Sync {
    /// Catalog name for reports and identification.
    fn name(&self) -> &str;

    /// Purchase cost in currency units.
    fn capital_cost(&self) -> f64;

    /// One-line description for listings.
    fn describe(&self) -> String {
        format!("{} (${:.2})", self.name(), self.capital_cost())
    }
}
