//! Static crawl catalog: sub-departments, their brand URL fragments and the
//! store locations to scope inventory/pricing against.
//!
//! To harvest additional products it is only necessary to add another brand
//! fragment to one of the sub-department entries, or another store to
//! [`STORES`]. Everything else is derived from these tables.

use once_cell::sync::Lazy;

use super::constants::BASE_URL;

/// One crawlable sub-department: a department listing page plus the brand
/// page URL fragments to follow from it.
#[derive(Debug, Clone)]
pub struct SubDepartment {
    /// Department path fragment, e.g. `b/Appliances-Dishwashers`.
    pub base_url: &'static str,
    /// Navigation token of the department listing page (the `N-…` suffix).
    pub nav_param: &'static str,
    /// Brand URL fragments under this department, e.g. `LG-Electronics`.
    pub brands: &'static [&'static str],
}

impl SubDepartment {
    /// Absolute URL of the department listing page links are extracted from.
    pub fn start_url(&self) -> String {
        format!("{}/{}/N-{}", BASE_URL, self.base_url, self.nav_param)
    }
}

/// Sub-departments to crawl, keyed implicitly by their department path.
pub static SUB_DEPARTMENTS: Lazy<Vec<SubDepartment>> = Lazy::new(|| {
    vec![
        SubDepartment {
            base_url: "b/Appliances-Dishwashers",
            nav_param: "5yc1vZc3po",
            brands: &["LG-Electronics", "Samsung"],
        },
        SubDepartment {
            base_url: "b/Appliances-Refrigerators",
            nav_param: "5yc1vZc3pi",
            brands: &["GE", "Whirlpool"],
        },
        SubDepartment {
            base_url: "b/Furniture-Bedroom-Furniture-Mattresses",
            nav_param: "5yc1vZc7oe",
            brands: &["Sealy"],
        },
    ]
});

/// Store locations to fetch inventory and pricing for, as
/// `(location slug, store id)` pairs. The slug names output files; the id is
/// what the API expects in `variables.storeId`.
pub static STORES: &[(&str, &str)] = &[
    ("chicago", "1950"),
    ("new_york", "6177"),
    ("los_angeles", "1013"),
];
