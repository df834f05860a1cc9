//! Static Singapore geography reference tables
//!
//! Fixed enumerations of the 28 postal districts (code, display name,
//! two-digit postal-code prefixes) and the 55 URA planning areas (canonical
//! key, display name, centroid coordinate), plus the town → postal-district
//! mapping used to geo-tag incoming transactions.
//!
//! Pure lookup data: loaded once into the binary, never mutated.

pub mod districts;
pub mod planning_areas;

pub use districts::{district_names, town_to_district, District, POSTAL_DISTRICTS};
pub use planning_areas::{planning_area, planning_area_names, PlanningArea, PLANNING_AREAS};
