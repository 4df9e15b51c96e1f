//! HTML parsers for calscape.org pages.

pub mod plant_detail;
pub mod plant_result;

pub use plant_detail::{DetailField, PlantDetail, PlantDetailParser};
pub use plant_result::{PlantResult, PlantResultParser};
