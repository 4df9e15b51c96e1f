//! Plant detail page parser for calscape.org.

use scraper::Html;
use serde::{Deserialize, Serialize};

use crate::scraper::error::ScrapeError;
use crate::scraper::extract::{extract_text, selector};

/// Plant detail data
///
/// Every field is plain text; an empty string means the page has no such section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct PlantDetail {
    pub common_name: String,
    pub species: String,
    pub description: String,
    // Horticultural attributes
    pub plant_type: String,
    pub size: String,
    pub form: String,
    pub growth_rate: String,
    pub dormancy: String,
    pub fragrance: String,
    pub flower_color: String,
    pub flowering_season: String,
    pub wildlife_supported: String,
    pub sun: String,
    pub moisture: String,
    pub summer_irrigation: String,
    pub ease_of_care: String,
    pub cold_tolerance: String,
    pub soil_drainage: String,
    pub soil_description: String,
    pub common_uses: String,
    pub propagation: String,
    pub sunset_zones: String,
    pub site_type: String,
    pub climate: String,
    pub alternative_names: String,
}

/// The fields scraped from a detail page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DetailField {
    CommonName,
    Species,
    Description,
    PlantType,
    Size,
    Form,
    GrowthRate,
    Dormancy,
    Fragrance,
    FlowerColor,
    FloweringSeason,
    WildlifeSupported,
    Sun,
    Moisture,
    SummerIrrigation,
    EaseOfCare,
    ColdTolerance,
    SoilDrainage,
    SoilDescription,
    CommonUses,
    Propagation,
    SunsetZones,
    SiteType,
    Climate,
    AlternativeNames,
}

impl DetailField {
    pub const ALL: [DetailField; 25] = [
        DetailField::CommonName,
        DetailField::Species,
        DetailField::Description,
        DetailField::PlantType,
        DetailField::Size,
        DetailField::Form,
        DetailField::GrowthRate,
        DetailField::Dormancy,
        DetailField::Fragrance,
        DetailField::FlowerColor,
        DetailField::FloweringSeason,
        DetailField::WildlifeSupported,
        DetailField::Sun,
        DetailField::Moisture,
        DetailField::SummerIrrigation,
        DetailField::EaseOfCare,
        DetailField::ColdTolerance,
        DetailField::SoilDrainage,
        DetailField::SoilDescription,
        DetailField::CommonUses,
        DetailField::Propagation,
        DetailField::SunsetZones,
        DetailField::SiteType,
        DetailField::Climate,
        DetailField::AlternativeNames,
    ];

    /// Field name, shared by the JSON output and the `.plant_info` class names.
    pub fn name(self) -> &'static str {
        match self {
            DetailField::CommonName => "common_name",
            DetailField::Species => "species",
            DetailField::Description => "description",
            DetailField::PlantType => "plant_type",
            DetailField::Size => "size",
            DetailField::Form => "form",
            DetailField::GrowthRate => "growth_rate",
            DetailField::Dormancy => "dormancy",
            DetailField::Fragrance => "fragrance",
            DetailField::FlowerColor => "flower_color",
            DetailField::FloweringSeason => "flowering_season",
            DetailField::WildlifeSupported => "wildlife_supported",
            DetailField::Sun => "sun",
            DetailField::Moisture => "moisture",
            DetailField::SummerIrrigation => "summer_irrigation",
            DetailField::EaseOfCare => "ease_of_care",
            DetailField::ColdTolerance => "cold_tolerance",
            DetailField::SoilDrainage => "soil_drainage",
            DetailField::SoilDescription => "soil_description",
            DetailField::CommonUses => "common_uses",
            DetailField::Propagation => "propagation",
            DetailField::SunsetZones => "sunset_zones",
            DetailField::SiteType => "site_type",
            DetailField::Climate => "climate",
            DetailField::AlternativeNames => "alternative_names",
        }
    }

    /// CSS selector locating this field on a detail page.
    pub fn selector(self) -> String {
        match self {
            DetailField::CommonName => ".common_name".to_string(),
            DetailField::Species => ".species_info .sub_header1".to_string(),
            DetailField::Description => "fieldset.about".to_string(),
            other => format!(".plant_info .{} .info", other.name()),
        }
    }
}

impl PlantDetail {
    fn field_mut(&mut self, field: DetailField) -> &mut String {
        match field {
            DetailField::CommonName => &mut self.common_name,
            DetailField::Species => &mut self.species,
            DetailField::Description => &mut self.description,
            DetailField::PlantType => &mut self.plant_type,
            DetailField::Size => &mut self.size,
            DetailField::Form => &mut self.form,
            DetailField::GrowthRate => &mut self.growth_rate,
            DetailField::Dormancy => &mut self.dormancy,
            DetailField::Fragrance => &mut self.fragrance,
            DetailField::FlowerColor => &mut self.flower_color,
            DetailField::FloweringSeason => &mut self.flowering_season,
            DetailField::WildlifeSupported => &mut self.wildlife_supported,
            DetailField::Sun => &mut self.sun,
            DetailField::Moisture => &mut self.moisture,
            DetailField::SummerIrrigation => &mut self.summer_irrigation,
            DetailField::EaseOfCare => &mut self.ease_of_care,
            DetailField::ColdTolerance => &mut self.cold_tolerance,
            DetailField::SoilDrainage => &mut self.soil_drainage,
            DetailField::SoilDescription => &mut self.soil_description,
            DetailField::CommonUses => &mut self.common_uses,
            DetailField::Propagation => &mut self.propagation,
            DetailField::SunsetZones => &mut self.sunset_zones,
            DetailField::SiteType => &mut self.site_type,
            DetailField::Climate => &mut self.climate,
            DetailField::AlternativeNames => &mut self.alternative_names,
        }
    }
}

/// Parser for plant detail pages
pub struct PlantDetailParser;

impl PlantDetailParser {
    /// Parse a plant detail page from HTML
    pub fn parse(html: &str) -> Result<PlantDetail, ScrapeError> {
        let document = Html::parse_document(html);
        let mut detail = PlantDetail::default();

        for field in DetailField::ALL {
            let sel = selector(&field.selector())?;
            *detail.field_mut(field) = extract_text(&document, &sel);
        }

        Ok(detail)
    }
}
