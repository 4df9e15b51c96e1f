//! Search result listing parser for calscape.org.

use rand::seq::SliceRandom;
use rand::Rng;
use scraper::{ElementRef, Html, Selector};
use serde::{Deserialize, Serialize};

use crate::scraper::error::ScrapeError;
use crate::scraper::extract::{extract_text_in, selector, slug_from_redirect};

/// One row of a search result listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlantResult {
    pub id: u64,
    pub common_name: String,
    pub species: String,
    pub description: String,
    /// Detail page slug; empty when the row carries no detail link.
    pub slug: String,
}

/// Parser for search result listings
pub struct PlantResultParser;

/// Per-row selectors, compiled once per listing.
struct RowSelectors {
    link: Selector,
    common_name: Selector,
    species: Selector,
    description: Selector,
}

impl RowSelectors {
    fn new() -> Result<Self, ScrapeError> {
        Ok(Self {
            link: selector(".image a")?,
            common_name: selector(".common_name")?,
            species: selector(".species")?,
            description: selector(".desc")?,
        })
    }
}

impl PlantResultParser {
    /// Parse a listing and return a random sample of at most `limit` rows.
    pub fn parse(html: &str, limit: usize) -> Result<Vec<PlantResult>, ScrapeError> {
        Self::parse_with_rng(html, limit, &mut rand::thread_rng())
    }

    /// Same as [`PlantResultParser::parse`], drawing the sample from `rng`.
    pub fn parse_with_rng<R: Rng + ?Sized>(
        html: &str,
        limit: usize,
        rng: &mut R,
    ) -> Result<Vec<PlantResult>, ScrapeError> {
        let mut results = Self::parse_all(html)?;
        results.shuffle(rng);
        results.truncate(limit);
        Ok(results)
    }

    /// Parse every row of a listing in document order.
    pub fn parse_all(html: &str) -> Result<Vec<PlantResult>, ScrapeError> {
        let document = Html::parse_document(html);
        let row_selector = selector(".content.view_list .row")?;
        let selectors = RowSelectors::new()?;

        document
            .select(&row_selector)
            .map(|row| Self::parse_row(row, &selectors))
            .collect()
    }

    fn parse_row(row: ElementRef<'_>, selectors: &RowSelectors) -> Result<PlantResult, ScrapeError> {
        let id = Self::parse_row_id(row.value().id().unwrap_or_default())?;

        let slug = row
            .select(&selectors.link)
            .next()
            .and_then(|link| link.value().attr("onclick"))
            .map(slug_from_redirect)
            .unwrap_or_default();

        Ok(PlantResult {
            id,
            common_name: extract_text_in(row, &selectors.common_name),
            species: extract_text_in(row, &selectors.species),
            description: extract_text_in(row, &selectors.description),
            slug,
        })
    }

    /// Row ids look like `plant__1234`; the suffix after the last `__` is the plant id.
    fn parse_row_id(dom_id: &str) -> Result<u64, ScrapeError> {
        dom_id
            .rsplit("__")
            .next()
            .and_then(|suffix| suffix.trim().parse().ok())
            .ok_or_else(|| ScrapeError::MalformedRow {
                id: dom_id.to_string(),
            })
    }
}
