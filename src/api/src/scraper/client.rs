//! HTTP client for calscape.org search and detail pages.

use std::time::Duration;

use bytes::Bytes;
use reqwest::header::{CONTENT_TYPE, LOCATION};
use reqwest::{Response, StatusCode};
use tracing::debug;
use url::Url;

use super::error::{RedirectError, ScrapeError};
use super::parsers::{PlantDetail, PlantDetailParser, PlantResult, PlantResultParser};
use super::{detail_url, search_url};
use crate::config::UpstreamConfig;

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Upstream client. Cloning is cheap and shares the connection pool.
#[derive(Debug, Clone)]
pub struct CalscapeClient {
    base_url: String,
    base: Url,
    http: reqwest::Client,
}

impl CalscapeClient {
    pub fn new(base_url: &str, timeout: Duration, user_agent: &str) -> Result<Self, ScrapeError> {
        let base_url = base_url.trim_end_matches('/').to_string();
        let base =
            Url::parse(&base_url).map_err(|_| ScrapeError::InvalidBaseUrl(base_url.clone()))?;

        // Redirects are handled by hand: search follows exactly one hop.
        let http = reqwest::Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::none())
            .build()?;

        Ok(Self {
            base_url,
            base,
            http,
        })
    }

    pub fn from_config(config: &UpstreamConfig) -> Result<Self, ScrapeError> {
        Self::new(
            &config.base_url,
            Duration::from_secs(config.timeout_secs),
            &config.user_agent,
        )
    }

    #[cfg(test)]
    pub fn with_base_url(base_url: &str) -> Result<Self, ScrapeError> {
        Self::from_config(&UpstreamConfig {
            base_url: base_url.to_string(),
            ..Default::default()
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Run a search and return a random sample of at most `limit` results.
    pub async fn search(&self, form: Bytes, limit: usize) -> Result<Vec<PlantResult>, ScrapeError> {
        let html = self.search_page(form).await?;
        PlantResultParser::parse(&html, limit)
    }

    /// Fetch the final results page for a form-encoded search.
    ///
    /// The listing endpoint answers either with the results directly or with a
    /// 302 to a canonical listing URL. One hop is followed; anything further fails.
    pub async fn search_page(&self, form: Bytes) -> Result<String, ScrapeError> {
        let url = search_url(&self.base_url);
        debug!("POST {} ({} byte form)", url, form.len());

        let resp = self
            .http
            .post(&url)
            .header(CONTENT_TYPE, FORM_CONTENT_TYPE)
            .body(form)
            .send()
            .await
            .map_err(|e| ScrapeError::from_request(e, &url))?;

        if resp.status() != StatusCode::FOUND {
            return Self::read_html(resp, &url).await;
        }

        let target = self.redirect_target(&resp)?;
        debug!("search redirected to {}", target);
        self.follow_redirect(target).await
    }

    /// Fetch and parse the detail page for `slug`.
    pub async fn fetch_detail(&self, slug: &str) -> Result<PlantDetail, ScrapeError> {
        let url = detail_url(&self.base_url, slug);
        debug!("GET {}", url);

        let resp = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| ScrapeError::from_request(e, &url))?;

        let html = Self::read_html(resp, &url).await?;
        PlantDetailParser::parse(&html)
    }

    fn redirect_target(&self, resp: &Response) -> Result<Url, RedirectError> {
        let value = resp
            .headers()
            .get(LOCATION)
            .ok_or(RedirectError::MissingLocation)?;
        let location = value.to_str().map_err(|_| {
            RedirectError::InvalidLocation(String::from_utf8_lossy(value.as_bytes()).into_owned())
        })?;

        if location.trim().is_empty() {
            return Err(RedirectError::MissingLocation);
        }

        self.resolve_location(location)
    }

    /// Resolve a `Location` value against the configured base.
    ///
    /// Absolute paths are appended to the base URL so a base with a path prefix
    /// is kept. Other targets must stay on the base origin.
    fn resolve_location(&self, location: &str) -> Result<Url, RedirectError> {
        let invalid = || RedirectError::InvalidLocation(location.to_string());

        if location.starts_with('/') && !location.starts_with("//") {
            return Url::parse(&format!("{}{}", self.base_url, location)).map_err(|_| invalid());
        }

        let target = self.base.join(location).map_err(|_| invalid())?;
        if target.origin() != self.base.origin() {
            return Err(invalid());
        }
        Ok(target)
    }

    async fn follow_redirect(&self, target: Url) -> Result<String, ScrapeError> {
        let url = target.to_string();
        let resp = self
            .http
            .get(target)
            .send()
            .await
            .map_err(|e| ScrapeError::from_request(e, &url))?;

        let status = resp.status();
        if status.is_redirection() {
            return Err(RedirectError::SecondRedirect { status }.into());
        }

        Self::read_html(resp, &url).await
    }

    async fn read_html(resp: Response, url: &str) -> Result<String, ScrapeError> {
        let status = resp.status();
        if !status.is_success() {
            return Err(ScrapeError::HttpStatus {
                status,
                url: url.to_string(),
            });
        }

        // Decodes by the declared charset, UTF-8 when none is given
        resp.text()
            .await
            .map_err(|e| ScrapeError::from_request(e, url))
    }
}
