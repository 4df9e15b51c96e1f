//! Error types for upstream fetching and HTML parsing.

use reqwest::StatusCode;

/// Errors raised while talking to calscape.org or parsing its pages.
#[derive(thiserror::Error, Debug)]
pub enum ScrapeError {
    /// Network failure (connect, TLS, body read).
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("upstream request to {url} timed out")]
    Timeout { url: String },
    #[error("unexpected status {status} from {url}")]
    HttpStatus { status: StatusCode, url: String },
    #[error(transparent)]
    Redirect(#[from] RedirectError),
    /// A result row whose DOM id does not end in an integer.
    #[error("malformed result row id {id:?}")]
    MalformedRow { id: String },
    #[error("invalid selector {0:?}")]
    Selector(String),
    #[error("invalid upstream base url {0:?}")]
    InvalidBaseUrl(String),
}

/// Violations of the single-hop redirect protocol used by the search endpoint.
#[derive(thiserror::Error, Debug)]
pub enum RedirectError {
    #[error("redirect response without a Location header")]
    MissingLocation,
    #[error("unusable redirect location {0:?}")]
    InvalidLocation(String),
    #[error("second redirect ({status}) while following search redirect")]
    SecondRedirect { status: StatusCode },
}

impl ScrapeError {
    /// Classify a reqwest failure, splitting timeouts out of generic transport errors.
    pub fn from_request(err: reqwest::Error, url: &str) -> Self {
        if err.is_timeout() {
            ScrapeError::Timeout {
                url: url.to_string(),
            }
        } else {
            ScrapeError::Http(err)
        }
    }

    /// True for failures reaching the upstream site, as opposed to parse failures.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            ScrapeError::Http(_) | ScrapeError::Timeout { .. } | ScrapeError::HttpStatus { .. }
        )
    }
}
