use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScraperError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("failed to fetch {url} after {attempts} attempt(s): {last_error}")]
    FetchFailed {
        url: String,
        attempts: u32,
        last_error: String,
    },

    #[error("invalid CSS selector \"{selector}\": {reason}")]
    InvalidSelector { selector: String, reason: String },

    #[error("invalid product at {url}: {source}")]
    InvalidProduct {
        url: String,
        #[source]
        source: InvalidProduct,
    },
}

/// Why a scraped record may not become a catalog product.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidProduct {
    #[error("missing product URL")]
    MissingUrl,

    #[error("malformed product URL \"{0}\"")]
    InvalidUrl(String),

    #[error("missing title")]
    MissingTitle,

    #[error("invalid or missing price")]
    InvalidPrice,
}
