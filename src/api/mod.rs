//! Backend REST API access
//!
//! The presentation layer consumes an external content API (articles,
//! categories, opportunities). [`DigestClient`] is the concrete reqwest
//! client; [`ArticleSource`] is the seam the page pipeline depends on,
//! so tests can substitute a canned source.

pub mod client;

pub use client::{ArticleQuery, DigestClient};

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{Article, Collection, Opportunity, OpportunityKind};

/// Errors that can occur while talking to the content API
#[derive(Error, Debug)]
pub enum FetchError {
    /// Transport-level HTTP failure
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Resource does not exist (no retry)
    #[error("Not found: {0}")]
    NotFound(String),

    /// Non-success status from the API
    #[error("API returned status {0}")]
    Status(u16),

    /// All retry attempts exhausted
    #[error("Maximum retry attempts exceeded")]
    MaxRetriesExceeded,

    /// Response body did not match the expected shape
    #[error("Decoding error: {0}")]
    Decode(String),

    /// Malformed base URL or path
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl FetchError {
    /// Transient failures worth retrying
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Http(_) | Self::MaxRetriesExceeded => true,
            Self::NotFound(_) | Self::Status(_) | Self::Decode(_) | Self::InvalidUrl(_) => false,
        }
    }
}

/// Result type for API operations
pub type FetchResult<T> = std::result::Result<T, FetchError>;

/// Ordered article feed for a collection
///
/// Implementations return articles already sorted by display priority
/// (newest or highest-ranked first); the layout core never re-sorts.
#[async_trait]
pub trait ArticleSource: Send + Sync {
    /// Fetch up to `limit` articles for the collection
    async fn fetch_collection(
        &self,
        collection: &Collection,
        limit: usize,
    ) -> FetchResult<Vec<Article>>;
}

/// Opportunity listings feed
#[async_trait]
pub trait OpportunitySource: Send + Sync {
    /// Fetch listings, optionally filtered by kind
    async fn fetch_opportunities(
        &self,
        kind: Option<OpportunityKind>,
    ) -> FetchResult<Vec<Opportunity>>;
}
