//! HTTP client for the content API
//!
//! Thin reqwest wrapper with bounded retry and exponential backoff.
//! Server errors (5xx) and transport failures retry; client errors do
//! not. The base URL is overridable so tests can point the client at a
//! mock server.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use url::Url;

use super::{ArticleSource, FetchError, FetchResult, OpportunitySource};
use crate::models::{
    Article, Category, Collection, ListPayload, Opportunity, OpportunityKind,
};

/// Query parameters for the article list endpoint
#[derive(Debug, Clone, Default)]
pub struct ArticleQuery {
    pub category: Option<String>,
    pub tag: Option<String>,
    pub search: Option<String>,
    pub page: Option<u32>,
    pub limit: Option<usize>,
}

impl ArticleQuery {
    pub fn with_category(mut self, slug: impl Into<String>) -> Self {
        self.category = Some(slug.into());
        self
    }

    pub fn with_tag(mut self, slug: impl Into<String>) -> Self {
        self.tag = Some(slug.into());
        self
    }

    pub fn with_search(mut self, query: impl Into<String>) -> Self {
        self.search = Some(query.into());
        self
    }

    pub fn with_page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(category) = &self.category {
            params.push(("category", category.clone()));
        }
        if let Some(tag) = &self.tag {
            params.push(("tag", tag.clone()));
        }
        if let Some(search) = &self.search {
            params.push(("search", search.clone()));
        }
        if let Some(page) = self.page {
            params.push(("page", page.to_string()));
        }
        if let Some(limit) = self.limit {
            params.push(("limit", limit.to_string()));
        }
        params
    }
}

/// Client for the Sentinel Digest content API
pub struct DigestClient {
    client: Client,
    base_url: String,
    max_retries: u32,
    base_delay_ms: u64,
}

impl DigestClient {
    /// Create a client with default timeout and retry settings
    ///
    /// # Errors
    ///
    /// Returns `FetchError::InvalidUrl` if `base_url` does not parse,
    /// or `FetchError::Http` if the HTTP client cannot be built.
    pub fn new(base_url: &str) -> FetchResult<Self> {
        Self::with_config(base_url, Duration::from_secs(30), 3)
    }

    /// Create a client with explicit timeout and retry settings
    pub fn with_config(base_url: &str, timeout: Duration, max_retries: u32) -> FetchResult<Self> {
        Url::parse(base_url).map_err(|_| FetchError::InvalidUrl(base_url.to_string()))?;

        let client = Client::builder()
            .timeout(timeout)
            .gzip(true)
            .user_agent(format!("sentinel-digest/{}", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            max_retries,
            base_delay_ms: 500,
        })
    }

    /// Shorten the backoff delay, for tests
    #[doc(hidden)]
    pub fn with_base_delay_ms(mut self, delay_ms: u64) -> Self {
        self.base_delay_ms = delay_ms;
        self
    }

    /// List articles with filters and pagination
    pub async fn articles(&self, query: &ArticleQuery) -> FetchResult<Vec<Article>> {
        let payload: ListPayload<Article> = self.get_json("/articles/", &query.params()).await?;
        Ok(payload.into_results())
    }

    /// Fetch a single article by slug
    pub async fn article(&self, slug: &str) -> FetchResult<Article> {
        self.get_json(&format!("/articles/{slug}/"), &[]).await
    }

    /// Trending articles, highest-ranked first
    pub async fn trending(&self, limit: usize) -> FetchResult<Vec<Article>> {
        let payload: ListPayload<Article> = self
            .get_json("/articles/trending/", &[("limit", limit.to_string())])
            .await?;
        Ok(payload.into_results())
    }

    /// Editorially curated top stories
    pub async fn top_stories(&self) -> FetchResult<Vec<Article>> {
        let payload: ListPayload<Article> = self.get_json("/articles/top-stories/", &[]).await?;
        Ok(payload.into_results())
    }

    /// Most-read articles
    pub async fn most_read(&self, limit: usize) -> FetchResult<Vec<Article>> {
        let payload: ListPayload<Article> = self
            .get_json("/articles/most-read/", &[("limit", limit.to_string())])
            .await?;
        Ok(payload.into_results())
    }

    /// All content categories
    pub async fn categories(&self) -> FetchResult<Vec<Category>> {
        let payload: ListPayload<Category> = self.get_json("/categories/", &[]).await?;
        Ok(payload.into_results())
    }

    /// Opportunity listings, optionally filtered by kind
    pub async fn opportunities(
        &self,
        kind: Option<OpportunityKind>,
    ) -> FetchResult<Vec<Opportunity>> {
        let params = match kind {
            Some(kind) => vec![("category", kind.as_str().to_string())],
            None => Vec::new(),
        };
        let payload: ListPayload<Opportunity> = self.get_json("/jobs/", &params).await?;
        Ok(payload.into_results())
    }

    /// GET a JSON resource with retry on 5xx and transport errors
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> FetchResult<T> {
        let url = format!("{}{}", self.base_url, path);

        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                let delay = self.base_delay_ms * 2u64.pow(attempt - 1);
                tracing::debug!(attempt, %url, delay_ms = delay, "Retrying API request");
                tokio::time::sleep(Duration::from_millis(delay)).await;
            }

            let response = match self.client.get(&url).query(params).send().await {
                Ok(response) => response,
                Err(err) => {
                    if attempt == self.max_retries {
                        return Err(FetchError::Http(err));
                    }
                    tracing::warn!(%url, error = %err, "Transport error, will retry");
                    continue;
                }
            };

            let status = response.status();
            if status.is_success() {
                return response
                    .json::<T>()
                    .await
                    .map_err(|err| FetchError::Decode(err.to_string()));
            }
            if status == StatusCode::NOT_FOUND {
                return Err(FetchError::NotFound(path.to_string()));
            }
            if status.is_client_error() {
                return Err(FetchError::Status(status.as_u16()));
            }

            tracing::warn!(status = status.as_u16(), %url, "Server error from content API");
        }

        Err(FetchError::MaxRetriesExceeded)
    }
}

#[async_trait]
impl ArticleSource for DigestClient {
    async fn fetch_collection(
        &self,
        collection: &Collection,
        limit: usize,
    ) -> FetchResult<Vec<Article>> {
        match collection {
            Collection::Home => self.articles(&ArticleQuery::default().with_limit(limit)).await,
            Collection::Trending => self.trending(limit).await,
            Collection::Category(slug) => {
                self.articles(&ArticleQuery::default().with_category(slug.clone()).with_limit(limit))
                    .await
            }
            Collection::Tag(slug) => {
                self.articles(&ArticleQuery::default().with_tag(slug.clone()).with_limit(limit))
                    .await
            }
            Collection::Search(query) => {
                self.articles(&ArticleQuery::default().with_search(query.clone()).with_limit(limit))
                    .await
            }
        }
    }
}

#[async_trait]
impl OpportunitySource for DigestClient {
    async fn fetch_opportunities(
        &self,
        kind: Option<OpportunityKind>,
    ) -> FetchResult<Vec<Opportunity>> {
        self.opportunities(kind).await
    }
}
