//! sentinel-digest - Sentinel Digest presentation layer
//!
//! Server-side rendering for the Sentinel Digest news site: fetches
//! article and opportunity data from the content REST API, picks the
//! day's shape layouts deterministically, and serves rendered pages.
//!
//! # Architecture
//!
//! The library is organized into several modules:
//!
//! - [`config`] - Configuration management and settings
//! - [`layout`] - Daily deterministic layout selection and article allocation
//! - [`api`] - Content API client and fetching seams
//! - [`models`] - Core data structures and types
//! - [`render`] - Handlebars page rendering
//! - [`server`] - Axum HTTP server and routes
//!
//! # Example
//!
//! ```no_run
//! use sentinel_digest::config::Config;
//! use sentinel_digest::server::DigestServer;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env()?;
//!     let server = DigestServer::new(config)?;
//!     server.start().await?;
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod layout;
pub mod models;
pub mod render;
pub mod server;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::api::{ArticleSource, DigestClient};
    pub use crate::config::Config;
    pub use crate::error::{Error, ErrorCategory, Result};
    pub use crate::layout::{allocate, Allocation, DailySelector, LayoutRegistry};
    pub use crate::models::{Article, Collection};
    pub use crate::render::PageRenderer;
    pub use crate::server::DigestServer;
}

// Direct re-exports for convenience
pub use layout::{allocate, Allocation, DailySelector, LayoutDescriptor, LayoutRegistry};
pub use models::{Article, Collection};
