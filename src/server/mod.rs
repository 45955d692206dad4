//! HTTP server for the presentation layer
//!
//! Serves rendered collection pages over Axum. State is shared,
//! read-only plumbing: the content API client, the daily layout
//! selector, and the template renderer.

pub mod routes;

pub use routes::create_router;

use std::sync::Arc;
use std::time::Instant;

use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::api::{ArticleSource, DigestClient, OpportunitySource};
use crate::config::{Config, PresentationConfig};
use crate::error::{Error, Result};
use crate::layout::{DailySelector, LayoutRegistry};
use crate::render::PageRenderer;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Article feed for collection pages
    pub articles: Arc<dyn ArticleSource>,

    /// Opportunity listings feed
    pub opportunities: Arc<dyn OpportunitySource>,

    /// Daily layout selector
    pub selector: Arc<DailySelector>,

    /// Page renderer
    pub renderer: Arc<PageRenderer>,

    /// Page composition settings
    pub presentation: PresentationConfig,

    /// Server start time
    pub start_time: Instant,
}

/// Main presentation server
pub struct DigestServer {
    config: Config,
    state: AppState,
}

impl DigestServer {
    /// Create a server from configuration
    pub fn new(config: Config) -> Result<Self> {
        config
            .validate()
            .map_err(|e| Error::Config(e.to_string()))?;

        let client = Arc::new(DigestClient::with_config(
            &config.api.base_url,
            config.request_timeout(),
            config.api.max_retries,
        )?);

        let state = AppState {
            articles: client.clone(),
            opportunities: client,
            selector: Arc::new(DailySelector::new(LayoutRegistry::builtin())),
            renderer: Arc::new(PageRenderer::new()?),
            presentation: config.presentation.clone(),
            start_time: Instant::now(),
        };

        Ok(Self { config, state })
    }

    /// Get the application state
    pub fn state(&self) -> AppState {
        self.state.clone()
    }

    /// Build the router with all routes and configured layers
    pub fn build_router(&self) -> Router {
        let mut router = create_router(self.state.clone());

        if self.config.server.enable_cors {
            router = router.layer(
                CorsLayer::new()
                    .allow_origin(Any)
                    .allow_methods(Any)
                    .allow_headers(Any),
            );
        }

        if self.config.server.enable_request_logging {
            router = router.layer(TraceLayer::new_for_http());
        }

        router
    }

    /// Start the server, shutting down gracefully on ctrl-c
    pub async fn start(&self) -> Result<()> {
        let router = self.build_router();
        let addr = self.config.server.bind_address;

        tracing::info!(%addr, "Starting Sentinel Digest server");

        let listener = tokio::net::TcpListener::bind(addr).await?;

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "Failed to install ctrl-c handler");
    }
}
