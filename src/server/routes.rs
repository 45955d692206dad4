//! Route handlers for the presentation server
//!
//! Every collection page follows the same pipeline: select today's
//! layout pair for the collection key, fetch enough articles to fill
//! both layouts plus the sidebar, allocate into buckets, render.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
    Json, Router,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::layout::allocate;
use crate::models::{Collection, OpportunityKind};

use super::AppState;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_secs: u64,
}

/// One selected layout, as exposed by the layouts endpoint
#[derive(Debug, Serialize)]
pub struct LayoutView {
    pub name: String,
    pub slots: usize,
}

/// Today's layout selection for a collection key
#[derive(Debug, Serialize)]
pub struct LayoutSelectionResponse {
    pub date: String,
    pub key: String,
    pub primary: LayoutView,
    pub secondary: LayoutView,
}

#[derive(Debug, Deserialize)]
struct SearchParams {
    #[serde(default)]
    q: String,
}

#[derive(Debug, Deserialize)]
struct OpportunityParams {
    kind: Option<String>,
}

/// Build the router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/trending", get(trending))
        .route("/category/{slug}", get(category))
        .route("/tag/{slug}", get(tag))
        .route("/search", get(search))
        .route("/opportunities", get(opportunities))
        .route("/healthz", get(healthz))
        .route("/api/layouts/{key}", get(daily_layouts))
        .with_state(state)
}

async fn home(State(state): State<AppState>) -> Response {
    collection_page(&state, Collection::Home).await
}

async fn trending(State(state): State<AppState>) -> Response {
    collection_page(&state, Collection::Trending).await
}

async fn category(State(state): State<AppState>, Path(slug): Path<String>) -> Response {
    collection_page(&state, Collection::Category(slug)).await
}

async fn tag(State(state): State<AppState>, Path(slug): Path<String>) -> Response {
    collection_page(&state, Collection::Tag(slug)).await
}

async fn search(State(state): State<AppState>, Query(params): Query<SearchParams>) -> Response {
    collection_page(&state, Collection::Search(params.q)).await
}

async fn opportunities(
    State(state): State<AppState>,
    Query(params): Query<OpportunityParams>,
) -> Response {
    let kind = params.kind.as_deref().and_then(OpportunityKind::parse);

    let listings = match state.opportunities.fetch_opportunities(kind).await {
        Ok(listings) => listings,
        Err(err) => {
            tracing::error!(error = %err, "Failed to fetch opportunities");
            return error_page(StatusCode::BAD_GATEWAY);
        }
    };

    match state.renderer.opportunities_page(&listings) {
        Ok(html) => Html(html).into_response(),
        Err(err) => {
            tracing::error!(error = %err, "Failed to render opportunities page");
            error_page(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

async fn healthz(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs: state.start_time.elapsed().as_secs(),
    })
}

/// Expose today's deterministic selection for a collection key.
/// Useful for checking which shapes a page will render without
/// fetching any content.
async fn daily_layouts(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Json<LayoutSelectionResponse> {
    let (primary, secondary) = state.selector.select_daily(&key);

    Json(LayoutSelectionResponse {
        date: Utc::now().date_naive().to_string(),
        key,
        primary: LayoutView {
            name: primary.name.clone(),
            slots: primary.required_articles,
        },
        secondary: LayoutView {
            name: secondary.name.clone(),
            slots: secondary.required_articles,
        },
    })
}

/// Shared collection page pipeline: select, fetch, allocate, render
async fn collection_page(state: &AppState, collection: Collection) -> Response {
    let (primary, secondary) = state.selector.select_daily(collection.key());

    let needed = primary.required_articles
        + secondary.required_articles
        + state.presentation.more_stories_count;
    let limit = needed.max(state.presentation.min_fetch_count);

    let articles = match state.articles.fetch_collection(&collection, limit).await {
        Ok(articles) => articles,
        Err(err) => {
            tracing::error!(%collection, error = %err, "Failed to fetch collection");
            return error_page(StatusCode::BAD_GATEWAY);
        }
    };

    tracing::debug!(
        %collection,
        primary_layout = %primary.name,
        secondary_layout = %secondary.name,
        fetched = articles.len(),
        "Rendering collection page"
    );

    let buckets = allocate(articles, primary.required_articles, secondary.required_articles);

    match state.renderer.collection_page(
        &collection,
        primary,
        secondary,
        &buckets,
        state.presentation.more_stories_count,
    ) {
        Ok(html) => Html(html).into_response(),
        Err(err) => {
            tracing::error!(%collection, error = %err, "Failed to render collection page");
            error_page(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

fn error_page(status: StatusCode) -> Response {
    let body = Html(
        "<!DOCTYPE html><html><body><h1>Something went wrong</h1>\
         <p>Please try again in a moment.</p></body></html>"
            .to_string(),
    );
    (status, body).into_response()
}
