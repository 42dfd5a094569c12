use std::{net::SocketAddr, sync::Arc};

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse},
    routing::get,
    Json, Router,
};
use console_core::{
    render::{render_page, render_table, LOGO_PATH},
    ClusterSource, DisplayZone, HttpClusterClient, NodeListView,
};
use shared::error::{ApiError, ErrorCode};
use tower_http::trace::TraceLayer;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod config;

use config::load_settings;

const PAGE_TITLE: &str = "Cluster Console";
const LOGO_SVG: &str = include_str!("../static/logo.svg");

#[derive(Clone)]
struct AppState {
    source: Arc<dyn ClusterSource>,
    zone: DisplayZone,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let settings = load_settings();
    let client = HttpClusterClient::with_timeout(&settings.api_url, settings.request_timeout())?;
    let state = AppState {
        source: Arc::new(client),
        zone: settings.display_zone(),
    };
    let app = build_router(Arc::new(state));

    let addr: SocketAddr = settings.bind_addr.parse()?;
    info!(%addr, api_url = %settings.api_url, "console listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/nodes/:id", get(node_page))
        .route(LOGO_PATH, get(logo))
        .route("/healthz", get(healthz))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn healthz() -> &'static str {
    "ok"
}

async fn logo() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "image/svg+xml")], LOGO_SVG)
}

/// Each page load is one mount of the node list.
async fn index(State(state): State<Arc<AppState>>) -> Html<String> {
    let view = NodeListView::with_display_zone(Arc::clone(&state.source), state.zone);
    view.mount();
    view.settle().await;
    let page = render_page(PAGE_TITLE, &view.render());
    view.unmount();
    Html(page)
}

async fn node_page(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Html<String>, (StatusCode, Json<ApiError>)> {
    let node = state
        .source
        .node(&id)
        .await
        .map_err(|e| {
            error!(node_id = %id, error = %e, "failed to look up node");
            (
                StatusCode::BAD_GATEWAY,
                Json(ApiError::new(ErrorCode::Upstream, e.to_string())),
            )
        })?
        .ok_or_else(|| {
            (
                StatusCode::NOT_FOUND,
                Json(ApiError::new(ErrorCode::NotFound, "node not found")),
            )
        })?;

    let title = format!("{PAGE_TITLE} - {}", node.id);
    Ok(Html(render_page(
        &title,
        &render_table(std::slice::from_ref(&node), state.zone),
    )))
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
