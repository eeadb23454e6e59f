// Router - Routes and middleware
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{
    get_controls, get_dashboard, get_reference, get_region, get_sector, health_check, list_companies,
    list_regions,
    list_sectors, post_refresh, put_controls, stream_dashboard,
};
use axum::Router;
use axum::routing::{get, post};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

// Compression is handled per response, so no CompressionLayer here.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(health_check))
        .route("/dashboard", get(get_dashboard))
        .route("/dashboard/stream", get(stream_dashboard))
        .route("/controls", get(get_controls).put(put_controls))
        .route("/refresh", post(post_refresh))
        .route("/sectors", get(list_sectors))
        .route("/sectors/:id", get(get_sector))
        .route("/regions", get(list_regions))
        .route("/regions/:name", get(get_region))
        .route("/companies", get(list_companies))
        .route("/reference", get(get_reference))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
