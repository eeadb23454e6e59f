// HTTP request handlers
use crate::domain::controls::{ControlsUpdate, DashboardControls};
use crate::domain::reference::ReferenceTables;
use crate::domain::region::RegionalUnit;
use crate::domain::sector::{CompanyProfile, EmploymentShare, Sector};
use crate::infrastructure::chunked_json::stream_from_receiver;
use crate::infrastructure::http_response::{accepts_brotli, json_response};
use crate::presentation::app_state::AppState;
use crate::presentation::error::{ApiError, ApiResult};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SectorListing {
    pub sectors: Vec<Sector>,
    pub total_employment: u64,
    pub gdp_share_total: f64,
    pub employment_shares: Vec<EmploymentShare>,
    pub colors: HashMap<&'static str, &'static str>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionListing {
    pub regions: Vec<RegionalUnit>,
    pub total_population: u64,
    pub total_gdp: f64,
}

#[derive(Debug, Default, Deserialize)]
pub struct CompanyQuery {
    pub sector: Option<String>,
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// Full dashboard for the latest render and the current controls
pub async fn get_dashboard(
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Response> {
    let snapshot = state.surface.latest().ok_or(ApiError::NotReady)?;
    let controls = state.controls.borrow().clone();
    let view = state.dashboard_service.build_view(&snapshot, &controls);

    json_response(&view, accepts_brotli(&headers))
        .await
        .map_err(|status| ApiError::Internal(status.to_string()))
}

/// Progressive dashboard stream, re-sent after every render
pub async fn stream_dashboard(
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    let rx = state.streaming_service.stream_dashboard();
    stream_from_receiver(rx, accepts_brotli(&headers)).await
}

pub async fn get_controls(State(state): State<Arc<AppState>>) -> Json<DashboardControls> {
    Json(state.controls.borrow().clone())
}

/// Partial update; rejected updates leave the controls untouched
pub async fn put_controls(
    State(state): State<Arc<AppState>>,
    Json(update): Json<ControlsUpdate>,
) -> ApiResult<Json<DashboardControls>> {
    let mut rejected = None;
    state
        .controls
        .send_if_modified(|current| match current.apply(update, &state.catalog) {
            Ok(next) => {
                let changed = *current != next;
                *current = next;
                changed
            }
            Err(e) => {
                rejected = Some(e);
                false
            }
        });

    if let Some(e) = rejected {
        return Err(e.into());
    }

    let controls = state.controls.borrow().clone();
    tracing::info!(
        "Controls: {}..{}, {} sectors, auto_refresh={}",
        controls.start,
        controls.end.map_or_else(|| "latest".to_string(), |d| d.to_string()),
        controls.sectors.len(),
        controls.auto_refresh
    );
    Ok(Json(controls))
}

/// Manual refresh; the loop picks it up on its next wait
pub async fn post_refresh(State(state): State<Arc<AppState>>) -> ApiResult<StatusCode> {
    if state.refresh.request_refresh() {
        Ok(StatusCode::ACCEPTED)
    } else {
        Err(ApiError::Unavailable("refresh loop stopped".into()))
    }
}

pub async fn list_sectors(State(state): State<Arc<AppState>>) -> Json<SectorListing> {
    Json(SectorListing {
        sectors: state.catalog.iter().cloned().collect(),
        total_employment: state.catalog.total_employment(),
        gdp_share_total: state.catalog.gdp_share_total(),
        employment_shares: state.catalog.employment_shares(),
        colors: state.catalog.colors(),
    })
}

pub async fn get_sector(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Sector>> {
    state
        .catalog
        .get(&id)
        .cloned()
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("sector {}", id)))
}

pub async fn list_regions(State(state): State<Arc<AppState>>) -> Json<RegionListing> {
    Json(RegionListing {
        regions: state.regions.iter().cloned().collect(),
        total_population: state.regions.total_population(),
        total_gdp: state.regions.total_gdp(),
    })
}

pub async fn get_region(
    Path(name): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<RegionalUnit>> {
    state
        .regions
        .get(&name)
        .cloned()
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("region {}", name)))
}

/// Key companies drawn for this session, optionally for one sector
pub async fn list_companies(
    Query(query): Query<CompanyQuery>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<CompanyProfile>>> {
    if let Some(id) = &query.sector {
        if !state.catalog.contains(id) {
            return Err(ApiError::NotFound(format!("sector {}", id)));
        }
    }
    let snapshot = state.surface.latest().ok_or(ApiError::NotReady)?;

    Ok(Json(
        snapshot
            .companies
            .iter()
            .filter(|c| query.sector.as_deref().is_none_or(|id| c.sector_id == id))
            .cloned()
            .collect(),
    ))
}

pub async fn get_reference(State(state): State<Arc<AppState>>) -> Json<ReferenceTables> {
    Json(state.reference.clone())
}
