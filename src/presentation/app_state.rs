// Application state for HTTP handlers
use crate::application::dashboard_service::DashboardService;
use crate::application::refresh_loop::RefreshHandle;
use crate::application::streaming_service::StreamingDashboardService;
use crate::domain::controls::DashboardControls;
use crate::domain::reference::ReferenceTables;
use crate::domain::region::RegionalTable;
use crate::domain::sector::SectorCatalog;
use crate::infrastructure::watch_surface::WatchSurface;
use std::sync::Arc;
use tokio::sync::watch;

#[derive(Clone)]
pub struct AppState {
    pub dashboard_service: DashboardService,
    pub streaming_service: StreamingDashboardService,
    pub surface: WatchSurface,
    pub controls: Arc<watch::Sender<DashboardControls>>,
    pub refresh: RefreshHandle,
    pub catalog: Arc<SectorCatalog>,
    pub regions: Arc<RegionalTable>,
    pub reference: ReferenceTables,
}
