// Main entry point - Dependency injection and server setup
mod application;
mod domain;
mod infrastructure;
mod presentation;

use axum::Router;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::{net::SocketAddr, sync::Arc};
use tokio::sync::watch;
use tracing_subscriber::EnvFilter;

use crate::application::clock::{Clock, SystemClock};
use crate::application::dashboard_service::DashboardService;
use crate::application::live_updater::LiveUpdater;
use crate::application::refresh_loop::RefreshLoop;
use crate::application::series_generator::SeriesGenerator;
use crate::application::streaming_service::StreamingDashboardService;
use crate::domain::controls::DashboardControls;
use crate::infrastructure::config::load_dashboard_config;
use crate::infrastructure::watch_surface::WatchSurface;
use crate::presentation::app_state::AppState;
use crate::presentation::router::create_router;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug")),
        )
        .init();

    // Load configuration
    let config = load_dashboard_config()?;
    let mut rng = match config.refresh.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);

    // Build the session (application layer)
    let generator = SeriesGenerator::new(config.generator.clone());
    let session = generator.build_session(clock.today(), &mut rng);
    let catalog = session.catalog.clone();
    let regions = session.regions.clone();
    let reference = session.reference.clone();

    let (controls_tx, controls_rx) =
        watch::channel(DashboardControls::initial(&catalog, clock.today()));

    // Presentation surface (infrastructure layer)
    let surface = WatchSurface::new();

    let (refresh_loop, refresh) = RefreshLoop::new(
        session,
        LiveUpdater::new(generator, config.refresh.live_update_days),
        Arc::new(surface.clone()),
        clock,
        rng,
        config.refresh.interval(),
        controls_rx.clone(),
    );
    let loop_task = tokio::spawn(refresh_loop.run());

    let dashboard_service = DashboardService::new(
        config.server.title.clone(),
        config.generator.macro_economy.base_growth_pct,
    );
    let streaming_service = StreamingDashboardService::new(
        dashboard_service.clone(),
        surface.subscribe(),
        controls_rx,
        refresh.stopped(),
    );

    // Create application state
    let state = Arc::new(AppState {
        dashboard_service,
        streaming_service,
        surface,
        controls: Arc::new(controls_tx),
        refresh: refresh.clone(),
        catalog,
        regions,
        reference,
    });

    // Build router (presentation layer)
    let router: Router = create_router(state);

    // Start server
    let addr: SocketAddr = config.server.bind_addr.parse()?;
    tracing::info!("Starting reunion-dashboard on {}", addr);

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router)
        .with_graceful_shutdown(async move {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!("Failed to listen for shutdown signal: {}", e);
            }
            tracing::info!("Shutting down");
            refresh.shutdown();
        })
        .await?;

    let session = loop_task.await?;
    tracing::info!(
        "Session closed with {} macro observations",
        session.macro_series.len()
    );

    Ok(())
}
