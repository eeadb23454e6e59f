// Application layer - Use cases and the refresh cycle
pub mod clock;
pub mod dashboard_service;
pub mod live_updater;
pub mod presentation_surface;
pub mod refresh_loop;
pub mod series_generator;
pub mod streaming_service;
