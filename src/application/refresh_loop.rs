// Refresh loop - UPDATE -> RENDER -> WAIT, driven by the auto-refresh toggle
use crate::application::clock::Clock;
use crate::application::live_updater::LiveUpdater;
use crate::application::presentation_surface::PresentationSurface;
use crate::domain::controls::DashboardControls;
use crate::domain::session::Session;
use rand::rngs::StdRng;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio::time::Instant;

const TRIGGER_CAPACITY: usize = 8;

/// Manual refresh request from the user.
#[derive(Debug, Clone, Copy)]
pub struct RefreshTrigger;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Wake {
    Timer,
    Manual,
    Shutdown,
}

/// Controls a running loop from the outside.
#[derive(Clone)]
pub struct RefreshHandle {
    triggers: mpsc::Sender<RefreshTrigger>,
    shutdown: Arc<watch::Sender<bool>>,
}

impl RefreshHandle {
    /// Queue a manual refresh. Returns false once the loop has stopped.
    pub fn request_refresh(&self) -> bool {
        match self.triggers.try_send(RefreshTrigger) {
            Ok(()) => true,
            // A burst of clicks collapses into the refreshes already queued
            Err(mpsc::error::TrySendError::Full(_)) => true,
            Err(mpsc::error::TrySendError::Closed(_)) => false,
        }
    }

    pub fn shutdown(&self) {
        self.shutdown.send_replace(true);
    }

    /// Flips to `true` when the session is being torn down.
    pub fn stopped(&self) -> watch::Receiver<bool> {
        self.shutdown.subscribe()
    }
}

pub struct RefreshLoop {
    session: Session,
    updater: LiveUpdater,
    surface: Arc<dyn PresentationSurface>,
    clock: Arc<dyn Clock>,
    rng: StdRng,
    interval: Duration,
    controls: watch::Receiver<DashboardControls>,
    triggers: mpsc::Receiver<RefreshTrigger>,
    shutdown: watch::Receiver<bool>,
    revision: u64,
}

impl RefreshLoop {
    pub fn new(
        session: Session,
        updater: LiveUpdater,
        surface: Arc<dyn PresentationSurface>,
        clock: Arc<dyn Clock>,
        rng: StdRng,
        interval: Duration,
        controls: watch::Receiver<DashboardControls>,
    ) -> (Self, RefreshHandle) {
        let (trigger_tx, trigger_rx) = mpsc::channel(TRIGGER_CAPACITY);
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        let refresh_loop = Self {
            session,
            updater,
            surface,
            clock,
            rng,
            interval,
            controls,
            triggers: trigger_rx,
            shutdown: shutdown_rx,
            revision: 0,
        };
        let handle = RefreshHandle {
            triggers: trigger_tx,
            shutdown: Arc::new(shutdown_tx),
        };

        (refresh_loop, handle)
    }

    /// Runs until shutdown and hands the session back.
    pub async fn run(mut self) -> Session {
        tracing::info!("Refresh loop started (interval {:?})", self.interval);

        loop {
            self.update();
            self.render().await;

            match self.wait().await {
                Wake::Timer => tracing::debug!("Auto refresh"),
                Wake::Manual => tracing::debug!("Manual refresh"),
                Wake::Shutdown => break,
            }
        }

        tracing::info!("Refresh loop stopped after {} renders", self.revision);
        self.session
    }

    fn update(&mut self) {
        let now = self.clock.now();
        if self
            .updater
            .update(&mut self.session.macro_series, now, &mut self.rng)
        {
            tracing::info!(
                "Macro series extended to {} rows",
                self.session.macro_series.len()
            );
        }
    }

    async fn render(&mut self) {
        self.revision += 1;
        let snapshot = Arc::new(self.session.snapshot(self.revision, self.clock.now()));
        if let Err(e) = self.surface.render(snapshot).await {
            tracing::warn!("Render of revision {} failed: {}", self.revision, e);
        }
    }

    /// Cancellable timer: reset by a manual trigger, stopped while
    /// auto-refresh is off, aborted by shutdown.
    async fn wait(&mut self) -> Wake {
        if *self.shutdown.borrow() {
            return Wake::Shutdown;
        }

        let mut armed = self.controls.borrow_and_update().auto_refresh;
        let mut deadline = Instant::now() + self.interval;

        loop {
            tokio::select! {
                biased;

                changed = self.shutdown.changed() => {
                    if changed.is_err() || *self.shutdown.borrow() {
                        return Wake::Shutdown;
                    }
                }
                trigger = self.triggers.recv() => {
                    return match trigger {
                        Some(RefreshTrigger) => Wake::Manual,
                        None => Wake::Shutdown,
                    };
                }
                changed = self.controls.changed() => {
                    if changed.is_err() {
                        return Wake::Shutdown;
                    }
                    let auto_refresh = self.controls.borrow_and_update().auto_refresh;
                    if auto_refresh && !armed {
                        deadline = Instant::now() + self.interval;
                    }
                    armed = auto_refresh;
                }
                _ = tokio::time::sleep_until(deadline), if armed => {
                    return Wake::Timer;
                }
            }
        }
    }
}
