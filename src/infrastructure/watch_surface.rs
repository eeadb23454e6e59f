// Presentation surface backed by a watch channel: handlers read the latest snapshot
use crate::application::presentation_surface::PresentationSurface;
use crate::domain::session::SessionSnapshot;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::watch;

pub type SnapshotReceiver = watch::Receiver<Option<Arc<SessionSnapshot>>>;

#[derive(Debug, Clone)]
pub struct WatchSurface {
    tx: Arc<watch::Sender<Option<Arc<SessionSnapshot>>>>,
}

impl WatchSurface {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(None);
        Self { tx: Arc::new(tx) }
    }

    pub fn latest(&self) -> Option<Arc<SessionSnapshot>> {
        self.tx.borrow().clone()
    }

    pub fn subscribe(&self) -> SnapshotReceiver {
        self.tx.subscribe()
    }
}

impl Default for WatchSurface {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PresentationSurface for WatchSurface {
    async fn render(&self, snapshot: Arc<SessionSnapshot>) -> anyhow::Result<()> {
        tracing::debug!(
            "Publishing revision {} to {} subscribers",
            snapshot.revision,
            self.tx.receiver_count()
        );
        self.tx.send_replace(Some(snapshot));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::series_generator::SeriesGenerator;
    use crate::infrastructure::config::GeneratorConfig;
    use chrono::{NaiveDate, Utc};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[tokio::test]
    async fn test_render_replaces_latest_and_notifies() {
        let surface = WatchSurface::new();
        let mut rx = surface.subscribe();
        assert!(surface.latest().is_none());

        let generator = SeriesGenerator::new(GeneratorConfig::default());
        let session = generator.build_session(
            NaiveDate::from_ymd_opt(2015, 1, 1).unwrap(),
            &mut StdRng::seed_from_u64(41),
        );

        surface.render(Arc::new(session.snapshot(1, Utc::now()))).await.unwrap();
        surface.render(Arc::new(session.snapshot(2, Utc::now()))).await.unwrap();

        assert!(rx.has_changed().unwrap());
        let latest = rx.borrow_and_update().clone().unwrap();
        assert_eq!(latest.revision, 2);
        assert_eq!(surface.latest().map(|s| s.revision), Some(2));
    }
}
