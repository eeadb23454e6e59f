// Streaming dashboard service - Progressive loading, re-sent on every render
use crate::application::dashboard_service::DashboardService;
use crate::domain::controls::DashboardControls;
use crate::domain::session::SessionSnapshot;
use crate::domain::stream::{CompletionEvent, DashboardSkeleton, StreamMessage};
use crate::infrastructure::watch_surface::SnapshotReceiver;
use futures::StreamExt;
use std::time::Instant;
use tokio::sync::{mpsc, watch};
use tokio_stream::wrappers::WatchStream;

const STREAM_BUFFER: usize = 100;

#[derive(Clone)]
pub struct StreamingDashboardService {
    dashboard: DashboardService,
    snapshots: SnapshotReceiver,
    controls: watch::Receiver<DashboardControls>,
    stopped: watch::Receiver<bool>,
}

impl StreamingDashboardService {
    pub fn new(
        dashboard: DashboardService,
        snapshots: SnapshotReceiver,
        controls: watch::Receiver<DashboardControls>,
        stopped: watch::Receiver<bool>,
    ) -> Self {
        Self {
            dashboard,
            snapshots,
            controls,
            stopped,
        }
    }

    /// Sends the current view right away, then again after every render,
    /// until the client goes away or the session stops.
    pub fn stream_dashboard(&self) -> mpsc::Receiver<StreamMessage> {
        let (tx, rx) = mpsc::channel(STREAM_BUFFER);
        let dashboard = self.dashboard.clone();
        let controls = self.controls.clone();
        let mut stopped = self.stopped.clone();
        let mut snapshots = WatchStream::new(self.snapshots.clone());

        tokio::spawn(async move {
            loop {
                tokio::select! {
                    // The watch::Ref from wait_for must not outlive this branch
                    _ = async { let _ = stopped.wait_for(|s| *s).await; } => break,
                    _ = tx.closed() => break,
                    next = snapshots.next() => match next {
                        Some(Some(snapshot)) => {
                            let controls = controls.borrow().clone();
                            if send_view(&tx, &dashboard, &snapshot, &controls).await.is_err() {
                                break;
                            }
                        }
                        // Nothing rendered yet
                        Some(None) => continue,
                        None => break,
                    },
                }
            }
            tracing::debug!("Dashboard stream closed");
        });

        rx
    }
}

async fn send_view(
    tx: &mpsc::Sender<StreamMessage>,
    dashboard: &DashboardService,
    snapshot: &SessionSnapshot,
    controls: &DashboardControls,
) -> Result<(), mpsc::error::SendError<StreamMessage>> {
    let start_time = Instant::now();
    let view = dashboard.build_view(snapshot, controls);
    let revision = view.revision;
    let total_widgets = view.widget_count();

    // 1. Skeleton first so the client can lay out placeholders
    tx.send(StreamMessage::Skeleton(DashboardSkeleton::from_view(&view)))
        .await?;

    // 2. Headline metrics
    tx.send(StreamMessage::Metrics {
        revision,
        metrics: view.metrics,
    })
    .await?;

    // 3. One message per chart
    for section in view.sections {
        for chart in section.charts {
            tx.send(StreamMessage::ChartUpdate { revision, chart }).await?;
        }
    }

    // 4. Completion
    let duration_ms = start_time.elapsed().as_millis() as u64;
    tx.send(StreamMessage::Complete(CompletionEvent {
        revision,
        total_widgets,
        duration_ms,
    }))
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::presentation_surface::PresentationSurface;
    use crate::application::series_generator::SeriesGenerator;
    use crate::infrastructure::config::GeneratorConfig;
    use crate::infrastructure::watch_surface::WatchSurface;
    use chrono::{NaiveDate, Utc};
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::sync::Arc;

    async fn next_revision(rx: &mut mpsc::Receiver<StreamMessage>) -> Vec<StreamMessage> {
        let mut messages = Vec::new();
        while let Some(msg) = rx.recv().await {
            let done = matches!(msg, StreamMessage::Complete(_));
            messages.push(msg);
            if done {
                break;
            }
        }
        messages
    }

    #[tokio::test]
    async fn test_stream_sends_skeleton_metrics_charts_then_complete() {
        let today = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        let generator = SeriesGenerator::new(GeneratorConfig::default());
        let session = generator.build_session(today, &mut StdRng::seed_from_u64(51));
        let controls = DashboardControls::initial(&session.catalog, today);
        let (_controls_tx, controls_rx) = watch::channel(controls);
        let (stop_tx, stop_rx) = watch::channel(false);

        let surface = WatchSurface::new();
        let service = StreamingDashboardService::new(
            DashboardService::new("Dashboard".to_string(), 2.8),
            surface.subscribe(),
            controls_rx,
            stop_rx,
        );

        let mut rx = service.stream_dashboard();
        surface
            .render(Arc::new(session.snapshot(1, Utc::now())))
            .await
            .unwrap();

        let messages = next_revision(&mut rx).await;
        let StreamMessage::Skeleton(skeleton) = &messages[0] else {
            panic!("expected skeleton first, got {:?}", messages[0]);
        };
        assert!(matches!(&messages[1], StreamMessage::Metrics { metrics, .. } if metrics.len() == 4));

        let charts = messages
            .iter()
            .filter(|m| matches!(m, StreamMessage::ChartUpdate { .. }))
            .count();
        assert_eq!(charts, skeleton.charts.len());

        let Some(StreamMessage::Complete(done)) = messages.last() else {
            panic!("expected completion last");
        };
        assert_eq!(done.revision, 1);
        assert_eq!(done.total_widgets, 4 + charts);

        surface
            .render(Arc::new(session.snapshot(2, Utc::now())))
            .await
            .unwrap();
        let messages = next_revision(&mut rx).await;
        assert!(matches!(&messages[0], StreamMessage::Skeleton(s) if s.revision == 2));

        stop_tx.send_replace(true);
        assert!(rx.recv().await.is_none());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_stop_before_first_render_closes_stream() {
        let today = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        let session = SeriesGenerator::new(GeneratorConfig::default())
            .build_session(today, &mut StdRng::seed_from_u64(52));
        let (_controls_tx, controls_rx) =
            watch::channel(DashboardControls::initial(&session.catalog, today));
        let (stop_tx, stop_rx) = watch::channel(false);

        let surface = WatchSurface::new();
        let service = StreamingDashboardService::new(
            DashboardService::new("Dashboard".to_string(), 2.8),
            surface.subscribe(),
            controls_rx,
            stop_rx,
        );

        let mut rx = service.stream_dashboard();
        stop_tx.send_replace(true);
        assert!(rx.recv().await.is_none());
    }

    #[test]
    fn test_message_tagging() {
        let msg = StreamMessage::Complete(CompletionEvent {
            revision: 3,
            total_widgets: 10,
            duration_ms: 2,
        });
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["type"], "complete");
        assert_eq!(json["totalWidgets"], 10);
    }
}
