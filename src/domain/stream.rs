// Progressive dashboard stream messages
use super::chart::{ChartData, ChartKind, MetricTile};
use super::dashboard::{DashboardView, Section};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartSkeleton {
    pub id: String,
    pub title: String,
    pub kind: ChartKind,
    pub section: Section,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSkeleton {
    pub title: String,
    pub revision: u64,
    pub metric_ids: Vec<String>,
    pub charts: Vec<ChartSkeleton>,
}

impl DashboardSkeleton {
    pub fn from_view(view: &DashboardView) -> Self {
        Self {
            title: view.title.clone(),
            revision: view.revision,
            metric_ids: view.metrics.iter().map(|m| m.id.clone()).collect(),
            charts: view
                .sections
                .iter()
                .flat_map(|s| {
                    s.charts.iter().map(move |c| ChartSkeleton {
                        id: c.id.clone(),
                        title: c.title.clone(),
                        kind: c.kind,
                        section: s.section,
                    })
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionEvent {
    pub revision: u64,
    pub total_widgets: usize,
    pub duration_ms: u64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum StreamMessage {
    Skeleton(DashboardSkeleton),
    Metrics { revision: u64, metrics: Vec<MetricTile> },
    ChartUpdate { revision: u64, chart: ChartData },
    Complete(CompletionEvent),
}
