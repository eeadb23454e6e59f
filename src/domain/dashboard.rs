// Dashboard view domain model
use super::chart::{ChartData, MetricTile};
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Section {
    Economy,
    Sectors,
    Tourism,
    Agriculture,
    Energy,
    Regions,
    Projections,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionCharts {
    pub section: Section,
    pub charts: Vec<ChartData>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView {
    pub title: String,
    pub revision: u64,
    pub rendered_at: DateTime<Utc>,
    pub metrics: Vec<MetricTile>,
    pub sections: Vec<SectionCharts>,
}

impl DashboardView {
    pub fn new(title: String, revision: u64, rendered_at: DateTime<Utc>) -> Self {
        Self {
            title,
            revision,
            rendered_at,
            metrics: Vec::new(),
            sections: Vec::new(),
        }
    }

    /// Adds a section, dropping charts with nothing to draw.
    pub fn push_section(&mut self, section: Section, charts: Vec<ChartData>) {
        let charts: Vec<ChartData> = charts.into_iter().filter(|c| !c.is_empty()).collect();
        if !charts.is_empty() {
            self.sections.push(SectionCharts { section, charts });
        }
    }

    pub fn charts(&self) -> impl Iterator<Item = &ChartData> {
        self.sections.iter().flat_map(|s| s.charts.iter())
    }

    #[cfg(test)]
    pub fn chart(&self, id: &str) -> Option<&ChartData> {
        self.charts().find(|c| c.id == id)
    }

    pub fn widget_count(&self) -> usize {
        self.metrics.len() + self.charts().count()
    }
}
