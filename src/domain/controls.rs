// User-driven dashboard controls
use super::sector::SectorCatalog;
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

const DEFAULT_SELECTED_SECTORS: usize = 4;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardControls {
    pub start: NaiveDate,
    /// Inclusive upper bound; `None` follows the latest observation.
    pub end: Option<NaiveDate>,
    pub sectors: Vec<String>,
    pub auto_refresh: bool,
    pub show_projections: bool,
}

impl DashboardControls {
    /// Analysis window from 2020 up to the latest row, first sectors of the catalog selected.
    pub fn initial(catalog: &SectorCatalog, today: NaiveDate) -> Self {
        let start = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap_or(today).min(today);
        Self {
            start,
            end: None,
            sectors: catalog
                .ids()
                .into_iter()
                .take(DEFAULT_SELECTED_SECTORS)
                .map(str::to_string)
                .collect(),
            auto_refresh: true,
            show_projections: true,
        }
    }

    /// Returns the controls with `update` applied, or why it was rejected.
    pub fn apply(&self, update: ControlsUpdate, catalog: &SectorCatalog) -> Result<Self, ControlsError> {
        let mut next = self.clone();
        if let Some(start) = update.start {
            next.start = start;
        }
        if let Some(end) = update.end {
            next.end = end;
        }
        if let Some(sectors) = update.sectors {
            if let Some(unknown) = sectors.iter().find(|id| !catalog.contains(id)) {
                return Err(ControlsError::UnknownSector(unknown.clone()));
            }
            next.sectors = sectors;
        }
        if let Some(auto_refresh) = update.auto_refresh {
            next.auto_refresh = auto_refresh;
        }
        if let Some(show_projections) = update.show_projections {
            next.show_projections = show_projections;
        }

        if let Some(end) = next.end.filter(|end| next.start > *end) {
            return Err(ControlsError::InvalidDateRange {
                start: next.start,
                end,
            });
        }
        Ok(next)
    }

    /// Inclusive date bounds for filtering series.
    pub fn window(&self) -> (NaiveDate, NaiveDate) {
        (self.start, self.end.unwrap_or(NaiveDate::MAX))
    }
}

/// Partial update; absent fields keep their current value.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ControlsUpdate {
    pub start: Option<NaiveDate>,
    /// Absent keeps the current end; `null` reopens it.
    #[serde(default, deserialize_with = "present")]
    pub end: Option<Option<NaiveDate>>,
    pub sectors: Option<Vec<String>>,
    pub auto_refresh: Option<bool>,
    pub show_projections: Option<bool>,
}

fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

#[derive(Debug, Error, PartialEq)]
pub enum ControlsError {
    #[error("start date {start} is after end date {end}")]
    InvalidDateRange { start: NaiveDate, end: NaiveDate },

    #[error("unknown sector: {0}")]
    UnknownSector(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_initial_controls() {
        let catalog = SectorCatalog::new();
        let controls = DashboardControls::initial(&catalog, ymd(2026, 10, 17));
        assert_eq!(controls.start, ymd(2020, 1, 1));
        assert_eq!(controls.end, None);
        assert_eq!(controls.window(), (ymd(2020, 1, 1), NaiveDate::MAX));
        assert_eq!(controls.sectors, vec!["tourism", "agriculture", "construction", "retail"]);
        assert!(controls.auto_refresh);
        assert!(controls.show_projections);
    }

    #[test]
    fn test_partial_update_keeps_other_fields() {
        let catalog = SectorCatalog::new();
        let controls = DashboardControls::initial(&catalog, ymd(2026, 10, 17));
        let update = ControlsUpdate {
            auto_refresh: Some(false),
            ..Default::default()
        };

        let next = controls.apply(update, &catalog).unwrap();
        assert!(!next.auto_refresh);
        assert_eq!(next.sectors, controls.sectors);
        assert_eq!(next.start, controls.start);
    }

    #[test]
    fn test_open_end_accepts_any_start() {
        let catalog = SectorCatalog::new();
        let controls = DashboardControls::initial(&catalog, ymd(2026, 10, 17));
        let update = ControlsUpdate {
            start: Some(ymd(2027, 1, 1)),
            ..Default::default()
        };
        assert!(controls.apply(update, &catalog).is_ok());
    }

    #[test]
    fn test_rejects_inverted_range() {
        let catalog = SectorCatalog::new();
        let controls = DashboardControls::initial(&catalog, ymd(2026, 10, 17));
        let update = ControlsUpdate {
            start: Some(ymd(2027, 1, 1)),
            end: Some(Some(ymd(2026, 10, 17))),
            ..Default::default()
        };

        assert_eq!(
            controls.apply(update, &catalog),
            Err(ControlsError::InvalidDateRange {
                start: ymd(2027, 1, 1),
                end: ymd(2026, 10, 17)
            })
        );
    }

    #[test]
    fn test_rejects_unknown_sector() {
        let catalog = SectorCatalog::new();
        let controls = DashboardControls::initial(&catalog, ymd(2026, 10, 17));
        let update = ControlsUpdate {
            sectors: Some(vec!["energy".into(), "mining".into()]),
            ..Default::default()
        };

        assert_eq!(
            controls.apply(update, &catalog),
            Err(ControlsError::UnknownSector("mining".into()))
        );
    }

    #[test]
    fn test_update_deserializes_from_camel_case() {
        let update: ControlsUpdate =
            serde_json::from_str(r#"{"showProjections": false, "start": "2022-01-01"}"#).unwrap();
        assert_eq!(update.show_projections, Some(false));
        assert_eq!(update.start, Some(ymd(2022, 1, 1)));
        assert!(update.sectors.is_none());
        assert!(update.end.is_none());
    }

    #[test]
    fn test_null_end_reopens_window() {
        let catalog = SectorCatalog::new();
        let closed: ControlsUpdate = serde_json::from_str(r#"{"end": "2024-12-31"}"#).unwrap();
        let reopen: ControlsUpdate = serde_json::from_str(r#"{"end": null}"#).unwrap();
        assert_eq!(reopen.end, Some(None));

        let controls = DashboardControls::initial(&catalog, ymd(2026, 10, 17))
            .apply(closed, &catalog)
            .unwrap();
        assert_eq!(controls.end, Some(ymd(2024, 12, 31)));
        let controls = controls.apply(reopen, &catalog).unwrap();
        assert_eq!(controls.end, None);
    }
}
