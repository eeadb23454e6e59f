// Session state: reference tables plus the five generated series
use super::observations::{
    AgricultureObservation, DemographicObservation, EnergyObservation, MacroObservation,
    TourismObservation,
};
use super::reference::ReferenceTables;
use super::region::RegionalTable;
use super::sector::{CompanyProfile, SectorCatalog};
use super::series::Series;
use chrono::{DateTime, Utc};
use std::sync::Arc;

/// In-memory state of one dashboard run. Owned by the refresh loop.
#[derive(Debug, Clone)]
pub struct Session {
    pub catalog: Arc<SectorCatalog>,
    pub regions: Arc<RegionalTable>,
    pub reference: ReferenceTables,
    pub macro_series: Series<MacroObservation>,
    pub tourism: Series<TourismObservation>,
    pub agriculture: Series<AgricultureObservation>,
    pub energy: Series<EnergyObservation>,
    pub demographics: Series<DemographicObservation>,
    pub companies: Vec<CompanyProfile>,
}

impl Session {
    pub fn snapshot(&self, revision: u64, taken_at: DateTime<Utc>) -> SessionSnapshot {
        SessionSnapshot {
            revision,
            taken_at,
            session: self.clone(),
        }
    }
}

/// Read-only copy of the session handed to the presentation surface.
#[derive(Debug, Clone)]
pub struct SessionSnapshot {
    pub revision: u64,
    pub taken_at: DateTime<Utc>,
    pub session: Session,
}

impl std::ops::Deref for SessionSnapshot {
    type Target = Session;

    fn deref(&self) -> &Session {
        &self.session
    }
}
