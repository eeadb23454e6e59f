// Observation rows for the five economic domains
use super::series::{Cadence, HasCadence, Observation};
use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct MacroObservation {
    pub date: NaiveDate,
    /// Monthly GDP level, billions EUR.
    pub gdp_monthly: f64,
    pub gdp_growth: f64,
    pub inflation: f64,
    pub unemployment_rate: f64,
    pub median_income: f64,
    pub exports: f64,
    pub imports: f64,
    pub trade_balance: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct TourismObservation {
    pub date: NaiveDate,
    pub arrivals: f64,
    pub receipts: f64,
    pub average_stay_days: f64,
    pub hotel_occupancy: f64,
    pub main_market: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct AgricultureObservation {
    pub date: NaiveDate,
    pub sugarcane_tonnes: f64,
    pub fruit_tonnes: f64,
    pub meat_tonnes: f64,
    pub sugar_price_per_tonne: f64,
    pub agri_exports: f64,
    pub main_product: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct EnergyObservation {
    pub date: NaiveDate,
    pub total_production_mwh: f64,
    pub renewable_share: f64,
    pub solar_mwh: f64,
    pub wind_mwh: f64,
    pub biomass_mwh: f64,
    pub hydro_mwh: f64,
    pub energy_imports: f64,
}

impl EnergyObservation {
    pub fn renewable_mwh(&self) -> f64 {
        self.solar_mwh + self.wind_mwh + self.biomass_mwh + self.hydro_mwh
    }

    /// Production not covered by the renewable sources.
    pub fn fossil_mwh(&self) -> f64 {
        (self.total_production_mwh - self.renewable_mwh()).max(0.0)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DemographicObservation {
    pub date: NaiveDate,
    pub population: f64,
    pub birth_rate: f64,
    pub death_rate: f64,
    pub net_migration: f64,
    pub density: f64,
    /// Share of population under 25, percent.
    pub young_share: f64,
    /// Share of population over 65, percent.
    pub senior_share: f64,
}

impl DemographicObservation {
    pub fn working_age_share(&self) -> f64 {
        100.0 - self.young_share - self.senior_share
    }
}

macro_rules! observation {
    ($ty:ty, $cadence:expr) => {
        impl Observation for $ty {
            fn date(&self) -> NaiveDate {
                self.date
            }
        }

        impl HasCadence for $ty {
            const CADENCE: Cadence = $cadence;
        }
    };
}

observation!(MacroObservation, Cadence::Monthly);
observation!(TourismObservation, Cadence::Monthly);
observation!(AgricultureObservation, Cadence::Monthly);
observation!(EnergyObservation, Cadence::Monthly);
observation!(DemographicObservation, Cadence::Yearly);
