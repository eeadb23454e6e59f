// Series generator - Synthetic history for the five domains
use crate::domain::observations::{
    AgricultureObservation, DemographicObservation, EnergyObservation, MacroObservation,
    TourismObservation,
};
use crate::domain::reference::ReferenceTables;
use crate::domain::region::RegionalTable;
use crate::domain::sector::{CompanyProfile, SectorCatalog};
use crate::domain::series::{Cadence, Series};
use crate::domain::session::Session;
use crate::infrastructure::config::GeneratorConfig;
use chrono::{Datelike, NaiveDate};
use rand::Rng;
use rand::seq::SliceRandom;
use std::sync::Arc;

/// Pure function of (window end, config, random source). Every draw is
/// independent; only the seasonal and year-band tables shape the output.
#[derive(Debug, Clone)]
pub struct SeriesGenerator {
    config: GeneratorConfig,
}

impl SeriesGenerator {
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Builds a fresh session with every series covering `[start, now)`.
    pub fn build_session<R: Rng + ?Sized>(&self, now: NaiveDate, rng: &mut R) -> Session {
        let catalog = Arc::new(SectorCatalog::new());
        let session = Session {
            catalog: catalog.clone(),
            regions: Arc::new(RegionalTable::new()),
            reference: ReferenceTables::new(),
            macro_series: self.macro_series(now, rng),
            tourism: self.tourism_series(now, rng),
            agriculture: self.agriculture_series(now, rng),
            energy: self.energy_series(now, rng),
            demographics: self.demographic_series(now, rng),
            companies: self.company_profiles(&catalog, rng),
        };

        tracing::info!(
            "Generated session: {} macro, {} tourism, {} agriculture, {} energy, {} demographic rows",
            session.macro_series.len(),
            session.tourism.len(),
            session.agriculture.len(),
            session.energy.len(),
            session.demographics.len()
        );
        if session.macro_series.is_empty() {
            tracing::warn!(
                "Start date {} is not before {}; series start empty",
                self.config.start_date(),
                now
            );
        }

        session
    }

    pub fn macro_series<R: Rng + ?Sized>(&self, now: NaiveDate, rng: &mut R) -> Series<MacroObservation> {
        let cfg = &self.config.macro_economy;
        let start = self.config.start_date();

        self.dates(Cadence::Monthly, now)
            .into_iter()
            .map(|date| {
                let months = months_between(start, date);
                let gdp = cfg.base_gdp * (1.0 + cfg.base_growth_pct / 100.0).powi(months);
                let shock = cfg.shock_range(date.year()).sample(rng);
                let growth = cfg.base_growth_pct + shock * 100.0;
                self.macro_observation(date, gdp, growth, rng)
            })
            .collect()
    }

    /// Macro row with the given level and growth; remaining fields drawn from their ranges.
    pub fn macro_observation<R: Rng + ?Sized>(
        &self,
        date: NaiveDate,
        gdp_monthly: f64,
        gdp_growth: f64,
        rng: &mut R,
    ) -> MacroObservation {
        let cfg = &self.config.macro_economy;
        MacroObservation {
            date,
            gdp_monthly,
            gdp_growth,
            inflation: cfg.inflation.sample(rng),
            unemployment_rate: cfg.unemployment.sample(rng),
            median_income: cfg.median_income.sample(rng),
            exports: cfg.exports.sample(rng),
            imports: cfg.imports.sample(rng),
            trade_balance: cfg.trade_balance.sample(rng),
        }
    }

    pub fn tourism_series<R: Rng + ?Sized>(&self, now: NaiveDate, rng: &mut R) -> Series<TourismObservation> {
        let cfg = &self.config.tourism;

        self.dates(Cadence::Monthly, now)
            .into_iter()
            .map(|date| {
                let base = cfg.seasonal_base(date.month());
                let factor = cfg.recovery_range(date.year(), date.month()).sample(rng);
                let arrivals = base * factor;
                TourismObservation {
                    date,
                    arrivals,
                    receipts: arrivals * cfg.spend_per_visitor.sample(rng),
                    average_stay_days: cfg.stay_days.sample(rng),
                    hotel_occupancy: (cfg.occupancy.sample(rng) * factor).clamp(0.0, 1.0),
                    main_market: cfg.markets.choose(rng).cloned().unwrap_or_default(),
                }
            })
            .collect()
    }

    pub fn agriculture_series<R: Rng + ?Sized>(
        &self,
        now: NaiveDate,
        rng: &mut R,
    ) -> Series<AgricultureObservation> {
        let cfg = &self.config.agriculture;

        self.dates(Cadence::Monthly, now)
            .into_iter()
            .map(|date| {
                let factor = cfg.season_factor(date.month());
                AgricultureObservation {
                    date,
                    sugarcane_tonnes: cfg.sugarcane_tonnes.sample(rng) * factor,
                    fruit_tonnes: cfg.fruit_tonnes.sample(rng) * factor,
                    meat_tonnes: cfg.meat_tonnes.sample(rng),
                    sugar_price_per_tonne: cfg.sugar_price.sample(rng),
                    agri_exports: cfg.exports.sample(rng),
                    main_product: cfg.products.choose(rng).cloned().unwrap_or_default(),
                }
            })
            .collect()
    }

    pub fn energy_series<R: Rng + ?Sized>(&self, now: NaiveDate, rng: &mut R) -> Series<EnergyObservation> {
        let cfg = &self.config.energy;

        self.dates(Cadence::Monthly, now)
            .into_iter()
            .map(|date| EnergyObservation {
                date,
                total_production_mwh: cfg.total_mwh.sample(rng),
                renewable_share: cfg.renewable_share_range(date.year()).sample(rng),
                solar_mwh: cfg.solar_mwh.sample(rng),
                wind_mwh: cfg.wind_mwh.sample(rng),
                biomass_mwh: cfg.biomass_mwh.sample(rng),
                hydro_mwh: cfg.hydro_mwh.sample(rng),
                energy_imports: cfg.imports.sample(rng),
            })
            .collect()
    }

    pub fn demographic_series<R: Rng + ?Sized>(
        &self,
        now: NaiveDate,
        rng: &mut R,
    ) -> Series<DemographicObservation> {
        let cfg = &self.config.demographics;
        let start_year = self.config.start_date().year();

        self.dates(Cadence::Yearly, now)
            .into_iter()
            .map(|date| {
                let growth = cfg.growth_pct.sample(rng);
                let years = date.year() - start_year;
                DemographicObservation {
                    date,
                    population: cfg.base_population * (1.0 + growth / 100.0).powi(years),
                    birth_rate: cfg.birth_rate.sample(rng),
                    death_rate: cfg.death_rate.sample(rng),
                    net_migration: cfg.net_migration.sample(rng),
                    density: cfg.density.sample(rng),
                    young_share: cfg.young_share.sample(rng),
                    senior_share: cfg.senior_share.sample(rng),
                }
            })
            .collect()
    }

    /// One row per key company of every sector, in catalog order.
    pub fn company_profiles<R: Rng + ?Sized>(
        &self,
        catalog: &SectorCatalog,
        rng: &mut R,
    ) -> Vec<CompanyProfile> {
        let cfg = &self.config.companies;
        let low = cfg.employees_min.min(cfg.employees_max);
        let high = cfg.employees_min.max(cfg.employees_max);

        catalog
            .iter()
            .flat_map(|sector| sector.key_companies.iter().map(move |name| (sector.id, *name)))
            .map(|(sector_id, name)| CompanyProfile {
                name,
                sector_id,
                estimated_revenue_meur: cfg.revenue_meur.sample(rng),
                employees: rng.gen_range(low..=high),
                location: cfg.locations.choose(rng).cloned().unwrap_or_default(),
            })
            .collect()
    }

    fn dates(&self, cadence: Cadence, now: NaiveDate) -> Vec<NaiveDate> {
        cadence.timestamps(self.config.start_date(), now)
    }
}

fn months_between(start: NaiveDate, date: NaiveDate) -> i32 {
    (date.year() - start.year()) * 12 + date.month() as i32 - start.month() as i32
}
