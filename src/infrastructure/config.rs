use chrono::NaiveDate;
use rand::Rng;
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct DashboardConfig {
    pub server: ServerSettings,
    pub refresh: RefreshSettings,
    pub generator: GeneratorConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerSettings {
    pub bind_addr: String,
    pub title: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:8080".to_string(),
            title: "Dashboard Économique La Réunion".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct RefreshSettings {
    pub interval_secs: u64,
    /// Age of the last macro observation that triggers a live append.
    pub live_update_days: i64,
    /// Fixed RNG seed; fresh entropy on every run when absent.
    pub seed: Option<u64>,
}

impl RefreshSettings {
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs.max(1))
    }
}

impl Default for RefreshSettings {
    fn default() -> Self {
        Self {
            interval_secs: 30,
            live_update_days: 30,
            seed: None,
        }
    }
}

/// Closed interval that values are drawn from uniformly.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
pub struct UniformRange {
    pub min: f64,
    pub max: f64,
}

impl UniformRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        if self.max <= self.min {
            return self.min;
        }
        rng.gen_range(self.min..=self.max)
    }

    #[cfg(test)]
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl YearMonth {
    pub const fn new(year: i32, month: u32) -> Self {
        Self { year, month }
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct GeneratorConfig {
    pub start: Option<NaiveDate>,
    #[serde(rename = "macro")]
    pub macro_economy: MacroConfig,
    pub tourism: TourismConfig,
    pub agriculture: AgricultureConfig,
    pub energy: EnergyConfig,
    pub demographics: DemographicConfig,
    pub companies: CompanyConfig,
}

impl GeneratorConfig {
    pub fn start_date(&self) -> NaiveDate {
        self.start
            .or_else(|| NaiveDate::from_ymd_opt(2014, 1, 1))
            .unwrap_or_default()
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct MacroConfig {
    /// Monthly GDP at the start date, billions EUR.
    pub base_gdp: f64,
    pub base_growth_pct: f64,
    pub crisis_year: i32,
    pub crisis_shock: UniformRange,
    pub rebound_shock: UniformRange,
    pub normal_shock: UniformRange,
    pub inflation: UniformRange,
    pub unemployment: UniformRange,
    pub median_income: UniformRange,
    pub exports: UniformRange,
    pub imports: UniformRange,
    pub trade_balance: UniformRange,
    /// Max absolute change in growth between live observations.
    pub live_growth_jitter: f64,
}

impl MacroConfig {
    pub fn shock_range(&self, year: i32) -> UniformRange {
        if year == self.crisis_year {
            self.crisis_shock
        } else if year == self.crisis_year + 1 {
            self.rebound_shock
        } else {
            self.normal_shock
        }
    }
}

impl Default for MacroConfig {
    fn default() -> Self {
        Self {
            base_gdp: 20.5,
            base_growth_pct: 2.8,
            crisis_year: 2020,
            crisis_shock: UniformRange::new(-0.08, -0.03),
            rebound_shock: UniformRange::new(-0.02, 0.02),
            normal_shock: UniformRange::new(0.02, 0.06),
            inflation: UniformRange::new(1.5, 4.0),
            unemployment: UniformRange::new(18.0, 24.0),
            median_income: UniformRange::new(1800.0, 2200.0),
            exports: UniformRange::new(0.3, 0.6),
            imports: UniformRange::new(4.5, 5.5),
            trade_balance: UniformRange::new(-4.8, -4.2),
            live_growth_jitter: 0.1,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct RecoveryPhase {
    pub from: YearMonth,
    pub through: YearMonth,
    pub factor: UniformRange,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct TourismConfig {
    pub peak_months: Vec<u32>,
    pub shoulder_months: Vec<u32>,
    pub peak_visitors: f64,
    pub shoulder_visitors: f64,
    pub low_visitors: f64,
    pub recovery: Vec<RecoveryPhase>,
    pub normal_factor: UniformRange,
    pub spend_per_visitor: UniformRange,
    pub stay_days: UniformRange,
    pub occupancy: UniformRange,
    pub markets: Vec<String>,
}

impl TourismConfig {
    pub fn seasonal_base(&self, month: u32) -> f64 {
        if self.peak_months.contains(&month) {
            self.peak_visitors
        } else if self.shoulder_months.contains(&month) {
            self.shoulder_visitors
        } else {
            self.low_visitors
        }
    }

    pub fn recovery_range(&self, year: i32, month: u32) -> UniformRange {
        let at = YearMonth::new(year, month);
        self.recovery
            .iter()
            .find(|phase| phase.from <= at && at <= phase.through)
            .map(|phase| phase.factor)
            .unwrap_or(self.normal_factor)
    }
}

impl Default for TourismConfig {
    fn default() -> Self {
        Self {
            peak_months: vec![1, 7, 8, 12],
            shoulder_months: vec![2, 3, 9, 10],
            peak_visitors: 120_000.0,
            shoulder_visitors: 80_000.0,
            low_visitors: 50_000.0,
            recovery: vec![
                RecoveryPhase {
                    from: YearMonth::new(2020, 1),
                    through: YearMonth::new(2021, 6),
                    factor: UniformRange::new(0.02, 0.08),
                },
                RecoveryPhase {
                    from: YearMonth::new(2021, 7),
                    through: YearMonth::new(2021, 12),
                    factor: UniformRange::new(0.2, 0.4),
                },
                RecoveryPhase {
                    from: YearMonth::new(2022, 1),
                    through: YearMonth::new(2022, 12),
                    factor: UniformRange::new(0.6, 0.8),
                },
            ],
            normal_factor: UniformRange::new(0.9, 1.1),
            spend_per_visitor: UniformRange::new(1500.0, 2200.0),
            stay_days: UniformRange::new(10.0, 16.0),
            occupancy: UniformRange::new(0.5, 0.85),
            markets: ["France Métropolitaine", "Mayotte", "Maurice", "Afrique du Sud"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct AgricultureConfig {
    pub dry_months: Vec<u32>,
    pub dry_factor: f64,
    pub wet_months: Vec<u32>,
    pub wet_factor: f64,
    pub sugarcane_tonnes: UniformRange,
    pub fruit_tonnes: UniformRange,
    pub meat_tonnes: UniformRange,
    pub sugar_price: UniformRange,
    pub exports: UniformRange,
    pub products: Vec<String>,
}

impl AgricultureConfig {
    pub fn season_factor(&self, month: u32) -> f64 {
        if self.dry_months.contains(&month) {
            self.dry_factor
        } else if self.wet_months.contains(&month) {
            self.wet_factor
        } else {
            1.0
        }
    }
}

impl Default for AgricultureConfig {
    fn default() -> Self {
        Self {
            dry_months: vec![7, 8, 9],
            dry_factor: 0.8,
            wet_months: vec![1, 2, 3],
            wet_factor: 1.2,
            sugarcane_tonnes: UniformRange::new(1_500_000.0, 1_800_000.0),
            fruit_tonnes: UniformRange::new(50_000.0, 80_000.0),
            meat_tonnes: UniformRange::new(4_000.0, 6_000.0),
            sugar_price: UniformRange::new(400.0, 600.0),
            exports: UniformRange::new(0.1, 0.3),
            products: [
                "Canne à sucre",
                "Fruits tropicaux",
                "Viande bovine",
                "Lait",
                "Légumes",
                "Fleurs",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct EnergyEra {
    pub through_year: i32,
    pub renewable_share: UniformRange,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct EnergyConfig {
    /// Eras ordered by `through_year`; later years fall back to `latest_renewable_share`.
    pub eras: Vec<EnergyEra>,
    pub latest_renewable_share: UniformRange,
    pub total_mwh: UniformRange,
    pub solar_mwh: UniformRange,
    pub wind_mwh: UniformRange,
    pub biomass_mwh: UniformRange,
    pub hydro_mwh: UniformRange,
    pub imports: UniformRange,
}

impl EnergyConfig {
    pub fn renewable_share_range(&self, year: i32) -> UniformRange {
        self.eras
            .iter()
            .find(|era| year <= era.through_year)
            .map(|era| era.renewable_share)
            .unwrap_or(self.latest_renewable_share)
    }
}

impl Default for EnergyConfig {
    fn default() -> Self {
        Self {
            eras: vec![
                EnergyEra {
                    through_year: 2016,
                    renewable_share: UniformRange::new(0.25, 0.35),
                },
                EnergyEra {
                    through_year: 2020,
                    renewable_share: UniformRange::new(0.35, 0.45),
                },
            ],
            latest_renewable_share: UniformRange::new(0.45, 0.55),
            total_mwh: UniformRange::new(250_000.0, 350_000.0),
            solar_mwh: UniformRange::new(30_000.0, 60_000.0),
            wind_mwh: UniformRange::new(15_000.0, 30_000.0),
            biomass_mwh: UniformRange::new(40_000.0, 80_000.0),
            hydro_mwh: UniformRange::new(20_000.0, 40_000.0),
            imports: UniformRange::new(0.05, 0.15),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct DemographicConfig {
    pub base_population: f64,
    pub growth_pct: UniformRange,
    pub birth_rate: UniformRange,
    pub death_rate: UniformRange,
    pub net_migration: UniformRange,
    pub density: UniformRange,
    pub young_share: UniformRange,
    pub senior_share: UniformRange,
}

impl Default for DemographicConfig {
    fn default() -> Self {
        Self {
            base_population: 850_000.0,
            growth_pct: UniformRange::new(0.8, 1.2),
            birth_rate: UniformRange::new(12.0, 15.0),
            death_rate: UniformRange::new(5.0, 6.5),
            net_migration: UniformRange::new(2000.0, 5000.0),
            density: UniformRange::new(330.0, 360.0),
            young_share: UniformRange::new(32.0, 35.0),
            senior_share: UniformRange::new(12.0, 15.0),
        }
    }
}

/// Key-company table drawn once per session.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct CompanyConfig {
    /// Estimated revenue, millions EUR.
    pub revenue_meur: UniformRange,
    pub employees_min: u32,
    pub employees_max: u32,
    pub locations: Vec<String>,
}

impl Default for CompanyConfig {
    fn default() -> Self {
        Self {
            revenue_meur: UniformRange::new(5.0, 300.0),
            employees_min: 50,
            employees_max: 3000,
            locations: ["Saint-Denis", "Saint-Pierre", "Le Port", "Saint-Paul", "Saint-André"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

/// Built-in defaults, overridden by `config/dashboard.*` if present, then by
/// `DASHBOARD__SECTION__KEY` environment variables.
pub fn load_dashboard_config() -> anyhow::Result<DashboardConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/dashboard").required(false))
        .add_source(
            config::Environment::with_prefix("DASHBOARD")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    Ok(settings.try_deserialize()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_sample_stays_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        let range = UniformRange::new(-4.8, -4.2);
        for _ in 0..500 {
            assert!(range.contains(range.sample(&mut rng)));
        }
    }

    #[test]
    fn test_degenerate_range_returns_min() {
        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(UniformRange::new(3.0, 3.0).sample(&mut rng), 3.0);
        assert_eq!(UniformRange::new(5.0, 1.0).sample(&mut rng), 5.0);
    }

    #[test]
    fn test_shock_range_by_year() {
        let config = MacroConfig::default();
        assert_eq!(config.shock_range(2020), UniformRange::new(-0.08, -0.03));
        assert_eq!(config.shock_range(2021), UniformRange::new(-0.02, 0.02));
        assert_eq!(config.shock_range(2019), UniformRange::new(0.02, 0.06));
        assert_eq!(config.shock_range(2024), UniformRange::new(0.02, 0.06));
    }

    #[test]
    fn test_tourism_tiers() {
        let config = TourismConfig::default();
        assert_eq!(config.seasonal_base(8), 120_000.0);
        assert_eq!(config.seasonal_base(10), 80_000.0);
        assert_eq!(config.seasonal_base(5), 50_000.0);

        assert_eq!(config.recovery_range(2021, 6), UniformRange::new(0.02, 0.08));
        assert_eq!(config.recovery_range(2021, 7), UniformRange::new(0.2, 0.4));
        assert_eq!(config.recovery_range(2022, 12), UniformRange::new(0.6, 0.8));
        assert_eq!(config.recovery_range(2019, 1), UniformRange::new(0.9, 1.1));
        assert_eq!(config.recovery_range(2023, 1), UniformRange::new(0.9, 1.1));
    }

    #[test]
    fn test_season_and_era_tables() {
        let agriculture = AgricultureConfig::default();
        assert_eq!(agriculture.season_factor(8), 0.8);
        assert_eq!(agriculture.season_factor(2), 1.2);
        assert_eq!(agriculture.season_factor(5), 1.0);

        let energy = EnergyConfig::default();
        assert_eq!(energy.renewable_share_range(2016), UniformRange::new(0.25, 0.35));
        assert_eq!(energy.renewable_share_range(2018), UniformRange::new(0.35, 0.45));
        assert_eq!(energy.renewable_share_range(2025), UniformRange::new(0.45, 0.55));
    }

    #[test]
    fn test_partial_toml_overrides_keep_defaults() {
        let settings = config::Config::builder()
            .add_source(config::File::from_str(
                r#"
                [refresh]
                interval_secs = 5
                seed = 42

                [generator.macro]
                crisis_year = 2021
                "#,
                config::FileFormat::Toml,
            ))
            .build()
            .unwrap();
        let config: DashboardConfig = settings.try_deserialize().unwrap();

        assert_eq!(config.refresh.interval(), Duration::from_secs(5));
        assert_eq!(config.refresh.seed, Some(42));
        assert_eq!(config.refresh.live_update_days, 30);
        assert_eq!(config.generator.macro_economy.crisis_year, 2021);
        assert_eq!(config.generator.macro_economy.base_gdp, 20.5);
        assert_eq!(config.server.bind_addr, "0.0.0.0:8080");
        assert_eq!(
            config.generator.start_date(),
            NaiveDate::from_ymd_opt(2014, 1, 1).unwrap()
        );
    }
}
