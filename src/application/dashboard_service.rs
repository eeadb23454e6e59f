// Dashboard service - Use case for turning a snapshot into a dashboard view
use crate::domain::chart::{
    CategoryValue, ChartData, ChartKind, MetricTile, SeriesData, TimeSeriesPoint,
};
use crate::domain::controls::DashboardControls;
use crate::domain::dashboard::{DashboardView, Section};
use crate::domain::series::{Observation, Series, date_to_millis};
use crate::domain::session::SessionSnapshot;
use chrono::{Months, NaiveDate};

const PROJECTION_MONTHS: u32 = 12;

#[derive(Debug, Clone)]
pub struct DashboardService {
    title: String,
    base_growth_pct: f64,
}

impl DashboardService {
    pub fn new(title: String, base_growth_pct: f64) -> Self {
        Self {
            title,
            base_growth_pct,
        }
    }

    pub fn build_view(&self, snapshot: &SessionSnapshot, controls: &DashboardControls) -> DashboardView {
        let mut view = DashboardView::new(self.title.clone(), snapshot.revision, snapshot.taken_at);
        view.metrics = self.headline_metrics(snapshot);

        view.push_section(Section::Economy, self.economy_charts(snapshot, controls));
        view.push_section(Section::Sectors, self.sector_charts(snapshot, controls));
        view.push_section(Section::Tourism, self.tourism_charts(snapshot, controls));
        view.push_section(Section::Agriculture, self.agriculture_charts(snapshot, controls));
        view.push_section(Section::Energy, self.energy_charts(snapshot, controls));
        view.push_section(Section::Regions, self.regional_charts(snapshot));
        if controls.show_projections {
            view.push_section(Section::Projections, self.projection_charts(snapshot));
        }

        view
    }

    pub fn headline_metrics(&self, snapshot: &SessionSnapshot) -> Vec<MetricTile> {
        let mut tiles = Vec::new();

        if let Some(last) = snapshot.macro_series.last() {
            let previous = snapshot.macro_series.last_two().map(|(p, _)| p);
            tiles.push(
                MetricTile::new("gdp_growth", "Croissance du PIB", "%", last.gdp_growth, 1)
                    .with_delta(previous.map(|p| last.gdp_growth - p.gdp_growth), "vs mois précédent"),
            );
            tiles.push(
                MetricTile::new("unemployment", "Taux de Chômage", "%", last.unemployment_rate, 1)
                    .with_delta(
                        previous.map(|p| last.unemployment_rate - p.unemployment_rate),
                        "vs mois précédent",
                    )
                    .inverse(),
            );
        }

        if let Some(last) = snapshot.tourism.last() {
            let delta = snapshot
                .tourism
                .last_two()
                .map(|(p, l)| l.arrivals - p.arrivals);
            tiles.push(
                MetricTile::new("tourist_arrivals", "Arrivées Touristiques Mensuelles", "", last.arrivals, 0)
                    .with_delta(delta, "vs mois précédent"),
            );
        }

        if let Some(last) = snapshot.demographics.last() {
            let delta = snapshot
                .demographics
                .last_two()
                .map(|(p, l)| l.population - p.population);
            tiles.push(
                MetricTile::new("population", "Population", "habitants", last.population, 0)
                    .with_delta(delta, "vs année précédente"),
            );
        }

        tiles
    }

    fn economy_charts(&self, snapshot: &SessionSnapshot, controls: &DashboardControls) -> Vec<ChartData> {
        let economy = &snapshot.macro_series;
        let mut charts = vec![
            ChartData::time_series("gdp_growth", "Évolution de la Croissance du PIB (%)", Some("%"), ChartKind::Line)
                .with_baseline(0.0)
                .with_fraction_digits(1)
                .with_series(SeriesData::new(
                    "gdp_growth",
                    "Croissance du PIB",
                    Some("#0055A4"),
                    points(economy, controls, |o| o.gdp_growth),
                )),
            ChartData::time_series("inflation_unemployment", "Inflation et Taux de Chômage", Some("%"), ChartKind::MultiLine)
                .with_fraction_digits(1)
                .with_series(SeriesData::new(
                    "inflation",
                    "Inflation",
                    Some("#EF4135"),
                    points(economy, controls, |o| o.inflation),
                ))
                .with_series(SeriesData::new(
                    "unemployment",
                    "Chômage",
                    Some("#0055A4"),
                    points(economy, controls, |o| o.unemployment_rate),
                )),
            ChartData::time_series(
                "external_trade",
                "Évolution des Exportations et Importations (Milliards EUR)",
                Some("Md€"),
                ChartKind::MultiLine,
            )
            .with_fraction_digits(2)
            .with_series(SeriesData::new(
                "exports",
                "Exportations",
                Some("#28a745"),
                points(economy, controls, |o| o.exports),
            ))
            .with_series(SeriesData::new(
                "imports",
                "Importations",
                Some("#EF4135"),
                points(economy, controls, |o| o.imports),
            )),
            ChartData::time_series("trade_balance", "Balance Commerciale (Milliards EUR)", Some("Md€"), ChartKind::Area)
                .with_baseline(0.0)
                .with_fraction_digits(2)
                .with_series(SeriesData::new(
                    "trade_balance",
                    "Balance commerciale",
                    Some("#EF4135"),
                    points(economy, controls, |o| o.trade_balance),
                )),
            ChartData::time_series("population", "Évolution de la Population", None, ChartKind::Line).with_series(
                SeriesData::new(
                    "population",
                    "Population",
                    Some("#0055A4"),
                    points(&snapshot.demographics, controls, |o| o.population),
                ),
            ),
        ];

        if let Some(latest) = snapshot.demographics.last() {
            charts.push(
                ChartData::categorical("age_structure", "Structure de la Population par Âge (%)", Some("%"), ChartKind::Pie)
                    .with_categories(vec![
                        CategoryValue::new("0-25 ans", latest.young_share, Some("#0055A4")),
                        CategoryValue::new("25-65 ans", latest.working_age_share(), Some("#EF4135")),
                        CategoryValue::new("65+ ans", latest.senior_share, Some("#FFD100")),
                    ]),
            );
        }

        charts
    }

    fn sector_charts(&self, snapshot: &SessionSnapshot, controls: &DashboardControls) -> Vec<ChartData> {
        let catalog = &snapshot.catalog;
        let selected: Vec<_> = catalog.select(&controls.sectors).collect();
        let shares = catalog.employment_shares();

        let gdp_share = selected
            .iter()
            .map(|s| CategoryValue::new(s.name, s.gdp_share, Some(s.color)))
            .collect();
        let growth = selected
            .iter()
            .map(|s| CategoryValue::new(s.name, s.growth_rate, Some(s.color)))
            .collect();
        let employment = selected
            .iter()
            .map(|s| CategoryValue::new(s.name, f64::from(s.employment), Some(s.color)))
            .collect();
        let employment_share = selected
            .iter()
            .filter_map(|s| {
                shares
                    .iter()
                    .find(|share| share.sector_id == s.id)
                    .map(|share| CategoryValue::new(s.name, share.share_pct, Some(s.color)))
            })
            .collect();

        vec![
            ChartData::categorical("sector_gdp_share", "Répartition du PIB par Secteur (%)", Some("%"), ChartKind::Pie)
                .with_categories(gdp_share),
            ChartData::categorical("sector_growth", "Taux de Croissance par Secteur (%)", Some("%"), ChartKind::Bar)
                .with_baseline(0.0)
                .with_categories(growth),
            ChartData::categorical("sector_employment", "Nombre d'Emplois par Secteur", None, ChartKind::Bar)
                .with_categories(employment),
            ChartData::categorical(
                "sector_employment_share",
                "Répartition de l'Emploi par Secteur (%)",
                Some("%"),
                ChartKind::Pie,
            )
            .with_fraction_digits(1)
            .with_categories(employment_share),
        ]
    }

    fn tourism_charts(&self, snapshot: &SessionSnapshot, controls: &DashboardControls) -> Vec<ChartData> {
        let tourism = &snapshot.tourism;
        let markets = snapshot
            .reference
            .source_markets
            .iter()
            .map(|m| CategoryValue::new(m.name, m.share_pct, None))
            .collect();

        vec![
            ChartData::time_series("tourist_arrivals", "Évolution des Arrivées Touristiques Mensuelles", None, ChartKind::Line)
                .with_series(SeriesData::new(
                    "arrivals",
                    "Arrivées",
                    Some("#EF4135"),
                    points(tourism, controls, |o| o.arrivals),
                )),
            ChartData::time_series("tourism_receipts", "Évolution des Recettes Touristiques (Millions EUR)", Some("M€"), ChartKind::Line)
                .with_fraction_digits(1)
                .with_series(SeriesData::new(
                    "receipts",
                    "Recettes",
                    Some("#0055A4"),
                    points(tourism, controls, |o| o.receipts / 1_000_000.0),
                )),
            ChartData::time_series("hotel_occupancy", "Taux d'Occupation Hôtelière", Some("%"), ChartKind::Line)
                .with_bounds(Some(0.0), Some(100.0))
                .with_fraction_digits(0)
                .with_series(SeriesData::new(
                    "occupancy",
                    "Occupation",
                    Some("#28a745"),
                    points(tourism, controls, |o| o.hotel_occupancy * 100.0),
                )),
            ChartData::categorical("source_markets", "Répartition des Marchés Émetteurs (%)", Some("%"), ChartKind::Pie)
                .with_categories(markets),
        ]
    }

    fn agriculture_charts(&self, snapshot: &SessionSnapshot, controls: &DashboardControls) -> Vec<ChartData> {
        let agriculture = &snapshot.agriculture;

        vec![
            ChartData::time_series("crop_production", "Production Agricole (tonnes)", Some("t"), ChartKind::MultiLine)
                .with_series(SeriesData::new(
                    "sugarcane",
                    "Canne à sucre",
                    Some("#28a745"),
                    points(agriculture, controls, |o| o.sugarcane_tonnes),
                ))
                .with_series(SeriesData::new(
                    "fruit",
                    "Fruits tropicaux",
                    Some("#FF6B00"),
                    points(agriculture, controls, |o| o.fruit_tonnes),
                )),
            ChartData::time_series("sugar_price", "Prix du Sucre (EUR/tonne)", Some("€/t"), ChartKind::Line)
                .with_series(SeriesData::new(
                    "sugar_price",
                    "Prix du sucre",
                    Some("#8B4513"),
                    points(agriculture, controls, |o| o.sugar_price_per_tonne),
                )),
        ]
    }

    fn energy_charts(&self, snapshot: &SessionSnapshot, controls: &DashboardControls) -> Vec<ChartData> {
        let energy = &snapshot.energy;
        let mut charts = vec![
            ChartData::time_series(
                "renewable_share",
                "Évolution de la Part des Énergies Renouvelables (%)",
                Some("%"),
                ChartKind::Line,
            )
            .with_bounds(Some(0.0), Some(100.0))
            .with_series(SeriesData::new(
                "renewable_share",
                "Part renouvelable",
                Some("#28a745"),
                points(energy, controls, |o| o.renewable_share * 100.0),
            )),
        ];

        if let Some(latest) = energy.last() {
            charts.push(
                ChartData::categorical("production_mix", "Mix de Production Électrique", Some("MWh"), ChartKind::Pie)
                    .with_categories(vec![
                        CategoryValue::new("Solaire", latest.solar_mwh, Some("#FFD100")),
                        CategoryValue::new("Éolien", latest.wind_mwh, Some("#00A3E0")),
                        CategoryValue::new("Biomasse", latest.biomass_mwh, Some("#28a745")),
                        CategoryValue::new("Hydraulique", latest.hydro_mwh, Some("#0055A4")),
                        CategoryValue::new("Fossile", latest.fossil_mwh(), Some("#6c757d")),
                    ]),
            );
        }

        charts
    }

    fn regional_charts(&self, snapshot: &SessionSnapshot) -> Vec<ChartData> {
        let gdp = snapshot
            .regions
            .iter()
            .map(|r| CategoryValue::new(r.name, r.gdp, None))
            .collect();
        let unemployment = snapshot
            .regions
            .iter()
            .map(|r| CategoryValue::new(r.name, r.unemployment_rate, None))
            .collect();

        vec![
            ChartData::categorical("regional_gdp", "PIB par Micro-région (Milliards EUR)", Some("Md€"), ChartKind::Bar)
                .with_categories(gdp),
            ChartData::categorical("regional_unemployment", "Taux de Chômage par Micro-région (%)", Some("%"), ChartKind::Bar)
                .with_categories(unemployment),
        ]
    }

    fn projection_charts(&self, snapshot: &SessionSnapshot) -> Vec<ChartData> {
        let mut charts = Vec::new();

        if let Some(last) = snapshot.macro_series.last() {
            let projected = project_gdp(last.date, last.gdp_monthly, self.base_growth_pct, PROJECTION_MONTHS);
            charts.push(
                ChartData::time_series("gdp_projection", "Projection du PIB Mensuel (Milliards EUR)", Some("Md€"), ChartKind::Line)
                    .with_fraction_digits(2)
                    .with_series(SeriesData::new("gdp_projection", "Projection", Some("#0055A4"), projected)),
            );
        }

        let targets = snapshot.reference.transition_targets;
        let target_points = |value: fn(&crate::domain::reference::TransitionTarget) -> f64| {
            targets
                .iter()
                .filter_map(|t| {
                    NaiveDate::from_ymd_opt(t.year, 1, 1)
                        .map(|d| TimeSeriesPoint::new(date_to_millis(d), value(t)))
                })
                .collect::<Vec<_>>()
        };
        charts.push(
            ChartData::time_series("transition_targets", "Objectifs de Transition Énergétique (%)", Some("%"), ChartKind::MultiLine)
                .with_series(SeriesData::new(
                    "renewable_share",
                    "Part ENR",
                    Some("#28a745"),
                    target_points(|t| t.renewable_share_pct),
                ))
                .with_series(SeriesData::new(
                    "energy_autonomy",
                    "Autonomie énergétique",
                    Some("#0055A4"),
                    target_points(|t| t.energy_autonomy_pct),
                ))
                .with_series(SeriesData::new(
                    "emissions_cut",
                    "Réduction GES",
                    Some("#EF4135"),
                    target_points(|t| t.emissions_cut_pct),
                )),
        );

        charts
    }
}

fn points<T: Observation>(
    series: &Series<T>,
    controls: &DashboardControls,
    value: impl Fn(&T) -> f64,
) -> Vec<TimeSeriesPoint> {
    let (from, to) = controls.window();
    series
        .between(from, to)
        .map(|o| TimeSeriesPoint::new(date_to_millis(o.date()), value(o)))
        .collect()
}

/// Compounds `level` monthly at `growth_pct` for `months` steps after `from`.
fn project_gdp(from: NaiveDate, level: f64, growth_pct: f64, months: u32) -> Vec<TimeSeriesPoint> {
    (1..=months)
        .filter_map(|step| {
            from.checked_add_months(Months::new(step)).map(|date| {
                let value = level * (1.0 + growth_pct / 100.0).powi(step as i32);
                TimeSeriesPoint::new(date_to_millis(date), value)
            })
        })
        .collect()
}
