// Static reference tables shown alongside the series
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnergyProject {
    pub name: &'static str,
    pub source: &'static str,
    pub capacity_mw: f64,
    pub completion_pct: u8,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TerritorialProject {
    pub name: &'static str,
    pub area: &'static str,
    /// Budget, millions EUR.
    pub budget_meur: f64,
    pub deadline_year: i32,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceMarket {
    pub name: &'static str,
    pub share_pct: f64,
    pub growth_pct: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TourismFacility {
    pub kind: &'static str,
    pub count: u32,
    pub capacity: &'static str,
    pub occupancy_pct: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransitionTarget {
    pub year: i32,
    pub renewable_share_pct: f64,
    pub energy_autonomy_pct: f64,
    pub emissions_cut_pct: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PeerTerritory {
    pub name: &'static str,
    pub gdp_per_capita: u32,
    pub growth_pct: f64,
    pub unemployment_pct: f64,
}

/// Heading with its bullet points, for the strengths and challenges panels.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Theme {
    pub title: &'static str,
    pub points: &'static [&'static str],
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StrategicAxis {
    pub rank: u8,
    pub title: &'static str,
    pub focus: &'static str,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferenceTables {
    pub energy_projects: &'static [EnergyProject],
    pub territorial_projects: &'static [TerritorialProject],
    pub source_markets: &'static [SourceMarket],
    pub tourism_facilities: &'static [TourismFacility],
    pub transition_targets: &'static [TransitionTarget],
    pub peer_territories: &'static [PeerTerritory],
    pub strengths: &'static [Theme],
    pub challenges: &'static [Theme],
    pub strategic_axes: &'static [StrategicAxis],
}

impl ReferenceTables {
    pub const fn new() -> Self {
        Self {
            energy_projects: &ENERGY_PROJECTS,
            territorial_projects: &TERRITORIAL_PROJECTS,
            source_markets: &SOURCE_MARKETS,
            tourism_facilities: &TOURISM_FACILITIES,
            transition_targets: &TRANSITION_TARGETS,
            peer_territories: &PEER_TERRITORIES,
            strengths: &STRENGTHS,
            challenges: &CHALLENGES,
            strategic_axes: &STRATEGIC_AXES,
        }
    }
}

impl Default for ReferenceTables {
    fn default() -> Self {
        Self::new()
    }
}

const ENERGY_PROJECTS: [EnergyProject; 5] = [
    EnergyProject { name: "Centrale photovoltaïque du Gol", source: "Solaire", capacity_mw: 10.0, completion_pct: 95 },
    EnergyProject { name: "Parc éolien de Sainte-Rose", source: "Éolien", capacity_mw: 12.0, completion_pct: 75 },
    EnergyProject { name: "Unité de méthanisation du Tampon", source: "Biomasse", capacity_mw: 5.0, completion_pct: 60 },
    EnergyProject { name: "Centrale biomasse de Bois Rouge", source: "Biomasse", capacity_mw: 40.0, completion_pct: 85 },
    EnergyProject { name: "Centrale hydroélectrique de Takamaka", source: "Hydraulique", capacity_mw: 7.0, completion_pct: 100 },
];

const TERRITORIAL_PROJECTS: [TerritorialProject; 5] = [
    TerritorialProject { name: "NEO Réunion", area: "Toute l'île", budget_meur: 2100.0, deadline_year: 2030 },
    TerritorialProject { name: "Tram-Train", area: "Nord-Ouest", budget_meur: 1700.0, deadline_year: 2028 },
    TerritorialProject { name: "Pôle d'excellence rural", area: "Cirques", budget_meur: 150.0, deadline_year: 2026 },
    TerritorialProject { name: "Zone industrialo-portuaire", area: "Ouest", budget_meur: 300.0, deadline_year: 2027 },
    TerritorialProject { name: "Pôle de compétitivité numérique", area: "Nord", budget_meur: 80.0, deadline_year: 2025 },
];

const SOURCE_MARKETS: [SourceMarket; 6] = [
    SourceMarket { name: "France Métropolitaine", share_pct: 65.0, growth_pct: 4.2 },
    SourceMarket { name: "Mayotte", share_pct: 12.0, growth_pct: 8.7 },
    SourceMarket { name: "Maurice", share_pct: 8.0, growth_pct: 6.1 },
    SourceMarket { name: "Afrique du Sud", share_pct: 5.0, growth_pct: 12.3 },
    SourceMarket { name: "Europe", share_pct: 7.0, growth_pct: 5.8 },
    SourceMarket { name: "Autres", share_pct: 3.0, growth_pct: 9.4 },
];

const TOURISM_FACILITIES: [TourismFacility; 5] = [
    TourismFacility { kind: "Hôtels", count: 125, capacity: "15,000 chambres", occupancy_pct: 68.0 },
    TourismFacility { kind: "Résidences de tourisme", count: 85, capacity: "3,200 appartements", occupancy_pct: 62.0 },
    TourismFacility { kind: "Gîtes et meublés", count: 1200, capacity: "8,500 lits", occupancy_pct: 58.0 },
    TourismFacility { kind: "Campings", count: 25, capacity: "1,200 emplacements", occupancy_pct: 72.0 },
    TourismFacility { kind: "Restaurants", count: 1800, capacity: "85,000 couverts", occupancy_pct: 65.0 },
];

const TRANSITION_TARGETS: [TransitionTarget; 4] = [
    TransitionTarget { year: 2020, renewable_share_pct: 35.0, energy_autonomy_pct: 25.0, emissions_cut_pct: 15.0 },
    TransitionTarget { year: 2023, renewable_share_pct: 45.0, energy_autonomy_pct: 35.0, emissions_cut_pct: 25.0 },
    TransitionTarget { year: 2025, renewable_share_pct: 60.0, energy_autonomy_pct: 50.0, emissions_cut_pct: 40.0 },
    TransitionTarget { year: 2030, renewable_share_pct: 75.0, energy_autonomy_pct: 65.0, emissions_cut_pct: 60.0 },
];

const PEER_TERRITORIES: [PeerTerritory; 4] = [
    PeerTerritory { name: "Réunion", gdp_per_capita: 23_700, growth_pct: 2.8, unemployment_pct: 21.5 },
    PeerTerritory { name: "Martinique", gdp_per_capita: 24_500, growth_pct: 1.8, unemployment_pct: 16.2 },
    PeerTerritory { name: "Guadeloupe", gdp_per_capita: 22_100, growth_pct: 2.1, unemployment_pct: 19.8 },
    PeerTerritory { name: "Guyane", gdp_per_capita: 15_300, growth_pct: 3.5, unemployment_pct: 23.1 },
];

const STRENGTHS: [Theme; 3] = [
    Theme {
        title: "Atouts naturels",
        points: &["Biodiversité exceptionnelle", "Potentiel énergétique renouvelable important", "Attractivité touristique forte"],
    },
    Theme {
        title: "Capital humain",
        points: &["Population jeune et dynamique", "Système éducatif développé", "Couverture sociale complète"],
    },
    Theme {
        title: "Infrastructures",
        points: &["Équipements publics de qualité", "Réseaux de communication modernes", "Projets structurants (NEO, Tram-Train)"],
    },
];

const CHALLENGES: [Theme; 3] = [
    Theme {
        title: "Économie",
        points: &["Taux de chômage structurellement élevé", "Déficit commercial important", "Dépendance aux transferts publics"],
    },
    Theme {
        title: "Insularité",
        points: &["Éloignement et coûts de transport", "Dépendance énergétique", "Vulnérabilité aux aléas climatiques"],
    },
    Theme {
        title: "Environnement",
        points: &["Préservation de la biodiversité", "Gestion des déchets et ressources", "Adaptation au changement climatique"],
    },
];

const STRATEGIC_AXES: [StrategicAxis; 5] = [
    StrategicAxis { rank: 1, title: "Transition écologique", focus: "Autonomie énergétique et économie verte" },
    StrategicAxis { rank: 2, title: "Innovation", focus: "Développement du numérique et des filières d'excellence" },
    StrategicAxis { rank: 3, title: "Formation", focus: "Adaptation des compétences aux besoins économiques" },
    StrategicAxis { rank: 4, title: "Connectivité", focus: "Amélioration des liaisons régionales et internationales" },
    StrategicAxis { rank: 5, title: "Cohésion sociale", focus: "Réduction des inégalités territoriales" },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_market_shares_sum_to_hundred() {
        let tables = ReferenceTables::new();
        let total: f64 = tables.source_markets.iter().map(|m| m.share_pct).sum();
        assert_eq!(total, 100.0);
    }

    #[test]
    fn test_strengths_and_challenges_are_filled() {
        let tables = ReferenceTables::new();
        for theme in tables.strengths.iter().chain(tables.challenges) {
            assert_eq!(theme.points.len(), 3, "{}", theme.title);
        }
        let ranks: Vec<u8> = tables.strategic_axes.iter().map(|a| a.rank).collect();
        assert_eq!(ranks, vec![1, 2, 3, 4, 5]);

        let json = serde_json::to_value(&tables).unwrap();
        assert_eq!(json["strategicAxes"][0]["title"], "Transition écologique");
        assert_eq!(json["challenges"][1]["points"][1], "Dépendance énergétique");
    }

    #[test]
    fn test_transition_targets_are_chronological() {
        let tables = ReferenceTables::new();
        assert!(
            tables
                .transition_targets
                .windows(2)
                .all(|w| w[0].year < w[1].year)
        );
    }
}
