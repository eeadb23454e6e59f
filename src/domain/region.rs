// Micro-region domain model
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionalUnit {
    pub name: &'static str,
    pub population: u32,
    /// Regional GDP, billions EUR.
    pub gdp: f64,
    pub unemployment_rate: f64,
    pub main_activity: &'static str,
    pub growth_rate: f64,
    pub specialisations: &'static [&'static str],
}

const REGIONS: [RegionalUnit; 5] = [
    RegionalUnit {
        name: "Nord",
        population: 215_000,
        gdp: 6.2,
        unemployment_rate: 20.1,
        main_activity: "Services/Admin",
        growth_rate: 3.2,
        specialisations: &["Administration", "Services", "Enseignement supérieur", "Santé"],
    },
    RegionalUnit {
        name: "Ouest",
        population: 185_000,
        gdp: 5.1,
        unemployment_rate: 22.5,
        main_activity: "Tourisme/Commerce",
        growth_rate: 4.1,
        specialisations: &["Tourisme balnéaire", "Commerce", "Immobilier", "Services"],
    },
    RegionalUnit {
        name: "Sud",
        population: 205_000,
        gdp: 4.8,
        unemployment_rate: 24.8,
        main_activity: "Tourisme/Agriculture",
        growth_rate: 3.8,
        specialisations: &["Tourisme nature", "Agriculture", "Artisanat", "Énergie renouvelable"],
    },
    RegionalUnit {
        name: "Est",
        population: 130_000,
        gdp: 3.2,
        unemployment_rate: 26.2,
        main_activity: "Agriculture",
        growth_rate: 2.5,
        specialisations: &["Agriculture", "Pêche", "Énergie", "Industrie"],
    },
    RegionalUnit {
        name: "Cirques",
        population: 75_000,
        gdp: 1.2,
        unemployment_rate: 28.5,
        main_activity: "Agriculture",
        growth_rate: 1.8,
        specialisations: &[
            "Agriculture de montagne",
            "Tourisme rural",
            "Artisanat",
            "Produits locaux",
        ],
    },
];

#[derive(Debug, Clone, Serialize)]
pub struct RegionalTable {
    regions: Vec<RegionalUnit>,
}

impl RegionalTable {
    pub fn new() -> Self {
        Self {
            regions: REGIONS.to_vec(),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &RegionalUnit> {
        self.regions.iter()
    }

    pub fn get(&self, name: &str) -> Option<&RegionalUnit> {
        self.regions.iter().find(|r| r.name.eq_ignore_ascii_case(name))
    }

    pub fn total_population(&self) -> u64 {
        self.regions.iter().map(|r| u64::from(r.population)).sum()
    }

    pub fn total_gdp(&self) -> f64 {
        self.regions.iter().map(|r| r.gdp).sum()
    }
}

impl Default for RegionalTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_totals() {
        let table = RegionalTable::new();
        assert_eq!(table.total_population(), 810_000);
        assert!((table.total_gdp() - 20.5).abs() < 1e-9);
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let table = RegionalTable::new();
        assert_eq!(table.get("cirques").map(|r| r.population), Some(75_000));
        assert!(table.get("Mafate").is_none());
    }
}
