// Economic sector domain model
use serde::Serialize;
use std::collections::HashMap;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Sector {
    pub id: &'static str,
    pub name: &'static str,
    pub full_name: &'static str,
    pub gdp_share: f64,
    pub growth_rate: f64,
    pub employment: u32,
    pub color: &'static str,
    pub description: &'static str,
    pub key_companies: &'static [&'static str],
    pub outlook: &'static str,
}

/// Generated profile of one of a sector's key companies.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyProfile {
    pub name: &'static str,
    pub sector_id: &'static str,
    pub estimated_revenue_meur: f64,
    pub employees: u32,
    pub location: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmploymentShare {
    pub sector_id: &'static str,
    pub employment: u32,
    pub share_pct: f64,
}

const SECTORS: [Sector; 8] = [
    Sector {
        id: "tourism",
        name: "Tourisme",
        full_name: "Tourisme et Hôtellerie",
        gdp_share: 18.7,
        growth_rate: 6.2,
        employment: 35_000,
        color: "#EF4135",
        description: "Premier secteur économique de l'île",
        key_companies: &["Accor", "Club Med", "Palm Hotel", "LUX*"],
        outlook: "Très positives avec reprise post-COVID",
    },
    Sector {
        id: "agriculture",
        name: "Agriculture",
        full_name: "Agriculture et Agroalimentaire",
        gdp_share: 12.3,
        growth_rate: 2.1,
        employment: 28_000,
        color: "#28a745",
        description: "Canne à sucre, fruits tropicaux, élevage",
        key_companies: &["Tereos", "Sucrerie de Bois Rouge", "Chambre d'Agriculture"],
        outlook: "Stable avec diversification",
    },
    Sector {
        id: "construction",
        name: "BTP",
        full_name: "Bâtiment et Travaux Publics",
        gdp_share: 15.4,
        growth_rate: 8.9,
        employment: 42_000,
        color: "#FF6B00",
        description: "Construction, infrastructures, grands chantiers",
        key_companies: &["Vinci", "Eiffage", "Bouygues", "Sogea"],
        outlook: "Très positives avec NEO",
    },
    Sector {
        id: "retail",
        name: "Commerce",
        full_name: "Commerce et Distribution",
        gdp_share: 14.2,
        growth_rate: 3.8,
        employment: 52_000,
        color: "#6f42c1",
        description: "Grande distribution, commerce de détail",
        key_companies: &["Carrefour", "Leader Price", "Jumbo", "Run Market"],
        outlook: "Stable",
    },
    Sector {
        id: "public_services",
        name: "Services Publics",
        full_name: "Services Publics et Administration",
        gdp_share: 22.1,
        growth_rate: 1.2,
        employment: 68_000,
        color: "#0055A4",
        description: "Administration, éducation, santé publique",
        key_companies: &["ARS", "Rectorat", "Conseil Départemental", "Conseil Régional"],
        outlook: "Stable",
    },
    Sector {
        id: "energy",
        name: "Énergie",
        full_name: "Énergie et Environnement",
        gdp_share: 5.8,
        growth_rate: 12.4,
        employment: 8_500,
        color: "#FFD100",
        description: "Énergies renouvelables, transition écologique",
        key_companies: &["EDF", "Albioma", "Akuo Energy", "SIDELEC"],
        outlook: "Très positives",
    },
    Sector {
        id: "digital",
        name: "Numérique",
        full_name: "Numérique et Télécoms",
        gdp_share: 4.2,
        growth_rate: 9.7,
        employment: 6_200,
        color: "#00A3E0",
        description: "Télécommunications, services numériques",
        key_companies: &["Orange", "SFR", "Zeop", "Runware"],
        outlook: "Très positives",
    },
    Sector {
        id: "industry",
        name: "Industrie",
        full_name: "Industrie et Transformation",
        gdp_share: 7.3,
        growth_rate: 4.5,
        employment: 12_500,
        color: "#8B4513",
        description: "Agroalimentaire, BTP, énergie",
        key_companies: &["Sofraca", "Bourbon", "Groupe Quartier Français"],
        outlook: "Modérément positives",
    },
];

/// Fixed set of sectors, in display order.
#[derive(Debug, Clone, Serialize)]
pub struct SectorCatalog {
    sectors: Vec<Sector>,
}

impl SectorCatalog {
    pub fn new() -> Self {
        Self {
            sectors: SECTORS.to_vec(),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Sector> {
        self.sectors.iter()
    }

    pub fn get(&self, id: &str) -> Option<&Sector> {
        self.sectors.iter().find(|s| s.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn ids(&self) -> Vec<&'static str> {
        self.sectors.iter().map(|s| s.id).collect()
    }

    /// Sectors whose id appears in `ids`, kept in catalog order.
    pub fn select<'a>(&'a self, ids: &'a [String]) -> impl Iterator<Item = &'a Sector> + 'a {
        self.sectors
            .iter()
            .filter(move |s| ids.iter().any(|id| id == s.id))
    }

    pub fn total_employment(&self) -> u64 {
        self.sectors.iter().map(|s| u64::from(s.employment)).sum()
    }

    /// Each sector's employment as a percentage of the catalog total.
    pub fn employment_shares(&self) -> Vec<EmploymentShare> {
        let total = self.total_employment() as f64;
        self.sectors
            .iter()
            .map(|s| EmploymentShare {
                sector_id: s.id,
                employment: s.employment,
                share_pct: if total > 0.0 {
                    f64::from(s.employment) / total * 100.0
                } else {
                    0.0
                },
            })
            .collect()
    }

    pub fn gdp_share_total(&self) -> f64 {
        self.sectors.iter().map(|s| s.gdp_share).sum()
    }

    pub fn colors(&self) -> HashMap<&'static str, &'static str> {
        self.sectors.iter().map(|s| (s.id, s.color)).collect()
    }
}

impl Default for SectorCatalog {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_employment_shares_sum_to_hundred() {
        let catalog = SectorCatalog::new();
        let total: f64 = catalog.employment_shares().iter().map(|s| s.share_pct).sum();
        assert!((total - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_employment_share_of_public_services() {
        let catalog = SectorCatalog::new();
        assert_eq!(catalog.total_employment(), 252_200);

        let shares = catalog.employment_shares();
        let public = shares
            .iter()
            .find(|s| s.sector_id == "public_services")
            .unwrap();
        assert!((public.share_pct - 68_000.0 / 252_200.0 * 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_select_keeps_catalog_order_and_skips_unknown() {
        let catalog = SectorCatalog::new();
        let ids = vec!["energy".to_string(), "tourism".to_string(), "mining".to_string()];
        let picked: Vec<_> = catalog.select(&ids).map(|s| s.id).collect();
        assert_eq!(picked, vec!["tourism", "energy"]);
    }

    #[test]
    fn test_lookup() {
        let catalog = SectorCatalog::new();
        assert_eq!(catalog.iter().count(), 8);
        assert_eq!(catalog.get("digital").map(|s| s.name), Some("Numérique"));
        assert!(!catalog.contains("mining"));
        assert_eq!(catalog.colors().get("energy"), Some(&"#FFD100"));
        assert!((catalog.gdp_share_total() - 100.0).abs() < 1e-9);
    }
}
