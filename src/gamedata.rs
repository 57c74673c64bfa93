use rust_embed::Embed;
use serde::Deserialize;
use thiserror::Error;

#[derive(Embed)]
#[folder = "assets/gamedata/"]
struct DataAssets;

#[derive(Debug, Error)]
pub enum DataError {
    #[error("missing embedded data set: {0}")]
    Missing(String),
    #[error("malformed data set {name}: {source}")]
    Malformed {
        name: String,
        source: serde_json::Error,
    },
}

/// Why a domain action was rejected. Overlays turn these into spoken
/// reasons.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActionDenied {
    NotEnoughGold { need: u32, have: u32 },
    NotEnoughTimber { need: u32, have: u32 },
    AlreadyBuilt,
    Gone,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Route {
    pub good: String,
    pub destination: String,
    pub income: u32,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Offer {
    pub good: String,
    pub town: String,
    pub price: u32,
    pub quantity: u32,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Article {
    pub title: String,
    pub category: String,
    pub sections: Vec<String>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Building {
    pub name: String,
    pub category: String,
    pub cost_gold: u32,
    pub cost_timber: u32,
    #[serde(default)]
    pub built: bool,
}

/// Live game state for the demo host. The navigation engine never touches
/// this type directly; overlays query it through their `PanelSource`
/// implementations.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct GameData {
    pub gold: u32,
    pub timber: u32,
    #[serde(default)]
    pub routes: Vec<Route>,
    #[serde(default)]
    pub offers: Vec<Offer>,
    #[serde(default)]
    pub articles: Vec<Article>,
    #[serde(default)]
    pub buildings: Vec<Building>,
}

impl GameData {
    pub fn load(set: &str) -> Result<Self, DataError> {
        let filename = format!("{set}.json");
        let file = DataAssets::get(&filename).ok_or_else(|| DataError::Missing(set.to_string()))?;
        serde_json::from_slice(file.data.as_ref()).map_err(|source| DataError::Malformed {
            name: set.to_string(),
            source,
        })
    }

    /// Provider boundary: a data set that cannot be decoded degrades to an
    /// empty state, which overlays announce as empty collections.
    pub fn load_or_empty(set: &str) -> Self {
        Self::load(set).unwrap_or_default()
    }

    pub fn available_sets() -> Vec<String> {
        let mut sets: Vec<String> = DataAssets::iter()
            .filter_map(|f| f.strip_suffix(".json").map(|n| n.to_string()))
            .collect();
        sets.sort();
        sets
    }

    /// Distinct article categories in order of first appearance.
    pub fn article_categories(&self) -> Vec<String> {
        let mut categories: Vec<String> = Vec::new();
        for article in &self.articles {
            if !categories.contains(&article.category) {
                categories.push(article.category.clone());
            }
        }
        categories
    }

    pub fn articles_in(&self, category: &str) -> Vec<&Article> {
        self.articles
            .iter()
            .filter(|a| a.category == category)
            .collect()
    }

    /// Distinct building categories in order of first appearance.
    pub fn building_categories(&self) -> Vec<String> {
        let mut categories: Vec<String> = Vec::new();
        for building in &self.buildings {
            if !categories.contains(&building.category) {
                categories.push(building.category.clone());
            }
        }
        categories
    }

    pub fn buildings_in(&self, category: &str) -> Vec<&Building> {
        self.buildings
            .iter()
            .filter(|b| b.category == category)
            .collect()
    }

    /// Pay for an offer and turn it into an active route.
    pub fn claim_offer(&mut self, index: usize) -> Result<Offer, ActionDenied> {
        let offer = self.offers.get(index).ok_or(ActionDenied::Gone)?;
        if self.gold < offer.price {
            return Err(ActionDenied::NotEnoughGold {
                need: offer.price,
                have: self.gold,
            });
        }
        let offer = self.offers.remove(index);
        self.gold -= offer.price;
        self.routes.push(Route {
            good: offer.good.clone(),
            destination: offer.town.clone(),
            income: offer.price / 4 + 1,
        });
        Ok(offer)
    }

    /// Change an offer's lot size, clamped to at least 1. Returns the new
    /// quantity.
    pub fn adjust_offer_quantity(&mut self, index: usize, delta: i64) -> Option<u32> {
        let offer = self.offers.get_mut(index)?;
        let quantity = (offer.quantity as i64 + delta).max(1) as u32;
        offer.quantity = quantity;
        Some(quantity)
    }

    /// Spend resources to construct a building.
    pub fn construct(&mut self, category: &str, index: usize) -> Result<String, ActionDenied> {
        let position = self
            .buildings
            .iter()
            .enumerate()
            .filter(|(_, b)| b.category == category)
            .map(|(i, _)| i)
            .nth(index)
            .ok_or(ActionDenied::Gone)?;
        let building = &self.buildings[position];
        if building.built {
            return Err(ActionDenied::AlreadyBuilt);
        }
        if self.gold < building.cost_gold {
            return Err(ActionDenied::NotEnoughGold {
                need: building.cost_gold,
                have: self.gold,
            });
        }
        if self.timber < building.cost_timber {
            return Err(ActionDenied::NotEnoughTimber {
                need: building.cost_timber,
                have: self.timber,
            });
        }
        self.gold -= self.buildings[position].cost_gold;
        self.timber -= self.buildings[position].cost_timber;
        self.buildings[position].built = true;
        Ok(self.buildings[position].name.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> GameData {
        GameData {
            gold: 100,
            timber: 10,
            routes: Vec::new(),
            offers: vec![Offer {
                good: "Wheat".to_string(),
                town: "Riverfork".to_string(),
                price: 40,
                quantity: 3,
            }],
            articles: vec![
                Article {
                    title: "Mills".to_string(),
                    category: "Industry".to_string(),
                    sections: vec!["Mills grind grain.".to_string()],
                },
                Article {
                    title: "Barter".to_string(),
                    category: "Trade".to_string(),
                    sections: vec![],
                },
            ],
            buildings: vec![Building {
                name: "Sawmill".to_string(),
                category: "Industry".to_string(),
                cost_gold: 50,
                cost_timber: 20,
                built: false,
            }],
        }
    }

    #[test]
    fn test_embedded_default_set_decodes() {
        let data = GameData::load("harbor-kingdom").unwrap();
        assert!(data.gold > 0);
        assert!(!data.offers.is_empty());
        assert!(!data.articles.is_empty());
        assert!(!data.buildings.is_empty());
    }

    #[test]
    fn test_missing_set_degrades_to_empty() {
        let data = GameData::load_or_empty("no-such-set");
        assert_eq!(data.gold, 0);
        assert!(data.offers.is_empty());
    }

    #[test]
    fn test_claim_offer_moves_it_to_routes() {
        let mut data = sample();
        let offer = data.claim_offer(0).unwrap();
        assert_eq!(offer.good, "Wheat");
        assert_eq!(data.gold, 60);
        assert!(data.offers.is_empty());
        assert_eq!(data.routes.len(), 1);
        assert_eq!(data.routes[0].destination, "Riverfork");
    }

    #[test]
    fn test_claim_denied_leaves_state_unchanged() {
        let mut data = sample();
        data.gold = 10;
        let denied = data.claim_offer(0).unwrap_err();
        assert_eq!(denied, ActionDenied::NotEnoughGold { need: 40, have: 10 });
        assert_eq!(data.offers.len(), 1);
        assert!(data.routes.is_empty());
    }

    #[test]
    fn test_adjust_quantity_clamps_at_one() {
        let mut data = sample();
        assert_eq!(data.adjust_offer_quantity(0, -10), Some(1));
        assert_eq!(data.adjust_offer_quantity(0, 4), Some(5));
        assert_eq!(data.adjust_offer_quantity(7, 1), None);
    }

    #[test]
    fn test_construct_spends_resources_once() {
        let mut data = sample();
        data.timber = 25;
        let name = data.construct("Industry", 0).unwrap();
        assert_eq!(name, "Sawmill");
        assert_eq!(data.gold, 50);
        assert_eq!(data.timber, 5);
        assert_eq!(
            data.construct("Industry", 0).unwrap_err(),
            ActionDenied::AlreadyBuilt
        );
    }

    #[test]
    fn test_categories_in_first_appearance_order() {
        let data = sample();
        assert_eq!(data.article_categories(), vec!["Industry", "Trade"]);
        assert_eq!(data.articles_in("Trade").len(), 1);
    }
}
