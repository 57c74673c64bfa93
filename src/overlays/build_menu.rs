use std::cell::RefCell;
use std::rc::Rc;

use rust_i18n::t;

use crate::gamedata::{ActionDenied, GameData};
use crate::panel::{Activation, Entry, ItemFlow, ListPanel, PanelConfig, PanelSource};

/// Construction overlay. The one overlay that enables cross-category item
/// flow: arrowing past the last building of a category continues into the
/// next category, the way the game's own build toolbar scans.
pub struct BuildMenuSource {
    data: Rc<RefCell<GameData>>,
}

impl BuildMenuSource {
    fn category_name(&self, category: usize) -> Option<String> {
        self.data
            .borrow()
            .building_categories()
            .get(category)
            .cloned()
    }
}

impl PanelSource for BuildMenuSource {
    fn categories(&mut self) -> Vec<Entry> {
        self.data
            .borrow()
            .building_categories()
            .into_iter()
            .map(Entry::new)
            .collect()
    }

    fn items(&mut self, category: usize) -> Vec<Entry> {
        let Some(name) = self.category_name(category) else {
            return Vec::new();
        };
        self.data
            .borrow()
            .buildings_in(&name)
            .into_iter()
            .map(|building| {
                let summary = if building.built {
                    t!("build.already_built").into_owned()
                } else {
                    t!(
                        "build.cost",
                        gold = building.cost_gold,
                        timber = building.cost_timber
                    )
                    .into_owned()
                };
                Entry::with_summary(building.name.as_str(), summary)
            })
            .collect()
    }

    fn activate(&mut self, category: usize, item: usize) -> Activation {
        let Some(name) = self.category_name(category) else {
            return Activation::Denied(t!("panel.empty").into_owned());
        };
        let mut data = self.data.borrow_mut();
        match data.construct(&name, item) {
            Ok(built) => Activation::Done(
                t!(
                    "build.constructed",
                    name = built,
                    gold = data.gold,
                    timber = data.timber
                )
                .into_owned(),
            ),
            Err(ActionDenied::AlreadyBuilt) => {
                let building = data
                    .buildings_in(&name)
                    .get(item)
                    .map(|b| b.name.clone())
                    .unwrap_or_default();
                Activation::Denied(t!("build.denied_built", name = building).into_owned())
            }
            Err(ActionDenied::NotEnoughGold { need, have }) => {
                Activation::Denied(t!("build.denied_gold", need = need, have = have).into_owned())
            }
            Err(ActionDenied::NotEnoughTimber { need, have }) => {
                Activation::Denied(t!("build.denied_timber", need = need, have = have).into_owned())
            }
            Err(ActionDenied::Gone) => Activation::Denied(t!("panel.empty").into_owned()),
        }
    }
}

pub fn build_menu_panel(
    data: &Rc<RefCell<GameData>>,
    cross_category: bool,
    announce_position: bool,
) -> ListPanel<BuildMenuSource> {
    let flow = if cross_category {
        ItemFlow::CrossCategory
    } else {
        ItemFlow::PerCategory
    };
    ListPanel::new(
        PanelConfig::new(t!("build.panel_name"))
            .item_flow(flow)
            .announce_position(announce_position),
        BuildMenuSource {
            data: Rc::clone(data),
        },
    )
}
