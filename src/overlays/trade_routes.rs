use std::cell::{Cell, RefCell};
use std::rc::Rc;

use rust_i18n::t;

use crate::gamedata::{ActionDenied, GameData};
use crate::panel::{Activation, Entry, ListPanel, PanelConfig, PanelSource};

/// Sub-panel id requested when a route is activated.
pub const ROUTE_DETAIL_PANEL: &str = "route-detail";

const CAT_ACTIVE_ROUTES: usize = 0;
const CAT_TOWN_OFFERS: usize = 1;

pub struct TradeSource {
    data: Rc<RefCell<GameData>>,
    /// Route the user last activated, read by the detail sub-panel.
    selected_route: Rc<Cell<usize>>,
}

impl PanelSource for TradeSource {
    fn categories(&mut self) -> Vec<Entry> {
        let data = self.data.borrow();
        vec![
            Entry::with_summary(
                t!("trade.active_routes"),
                t!("trade.route_count", count = data.routes.len()),
            ),
            Entry::with_summary(
                t!("trade.town_offers"),
                t!("trade.offer_count", count = data.offers.len()),
            ),
        ]
    }

    fn items(&mut self, category: usize) -> Vec<Entry> {
        let data = self.data.borrow();
        match category {
            CAT_ACTIVE_ROUTES => data
                .routes
                .iter()
                .map(|route| {
                    Entry::with_summary(
                        route.good.as_str(),
                        t!(
                            "trade.route_summary",
                            town = &route.destination,
                            income = route.income
                        ),
                    )
                })
                .collect(),
            CAT_TOWN_OFFERS => data
                .offers
                .iter()
                .map(|offer| {
                    Entry::with_summary(
                        offer.good.as_str(),
                        t!(
                            "trade.offer_summary",
                            town = &offer.town,
                            price = offer.price,
                            quantity = offer.quantity
                        ),
                    )
                })
                .collect(),
            _ => Vec::new(),
        }
    }

    fn activate(&mut self, category: usize, item: usize) -> Activation {
        match category {
            CAT_ACTIVE_ROUTES => {
                self.selected_route.set(item);
                Activation::SubPanel(ROUTE_DETAIL_PANEL.to_string())
            }
            CAT_TOWN_OFFERS => {
                let mut data = self.data.borrow_mut();
                match data.claim_offer(item) {
                    Ok(offer) => Activation::Done(
                        t!(
                            "trade.claimed",
                            good = &offer.good,
                            town = &offer.town,
                            gold = data.gold
                        )
                        .into_owned(),
                    ),
                    Err(ActionDenied::NotEnoughGold { need, have }) => Activation::Denied(
                        t!("trade.denied_gold", need = need, have = have).into_owned(),
                    ),
                    Err(_) => Activation::Denied(t!("trade.offer_gone").into_owned()),
                }
            }
            _ => Activation::Denied(t!("trade.offer_gone").into_owned()),
        }
    }

    fn adjust(&mut self, category: usize, item: usize, delta: i64) -> Option<String> {
        if category != CAT_TOWN_OFFERS {
            return None;
        }
        let mut data = self.data.borrow_mut();
        let quantity = data.adjust_offer_quantity(item, delta)?;
        let good = data.offers[item].good.clone();
        Some(t!("trade.quantity", good = good, quantity = quantity).into_owned())
    }
}

/// Detail sub-panel over the route selected in the trade overlay.
pub struct RouteDetailSource {
    data: Rc<RefCell<GameData>>,
    selected_route: Rc<Cell<usize>>,
}

impl PanelSource for RouteDetailSource {
    fn categories(&mut self) -> Vec<Entry> {
        let data = self.data.borrow();
        match data.routes.get(self.selected_route.get()) {
            Some(route) => vec![Entry::with_summary(t!("trade.details"), route.good.as_str())],
            None => Vec::new(),
        }
    }

    fn items(&mut self, _category: usize) -> Vec<Entry> {
        let data = self.data.borrow();
        let Some(route) = data.routes.get(self.selected_route.get()) else {
            return Vec::new();
        };
        vec![
            Entry::with_summary("Good", route.good.as_str()),
            Entry::with_summary("Destination", route.destination.as_str()),
            Entry::with_summary("Income", format!("{} gold per trip", route.income)),
        ]
    }

    fn activate(&mut self, _category: usize, item: usize) -> Activation {
        // Fields are read-only; Enter repeats the field.
        let mut items = self.items(0);
        if item < items.len() {
            Activation::Denied(items.remove(item).spoken())
        } else {
            Activation::Denied(t!("trade.no_route").into_owned())
        }
    }
}

pub fn trade_routes_panel(
    data: &Rc<RefCell<GameData>>,
    selected_route: &Rc<Cell<usize>>,
    announce_position: bool,
) -> ListPanel<TradeSource> {
    ListPanel::new(
        PanelConfig::new(t!("trade.panel_name")).announce_position(announce_position),
        TradeSource {
            data: Rc::clone(data),
            selected_route: Rc::clone(selected_route),
        },
    )
}

pub fn route_detail_panel(
    data: &Rc<RefCell<GameData>>,
    selected_route: &Rc<Cell<usize>>,
    announce_position: bool,
) -> ListPanel<RouteDetailSource> {
    ListPanel::new(
        PanelConfig::new(t!("trade.detail_panel")).announce_position(announce_position),
        RouteDetailSource {
            data: Rc::clone(data),
            selected_route: Rc::clone(selected_route),
        },
    )
}
