//! Concrete overlays: thin `PanelSource` implementations over shared game
//! state. All navigation behavior lives in the panel engine; these modules
//! only fetch, format, and act.

pub mod build_menu;
pub mod encyclopedia;
pub mod trade_routes;

pub use build_menu::build_menu_panel;
pub use encyclopedia::encyclopedia_panel;
pub use trade_routes::{ROUTE_DETAIL_PANEL, route_detail_panel, trade_routes_panel};
