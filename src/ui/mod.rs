pub mod caption;
pub mod panel_view;
