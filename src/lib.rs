//! Spoken keyboard-navigation engine for game menu overlays.
//!
//! The core is screen-agnostic: a priority-ordered key dispatch chain
//! ([`dispatch`]), a multi-level menu state machine ([`nav`]), incremental
//! type-ahead search ([`search`]), and a generic panel engine ([`panel`])
//! that ties them to a data source and speaks exactly one line per
//! transition through an [`speech::Announcer`]. Concrete overlays
//! ([`overlays`]) are thin data adapters; the binary target hosts them in a
//! caption-simulator TUI.

rust_i18n::i18n!("locales", fallback = "en");

pub mod config;
pub mod dispatch;
pub mod event;
pub mod gamedata;
pub mod input;
pub mod nav;
pub mod overlays;
pub mod panel;
pub mod search;
pub mod speech;
pub mod ui;

/// Spoken when navigation keys arrive with no overlay open.
pub fn hint_line() -> String {
    rust_i18n::t!("app.hint").into_owned()
}

/// Spoken when the host dismisses an overlay.
pub fn overlay_closed_line() -> String {
    rust_i18n::t!("app.overlay_closed").into_owned()
}
