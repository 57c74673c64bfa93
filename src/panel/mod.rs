mod source;

pub use source::{Activation, Entry, PanelSource};

use rust_i18n::t;

use crate::dispatch::{DispatchCtx, KeyHandler};
use crate::input::{Key, KeyInput};
use crate::nav::{Jump, NavState, ResetPolicy, wrap_index};
use crate::search::{DEFAULT_NAV_KEYS, TypeAhead};
use crate::speech::{Announcer, Cue};

/// The three navigation tiers every overlay in the game maps onto. Two-tier
/// overlays simply never descend into `Content`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tier {
    Category,
    Item,
    Content,
}

const TIERS: &[Tier] = &[Tier::Category, Tier::Item, Tier::Content];

/// Sibling-move policy at the item tier.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ItemFlow {
    /// Up/Down wrap within the current category's items.
    PerCategory,
    /// Moving past the edge of a category's items continues into the
    /// neighboring category, wrapping the whole category-by-item space.
    CrossCategory,
}

#[derive(Clone, Debug)]
pub struct PanelConfig {
    pub name: String,
    pub item_flow: ItemFlow,
    /// Append "n of m" to entry announcements.
    pub announce_position: bool,
}

impl PanelConfig {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            item_flow: ItemFlow::PerCategory,
            announce_position: true,
        }
    }

    pub fn item_flow(mut self, flow: ItemFlow) -> Self {
        self.item_flow = flow;
        self
    }

    pub fn announce_position(mut self, on: bool) -> Self {
        self.announce_position = on;
        self
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Status {
    Closed,
    Open,
    Suspended,
}

/// Snapshot of the panel for on-screen rendering (demo host only; speech is
/// the primary interface).
#[derive(Clone, Debug)]
pub struct PanelView {
    pub title: String,
    pub tier: Tier,
    pub rows: Vec<String>,
    pub cursor: usize,
    pub search: String,
}

/// The generic overlay engine: a multi-level menu state machine plus
/// type-ahead search over a caller-supplied data source. Every concrete
/// overlay is a `PanelSource` wired into one of these.
pub struct ListPanel<S: PanelSource> {
    config: PanelConfig,
    source: S,
    nav: NavState<Tier>,
    search: TypeAhead,
    categories: Vec<Entry>,
    items: Vec<Entry>,
    content: Vec<String>,
    status: Status,
    sub_request: Option<String>,
}

impl<S: PanelSource> ListPanel<S> {
    pub fn new(config: PanelConfig, source: S) -> Self {
        Self {
            config,
            source,
            nav: NavState::new(TIERS),
            search: TypeAhead::default(),
            categories: Vec::new(),
            items: Vec::new(),
            content: Vec::new(),
            status: Status::Closed,
            sub_request: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.config.name
    }

    pub fn is_open(&self) -> bool {
        self.status != Status::Closed
    }

    pub fn is_suspended(&self) -> bool {
        self.status == Status::Suspended
    }

    pub fn tier(&self) -> Tier {
        self.nav.level()
    }

    pub fn index(&self, tier: Tier) -> usize {
        self.nav.index(tier)
    }

    /// Open with a fresh data snapshot and fresh navigation state.
    /// Idempotent while already open or suspended.
    pub fn open(&mut self, announcer: &mut dyn Announcer) {
        if self.status != Status::Closed {
            return;
        }
        self.nav = NavState::new(TIERS);
        self.search.clear();
        self.sub_request = None;
        self.items.clear();
        self.content.clear();
        self.categories = self.source.categories();
        self.status = Status::Open;
        if self.categories.is_empty() {
            announcer.speak(&t!("panel.opened_empty", panel = &self.config.name));
        } else {
            announcer.speak(&format!("{}. {}", self.config.name, self.current_line()));
        }
    }

    /// Idempotent; closing discards all navigation state.
    pub fn close(&mut self) {
        self.status = Status::Closed;
        self.sub_request = None;
    }

    /// Yield input priority to a sub-panel: `is_active` goes false until
    /// `resume`, so one key press is never handled by two layers.
    pub fn suspend(&mut self) {
        if self.status == Status::Open {
            self.status = Status::Suspended;
        }
    }

    /// Reclaim input after the sub-panel closed, re-announcing the current
    /// entry over a refreshed snapshot.
    pub fn resume(&mut self, announcer: &mut dyn Announcer) {
        if self.status != Status::Suspended {
            return;
        }
        self.status = Status::Open;
        self.refresh_data();
        announcer.speak(&self.current_line());
    }

    /// Sub-panel requested by the last activation, if any. The host opens
    /// the matching panel and later drives `resume`.
    pub fn take_sub_request(&mut self) -> Option<String> {
        self.sub_request.take()
    }

    /// Re-fetch collections and clamp any cursor the refresh left dangling.
    /// A level whose collection vanished is abandoned for its parent so the
    /// next announcement is coherent.
    pub fn refresh_data(&mut self) {
        self.categories = self.source.categories();
        self.nav.clamp(Tier::Category, self.categories.len());
        if matches!(self.nav.level(), Tier::Item | Tier::Content) {
            self.items = self.source.items(self.nav.index(Tier::Category));
            self.nav.clamp(Tier::Item, self.items.len());
            if self.items.is_empty() {
                self.nav.leave(Tier::Category);
                return;
            }
        }
        if self.nav.level() == Tier::Content {
            self.content = self
                .source
                .content(self.nav.index(Tier::Category), self.nav.index(Tier::Item));
            self.nav.clamp(Tier::Content, self.content.len());
            if self.content.is_empty() {
                self.nav.leave(Tier::Item);
            }
        }
    }

    pub fn view(&self) -> PanelView {
        let rows = match self.nav.level() {
            Tier::Category => self.categories.iter().map(Entry::spoken).collect(),
            Tier::Item => self.items.iter().map(Entry::spoken).collect(),
            Tier::Content => self.content.clone(),
        };
        PanelView {
            title: self.config.name.clone(),
            tier: self.nav.level(),
            rows,
            cursor: self.nav.current_index(),
            search: self.search.buffer().to_string(),
        }
    }

    fn entry_line(&self, entries: &[Entry], index: usize) -> String {
        if entries.is_empty() {
            return t!("panel.empty").into_owned();
        }
        let spoken = entries[index].spoken();
        if self.config.announce_position {
            format!(
                "{}, {}",
                spoken,
                t!("panel.position", index = index + 1, total = entries.len())
            )
        } else {
            spoken
        }
    }

    fn current_line(&self) -> String {
        match self.nav.level() {
            Tier::Category => self.entry_line(&self.categories, self.nav.index(Tier::Category)),
            Tier::Item => self.entry_line(&self.items, self.nav.index(Tier::Item)),
            Tier::Content => self
                .content
                .get(self.nav.index(Tier::Content))
                .cloned()
                .unwrap_or_else(|| t!("panel.empty").into_owned()),
        }
    }

    fn current_count(&self) -> usize {
        match self.nav.level() {
            Tier::Category => self.categories.len(),
            Tier::Item => self.items.len(),
            Tier::Content => self.content.len(),
        }
    }

    fn move_sibling(&mut self, direction: isize, ctx: &mut DispatchCtx<'_>) -> bool {
        if self.nav.level() == Tier::Item && self.config.item_flow == ItemFlow::CrossCategory {
            return self.move_cross_category(direction, ctx);
        }
        let count = self.current_count();
        if count == 0 {
            ctx.announcer.speak(&t!("panel.empty"));
            return true;
        }
        self.nav.move_in(direction, count);
        ctx.announcer.speak(&self.current_line());
        true
    }

    /// Cross-boundary item flow: walking past the edge of one category's
    /// items enters the neighboring category, skipping empty categories and
    /// wrapping the whole space.
    fn move_cross_category(&mut self, direction: isize, ctx: &mut DispatchCtx<'_>) -> bool {
        if self.categories.is_empty() {
            ctx.announcer.speak(&t!("panel.empty"));
            return true;
        }
        let item = self.nav.index(Tier::Item);
        let at_edge = if direction > 0 {
            item + 1 >= self.items.len()
        } else {
            item == 0
        };
        if !at_edge && !self.items.is_empty() {
            self.nav.move_in(direction, self.items.len());
            ctx.announcer.speak(&self.current_line());
            return true;
        }
        let total = self.categories.len();
        let mut category = self.nav.index(Tier::Category);
        for _ in 0..total {
            category = wrap_index(category, direction, total);
            let items = self.source.items(category);
            if items.is_empty() {
                continue;
            }
            self.nav.set_index(Tier::Category, category);
            self.items = items;
            let landing = if direction > 0 { 0 } else { self.items.len() - 1 };
            self.nav.set_index(Tier::Item, landing);
            // Name the category when crossing a boundary so the user hears
            // where they landed.
            let line = format!("{}. {}", self.categories[category].name, self.current_line());
            ctx.announcer.speak(&line);
            return true;
        }
        ctx.announcer.speak(&t!("panel.empty"));
        true
    }

    fn descend(&mut self, ctx: &mut DispatchCtx<'_>) -> bool {
        match self.nav.level() {
            Tier::Category => {
                if self.categories.is_empty() {
                    ctx.announcer.speak(&t!("panel.empty"));
                    return true;
                }
                let category = self.nav.index(Tier::Category);
                let items = self.source.items(category);
                if items.is_empty() {
                    ctx.announcer.speak(&t!(
                        "panel.empty_category",
                        category = &self.categories[category].name
                    ));
                    return true;
                }
                self.items = items;
                self.nav.enter(Tier::Item, ResetPolicy::ResetToFirst);
                ctx.announcer.speak(&self.current_line());
                true
            }
            Tier::Item => {
                if self.items.is_empty() {
                    ctx.announcer.speak(&t!("panel.empty"));
                    return true;
                }
                let category = self.nav.index(Tier::Category);
                let item = self.nav.index(Tier::Item);
                let content = self.source.content(category, item);
                if content.is_empty() {
                    // Leaf item: reading right repeats its full detail.
                    ctx.announcer.speak(&self.items[item].spoken());
                    return true;
                }
                self.content = content;
                self.nav.enter(Tier::Content, ResetPolicy::ResetToFirst);
                ctx.announcer.speak(&self.current_line());
                true
            }
            Tier::Content => {
                ctx.announcer.speak(&self.current_line());
                true
            }
        }
    }

    fn ascend(&mut self, ctx: &mut DispatchCtx<'_>) -> bool {
        match self.nav.level() {
            Tier::Category => {
                ctx.announcer.speak(&self.current_line());
                true
            }
            Tier::Item => {
                self.nav.leave(Tier::Category);
                ctx.announcer.speak(&self.current_line());
                true
            }
            Tier::Content => {
                self.nav.leave(Tier::Item);
                ctx.announcer.speak(&self.current_line());
                true
            }
        }
    }

    /// Escape layering: an active search buffer is cleared first; a child
    /// level ascends; both latch the input blocker so the host's default
    /// close does not fire from the same press. At the top level the key is
    /// passed through for the host to close the overlay.
    fn escape(&mut self, ctx: &mut DispatchCtx<'_>) -> bool {
        if self.search.has_buffer() {
            self.search.clear();
            ctx.block_default_cancel();
            ctx.announcer.speak(&t!("panel.search_cleared"));
            return true;
        }
        match self.nav.level() {
            Tier::Category => false,
            _ => {
                ctx.block_default_cancel();
                self.ascend(ctx)
            }
        }
    }

    fn jump(&mut self, target: Jump, ctx: &mut DispatchCtx<'_>) -> bool {
        let count = self.current_count();
        if count == 0 {
            ctx.announcer.speak(&t!("panel.empty"));
            return true;
        }
        self.nav.jump(target, count);
        ctx.announcer.speak(&self.current_line());
        true
    }

    fn activate_or_descend(&mut self, ctx: &mut DispatchCtx<'_>) -> bool {
        match self.nav.level() {
            Tier::Category => self.descend(ctx),
            Tier::Item => {
                if self.items.is_empty() {
                    ctx.announcer.speak(&t!("panel.empty"));
                    return true;
                }
                let category = self.nav.index(Tier::Category);
                let item = self.nav.index(Tier::Item);
                let content = self.source.content(category, item);
                if !content.is_empty() {
                    self.content = content;
                    self.nav.enter(Tier::Content, ResetPolicy::ResetToFirst);
                    ctx.announcer.speak(&self.current_line());
                    return true;
                }
                match self.source.activate(category, item) {
                    Activation::Done(message) => {
                        ctx.announcer.play_cue(Cue::Activate);
                        self.refresh_data();
                        ctx.announcer.speak(&message);
                    }
                    Activation::Denied(message) => {
                        ctx.announcer.play_cue(Cue::Deny);
                        ctx.announcer.speak(&message);
                    }
                    Activation::SubPanel(id) => {
                        // The sub-panel's own open supplies the spoken line.
                        self.sub_request = Some(id);
                        self.status = Status::Suspended;
                    }
                }
                true
            }
            Tier::Content => {
                ctx.announcer.speak(&self.current_line());
                true
            }
        }
    }

    fn adjust(&mut self, delta: i64, ctx: &mut DispatchCtx<'_>) -> bool {
        if self.nav.level() != Tier::Item || self.items.is_empty() {
            return false;
        }
        let category = self.nav.index(Tier::Category);
        let item = self.nav.index(Tier::Item);
        match self.source.adjust(category, item, delta) {
            Some(line) => {
                self.refresh_data();
                ctx.announcer.speak(&line);
                true
            }
            None => false,
        }
    }

    fn search_char(&mut self, ch: char, ctx: &mut DispatchCtx<'_>) -> bool {
        self.search.add_char(ch);
        self.apply_search(ctx);
        true
    }

    fn search_backspace(&mut self, ctx: &mut DispatchCtx<'_>) -> bool {
        if !self.search.remove_char() {
            // No search in progress; not this panel's key.
            return false;
        }
        if self.search.has_buffer() {
            self.apply_search(ctx);
        } else {
            ctx.announcer.speak(&t!("panel.search_cleared"));
        }
        true
    }

    fn apply_search(&mut self, ctx: &mut DispatchCtx<'_>) {
        let tier = self.nav.level();
        let found = match tier {
            Tier::Category => self.search.find_match(&self.categories, |e| e.name.as_str()),
            Tier::Item => self.search.find_match(&self.items, |e| e.name.as_str()),
            Tier::Content => self.search.find_match(&self.content, |s| s.as_str()),
        };
        match found {
            Some(index) => {
                self.nav.set_index(tier, index);
                ctx.announcer.speak(&self.current_line());
            }
            None => {
                ctx.announcer
                    .speak(&t!("panel.no_match", query = self.search.buffer()));
            }
        }
    }
}

impl<S: PanelSource> KeyHandler for ListPanel<S> {
    fn is_active(&self) -> bool {
        self.status == Status::Open
    }

    fn process_key(&mut self, input: KeyInput, ctx: &mut DispatchCtx<'_>) -> bool {
        if !input.modifiers.is_plain() {
            // Control/Alt chords belong to the global hotkey band.
            return false;
        }
        self.search.clear_on_navigation(input.key, DEFAULT_NAV_KEYS);
        match input.key {
            Key::Up => self.move_sibling(-1, ctx),
            Key::Down => self.move_sibling(1, ctx),
            Key::Right => self.descend(ctx),
            Key::Left => self.ascend(ctx),
            Key::Home => self.jump(Jump::First, ctx),
            Key::End => self.jump(Jump::Last, ctx),
            Key::Enter | Key::NumpadEnter => self.activate_or_descend(ctx),
            Key::Escape => self.escape(ctx),
            Key::Backspace => self.search_backspace(ctx),
            Key::Space => {
                ctx.announcer.speak(&self.current_line());
                true
            }
            Key::Plus => self.adjust(1, ctx),
            Key::Minus => self.adjust(-1, ctx),
            Key::Char(ch) if ch.is_alphabetic() => self.search_char(ch, ctx),
            Key::Char(_) => false,
        }
    }
}
