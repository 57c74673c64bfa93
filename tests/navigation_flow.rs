use std::cell::{Cell, RefCell};
use std::rc::Rc;

use herald::dispatch::{DispatchChain, DispatchCtx, KeyHandler};
use herald::input::{Key, KeyInput};
use herald::panel::{Activation, Entry, ItemFlow, ListPanel, PanelConfig, PanelSource};
use herald::speech::{Cue, RecordingAnnouncer};

/// Fixture provider: static categories and items, configurable activation.
struct ShelfSource {
    categories: Vec<&'static str>,
    items: Vec<Vec<&'static str>>,
    activation: Activation,
}

impl PanelSource for ShelfSource {
    fn categories(&mut self) -> Vec<Entry> {
        self.categories.iter().copied().map(Entry::new).collect()
    }

    fn items(&mut self, category: usize) -> Vec<Entry> {
        self.items[category].iter().copied().map(Entry::new).collect()
    }

    fn activate(&mut self, _category: usize, _item: usize) -> Activation {
        self.activation.clone()
    }
}

fn market_panel() -> ListPanel<ShelfSource> {
    ListPanel::new(
        PanelConfig::new("Market").announce_position(true),
        ShelfSource {
            categories: vec!["Goods"],
            items: vec![vec!["Wheat", "Wood", "Wool"]],
            activation: Activation::Done("Sold".to_string()),
        },
    )
}

struct QuitHotkey {
    pressed: Rc<Cell<bool>>,
}

impl KeyHandler for QuitHotkey {
    fn is_active(&self) -> bool {
        true
    }

    fn process_key(&mut self, input: KeyInput, _ctx: &mut DispatchCtx<'_>) -> bool {
        if input.modifiers.control && input.key == Key::Char('q') {
            self.pressed.set(true);
            return true;
        }
        false
    }
}

struct FallbackLog {
    keys: Rc<RefCell<Vec<Key>>>,
}

impl KeyHandler for FallbackLog {
    fn is_active(&self) -> bool {
        true
    }

    fn process_key(&mut self, input: KeyInput, _ctx: &mut DispatchCtx<'_>) -> bool {
        self.keys.borrow_mut().push(input.key);
        true
    }
}

fn press(chain: &mut DispatchChain, announcer: &mut RecordingAnnouncer, key: Key) {
    chain.dispatch(KeyInput::plain(key), announcer);
}

#[test]
fn test_open_navigate_and_wrap_through_chain() {
    let panel = Rc::new(RefCell::new(market_panel()));
    let mut chain = DispatchChain::new();
    chain.register_overlay(Rc::clone(&panel));

    let mut announcer = RecordingAnnouncer::default();
    panel.borrow_mut().open(&mut announcer);
    assert_eq!(announcer.current(), Some("Market. Goods, 1 of 1"));

    press(&mut chain, &mut announcer, Key::Right);
    assert_eq!(announcer.current(), Some("Wheat, 1 of 3"));

    press(&mut chain, &mut announcer, Key::Down);
    press(&mut chain, &mut announcer, Key::Down);
    assert_eq!(announcer.current(), Some("Wool, 3 of 3"));

    // Past the last sibling wraps to the first, and back again.
    press(&mut chain, &mut announcer, Key::Down);
    assert_eq!(announcer.current(), Some("Wheat, 1 of 3"));
    press(&mut chain, &mut announcer, Key::Up);
    assert_eq!(announcer.current(), Some("Wool, 3 of 3"));

    press(&mut chain, &mut announcer, Key::Home);
    assert_eq!(announcer.current(), Some("Wheat, 1 of 3"));
    press(&mut chain, &mut announcer, Key::End);
    assert_eq!(announcer.current(), Some("Wool, 3 of 3"));

    // Exactly one spoken line per key press.
    assert_eq!(announcer.transcript.len(), 8);
}

#[test]
fn test_category_wrap_descend_and_ascend_round_trip() {
    let panel = Rc::new(RefCell::new(ListPanel::new(
        PanelConfig::new("Town").announce_position(false),
        ShelfSource {
            categories: vec!["Trade", "Industry", "History"],
            items: vec![
                vec!["Caravans", "Shipping"],
                vec!["Sawmill"],
                vec!["Founding"],
            ],
            activation: Activation::Done("done".to_string()),
        },
    )));
    let mut chain = DispatchChain::new();
    chain.register_overlay(Rc::clone(&panel));

    let mut announcer = RecordingAnnouncer::default();
    panel.borrow_mut().open(&mut announcer);
    assert_eq!(announcer.current(), Some("Town. Trade"));

    press(&mut chain, &mut announcer, Key::Down);
    assert_eq!(announcer.current(), Some("Industry"));
    press(&mut chain, &mut announcer, Key::Down);
    assert_eq!(announcer.current(), Some("History"));
    press(&mut chain, &mut announcer, Key::Down);
    assert_eq!(announcer.current(), Some("Trade"));

    press(&mut chain, &mut announcer, Key::Enter);
    assert_eq!(announcer.current(), Some("Caravans"));

    // Ascending re-announces the category the user left from.
    press(&mut chain, &mut announcer, Key::Left);
    assert_eq!(announcer.current(), Some("Trade"));
}

#[test]
fn test_type_ahead_narrows_then_escape_layers() {
    let panel = Rc::new(RefCell::new(market_panel()));
    let mut chain = DispatchChain::new();
    chain.register_overlay(Rc::clone(&panel));

    let mut announcer = RecordingAnnouncer::default();
    panel.borrow_mut().open(&mut announcer);
    press(&mut chain, &mut announcer, Key::Right);

    // "w" is ambiguous and lands on the first match.
    press(&mut chain, &mut announcer, Key::Char('w'));
    assert_eq!(announcer.current(), Some("Wheat, 1 of 3"));
    press(&mut chain, &mut announcer, Key::Char('o'));
    assert_eq!(announcer.current(), Some("Wood, 2 of 3"));
    press(&mut chain, &mut announcer, Key::Char('o'));
    assert_eq!(announcer.current(), Some("Wood, 2 of 3"));
    press(&mut chain, &mut announcer, Key::Char('l'));
    assert_eq!(announcer.current(), Some("Wool, 3 of 3"));

    // A dead-end buffer leaves the cursor where it was.
    press(&mut chain, &mut announcer, Key::Char('z'));
    assert_eq!(announcer.current(), Some("No match for woolz"));
    assert_eq!(panel.borrow().view().cursor, 2);

    // First Escape clears the buffer and blocks the host's default cancel.
    press(&mut chain, &mut announcer, Key::Escape);
    assert_eq!(announcer.current(), Some("Search cleared"));
    assert!(chain.take_input_block());

    // Second Escape ascends to the category level, still blocked.
    press(&mut chain, &mut announcer, Key::Escape);
    assert_eq!(announcer.current(), Some("Goods, 1 of 1"));
    assert!(chain.take_input_block());

    // Third Escape is not consumed: the host's close may run.
    let handled = chain.dispatch(KeyInput::plain(Key::Escape), &mut announcer);
    assert!(!handled);
    assert!(!chain.take_input_block());
}

#[test]
fn test_backspace_retreats_search_one_character() {
    let panel = Rc::new(RefCell::new(market_panel()));
    let mut chain = DispatchChain::new();
    chain.register_overlay(Rc::clone(&panel));

    let mut announcer = RecordingAnnouncer::default();
    panel.borrow_mut().open(&mut announcer);
    press(&mut chain, &mut announcer, Key::Right);

    press(&mut chain, &mut announcer, Key::Char('w'));
    press(&mut chain, &mut announcer, Key::Char('o'));
    assert_eq!(announcer.current(), Some("Wood, 2 of 3"));

    press(&mut chain, &mut announcer, Key::Backspace);
    assert_eq!(announcer.current(), Some("Wheat, 1 of 3"));
    press(&mut chain, &mut announcer, Key::Backspace);
    assert_eq!(announcer.current(), Some("Search cleared"));

    // With no buffer left, Backspace is not this panel's key.
    let handled = chain.dispatch(KeyInput::plain(Key::Backspace), &mut announcer);
    assert!(!handled);
}

#[test]
fn test_global_band_runs_before_open_overlays() {
    let panel = Rc::new(RefCell::new(market_panel()));
    let pressed = Rc::new(Cell::new(false));
    let fallback_keys = Rc::new(RefCell::new(Vec::new()));

    let mut chain = DispatchChain::new();
    chain.register_overlay(Rc::clone(&panel));
    // Registered after the overlay, but the global band dispatches first.
    chain.register_global(QuitHotkey {
        pressed: Rc::clone(&pressed),
    });
    chain.register_fallback(FallbackLog {
        keys: Rc::clone(&fallback_keys),
    });

    let mut announcer = RecordingAnnouncer::default();
    panel.borrow_mut().open(&mut announcer);

    assert!(chain.dispatch(KeyInput::ctrl(Key::Char('q')), &mut announcer));
    assert!(pressed.get());

    // Plain keys pass the global handler and stop at the open panel.
    press(&mut chain, &mut announcer, Key::Right);
    assert_eq!(announcer.current(), Some("Wheat, 1 of 3"));
    assert!(fallback_keys.borrow().is_empty());

    // A closed panel reports inactive and the key reaches the fallback.
    panel.borrow_mut().close();
    press(&mut chain, &mut announcer, Key::Right);
    assert_eq!(*fallback_keys.borrow(), vec![Key::Right]);
}

#[test]
fn test_sub_panel_suspends_parent_until_resume() {
    let parent = Rc::new(RefCell::new(ListPanel::new(
        PanelConfig::new("Routes").announce_position(true),
        ShelfSource {
            categories: vec!["Active"],
            items: vec![vec!["Salt run", "Timber run"]],
            activation: Activation::SubPanel("detail".to_string()),
        },
    )));
    let detail = Rc::new(RefCell::new(ListPanel::new(
        PanelConfig::new("Details").announce_position(false),
        ShelfSource {
            categories: vec!["Fields"],
            items: vec![vec!["Good", "Destination"]],
            activation: Activation::Done("read".to_string()),
        },
    )));

    let mut chain = DispatchChain::new();
    chain.register_overlay(Rc::clone(&detail));
    chain.register_overlay(Rc::clone(&parent));

    let mut announcer = RecordingAnnouncer::default();
    parent.borrow_mut().open(&mut announcer);
    press(&mut chain, &mut announcer, Key::Right);
    press(&mut chain, &mut announcer, Key::Down);
    assert_eq!(announcer.current(), Some("Timber run, 2 of 2"));

    // Activating requests the sub-panel silently; its open will speak.
    let spoken_before = announcer.transcript.len();
    press(&mut chain, &mut announcer, Key::Enter);
    assert_eq!(announcer.transcript.len(), spoken_before);
    assert!(parent.borrow().is_suspended());
    assert_eq!(
        parent.borrow_mut().take_sub_request().as_deref(),
        Some("detail")
    );

    detail.borrow_mut().open(&mut announcer);
    assert_eq!(announcer.current(), Some("Details. Fields"));

    // Keys route to the sub-panel; the suspended parent never sees them.
    press(&mut chain, &mut announcer, Key::Right);
    assert_eq!(announcer.current(), Some("Good"));
    assert_eq!(parent.borrow().index(herald::panel::Tier::Item), 1);

    // Closing the sub-panel and resuming restores the parent's position.
    detail.borrow_mut().close();
    parent.borrow_mut().resume(&mut announcer);
    assert_eq!(announcer.current(), Some("Timber run, 2 of 2"));
    press(&mut chain, &mut announcer, Key::Up);
    assert_eq!(announcer.current(), Some("Salt run, 1 of 2"));
}

#[test]
fn test_cross_category_flow_names_the_boundary() {
    let panel = Rc::new(RefCell::new(ListPanel::new(
        PanelConfig::new("Build")
            .item_flow(ItemFlow::CrossCategory)
            .announce_position(false),
        ShelfSource {
            categories: vec!["Farms", "Empty", "Town"],
            items: vec![vec!["Wheat Farm", "Hop Farm"], vec![], vec!["Chapel"]],
            activation: Activation::Done("built".to_string()),
        },
    )));
    let mut chain = DispatchChain::new();
    chain.register_overlay(Rc::clone(&panel));

    let mut announcer = RecordingAnnouncer::default();
    panel.borrow_mut().open(&mut announcer);
    press(&mut chain, &mut announcer, Key::Right);
    press(&mut chain, &mut announcer, Key::Down);
    assert_eq!(announcer.current(), Some("Hop Farm"));

    // Walking off the edge skips the empty category and names the landing.
    press(&mut chain, &mut announcer, Key::Down);
    assert_eq!(announcer.current(), Some("Town. Chapel"));
    press(&mut chain, &mut announcer, Key::Down);
    assert_eq!(announcer.current(), Some("Farms. Wheat Farm"));

    // And backwards, landing on the last item of the previous category.
    press(&mut chain, &mut announcer, Key::Up);
    assert_eq!(announcer.current(), Some("Town. Chapel"));
    press(&mut chain, &mut announcer, Key::Up);
    assert_eq!(announcer.current(), Some("Farms. Hop Farm"));
}

#[test]
fn test_activation_outcomes_carry_cues() {
    let done = Rc::new(RefCell::new(market_panel()));
    let mut chain = DispatchChain::new();
    chain.register_overlay(Rc::clone(&done));

    let mut announcer = RecordingAnnouncer::default();
    done.borrow_mut().open(&mut announcer);
    press(&mut chain, &mut announcer, Key::Right);
    press(&mut chain, &mut announcer, Key::Enter);
    assert_eq!(announcer.current(), Some("Sold"));
    assert_eq!(announcer.cues, vec![Cue::Activate]);

    let denied = Rc::new(RefCell::new(ListPanel::new(
        PanelConfig::new("Market").announce_position(true),
        ShelfSource {
            categories: vec!["Goods"],
            items: vec![vec!["Wheat"]],
            activation: Activation::Denied("Not enough gold".to_string()),
        },
    )));
    let mut chain = DispatchChain::new();
    chain.register_overlay(Rc::clone(&denied));

    let mut announcer = RecordingAnnouncer::default();
    denied.borrow_mut().open(&mut announcer);
    press(&mut chain, &mut announcer, Key::Right);
    press(&mut chain, &mut announcer, Key::Enter);
    assert_eq!(announcer.current(), Some("Not enough gold"));
    assert_eq!(announcer.cues, vec![Cue::Deny]);
    // Denied keeps the cursor in place.
    assert_eq!(denied.borrow().view().cursor, 0);
}
