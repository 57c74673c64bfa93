use crate::input::Key;

/// Keys that discard an in-progress search before they are handled.
/// Escape and Backspace are deliberately absent: both operate on the
/// buffer itself inside the panel engine.
pub const DEFAULT_NAV_KEYS: &[Key] = &[
    Key::Up,
    Key::Down,
    Key::Left,
    Key::Right,
    Key::Home,
    Key::End,
    Key::Enter,
    Key::NumpadEnter,
];

/// Incremental type-ahead search: letter presses accumulate into a
/// case-folded prefix buffer, and matching is a full first-match rescan of
/// the caller's collection on every mutation. Collections in this domain
/// top out at a few hundred entries, so no index is kept.
#[derive(Clone, Debug, Default)]
pub struct TypeAhead {
    buffer: String,
}

impl TypeAhead {
    pub fn add_char(&mut self, ch: char) {
        for lower in ch.to_lowercase() {
            self.buffer.push(lower);
        }
    }

    /// Pops the last character; returns whether the buffer was non-empty
    /// before the call.
    pub fn remove_char(&mut self) -> bool {
        self.buffer.pop().is_some()
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    /// Discard the buffer when a structural navigation key arrives, so a
    /// stale search never survives an arrow or jump. Call before handling
    /// the key itself.
    pub fn clear_on_navigation(&mut self, key: Key, nav_keys: &[Key]) {
        if nav_keys.contains(&key) {
            self.buffer.clear();
        }
    }

    pub fn has_buffer(&self) -> bool {
        !self.buffer.is_empty()
    }

    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    /// First item whose projected name starts with the buffer,
    /// case-insensitive. An empty buffer never matches. First match wins,
    /// in the caller's collection order.
    pub fn find_match<'a, T, F>(&self, items: &'a [T], name_of: F) -> Option<usize>
    where
        F: Fn(&'a T) -> &'a str,
    {
        if self.buffer.is_empty() {
            return None;
        }
        items
            .iter()
            .position(|item| name_of(item).to_lowercase().starts_with(&self.buffer))
    }
}
