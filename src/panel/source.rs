/// One navigable row: a display name (used by type-ahead) plus an optional
/// spoken summary appended after the name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Entry {
    pub name: String,
    pub summary: Option<String>,
}

impl Entry {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            summary: None,
        }
    }

    pub fn with_summary(name: impl Into<String>, summary: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            summary: Some(summary.into()),
        }
    }

    pub fn spoken(&self) -> String {
        match &self.summary {
            Some(summary) => format!("{}, {}", self.name, summary),
            None => self.name.clone(),
        }
    }
}

/// Result of activating a leaf item.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Activation {
    /// Action succeeded; spoken with the activate cue, then the panel
    /// refreshes its data snapshot.
    Done(String),
    /// Action rejected; spoken with the deny cue, state unchanged.
    Denied(String),
    /// Request to open the named sub-panel. The panel suspends itself and
    /// the host opens the sub-panel, which supplies the spoken line.
    SubPanel(String),
}

/// The data-provider boundary. Providers are re-queried on every open and
/// refresh; the engine never caches across refreshes and never assumes
/// identity is stable between them.
///
/// Methods are infallible by contract: a provider that cannot produce data
/// (host mid-transition, decode failure) returns an empty collection, and
/// the engine degrades to an explicit empty announcement.
pub trait PanelSource {
    fn categories(&mut self) -> Vec<Entry>;

    fn items(&mut self, category: usize) -> Vec<Entry>;

    /// Content sections for three-tier panels. Two-tier panels keep the
    /// default empty result and their items activate instead.
    fn content(&mut self, _category: usize, _item: usize) -> Vec<String> {
        Vec::new()
    }

    fn activate(&mut self, category: usize, item: usize) -> Activation;

    /// Plus/Minus hook. Return the line to announce, or None when the item
    /// has nothing adjustable (the key then falls through the chain).
    fn adjust(&mut self, _category: usize, _item: usize, _delta: i64) -> Option<String> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spoken_joins_name_and_summary() {
        let entry = Entry::with_summary("Wheat", "12 gold");
        assert_eq!(entry.spoken(), "Wheat, 12 gold");
        assert_eq!(Entry::new("Wood").spoken(), "Wood");
    }
}
