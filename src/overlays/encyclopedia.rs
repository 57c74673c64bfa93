use std::cell::RefCell;
use std::rc::Rc;

use rust_i18n::t;

use crate::gamedata::GameData;
use crate::panel::{Activation, Entry, ListPanel, PanelConfig, PanelSource};

/// Three-tier overlay: categories, articles, then the article's sections
/// read one at a time.
pub struct EncyclopediaSource {
    data: Rc<RefCell<GameData>>,
}

impl EncyclopediaSource {
    fn category_name(&self, category: usize) -> Option<String> {
        self.data
            .borrow()
            .article_categories()
            .get(category)
            .cloned()
    }
}

impl PanelSource for EncyclopediaSource {
    fn categories(&mut self) -> Vec<Entry> {
        self.data
            .borrow()
            .article_categories()
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
            .articles_in(&name)
            .into_iter()
            .map(|article| Entry::new(article.title.as_str()))
            .collect()
    }

    fn content(&mut self, category: usize, item: usize) -> Vec<String> {
        let Some(name) = self.category_name(category) else {
            return Vec::new();
        };
        self.data
            .borrow()
            .articles_in(&name)
            .get(item)
            .map(|article| article.sections.clone())
            .unwrap_or_default()
    }

    fn activate(&mut self, category: usize, item: usize) -> Activation {
        // Only reachable for an article without sections.
        let title = self
            .category_name(category)
            .and_then(|name| {
                self.data
                    .borrow()
                    .articles_in(&name)
                    .get(item)
                    .map(|article| article.title.clone())
            })
            .unwrap_or_default();
        Activation::Denied(t!("ency.no_content", title = title).into_owned())
    }
}

pub fn encyclopedia_panel(
    data: &Rc<RefCell<GameData>>,
    announce_position: bool,
) -> ListPanel<EncyclopediaSource> {
    ListPanel::new(
        PanelConfig::new(t!("ency.panel_name")).announce_position(announce_position),
        EncyclopediaSource {
            data: Rc::clone(data),
        },
    )
}
