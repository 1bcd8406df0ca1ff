use crate::core::catalog::Catalog;
use crate::core::models::{Category, Item};
use crate::core::progress::ProgressView;
use std::collections::{HashMap, HashSet};

/// Progress snapshot with hand-picked values, for filter and stats tests.
#[derive(Debug, Default)]
pub struct FixedProgress {
    progress: HashMap<String, u8>,
    bookmarks: HashSet<String>,
}

impl FixedProgress {
    pub fn with_progress(mut self, id: &str, percent: u8) -> Self {
        self.progress.insert(id.to_string(), percent);
        self
    }

    pub fn bookmark(mut self, id: &str) -> Self {
        self.bookmarks.insert(id.to_string());
        self
    }
}

impl ProgressView for FixedProgress {
    fn progress(&self, item_id: &str) -> u8 {
        self.progress.get(item_id).copied().unwrap_or(0)
    }

    fn is_bookmarked(&self, item_id: &str) -> bool {
        self.bookmarks.contains(item_id)
    }
}

pub fn item(id: &str, title: &str, description: &str, category: Category, tags: &[&str]) -> Item {
    Item {
        id: id.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        category,
        tags: tags.iter().map(|t| t.to_string()).collect(),
        duration: None,
        instructor: None,
        thumbnail: None,
        views: None,
        rating: None,
        reviews: None,
    }
}

/// Three items: `A` and `C` in journalism, `B` in marketing.
pub fn scenario_catalog() -> Catalog {
    Catalog::new(vec![
        item(
            "A",
            "Sourcing Stories",
            "Finding and verifying sources.",
            Category::Journalism,
            &["journalism", "ethics"],
        ),
        item(
            "B",
            "Launch Campaigns",
            "Planning a product launch.",
            Category::Marketing,
            &["pr"],
        ),
        item(
            "C",
            "Investigative Journalism Techniques",
            "Long-form reporting.",
            Category::Journalism,
            &[],
        ),
    ])
    .unwrap()
}
