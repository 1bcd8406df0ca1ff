use crate::core::models::{Category, Item};
use crate::core::progress::ProgressView;
use log::debug;

/// What the category control is pointing at: a real category or one of the
/// pseudo-categories derived from progress state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategorySelector {
    #[default]
    All,
    Bookmarked,
    InProgress,
    Completed,
    Category(Category),
}

impl CategorySelector {
    /// Unrecognised selectors fall back to `All` so stale UI state still
    /// produces a listing.
    pub fn parse(raw: &str) -> Self {
        let selector = raw.trim().to_ascii_lowercase();
        match selector.as_str() {
            "" | "all" => CategorySelector::All,
            "bookmarked" => CategorySelector::Bookmarked,
            "in-progress" => CategorySelector::InProgress,
            "completed" => CategorySelector::Completed,
            other => match other.parse::<Category>() {
                Ok(category) => CategorySelector::Category(category),
                Err(_) => {
                    debug!("Unknown category selector '{other}', showing all items");
                    CategorySelector::All
                }
            },
        }
    }

    fn matches(&self, item: &Item, progress: &impl ProgressView) -> bool {
        match self {
            CategorySelector::All => true,
            CategorySelector::Bookmarked => progress.is_bookmarked(&item.id),
            CategorySelector::InProgress => progress.is_in_progress(&item.id),
            CategorySelector::Completed => progress.is_completed(&item.id),
            CategorySelector::Category(category) => item.category == *category,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct FilterSelection {
    pub category: CategorySelector,
    pub search_query: String,
}

impl FilterSelection {
    pub fn new(category: CategorySelector, search_query: impl Into<String>) -> Self {
        Self {
            category,
            search_query: search_query.into(),
        }
    }
}

/// Items passing both the category and the search predicate, in catalog
/// order.
pub fn filter_items<'a>(
    items: &'a [Item],
    progress: &impl ProgressView,
    selection: &FilterSelection,
) -> Vec<&'a Item> {
    let query = selection.search_query.trim().to_lowercase();

    items
        .iter()
        .filter(|item| selection.category.matches(item, progress))
        .filter(|item| query.is_empty() || matches_search(item, &query))
        .collect()
}

/// `query` must already be lowercased.
fn matches_search(item: &Item, query: &str) -> bool {
    item.title.to_lowercase().contains(query)
        || item.description.to_lowercase().contains(query)
        || item.tags.iter().any(|tag| tag.to_lowercase().contains(query))
}
