use crate::core::models::{Category, Item};
use crate::core::progress::ProgressView;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatsScope {
    #[default]
    All,
    Category(Category),
}

impl StatsScope {
    fn includes(&self, item: &Item) -> bool {
        match self {
            StatsScope::All => true,
            StatsScope::Category(category) => item.category == *category,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CategoryStats {
    pub completed: usize,
    pub in_progress: usize,
    pub total: usize,
    /// Percent of `total` that is completed, rounded half-up.
    pub completion_rate: u8,
}

/// Figures for the "your progress" panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ProgressSummary {
    pub overall_completion: u8,
    pub bookmarked_count: usize,
    pub in_progress_count: usize,
}

pub fn category_stats(
    items: &[Item],
    progress: &impl ProgressView,
    scope: StatsScope,
) -> CategoryStats {
    let mut stats = CategoryStats::default();

    for item in items.iter().filter(|item| scope.includes(item)) {
        stats.total += 1;
        if progress.is_completed(&item.id) {
            stats.completed += 1;
        } else if progress.is_in_progress(&item.id) {
            stats.in_progress += 1;
        }
    }

    stats.completion_rate = completion_rate(stats.completed, stats.total);
    stats
}

pub fn overall_completion_rate(items: &[Item], progress: &impl ProgressView) -> u8 {
    category_stats(items, progress, StatsScope::All).completion_rate
}

/// Bookmarks pointing at items no longer in the catalog are not counted.
pub fn progress_summary(items: &[Item], progress: &impl ProgressView) -> ProgressSummary {
    let overall = category_stats(items, progress, StatsScope::All);
    ProgressSummary {
        overall_completion: overall.completion_rate,
        bookmarked_count: items
            .iter()
            .filter(|item| progress.is_bookmarked(&item.id))
            .count(),
        in_progress_count: overall.in_progress,
    }
}

fn completion_rate(completed: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    // round(completed / total * 100) with halves rounded up, in integers
    let rate = (completed * 200 + total) / (total * 2);
    rate.min(100) as u8
}
