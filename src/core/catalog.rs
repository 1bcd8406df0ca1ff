use crate::core::models::{Category, DataPath, Item, validate_item_id};
use log::info;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::io;

/// Ordered, read-only list of tutorials. Order is the display order and is
/// never changed by filtering.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    items: Vec<Item>,
}

#[derive(Debug, Serialize, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    items: Vec<Item>,
}

/// One entry of the category sidebar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryCount {
    pub id: &'static str,
    pub name: &'static str,
    pub count: usize,
}

impl Catalog {
    pub fn new(items: Vec<Item>) -> io::Result<Self> {
        let mut seen = HashSet::new();
        for item in &items {
            validate_item_id(&item.id)?;
            if !seen.insert(item.id.as_str()) {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidData,
                    format!("Duplicate item id in catalog: {}", item.id),
                ));
            }
        }
        Ok(Self { items })
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn get(&self, id: &str) -> Option<&Item> {
        self.items.iter().find(|item| item.id == id)
    }

    /// `all` followed by every fixed category, counted from the items.
    pub fn category_counts(&self) -> Vec<CategoryCount> {
        let mut counts = vec![CategoryCount {
            id: "all",
            name: "All Videos",
            count: self.items.len(),
        }];
        counts.extend(Category::ALL.iter().map(|category| CategoryCount {
            id: category.id(),
            name: category.display_name(),
            count: self
                .items
                .iter()
                .filter(|item| item.category == *category)
                .count(),
        }));
        counts
    }
}

pub struct CatalogService;

impl CatalogService {
    /// Reads `catalog.toml` from the data directory, falling back to the
    /// built-in tutorials when the file does not exist.
    pub fn load_catalog(data_path: &DataPath) -> io::Result<Catalog> {
        let catalog_path = data_path.catalog_path();
        if !catalog_path.exists() {
            return Ok(Self::builtin());
        }

        let content = fs::read_to_string(&catalog_path)?;
        let file: CatalogFile = toml::from_str(&content).map_err(|e| {
            io::Error::new(
                io::ErrorKind::InvalidData,
                format!("Invalid catalog format: {e}"),
            )
        })?;

        info!(
            "Loaded {} catalog items from {}",
            file.items.len(),
            catalog_path.display()
        );
        Catalog::new(file.items)
    }

    pub fn builtin() -> Catalog {
        let items = vec![
            video(
                "1",
                "Introduction to News Marketplace",
                "Learn the basics of navigating and using the News Marketplace platform effectively.",
                Category::GettingStarted,
                &["platform", "basics", "onboarding"],
                ("12:34", "Sarah Johnson", 1234, 4.8, 45),
            ),
            video(
                "2",
                "Creating Compelling News Articles",
                "Master the art of writing engaging and informative news articles that capture attention.",
                Category::Journalism,
                &["writing", "articles", "journalism"],
                ("18:22", "Michael Chen", 892, 4.6, 32),
            ),
            video(
                "3",
                "Video Content Production Guide",
                "Complete guide to producing professional video content for news and media.",
                Category::ContentCreation,
                &["video", "production", "media"],
                ("25:15", "Emily Rodriguez", 567, 4.9, 28),
            ),
            video(
                "4",
                "PR Strategy and Media Relations",
                "Learn effective PR strategies and build strong relationships with media professionals.",
                Category::Marketing,
                &["pr", "media relations", "strategy"],
                ("20:48", "David Thompson", 445, 4.7, 19),
            ),
            video(
                "5",
                "Platform Features Overview",
                "Explore all the features and tools available on the News Marketplace platform.",
                Category::GettingStarted,
                &["platform", "features", "tools"],
                ("15:30", "Sarah Johnson", 678, 4.5, 24),
            ),
            video(
                "6",
                "Investigative Journalism Techniques",
                "Advanced techniques for conducting thorough investigative journalism.",
                Category::Journalism,
                &["investigation", "journalism", "ethics"],
                ("30:12", "Michael Chen", 334, 4.9, 15),
            ),
        ];
        Catalog { items }
    }
}

fn video(
    id: &str,
    title: &str,
    description: &str,
    category: Category,
    tags: &[&str],
    (duration, instructor, views, rating, reviews): (&str, &str, u32, f32, u32),
) -> Item {
    Item {
        id: id.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        category,
        tags: tags.iter().map(|t| t.to_string()).collect(),
        duration: Some(duration.to_string()),
        instructor: Some(instructor.to_string()),
        thumbnail: None,
        views: Some(views),
        rating: Some(rating),
        reviews: Some(reviews),
    }
}
