use serde::{Deserialize, Serialize};
use std::fmt;
use std::io;
use std::path::PathBuf;
use std::str::FromStr;

/// Fixed set of catalog categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    GettingStarted,
    Journalism,
    ContentCreation,
    Marketing,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::GettingStarted,
        Category::Journalism,
        Category::ContentCreation,
        Category::Marketing,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            Category::GettingStarted => "getting-started",
            Category::Journalism => "journalism",
            Category::ContentCreation => "content-creation",
            Category::Marketing => "marketing",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Category::GettingStarted => "Getting Started",
            Category::Journalism => "Journalism Basics",
            Category::ContentCreation => "Content Creation",
            Category::Marketing => "Marketing & PR",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Category {
    type Err = io::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.id().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                io::Error::new(
                    io::ErrorKind::InvalidInput,
                    format!("Unknown category: {s}"),
                )
            })
    }
}

/// A tutorial in the catalog. Only `id`, `category`, `title`,
/// `description` and `tags` take part in filtering; the rest is carried
/// through for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub category: Category,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default)]
    pub instructor: Option<String>,
    #[serde(default)]
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub views: Option<u32>,
    #[serde(default)]
    pub rating: Option<f32>,
    #[serde(default)]
    pub reviews: Option<u32>,
}

/// Where a percent sits on the not started / in progress / completed scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressStatus {
    NotStarted,
    InProgress(u8),
    Completed,
}

impl ProgressStatus {
    pub fn from_percent(percent: u8) -> Self {
        match percent {
            0 => ProgressStatus::NotStarted,
            100..=u8::MAX => ProgressStatus::Completed,
            p => ProgressStatus::InProgress(p),
        }
    }

    pub fn label(&self) -> String {
        match self {
            ProgressStatus::NotStarted => "Not started".to_string(),
            ProgressStatus::InProgress(p) => format!("{p}% Complete"),
            ProgressStatus::Completed => "Completed".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct DataPath {
    pub root: PathBuf,
}

impl DataPath {
    pub fn new(data_path: Option<PathBuf>) -> io::Result<Self> {
        let root = match data_path {
            Some(path) => path,
            None => dirs::home_dir()
                .ok_or_else(|| {
                    io::Error::new(
                        io::ErrorKind::NotFound,
                        "Home directory not found. Please specify --data-path.",
                    )
                })?
                .join(".tutortrack"),
        };

        Ok(Self { root })
    }

    pub fn config_path(&self) -> PathBuf {
        self.root.join("config.toml")
    }

    pub fn catalog_path(&self) -> PathBuf {
        self.root.join("catalog.toml")
    }

    /// Directory holding the persisted progress and bookmark documents.
    pub fn storage_dir(&self) -> PathBuf {
        self.root.join("storage")
    }
}

pub fn validate_item_id(id: &str) -> io::Result<()> {
    if id.trim().is_empty() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "Item id cannot be empty",
        ));
    }

    if id.len() > 255 {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "Item id too long (max 255 characters)",
        ));
    }

    Ok(())
}
