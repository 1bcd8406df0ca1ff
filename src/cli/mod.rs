use crate::core::{
    catalog::{Catalog, CatalogService},
    config::{CONFIG_KEYS, Config, ConfigService},
    filter::{CategorySelector, FilterSelection, filter_items},
    models::{Category, DataPath, Item},
    progress::{PersistenceStatus, ProgressStore, ProgressView, parse_percent},
    stats::{StatsScope, category_stats, overall_completion_rate, progress_summary},
    storage::FileStorage,
};
use clap::{Parser, Subcommand};
use log::{error, info, warn};
use std::io;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "tutortrack")]
#[command(about = "Track progress and bookmarks across video tutorials.", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Sets a custom data path
    #[arg(long, value_name = "DIR")]
    pub data_path: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List tutorials, optionally filtered
    List {
        /// A category, or one of: all, bookmarked, in-progress, completed
        #[arg(long)]
        category: Option<String>,
        /// Case-insensitive text matched against title, description and tags
        #[arg(long)]
        search: Option<String>,
    },
    /// Show one tutorial with its progress
    Show {
        /// The tutorial id
        id: String,
    },
    /// Set watch progress in percent
    Progress {
        /// The tutorial id
        id: String,
        /// Percent watched (clamped to 0-100)
        #[arg(allow_hyphen_values = true)]
        percent: String,
    },
    /// Add to watch progress (defaults to the configured increment)
    Advance {
        /// The tutorial id
        id: String,
        /// Percent to add; may be negative
        #[arg(allow_hyphen_values = true)]
        delta: Option<String>,
    },
    /// Toggle a bookmark
    Bookmark {
        /// The tutorial id
        id: String,
    },
    /// Forget progress and bookmark for a tutorial
    Reset {
        /// The tutorial id
        id: String,
    },
    /// Completion statistics for a category (or all)
    Stats {
        /// Category id; omit for all tutorials
        category: Option<String>,
    },
    /// Overall completion, bookmarks and in-progress count
    Summary,
    /// List categories with their tutorial counts
    Categories,
    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Get a configuration value
    Get {
        /// The key to get
        key: String,
    },
    /// Set a configuration value
    Set {
        /// The key to set
        key: String,
        /// The value to set
        value: String,
    },
}

/// Everything a command needs, opened once per invocation.
pub struct Session {
    pub config: Config,
    pub catalog: Catalog,
    pub store: ProgressStore<FileStorage>,
}

impl Session {
    pub fn open(data_path: &DataPath) -> io::Result<Self> {
        let config = ConfigService::load_config(data_path)?;
        let catalog = CatalogService::load_catalog(data_path)?;
        let store = ProgressStore::open(
            FileStorage::new(data_path.storage_dir()),
            config.storage_keys(),
        );

        Ok(Self {
            config,
            catalog,
            store,
        })
    }

    fn require_item(&self, id: &str) -> io::Result<&Item> {
        self.catalog.get(id).ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("No tutorial with id '{id}'"),
            )
        })
    }

    fn warn_if_unsaved(&self) {
        if let PersistenceStatus::WriteFailed(reason) = self.store.persistence_status() {
            warn!("Progress not persisted: {reason}");
            eprintln!("Warning: changes could not be saved ({reason}).");
        }
    }
}

fn format_item_line(item: &Item, progress: &impl ProgressView) -> String {
    let marker = if progress.is_bookmarked(&item.id) {
        "*"
    } else {
        " "
    };
    format!(
        "{marker} [{}] {} ({}) - {}",
        item.id,
        item.title,
        item.category.display_name(),
        progress.status(&item.id).label()
    )
}

pub fn handle_list_command(
    data_path: &DataPath,
    category: &Option<String>,
    search: &Option<String>,
) -> io::Result<()> {
    let session = Session::open(data_path)?;
    let selector = category
        .as_deref()
        .map(CategorySelector::parse)
        .unwrap_or_default();
    let selection = FilterSelection::new(selector, search.clone().unwrap_or_default());
    let items = filter_items(session.catalog.items(), &session.store, &selection);

    if items.is_empty() {
        println!("No videos found matching your criteria.");
        return Ok(());
    }

    println!("Videos ({}):", items.len());
    println!("{}", "=".repeat(20));
    for item in items {
        println!("{}", format_item_line(item, &session.store));
    }

    Ok(())
}

pub fn handle_show_command(data_path: &DataPath, id: &str) -> io::Result<()> {
    let session = Session::open(data_path)?;
    let item = session.require_item(id)?;

    println!("{}", item.title);
    println!("{}", "=".repeat(item.title.chars().count()));
    if !item.description.is_empty() {
        println!("{}", item.description);
    }
    println!("Category: {}", item.category.display_name());
    if !item.tags.is_empty() {
        println!("Tags: {}", item.tags.join(", "));
    }
    if let Some(instructor) = &item.instructor {
        println!("Instructor: {instructor}");
    }
    if let Some(duration) = &item.duration {
        println!("Duration: {duration}");
    }
    println!("Progress: {}", session.store.status(id).label());
    println!(
        "Bookmarked: {}",
        if session.store.is_bookmarked(id) { "yes" } else { "no" }
    );

    Ok(())
}

pub fn handle_progress_command(data_path: &DataPath, id: &str, percent: &str) -> io::Result<()> {
    let mut session = Session::open(data_path)?;
    session.require_item(id)?;

    let percent = parse_percent(percent)?;
    let stored = session.store.set_progress(id, percent)?;
    session.warn_if_unsaved();

    println!("Progress for '{id}' set to {stored}%.");
    Ok(())
}

pub fn handle_advance_command(
    data_path: &DataPath,
    id: &str,
    delta: &Option<String>,
) -> io::Result<()> {
    let mut session = Session::open(data_path)?;
    session.require_item(id)?;

    let delta = match delta {
        Some(raw) => parse_percent(raw)?,
        None => f64::from(session.config.default_increment),
    };
    let stored = session.store.increment_progress(id, delta)?;
    session.warn_if_unsaved();

    println!("Progress for '{id}' is now {stored}%.");
    Ok(())
}

pub fn handle_bookmark_command(data_path: &DataPath, id: &str) -> io::Result<()> {
    let mut session = Session::open(data_path)?;
    session.require_item(id)?;

    let bookmarked = session.store.toggle_bookmark(id)?;
    session.warn_if_unsaved();

    if bookmarked {
        println!("Bookmarked '{id}'.");
    } else {
        println!("Removed bookmark for '{id}'.");
    }
    Ok(())
}

pub fn handle_reset_command(data_path: &DataPath, id: &str) -> io::Result<()> {
    let mut session = Session::open(data_path)?;

    session.store.reset(id)?;
    session.warn_if_unsaved();

    println!("Reset '{id}'.");
    Ok(())
}

pub fn handle_stats_command(data_path: &DataPath, category: &Option<String>) -> io::Result<()> {
    let session = Session::open(data_path)?;

    let (scope, label) = match category.as_deref().map(str::trim) {
        None => (StatsScope::All, "All Videos"),
        Some(raw) if raw.eq_ignore_ascii_case("all") => (StatsScope::All, "All Videos"),
        Some(raw) => {
            let category: Category = raw.parse()?;
            (StatsScope::Category(category), category.display_name())
        }
    };
    let stats = category_stats(session.catalog.items(), &session.store, scope);

    println!("{label}");
    println!("Completed: {}/{}", stats.completed, stats.total);
    println!("In progress: {}", stats.in_progress);
    println!("Completion rate: {}%", stats.completion_rate);
    if scope != StatsScope::All {
        println!(
            "Overall completion: {}%",
            overall_completion_rate(session.catalog.items(), &session.store)
        );
    }
    Ok(())
}

pub fn handle_summary_command(data_path: &DataPath) -> io::Result<()> {
    let session = Session::open(data_path)?;
    let summary = progress_summary(session.catalog.items(), &session.store);

    println!("Your Progress");
    println!("=============");
    println!("Overall Completion: {}%", summary.overall_completion);
    println!("Bookmarked Videos: {}", summary.bookmarked_count);
    println!("In Progress: {}", summary.in_progress_count);
    Ok(())
}

pub fn handle_categories_command(data_path: &DataPath) -> io::Result<()> {
    let catalog = CatalogService::load_catalog(data_path)?;

    for category in catalog.category_counts() {
        println!("{} - {} ({})", category.id, category.name, category.count);
    }
    Ok(())
}

pub fn handle_config_command(
    data_path: &DataPath,
    command: &Option<ConfigCommands>,
) -> io::Result<()> {
    match command {
        Some(ConfigCommands::Get { key }) => {
            let config = ConfigService::load_config(data_path)?;
            match config.get(key) {
                Some(value) => {
                    println!("{key}: {value}");
                    println!("Config file: {}", data_path.config_path().display());
                }
                None => println!("Unknown key: {key}"),
            }
        }
        Some(ConfigCommands::Set { key, value }) => {
            let mut config = ConfigService::load_config(data_path)?;
            if let Err(e) = config.set(key, value) {
                error!("Rejected configuration change for {key}: {e}");
                return Err(e);
            }
            ConfigService::save_config(&config, data_path)?;
            info!("Updated {key} configuration");
            println!("{key} set to: {value}");
            println!("Config file: {}", data_path.config_path().display());
        }
        None => {
            let config = ConfigService::load_config(data_path)?;
            println!("Current Configuration:");
            println!("======================");
            for key in CONFIG_KEYS {
                if let Some(value) = config.get(key) {
                    println!("{key}: {value}");
                }
            }
            println!();
            println!("Config file: {}", data_path.config_path().display());
        }
    }
    Ok(())
}
