mod cli;
mod core;
#[cfg(test)]
mod test_fixtures;

use clap::Parser;
use crate::cli::{Cli, Commands};
use crate::core::models::DataPath;
use std::io;

fn main() -> io::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let data_path = DataPath::new(cli.data_path)?;

    match &cli.command {
        Commands::List { category, search } => {
            cli::handle_list_command(&data_path, category, search)
        }
        Commands::Show { id } => cli::handle_show_command(&data_path, id),
        Commands::Progress { id, percent } => {
            cli::handle_progress_command(&data_path, id, percent)
        }
        Commands::Advance { id, delta } => cli::handle_advance_command(&data_path, id, delta),
        Commands::Bookmark { id } => cli::handle_bookmark_command(&data_path, id),
        Commands::Reset { id } => cli::handle_reset_command(&data_path, id),
        Commands::Stats { category } => cli::handle_stats_command(&data_path, category),
        Commands::Summary => cli::handle_summary_command(&data_path),
        Commands::Categories => cli::handle_categories_command(&data_path),
        Commands::Config { command } => cli::handle_config_command(&data_path, command),
    }
}
