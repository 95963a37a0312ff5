//! Category CLI commands

use clap::Subcommand;

use crate::display::budget::format_category_list;
use crate::error::ZbbResult;
use crate::models::Catalog;

/// Category subcommands
#[derive(Subcommand)]
pub enum CategoryCommands {
    /// List all categories with their group
    List,
}

/// Handle a category command
pub fn handle_category_command(catalog: &Catalog, cmd: CategoryCommands) -> ZbbResult<()> {
    match cmd {
        CategoryCommands::List => {
            print!("{}", format_category_list(catalog));
            if !catalog.tracks_debt() {
                println!("Debt categories are hidden; enable with `zbb config --debt-tracking true`.");
            }
        }
    }

    Ok(())
}
