//! `poised init` command - create and initialize the project database

use console::style;
use miette::{miette, Result};

use crate::cli::helpers::database_path;
use crate::cli::GlobalOpts;
use crate::core::ProjectStore;

#[derive(clap::Args, Debug)]
pub struct InitArgs {}

pub fn run(_args: InitArgs, global: &GlobalOpts) -> Result<()> {
    let path = database_path(global);
    let existed = path.exists();

    let store = ProjectStore::open(&path).map_err(|e| miette!("{}", e))?;

    if !global.quiet {
        if existed {
            println!(
                "{} Database already initialized at {}",
                style("✓").green(),
                store.path().display()
            );
        } else {
            println!(
                "{} Initialized project database at {}",
                style("✓").green(),
                store.path().display()
            );
        }
    }
    Ok(())
}
