//! Flat listing of every changeset in the resolved tree.

use crate::ChangetreeContext;
use crate::changelog::resolver::Resolver;
use crate::output;
use anyhow::Result;
use colored::Colorize;
use std::path::Path;

/// Execute the changesets command: resolve the tree and list extracted
/// changesets with the script each one came from.
///
/// # Errors
///
/// Returns an error if the root cannot be determined or any changelog or
/// script in the tree fails to load.
pub fn execute(ctx: &ChangetreeContext, changelog: Option<&Path>) -> Result<()> {
    let root = ctx.root_changelog_path(changelog)?;
    let log = Resolver::new().resolve(&root)?;

    let scripts = log.script_includes();
    let mut total = 0usize;
    for include in &scripts {
        for changeset in &include.changesets {
            println!("{} {}", include.file.dimmed(), changeset);
            total += 1;
        }
    }

    if total == 0 {
        output::info("No changesets found");
    } else {
        output::info(&format!(
            "{} changesets across {} scripts",
            total,
            scripts.len()
        ));
    }

    Ok(())
}
