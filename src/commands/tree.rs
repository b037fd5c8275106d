//! Resolve the changelog tree and print it.

use crate::ChangetreeContext;
use crate::changelog::resolver::Resolver;
use crate::output::tree;
use anyhow::Result;
use std::path::Path;
use tracing::debug;

/// Execute the tree command: resolve the tree rooted at `changelog` (or
/// the configured root) and render it to stdout, indented or as JSON.
///
/// # Errors
///
/// Returns an error if the root cannot be determined or any changelog or
/// script in the tree fails to load.
pub fn execute(ctx: &ChangetreeContext, changelog: Option<&Path>, json: bool) -> Result<()> {
    let root = ctx.root_changelog_path(changelog)?;
    debug!(root = %root.display(), "resolving changelog tree");

    let log = Resolver::new().resolve(&root)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&log)?);
        return Ok(());
    }

    for line in tree::render(&log, ctx.config.output.indent_step) {
        println!("{line}");
    }

    Ok(())
}
