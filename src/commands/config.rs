//! Get and set configuration values.

use crate::ChangetreeContext;
use crate::output;
use anyhow::Result;
use colored::Colorize;

/// Execute the config command to get/set configuration values.
///
/// # Errors
///
/// Returns an error if:
/// - Failed to set or unset a configuration value
/// - Failed to save the configuration
pub fn execute(
    ctx: &mut ChangetreeContext,
    key: Option<&str>,
    value: Option<String>,
    unset: bool,
    list: bool,
) -> Result<()> {
    // If --list flag is set or no key is provided, show all configuration
    if list || key.is_none() {
        show_all_config(ctx);
        return Ok(());
    }

    let key =
        key.ok_or_else(|| anyhow::anyhow!("Key must be provided when not using --list flag"))?;

    if unset {
        ctx.config.unset(key)?;
        ctx.config.save(&ctx.config_path)?;
        output::success(&format!("Unset {key}"));
    } else if let Some(val) = value {
        ctx.config.set(key, val.clone())?;
        ctx.config.save(&ctx.config_path)?;
        output::success(&format!("Set {key} = {val}"));
    } else if let Some(val) = ctx.config.get(key) {
        println!("{val}");
    } else {
        output::warning(&format!("Configuration key '{key}' is not set"));
    }

    Ok(())
}

/// Show all configuration values
fn show_all_config(ctx: &ChangetreeContext) {
    println!("{}", "[core]".bold());
    println!("  base_dir = {}", ctx.config.core.base_dir.display());
    println!("  root_changelog = {}", ctx.config.core.root_changelog);

    println!("\n{}", "[output]".bold());
    println!("  indent_step = {}", ctx.config.output.indent_step);
}
