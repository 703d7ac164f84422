use anyhow::{Context, Result};

use crate::context::AppContext;

pub fn path(ctx: &AppContext) {
    println!("{}", ctx.config_service.config_path().display());
}

/// Prints the configuration in effect, defaults filled in.
pub fn show(ctx: &AppContext) -> Result<()> {
    let rendered = toml::to_string_pretty(&ctx.config).context("Failed to render config")?;
    print!("{}", rendered);
    Ok(())
}
