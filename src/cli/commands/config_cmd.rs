//! config command - Get, set, or list configuration values

use anyhow::{bail, Context as _, Result};

use crate::cli::Context;
use crate::core::config::{Config, SvgDefaults};
use crate::ui::output;

/// Get a configuration value.
pub fn get(ctx: &Context, key: &str) -> Result<()> {
    let value = match key {
        "default-keep-ratio" => ctx
            .config
            .global
            .default_keep_ratio
            .map(|v| v.to_string()),
        "interactive" => ctx.config.global.interactive.map(|v| v.to_string()),
        "svg.width" => ctx
            .config
            .global
            .svg
            .as_ref()
            .and_then(|s| s.width)
            .map(|v| v.to_string()),
        "svg.height" => ctx
            .config
            .global
            .svg
            .as_ref()
            .and_then(|s| s.height)
            .map(|v| v.to_string()),
        _ => bail!("unknown configuration key: {}", key),
    };

    match value {
        // Key exists but has no value - exit silently
        None => Ok(()),
        Some(value) => {
            println!("{}", value);
            Ok(())
        }
    }
}

/// Set a configuration value in the user config file.
pub fn set(ctx: &Context, key: &str, value: &str) -> Result<()> {
    let mut global = ctx.config.global.clone();

    match key {
        "default-keep-ratio" => {
            let ratio: f64 = value
                .parse()
                .with_context(|| format!("invalid number '{}'", value))?;
            global.default_keep_ratio = Some(ratio);
        }
        "interactive" => {
            let flag: bool = value
                .parse()
                .with_context(|| format!("expected 'true' or 'false', got '{}'", value))?;
            global.interactive = Some(flag);
        }
        "svg.width" | "svg.height" => {
            let size: u32 = value
                .parse()
                .with_context(|| format!("invalid size '{}'", value))?;
            let svg = global.svg.get_or_insert_with(SvgDefaults::default);
            if key == "svg.width" {
                svg.width = Some(size);
            } else {
                svg.height = Some(size);
            }
        }
        _ => bail!("unknown configuration key: {}", key),
    }

    global.validate()?;
    let path = Config::write(&global).context("failed to write config")?;

    output::print(
        format!("set {} = {} in {}", key, value, path.display()),
        ctx.verbosity(),
    );
    Ok(())
}

/// List all configuration values.
pub fn list(ctx: &Context) -> Result<()> {
    println!("# Linlab Configuration");
    println!("default-keep-ratio = {}", ctx.config.keep_ratio());
    let (width, height) = ctx.config.svg_size();
    println!("svg.width = {}", width);
    println!("svg.height = {}", height);
    match ctx.config.interactive() {
        Some(flag) => println!("interactive = {}", flag),
        None => println!("interactive = (not set)"),
    }
    Ok(())
}
