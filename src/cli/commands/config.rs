//! Configuration command implementations

use crate::cli::{ConfigCommands, Output, OutputFormat};
use crate::config::Settings;
use anyhow::{Context, Result};

/// Execute config commands
pub fn execute(cmd: ConfigCommands, settings: &Settings, format: OutputFormat, output: &Output) -> Result<()> {
    match cmd {
        ConfigCommands::Show => show(settings, format, output),
    }
}

fn show(settings: &Settings, format: OutputFormat, output: &Output) -> Result<()> {
    if format == OutputFormat::Json {
        output.raw(&serde_json::to_string_pretty(settings)?);
        return Ok(());
    }

    let rendered = toml::to_string_pretty(settings).context("Failed to render configuration")?;

    output.header("⚙️  Current Configuration");
    output.raw(rendered.trim_end());
    output.blank_line();
    output.key_value(
        "Effective concurrency hint:",
        &settings.reduce.concurrency_hint().to_string(),
        false,
    );

    Ok(())
}
