//! Version command implementation

use crate::cli::Output;
use crate::parallel::hardware_concurrency;
use anyhow::Result;

/// Execute the version command
pub fn execute(output: &Output) -> Result<()> {
    let version = env!("CARGO_PKG_VERSION");
    let name = env!("CARGO_PKG_NAME");
    let description = env!("CARGO_PKG_DESCRIPTION");
    let authors = env!("CARGO_PKG_AUTHORS");
    let repository = env!("CARGO_PKG_REPOSITORY");

    output.header("🚀 threadkeep Version Information");
    output.key_value("Version:", &format!("{} v{}", name, version), true);

    output.category("About");
    output.key_value("Description:", description, false);
    output.key_value("Authors:", authors, false);
    output.key_value("Repository:", repository, false);

    output.category("Build Information");
    output.key_value("Rust edition:", "2024", false);
    output.key_value("Target:", std::env::consts::ARCH, false);
    output.key_value("Profile:", if cfg!(debug_assertions) { "debug" } else { "release" }, false);
    output.key_value("Hardware threads:", &hardware_concurrency().to_string(), false);

    output.blank_line();
    output.success("💡 Run 'threadkeep --help' for usage information");

    Ok(())
}
