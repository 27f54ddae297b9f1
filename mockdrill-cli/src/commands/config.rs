use crate::config::{ConfigLoader, MockdrillConfig};
use anyhow::Result;
use clap::{Args, Subcommand};
use std::path::Path;

#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show current configuration (merged)
    Show,
    /// Show configuration file paths
    Path,
    /// Write a default project config file
    Init,
}

pub fn run(args: ConfigArgs) -> Result<()> {
    match args.command {
        ConfigCommands::Show => show_config(),
        ConfigCommands::Path => show_paths(),
        ConfigCommands::Init => init_config(),
    }
}

fn show_config() -> Result<()> {
    let config = ConfigLoader::load()?;
    let toml_str = toml::to_string_pretty(&config)?;
    println!("{}", toml_str);
    Ok(())
}

fn show_paths() -> Result<()> {
    println!("User config:    {:?}", ConfigLoader::user_config_path());
    println!("Project config: {:?}", ConfigLoader::project_config_path());
    Ok(())
}

fn init_config() -> Result<()> {
    let path = ConfigLoader::project_config_path();
    init_at(&path)?;
    println!("Wrote {}", path.display());
    Ok(())
}

/// Write a default config at `path`, refusing to clobber an existing file
fn init_at(path: &Path) -> Result<()> {
    if path.exists() {
        anyhow::bail!("config file already exists at {}", path.display());
    }
    ConfigLoader::save_to_path(&MockdrillConfig::default(), path)
}
