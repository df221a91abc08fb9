use crate::config::{Config, DEFAULT_CONFIG_NAME};
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Minimum number of top-level sections
    #[arg(long)]
    pub min_sections: Option<usize>,

    /// Depth ceiling for outlines (0 = top-level only)
    #[arg(long)]
    pub max_depth: Option<usize>,

    /// Force overwrite existing config
    #[arg(short, long)]
    pub force: bool,
}

pub fn init(args: InitArgs, cwd: &str) -> Result<()> {
    let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);

    // Check if config already exists
    if config_path.exists() && !args.force {
        println!(
            "{} {} already exists",
            "warning:".yellow(),
            DEFAULT_CONFIG_NAME.bright_white()
        );
        println!("Use --force to overwrite");
        return Ok(());
    }

    let defaults = Config::default();
    let config = Config {
        min_sections: args.min_sections.unwrap_or(defaults.min_sections),
        max_sub_sections_per_section: args
            .max_depth
            .unwrap_or(defaults.max_sub_sections_per_section),
        ..defaults
    };

    fs::write(&config_path, serde_json::to_string_pretty(&config)? + "\n")?;
    println!("  {} Created {}", "✓".green(), DEFAULT_CONFIG_NAME);

    Ok(())
}
