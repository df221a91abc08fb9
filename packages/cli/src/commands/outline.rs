use crate::commands::print_diagnostics;
use crate::config::Config;
use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use reportcraft_editor::ProjectDocument;
use reportcraft_linter::lint_project;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct OutlineArgs {
    /// Project JSON file
    pub project: PathBuf,

    /// Output format (text, json)
    #[arg(short, long, default_value = "text")]
    pub format: String,

    /// Also run the outline lint rules
    #[arg(short, long)]
    pub lint: bool,
}

pub fn outline(args: OutlineArgs, config: &Config, verbose: bool) -> Result<()> {
    let document = ProjectDocument::load(&args.project)
        .with_context(|| format!("Failed to load project {}", args.project.display()))?;
    let rows = document.numbered_outline();

    if args.format == "json" {
        println!("{}", serde_json::to_string_pretty(&rows)?);
    } else {
        println!("{}", document.project().title.bold());
        let indent = config.indent_string();
        for row in &rows {
            println!(
                "{}{} {}",
                indent.repeat(row.depth),
                row.numbering.dimmed(),
                row.name
            );
        }
    }

    if args.lint {
        let diagnostics = lint_project(document.project());
        if args.format == "json" {
            println!("{}", serde_json::to_string_pretty(&diagnostics)?);
        } else {
            println!();
            print_diagnostics(&diagnostics, verbose);
        }
    }

    Ok(())
}
