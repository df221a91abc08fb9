use crate::commands::read_input;
use crate::config::Config;
use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use reportcraft_editor::{Mutation, ProjectDocument};
use reportcraft_parser::ast::{Forest, Project};
use reportcraft_parser::{IDGenerator, OutlineParser, Serializer};
use std::path::{Path, PathBuf};

#[derive(Args, Debug)]
pub struct ParseArgs {
    /// Text outline file ("-" for stdin)
    pub input: PathBuf,

    /// Output format (text, json)
    #[arg(short, long, default_value = "text")]
    pub format: String,

    /// Write the parsed outline into this project file (created if missing)
    #[arg(short, long)]
    pub save: Option<PathBuf>,

    /// Title for a newly created project file
    #[arg(long, default_value = "Untitled report")]
    pub title: String,
}

pub fn parse(args: ParseArgs, config: &Config) -> Result<()> {
    let text = read_input(&args.input)?;
    let parser = OutlineParser::new(&text);
    tracing::debug!(
        "indent unit {:?}, {} marker-only line(s) skipped",
        parser.indent_unit(),
        parser.skipped()
    );

    let forest = parser.parse(&mut IDGenerator::fresh());
    if forest.is_empty() {
        println!("{} No sections found in {}", "warning:".yellow(), args.input.display());
        return Ok(());
    }

    match args.format.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&forest)?),
        _ => print!("{}", Serializer::with_indent(&config.indent_string()).serialize(&forest)),
    }

    if let Some(path) = &args.save {
        save_into_project(path, forest, &args.title, config)?;
        println!("  {} Saved outline to {}", "✓".green(), path.display());
    }

    Ok(())
}

fn save_into_project(path: &Path, forest: Forest, title: &str, config: &Config) -> Result<()> {
    let mut document = if path.exists() {
        ProjectDocument::load(path)
            .with_context(|| format!("Failed to load project {}", path.display()))?
    } else {
        let mut project = Project::new(title);
        project.min_sections = config.min_sections;
        project.max_sub_sections_per_section = config.max_sub_sections_per_section;
        ProjectDocument::with_history_limit(project, config.history_limit)
    };

    document.apply(Mutation::ReplaceOutline { sections: forest })?;
    document.save_as(path)?;
    Ok(())
}
