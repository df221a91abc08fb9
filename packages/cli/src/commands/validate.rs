use crate::commands::{print_diagnostics, read_input};
use crate::config::Config;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use reportcraft_linter::{
    lint_outline, validate_outline_value, DiagnosticLevel, LintContext, LintOptions,
};
use reportcraft_parser::ast::materialize_forest;
use reportcraft_parser::IDGenerator;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Candidate outline JSON ("-" for stdin)
    pub input: PathBuf,

    /// Depth ceiling (defaults to the config value)
    #[arg(long)]
    pub max_depth: Option<usize>,

    /// Output format (text, json)
    #[arg(short, long, default_value = "text")]
    pub format: String,
}

pub fn validate(args: ValidateArgs, config: &Config, verbose: bool) -> Result<()> {
    let source = read_input(&args.input)?;
    let value: serde_json::Value = serde_json::from_str(&source)?;
    let max_depth = args.max_depth.unwrap_or(config.max_sub_sections_per_section);

    let candidates = match validate_outline_value(&value, Some(max_depth)) {
        Ok(candidates) => candidates,
        Err(violation) => {
            if args.format == "json" {
                println!("{}", serde_json::to_string_pretty(&violation)?);
            } else {
                println!("{} {}", "✗".red(), args.input.display());
                println!("  {} [{}] {}", "error".red().bold(), violation.rule, violation.message);
            }
            return Err(anyhow::anyhow!("Outline rejected ({})", violation.rule));
        }
    };

    if candidates.is_empty() {
        println!("{} No outline provided", "warning:".yellow());
        return Ok(());
    }

    let forest = materialize_forest(&candidates, &mut IDGenerator::fresh());
    let diagnostics = lint_outline(
        &forest,
        LintOptions {
            registry: None,
            context: LintContext {
                min_sections: config.min_sections,
            },
        },
    );

    if args.format == "json" {
        println!("{}", serde_json::to_string_pretty(&diagnostics)?);
        return Ok(());
    }

    println!("{} {}", "✓".green(), args.input.display());
    print_diagnostics(&diagnostics, verbose);

    let warnings = diagnostics
        .iter()
        .filter(|d| matches!(d.level, DiagnosticLevel::Warning))
        .count();
    if warnings == 0 {
        println!("   {} No issues found!", "✓".green());
    } else {
        println!("   {} {}", "Warnings:".yellow(), warnings);
    }

    Ok(())
}
