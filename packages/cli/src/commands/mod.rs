pub mod init;
pub mod outline;
pub mod parse;
pub mod validate;

pub use init::{init, InitArgs};
pub use outline::{outline, OutlineArgs};
pub use parse::{parse, ParseArgs};
pub use validate::{validate, ValidateArgs};

use anyhow::{Context, Result};
use colored::Colorize;
use reportcraft_linter::{Diagnostic, DiagnosticLevel};
use std::io::Read;
use std::path::Path;

/// Read a file, or stdin when the path is `-`
pub(crate) fn read_input(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read stdin")?;
        return Ok(buffer);
    }

    std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

/// Print diagnostics in text form; info-level ones only when verbose
pub(crate) fn print_diagnostics(diagnostics: &[Diagnostic], verbose: bool) {
    for diagnostic in diagnostics {
        let level_str = match diagnostic.level {
            DiagnosticLevel::Warning => "warning".yellow().bold(),
            DiagnosticLevel::Info => "info".blue().bold(),
        };

        if !verbose && matches!(diagnostic.level, DiagnosticLevel::Info) {
            continue;
        }

        println!("  {} [{}] {}", level_str, diagnostic.rule, diagnostic.message);

        if let Some(suggestion) = &diagnostic.suggestion {
            println!("    {} {}", "hint:".dimmed(), suggestion.dimmed());
        }
    }
}
