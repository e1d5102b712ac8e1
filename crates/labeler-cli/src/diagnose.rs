//! Diagnostic output: what the files currently store.

use std::fs;
use std::path::Path;

use colored::Colorize;

use labeler_content::diagnose::{ProjectReport, inspect_project, inspect_schematic};

use crate::error::Result;

/// Print the variables stored in a project file. Read-only; malformed
/// content is reported as a notice, not a failure.
pub fn project(path: &Path) -> Result<()> {
    let content = fs::read_to_string(path)?;

    println!();
    println!("=== Analyzing {} ===", path.display());

    let report = inspect_project(&content);
    match &report {
        ProjectReport::JsonVariables(_)
        | ProjectReport::JsonMissingVariables
        | ProjectReport::JsonInvalid(_) => println!("Format: JSON (KiCad 9+)"),
        ProjectReport::SexprVariables(_) | ProjectReport::SexprMissingVariables => {
            println!("Format: S-expression (KiCad 6-8)")
        }
    }
    println!();

    match report {
        ProjectReport::JsonVariables(vars) => {
            println!("{} Text variables found:", "✓".green());
            for (key, value) in vars {
                println!("  ${{{key}}}: \"{value}\"");
            }
        }
        ProjectReport::JsonMissingVariables => {
            println!("{} No text_variables in JSON", "⚠".yellow());
        }
        ProjectReport::JsonInvalid(e) => {
            println!("{} Invalid JSON: {e}", "⚠".yellow());
        }
        ProjectReport::SexprVariables(raw) => {
            println!("{} Text variables found:", "✓".green());
            println!("{raw}");
        }
        ProjectReport::SexprMissingVariables => {
            println!("{} No text_variables section found", "⚠".yellow());
        }
    }
    Ok(())
}

/// Print a schematic's title block, its field breakdown, and the first
/// few properties stored anywhere in the file.
pub fn schematic(path: &Path) -> Result<()> {
    let content = fs::read_to_string(path)?;

    println!();
    println!("=== Analyzing {} ===", path.display());

    let report = inspect_schematic(&content);
    match report.title_block {
        Some(raw) => {
            println!("{} Title block found:", "✓".green());
            println!("{raw}");
            println!();
            println!("Fields:");
            for (key, value) in &report.fields {
                match value {
                    Some(value) => println!("  {key}: \"{value}\""),
                    None => println!("  {key}"),
                }
            }
        }
        None => {
            println!("{} No title_block section found", "⚠".yellow());
        }
    }

    if !report.properties.is_empty() {
        println!();
        println!("Properties:");
        for (name, value) in &report.properties {
            println!("  \"{name}\" = \"{value}\"");
        }
    }
    Ok(())
}
