//! The project labeling tool (`kicad-pro-label`).

use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;
use colored::Colorize;

use labeler_content::Format;
use labeler_content::project::{ProjectFields, update_json, update_sexpr};
use labeler_git::{GitSource, resolve};

use crate::error::{CliError, Result};
use crate::{diagnose, schematic};

/// Sync git revision metadata into a KiCad project file
///
/// Reads the repository containing the project, derives a version string
/// from the latest tag, and stores VERSION, BUILD_DATE, STATUS and BRANCH
/// as project text variables. Schematic sheets next to the project get
/// their title blocks stamped too, unless --project-only is given.
///
/// In your PCB silkscreen, add a text item containing ${VERSION} and
/// KiCad substitutes the stored value.
#[derive(Parser, Debug)]
#[command(name = "kicad-pro-label")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// KiCad project file (.kicad_pro)
    pub project: PathBuf,

    /// Show what would be changed without modifying files
    #[arg(long)]
    pub dry_run: bool,

    /// Only update the project file, not its schematics
    #[arg(long)]
    pub project_only: bool,

    /// Show the variables currently stored in the project file
    #[arg(long)]
    pub diagnose: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

/// Parse arguments, run, and map the outcome to an exit code.
pub fn main() -> i32 {
    let cli = Cli::parse();
    crate::init_tracing(cli.verbose);
    match run(&cli) {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            1
        }
    }
}

pub fn run(cli: &Cli) -> Result<()> {
    if !cli.project.exists() {
        return Err(CliError::user(format!(
            "{} does not exist",
            cli.project.display()
        )));
    }
    if cli.project.extension().and_then(|e| e.to_str()) != Some("kicad_pro") {
        return Err(CliError::user(format!(
            "{} is not a .kicad_pro file",
            cli.project.display()
        )));
    }

    if cli.diagnose {
        diagnose::project(&cli.project)?;
        return Ok(());
    }

    update_project(&cli.project, cli.dry_run)?;

    if cli.project_only {
        return Ok(());
    }
    label_sibling_schematics(&cli.project, cli.dry_run)
}

fn update_project(project: &Path, dry_run: bool) -> Result<()> {
    let repo_dir = parent_dir(project);
    let source = GitSource::discover(repo_dir)?;
    let info = resolve(&source, None)?;
    let fields = ProjectFields {
        version: info.version(),
        build_date: info.build_date(),
        status: info.status().to_string(),
        branch: info.branch.clone(),
    };

    let content = fs::read_to_string(project)?;
    let updated = match Format::from_content(&content) {
        Format::Json => update_json(&content, &fields)?,
        Format::Sexpr => update_sexpr(&content, &fields)?,
    };

    match updated {
        None => println!("No changes needed for {}", project.display()),
        Some(new_content) => {
            if dry_run {
                println!("Would update {}:", project.display());
            } else {
                fs::write(project, new_content)?;
                println!("{} Updated {}:", "✓".green().bold(), project.display());
            }
            println!("  VERSION: {}", fields.version);
            println!("  BUILD_DATE: {}", fields.build_date);
            println!("  STATUS: {}", fields.status);
            println!("  BRANCH: {}", fields.branch);
        }
    }
    Ok(())
}

/// Stamp every `*.kicad_sch` sitting next to the project file.
fn label_sibling_schematics(project: &Path, dry_run: bool) -> Result<()> {
    let dir = parent_dir(project);
    let mut sheets: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.extension().and_then(|e| e.to_str()) == Some("kicad_sch"))
        .collect();
    sheets.sort();

    let mut failed = false;
    for sheet in &sheets {
        if let Err(e) = schematic::label_file(sheet, dry_run) {
            eprintln!("{}: {}: {}", "error".red().bold(), sheet.display(), e);
            failed = true;
        }
    }
    if failed {
        return Err(CliError::user("one or more schematic updates failed"));
    }
    Ok(())
}

fn parent_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}
