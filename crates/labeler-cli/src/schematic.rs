//! The schematic labeling tool (`kicad-sch-label`).

use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;
use colored::Colorize;

use labeler_content::schematic::{TitleBlockFields, update_title_block};
use labeler_git::{GitSource, resolve};

use crate::diagnose;
use crate::error::{CliError, Result};

/// Sync git revision metadata into KiCad schematic title blocks
///
/// For each sheet, derives a revision label from the latest tag (with a
/// branch suffix off main/master and a -dirty suffix for uncommitted
/// changes) and stamps the title block's rev and date fields. The date
/// follows the sheet's own last commit, or today while the sheet is
/// dirty.
#[derive(Parser, Debug)]
#[command(name = "kicad-sch-label")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Schematic files to update (.kicad_sch or .sch)
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Show what would be changed without modifying files
    #[arg(long)]
    pub dry_run: bool,

    /// Show the title block currently stored in each file
    #[arg(long)]
    pub diagnose: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

/// Parse arguments, process every file, and aggregate the exit code.
pub fn main() -> i32 {
    let cli = Cli::parse();
    crate::init_tracing(cli.verbose);

    let mut failures = 0usize;
    for file in &cli.files {
        if let Err(e) = process(file, &cli) {
            eprintln!("{}: {}: {}", "error".red().bold(), file.display(), e);
            failures += 1;
        }
    }
    if failures > 0 { 1 } else { 0 }
}

fn process(file: &Path, cli: &Cli) -> Result<()> {
    if !file.exists() {
        return Err(CliError::user("file does not exist"));
    }
    if !matches!(
        file.extension().and_then(|e| e.to_str()),
        Some("kicad_sch" | "sch")
    ) {
        eprintln!(
            "{}: {} does not look like a schematic file",
            "warning".yellow().bold(),
            file.display()
        );
    }

    if cli.diagnose {
        diagnose::schematic(file)
    } else {
        label_file(file, cli.dry_run)
    }
}

/// Stamp one schematic's title block from its repository state.
///
/// Also used by the project tool's schematic sweep.
pub fn label_file(file: &Path, dry_run: bool) -> Result<()> {
    let repo_dir = match file.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let source = GitSource::discover(repo_dir)?;
    let info = resolve(&source, Some(file))?;
    let fields = TitleBlockFields {
        rev: info.label(),
        date: info.label_date(),
    };

    let content = fs::read_to_string(file)?;
    match update_title_block(&content, &fields)? {
        None => println!("No changes needed for {}", file.display()),
        Some(updated) => {
            if dry_run {
                println!("Would update {}:", file.display());
            } else {
                fs::write(file, updated)?;
                println!("{} Updated {}:", "✓".green().bold(), file.display());
            }
            println!("  rev: {}", fields.rev);
            println!("  date: {}", fields.date);
        }
    }
    Ok(())
}
