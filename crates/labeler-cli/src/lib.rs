//! Command-line tools for stamping git revision metadata into KiCad files
//!
//! Two binaries share this crate: `kicad-pro-label` for project files and
//! `kicad-sch-label` for schematic sheets.

pub mod diagnose;
pub mod error;
pub mod project;
pub mod schematic;

pub use error::{CliError, Result};

use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// Install a debug-level subscriber when verbose output is requested.
pub fn init_tracing(verbose: bool) {
    if !verbose {
        return;
    }
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::DEBUG)
        .with_target(true)
        .finish();
    if tracing::subscriber::set_global_default(subscriber).is_ok() {
        tracing::debug!("Verbose mode enabled");
    }
}
