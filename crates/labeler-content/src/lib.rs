//! Format detection and field updates for KiCad design files
//!
//! Everything here is string-in/string-out: callers read and write files,
//! updaters return `Ok(None)` when the stored values already match and
//! `Ok(Some(new_source))` when a write is needed.

pub mod diagnose;
pub mod error;
pub mod format;
pub mod project;
pub mod schematic;
pub mod sexpr;

pub use error::{Error, Result};
pub use format::Format;
pub use project::ProjectFields;
pub use schematic::TitleBlockFields;
