//! Repository state queries for KiCad Labeler
//!
//! Answers the handful of questions version labeling needs (latest tag,
//! commits since that tag, branch, last commit date, dirty status) through
//! an injectable query interface.

pub mod error;
pub mod revision;
pub mod source;

pub use error::{Error, Result};
pub use revision::{RevisionInfo, resolve, resolve_at};
pub use source::{GitSource, RevisionSource};
