//! Title-block updates for KiCad schematic files.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::sexpr;

pub(crate) const TITLE_BLOCK: &str = "title_block";
const TITLE_KEY: &str = "title";
const REV_KEY: &str = "rev";
const DATE_KEY: &str = "date";

/// Values synchronized into a schematic's title block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TitleBlockFields {
    pub rev: String,
    pub date: String,
}

/// Update `(rev ...)` and `(date ...)` in the first `(title_block ...)`.
///
/// Existing values are replaced in place. A missing `(rev ...)` entry is
/// inserted after the `(title ...)` entry (or at the top of the block when
/// there is no title); a missing `(date ...)` entry is inserted after the
/// `(rev ...)` entry. A schematic with no title block is an error.
pub fn update_title_block(source: &str, fields: &TitleBlockFields) -> Result<Option<String>> {
    if sexpr::find_block(source, TITLE_BLOCK).is_none() {
        return Err(Error::BlockNotFound {
            name: TITLE_BLOCK.to_string(),
        });
    }

    let text = set_field(source.to_string(), REV_KEY, &fields.rev, TITLE_KEY);
    let text = set_field(text, DATE_KEY, &fields.date, REV_KEY);
    Ok(if text == source { None } else { Some(text) })
}

fn set_field(source: String, key: &str, value: &str, after: &str) -> String {
    // The block exists; spans are re-located after each splice.
    let Some(block) = sexpr::find_block(&source, TITLE_BLOCK) else {
        return source;
    };
    let entries = sexpr::entries(&source, &block);
    match entries.iter().find(|e| e.key == key) {
        Some(entry) => match &entry.value_span {
            Some(span) => {
                if entry.value.as_deref() == Some(value) {
                    source
                } else {
                    sexpr::splice(&source, span.clone(), &format!("\"{value}\""))
                }
            }
            None => sexpr::splice(&source, entry.span.clone(), &format!("({key} \"{value}\")")),
        },
        None => {
            let at = match entries.iter().find(|e| e.key == after) {
                Some(anchor) => anchor.span.end,
                None => block.inner.start,
            };
            sexpr::splice(&source, at..at, &format!("\n    ({key} \"{value}\")"))
        }
    }
}
