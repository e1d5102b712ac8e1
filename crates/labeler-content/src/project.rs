//! Text-variable updates for KiCad project files.
//!
//! Both variants return `Ok(None)` when the stored values already match,
//! so a second run against unchanged repository state never rewrites the
//! file.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{Error, Result};
use crate::sexpr;

/// Variable names written into the project's text-variable store.
pub const VERSION_VAR: &str = "VERSION";
pub const BUILD_DATE_VAR: &str = "BUILD_DATE";
pub const STATUS_VAR: &str = "STATUS";
pub const BRANCH_VAR: &str = "BRANCH";

pub(crate) const TEXT_VARIABLES: &str = "text_variables";
const PROJECT_HEADER: &str = "kicad_pro";

/// Values synchronized into a project file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectFields {
    pub version: String,
    pub build_date: String,
    pub status: String,
    pub branch: String,
}

impl ProjectFields {
    fn entries(&self) -> [(&'static str, &str); 4] {
        [
            (VERSION_VAR, &self.version),
            (BUILD_DATE_VAR, &self.build_date),
            (STATUS_VAR, &self.status),
            (BRANCH_VAR, &self.branch),
        ]
    }
}

/// Update the `text_variables` map of a JSON project document.
///
/// The map is created when missing. Unrelated keys and their order pass
/// through; the document is re-rendered with 2-space indentation and a
/// trailing newline.
pub fn update_json(source: &str, fields: &ProjectFields) -> Result<Option<String>> {
    let mut document: Value = serde_json::from_str(source)?;
    let root = document.as_object_mut().ok_or(Error::RootNotObject)?;
    let vars = root
        .entry(TEXT_VARIABLES)
        .or_insert_with(|| Value::Object(Map::new()))
        .as_object_mut()
        .ok_or(Error::VariablesNotObject)?;

    let changed = fields
        .entries()
        .iter()
        .any(|(key, want)| vars.get(*key).and_then(Value::as_str) != Some(*want));
    if !changed {
        return Ok(None);
    }

    for (key, want) in fields.entries() {
        vars.insert(key.to_string(), Value::String(want.to_string()));
    }

    tracing::debug!("text variables changed; re-rendering document");
    let mut rendered = serde_json::to_string_pretty(&document)?;
    rendered.push('\n');
    Ok(Some(rendered))
}

/// Update the `(text_variables ...)` block of an S-expression project.
///
/// Existing `(VERSION ...)` and `(BUILD_DATE ...)` values are replaced in
/// place; missing entries are appended before the block's closing
/// parenthesis; a missing block is synthesized after the first line of
/// the `(kicad_pro` header. All other bytes are untouched.
pub fn update_sexpr(source: &str, fields: &ProjectFields) -> Result<Option<String>> {
    let updated = if sexpr::find_block(source, TEXT_VARIABLES).is_some() {
        let text = set_variable(source.to_string(), VERSION_VAR, &fields.version);
        set_variable(text, BUILD_DATE_VAR, &fields.build_date)
    } else {
        synthesize_block(source, fields)?
    };
    Ok(if updated == source { None } else { Some(updated) })
}

fn set_variable(source: String, key: &str, value: &str) -> String {
    // The block exists; spans are re-located after each splice.
    let Some(block) = sexpr::find_block(&source, TEXT_VARIABLES) else {
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
            // Entry exists but carries no quoted value; rewrite it whole.
            None => sexpr::splice(&source, entry.span.clone(), &format!("({key} \"{value}\")")),
        },
        None => {
            let at = sexpr::append_point(&source, &block);
            sexpr::splice(&source, at..at, &format!("\n    ({key} \"{value}\")"))
        }
    }
}

fn synthesize_block(source: &str, fields: &ProjectFields) -> Result<String> {
    let header = sexpr::find_block(source, PROJECT_HEADER).ok_or_else(|| Error::AnchorNotFound {
        anchor: PROJECT_HEADER.to_string(),
        block: TEXT_VARIABLES.to_string(),
    })?;

    // Insert after the header's first line; a single-line header takes
    // the block just before its closing parenthesis instead.
    let (at, lead) = match source[header.span.clone()].find('\n') {
        Some(offset) => (header.span.start + offset + 1, ""),
        None => (header.inner.end, "\n"),
    };
    let block = format!(
        "{lead}  ({TEXT_VARIABLES}\n    ({VERSION_VAR} \"{}\")\n    ({BUILD_DATE_VAR} \"{}\")\n  )\n",
        fields.version, fields.build_date
    );
    Ok(sexpr::splice(source, at..at, &block))
}
