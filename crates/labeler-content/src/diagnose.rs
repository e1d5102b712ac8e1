//! Read-only inspection of stored variables and title-block fields.
//!
//! Inspection never mutates and never fails: malformed input is reported
//! as part of the result. Rendering is left to the caller.

use serde_json::Value;

use crate::format::Format;
use crate::project::TEXT_VARIABLES;
use crate::schematic::TITLE_BLOCK;
use crate::sexpr;

/// What a project file currently stores.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectReport {
    /// `text_variables` entries of a JSON project, in stored order.
    JsonVariables(Vec<(String, String)>),
    /// JSON project with no `text_variables` map.
    JsonMissingVariables,
    /// The parse error text for a file that claimed to be JSON.
    JsonInvalid(String),
    /// Raw text of the matched `(text_variables ...)` block.
    SexprVariables(String),
    /// S-expression project with no `(text_variables ...)` block.
    SexprMissingVariables,
}

/// Inspect a project file in either format.
pub fn inspect_project(source: &str) -> ProjectReport {
    match Format::from_content(source) {
        Format::Json => match serde_json::from_str::<Value>(source) {
            Ok(document) => match document.get(TEXT_VARIABLES).and_then(Value::as_object) {
                Some(vars) => ProjectReport::JsonVariables(
                    vars.iter()
                        .map(|(key, value)| (key.clone(), display_value(value)))
                        .collect(),
                ),
                None => ProjectReport::JsonMissingVariables,
            },
            Err(e) => ProjectReport::JsonInvalid(e.to_string()),
        },
        Format::Sexpr => match sexpr::find_block(source, TEXT_VARIABLES) {
            Some(block) => ProjectReport::SexprVariables(source[block.span].to_string()),
            None => ProjectReport::SexprMissingVariables,
        },
    }
}

/// What a schematic's title block and properties currently store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchematicReport {
    /// Raw text of the first `(title_block ...)` block, if any.
    pub title_block: Option<String>,
    /// Key/value breakdown of the title block's direct children.
    pub fields: Vec<(String, Option<String>)>,
    /// Up to [`MAX_PROPERTIES`] `(property "name" "value")` pairs found
    /// anywhere in the file.
    pub properties: Vec<(String, String)>,
}

/// Cap on reported `(property ...)` pairs.
pub const MAX_PROPERTIES: usize = 5;

/// Inspect a schematic file.
pub fn inspect_schematic(source: &str) -> SchematicReport {
    let (title_block, fields) = match sexpr::find_block(source, TITLE_BLOCK) {
        Some(block) => {
            let fields = sexpr::entries(source, &block)
                .into_iter()
                .map(|entry| (entry.key, entry.value))
                .collect();
            (Some(source[block.span].to_string()), fields)
        }
        None => (None, Vec::new()),
    };

    let properties = sexpr::find_blocks(source, "property")
        .into_iter()
        .filter_map(|block| {
            let mut args = sexpr::quoted_args(source, &block).into_iter();
            Some((args.next()?, args.next()?))
        })
        .take(MAX_PROPERTIES)
        .collect();

    SchematicReport {
        title_block,
        fields,
        properties,
    }
}

fn display_value(value: &Value) -> String {
    match value.as_str() {
        Some(s) => s.to_string(),
        None => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn json_variables_keep_stored_order() {
        let source = r#"{
  "text_variables": {
    "VERSION": "v1.0.0",
    "BRANCH": "main",
    "AUTHOR": "me"
  }
}"#;
        let ProjectReport::JsonVariables(vars) = inspect_project(source) else {
            panic!("expected variables");
        };
        let keys: Vec<_> = vars.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, ["VERSION", "BRANCH", "AUTHOR"]);
    }

    #[test]
    fn json_without_variables_is_reported() {
        assert_eq!(
            inspect_project(r#"{"meta": {}}"#),
            ProjectReport::JsonMissingVariables
        );
    }

    #[test]
    fn invalid_json_is_reported_not_fatal() {
        assert!(matches!(
            inspect_project("{ not json"),
            ProjectReport::JsonInvalid(_)
        ));
    }

    #[test]
    fn sexpr_report_carries_the_raw_block() {
        let source = "(kicad_pro\n  (text_variables\n    (VERSION \"v1\")\n  )\n)";
        let ProjectReport::SexprVariables(raw) = inspect_project(source) else {
            panic!("expected raw block");
        };
        assert_eq!(raw, "(text_variables\n    (VERSION \"v1\")\n  )");
    }

    #[test]
    fn schematic_report_breaks_down_title_block_and_properties() {
        let source = r#"(kicad_sch
  (title_block
    (title "CPU board")
    (rev "v1.2.0")
    (date "2024-01-15")
    (comment 1 "draft")
  )
  (symbol
    (property "Reference" "R1" (at 0 0 0))
    (property "Value" "10k")
  )
)"#;
        let report = inspect_schematic(source);
        assert!(report.title_block.unwrap().starts_with("(title_block"));
        assert_eq!(
            report.fields,
            vec![
                ("title".to_string(), Some("CPU board".to_string())),
                ("rev".to_string(), Some("v1.2.0".to_string())),
                ("date".to_string(), Some("2024-01-15".to_string())),
                ("comment".to_string(), Some("draft".to_string())),
            ]
        );
        assert_eq!(
            report.properties,
            vec![
                ("Reference".to_string(), "R1".to_string()),
                ("Value".to_string(), "10k".to_string()),
            ]
        );
    }

    #[test]
    fn schematic_without_title_block_reports_none() {
        let report = inspect_schematic("(kicad_sch (junk))");
        assert_eq!(report.title_block, None);
        assert!(report.fields.is_empty());
    }
}
