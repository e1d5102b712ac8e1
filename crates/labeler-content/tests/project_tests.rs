//! Tests for the JSON and S-expression project updaters

use labeler_content::project::{ProjectFields, update_json, update_sexpr};
use labeler_content::Error;
use pretty_assertions::assert_eq;
use serde_json::Value;

fn fields() -> ProjectFields {
    ProjectFields {
        version: "v1.2.0.3".to_string(),
        build_date: "2024-01-15".to_string(),
        status: "clean".to_string(),
        branch: "main".to_string(),
    }
}

#[test]
fn json_sets_all_four_variables() {
    let source = r#"{
  "meta": { "filename": "board.kicad_pro" },
  "text_variables": {}
}"#;
    let updated = update_json(source, &fields()).unwrap().unwrap();

    let document: Value = serde_json::from_str(&updated).unwrap();
    let vars = document["text_variables"].as_object().unwrap();
    assert_eq!(vars["VERSION"], "v1.2.0.3");
    assert_eq!(vars["BUILD_DATE"], "2024-01-15");
    assert_eq!(vars["STATUS"], "clean");
    assert_eq!(vars["BRANCH"], "main");
    assert!(updated.ends_with('\n'));
}

#[test]
fn json_creates_the_variable_map_when_missing() {
    let source = r#"{ "meta": { "filename": "board.kicad_pro" } }"#;
    let updated = update_json(source, &fields()).unwrap().unwrap();

    let document: Value = serde_json::from_str(&updated).unwrap();
    assert_eq!(document["text_variables"]["VERSION"], "v1.2.0.3");
    assert_eq!(document["meta"]["filename"], "board.kicad_pro");
}

#[test]
fn json_preserves_unrelated_keys_and_their_order() {
    let source = r#"{
  "zeta": 1,
  "meta": { "filename": "board.kicad_pro" },
  "text_variables": { "AUTHOR": "me" },
  "alpha": 2
}"#;
    let updated = update_json(source, &fields()).unwrap().unwrap();

    let document: Value = serde_json::from_str(&updated).unwrap();
    let top_keys: Vec<_> = document.as_object().unwrap().keys().cloned().collect();
    assert_eq!(top_keys, ["zeta", "meta", "text_variables", "alpha"]);
    assert_eq!(document["text_variables"]["AUTHOR"], "me");
}

#[test]
fn json_is_a_no_op_when_values_already_match() {
    let source = r#"{
  "text_variables": {
    "VERSION": "v1.2.0.3",
    "BUILD_DATE": "2024-01-15",
    "STATUS": "clean",
    "BRANCH": "main"
  }
}"#;
    assert_eq!(update_json(source, &fields()).unwrap(), None);
}

#[test]
fn json_update_is_idempotent() {
    let source = r#"{ "text_variables": { "VERSION": "old" } }"#;
    let first = update_json(source, &fields()).unwrap().unwrap();
    assert_eq!(update_json(&first, &fields()).unwrap(), None);
}

#[test]
fn malformed_json_is_a_hard_error() {
    assert!(matches!(
        update_json("{ not json", &fields()),
        Err(Error::Json(_))
    ));
}

#[test]
fn json_array_root_is_rejected() {
    assert!(matches!(
        update_json("[1, 2]", &fields()),
        Err(Error::RootNotObject)
    ));
}

#[test]
fn json_scalar_text_variables_is_rejected() {
    assert!(matches!(
        update_json(r#"{ "text_variables": "nope" }"#, &fields()),
        Err(Error::VariablesNotObject)
    ));
}

const SEXPR_PROJECT: &str = r#"(kicad_pro
  (meta (filename "board.kicad_pro"))
  (text_variables
    (VERSION "v0.9.0")
    (BUILD_DATE "2023-12-01")
    (AUTHOR "me")
  )
  (boards)
)
"#;

#[test]
fn sexpr_replaces_values_in_place() {
    let updated = update_sexpr(SEXPR_PROJECT, &fields()).unwrap().unwrap();
    assert!(updated.contains("(VERSION \"v1.2.0.3\")"));
    assert!(updated.contains("(BUILD_DATE \"2024-01-15\")"));
    assert!(updated.contains("(AUTHOR \"me\")"));
}

#[test]
fn sexpr_preserves_every_untouched_byte() {
    let updated = update_sexpr(SEXPR_PROJECT, &fields()).unwrap().unwrap();

    // Only the two value lines may differ.
    let original: Vec<_> = SEXPR_PROJECT.lines().collect();
    let rewritten: Vec<_> = updated.lines().collect();
    assert_eq!(original.len(), rewritten.len());
    for (before, after) in original.iter().zip(&rewritten) {
        if before.contains("VERSION") || before.contains("BUILD_DATE") {
            continue;
        }
        assert_eq!(before, after);
    }
}

#[test]
fn sexpr_appends_missing_entries_inside_the_block() {
    let source = r#"(kicad_pro
  (text_variables
    (AUTHOR "me")
  )
)
"#;
    let updated = update_sexpr(source, &fields()).unwrap().unwrap();
    let expected = r#"(kicad_pro
  (text_variables
    (AUTHOR "me")
    (VERSION "v1.2.0.3")
    (BUILD_DATE "2024-01-15")
  )
)
"#;
    assert_eq!(updated, expected);
}

#[test]
fn sexpr_synthesizes_the_block_after_the_header() {
    let source = "(kicad_pro\n  (boards)\n)\n";
    let updated = update_sexpr(source, &fields()).unwrap().unwrap();
    let expected = r#"(kicad_pro
  (text_variables
    (VERSION "v1.2.0.3")
    (BUILD_DATE "2024-01-15")
  )
  (boards)
)
"#;
    assert_eq!(updated, expected);
}

#[test]
fn sexpr_without_project_header_is_an_error() {
    let err = update_sexpr("(something_else)\n", &fields()).unwrap_err();
    assert!(matches!(err, Error::AnchorNotFound { .. }));
}

#[test]
fn sexpr_update_is_idempotent() {
    let first = update_sexpr(SEXPR_PROJECT, &fields()).unwrap().unwrap();
    assert_eq!(update_sexpr(&first, &fields()).unwrap(), None);

    let synthesized = update_sexpr("(kicad_pro\n)\n", &fields()).unwrap().unwrap();
    assert_eq!(update_sexpr(&synthesized, &fields()).unwrap(), None);
}
