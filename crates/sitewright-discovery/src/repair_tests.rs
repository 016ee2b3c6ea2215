use super::*;

const OBJECT: &str = r#"{"actions": [{"name": "open_inbox", "description": "Open the inbox", "steps": ["Click inbox"]}]}"#;

fn parsed(raw: &str) -> serde_json::Value {
    let text = repair_to_json_text(raw).unwrap();
    serde_json::from_str(text).unwrap()
}

#[test]
fn test_bare_object_passes_through() {
    assert_eq!(repair_to_json_text(OBJECT).unwrap(), OBJECT);
}

#[test]
fn test_surrounding_whitespace_trimmed() {
    let raw = format!("\n\n  {OBJECT}  \n");
    assert_eq!(repair_to_json_text(&raw).unwrap(), OBJECT);
}

#[test]
fn test_json_fence_stripped() {
    let raw = format!("```json\n{OBJECT}\n```");
    assert_eq!(repair_to_json_text(&raw).unwrap(), OBJECT);
}

#[test]
fn test_untagged_fence_stripped() {
    let raw = format!("```\n{OBJECT}\n```");
    assert_eq!(repair_to_json_text(&raw).unwrap(), OBJECT);
}

#[test]
fn test_unclosed_fence_still_recovers() {
    let raw = format!("```json\n{OBJECT}");
    assert_eq!(repair_to_json_text(&raw).unwrap(), OBJECT);
}

#[test]
fn test_leading_prose_stripped() {
    let raw = format!("Here is the result: {OBJECT}");
    assert_eq!(repair_to_json_text(&raw).unwrap(), OBJECT);
}

#[test]
fn test_leading_and_trailing_prose_stripped() {
    let raw = format!("Sure! {OBJECT} Let me know if you need more.");
    assert_eq!(repair_to_json_text(&raw).unwrap(), OBJECT);
}

#[test]
fn test_all_wrappings_yield_identical_value() {
    let bare = parsed(OBJECT);
    let fenced = parsed(&format!("```json\n{OBJECT}\n```"));
    let prosed = parsed(&format!("Here is the result: {OBJECT}"));
    assert_eq!(bare, fenced);
    assert_eq!(bare, prosed);
}

#[test]
fn test_repair_is_idempotent() {
    let raw = format!("```json\n{OBJECT}\n```");
    let once = repair_to_json_text(&raw).unwrap();
    let twice = repair_to_json_text(once).unwrap();
    assert_eq!(once, twice);
}

#[test]
fn test_pure_prose_fails_with_excerpt() {
    let raw = "I explored the site but could not find any automatable actions. Sorry! \
               Perhaps try a different starting page or log in first.";
    let err = repair_to_json_text(raw).unwrap_err();
    let RepairError::NoJsonObject { excerpt } = err;
    assert!(raw.starts_with(&excerpt));
    assert!(excerpt.len() <= 100);
    assert!(excerpt.starts_with("I explored the site"));
}

#[test]
fn test_empty_input_fails() {
    assert!(repair_to_json_text("").is_err());
    assert!(repair_to_json_text("   \n\t ").is_err());
}

#[test]
fn test_lone_brace_fails() {
    assert!(repair_to_json_text("{ unclosed").is_err());
    assert!(repair_to_json_text("closed }").is_err());
}

#[test]
fn test_minimal_object() {
    assert_eq!(repair_to_json_text("{}").unwrap(), "{}");
}
