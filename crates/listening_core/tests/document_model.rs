use listening_core::{load_document_from_str, Document};
use serde_json::json;

#[test]
fn missing_sequences_degrade_to_empty() {
    let doc = Document::from_value(&json!({
        "no list": {},
        "list not array": {"summary_list": "oops"},
        "summary without points": {"summary_list": [{"summary": "S"}]},
        "point without quotes": {"summary_list": [{"summary": "S", "points": [{"point": "P"}]}]},
        "scalar theme": 42
    }));

    assert_eq!(doc.themes.len(), 5);
    assert!(doc.themes[0].summary_list.is_empty());
    assert!(doc.themes[1].summary_list.is_empty());
    assert!(doc.themes[2].summary_list[0].points.is_empty());
    assert!(doc.themes[3].summary_list[0].points[0]
        .original_content
        .is_empty());
    assert!(doc.themes[4].summary_list.is_empty());
    assert_eq!(doc.quotation_count(), 0);
}

#[test]
fn missing_labels_become_empty_strings() {
    let doc = Document::from_value(&json!({
        "t": {"summary_list": [{"points": [{"original_content": ["q"]}]}]}
    }));
    let summary = &doc.themes[0].summary_list[0];
    assert_eq!(summary.summary, "");
    assert_eq!(summary.points[0].point, "");
    assert_eq!(summary.points[0].original_content, vec!["q".to_string()]);
}

#[test]
fn deserialize_goes_through_lenient_path() {
    let doc: Document = serde_json::from_str(r#"{"t": {"summary_list": null}}"#).unwrap();
    assert_eq!(doc.themes.len(), 1);
    assert!(doc.themes[0].summary_list.is_empty());

    let empty: Document = serde_json::from_str("[1, 2]").unwrap();
    assert!(empty.is_empty());
}

#[test]
fn serialization_uses_input_wire_shape() {
    let source = json!({
        "**主题A**": {"summary_list": [
            {"summary": "S1", "points": [{"point": "P1", "original_content": ["q1", "q2"]}]}
        ]},
        "主题B": {"summary_list": []}
    });
    let doc = Document::from_value(&source);

    let value = serde_json::to_value(&doc).unwrap();
    assert_eq!(value, source);

    let keys = value
        .as_object()
        .unwrap()
        .keys()
        .cloned()
        .collect::<Vec<_>>();
    assert_eq!(keys, vec!["**主题A**".to_string(), "主题B".to_string()]);
}

#[test]
fn theme_lookup_uses_raw_key() {
    let doc = load_document_from_str(r#"{"**A**": {"summary_list": []}}"#).unwrap();
    assert!(doc.theme("**A**").is_some());
    assert!(doc.theme("A").is_none());
}
