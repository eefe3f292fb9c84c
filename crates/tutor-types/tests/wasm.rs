//! WASM-target tests for tutor-types.
//!
//! Mirrors the native unit tests but runs under wasm32-unknown-unknown
//! via `wasm-pack test --node`.

use wasm_bindgen_test::*;

use tutor_types::message::*;
use tutor_types::visualization::*;
use tutor_types::document::*;
use tutor_types::config::*;
use tutor_types::session::*;
use tutor_types::error::*;

// ─── Message Tests ───────────────────────────────────────

#[wasm_bindgen_test]
fn message_user() {
    let msg = Message::user("Hello");
    assert_eq!(msg.role, Role::User);
    assert_eq!(msg.content, "Hello");
    assert!(msg.visualization.is_none());
}

#[wasm_bindgen_test]
fn message_ids_use_js_randomness() {
    let a = Message::tutor("x");
    let b = Message::tutor("x");
    assert_ne!(a.id, b.id);
}

#[wasm_bindgen_test]
fn message_timestamp_is_set() {
    let msg = Message::system("Document uploaded");
    assert!(msg.created_at.timestamp() > 0);
}

// ─── Visualization Tests ─────────────────────────────────

#[wasm_bindgen_test]
fn visualization_parse_bar() {
    let vis = VisualizationPayload::parse(
        r#"{"type":"bar","title":"X","data":[{"name":"A","value":1}]}"#,
    )
    .unwrap();
    assert_eq!(vis.kind, VisKind::Bar);
    assert_eq!(vis.series.points().unwrap()[0], DataPoint::new("A", 1.0));
}

#[wasm_bindgen_test]
fn visualization_parse_graph() {
    let vis = VisualizationPayload::parse(
        r#"{"type":"graph","title":"G","data":{"nodes":[{"id":"A"}],"links":[]}}"#,
    )
    .unwrap();
    assert_eq!(vis.series.graph().unwrap().nodes[0].label, "A");
}

#[wasm_bindgen_test]
fn visualization_parse_invalid() {
    let err = VisualizationPayload::parse("{not json").unwrap_err();
    assert!(matches!(err, VisualizationError::InvalidJson(_)));
}

// ─── Document / Config / Session Tests ───────────────────

#[wasm_bindgen_test]
fn pdf_mime_detection() {
    assert!(is_pdf_mime(PDF_MIME_TYPE));
    assert!(!is_pdf_mime("image/png"));
}

#[wasm_bindgen_test]
fn default_config_targets_gemini() {
    let config = TutorConfig::default();
    assert_eq!(config.llm.provider, LlmProvider::Google);
    assert_eq!(config.attach_policy, AttachPolicy::UntilDelivered);
}

#[wasm_bindgen_test]
fn session_starts_idle_with_greeting() {
    let session = Session::new("Hello!");
    assert_eq!(session.transcript.len(), 1);
    assert!(session.phase.is_idle());
}

#[wasm_bindgen_test]
fn error_display() {
    let err = TutorError::Network("offline".to_string());
    assert_eq!(err.to_string(), "Network error: offline");
}
