#[cfg(test)]
mod tests {
    use crate::message::*;
    use crate::visualization::*;
    use crate::document::*;
    use crate::event::*;
    use crate::config::*;
    use crate::session::*;
    use crate::error::*;

    // ─── Message Tests ───────────────────────────────────────

    #[test]
    fn test_message_user() {
        let msg = Message::user("What is entropy?");
        assert_eq!(msg.role, Role::User);
        assert_eq!(msg.content, "What is entropy?");
        assert!(msg.visualization.is_none());
        assert!(!msg.id.is_empty());
    }

    #[test]
    fn test_message_system() {
        let msg = Message::system("Document uploaded: a.pdf");
        assert_eq!(msg.role, Role::System);
        assert!(!msg.has_visualization());
    }

    #[test]
    fn test_message_tutor_reply_with_chart() {
        let vis = VisualizationPayload::chart(
            VisKind::Bar,
            "Sales",
            vec![DataPoint::new("Q1", 3.0)],
        )
        .unwrap();
        let msg = Message::tutor_reply("Here you go.", Some(vis.clone()));
        assert_eq!(msg.role, Role::Tutor);
        assert_eq!(msg.visualization, Some(vis));
    }

    #[test]
    fn test_message_ids_are_unique() {
        let a = Message::user("same");
        let b = Message::user("same");
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_message_serialization_roundtrip() {
        let msg = Message::tutor("hello");
        let json = serde_json::to_string(&msg).unwrap();
        assert!(json.contains("\"role\":\"tutor\""));
        assert!(!json.contains("visualization"));
        let back: Message = serde_json::from_str(&json).unwrap();
        assert_eq!(back, msg);
    }

    #[test]
    fn test_role_labels() {
        assert_eq!(Role::User.label(), "You");
        assert_eq!(Role::Tutor.label(), "Tutor");
        assert_eq!(Role::System.label(), "System");
    }

    // ─── Visualization Tests ─────────────────────────────────

    #[test]
    fn test_parse_bar_payload() {
        let vis = VisualizationPayload::parse(
            r#"{"type":"bar","title":"X","data":[{"name":"A","value":1}]}"#,
        )
        .unwrap();
        assert_eq!(vis.kind, VisKind::Bar);
        assert_eq!(vis.title, "X");
        assert_eq!(vis.series, Series::Points(vec![DataPoint::new("A", 1.0)]));
    }

    #[test]
    fn test_parse_pie_and_line_keep_order() {
        for kind in ["pie", "line"] {
            let json = format!(
                r#"{{"type":"{}","title":"T","data":[{{"name":"b","value":2}},{{"name":"a","value":1.5}}]}}"#,
                kind
            );
            let vis = VisualizationPayload::parse(&json).unwrap();
            let points = vis.series.points().unwrap();
            assert_eq!(points[0].name, "b");
            assert_eq!(points[1].value, 1.5);
        }
    }

    #[test]
    fn test_parse_kind_is_case_insensitive() {
        let vis = VisualizationPayload::parse(r#"{"type":"Bar","title":"","data":[]}"#).unwrap();
        assert_eq!(vis.kind, VisKind::Bar);
        assert!(vis.series.is_empty());
    }

    #[test]
    fn test_parse_graph_payload() {
        let vis = VisualizationPayload::parse(
            r#"{"type":"graph","title":"Flow","data":{
                "nodes":[{"id":"A","label":"Concept A"},{"id":"B"}],
                "links":[{"source":"A","target":"B"}]}}"#,
        )
        .unwrap();
        assert_eq!(vis.kind, VisKind::Graph);
        let graph = vis.series.graph().unwrap();
        assert_eq!(graph.nodes.len(), 2);
        assert_eq!(graph.nodes[1].label, "B");
        assert_eq!(graph.links[0].target, "B");
    }

    #[test]
    fn test_parse_graph_wrapped_in_array() {
        let vis = VisualizationPayload::parse(
            r#"{"type":"graph","title":"Flow","data":[{"nodes":[{"id":"A","label":"a"}],"links":[]}]}"#,
        )
        .unwrap();
        assert_eq!(vis.series.len(), 1);
    }

    #[test]
    fn test_parse_missing_title_defaults_empty() {
        let vis = VisualizationPayload::parse(r#"{"type":"line","data":[]}"#).unwrap();
        assert_eq!(vis.title, "");
    }

    #[test]
    fn test_parse_rejects_unknown_kind() {
        let err = VisualizationPayload::parse(r#"{"type":"scatter","title":"","data":[]}"#)
            .unwrap_err();
        assert_eq!(err, VisualizationError::UnknownKind("scatter".to_string()));
    }

    #[test]
    fn test_parse_rejects_shape_mismatch() {
        let err = VisualizationPayload::parse(
            r#"{"type":"bar","title":"","data":{"nodes":[],"links":[]}}"#,
        )
        .unwrap_err();
        assert!(matches!(err, VisualizationError::ShapeMismatch { kind: VisKind::Bar, .. }));

        let err = VisualizationPayload::parse(r#"{"type":"graph","title":"","data":[1,2]}"#)
            .unwrap_err();
        assert!(matches!(err, VisualizationError::ShapeMismatch { kind: VisKind::Graph, .. }));
    }

    #[test]
    fn test_parse_rejects_non_numeric_value() {
        let err = VisualizationPayload::parse(
            r#"{"type":"pie","title":"","data":[{"name":"A","value":"ten"}]}"#,
        )
        .unwrap_err();
        assert!(matches!(err, VisualizationError::ShapeMismatch { .. }));
    }

    #[test]
    fn test_parse_rejects_truncated_json() {
        let err = VisualizationPayload::parse(r#"{"type":"bar","title":"X","data":[{"name""#)
            .unwrap_err();
        assert!(matches!(err, VisualizationError::InvalidJson(_)));
    }

    #[test]
    fn test_payload_serializes_to_wire_form() {
        let vis = VisualizationPayload::chart(VisKind::Pie, "Share", vec![DataPoint::new("A", 1.0)])
            .unwrap();
        let value = serde_json::to_value(&vis).unwrap();
        assert_eq!(value["type"], "pie");
        assert_eq!(value["title"], "Share");
        assert_eq!(value["data"][0]["name"], "A");
    }

    #[test]
    fn test_chart_constructor_refuses_graph() {
        assert!(VisualizationPayload::chart(VisKind::Graph, "g", vec![]).is_err());
    }

    #[test]
    fn test_vis_kind_display_and_parse() {
        for kind in VisKind::all() {
            assert_eq!(kind.to_string().parse::<VisKind>().unwrap(), *kind);
        }
        assert!(!VisKind::Graph.uses_points());
        assert!(VisKind::Line.uses_points());
    }

    // ─── Document Tests ──────────────────────────────────────

    #[test]
    fn test_is_pdf_mime() {
        assert!(is_pdf_mime("application/pdf"));
        assert!(is_pdf_mime("Application/PDF"));
        assert!(is_pdf_mime("application/pdf; charset=binary"));
        assert!(!is_pdf_mime("text/plain"));
        assert!(!is_pdf_mime(""));
    }

    #[test]
    fn test_file_meta_is_pdf() {
        assert!(FileMeta::new("a.pdf", PDF_MIME_TYPE, 10).is_pdf());
        assert!(!FileMeta::new("a.png", "image/png", 10).is_pdf());
    }

    #[test]
    fn test_active_document_starts_undelivered() {
        let doc = ActiveDocument::new("a.pdf", "JVBERi0=".to_string(), 5);
        assert!(!doc.delivered);
        assert_eq!(doc.size_bytes, 5);
    }

    // ─── Event Tests ─────────────────────────────────────────

    #[test]
    fn test_event_serialization() {
        let event = TutorEvent::ReplyReceived { turn_id: 3, has_visualization: true };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("ReplyReceived"));
        let back: TutorEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);
    }

    // ─── Config Tests ────────────────────────────────────────

    #[test]
    fn test_default_config() {
        let config = TutorConfig::default();
        assert_eq!(config.llm.provider, LlmProvider::Google);
        assert_eq!(config.llm.model, "gemini-3-pro-preview");
        assert!(config.llm.api_base.is_none());
        assert_eq!(config.attach_policy, AttachPolicy::UntilDelivered);
        assert!(config.system_prompt.contains("json:vis"));
    }

    #[test]
    fn test_config_serialization_roundtrip() {
        let config = TutorConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let back: TutorConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.llm.provider, LlmProvider::Google);
        assert_eq!(back.attach_policy, AttachPolicy::UntilDelivered);
    }

    #[test]
    fn test_config_validate() {
        let mut config = TutorConfig::default();
        config.llm.api_key = String::new();
        assert!(matches!(config.validate(), Err(TutorError::Config(_))));

        config.llm.api_key = "key".to_string();
        assert!(config.validate().is_ok());

        config.llm.provider = LlmProvider::Custom;
        assert!(config.validate().is_err());
        config.llm.api_base = Some("http://localhost:8080".to_string());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_llm_base_url_prefers_override() {
        let mut llm = LlmConfig::default();
        assert_eq!(llm.base_url(), "https://generativelanguage.googleapis.com");
        llm.api_base = Some("http://proxy.local/".to_string());
        assert_eq!(llm.base_url(), "http://proxy.local");
        llm.api_base = Some("  ".to_string());
        assert_eq!(llm.base_url(), "https://generativelanguage.googleapis.com");
    }

    #[test]
    fn test_llm_provider_all() {
        let all = LlmProvider::all();
        assert_eq!(all.len(), 3);
        assert!(all.contains(&LlmProvider::Google));
        assert_eq!(LlmProvider::OpenAI.default_base_url(), "https://api.openai.com");
    }

    // ─── Session Tests ───────────────────────────────────────

    #[test]
    fn test_session_new_has_greeting() {
        let session = Session::new("Hello!");
        assert_eq!(session.transcript.len(), 1);
        assert_eq!(session.transcript[0].role, Role::Tutor);
        assert_eq!(session.phase, SessionPhase::Idle);
        assert!(session.active_document.is_none());
        assert!(!session.upload_in_flight());
        assert!(!session.reply_in_flight());
    }

    #[test]
    fn test_session_phase_flags() {
        let mut session = Session::new("hi");
        session.phase = SessionPhase::Uploading { file_name: "a.pdf".to_string() };
        assert!(session.upload_in_flight());
        assert!(!session.reply_in_flight());

        session.phase = SessionPhase::AwaitingReply { turn_id: 1, carries_document: false };
        assert!(!session.upload_in_flight());
        assert!(session.reply_in_flight());
    }

    #[test]
    fn test_session_phase_display() {
        assert_eq!(SessionPhase::Idle.to_string(), "idle");
        assert_eq!(
            SessionPhase::Uploading { file_name: "a.pdf".to_string() }.to_string(),
            "uploading a.pdf"
        );
    }

    // ─── Error Tests ─────────────────────────────────────────

    #[test]
    fn test_error_display() {
        let err = TutorError::Llm("rate limit".to_string());
        assert_eq!(err.to_string(), "LLM error: rate limit");

        let err = TutorError::Document {
            name: "a.pdf".to_string(),
            message: "unreadable".to_string(),
        };
        assert_eq!(err.to_string(), "Document error: a.pdf: unreadable");
    }

    #[test]
    fn test_error_from_serde() {
        let serde_err = serde_json::from_str::<serde_json::Value>("{{invalid}}").unwrap_err();
        let err: TutorError = serde_err.into();
        assert!(matches!(err, TutorError::Serialization(_)));
    }

    #[test]
    fn test_rejection_display() {
        let r = Rejection::NotPdf {
            name: "notes.txt".to_string(),
            mime_type: "text/plain".to_string(),
        };
        assert_eq!(r.to_string(), "notes.txt is not a PDF (text/plain)");
        let r = Rejection::Busy { phase: SessionPhase::Idle };
        assert_eq!(r.to_string(), "busy: idle");
    }
}
