#[cfg(test)]
mod tests {
    use crate::chart::*;
    use crate::panels::settings::select_provider;
    use crate::state::*;
    use crate::theme::{chart_color, CHART_COLORS};
    use egui::{pos2, Rect};
    use std::f32::consts::{FRAC_PI_2, PI, TAU};
    use tutor_types::config::{LlmProvider, TutorConfig};
    use tutor_types::event::TutorEvent;
    use tutor_types::visualization::DataPoint;

    fn points(values: &[f64]) -> Vec<DataPoint> {
        values
            .iter()
            .enumerate()
            .map(|(i, v)| DataPoint::new(format!("P{}", i), *v))
            .collect()
    }

    fn unit_rect() -> Rect {
        Rect::from_min_max(pos2(0.0, 0.0), pos2(100.0, 100.0))
    }

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-3
    }

    // ─── UiState Tests ───────────────────────────────────────

    #[test]
    fn test_ui_state_initial() {
        let state = UiState::new();
        assert!(state.input_text.is_empty());
        assert!(!state.show_settings);
        assert_eq!(state.status_text, "Ready");
        assert_eq!(state.status_tone, StatusTone::Ready);
    }

    #[test]
    fn test_ui_state_upload_lifecycle() {
        let mut state = UiState::new();
        state.process_events(vec![TutorEvent::UploadStarted {
            file_name: "notes.pdf".to_string(),
        }]);
        assert_eq!(state.status_tone, StatusTone::Busy);
        assert_eq!(state.status_text, "Reading notes.pdf...");

        state.process_events(vec![TutorEvent::DocumentReady {
            name: "notes.pdf".to_string(),
            size_bytes: 2048,
        }]);
        assert_eq!(state.status_tone, StatusTone::Ready);
        assert_eq!(state.status_text, "Loaded notes.pdf (2.0 KB)");
    }

    #[test]
    fn test_ui_state_upload_failed() {
        let mut state = UiState::new();
        state.process_events(vec![TutorEvent::UploadFailed {
            file_name: "a.pdf".to_string(),
            message: "aborted".to_string(),
        }]);
        assert_eq!(state.status_tone, StatusTone::Error);
        assert!(state.status_text.contains("aborted"));
    }

    #[test]
    fn test_ui_state_rejection_is_warning() {
        let mut state = UiState::new();
        state.process_events(vec![TutorEvent::ActionRejected {
            reason: "photo.png is not a PDF (image/png)".to_string(),
        }]);
        assert_eq!(state.status_tone, StatusTone::Warning);
        assert!(state.status_text.contains("not a PDF"));
    }

    #[test]
    fn test_ui_state_reply_lifecycle() {
        let mut state = UiState::new();
        state.process_events(vec![TutorEvent::ReplyStarted {
            turn_id: 1,
            carries_document: true,
        }]);
        assert_eq!(state.status_tone, StatusTone::Busy);
        assert!(state.status_text.contains("document"));

        state.process_events(vec![TutorEvent::ReplyReceived {
            turn_id: 1,
            has_visualization: true,
        }]);
        assert_eq!(state.status_tone, StatusTone::Ready);
        assert_eq!(state.status_text, "Ready");
    }

    #[test]
    fn test_ui_state_dropped_chart_stays_visible() {
        let mut state = UiState::new();
        state.process_events(vec![
            TutorEvent::ReplyStarted { turn_id: 2, carries_document: false },
            TutorEvent::VisualizationDropped {
                turn_id: 2,
                reason: "invalid JSON".to_string(),
            },
            TutorEvent::ReplyReceived { turn_id: 2, has_visualization: false },
        ]);
        assert_eq!(state.status_tone, StatusTone::Warning);
        assert!(state.status_text.starts_with("Chart skipped"));
    }

    #[test]
    fn test_ui_state_reply_failed() {
        let mut state = UiState::new();
        state.process_events(vec![
            TutorEvent::ReplyStarted { turn_id: 3, carries_document: false },
            TutorEvent::ReplyFailed {
                turn_id: 3,
                message: "Network error: offline".to_string(),
            },
        ]);
        assert_eq!(state.status_tone, StatusTone::Error);
        assert_eq!(state.status_text, "Error: Network error: offline");
    }

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(0), "0 B");
        assert_eq!(format_size(1023), "1023 B");
        assert_eq!(format_size(1536), "1.5 KB");
        assert_eq!(format_size(3 * 1024 * 1024), "3.0 MB");
    }

    #[test]
    fn test_format_time_shape() {
        let text = format_time(&chrono::Utc::now());
        assert_eq!(text.len(), 5);
        assert_eq!(&text[2..3], ":");
    }

    // ─── Settings Tests ──────────────────────────────────────

    #[test]
    fn test_select_provider_swaps_default_model() {
        let mut config = TutorConfig::default();
        select_provider(&mut config, LlmProvider::OpenAI);
        assert_eq!(config.llm.provider, LlmProvider::OpenAI);
        assert_eq!(config.llm.model, "gpt-4o");
    }

    #[test]
    fn test_select_provider_keeps_custom_model() {
        let mut config = TutorConfig::default();
        config.llm.model = "gemini-2.5-flash".to_string();
        select_provider(&mut config, LlmProvider::Custom);
        assert_eq!(config.llm.model, "gemini-2.5-flash");
    }

    // ─── Chart Geometry Tests ────────────────────────────────

    #[test]
    fn test_value_scale_includes_zero() {
        let scale = ValueScale::for_points(&points(&[3.0, 5.0]));
        assert_eq!(scale.min, 0.0);
        assert_eq!(scale.max, 5.0);

        let negative = ValueScale::for_points(&points(&[-2.0, -1.0]));
        assert_eq!(negative.min, -2.0);
        assert_eq!(negative.max, 0.0);
    }

    #[test]
    fn test_value_scale_degenerate() {
        assert_eq!(ValueScale::for_points(&[]), ValueScale { min: 0.0, max: 1.0 });
        assert_eq!(
            ValueScale::for_points(&points(&[0.0, f64::NAN])),
            ValueScale { min: 0.0, max: 1.0 }
        );
    }

    #[test]
    fn test_value_scale_ticks() {
        let scale = ValueScale { min: 0.0, max: 4.0 };
        assert_eq!(scale.ticks(5), vec![0.0, 1.0, 2.0, 3.0, 4.0]);
        assert_eq!(scale.ticks(0), vec![0.0, 4.0]);
    }

    #[test]
    fn test_bar_rects_positive() {
        let bars = bar_rects(&points(&[1.0, 3.0]), unit_rect());
        assert_eq!(bars.len(), 2);
        assert!(close(bars[0].left(), 10.0));
        assert!(close(bars[0].right(), 40.0));
        assert!(close(bars[0].top(), 100.0 - 100.0 / 3.0));
        assert!(close(bars[0].bottom(), 100.0));
        assert!(close(bars[1].top(), 0.0));
    }

    #[test]
    fn test_bar_rects_negative_hang_from_zero() {
        let bars = bar_rects(&points(&[-1.0, 1.0]), unit_rect());
        assert!(close(bars[0].top(), 50.0));
        assert!(close(bars[0].bottom(), 100.0));
        assert!(close(bars[1].top(), 0.0));
        assert!(close(bars[1].bottom(), 50.0));
    }

    #[test]
    fn test_line_points_use_slot_centers() {
        let verts = line_points(&points(&[0.0, 2.0]), unit_rect());
        assert_eq!(verts.len(), 2);
        assert!(close(verts[0].x, 25.0));
        assert!(close(verts[0].y, 100.0));
        assert!(close(verts[1].x, 75.0));
        assert!(close(verts[1].y, 0.0));
    }

    #[test]
    fn test_pie_slices_cover_circle() {
        let slices = pie_slices(&points(&[1.0, 1.0, 2.0]), 0.0);
        assert_eq!(slices.len(), 3);
        assert!(close(slices[0].start, -FRAC_PI_2));
        assert!(close(slices[0].sweep, FRAC_PI_2));
        assert!(close(slices[1].start, 0.0));
        assert!(close(slices[2].sweep, PI));
        assert!((slices[2].fraction - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_pie_slices_leave_padding() {
        let slices = pie_slices(&points(&[1.0, 1.0]), PIE_PAD_ANGLE);
        let total: f32 = slices.iter().map(|s| s.sweep).sum();
        assert!(close(total + 2.0 * PIE_PAD_ANGLE, TAU));
        assert!(close(slices[1].start, slices[0].start + slices[0].sweep + PIE_PAD_ANGLE));
    }

    #[test]
    fn test_pie_slices_skip_non_positive() {
        let slices = pie_slices(&points(&[-1.0, 0.0, 2.0]), PIE_PAD_ANGLE);
        assert_eq!(slices.len(), 1);
        assert_eq!(slices[0].index, 2);
        assert!(close(slices[0].sweep, TAU));

        assert!(pie_slices(&points(&[0.0, 0.0]), PIE_PAD_ANGLE).is_empty());
    }

    #[test]
    fn test_ring_quads() {
        let slice = Slice { index: 0, start: 0.0, sweep: PI, fraction: 0.5 };
        let quads = ring_quads(pos2(0.0, 0.0), 5.0, 10.0, &slice);
        assert_eq!(quads.len(), (PI / 0.08).ceil() as usize);
        assert!(close(quads[0][0].x, 10.0));
        assert!(close(quads[0][3].x, 5.0));
        let last = quads.last().unwrap();
        assert!(close(last[1].x, -10.0));
    }

    #[test]
    fn test_slice_at() {
        let slices = pie_slices(&points(&[1.0, 1.0, 2.0]), 0.0);
        let center = pos2(0.0, 0.0);
        assert_eq!(slice_at(&slices, center, 5.0, 10.0, pos2(0.1, -7.0)), Some(0));
        assert_eq!(slice_at(&slices, center, 5.0, 10.0, pos2(7.0, 0.1)), Some(1));
        assert_eq!(slice_at(&slices, center, 5.0, 10.0, pos2(-7.0, 0.1)), Some(2));
        assert_eq!(slice_at(&slices, center, 5.0, 10.0, pos2(1.0, 1.0)), None);
        assert_eq!(slice_at(&slices, center, 5.0, 10.0, pos2(20.0, 0.0)), None);
    }

    #[test]
    fn test_nearest_index() {
        let verts = vec![pos2(10.0, 0.0), pos2(50.0, 0.0), pos2(90.0, 0.0)];
        assert_eq!(nearest_index(&verts, 42.0), Some(1));
        assert_eq!(nearest_index(&verts, 200.0), Some(2));
        assert_eq!(nearest_index(&[], 1.0), None);
    }

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(1.0), "1");
        assert_eq!(format_value(2.5), "2.5");
        assert_eq!(format_value(1234.567), "1234.57");
        assert_eq!(format_value(-3.0), "-3");
        assert_eq!(format_value(f64::NAN), "-");
    }

    #[test]
    fn test_truncate_label() {
        assert_eq!(truncate_label("Short", 10), "Short");
        assert_eq!(truncate_label("Photosynthesis", 6), "Photo…");
        assert_eq!(truncate_label("Énergie", 3), "Én…");
    }

    #[test]
    fn test_chart_colors_cycle() {
        assert_eq!(chart_color(0), CHART_COLORS[0]);
        assert_eq!(chart_color(6), CHART_COLORS[0]);
        assert_eq!(chart_color(7), CHART_COLORS[1]);
    }
}
