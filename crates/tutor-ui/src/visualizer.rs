//! Visualization card: bar, pie and line charts drawn with the egui painter.
//!
//! Graphs have no renderer yet and show a placeholder instead.

use egui::{self, pos2, vec2, Align2, CornerRadius, FontId, Pos2, Rect, RichText, Sense, Shape, Stroke};
use tutor_types::visualization::{DataPoint, VisKind, VisualizationPayload};

use crate::chart::{self, ValueScale};
use crate::theme::*;

pub const DIAGRAM_PLACEHOLDER: &str = "Diagram generation in progress...";
pub const NO_DATA: &str = "No data to display";

const CHART_HEIGHT: f32 = 220.0;
const GRID_TICKS: usize = 5;
const AXIS_FONT: f32 = 10.0;

/// Render a visualization below a tutor message.
pub fn visualization_card(ui: &mut egui::Ui, vis: &VisualizationPayload) {
    egui::Frame::default()
        .fill(CHART_BG)
        .corner_radius(PANEL_ROUNDING)
        .inner_margin(10.0)
        .show(ui, |ui| {
            if !vis.title.trim().is_empty() {
                ui.label(RichText::new(&vis.title).color(TEXT_PRIMARY).strong().small());
                ui.add_space(6.0);
            }

            match vis.series.points() {
                Some([]) => placeholder(ui, NO_DATA),
                Some(points) => match vis.kind {
                    VisKind::Bar => bar_chart(ui, points),
                    VisKind::Pie => pie_chart(ui, points),
                    VisKind::Line => line_chart(ui, points),
                    VisKind::Graph => placeholder(ui, DIAGRAM_PLACEHOLDER),
                },
                None => placeholder(ui, DIAGRAM_PLACEHOLDER),
            }
        });
}

fn placeholder(ui: &mut egui::Ui, text: &str) {
    egui::Frame::default()
        .fill(BG_SURFACE)
        .corner_radius(PANEL_ROUNDING)
        .inner_margin(16.0)
        .show(ui, |ui| {
            ui.vertical_centered(|ui| {
                ui.label(RichText::new(text).color(TEXT_SECONDARY).italics());
            });
        });
}

fn axis_font() -> FontId {
    FontId::proportional(AXIS_FONT)
}

/// Inset for axis labels
fn plot_area(rect: Rect) -> Rect {
    Rect::from_min_max(
        pos2(rect.left() + 40.0, rect.top() + 14.0),
        pos2(rect.right() - 8.0, rect.bottom() - 20.0),
    )
}

fn draw_grid(painter: &egui::Painter, plot: Rect, scale: &ValueScale) {
    for tick in scale.ticks(GRID_TICKS) {
        let y = scale.y_for(tick, plot);
        painter.hline(plot.x_range(), y, Stroke::new(1.0, CHART_GRID));
        painter.text(
            pos2(plot.left() - 6.0, y),
            Align2::RIGHT_CENTER,
            chart::format_value(tick),
            axis_font(),
            CHART_AXIS,
        );
    }
    let zero = scale.y_for(0.0, plot);
    painter.hline(plot.x_range(), zero, Stroke::new(1.0, CHART_AXIS));
}

fn draw_categories(painter: &egui::Painter, plot: Rect, points: &[DataPoint]) {
    let slot = plot.width() / points.len().max(1) as f32;
    let max_chars = ((slot / 6.0) as usize).max(3);
    for (i, p) in points.iter().enumerate() {
        painter.text(
            pos2(chart::slot_center(i, points.len(), plot), plot.bottom() + 4.0),
            Align2::CENTER_TOP,
            chart::truncate_label(&p.name, max_chars),
            axis_font(),
            CHART_AXIS,
        );
    }
}

fn readout(painter: &egui::Painter, at: Pos2, point: &DataPoint) {
    painter.text(
        at,
        Align2::CENTER_BOTTOM,
        format!("{}: {}", point.name, chart::format_value(point.value)),
        FontId::proportional(11.0),
        TEXT_PRIMARY,
    );
}

fn bar_chart(ui: &mut egui::Ui, points: &[DataPoint]) {
    let (response, painter) =
        ui.allocate_painter(vec2(ui.available_width(), CHART_HEIGHT), Sense::hover());
    let plot = plot_area(response.rect);
    let scale = ValueScale::for_points(points);

    draw_grid(&painter, plot, &scale);
    draw_categories(&painter, plot, points);

    let hover = response.hover_pos();
    let top_rounded = CornerRadius {
        nw: 4,
        ne: 4,
        sw: 0,
        se: 0,
    };
    for (bar, point) in chart::bar_rects(points, plot).iter().zip(points) {
        let hot = hover.is_some_and(|p| bar.left() <= p.x && p.x <= bar.right());
        let fill = if hot { ACCENT.gamma_multiply(0.8) } else { chart_color(0) };
        painter.rect_filled(*bar, top_rounded, fill);
        if hot {
            readout(&painter, pos2(bar.center().x, bar.top() - 2.0), point);
        }
    }
}

fn line_chart(ui: &mut egui::Ui, points: &[DataPoint]) {
    let (response, painter) =
        ui.allocate_painter(vec2(ui.available_width(), CHART_HEIGHT), Sense::hover());
    let plot = plot_area(response.rect);
    let scale = ValueScale::for_points(points);

    draw_grid(&painter, plot, &scale);
    draw_categories(&painter, plot, points);

    let vertices = chart::line_points(points, plot);
    let color = chart_color(0);
    if vertices.len() > 1 {
        painter.add(Shape::line(vertices.clone(), Stroke::new(2.0, color)));
    }
    for v in &vertices {
        painter.circle_filled(*v, 3.0, color);
    }

    let hovered = response
        .hover_pos()
        .and_then(|p| chart::nearest_index(&vertices, p.x));
    if let Some(i) = hovered {
        painter.circle_stroke(vertices[i], 5.0, Stroke::new(1.5, TEXT_PRIMARY));
        readout(&painter, vertices[i] - vec2(0.0, 8.0), &points[i]);
    }
}

fn pie_chart(ui: &mut egui::Ui, points: &[DataPoint]) {
    let slices = chart::pie_slices(points, chart::PIE_PAD_ANGLE);
    if slices.is_empty() {
        placeholder(ui, NO_DATA);
        return;
    }

    let (response, painter) =
        ui.allocate_painter(vec2(ui.available_width(), CHART_HEIGHT), Sense::hover());
    let rect = response.rect;
    let legend_width = (rect.width() * 0.4).min(180.0);
    let pie_rect = Rect::from_min_max(rect.min, pos2(rect.right() - legend_width, rect.bottom()));

    let center = pie_rect.center();
    let outer = (pie_rect.width().min(pie_rect.height()) / 2.0 - 8.0).max(10.0);
    let inner = outer * 0.75;
    let hovered = response
        .hover_pos()
        .and_then(|p| chart::slice_at(&slices, center, inner, outer, p));

    for (n, slice) in slices.iter().enumerate() {
        let color = chart_color(slice.index);
        let ring_outer = if hovered == Some(n) { outer + 4.0 } else { outer };
        for quad in chart::ring_quads(center, inner, ring_outer, slice) {
            // Thin same-color stroke hides seams between quads
            painter.add(Shape::convex_polygon(quad.to_vec(), color, Stroke::new(0.5, color)));
        }
    }

    if let Some(n) = hovered {
        let slice = &slices[n];
        let point = &points[slice.index];
        painter.text(
            center,
            Align2::CENTER_CENTER,
            format!(
                "{}\n{} ({:.0}%)",
                point.name,
                chart::format_value(point.value),
                slice.fraction * 100.0
            ),
            FontId::proportional(11.0),
            TEXT_PRIMARY,
        );
    }

    // Legend
    let mut y = rect.top() + 10.0;
    let x = rect.right() - legend_width + 8.0;
    let max_chars = ((legend_width / 7.0) as usize).max(4);
    for slice in &slices {
        let point = &points[slice.index];
        painter.rect_filled(
            Rect::from_min_size(pos2(x, y), vec2(10.0, 10.0)),
            CornerRadius::same(2),
            chart_color(slice.index),
        );
        painter.text(
            pos2(x + 16.0, y + 5.0),
            Align2::LEFT_CENTER,
            format!(
                "{} {:.0}%",
                chart::truncate_label(&point.name, max_chars),
                slice.fraction * 100.0
            ),
            axis_font(),
            TEXT_SECONDARY,
        );
        y += 16.0;
        if y > rect.bottom() - 10.0 {
            break;
        }
    }
}
