//! Chart geometry.
//!
//! Pure functions from data points to screen shapes. The visualizer only
//! paints what these return, so layout can be tested without a display.

use std::f32::consts::{FRAC_PI_2, TAU};

use egui::{pos2, vec2, Pos2, Rect};
use tutor_types::visualization::DataPoint;

/// Gap between donut slices, in radians (5°)
pub const PIE_PAD_ANGLE: f32 = 5.0 * std::f32::consts::PI / 180.0;

/// Largest arc covered by one ring quad
const RING_STEP: f32 = 0.08;

/// Share of each category slot taken by its bar
const BAR_FILL: f32 = 0.6;

/// Value axis for bar and line charts. Always includes zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueScale {
    pub min: f64,
    pub max: f64,
}

impl ValueScale {
    pub fn for_points(points: &[DataPoint]) -> Self {
        let (mut min, mut max) = (0.0_f64, 0.0_f64);
        for p in points.iter().filter(|p| p.value.is_finite()) {
            min = min.min(p.value);
            max = max.max(p.value);
        }
        if max - min <= f64::EPSILON {
            max = min + 1.0;
        }
        Self { min, max }
    }

    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// Screen y of `value` inside `rect`. Non-finite values sit on zero.
    pub fn y_for(&self, value: f64, rect: Rect) -> f32 {
        let v = if value.is_finite() {
            value.clamp(self.min, self.max)
        } else {
            0.0
        };
        let t = ((v - self.min) / self.span()) as f32;
        rect.bottom() - t * rect.height()
    }

    /// `count` evenly spaced values from min to max (at least two).
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        let steps = count.max(2) - 1;
        (0..=steps)
            .map(|i| self.min + self.span() * i as f64 / steps as f64)
            .collect()
    }
}

/// Width of one category slot
fn slot_width(count: usize, rect: Rect) -> f32 {
    rect.width() / count.max(1) as f32
}

/// Horizontal center of category `index`
pub fn slot_center(index: usize, count: usize, rect: Rect) -> f32 {
    rect.left() + (index as f32 + 0.5) * slot_width(count, rect)
}

/// One rectangle per point, rising from (or hanging below) the zero line.
pub fn bar_rects(points: &[DataPoint], rect: Rect) -> Vec<Rect> {
    let scale = ValueScale::for_points(points);
    let zero = scale.y_for(0.0, rect);
    let half = slot_width(points.len(), rect) * BAR_FILL / 2.0;

    points
        .iter()
        .enumerate()
        .map(|(i, p)| {
            let x = slot_center(i, points.len(), rect);
            let y = scale.y_for(p.value, rect);
            Rect::from_min_max(pos2(x - half, y.min(zero)), pos2(x + half, y.max(zero)))
        })
        .collect()
}

/// Polyline vertices, one per point at its slot center.
pub fn line_points(points: &[DataPoint], rect: Rect) -> Vec<Pos2> {
    let scale = ValueScale::for_points(points);
    points
        .iter()
        .enumerate()
        .map(|(i, p)| pos2(slot_center(i, points.len(), rect), scale.y_for(p.value, rect)))
        .collect()
}

/// A donut slice. Angles are radians, clockwise from twelve o'clock.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Slice {
    /// Index into the original points (for color and legend)
    pub index: usize,
    pub start: f32,
    pub sweep: f32,
    pub fraction: f64,
}

/// Slices for every positive, finite value. Empty when nothing is positive.
pub fn pie_slices(points: &[DataPoint], pad: f32) -> Vec<Slice> {
    let positive: Vec<(usize, f64)> = points
        .iter()
        .enumerate()
        .filter(|(_, p)| p.value.is_finite() && p.value > 0.0)
        .map(|(i, p)| (i, p.value))
        .collect();
    let total: f64 = positive.iter().map(|(_, v)| v).sum();
    if positive.is_empty() || total <= 0.0 {
        return Vec::new();
    }

    let mut pad = if positive.len() > 1 { pad.max(0.0) } else { 0.0 };
    if pad * positive.len() as f32 >= TAU {
        pad = 0.0;
    }
    let available = TAU - pad * positive.len() as f32;

    let mut angle = -FRAC_PI_2;
    positive
        .into_iter()
        .map(|(index, value)| {
            let fraction = value / total;
            let sweep = available * fraction as f32;
            let slice = Slice {
                index,
                start: angle,
                sweep,
                fraction,
            };
            angle += sweep + pad;
            slice
        })
        .collect()
}

pub fn polar(center: Pos2, radius: f32, angle: f32) -> Pos2 {
    center + vec2(angle.cos(), angle.sin()) * radius
}

/// Split a ring slice into small convex quads (outer edge first).
pub fn ring_quads(center: Pos2, inner: f32, outer: f32, slice: &Slice) -> Vec<[Pos2; 4]> {
    if slice.sweep <= 0.0 {
        return Vec::new();
    }
    let steps = (slice.sweep / RING_STEP).ceil().max(1.0) as usize;
    let step = slice.sweep / steps as f32;

    (0..steps)
        .map(|i| {
            let a0 = slice.start + step * i as f32;
            let a1 = a0 + step;
            [
                polar(center, outer, a0),
                polar(center, outer, a1),
                polar(center, inner, a1),
                polar(center, inner, a0),
            ]
        })
        .collect()
}

/// Axis and tooltip text: whole numbers without decimals, others to two places.
pub fn format_value(value: f64) -> String {
    if !value.is_finite() {
        return "-".to_string();
    }
    if value.fract() == 0.0 && value.abs() < 1e15 {
        return format!("{:.0}", value);
    }
    let s = format!("{:.2}", value);
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}

/// Shorten a category label to `max_chars`, marking the cut with an ellipsis.
pub fn truncate_label(label: &str, max_chars: usize) -> String {
    if label.chars().count() <= max_chars {
        return label.to_string();
    }
    let kept: String = label.chars().take(max_chars.saturating_sub(1)).collect();
    format!("{}…", kept)
}

/// Which slice (by position in `slices`) lies under `pos`, if any.
pub fn slice_at(slices: &[Slice], center: Pos2, inner: f32, outer: f32, pos: Pos2) -> Option<usize> {
    let offset = pos - center;
    let distance = offset.length();
    if distance < inner || distance > outer {
        return None;
    }
    let angle = offset.y.atan2(offset.x);
    slices
        .iter()
        .position(|s| (angle - s.start).rem_euclid(TAU) <= s.sweep)
}

/// Index of the vertex closest to `x`, for hover readouts.
pub fn nearest_index(vertices: &[Pos2], x: f32) -> Option<usize> {
    vertices
        .iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| (a.x - x).abs().total_cmp(&(b.x - x).abs()))
        .map(|(i, _)| i)
}
