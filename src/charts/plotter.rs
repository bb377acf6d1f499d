//! Chart Plotter Module
//! Interactive pie and line charts drawn with egui and egui_plot.

use egui::{Align2, Color32, FontId, Pos2, RichText, Sense, Shape, Stroke, Vec2};
use egui_plot::{Legend, Line, Plot, PlotPoints, Points};

use crate::stats::{AggregatedBucket, TrendSeries};

/// Pastel palette in the deck's original scheme order.
pub const PALETTE: [Color32; 9] = [
    Color32::from_rgb(0xFB, 0xB4, 0xAE), // Rose
    Color32::from_rgb(0xB3, 0xCD, 0xE3), // Blue
    Color32::from_rgb(0xCC, 0xEB, 0xC5), // Green
    Color32::from_rgb(0xDE, 0xCB, 0xE4), // Lavender
    Color32::from_rgb(0xFE, 0xD9, 0xA6), // Apricot
    Color32::from_rgb(0xFF, 0xFF, 0xCC), // Cream
    Color32::from_rgb(0xE5, 0xD8, 0xBD), // Sand
    Color32::from_rgb(0xFD, 0xDA, 0xEC), // Pink
    Color32::from_rgb(0xF2, 0xF2, 0xF2), // Grey
];

/// Side of the square a pie chart is painted into.
const PIE_SIZE: f32 = 240.0;
/// Slices narrower than this (radians) skip their inline label.
const MIN_LABEL_ANGLE: f32 = 0.25;
/// Pies start at twelve o'clock, clockwise.
const PIE_START: f32 = -std::f32::consts::FRAC_PI_2;

/// Creates the deck's visualizations.
pub struct ChartPlotter;

impl ChartPlotter {
    /// Get the palette color for a category index.
    pub fn color(index: usize) -> Color32 {
        PALETTE[index % PALETTE.len()]
    }

    /// Draw a pie chart of an aggregated bucket. Hovering a slice shows
    /// `label: value (pct%)`; slices wide enough get an inline label.
    pub fn draw_pie_chart(ui: &mut egui::Ui, bucket: &AggregatedBucket, title: &str) {
        ui.vertical(|ui| {
            ui.label(RichText::new(title).size(14.0).strong());

            let (response, painter) =
                ui.allocate_painter(Vec2::splat(PIE_SIZE), Sense::hover());
            let center = response.rect.center();
            let radius = response.rect.width().min(response.rect.height()) * 0.42;
            let total = bucket.grand_total();

            if total <= 0.0 {
                painter.circle_stroke(center, radius, Stroke::new(1.0, Color32::GRAY));
                painter.text(
                    center,
                    Align2::CENTER_CENTER,
                    "No Data",
                    FontId::proportional(14.0),
                    Color32::GRAY,
                );
                return;
            }

            // Pointer angle measured clockwise from twelve o'clock, if the
            // pointer is inside the pie.
            let pointer_angle = response.hover_pos().and_then(|pos| {
                let delta = pos - center;
                (delta.length() <= radius)
                    .then(|| (delta.y.atan2(delta.x) - PIE_START).rem_euclid(std::f32::consts::TAU))
            });

            let mut swept = 0.0f32;
            let mut hovered: Option<(String, f64)> = None;

            for (idx, (label, value)) in bucket.iter().enumerate() {
                let sweep = ((value / total) as f32) * std::f32::consts::TAU;
                if sweep <= 0.0 {
                    continue;
                }
                let start = PIE_START + swept;
                Self::fill_slice(&painter, center, radius, start, sweep, Self::color(idx));

                if sweep >= MIN_LABEL_ANGLE {
                    let mid = start + sweep / 2.0;
                    painter.text(
                        center + Vec2::angled(mid) * (radius * 0.62),
                        Align2::CENTER_CENTER,
                        label,
                        FontId::proportional(11.0),
                        Color32::DARK_GRAY,
                    );
                }

                if let Some(angle) = pointer_angle {
                    if angle >= swept && angle < swept + sweep {
                        hovered = Some((label.to_string(), value));
                    }
                }
                swept += sweep;
            }

            if let Some((label, value)) = hovered {
                response.on_hover_ui(|ui| {
                    let pct = (value / total * 100.0).round();
                    ui.label(format!("{label}: {value:.0} ({pct:.0}%)"));
                });
            }
        });
    }

    /// Fill one slice as a fan of convex sub-wedges (egui only fills convex
    /// polygons, and a slice can exceed a half turn).
    fn fill_slice(
        painter: &egui::Painter,
        center: Pos2,
        radius: f32,
        start: f32,
        sweep: f32,
        color: Color32,
    ) {
        let end = start + sweep;
        let mut a0 = start;
        while a0 < end {
            let a1 = (a0 + std::f32::consts::FRAC_PI_2).min(end);
            let steps = (((a1 - a0) / 0.1).ceil() as usize).max(1);
            let mut points = Vec::with_capacity(steps + 2);
            points.push(center);
            for i in 0..=steps {
                let t = a0 + (a1 - a0) * i as f32 / steps as f32;
                points.push(center + Vec2::angled(t) * radius);
            }
            painter.add(Shape::convex_polygon(points, color, Stroke::NONE));
            a0 = a1;
        }

        // Thin separators between slices
        let separator = Stroke::new(1.0, Color32::WHITE);
        painter.line_segment([center, center + Vec2::angled(start) * radius], separator);
        painter.line_segment([center, center + Vec2::angled(end) * radius], separator);
    }

    /// Draw a year-over-year line chart of a trend series, one line plus
    /// point markers per category, with a legend.
    pub fn draw_trend_chart(ui: &mut egui::Ui, id_salt: &str, trend: &TrendSeries, title: &str) {
        ui.label(RichText::new(title).size(16.0).strong());

        let years: Vec<f64> = trend.years.iter().map(|&y| y as f64).collect();

        Plot::new(id_salt.to_string())
            .height(320.0)
            .legend(Legend::default())
            .x_axis_label("Year")
            .y_axis_label("Number of Students")
            .allow_scroll(false)
            .include_y(0.0)
            .x_axis_formatter(|mark, _range| format!("{:.0}", mark.value))
            .show(ui, |plot_ui| {
                for (idx, (label, values)) in trend.series.iter().enumerate() {
                    let points: Vec<[f64; 2]> = years
                        .iter()
                        .zip(values.iter())
                        .map(|(&x, &v)| [x, v])
                        .collect();

                    plot_ui.line(
                        Line::new(PlotPoints::from_iter(points.iter().copied()))
                            .color(Self::color(idx))
                            .width(1.5)
                            .name(label),
                    );
                    plot_ui.points(
                        Points::new(PlotPoints::from_iter(points.iter().copied()))
                            .radius(4.0)
                            .color(Self::color(idx))
                            .name(label),
                    );
                }
            });
    }
}
