//! Static Chart Renderer
//! Renders pie and trend charts to PNG bytes with Plotters, for embedding
//! into the exported PPTX.

use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use thiserror::Error;

use crate::stats::{AggregatedBucket, TrendSeries};

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("chart drawing failed: {0}")]
    Draw(String),
    #[error("PNG encoding failed: {0}")]
    Encode(#[from] image::ImageError),
    #[error("frame buffer size mismatch")]
    BadBuffer,
}

/// Pastel palette matching the interactive charts.
const PALETTE_RGB: [RGBColor; 9] = [
    RGBColor(0xFB, 0xB4, 0xAE),
    RGBColor(0xB3, 0xCD, 0xE3),
    RGBColor(0xCC, 0xEB, 0xC5),
    RGBColor(0xDE, 0xCB, 0xE4),
    RGBColor(0xFE, 0xD9, 0xA6),
    RGBColor(0xFF, 0xFF, 0xCC),
    RGBColor(0xE5, 0xD8, 0xBD),
    RGBColor(0xFD, 0xDA, 0xEC),
    RGBColor(0xF2, 0xF2, 0xF2),
];

pub struct StaticChartRenderer;

impl StaticChartRenderer {
    /// Render an aggregated bucket as a titled pie chart PNG. Zero-count
    /// categories are left out of the pie.
    pub fn render_pie_png(
        bucket: &AggregatedBucket,
        title: &str,
        width: u32,
        height: u32,
    ) -> Result<Vec<u8>, RenderError> {
        let mut buf = vec![0u8; (width * height * 3) as usize];
        {
            let root = BitMapBackend::with_buffer(&mut buf, (width, height)).into_drawing_area();
            root.fill(&WHITE).map_err(draw_err)?;
            Self::draw_title(&root, title, width).map_err(draw_err)?;

            let slices: Vec<(String, f64)> = bucket
                .iter()
                .filter(|(_, value)| *value > 0.0)
                .map(|(label, value)| (label.to_string(), value))
                .collect();

            if slices.is_empty() {
                let style = ("sans-serif", 20)
                    .into_font()
                    .color(&BLACK)
                    .pos(Pos::new(HPos::Center, VPos::Center));
                root.draw(&Text::new(
                    "No Data".to_string(),
                    (width as i32 / 2, height as i32 / 2),
                    style,
                ))
                .map_err(draw_err)?;
            } else {
                let sizes: Vec<f64> = slices.iter().map(|(_, v)| *v).collect();
                let labels: Vec<String> = slices.iter().map(|(l, _)| l.clone()).collect();
                let colors: Vec<RGBColor> = (0..slices.len())
                    .map(|i| PALETTE_RGB[i % PALETTE_RGB.len()])
                    .collect();

                let center = (width as i32 / 2, height as i32 / 2 + 12);
                let radius = (width.min(height) as f64) * 0.30;
                let mut pie = Pie::new(&center, &radius, &sizes, &colors, &labels);
                pie.start_angle(-90.0);
                pie.label_style(("sans-serif", 16).into_font().color(&BLACK));
                pie.percentages(("sans-serif", 13).into_font().color(&BLACK));
                root.draw(&pie).map_err(draw_err)?;
            }

            root.present().map_err(draw_err)?;
        }
        Self::encode_png(&buf, width, height)
    }

    /// Render a trend series as a titled line chart PNG with a legend.
    pub fn render_trend_png(
        trend: &TrendSeries,
        title: &str,
        width: u32,
        height: u32,
    ) -> Result<Vec<u8>, RenderError> {
        let mut buf = vec![0u8; (width * height * 3) as usize];
        {
            let root = BitMapBackend::with_buffer(&mut buf, (width, height)).into_drawing_area();
            root.fill(&WHITE).map_err(draw_err)?;

            let x_min = trend.years.iter().copied().min().unwrap_or(0) as f64 - 0.5;
            let x_max = trend.years.iter().copied().max().unwrap_or(1) as f64 + 0.5;
            let y_max = (trend.max_value() * 1.15).max(1.0);

            let mut chart = ChartBuilder::on(&root)
                .caption(title, ("sans-serif", 26))
                .margin(20)
                .x_label_area_size(45)
                .y_label_area_size(70)
                .build_cartesian_2d(x_min..x_max, 0f64..y_max)
                .map_err(draw_err)?;

            chart
                .configure_mesh()
                .x_desc("Year")
                .y_desc("Number of Students")
                .x_labels(trend.years.len().max(2))
                .x_label_formatter(&|v| format!("{v:.0}"))
                .draw()
                .map_err(draw_err)?;

            for (idx, (label, values)) in trend.series.iter().enumerate() {
                let color = PALETTE_RGB[idx % PALETTE_RGB.len()];
                let points: Vec<(f64, f64)> = trend
                    .years
                    .iter()
                    .zip(values.iter())
                    .map(|(&year, &v)| (year as f64, v))
                    .collect();

                chart
                    .draw_series(LineSeries::new(points.iter().copied(), color.stroke_width(2)))
                    .map_err(draw_err)?
                    .label(label.clone())
                    .legend(move |(x, y)| {
                        PathElement::new(vec![(x, y), (x + 18, y)], color.stroke_width(2))
                    });

                chart
                    .draw_series(
                        points
                            .iter()
                            .map(|&(x, y)| Circle::new((x, y), 4, color.filled())),
                    )
                    .map_err(draw_err)?;
            }

            chart
                .configure_series_labels()
                .border_style(BLACK)
                .background_style(WHITE.mix(0.85))
                .draw()
                .map_err(draw_err)?;

            root.present().map_err(draw_err)?;
        }
        Self::encode_png(&buf, width, height)
    }

    fn draw_title<DB: DrawingBackend>(
        root: &DrawingArea<DB, plotters::coord::Shift>,
        title: &str,
        width: u32,
    ) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
        let style = ("sans-serif", 24)
            .into_font()
            .color(&BLACK)
            .pos(Pos::new(HPos::Center, VPos::Top));
        root.draw(&Text::new(title.to_string(), (width as i32 / 2, 8), style))
    }

    /// Encode the plotters RGB frame buffer as PNG bytes.
    fn encode_png(rgb: &[u8], width: u32, height: u32) -> Result<Vec<u8>, RenderError> {
        let img: image::RgbImage = image::ImageBuffer::from_raw(width, height, rgb.to_vec())
            .ok_or(RenderError::BadBuffer)?;
        let mut out = Vec::new();
        img.write_to(&mut std::io::Cursor::new(&mut out), image::ImageFormat::Png)?;
        Ok(out)
    }
}

fn draw_err<E: std::fmt::Display>(e: E) -> RenderError {
    RenderError::Draw(e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::categories::Dimension;
    use crate::stats::AggregatedBucket;

    // PNG magic bytes are enough to tell encoding succeeded.
    fn assert_png(bytes: &[u8]) {
        assert!(bytes.len() > 8);
        assert_eq!(&bytes[..8], &[0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1A, b'\n']);
    }

    #[test]
    fn pie_renders_to_png_bytes() {
        let bucket = AggregatedBucket::from_entries([
            ("Men".to_string(), 120.0),
            ("Women".to_string(), 60.0),
            ("Unknown".to_string(), 0.0),
        ]);
        let png = StaticChartRenderer::render_pie_png(&bucket, "Gender Breakdown", 640, 480)
            .expect("render");
        assert_png(&png);
    }

    #[test]
    fn empty_bucket_renders_placeholder_instead_of_failing() {
        let bucket = AggregatedBucket::new();
        let png =
            StaticChartRenderer::render_pie_png(&bucket, "Gender Breakdown", 640, 480).expect("render");
        assert_png(&png);
    }

    #[test]
    fn trend_renders_to_png_bytes() {
        let trend = crate::stats::TrendSeries {
            college: "Engineering".to_string(),
            dimension: Dimension::Gender,
            years: vec![2013, 2018, 2023],
            series: vec![
                ("Men".to_string(), vec![100.0, 120.0, 140.0]),
                ("Women".to_string(), vec![50.0, 70.0, 90.0]),
            ],
        };
        let png = StaticChartRenderer::render_trend_png(&trend, "Enrollment by Gender", 800, 500)
            .expect("render");
        assert_png(&png);
    }
}
