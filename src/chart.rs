use crate::canvas::{Canvas, RasterImage};
use crate::error::ChartError;
use crate::font;
use crate::format;
use crate::frame::Frame;
use crate::theme::Theme;
use crate::types::{Color, Pt};
use serde::{Deserialize, Serialize};
use std::f32::consts::PI;
use tiny_skia::{FillRule, Paint, PathBuilder, Pixmap, Rect as SkRect, Stroke, Transform};

/// Fixed chart canvas in logical units. The placed image is scaled down
/// uniformly when the content width is narrower than the canvas.
pub const CHART_WIDTH: f32 = 500.0;
pub const CHART_HEIGHT: f32 = 300.0;

/// Plot geometry rasterizes at 2x so hairlines survive print zoom.
const RASTER_SCALE: f32 = 2.0;

const AXIS_TICKS: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Bar,
    Pie,
    Doughnut,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartSeries {
    pub name: String,
    pub values: Vec<f64>,
    pub color: Color,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartSpec {
    pub kind: ChartKind,
    pub title: String,
    pub labels: Vec<String>,
    pub series: Vec<ChartSeries>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Anchor {
    Start,
    Middle,
    End,
}

#[derive(Debug, Clone)]
struct TextItem {
    x: f32,
    y: f32,
    size: f32,
    bold: bool,
    color: Color,
    anchor: Anchor,
    text: String,
}

#[derive(Debug, Clone, Copy)]
struct RectItem {
    x: f32,
    y: f32,
    width: f32,
    height: f32,
    color: Color,
}

#[derive(Debug, Clone, Copy)]
struct LineItem {
    x0: f32,
    y0: f32,
    x1: f32,
    y1: f32,
    width: f32,
    color: Color,
}

#[derive(Debug, Clone, Copy)]
struct WedgeItem {
    cx: f32,
    cy: f32,
    outer: f32,
    inner: f32,
    start: f32,
    sweep: f32,
    color: Color,
}

/// All chart geometry resolved in the fixed 500x300 space, split into the
/// rasterized part (rects, lines, wedges) and the vector text overlay.
/// Computing it is pure, which is what the layout tests pin.
#[derive(Debug, Clone, Default)]
pub struct ChartLayout {
    rects: Vec<RectItem>,
    lines: Vec<LineItem>,
    wedges: Vec<WedgeItem>,
    text: Vec<TextItem>,
}

fn validate(spec: &ChartSpec) -> Result<(), ChartError> {
    if spec.labels.is_empty() || spec.series.is_empty() {
        return Err(ChartError::EmptyData(spec.title.clone()));
    }
    for series in &spec.series {
        if series.values.len() != spec.labels.len() {
            return Err(ChartError::LabelMismatch {
                series: series.name.clone(),
                labels: spec.labels.len(),
                values: series.values.len(),
            });
        }
        if series.values.iter().any(|v| !v.is_finite() || *v < 0.0) {
            return Err(ChartError::BadValue(series.name.clone()));
        }
    }
    Ok(())
}

/// Smallest "nice" axis maximum covering `max` with `AXIS_TICKS` intervals.
fn nice_axis_max(max: f64) -> f64 {
    let raw_step = max / AXIS_TICKS as f64;
    let magnitude = 10f64.powf(raw_step.log10().floor());
    let norm = raw_step / magnitude;
    let step = if norm <= 1.0 {
        1.0
    } else if norm <= 2.0 {
        2.0
    } else if norm <= 2.5 {
        2.5
    } else if norm <= 5.0 {
        5.0
    } else {
        10.0
    } * magnitude;
    step * AXIS_TICKS as f64
}

impl ChartLayout {
    pub fn compute(spec: &ChartSpec, theme: &Theme) -> Result<ChartLayout, ChartError> {
        validate(spec)?;
        let mut layout = ChartLayout::default();
        layout.text.push(TextItem {
            x: CHART_WIDTH / 2.0,
            y: 6.0,
            size: 13.0,
            bold: true,
            color: theme.text,
            anchor: Anchor::Middle,
            text: spec.title.clone(),
        });
        match spec.kind {
            ChartKind::Bar => layout.bar(spec, theme)?,
            ChartKind::Pie => layout.radial(spec, theme, 0.0)?,
            ChartKind::Doughnut => layout.radial(spec, theme, 0.5)?,
        }
        Ok(layout)
    }

    fn bar(&mut self, spec: &ChartSpec, theme: &Theme) -> Result<(), ChartError> {
        let max = spec
            .series
            .iter()
            .flat_map(|s| s.values.iter().copied())
            .fold(0.0f64, f64::max);
        if max <= 0.0 {
            return Err(ChartError::EmptyData(spec.title.clone()));
        }
        let axis_max = nice_axis_max(max);

        let left = 62.0;
        let right = 488.0;
        let top = 34.0;
        let bottom = 232.0;
        let plot_w = right - left;
        let plot_h = bottom - top;

        // Gridlines, tick labels, then the two axis lines on top.
        for tick in 0..=AXIS_TICKS {
            let value = axis_max * tick as f64 / AXIS_TICKS as f64;
            let y = bottom - plot_h * tick as f32 / AXIS_TICKS as f32;
            if tick > 0 {
                self.lines.push(LineItem {
                    x0: left,
                    y0: y,
                    x1: right,
                    y1: y,
                    width: 0.5,
                    color: theme.stripe_odd,
                });
            }
            self.text.push(TextItem {
                x: left - 6.0,
                y: y - 4.0,
                size: 8.0,
                bold: false,
                color: theme.muted,
                anchor: Anchor::End,
                text: format::format_axis_currency(value),
            });
        }
        self.lines.push(LineItem {
            x0: left,
            y0: top,
            x1: left,
            y1: bottom,
            width: 1.0,
            color: theme.muted,
        });
        self.lines.push(LineItem {
            x0: left,
            y0: bottom,
            x1: right,
            y1: bottom,
            width: 1.0,
            color: theme.muted,
        });

        let clusters = spec.labels.len();
        let cluster_w = plot_w / clusters as f32;
        let group_w = cluster_w * 0.72;
        let bar_w = group_w / spec.series.len() as f32;

        for (li, label) in spec.labels.iter().enumerate() {
            let cluster_x = left + cluster_w * li as f32;
            for (si, series) in spec.series.iter().enumerate() {
                let value = series.values[li];
                let height = (value / axis_max) as f32 * plot_h;
                if height <= 0.0 {
                    continue;
                }
                self.rects.push(RectItem {
                    x: cluster_x + (cluster_w - group_w) / 2.0 + bar_w * si as f32,
                    y: bottom - height,
                    width: bar_w * 0.9,
                    height,
                    color: series.color,
                });
            }
            self.text.push(TextItem {
                x: cluster_x + cluster_w / 2.0,
                y: bottom + 6.0,
                size: 8.0,
                bold: false,
                color: theme.muted,
                anchor: Anchor::Middle,
                text: label.clone(),
            });
        }

        // Bottom legend, centered as one row.
        let legend_y = 272.0;
        let entry_widths: Vec<f32> = spec
            .series
            .iter()
            .map(|s| 12.0 + font::text_width(font::REGULAR, Pt::from_f32(8.0), &s.name).to_f32())
            .collect();
        let total: f32 = entry_widths.iter().sum::<f32>() + 14.0 * (spec.series.len() - 1) as f32;
        let mut x = (CHART_WIDTH - total) / 2.0;
        for (series, entry_width) in spec.series.iter().zip(&entry_widths) {
            self.rects.push(RectItem {
                x,
                y: legend_y + 1.0,
                width: 8.0,
                height: 8.0,
                color: series.color,
            });
            self.text.push(TextItem {
                x: x + 12.0,
                y: legend_y,
                size: 8.0,
                bold: false,
                color: theme.text,
                anchor: Anchor::Start,
                text: series.name.clone(),
            });
            x += entry_width + 14.0;
        }
        Ok(())
    }

    fn radial(
        &mut self,
        spec: &ChartSpec,
        theme: &Theme,
        cutout_ratio: f32,
    ) -> Result<(), ChartError> {
        let series = &spec.series[0];
        let sum: f64 = series.values.iter().sum();
        if sum <= 0.0 {
            return Err(ChartError::EmptyData(spec.title.clone()));
        }

        let cx = 150.0;
        let cy = 168.0;
        let outer = 100.0;
        let inner = outer * cutout_ratio;

        let mut start = -PI / 2.0;
        for (i, value) in series.values.iter().enumerate() {
            let sweep = (value / sum) as f32 * 2.0 * PI;
            if sweep > 0.0 {
                self.wedges.push(WedgeItem {
                    cx,
                    cy,
                    outer,
                    inner,
                    start,
                    sweep,
                    color: theme.palette_color(i),
                });
            }
            start += sweep;
        }

        // Right-side legend: swatch plus "label (pct%)".
        let legend_x = 296.0;
        let mut y = 72.0;
        for (i, (label, value)) in spec.labels.iter().zip(&series.values).enumerate() {
            let pct = (value / sum * 100.0).round() as i64;
            self.rects.push(RectItem {
                x: legend_x,
                y: y + 1.0,
                width: 10.0,
                height: 10.0,
                color: theme.palette_color(i),
            });
            let budget = Pt::from_f32(CHART_WIDTH - legend_x - 22.0);
            let entry = font::truncate_to_width(
                font::REGULAR,
                Pt::from_f32(9.0),
                &format!("{label} ({pct}%)"),
                budget,
            );
            self.text.push(TextItem {
                x: legend_x + 16.0,
                y,
                size: 9.0,
                bold: false,
                color: theme.text,
                anchor: Anchor::Start,
                text: entry,
            });
            y += 18.0;
        }
        Ok(())
    }

    #[cfg(test)]
    fn wedge_sweeps(&self) -> Vec<f32> {
        self.wedges.iter().map(|w| w.sweep).collect()
    }

    #[cfg(test)]
    fn bar_heights(&self, color: Color) -> Vec<f32> {
        self.rects
            .iter()
            .filter(|r| r.color == color && r.height > 8.0)
            .map(|r| r.height)
            .collect()
    }
}

fn to_sk_color(color: Color) -> tiny_skia::Color {
    let r = color.r.clamp(0.0, 1.0);
    let g = color.g.clamp(0.0, 1.0);
    let b = color.b.clamp(0.0, 1.0);
    tiny_skia::Color::from_rgba(r, g, b, 1.0)
        .unwrap_or_else(|| tiny_skia::Color::from_rgba8(0, 0, 0, 255))
}

/// Appends cubic segments approximating an arc of `sweep` radians. Split
/// at 90-degree steps; the standard 4/3*tan(t/4) control distance keeps
/// the error under half a device pixel at this scale.
fn arc_to(pb: &mut PathBuilder, cx: f32, cy: f32, r: f32, start: f32, sweep: f32) {
    let segments = (libm::fabsf(sweep) / (PI / 2.0)).ceil().max(1.0) as usize;
    let step = sweep / segments as f32;
    let k = 4.0 / 3.0 * libm::tanf(step / 4.0);
    let mut angle = start;
    for _ in 0..segments {
        let next = angle + step;
        let (sin0, cos0) = (libm::sinf(angle), libm::cosf(angle));
        let (sin1, cos1) = (libm::sinf(next), libm::cosf(next));
        pb.cubic_to(
            cx + r * (cos0 - k * sin0),
            cy + r * (sin0 + k * cos0),
            cx + r * (cos1 + k * sin1),
            cy + r * (sin1 - k * cos1),
            cx + r * cos1,
            cy + r * sin1,
        );
        angle = next;
    }
}

fn wedge_path(wedge: &WedgeItem) -> Option<tiny_skia::Path> {
    let s = RASTER_SCALE;
    let mut pb = PathBuilder::new();
    let cx = wedge.cx * s;
    let cy = wedge.cy * s;
    let outer = wedge.outer * s;
    let end = wedge.start + wedge.sweep;
    let (sin_s, cos_s) = (libm::sinf(wedge.start), libm::cosf(wedge.start));
    if wedge.inner <= 0.0 {
        pb.move_to(cx, cy);
        pb.line_to(cx + outer * cos_s, cy + outer * sin_s);
        arc_to(&mut pb, cx, cy, outer, wedge.start, wedge.sweep);
        pb.close();
    } else {
        let inner = wedge.inner * s;
        let (sin_e, cos_e) = (libm::sinf(end), libm::cosf(end));
        pb.move_to(cx + outer * cos_s, cy + outer * sin_s);
        arc_to(&mut pb, cx, cy, outer, wedge.start, wedge.sweep);
        pb.line_to(cx + inner * cos_e, cy + inner * sin_e);
        arc_to(&mut pb, cx, cy, inner, end, -wedge.sweep);
        pb.close();
    }
    pb.finish()
}

/// Paints the geometry half of the layout into RGB pixels. Stateless with
/// respect to the document: rasterization touches no shared layout state,
/// so it could run off-thread for independent documents.
pub fn rasterize(layout: &ChartLayout) -> Result<RasterImage, ChartError> {
    let s = RASTER_SCALE;
    let width_px = (CHART_WIDTH * s) as u32;
    let height_px = (CHART_HEIGHT * s) as u32;
    let mut pixmap = Pixmap::new(width_px, height_px)
        .ok_or_else(|| ChartError::Raster(format!("invalid canvas {width_px}x{height_px}")))?;
    pixmap.fill(tiny_skia::Color::from_rgba8(255, 255, 255, 255));

    let mut paint = Paint::default();
    paint.anti_alias = true;

    for line in &layout.lines {
        let mut pb = PathBuilder::new();
        pb.move_to(line.x0 * s, line.y0 * s);
        pb.line_to(line.x1 * s, line.y1 * s);
        let Some(path) = pb.finish() else { continue };
        paint.set_color(to_sk_color(line.color));
        let stroke = Stroke {
            width: line.width * s,
            ..Stroke::default()
        };
        pixmap.stroke_path(&path, &paint, &stroke, Transform::identity(), None);
    }

    for rect in &layout.rects {
        let Some(sk_rect) =
            SkRect::from_xywh(rect.x * s, rect.y * s, rect.width * s, rect.height * s)
        else {
            continue;
        };
        paint.set_color(to_sk_color(rect.color));
        pixmap.fill_rect(sk_rect, &paint, Transform::identity(), None);
    }

    for wedge in &layout.wedges {
        let Some(path) = wedge_path(wedge) else {
            continue;
        };
        paint.set_color(to_sk_color(wedge.color));
        pixmap.fill_path(&path, &paint, FillRule::Winding, Transform::identity(), None);
    }

    let data = pixmap.data();
    let mut rgb = Vec::with_capacity((width_px * height_px * 3) as usize);
    for px in data.chunks_exact(4) {
        rgb.extend_from_slice(&px[..3]);
    }
    Ok(RasterImage {
        width_px,
        height_px,
        rgb,
    })
}

/// Places the chart through the shared cursor: reserves the block (which
/// may start a new page), embeds the raster, then overlays title, axis,
/// and legend text as vector commands mapped into the placed rect.
pub fn draw_chart(
    canvas: &mut Canvas,
    frame: &mut Frame,
    theme: &Theme,
    spec: &ChartSpec,
) -> Result<(), ChartError> {
    let layout = ChartLayout::compute(spec, theme)?;
    let image = rasterize(&layout)?;

    let content_w = frame.content_width().to_f32();
    let scale = (content_w / CHART_WIDTH).min(1.0);
    let drawn_w = Pt::from_f32(CHART_WIDTH * scale);
    let drawn_h = Pt::from_f32(CHART_HEIGHT * scale);

    // The break is decided before the raster is registered so the image
    // and its text overlay always land on the same page.
    frame.reserve(canvas, drawn_h);
    let id = canvas.register_image(image);
    let pos = frame.advance(canvas, drawn_h);
    frame.gap(Pt::from_i32(10));
    let x0 = pos.x + (frame.content_width() - drawn_w) / 2;
    canvas.draw_image(x0, pos.y, drawn_w, drawn_h, id);

    for item in &layout.text {
        let size = Pt::from_f32(item.size * scale);
        let face = if item.bold { font::BOLD } else { font::REGULAR };
        let width = font::text_width(face, size, &item.text);
        let anchor_x = x0 + Pt::from_f32(item.x * scale);
        let x = match item.anchor {
            Anchor::Start => anchor_x,
            Anchor::Middle => anchor_x - width / 2,
            Anchor::End => anchor_x - width,
        };
        canvas.set_fill_color(item.color);
        canvas.set_font(face, size);
        canvas.draw_string(x, pos.y + Pt::from_f32(item.y * scale), item.text.clone());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bar_spec() -> ChartSpec {
        ChartSpec {
            kind: ChartKind::Bar,
            title: "Income vs Expenses".into(),
            labels: vec!["Jan 2026".into(), "Feb 2026".into()],
            series: vec![ChartSeries {
                name: "Expenses".into(),
                values: vec![100.0, 300.0],
                color: Color::from_rgb8(0xC0, 0x39, 0x2B),
            }],
        }
    }

    fn pie_spec(kind: ChartKind) -> ChartSpec {
        ChartSpec {
            kind,
            title: "Fund Allocation".into(),
            labels: vec!["Admin".into(), "Reserve".into(), "Sinking".into()],
            series: vec![ChartSeries {
                name: "Funds".into(),
                values: vec![1.0, 2.0, 1.0],
                color: Color::from_rgb8(0x2E, 0x86, 0xC1),
            }],
        }
    }

    #[test]
    fn bar_heights_are_proportional_to_values() {
        let theme = Theme::default();
        let layout = ChartLayout::compute(&bar_spec(), &theme).unwrap();
        let heights = layout.bar_heights(Color::from_rgb8(0xC0, 0x39, 0x2B));
        assert_eq!(heights.len(), 2);
        assert!((heights[1] / heights[0] - 3.0).abs() < 1e-4);
    }

    #[test]
    fn label_value_mismatch_is_a_caller_error() {
        let mut spec = bar_spec();
        spec.series[0].values.pop();
        let err = ChartLayout::compute(&spec, &Theme::default()).unwrap_err();
        assert!(matches!(err, ChartError::LabelMismatch { .. }));
    }

    #[test]
    fn negative_values_are_rejected() {
        let mut spec = bar_spec();
        spec.series[0].values[0] = -1.0;
        let err = ChartLayout::compute(&spec, &Theme::default()).unwrap_err();
        assert!(matches!(err, ChartError::BadValue(_)));
    }

    #[test]
    fn all_zero_bar_chart_has_nothing_to_draw() {
        let mut spec = bar_spec();
        spec.series[0].values = vec![0.0, 0.0];
        let err = ChartLayout::compute(&spec, &Theme::default()).unwrap_err();
        assert!(matches!(err, ChartError::EmptyData(_)));
    }

    #[test]
    fn wedge_sweeps_cover_the_full_turn() {
        let layout = ChartLayout::compute(&pie_spec(ChartKind::Pie), &Theme::default()).unwrap();
        let total: f32 = layout.wedge_sweeps().iter().sum();
        assert!((total - 2.0 * PI).abs() < 1e-4);
        // Proportional: 1:2:1.
        let sweeps = layout.wedge_sweeps();
        assert!((sweeps[1] - sweeps[0] * 2.0).abs() < 1e-4);
    }

    #[test]
    fn doughnut_differs_from_pie_only_by_cutout() {
        let theme = Theme::default();
        let pie = ChartLayout::compute(&pie_spec(ChartKind::Pie), &theme).unwrap();
        let doughnut = ChartLayout::compute(&pie_spec(ChartKind::Doughnut), &theme).unwrap();
        assert!(pie.wedges.iter().all(|w| w.inner == 0.0));
        assert!(doughnut.wedges.iter().all(|w| w.inner > 0.0));
        assert_eq!(pie.wedge_sweeps(), doughnut.wedge_sweeps());
    }

    #[test]
    fn nice_axis_max_covers_and_rounds() {
        assert_eq!(nice_axis_max(970.0), 1000.0);
        assert_eq!(nice_axis_max(4000.0), 4000.0);
        assert!(nice_axis_max(5300.0) >= 5300.0);
    }

    #[test]
    fn rasterized_chart_has_expected_dimensions_and_white_corner() {
        let layout = ChartLayout::compute(&pie_spec(ChartKind::Pie), &Theme::default()).unwrap();
        let image = rasterize(&layout).unwrap();
        assert_eq!(image.width_px, 1000);
        assert_eq!(image.height_px, 600);
        assert_eq!(image.rgb.len(), 1000 * 600 * 3);
        assert_eq!(&image.rgb[..3], &[255, 255, 255]);
    }

    #[test]
    fn draw_chart_embeds_image_and_title_overlay() {
        use crate::canvas::Command;
        use crate::types::{Margins, Size};
        let size = Size::letter();
        let mut canvas = Canvas::new(size);
        let mut frame = Frame::new(size, Margins::all(50.0));
        draw_chart(&mut canvas, &mut frame, &Theme::default(), &pie_spec(ChartKind::Pie)).unwrap();
        let doc = canvas.finish();
        assert_eq!(doc.images.len(), 1);
        assert!(doc.pages[0].commands.iter().any(|c| matches!(
            c,
            Command::DrawImage { resource_id, .. } if resource_id == "chart0"
        )));
        assert!(doc.pages[0].commands.iter().any(|c| matches!(
            c,
            Command::DrawString { text, .. } if text == "Fund Allocation"
        )));
    }
}
