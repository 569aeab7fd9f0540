use crate::canvas::Canvas;
use crate::error::RenderError;
use crate::font;
use crate::frame::Frame;
use crate::theme::Theme;
use crate::types::{Color, Pt};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CellAlign {
    Left,
    Right,
    Center,
}

/// Column-constrained table. Widths are explicit points; text never wraps,
/// it is clipped with an ellipsis to its column.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableSpec {
    #[serde(default)]
    pub title: Option<String>,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
    pub column_widths: Vec<f64>,
    #[serde(default)]
    pub alignments: Option<Vec<CellAlign>>,
    #[serde(default)]
    pub summary_row: Option<Vec<String>>,
}

fn header_band() -> Pt {
    Pt::from_i32(20)
}

fn row_height() -> Pt {
    Pt::from_i32(18)
}

const CELL_PAD: f32 = 4.0;
const BAND_FONT_SIZE: f32 = 9.0;
const TITLE_SIZE: f32 = 12.0;

/// Structural invariants are caller contract; violations propagate rather
/// than being patched up.
fn validate(spec: &TableSpec, content_width: Pt) -> Result<(), RenderError> {
    let cols = spec.headers.len();
    if cols == 0 {
        return Err(RenderError::InvalidSpec("table has no columns".into()));
    }
    if spec.column_widths.len() != cols {
        return Err(RenderError::InvalidSpec(format!(
            "table has {} headers but {} column widths",
            cols,
            spec.column_widths.len()
        )));
    }
    if let Some(aligns) = &spec.alignments {
        if aligns.len() != cols {
            return Err(RenderError::InvalidSpec(format!(
                "table has {} headers but {} alignments",
                cols,
                aligns.len()
            )));
        }
    }
    for (i, row) in spec.rows.iter().enumerate() {
        if row.len() != cols {
            return Err(RenderError::InvalidSpec(format!(
                "table row {i} has {} cells, expected {cols}",
                row.len()
            )));
        }
    }
    if let Some(summary) = &spec.summary_row {
        if summary.len() != cols {
            return Err(RenderError::InvalidSpec(format!(
                "table summary row has {} cells, expected {cols}",
                summary.len()
            )));
        }
    }
    let total: Pt = spec.column_widths.iter().map(|w| Pt::from_f32(*w as f32)).sum();
    if total > content_width {
        return Err(RenderError::InvalidSpec(format!(
            "column widths total {}pt but content width is {}pt",
            total.to_f32(),
            content_width.to_f32()
        )));
    }
    Ok(())
}

fn cell_x(origin: Pt, col_width: Pt, align: CellAlign, font_name: &str, size: Pt, text: &str) -> Pt {
    let pad = Pt::from_f32(CELL_PAD);
    match align {
        CellAlign::Left => origin + pad,
        CellAlign::Right => origin + col_width - pad - font::text_width(font_name, size, text),
        CellAlign::Center => {
            origin + (col_width - font::text_width(font_name, size, text)) / 2
        }
    }
}

fn draw_band(
    canvas: &mut Canvas,
    x: Pt,
    y: Pt,
    band_width: Pt,
    band_height: Pt,
    fill: Color,
    text_color: Color,
    font_name: &'static str,
    cells: &[String],
    widths: &[Pt],
    aligns: &[CellAlign],
) {
    canvas.set_fill_color(fill);
    canvas.draw_rect(x, y, band_width, band_height);
    canvas.set_fill_color(text_color);
    let size = Pt::from_f32(BAND_FONT_SIZE);
    canvas.set_font(font_name, size);
    let text_y = y + (band_height - size) / 2;
    let mut offset = x;
    for ((cell, width), align) in cells.iter().zip(widths).zip(aligns) {
        let budget = (*width - Pt::from_f32(CELL_PAD * 2.0)).max(Pt::ZERO);
        let clipped = font::truncate_to_width(font_name, size, cell, budget);
        let tx = cell_x(offset, *width, *align, font_name, size, &clipped);
        canvas.draw_string(tx, text_y, clipped);
        offset += *width;
    }
}

/// Renders the table through the shared frame: optional title, header
/// band, striped rows (each row is one `advance`, so long tables paginate
/// themselves), then the optional summary band. Header bands are not
/// repeated on continuation pages.
pub fn draw_table(
    canvas: &mut Canvas,
    frame: &mut Frame,
    theme: &Theme,
    spec: &TableSpec,
) -> Result<(), RenderError> {
    validate(spec, frame.content_width())?;

    let widths: Vec<Pt> = spec
        .column_widths
        .iter()
        .map(|w| Pt::from_f32(*w as f32))
        .collect();
    let band_width: Pt = widths.iter().copied().sum();
    let aligns: Vec<CellAlign> = spec
        .alignments
        .clone()
        .unwrap_or_else(|| vec![CellAlign::Left; spec.headers.len()]);

    if let Some(title) = &spec.title {
        let title_size = Pt::from_f32(TITLE_SIZE);
        let pos = frame.advance(canvas, title_size * 1.5);
        canvas.set_fill_color(theme.brand);
        canvas.set_font(font::BOLD, title_size);
        canvas.draw_string(pos.x, pos.y, title.clone());
    }

    let head = frame.advance(canvas, header_band());
    draw_band(
        canvas,
        head.x,
        head.y,
        band_width,
        header_band(),
        theme.brand,
        Color::WHITE,
        font::BOLD,
        &spec.headers,
        &widths,
        &aligns,
    );

    for (index, row) in spec.rows.iter().enumerate() {
        let pos = frame.advance(canvas, row_height());
        let stripe = if index % 2 == 0 {
            theme.stripe_even
        } else {
            theme.stripe_odd
        };
        draw_band(
            canvas,
            pos.x,
            pos.y,
            band_width,
            row_height(),
            stripe,
            theme.text,
            font::REGULAR,
            row,
            &widths,
            &aligns,
        );
    }

    if let Some(summary) = &spec.summary_row {
        let pos = frame.advance(canvas, header_band());
        draw_band(
            canvas,
            pos.x,
            pos.y,
            band_width,
            header_band(),
            theme.summary_band,
            theme.brand,
            font::BOLD,
            summary,
            &widths,
            &aligns,
        );
    }

    Ok(())
}
