use crate::canvas::Canvas;
use crate::font;
use crate::frame::Frame;
use crate::types::{Color, Pt};

/// One labeled metric in the dashboard row.
#[derive(Debug, Clone)]
pub struct Kpi {
    pub label: String,
    pub value: String,
    pub color: Color,
}

impl Kpi {
    pub fn new(label: impl Into<String>, value: impl Into<String>, color: Color) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            color,
        }
    }
}

/// Every dashboard row lays out exactly this many slots; shorter input
/// leaves the trailing slots blank so the horizontal rhythm matches
/// across report types.
pub const SLOTS: usize = 4;

fn box_height() -> Pt {
    Pt::from_i32(70)
}

fn slot_gap() -> Pt {
    Pt::from_i32(10)
}

/// Draws the 4-slot metric grid and advances the cursor once for the whole
/// row. Extra entries beyond the fourth are ignored.
pub fn draw_kpi_row(canvas: &mut Canvas, frame: &mut Frame, kpis: &[Kpi]) {
    let height = box_height();
    let row = frame.advance(canvas, height);
    frame.gap(slot_gap());
    let slot_width = (frame.content_width() - slot_gap() * (SLOTS as i32 - 1)) / SLOTS as i32;
    let pad = Pt::from_i32(10);
    let text_budget = (slot_width - pad * 2).max(Pt::ZERO);

    for (i, kpi) in kpis.iter().take(SLOTS).enumerate() {
        let x = row.x + (slot_width + slot_gap()) * i as i32;
        canvas.set_fill_color(kpi.color);
        canvas.draw_rect(x, row.y, slot_width, height);

        canvas.set_fill_color(Color::WHITE);
        let label_size = Pt::from_f32(8.0);
        canvas.set_font(font::REGULAR, label_size);
        let label = font::truncate_to_width(font::REGULAR, label_size, &kpi.label, text_budget);
        canvas.draw_string(x + pad, row.y + Pt::from_i32(14), label);

        let value_size = Pt::from_f32(16.0);
        canvas.set_font(font::BOLD, value_size);
        let value = font::truncate_to_width(font::BOLD, value_size, &kpi.value, text_budget);
        canvas.draw_string(x + pad, row.y + Pt::from_i32(34), value);
    }
}
