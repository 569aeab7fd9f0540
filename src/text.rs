use crate::canvas::Canvas;
use crate::font;
use crate::frame::Frame;
use crate::types::{Color, Pt};

/// Style for flowing body text. `leading` is a factor of the font size.
#[derive(Debug, Clone, Copy)]
pub struct ParaStyle {
    pub font: &'static str,
    pub size: Pt,
    pub color: Color,
    pub leading: f32,
}

impl ParaStyle {
    pub fn body(color: Color) -> Self {
        Self {
            font: font::REGULAR,
            size: Pt::from_f32(10.0),
            color,
            leading: 1.4,
        }
    }

    pub fn small(color: Color) -> Self {
        Self {
            font: font::REGULAR,
            size: Pt::from_f32(9.0),
            color,
            leading: 1.35,
        }
    }

    fn line_height(&self) -> Pt {
        self.size * self.leading
    }
}

/// Greedy word wrap against the width budget. Words wider than the budget
/// are hard-split so a pathological token cannot stall the layout.
pub fn wrap_lines(font_name: &str, size: Pt, text: &str, max_width: Pt) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_width = Pt::ZERO;
    let space_width = font::text_width(font_name, size, " ");

    for word in text.split_whitespace() {
        let word_width = font::text_width(font_name, size, word);
        if word_width > max_width {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
                current_width = Pt::ZERO;
            }
            let mut piece = String::new();
            let mut piece_width = Pt::ZERO;
            for ch in word.chars() {
                let w = font::text_width(font_name, size, &ch.to_string());
                if piece_width + w > max_width && !piece.is_empty() {
                    lines.push(std::mem::take(&mut piece));
                    piece_width = Pt::ZERO;
                }
                piece.push(ch);
                piece_width += w;
            }
            current = piece;
            current_width = piece_width;
            continue;
        }
        let needed = if current.is_empty() {
            word_width
        } else {
            space_width + word_width
        };
        if current_width + needed > max_width && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
            current_width = Pt::ZERO;
            current.push_str(word);
            current_width += word_width;
        } else {
            if !current.is_empty() {
                current.push(' ');
                current_width += space_width;
            }
            current.push_str(word);
            current_width += word_width;
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Flows `text` through the frame one line at a time, so a paragraph can
/// break across pages between lines. Blank-line separated input renders as
/// distinct paragraphs with a half-line gap.
pub fn draw_paragraph(canvas: &mut Canvas, frame: &mut Frame, style: ParaStyle, text: &str) {
    let width = frame.content_width();
    let line_height = style.line_height();
    canvas.set_fill_color(style.color);
    canvas.set_font(style.font, style.size);
    let mut first_block = true;
    for block in text.split("\n\n") {
        let block = block.trim();
        if block.is_empty() {
            continue;
        }
        if !first_block {
            frame.gap(line_height * 0.5);
        }
        first_block = false;
        for line in wrap_lines(style.font, style.size, block, width) {
            let pos = frame.advance(canvas, line_height);
            // Style state resets on page breaks; reassert cheaply (the
            // canvas elides the setters when nothing changed).
            canvas.set_fill_color(style.color);
            canvas.set_font(style.font, style.size);
            canvas.draw_string(pos.x, pos.y, line);
        }
    }
}
