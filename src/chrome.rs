use crate::canvas::{Canvas, Command, Document};
use crate::font;
use crate::format;
use crate::frame::Frame;
use crate::model::ReportDocument;
use crate::theme::Theme;
use crate::types::{Color, Margins, Pt};
use chrono::{DateTime, Utc};

const BADGE_WIDTH: f32 = 180.0;

/// Draws the branded title block once, at the top of page 1, before any
/// report-sequence content.
pub fn draw_header(
    canvas: &mut Canvas,
    frame: &mut Frame,
    theme: &Theme,
    report: &ReportDocument,
    generated_at: &DateTime<Utc>,
) {
    let top_y = frame.cursor_y();

    // Brand line at the left; the org badge fills the matching right area.
    let brand_size = Pt::from_f32(10.0);
    let pos = frame.advance(canvas, Pt::from_i32(16));
    canvas.set_fill_color(theme.brand);
    canvas.set_font(font::BOLD, brand_size);
    let brand_text = report
        .org_name
        .clone()
        .unwrap_or_else(|| "Strata Management".to_string());
    canvas.draw_string(pos.x, pos.y, brand_text);

    if report.org_name.is_some() {
        draw_org_badge(canvas, frame, theme, report, top_y);
    }

    let title_size = Pt::from_f32(20.0);
    let pos = frame.advance(canvas, Pt::from_i32(30));
    canvas.set_fill_color(theme.brand);
    canvas.set_font(font::BOLD, title_size);
    let title_width = font::text_width(font::BOLD, title_size, &report.title);
    let centered = pos.x + (frame.content_width() - title_width) / 2;
    canvas.draw_string(centered.max(pos.x), pos.y + Pt::from_i32(4), report.title.clone());

    let meta_size = Pt::from_f32(9.0);
    let pos = frame.advance(canvas, Pt::from_i32(14));
    canvas.set_fill_color(theme.muted);
    canvas.set_font(font::REGULAR, meta_size);
    canvas.draw_string(
        pos.x,
        pos.y,
        format!("Generated: {}", format::format_timestamp(generated_at)),
    );

    // The period line only appears for a bounded range.
    if let Some(range) = &report.date_range {
        if !range.is_all_time() {
            let pos = frame.advance(canvas, Pt::from_i32(14));
            canvas.set_fill_color(theme.muted);
            canvas.set_font(font::REGULAR, meta_size);
            canvas.draw_string(
                pos.x,
                pos.y,
                format!(
                    "Report Period: {} \u{2013} {}",
                    format::format_date(Some(&range.start)),
                    format::format_date(Some(&range.end)),
                ),
            );
        }
    }

    // Accent rule separating the header from the body.
    let pos = frame.advance(canvas, Pt::from_i32(12));
    let rule_y = pos.y + Pt::from_i32(5);
    canvas.set_stroke_color(theme.accent);
    canvas.set_line_width(Pt::from_f32(2.0));
    canvas.move_to(pos.x, rule_y);
    canvas.line_to(frame.content_right(), rule_y);
    canvas.stroke();
    frame.gap(Pt::from_i32(8));
}

fn draw_org_badge(
    canvas: &mut Canvas,
    frame: &Frame,
    theme: &Theme,
    report: &ReportDocument,
    top_y: Pt,
) {
    let width = Pt::from_f32(BADGE_WIDTH);
    let x = frame.content_right() - width;
    let mut lines: Vec<(String, &'static str, f32)> = Vec::new();
    if let Some(name) = &report.org_name {
        lines.push((name.clone(), font::BOLD, 9.0));
    }
    if let Some(count) = report.org_unit_count {
        lines.push((format!("{count} units"), font::REGULAR, 8.0));
    }
    if let Some(address) = &report.org_address {
        lines.push((address.clone(), font::REGULAR, 8.0));
    }
    let height = Pt::from_i32(10 + 12 * lines.len() as i32);
    canvas.set_fill_color(theme.brand);
    canvas.draw_rect(x, top_y, width, height);
    canvas.set_fill_color(Color::WHITE);
    let pad = Pt::from_i32(8);
    let budget = width - pad * 2;
    let mut y = top_y + Pt::from_i32(6);
    for (text, face, size) in lines {
        let size = Pt::from_f32(size);
        canvas.set_font(face, size);
        let clipped = font::truncate_to_width(face, size, &text, budget);
        canvas.draw_string(x + pad, y, clipped);
        y += Pt::from_i32(12);
    }
}

/// Second pass: stamps the accent rule, copyright line, and
/// "Page i of N" on every finalized page. Must not run until the body
/// pass is complete; N is the finished page count.
pub fn stamp_footers(document: &mut Document, theme: &Theme, margins: &Margins) {
    let total = document.pages.len();
    let page_size = document.page_size;
    let rule_y = page_size.height - margins.bottom - Pt::from_i32(22);
    let text_y = rule_y + Pt::from_i32(5);
    let left = margins.left;
    let right = page_size.width - margins.right;
    let size = Pt::from_f32(8.0);

    for (index, page) in document.pages.iter_mut().enumerate() {
        let commands = &mut page.commands;
        commands.push(Command::SetStrokeColor(theme.accent));
        commands.push(Command::SetLineWidth(Pt::from_f32(0.75)));
        commands.push(Command::MoveTo { x: left, y: rule_y });
        commands.push(Command::LineTo { x: right, y: rule_y });
        commands.push(Command::Stroke);

        commands.push(Command::SetFillColor(theme.muted));
        commands.push(Command::SetFontName(font::REGULAR.to_string()));
        commands.push(Command::SetFontSize(size));
        commands.push(Command::DrawString {
            x: left,
            y: text_y,
            text: format!("\u{A9} {}", theme.footer_line),
        });

        let page_text = format!("Page {} of {}", index + 1, total);
        let width = font::text_width(font::REGULAR, size, &page_text);
        commands.push(Command::DrawString {
            x: right - width,
            y: text_y,
            text: page_text,
        });
    }
}
