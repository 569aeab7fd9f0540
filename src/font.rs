use crate::types::Pt;

pub const REGULAR: &str = "Helvetica";
pub const BOLD: &str = "Helvetica-Bold";

const ELLIPSIS: char = '\u{2026}';

// AFM advance widths (per mille of the em) for the printable ASCII range
// 0x20..=0x7E of the two base-14 faces the engine references. Everything
// the renderer measures funnels through these tables, so clipping and
// alignment agree with what a conforming viewer draws.
#[rustfmt::skip]
const HELVETICA: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333,
    278, 278, 556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278,
    584, 584, 584, 556, 1015, 667, 667, 722, 722, 667, 611, 778, 722, 278,
    500, 667, 556, 833, 722, 778, 667, 778, 722, 667, 611, 722, 667, 944,
    667, 667, 611, 278, 278, 278, 469, 556, 333, 556, 556, 500, 556, 556,
    278, 556, 556, 222, 222, 500, 222, 833, 556, 556, 556, 556, 333, 500,
    278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

#[rustfmt::skip]
const HELVETICA_BOLD: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333,
    278, 278, 556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333,
    584, 584, 584, 611, 975, 722, 722, 722, 722, 667, 611, 778, 722, 278,
    556, 722, 611, 833, 722, 778, 667, 778, 722, 667, 611, 722, 667, 944,
    667, 667, 611, 333, 278, 333, 584, 556, 333, 556, 611, 556, 611, 556,
    333, 611, 611, 278, 278, 556, 278, 889, 611, 611, 611, 611, 389, 556,
    333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

fn width_table(font_name: &str) -> &'static [u16; 95] {
    if font_name == BOLD {
        &HELVETICA_BOLD
    } else {
        &HELVETICA
    }
}

fn char_width_milli(table: &[u16; 95], ch: char) -> u32 {
    match ch {
        '\u{20}'..='\u{7E}' => table[ch as usize - 0x20] as u32,
        ELLIPSIS => 1000,
        '\u{A0}' => 278,
        // Width of the WinAnsi fallback '?' keeps estimates honest for
        // characters the encoder will substitute anyway.
        _ => table['?' as usize - 0x20] as u32,
    }
}

/// Advance width of `text` at `font_size`.
pub fn text_width(font_name: &str, font_size: Pt, text: &str) -> Pt {
    let table = width_table(font_name);
    let milli: u64 = text
        .chars()
        .map(|ch| char_width_milli(table, ch) as u64)
        .sum();
    // width = sum(per-mille) * size / 1000, carried out in millipoints.
    let size_milli = font_size.to_milli_i64().max(0) as u64;
    Pt::from_milli_i64(((milli * size_milli) / 1000) as i64)
}

/// Clips `text` to `max_width`, appending an ellipsis when anything was
/// removed. Column cells never wrap; this is the only overflow policy.
pub fn truncate_to_width(font_name: &str, font_size: Pt, text: &str, max_width: Pt) -> String {
    if text_width(font_name, font_size, text) <= max_width {
        return text.to_string();
    }
    let ellipsis_width = text_width(font_name, font_size, &ELLIPSIS.to_string());
    let budget = max_width - ellipsis_width;
    if budget <= Pt::ZERO {
        return String::new();
    }
    let mut out = String::new();
    let mut used = Pt::ZERO;
    let table = width_table(font_name);
    let size_milli = font_size.to_milli_i64().max(0) as u64;
    for ch in text.chars() {
        let w = Pt::from_milli_i64(((char_width_milli(table, ch) as u64 * size_milli) / 1000) as i64);
        if used + w > budget {
            break;
        }
        used += w;
        out.push(ch);
    }
    while out.ends_with(' ') {
        out.pop();
    }
    out.push(ELLIPSIS);
    out
}
