use crate::canvas::{Command, Document, Page};
use crate::error::RenderError;
use crate::font;
use crate::types::{Color, Pt};
use chrono::{DateTime, Utc};
use lopdf::{Dictionary, Document as LoDocument, Object, Stream, dictionary};

/// Document-level metadata stamped into the Info dictionary.
pub(crate) struct PdfMeta<'a> {
    pub title: &'a str,
    pub created: Option<DateTime<Utc>>,
}

/// Serializes the laid-out document. Builds the object graph with lopdf
/// (page tree, base-14 font dicts, chart image XObjects, content streams)
/// and returns the finished buffer. Any fault here is fatal: the caller
/// gets `RenderError::Finalize` and no bytes.
pub(crate) fn document_to_pdf(document: &Document, meta: &PdfMeta) -> Result<Vec<u8>, RenderError> {
    let mut pdf = LoDocument::with_version("1.5");
    let pages_id = pdf.new_object_id();

    let font_regular_id = pdf.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => font::REGULAR,
        "Encoding" => "WinAnsiEncoding",
    });
    let font_bold_id = pdf.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => font::BOLD,
        "Encoding" => "WinAnsiEncoding",
    });

    let mut image_ids: Vec<(String, lopdf::ObjectId)> = Vec::new();
    for (resource_id, image) in &document.images {
        let expected = image.width_px as usize * image.height_px as usize * 3;
        if image.rgb.len() != expected {
            return Err(RenderError::Finalize(format!(
                "image '{resource_id}' has {} bytes, expected {expected}",
                image.rgb.len()
            )));
        }
        let stream = Stream::new(
            dictionary! {
                "Type" => "XObject",
                "Subtype" => "Image",
                "Width" => image.width_px as i64,
                "Height" => image.height_px as i64,
                "ColorSpace" => "DeviceRGB",
                "BitsPerComponent" => 8,
            },
            image.rgb.clone(),
        );
        image_ids.push((resource_id.clone(), pdf.add_object(stream)));
    }

    let page_height = document.page_size.height;
    let mut page_ids = Vec::with_capacity(document.pages.len());
    for page in &document.pages {
        let content = render_page(page, page_height);
        let content_id = pdf.add_object(Stream::new(Dictionary::new(), content.into_bytes()));

        let mut resources = Dictionary::new();
        resources.set(
            "Font",
            dictionary! {
                "F1" => Object::Reference(font_regular_id),
                "F2" => Object::Reference(font_bold_id),
            },
        );
        if !image_ids.is_empty() {
            let mut xobjects = Dictionary::new();
            for (name, id) in &image_ids {
                xobjects.set(name.as_str(), Object::Reference(*id));
            }
            resources.set("XObject", Object::Dictionary(xobjects));
        }

        let page_dict = dictionary! {
            "Type" => "Page",
            "Parent" => Object::Reference(pages_id),
            "MediaBox" => vec![
                0.into(),
                0.into(),
                document.page_size.width.to_f32().into(),
                page_height.to_f32().into(),
            ],
            "Contents" => Object::Reference(content_id),
            "Resources" => Object::Dictionary(resources),
        };
        page_ids.push(pdf.add_object(page_dict));
    }

    let kids: Vec<Object> = page_ids.iter().map(|id| Object::Reference(*id)).collect();
    pdf.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => page_ids.len() as i64,
        }),
    );

    let catalog_id = pdf.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => Object::Reference(pages_id),
    });

    let mut info = Dictionary::new();
    info.set("Title", Object::string_literal(meta.title));
    info.set("Producer", Object::string_literal("stratapress"));
    if let Some(created) = meta.created {
        info.set(
            "CreationDate",
            Object::string_literal(created.format("D:%Y%m%d%H%M%SZ").to_string()),
        );
    }
    let info_id = pdf.add_object(Object::Dictionary(info));

    pdf.trailer.set("Root", catalog_id);
    pdf.trailer.set("Info", info_id);
    pdf.compress();

    let mut buffer = Vec::new();
    pdf.save_to(&mut buffer)
        .map_err(|err| RenderError::Finalize(err.to_string()))?;
    Ok(buffer)
}

/// Emits the content-stream operators for one page. Commands record
/// top-left-origin coordinates; PDF user space is bottom-left, so y
/// flips here and nowhere else.
fn render_page(page: &Page, page_height: Pt) -> String {
    let mut out = String::new();
    let mut current_font_name = font::REGULAR.to_string();
    let mut current_font_size = Pt::from_f32(12.0);

    for cmd in &page.commands {
        match cmd {
            Command::SaveState => out.push_str("q\n"),
            Command::RestoreState => out.push_str("Q\n"),
            Command::SetFillColor(color) => out.push_str(&fill_color_op(*color)),
            Command::SetStrokeColor(color) => out.push_str(&stroke_color_op(*color)),
            Command::SetLineWidth(width) => {
                out.push_str(&format!("{} w\n", fmt_pt(*width)));
            }
            Command::SetFontName(name) => {
                current_font_name = name.clone();
            }
            Command::SetFontSize(size) => {
                current_font_size = *size;
            }
            Command::MoveTo { x, y } => {
                out.push_str(&format!("{} {} m\n", fmt_pt(*x), fmt_pt(page_height - *y)));
            }
            Command::LineTo { x, y } => {
                out.push_str(&format!("{} {} l\n", fmt_pt(*x), fmt_pt(page_height - *y)));
            }
            Command::ClosePath => out.push_str("h\n"),
            Command::Fill => out.push_str("f\n"),
            Command::Stroke => out.push_str("S\n"),
            Command::DrawString { x, y, text } => {
                let resource = if current_font_name == font::BOLD {
                    "F2"
                } else {
                    "F1"
                };
                out.push_str("BT\n");
                out.push_str(&format!("/{} {} Tf\n", resource, fmt_pt(current_font_size)));
                out.push_str(&format!(
                    "{} {} Td\n",
                    fmt_pt(*x),
                    fmt_pt(page_height - *y - current_font_size)
                ));
                out.push_str(&format!("({}) Tj\n", encode_winansi(text)));
                out.push_str("ET\n");
            }
            Command::DrawRect {
                x,
                y,
                width,
                height,
            } => {
                out.push_str(&format!(
                    "{} {} {} {} re\nf\n",
                    fmt_pt(*x),
                    fmt_pt(page_height - *y - *height),
                    fmt_pt(*width),
                    fmt_pt(*height)
                ));
            }
            Command::DrawImage {
                x,
                y,
                width,
                height,
                resource_id,
            } => {
                out.push_str("q\n");
                out.push_str(&format!(
                    "{} 0 0 {} {} {} cm\n",
                    fmt_pt(*width),
                    fmt_pt(*height),
                    fmt_pt(*x),
                    fmt_pt(page_height - *y - *height)
                ));
                out.push_str(&format!("/{} Do\n", resource_id));
                out.push_str("Q\n");
            }
        }
    }
    out
}

fn fill_color_op(color: Color) -> String {
    format!(
        "{} {} {} rg\n",
        fmt_unit(color.r),
        fmt_unit(color.g),
        fmt_unit(color.b)
    )
}

fn stroke_color_op(color: Color) -> String {
    format!(
        "{} {} {} RG\n",
        fmt_unit(color.r),
        fmt_unit(color.g),
        fmt_unit(color.b)
    )
}

/// Literal-string encoding for the WinAnsi base-14 fonts. Delimiters are
/// escaped, cp1252 extension characters map to their single byte, and
/// anything unrepresentable degrades to '?'.
fn encode_winansi(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        let byte: u8 = match ch {
            '\u{00}'..='\u{7F}' => ch as u8,
            '\u{A0}'..='\u{FF}' => ch as u8,
            '\u{20AC}' => 0x80,
            '\u{2026}' => 0x85,
            '\u{2018}' => 0x91,
            '\u{2019}' => 0x92,
            '\u{201C}' => 0x93,
            '\u{201D}' => 0x94,
            '\u{2022}' => 0x95,
            '\u{2013}' => 0x96,
            '\u{2014}' => 0x97,
            '\u{2122}' => 0x99,
            _ => b'?',
        };
        match byte {
            b'\\' => out.push_str("\\\\"),
            b'(' => out.push_str("\\("),
            b')' => out.push_str("\\)"),
            0x20..=0x7E => out.push(byte as char),
            _ => out.push_str(&format!("\\{byte:03o}")),
        }
    }
    out
}

fn fmt_pt(value: Pt) -> String {
    format_milli(value.to_milli_i64())
}

fn fmt_unit(value: f32) -> String {
    if !value.is_finite() {
        return "0".to_string();
    }
    format_milli((value.clamp(0.0, 1.0) as f64 * 1000.0).round() as i64)
}

fn format_milli(milli: i64) -> String {
    if milli == 0 {
        return "0".to_string();
    }
    let sign = if milli < 0 { "-" } else { "" };
    let abs = milli.abs();
    let int_part = abs / 1000;
    let frac_part = abs % 1000;
    if frac_part == 0 {
        format!("{sign}{int_part}")
    } else {
        let frac = format!("{frac_part:03}");
        let frac = frac.trim_end_matches('0');
        format!("{sign}{int_part}.{frac}")
    }
}
