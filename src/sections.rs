use crate::canvas::Canvas;
use crate::chart::{self, ChartKind, ChartSeries, ChartSpec};
use crate::error::RenderError;
use crate::font;
use crate::format::{self, format_currency, format_date, format_percent};
use crate::frame::Frame;
use crate::kpi::{Kpi, draw_kpi_row};
use crate::model::{
    CommunicationsContent, FinancialContent, HomeSaleContent, MaintenanceContent,
    MeetingMinutesContent, ReportContent, ReportDocument, ReportKind,
};
use crate::table::{CellAlign, TableSpec, draw_table};
use crate::text::{ParaStyle, draw_paragraph};
use crate::theme::Theme;
use crate::types::Pt;
use log::warn;
use std::collections::BTreeMap;

/// Tables cap at this many rows; a trailing note names what was cut.
const TOP_ROWS: usize = 20;

/// Dispatches to the fixed rendering sequence for the report kind. A
/// content payload of the wrong variant is a caller contract violation.
pub(crate) fn render_content(
    canvas: &mut Canvas,
    frame: &mut Frame,
    theme: &Theme,
    report: &ReportDocument,
) -> Result<(), RenderError> {
    match (report.kind, &report.content) {
        (ReportKind::Financial, ReportContent::Financial(c)) => financial(canvas, frame, theme, c),
        (ReportKind::MeetingMinutes, ReportContent::MeetingMinutes(c)) => {
            meeting_minutes(canvas, frame, theme, c)
        }
        (ReportKind::Communications, ReportContent::Communications(c)) => {
            communications(canvas, frame, theme, c)
        }
        (ReportKind::Maintenance, ReportContent::Maintenance(c)) => {
            maintenance(canvas, frame, theme, c)
        }
        (ReportKind::HomeSalePackage, ReportContent::HomeSalePackage(c)) => {
            home_sale_package(canvas, frame, theme, c)
        }
        (kind, _) => Err(RenderError::InvalidSpec(format!(
            "content payload does not match report type {kind:?}"
        ))),
    }
}

/// Chart failures are absorbed here: the chart is omitted and the
/// sequence keeps flowing.
fn chart_block(canvas: &mut Canvas, frame: &mut Frame, theme: &Theme, spec: &ChartSpec) {
    if let Err(err) = chart::draw_chart(canvas, frame, theme, spec) {
        warn!("chart '{}' omitted: {err}", spec.title);
    }
}

fn section_heading(canvas: &mut Canvas, frame: &mut Frame, theme: &Theme, text: &str) {
    let size = Pt::from_f32(13.0);
    let pos = frame.advance(canvas, Pt::from_i32(24));
    canvas.set_fill_color(theme.brand);
    canvas.set_font(font::BOLD, size);
    canvas.draw_string(pos.x, pos.y + Pt::from_i32(6), text);
}

/// Column widths as fractions of the live content width, floored so
/// rounding can never push the total past the table width budget.
fn column_widths(frame: &Frame, fractions: &[f64]) -> Vec<f64> {
    let total = frame.content_width().to_f32() as f64;
    fractions.iter().map(|f| (total * f).floor()).collect()
}

fn plural(count: usize, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("{count} {singular}")
    } else {
        format!("{count} {plural}")
    }
}

fn financial(
    canvas: &mut Canvas,
    frame: &mut Frame,
    theme: &Theme,
    content: &FinancialContent,
) -> Result<(), RenderError> {
    let net = content.monthly_income - content.total_expenses;
    let fund_total: f64 = content.funds.iter().map(|f| f.balance_amount()).sum();
    let reserve_total: f64 = content
        .funds
        .iter()
        .filter(|f| f.is_reserve())
        .map(|f| f.balance_amount())
        .sum();
    let reserve_pct = if fund_total > 0.0 {
        reserve_total / fund_total * 100.0
    } else {
        0.0
    };

    draw_kpi_row(
        canvas,
        frame,
        &[
            Kpi::new(
                "Monthly Income",
                format_currency(content.monthly_income),
                theme.kpi[0],
            ),
            Kpi::new(
                "Total Expenses",
                format_currency(content.total_expenses),
                theme.kpi[1],
            ),
            Kpi::new("Net Balance", format_currency(net), theme.kpi[2]),
            Kpi::new("Reserve Fund", format_percent(reserve_pct), theme.kpi[3]),
        ],
    );

    let funds_sentence = if content.funds.is_empty() {
        "No fund balances are on record for this period.".to_string()
    } else {
        format!(
            "The scheme holds {} with a combined balance of {}, of which {} sits in reserve.",
            plural(content.funds.len(), "fund", "funds"),
            format_currency(fund_total),
            format_percent(reserve_pct),
        )
    };
    let summary = format!(
        "Monthly levy income of {} against {} in recorded expenses leaves a net position of {}. {}",
        format_currency(content.monthly_income),
        format_currency(content.total_expenses),
        format_currency(net),
        funds_sentence,
    );
    draw_paragraph(canvas, frame, ParaStyle::body(theme.text), &summary);
    frame.gap(Pt::from_i32(10));

    if !content.funds.is_empty() {
        chart_block(
            canvas,
            frame,
            theme,
            &ChartSpec {
                kind: ChartKind::Pie,
                title: "Fund Allocation".to_string(),
                labels: content.funds.iter().map(|f| f.name.clone()).collect(),
                series: vec![ChartSeries {
                    name: "Funds".to_string(),
                    values: content.funds.iter().map(|f| f.balance_amount()).collect(),
                    color: theme.palette_color(0),
                }],
            },
        );
    }

    draw_table(
        canvas,
        frame,
        theme,
        &TableSpec {
            title: Some("Fund Balances".to_string()),
            headers: vec!["Fund".into(), "Type".into(), "Balance".into()],
            rows: content
                .funds
                .iter()
                .map(|f| {
                    vec![
                        f.name.clone(),
                        f.fund_type.clone(),
                        format_currency(f.balance_amount()),
                    ]
                })
                .collect(),
            column_widths: column_widths(frame, &[0.41, 0.25, 0.34]),
            alignments: Some(vec![CellAlign::Left, CellAlign::Left, CellAlign::Right]),
            summary_row: Some(vec![
                "Total Fund Balance".into(),
                String::new(),
                format_currency(fund_total),
            ]),
        },
    )?;
    frame.gap(Pt::from_i32(14));

    // Expenses grouped by month key feed the income-vs-expense chart;
    // undated expenses only appear in the detail table.
    let mut by_month: BTreeMap<String, f64> = BTreeMap::new();
    for expense in &content.expenses {
        if let Some(key) = expense.date.as_deref().and_then(format::month_key) {
            *by_month.entry(key).or_default() += expense.amount;
        }
    }
    if !by_month.is_empty() {
        let keys: Vec<String> = by_month.keys().cloned().collect();
        let recent = &keys[keys.len().saturating_sub(6)..];
        chart_block(
            canvas,
            frame,
            theme,
            &ChartSpec {
                kind: ChartKind::Bar,
                title: "Income vs Expenses (Last 6 Months)".to_string(),
                labels: recent.iter().map(|k| format::month_label(k)).collect(),
                series: vec![
                    ChartSeries {
                        name: "Income".to_string(),
                        values: vec![content.monthly_income; recent.len()],
                        color: theme.kpi[2],
                    },
                    ChartSeries {
                        name: "Expenses".to_string(),
                        values: recent.iter().map(|k| by_month[k]).collect(),
                        color: theme.kpi[1],
                    },
                ],
            },
        );
    }

    let mut by_category: BTreeMap<String, f64> = BTreeMap::new();
    for expense in &content.expenses {
        let category = if expense.category.trim().is_empty() {
            "Uncategorized".to_string()
        } else {
            expense.category.clone()
        };
        *by_category.entry(category).or_default() += expense.amount;
    }
    if !by_category.is_empty() {
        chart_block(
            canvas,
            frame,
            theme,
            &ChartSpec {
                kind: ChartKind::Doughnut,
                title: "Expenses by Category".to_string(),
                labels: by_category.keys().cloned().collect(),
                series: vec![ChartSeries {
                    name: "Expenses".to_string(),
                    values: by_category.values().copied().collect(),
                    color: theme.palette_color(0),
                }],
            },
        );
    }

    if !content.expenses.is_empty() {
        let shown = &content.expenses[..content.expenses.len().min(TOP_ROWS)];
        let subtotal: f64 = shown.iter().map(|e| e.amount).sum();
        draw_table(
            canvas,
            frame,
            theme,
            &TableSpec {
                title: Some("Expense Detail".to_string()),
                headers: vec![
                    "Date".into(),
                    "Description".into(),
                    "Category".into(),
                    "Amount".into(),
                ],
                rows: shown
                    .iter()
                    .map(|e| {
                        vec![
                            format_date(e.date.as_deref()),
                            e.description.clone(),
                            e.category.clone(),
                            format_currency(e.amount),
                        ]
                    })
                    .collect(),
                column_widths: column_widths(frame, &[0.20, 0.41, 0.21, 0.18]),
                alignments: Some(vec![
                    CellAlign::Left,
                    CellAlign::Left,
                    CellAlign::Left,
                    CellAlign::Right,
                ]),
                summary_row: Some(vec![
                    "Subtotal".into(),
                    String::new(),
                    String::new(),
                    format_currency(subtotal),
                ]),
            },
        )?;
        if content.expenses.len() > TOP_ROWS {
            frame.gap(Pt::from_i32(4));
            draw_paragraph(
                canvas,
                frame,
                ParaStyle::small(theme.muted),
                &format!(
                    "Showing the first {TOP_ROWS} of {} expenses.",
                    content.expenses.len()
                ),
            );
        }
    }
    Ok(())
}

fn meeting_minutes(
    canvas: &mut Canvas,
    frame: &mut Frame,
    theme: &Theme,
    content: &MeetingMinutesContent,
) -> Result<(), RenderError> {
    let stats = content.summary;
    draw_kpi_row(
        canvas,
        frame,
        &[
            Kpi::new("Total Meetings", stats.total_meetings.to_string(), theme.kpi[0]),
            Kpi::new("Completed", stats.completed_meetings.to_string(), theme.kpi[2]),
            Kpi::new("Upcoming", stats.upcoming_meetings.to_string(), theme.kpi[3]),
            // Attendance tracking has no data source yet.
            Kpi::new("Attendance", "N/A", theme.kpi[1]),
        ],
    );

    draw_paragraph(
        canvas,
        frame,
        ParaStyle::body(theme.text),
        &format!(
            "{} on record for this period: {} completed and {} upcoming.",
            plural(stats.total_meetings as usize, "meeting is", "meetings are"),
            stats.completed_meetings,
            stats.upcoming_meetings,
        ),
    );
    frame.gap(Pt::from_i32(12));

    for meeting in &content.meetings {
        let band = Pt::from_i32(20);
        let pos = frame.advance(canvas, band);
        canvas.set_fill_color(theme.status_color(&meeting.status));
        canvas.draw_rect(pos.x, pos.y, frame.content_width(), band);
        canvas.set_fill_color(crate::types::Color::WHITE);
        let title_size = Pt::from_f32(10.0);
        canvas.set_font(font::BOLD, title_size);
        let budget = frame.content_width() - Pt::from_i32(16);
        let title = font::truncate_to_width(font::BOLD, title_size, &meeting.title, budget);
        canvas.draw_string(pos.x + Pt::from_i32(8), pos.y + Pt::from_i32(5), title);

        let mut meta: Vec<String> = vec![format!("Date: {}", format_date(meeting.date.as_deref()))];
        if !meeting.meeting_type.trim().is_empty() {
            meta.push(format!("Type: {}", meeting.meeting_type));
        }
        if !meeting.location.trim().is_empty() {
            meta.push(format!("Location: {}", meeting.location));
        }
        meta.push(format!("Attendees: {}", meeting.attendee_count));
        if !meeting.status.trim().is_empty() {
            meta.push(format!("Status: {}", meeting.status));
        }
        let meta_size = Pt::from_f32(9.0);
        for line in meta {
            let pos = frame.advance(canvas, Pt::from_i32(13));
            canvas.set_fill_color(theme.muted);
            canvas.set_font(font::REGULAR, meta_size);
            canvas.draw_string(pos.x + Pt::from_i32(8), pos.y + Pt::from_i32(2), line);
        }

        if let Some(minutes) = meeting
            .minutes_text
            .as_deref()
            .filter(|m| !m.trim().is_empty())
        {
            frame.gap(Pt::from_i32(4));
            draw_paragraph(canvas, frame, ParaStyle::small(theme.text), minutes);
        }
        frame.gap(Pt::from_i32(12));
    }
    Ok(())
}

fn communications(
    canvas: &mut Canvas,
    frame: &mut Frame,
    theme: &Theme,
    content: &CommunicationsContent,
) -> Result<(), RenderError> {
    let announcements = content.announcements.len();
    let messages = content.messages.len();
    draw_kpi_row(
        canvas,
        frame,
        &[
            Kpi::new("Announcements", announcements.to_string(), theme.kpi[0]),
            Kpi::new("Messages", messages.to_string(), theme.kpi[2]),
            Kpi::new(
                "Total",
                (announcements + messages).to_string(),
                theme.kpi[3],
            ),
            // Engagement metrics are not collected yet.
            Kpi::new("Engagement", "N/A", theme.kpi[1]),
        ],
    );

    draw_paragraph(
        canvas,
        frame,
        ParaStyle::body(theme.text),
        &format!(
            "{} and {} were published during this period.",
            plural(announcements, "announcement", "announcements"),
            plural(messages, "message", "messages"),
        ),
    );
    frame.gap(Pt::from_i32(10));

    if announcements == 0 && messages == 0 {
        draw_paragraph(
            canvas,
            frame,
            ParaStyle::body(theme.muted),
            "No announcements or messages were recorded for this period.",
        );
        return Ok(());
    }

    if announcements > 0 {
        section_heading(canvas, frame, theme, "Announcements");
        for item in &content.announcements {
            let title_size = Pt::from_f32(10.0);
            let pos = frame.advance(canvas, Pt::from_i32(15));
            canvas.set_fill_color(theme.text);
            canvas.set_font(font::BOLD, title_size);
            let budget = frame.content_width();
            canvas.draw_string(
                pos.x,
                pos.y + Pt::from_i32(2),
                font::truncate_to_width(font::BOLD, title_size, &item.title, budget),
            );

            let label_size = Pt::from_f32(8.0);
            let pos = frame.advance(canvas, Pt::from_i32(12));
            canvas.set_fill_color(theme.priority_color(&item.priority));
            canvas.set_font(font::BOLD, label_size);
            let label = format!("{} PRIORITY", item.priority.to_uppercase());
            canvas.draw_string(pos.x, pos.y, label.clone());
            canvas.set_fill_color(theme.muted);
            canvas.set_font(font::REGULAR, label_size);
            let label_width = font::text_width(font::BOLD, label_size, &label);
            canvas.draw_string(
                pos.x + label_width + Pt::from_i32(10),
                pos.y,
                format_date(item.date.as_deref()),
            );

            if !item.body.trim().is_empty() {
                draw_paragraph(canvas, frame, ParaStyle::small(theme.text), &item.body);
            }
            frame.gap(Pt::from_i32(10));
        }
    }

    if messages > 0 {
        section_heading(canvas, frame, theme, "Messages");
        for item in &content.messages {
            let title_size = Pt::from_f32(10.0);
            let pos = frame.advance(canvas, Pt::from_i32(15));
            canvas.set_fill_color(theme.text);
            canvas.set_font(font::BOLD, title_size);
            canvas.draw_string(
                pos.x,
                pos.y + Pt::from_i32(2),
                font::truncate_to_width(font::BOLD, title_size, &item.subject, frame.content_width()),
            );

            let pos = frame.advance(canvas, Pt::from_i32(12));
            canvas.set_fill_color(theme.muted);
            canvas.set_font(font::REGULAR, Pt::from_f32(8.0));
            canvas.draw_string(
                pos.x,
                pos.y,
                format!(
                    "From {} \u{2013} {}",
                    item.sender,
                    format_date(item.date.as_deref())
                ),
            );

            if !item.body.trim().is_empty() {
                draw_paragraph(canvas, frame, ParaStyle::small(theme.text), &item.body);
            }
            frame.gap(Pt::from_i32(10));
        }
    }
    Ok(())
}

fn status_glyph(status: &str) -> &'static str {
    match status.to_ascii_lowercase().as_str() {
        "completed" | "done" | "closed" => "[x]",
        "in_progress" | "in progress" => "[~]",
        _ => "[ ]",
    }
}

fn maintenance(
    canvas: &mut Canvas,
    frame: &mut Frame,
    theme: &Theme,
    content: &MaintenanceContent,
) -> Result<(), RenderError> {
    let stats = content.summary;
    draw_kpi_row(
        canvas,
        frame,
        &[
            Kpi::new("Total Requests", stats.total_requests.to_string(), theme.kpi[0]),
            Kpi::new("Completed", stats.completed_requests.to_string(), theme.kpi[2]),
            Kpi::new(
                "In Progress",
                stats.in_progress_requests.to_string(),
                theme.kpi[3],
            ),
            Kpi::new(
                "Completion Rate",
                format_percent(stats.completion_rate()),
                theme.kpi[1],
            ),
        ],
    );

    draw_paragraph(
        canvas,
        frame,
        ParaStyle::body(theme.text),
        &format!(
            "{} logged for this period: {} completed, {} in progress, and {} pending.",
            plural(
                stats.total_requests as usize,
                "maintenance request was",
                "maintenance requests were"
            ),
            stats.completed_requests,
            stats.in_progress_requests,
            stats.pending_requests(),
        ),
    );
    frame.gap(Pt::from_i32(10));

    if content.requests.is_empty() || stats.total_requests == 0 {
        draw_paragraph(
            canvas,
            frame,
            ParaStyle::body(theme.muted),
            "No maintenance requests were recorded for this period.",
        );
        return Ok(());
    }

    chart_block(
        canvas,
        frame,
        theme,
        &ChartSpec {
            kind: ChartKind::Bar,
            title: "Requests by Status".to_string(),
            labels: vec![
                "Completed".into(),
                "In Progress".into(),
                "Pending".into(),
            ],
            series: vec![ChartSeries {
                name: "Requests".to_string(),
                values: vec![
                    stats.completed_requests as f64,
                    stats.in_progress_requests as f64,
                    stats.pending_requests() as f64,
                ],
                color: theme.kpi[0],
            }],
        },
    );

    let shown = &content.requests[..content.requests.len().min(TOP_ROWS)];
    draw_table(
        canvas,
        frame,
        theme,
        &TableSpec {
            title: Some("Request Detail".to_string()),
            headers: vec![
                "Status".into(),
                "Request".into(),
                "Unit".into(),
                "Date".into(),
            ],
            rows: shown
                .iter()
                .map(|r| {
                    vec![
                        format!("{} {}", status_glyph(&r.status), r.status),
                        r.title.clone(),
                        r.unit.clone().unwrap_or_default(),
                        format_date(r.date.as_deref()),
                    ]
                })
                .collect(),
            column_widths: column_widths(frame, &[0.19, 0.44, 0.14, 0.23]),
            alignments: None,
            summary_row: None,
        },
    )?;
    if content.requests.len() > TOP_ROWS {
        frame.gap(Pt::from_i32(4));
        draw_paragraph(
            canvas,
            frame,
            ParaStyle::small(theme.muted),
            &format!(
                "Showing the first {TOP_ROWS} of {} requests.",
                content.requests.len()
            ),
        );
    }
    Ok(())
}

fn home_sale_package(
    canvas: &mut Canvas,
    frame: &mut Frame,
    theme: &Theme,
    content: &HomeSaleContent,
) -> Result<(), RenderError> {
    draw_paragraph(
        canvas,
        frame,
        ParaStyle::body(theme.text),
        "This home sale package consolidates the records a prospective purchaser requires: \
         current bylaws, financial statements, insurance certificates, and recent meeting \
         minutes. Each document listed below is available through the strata manager.",
    );
    frame.gap(Pt::from_i32(12));

    draw_table(
        canvas,
        frame,
        theme,
        &TableSpec {
            title: Some("Included Documents".to_string()),
            headers: vec!["Document".into(), "Included".into(), "Notes".into()],
            rows: content
                .documents
                .iter()
                .map(|d| {
                    vec![
                        d.name.clone(),
                        if d.included { "Yes" } else { "No" }.to_string(),
                        d.note.clone().unwrap_or_default(),
                    ]
                })
                .collect(),
            column_widths: column_widths(frame, &[0.41, 0.16, 0.43]),
            alignments: Some(vec![CellAlign::Left, CellAlign::Center, CellAlign::Left]),
            summary_row: None,
        },
    )?;
    frame.gap(Pt::from_i32(10));

    if let Some(count) = content.bylaws_count {
        draw_paragraph(
            canvas,
            frame,
            ParaStyle::small(theme.text),
            &format!("Bylaws on file: {count}."),
        );
    }
    if content.financial_statements_included == Some(true) {
        draw_paragraph(
            canvas,
            frame,
            ParaStyle::small(theme.text),
            "Audited financial statements for the current fiscal year are included in this package.",
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::{Command, Document};
    use crate::model::{ExpenseRecord, FundBalance, MaintenanceStats};
    use crate::types::{Margins, Size};

    fn run(report: &ReportDocument) -> Document {
        let size = Size::letter();
        let mut canvas = Canvas::new(size);
        let mut frame = Frame::new(size, Margins::all(50.0));
        render_content(&mut canvas, &mut frame, &Theme::default(), report).unwrap();
        canvas.finish()
    }

    fn doc_contains_text(doc: &Document, needle: &str) -> bool {
        doc.pages.iter().any(|page| {
            page.commands.iter().any(|cmd| match cmd {
                Command::DrawString { text, .. } => text.contains(needle),
                _ => false,
            })
        })
    }

    fn financial_report(expenses: Vec<ExpenseRecord>) -> ReportDocument {
        ReportDocument {
            title: "Financial Report".into(),
            kind: ReportKind::Financial,
            content: ReportContent::Financial(FinancialContent {
                monthly_income: 5000.0,
                total_expenses: 3200.0,
                funds: vec![FundBalance {
                    name: "Reserve".into(),
                    fund_type: "reserve".into(),
                    balance: "125000.00".into(),
                }],
                expenses,
            }),
            generated_at: None,
            date_range: None,
            org_name: None,
            org_unit_count: None,
            org_address: None,
        }
    }

    #[test]
    fn financial_sequence_renders_net_balance_and_fund_summary() {
        let doc = run(&financial_report(vec![]));
        assert!(doc_contains_text(&doc, "Net Balance"));
        assert!(doc_contains_text(&doc, "$1,800.00"));
        assert!(doc_contains_text(&doc, "Total Fund Balance"));
        assert!(doc_contains_text(&doc, "$125,000.00"));
        // 100% of the single fund is reserve.
        assert!(doc_contains_text(&doc, "100%"));
    }

    #[test]
    fn expense_subtotal_covers_only_included_rows() {
        let expenses: Vec<ExpenseRecord> = (0..25)
            .map(|i| ExpenseRecord {
                description: format!("Expense {i}"),
                category: "General".into(),
                amount: 10.0,
                date: Some("2026-02-10".into()),
            })
            .collect();
        let doc = run(&financial_report(expenses));
        // 20 rows x $10, not 25.
        assert!(doc_contains_text(&doc, "$200.00"));
        assert!(doc_contains_text(&doc, "Showing the first 20 of 25 expenses."));
    }

    #[test]
    fn financial_charts_are_emitted_when_data_exists() {
        let expenses = vec![ExpenseRecord {
            description: "Gardening".into(),
            category: "Grounds".into(),
            amount: 400.0,
            date: Some("2026-02-10".into()),
        }];
        let doc = run(&financial_report(expenses));
        // Fund pie, income-vs-expense bar, category doughnut.
        assert_eq!(doc.images.len(), 3);
    }

    #[test]
    fn sequences_fit_narrower_page_geometry() {
        let size = Size::a4();
        let mut canvas = Canvas::new(size);
        let mut frame = Frame::new(size, Margins::all(60.0));
        render_content(
            &mut canvas,
            &mut frame,
            &Theme::default(),
            &financial_report(vec![]),
        )
        .unwrap();
    }

    #[test]
    fn zero_balance_fund_chart_is_omitted_not_fatal() {
        let mut report = financial_report(vec![]);
        if let ReportContent::Financial(content) = &mut report.content {
            content.funds[0].balance = "0.00".into();
        }
        let doc = run(&report);
        assert!(doc.images.is_empty());
        assert!(doc_contains_text(&doc, "Total Fund Balance"));
        assert!(doc_contains_text(&doc, "$0.00"));
    }

    #[test]
    fn maintenance_empty_state_renders_without_charts_or_tables() {
        let report = ReportDocument {
            title: "Maintenance Report".into(),
            kind: ReportKind::Maintenance,
            content: ReportContent::Maintenance(MaintenanceContent {
                summary: MaintenanceStats {
                    total_requests: 0,
                    completed_requests: 0,
                    in_progress_requests: 0,
                },
                requests: vec![],
            }),
            generated_at: None,
            date_range: None,
            org_name: None,
            org_unit_count: None,
            org_address: None,
        };
        let doc = run(&report);
        assert!(doc_contains_text(
            &doc,
            "No maintenance requests were recorded for this period."
        ));
        assert!(doc.images.is_empty());
        assert!(!doc_contains_text(&doc, "Request Detail"));
    }

    #[test]
    fn mismatched_content_variant_is_invalid_spec() {
        let mut report = financial_report(vec![]);
        report.kind = ReportKind::Maintenance;
        let size = Size::letter();
        let mut canvas = Canvas::new(size);
        let mut frame = Frame::new(size, Margins::all(50.0));
        let err =
            render_content(&mut canvas, &mut frame, &Theme::default(), &report).unwrap_err();
        assert!(matches!(err, RenderError::InvalidSpec(_)));
    }

    #[test]
    fn communications_empty_state_message_is_rendered() {
        let report = ReportDocument {
            title: "Communications Report".into(),
            kind: ReportKind::Communications,
            content: ReportContent::Communications(CommunicationsContent::default()),
            generated_at: None,
            date_range: None,
            org_name: None,
            org_unit_count: None,
            org_address: None,
        };
        let doc = run(&report);
        assert!(doc_contains_text(
            &doc,
            "No announcements or messages were recorded for this period."
        ));
        assert!(!doc_contains_text(&doc, "Announcements PRIORITY"));
    }

    #[test]
    fn maintenance_rows_carry_status_glyphs() {
        let report = ReportDocument {
            title: "Maintenance Report".into(),
            kind: ReportKind::Maintenance,
            content: ReportContent::Maintenance(MaintenanceContent {
                summary: MaintenanceStats {
                    total_requests: 2,
                    completed_requests: 1,
                    in_progress_requests: 1,
                },
                requests: vec![
                    crate::model::MaintenanceRequest {
                        title: "Fix lobby door".into(),
                        status: "completed".into(),
                        date: Some("2026-01-20".into()),
                        unit: Some("12".into()),
                    },
                    crate::model::MaintenanceRequest {
                        title: "Repaint stairwell".into(),
                        status: "in_progress".into(),
                        date: None,
                        unit: None,
                    },
                ],
            }),
            generated_at: None,
            date_range: None,
            org_name: None,
            org_unit_count: None,
            org_address: None,
        };
        let doc = run(&report);
        assert!(doc_contains_text(&doc, "[x] completed"));
        assert!(doc_contains_text(&doc, "[~] in_progress"));
        assert!(doc_contains_text(&doc, "N/A"));
    }

    #[test]
    fn home_sale_package_lists_documents_and_optional_lines() {
        let report = ReportDocument {
            title: "Home Sale Package".into(),
            kind: ReportKind::HomeSalePackage,
            content: ReportContent::HomeSalePackage(HomeSaleContent {
                documents: vec![crate::model::PackageDocument {
                    name: "Current Bylaws".into(),
                    included: true,
                    note: None,
                }],
                bylaws_count: Some(14),
                financial_statements_included: Some(true),
            }),
            generated_at: None,
            date_range: None,
            org_name: None,
            org_unit_count: None,
            org_address: None,
        };
        let doc = run(&report);
        assert!(doc_contains_text(&doc, "Included Documents"));
        assert!(doc_contains_text(&doc, "Current Bylaws"));
        assert!(doc_contains_text(&doc, "Bylaws on file: 14."));
        assert!(doc_contains_text(&doc, "Audited financial statements"));
        assert!(doc.images.is_empty());
    }
}
