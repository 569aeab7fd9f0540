mod canvas;
mod chart;
mod chrome;
mod error;
mod font;
mod format;
mod frame;
mod kpi;
mod model;
mod pdf;
mod sections;
mod table;
mod text;
mod theme;
mod types;

pub use canvas::{Canvas, Command, Document, Page, RasterImage};
pub use chart::{ChartKind, ChartSeries, ChartSpec};
pub use error::{ChartError, RenderError};
pub use format::{filename_for_title, format_currency, format_date, format_percent};
pub use frame::{Frame, PagePosition};
pub use kpi::Kpi;
pub use model::{
    AnnouncementRecord, CommunicationsContent, DateRange, ExpenseRecord, FinancialContent,
    FundBalance, HomeSaleContent, MaintenanceContent, MaintenanceRequest, MaintenanceStats,
    MeetingMinutesContent, MeetingRecord, MeetingStats, MessageRecord, PackageDocument,
    ReportContent, ReportDocument, ReportKind,
};
pub use table::{CellAlign, TableSpec};
pub use theme::Theme;
pub use types::{Color, Margins, Pt, Rect, Size};

use chrono::{DateTime, Utc};
use log::debug;
use pdf::PdfMeta;

/// The report engine. Holds only immutable configuration; every
/// `generate` call owns its own layout state, so one engine value can
/// serve documents from multiple threads.
#[derive(Debug)]
pub struct StrataPress {
    page_size: Size,
    margins: Margins,
    theme: Theme,
}

#[derive(Clone)]
pub struct StrataPressBuilder {
    page_size: Size,
    margins: Margins,
    theme: Theme,
}

impl StrataPress {
    pub fn builder() -> StrataPressBuilder {
        StrataPressBuilder::new()
    }

    /// Full pipeline: header, report-type sequence, footer second pass,
    /// PDF emission. Either the complete buffer comes back or an error
    /// does; a partial document is never returned.
    pub fn generate(&self, report: &ReportDocument) -> Result<Vec<u8>, RenderError> {
        let generated_at = report.generated_at.unwrap_or_else(Utc::now);
        let document = self.layout(report, &generated_at)?;
        debug!(
            "report '{}' laid out across {} pages",
            report.title,
            document.pages.len()
        );
        pdf::document_to_pdf(
            &document,
            &PdfMeta {
                title: &report.title,
                created: Some(generated_at),
            },
        )
    }

    /// Body pass plus footer pass, stopping short of PDF emission. The
    /// returned command list is what the end-to-end tests assert on.
    fn layout(
        &self,
        report: &ReportDocument,
        generated_at: &DateTime<Utc>,
    ) -> Result<Document, RenderError> {
        let mut canvas = Canvas::new(self.page_size);
        let mut frame = Frame::new(self.page_size, self.margins);
        chrome::draw_header(&mut canvas, &mut frame, &self.theme, report, generated_at);
        sections::render_content(&mut canvas, &mut frame, &self.theme, report)?;
        let mut document = canvas.finish();
        // Footers reference the final page count, so they are stamped
        // only after the body pass has produced every page.
        chrome::stamp_footers(&mut document, &self.theme, &self.margins);
        Ok(document)
    }
}

impl StrataPressBuilder {
    pub fn new() -> Self {
        Self {
            page_size: Size::letter(),
            margins: Margins::all(50.0),
            theme: Theme::default(),
        }
    }

    pub fn page_size(mut self, size: Size) -> Self {
        self.page_size = size;
        self
    }

    pub fn margins(mut self, margins: Margins) -> Self {
        self.margins = margins;
        self
    }

    pub fn margin_all(mut self, value: f32) -> Self {
        self.margins = Margins::all(value);
        self
    }

    pub fn theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    pub fn build(self) -> Result<StrataPress, RenderError> {
        let content_width = self.page_size.width - self.margins.left - self.margins.right;
        if content_width <= Pt::ZERO {
            return Err(RenderError::InvalidConfiguration(
                "margins leave no horizontal content area".to_string(),
            ));
        }
        let content_height = self.page_size.height
            - self.margins.top
            - self.margins.bottom
            - frame::footer_reserve();
        if content_height <= Pt::ZERO {
            return Err(RenderError::InvalidConfiguration(
                "margins and footer reserve leave no vertical content area".to_string(),
            ));
        }
        Ok(StrataPress {
            page_size: self.page_size,
            margins: self.margins,
            theme: self.theme,
        })
    }
}

impl Default for StrataPressBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn press() -> StrataPress {
        StrataPress::builder().build().unwrap()
    }

    fn financial_report() -> ReportDocument {
        let content: FinancialContent = serde_json::from_str(
            r#"{
                "monthlyIncome": 5000,
                "totalExpenses": 3200,
                "funds": [{"name": "Reserve", "type": "reserve", "balance": "125000.00"}],
                "expenses": []
            }"#,
        )
        .unwrap();
        ReportDocument {
            title: "Financial Report".into(),
            kind: ReportKind::Financial,
            content: ReportContent::Financial(content),
            generated_at: Some(Utc.with_ymd_and_hms(2026, 3, 5, 9, 0, 0).unwrap()),
            date_range: Some(DateRange {
                start: "2026-01-01".into(),
                end: "2026-03-31".into(),
            }),
            org_name: Some("Harbourview Owners Corp".into()),
            org_unit_count: Some(48),
            org_address: Some("12 Quay Street".into()),
        }
    }

    fn layout_texts(doc: &Document) -> Vec<String> {
        doc.pages
            .iter()
            .flat_map(|p| {
                p.commands.iter().filter_map(|c| match c {
                    Command::DrawString { text, .. } => Some(text.clone()),
                    _ => None,
                })
            })
            .collect()
    }

    #[test]
    fn financial_scenario_renders_expected_pdf() {
        let report = financial_report();
        let bytes = press().generate(&report).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
        assert!(!bytes.is_empty());

        let ts = report.generated_at.unwrap();
        let doc = press().layout(&report, &ts).unwrap();
        let texts = layout_texts(&doc);
        assert!(texts.iter().any(|t| t == "Net Balance"));
        assert!(texts.iter().any(|t| t == "$1,800.00"));
        assert!(texts.iter().any(|t| t == "Total Fund Balance"));
        assert!(texts.iter().any(|t| t == "$125,000.00"));
    }

    #[test]
    fn maintenance_empty_state_is_still_a_valid_document() {
        let content: MaintenanceContent =
            serde_json::from_str(r#"{"summary": {"totalRequests": 0}, "requests": []}"#).unwrap();
        let report = ReportDocument {
            title: "Maintenance Report".into(),
            kind: ReportKind::Maintenance,
            content: ReportContent::Maintenance(content),
            generated_at: Some(Utc.with_ymd_and_hms(2026, 3, 5, 9, 0, 0).unwrap()),
            date_range: None,
            org_name: None,
            org_unit_count: None,
            org_address: None,
        };
        let bytes = press().generate(&report).unwrap();
        assert!(bytes.starts_with(b"%PDF"));

        let ts = report.generated_at.unwrap();
        let doc = press().layout(&report, &ts).unwrap();
        assert!(doc.images.is_empty());
        let texts = layout_texts(&doc);
        assert!(
            texts
                .iter()
                .any(|t| t == "No maintenance requests were recorded for this period.")
        );
        assert!(!texts.iter().any(|t| t == "Request Detail"));
    }

    #[test]
    fn identical_input_produces_identical_bytes() {
        let report = financial_report();
        let engine = press();
        let first = engine.generate(&report).unwrap();
        let second = engine.generate(&report).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn every_page_footer_references_the_final_count() {
        let expenses: Vec<ExpenseRecord> = (0..120)
            .map(|i| ExpenseRecord {
                description: format!("Expense {i}"),
                category: "General".into(),
                amount: 25.0,
                date: Some("2026-02-10".into()),
            })
            .collect();
        let mut report = financial_report();
        if let ReportContent::Financial(content) = &mut report.content {
            content.expenses = expenses;
        }
        let ts = report.generated_at.unwrap();
        let doc = press().layout(&report, &ts).unwrap();
        let total = doc.pages.len();
        assert!(total > 1);
        for (i, page) in doc.pages.iter().enumerate() {
            let expected = format!("Page {} of {total}", i + 1);
            assert!(
                page.commands
                    .iter()
                    .any(|c| matches!(c, Command::DrawString { text, .. } if *text == expected)),
                "page {i} missing its footer"
            );
        }
    }

    #[test]
    fn mismatched_content_is_rejected_before_emission() {
        let mut report = financial_report();
        report.kind = ReportKind::Communications;
        let err = press().generate(&report).unwrap_err();
        assert!(matches!(err, RenderError::InvalidSpec(_)));
    }

    #[test]
    fn degenerate_margins_fail_at_build_time() {
        let err = StrataPress::builder()
            .margin_all(400.0)
            .build()
            .unwrap_err();
        assert!(matches!(err, RenderError::InvalidConfiguration(_)));
    }
}
