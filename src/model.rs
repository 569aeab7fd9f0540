use crate::format;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Sentinel the aggregation layer uses for an unbounded report period.
pub const ALL_TIME: &str = "All time";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReportKind {
    #[serde(rename = "financial")]
    Financial,
    #[serde(rename = "meeting-minutes")]
    MeetingMinutes,
    #[serde(rename = "communications")]
    Communications,
    #[serde(rename = "maintenance")]
    Maintenance,
    #[serde(rename = "home-sale-package")]
    HomeSalePackage,
}

/// One report request: consumed exactly once per `generate` call, never
/// mutated by the engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportDocument {
    pub title: String,
    #[serde(rename = "reportType")]
    pub kind: ReportKind,
    pub content: ReportContent,
    /// Fixed by the caller for reproducible output; wall clock otherwise.
    #[serde(default)]
    pub generated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub date_range: Option<DateRange>,
    #[serde(default)]
    pub org_name: Option<String>,
    #[serde(default)]
    pub org_unit_count: Option<u32>,
    #[serde(default)]
    pub org_address: Option<String>,
}

impl ReportDocument {
    /// Attachment filename for the download endpoint.
    pub fn suggested_filename(&self) -> String {
        format::filename_for_title(&self.title)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRange {
    pub start: String,
    pub end: String,
}

impl DateRange {
    pub fn is_all_time(&self) -> bool {
        self.start == ALL_TIME
    }
}

/// Report-type-specific payload. Variant order matters for the untagged
/// deserialization: the variants with required fields come first so an
/// all-defaults payload cannot shadow them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ReportContent {
    Financial(FinancialContent),
    MeetingMinutes(MeetingMinutesContent),
    Maintenance(MaintenanceContent),
    Communications(CommunicationsContent),
    HomeSalePackage(HomeSaleContent),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialContent {
    pub monthly_income: f64,
    pub total_expenses: f64,
    #[serde(default)]
    pub funds: Vec<FundBalance>,
    #[serde(default)]
    pub expenses: Vec<ExpenseRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FundBalance {
    pub name: String,
    #[serde(rename = "type")]
    pub fund_type: String,
    /// Decimal string straight from the ledger; unparseable balances are
    /// treated as zero in aggregates.
    pub balance: String,
}

impl FundBalance {
    pub fn balance_amount(&self) -> f64 {
        self.balance.trim().parse().unwrap_or(0.0)
    }

    pub fn is_reserve(&self) -> bool {
        self.fund_type.eq_ignore_ascii_case("reserve")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseRecord {
    pub description: String,
    #[serde(default)]
    pub category: String,
    pub amount: f64,
    #[serde(default)]
    pub date: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeetingMinutesContent {
    pub summary: MeetingStats,
    #[serde(default)]
    pub meetings: Vec<MeetingRecord>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeetingStats {
    pub total_meetings: u32,
    pub completed_meetings: u32,
    pub upcoming_meetings: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeetingRecord {
    pub title: String,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub meeting_type: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub attendee_count: u32,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub minutes_text: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceContent {
    pub summary: MaintenanceStats,
    #[serde(default)]
    pub requests: Vec<MaintenanceRequest>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceStats {
    pub total_requests: u32,
    #[serde(default)]
    pub completed_requests: u32,
    #[serde(default)]
    pub in_progress_requests: u32,
}

impl MaintenanceStats {
    pub fn pending_requests(&self) -> u32 {
        self.total_requests
            .saturating_sub(self.completed_requests)
            .saturating_sub(self.in_progress_requests)
    }

    pub fn completion_rate(&self) -> f64 {
        if self.total_requests == 0 {
            return 0.0;
        }
        self.completed_requests as f64 / self.total_requests as f64 * 100.0
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceRequest {
    pub title: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub unit: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommunicationsContent {
    #[serde(default)]
    pub announcements: Vec<AnnouncementRecord>,
    #[serde(default)]
    pub messages: Vec<MessageRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnouncementRecord {
    pub title: String,
    #[serde(default)]
    pub priority: String,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub body: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageRecord {
    pub subject: String,
    #[serde(default)]
    pub sender: String,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub body: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HomeSaleContent {
    #[serde(default)]
    pub documents: Vec<PackageDocument>,
    #[serde(default)]
    pub bylaws_count: Option<u32>,
    #[serde(default)]
    pub financial_statements_included: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageDocument {
    pub name: String,
    #[serde(default)]
    pub included: bool,
    #[serde(default)]
    pub note: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_kind_uses_wire_names() {
        assert_eq!(
            serde_json::to_string(&ReportKind::MeetingMinutes).unwrap(),
            "\"meeting-minutes\""
        );
        let kind: ReportKind = serde_json::from_str("\"home-sale-package\"").unwrap();
        assert_eq!(kind, ReportKind::HomeSalePackage);
    }

    #[test]
    fn financial_content_parses_camel_case_payload() {
        let json = r#"{
            "monthlyIncome": 5000,
            "totalExpenses": 3200,
            "funds": [{"name": "Reserve", "type": "reserve", "balance": "125000.00"}],
            "expenses": []
        }"#;
        let content: FinancialContent = serde_json::from_str(json).unwrap();
        assert_eq!(content.monthly_income, 5000.0);
        assert_eq!(content.funds[0].balance_amount(), 125_000.0);
        assert!(content.funds[0].is_reserve());
    }

    #[test]
    fn unparseable_balance_counts_as_zero() {
        let fund = FundBalance {
            name: "Ops".into(),
            fund_type: "operating".into(),
            balance: "lots".into(),
        };
        assert_eq!(fund.balance_amount(), 0.0);
    }

    #[test]
    fn maintenance_stats_derive_pending_and_rate() {
        let stats = MaintenanceStats {
            total_requests: 10,
            completed_requests: 6,
            in_progress_requests: 3,
        };
        assert_eq!(stats.pending_requests(), 1);
        assert_eq!(stats.completion_rate(), 60.0);
        let empty = MaintenanceStats {
            total_requests: 0,
            completed_requests: 0,
            in_progress_requests: 0,
        };
        assert_eq!(empty.completion_rate(), 0.0);
        assert_eq!(empty.pending_requests(), 0);
    }

    #[test]
    fn date_range_sentinel_is_detected() {
        let range = DateRange {
            start: ALL_TIME.into(),
            end: String::new(),
        };
        assert!(range.is_all_time());
    }

    #[test]
    fn suggested_filename_comes_from_title() {
        let doc = ReportDocument {
            title: "Annual Financial Report 2026".into(),
            kind: ReportKind::Financial,
            content: ReportContent::Financial(FinancialContent {
                monthly_income: 0.0,
                total_expenses: 0.0,
                funds: vec![],
                expenses: vec![],
            }),
            generated_at: None,
            date_range: None,
            org_name: None,
            org_unit_count: None,
            org_address: None,
        };
        assert_eq!(doc.suggested_filename(), "annual-financial-report-2026.pdf");
    }
}
