use chrono::{DateTime, NaiveDate, Utc};

/// Fallback rendered for absent dates.
pub const NO_DATE: &str = "N/A";
/// Fallback rendered for unparseable dates.
pub const BAD_DATE: &str = "Invalid Date";

/// `1234.5` -> `"$1,234.50"`. Negative amounts keep the sign ahead of the
/// currency symbol so table columns stay right-aligned on the digits.
pub fn format_currency(amount: f64) -> String {
    let amount = if amount.is_finite() { amount } else { 0.0 };
    let negative = amount < 0.0;
    let cents = (amount.abs() * 100.0).round() as u64;
    let whole = cents / 100;
    let frac = cents % 100;
    let grouped = group_thousands(whole);
    if negative {
        format!("-${grouped}.{frac:02}")
    } else {
        format!("${grouped}.{frac:02}")
    }
}

/// Whole-dollar variant used for chart axis ticks: `1234.5` -> `"$1,235"`.
pub fn format_axis_currency(amount: f64) -> String {
    let amount = if amount.is_finite() { amount } else { 0.0 };
    let negative = amount < 0.0;
    let whole = amount.abs().round() as u64;
    let grouped = group_thousands(whole);
    if negative {
        format!("-${grouped}")
    } else {
        format!("${grouped}")
    }
}

pub fn format_percent(value: f64) -> String {
    if !value.is_finite() {
        return "0%".to_string();
    }
    format!("{}%", (value.round() as i64).max(0))
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    let offset = digits.len() % 3;
    for (i, ch) in digits.chars().enumerate() {
        if i != 0 && (i + 3 - offset) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Long-form date for header lines and table cells. Missing dates render
/// `"N/A"`, unparseable ones `"Invalid Date"`, never an error.
pub fn format_date(value: Option<&str>) -> String {
    let Some(raw) = value else {
        return NO_DATE.to_string();
    };
    let raw = raw.trim();
    if raw.is_empty() {
        return NO_DATE.to_string();
    }
    match parse_date(raw) {
        Some(date) => date.format("%B %-d, %Y").to_string(),
        None => BAD_DATE.to_string(),
    }
}

pub fn format_timestamp(value: &DateTime<Utc>) -> String {
    value.format("%B %-d, %Y").to_string()
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.date_naive());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}

/// `"2026-03-14"` / RFC 3339 -> `"2026-03"`, the grouping key for the
/// income-vs-expense chart.
pub fn month_key(raw: &str) -> Option<String> {
    parse_date(raw.trim()).map(|d| d.format("%Y-%m").to_string())
}

/// `"2026-03"` -> `"Mar 2026"` for chart axis labels.
pub fn month_label(key: &str) -> String {
    NaiveDate::parse_from_str(&format!("{key}-01"), "%Y-%m-%d")
        .map(|d| d.format("%b %Y").to_string())
        .unwrap_or_else(|_| key.to_string())
}

/// Sanitized attachment filename for the download endpoint.
pub fn filename_for_title(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut last_dash = true;
    for ch in title.chars() {
        if ch.is_ascii_alphanumeric() {
            slug.push(ch.to_ascii_lowercase());
            last_dash = false;
        } else if !last_dash {
            slug.push('-');
            last_dash = true;
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    if slug.is_empty() {
        slug.push_str("report");
    }
    format!("{slug}.pdf")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn currency_groups_thousands_and_pads_cents() {
        assert_eq!(format_currency(1234.5), "$1,234.50");
        assert_eq!(format_currency(0.0), "$0.00");
        assert_eq!(format_currency(1_000_000.0), "$1,000,000.00");
        assert_eq!(format_currency(-42.1), "-$42.10");
        assert_eq!(format_currency(999.999), "$1,000.00");
    }

    #[test]
    fn axis_currency_drops_cents() {
        assert_eq!(format_axis_currency(1234.5), "$1,235");
        assert_eq!(format_axis_currency(0.0), "$0");
    }

    #[test]
    fn percent_rounds_and_clamps() {
        assert_eq!(format_percent(66.6), "67%");
        assert_eq!(format_percent(f64::NAN), "0%");
    }

    #[test]
    fn date_fallbacks_match_contract() {
        assert_eq!(format_date(None), "N/A");
        assert_eq!(format_date(Some("")), "N/A");
        assert_eq!(format_date(Some("not-a-date")), "Invalid Date");
        assert_eq!(format_date(Some("2026-03-05")), "March 5, 2026");
        assert_eq!(
            format_date(Some("2026-03-05T14:30:00Z")),
            "March 5, 2026"
        );
    }

    #[test]
    fn timestamp_uses_long_form() {
        let ts = Utc.with_ymd_and_hms(2026, 1, 9, 8, 0, 0).unwrap();
        assert_eq!(format_timestamp(&ts), "January 9, 2026");
    }

    #[test]
    fn month_key_and_label_round_trip() {
        assert_eq!(month_key("2026-03-14").as_deref(), Some("2026-03"));
        assert_eq!(month_key("junk"), None);
        assert_eq!(month_label("2026-03"), "Mar 2026");
        assert_eq!(month_label("garbage"), "garbage");
    }

    #[test]
    fn filenames_are_sanitized() {
        assert_eq!(
            filename_for_title("Financial Report — Q1/2026"),
            "financial-report-q1-2026.pdf"
        );
        assert_eq!(filename_for_title("///"), "report.pdf");
    }
}
