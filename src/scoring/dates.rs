use chrono::{DateTime, Datelike, Local, NaiveDate, NaiveDateTime};

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%d/%m/%Y",
    "%b %d, %Y",
    "%B %d, %Y",
    "%d %b %Y",
    "%d %B %Y",
];

// Month and day only; the year is supplied by the caller
const YEARLESS_FORMATS: &[&str] = &["%b %d %Y", "%d %b %Y"];

const DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Parse a due date in any of the common written forms. Unknown forms yield `None`.
/// Dates written without a year fall in the current year.
pub fn parse_due_date(value: &str) -> Option<NaiveDate> {
    parse_due_date_in(value, Local::now().year())
}

fn parse_due_date_in(value: &str, current_year: i32) -> Option<NaiveDate> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.date_naive());
    }

    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
                .map(|dt| dt.date())
        })
        .or_else(|| {
            let with_year = format!("{} {}", value.trim_end_matches(','), current_year);
            YEARLESS_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(&with_year, fmt).ok())
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(y, m, d)
    }

    #[test]
    fn iso_dates() {
        assert_eq!(parse_due_date("2025-11-30"), ymd(2025, 11, 30));
        assert_eq!(parse_due_date(" 2025/11/30 "), ymd(2025, 11, 30));
    }

    #[test]
    fn month_first_and_named_months() {
        assert_eq!(parse_due_date("11/30/2025"), ymd(2025, 11, 30));
        assert_eq!(parse_due_date("Nov 30, 2025"), ymd(2025, 11, 30));
        assert_eq!(parse_due_date("30 November 2025"), ymd(2025, 11, 30));
    }

    #[test]
    fn datetimes_keep_the_date() {
        assert_eq!(parse_due_date("2025-11-30T18:45:00"), ymd(2025, 11, 30));
        assert_eq!(parse_due_date("2025-11-30T18:45:00.123Z"), ymd(2025, 11, 30));
        assert_eq!(parse_due_date("2025-11-30 08:00:00"), ymd(2025, 11, 30));
    }

    #[test]
    fn day_first_when_month_first_fails() {
        assert_eq!(parse_due_date("30/11/2025"), ymd(2025, 11, 30));
        assert_eq!(parse_due_date("03/04/2025"), ymd(2025, 3, 4));
    }

    #[test]
    fn missing_year_uses_the_current_one() {
        assert_eq!(parse_due_date_in("Nov 30", 2026), ymd(2026, 11, 30));
        assert_eq!(parse_due_date_in("30 November", 2026), ymd(2026, 11, 30));
        assert_eq!(parse_due_date_in("Feb 29", 2026), None);
    }

    #[test]
    fn rejects_nonsense() {
        assert_eq!(parse_due_date(""), None);
        assert_eq!(parse_due_date("tomorrow"), None);
        assert_eq!(parse_due_date("2025-02-30"), None);
    }
}
