/// Utilities for date and time formatting
///
/// Dates are shown day first, as the pharmacy staff reads them.
use chrono::{DateTime, Local, NaiveDate, Utc};

/// "2025-03-15" -> "15-03-2025"
pub fn format_date(date: NaiveDate) -> String {
    date.format("%d-%m-%Y").to_string()
}

/// Local wall-clock time of a server timestamp
pub fn format_datetime(datetime: &DateTime<Utc>) -> String {
    datetime
        .with_timezone(&Local)
        .format("%d-%m-%Y %H:%M")
        .to_string()
}

/// Value of an `<input type="date">`
pub fn to_input_value(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

pub fn parse_input_value(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
}

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_date() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        assert_eq!(format_date(date), "05-03-2024");
        assert_eq!(to_input_value(date), "2024-03-05");
    }

    #[test]
    fn test_parse_input_value() {
        assert_eq!(
            parse_input_value(" 2025-12-31 "),
            NaiveDate::from_ymd_opt(2025, 12, 31)
        );
        assert_eq!(parse_input_value("31-12-2025"), None);
        assert_eq!(parse_input_value(""), None);
    }
}
