/// Date display formatting
///
/// Both the editable date list and the card preview go through
/// `format_date`, so the two always agree on the rendered text.

use chrono::NaiveDate;

/// Format a calendar date string for display.
///
/// A valid ISO date ("2024-03-15") becomes its long form
/// ("Friday, March 15, 2024"). Empty input yields empty output.
/// Anything unparseable is returned unchanged rather than surfaced
/// as an error — a half-typed date simply shows as-is.
pub fn format_date(raw: &str) -> String {
    if raw.is_empty() {
        return String::new();
    }

    match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        Ok(date) => date.format("%A, %B %-d, %Y").to_string(),
        Err(_) => raw.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_iso_date() {
        assert_eq!(format_date("2024-03-15"), "Friday, March 15, 2024");
        assert_eq!(format_date("2024-01-01"), "Monday, January 1, 2024");
    }

    #[test]
    fn test_single_digit_day_has_no_padding() {
        assert_eq!(format_date("2024-03-05"), "Tuesday, March 5, 2024");
    }

    #[test]
    fn test_empty_input_yields_empty_output() {
        assert_eq!(format_date(""), "");
    }

    #[test]
    fn test_malformed_input_is_identity() {
        for raw in ["not a date", "2024-13-40", "15/03/2024", "2024-03", "tomorrow"] {
            assert_eq!(format_date(raw), raw);
        }
    }
}
