//! Display formatting helpers

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use rust_decimal::{Decimal, RoundingStrategy};

/// Format a monetary figure with a fixed number of decimals and a currency suffix.
///
/// Rounding happens here and only here; sums are kept exact until display.
pub fn format_money(amount: Decimal, currency: &str, decimal_places: u32) -> String {
    let mut rounded =
        amount.round_dp_with_strategy(decimal_places, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(decimal_places);
    if rounded.is_zero() {
        // avoid "-0.00"
        rounded.set_sign_positive(true);
    }
    format!("{} {}", rounded, currency)
}

/// Time of day as shown next to a record, e.g. "09:05 AM"
pub fn format_time_in<Tz: TimeZone>(at: &DateTime<Utc>, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    at.with_timezone(tz).format("%I:%M %p").to_string()
}

/// Calendar date as shown in search results, e.g. "May 1, 2024"
pub fn format_date(date: &NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_money_pads_decimals() {
        assert_eq!(format_money(Decimal::from(50), "MAD", 2), "50.00 MAD");
        assert_eq!(format_money(Decimal::new(55, 1), "MAD", 2), "5.50 MAD");
        assert_eq!(format_money(Decimal::ZERO, "MAD", 2), "0.00 MAD");
    }

    #[test]
    fn test_format_money_rounds_half_away_from_zero() {
        assert_eq!(format_money(Decimal::new(12345, 3), "MAD", 2), "12.35 MAD");
        assert_eq!(format_money(Decimal::new(12344, 3), "MAD", 2), "12.34 MAD");
    }

    #[test]
    fn test_format_money_no_negative_zero() {
        assert_eq!(format_money(Decimal::new(-1, 3), "MAD", 2), "0.00 MAD");
    }

    #[test]
    fn test_format_time_in_utc() {
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 9, 5, 0).unwrap();
        assert_eq!(format_time_in(&at, &Utc), "09:05 AM");
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 21, 30, 0).unwrap();
        assert_eq!(format_time_in(&at, &Utc), "09:30 PM");
    }

    #[test]
    fn test_format_date() {
        let date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        assert_eq!(format_date(&date), "May 1, 2024");
    }
}
