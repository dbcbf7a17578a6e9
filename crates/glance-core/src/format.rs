//! Number and date formatting for compact displays.

use time::macros::format_description;
use time::OffsetDateTime;

use crate::SeriesSummary;

/// Decimal with `,` grouping and at most two fraction digits.
///
/// `1234567.891` → `1,234,567.89`, `10.0` → `10`, `-0.5` → `-0.5`.
pub fn format_number(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let fixed = format!("{:.2}", value.abs());
    let (integer, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let fraction = fraction.trim_end_matches('0');

    let mut out = String::with_capacity(fixed.len() + integer.len() / 3 + 1);
    let negative = value < 0.0 && (integer != "0" || !fraction.is_empty());
    if negative {
        out.push('-');
    }
    out.push_str(&group_thousands(integer));
    if !fraction.is_empty() {
        out.push('.');
        out.push_str(fraction);
    }
    out
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut grouped = String::with_capacity(len + len / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (len - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// Axis label `MMM yyyy` in UTC, e.g. `Jan 2024`.
pub fn format_axis_date(epoch_secs: i64) -> Option<String> {
    let timestamp = OffsetDateTime::from_unix_timestamp(epoch_secs).ok()?;
    timestamp
        .format(format_description!("[month repr:short] [year]"))
        .ok()
}

/// Change badge, e.g. `▲ +10 (+100.00%)`.
///
/// Arrow and amount follow `delta`; non-positive changes use `▼`. The
/// percentage is `delta_percent` as computed, so a negative first value can
/// pair `▲` with a negative percentage. It is omitted when undefined.
pub fn format_delta(summary: &SeriesSummary) -> String {
    let (arrow, sign) = if summary.delta > 0.0 {
        ("▲", "+")
    } else if summary.delta < 0.0 {
        ("▼", "-")
    } else {
        ("▼", "")
    };

    let amount = format_number(summary.delta.abs());
    match summary.delta_percent {
        Some(percent) if percent == 0.0 => format!("{arrow} {sign}{amount} (0.00%)"),
        Some(percent) => format!("{arrow} {sign}{amount} ({percent:+.2}%)"),
        None => format!("{arrow} {sign}{amount}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::series::summarize;
    use crate::{Series, SeriesPoint};

    fn summary_of(values: &[f64]) -> SeriesSummary {
        let series: Series = values
            .iter()
            .enumerate()
            .map(|(index, &v)| SeriesPoint::new(index as i64, v))
            .collect();
        summarize(&series).expect("non-empty series")
    }

    #[test]
    fn numbers_are_grouped_and_trimmed() {
        assert_eq!(format_number(1_234_567.891), "1,234,567.89");
        assert_eq!(format_number(10.0), "10");
        assert_eq!(format_number(999.5), "999.5");
        assert_eq!(format_number(1000.0), "1,000");
        assert_eq!(format_number(-12_345.6), "-12,345.6");
        assert_eq!(format_number(0.004), "0");
        assert_eq!(format_number(-0.001), "0");
        assert_eq!(format_number(f64::INFINITY), "inf");
    }

    #[test]
    fn axis_dates_use_short_month_and_year() {
        assert_eq!(format_axis_date(1_704_067_200).as_deref(), Some("Jan 2024"));
        assert_eq!(format_axis_date(0).as_deref(), Some("Jan 1970"));
        assert_eq!(format_axis_date(i64::MAX), None);
    }

    #[test]
    fn delta_badges() {
        assert_eq!(format_delta(&summary_of(&[10.0, 30.0, 20.0])), "▲ +10 (+100.00%)");
        assert_eq!(format_delta(&summary_of(&[20.0, 15.0])), "▼ -5 (-25.00%)");
        assert_eq!(format_delta(&summary_of(&[0.0, 1500.0])), "▲ +1,500");
        assert_eq!(format_delta(&summary_of(&[3.0, 3.0])), "▼ 0 (0.00%)");
    }

    #[test]
    fn delta_badge_percentage_matches_summary_for_negative_first_value() {
        let rising = summary_of(&[-10.0, -5.0]);
        assert_eq!(rising.delta_percent, Some(-50.0));
        assert_eq!(format_delta(&rising), "▲ +5 (-50.00%)");

        let falling = summary_of(&[-4.0, -6.0]);
        assert_eq!(falling.delta_percent, Some(50.0));
        assert_eq!(format_delta(&falling), "▼ -2 (+50.00%)");
    }
}
