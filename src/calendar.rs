use chrono::{Datelike, NaiveDate, Weekday};

use crate::model::attendance::MonthlyAttendanceSummary;

const ISO_DATE: &str = "%Y-%m-%d";

pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Number of days in `month` of `year` (Gregorian). Returns 0 for a month
/// outside 1..=12.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 0,
    }
}

/// First and last calendar day of the month, inclusive.
pub fn month_bounds(year: i32, month: u32) -> Option<(NaiveDate, NaiveDate)> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let last = NaiveDate::from_ymd_opt(year, month, days_in_month(year, month))?;
    Some((first, last))
}

/// Every Sunday of the month, ascending.
pub fn sundays_in_month(year: i32, month: u32) -> Vec<NaiveDate> {
    (1..=days_in_month(year, month))
        .filter_map(|day| NaiveDate::from_ymd_opt(year, month, day))
        .filter(|date| date.weekday() == Weekday::Sun)
        .collect()
}

/// Strict `YYYY-MM-DD` parsing. Anything chrono rejects (including
/// impossible dates like `2023-02-29`) yields `None`.
pub fn parse_iso_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, ISO_DATE).ok()
}

pub fn format_iso_date(date: &NaiveDate) -> String {
    date.format(ISO_DATE).to_string()
}

/// Integer percentage of `attended` over `working`, rounded half up.
fn percentage(attended: u32, working: u32) -> u32 {
    if working == 0 {
        return 0;
    }
    let (attended, working) = (u64::from(attended), u64::from(working));
    // round(100a / w) == floor((200a + w) / 2w)
    ((200 * attended + working) / (2 * working)) as u32
}

/// Builds the monthly summary from dates already filtered to the month.
/// Duplicate dates count once each.
pub fn compute_summary(
    year: i32,
    month: u32,
    attendance_dates: &[NaiveDate],
) -> MonthlyAttendanceSummary {
    let total_days = days_in_month(year, month);
    let sundays = sundays_in_month(year, month);
    let working_days = total_days.saturating_sub(sundays.len() as u32);
    let attended_days = attendance_dates.len() as u32;

    let mut dates = attendance_dates.to_vec();
    dates.sort();

    MonthlyAttendanceSummary {
        year,
        month,
        total_days,
        working_days,
        attended_days,
        missed_days: working_days.saturating_sub(attended_days),
        attendance_percentage: percentage(attended_days, working_days),
        sundays: sundays.iter().map(format_iso_date).collect(),
        attendance_dates: dates.iter().map(format_iso_date).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        parse_iso_date(s).unwrap()
    }

    #[test]
    fn test_days_in_month_follows_gregorian_rules() {
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(2023, 2), 28);
        assert_eq!(days_in_month(2000, 2), 29);
        assert_eq!(days_in_month(1900, 2), 28);
        assert_eq!(days_in_month(2024, 1), 31);
        assert_eq!(days_in_month(2024, 4), 30);
        assert_eq!(days_in_month(2024, 12), 31);
    }

    #[test]
    fn test_days_in_month_agrees_with_chrono() {
        for year in 1890..=2110 {
            for month in 1..=12 {
                let next = if month == 12 {
                    NaiveDate::from_ymd_opt(year + 1, 1, 1)
                } else {
                    NaiveDate::from_ymd_opt(year, month + 1, 1)
                }
                .unwrap();
                let expected = next.pred_opt().unwrap().day();
                assert_eq!(days_in_month(year, month), expected, "{year}-{month}");
            }
        }
    }

    #[test]
    fn test_sundays_count_is_four_or_five() {
        for year in 1899..=2101 {
            for month in 1..=12 {
                let sundays = sundays_in_month(year, month);
                assert!(
                    sundays.len() == 4 || sundays.len() == 5,
                    "{year}-{month} has {} sundays",
                    sundays.len()
                );
                assert!(sundays.windows(2).all(|w| w[0] < w[1]));
                assert!(sundays.iter().all(|d| d.weekday() == Weekday::Sun));
            }
        }
    }

    #[test]
    fn test_month_bounds() {
        let (first, last) = month_bounds(2024, 2).unwrap();
        assert_eq!(first, date("2024-02-01"));
        assert_eq!(last, date("2024-02-29"));
        assert!(month_bounds(2024, 13).is_none());
        assert!(month_bounds(2024, 0).is_none());
    }

    #[test]
    fn test_parse_iso_date_rejects_garbage() {
        assert_eq!(parse_iso_date("2024-01-15"), NaiveDate::from_ymd_opt(2024, 1, 15));
        assert!(parse_iso_date("2023-02-29").is_none());
        assert!(parse_iso_date("2024-13-01").is_none());
        assert!(parse_iso_date("not-a-date").is_none());
        assert!(parse_iso_date("").is_none());
        assert!(parse_iso_date("2024-01-15T10:00:00").is_none());
    }

    #[test]
    fn test_summary_january_2024() {
        let dates: Vec<NaiveDate> = [
            "2024-01-01", "2024-01-02", "2024-01-03", "2024-01-08", "2024-01-09",
            "2024-01-10", "2024-01-15", "2024-01-16",
        ]
        .iter()
        .map(|s| date(s))
        .collect();

        let summary = compute_summary(2024, 1, &dates);

        assert_eq!(summary.total_days, 31);
        assert_eq!(
            summary.sundays,
            vec!["2024-01-07", "2024-01-14", "2024-01-21", "2024-01-28"]
        );
        assert_eq!(summary.working_days, 27);
        assert_eq!(summary.attended_days, 8);
        assert_eq!(summary.missed_days, 19);
        assert_eq!(summary.attendance_percentage, 30);
    }

    #[test]
    fn test_summary_leap_february_without_attendance() {
        let summary = compute_summary(2024, 2, &[]);

        assert_eq!(summary.total_days, 29);
        assert_eq!(summary.sundays.len(), 4);
        assert_eq!(summary.attended_days, 0);
        assert_eq!(summary.missed_days, 25);
        assert_eq!(summary.attendance_percentage, 0);
        assert!(summary.attendance_dates.is_empty());
    }

    #[test]
    fn test_summary_full_attendance_february() {
        let dates: Vec<NaiveDate> = (1..=29)
            .filter_map(|d| NaiveDate::from_ymd_opt(2024, 2, d))
            .filter(|d| d.weekday() != Weekday::Sun)
            .collect();
        assert_eq!(dates.len(), 25);

        let summary = compute_summary(2024, 2, &dates);

        assert_eq!(summary.attended_days, 25);
        assert_eq!(summary.missed_days, 0);
        assert_eq!(summary.attendance_percentage, 100);
    }

    #[test]
    fn test_summary_sorts_and_keeps_duplicates() {
        let dates = vec![date("2024-03-05"), date("2024-03-01"), date("2024-03-05")];

        let summary = compute_summary(2024, 3, &dates);

        assert_eq!(summary.attended_days, 3);
        assert_eq!(
            summary.attendance_dates,
            vec!["2024-03-01", "2024-03-05", "2024-03-05"]
        );
    }

    #[test]
    fn test_missed_days_floor_at_zero() {
        // 40 entries against 26 working days in March 2024
        let dates = vec![date("2024-03-04"); 40];

        let summary = compute_summary(2024, 3, &dates);

        assert_eq!(summary.working_days, 26);
        assert_eq!(summary.missed_days, 0);
        assert_eq!(summary.attendance_percentage, 154);
    }

    #[test]
    fn test_percentage_rounds_half_up() {
        assert_eq!(percentage(1, 8), 13); // 12.5
        assert_eq!(percentage(1, 3), 33);
        assert_eq!(percentage(2, 3), 67);
        assert_eq!(percentage(0, 0), 0);
        assert_eq!(percentage(26, 26), 100);
    }

    #[test]
    fn test_percentage_within_bounds_when_not_over_attended() {
        for working in 1..=27 {
            for attended in 0..=working {
                let p = percentage(attended, working);
                assert!(p <= 100);
            }
        }
    }
}
