use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc, Weekday};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QuarterBounds {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// One calendar month inside the still-open quarter, `[start, end)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthWindow {
    pub label: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

pub fn quarter_bounds(date: NaiveDate) -> QuarterBounds {
    let first_month = (date.month0() / 3) * 3 + 1;
    let start = first_of_month(date.year(), first_month);
    let (ny, nm) = add_months(date.year(), first_month, 3);
    QuarterBounds {
        start,
        end: first_of_month(ny, nm) - Duration::days(1),
    }
}

pub fn prior_quarter_bounds(date: NaiveDate) -> QuarterBounds {
    let current = quarter_bounds(date);
    quarter_bounds(current.start - Duration::days(1))
}

pub fn prior_quarter_end(date: NaiveDate) -> NaiveDate {
    prior_quarter_bounds(date).end
}

/// `2025-09-30` -> `"3Q25"`.
pub fn quarter_label(date: NaiveDate) -> String {
    let q = date.month0() / 3 + 1;
    format!("{q}Q{:02}", date.year().rem_euclid(100))
}

/// Given the latest filing date seen, returns (filing quarter end, prior quarter end).
pub fn quarter_end_from_max_date(max_date: NaiveDate) -> (NaiveDate, NaiveDate) {
    let filing = quarter_bounds(max_date).end;
    (filing, prior_quarter_end(filing))
}

/// Up to three months following `quarter_end`, stopping at months that have not started yet.
pub fn month_windows_after(quarter_end: NaiveDate, today: NaiveDate) -> Vec<MonthWindow> {
    let mut out = Vec::with_capacity(3);
    let (mut year, mut month) = add_months(quarter_end.year(), quarter_end.month(), 1);
    for _ in 0..3 {
        let start = first_of_month(year, month);
        if start > today {
            break;
        }
        let (ny, nm) = add_months(year, month, 1);
        let is_current = today.year() == year && today.month() == month;
        let mut label = start.format("%b").to_string();
        if is_current {
            label.push_str(" MTD");
        }
        out.push(MonthWindow {
            label,
            start,
            end: first_of_month(ny, nm),
        });
        year = ny;
        month = nm;
    }
    out
}

pub fn resolve_as_of_date(
    as_of_date_arg: Option<&str>,
    now_utc: DateTime<Utc>,
) -> anyhow::Result<NaiveDate> {
    if let Some(s) = as_of_date_arg {
        return Ok(NaiveDate::parse_from_str(s, "%Y-%m-%d")?);
    }

    // Roll back to the latest weekday; exchange holidays simply yield an older last close.
    let mut date = now_utc.date_naive();
    while is_weekend(date) {
        date = date - Duration::days(1);
    }
    Ok(date)
}

fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

fn add_months(year: i32, month: u32, n: u32) -> (i32, u32) {
    let idx = month - 1 + n;
    (year + (idx / 12) as i32, idx % 12 + 1)
}

fn first_of_month(year: i32, month: u32) -> NaiveDate {
    // month is always normalised to 1..=12 by the callers above.
    NaiveDate::from_ymd_opt(year, month, 1).unwrap_or_default()
}
