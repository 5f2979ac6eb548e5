use crate::errors::ValidationError;
use chrono::{Datelike, Duration, Local, NaiveDate};
use serde::Serialize;

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

pub fn date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

pub fn parse_date_key(raw: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| ValidationError::InvalidDate(raw.to_string()))
}

/// Parses an `HH:MM` wall-clock time into minutes since midnight.
pub fn parse_clock(raw: &str) -> Result<u32, ValidationError> {
    let invalid = || ValidationError::InvalidTime(raw.to_string());
    let (hours, minutes) = raw.trim().split_once(':').ok_or_else(invalid)?;
    let hours: u32 = hours.parse().map_err(|_| invalid())?;
    let minutes: u32 = minutes.parse().map_err(|_| invalid())?;
    if hours > 23 || minutes > 59 {
        return Err(invalid());
    }
    Ok(hours * 60 + minutes)
}

/// The Sunday-started week containing `date`.
pub fn week_dates(date: NaiveDate) -> Vec<NaiveDate> {
    let start = date - Duration::days(date.weekday().num_days_from_sunday() as i64);
    (0..7).map(|offset| start + Duration::days(offset)).collect()
}

pub fn month_dates(date: NaiveDate) -> Vec<NaiveDate> {
    let Some(first) = date.with_day(1) else {
        return Vec::new();
    };
    first
        .iter_days()
        .take_while(|day| day.month() == first.month())
        .collect()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start.is_none_or(|start| date >= start) && self.end.is_none_or(|end| date <= end)
    }

    /// Pulls `date` into the range, used to pick a sensible default day.
    pub fn clamp(&self, date: NaiveDate) -> NaiveDate {
        match (self.start, self.end) {
            (Some(start), _) if date < start => start,
            (_, Some(end)) if date > end => end,
            _ => date,
        }
    }

    pub fn check(&self, date: NaiveDate) -> Result<NaiveDate, ValidationError> {
        if self.contains(date) {
            Ok(date)
        } else {
            Err(ValidationError::OutOfRange(date_key(date)))
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CalendarDay {
    pub date: String,
    pub day: u32,
    pub selected: bool,
    pub today: bool,
    pub in_range: bool,
}

#[derive(Debug, Serialize)]
pub struct CalendarMonth {
    pub year: i32,
    pub month: u32,
    pub leading_blanks: u32,
    pub days: Vec<CalendarDay>,
    pub prev: (i32, u32),
    pub next: (i32, u32),
    pub prev_day: Option<String>,
    pub next_day: Option<String>,
}

pub fn calendar_month(
    year: i32,
    month: u32,
    selected: NaiveDate,
    today: NaiveDate,
    range: &DateRange,
) -> Result<CalendarMonth, ValidationError> {
    let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or(ValidationError::InvalidValue {
        field: "month",
        rule: "a valid year and month (1-12)",
    })?;

    let days = month_dates(first)
        .into_iter()
        .map(|date| CalendarDay {
            date: date_key(date),
            day: date.day(),
            selected: date == selected,
            today: date == today,
            in_range: range.contains(date),
        })
        .collect();

    Ok(CalendarMonth {
        year,
        month,
        leading_blanks: first.weekday().num_days_from_sunday(),
        days,
        prev: shift_month(year, month, -1),
        next: shift_month(year, month, 1),
        prev_day: step_day(selected, false, range).map(date_key),
        next_day: step_day(selected, true, range).map(date_key),
    })
}

pub fn shift_month(year: i32, month: u32, delta: i32) -> (i32, u32) {
    let index = year * 12 + month as i32 - 1 + delta;
    (index.div_euclid(12), index.rem_euclid(12) as u32 + 1)
}

/// Moves one day forward or back, refusing to leave `range`.
pub fn step_day(selected: NaiveDate, forward: bool, range: &DateRange) -> Option<NaiveDate> {
    let next = if forward {
        selected.succ_opt()?
    } else {
        selected.pred_opt()?
    };
    range.contains(next).then_some(next)
}

pub fn days_remaining(selected: NaiveDate, end: NaiveDate) -> i64 {
    (end - selected).num_days()
}
