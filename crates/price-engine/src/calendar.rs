//! Day-of-year calendar resolution.
//!
//! Converts a 1-based day offset within a reference year into the ISO 8601
//! week number and English month name of that date. The reference year is
//! always an explicit argument (no system clock access), so every result is
//! reproducible.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::error::PriceError;

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// ISO week number and month name for a single day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeekInfo {
    /// ISO 8601 week number (1-53). Early January days may report week 52/53
    /// of the previous ISO year, late December days week 1 of the next.
    pub week_number: u32,
    /// Full English month name (e.g., "January").
    pub month_name: String,
}

/// English name for a month number (1 = January .. 12 = December).
pub fn month_name(month: u32) -> Option<&'static str> {
    let index = usize::try_from(month.checked_sub(1)?).ok()?;
    MONTH_NAMES.get(index).copied()
}

/// Resolve a day-of-year offset into its ISO week number and month name.
///
/// The date is January 1 of `reference_year` plus `day_of_year - 1` days.
///
/// # Errors
///
/// Returns [`PriceError::InvalidDayOfYear`] if `day_of_year` is 0 or the
/// resulting date falls outside `reference_year` (e.g., day 366 of a
/// non-leap year).
///
/// # Examples
///
/// ```
/// use price_engine::calendar::resolve_week_and_month;
///
/// // 2026-02-18 is a Wednesday in ISO week 8.
/// let info = resolve_week_and_month(49, 2026).unwrap();
/// assert_eq!(info.week_number, 8);
/// assert_eq!(info.month_name, "February");
/// ```
pub fn resolve_week_and_month(
    day_of_year: u32,
    reference_year: i32,
) -> Result<WeekInfo, PriceError> {
    let date = date_for_day(day_of_year, reference_year)?;
    let month_name = month_name(date.month()).ok_or(PriceError::InvalidDayOfYear {
        day: day_of_year,
        year: reference_year,
    })?;

    Ok(WeekInfo {
        week_number: date.iso_week().week(),
        month_name: month_name.to_string(),
    })
}

/// The calendar date for a 1-based day offset in `reference_year`.
///
/// # Errors
///
/// Same conditions as [`resolve_week_and_month`].
pub fn date_for_day(day_of_year: u32, reference_year: i32) -> Result<NaiveDate, PriceError> {
    // from_yo_opt rejects ordinal 0 and ordinals past the end of the year.
    NaiveDate::from_yo_opt(reference_year, day_of_year).ok_or(PriceError::InvalidDayOfYear {
        day: day_of_year,
        year: reference_year,
    })
}
