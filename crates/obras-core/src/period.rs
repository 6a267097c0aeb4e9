//! Month/year extraction from Portuguese free text.
//!
//! The parser never fails. It looks, in order, for a month name, a numeric
//! `month/year` pair and a bare `20xx` year, and fills whatever is still
//! unknown from today's date.

use std::ops::RangeInclusive;

use chrono::{Datelike, Local, Months, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::text::normalize_text;

/// Month names and abbreviations, already normalized. Scanned in order; the
/// first key found anywhere in the text wins.
const MONTHS_PT: [(&str, u32); 24] = [
    ("janeiro", 1),
    ("jan", 1),
    ("fevereiro", 2),
    ("fev", 2),
    ("marco", 3),
    ("mar", 3),
    ("abril", 4),
    ("abr", 4),
    ("maio", 5),
    ("mai", 5),
    ("junho", 6),
    ("jun", 6),
    ("julho", 7),
    ("jul", 7),
    ("agosto", 8),
    ("ago", 8),
    ("setembro", 9),
    ("set", 9),
    ("outubro", 10),
    ("out", 10),
    ("novembro", 11),
    ("nov", 11),
    ("dezembro", 12),
    ("dez", 12),
];

static MONTH_YEAR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(0?[1-9]|1[0-2])\s*[/\-.]\s*([0-9]{2}|[0-9]{4})\b")
        .expect("valid month/year regex")
});
static YEAR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(20[0-9]{2})\b").expect("valid year regex"));

/// A calendar month and its half-open date range `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Period {
    /// Month, 1-12.
    pub month: u32,
    pub year: i32,
    /// First day of the month.
    pub start: NaiveDate,
    /// First day of the following month.
    pub end: NaiveDate,
}

/// Years a [`Period`] can be built for. Both bounds of every period stay
/// four-digit ISO dates.
pub const YEARS: RangeInclusive<i32> = 1900..=2999;

impl Period {
    /// Builds the period for `month` (1-12) of `year`.
    ///
    /// December ends on January 1st of the next year. Returns `None` when
    /// `month` is not 1-12 or `year` falls outside [`YEARS`].
    pub fn from_month_year(month: u32, year: i32) -> Option<Self> {
        if !(1..=12).contains(&month) || !YEARS.contains(&year) {
            return None;
        }

        let start = NaiveDate::from_ymd_opt(year, month, 1)?;
        let end = start.checked_add_months(Months::new(1))?;

        Some(Self {
            month,
            year,
            start,
            end,
        })
    }
}

/// Reads a month and year out of `text`, defaulting to the current local month.
pub fn parse_month_year(text: &str) -> Period {
    parse_month_year_on(text, Local::now().date_naive())
}

/// Same as [`parse_month_year`], with `today` supplying the defaults.
pub fn parse_month_year_on(text: &str, today: NaiveDate) -> Period {
    let t = normalize_text(text);
    let mut year = today.year();

    let mut month = MONTHS_PT
        .iter()
        .find(|(name, _)| t.contains(name))
        .map(|&(_, m)| m);

    if let Some(caps) = MONTH_YEAR_RE.captures(&t) {
        month = caps[1].parse().ok();
        let yy = &caps[2];
        let parsed = if yy.len() == 2 {
            format!("20{}", yy).parse()
        } else {
            yy.parse()
        };
        if let Ok(y) = parsed {
            year = y;
        }
    }

    if let Some(caps) = YEAR_RE.captures(&t) {
        if let Ok(y) = caps[1].parse() {
            year = y;
        }
    }

    let month = month.unwrap_or_else(|| today.month());
    let year = year.clamp(*YEARS.start(), *YEARS.end());
    Period::from_month_year(month, year).expect("month is 1-12 and year is within YEARS")
}
