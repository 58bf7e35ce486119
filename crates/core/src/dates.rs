use chrono::{Datelike, Duration, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;

/// Length of the default window, inclusive of both ends.
pub const DEFAULT_TRIP_DAYS: i64 = 7;
pub const SUMMER_TRIP_NIGHTS: i64 = 10;
pub const PARSED_TRIP_NIGHTS: i64 = 7;

const MONTHS: &str = r"(jan(?:uary)?|feb(?:ruary)?|mar(?:ch)?|apr(?:il)?|may|june?|july?|aug(?:ust)?|sep(?:t(?:ember)?)?|oct(?:ober)?|nov(?:ember)?|dec(?:ember)?)";

static YEAR_FIRST: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(\d{4})[-/.](\d{1,2})[-/.](\d{1,2})\b").expect("valid year-first regex")
});
static YEAR_LAST: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(\d{1,2})[-/.](\d{1,2})[-/.](\d{4})\b").expect("valid year-last regex")
});
static MONTH_DAY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"\b{MONTHS}\.?\s+(\d{{1,2}})(?:st|nd|rd|th)?\b(?:,?\s+(\d{{4}}))?"
    ))
    .expect("valid month-day regex")
});
static DAY_MONTH: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"\b(\d{{1,2}})(?:st|nd|rd|th)?\s+(?:of\s+)?{MONTHS}\b\.?(?:,?\s+(\d{{4}}))?"
    ))
    .expect("valid day-month regex")
});
static MONTH_ONLY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"\b{MONTHS}\b(?:\s+(\d{{4}}))?")).expect("valid month regex")
});

/// The default travel window: the first seven days of next calendar month.
pub fn next_month_window(today: NaiveDate) -> (NaiveDate, NaiveDate) {
    let (year, month) = if today.month() == 12 {
        (today.year() + 1, 1)
    } else {
        (today.year(), today.month() + 1)
    };
    let start = NaiveDate::from_ymd_opt(year, month, 1).unwrap_or(today);
    (start, start + Duration::days(DEFAULT_TRIP_DAYS - 1))
}

/// Best-effort reading of a free-text date preference such as
/// "next summer", "2026-03-14" or "March 3rd, 2027".
///
/// Returns `None` when nothing usable is found so that callers fall back
/// to the default window.
pub fn interpret_travel_dates(input: &str, today: NaiveDate) -> Option<(NaiveDate, NaiveDate)> {
    let lower = input.trim().to_lowercase();
    if lower.is_empty() {
        return None;
    }

    if lower.contains("next") || lower.contains("summer") {
        let start = upcoming_july_first(today);
        return Some((start, start + Duration::days(SUMMER_TRIP_NIGHTS)));
    }

    parse_loose_date(&lower, today).map(|start| (start, start + Duration::days(PARSED_TRIP_NIGHTS)))
}

fn upcoming_july_first(today: NaiveDate) -> NaiveDate {
    let this_year = NaiveDate::from_ymd_opt(today.year(), 7, 1).unwrap_or(today);
    if this_year >= today {
        this_year
    } else {
        NaiveDate::from_ymd_opt(today.year() + 1, 7, 1).unwrap_or(this_year)
    }
}

fn parse_loose_date(lower: &str, today: NaiveDate) -> Option<NaiveDate> {
    if let Some(caps) = YEAR_FIRST.captures(lower) {
        return ymd(number(&caps, 1)?, number(&caps, 2)?, number(&caps, 3)?);
    }

    if let Some(caps) = YEAR_LAST.captures(lower) {
        let (first, second, year) = (number(&caps, 1)?, number(&caps, 2)?, number(&caps, 3)?);
        // month first unless that cannot be a month
        return ymd(year, first, second).or_else(|| ymd(year, second, first));
    }

    if let Some(caps) = MONTH_DAY.captures(lower) {
        let month = month_number(caps.get(1)?.as_str())?;
        let year = number(&caps, 3).unwrap_or(today.year() as u32);
        return ymd(year, month, number(&caps, 2)?);
    }

    if let Some(caps) = DAY_MONTH.captures(lower) {
        let month = month_number(caps.get(2)?.as_str())?;
        let year = number(&caps, 3).unwrap_or(today.year() as u32);
        return ymd(year, month, number(&caps, 1)?);
    }

    if let Some(caps) = MONTH_ONLY.captures(lower) {
        let month = month_number(caps.get(1)?.as_str())?;
        let year = number(&caps, 2).unwrap_or(today.year() as u32);
        return ymd(year, month, 1);
    }

    None
}

fn number(caps: &regex::Captures<'_>, index: usize) -> Option<u32> {
    caps.get(index)?.as_str().parse().ok()
}

fn ymd(year: u32, month: u32, day: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(i32::try_from(year).ok()?, month, day)
}

fn month_number(name: &str) -> Option<u32> {
    let month = match name.get(..3)? {
        "jan" => 1,
        "feb" => 2,
        "mar" => 3,
        "apr" => 4,
        "may" => 5,
        "jun" => 6,
        "jul" => 7,
        "aug" => 8,
        "sep" => 9,
        "oct" => 10,
        "nov" => 11,
        "dec" => 12,
        _ => return None,
    };
    Some(month)
}
