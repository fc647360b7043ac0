//! Input handling for the health tracking commands.
//!
//! Everything here is independent of Discord and the database: parsing
//! the free-text modal fields, resolving date keywords and the TDEE
//! calculation.

use std::str::FromStr;

use chrono::{Days, Local, NaiveDate};
use thiserror::Error;

/// Dates as stored in the database.
pub const STORED_DATE: &str = "%Y-%m-%d";
/// Dates as shown to and typed by users.
pub const DISPLAY_DATE: &str = "%d/%m/%Y";
pub const STORED_TIME: &str = "%H:%M";

/// Lowest and highest accepted value for 1-5 ratings.
pub const RATING_RANGE: (i32, i32) = (1, 5);

/// Katch-McArdle activity multipliers, indexed by activity level - 1.
pub const ACTIVITY_MULTIPLIERS: [f64; 5] = [1.2, 1.375, 1.55, 1.725, 1.9];

#[derive(Error, Debug, Clone, PartialEq)]
pub enum HealthError {
    #[error("`{value}` is not a valid number for {field}.")]
    InvalidNumber {
        field: &'static str,
        value: String,
    },

    #[error("{field} must be between {min} and {max}.")]
    OutOfRange {
        field: &'static str,
        min: i32,
        max: i32,
    },

    #[error("`{0}` is not a date. Use today, tomorrow, yesterday or dd/mm/yyyy.")]
    InvalidDate(String),

    #[error("Invalid task number: there is no task {0} on that day.")]
    NoSuchTask(usize),

    #[error("This user's health profile is private or doesn't exist.")]
    PrivateProfile,

    #[error("Please track your body measurements first using the /body-track command.")]
    NoBodyMeasurements,

    #[error("No journal entries found.")]
    NoJournalEntries,
}

type Result<T> = core::result::Result<T, HealthError>;

/// Resolves `today`, `tomorrow`, `yesterday` or a dd/mm/yyyy date.
pub fn parse_date(input: &str, today: NaiveDate) -> Result<NaiveDate> {
    let input = input.trim();
    let parsed = match input.to_lowercase().as_str() {
        "today" => Some(today),
        "tomorrow" => today.checked_add_days(Days::new(1)),
        "yesterday" => today.checked_sub_days(Days::new(1)),
        _ => NaiveDate::parse_from_str(input, DISPLAY_DATE).ok(),
    };
    parsed.ok_or_else(|| HealthError::InvalidDate(input.to_string()))
}

pub fn stored_date(date: NaiveDate) -> String {
    date.format(STORED_DATE).to_string()
}

pub fn display_date(date: NaiveDate) -> String {
    date.format(DISPLAY_DATE).to_string()
}

/// Converts a stored `YYYY-MM-DD` date for display, leaving anything
/// unparsable untouched.
pub fn display_stored(date: &str) -> String {
    NaiveDate::parse_from_str(date, STORED_DATE)
        .map(display_date)
        .unwrap_or_else(|_| date.to_string())
}

/// Local date and time a tracked entry is stamped with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stamp {
    pub date: String,
    pub time: String,
}

impl Stamp {
    pub fn now() -> Self {
        let now = Local::now().naive_local();
        Self {
            date: now.format(STORED_DATE).to_string(),
            time: now.format(STORED_TIME).to_string(),
        }
    }
}

/// Parses a numeric modal field.
pub fn parse_number<T: FromStr>(field: &'static str, value: &str) -> Result<T> {
    value.trim()
        .parse()
        .map_err(|_| HealthError::InvalidNumber { field, value: value.trim().to_string() })
}

/// Parses a 1-5 rating such as a sleep score or mood.
pub fn parse_rating(field: &'static str, value: &str) -> Result<i32> {
    let rating = parse_number(field, value)?;
    let (min, max) = RATING_RANGE;
    if (min..=max).contains(&rating) {
        Ok(rating)
    } else {
        Err(HealthError::OutOfRange { field, min, max })
    }
}

/// Parses a 1-based todo position.
pub fn parse_position(value: &str) -> Result<usize> {
    match parse_number("task number", value)? {
        0 => Err(HealthError::NoSuchTask(0)),
        n => Ok(n),
    }
}

/// Blank optional fields are stored as NULL.
pub fn optional_text(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tdee {
    pub bmr: f64,
    pub tdee: f64,
}

/// Total daily energy expenditure via the Katch-McArdle formula.
pub fn tdee(mass_in_kg: f64, body_fat_percentage: f64, activity_level: i32) -> Result<Tdee> {
    let (min, max) = RATING_RANGE;
    let multiplier = usize::try_from(activity_level - 1)
        .ok()
        .and_then(|i| ACTIVITY_MULTIPLIERS.get(i))
        .ok_or(HealthError::OutOfRange { field: "Activity level", min, max })?;

    let lean_mass = mass_in_kg * (1.0 - body_fat_percentage / 100.0);
    let bmr = 370.0 + 21.6 * lean_mass;

    Ok(Tdee { bmr, tdee: bmr * multiplier })
}
