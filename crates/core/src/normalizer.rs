use chrono::{Local, NaiveDate};
use thiserror::Error;

use crate::dates::{interpret_travel_dates, next_month_window};
use crate::interpret::{detailed_interest_choices, interpret_budget, interpret_interests};
use crate::models::{FlexibleRequest, PreferenceRecord, RawPreferences};

pub const DEFAULT_BUDGET_DESCRIPTION: &str = "moderate budget";
pub const DEFAULT_INTEREST_DESCRIPTION: &str = "mix of culture and adventure";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please specify a destination. For example: 'Tokyo, Japan' or 'European trip'")]
    MissingDestination,
}

impl ValidationError {
    /// Text shown to the traveler in place of an itinerary.
    pub fn clarification(&self) -> String {
        format!("Input Clarification Needed: {self}")
    }
}

pub fn normalize_text(input: &str) -> String {
    input.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Completes `raw` relative to today's local date.
pub fn validate_and_refine(raw: RawPreferences) -> Result<PreferenceRecord, ValidationError> {
    validate_and_refine_on(raw, Local::now().date_naive())
}

pub fn validate_and_refine_on(
    raw: RawPreferences,
    today: NaiveDate,
) -> Result<PreferenceRecord, ValidationError> {
    let destination = raw
        .destination
        .as_deref()
        .map(normalize_text)
        .filter(|value| !value.is_empty())
        .ok_or(ValidationError::MissingDestination)?;

    let budget = match raw.budget.filter(|value| value.is_finite() && *value > 0.0) {
        Some(budget) => budget,
        None => interpret_budget(
            raw.budget_description
                .as_deref()
                .unwrap_or(DEFAULT_BUDGET_DESCRIPTION),
        ),
    };

    let (main_interests, detailed_interests) =
        match raw.main_interests.filter(|values| !values.is_empty()) {
            Some(main) => {
                let detailed = raw
                    .detailed_interests
                    .filter(|values| !values.is_empty())
                    .unwrap_or_else(|| detailed_interest_choices(&main));
                (main, detailed)
            }
            None => {
                let matches = interpret_interests(
                    raw.interest_description
                        .as_deref()
                        .unwrap_or(DEFAULT_INTEREST_DESCRIPTION),
                );
                (matches.categories(), matches.flattened())
            }
        };

    let (start_date, end_date) = match (raw.start_date, raw.end_date) {
        (Some(start), Some(end)) => (start, end),
        _ => next_month_window(today),
    };

    Ok(PreferenceRecord {
        destination,
        start_date,
        end_date,
        budget,
        main_interests,
        detailed_interests,
        dietary_preferences: raw.dietary_preferences.unwrap_or_default(),
        mobility_level: raw.mobility_level.unwrap_or_default(),
        accommodation_type: raw.accommodation_type.unwrap_or_default(),
    })
}

/// Turns a free-text submission into raw preferences. The description
/// drives interests; a dates hint that cannot be read is dropped.
pub fn raw_from_flexible(request: FlexibleRequest, today: NaiveDate) -> RawPreferences {
    let dates = request
        .dates
        .as_deref()
        .and_then(|text| interpret_travel_dates(text, today));

    RawPreferences {
        destination: request.destination,
        start_date: dates.map(|(start, _)| start),
        end_date: dates.map(|(_, end)| end),
        budget_description: request.budget_description,
        interest_description: Some(request.description),
        ..RawPreferences::default()
    }
}
