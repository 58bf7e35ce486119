pub mod catalog;
pub mod dates;
pub mod interpret;
pub mod models;
pub mod normalizer;
pub mod prompt;

pub use catalog::{catalog, BudgetRange, Catalog, CategoryChoices, InterestKeyword};
pub use dates::{interpret_travel_dates, next_month_window};
pub use interpret::{
    detailed_interest_choices, interpret_budget, interpret_interests, InterestGroup,
    InterestMatches,
};
pub use models::*;
pub use normalizer::{raw_from_flexible, validate_and_refine, validate_and_refine_on, ValidationError};
pub use prompt::build_prompt;
