//! Process-wide reference data: enumerations offered to travelers and the
//! keyword tables used to interpret free-text descriptions.

use once_cell::sync::Lazy;
use serde::Serialize;

use crate::models::{AccommodationType, DietaryPreference, InterestCategory, MobilityLevel};

/// Midpoint used for the luxury range, whose upper bound is open.
pub const LUXURY_BUDGET_ESTIMATE: f64 = 15_000.0;

static CATALOG: Lazy<Catalog> = Lazy::new(Catalog::build);

pub fn catalog() -> &'static Catalog {
    &CATALOG
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryChoices {
    pub category: InterestCategory,
    pub subcategories: Vec<&'static str>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BudgetRange {
    pub name: &'static str,
    pub min: f64,
    pub max: Option<f64>,
}

impl BudgetRange {
    pub fn midpoint(&self) -> f64 {
        match self.max {
            Some(max) => (self.min + max) / 2.0,
            None => LUXURY_BUDGET_ESTIMATE,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct InterestKeyword {
    pub keyword: &'static str,
    pub category: InterestCategory,
    pub subcategories: Vec<&'static str>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Catalog {
    pub dietary_preferences: Vec<DietaryPreference>,
    pub mobility_levels: Vec<MobilityLevel>,
    pub accommodation_types: Vec<AccommodationType>,
    pub interests: Vec<CategoryChoices>,
    /// Checked in order; the first range named in a description wins.
    pub budget_ranges: Vec<BudgetRange>,
    /// Checked in order; every matching keyword contributes.
    pub interest_keywords: Vec<InterestKeyword>,
}

impl Catalog {
    fn build() -> Self {
        Self {
            dietary_preferences: vec![
                DietaryPreference::NoRestrictions,
                DietaryPreference::Vegetarian,
                DietaryPreference::Vegan,
                DietaryPreference::Kosher,
                DietaryPreference::Halal,
                DietaryPreference::GlutenFree,
                DietaryPreference::DairyFree,
            ],
            mobility_levels: vec![
                MobilityLevel::FullMobility,
                MobilityLevel::LimitedMobility,
                MobilityLevel::WheelchairAccessible,
                MobilityLevel::RequiresSpecialAssistance,
            ],
            accommodation_types: vec![
                AccommodationType::Budget,
                AccommodationType::MidRange,
                AccommodationType::Luxury,
                AccommodationType::Boutique,
                AccommodationType::FamilyFriendly,
                AccommodationType::BusinessTraveler,
            ],
            interests: vec![
                choices(
                    InterestCategory::History,
                    &[
                        "Ancient Ruins",
                        "Museums",
                        "Historical Landmarks",
                        "Archaeological Sites",
                    ],
                ),
                choices(
                    InterestCategory::Food,
                    &[
                        "Street Food",
                        "Fine Dining",
                        "Local Cuisine",
                        "Cooking Classes",
                        "Food Tours",
                    ],
                ),
                choices(
                    InterestCategory::Nature,
                    &[
                        "Hiking",
                        "Wildlife Watching",
                        "National Parks",
                        "Beaches",
                        "Scenic Landscapes",
                    ],
                ),
                choices(
                    InterestCategory::Adventure,
                    &[
                        "Extreme Sports",
                        "Outdoor Activities",
                        "Water Sports",
                        "Mountain Activities",
                    ],
                ),
                choices(
                    InterestCategory::Art,
                    &[
                        "Art Galleries",
                        "Street Art",
                        "Cultural Performances",
                        "Local Crafts",
                    ],
                ),
            ],
            budget_ranges: vec![
                BudgetRange {
                    name: "low",
                    min: 0.0,
                    max: Some(1_000.0),
                },
                BudgetRange {
                    name: "moderate",
                    min: 1_000.0,
                    max: Some(3_000.0),
                },
                BudgetRange {
                    name: "high",
                    min: 3_000.0,
                    max: Some(10_000.0),
                },
                BudgetRange {
                    name: "luxury",
                    min: 10_000.0,
                    max: None,
                },
            ],
            interest_keywords: vec![
                keyword(
                    "history",
                    InterestCategory::History,
                    &["Museums", "Historical Landmarks"],
                ),
                keyword(
                    "culture",
                    InterestCategory::History,
                    &["Museums", "Cultural Performances"],
                ),
                keyword(
                    "nature",
                    InterestCategory::Nature,
                    &["National Parks", "Hiking", "Scenic Landscapes"],
                ),
                keyword(
                    "food",
                    InterestCategory::Food,
                    &["Local Cuisine", "Street Food", "Food Tours"],
                ),
                keyword(
                    "adventure",
                    InterestCategory::Adventure,
                    &["Extreme Sports", "Outdoor Activities"],
                ),
                keyword(
                    "art",
                    InterestCategory::Art,
                    &["Art Galleries", "Street Art"],
                ),
                keyword(
                    "relax",
                    InterestCategory::Nature,
                    &["Beaches", "Scenic Landscapes"],
                ),
                keyword(
                    "explore",
                    InterestCategory::Adventure,
                    &["Hiking", "Wildlife Watching"],
                ),
            ],
        }
    }

    pub fn subcategories(&self, category: InterestCategory) -> &[&'static str] {
        self.interests
            .iter()
            .find(|entry| entry.category == category)
            .map(|entry| entry.subcategories.as_slice())
            .unwrap_or(&[])
    }
}

fn choices(category: InterestCategory, subcategories: &[&'static str]) -> CategoryChoices {
    CategoryChoices {
        category,
        subcategories: subcategories.to_vec(),
    }
}

fn keyword(
    keyword: &'static str,
    category: InterestCategory,
    subcategories: &[&'static str],
) -> InterestKeyword {
    InterestKeyword {
        keyword,
        category,
        subcategories: subcategories.to_vec(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_category_has_choices() {
        let catalog = catalog();
        for category in [
            InterestCategory::History,
            InterestCategory::Food,
            InterestCategory::Nature,
            InterestCategory::Adventure,
            InterestCategory::Art,
        ] {
            assert!(!catalog.subcategories(category).is_empty());
        }
    }

    #[test]
    fn luxury_midpoint_is_finite() {
        let luxury = catalog()
            .budget_ranges
            .iter()
            .find(|range| range.name == "luxury")
            .unwrap();
        assert!(luxury.midpoint().is_finite());
        assert_eq!(luxury.midpoint(), LUXURY_BUDGET_ESTIMATE);
    }
}
