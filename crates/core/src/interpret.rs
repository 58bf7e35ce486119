use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::catalog::catalog;
use crate::models::InterestCategory;

pub const DEFAULT_BUDGET: f64 = 2_000.0;

static BUDGET_NOISE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^\w\s]").expect("valid budget noise regex"));
static DIGIT_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"[0-9]+").expect("valid digit regex"));

/// Reads a budget out of text such as "moderate budget" or "$4,500".
pub fn interpret_budget(input: &str) -> f64 {
    let cleaned = BUDGET_NOISE.replace_all(input, "").to_lowercase();

    if let Some(range) = catalog()
        .budget_ranges
        .iter()
        .find(|range| cleaned.contains(range.name))
    {
        return range.midpoint();
    }

    DIGIT_RUN
        .find(&cleaned)
        .and_then(|digits| digits.as_str().parse::<f64>().ok())
        .filter(|value| value.is_finite())
        .unwrap_or(DEFAULT_BUDGET)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InterestGroup {
    pub category: InterestCategory,
    pub subcategories: Vec<String>,
}

/// Interest categories in first-match order, each with the subcategories
/// contributed by every matching keyword.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct InterestMatches {
    groups: Vec<InterestGroup>,
}

impl InterestMatches {
    pub fn balanced_default() -> Self {
        let mut matches = Self::default();
        matches.append(InterestCategory::History, &["Museums"]);
        matches.append(InterestCategory::Nature, &["National Parks"]);
        matches.append(InterestCategory::Food, &["Local Cuisine"]);
        matches
    }

    pub fn groups(&self) -> &[InterestGroup] {
        &self.groups
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn categories(&self) -> Vec<InterestCategory> {
        self.groups.iter().map(|group| group.category).collect()
    }

    pub fn subcategories(&self, category: InterestCategory) -> Option<&[String]> {
        self.groups
            .iter()
            .find(|group| group.category == category)
            .map(|group| group.subcategories.as_slice())
    }

    pub fn flattened(&self) -> Vec<String> {
        self.groups
            .iter()
            .flat_map(|group| group.subcategories.iter().cloned())
            .collect()
    }

    fn append(&mut self, category: InterestCategory, subcategories: &[&str]) {
        let extra = subcategories.iter().map(|value| value.to_string());
        match self
            .groups
            .iter_mut()
            .find(|group| group.category == category)
        {
            Some(group) => group.subcategories.extend(extra),
            None => self.groups.push(InterestGroup {
                category,
                subcategories: extra.collect(),
            }),
        }
    }
}

pub fn interpret_interests(input: &str) -> InterestMatches {
    let lower = input.to_lowercase();
    let mut matches = InterestMatches::default();

    for entry in &catalog().interest_keywords {
        if lower.contains(entry.keyword) {
            matches.append(entry.category, &entry.subcategories);
        }
    }

    if matches.is_empty() {
        InterestMatches::balanced_default()
    } else {
        matches
    }
}

/// Subcategories a traveler may pick once the given main interests are chosen.
pub fn detailed_interest_choices(main: &[InterestCategory]) -> Vec<String> {
    let catalog = catalog();
    main.iter()
        .flat_map(|category| catalog.subcategories(*category).iter())
        .map(|value| value.to_string())
        .collect()
}
