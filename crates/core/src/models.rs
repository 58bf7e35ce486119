use std::fmt;

use chrono::NaiveDate;
use serde::de::value::StrDeserializer;
use serde::de::IntoDeserializer;
use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InterestCategory {
    #[serde(alias = "history")]
    History,
    #[serde(alias = "food")]
    Food,
    #[serde(alias = "nature")]
    Nature,
    #[serde(alias = "adventure")]
    Adventure,
    #[serde(alias = "art")]
    Art,
}

impl InterestCategory {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "history" => Some(Self::History),
            "food" => Some(Self::Food),
            "nature" => Some(Self::Nature),
            "adventure" => Some(Self::Adventure),
            "art" => Some(Self::Art),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::History => "History",
            Self::Food => "Food",
            Self::Nature => "Nature",
            Self::Adventure => "Adventure",
            Self::Art => "Art",
        }
    }
}

impl fmt::Display for InterestCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DietaryPreference {
    #[default]
    #[serde(rename = "No Restrictions", alias = "no_restrictions")]
    NoRestrictions,
    #[serde(alias = "vegetarian")]
    Vegetarian,
    #[serde(alias = "vegan")]
    Vegan,
    #[serde(alias = "kosher")]
    Kosher,
    #[serde(alias = "halal")]
    Halal,
    #[serde(rename = "Gluten-Free", alias = "gluten_free")]
    GlutenFree,
    #[serde(rename = "Dairy-Free", alias = "dairy_free")]
    DairyFree,
}

impl DietaryPreference {
    pub fn parse(value: &str) -> Option<Self> {
        match slug(value).as_str() {
            "no-restrictions" | "none" => Some(Self::NoRestrictions),
            "vegetarian" => Some(Self::Vegetarian),
            "vegan" => Some(Self::Vegan),
            "kosher" => Some(Self::Kosher),
            "halal" => Some(Self::Halal),
            "gluten-free" => Some(Self::GlutenFree),
            "dairy-free" => Some(Self::DairyFree),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::NoRestrictions => "No Restrictions",
            Self::Vegetarian => "Vegetarian",
            Self::Vegan => "Vegan",
            Self::Kosher => "Kosher",
            Self::Halal => "Halal",
            Self::GlutenFree => "Gluten-Free",
            Self::DairyFree => "Dairy-Free",
        }
    }
}

impl fmt::Display for DietaryPreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MobilityLevel {
    #[default]
    #[serde(rename = "Full Mobility", alias = "full_mobility")]
    FullMobility,
    #[serde(rename = "Limited Mobility", alias = "limited_mobility")]
    LimitedMobility,
    #[serde(rename = "Wheelchair Accessible", alias = "wheelchair_accessible")]
    WheelchairAccessible,
    #[serde(
        rename = "Requires Special Assistance",
        alias = "requires_special_assistance"
    )]
    RequiresSpecialAssistance,
}

impl MobilityLevel {
    pub fn parse(value: &str) -> Option<Self> {
        match slug(value).as_str() {
            "full-mobility" | "full" => Some(Self::FullMobility),
            "limited-mobility" | "limited" => Some(Self::LimitedMobility),
            "wheelchair-accessible" | "wheelchair" => Some(Self::WheelchairAccessible),
            "requires-special-assistance" | "special-assistance" => {
                Some(Self::RequiresSpecialAssistance)
            }
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::FullMobility => "Full Mobility",
            Self::LimitedMobility => "Limited Mobility",
            Self::WheelchairAccessible => "Wheelchair Accessible",
            Self::RequiresSpecialAssistance => "Requires Special Assistance",
        }
    }
}

impl fmt::Display for MobilityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AccommodationType {
    #[serde(alias = "budget")]
    Budget,
    #[default]
    #[serde(rename = "Mid-Range", alias = "mid_range")]
    MidRange,
    #[serde(alias = "luxury")]
    Luxury,
    #[serde(alias = "boutique")]
    Boutique,
    #[serde(rename = "Family-Friendly", alias = "family_friendly")]
    FamilyFriendly,
    #[serde(rename = "Business Traveler", alias = "business_traveler")]
    BusinessTraveler,
}

impl AccommodationType {
    pub fn parse(value: &str) -> Option<Self> {
        match slug(value).as_str() {
            "budget" => Some(Self::Budget),
            "mid-range" | "midrange" => Some(Self::MidRange),
            "luxury" => Some(Self::Luxury),
            "boutique" => Some(Self::Boutique),
            "family-friendly" | "family" => Some(Self::FamilyFriendly),
            "business-traveler" | "business" => Some(Self::BusinessTraveler),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Budget => "Budget",
            Self::MidRange => "Mid-Range",
            Self::Luxury => "Luxury",
            Self::Boutique => "Boutique",
            Self::FamilyFriendly => "Family-Friendly",
            Self::BusinessTraveler => "Business Traveler",
        }
    }
}

impl fmt::Display for AccommodationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Preferences as submitted by a form or CLI, any field may be missing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawPreferences {
    pub destination: Option<String>,
    #[serde(deserialize_with = "blank_as_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(deserialize_with = "blank_as_none")]
    pub end_date: Option<NaiveDate>,
    pub budget: Option<f64>,
    pub budget_description: Option<String>,
    pub main_interests: Option<Vec<InterestCategory>>,
    pub detailed_interests: Option<Vec<String>>,
    pub interest_description: Option<String>,
    #[serde(deserialize_with = "blank_as_none")]
    pub dietary_preferences: Option<DietaryPreference>,
    #[serde(deserialize_with = "blank_as_none")]
    pub mobility_level: Option<MobilityLevel>,
    #[serde(deserialize_with = "blank_as_none")]
    pub accommodation_type: Option<AccommodationType>,
}

/// Forms post unfilled boxes and dropdowns as `""`; those mean "not given".
fn blank_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    let Some(text) = Option::<String>::deserialize(deserializer)? else {
        return Ok(None);
    };
    let text = text.trim();
    if text.is_empty() {
        return Ok(None);
    }
    let value: StrDeserializer<'_, D::Error> = text.into_deserializer();
    T::deserialize(value).map(Some)
}

/// Fully populated preferences, ready to be rendered into a prompt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreferenceRecord {
    pub destination: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub budget: f64,
    pub main_interests: Vec<InterestCategory>,
    pub detailed_interests: Vec<String>,
    pub dietary_preferences: DietaryPreference,
    pub mobility_level: MobilityLevel,
    pub accommodation_type: AccommodationType,
}

/// Free-text submission: a trip description plus optional hints.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FlexibleRequest {
    pub description: String,
    pub destination: Option<String>,
    pub dates: Option<String>,
    pub budget_description: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReplyKind {
    Itinerary,
    Clarification,
    UpstreamError,
    TransportError,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanReply {
    pub kind: ReplyKind,
    pub text: String,
}

impl PlanReply {
    pub fn itinerary(text: impl Into<String>) -> Self {
        Self {
            kind: ReplyKind::Itinerary,
            text: text.into(),
        }
    }

    pub fn clarification(text: impl Into<String>) -> Self {
        Self {
            kind: ReplyKind::Clarification,
            text: text.into(),
        }
    }

    pub fn is_itinerary(&self) -> bool {
        self.kind == ReplyKind::Itinerary
    }
}

fn slug(value: &str) -> String {
    value
        .trim()
        .to_lowercase()
        .split(|ch: char| ch.is_whitespace() || ch == '_' || ch == '-')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}
