use crate::models::PreferenceRecord;

const DATE_FORMAT: &str = "%Y-%m-%d";

pub fn build_prompt(record: &PreferenceRecord) -> String {
    let main_interests = record
        .main_interests
        .iter()
        .map(|category| category.as_str())
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "You are an expert travel planner. Create a detailed travel itinerary with the following specifications:

Destination: {destination}
Travel Dates: {start} to {end}
Total Budget: ${budget}
Main Interests: {main_interests}
Detailed Interests: {detailed_interests}
Dietary Preferences: {dietary}
Mobility Level: {mobility}
Accommodation Type: {accommodation}

Provide a comprehensive travel plan that includes:
1. Detailed daily activities tailored to interests
2. Considerations for dietary and mobility requirements
3. Estimated costs for activities and accommodations
4. Local experiences and hidden gems
5. Practical travel tips specific to the destination

Respond with a structured, easy-to-read itinerary that maximizes the traveler's experience while respecting preferences and budget constraints.
",
        destination = record.destination,
        start = record.start_date.format(DATE_FORMAT),
        end = record.end_date.format(DATE_FORMAT),
        budget = record.budget,
        detailed_interests = record.detailed_interests.join(", "),
        dietary = record.dietary_preferences,
        mobility = record.mobility_level,
        accommodation = record.accommodation_type,
    )
}
