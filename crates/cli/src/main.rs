use std::process::ExitCode;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use voyage_agents::{GenerationConfig, TravelPlanner};
use voyage_core::{
    build_prompt, catalog, detailed_interest_choices, validate_and_refine, AccommodationType,
    DietaryPreference, FlexibleRequest, InterestCategory, MobilityLevel, PlanReply,
    RawPreferences,
};
use voyage_observability::{init_tracing, AppMetrics};

#[derive(Debug, Parser)]
#[command(name = "planner")]
#[command(about = "Voyage travel itinerary planner")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Plan from explicit preferences; anything left out is defaulted.
    Plan(DetailedArgs),
    /// Plan from a free-text trip description.
    Flex {
        description: String,
        #[arg(long)]
        destination: Option<String>,
        /// e.g. "next summer" or "2027-04-10"
        #[arg(long)]
        dates: Option<String>,
        #[arg(long)]
        budget_description: Option<String>,
    },
    /// Print the prompt that would be sent, without calling the service.
    Prompt(DetailedArgs),
    /// Print the reference catalog, or the detailed choices for --main.
    Catalog {
        #[arg(long, value_delimiter = ',', value_parser = parse_interest)]
        main: Vec<InterestCategory>,
    },
}

#[derive(Debug, Args)]
struct DetailedArgs {
    #[arg(long)]
    destination: Option<String>,
    #[arg(long)]
    start_date: Option<NaiveDate>,
    #[arg(long)]
    end_date: Option<NaiveDate>,
    #[arg(long)]
    budget: Option<f64>,
    #[arg(long)]
    budget_description: Option<String>,
    #[arg(long, value_delimiter = ',', value_parser = parse_interest)]
    interests: Vec<InterestCategory>,
    #[arg(long, value_delimiter = ',')]
    details: Vec<String>,
    #[arg(long)]
    interest_description: Option<String>,
    #[arg(long, value_parser = parse_diet)]
    diet: Option<DietaryPreference>,
    #[arg(long, value_parser = parse_mobility)]
    mobility: Option<MobilityLevel>,
    #[arg(long, value_parser = parse_accommodation)]
    accommodation: Option<AccommodationType>,
}

impl From<DetailedArgs> for RawPreferences {
    fn from(args: DetailedArgs) -> Self {
        RawPreferences {
            destination: args.destination,
            start_date: args.start_date,
            end_date: args.end_date,
            budget: args.budget,
            budget_description: args.budget_description,
            main_interests: Some(args.interests).filter(|values| !values.is_empty()),
            detailed_interests: Some(args.details).filter(|values| !values.is_empty()),
            interest_description: args.interest_description,
            dietary_preferences: args.diet,
            mobility_level: args.mobility,
            accommodation_type: args.accommodation,
        }
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    init_tracing("voyage_cli");
    let cli = Cli::parse();

    match cli.command {
        Command::Plan(args) => {
            let reply = build_planner()?.plan_detailed(args.into()).await;
            Ok(report(reply))
        }
        Command::Flex {
            description,
            destination,
            dates,
            budget_description,
        } => {
            let reply = build_planner()?
                .plan_flexible(FlexibleRequest {
                    description,
                    destination,
                    dates,
                    budget_description,
                })
                .await;
            Ok(report(reply))
        }
        Command::Prompt(args) => match validate_and_refine(args.into()) {
            Ok(record) => {
                println!("{}", build_prompt(&record));
                Ok(ExitCode::SUCCESS)
            }
            Err(error) => {
                eprintln!("{}", error.clarification());
                Ok(ExitCode::from(2))
            }
        },
        Command::Catalog { main } => {
            if main.is_empty() {
                println!("{}", serde_json::to_string_pretty(catalog())?);
            } else {
                let choices = detailed_interest_choices(&main);
                println!("{}", serde_json::to_string_pretty(&choices)?);
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn build_planner() -> Result<TravelPlanner> {
    let config =
        GenerationConfig::from_env().context("text-generation service is not configured")?;
    TravelPlanner::from_config(config, AppMetrics::shared())
        .context("failed to initialize itinerary planner")
}

fn report(reply: PlanReply) -> ExitCode {
    if reply.is_itinerary() {
        println!("{}", reply.text);
        ExitCode::SUCCESS
    } else {
        eprintln!("{}", reply.text);
        ExitCode::FAILURE
    }
}

fn parse_interest(value: &str) -> Result<InterestCategory, String> {
    InterestCategory::parse(value).ok_or_else(|| {
        format!("unknown interest '{value}' (expected History, Food, Nature, Adventure or Art)")
    })
}

fn parse_diet(value: &str) -> Result<DietaryPreference, String> {
    DietaryPreference::parse(value)
        .ok_or_else(|| unknown_choice(value, &catalog().dietary_preferences))
}

fn parse_mobility(value: &str) -> Result<MobilityLevel, String> {
    MobilityLevel::parse(value).ok_or_else(|| unknown_choice(value, &catalog().mobility_levels))
}

fn parse_accommodation(value: &str) -> Result<AccommodationType, String> {
    AccommodationType::parse(value)
        .ok_or_else(|| unknown_choice(value, &catalog().accommodation_types))
}

fn unknown_choice<T: std::fmt::Display>(value: &str, choices: &[T]) -> String {
    let choices = choices
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ");
    format!("unknown value '{value}' (expected one of: {choices})")
}
