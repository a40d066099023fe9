//! `mealplan`: assemble generator requests and inspect normalized responses.

mod config;
mod input;
mod render;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use mealplan_core::{
    FormEvent, FormState, Goal, MealsPerDay, ResultsState, Submission, build_request,
    observability::init_observability_with_default,
};

#[derive(Parser)]
#[command(name = "mealplan")]
#[command(about = "Assemble meal-plan requests and normalize generated plans")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the request payload from form values and print it as JSON
    Request {
        /// Foods on hand (free text, e.g. "rice, eggs, onions")
        #[arg(long)]
        foods: String,
        /// Budget; empty means 0
        #[arg(long, default_value = "")]
        budget: String,
        /// Meals per day (1, 2 or 3)
        #[arg(long, default_value_t = 2)]
        meals_per_day: u8,
        /// Diet type (veg or non-veg)
        #[arg(long, default_value = "veg")]
        diet: String,
        /// Goal (survival, balanced or energy)
        #[arg(long, default_value = "balanced")]
        goal: String,
    },
    /// Normalize a raw generator response and print the view as JSON
    Normalize {
        /// Response file; stdin when omitted or `-`
        path: Option<PathBuf>,
    },
    /// Normalize a raw generator response and print it as text
    Render {
        /// Response file; stdin when omitted or `-`
        path: Option<PathBuf>,
        /// Reference daily calories for the progress bar
        #[arg(long, value_parser = config::parse_reference)]
        calorie_reference: Option<f64>,
    },
}

fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    config::init();
    init_observability_with_default("warn");
    let cli = Cli::parse();

    match cli.command {
        Commands::Request {
            foods,
            budget,
            meals_per_day,
            diet,
            goal,
        } => {
            let form = FormState::default()
                .apply(FormEvent::FoodsEdited(foods))
                .apply(FormEvent::BudgetEdited(budget))
                .apply(FormEvent::MealsPerDaySelected(MealsPerDay::try_from(
                    meals_per_day,
                )?))
                .apply(FormEvent::DietTypeSelected(diet.parse()?))
                .apply(FormEvent::GoalSelected(goal.parse::<Goal>()?));
            match build_request(&form)? {
                Submission::Ready(request) => {
                    println!("{}", serde_json::to_string_pretty(&request)?);
                    Ok(ExitCode::SUCCESS)
                }
                Submission::NotSubmittable => {
                    eprintln!("nothing to submit: available foods are empty");
                    Ok(ExitCode::from(2))
                }
            }
        }
        Commands::Normalize { path } => {
            let text = input::read_response(path.as_deref())?;
            let state = ResultsState::from_text(&text);
            let envelope = match &state {
                ResultsState::Plan(view) => serde_json::json!({ "status": "plan", "view": view }),
                ResultsState::Empty => serde_json::json!({ "status": "empty" }),
                ResultsState::Malformed(err) => {
                    serde_json::json!({ "status": "malformed", "error": err.to_string() })
                }
            };
            println!("{}", serde_json::to_string_pretty(&envelope)?);
            Ok(exit_code(&state))
        }
        Commands::Render {
            path,
            calorie_reference,
        } => {
            let text = input::read_response(path.as_deref())?;
            let state = ResultsState::from_text(&text);
            let reference = calorie_reference.unwrap_or_else(config::calorie_reference);
            print!("{}", render::render_state(&state, reference));
            Ok(exit_code(&state))
        }
    }
}

fn exit_code(state: &ResultsState) -> ExitCode {
    match state {
        ResultsState::Malformed(_) => ExitCode::FAILURE,
        ResultsState::Plan(_) | ResultsState::Empty => ExitCode::SUCCESS,
    }
}
