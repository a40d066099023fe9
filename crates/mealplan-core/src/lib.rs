//! Meal-plan request assembly and response normalization.
//!
//! Control flow: [`FormState`] → [`build_request`] → external generator →
//! raw JSON → [`normalize`] → [`MealPlanView`] → presentation.
//!
//! ```
//! use mealplan_core::{ResultsState, MealKind};
//!
//! let raw = serde_json::json!({
//!     "meal_plan": {
//!         "meal_2": "rice and dal",
//!         "meal_1": { "name": "Oats", "ingredients": ["oats", "milk"] }
//!     }
//! });
//! let ResultsState::Plan(view) = ResultsState::from_value(&raw) else {
//!     panic!("expected a plan");
//! };
//! assert_eq!(view.meals()[0].label, "meal_1");
//! assert_eq!(view.meals()[0].entry.kind(), MealKind::Structured);
//! ```

/// Error taxonomy for request assembly, normalization and generation.
pub mod errors;
/// Immutable form state and its event reducer.
pub mod form;
/// Logging bootstrap driven by environment variables.
pub mod observability;
/// Generator seam and the form-to-results pipeline.
pub mod planner;
pub mod request;
pub mod response;

pub use errors::{GenerateError, MalformedResponse, PlannerError, RequestError};
pub use form::{FormEvent, FormField, FormState};
pub use observability::init_observability;
pub use planner::{MealPlanGenerator, MealPlanner, PlanOutcome};
pub use request::{
    DietType, Goal, MealPlanRequest, MealsPerDay, Submission, build_request, parse_budget,
};
pub use response::{
    MealEntry, MealKind, MealPlanView, MealSlot, NutritionAnalysis, ProteinQuality, ResultsState,
    StructuredMeal, Substitution, normalize, normalize_text,
};
