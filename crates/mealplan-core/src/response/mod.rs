//! Response normalization: raw generator output in, [`MealPlanView`] out.

mod normalize;
mod view;

pub use normalize::{classify_meal, normalize, normalize_text, order_key};
pub use view::{
    MealEntry, MealKind, MealPlanView, MealSlot, NutritionAnalysis, ProteinQuality,
    StructuredMeal, Substitution,
};

use crate::errors::MalformedResponse;

/// What the results area should show for one completed response.
#[derive(Debug, Clone, PartialEq)]
pub enum ResultsState {
    Plan(MealPlanView),
    /// The generator returned an object with no meals; nothing is rendered.
    Empty,
    /// The response could not be interpreted; one explicit message is rendered.
    Malformed(MalformedResponse),
}

impl ResultsState {
    pub fn from_value(raw: &serde_json::Value) -> Self {
        Self::from_result(normalize(raw))
    }

    pub fn from_text(text: &str) -> Self {
        Self::from_result(normalize_text(text))
    }

    fn from_result(result: Result<MealPlanView, MalformedResponse>) -> Self {
        match result {
            Ok(view) if view.is_empty() => ResultsState::Empty,
            Ok(view) => ResultsState::Plan(view),
            Err(err) => ResultsState::Malformed(err),
        }
    }

    pub fn view(&self) -> Option<&MealPlanView> {
        match self {
            ResultsState::Plan(view) => Some(view),
            ResultsState::Empty | ResultsState::Malformed(_) => None,
        }
    }
}
