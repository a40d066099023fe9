//! Pipeline from form state to a renderable result.
//! The generator itself (network call, credentials, prompt) lives outside this crate;
//! pass one in: `MealPlanner::new(Arc::new(your_generator))`.

use std::sync::Arc;

use tracing::{debug, info};

use crate::errors::{GenerateError, PlannerError};
use crate::form::FormState;
use crate::request::{MealPlanRequest, Submission, build_request};
use crate::response::ResultsState;

/// Upstream generator abstraction. Returns the raw, untrusted response object.
pub trait MealPlanGenerator: Send + Sync {
    fn generate(&self, request: &MealPlanRequest) -> Result<serde_json::Value, GenerateError>;
}

#[derive(Debug, Clone, PartialEq)]
pub enum PlanOutcome {
    /// Foods were empty; the generator was not called.
    NotSubmitted,
    Results(ResultsState),
}

pub struct MealPlanner {
    generator: Arc<dyn MealPlanGenerator>,
}

impl MealPlanner {
    pub fn new(generator: Arc<dyn MealPlanGenerator>) -> Self {
        Self { generator }
    }

    pub fn plan(&self, form: &FormState) -> Result<PlanOutcome, PlannerError> {
        let request = match build_request(form)? {
            Submission::Ready(request) => request,
            Submission::NotSubmittable => return Ok(PlanOutcome::NotSubmitted),
        };
        let raw = self.generator.generate(&request).map_err(|err| {
            debug!(
                event = "planner.generate_failed",
                domain = "planner",
                error = %err
            );
            err
        })?;
        let state = ResultsState::from_value(&raw);
        info!(
            event = "planner.completed",
            domain = "planner",
            outcome = match &state {
                ResultsState::Plan(_) => "plan",
                ResultsState::Empty => "empty",
                ResultsState::Malformed(_) => "malformed",
            },
            meals = state.view().map_or(0, |v| v.meals().len()) as u64
        );
        Ok(PlanOutcome::Results(state))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::errors::RequestError;
    use crate::form::FormEvent;
    use crate::request::Goal;
    use serde_json::json;

    struct FakeGenerator {
        calls: AtomicUsize,
        response: Result<serde_json::Value, GenerateError>,
    }

    impl FakeGenerator {
        fn returning(response: Result<serde_json::Value, GenerateError>) -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                response,
            })
        }
    }

    impl MealPlanGenerator for FakeGenerator {
        fn generate(&self, request: &MealPlanRequest) -> Result<serde_json::Value, GenerateError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.response.clone().map(|mut value| {
                if let Some(obj) = value.as_object_mut() {
                    obj.insert("tradeoffs".into(), json!(format!("goal={}", request.goal())));
                }
                value
            })
        }
    }

    fn form(foods: &str, budget: &str) -> FormState {
        FormState::default()
            .apply(FormEvent::FoodsEdited(foods.into()))
            .apply(FormEvent::BudgetEdited(budget.into()))
            .apply(FormEvent::GoalSelected(Goal::Survival))
    }

    #[test]
    fn empty_foods_never_reach_the_generator() {
        let generator = FakeGenerator::returning(Ok(json!({})));
        let planner = MealPlanner::new(generator.clone());
        let outcome = planner.plan(&form("   ", "")).unwrap();
        assert_eq!(outcome, PlanOutcome::NotSubmitted);
        assert_eq!(generator.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn caller_error_fails_before_generation() {
        let generator = FakeGenerator::returning(Ok(json!({})));
        let planner = MealPlanner::new(generator.clone());
        let err = planner.plan(&form("rice", "-5")).unwrap_err();
        assert!(matches!(err, PlannerError::Request(RequestError::Budget { .. })));
        assert_eq!(generator.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn response_is_normalized_into_results() {
        let generator =
            FakeGenerator::returning(Ok(json!({ "meal_plan": { "meal_2": "dal", "meal_1": "rice" } })));
        let planner = MealPlanner::new(generator.clone());
        let outcome = planner.plan(&form("rice, dal", "100")).unwrap();
        let PlanOutcome::Results(ResultsState::Plan(view)) = outcome else {
            panic!("expected a plan");
        };
        assert_eq!(view.meals()[0].label, "meal_1");
        assert_eq!(view.tradeoffs(), Some("goal=survival"));
        assert_eq!(generator.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn malformed_response_is_a_result_not_an_error() {
        let planner = MealPlanner::new(FakeGenerator::returning(Ok(json!("quota exceeded"))));
        let outcome = planner.plan(&form("rice", "")).unwrap();
        assert!(matches!(
            outcome,
            PlanOutcome::Results(ResultsState::Malformed(_))
        ));
    }

    #[test]
    fn generator_failure_propagates() {
        let planner =
            MealPlanner::new(FakeGenerator::returning(Err(GenerateError::new("timeout"))));
        let err = planner.plan(&form("rice", "")).unwrap_err();
        assert_eq!(err, PlannerError::Generate(GenerateError::new("timeout")));
    }
}
