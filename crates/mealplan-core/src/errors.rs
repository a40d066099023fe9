/// Caller errors raised while assembling a request. These fail fast and are
/// never forwarded to the generator.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RequestError {
    /// Budget text was not a finite, non-negative number.
    #[error("invalid budget {value:?}: {reason}")]
    Budget { value: String, reason: &'static str },
    /// Meals-per-day outside the supported set.
    #[error("unsupported meals per day: {0} (expected 1, 2 or 3)")]
    MealsPerDay(u8),
    /// Diet type outside the supported set.
    #[error("unsupported diet type: {0:?} (expected veg or non-veg)")]
    DietType(String),
    /// Goal outside the supported set.
    #[error("unsupported goal: {0:?} (expected survival, balanced or energy)")]
    Goal(String),
    /// Available foods were empty after trimming.
    #[error("available foods must not be empty")]
    EmptyFoods,
}

impl RequestError {
    pub(crate) fn budget(value: impl Into<String>, reason: &'static str) -> Self {
        Self::Budget {
            value: value.into(),
            reason,
        }
    }
}

/// The generator response could not be interpreted at all. Distinct from an
/// empty plan: the presentation layer shows "could not parse results".
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MalformedResponse {
    /// Response text was not valid JSON.
    #[error("response is not valid JSON: {0}")]
    InvalidJson(String),
    /// Response parsed but the top-level value was not an object.
    #[error("response is not an object (got {kind})")]
    NotAnObject { kind: &'static str },
}

/// Failure reported by a generator implementation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("generator failed: {message}")]
pub struct GenerateError {
    pub message: String,
}

impl GenerateError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Top-level error for the planning pipeline.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlannerError {
    #[error(transparent)]
    Request(#[from] RequestError),
    #[error(transparent)]
    Generate(#[from] GenerateError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn budget_error_mentions_value_and_reason() {
        let err = RequestError::budget("abc", "not a number");
        let text = err.to_string();
        assert!(text.contains("\"abc\""));
        assert!(text.contains("not a number"));
    }

    #[test]
    fn planner_error_is_transparent_over_sources() {
        let err: PlannerError = GenerateError::new("timed out").into();
        assert_eq!(err.to_string(), "generator failed: timed out");
        let err: PlannerError = RequestError::MealsPerDay(5).into();
        assert!(err.to_string().contains("meals per day: 5"));
    }
}
