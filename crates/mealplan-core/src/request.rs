//! Request assembly: turns form state into the payload handed to the generator.
//!
//! `build_request` is the only entry point the form needs. Empty foods mean the
//! form is simply not ready ([`Submission::NotSubmittable`]); anything else
//! that is wrong is a caller error and fails fast with [`RequestError`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::RequestError;
use crate::form::FormState;

/// Supported number of meals per day. Serialized as the bare integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum MealsPerDay {
    One,
    #[default]
    Two,
    Three,
}

impl MealsPerDay {
    pub const ALL: [MealsPerDay; 3] = [MealsPerDay::One, MealsPerDay::Two, MealsPerDay::Three];

    pub const fn count(self) -> u8 {
        match self {
            MealsPerDay::One => 1,
            MealsPerDay::Two => 2,
            MealsPerDay::Three => 3,
        }
    }
}

impl TryFrom<u8> for MealsPerDay {
    type Error = RequestError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(MealsPerDay::One),
            2 => Ok(MealsPerDay::Two),
            3 => Ok(MealsPerDay::Three),
            other => Err(RequestError::MealsPerDay(other)),
        }
    }
}

impl From<MealsPerDay> for u8 {
    fn from(value: MealsPerDay) -> Self {
        value.count()
    }
}

impl fmt::Display for MealsPerDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.count())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DietType {
    #[default]
    Veg,
    NonVeg,
}

impl DietType {
    pub const ALL: [DietType; 2] = [DietType::Veg, DietType::NonVeg];

    /// Wire value (`veg`, `non-veg`).
    pub const fn as_str(self) -> &'static str {
        match self {
            DietType::Veg => "veg",
            DietType::NonVeg => "non-veg",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            DietType::Veg => "Vegetarian",
            DietType::NonVeg => "Non-vegetarian",
        }
    }
}

impl FromStr for DietType {
    type Err = RequestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DietType::ALL
            .into_iter()
            .find(|d| d.as_str() == s)
            .ok_or_else(|| RequestError::DietType(s.to_string()))
    }
}

impl fmt::Display for DietType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Goal {
    Survival,
    #[default]
    Balanced,
    Energy,
}

impl Goal {
    pub const ALL: [Goal; 3] = [Goal::Survival, Goal::Balanced, Goal::Energy];

    pub const fn as_str(self) -> &'static str {
        match self {
            Goal::Survival => "survival",
            Goal::Balanced => "balanced",
            Goal::Energy => "energy",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Goal::Survival => "Survival",
            Goal::Balanced => "Balanced",
            Goal::Energy => "Energy",
        }
    }
}

impl FromStr for Goal {
    type Err = RequestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Goal::ALL
            .into_iter()
            .find(|g| g.as_str() == s)
            .ok_or_else(|| RequestError::Goal(s.to_string()))
    }
}

impl fmt::Display for Goal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payload sent to the generator. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MealPlanRequest {
    available_foods: String,
    budget: f64,
    meals_per_day: MealsPerDay,
    diet_type: DietType,
    goal: Goal,
}

impl MealPlanRequest {
    /// Builds a request directly, re-checking the invariants the form enforces.
    pub fn new(
        available_foods: impl AsRef<str>,
        budget: f64,
        meals_per_day: MealsPerDay,
        diet_type: DietType,
        goal: Goal,
    ) -> Result<Self, RequestError> {
        let available_foods = available_foods.as_ref().trim();
        if available_foods.is_empty() {
            return Err(RequestError::EmptyFoods);
        }
        let budget = check_budget(budget, || budget.to_string())?;
        Ok(Self {
            available_foods: available_foods.to_string(),
            budget,
            meals_per_day,
            diet_type,
            goal,
        })
    }

    pub fn available_foods(&self) -> &str {
        &self.available_foods
    }

    pub fn budget(&self) -> f64 {
        self.budget
    }

    pub fn meals_per_day(&self) -> MealsPerDay {
        self.meals_per_day
    }

    pub fn diet_type(&self) -> DietType {
        self.diet_type
    }

    pub fn goal(&self) -> Goal {
        self.goal
    }
}

/// Outcome of [`build_request`] for well-formed input.
#[derive(Debug, Clone, PartialEq)]
pub enum Submission {
    Ready(MealPlanRequest),
    /// Foods were empty after trimming; nothing is sent.
    NotSubmittable,
}

impl Submission {
    pub fn is_ready(&self) -> bool {
        matches!(self, Submission::Ready(_))
    }
}

/// Builds the generator payload from form state.
///
/// Submittability depends only on the trimmed foods text. Once the form is
/// submittable, the budget text is re-validated: empty means 0, otherwise it
/// must parse as a finite, non-negative number.
pub fn build_request(form: &FormState) -> Result<Submission, RequestError> {
    let foods = form.available_foods().trim();
    if foods.is_empty() {
        debug!(
            event = "request.not_submittable",
            domain = "request",
            reason = "empty_foods"
        );
        return Ok(Submission::NotSubmittable);
    }

    let budget = parse_budget(form.budget())?;
    let request = MealPlanRequest {
        available_foods: foods.to_string(),
        budget,
        meals_per_day: form.meals_per_day(),
        diet_type: form.diet_type(),
        goal: form.goal(),
    };
    debug!(
        event = "request.built",
        domain = "request",
        foods_len = request.available_foods.len() as u64,
        budget = request.budget,
        meals_per_day = request.meals_per_day.count(),
        diet_type = request.diet_type.as_str(),
        goal = request.goal.as_str()
    );
    Ok(Submission::Ready(request))
}

/// Parses budget text the way the form does: blank is 0.
pub fn parse_budget(raw: &str) -> Result<f64, RequestError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(0.0);
    }
    let value: f64 = trimmed
        .parse()
        .map_err(|_| RequestError::budget(raw, "not a number"))?;
    check_budget(value, || raw.to_string())
}

fn check_budget(value: f64, raw: impl FnOnce() -> String) -> Result<f64, RequestError> {
    if !value.is_finite() {
        return Err(RequestError::budget(raw(), "not a finite number"));
    }
    if value < 0.0 {
        return Err(RequestError::budget(raw(), "must not be negative"));
    }
    // Normalize -0.0 so the payload never carries a negative sign.
    Ok(value.abs())
}
