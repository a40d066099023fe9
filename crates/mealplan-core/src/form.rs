//! Form state as an immutable value updated by discrete events.

use serde::{Deserialize, Serialize};

use crate::request::{DietType, Goal, MealsPerDay};

/// Text fields that can hold focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormField {
    AvailableFoods,
    Budget,
}

/// Named transitions applied by [`FormState::apply`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormEvent {
    FoodsEdited(String),
    BudgetEdited(String),
    MealsPerDaySelected(MealsPerDay),
    DietTypeSelected(DietType),
    GoalSelected(Goal),
    Focused(FormField),
    Blurred,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FormState {
    available_foods: String,
    budget: String,
    meals_per_day: MealsPerDay,
    diet_type: DietType,
    goal: Goal,
    focused_field: Option<FormField>,
}

impl FormState {
    /// Returns the state after `event`. The previous state is consumed.
    #[must_use]
    pub fn apply(self, event: FormEvent) -> Self {
        match event {
            FormEvent::FoodsEdited(text) => Self {
                available_foods: text,
                ..self
            },
            FormEvent::BudgetEdited(text) => Self {
                budget: text,
                ..self
            },
            FormEvent::MealsPerDaySelected(meals_per_day) => Self {
                meals_per_day,
                ..self
            },
            FormEvent::DietTypeSelected(diet_type) => Self { diet_type, ..self },
            FormEvent::GoalSelected(goal) => Self { goal, ..self },
            FormEvent::Focused(field) => Self {
                focused_field: Some(field),
                ..self
            },
            FormEvent::Blurred => Self {
                focused_field: None,
                ..self
            },
        }
    }

    pub fn available_foods(&self) -> &str {
        &self.available_foods
    }

    pub fn budget(&self) -> &str {
        &self.budget
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

    pub fn focused_field(&self) -> Option<FormField> {
        self.focused_field
    }

    /// True when the submit control should be enabled.
    pub fn can_submit(&self) -> bool {
        !self.available_foods.trim().is_empty()
    }

    /// Floating-label rule: a label floats while its field is focused or non-empty.
    pub fn label_floats(&self, field: FormField) -> bool {
        let text = match field {
            FormField::AvailableFoods => &self.available_foods,
            FormField::Budget => &self.budget,
        };
        self.focused_field == Some(field) || !text.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_initial_form() {
        let state = FormState::default();
        assert_eq!(state.available_foods(), "");
        assert_eq!(state.budget(), "");
        assert_eq!(state.meals_per_day(), MealsPerDay::Two);
        assert_eq!(state.diet_type(), DietType::Veg);
        assert_eq!(state.goal(), Goal::Balanced);
        assert_eq!(state.focused_field(), None);
        assert!(!state.can_submit());
    }

    #[test]
    fn events_update_only_their_field() {
        let state = FormState::default()
            .apply(FormEvent::FoodsEdited("rice".into()))
            .apply(FormEvent::GoalSelected(Goal::Energy));
        assert_eq!(state.available_foods(), "rice");
        assert_eq!(state.goal(), Goal::Energy);
        assert_eq!(state.diet_type(), DietType::Veg);
        assert!(state.can_submit());

        let state = state.apply(FormEvent::DietTypeSelected(DietType::NonVeg));
        assert_eq!(state.available_foods(), "rice");
        assert_eq!(state.diet_type(), DietType::NonVeg);
    }

    #[test]
    fn whitespace_only_foods_cannot_submit() {
        let state = FormState::default().apply(FormEvent::FoodsEdited(" \n ".into()));
        assert!(!state.can_submit());
    }

    #[test]
    fn label_floats_when_focused_or_filled() {
        let state = FormState::default();
        assert!(!state.label_floats(FormField::Budget));

        let state = state.apply(FormEvent::Focused(FormField::Budget));
        assert!(state.label_floats(FormField::Budget));
        assert!(!state.label_floats(FormField::AvailableFoods));

        let state = state
            .apply(FormEvent::BudgetEdited("50".into()))
            .apply(FormEvent::Blurred);
        assert_eq!(state.focused_field(), None);
        assert!(state.label_floats(FormField::Budget));
    }
}
