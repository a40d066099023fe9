//! Plain-text presentation of a normalized meal plan.

use std::fmt::Write as _;

use mealplan_core::{MealEntry, MealPlanView, NutritionAnalysis, ResultsState, StructuredMeal};

const BAR_WIDTH: usize = 20;
const UNRENDERABLE_MEAL: &str = "Unable to display meal details.";

/// Share of the reference intake, clamped into `[0, 1]`.
pub fn calorie_progress(total: f64, reference: f64) -> f64 {
    if reference.is_nan() || reference <= 0.0 || !total.is_finite() {
        return 0.0;
    }
    (total / reference).clamp(0.0, 1.0)
}

/// Renders a results state. `Empty` renders nothing at all.
pub fn render_state(state: &ResultsState, calorie_reference: f64) -> String {
    match state {
        ResultsState::Plan(view) => render_view(view, calorie_reference),
        ResultsState::Empty => String::new(),
        ResultsState::Malformed(err) => format!("Could not parse results: {err}\n"),
    }
}

pub fn render_view(view: &MealPlanView, calorie_reference: f64) -> String {
    let mut out = String::new();

    if let Some(thinking) = view.thinking() {
        section(&mut out, "Chef's Insight");
        let _ = writeln!(out, "  {thinking}");
    }

    section(&mut out, "Your Meal Plan");
    for slot in view.meals() {
        let _ = writeln!(out, "  [{}]", slot.display_label());
        match &slot.entry {
            MealEntry::Plain(text) => {
                let _ = writeln!(out, "    {text}");
            }
            MealEntry::Structured(meal) => render_structured(&mut out, meal),
            MealEntry::Unrenderable => {
                let _ = writeln!(out, "    {UNRENDERABLE_MEAL}");
            }
        }
    }

    if view.nutrition().has_findings() {
        render_nutrition(&mut out, view.nutrition(), calorie_reference);
    }

    if let Some(tradeoffs) = view.tradeoffs() {
        section(&mut out, "Reasoning & Trade-offs");
        let _ = writeln!(out, "  {tradeoffs}");
    }

    if let Some(tips) = view.practical_tips() {
        section(&mut out, "Practical Tips");
        let _ = writeln!(out, "  {tips}");
    }

    if !view.substitutions().is_empty() {
        section(&mut out, "Optional Low-Cost Substitutions");
        for sub in view.substitutions() {
            let _ = writeln!(out, "  - {}: {}", sub.item, sub.reason);
            if let Some(cost) = &sub.estimated_cost {
                let _ = writeln!(out, "    Est. {cost}");
            }
        }
    }

    out
}

fn section(out: &mut String, title: &str) {
    if !out.is_empty() {
        out.push('\n');
    }
    let _ = writeln!(out, "{title}");
}

fn render_structured(out: &mut String, meal: &StructuredMeal) {
    if let Some(name) = &meal.name {
        let _ = writeln!(out, "    {name}");
    }
    if let Some(ingredients) = meal.ingredients.as_ref().filter(|i| !i.is_empty()) {
        let _ = writeln!(out, "    Ingredients: {}", ingredients.join(", "));
    }
    if let Some(protein) = &meal.protein_estimate {
        let _ = writeln!(out, "    Protein: {protein}");
    }
}

fn render_nutrition(out: &mut String, nutrition: &NutritionAnalysis, calorie_reference: f64) {
    section(out, "Nutrition Analysis");
    for (title, items) in [
        ("Strengths", &nutrition.strengths),
        ("Weaknesses", &nutrition.weaknesses),
    ] {
        if items.is_empty() {
            continue;
        }
        let _ = writeln!(out, "  {title}");
        for item in items {
            let _ = writeln!(out, "    • {item}");
        }
    }
    // A zero estimate is treated as "not given".
    if let Some(calories) = nutrition.total_calories_approx.filter(|c| *c != 0.0) {
        let ratio = calorie_progress(calories, calorie_reference);
        let filled = (ratio * BAR_WIDTH as f64).round() as usize;
        let _ = writeln!(out, "  Daily Progress");
        let _ = writeln!(
            out,
            "    Calories: {calories} kcal [{}{}] {:.0}%",
            "#".repeat(filled),
            "-".repeat(BAR_WIDTH - filled),
            ratio * 100.0
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn view(raw: serde_json::Value) -> MealPlanView {
        mealplan_core::normalize(&raw).unwrap()
    }

    #[test]
    fn progress_is_capped_at_reference() {
        assert_eq!(calorie_progress(1000.0, 2000.0), 0.5);
        assert_eq!(calorie_progress(3500.0, 2000.0), 1.0);
        assert_eq!(calorie_progress(-20.0, 2000.0), 0.0);
        assert_eq!(calorie_progress(100.0, 0.0), 0.0);
    }

    #[test]
    fn meals_render_by_variant() {
        let text = render_view(
            &view(json!({
                "meal_plan": {
                    "meal_3": 42,
                    "meal_2": "rice and dal",
                    "meal_1": { "name": "Oats", "ingredients": ["oats", "milk"], "protein_estimate": "8g" }
                }
            })),
            2000.0,
        );
        let expected = "\
Your Meal Plan
  [meal 1]
    Oats
    Ingredients: oats, milk
    Protein: 8g
  [meal 2]
    rice and dal
  [meal 3]
    Unable to display meal details.
";
        assert_eq!(text, expected);
    }

    #[test]
    fn nutrition_block_requires_findings() {
        let text = render_view(
            &view(json!({
                "meal_plan": { "meal_1": "dal" },
                "nutrition_analysis": { "total_calories_approx": 1500 }
            })),
            2000.0,
        );
        assert!(!text.contains("Nutrition Analysis"));

        let text = render_view(
            &view(json!({
                "meal_plan": { "meal_1": "dal" },
                "nutrition_analysis": { "strengths": ["fibre"], "total_calories_approx": 4000 }
            })),
            2000.0,
        );
        assert!(text.contains("    • fibre"));
        assert!(text.contains("Calories: 4000 kcal [####################] 100%"));
    }

    #[test]
    fn substitution_cost_only_when_present() {
        let text = render_view(
            &view(json!({
                "meal_plan": { "meal_1": "dal" },
                "cheap_substitutions": [
                    { "item": "Paneer", "reason": "cheaper protein" },
                    { "item": "Soya", "reason": "bulk", "estimated_cost": "₹30" }
                ]
            })),
            2000.0,
        );
        assert!(text.contains("  - Paneer: cheaper protein\n  - Soya: bulk\n    Est. ₹30\n"));
        assert_eq!(text.matches("Est.").count(), 1);
    }

    #[test]
    fn empty_and_malformed_states() {
        assert_eq!(render_state(&ResultsState::from_value(&json!({})), 2000.0), "");
        let text = render_state(&ResultsState::from_value(&json!(null)), 2000.0);
        assert!(text.starts_with("Could not parse results"));
    }
}
