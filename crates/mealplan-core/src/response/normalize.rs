//! Defensive normalization of an untrusted generator response.
//!
//! Only a non-object top-level value is reported as an error. Inside an
//! object every missing, renamed or oddly shaped field resolves to a default,
//! and every meal value is classified into a closed [`MealEntry`] variant.

use serde_json::{Map, Value};
use tracing::debug;

use super::view::{
    MealEntry, MealPlanView, MealSlot, NutritionAnalysis, ProteinQuality, StructuredMeal,
    Substitution,
};
use crate::errors::MalformedResponse;

const THINKING: &[&str] = &["_thinking", "thinking"];
const MEAL_PLAN: &[&str] = &["meal_plan", "mealPlan"];
const NUTRITION_ANALYSIS: &[&str] = &["nutrition_analysis", "nutritionAnalysis"];
const TRADEOFFS: &[&str] = &["tradeoffs", "trade_offs", "tradeOffs"];
const CHEAP_SUBSTITUTIONS: &[&str] = &["cheap_substitutions", "cheapSubstitutions"];
const PRACTICAL_TIPS: &[&str] = &["practical_tips", "practicalTips"];

const STRENGTHS: &[&str] = &["strengths"];
const WEAKNESSES: &[&str] = &["weaknesses"];
const TOTAL_CALORIES: &[&str] = &["total_calories_approx", "totalCaloriesApprox"];
const PROTEIN_QUALITY: &[&str] = &["protein_quality", "proteinQuality"];
const MISSING_NUTRIENTS: &[&str] = &["missing_nutrients", "missingNutrients"];

const NAME: &str = "name";
const INGREDIENTS: &[&str] = &["ingredients"];
const PROTEIN_ESTIMATE: &[&str] = &["protein_estimate", "proteinEstimate"];

const ITEM: &[&str] = &["item"];
const REASON: &[&str] = &["reason"];
const ESTIMATED_COST: &[&str] = &["estimated_cost", "estimatedCost"];

/// Normalizes a parsed generator response.
pub fn normalize(raw: &Value) -> Result<MealPlanView, MalformedResponse> {
    let obj = raw.as_object().ok_or_else(|| {
        let kind = value_kind(raw);
        debug!(event = "normalize.malformed", domain = "normalize", kind = kind);
        MalformedResponse::NotAnObject { kind }
    })?;

    let view = MealPlanView {
        thinking: field(obj, THINKING).and_then(text_of),
        meals: extract_meals(obj),
        nutrition: extract_nutrition(obj),
        tradeoffs: field(obj, TRADEOFFS).and_then(text_of),
        substitutions: extract_substitutions(obj),
        practical_tips: field(obj, PRACTICAL_TIPS).and_then(text_of),
    };
    debug!(
        event = "normalize.completed",
        domain = "normalize",
        meals = view.meals.len() as u64,
        substitutions = view.substitutions.len() as u64,
        has_thinking = view.thinking.is_some(),
        empty = view.is_empty()
    );
    Ok(view)
}

/// Parses response text (optionally wrapped in a Markdown code fence) and normalizes it.
pub fn normalize_text(text: &str) -> Result<MealPlanView, MalformedResponse> {
    let body = strip_code_fence(text);
    let raw: Value = serde_json::from_str(body).map_err(|e| {
        debug!(
            event = "normalize.invalid_json",
            domain = "normalize",
            text_len = text.len() as u64,
            error = %e
        );
        MalformedResponse::InvalidJson(e.to_string())
    })?;
    normalize(&raw)
}

/// Sort key for a meal label: the first run of ASCII digits, or 0.
pub fn order_key(label: &str) -> u64 {
    let Some(start) = label.find(|c: char| c.is_ascii_digit()) else {
        return 0;
    };
    let rest = &label[start..];
    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    // All-digit input only fails to parse on overflow.
    rest[..end].parse().unwrap_or(u64::MAX)
}

/// Classifies one meal value.
pub fn classify_meal(value: &Value) -> MealEntry {
    match value {
        Value::String(text) => MealEntry::Plain(text.clone()),
        Value::Object(obj) if obj.contains_key(NAME) => MealEntry::Structured(StructuredMeal {
            name: obj.get(NAME).and_then(text_of),
            ingredients: field(obj, INGREDIENTS).and_then(text_list),
            protein_estimate: field(obj, PROTEIN_ESTIMATE).and_then(text_of),
        }),
        _ => MealEntry::Unrenderable,
    }
}

fn extract_meals(obj: &Map<String, Value>) -> Vec<MealSlot> {
    let Some(raw) = field(obj, MEAL_PLAN) else {
        return Vec::new();
    };
    let Some(plan) = raw.as_object() else {
        debug!(
            event = "normalize.section_ignored",
            domain = "normalize",
            section = "meal_plan",
            kind = value_kind(raw)
        );
        return Vec::new();
    };

    let mut meals: Vec<MealSlot> = plan
        .iter()
        .map(|(label, value)| {
            let entry = classify_meal(value);
            if entry == MealEntry::Unrenderable {
                debug!(
                    event = "normalize.meal_unrenderable",
                    domain = "normalize",
                    label = label.as_str(),
                    kind = value_kind(value)
                );
            }
            MealSlot {
                label: label.clone(),
                order_key: order_key(label),
                entry,
            }
        })
        .collect();
    // Stable: equal keys keep the generator's order.
    meals.sort_by_key(|slot| slot.order_key);
    meals
}

fn extract_nutrition(obj: &Map<String, Value>) -> NutritionAnalysis {
    let Some(nutrition) = field(obj, NUTRITION_ANALYSIS).and_then(Value::as_object) else {
        return NutritionAnalysis::default();
    };
    NutritionAnalysis {
        strengths: field(nutrition, STRENGTHS)
            .and_then(text_list)
            .unwrap_or_default(),
        weaknesses: field(nutrition, WEAKNESSES)
            .and_then(text_list)
            .unwrap_or_default(),
        total_calories_approx: field(nutrition, TOTAL_CALORIES)
            .and_then(Value::as_f64)
            .filter(|v| v.is_finite()),
        protein_quality: field(nutrition, PROTEIN_QUALITY)
            .and_then(Value::as_str)
            .and_then(ProteinQuality::parse_loose),
        missing_nutrients: field(nutrition, MISSING_NUTRIENTS).and_then(text_list),
    }
}

fn extract_substitutions(obj: &Map<String, Value>) -> Vec<Substitution> {
    let Some(items) = field(obj, CHEAP_SUBSTITUTIONS).and_then(Value::as_array) else {
        return Vec::new();
    };
    items
        .iter()
        .enumerate()
        .filter_map(|(index, raw)| {
            let sub = substitution(raw);
            if sub.is_none() {
                debug!(
                    event = "normalize.substitution_dropped",
                    domain = "normalize",
                    index = index as u64,
                    kind = value_kind(raw)
                );
            }
            sub
        })
        .collect()
}

fn substitution(raw: &Value) -> Option<Substitution> {
    let obj = raw.as_object()?;
    Some(Substitution {
        item: field(obj, ITEM).and_then(text_of)?,
        reason: field(obj, REASON).and_then(text_of)?,
        estimated_cost: field(obj, ESTIMATED_COST).and_then(text_of),
    })
}

/// First non-null value among `aliases`.
fn field<'a>(obj: &'a Map<String, Value>, aliases: &[&str]) -> Option<&'a Value> {
    aliases
        .iter()
        .filter_map(|key| obj.get(*key))
        .find(|v| !v.is_null())
}

/// Non-blank strings are kept as given; numbers use their JSON text.
fn text_of(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// List-shaped values keep their text elements in order.
fn text_list(value: &Value) -> Option<Vec<String>> {
    value
        .as_array()
        .map(|items| items.iter().filter_map(text_of).collect())
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(body) = trimmed
        .strip_prefix("```")
        .and_then(|rest| rest.strip_suffix("```"))
    else {
        return trimmed;
    };
    // Drop the info string (`json`) on the opening line.
    match body.find('\n') {
        Some(idx) => body[idx + 1..].trim(),
        None => body.trim(),
    }
}
