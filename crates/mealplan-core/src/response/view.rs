//! Normalized view model handed to the presentation layer.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

/// Representation tag for a meal entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MealKind {
    Plain,
    Structured,
    Unrenderable,
}

/// Meal detail given as an object with at least a `name` key.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct StructuredMeal {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ingredients: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protein_estimate: Option<String>,
}

/// One meal slot's content, classified once at the normalization boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum MealEntry {
    Plain(String),
    Structured(StructuredMeal),
    /// Shape not recognized; presentation shows a placeholder for it.
    Unrenderable,
}

impl MealEntry {
    pub fn kind(&self) -> MealKind {
        match self {
            MealEntry::Plain(_) => MealKind::Plain,
            MealEntry::Structured(_) => MealKind::Structured,
            MealEntry::Unrenderable => MealKind::Unrenderable,
        }
    }

    fn to_value(&self) -> Value {
        match self {
            MealEntry::Plain(text) => Value::String(text.clone()),
            MealEntry::Structured(meal) => {
                let mut obj = Map::new();
                // `name` is always emitted: its presence is what marks the entry as structured.
                obj.insert("name".into(), json!(meal.name));
                if let Some(ingredients) = &meal.ingredients {
                    obj.insert("ingredients".into(), json!(ingredients));
                }
                if let Some(protein) = &meal.protein_estimate {
                    obj.insert("protein_estimate".into(), json!(protein));
                }
                Value::Object(obj)
            }
            MealEntry::Unrenderable => Value::Null,
        }
    }
}

/// A labelled meal in display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MealSlot {
    /// Original key from the generator's `meal_plan` mapping.
    pub label: String,
    /// Number extracted from the label; 0 when it has none.
    pub order_key: u64,
    pub entry: MealEntry,
}

impl MealSlot {
    /// Label as shown on a meal card (`meal_1` -> `meal 1`).
    pub fn display_label(&self) -> String {
        self.label.replace('_', " ")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProteinQuality {
    Low,
    Medium,
    High,
}

impl ProteinQuality {
    pub const fn as_str(self) -> &'static str {
        match self {
            ProteinQuality::Low => "Low",
            ProteinQuality::Medium => "Medium",
            ProteinQuality::High => "High",
        }
    }

    /// Case-insensitive match against the three known grades.
    pub fn parse_loose(text: &str) -> Option<Self> {
        match text.trim().to_ascii_lowercase().as_str() {
            "low" => Some(ProteinQuality::Low),
            "medium" => Some(ProteinQuality::Medium),
            "high" => Some(ProteinQuality::High),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct NutritionAnalysis {
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    /// Raw estimate as given; capping is left to presentation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_calories_approx: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protein_quality: Option<ProteinQuality>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub missing_nutrients: Option<Vec<String>>,
}

impl NutritionAnalysis {
    /// Whether the strengths/weaknesses block has anything to show.
    pub fn has_findings(&self) -> bool {
        !self.strengths.is_empty() || !self.weaknesses.is_empty()
    }

    fn to_value(&self) -> Value {
        let mut obj = Map::new();
        obj.insert("strengths".into(), json!(self.strengths));
        obj.insert("weaknesses".into(), json!(self.weaknesses));
        if let Some(calories) = self.total_calories_approx {
            obj.insert("total_calories_approx".into(), json!(calories));
        }
        if let Some(quality) = self.protein_quality {
            obj.insert("protein_quality".into(), json!(quality.as_str()));
        }
        if let Some(missing) = &self.missing_nutrients {
            obj.insert("missing_nutrients".into(), json!(missing));
        }
        Value::Object(obj)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Substitution {
    pub item: String,
    pub reason: String,
    /// Not displayed at all when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_cost: Option<String>,
}

impl Substitution {
    fn to_value(&self) -> Value {
        let mut obj = Map::new();
        obj.insert("item".into(), json!(self.item));
        obj.insert("reason".into(), json!(self.reason));
        if let Some(cost) = &self.estimated_cost {
            obj.insert("estimated_cost".into(), json!(cost));
        }
        Value::Object(obj)
    }
}

/// Normalized meal plan. Meals are sorted by `order_key`, ties in source order.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct MealPlanView {
    pub(crate) thinking: Option<String>,
    pub(crate) meals: Vec<MealSlot>,
    pub(crate) nutrition: NutritionAnalysis,
    pub(crate) tradeoffs: Option<String>,
    pub(crate) substitutions: Vec<Substitution>,
    pub(crate) practical_tips: Option<String>,
}

impl MealPlanView {
    pub fn thinking(&self) -> Option<&str> {
        self.thinking.as_deref()
    }

    pub fn meals(&self) -> &[MealSlot] {
        &self.meals
    }

    pub fn nutrition(&self) -> &NutritionAnalysis {
        &self.nutrition
    }

    pub fn tradeoffs(&self) -> Option<&str> {
        self.tradeoffs.as_deref()
    }

    pub fn substitutions(&self) -> &[Substitution] {
        &self.substitutions
    }

    pub fn practical_tips(&self) -> Option<&str> {
        self.practical_tips.as_deref()
    }

    /// No meals: the whole results section is suppressed.
    pub fn is_empty(&self) -> bool {
        self.meals.is_empty()
    }

    /// Canonical upstream shape of this view. Normalizing it yields an equal view.
    pub fn to_value(&self) -> Value {
        let mut obj = Map::new();
        if let Some(thinking) = &self.thinking {
            obj.insert("_thinking".into(), json!(thinking));
        }
        let meal_plan: Map<String, Value> = self
            .meals
            .iter()
            .map(|slot| (slot.label.clone(), slot.entry.to_value()))
            .collect();
        obj.insert("meal_plan".into(), Value::Object(meal_plan));
        obj.insert("nutrition_analysis".into(), self.nutrition.to_value());
        if let Some(tradeoffs) = &self.tradeoffs {
            obj.insert("tradeoffs".into(), json!(tradeoffs));
        }
        obj.insert(
            "cheap_substitutions".into(),
            Value::Array(self.substitutions.iter().map(Substitution::to_value).collect()),
        );
        if let Some(tips) = &self.practical_tips {
            obj.insert("practical_tips".into(), json!(tips));
        }
        Value::Object(obj)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_label_replaces_underscores() {
        let slot = MealSlot {
            label: "meal_2_dinner".into(),
            order_key: 2,
            entry: MealEntry::Unrenderable,
        };
        assert_eq!(slot.display_label(), "meal 2 dinner");
    }

    #[test]
    fn protein_quality_parses_case_insensitively() {
        assert_eq!(ProteinQuality::parse_loose(" high "), Some(ProteinQuality::High));
        assert_eq!(ProteinQuality::parse_loose("MEDIUM"), Some(ProteinQuality::Medium));
        assert_eq!(ProteinQuality::parse_loose("excellent"), None);
    }

    #[test]
    fn structured_entry_keeps_name_key_even_when_unnamed() {
        let entry = MealEntry::Structured(StructuredMeal::default());
        assert_eq!(entry.to_value(), json!({ "name": null }));
        assert_eq!(entry.kind(), MealKind::Structured);
    }

    #[test]
    fn entry_serializes_with_kind_tag() {
        let entry = MealEntry::Plain("rice and dal".into());
        assert_eq!(
            serde_json::to_value(&entry).unwrap(),
            json!({ "kind": "plain", "value": "rice and dal" })
        );
        assert_eq!(
            serde_json::to_value(MealEntry::Unrenderable).unwrap(),
            json!({ "kind": "unrenderable" })
        );
    }
}
