use crate::date::parse_clock;
use crate::errors::ValidationError;
use crate::records::{require, Form, Record};
use serde::{Deserialize, Serialize};

pub const MEAL_TYPES: [&str; 5] = ["Breakfast", "Lunch", "Dinner", "Snack", "Drink"];

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Meal {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub time: String,
    #[serde(default)]
    pub quantity: String,
    #[serde(default)]
    pub calories: f64,
    #[serde(default)]
    pub carbs: f64,
    #[serde(default)]
    pub protein: f64,
    #[serde(default)]
    pub fats: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Record for Meal {
    const KIND: &'static str = "meal";

    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MealForm {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub time: String,
    pub quantity: String,
    pub calories: f64,
    pub carbs: f64,
    pub protein: f64,
    pub fats: f64,
    pub notes: String,
}

impl Form for MealForm {
    type Output = Meal;

    fn validate(&self) -> Result<(), ValidationError> {
        require("name", &self.name)?;
        require("type", &self.kind)?;
        require("time", &self.time)?;
        if !MEAL_TYPES.contains(&self.kind.trim()) {
            return Err(ValidationError::UnknownOption {
                field: "type",
                value: self.kind.clone(),
            });
        }
        parse_clock(&self.time)?;
        for (field, value) in [
            ("calories", self.calories),
            ("carbs", self.carbs),
            ("protein", self.protein),
            ("fats", self.fats),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ValidationError::InvalidValue {
                    field,
                    rule: "zero or more",
                });
            }
        }
        Ok(())
    }

    fn build(self, id: String) -> Meal {
        let notes = self.notes.trim();
        Meal {
            id,
            name: self.name.trim().to_string(),
            kind: self.kind.trim().to_string(),
            time: self.time.trim().to_string(),
            quantity: self.quantity.trim().to_string(),
            calories: self.calories,
            carbs: self.carbs,
            protein: self.protein,
            fats: self.fats,
            notes: (!notes.is_empty()).then(|| notes.to_string()),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq)]
pub struct NutritionTotals {
    pub calories: f64,
    pub carbs: f64,
    pub protein: f64,
    pub fats: f64,
}

#[derive(Debug, Serialize)]
pub struct NutritionSummary {
    pub date: String,
    pub meals: Vec<Meal>,
    pub totals: NutritionTotals,
}

pub fn totals(meals: &[Meal]) -> NutritionTotals {
    meals.iter().fold(NutritionTotals::default(), |acc, meal| NutritionTotals {
        calories: acc.calories + meal.calories,
        carbs: acc.carbs + meal.carbs,
        protein: acc.protein + meal.protein,
        fats: acc.fats + meal.fats,
    })
}

pub fn summarize(date: String, meals: &[Meal]) -> NutritionSummary {
    NutritionSummary {
        date,
        totals: totals(meals),
        meals: meals.to_vec(),
    }
}
