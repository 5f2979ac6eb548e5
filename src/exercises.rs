use crate::date::parse_clock;
use crate::errors::ValidationError;
use crate::records::{require, Form, Record};
use serde::{Deserialize, Serialize};

pub const EXERCISE_TYPES: [&str; 8] = [
    "Chest", "Back", "Shoulders", "Arms", "Legs", "Abs", "Cardio", "Other",
];

/// Minutes credited to a session on top of the first-to-last span.
const MINUTES_PER_EXERCISE: u32 = 30;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Exercise {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub sets: u32,
    pub reps: u32,
    /// Kilograms.
    pub weight: f64,
    pub time: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Record for Exercise {
    const KIND: &'static str = "exercise";

    fn id(&self) -> &str {
        &self.id
    }
}

fn one() -> u32 {
    1
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExerciseForm {
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default = "one")]
    pub sets: u32,
    #[serde(default = "one")]
    pub reps: u32,
    #[serde(default)]
    pub weight: f64,
    #[serde(default)]
    pub time: String,
    #[serde(default)]
    pub notes: String,
}

impl Form for ExerciseForm {
    type Output = Exercise;

    fn validate(&self) -> Result<(), ValidationError> {
        require("name", &self.name)?;
        require("type", &self.kind)?;
        require("time", &self.time)?;
        if !EXERCISE_TYPES.contains(&self.kind.trim()) {
            return Err(ValidationError::UnknownOption {
                field: "type",
                value: self.kind.clone(),
            });
        }
        parse_clock(&self.time)?;
        if self.sets == 0 {
            return Err(ValidationError::InvalidValue {
                field: "sets",
                rule: "at least 1",
            });
        }
        if self.reps == 0 {
            return Err(ValidationError::InvalidValue {
                field: "reps",
                rule: "at least 1",
            });
        }
        if !self.weight.is_finite() || self.weight < 0.0 {
            return Err(ValidationError::InvalidValue {
                field: "weight",
                rule: "zero or more",
            });
        }
        Ok(())
    }

    fn build(self, id: String) -> Exercise {
        let notes = self.notes.trim();
        Exercise {
            id,
            name: self.name.trim().to_string(),
            kind: self.kind.trim().to_string(),
            sets: self.sets,
            reps: self.reps,
            weight: self.weight,
            time: self.time.trim().to_string(),
            notes: (!notes.is_empty()).then(|| notes.to_string()),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ExerciseSummary {
    pub date: String,
    pub exercises: Vec<Exercise>,
    pub count: usize,
    pub total_volume: f64,
    pub workout_minutes: u32,
}

pub fn total_volume(exercises: &[Exercise]) -> f64 {
    exercises
        .iter()
        .map(|ex| f64::from(ex.sets) * f64::from(ex.reps) * ex.weight)
        .sum()
}

/// Span from the earliest to the latest exercise, plus one slot.
pub fn workout_minutes(exercises: &[Exercise]) -> u32 {
    let mut times = exercises.iter().filter_map(|ex| parse_clock(&ex.time).ok());
    let Some(first) = times.next() else {
        return 0;
    };
    let (start, end) = times.fold((first, first), |(lo, hi), t| (lo.min(t), hi.max(t)));
    (end - start + MINUTES_PER_EXERCISE).max(MINUTES_PER_EXERCISE)
}

pub fn summarize(date: String, exercises: &[Exercise]) -> ExerciseSummary {
    ExerciseSummary {
        date,
        count: exercises.len(),
        total_volume: total_volume(exercises),
        workout_minutes: workout_minutes(exercises),
        exercises: exercises.to_vec(),
    }
}
