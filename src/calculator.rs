use crate::errors::ValidationError;
use crate::records::round_half_up;
use serde::{Deserialize, Serialize};

const BULKING_SURPLUS: f64 = 300.0;
const CUTTING_DEFICIT: f64 = 500.0;

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    #[default]
    Male,
    Female,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    /// Desk job, no exercise.
    Sedentary,
    /// Light exercise 1-3 days a week.
    Light,
    /// Moderate exercise 3-5 days a week.
    Moderate,
    /// Hard exercise 6-7 days a week.
    Active,
    /// Daily hard exercise plus physical work.
    VeryActive,
}

impl ActivityLevel {
    pub const ALL: [ActivityLevel; 5] = [
        Self::Sedentary,
        Self::Light,
        Self::Moderate,
        Self::Active,
        Self::VeryActive,
    ];

    pub fn multiplier(self) -> f64 {
        match self {
            Self::Sedentary => 1.2,
            Self::Light => 1.375,
            Self::Moderate => 1.55,
            Self::Active => 1.725,
            Self::VeryActive => 1.9,
        }
    }
}

/// Body measurements; zero means "not entered".
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Profile {
    /// Kilograms.
    pub weight: f64,
    /// Centimetres.
    pub height: f64,
    pub age: u32,
    pub gender: Gender,
    pub activity_level: Option<ActivityLevel>,
}

impl Profile {
    pub fn validate(&self) -> Result<(), ValidationError> {
        for (field, value) in [("weight", self.weight), ("height", self.height)] {
            if !value.is_finite() || value < 0.0 {
                return Err(ValidationError::InvalidValue {
                    field,
                    rule: "zero or more",
                });
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct CalorieResults {
    pub bmr: i64,
    pub tdee: i64,
    pub bulking: i64,
    pub cutting: i64,
}

/// Mifflin-St Jeor basal metabolic rate, zero when a measurement is missing.
pub fn bmr(profile: &Profile) -> f64 {
    if profile.weight == 0.0 || profile.height == 0.0 || profile.age == 0 {
        return 0.0;
    }
    let base = 10.0 * profile.weight + 6.25 * profile.height - 5.0 * f64::from(profile.age);
    match profile.gender {
        Gender::Male => base + 5.0,
        Gender::Female => base - 161.0,
    }
}

pub fn tdee(profile: &Profile, bmr: f64) -> f64 {
    profile
        .activity_level
        .map_or(0.0, |level| bmr * level.multiplier())
}

pub fn calculate(profile: &Profile) -> CalorieResults {
    let bmr = bmr(profile);
    let tdee = tdee(profile, bmr);
    CalorieResults {
        bmr: round_half_up(bmr),
        tdee: round_half_up(tdee),
        bulking: round_half_up(tdee + BULKING_SURPLUS),
        cutting: round_half_up(tdee - CUTTING_DEFICIT),
    }
}

#[derive(Debug, Serialize)]
pub struct CalculatorResponse {
    pub profile: Profile,
    pub results: CalorieResults,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(gender: Gender, activity_level: Option<ActivityLevel>) -> Profile {
        Profile {
            weight: 80.0,
            height: 180.0,
            age: 30,
            gender,
            activity_level,
        }
    }

    #[test]
    fn male_moderate() {
        let results = calculate(&profile(Gender::Male, Some(ActivityLevel::Moderate)));
        // 800 + 1125 - 150 + 5
        assert_eq!(results.bmr, 1780);
        assert_eq!(results.tdee, 2759);
        assert_eq!(results.bulking, 3059);
        assert_eq!(results.cutting, 2259);
    }

    #[test]
    fn female_offset() {
        let results = calculate(&profile(Gender::Female, Some(ActivityLevel::Sedentary)));
        assert_eq!(results.bmr, 1614);
        assert_eq!(results.tdee, round_half_up(1614.0 * 1.2));
    }

    #[test]
    fn missing_measurements_give_zero() {
        let mut incomplete = profile(Gender::Male, Some(ActivityLevel::Active));
        incomplete.age = 0;
        let results = calculate(&incomplete);
        assert_eq!(results.bmr, 0);
        assert_eq!(results.tdee, 0);
        assert_eq!(results.bulking, 300);
        assert_eq!(results.cutting, -500);
    }

    #[test]
    fn missing_activity_gives_zero_tdee() {
        let results = calculate(&profile(Gender::Male, None));
        assert_eq!(results.bmr, 1780);
        assert_eq!(results.tdee, 0);
    }

    #[test]
    fn activity_multipliers_ascend() {
        let multipliers: Vec<f64> = ActivityLevel::ALL.iter().map(|l| l.multiplier()).collect();
        assert!(multipliers.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(multipliers[4], 1.9);
    }
}
