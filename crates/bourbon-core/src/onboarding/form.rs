//! Raw wizard inputs and their completion rules.
//!
//! Numeric fields hold the text the user typed so partial input survives
//! re-rendering; parsing happens only when a step is validated.

use super::Step;
use crate::{ActivityLevel, Bmi, Diet, Gender, Goal, Training, UserData, ValidationError};

/// Accepted body weight, kg.
pub const WEIGHT_RANGE: (u16, u16) = (20, 400);
/// Accepted height, cm.
pub const HEIGHT_RANGE: (u16, u16) = (50, 272);
/// Accepted age, years.
pub const AGE_RANGE: (u16, u16) = (10, 120);
/// Accepted meals per day.
pub const MEALS_RANGE: (u16, u16) = (1, 8);

/// Everything the user has entered so far.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileForm {
    /// Weight text, kg.
    pub weight: String,
    /// Height text, cm.
    pub height: String,
    /// Age text, years.
    pub age: String,
    /// Selected gender.
    pub gender: Option<Gender>,
    /// Selected goal.
    pub goal: Option<Goal>,
    /// Target weight text, kg. Empty means no target.
    pub target_weight: String,
    /// Selected training.
    pub training: Option<Training>,
    /// Selected activity level.
    pub activity_level: Option<ActivityLevel>,
    /// Selected diet.
    pub diet: Option<Diet>,
    /// Meals per day.
    pub meals_per_day: Option<u8>,
}

impl ProfileForm {
    /// Check the completion rule of a single step.
    pub fn validate(&self, step: Step) -> Result<(), ValidationError> {
        match step {
            Step::Weight => self.weight_kg().map(drop),
            Step::Height => self.height_cm().map(drop),
            Step::GenderAndAge => {
                required(step, "gender", self.gender)?;
                self.age_years().map(drop)
            },
            Step::BmiScale | Step::FetchData => Ok(()),
            Step::GoalAndAim => {
                required(step, "goal", self.goal)?;
                self.target_weight_kg().map(drop)
            },
            Step::Training => required(step, "training", self.training).map(drop),
            Step::ActivityLevel => required(step, "activity level", self.activity_level).map(drop),
            Step::Diet => required(step, "diet", self.diet).map(drop),
            Step::MealFrequency => self.meals().map(drop),
        }
    }

    /// Check every step up to and including `step`.
    pub fn validate_through(&self, step: Step) -> Result<(), ValidationError> {
        Step::ALL.iter().take_while(|s| **s <= step).try_for_each(|s| self.validate(*s))
    }

    /// Parsed weight.
    pub fn weight_kg(&self) -> Result<f32, ValidationError> {
        measure(Step::Weight, "weight", &self.weight, WEIGHT_RANGE)
    }

    /// Parsed height.
    pub fn height_cm(&self) -> Result<f32, ValidationError> {
        measure(Step::Height, "height", &self.height, HEIGHT_RANGE)
    }

    /// Parsed age.
    pub fn age_years(&self) -> Result<u8, ValidationError> {
        let field = "age";
        let raw = self.age.trim();
        if raw.is_empty() {
            return Err(ValidationError::Missing { step: Step::GenderAndAge, field });
        }
        let value: u16 = raw.parse().map_err(|_| ValidationError::NotANumber {
            step: Step::GenderAndAge,
            field,
            value: raw.to_owned(),
        })?;
        in_range(Step::GenderAndAge, field, value, AGE_RANGE)?;
        Ok(value as u8)
    }

    /// Parsed target weight. `None` when left empty.
    pub fn target_weight_kg(&self) -> Result<Option<f32>, ValidationError> {
        if self.target_weight.trim().is_empty() {
            return Ok(None);
        }
        measure(Step::GoalAndAim, "target weight", &self.target_weight, WEIGHT_RANGE).map(Some)
    }

    /// Meals per day.
    pub fn meals(&self) -> Result<u8, ValidationError> {
        let step = Step::MealFrequency;
        let field = "meals per day";
        let value = required(step, field, self.meals_per_day)?;
        in_range(step, field, u16::from(value), MEALS_RANGE)?;
        Ok(value)
    }

    /// BMI from the entered weight and height, once both are valid.
    pub fn bmi(&self) -> Option<Bmi> {
        Bmi::from_metrics(self.weight_kg().ok()?, self.height_cm().ok()?)
    }

    /// Complete profile. Fails with the first invalid step.
    pub fn to_user_data(&self) -> Result<UserData, ValidationError> {
        self.validate_through(Step::FetchData)?;
        Ok(UserData {
            weight_kg: self.weight_kg()?,
            height_cm: self.height_cm()?,
            gender: required(Step::GenderAndAge, "gender", self.gender)?,
            age: self.age_years()?,
            goal: required(Step::GoalAndAim, "goal", self.goal)?,
            target_weight_kg: self.target_weight_kg()?,
            training: required(Step::Training, "training", self.training)?,
            activity_level: required(Step::ActivityLevel, "activity level", self.activity_level)?,
            diet: required(Step::Diet, "diet", self.diet)?,
            meals_per_day: self.meals()?,
        })
    }
}

fn required<T>(step: Step, field: &'static str, value: Option<T>) -> Result<T, ValidationError> {
    value.ok_or(ValidationError::Missing { step, field })
}

fn in_range(step: Step, field: &'static str, value: u16, (min, max): (u16, u16)) -> Result<(), ValidationError> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(ValidationError::OutOfRange { step, field, min, max })
    }
}

fn measure(step: Step, field: &'static str, raw: &str, (min, max): (u16, u16)) -> Result<f32, ValidationError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ValidationError::Missing { step, field });
    }
    let value: f32 = raw
        .parse()
        .map_err(|_| ValidationError::NotANumber { step, field, value: raw.to_owned() })?;
    // NaN fails the range check.
    if (f32::from(min)..=f32::from(max)).contains(&value) {
        Ok(value)
    } else {
        Err(ValidationError::OutOfRange { step, field, min, max })
    }
}
