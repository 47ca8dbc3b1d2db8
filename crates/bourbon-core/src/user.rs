//! User profile domain types.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::UnknownChoice;

/// Declares a profile enum with a stable lowercase label per variant,
/// `Display` and case-insensitive `FromStr`.
macro_rules! choice {
    (
        $(#[$meta:meta])*
        $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $label:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $( $(#[$vmeta])* $variant ),+
        }

        impl $name {
            /// Every choice, in display order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// Stable lowercase label.
            pub const fn label(self) -> &'static str {
                match self {
                    $(Self::$variant => $label),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }

        impl FromStr for $name {
            type Err = UnknownChoice;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::ALL
                    .iter()
                    .copied()
                    .find(|choice| choice.label().eq_ignore_ascii_case(s.trim()))
                    .ok_or_else(|| UnknownChoice { kind: stringify!($name), value: s.to_owned() })
            }
        }
    };
}

choice! {
    /// Gender as entered during onboarding.
    Gender {
        /// Male.
        Male => "male",
        /// Female.
        Female => "female",
        /// Other or undisclosed.
        Other => "other",
    }
}

choice! {
    /// Primary fitness goal.
    Goal {
        /// Reduce body weight.
        LoseWeight => "lose",
        /// Keep current weight.
        MaintainWeight => "maintain",
        /// Increase body weight.
        GainWeight => "gain",
        /// Increase muscle mass.
        BuildMuscle => "muscle",
    }
}

choice! {
    /// Preferred kind of training.
    Training {
        /// Endurance work.
        Cardio => "cardio",
        /// Resistance work.
        Strength => "strength",
        /// Mobility and flexibility.
        Yoga => "yoga",
        /// A bit of everything.
        Mixed => "mixed",
    }
}

choice! {
    /// Everyday activity level outside training.
    ActivityLevel {
        /// Mostly sitting.
        Sedentary => "sedentary",
        /// Light activity.
        Light => "light",
        /// Moderate activity.
        Moderate => "moderate",
        /// Active most days.
        Active => "active",
        /// Physically demanding days.
        VeryActive => "very-active",
    }
}

choice! {
    /// Diet style.
    Diet {
        /// No restriction.
        Balanced => "balanced",
        /// No meat.
        Vegetarian => "vegetarian",
        /// No animal products.
        Vegan => "vegan",
        /// Low carbohydrate.
        Keto => "keto",
        /// Protein-focused.
        HighProtein => "high-protein",
    }
}

/// Profile collected by the onboarding wizard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserData {
    /// Body weight in kilograms.
    pub weight_kg: f32,
    /// Height in centimetres.
    pub height_cm: f32,
    /// Gender.
    pub gender: Gender,
    /// Age in years.
    pub age: u8,
    /// Fitness goal.
    pub goal: Goal,
    /// Optional target weight in kilograms.
    pub target_weight_kg: Option<f32>,
    /// Preferred training.
    pub training: Training,
    /// Activity level.
    pub activity_level: ActivityLevel,
    /// Diet style.
    pub diet: Diet,
    /// Meals per day.
    pub meals_per_day: u8,
}

impl UserData {
    /// Body mass index for this profile.
    pub fn bmi(&self) -> Option<Bmi> {
        Bmi::from_metrics(self.weight_kg, self.height_cm)
    }
}

/// Signed-in account, optionally with its profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Stable account identifier.
    pub uid: String,
    /// Display name.
    pub name: String,
    /// Account email.
    pub email: String,
    /// Profile data. `None` until onboarding completes or the profile is
    /// loaded.
    pub data: Option<UserData>,
}

/// WHO body mass index category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BmiCategory {
    /// Below 18.5.
    Underweight,
    /// 18.5 to below 25.
    Normal,
    /// 25 to below 30.
    Overweight,
    /// 30 and above.
    Obese,
}

/// Body mass index, kg/m².
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Bmi(f32);

impl Bmi {
    /// BMI for the given weight and height. `None` unless both are positive
    /// and finite.
    pub fn from_metrics(weight_kg: f32, height_cm: f32) -> Option<Self> {
        let valid = |v: f32| v.is_finite() && v > 0.0;
        if !valid(weight_kg) || !valid(height_cm) {
            return None;
        }
        let metres = height_cm / 100.0;
        Some(Self(weight_kg / (metres * metres)))
    }

    /// Raw index value.
    pub fn value(self) -> f32 {
        self.0
    }

    /// WHO category of the index.
    pub fn category(self) -> BmiCategory {
        match self.0 {
            v if v < 18.5 => BmiCategory::Underweight,
            v if v < 25.0 => BmiCategory::Normal,
            v if v < 30.0 => BmiCategory::Overweight,
            _ => BmiCategory::Obese,
        }
    }
}

impl fmt::Display for Bmi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bmi_categories() {
        let bmi = Bmi::from_metrics(70.0, 175.0).unwrap();
        assert_eq!(bmi.to_string(), "22.9");
        assert_eq!(bmi.category(), BmiCategory::Normal);

        assert_eq!(Bmi::from_metrics(50.0, 180.0).unwrap().category(), BmiCategory::Underweight);
        assert_eq!(Bmi::from_metrics(90.0, 180.0).unwrap().category(), BmiCategory::Overweight);
        assert_eq!(Bmi::from_metrics(120.0, 170.0).unwrap().category(), BmiCategory::Obese);
    }

    #[test]
    fn bmi_requires_positive_metrics() {
        assert_eq!(Bmi::from_metrics(0.0, 175.0), None);
        assert_eq!(Bmi::from_metrics(70.0, f32::NAN), None);
    }

    #[test]
    fn choices_parse_by_label() {
        assert_eq!("Female".parse::<Gender>(), Ok(Gender::Female));
        assert_eq!("very-active".parse::<ActivityLevel>(), Ok(ActivityLevel::VeryActive));
        assert_eq!(
            "paleo".parse::<Diet>(),
            Err(UnknownChoice { kind: "Diet", value: "paleo".into() })
        );
        for goal in Goal::ALL {
            assert_eq!(goal.label().parse::<Goal>(), Ok(*goal));
        }
    }
}
