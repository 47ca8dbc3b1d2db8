//! Wizard inputs.

use crate::{ActivityLevel, Diet, Gender, Goal, Training};

/// Inputs processed by the [`crate::Onboarding`] machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OnboardingInput {
    /// Weight text edited.
    WeightChanged(String),
    /// Height text edited.
    HeightChanged(String),
    /// Age text edited.
    AgeChanged(String),
    /// Gender selected.
    GenderSelected(Gender),
    /// Goal selected.
    GoalSelected(Goal),
    /// Target weight text edited.
    TargetWeightChanged(String),
    /// Training selected.
    TrainingSelected(Training),
    /// Activity level selected.
    ActivityLevelSelected(ActivityLevel),
    /// Diet selected.
    DietSelected(Diet),
    /// Meals per day changed.
    MealFrequencyChanged(u8),
    /// Advance to the next step.
    NextButton,
    /// Return to the previous page.
    BackButton,
    /// Saving the submitted profile failed.
    SubmissionFailed {
        /// Failure description.
        message: String,
    },
}
