//! Fuzz target for the onboarding wizard
//!
//! Arbitrary edits, choices and button presses, including out-of-range and
//! non-numeric text.
//!
//! # Invariants
//!
//! - Page always matches the step
//! - Visible steps are exactly those at or before the current step
//! - Steps only advance by one or rewind to the previous page
//! - Submission is pending until the terminal step
//! - Every Submit action carries data that passes validation

#![no_main]

use arbitrary::Arbitrary;
use bourbon_core::{
    ActivityLevel, Diet, Gender, Goal, Onboarding, OnboardingAction, OnboardingInput, Training,
};
use bourbon_harness::{InvariantRegistry, SystemSnapshot, WizardSnapshot};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Clone, Arbitrary)]
enum Field {
    Weight,
    Height,
    Age,
    Target,
}

#[derive(Debug, Clone, Arbitrary)]
enum WizardOp {
    Number { field: Field, value: u16 },
    Text { field: Field, text: String },
    Gender(u8),
    Goal(u8),
    Training(u8),
    Activity(u8),
    Diet(u8),
    Meals(u8),
    Next,
    Back,
    SubmissionFailed,
}

fn pick<T: Copy>(all: &[T], index: u8) -> T {
    all[usize::from(index) % all.len()]
}

fn to_input(op: WizardOp) -> OnboardingInput {
    let text_input = |field: Field, text: String| match field {
        Field::Weight => OnboardingInput::WeightChanged(text),
        Field::Height => OnboardingInput::HeightChanged(text),
        Field::Age => OnboardingInput::AgeChanged(text),
        Field::Target => OnboardingInput::TargetWeightChanged(text),
    };
    match op {
        WizardOp::Number { field, value } => text_input(field, value.to_string()),
        WizardOp::Text { field, text } => text_input(field, text),
        WizardOp::Gender(i) => OnboardingInput::GenderSelected(pick(Gender::ALL, i)),
        WizardOp::Goal(i) => OnboardingInput::GoalSelected(pick(Goal::ALL, i)),
        WizardOp::Training(i) => OnboardingInput::TrainingSelected(pick(Training::ALL, i)),
        WizardOp::Activity(i) => OnboardingInput::ActivityLevelSelected(pick(ActivityLevel::ALL, i)),
        WizardOp::Diet(i) => OnboardingInput::DietSelected(pick(Diet::ALL, i)),
        WizardOp::Meals(n) => OnboardingInput::MealFrequencyChanged(n),
        WizardOp::Next => OnboardingInput::NextButton,
        WizardOp::Back => OnboardingInput::BackButton,
        WizardOp::SubmissionFailed => OnboardingInput::SubmissionFailed { message: "fuzz".into() },
    }
}

fuzz_target!(|ops: Vec<WizardOp>| {
    let registry = InvariantRegistry::standard();
    let mut wizard = Onboarding::new();
    let mut observed = WizardSnapshot::default();
    observed.record(&wizard);

    for op in ops {
        for action in wizard.handle(to_input(op)) {
            if let OnboardingAction::Submit(data) = action {
                assert_eq!(wizard.form().to_user_data().as_ref(), Ok(&data));
            }
        }
        observed.record(&wizard);
        registry.assert_all(&SystemSnapshot::empty().with_wizard(observed.clone()), "wizard fuzz");
    }
});
