//! Invariant checks over random wizard sessions.
//!
//! Every input is followed by a snapshot and a full registry check, so a
//! violation names the exact input that caused it.

use bourbon_core::{
    ActivityLevel, Diet, Gender, Goal, Onboarding, OnboardingInput, Step, Training,
};
use bourbon_harness::{InvariantRegistry, SystemSnapshot, WizardSnapshot};
use proptest::prelude::*;

/// Mostly in-range numbers so long sessions reach the later pages.
fn numeric_text() -> impl Strategy<Value = String> {
    prop_oneof![
        6 => (20u16..120).prop_map(|n| n.to_string()),
        1 => (0u16..1000).prop_map(|n| n.to_string()),
        1 => Just(String::new()),
        1 => Just("abc".to_owned()),
    ]
}

fn input_strategy() -> impl Strategy<Value = OnboardingInput> {
    prop_oneof![
        2 => numeric_text().prop_map(OnboardingInput::WeightChanged),
        2 => (120u16..220).prop_map(|n| OnboardingInput::HeightChanged(n.to_string())),
        2 => numeric_text().prop_map(OnboardingInput::AgeChanged),
        1 => prop::sample::select(Gender::ALL.to_vec()).prop_map(OnboardingInput::GenderSelected),
        1 => prop::sample::select(Goal::ALL.to_vec()).prop_map(OnboardingInput::GoalSelected),
        1 => prop::sample::select(Training::ALL.to_vec()).prop_map(OnboardingInput::TrainingSelected),
        1 => prop::sample::select(ActivityLevel::ALL.to_vec())
            .prop_map(OnboardingInput::ActivityLevelSelected),
        1 => prop::sample::select(Diet::ALL.to_vec()).prop_map(OnboardingInput::DietSelected),
        1 => (1u8..9).prop_map(OnboardingInput::MealFrequencyChanged),
        8 => Just(OnboardingInput::NextButton),
        2 => Just(OnboardingInput::BackButton),
        1 => Just(OnboardingInput::SubmissionFailed { message: "offline".into() }),
    ]
}

proptest! {
    #[test]
    fn prop_wizard_invariants_hold(inputs in prop::collection::vec(input_strategy(), 0..120)) {
        let registry = InvariantRegistry::standard();
        let mut wizard = Onboarding::new();
        let mut observed = WizardSnapshot::default();
        observed.record(&wizard);

        for input in inputs {
            let description = format!("{input:?}");
            wizard.handle(input);
            observed.record(&wizard);

            let snapshot = SystemSnapshot::empty().with_wizard(observed.clone());
            if let Err(violations) = registry.check_all(&snapshot) {
                prop_assert!(false, "after {}: {:?}", description, violations);
            }
        }
    }
}

#[test]
fn test_complete_walkthrough_satisfies_invariants() {
    let registry = InvariantRegistry::standard();
    let mut wizard = Onboarding::new();
    let mut observed = WizardSnapshot::default();
    observed.record(&wizard);

    let script = [
        OnboardingInput::WeightChanged("82".into()),
        OnboardingInput::NextButton,
        OnboardingInput::HeightChanged("181".into()),
        OnboardingInput::NextButton,
        OnboardingInput::GenderSelected(Gender::Male),
        OnboardingInput::AgeChanged("35".into()),
        OnboardingInput::NextButton,
        OnboardingInput::NextButton,
        OnboardingInput::GoalSelected(Goal::LoseWeight),
        OnboardingInput::TargetWeightChanged("76".into()),
        OnboardingInput::NextButton,
        OnboardingInput::TrainingSelected(Training::Mixed),
        OnboardingInput::NextButton,
        OnboardingInput::ActivityLevelSelected(ActivityLevel::Moderate),
        OnboardingInput::NextButton,
        OnboardingInput::BackButton,
        OnboardingInput::NextButton,
        OnboardingInput::NextButton,
        OnboardingInput::DietSelected(Diet::Vegetarian),
        OnboardingInput::NextButton,
        OnboardingInput::MealFrequencyChanged(4),
        OnboardingInput::NextButton,
    ];
    for input in script {
        wizard.handle(input);
        observed.record(&wizard);
        registry.assert_all(&SystemSnapshot::empty().with_wizard(observed.clone()), "walkthrough");
    }

    assert_eq!(wizard.step(), Step::FetchData);
}
