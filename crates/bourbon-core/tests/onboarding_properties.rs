//! Property-based tests for the Onboarding wizard.
//!
//! Arbitrary input sequences must keep the page derived from the step, move
//! forward one step at a time, and submit exactly when the terminal step is
//! entered.

use bourbon_core::{
    ActivityLevel, Diet, Gender, Goal, Onboarding, OnboardingAction, OnboardingInput, Step,
    Training, onboarding::PAGES,
};
use proptest::prelude::*;

fn numeric_text() -> impl Strategy<Value = String> {
    prop_oneof![
        3 => (0u16..500).prop_map(|n| n.to_string()),
        1 => Just(String::new()),
        1 => "[a-z]{1,4}",
    ]
}

fn input_strategy() -> impl Strategy<Value = OnboardingInput> {
    prop_oneof![
        2 => numeric_text().prop_map(OnboardingInput::WeightChanged),
        2 => numeric_text().prop_map(OnboardingInput::HeightChanged),
        2 => numeric_text().prop_map(OnboardingInput::AgeChanged),
        1 => prop::sample::select(Gender::ALL.to_vec()).prop_map(OnboardingInput::GenderSelected),
        1 => prop::sample::select(Goal::ALL.to_vec()).prop_map(OnboardingInput::GoalSelected),
        1 => numeric_text().prop_map(OnboardingInput::TargetWeightChanged),
        1 => prop::sample::select(Training::ALL.to_vec()).prop_map(OnboardingInput::TrainingSelected),
        1 => prop::sample::select(ActivityLevel::ALL.to_vec()).prop_map(OnboardingInput::ActivityLevelSelected),
        1 => prop::sample::select(Diet::ALL.to_vec()).prop_map(OnboardingInput::DietSelected),
        1 => (0u8..10).prop_map(OnboardingInput::MealFrequencyChanged),
        6 => Just(OnboardingInput::NextButton),
        2 => Just(OnboardingInput::BackButton),
        1 => Just(OnboardingInput::SubmissionFailed { message: "offline".into() }),
    ]
}

proptest! {
    #[test]
    fn prop_wizard_transitions(inputs in prop::collection::vec(input_strategy(), 0..120)) {
        let mut wizard = Onboarding::new();

        for input in inputs {
            let before = wizard.clone();
            let actions = wizard.handle(input.clone());
            let submits = actions.iter().filter(|a| matches!(a, OnboardingAction::Submit(_))).count();

            prop_assert!(PAGES[wizard.page()].contains(&wizard.step()));
            for step in Step::ALL {
                prop_assert_eq!(wizard.is_visible(step), step.order() <= wizard.step().order());
            }

            match input {
                OnboardingInput::NextButton => {
                    if before.form().validate_through(before.step()).is_err() {
                        prop_assert_eq!(wizard.step(), before.step());
                        prop_assert!(wizard.rejection().is_some());
                    } else if let Some(next) = before.step().next() {
                        prop_assert_eq!(wizard.step(), next);
                    } else {
                        prop_assert_eq!(wizard.step(), Step::FetchData);
                    }
                    let entered_terminal = !before.step().is_terminal() && wizard.step().is_terminal();
                    if entered_terminal {
                        prop_assert_eq!(submits, 1);
                    }
                },
                OnboardingInput::BackButton => {
                    prop_assert!(wizard.step() <= before.step());
                    if before.page() == 0 {
                        prop_assert_eq!(actions, vec![OnboardingAction::ExitBack]);
                    }
                    prop_assert_eq!(submits, 0);
                },
                _ => {
                    prop_assert_eq!(wizard.step(), before.step());
                    prop_assert_eq!(submits, 0);
                },
            }
        }
    }
}

#[test]
fn full_walkthrough_submits_collected_profile() {
    let mut wizard = Onboarding::new();
    let steps: Vec<(OnboardingInput, Step)> = vec![
        (OnboardingInput::WeightChanged("82.5".into()), Step::Height),
        (OnboardingInput::HeightChanged("180".into()), Step::GenderAndAge),
        (OnboardingInput::AgeChanged("41".into()), Step::GenderAndAge),
        (OnboardingInput::GenderSelected(Gender::Other), Step::BmiScale),
        (OnboardingInput::GoalSelected(Goal::MaintainWeight), Step::GoalAndAim),
        (OnboardingInput::TargetWeightChanged("80".into()), Step::Training),
        (OnboardingInput::TrainingSelected(Training::Yoga), Step::ActivityLevel),
        (OnboardingInput::ActivityLevelSelected(ActivityLevel::Active), Step::Diet),
        (OnboardingInput::DietSelected(Diet::Vegan), Step::MealFrequency),
    ];

    for (input, expected) in steps {
        wizard.handle(input);
        if wizard.step() != expected {
            wizard.handle(OnboardingInput::NextButton);
        }
        assert_eq!(wizard.step(), expected);
    }

    wizard.handle(OnboardingInput::MealFrequencyChanged(5));
    let actions = wizard.handle(OnboardingInput::NextButton);
    let [OnboardingAction::Render, OnboardingAction::Submit(data)] = actions.as_slice() else {
        panic!("expected a submission, got {actions:?}");
    };
    assert_eq!(data.weight_kg, 82.5);
    assert_eq!(data.target_weight_kg, Some(80.0));
    assert_eq!(data.diet, Diet::Vegan);
    assert_eq!(data.meals_per_day, 5);
    assert_eq!(wizard.step(), Step::FetchData);
}
