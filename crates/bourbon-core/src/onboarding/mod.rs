//! Onboarding step wizard.
//!
//! The [`Onboarding`] machine walks the user through the profile steps in
//! [`Step`] order. Steps are grouped into pages ([`PAGES`]); the current page
//! is always derived from the current step, so the two can never disagree.
//!
//! # Progression
//!
//! - `NextButton` validates every step up to and including the current one.
//!   A failure is stored as the [`Onboarding::rejection`] and the step stays
//!   put. Success moves to the immediate successor.
//! - Reaching [`Step::FetchData`] emits [`OnboardingAction::Submit`] once.
//!   The form is locked from then on. A reported failure re-arms submission
//!   and the next `NextButton` retries it.
//! - `BackButton` rewinds to the last step of the previous page, or emits
//!   [`OnboardingAction::ExitBack`] on the first page.

mod action;
mod form;
mod input;
mod step;

pub use action::OnboardingAction;
pub use form::{AGE_RANGE, HEIGHT_RANGE, MEALS_RANGE, ProfileForm, WEIGHT_RANGE};
pub use input::OnboardingInput;
pub use step::{PAGES, Step, page_steps};

use crate::{Bmi, ValidationError};

/// State of the profile submission started at [`Step::FetchData`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    /// Not submitted yet.
    Pending,
    /// Submitted, waiting for the outcome.
    InFlight,
    /// Last attempt failed. `NextButton` retries.
    Failed {
        /// Failure description.
        message: String,
    },
}

/// Step wizard state machine.
#[derive(Debug, Clone, PartialEq)]
pub struct Onboarding {
    step: Step,
    form: ProfileForm,
    rejection: Option<ValidationError>,
    submission: Submission,
}

impl Default for Onboarding {
    fn default() -> Self {
        Self::new()
    }
}

impl Onboarding {
    /// Wizard at the first step with an empty form.
    pub fn new() -> Self {
        Self {
            step: Step::Weight,
            form: ProfileForm::default(),
            rejection: None,
            submission: Submission::Pending,
        }
    }

    /// Current step.
    pub fn step(&self) -> Step {
        self.step
    }

    /// Current page index into [`PAGES`].
    pub fn page(&self) -> usize {
        self.step.page()
    }

    /// Entered data.
    pub fn form(&self) -> &ProfileForm {
        &self.form
    }

    /// Why the last `NextButton` was refused. Cleared by any edit or
    /// successful transition.
    pub fn rejection(&self) -> Option<&ValidationError> {
        self.rejection.as_ref()
    }

    /// Submission state.
    pub fn submission(&self) -> &Submission {
        &self.submission
    }

    /// Returns true if `step` has been reached.
    pub fn is_visible(&self, step: Step) -> bool {
        step <= self.step
    }

    /// Visible steps of the current page, in order.
    pub fn visible_steps(&self) -> Vec<Step> {
        page_steps(self.page()).iter().copied().filter(|s| self.is_visible(*s)).collect()
    }

    /// Back is offered on every page except the first and the terminal one.
    pub fn shows_back_button(&self) -> bool {
        self.page() > 0 && !self.step.is_terminal()
    }

    /// Next is offered until the terminal step, and there only to retry a
    /// failed submission.
    pub fn shows_next_button(&self) -> bool {
        !self.step.is_terminal() || matches!(self.submission, Submission::Failed { .. })
    }

    /// Live validation result of the current step.
    pub fn step_error(&self) -> Option<ValidationError> {
        self.form.validate(self.step).err()
    }

    /// BMI from the entered weight and height.
    pub fn bmi(&self) -> Option<Bmi> {
        self.form.bmi()
    }

    /// Process an input and return actions.
    pub fn handle(&mut self, input: OnboardingInput) -> Vec<OnboardingAction> {
        match input {
            OnboardingInput::WeightChanged(text) => self.edit(|f| f.weight = text),
            OnboardingInput::HeightChanged(text) => self.edit(|f| f.height = text),
            OnboardingInput::AgeChanged(text) => self.edit(|f| f.age = text),
            OnboardingInput::GenderSelected(gender) => self.edit(|f| f.gender = Some(gender)),
            OnboardingInput::GoalSelected(goal) => self.edit(|f| f.goal = Some(goal)),
            OnboardingInput::TargetWeightChanged(text) => self.edit(|f| f.target_weight = text),
            OnboardingInput::TrainingSelected(training) => self.edit(|f| f.training = Some(training)),
            OnboardingInput::ActivityLevelSelected(level) => {
                self.edit(|f| f.activity_level = Some(level))
            },
            OnboardingInput::DietSelected(diet) => self.edit(|f| f.diet = Some(diet)),
            OnboardingInput::MealFrequencyChanged(meals) => {
                self.edit(|f| f.meals_per_day = Some(meals))
            },
            OnboardingInput::NextButton => self.next(),
            OnboardingInput::BackButton => self.back(),
            OnboardingInput::SubmissionFailed { message } => {
                if self.submission == Submission::InFlight {
                    tracing::warn!(%message, "profile submission failed");
                    self.submission = Submission::Failed { message };
                    vec![OnboardingAction::Render]
                } else {
                    vec![]
                }
            },
        }
    }

    fn edit(&mut self, apply: impl FnOnce(&mut ProfileForm)) -> Vec<OnboardingAction> {
        if self.step.is_terminal() {
            tracing::debug!("edit ignored, profile already submitted");
            return vec![];
        }
        apply(&mut self.form);
        self.rejection = None;
        vec![OnboardingAction::Render]
    }

    fn next(&mut self) -> Vec<OnboardingAction> {
        let Some(next) = self.step.next() else {
            return self.resubmit();
        };

        if let Err(err) = self.form.validate_through(self.step) {
            tracing::debug!(step = ?self.step, %err, "next rejected");
            return self.reject(err);
        }

        if next.is_terminal() {
            return match self.form.to_user_data() {
                Ok(data) => {
                    self.advance(next);
                    self.submission = Submission::InFlight;
                    vec![OnboardingAction::Render, OnboardingAction::Submit(data)]
                },
                Err(err) => self.reject(err),
            };
        }

        self.advance(next);
        vec![OnboardingAction::Render]
    }

    fn back(&mut self) -> Vec<OnboardingAction> {
        if self.step.is_terminal() {
            return vec![];
        }
        let Some(previous) = self.page().checked_sub(1) else {
            return vec![OnboardingAction::ExitBack];
        };
        let Some(step) = page_steps(previous).last().copied() else {
            return vec![];
        };
        tracing::debug!(from = ?self.step, to = ?step, "wizard back");
        self.step = step;
        self.rejection = None;
        vec![OnboardingAction::Render]
    }

    fn resubmit(&mut self) -> Vec<OnboardingAction> {
        if !matches!(self.submission, Submission::Failed { .. }) {
            return vec![];
        }
        match self.form.to_user_data() {
            Ok(data) => {
                tracing::debug!("retrying profile submission");
                self.submission = Submission::InFlight;
                vec![OnboardingAction::Render, OnboardingAction::Submit(data)]
            },
            Err(err) => self.reject(err),
        }
    }

    fn advance(&mut self, to: Step) {
        tracing::debug!(from = ?self.step, ?to, "wizard advanced");
        self.step = to;
        self.rejection = None;
    }

    fn reject(&mut self, err: ValidationError) -> Vec<OnboardingAction> {
        if self.rejection.as_ref() == Some(&err) {
            return vec![];
        }
        self.rejection = Some(err);
        vec![OnboardingAction::Render]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ActivityLevel, Diet, Gender, Goal, Training};

    fn filled_to(target: Step) -> Onboarding {
        let mut wizard = Onboarding::new();
        let inputs = [
            OnboardingInput::WeightChanged("70".into()),
            OnboardingInput::HeightChanged("175".into()),
            OnboardingInput::AgeChanged("30".into()),
            OnboardingInput::GenderSelected(Gender::Male),
            OnboardingInput::GoalSelected(Goal::LoseWeight),
            OnboardingInput::TrainingSelected(Training::Cardio),
            OnboardingInput::ActivityLevelSelected(ActivityLevel::Light),
            OnboardingInput::DietSelected(Diet::Balanced),
            OnboardingInput::MealFrequencyChanged(3),
        ];
        for input in inputs {
            wizard.handle(input);
        }
        while wizard.step() < target {
            wizard.handle(OnboardingInput::NextButton);
        }
        wizard
    }

    #[test]
    fn next_with_empty_weight_is_rejected() {
        let mut wizard = Onboarding::new();
        let actions = wizard.handle(OnboardingInput::NextButton);
        assert_eq!(actions, vec![OnboardingAction::Render]);
        assert_eq!(wizard.step(), Step::Weight);
        assert!(matches!(wizard.rejection(), Some(ValidationError::Missing { step: Step::Weight, .. })));

        // Same rejection again changes nothing.
        assert!(wizard.handle(OnboardingInput::NextButton).is_empty());
    }

    #[test]
    fn weight_then_next_moves_to_height_page() {
        let mut wizard = Onboarding::new();
        wizard.handle(OnboardingInput::WeightChanged("70".into()));
        assert_eq!(wizard.handle(OnboardingInput::NextButton), vec![OnboardingAction::Render]);
        assert_eq!(wizard.step(), Step::Height);
        assert_eq!(wizard.page(), 1);
        assert_eq!(wizard.rejection(), None);
    }

    #[test]
    fn editing_clears_rejection() {
        let mut wizard = Onboarding::new();
        wizard.handle(OnboardingInput::NextButton);
        assert!(wizard.rejection().is_some());
        wizard.handle(OnboardingInput::WeightChanged("7".into()));
        assert!(wizard.rejection().is_none());
    }

    #[test]
    fn visible_steps_grow_within_a_page() {
        let wizard = filled_to(Step::GoalAndAim);
        assert_eq!(wizard.visible_steps(), vec![Step::GoalAndAim]);

        let wizard = filled_to(Step::ActivityLevel);
        assert_eq!(
            wizard.visible_steps(),
            vec![Step::GoalAndAim, Step::Training, Step::ActivityLevel]
        );
        assert!(wizard.is_visible(Step::Weight));
        assert!(!wizard.is_visible(Step::Diet));
    }

    #[test]
    fn back_rewinds_to_last_step_of_previous_page() {
        let mut wizard = filled_to(Step::Diet);
        assert_eq!(wizard.handle(OnboardingInput::BackButton), vec![OnboardingAction::Render]);
        assert_eq!(wizard.step(), Step::ActivityLevel);

        wizard.handle(OnboardingInput::BackButton);
        assert_eq!(wizard.step(), Step::BmiScale);
    }

    #[test]
    fn back_on_first_page_exits() {
        let mut wizard = Onboarding::new();
        assert!(!wizard.shows_back_button());
        assert_eq!(wizard.handle(OnboardingInput::BackButton), vec![OnboardingAction::ExitBack]);
        assert_eq!(wizard.step(), Step::Weight);
    }

    #[test]
    fn reaching_fetch_data_submits_once() {
        let mut wizard = filled_to(Step::MealFrequency);
        let actions = wizard.handle(OnboardingInput::NextButton);
        assert_eq!(actions.len(), 2);
        assert!(matches!(&actions[1], OnboardingAction::Submit(data) if data.meals_per_day == 3));
        assert_eq!(wizard.step(), Step::FetchData);
        assert_eq!(*wizard.submission(), Submission::InFlight);

        assert!(wizard.handle(OnboardingInput::NextButton).is_empty());
        assert!(wizard.handle(OnboardingInput::BackButton).is_empty());
        assert!(wizard.handle(OnboardingInput::WeightChanged("80".into())).is_empty());
        assert!(!wizard.shows_next_button());
    }

    #[test]
    fn failed_submission_can_be_retried() {
        let mut wizard = filled_to(Step::FetchData);
        let actions = wizard.handle(OnboardingInput::SubmissionFailed { message: "offline".into() });
        assert_eq!(actions, vec![OnboardingAction::Render]);
        assert_eq!(*wizard.submission(), Submission::Failed { message: "offline".into() });
        assert!(wizard.shows_next_button());

        let actions = wizard.handle(OnboardingInput::NextButton);
        assert!(matches!(actions.as_slice(), [OnboardingAction::Render, OnboardingAction::Submit(_)]));
        assert_eq!(*wizard.submission(), Submission::InFlight);
    }

    #[test]
    fn stray_failure_is_ignored() {
        let mut wizard = Onboarding::new();
        assert!(wizard.handle(OnboardingInput::SubmissionFailed { message: "x".into() }).is_empty());
        assert_eq!(*wizard.submission(), Submission::Pending);
    }
}
