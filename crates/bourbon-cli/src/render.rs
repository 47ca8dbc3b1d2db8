//! Plain-text views of machine state.
//!
//! Each view borrows a state snapshot and implements [`fmt::Display`], so the
//! shell can format into any writer without caring which screen is open.

use std::fmt;

use bourbon_app::ShellEvent;
use bourbon_core::{
    AuthMachine, AuthType, Backstack, ExerciseDeck, Onboarding, Step, Submission, onboarding::PAGES,
};

/// Backstack on one line, root first.
pub struct StackView<'a>(pub &'a Backstack);

impl fmt::Display for StackView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("stack:")?;
        for (i, destination) in self.0.iter().enumerate() {
            let sep = if i == 0 { " " } else { " > " };
            write!(f, "{sep}{destination}")?;
        }
        Ok(())
    }
}

/// Visible steps of the wizard's current page.
pub struct WizardView<'a>(pub &'a Onboarding);

impl fmt::Display for WizardView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let wizard = self.0;
        write!(f, "onboarding: page {}/{}", wizard.page() + 1, PAGES.len())?;
        for step in wizard.visible_steps() {
            write!(f, "\n  ")?;
            step_line(f, wizard, step)?;
        }
        if let Some(err) = wizard.rejection() {
            write!(f, "\n  ! {err}")?;
        }
        let back = if wizard.shows_back_button() { " [prev]" } else { "" };
        let next = if wizard.shows_next_button() { " [next]" } else { "" };
        if !back.is_empty() || !next.is_empty() {
            write!(f, "\n {back}{next}")?;
        }
        Ok(())
    }
}

fn step_line(f: &mut fmt::Formatter<'_>, wizard: &Onboarding, step: Step) -> fmt::Result {
    let form = wizard.form();
    match step {
        Step::Weight => write!(f, "weight: {} kg", form.weight),
        Step::Height => write!(f, "height: {} cm", form.height),
        Step::GenderAndAge => write!(f, "gender: {}, age: {}", or_dash(form.gender), form.age),
        Step::BmiScale => match wizard.bmi() {
            Some(bmi) => write!(f, "bmi: {bmi} ({:?})", bmi.category()),
            None => f.write_str("bmi: -"),
        },
        Step::GoalAndAim => write!(f, "goal: {}, target: {}", or_dash(form.goal), form.target_weight),
        Step::Training => write!(f, "training: {}", or_dash(form.training)),
        Step::ActivityLevel => write!(f, "activity: {}", or_dash(form.activity_level)),
        Step::Diet => write!(f, "diet: {}", or_dash(form.diet)),
        Step::MealFrequency => write!(f, "meals: {}", or_dash(form.meals_per_day)),
        Step::FetchData => match wizard.submission() {
            Submission::Pending => f.write_str("profile: not submitted"),
            Submission::InFlight => f.write_str("profile: saving"),
            Submission::Failed { message } => write!(f, "profile: failed, {message}"),
        },
    }
}

/// Auth form fields and status.
pub struct AuthView<'a>(pub &'a AuthMachine);

impl fmt::Display for AuthView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let auth = self.0;
        let register = auth.auth_type() == AuthType::Register;
        f.write_str(if register { "auth: register" } else { "auth: login" })?;

        let flag = if auth.wrong_email() { " (invalid)" } else { "" };
        write!(f, "\n  email: {}{flag}", auth.email())?;
        write!(f, "\n  password: {}", masked(auth.password(), auth.password_visible()))?;
        if register {
            write!(f, "\n  confirm: {}", masked(auth.confirm_password(), auth.password_visible()))?;
        }
        if let Some(err) = auth.password_error() {
            write!(f, "\n  ! {err}")?;
        }
        if let Some(failure) = auth.failure() {
            write!(f, "\n  ! {failure}")?;
        }
        if auth.is_loading() {
            f.write_str("\n  working...")?;
        }
        Ok(())
    }
}

/// Top card of the exercise deck.
pub struct DeckView<'a>(pub &'a ExerciseDeck);

impl fmt::Display for DeckView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let deck = self.0;
        let Some(top) = deck.current() else {
            return f.write_str("exercises: empty");
        };
        write!(f, "exercises: {} left, {} swiped", deck.remaining().len(), deck.swiped())?;
        write!(f, "\n  {} ({}s", top.name, top.duration().as_secs())?;
        if let Some(quantity) = &top.quantity {
            write!(f, ", {quantity}")?;
        }
        write!(f, ")\n  {}", top.description)
    }
}

/// Host notification.
pub struct EventView<'a>(pub &'a ShellEvent);

impl fmt::Display for EventView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            ShellEvent::PlatformBack => f.write_str("(platform back)"),
            ShellEvent::NotFound { path } => write!(f, "(not found: {path})"),
        }
    }
}

fn or_dash<T: fmt::Display>(value: Option<T>) -> String {
    value.map_or_else(|| "-".to_owned(), |v| v.to_string())
}

fn masked(secret: &str, visible: bool) -> String {
    if visible { secret.to_owned() } else { "*".repeat(secret.chars().count()) }
}

#[cfg(test)]
mod tests {
    use bourbon_core::{
        AuthInput, DeckInput, Destination, Exercise, Gender, OnboardingInput, Quantity, RoutePath,
    };

    use super::*;

    #[test]
    fn stack_lists_paths_root_first() {
        let stack = Backstack::try_from(vec![
            Destination::of(RoutePath::Home).unwrap(),
            Destination::parse("/ar/squat").unwrap(),
            Destination::parse("/recipes?ingredients=rice").unwrap(),
        ])
        .unwrap();
        insta::assert_snapshot!(StackView(&stack), @"stack: /home > /ar/squat > /recipes?ingredients=rice");
    }

    #[test]
    fn wizard_first_page() {
        let mut wizard = Onboarding::new();
        wizard.handle(OnboardingInput::NextButton);
        insta::assert_snapshot!(WizardView(&wizard), @r"
        onboarding: page 1/7
          weight:  kg
          ! weight is required
          [next]
        ");
    }

    #[test]
    fn wizard_bmi_page() {
        let mut wizard = Onboarding::new();
        for input in [
            OnboardingInput::WeightChanged("70".into()),
            OnboardingInput::NextButton,
            OnboardingInput::HeightChanged("175".into()),
            OnboardingInput::NextButton,
            OnboardingInput::GenderSelected(Gender::Other),
            OnboardingInput::AgeChanged("30".into()),
            OnboardingInput::NextButton,
        ] {
            wizard.handle(input);
        }
        insta::assert_snapshot!(WizardView(&wizard), @r"
        onboarding: page 4/7
          bmi: 22.9 (Normal)
          [prev] [next]
        ");
    }

    #[test]
    fn auth_masks_password_until_shown() {
        let mut auth = AuthMachine::new();
        auth.handle(AuthInput::SwitchAuthType(AuthType::Register));
        auth.handle(AuthInput::EmailChanged("kim".into()));
        auth.handle(AuthInput::PasswordChanged("secret".into()));
        auth.handle(AuthInput::ConfirmPasswordChanged("secreT".into()));
        auth.handle(AuthInput::ConfirmButton);
        insta::assert_snapshot!(AuthView(&auth), @r"
        auth: register
          email: kim (invalid)
          password: ******
          confirm: ******
          ! Passwords do not match
        ");

        auth.handle(AuthInput::PasswordVisibilityChanged);
        assert!(AuthView(&auth).to_string().contains("password: secret"));
    }

    #[test]
    fn deck_shows_top_card() {
        let exercises = vec![
            Exercise {
                id: 1,
                name: "Plank".into(),
                description: "Hold a straight line.".into(),
                duration_secs: Some(60),
                quantity: None,
            },
            Exercise {
                id: 2,
                name: "Squat".into(),
                description: "Hips back, chest up.".into(),
                duration_secs: None,
                quantity: Some(Quantity { amount: 12, unit: "reps".into() }),
            },
        ];
        let mut deck = ExerciseDeck::new(exercises);
        insta::assert_snapshot!(DeckView(&deck), @r"
        exercises: 2 left, 0 swiped
          Squat (30s, 12 reps)
          Hips back, chest up.
        ");

        deck.handle(DeckInput::Next);
        assert!(DeckView(&deck).to_string().starts_with("exercises: 1 left, 1 swiped\n  Plank (60s)"));
        assert_eq!(DeckView(&ExerciseDeck::default()).to_string(), "exercises: empty");
    }

    #[test]
    fn events() {
        assert_eq!(EventView(&ShellEvent::PlatformBack).to_string(), "(platform back)");
        assert_eq!(
            EventView(&ShellEvent::NotFound { path: "/x".into() }).to_string(),
            "(not found: /x)"
        );
    }
}
