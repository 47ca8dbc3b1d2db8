//! Shell command parsing.
//!
//! One command per line. The first word selects the command, the rest are
//! its arguments. Free-text fields (weights, emails, passwords) take the rest
//! of the line verbatim so they can be cleared by giving no argument.
//! Parsing is pure; the [`crate::Shell`] decides what a command does in the
//! current screen.

use std::str::FromStr;

use bourbon_core::{
    ActivityLevel, AuthInput, AuthType, BackTo, DeckInput, Destination, Diet, Gender, Goal,
    OnboardingInput, Training,
};

/// A parsed shell line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Push a URL.
    Go {
        /// URL as typed.
        target: String,
    },
    /// Replace the current entry with a URL.
    Replace {
        /// URL as typed.
        target: String,
    },
    /// Unwind the stack.
    Back(BackTo),
    /// Platform back gesture.
    SystemBack,
    /// Print the backstack and current screen.
    Stack,
    /// Run the startup session check.
    Launch,
    /// Sign out.
    SignOut,
    /// Input for the onboarding wizard.
    Wizard(OnboardingInput),
    /// Input for the auth form.
    Auth(AuthInput),
    /// Input for the exercise deck.
    Deck(DeckInput),
    /// Print usage.
    Help,
    /// Leave the shell.
    Quit,
    /// First word matched no command.
    Unknown {
        /// Line as typed.
        input: String,
    },
    /// Known command with unusable arguments.
    InvalidArgs {
        /// Command word.
        command: String,
        /// What is wrong.
        error: String,
    },
}

/// Parse one line. Returns `None` for blank lines and `#` comments.
pub fn parse(line: &str) -> Option<Command> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }

    let (word, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    let rest = rest.trim();
    let invalid = |error: String| Command::InvalidArgs { command: word.to_owned(), error };

    let command = match word {
        "go" => required(rest).map(|target| Command::Go { target }),
        "replace" => required(rest).map(|target| Command::Replace { target }),
        "back" => back_to(rest).map(Command::Back),
        "system-back" | "sb" => Ok(Command::SystemBack),
        "stack" | "ls" => Ok(Command::Stack),
        "launch" => Ok(Command::Launch),
        "signout" | "sign-out" => Ok(Command::SignOut),
        "help" | "?" => Ok(Command::Help),
        "quit" | "q" | "exit" => Ok(Command::Quit),

        "weight" => Ok(Command::Wizard(OnboardingInput::WeightChanged(rest.to_owned()))),
        "height" => Ok(Command::Wizard(OnboardingInput::HeightChanged(rest.to_owned()))),
        "age" => Ok(Command::Wizard(OnboardingInput::AgeChanged(rest.to_owned()))),
        "target" => Ok(Command::Wizard(OnboardingInput::TargetWeightChanged(rest.to_owned()))),
        "gender" => choice::<Gender>(rest).map(|g| Command::Wizard(OnboardingInput::GenderSelected(g))),
        "goal" => choice::<Goal>(rest).map(|g| Command::Wizard(OnboardingInput::GoalSelected(g))),
        "training" => {
            choice::<Training>(rest).map(|t| Command::Wizard(OnboardingInput::TrainingSelected(t)))
        },
        "activity" => choice::<ActivityLevel>(rest)
            .map(|a| Command::Wizard(OnboardingInput::ActivityLevelSelected(a))),
        "diet" => choice::<Diet>(rest).map(|d| Command::Wizard(OnboardingInput::DietSelected(d))),
        "meals" => rest
            .parse::<u8>()
            .map(|n| Command::Wizard(OnboardingInput::MealFrequencyChanged(n)))
            .map_err(|_| format!("expected a number of meals, got {rest:?}")),
        "next" => Ok(Command::Wizard(OnboardingInput::NextButton)),
        "prev" => Ok(Command::Wizard(OnboardingInput::BackButton)),

        "email" => Ok(Command::Auth(AuthInput::EmailChanged(rest.to_owned()))),
        "password" => Ok(Command::Auth(AuthInput::PasswordChanged(rest.to_owned()))),
        "confirm" => Ok(Command::Auth(AuthInput::ConfirmPasswordChanged(rest.to_owned()))),
        "show-password" => Ok(Command::Auth(AuthInput::PasswordVisibilityChanged)),
        "switch" => auth_type(rest).map(|t| Command::Auth(AuthInput::SwitchAuthType(t))),
        "submit" => Ok(Command::Auth(AuthInput::ConfirmButton)),
        "google" => Ok(Command::Auth(AuthInput::SignInByGoogle)),

        "swipe" => Ok(Command::Deck(DeckInput::Next)),
        "unswipe" => Ok(Command::Deck(DeckInput::Previous)),

        _ => return Some(Command::Unknown { input: line.to_owned() }),
    };

    Some(command.unwrap_or_else(invalid))
}

/// Usage text for [`Command::Help`].
pub const HELP: &str = "\
navigation:  go <url> | replace <url> | back [n | <url>] | system-back | stack
session:     launch | signout | quit
onboarding:  weight|height|age|target <text> | gender|goal|training|activity|diet <choice>
             meals <n> | next | prev
auth:        email|password|confirm <text> | show-password | switch login|register
             submit | google
exercises:   swipe | unswipe";

fn required(rest: &str) -> Result<String, String> {
    if rest.is_empty() { Err("missing argument".to_owned()) } else { Ok(rest.to_owned()) }
}

fn back_to(rest: &str) -> Result<BackTo, String> {
    if rest.is_empty() {
        return Ok(BackTo::Previous);
    }
    if let Ok(steps) = rest.parse::<usize>() {
        return Ok(BackTo::Steps(steps));
    }
    Destination::parse(rest).map(|d| BackTo::Route(d.route())).map_err(|err| err.to_string())
}

fn choice<T>(rest: &str) -> Result<T, String>
where
    T: FromStr,
    T::Err: ToString,
{
    T::from_str(rest).map_err(|err| err.to_string())
}

fn auth_type(rest: &str) -> Result<AuthType, String> {
    match rest {
        "login" => Ok(AuthType::Login),
        "register" => Ok(AuthType::Register),
        other => Err(format!("expected login or register, got {other:?}")),
    }
}
