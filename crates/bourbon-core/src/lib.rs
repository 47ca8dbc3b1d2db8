//! Navigation core for Bourbon
//!
//! Pure state machines for screen navigation and the onboarding flow. Nothing
//! in this crate performs I/O or spawns tasks: every machine consumes an input
//! and returns the actions the runtime must carry out, so the same code runs
//! under the async runtime, the CLI shell, and deterministic tests.
//!
//! # Components
//!
//! - [`Destination`] / [`RoutePath`]: typed, round-trippable screen addresses
//! - [`Backstack`]: non-empty navigation history
//! - [`Router`]: backstack state machine with system-back gating
//! - [`Onboarding`]: profile step wizard with paged layout and validation
//! - [`AuthMachine`]: sign-in and sign-up form
//! - [`ExerciseDeck`]: card-swipe exercise browser
//! - [`SessionProbe`]: startup routing decision

pub mod auth;
mod backstack;
mod error;
pub mod exercise;
mod launch;
pub mod onboarding;
pub mod route;
pub mod router;
mod user;

pub use auth::{AuthAction, AuthInput, AuthMachine, AuthType, PasswordError};
pub use backstack::{BackTo, Backstack};
pub use error::{EmptyBackstack, RouteError, UnknownChoice, ValidationError};
pub use exercise::{DeckAction, DeckInput, Exercise, ExerciseDeck, Quantity};
pub use launch::{LaunchDecision, SessionProbe};
pub use onboarding::{Onboarding, OnboardingAction, OnboardingInput, ProfileForm, Step, Submission};
pub use route::{Destination, Directions, Resolution, RouteParams, RoutePath};
pub use router::{Router, RouterAction, RouterInput, Target};
pub use user::{ActivityLevel, Bmi, BmiCategory, Diet, Gender, Goal, Training, User, UserData};
