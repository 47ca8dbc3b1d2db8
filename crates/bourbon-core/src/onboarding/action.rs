//! Wizard side-effects.

use crate::UserData;

/// Actions produced by the [`crate::Onboarding`] machine.
#[derive(Debug, Clone, PartialEq)]
pub enum OnboardingAction {
    /// Wizard state changed.
    Render,

    /// Persist the completed profile. Emitted once per submission attempt.
    Submit(UserData),

    /// Back pressed on the first page; leave the wizard.
    ExitBack,
}
