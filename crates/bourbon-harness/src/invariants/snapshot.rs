//! Observable state snapshots for invariant checking.
//!
//! Snapshots capture what a screen would show at a point in time. Invariants
//! operate on snapshots rather than live machines so checks are consistent
//! and can also run against states published by the runtime.

use bourbon_core::{Backstack, Onboarding, RoutePath, Router, Step, Submission};

/// Snapshot of everything the invariants look at.
#[derive(Debug, Clone, Default)]
pub struct SystemSnapshot {
    /// Navigation state. `None` if no router is observed.
    pub router: Option<RouterSnapshot>,
    /// Wizard state. `None` if no wizard is observed.
    pub wizard: Option<WizardSnapshot>,
}

impl SystemSnapshot {
    /// Create an empty snapshot.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Snapshot of a router.
    pub fn from_router(router: &Router) -> Self {
        Self { router: Some(RouterSnapshot::from_backstack(router.backstack())), wizard: None }
    }

    /// Snapshot of a wizard with no recorded history.
    pub fn from_onboarding(wizard: &Onboarding) -> Self {
        let mut snapshot = WizardSnapshot::default();
        snapshot.record(wizard);
        Self { router: None, wizard: Some(snapshot) }
    }

    /// Attach a wizard snapshot.
    #[must_use]
    pub fn with_wizard(mut self, wizard: WizardSnapshot) -> Self {
        self.wizard = Some(wizard);
        self
    }
}

/// Backstack as seen by the screen host.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouterSnapshot {
    /// Routes from root to current.
    pub routes: Vec<RoutePath>,
    /// Reported stack size.
    pub depth: usize,
}

impl RouterSnapshot {
    /// Capture a backstack.
    pub fn from_backstack(backstack: &Backstack) -> Self {
        Self { routes: backstack.routes(), depth: backstack.len() }
    }
}

/// Wizard state plus the sequence of steps observed so far.
#[derive(Debug, Clone, PartialEq)]
pub struct WizardSnapshot {
    /// Current step.
    pub step: Step,
    /// Reported page index.
    pub page: usize,
    /// Steps reported visible on the current page.
    pub visible: Vec<Step>,
    /// Submission state.
    pub submission: Submission,
    /// Every step observed, oldest first.
    pub history: Vec<Step>,
}

impl Default for WizardSnapshot {
    fn default() -> Self {
        Self {
            step: Step::Weight,
            page: 0,
            visible: vec![Step::Weight],
            submission: Submission::Pending,
            history: Vec::new(),
        }
    }
}

impl WizardSnapshot {
    /// Update from `wizard` and append its step to the history.
    pub fn record(&mut self, wizard: &Onboarding) {
        self.step = wizard.step();
        self.page = wizard.page();
        self.visible = wizard.visible_steps();
        self.submission = wizard.submission().clone();
        self.history.push(wizard.step());
    }
}

#[cfg(test)]
mod tests {
    use bourbon_core::{OnboardingInput, RouterInput};

    use super::*;

    #[test]
    fn empty_snapshot() {
        let snapshot = SystemSnapshot::empty();
        assert!(snapshot.router.is_none());
        assert!(snapshot.wizard.is_none());
    }

    #[test]
    fn router_snapshot_lists_routes() {
        let mut router = Router::at(RoutePath::Home).unwrap();
        router.handle(RouterInput::GoToDestination(RoutePath::Auth.into()));

        let snapshot = SystemSnapshot::from_router(&router);
        let router = snapshot.router.unwrap();
        assert_eq!(router.routes, vec![RoutePath::Home, RoutePath::Auth]);
        assert_eq!(router.depth, 2);
    }

    #[test]
    fn wizard_history_grows_per_record() {
        let mut wizard = Onboarding::new();
        let mut snapshot = WizardSnapshot::default();
        snapshot.record(&wizard);

        wizard.handle(OnboardingInput::WeightChanged("70".into()));
        wizard.handle(OnboardingInput::NextButton);
        snapshot.record(&wizard);

        assert_eq!(snapshot.history, vec![Step::Weight, Step::Height]);
        assert_eq!(snapshot.page, 1);
    }
}
