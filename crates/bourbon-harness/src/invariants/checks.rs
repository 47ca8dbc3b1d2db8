//! Standard invariant checks.
//!
//! These capture properties every reachable state must have, independent of
//! the inputs that led there.

use bourbon_core::{Step, Submission, onboarding::page_steps};

use super::{Invariant, InvariantResult, SystemSnapshot, Violation};

/// The backstack always holds at least its root.
///
/// Also checks that the reported depth matches the listed routes.
pub struct BackstackNonEmpty;

impl Invariant for BackstackNonEmpty {
    fn name(&self) -> &'static str {
        "backstack_non_empty"
    }

    fn check(&self, state: &SystemSnapshot) -> InvariantResult {
        let Some(router) = &state.router else {
            return Ok(());
        };
        if router.routes.is_empty() || router.depth != router.routes.len() {
            return Err(Violation {
                invariant: self.name(),
                message: format!("depth {} with routes {:?}", router.depth, router.routes),
            });
        }
        Ok(())
    }
}

/// The reported page is the page holding the current step.
pub struct PageMatchesStep;

impl Invariant for PageMatchesStep {
    fn name(&self) -> &'static str {
        "page_matches_step"
    }

    fn check(&self, state: &SystemSnapshot) -> InvariantResult {
        let Some(wizard) = &state.wizard else {
            return Ok(());
        };
        if wizard.page != wizard.step.page() {
            return Err(Violation {
                invariant: self.name(),
                message: format!("step {:?} is on page {}, reported {}", wizard.step, wizard.step.page(), wizard.page),
            });
        }
        Ok(())
    }
}

/// Visible steps are the current page's steps up to and including the
/// current one.
pub struct VisibilityFollowsOrder;

impl Invariant for VisibilityFollowsOrder {
    fn name(&self) -> &'static str {
        "visibility_follows_order"
    }

    fn check(&self, state: &SystemSnapshot) -> InvariantResult {
        let Some(wizard) = &state.wizard else {
            return Ok(());
        };
        let expected: Vec<Step> =
            page_steps(wizard.page).iter().copied().take_while(|s| *s <= wizard.step).collect();
        if wizard.visible != expected {
            return Err(Violation {
                invariant: self.name(),
                message: format!(
                    "at {:?} visible {:?}, expected {:?}",
                    wizard.step, wizard.visible, expected
                ),
            });
        }
        Ok(())
    }
}

/// A submission exists exactly when the wizard sits on the terminal step.
pub struct SubmissionAtTerminal;

impl Invariant for SubmissionAtTerminal {
    fn name(&self) -> &'static str {
        "submission_at_terminal"
    }

    fn check(&self, state: &SystemSnapshot) -> InvariantResult {
        let Some(wizard) = &state.wizard else {
            return Ok(());
        };
        let submitted = wizard.submission != Submission::Pending;
        if submitted != wizard.step.is_terminal() {
            return Err(Violation {
                invariant: self.name(),
                message: format!("step {:?} with submission {:?}", wizard.step, wizard.submission),
            });
        }
        Ok(())
    }
}

/// Consecutive observed steps differ by one legal move.
///
/// Legal moves: stay, advance to the successor, or rewind to the last step
/// of the previous page. Nothing leaves the terminal step.
pub struct StepTransitions;

impl StepTransitions {
    fn legal(from: Step, to: Step) -> bool {
        if from == to {
            return true;
        }
        if from.is_terminal() {
            return false;
        }
        let rewind = from
            .page()
            .checked_sub(1)
            .and_then(|page| page_steps(page).last().copied());
        from.next() == Some(to) || rewind == Some(to)
    }
}

impl Invariant for StepTransitions {
    fn name(&self) -> &'static str {
        "step_transitions"
    }

    fn check(&self, state: &SystemSnapshot) -> InvariantResult {
        let Some(wizard) = &state.wizard else {
            return Ok(());
        };
        for window in wizard.history.windows(2) {
            if !Self::legal(window[0], window[1]) {
                return Err(Violation {
                    invariant: self.name(),
                    message: format!("illegal move {:?} → {:?}", window[0], window[1]),
                });
            }
        }
        Ok(())
    }
}
