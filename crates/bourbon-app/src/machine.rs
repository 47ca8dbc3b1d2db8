//! Uniform view of the core state machines for the mailbox runtime.

use std::fmt::Debug;

use bourbon_core::{
    AuthAction, AuthInput, AuthMachine, DeckAction, DeckInput, ExerciseDeck,
    Onboarding, OnboardingAction, OnboardingInput, Router, RouterAction, RouterInput,
};

/// A pure state machine that can run inside a mailbox actor.
///
/// `Render` actions become snapshot publications; every other action is
/// forwarded to the actor's effect channel.
pub trait Machine: Send + 'static {
    /// Inputs accepted by the machine.
    type Input: Debug + Send + 'static;
    /// Actions produced by the machine.
    type Action: Debug + Send + 'static;
    /// Observable state published after each mutation.
    type State: Debug + Clone + Send + Sync + 'static;

    /// Name used in logs and errors.
    const NAME: &'static str;

    /// Process one input.
    fn handle(&mut self, input: Self::Input) -> Vec<Self::Action>;

    /// Current observable state.
    fn state(&self) -> Self::State;

    /// Returns true for the action that signals a state change.
    fn is_render(action: &Self::Action) -> bool;
}

impl Machine for Router {
    type Input = RouterInput;
    type Action = RouterAction;
    type State = Router;

    const NAME: &'static str = "router";

    fn handle(&mut self, input: RouterInput) -> Vec<RouterAction> {
        Router::handle(self, input)
    }

    fn state(&self) -> Router {
        self.clone()
    }

    fn is_render(action: &RouterAction) -> bool {
        matches!(action, RouterAction::Render)
    }
}

impl Machine for Onboarding {
    type Input = OnboardingInput;
    type Action = OnboardingAction;
    type State = Onboarding;

    const NAME: &'static str = "onboarding";

    fn handle(&mut self, input: OnboardingInput) -> Vec<OnboardingAction> {
        Onboarding::handle(self, input)
    }

    fn state(&self) -> Onboarding {
        self.clone()
    }

    fn is_render(action: &OnboardingAction) -> bool {
        matches!(action, OnboardingAction::Render)
    }
}

impl Machine for AuthMachine {
    type Input = AuthInput;
    type Action = AuthAction;
    type State = AuthMachine;

    const NAME: &'static str = "auth";

    fn handle(&mut self, input: AuthInput) -> Vec<AuthAction> {
        AuthMachine::handle(self, input)
    }

    fn state(&self) -> AuthMachine {
        self.clone()
    }

    fn is_render(action: &AuthAction) -> bool {
        matches!(action, AuthAction::Render)
    }
}

impl Machine for ExerciseDeck {
    type Input = DeckInput;
    type Action = DeckAction;
    type State = ExerciseDeck;

    const NAME: &'static str = "exercise-deck";

    fn handle(&mut self, input: DeckInput) -> Vec<DeckAction> {
        ExerciseDeck::handle(self, input)
    }

    fn state(&self) -> ExerciseDeck {
        self.clone()
    }

    fn is_render(action: &DeckAction) -> bool {
        matches!(action, DeckAction::Render)
    }
}
