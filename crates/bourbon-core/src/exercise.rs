//! Exercise catalogue and the card-swipe deck.
//!
//! The deck shows exercises as a stack of cards with the first exercise on
//! top of the pile drawn last, so `current` counts from the end of the list.
//! `Next` swipes the top card away and is refused while only one card is
//! left; `Previous` brings the last swiped card back.

use std::{fmt, time::Duration};

use serde::{Deserialize, Serialize};

/// Duration used when an exercise does not specify one.
pub const DEFAULT_DURATION_SECS: u32 = 30;

/// How much of an exercise to do, e.g. 12 reps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quantity {
    /// Count.
    pub amount: u32,
    /// Unit label.
    pub unit: String,
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.amount, self.unit)
    }
}

/// Catalogue entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exercise {
    /// Catalogue identifier.
    pub id: u32,
    /// Display name.
    pub name: String,
    /// Instructions.
    pub description: String,
    /// Duration in seconds. See [`Exercise::duration`].
    pub duration_secs: Option<u32>,
    /// Optional repetition target.
    pub quantity: Option<Quantity>,
}

impl Exercise {
    /// Duration, falling back to [`DEFAULT_DURATION_SECS`].
    pub fn duration(&self) -> Duration {
        Duration::from_secs(u64::from(self.duration_secs.unwrap_or(DEFAULT_DURATION_SECS)))
    }
}

/// Inputs processed by the [`ExerciseDeck`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeckInput {
    /// Replace the deck contents and start over.
    Loaded(Vec<Exercise>),
    /// Swipe the top card away.
    Next,
    /// Bring the last swiped card back.
    Previous,
}

/// Actions produced by the [`ExerciseDeck`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeckAction {
    /// Deck changed.
    Render,
}

/// Card-swipe browsing state machine.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExerciseDeck {
    exercises: Vec<Exercise>,
    swiped: usize,
}

impl ExerciseDeck {
    /// Deck over `exercises`, nothing swiped.
    pub fn new(exercises: Vec<Exercise>) -> Self {
        Self { exercises, swiped: 0 }
    }

    /// Number of cards swiped away.
    pub fn swiped(&self) -> usize {
        self.swiped
    }

    /// Card on top, `None` for an empty deck.
    pub fn current(&self) -> Option<&Exercise> {
        let index = self.exercises.len().checked_sub(self.swiped + 1)?;
        self.exercises.get(index)
    }

    /// Cards still on the pile, bottom first.
    pub fn remaining(&self) -> &[Exercise] {
        let end = self.exercises.len().saturating_sub(self.swiped);
        self.exercises.get(..end).unwrap_or(&[])
    }

    /// Returns true if `Next` would swipe.
    pub fn can_go_next(&self) -> bool {
        self.swiped + 1 < self.exercises.len()
    }

    /// Returns true if `Previous` would restore a card.
    pub fn can_go_previous(&self) -> bool {
        self.swiped > 0
    }

    /// Process an input and return actions.
    pub fn handle(&mut self, input: DeckInput) -> Vec<DeckAction> {
        match input {
            DeckInput::Loaded(exercises) => {
                tracing::debug!(count = exercises.len(), "exercise deck loaded");
                *self = Self::new(exercises);
                vec![DeckAction::Render]
            },
            DeckInput::Next if self.can_go_next() => {
                self.swiped += 1;
                vec![DeckAction::Render]
            },
            DeckInput::Previous if self.can_go_previous() => {
                self.swiped -= 1;
                vec![DeckAction::Render]
            },
            DeckInput::Next | DeckInput::Previous => vec![],
        }
    }
}
