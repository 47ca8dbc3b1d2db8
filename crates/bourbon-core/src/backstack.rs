//! Navigation history.
//!
//! A [`Backstack`] is an ordered, never-empty list of destinations. The root
//! entry is stored apart from the entries above it so an empty stack is not
//! representable. Mutation is crate-private: only the
//! [`Router`](crate::Router) changes a backstack, everything else reads it.

use serde::{Deserialize, Serialize};

use crate::{Destination, EmptyBackstack, RoutePath};

/// How far a back intent should unwind the stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BackTo {
    /// Pop a single entry.
    Previous,
    /// Pop up to `n` entries, stopping at the root.
    Steps(usize),
    /// Pop until the current entry has this route, or only the root is left.
    Route(RoutePath),
}

/// Ordered history of visited destinations. The last entry is current.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Destination>", into = "Vec<Destination>")]
pub struct Backstack {
    root: Destination,
    above: Vec<Destination>,
}

impl Backstack {
    /// Stack containing only `root`.
    pub fn new(root: Destination) -> Self {
        Self { root, above: Vec::new() }
    }

    /// Number of entries. Always at least 1.
    pub fn len(&self) -> usize {
        1 + self.above.len()
    }

    /// Always false: a backstack holds at least its root.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Bottom entry.
    pub fn root(&self) -> &Destination {
        &self.root
    }

    /// Top entry.
    pub fn current(&self) -> &Destination {
        self.above.last().unwrap_or(&self.root)
    }

    /// Entry directly beneath the current one.
    pub fn previous(&self) -> Option<&Destination> {
        match self.above.len() {
            0 => None,
            1 => Some(&self.root),
            n => self.above.get(n - 2),
        }
    }

    /// Entries from root to current.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Destination> {
        std::iter::once(&self.root).chain(self.above.iter())
    }

    /// Route of every entry, root first.
    pub fn routes(&self) -> Vec<RoutePath> {
        self.iter().map(Destination::route).collect()
    }

    /// Returns true if any entry has `route`.
    pub fn contains(&self, route: RoutePath) -> bool {
        self.iter().any(|d| d.route() == route)
    }

    pub(crate) fn push(&mut self, destination: Destination) {
        self.above.push(destination);
    }

    /// Removes the current entry unless it is the root.
    pub(crate) fn pop(&mut self) -> Option<Destination> {
        self.above.pop()
    }

    /// Swap the current entry for `destination`.
    ///
    /// Refused when `destination` equals the current entry or the entry
    /// beneath it. Refusing the second case keeps the current entry rather
    /// than making `destination` current, so the stack never holds the same
    /// destination twice in a row. Callers that must end on a route use
    /// [`crate::RouterInput::Land`], which unwinds instead. Returns whether
    /// the stack changed.
    pub(crate) fn replace_top(&mut self, destination: Destination) -> bool {
        if *self.current() == destination || self.previous() == Some(&destination) {
            return false;
        }
        match self.above.last_mut() {
            Some(top) => *top = destination,
            None => self.root = destination,
        }
        true
    }

    /// Unwind according to `to`. Returns the number of entries removed.
    pub(crate) fn pop_to(&mut self, to: BackTo) -> usize {
        let mut popped = 0;
        match to {
            BackTo::Previous => {
                if self.pop().is_some() {
                    popped = 1;
                }
            },
            BackTo::Steps(n) => {
                while popped < n && self.pop().is_some() {
                    popped += 1;
                }
            },
            BackTo::Route(route) => {
                while self.current().route() != route && self.pop().is_some() {
                    popped += 1;
                }
            },
        }
        popped
    }
}

impl TryFrom<Vec<Destination>> for Backstack {
    type Error = EmptyBackstack;

    fn try_from(entries: Vec<Destination>) -> Result<Self, Self::Error> {
        let mut entries = entries.into_iter();
        let root = entries.next().ok_or(EmptyBackstack)?;
        Ok(Self { root, above: entries.collect() })
    }
}

impl From<Backstack> for Vec<Destination> {
    fn from(stack: Backstack) -> Self {
        let mut entries = Vec::with_capacity(stack.len());
        entries.push(stack.root);
        entries.extend(stack.above);
        entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dest(route: RoutePath) -> Destination {
        Destination::of(route).unwrap()
    }

    fn stack(routes: &[RoutePath]) -> Backstack {
        Backstack::try_from(routes.iter().copied().map(dest).collect::<Vec<_>>()).unwrap()
    }

    #[test]
    fn new_stack_has_only_root() {
        let stack = Backstack::new(dest(RoutePath::Home));
        assert_eq!(stack.len(), 1);
        assert_eq!(stack.current(), stack.root());
        assert_eq!(stack.previous(), None);
    }

    #[test]
    fn pop_never_removes_root() {
        let mut stack = stack(&[RoutePath::Home, RoutePath::Auth]);
        assert_eq!(stack.pop().map(|d| d.route()), Some(RoutePath::Auth));
        assert_eq!(stack.pop(), None);
        assert_eq!(stack.routes(), vec![RoutePath::Home]);
    }

    #[test]
    fn replace_top_keeps_size() {
        let mut stack = stack(&[RoutePath::Home, RoutePath::Auth]);
        assert!(stack.replace_top(dest(RoutePath::Onboarding)));
        assert_eq!(stack.routes(), vec![RoutePath::Home, RoutePath::Onboarding]);
    }

    #[test]
    fn replace_top_on_root_swaps_root() {
        let mut stack = stack(&[RoutePath::Home]);
        assert!(stack.replace_top(dest(RoutePath::Auth)));
        assert_eq!(stack.routes(), vec![RoutePath::Auth]);
    }

    #[test]
    fn replace_top_refuses_adjacent_duplicates() {
        let mut stack = stack(&[RoutePath::Home, RoutePath::Auth]);
        assert!(!stack.replace_top(dest(RoutePath::Auth)));
        assert!(!stack.replace_top(dest(RoutePath::Home)));
        assert_eq!(stack.routes(), vec![RoutePath::Home, RoutePath::Auth]);
    }

    #[test]
    fn pop_to_route_stops_at_match_or_root() {
        let mut stack =
            stack(&[RoutePath::Home, RoutePath::ExerciseList, RoutePath::Auth, RoutePath::CalorieViewer]);
        assert_eq!(stack.pop_to(BackTo::Route(RoutePath::ExerciseList)), 2);
        assert_eq!(stack.current().route(), RoutePath::ExerciseList);

        assert_eq!(stack.pop_to(BackTo::Route(RoutePath::Onboarding)), 1);
        assert_eq!(stack.routes(), vec![RoutePath::Home]);
    }

    #[test]
    fn pop_to_steps_is_bounded_by_root() {
        let mut stack = stack(&[RoutePath::Home, RoutePath::Auth, RoutePath::Onboarding]);
        assert_eq!(stack.pop_to(BackTo::Steps(10)), 2);
        assert_eq!(stack.len(), 1);
        assert_eq!(stack.pop_to(BackTo::Previous), 0);
    }

    #[test]
    fn serde_rejects_empty_list() {
        let mut bytes = Vec::new();
        ciborium::into_writer(&Vec::<String>::new(), &mut bytes).unwrap();
        assert!(ciborium::from_reader::<Backstack, _>(bytes.as_slice()).is_err());
    }

    #[test]
    fn serde_preserves_order() {
        let original = stack(&[RoutePath::Home, RoutePath::ExerciseList, RoutePath::Auth]);
        let mut bytes = Vec::new();
        ciborium::into_writer(&original, &mut bytes).unwrap();

        let paths: Vec<String> = ciborium::from_reader(bytes.as_slice()).unwrap();
        assert_eq!(paths, vec!["/home", "/exercises", "/auth"]);

        let restored: Backstack = ciborium::from_reader(bytes.as_slice()).unwrap();
        assert_eq!(restored, original);
    }
}
