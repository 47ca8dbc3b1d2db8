//! Reference backstack.
//!
//! Deliberately naive: a vector of `(route, path)` pairs manipulated with
//! plain vector operations. The real router must agree with it on every
//! operation.

use bourbon_core::{RoutePath, router::DEFAULT_EXCLUDED};

use super::{ModelUrl, Operation};

/// Observable effect of one operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Nothing changed and nothing was reported.
    Unchanged,
    /// The stack changed.
    Changed,
    /// The deep link resolved to no route.
    NotFound(String),
    /// System back was left to the platform.
    Deferred,
}

/// One stack entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelEntry {
    /// Route key.
    pub route: RoutePath,
    /// Canonical path.
    pub path: String,
}

/// Reference model of the router.
#[derive(Debug, Clone)]
pub struct ModelBackstack {
    entries: Vec<ModelEntry>,
    excluded: Vec<RoutePath>,
}

impl ModelBackstack {
    /// Stack holding only `root`, with the default back exclusions.
    pub fn new(root: RoutePath) -> Self {
        Self {
            entries: vec![ModelEntry { route: root, path: root.format().to_owned() }],
            excluded: DEFAULT_EXCLUDED.to_vec(),
        }
    }

    /// Canonical paths from root to current.
    pub fn paths(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.path.clone()).collect()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false; the root is never removed.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Apply `op` and report what happened.
    pub fn apply(&mut self, op: Operation) -> Outcome {
        match op {
            Operation::Go(route) => match plain(route.route()) {
                Some(entry) => {
                    self.entries.push(entry);
                    Outcome::Changed
                },
                None => Outcome::Unchanged,
            },
            Operation::GoUrl(url) => self.go_url(url),
            Operation::Replace(route) => match plain(route.route()) {
                Some(entry) => self.replace(entry),
                None => Outcome::Unchanged,
            },
            Operation::BackPrevious => self.pop_while(1, |_| true),
            Operation::BackSteps(n) => self.pop_while(usize::from(n % 6), |_| true),
            Operation::BackToRoute(route) => {
                let route = route.route();
                self.pop_while(usize::MAX, |top| top.route != route)
            },
            Operation::SystemBack => {
                let top = self.top().route;
                if self.entries.len() > 1 && !self.excluded.contains(&top) {
                    self.entries.pop();
                    Outcome::Changed
                } else {
                    Outcome::Deferred
                }
            },
            Operation::Land(route) => self.land(route.route()),
        }
    }

    fn land(&mut self, route: RoutePath) -> Outcome {
        if self.top().route == route {
            return Outcome::Unchanged;
        }
        if self.entries.iter().any(|e| e.route == route) {
            return self.pop_while(usize::MAX, |top| top.route != route);
        }
        match plain(route) {
            Some(entry) => self.replace(entry),
            None => Outcome::Unchanged,
        }
    }

    fn go_url(&mut self, url: ModelUrl) -> Outcome {
        match url.route() {
            Some(route) => {
                self.entries.push(ModelEntry { route, path: url.url() });
                Outcome::Changed
            },
            None => Outcome::NotFound(url.url()),
        }
    }

    fn replace(&mut self, entry: ModelEntry) -> Outcome {
        let n = self.entries.len();
        let adjacent = self.entries[n - 1] == entry || (n > 1 && self.entries[n - 2] == entry);
        if adjacent {
            return Outcome::Unchanged;
        }
        self.entries[n - 1] = entry;
        Outcome::Changed
    }

    fn pop_while(&mut self, limit: usize, mut keep_going: impl FnMut(&ModelEntry) -> bool) -> Outcome {
        let mut popped = 0;
        while popped < limit && self.entries.len() > 1 && keep_going(self.top()) {
            self.entries.pop();
            popped += 1;
        }
        if popped == 0 { Outcome::Unchanged } else { Outcome::Changed }
    }

    fn top(&self) -> &ModelEntry {
        &self.entries[self.entries.len() - 1]
    }
}

/// Entry for a route without path parameters.
fn plain(route: RoutePath) -> Option<ModelEntry> {
    if route.format().contains('{') {
        return None;
    }
    Some(ModelEntry { route, path: route.format().to_owned() })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RouteIndex;

    fn index(route: RoutePath) -> RouteIndex {
        RouteIndex(RoutePath::ALL.iter().position(|r| *r == route).unwrap() as u8)
    }

    #[test]
    fn root_survives_every_pop() {
        let mut model = ModelBackstack::new(RoutePath::Home);
        assert_eq!(model.apply(Operation::BackPrevious), Outcome::Unchanged);
        assert_eq!(model.apply(Operation::BackSteps(5)), Outcome::Unchanged);
        assert_eq!(model.apply(Operation::SystemBack), Outcome::Deferred);
        assert_eq!(model.paths(), vec!["/home"]);
    }

    #[test]
    fn back_to_missing_route_unwinds_to_root() {
        let mut model = ModelBackstack::new(RoutePath::Home);
        model.apply(Operation::Go(index(RoutePath::ExerciseList)));
        model.apply(Operation::Go(index(RoutePath::CalorieViewer)));
        assert_eq!(model.apply(Operation::BackToRoute(index(RoutePath::Auth))), Outcome::Changed);
        assert_eq!(model.paths(), vec!["/home"]);
    }

    #[test]
    fn system_back_defers_on_excluded() {
        let mut model = ModelBackstack::new(RoutePath::Home);
        model.apply(Operation::Go(index(RoutePath::Onboarding)));
        assert_eq!(model.apply(Operation::SystemBack), Outcome::Deferred);
        assert_eq!(model.len(), 2);
    }

    #[test]
    fn land_unwinds_to_route_below() {
        let mut model = ModelBackstack::new(RoutePath::Auth);
        model.apply(Operation::Go(index(RoutePath::Home)));
        model.apply(Operation::Go(index(RoutePath::CalorieViewer)));
        assert_eq!(model.apply(Operation::Land(index(RoutePath::Auth))), Outcome::Changed);
        assert_eq!(model.paths(), vec!["/auth"]);
        assert_eq!(model.apply(Operation::Land(index(RoutePath::Auth))), Outcome::Unchanged);
    }
}
