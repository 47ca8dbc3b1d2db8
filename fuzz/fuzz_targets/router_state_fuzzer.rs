//! Fuzz target for the Router state machine
//!
//! Runs arbitrary navigation sequences against the router and the reference
//! backstack model side by side.
//!
//! # Invariants
//!
//! - Backstack is never empty
//! - Outcome of every intent (changed, unchanged, not found, deferred)
//!   matches the model
//! - Resulting paths match the model entry for entry
//! - At most one Render per intent

#![no_main]

use bourbon_core::{RoutePath, Router, RouterAction};
use bourbon_harness::{outcome_of, InvariantRegistry, ModelBackstack, Operation, SystemSnapshot};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|ops: Vec<Operation>| {
    let mut model = ModelBackstack::new(RoutePath::Home);
    let mut router = Router::at(RoutePath::Home).expect("home has no parameters");
    let invariants = InvariantRegistry::standard();

    for op in ops {
        let expected = model.apply(op);
        let actions = router.handle(op.to_input());

        let renders = actions.iter().filter(|a| **a == RouterAction::Render).count();
        assert!(renders <= 1, "{op:?} rendered {renders} times");
        assert_eq!(outcome_of(&actions), Some(expected), "{op:?}");

        let paths: Vec<String> = router.backstack().iter().map(|d| d.path().to_owned()).collect();
        assert_eq!(paths, model.paths(), "{op:?}");
        invariants.assert_all(&SystemSnapshot::from_router(&router), "router fuzz");
    }
});
