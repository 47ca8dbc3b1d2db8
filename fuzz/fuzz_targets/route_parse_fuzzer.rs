//! Fuzz target for Destination::parse
//!
//! Feeds arbitrary text to the route registry to find:
//! - Panics in path splitting or query parsing
//! - Parameter values that escape the canonical character set
//! - Parsed destinations whose path does not parse back to themselves
//!
//! The parser should NEVER panic. Invalid paths return an error, and
//! `resolve` turns every error into the not-found fallback.

#![no_main]

use bourbon_core::{
    route::{self, Resolution},
    Destination,
};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(url) = std::str::from_utf8(data) else {
        return;
    };

    match Destination::parse(url) {
        Ok(destination) => {
            let again = Destination::parse(destination.path())
                .expect("canonical path of a parsed destination must parse");
            assert_eq!(again, destination);
            assert!(destination.route().path_params().all(|name| destination.path_param(name).is_some()));
            assert!(matches!(route::resolve(url), Resolution::Found(_)));
        }
        Err(_) => {
            assert_eq!(route::resolve(url), Resolution::NotFound { path: url.to_owned() });
        }
    }
});
