//! Fuzz target: `Simplifier::feed`
//!
//! Decodes each input byte into a move and feeds the sequence through
//! both reduction policies.  The automaton must never panic, never grow
//! the path past the number of accepted moves, and leave buffer and
//! window untouched whenever it rejects a move.
//!
//! cargo fuzz run fuzz_simplifier

#![no_main]

use libfuzzer_sys::fuzz_target;
use mazebot::path::{Move, PathBuffer, ReductionPolicy, Simplifier};

fuzz_target!(|data: &[u8]| {
    for policy in [ReductionPolicy::Strict, ReductionPolicy::HeadingSum] {
        let mut simplifier = Simplifier::new(policy);
        let mut path = PathBuffer::<20>::new();
        let mut accepted = 0usize;

        for &byte in data {
            let mv = Move::ALL[usize::from(byte) % Move::ALL.len()];
            let before = path.clone();
            let state = simplifier.state();
            match simplifier.feed(mv, &mut path) {
                Ok(_) => accepted += 1,
                Err(_) => {
                    assert_eq!(path, before, "rejected move changed the path");
                    assert_eq!(simplifier.state(), state, "rejected move changed the window");
                }
            }
            assert!(path.len() <= accepted);
            assert!(path.iter().all(|m| m != Move::Back), "Back committed");
        }
    }
});
