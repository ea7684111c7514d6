// This is a part of jconv.
// Copyright (c) 2026, jconv developers.
// See README.md and LICENSE.txt for details.

//! Macros and helpers for testing.

use crate::types::{DecodeStatus, Encoding, REPLACEMENT};

macro_rules! assert_convert_ok {
    ($this:expr, $input:expr, $expected:expr) => {{
        let decoded = $this.test_feed(&$input);
        assert!(
            decoded == $expected,
            "convert should produce {:?}, but instead produced {:?}",
            $expected,
            decoded
        );
    }};
}

/// Asserts that a single `convert` call against an output buffer of the given
/// capacity suspends with `NeedMoreOutput` after exactly the given progress.
macro_rules! assert_need_more {
    ($this:expr, $input:expr, $cap:expr, $read:expr, $written:expr) => {{
        let mut buf = vec![crate::types::REPLACEMENT; $cap];
        let (read, written, status) = $this.convert(&$input, &mut buf);
        assert!(
            status == crate::types::DecodeStatus::NeedMoreOutput
                && (read, written) == ($read, $written),
            "convert should suspend at {:?}, but instead returned {:?}",
            ($read, $written),
            (read, written, status)
        );
    }};
}

/// Checks that splitting the input at every byte boundary, with the state
/// carried across the two calls, produces the same output as one call.
pub fn check_split_invariance(encoding: &dyn Encoding, input: &[u8]) {
    let whole = encoding.decode(input);
    for split in 0..=input.len() {
        let mut decoder = encoding.raw_decoder();
        let mut decoded = decoder.test_feed(&input[..split]);
        decoded.push_str(&decoder.test_feed(&input[split..]));
        assert!(
            decoded == whole,
            "split at {} should produce {:?}, but instead produced {:?}",
            split,
            whole,
            decoded
        );
    }
}

/// Checks that decoding under a repeating schedule of output capacities,
/// retaining unconsumed input on every `NeedMoreOutput`, produces the same
/// output as a single unconstrained call. The schedule may contain zeroes
/// but must contain at least one capacity large enough for a full burst.
pub fn check_capacity_schedule(encoding: &dyn Encoding, input: &[u8], schedule: &[usize]) {
    let whole = encoding.decode(input);
    let mut decoder = encoding.raw_decoder();
    let mut caps = schedule.iter().copied().cycle();
    let mut buf = [REPLACEMENT; 16];
    let mut decoded = String::new();
    let mut remaining = input;
    loop {
        let cap = caps.next().unwrap().min(buf.len());
        let (read, written, status) = decoder.convert(remaining, &mut buf[..cap]);
        decoded.extend(&buf[..written]);
        remaining = &remaining[read..];
        match status {
            DecodeStatus::Ok => break,
            DecodeStatus::NeedMoreOutput => {}
        }
    }
    assert!(
        decoded == whole,
        "schedule {:?} should produce {:?}, but instead produced {:?}",
        schedule,
        whole,
        decoded
    );
}
