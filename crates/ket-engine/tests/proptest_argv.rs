// SPDX-License-Identifier: Apache-2.0
//! Property-based tests for argument vector marshaling.
//!
//! Whatever the host passes, the C side must see `argc == len`, one buffer per
//! argument holding the exact bytes plus a single NUL, and a null pointer in
//! `argv[argc]`.

use std::ffi::CStr;

use ket_engine::ArgVector;
use proptest::prelude::*;

/// Arbitrary byte strings, biased towards NUL and other control bytes.
fn arb_arg() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(
        prop_oneof![
            3 => Just(0u8),
            3 => 1u8..=0x1f,
            10 => any::<u8>(),
        ],
        0..=24,
    )
}

proptest! {
    #[test]
    fn argc_matches_sequence_length(args in prop::collection::vec(arb_arg(), 0..=16)) {
        let argv = ArgVector::new(&args);
        prop_assert_eq!(usize::try_from(argv.argc()).unwrap(), args.len());
        prop_assert_eq!(argv.len(), args.len());
    }

    #[test]
    fn copies_are_exact_with_one_terminator(args in prop::collection::vec(arb_arg(), 0..=16)) {
        let argv = ArgVector::new(&args);
        for (i, original) in args.iter().enumerate() {
            let with_nul = argv.get_with_nul(i).unwrap();
            prop_assert_eq!(with_nul.len(), original.len() + 1);
            prop_assert_eq!(&with_nul[..original.len()], &original[..]);
            prop_assert_eq!(with_nul[original.len()], 0);
            prop_assert_eq!(argv.get(i).unwrap(), &original[..]);
        }
    }

    #[test]
    fn pointer_array_is_null_terminated(args in prop::collection::vec(arb_arg(), 0..=16)) {
        let mut argv = ArgVector::new(&args);
        let ptr = argv.as_mut_ptr();

        for (i, original) in args.iter().enumerate() {
            // SAFETY: slots 0..argc point at NUL-terminated buffers owned by argv.
            let seen = unsafe { CStr::from_ptr(*ptr.add(i)) }.to_bytes();
            let visible = original.split(|b| *b == 0).next().unwrap_or_default();
            prop_assert_eq!(seen, visible);
        }
        // SAFETY: slot argc always exists.
        let last_is_null = unsafe { (*ptr.add(args.len())).is_null() };
        prop_assert!(last_is_null);
    }
}
