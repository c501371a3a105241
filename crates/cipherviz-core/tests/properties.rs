//! Property tests for the cipher engines.

use proptest::prelude::*;

use cipherviz_core::{CaesarEngine, RailFenceEngine, StepDetail, TraceEngine};

proptest! {
    #[test]
    fn caesar_roundtrip_on_letters(s in "[A-Za-z]{0,64}", k in 0i64..26) {
        let cipher = CaesarEngine.encrypt(&s, k);
        let plain = CaesarEngine.decrypt(&cipher.text, k);
        prop_assert_eq!(plain.text, s);
    }

    #[test]
    fn caesar_roundtrip_any_shift_any_text(s in any::<String>(), k in any::<i64>()) {
        let cipher = CaesarEngine.encrypt(&s, k);
        prop_assert_eq!(CaesarEngine.decrypt(&cipher.text, k).text, s);
    }

    #[test]
    fn caesar_preserves_case_and_non_letters(s in "\\PC{0,48}", k in -100i64..100) {
        let out = CaesarEngine.encrypt(&s, k);
        prop_assert_eq!(out.text.chars().count(), s.chars().count());
        for (input, output) in s.chars().zip(out.text.chars()) {
            if input.is_ascii_alphabetic() {
                prop_assert!(output.is_ascii_alphabetic());
                prop_assert_eq!(input.is_ascii_uppercase(), output.is_ascii_uppercase());
            } else {
                prop_assert_eq!(input, output);
            }
        }
    }

    #[test]
    fn caesar_trace_length_is_chars_plus_two(s in "\\PC{0,48}", k in any::<i64>()) {
        let out = CaesarEngine.encrypt(&s, k);
        prop_assert_eq!(out.trace.len(), s.chars().count() + 2);
        prop_assert!(out.trace.validate().is_ok());
        prop_assert_eq!(out.trace.final_result(), Some(out.text.as_str()));
    }

    #[test]
    fn rail_fence_roundtrip(s in "\\PC{0,80}", rails in 2i64..12) {
        let engine = RailFenceEngine::default();
        let cipher = engine.encrypt(&s, rails);
        prop_assert_eq!(cipher.text.chars().count(), s.chars().count());
        let plain = engine.decrypt(&cipher.text, rails);
        prop_assert_eq!(plain.text, s);
    }

    #[test]
    fn rail_fence_traces_are_well_formed(s in "[a-z ]{0,40}", rails in 2i64..8) {
        let engine = RailFenceEngine::default();
        for out in [engine.encrypt(&s, rails), engine.decrypt(&s, rails)] {
            prop_assert!(out.trace.validate().is_ok());
            prop_assert_eq!(out.trace.final_result(), Some(out.text.as_str()));
            for record in &out.trace {
                if let StepDetail::RailFence(step) = &record.detail {
                    prop_assert_eq!(step.grid_snapshot.rows() as i64, rails);
                    prop_assert_eq!(step.grid_snapshot.cols(), s.chars().count());
                }
            }
        }
    }

    #[test]
    fn rail_fence_rejects_fewer_than_two_rails(s in "\\PC{0,20}", rails in -5i64..2) {
        let engine = RailFenceEngine::default();
        let out = engine.encrypt(&s, rails);
        prop_assert_eq!(&out.text, &s);
        prop_assert!(out.trace.is_error());
        prop_assert_eq!(out.trace.len(), 1);
    }
}
