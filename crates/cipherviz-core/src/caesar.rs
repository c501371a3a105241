//! Caesar cipher with a per-character trace.
//!
//! Only ASCII letters are shifted; every other character passes through
//! unchanged and still gets its own "skipped" record, so a trace always has
//! exactly `chars + 2` records (setup, one per character, final).

use crate::engine::{CipherOutput, Mode, TraceEngine};
use crate::step::{CaesarStep, StepDetail};
use crate::trace::TraceBuilder;

const ALPHABET_LEN: i64 = 26;

/// Shifts letters by a fixed offset, preserving case.
///
/// Shifts are taken modulo 26, so `-1` and `25` are the same key.
#[derive(Debug, Clone, Copy, Default)]
pub struct CaesarEngine;

impl CaesarEngine {
    pub fn new() -> Self {
        CaesarEngine
    }

    /// Reduces any shift into `0..26`.
    pub fn normalize_shift(shift: i64) -> u8 {
        shift.rem_euclid(ALPHABET_LEN) as u8
    }

    fn transform(&self, text: &str, shift: i64, mode: Mode) -> CipherOutput {
        let normalized = i32::from(Self::normalize_shift(shift));
        let effective = match mode {
            Mode::Encrypt => normalized,
            Mode::Decrypt => -normalized,
        };
        let chars: Vec<char> = text.chars().collect();

        let mut walk = CaesarWalk {
            input: text,
            effective,
            result: String::with_capacity(text.len()),
        };
        let mut builder = TraceBuilder::new();

        builder.push(
            "Setup",
            format!(
                "{} {} character(s) with shift {} ({} {} position(s))",
                verb(mode),
                chars.len(),
                shift,
                if effective < 0 { "left" } else { "right" },
                effective.abs(),
            ),
            walk.snapshot(-1, None),
        );

        for (index, &ch) in chars.iter().enumerate() {
            let cursor = index as i64;
            if !ch.is_ascii_alphabetic() {
                walk.result.push(ch);
                let mut detail = walk.snapshot(cursor, Some(ch));
                if let StepDetail::Caesar(step) = &mut detail {
                    step.output_char = Some(ch);
                    step.skipped_non_alphabetic = true;
                }
                builder.push(
                    format!("Skip {:?}", ch),
                    format!("{:?} is not a letter and passes through unchanged", ch),
                    detail,
                );
                continue;
            }

            let original = ch.to_ascii_uppercase() as u8 - b'A';
            let shifted = ((i32::from(original) + effective + 26) % 26) as u8;
            let base = if ch.is_ascii_uppercase() { b'A' } else { b'a' };
            let out = char::from(base + shifted);
            walk.result.push(out);

            let mut detail = walk.snapshot(cursor, Some(ch));
            if let StepDetail::Caesar(step) = &mut detail {
                step.original_alphabet_position = Some(original);
                step.new_alphabet_position = Some(shifted);
                step.output_char = Some(out);
            }
            builder.push(
                format!("Shift {:?}", ch),
                format!(
                    "{:?} is letter {} of the alphabet; moving {} gives letter {}, {:?}",
                    ch, original, effective, shifted, out
                ),
                detail,
            );
        }

        let trace = builder.finish(
            "Complete",
            format!("Every character processed; result {:?}", walk.result),
            walk.snapshot(chars.len() as i64, None),
        );

        tracing::debug!(
            engine = "caesar",
            %mode,
            shift,
            chars = chars.len(),
            records = trace.len(),
            "transform complete"
        );

        CipherOutput {
            text: walk.result,
            trace,
        }
    }
}

impl TraceEngine for CaesarEngine {
    fn name(&self) -> &'static str {
        "caesar"
    }

    fn encrypt(&self, text: &str, shift: i64) -> CipherOutput {
        self.transform(text, shift, Mode::Encrypt)
    }

    fn decrypt(&self, text: &str, shift: i64) -> CipherOutput {
        self.transform(text, shift, Mode::Decrypt)
    }
}

/// Running state shared by every record of one Caesar transform.
struct CaesarWalk<'a> {
    input: &'a str,
    effective: i32,
    result: String,
}

impl CaesarWalk<'_> {
    fn snapshot(&self, cursor_index: i64, current_char: Option<char>) -> StepDetail {
        StepDetail::Caesar(CaesarStep {
            input_text: self.input.to_string(),
            cursor_index,
            current_char,
            shift_amount: self.effective,
            original_alphabet_position: None,
            new_alphabet_position: None,
            output_char: None,
            result_so_far: self.result.clone(),
            skipped_non_alphabetic: false,
        })
    }
}

fn verb(mode: Mode) -> &'static str {
    match mode {
        Mode::Encrypt => "Encrypting",
        Mode::Decrypt => "Decrypting",
    }
}
