//! The [`TraceEngine`] trait shared by both ciphers.
//!
//! Every engine call is pure: the same text, key and mode always produce the
//! same [`CipherOutput`]. Callers that only care about one cipher can use the
//! engine types directly; the trait lets a shell dispatch on a name.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TraceError;
use crate::trace::StepTrace;

/// Transform direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Mode {
    Encrypt,
    Decrypt,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Encrypt => write!(f, "encrypt"),
            Mode::Decrypt => write!(f, "decrypt"),
        }
    }
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "encrypt" | "enc" | "e" => Ok(Mode::Encrypt),
            "decrypt" | "dec" | "d" => Ok(Mode::Decrypt),
            _ => Err(format!("invalid mode '{}', expected encrypt/decrypt", s)),
        }
    }
}

/// The final text of a transform together with its step trace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CipherOutput {
    pub text: String,
    pub trace: StepTrace,
}

impl CipherOutput {
    pub fn into_parts(self) -> (String, StepTrace) {
        (self.text, self.trace)
    }

    /// Validates the trace and checks that `text` is what it ends on.
    pub fn validate(&self) -> Result<(), TraceError> {
        self.trace.validate()?;
        match self.trace.final_result() {
            Some(result) if result == self.text => Ok(()),
            result => Err(TraceError::OutputMismatch {
                text: self.text.clone(),
                result: result.unwrap_or_default().to_string(),
            }),
        }
    }
}

/// A cipher that records a replayable trace of its work.
///
/// `key` is the Caesar shift or the rail fence rail count.
pub trait TraceEngine {
    /// Short machine-friendly name, e.g. `"caesar"`.
    fn name(&self) -> &'static str;

    fn encrypt(&self, text: &str, key: i64) -> CipherOutput;

    fn decrypt(&self, text: &str, key: i64) -> CipherOutput;

    fn run(&self, mode: Mode, text: &str, key: i64) -> CipherOutput {
        match mode {
            Mode::Encrypt => self.encrypt(text, key),
            Mode::Decrypt => self.decrypt(text, key),
        }
    }
}
