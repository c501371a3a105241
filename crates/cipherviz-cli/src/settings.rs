//! Environment-driven settings for the CLI.
//!
//! - `CIPHERVIZ_FRAME_MS`: delay between animation frames (default: 400)
//! - `CIPHERVIZ_LOG`: tracing filter directive (default: "warn")

use std::time::Duration;

pub const FRAME_MS_ENV: &str = "CIPHERVIZ_FRAME_MS";
pub const LOG_ENV: &str = "CIPHERVIZ_LOG";

const DEFAULT_FRAME_MS: u64 = 400;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
    pub frame_delay: Duration,
}

impl Settings {
    pub fn from_env() -> Self {
        let raw = std::env::var(FRAME_MS_ENV).ok();
        Settings {
            frame_delay: parse_frame_ms(raw.as_deref()),
        }
    }

    /// A `--frame-ms` flag wins over the environment.
    pub fn with_frame_ms(self, frame_ms: Option<u64>) -> Self {
        match frame_ms {
            Some(ms) => Settings {
                frame_delay: Duration::from_millis(ms),
            },
            None => self,
        }
    }
}

fn parse_frame_ms(raw: Option<&str>) -> Duration {
    let ms = match raw.map(str::trim) {
        None | Some("") => DEFAULT_FRAME_MS,
        Some(value) => value.parse().unwrap_or_else(|_| {
            tracing::warn!(
                "ignoring {}={:?}: expected milliseconds, using {}",
                FRAME_MS_ENV,
                value,
                DEFAULT_FRAME_MS
            );
            DEFAULT_FRAME_MS
        }),
    };
    Duration::from_millis(ms)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_ms_defaults_when_unset_or_garbage() {
        assert_eq!(parse_frame_ms(None), Duration::from_millis(400));
        assert_eq!(parse_frame_ms(Some("  ")), Duration::from_millis(400));
        assert_eq!(parse_frame_ms(Some("fast")), Duration::from_millis(400));
    }

    #[test]
    fn frame_ms_parses_value() {
        assert_eq!(parse_frame_ms(Some(" 125 ")), Duration::from_millis(125));
    }

    #[test]
    fn flag_overrides_environment() {
        let settings = Settings {
            frame_delay: Duration::from_millis(400),
        };
        assert_eq!(
            settings.with_frame_ms(Some(0)).frame_delay,
            Duration::from_millis(0)
        );
        assert_eq!(settings.with_frame_ms(None), settings);
    }
}
