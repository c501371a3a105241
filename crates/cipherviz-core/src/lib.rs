pub mod caesar;
pub mod config;
pub mod engine;
pub mod error;
pub mod id;
pub mod playback;
pub mod rail_fence;
pub mod step;
pub mod trace;
pub mod zigzag;

// Re-export commonly used types
pub use caesar::CaesarEngine;
pub use config::RailFenceConfig;
pub use engine::{CipherOutput, Mode, TraceEngine};
pub use error::{CipherError, TraceError};
pub use id::StepId;
pub use playback::Playback;
pub use rail_fence::RailFenceEngine;
pub use step::{
    CaesarStep, Cell, Direction, Grid, Phase, RailFenceStep, ReadPosition, StepDetail, StepRecord,
};
pub use trace::StepTrace;
