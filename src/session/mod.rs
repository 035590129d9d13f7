// src/session/mod.rs
pub mod clock;
pub mod driver;
pub mod error;
pub mod plot;
pub mod score;
pub mod synth;
pub use clock::{TickTimer, FAST_TICK, SLOW_TICK};
pub use driver::{FrameSink, SessionDriver, SessionPhase};
pub use error::SessionError;
pub use plot::{render_band_png, render_frame_png, PlotStyle};
pub use score::{estimate, NoJitter, RandomJitter, ScoreJitter};
pub use synth::{band_wave, wave, Band, DEFAULT_SAMPLE_COUNT};
