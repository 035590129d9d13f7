//! Session lifecycle state machine.
//!
//! The driver owns the transient state of one session screen: phase,
//! elapsed seconds, the latest synthesized frame, and the final score.
//! It is purely reactive: some outer loop delivers `tick_fast` /
//! `tick_slow` on the two cadences and the user commands in between.
//! The driver checks its own phase before acting on a tick, so a tick
//! that arrives after pause or end is a no-op by construction.
use crate::session::score::{self, ScoreJitter};
use crate::session::synth;
use crate::session::SessionError;

/// Renderer collaborator: receives each fresh frame, read-only.
pub trait FrameSink {
    fn present(&mut self, frame: &[f64]);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionPhase {
    Idle,
    Running,
    Paused,
    Ended,
}

pub struct SessionDriver<S: FrameSink> {
    phase: SessionPhase,
    sample_count: usize,
    elapsed_seconds: u64,
    latest_frame: Vec<f64>,
    score: Option<f64>,
    sink: S,
}

impl<S: FrameSink> SessionDriver<S> {
    pub fn new(sample_count: usize, sink: S) -> Result<Self, SessionError> {
        if sample_count == 0 {
            return Err(SessionError::InvalidSampleCount);
        }
        Ok(Self {
            phase: SessionPhase::Idle,
            sample_count,
            elapsed_seconds: 0,
            latest_frame: Vec::new(),
            score: None,
            sink,
        })
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }
    pub fn elapsed_seconds(&self) -> u64 {
        self.elapsed_seconds
    }
    pub fn latest_frame(&self) -> &[f64] {
        &self.latest_frame
    }
    pub fn score(&self) -> Option<f64> {
        self.score
    }

    /// Begin a session from Idle. A first frame is synthesized right away
    /// so the display never shows an empty trace. No-op in any other phase.
    pub fn start(&mut self, now_secs: f64) -> Result<(), SessionError> {
        if self.phase != SessionPhase::Idle {
            return Ok(());
        }
        self.begin(now_secs)
    }

    /// Restart from any phase: elapsed back to zero, score cleared,
    /// fresh initial frame.
    pub fn restart(&mut self, now_secs: f64) -> Result<(), SessionError> {
        self.begin(now_secs)
    }

    fn begin(&mut self, now_secs: f64) -> Result<(), SessionError> {
        self.elapsed_seconds = 0;
        self.score = None;
        self.phase = SessionPhase::Running;
        self.refresh_frame(now_secs)
    }

    /// Fast cadence: regenerate the frame and hand it to the sink.
    pub fn tick_fast(&mut self, now_secs: f64) -> Result<(), SessionError> {
        if self.phase != SessionPhase::Running {
            return Ok(());
        }
        self.refresh_frame(now_secs)
    }

    /// Slow cadence: advance the elapsed-seconds counter.
    pub fn tick_slow(&mut self) {
        if self.phase == SessionPhase::Running {
            self.elapsed_seconds += 1;
        }
    }

    /// Idempotent: pausing while already paused (or before start) is a no-op.
    pub fn pause(&mut self) {
        if self.phase == SessionPhase::Running {
            self.phase = SessionPhase::Paused;
        }
    }

    /// Idempotent: resuming while running is a no-op.
    pub fn resume(&mut self) {
        if self.phase == SessionPhase::Paused {
            self.phase = SessionPhase::Running;
        }
    }

    /// The single pause/resume user command.
    pub fn toggle_pause(&mut self) {
        match self.phase {
            SessionPhase::Running => self.pause(),
            SessionPhase::Paused => self.resume(),
            SessionPhase::Idle | SessionPhase::Ended => {}
        }
    }

    /// End the session and score the latest frame.
    ///
    /// Ending an already-ended session returns the stored score without
    /// recomputing. Ending before any frame exists fails: there is nothing
    /// to score.
    pub fn end<J: ScoreJitter>(&mut self, jitter: &mut J) -> Result<f64, SessionError> {
        match self.phase {
            SessionPhase::Ended => self.score.ok_or(SessionError::EmptyFrame),
            SessionPhase::Idle => Err(SessionError::EmptyFrame),
            SessionPhase::Running | SessionPhase::Paused => {
                let score = score::estimate(&self.latest_frame, jitter)?;
                self.score = Some(score);
                self.phase = SessionPhase::Ended;
                Ok(score)
            }
        }
    }

    fn refresh_frame(&mut self, now_secs: f64) -> Result<(), SessionError> {
        let frame = synth::wave(self.sample_count, now_secs)?;
        self.sink.present(&frame);
        self.latest_frame = frame;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::score::NoJitter;

    /// Records every presented frame.
    struct CollectSink(Vec<Vec<f64>>);
    impl FrameSink for CollectSink {
        fn present(&mut self, frame: &[f64]) {
            self.0.push(frame.to_vec());
        }
    }

    /// Counts how many times the jitter source was consulted.
    struct CountingJitter {
        calls: usize,
    }
    impl ScoreJitter for CountingJitter {
        fn offset(&mut self) -> f64 {
            self.calls += 1;
            0.0
        }
    }

    fn driver() -> SessionDriver<CollectSink> {
        SessionDriver::new(16, CollectSink(Vec::new())).unwrap()
    }

    #[test]
    fn zero_sample_count_is_rejected() {
        assert!(matches!(
            SessionDriver::new(0, CollectSink(Vec::new())),
            Err(SessionError::InvalidSampleCount)
        ));
    }

    #[test]
    fn start_seeds_an_initial_frame() {
        let mut d = driver();
        assert_eq!(d.phase(), SessionPhase::Idle);
        assert!(d.latest_frame().is_empty());
        d.start(0.0).unwrap();
        assert_eq!(d.phase(), SessionPhase::Running);
        assert_eq!(d.latest_frame().len(), 16);
        assert_eq!(d.sink.0.len(), 1);
    }

    #[test]
    fn elapsed_only_advances_while_running() {
        let mut d = driver();
        d.start(0.0).unwrap();
        for _ in 0..5 {
            d.tick_slow();
        }
        assert_eq!(d.elapsed_seconds(), 5);
        d.pause();
        for _ in 0..5 {
            d.tick_slow();
        }
        assert_eq!(d.elapsed_seconds(), 5);
        d.resume();
        d.tick_slow();
        assert_eq!(d.elapsed_seconds(), 6);
    }

    #[test]
    fn fast_ticks_are_ignored_while_paused() {
        let mut d = driver();
        d.start(0.0).unwrap();
        let seeded = d.latest_frame().to_vec();
        d.pause();
        d.tick_fast(1.0).unwrap();
        assert_eq!(d.latest_frame(), seeded.as_slice());
        assert_eq!(d.sink.0.len(), 1);
        d.resume();
        d.tick_fast(1.0).unwrap();
        assert_ne!(d.latest_frame(), seeded.as_slice());
        assert_eq!(d.sink.0.len(), 2);
    }

    #[test]
    fn pause_and_resume_are_idempotent() {
        let mut d = driver();
        d.start(0.0).unwrap();
        d.resume();
        assert_eq!(d.phase(), SessionPhase::Running);
        d.pause();
        d.pause();
        assert_eq!(d.phase(), SessionPhase::Paused);
        d.toggle_pause();
        assert_eq!(d.phase(), SessionPhase::Running);
        d.toggle_pause();
        assert_eq!(d.phase(), SessionPhase::Paused);
    }

    #[test]
    fn full_lifecycle_scores_exactly_once() {
        let mut d = driver();
        let mut jitter = CountingJitter { calls: 0 };
        d.start(0.0).unwrap();
        d.pause();
        d.resume();
        let first = d.end(&mut jitter).unwrap();
        assert_eq!(d.phase(), SessionPhase::Ended);
        assert_eq!(jitter.calls, 1);
        let second = d.end(&mut jitter).unwrap();
        assert_eq!(jitter.calls, 1);
        assert_eq!(first, second);
        assert_eq!(d.score(), Some(first));
    }

    #[test]
    fn end_before_start_fails() {
        let mut d = driver();
        assert!(matches!(d.end(&mut NoJitter), Err(SessionError::EmptyFrame)));
    }

    #[test]
    fn restart_resets_elapsed_and_score() {
        let mut d = driver();
        d.start(0.0).unwrap();
        for _ in 0..3 {
            d.tick_slow();
        }
        d.end(&mut NoJitter).unwrap();
        assert!(d.score().is_some());
        d.restart(2.0).unwrap();
        assert_eq!(d.phase(), SessionPhase::Running);
        assert_eq!(d.elapsed_seconds(), 0);
        assert_eq!(d.score(), None);
    }
}
