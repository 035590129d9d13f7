//! Cognitive score estimation.
//!
//! The score is a bounded pseudo-metric over the most recent sample frame:
//! lower variance maps to a higher score, kept in the 40..=65 range, with a
//! small uniform jitter on top. It is not a physiological measurement.
use rand::Rng;
use crate::session::SessionError;

pub const SCORE_FLOOR: f64 = 40.0;
pub const SCORE_CEILING: f64 = 65.0;

/// Source of the final jitter offset, in `[-1.25, +1.25]`.
///
/// The jitter is the one intentionally non-deterministic step of the score;
/// injecting it lets tests pin the offset to zero.
pub trait ScoreJitter {
    fn offset(&mut self) -> f64;
}

/// No jitter at all; deterministic scoring for tests.
pub struct NoJitter;
impl ScoreJitter for NoJitter {
    fn offset(&mut self) -> f64 {
        0.0
    }
}

/// Uniform jitter drawn from an owned RNG.
pub struct RandomJitter<R: Rng>(pub R);
impl<R: Rng> ScoreJitter for RandomJitter<R> {
    fn offset(&mut self) -> f64 {
        (self.0.gen::<f64>() - 0.5) * 2.5
    }
}

/// Estimate the cognitive score from one sample frame.
///
/// Population variance over the frame, mapped through
/// `65 - clamp(variance / 7, 0, 25)`, clamped to `[40, 65]`, jittered,
/// and rounded to one decimal place.
pub fn estimate<J: ScoreJitter>(samples: &[f64], jitter: &mut J) -> Result<f64, SessionError> {
    if samples.is_empty() {
        return Err(SessionError::EmptyFrame);
    }
    let mean = samples.iter().sum::<f64>() / samples.len() as f64;
    let variance = samples
        .iter()
        .map(|v| {
            let delta = v - mean;
            delta * delta
        })
        .sum::<f64>()
        / samples.len() as f64;
    let mut raw = SCORE_CEILING - (variance / 7.0).clamp(0.0, 25.0);
    raw = raw.clamp(SCORE_FLOOR, SCORE_CEILING);
    raw += jitter.offset();
    Ok((raw * 10.0).round() / 10.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    #[test]
    fn empty_frame_is_rejected() {
        assert!(matches!(
            estimate(&[], &mut NoJitter),
            Err(SessionError::EmptyFrame)
        ));
    }
    #[test]
    fn known_variance_maps_to_known_score() {
        // [0, 2, -2, 0] has mean 0 and population variance 2.
        let score = estimate(&[0.0, 2.0, -2.0, 0.0], &mut NoJitter).unwrap();
        assert!((score - 64.7).abs() < 1e-9);
    }
    #[test]
    fn unjittered_score_stays_in_band() {
        let frames: [&[f64]; 4] = [
            &[0.0; 8],
            &[1.0, -1.0, 1.0, -1.0],
            &[100.0, -100.0, 100.0, -100.0],
            &[5.0, 4.0, 3.0, 2.0, 1.0],
        ];
        for frame in frames {
            let score = estimate(frame, &mut NoJitter).unwrap();
            assert!((SCORE_FLOOR..=SCORE_CEILING).contains(&score), "{score}");
        }
    }
    #[test]
    fn jittered_score_stays_within_jitter_band() {
        let frame: Vec<f64> = (0..64).map(|i| (i as f64 * 0.3).sin() * 20.0).collect();
        for seed in 0..200u64 {
            let mut jitter = RandomJitter(StdRng::seed_from_u64(seed));
            let score = estimate(&frame, &mut jitter).unwrap();
            assert!((38.75..=66.25).contains(&score), "seed {seed}: {score}");
        }
    }
    #[test]
    fn raw_score_never_increases_with_variance() {
        // Mean held at zero; widen the spread step by step.
        let mut prev = f64::MAX;
        for step in 1..40 {
            let spread = step as f64 * 0.5;
            let frame = [spread, -spread, spread, -spread];
            let score = estimate(&frame, &mut NoJitter).unwrap();
            assert!(score <= prev + 1e-9, "spread {spread}: {score} > {prev}");
            prev = score;
        }
    }
    #[test]
    fn high_variance_clamps_to_floor() {
        let frame = [1000.0, -1000.0, 1000.0, -1000.0];
        let score = estimate(&frame, &mut NoJitter).unwrap();
        assert!((score - SCORE_FLOOR).abs() < 1e-9);
    }
}
