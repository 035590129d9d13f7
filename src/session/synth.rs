//! Synthetic EEG-style waveform generation.
//!
//! Two flavours share one sample grid (`x = i / sample_count`):
//! - `wave`: the single-band live signal shown during a session, three sine
//!   components plus micro-detail and a fixed sine-pair noise term.
//! - `band_wave`: the alpha/beta/gamma display variants, each driven by a
//!   named parameter set over `theta = 2*pi*x + t`.
//!
//! Both are deterministic: the apparent randomness is a pure function of
//! `(sample_count, time)`, so identical inputs reproduce bit-for-bit. The
//! noise constants are an opaque transfer function; the golden test below
//! pins them.
use std::f64::consts::PI;
use crate::session::SessionError;

/// Frame length used by the live session display.
pub const DEFAULT_SAMPLE_COUNT: usize = 250;

/// Generate one frame of the single-band session signal.
///
/// `time_secs` is wall-clock seconds with sub-second precision; consecutive
/// calls with increasing time yield a continuously flowing waveform.
pub fn wave(sample_count: usize, time_secs: f64) -> Result<Vec<f64>, SessionError> {
    if sample_count == 0 {
        return Err(SessionError::InvalidSampleCount);
    }
    let t = time_secs;
    let mut frame = Vec::with_capacity(sample_count);
    for i in 0..sample_count {
        let x = i as f64 / sample_count as f64;
        let base = (x * PI * 4.0 + t).sin() * 15.0
            + (x * PI * 6.0 + t * 1.1).sin() * 10.0
            + (x * PI * 8.0 + t * 1.2).sin() * 5.0;
        let micro = (x * 50.0 + t * 2.0).sin() * 2.0 + (x * 30.0 + t * 1.5).sin() * 1.5;
        let noise = ((x * 100.0 + t * 3.0).sin() + (x * 80.0 + t * 2.5).sin()) * 0.5;
        frame.push(base + micro + noise);
    }
    Ok(frame)
}

/// One named oscillatory band of the three-band display.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Band {
    Alpha,
    Beta,
    Gamma,
}
impl Band {
    pub const ALL: [Band; 3] = [Band::Alpha, Band::Beta, Band::Gamma];
    pub fn label(self) -> &'static str {
        match self {
            Band::Alpha => "alpha",
            Band::Beta => "beta",
            Band::Gamma => "gamma",
        }
    }
    fn profile(self) -> &'static BandProfile {
        match self {
            Band::Alpha => &ALPHA,
            Band::Beta => &BETA,
            Band::Gamma => &GAMMA,
        }
    }
}

/// Frequency/amplitude composition of one band.
#[derive(Clone, Copy, Debug)]
struct BandProfile {
    base_freq: f64,
    micro_freqs: [f64; 4],
    base_amp: f64,
    micro_amps: [f64; 4],
    noise_scale: f64,
}
const ALPHA: BandProfile = BandProfile {
    base_freq: 0.4,
    micro_freqs: [0.8, 1.2, 1.7, 2.1],
    base_amp: 35.0,
    micro_amps: [0.4, 0.3, 0.2, 0.15],
    noise_scale: 0.8,
};
const BETA: BandProfile = BandProfile {
    base_freq: 0.6,
    micro_freqs: [1.1, 1.5, 2.0, 2.4],
    base_amp: 28.0,
    micro_amps: [0.35, 0.25, 0.2, 0.15],
    noise_scale: 0.6,
};
const GAMMA: BandProfile = BandProfile {
    base_freq: 0.8,
    micro_freqs: [1.4, 1.8, 2.3, 2.7],
    base_amp: 22.0,
    micro_amps: [0.3, 0.2, 0.15, 0.1],
    noise_scale: 0.4,
};

/// Generate one frame of a named band for the three-band display.
pub fn band_wave(band: Band, sample_count: usize, time_secs: f64) -> Result<Vec<f64>, SessionError> {
    if sample_count == 0 {
        return Err(SessionError::InvalidSampleCount);
    }
    let p = band.profile();
    let mut frame = Vec::with_capacity(sample_count);
    for i in 0..sample_count {
        let x = i as f64 / sample_count as f64;
        let theta = x * PI * 2.0 + time_secs;
        let mut value = (theta * p.base_freq).sin() * p.base_amp;
        for (k, &freq) in p.micro_freqs.iter().enumerate() {
            // Per-component phase wobble keeps the micro detail from locking
            // onto the base wave.
            let micro_t = theta + (x * PI * (k as f64 + 1.0)).sin() * 0.2;
            let amp = p.base_amp * p.micro_amps[k];
            value += (micro_t * freq).sin() * amp;
            value += (micro_t * freq * 1.1 + theta.cos()).sin() * amp * 0.5;
        }
        value += ((theta * 50.0 + x * 100.0).sin() + (theta * 30.0 + x * 80.0).sin()) * p.noise_scale;
        frame.push(value);
    }
    Ok(frame)
}

#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn frame_has_requested_length_and_is_finite() {
        for &n in &[1usize, 4, 250, 1000] {
            let frame = wave(n, 3.7).unwrap();
            assert_eq!(frame.len(), n);
            assert!(frame.iter().all(|v| v.is_finite()));
        }
        for band in Band::ALL {
            let frame = band_wave(band, 250, 12.25).unwrap();
            assert_eq!(frame.len(), 250);
            assert!(frame.iter().all(|v| v.is_finite()));
        }
    }
    #[test]
    fn identical_inputs_reproduce_identically() {
        let a = wave(250, 10.0).unwrap();
        let b = wave(250, 10.0).unwrap();
        assert_eq!(a, b);
        let a = band_wave(Band::Beta, 250, 10.0).unwrap();
        let b = band_wave(Band::Beta, 250, 10.0).unwrap();
        assert_eq!(a, b);
    }
    #[test]
    fn zero_sample_count_is_rejected() {
        assert!(matches!(wave(0, 1.0), Err(SessionError::InvalidSampleCount)));
        assert!(matches!(
            band_wave(Band::Gamma, 0, 1.0),
            Err(SessionError::InvalidSampleCount)
        ));
    }
    #[test]
    fn golden_values_at_t_zero() {
        // Closed-form evaluation of the four x positions at t = 0.
        let expected = [
            0.0,
            -8.335347079225365,
            0.9520974134278368,
            8.527344503780489,
        ];
        let frame = wave(4, 0.0).unwrap();
        for (got, want) in frame.iter().zip(expected.iter()) {
            assert!((got - want).abs() < 1e-9, "got {got}, want {want}");
        }
    }
}
