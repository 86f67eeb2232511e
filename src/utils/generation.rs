//! Synthetic signal generation utilities.
//!
//! This module provides functions for generating simple test signals for
//! exercising the segmentation pipeline: silence, isolated impulses, and
//! uniform noise.

use ndarray::Array1;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Generates a flat all-zero signal of `len` samples.
pub fn silence(len: usize) -> Array1<f64> {
    Array1::zeros(len)
}

/// Generates a signal that is silent except for a single impulse of the
/// given amplitude at index `at`.
///
/// An out-of-bounds `at` yields plain silence.
pub fn impulse(len: usize, at: usize, amplitude: f64) -> Array1<f64> {
    let mut signal = Array1::zeros(len);
    if at < len {
        signal[at] = amplitude;
    }
    signal
}

/// Generates uniform noise in `[-amplitude, amplitude)`.
///
/// Pass a seed for reproducible output; `None` draws from the thread RNG.
pub fn noise(len: usize, amplitude: f64, seed: Option<u64>) -> Array1<f64> {
    match seed {
        Some(seed) => {
            let mut rng = StdRng::seed_from_u64(seed);
            noise_from_rng(len, amplitude, &mut rng)
        }
        None => noise_from_rng(len, amplitude, &mut rand::rng()),
    }
}

fn noise_from_rng<R: Rng + ?Sized>(len: usize, amplitude: f64, rng: &mut R) -> Array1<f64> {
    let mut signal = Array1::zeros(len);
    for value in signal.iter_mut() {
        *value = (rng.random::<f64>() - 0.5) * 2.0 * amplitude;
    }
    signal
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_silence_is_all_zeros() {
        let signal = silence(100);
        assert_eq!(signal.len(), 100);
        assert!(signal.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_impulse_places_a_single_value() {
        let signal = impulse(100, 40, 25.0);
        assert_eq!(signal[40], 25.0);
        assert_eq!(signal.iter().filter(|&&v| v != 0.0).count(), 1);
    }

    #[test]
    fn test_out_of_bounds_impulse_is_silence() {
        let signal = impulse(100, 100, 25.0);
        assert!(signal.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_noise_stays_within_amplitude() {
        let signal = noise(1000, 0.5, Some(3));
        assert_eq!(signal.len(), 1000);
        assert!(signal.iter().all(|&v| v >= -0.5 && v < 0.5));
        assert!(signal.iter().any(|&v| v != 0.0));
    }

    #[test]
    fn test_seeded_noise_is_reproducible() {
        let first = noise(200, 1.0, Some(11));
        let second = noise(200, 1.0, Some(11));
        assert_eq!(first, second);

        let different = noise(200, 1.0, Some(12));
        assert_ne!(first, different);
    }
}
