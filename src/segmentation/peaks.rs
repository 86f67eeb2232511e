//! Peak detection with a priority-ordered suppression radius.
//!
//! Candidate local maxima are gated by an RMS-derived threshold, then
//! processed in descending value order; each survivor suppresses every
//! remaining candidate closer than the minimum separation on either side.
//!
//! ## Mathematical Foundation
//!
//! The detection threshold is derived from the whole signal. With the mean
//! removed,
//!
//! ```text
//! threshold = sqrt(mean((x - mean(x))^2)) * K
//! ```
//!
//! where `K` is the RMS threshold multiplier. A candidate at index `i` must
//! satisfy `x[i] >= x[i-1]`, `x[i] > x[i+1]` and `x[i] > threshold` on the
//! mean-removed signal, so a plateau contributes only its final sample.
//! Suppression then enforces the minimum separation: candidates exactly
//! `distance` apart both survive.

use ndarray::Array1;
use tracing::debug;

/// Finds peaks in a combined signal, enforcing a minimum separation.
///
/// Returns the surviving peak indices in ascending order. When two
/// candidates inside one another's suppression radius have equal values, the
/// rightmost one wins.
///
/// A `distance` of zero disables suppression entirely.
///
/// # Examples
///
/// ```rust
/// use ndarray::array;
/// use sensor_segments::find_peaks;
///
/// let data = array![0.0, 0.0, 10.0, 0.0, 0.0, 0.0, 9.0, 0.0, 0.0];
/// assert_eq!(find_peaks(&data, 3, 1.2), vec![2, 6]);
///
/// // The weaker peak falls inside the stronger one's radius.
/// assert_eq!(find_peaks(&data, 5, 1.2), vec![2]);
/// ```
pub fn find_peaks(data: &Array1<f64>, distance: usize, rms_multiplier: f64) -> Vec<usize> {
    if data.len() < 3 {
        return Vec::new();
    }

    // Candidate detection and the threshold both run on the mean-removed
    // signal.
    let mean = data.mean().unwrap_or(0.0);
    let shifted = data.mapv(|v| v - mean);
    let mean_square = shifted.mapv(|v| v * v).mean().unwrap_or(0.0);
    let threshold = mean_square.sqrt() * rms_multiplier;

    let mut candidates: Vec<usize> = Vec::new();
    for ix in 1..shifted.len() - 1 {
        let value = shifted[ix];
        if value >= shifted[ix - 1] && value > shifted[ix + 1] && value > threshold {
            candidates.push(ix);
        }
    }

    // Stable ascending argsort by value; walking it in reverse visits the
    // strongest candidate first and breaks ties toward the rightmost index.
    let mut order: Vec<usize> = (0..candidates.len()).collect();
    order.sort_by(|&a, &b| {
        shifted[candidates[a]]
            .partial_cmp(&shifted[candidates[b]])
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut keep = vec![true; candidates.len()];
    for &winner in order.iter().rev() {
        if !keep[winner] {
            continue;
        }
        let mut left = winner;
        while left > 0 && candidates[winner] - candidates[left - 1] < distance {
            keep[left - 1] = false;
            left -= 1;
        }
        let mut right = winner + 1;
        while right < candidates.len() && candidates[right] - candidates[winner] < distance {
            keep[right] = false;
            right += 1;
        }
    }

    let survivors: Vec<usize> = candidates
        .iter()
        .zip(keep.iter())
        .filter_map(|(&ix, &kept)| kept.then_some(ix))
        .collect();

    debug!(
        candidates = candidates.len(),
        survivors = survivors.len(),
        distance,
        "peak suppression complete"
    );

    survivors
}
