//! Segment extraction around detected peaks.
//!
//! Each detected peak is refined to a fixed-length segment in four steps:
//!
//! 1. Partition the neighborhood of the peak (one minimum segment distance
//!    to each side) into non-overlapping 20 ms energy frames.
//! 2. Keep frames whose energy exceeds the mean frame energy times the
//!    configured multiplier, merge survivors separated by less than 200 ms,
//!    and take the most energetic merged window.
//! 3. Center a window-length segment on that window (or blend the window
//!    midpoint with the peak position, per [`SegmentCentering`]), optionally
//!    shifting it randomly within its slack.
//! 4. Clamp the segment into the signal without changing its length.
//!
//! Refined segments are then walked in position order to resolve conflicts
//! (see [`OverlapPolicy`]), measured against the optional energy floor, and
//! returned sorted by start index.

use ndarray::{Array1, s};
use rand::Rng;
use tracing::{debug, trace};

use super::peaks::find_peaks;
use super::types::{
    ENERGY_FRAME_SECS, OverlapPolicy, SHIFT_MARGIN_SECS, Segment, SegmentCentering,
    SegmenterConfig, WINDOW_MERGE_GAP_SECS,
};
use crate::repr::CapturedSignal;
use crate::{RealFloat, SegmentationError, SegmentationResult};

/// A merged run of energetic frames around one peak.
#[derive(Debug, Clone, Copy)]
struct EnergyWindow {
    start: usize,
    end: usize,
    energy: f64,
}

impl<F: RealFloat> CapturedSignal<F> {
    /// Finds fixed-length segments around the activity peaks in this signal.
    ///
    /// Every returned segment is exactly
    /// [`samples_per_window`](SegmenterConfig::samples_per_window) samples
    /// long, lies fully inside the signal, and overlaps its neighbors by at
    /// most the configured fraction. Segments are returned sorted by start
    /// index.
    ///
    /// When [`shift_segments`](SegmenterConfig::shift_segments) is enabled
    /// the thread RNG drives the shifts; use
    /// [`find_segments_with_rng`](Self::find_segments_with_rng) for
    /// reproducible output.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ndarray::Array1;
    /// use sensor_segments::{CapturedSignal, SegmenterConfig};
    ///
    /// let mut samples = vec![0.0f64; 1000];
    /// samples[500] = 50.0;
    /// let signal = CapturedSignal::mono(Array1::from_vec(samples), 100.0).unwrap();
    ///
    /// let segments = signal.find_segments(&SegmenterConfig::new(100)).unwrap();
    /// assert_eq!(segments.len(), 1);
    /// assert_eq!((segments[0].start, segments[0].end), (450, 550));
    /// ```
    ///
    /// # Errors
    /// Returns [`SegmentationError::InvalidParameter`] if the configuration
    /// fails validation, or [`SegmentationError::DimensionMismatch`] if the
    /// signal is shorter than one window.
    pub fn find_segments(&self, config: &SegmenterConfig) -> SegmentationResult<Vec<Segment>> {
        self.find_segments_with_rng(config, &mut rand::rng())
    }

    /// Finds fixed-length segments using the given RNG for random shifting.
    ///
    /// Behaves exactly like [`find_segments`](Self::find_segments); the RNG
    /// is only consulted when
    /// [`shift_segments`](SegmenterConfig::shift_segments) is enabled.
    ///
    /// # Errors
    /// Returns [`SegmentationError::InvalidParameter`] if the configuration
    /// fails validation, or [`SegmentationError::DimensionMismatch`] if the
    /// signal is shorter than one window.
    pub fn find_segments_with_rng<R: Rng + ?Sized>(
        &self,
        config: &SegmenterConfig,
        rng: &mut R,
    ) -> SegmentationResult<Vec<Segment>> {
        config.validate().map_err(|e| {
            SegmentationError::InvalidParameter(format!("Invalid segmenter config: {}", e))
        })?;

        let len = self.len();
        if len < config.samples_per_window {
            return Err(SegmentationError::DimensionMismatch(format!(
                "signal of length {} is shorter than the {}-sample window",
                len, config.samples_per_window
            )));
        }

        let combined = self.combined();
        let min_distance = config.min_segment_distance();
        let peaks = find_peaks(&combined, min_distance, config.rms_threshold_multiplier);
        debug!(
            peaks = peaks.len(),
            min_distance,
            "refining segments around detected peaks"
        );

        // Each candidate keeps its originating peak so overlap resolution
        // can compare peak strengths.
        let mut candidates: Vec<(Segment, usize)> = Vec::with_capacity(peaks.len());
        for &peak in &peaks {
            let segment =
                refine_segment(&combined, peak, min_distance, config, self.frequency(), rng);
            candidates.push((segment, peak));
        }
        candidates.sort_by_key(|(segment, _)| segment.start);

        let max_overlap = config.max_overlap_fraction * config.samples_per_window as f64;
        let mut accepted: Vec<(Segment, usize)> = Vec::with_capacity(candidates.len());
        for (segment, peak) in candidates {
            if let Some(&(last, last_peak)) = accepted.last() {
                let gap = segment.start as f64 - last.end as f64;
                if gap < -max_overlap {
                    match config.overlap_policy {
                        OverlapPolicy::DropLater => {
                            trace!(?segment, "dropping over-overlapping segment");
                            continue;
                        }
                        OverlapPolicy::KeepStrongerPeak => {
                            if combined[peak] > combined[last_peak] {
                                trace!(?last, "replacing segment with stronger-peaked neighbor");
                                accepted.pop();
                            } else {
                                trace!(?segment, "dropping weaker-peaked segment");
                                continue;
                            }
                        }
                    }
                }
            }
            accepted.push((segment, peak));
        }

        let mut segments: Vec<Segment> =
            accepted.into_iter().map(|(segment, _)| segment).collect();

        if let Some(floor) = config.energy_floor {
            segments.retain(|segment| {
                let mean_square = self.mean_square(segment);
                if mean_square < floor {
                    debug!(?segment, mean_square, floor, "segment below energy floor");
                    false
                } else {
                    true
                }
            });
        }

        // A buffer exactly one window long that segments to its own full
        // range holds nothing the caller does not already have.
        if len == config.samples_per_window
            && segments.len() == 1
            && segments[0].start == 0
            && segments[0].end == len
        {
            return Ok(Vec::new());
        }

        debug!(segments = segments.len(), "segmentation complete");
        Ok(segments)
    }
}

/// Places one window-length segment around `peak`.
fn refine_segment<R: Rng + ?Sized>(
    combined: &Array1<f64>,
    peak: usize,
    min_distance: usize,
    config: &SegmenterConfig,
    frequency: f64,
    rng: &mut R,
) -> Segment {
    let len = combined.len();
    let window_len = config.samples_per_window as i64;
    let half_window = (config.samples_per_window / 2) as i64;

    let search_start = peak.saturating_sub(min_distance);
    let search_end = (peak + min_distance).min(len - 1);
    let frame_len = ((ENERGY_FRAME_SECS * frequency) as usize).max(1);

    let mut frames: Vec<EnergyWindow> = Vec::new();
    let mut start = search_start;
    while start + frame_len < search_end {
        let energy = combined
            .slice(s![start..start + frame_len])
            .iter()
            .map(|&v| v * v)
            .sum();
        frames.push(EnergyWindow {
            start,
            end: start + frame_len,
            energy,
        });
        start += frame_len;
    }

    let (mut begin, mut end) = match pick_energy_window(
        &frames,
        config.frame_energy_multiplier,
        frequency,
    ) {
        Some(window) => {
            let window_mid = ((window.start + window.end) / 2) as i64;
            let center = match config.centering {
                SegmentCentering::Window => window_mid,
                SegmentCentering::WindowPeakBlend => (window_mid + peak as i64) / 2,
            };
            let mut begin = center - half_window;
            let mut end = begin + window_len;

            if config.shift_segments {
                // Shift within the slack while keeping a 100 ms margin
                // around the energetic window on each side.
                let slack = config.samples_per_window as f64
                    - (window.end - window.start) as f64
                    - SHIFT_MARGIN_SECS * frequency;
                let max_shift = slack.floor() / 2.0;
                if max_shift > 0.0 {
                    let shift_left = rng.random::<bool>();
                    let amount = (max_shift * rng.random::<f64>()).floor() as i64;
                    if shift_left {
                        begin -= amount;
                        end -= amount;
                    } else {
                        begin += amount;
                        end += amount;
                    }
                }
            }
            (begin, end)
        }
        None => {
            // No energetic window stands out; center on the peak itself,
            // deterministically.
            let begin = peak as i64 - half_window;
            (begin, begin + window_len)
        }
    };

    // Clamp into the signal without changing the segment length. The caller
    // guarantees the signal is at least one window long.
    if begin < 0 {
        end -= begin;
        begin = 0;
    }
    if end > len as i64 {
        begin -= end - len as i64;
        end = len as i64;
    }

    Segment::new(begin as usize, end as usize)
}

/// Filters `frames` by energy, merges nearby survivors, and returns the most
/// energetic merged window. Earlier windows win energy ties.
fn pick_energy_window(
    frames: &[EnergyWindow],
    energy_multiplier: f64,
    frequency: f64,
) -> Option<EnergyWindow> {
    if frames.is_empty() {
        return None;
    }

    let mean = frames.iter().map(|f| f.energy).sum::<f64>() / frames.len() as f64;
    let threshold = mean * energy_multiplier;
    let merge_gap = (WINDOW_MERGE_GAP_SECS * frequency) as usize;

    let mut merged: Vec<EnergyWindow> = Vec::new();
    for frame in frames.iter().filter(|f| f.energy > threshold) {
        if let Some(current) = merged.last_mut() {
            if frame.start - current.end < merge_gap {
                current.end = frame.end;
                current.energy += frame.energy;
                continue;
            }
        }
        merged.push(*frame);
    }

    let mut best: Option<EnergyWindow> = None;
    for window in merged {
        if best.is_none_or(|b| window.energy > b.energy) {
            best = Some(window);
        }
    }
    best
}
