//! Shared types for segmentation operations.
//!
//! This module defines the segment range type, the tuning constants the
//! detector was shipped with, and the configuration struct that selects
//! between the deterministic capture-time tuning and the stricter curation
//! tuning.

/// RMS threshold multiplier used by the default capture tuning.
pub const DEFAULT_RMS_THRESHOLD_MULTIPLIER: f64 = 1.2;

/// Frame energy multiplier used by the default capture tuning.
pub const DEFAULT_FRAME_ENERGY_MULTIPLIER: f64 = 2.0;

/// RMS threshold multiplier used by the strict curation tuning.
pub const STRICT_RMS_THRESHOLD_MULTIPLIER: f64 = 2.0;

/// Frame energy multiplier used by the strict curation tuning.
pub const STRICT_FRAME_ENERGY_MULTIPLIER: f64 = 1.2;

/// Maximum tolerated overlap between adjacent segments, as a fraction of the
/// window length.
pub const MAX_OVERLAP_FRACTION: f64 = 0.15;

/// Fraction of the window length used as the minimum distance between
/// detected peaks.
pub const SEGMENT_DISTANCE_FRACTION: f64 = 0.85;

/// Length of one energy frame in seconds (20 ms).
pub const ENERGY_FRAME_SECS: f64 = 0.02;

/// Maximum gap between energetic frames that still merges into a single
/// window, in seconds (200 ms).
pub const WINDOW_MERGE_GAP_SECS: f64 = 0.2;

/// Margin kept around the energetic window when segments are randomly
/// shifted, in seconds (100 ms).
pub const SHIFT_MARGIN_SECS: f64 = 0.1;

/// Energy floor applied to raw 16-bit microphone captures by the
/// [`microphone`](SegmenterConfig::microphone) preset.
pub const RAW_AUDIO_ENERGY_FLOOR: f64 = 100_000.0;

/// One extracted sample: a fixed-length `[start, end)` index range into the
/// captured signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(serde::Serialize, serde::Deserialize))]
pub struct Segment {
    /// Index of the first sample covered by the segment.
    pub start: usize,
    /// One past the index of the last sample covered by the segment.
    pub end: usize,
}

impl Segment {
    /// Creates a segment covering `[start, end)`.
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Returns the number of samples covered.
    pub const fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Returns true if the segment covers no samples.
    pub const fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    /// Returns the segment duration in seconds at the given sampling
    /// frequency.
    pub const fn duration_seconds(&self, frequency: f64) -> f64 {
        self.len() as f64 / frequency
    }

    /// Returns true if `index` falls inside the segment.
    pub const fn contains(&self, index: usize) -> bool {
        self.start <= index && index < self.end
    }
}

/// How the detector resolves two segments that overlap by more than the
/// configured fraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serialization", derive(serde::Serialize, serde::Deserialize))]
pub enum OverlapPolicy {
    /// Keep the earlier segment and drop the later one.
    DropLater,
    /// Keep whichever segment originates from the stronger peak in the
    /// combined signal, replacing the earlier segment when the later one
    /// wins.
    KeepStrongerPeak,
}

/// How a segment is positioned around the detected activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serialization", derive(serde::Serialize, serde::Deserialize))]
pub enum SegmentCentering {
    /// Center on the midpoint of the most energetic window around the peak.
    Window,
    /// Center halfway between the window midpoint and the peak itself, so
    /// a peak sitting at the edge of a long window is still captured.
    WindowPeakBlend,
}

/// Configuration for [`find_segments`](crate::CapturedSignal::find_segments).
///
/// Two tunings shipped in production and both are available as presets:
/// [`new`](Self::new) is the capture-time tuning (permissive peak threshold,
/// strict frame filter, deterministic window centering) and
/// [`strict`](Self::strict) is the curation tuning (strict peak threshold,
/// permissive frame filter, peak-blended centering, strongest-peak overlap
/// resolution). [`microphone`](Self::microphone) adds the energy floor used
/// for raw 16-bit audio captures.
///
/// # Examples
///
/// ```rust
/// use sensor_segments::SegmenterConfig;
///
/// // One-second windows at 62.5 Hz.
/// let config = SegmenterConfig::new(62);
/// assert_eq!(config.min_segment_distance(), 53);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serialization", derive(serde::Serialize, serde::Deserialize))]
pub struct SegmenterConfig {
    /// Fixed output segment length in samples.
    pub samples_per_window: usize,
    /// Shift each segment randomly within its slack instead of centering it
    /// deterministically, so downstream models cannot learn the event
    /// position inside the window.
    pub shift_segments: bool,
    /// Peak detection threshold as a multiple of the signal RMS.
    pub rms_threshold_multiplier: f64,
    /// Frames count as energetic when their energy exceeds the mean frame
    /// energy times this value.
    pub frame_energy_multiplier: f64,
    /// How segments are positioned around the detected activity.
    pub centering: SegmentCentering,
    /// How over-overlapping segments are resolved.
    pub overlap_policy: OverlapPolicy,
    /// Maximum tolerated overlap between adjacent segments, as a fraction of
    /// `samples_per_window`.
    pub max_overlap_fraction: f64,
    /// Minimum mean squared amplitude a segment must reach over the original
    /// data, or `None` to skip the energy-floor pass.
    pub energy_floor: Option<f64>,
}

impl SegmenterConfig {
    /// Creates a configuration with the default capture tuning.
    ///
    /// `samples_per_window` is the fixed output segment length; captures are
    /// usually segmented into one-second windows, so this is typically the
    /// sampling frequency rounded down.
    pub const fn new(samples_per_window: usize) -> Self {
        Self {
            samples_per_window,
            shift_segments: false,
            rms_threshold_multiplier: DEFAULT_RMS_THRESHOLD_MULTIPLIER,
            frame_energy_multiplier: DEFAULT_FRAME_ENERGY_MULTIPLIER,
            centering: SegmentCentering::Window,
            overlap_policy: OverlapPolicy::DropLater,
            max_overlap_fraction: MAX_OVERLAP_FRACTION,
            energy_floor: None,
        }
    }

    /// Creates a configuration with the strict curation tuning: a higher
    /// peak threshold, a more permissive frame filter, peak-blended
    /// centering, and strongest-peak overlap resolution.
    pub const fn strict(samples_per_window: usize) -> Self {
        Self {
            samples_per_window,
            shift_segments: false,
            rms_threshold_multiplier: STRICT_RMS_THRESHOLD_MULTIPLIER,
            frame_energy_multiplier: STRICT_FRAME_ENERGY_MULTIPLIER,
            centering: SegmentCentering::WindowPeakBlend,
            overlap_policy: OverlapPolicy::KeepStrongerPeak,
            max_overlap_fraction: MAX_OVERLAP_FRACTION,
            energy_floor: None,
        }
    }

    /// Creates a configuration for raw 16-bit microphone captures: the
    /// default capture tuning plus the historical
    /// [`RAW_AUDIO_ENERGY_FLOOR`], which rejects segments detected in
    /// near-silence.
    pub const fn microphone(samples_per_window: usize) -> Self {
        Self {
            samples_per_window,
            shift_segments: false,
            rms_threshold_multiplier: DEFAULT_RMS_THRESHOLD_MULTIPLIER,
            frame_energy_multiplier: DEFAULT_FRAME_ENERGY_MULTIPLIER,
            centering: SegmentCentering::Window,
            overlap_policy: OverlapPolicy::DropLater,
            max_overlap_fraction: MAX_OVERLAP_FRACTION,
            energy_floor: Some(RAW_AUDIO_ENERGY_FLOOR),
        }
    }

    /// Creates a configuration with the default tuning and a window length
    /// derived from a duration in seconds, truncated to whole samples.
    pub fn from_window_duration(window_secs: f64, frequency: f64) -> Self {
        Self::new((window_secs * frequency) as usize)
    }

    /// Sets the window length from a duration in milliseconds, truncated to
    /// whole samples.
    pub fn set_window_ms(&mut self, window_ms: f64, frequency: f64) {
        self.samples_per_window = (window_ms * frequency / 1000.0) as usize;
    }

    /// Enables or disables random within-slack shifting.
    pub const fn set_shift_segments(&mut self, enabled: bool) {
        self.shift_segments = enabled;
    }

    /// Sets how segments are positioned around the detected activity.
    pub const fn set_centering(&mut self, centering: SegmentCentering) {
        self.centering = centering;
    }

    /// Sets how over-overlapping segments are resolved.
    pub const fn set_overlap_policy(&mut self, policy: OverlapPolicy) {
        self.overlap_policy = policy;
    }

    /// Sets or clears the minimum mean squared amplitude a segment must
    /// reach.
    pub const fn set_energy_floor(&mut self, floor: Option<f64>) {
        self.energy_floor = floor;
    }

    /// Minimum distance between detected peaks for this window length,
    /// rounded up.
    pub fn min_segment_distance(&self) -> usize {
        (self.samples_per_window as f64 * SEGMENT_DISTANCE_FRACTION).ceil() as usize
    }

    /// Validate the segmenter configuration.
    ///
    /// # Errors
    /// Returns a description of the first invalid field.
    pub fn validate(&self) -> Result<(), String> {
        if self.samples_per_window == 0 {
            return Err("Samples per window must be greater than 0".to_string());
        }
        if !self.rms_threshold_multiplier.is_finite() || self.rms_threshold_multiplier <= 0.0 {
            return Err("RMS threshold multiplier must be a positive number".to_string());
        }
        if !self.frame_energy_multiplier.is_finite() || self.frame_energy_multiplier <= 0.0 {
            return Err("Frame energy multiplier must be a positive number".to_string());
        }
        if !self.max_overlap_fraction.is_finite()
            || self.max_overlap_fraction < 0.0
            || self.max_overlap_fraction > 1.0
        {
            return Err("Maximum overlap fraction must be between 0.0 and 1.0".to_string());
        }
        if let Some(floor) = self.energy_floor {
            if !floor.is_finite() || floor < 0.0 {
                return Err("Energy floor must be a non-negative number".to_string());
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_basics() {
        let segment = Segment::new(450, 550);
        assert_eq!(segment.len(), 100);
        assert!(!segment.is_empty());
        assert!(segment.contains(450));
        assert!(segment.contains(549));
        assert!(!segment.contains(550));
        assert!(!segment.contains(449));
        assert!((segment.duration_seconds(100.0) - 1.0).abs() < 1e-12);

        assert!(Segment::new(5, 5).is_empty());
        assert_eq!(Segment::new(5, 5).len(), 0);
    }

    #[test]
    fn test_default_tuning() {
        let config = SegmenterConfig::new(100);
        assert_eq!(config.samples_per_window, 100);
        assert!(!config.shift_segments);
        assert_eq!(config.rms_threshold_multiplier, 1.2);
        assert_eq!(config.frame_energy_multiplier, 2.0);
        assert_eq!(config.centering, SegmentCentering::Window);
        assert_eq!(config.overlap_policy, OverlapPolicy::DropLater);
        assert_eq!(config.max_overlap_fraction, 0.15);
        assert_eq!(config.energy_floor, None);
    }

    #[test]
    fn test_strict_tuning() {
        let config = SegmenterConfig::strict(100);
        assert_eq!(config.rms_threshold_multiplier, 2.0);
        assert_eq!(config.frame_energy_multiplier, 1.2);
        assert_eq!(config.centering, SegmentCentering::WindowPeakBlend);
        assert_eq!(config.overlap_policy, OverlapPolicy::KeepStrongerPeak);
        assert_eq!(config.energy_floor, None);
    }

    #[test]
    fn test_microphone_tuning_sets_energy_floor() {
        let config = SegmenterConfig::microphone(16000);
        assert_eq!(config.energy_floor, Some(RAW_AUDIO_ENERGY_FLOOR));
        assert_eq!(config.rms_threshold_multiplier, 1.2);
    }

    #[test]
    fn test_presets_validate() {
        for config in [
            SegmenterConfig::new(62),
            SegmenterConfig::strict(62),
            SegmenterConfig::microphone(16000),
        ] {
            assert!(config.validate().is_ok());
        }
    }

    #[test]
    fn test_min_segment_distance_rounds_up() {
        assert_eq!(SegmenterConfig::new(100).min_segment_distance(), 85);
        assert_eq!(SegmenterConfig::new(10).min_segment_distance(), 9);
        assert_eq!(SegmenterConfig::new(1).min_segment_distance(), 1);
        assert_eq!(SegmenterConfig::new(62).min_segment_distance(), 53);
    }

    #[test]
    fn test_from_window_duration_truncates() {
        let config = SegmenterConfig::from_window_duration(1.0, 62.5);
        assert_eq!(config.samples_per_window, 62);

        let config = SegmenterConfig::from_window_duration(0.5, 100.0);
        assert_eq!(config.samples_per_window, 50);
    }

    #[test]
    fn test_set_window_ms() {
        let mut config = SegmenterConfig::new(0);
        config.set_window_ms(1000.0, 62.5);
        assert_eq!(config.samples_per_window, 62);
        config.set_window_ms(500.0, 100.0);
        assert_eq!(config.samples_per_window, 50);
    }

    #[test]
    fn test_validate_rejects_zero_window() {
        let config = SegmenterConfig::new(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_bad_multipliers() {
        for value in [0.0, -1.0, f64::NAN] {
            let mut config = SegmenterConfig::new(100);
            config.rms_threshold_multiplier = value;
            assert!(config.validate().is_err());

            let mut config = SegmenterConfig::new(100);
            config.frame_energy_multiplier = value;
            assert!(config.validate().is_err());
        }
    }

    #[test]
    fn test_validate_rejects_bad_overlap_fraction() {
        for value in [-0.1, 1.5, f64::NAN] {
            let mut config = SegmenterConfig::new(100);
            config.max_overlap_fraction = value;
            assert!(config.validate().is_err());
        }
    }

    #[test]
    fn test_validate_rejects_bad_energy_floor() {
        for value in [-1.0, f64::NAN] {
            let mut config = SegmenterConfig::new(100);
            config.energy_floor = Some(value);
            assert!(config.validate().is_err());
        }
        let mut config = SegmenterConfig::new(100);
        config.energy_floor = Some(0.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_setters() {
        let mut config = SegmenterConfig::new(100);
        config.set_shift_segments(true);
        config.set_centering(SegmentCentering::WindowPeakBlend);
        config.set_overlap_policy(OverlapPolicy::KeepStrongerPeak);
        config.set_energy_floor(Some(50.0));

        assert!(config.shift_segments);
        assert_eq!(config.centering, SegmentCentering::WindowPeakBlend);
        assert_eq!(config.overlap_policy, OverlapPolicy::KeepStrongerPeak);
        assert_eq!(config.energy_floor, Some(50.0));
    }
}
