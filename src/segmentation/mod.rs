//! Peak-detection based segmentation of captured signals.
//!
//! The pipeline runs in stages:
//!
//! 1. Combine multi-axis data into a single analysis channel
//!    ([`CapturedSignal::combined`](crate::CapturedSignal::combined)).
//! 2. Detect amplitude peaks against an RMS-derived threshold, enforcing a
//!    minimum separation ([`find_peaks`]).
//! 3. Refine each peak to the most energetic region around it and place a
//!    fixed-length segment there
//!    ([`CapturedSignal::find_segments`](crate::CapturedSignal::find_segments)).
//! 4. Resolve conflicts between segments that overlap too much and, when
//!    configured, reject segments whose raw energy is below a floor.
//!
//! [`SegmenterConfig`] carries the tuning knobs; [`Segment`] is the output.

mod finder;
mod peaks;
mod types;

pub use peaks::find_peaks;
pub use types::{
    DEFAULT_FRAME_ENERGY_MULTIPLIER, DEFAULT_RMS_THRESHOLD_MULTIPLIER, ENERGY_FRAME_SECS,
    MAX_OVERLAP_FRACTION, OverlapPolicy, RAW_AUDIO_ENERGY_FLOOR, SEGMENT_DISTANCE_FRACTION,
    SHIFT_MARGIN_SECS, STRICT_FRAME_ENERGY_MULTIPLIER, STRICT_RMS_THRESHOLD_MULTIPLIER, Segment,
    SegmentCentering, SegmenterConfig, WINDOW_MERGE_GAP_SECS,
};
