// Correctness and logic
#![warn(clippy::unit_cmp)] // Detects comparing unit types
#![warn(clippy::match_same_arms)]
// Duplicate match arms
// #![warn(clippy::unreachable)] // Detects unreachable code

// Performance-focused
#![warn(clippy::inefficient_to_string)] // `format!("{}", x)` vs `x.to_string()`
#![warn(clippy::map_clone)] // Cloning inside `map()` unnecessarily
#![warn(clippy::unnecessary_to_owned)] // Detects redundant `.to_owned()` or `.clone()`
#![warn(clippy::large_stack_arrays)] // Helps avoid stack overflows
#![warn(clippy::box_collection)] // Warns on boxed `Vec`, `String`, etc.
#![warn(clippy::vec_box)] // Avoids using `Vec<Box<T>>` when unnecessary
#![warn(clippy::needless_collect)] // Avoids `.collect().iter()` chains

// Style and idiomatic Rust
#![warn(clippy::redundant_clone)] // Detects unnecessary `.clone()`
#![warn(clippy::identity_op)] // e.g., `x + 0`, `x * 1`
#![warn(clippy::needless_return)] // Avoids `return` at the end of functions
#![warn(clippy::let_unit_value)] // Avoids binding `()` to variables
#![warn(clippy::manual_map)] // Use `.map()` instead of manual `match`
#![warn(clippy::unwrap_used)] // Avoids using `unwrap()`

// Maintainability
#![warn(clippy::missing_panics_doc)] // Docs for functions that might panic
#![warn(clippy::missing_safety_doc)] // Docs for `unsafe` functions
#![warn(clippy::missing_const_for_fn)] // Suggests making eligible functions `const`
#![deny(missing_docs)] // Documentation is a must for release

//! # sensor_segments
//!
//! Peak-detection based signal segmentation: slice continuous sensor recordings
//! (accelerometer traces, raw microphone captures, any sampled stream) into
//! fixed-length segments centered on the interesting activity, ready to be
//! labeled and uploaded as individual samples.
//!
//! ## Overview
//!
//! A capture session produces one long buffer in which the user performed a
//! gesture or sound a handful of times. Training pipelines want one
//! fixed-length window per repetition. This crate finds those windows: it
//! detects amplitude peaks against an RMS-derived threshold, refines each
//! peak to the most energetic region around it, and emits non-conflicting
//! `[start, end)` ranges of exactly the requested length.
//!
//! ## Installation
//!
//! Add this to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! sensor_segments = "0.1.0"
//! ```
//!
//! or more easily with:
//! ```bash
//! cargo add sensor_segments
//! ```
//!
//! For specific features, enable only what you need:
//!
//! ```toml
//! [dependencies]
//! sensor_segments = { version = "*", features = ["parallel-processing"] }
//! ```
//!
//! ## Features
//!
//! The library uses a modular feature system to keep dependencies minimal:
//!
//! - `batch-processing` (default): segment whole collections of captures in one call
//! - `parallel-processing`: rayon-backed batch segmentation across CPU cores
//! - `serialization`: serialization utilities (using `serde` crate)
//!
//! See `Cargo.toml` for the complete feature list.
//!
//! ## Error Handling
//!
//! All fallible operations return [`SegmentationResult`]:
//!
//! ```rust
//! use sensor_segments::{SegmentationError, SegmentationResult};
//!
//! let result: SegmentationResult<()> = Err(SegmentationError::InvalidParameter(
//!     "samples per window must be greater than 0".to_string(),
//! ));
//!
//! match result {
//!     Ok(()) => {}
//!     Err(SegmentationError::InvalidSignal(reason)) => eprintln!("Bad signal: {reason}"),
//!     Err(other) => eprintln!("Error: {other}"),
//! }
//! ```
//!
//! ## Quick Start
//!
//! ### Segmenting a Capture
//!
//! ```rust
//! use ndarray::Array1;
//! use sensor_segments::{CapturedSignal, SegmenterConfig};
//!
//! // Ten seconds of accelerometer data at 100 Hz with one burst of motion.
//! let mut samples = vec![0.0f64; 1000];
//! samples[500] = 50.0;
//! let signal = CapturedSignal::mono(Array1::from_vec(samples), 100.0).unwrap();
//!
//! // Slice out 100-sample (one second) segments around each detected event.
//! let segments = signal.find_segments(&SegmenterConfig::new(100)).unwrap();
//! assert_eq!(segments.len(), 1);
//! assert_eq!((segments[0].start, segments[0].end), (450, 550));
//! ```
//!
//! ### Multi-Axis Signals
//!
//! ```rust
//! use sensor_segments::CapturedSignal;
//!
//! // Accelerometer tuples (x, y) arriving one per sample.
//! let signal = CapturedSignal::from_tuples(
//!     &[vec![1.0, 2.0], vec![4.0, -2.0], vec![0.0, 0.0]],
//!     50.0,
//! )
//! .unwrap();
//!
//! // Peak analysis runs on the per-sample sum of absolute axis values.
//! assert_eq!(signal.combined().to_vec(), vec![3.0, 6.0, 0.0]);
//! ```
//!
//! ### Reproducible Segment Shifting
//!
//! Segments are centered deterministically by default. Enabling
//! `shift_segments` moves each one randomly within its slack so that a model
//! cannot learn the event position; pass your own RNG for reproducibility:
//!
//! ```rust
//! use ndarray::Array1;
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//! use sensor_segments::{CapturedSignal, SegmenterConfig};
//!
//! let mut samples = vec![0.0f64; 1000];
//! samples[500] = 50.0;
//! let signal = CapturedSignal::mono(Array1::from_vec(samples), 100.0).unwrap();
//!
//! let mut config = SegmenterConfig::new(100);
//! config.shift_segments = true;
//!
//! let mut rng = StdRng::seed_from_u64(7);
//! let first = signal.find_segments_with_rng(&config, &mut rng).unwrap();
//! let mut rng = StdRng::seed_from_u64(7);
//! let second = signal.find_segments_with_rng(&config, &mut rng).unwrap();
//! assert_eq!(first, second);
//! ```
//!
//! ## Documentation
//!
//! Full API documentation is available at [docs.rs/sensor_segments](https://docs.rs/sensor_segments).
//!
//! ## License
//!
//! MIT License

mod error;

#[cfg(feature = "batch-processing")]
pub mod batch;
mod repr;
pub mod segmentation;
pub mod utils;

pub use crate::error::{SegmentationError, SegmentationResult};
pub use crate::repr::{CapturedSignal, SignalData};
pub use crate::segmentation::{
    DEFAULT_FRAME_ENERGY_MULTIPLIER, DEFAULT_RMS_THRESHOLD_MULTIPLIER, ENERGY_FRAME_SECS,
    MAX_OVERLAP_FRACTION, OverlapPolicy, RAW_AUDIO_ENERGY_FLOOR, SEGMENT_DISTANCE_FRACTION,
    SHIFT_MARGIN_SECS, STRICT_FRAME_ENERGY_MULTIPLIER, STRICT_RMS_THRESHOLD_MULTIPLIER, Segment,
    SegmentCentering, SegmenterConfig, WINDOW_MERGE_GAP_SECS, find_peaks,
};
pub use crate::utils::generation::{impulse, noise, silence};

#[cfg(feature = "batch-processing")]
pub use crate::batch::segment_all;
#[cfg(feature = "parallel-processing")]
pub use crate::batch::{optimal_chunk_size, segment_all_chunked, segment_all_parallel};

use num_traits::{Float, FloatConst, NumCast};

/// Marker trait for the floating-point types a signal can be stored as
/// (f32, f64).
pub trait RealFloat: Float + FloatConst + NumCast {}

impl RealFloat for f32 {}
impl RealFloat for f64 {}

/// Casts a numeric value into the target floating-point type `F`.
///
/// Signals are stored at whatever precision the capture layer delivers, but
/// peak analysis always runs in `f64`; this is the bridge between the two.
/// If `F` and `T` are the same type the cast compiles away.
///
/// # Examples
/// ```
/// use sensor_segments::to_precision;
///
/// let reading = 42i32;
/// let as_f32: f32 = to_precision(reading);
/// let as_f64: f64 = to_precision(reading);
/// assert_eq!(as_f32, 42.0);
/// assert_eq!(as_f64, 42.0);
/// ```
///
/// # Panics
/// Panics if the value is not representable in `F`.
#[inline(always)]
pub fn to_precision<F, T>(value: T) -> F
where
    F: RealFloat + NumCast,
    T: NumCast,
{
    NumCast::from(value).expect("to_precision: valid numeric conversion")
}
