//! Core captured-signal representation and data structures.
//!
//! This module defines the types a capture session hands to the segmenter:
//! raw sample data paired with the sampling frequency it was recorded at.
//!
//! - [`SignalData<F>`] - enum for mono vs. multi-axis sample storage
//! - [`CapturedSignal<F>`] - sample data plus its sampling frequency
//!
//! Mono signals use 1D arrays. Multi-axis signals (e.g. the x/y/z axes of an
//! accelerometer) use 2D arrays with axes as rows, so `data[[axis, sample]]`
//! addresses one value.
//!
//! # Examples
//!
//! ```rust
//! use ndarray::array;
//! use sensor_segments::CapturedSignal;
//!
//! let mono = CapturedSignal::mono(array![0.1f64, 0.2, 0.3], 62.5).unwrap();
//! assert_eq!(mono.len(), 3);
//! assert_eq!(mono.axes(), 1);
//!
//! // Two axes, three samples each.
//! let multi = CapturedSignal::multi_axis(
//!     array![[0.1f64, 0.2, 0.3], [1.0, -1.0, 0.0]],
//!     62.5,
//! )
//! .unwrap();
//! assert_eq!(multi.len(), 3);
//! assert_eq!(multi.axes(), 2);
//! ```

use ndarray::{Array1, Array2, Axis, s};

use crate::segmentation::Segment;
use crate::{RealFloat, SegmentationError, SegmentationResult, to_precision};

/// Sample storage for a captured signal.
///
/// Multi-axis data keeps axes as rows so that one column is one instant in
/// time across every axis.
#[derive(Debug, Clone, PartialEq)]
pub enum SignalData<F: RealFloat> {
    /// Single-axis signal data.
    Mono(Array1<F>),
    /// Multi-axis signal data with shape `(axes, samples_per_axis)`.
    MultiAxis(Array2<F>),
}

impl<F: RealFloat> SignalData<F> {
    /// Returns the number of samples per axis.
    pub fn len(&self) -> usize {
        match self {
            SignalData::Mono(samples) => samples.len(),
            SignalData::MultiAxis(samples) => samples.shape()[1],
        }
    }

    /// Returns the number of axes.
    pub fn axes(&self) -> usize {
        match self {
            SignalData::Mono(_) => 1,
            SignalData::MultiAxis(samples) => samples.shape()[0],
        }
    }

    /// Returns true if there are no samples.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A complete captured recording: sample data plus the sampling frequency it
/// was recorded at.
///
/// Constructors validate their input, so every `CapturedSignal` holds at
/// least one sample per axis and a finite positive frequency.
#[derive(Debug, Clone, PartialEq)]
pub struct CapturedSignal<F: RealFloat> {
    data: SignalData<F>,
    frequency: f64,
}

impl<F: RealFloat> CapturedSignal<F> {
    /// Creates a single-axis signal.
    ///
    /// # Errors
    /// Returns [`SegmentationError::InvalidSignal`] if `samples` is empty or
    /// `frequency` is not a finite positive number.
    pub fn mono(samples: Array1<F>, frequency: f64) -> SegmentationResult<Self> {
        validate_frequency(frequency)?;
        if samples.is_empty() {
            return Err(SegmentationError::InvalidSignal(
                "signal must contain at least one sample".to_string(),
            ));
        }
        Ok(Self {
            data: SignalData::Mono(samples),
            frequency,
        })
    }

    /// Creates a multi-axis signal from an axes-as-rows array.
    ///
    /// # Errors
    /// Returns [`SegmentationError::InvalidSignal`] if `samples` has no axes
    /// or no samples, or if `frequency` is not a finite positive number.
    pub fn multi_axis(samples: Array2<F>, frequency: f64) -> SegmentationResult<Self> {
        validate_frequency(frequency)?;
        let (axes, samples_per_axis) = samples.dim();
        if axes == 0 || samples_per_axis == 0 {
            return Err(SegmentationError::InvalidSignal(
                "multi-axis signal must contain at least one axis and one sample".to_string(),
            ));
        }
        Ok(Self {
            data: SignalData::MultiAxis(samples),
            frequency,
        })
    }

    /// Builds a multi-axis signal from per-sample tuples, the shape sensor
    /// APIs deliver readings in (one `(x, y, z, ...)` tuple per instant).
    ///
    /// # Errors
    /// Returns [`SegmentationError::InvalidSignal`] if `samples` is empty,
    /// any tuple is empty, the tuples are ragged, or `frequency` is not a
    /// finite positive number.
    pub fn from_tuples(samples: &[Vec<F>], frequency: f64) -> SegmentationResult<Self> {
        validate_frequency(frequency)?;
        let first = samples.first().ok_or_else(|| {
            SegmentationError::InvalidSignal(
                "signal must contain at least one sample".to_string(),
            )
        })?;
        let axes = first.len();
        if axes == 0 {
            return Err(SegmentationError::InvalidSignal(
                "sample tuples must contain at least one axis value".to_string(),
            ));
        }
        for (ix, tuple) in samples.iter().enumerate() {
            if tuple.len() != axes {
                return Err(SegmentationError::InvalidSignal(format!(
                    "ragged multi-axis signal: sample {} has {} values, expected {}",
                    ix,
                    tuple.len(),
                    axes
                )));
            }
        }

        let mut data = Array2::zeros((axes, samples.len()));
        for (ix, tuple) in samples.iter().enumerate() {
            for (axis, &value) in tuple.iter().enumerate() {
                data[[axis, ix]] = value;
            }
        }
        Ok(Self {
            data: SignalData::MultiAxis(data),
            frequency,
        })
    }

    /// Returns the number of samples per axis.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if the signal contains no samples.
    ///
    /// Constructors reject empty input, so this is always false; it exists
    /// for the usual len/is_empty pairing.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns the number of axes.
    pub fn axes(&self) -> usize {
        self.data.axes()
    }

    /// Returns the sampling frequency in Hz.
    pub const fn frequency(&self) -> f64 {
        self.frequency
    }

    /// Returns the underlying sample storage.
    pub const fn data(&self) -> &SignalData<F> {
        &self.data
    }

    /// Returns the recording duration in seconds.
    pub fn duration_seconds(&self) -> f64 {
        self.len() as f64 / self.frequency
    }

    /// Reduces the signal to a single channel for peak analysis.
    ///
    /// Multi-axis signals combine to the per-sample sum of absolute values
    /// across axes, e.g. `[(1, 2), (4, -2)]` becomes `[3, 6]`. A mono signal
    /// passes through unchanged (cast to `f64`), preserving its sign.
    pub fn combined(&self) -> Array1<f64> {
        match &self.data {
            SignalData::Mono(samples) => samples.mapv(|v| to_precision::<f64, F>(v)),
            SignalData::MultiAxis(samples) => samples
                .mapv(|v| to_precision::<f64, F>(v).abs())
                .sum_axis(Axis(0)),
        }
    }

    /// Extracts one segment of the original data, all axes included.
    ///
    /// This is the slice the upload layer sends as an individual labeled
    /// sample.
    ///
    /// # Errors
    /// Returns [`SegmentationError::DimensionMismatch`] if the segment is
    /// empty or extends past the end of the signal.
    pub fn extract(&self, segment: &Segment) -> SegmentationResult<Self> {
        if segment.is_empty() {
            return Err(SegmentationError::DimensionMismatch(format!(
                "segment [{}, {}) covers no samples",
                segment.start, segment.end
            )));
        }
        if segment.end > self.len() {
            return Err(SegmentationError::DimensionMismatch(format!(
                "segment [{}, {}) is outside the captured signal of length {}",
                segment.start,
                segment.end,
                self.len()
            )));
        }
        let data = match &self.data {
            SignalData::Mono(samples) => {
                SignalData::Mono(samples.slice(s![segment.start..segment.end]).to_owned())
            }
            SignalData::MultiAxis(samples) => SignalData::MultiAxis(
                samples
                    .slice(s![.., segment.start..segment.end])
                    .to_owned(),
            ),
        };
        Ok(Self {
            data,
            frequency: self.frequency,
        })
    }

    /// Mean squared amplitude over one segment of the original data, taken
    /// across all axes. The energy-floor rejection pass measures segments
    /// with this.
    ///
    /// Out-of-range indices are clamped to the signal; an empty range yields
    /// `0.0`.
    pub fn mean_square(&self, segment: &Segment) -> f64 {
        let end = segment.end.min(self.len());
        let start = segment.start.min(end);
        if start == end {
            return 0.0;
        }
        let (sum, count) = match &self.data {
            SignalData::Mono(samples) => {
                let slice = samples.slice(s![start..end]);
                let sum = slice
                    .iter()
                    .map(|&v| {
                        let v = to_precision::<f64, F>(v);
                        v * v
                    })
                    .sum::<f64>();
                (sum, end - start)
            }
            SignalData::MultiAxis(samples) => {
                let slice = samples.slice(s![.., start..end]);
                let sum = slice
                    .iter()
                    .map(|&v| {
                        let v = to_precision::<f64, F>(v);
                        v * v
                    })
                    .sum::<f64>();
                (sum, (end - start) * self.axes())
            }
        };
        sum / count as f64
    }
}

fn validate_frequency(frequency: f64) -> SegmentationResult<()> {
    if !frequency.is_finite() || frequency <= 0.0 {
        return Err(SegmentationError::InvalidSignal(format!(
            "sampling frequency must be a positive number, got {}",
            frequency
        )));
    }
    Ok(())
}
