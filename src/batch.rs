//! Batch segmentation across independent captures.
//!
//! A labeling session produces many recordings, each segmented with the same
//! configuration. The pipeline holds no shared state, so captures can be
//! processed independently; the parallel forms require the
//! `parallel-processing` feature.
//!
//! Results keep input order, one per capture, so callers can pair each
//! outcome back up with its source recording and its label.

use crate::segmentation::{Segment, SegmenterConfig};
use crate::{CapturedSignal, RealFloat, SegmentationResult};

#[cfg(feature = "parallel-processing")]
use rayon::prelude::*;

/// Segments every capture sequentially with one shared configuration.
pub fn segment_all<F: RealFloat>(
    signals: &[CapturedSignal<F>],
    config: &SegmenterConfig,
) -> Vec<SegmentationResult<Vec<Segment>>> {
    signals
        .iter()
        .map(|signal| signal.find_segments(config))
        .collect()
}

/// Segments every capture in parallel with one shared configuration.
#[cfg(feature = "parallel-processing")]
pub fn segment_all_parallel<F: RealFloat + Send + Sync>(
    signals: &[CapturedSignal<F>],
    config: &SegmenterConfig,
) -> Vec<SegmentationResult<Vec<Segment>>> {
    signals
        .par_iter()
        .map(|signal| signal.find_segments(config))
        .collect()
}

/// Segments captures in parallel, `chunk_size` captures at a time, bounding
/// how many are in flight at once.
#[cfg(feature = "parallel-processing")]
pub fn segment_all_chunked<F: RealFloat + Send + Sync>(
    signals: &[CapturedSignal<F>],
    config: &SegmenterConfig,
    chunk_size: usize,
) -> Vec<SegmentationResult<Vec<Segment>>> {
    let chunk_size = chunk_size.max(1);
    let mut results = Vec::with_capacity(signals.len());
    for chunk in signals.chunks(chunk_size) {
        let mut chunk_results: Vec<_> = chunk
            .par_iter()
            .map(|signal| signal.find_segments(config))
            .collect();
        results.append(&mut chunk_results);
    }
    results
}

/// Chunk size that spreads `total_items` evenly across the available CPU
/// cores, at least 1.
#[cfg(feature = "parallel-processing")]
pub fn optimal_chunk_size(total_items: usize) -> usize {
    let cores = num_cpus::get();
    total_items.div_ceil(cores).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::generation::impulse;

    fn capture(len: usize, at: usize) -> CapturedSignal<f64> {
        CapturedSignal::mono(impulse(len, at, 50.0), 100.0).expect("valid signal")
    }

    #[test]
    fn test_segment_all_matches_individual_results() {
        let signals = vec![capture(1000, 500), capture(1000, 300), capture(600, 200)];
        let config = SegmenterConfig::new(100);

        let batch = segment_all(&signals, &config);
        assert_eq!(batch.len(), 3);
        for (signal, result) in signals.iter().zip(&batch) {
            let individual = signal.find_segments(&config).expect("segmentation succeeds");
            assert_eq!(result.as_ref().expect("segmentation succeeds"), &individual);
        }
    }

    #[test]
    fn test_segment_all_reports_errors_in_place() {
        // The middle capture is shorter than the window and must fail
        // without affecting its neighbors.
        let signals = vec![capture(1000, 500), capture(50, 25), capture(1000, 300)];
        let results = segment_all(&signals, &SegmenterConfig::new(100));

        assert!(results[0].is_ok());
        assert!(results[1].is_err());
        assert!(results[2].is_ok());
    }

    #[cfg(feature = "parallel-processing")]
    #[test]
    fn test_parallel_matches_sequential() {
        let signals: Vec<_> = (0..16)
            .map(|ix| capture(1000, 200 + ix * 30))
            .collect();
        let config = SegmenterConfig::new(100);

        let sequential = segment_all(&signals, &config);
        let parallel = segment_all_parallel(&signals, &config);
        assert_eq!(sequential.len(), parallel.len());
        for (a, b) in sequential.iter().zip(&parallel) {
            match (a, b) {
                (Ok(left), Ok(right)) => assert_eq!(left, right),
                (Err(_), Err(_)) => {}
                other => panic!("sequential and parallel disagree: {:?}", other),
            }
        }
    }

    #[cfg(feature = "parallel-processing")]
    #[test]
    fn test_chunked_matches_sequential() {
        let signals: Vec<_> = (0..10)
            .map(|ix| capture(1000, 200 + ix * 50))
            .collect();
        let config = SegmenterConfig::new(100);

        let sequential = segment_all(&signals, &config);
        let chunked = segment_all_chunked(&signals, &config, 3);
        assert_eq!(sequential.len(), chunked.len());
        for (a, b) in sequential.iter().zip(&chunked) {
            assert_eq!(
                a.as_ref().expect("segmentation succeeds"),
                b.as_ref().expect("segmentation succeeds")
            );
        }
    }

    #[cfg(feature = "parallel-processing")]
    #[test]
    fn test_optimal_chunk_size_is_positive() {
        assert!(optimal_chunk_size(0) >= 1);
        assert!(optimal_chunk_size(1) >= 1);
        let chunk = optimal_chunk_size(1000);
        assert!(chunk >= 1);
        assert!(chunk <= 1000);
    }
}
