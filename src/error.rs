//! Error types and result utilities for segmentation operations.

use thiserror::Error;

/// Convenience type alias for results that may contain SegmentationError
pub type SegmentationResult<T> = Result<T, SegmentationError>;

/// Error types that can occur during signal segmentation.
#[derive(Error, Debug)]
pub enum SegmentationError {
    /// Error that occurs when a captured signal is malformed.
    ///
    /// This typically happens with empty buffers, ragged multi-axis tuples,
    /// or a sampling frequency that is not a finite positive number.
    #[error("Invalid signal error: {0}")]
    InvalidSignal(String),

    /// Error that occurs when invalid parameters are provided to an operation.
    ///
    /// This includes cases like a zero-length segment window or non-finite
    /// threshold multipliers.
    #[error("Invalid parameter error: {0}")]
    InvalidParameter(String),

    /// Error that occurs when buffer dimensions don't match expected values.
    ///
    /// This happens when a captured buffer is shorter than the requested
    /// window, or a segment range falls outside the signal.
    #[error("Dimension mismatch error: {0}")]
    DimensionMismatch(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_includes_detail() {
        let err = SegmentationError::InvalidParameter("window must be positive".to_string());
        assert_eq!(
            err.to_string(),
            "Invalid parameter error: window must be positive"
        );

        let err = SegmentationError::DimensionMismatch("buffer too short".to_string());
        assert!(err.to_string().contains("buffer too short"));
    }
}
