//! Failure kinds reported by [`Statistics`](crate::statistics::Statistics) queries.

/// Errors returned by the statistical queries.
///
/// Each variant is a distinct failure kind so callers can branch on it.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum StatsError {
    #[error("the data set has zero elements")]
    EmptyDataset,
    #[error("need at least {required} samples, got {actual}")]
    InsufficientSampleSize { required: usize, actual: usize },
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl StatsError {
    /// Short machine-readable name, used for the `error_type` column of
    /// persisted summaries.
    pub fn kind(&self) -> &'static str {
        match self {
            StatsError::EmptyDataset => "empty_dataset",
            StatsError::InsufficientSampleSize { .. } => "insufficient_sample_size",
            StatsError::InvalidArgument(_) => "invalid_argument",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kinds_are_distinct() {
        let empty = StatsError::EmptyDataset;
        let small = StatsError::InsufficientSampleSize {
            required: 2,
            actual: 1,
        };
        assert_ne!(empty.kind(), small.kind());
        assert_eq!(small.kind(), "insufficient_sample_size");
    }

    #[test]
    fn test_display_messages() {
        assert_eq!(
            StatsError::EmptyDataset.to_string(),
            "the data set has zero elements"
        );
        assert_eq!(
            StatsError::InsufficientSampleSize {
                required: 2,
                actual: 1
            }
            .to_string(),
            "need at least 2 samples, got 1"
        );
    }
}
