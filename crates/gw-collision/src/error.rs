//! Error types for collision map operations.

use thiserror::Error;

/// Errors raised when decoding external map data into collision updates.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum CollisionError {
    /// A loc shape id outside the known range `0..=22`.
    #[error("unknown loc shape id: {0}")]
    UnknownShape(i32),

    /// A loc rotation outside the known range `0..=3`.
    #[error("invalid loc angle: {0} (expected 0..=3)")]
    InvalidAngle(i32),

    /// A loc footprint with a zero or negative dimension.
    #[error("invalid loc footprint: {width}x{length} (dimensions must be >= 1)")]
    InvalidFootprint {
        /// West-east extent, in tiles.
        width: i32,
        /// South-north extent, in tiles.
        length: i32,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CollisionError::UnknownShape(23);
        assert_eq!(err.to_string(), "unknown loc shape id: 23");

        let err = CollisionError::InvalidFootprint {
            width: 0,
            length: 2,
        };
        assert!(err.to_string().contains("0x2"));
    }
}
