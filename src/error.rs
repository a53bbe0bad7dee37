//! Error taxonomy for the bitonic tour solver.
//!
//! User-facing errors (`DuplicateCoordinate`, `EmptyProblem`, I/O and
//! parse failures) are recoverable by the caller. The remaining variants
//! signal a broken invariant inside the DP engine and are fatal for the
//! `solve()` call that raised them.

use std::path::PathBuf;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by the point store, the DP engine, or the ingestion layer.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A point with this x-coordinate is already stored. The x-order must
    /// be a strict total order, so x-coordinates double as point identity.
    #[error(
        "duplicate x-coordinate {x}: existing point has y = {existing_y}, rejected point has y = {new_y}"
    )]
    DuplicateCoordinate {
        x: f64,
        existing_y: f64,
        new_y: f64,
    },

    /// A sorted-sequence lookup was outside `-(len-1) ..= len-1`.
    #[error("point index {index} out of range for {len} points")]
    IndexOutOfRange { index: isize, len: usize },

    /// `solve()` was called on an empty point set.
    #[error("cannot solve an empty problem: no points were added")]
    EmptyProblem,

    /// A cost or path was requested for a pair that was never populated.
    #[error("no partial tour was computed for the pair ({i}, {j})")]
    UnknownTour { i: usize, j: usize },

    /// A table operation was requested for a pair that cannot exist
    /// (i >= j, or j beyond the rightmost index).
    #[error("invalid partial-tour pair ({i}, {j}): expected i < j <= {max}")]
    InvalidCall { i: usize, j: usize, max: usize },

    /// The recurrence tried to record a non-positive cost. Distinct
    /// x-coordinates make every open path strictly positive in length,
    /// so this only happens when the engine itself is broken.
    #[error("refusing to record non-positive cost {cost} for pair ({i}, {j})")]
    InvalidCost { i: usize, j: usize, cost: f64 },

    /// A coordinate file could not be read or written.
    #[error("cannot access {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A coordinate file line did not parse as two real numbers.
    #[error("invalid point on line {line}: {message}")]
    InvalidFormat { line: usize, message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_message_names_both_y_values() {
        let err = Error::DuplicateCoordinate {
            x: 2.0,
            existing_y: 3.5,
            new_y: -1.0,
        };
        let msg = err.to_string();
        assert!(msg.contains("3.5"));
        assert!(msg.contains("-1"));
        assert!(msg.contains('2'));
    }

    #[test]
    fn test_unknown_tour_message() {
        let err = Error::UnknownTour { i: 1, j: 4 };
        assert_eq!(err.to_string(), "no partial tour was computed for the pair (1, 4)");
    }
}
