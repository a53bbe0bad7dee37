//! Solution representation for the bitonic tour solver.

use crate::error::Result;
use crate::points::PointSet;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A computed bitonic tour.
///
/// The tour is a cyclic sequence of sorted-order point indices, starting
/// and ending at the bitonic turn point (the first vertex is repeated at
/// the end). The degenerate single-point tour is `[0]` with length 0.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Solution {
    /// The tour as a sequence of sorted-order point indices.
    pub tour: Vec<usize>,
    /// Total tour length.
    pub length: f64,
    /// Algorithm that generated this solution.
    pub algorithm: String,
    /// Computation time in seconds.
    pub computation_time: f64,
}

impl Solution {
    pub fn new(tour: Vec<usize>, length: f64, algorithm: &str) -> Self {
        Solution {
            tour,
            length,
            algorithm: algorithm.to_string(),
            computation_time: 0.0,
        }
    }

    /// Whether the tour closes back on its starting vertex.
    pub fn is_closed(&self) -> bool {
        match self.tour.len() {
            0 | 1 => true,
            _ => self.tour.first() == self.tour.last(),
        }
    }

    /// Whether the tour visits each of the indices `0..n` exactly once
    /// (not counting the repeated closing vertex).
    pub fn visits_all(&self, n: usize) -> bool {
        let visited = if self.tour.len() > 1 {
            &self.tour[..self.tour.len() - 1]
        } else {
            &self.tour[..]
        };
        if visited.len() != n {
            return false;
        }
        let unique: HashSet<usize> = visited.iter().copied().collect();
        unique.len() == n && unique.iter().all(|&i| i < n)
    }

    /// Resolve the tour indices to coordinates against the point set the
    /// tour was computed from.
    pub fn coordinates(&self, points: &PointSet) -> Result<Vec<(f64, f64)>> {
        self.tour
            .iter()
            .map(|&i| points.coordinate(i as isize))
            .collect()
    }
}

impl std::fmt::Display for Solution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Solution ({})", self.algorithm)?;
        writeln!(f, "  Length: {:.4}", self.length)?;
        writeln!(f, "  Time: {:.4}s", self.computation_time)?;
        writeln!(f, "  Tour: {:?}", self.tour)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closure_and_coverage() {
        let sol = Solution::new(vec![2, 1, 0, 3, 2], 10.0, "BitonicDP");
        assert!(sol.is_closed());
        assert!(sol.visits_all(4));
        assert!(!sol.visits_all(5));

        let open = Solution::new(vec![0, 1, 2], 5.0, "BitonicDP");
        assert!(!open.is_closed());

        let degenerate = Solution::new(vec![0], 0.0, "BitonicDP");
        assert!(degenerate.is_closed());
        assert!(degenerate.visits_all(1));
    }

    #[test]
    fn test_coordinates_resolution() {
        let mut points = PointSet::new();
        points.add_point(0.0, 0.0).unwrap();
        points.add_point(1.0, 2.0).unwrap();

        let sol = Solution::new(vec![0, 1, 0], 2.0, "BitonicDP");
        let coords = sol.coordinates(&points).unwrap();
        assert_eq!(coords, vec![(0.0, 0.0), (1.0, 2.0), (0.0, 0.0)]);
    }

    #[test]
    fn test_json_round_trip() {
        let sol = Solution::new(vec![0, 1, 2, 0], 6.5, "BitonicDP");
        let json = serde_json::to_string(&sol).unwrap();
        let back: Solution = serde_json::from_str(&json).unwrap();
        assert_eq!(back.tour, sol.tour);
        assert_eq!(back.length, sol.length);
        assert_eq!(back.algorithm, sol.algorithm);
    }
}
