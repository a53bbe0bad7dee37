//! Bitonic Tour Solver Library
//!
//! An exact solver for the minimum-length **bitonic tour** through a set
//! of planar points: a closed tour that visits every point, proceeding
//! strictly left-to-right from the leftmost point to the rightmost, then
//! strictly right-to-left back to the start. Unlike the general Euclidean
//! TSP, this restricted variant is solved exactly in O(n^2) time by
//! dynamic programming over the points sorted by x-coordinate.
//!
//! # Example
//!
//! ```
//! use bitonic_tsp_solver::points::PointSet;
//! use bitonic_tsp_solver::solver::BitonicSolver;
//!
//! let mut points = PointSet::new();
//! for (x, y) in [(0.0, 0.0), (1.0, 1.0), (2.0, 1.0), (3.0, 0.0)] {
//!     points.add_point(x, y).unwrap();
//! }
//!
//! let mut solver = BitonicSolver::new(&points);
//! let solution = solver.solve().unwrap();
//!
//! assert!((solution.length - 6.8284).abs() < 1e-3);
//! assert_eq!(solution.tour, vec![0, 1, 2, 3, 0]);
//! ```

pub mod benchmark;
pub mod error;
pub mod points;
pub mod solution;
pub mod solver;
pub mod visualization;

pub use error::{Error, Result};
pub use points::{Point, PointSet};
pub use solution::Solution;
pub use solver::BitonicSolver;
