//! Exact dynamic-programming engine for the minimum-length bitonic tour.
//!
//! A bitonic tour runs strictly left-to-right from the leftmost point to
//! the rightmost, then strictly right-to-left back to the start, so any
//! vertical line crosses it at most twice. Over points sorted by x this
//! restricted TSP variant is solved exactly in O(n^2) time.
//!
//! The subproblem `PartialTour(i, j)` (i < j) is the shortest open bitonic
//! path that starts at point i, ends at point j, and visits every point
//! with index <= j exactly once. The table is filled row by row in j; the
//! final tour is obtained by closing the best last-row path with the edge
//! back to the rightmost point.

use crate::error::{Error, Result};
use crate::points::{Point, PointSet};
use crate::solution::Solution;
use rayon::prelude::*;
use std::time::Instant;

/// Rows shorter than this are filled serially; the rayon dispatch only
/// pays for itself on wide rows.
const PARALLEL_ROW_THRESHOLD: usize = 64;

/// One cell of the DP table: the minimum-length open bitonic path for a
/// pair of endpoints, written exactly once during the fill pass.
///
/// Invariant: for pair (i, j) the path holds exactly the indices `0..=j`
/// with no repeats, its last element is `j`, and its first element is the
/// other endpoint of the open path.
#[derive(Debug, Clone, PartialEq)]
pub struct PartialTour {
    /// Length of the open path; strictly positive.
    pub cost: f64,
    /// Point indices from one endpoint to the other.
    pub path: Vec<usize>,
}

/// The bitonic DP engine.
///
/// Owns a snapshot of the x-sorted points taken at construction time, so
/// later mutations of the source [`PointSet`] never invalidate a computed
/// table; build a new solver instead. The triangular table is stored as a
/// flat arena indexed by `j*(j-1)/2 + i`, with `None` marking unfilled
/// cells.
pub struct BitonicSolver {
    points: Vec<Point>,
    table: Vec<Option<PartialTour>>,
}

impl BitonicSolver {
    /// Snapshot the x-sorted points and allocate the (empty) table.
    pub fn new(set: &PointSet) -> Self {
        let points = set.sorted_points().to_vec();
        let n = points.len();
        BitonicSolver {
            points,
            table: vec![None; n * n.saturating_sub(1) / 2],
        }
    }

    /// Number of points in the snapshot.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Euclidean distance between sorted-sequence indices `a` and `b`.
    #[inline]
    pub fn distance(&self, a: usize, b: usize) -> f64 {
        self.points[a].distance(self.points[b])
    }

    /// Compute the minimum-length closed bitonic tour.
    ///
    /// Fails with [`Error::EmptyProblem`] on zero points. A single point
    /// yields the degenerate tour of length 0. Deterministic: repeated
    /// calls on the same solver refill the table identically.
    pub fn solve(&mut self) -> Result<Solution> {
        if self.points.is_empty() {
            return Err(Error::EmptyProblem);
        }

        let start = Instant::now();
        let mut solution = if self.points.len() == 1 {
            Solution::new(vec![0], 0.0, "BitonicDP")
        } else {
            self.populate()?;
            self.combine()?
        };
        solution.computation_time = start.elapsed().as_secs_f64();

        log::info!(
            "solved bitonic tour over {} points: length {:.4} in {:.4}s",
            self.points.len(),
            solution.length,
            solution.computation_time
        );
        Ok(solution)
    }

    /// Cost of the computed partial tour for the pair (i, j).
    pub fn cost(&self, i: usize, j: usize) -> Result<f64> {
        self.entry(i, j).map(|t| t.cost)
    }

    /// Point sequence of the computed partial tour for the pair (i, j).
    pub fn path(&self, i: usize, j: usize) -> Result<&[usize]> {
        self.entry(i, j).map(|t| t.path.as_slice())
    }

    /// Fill the table for j = 1..=R, each row in increasing i.
    ///
    /// Entries within a row only depend on row j-1, so wide rows are
    /// computed in parallel; results are collected in index order, which
    /// keeps the first-candidate tie-break deterministic either way.
    fn populate(&mut self) -> Result<()> {
        let rightmost = self.points.len() - 1;

        for j in 1..=rightmost {
            let row: Vec<PartialTour> = if j >= PARALLEL_ROW_THRESHOLD {
                (0..j)
                    .into_par_iter()
                    .map(|i| self.compute_entry(i, j))
                    .collect::<Result<_>>()?
            } else {
                (0..j)
                    .map(|i| self.compute_entry(i, j))
                    .collect::<Result<_>>()?
            };

            for (i, tour) in row.into_iter().enumerate() {
                self.insert(i, j, tour)?;
            }
        }

        log::debug!(
            "populated {} partial tours across {} rows",
            self.table.len(),
            rightmost
        );
        Ok(())
    }

    /// Close the tour: pick the i minimizing `cost(i, R) + distance(i, R)`
    /// and append i to the winning path. Ties keep the smallest i.
    fn combine(&self) -> Result<Solution> {
        let rightmost = self.points.len() - 1;

        let mut best_i = 0;
        let mut best_length = f64::INFINITY;
        for i in 0..rightmost {
            let length = self.cost(i, rightmost)? + self.distance(i, rightmost);
            if length < best_length {
                best_length = length;
                best_i = i;
            }
        }

        // The tour is returned as a cyclic sequence starting and ending at
        // the bitonic turn point, so the first vertex repeats at the end.
        let mut tour = self.path(best_i, rightmost)?.to_vec();
        tour.push(best_i);

        Ok(Solution::new(tour, best_length, "BitonicDP"))
    }

    /// The recurrence for one cell, reading only rows below j.
    fn compute_entry(&self, i: usize, j: usize) -> Result<PartialTour> {
        if i + 1 == j {
            if i == 0 {
                // Base case: the leftmost pair, joined directly.
                return Ok(PartialTour {
                    cost: self.distance(0, 1),
                    path: vec![0, 1],
                });
            }

            // Adjacent endpoints: j must be entered from some x < i that
            // is the other end of a partial tour through i. First minimum
            // in increasing x wins.
            let mut best: Option<(usize, f64)> = None;
            for x in 0..i {
                let cost = self.cost(x, i)? + self.distance(x, j);
                if best.map_or(true, |(_, c)| cost < c) {
                    best = Some((x, cost));
                }
            }
            let (x, cost) = best.ok_or(Error::InvalidCall {
                i,
                j,
                max: self.points.len() - 1,
            })?;

            // Reverse the winning path so it ends at i, then append j.
            let mut path: Vec<usize> = self.path(x, i)?.iter().rev().copied().collect();
            path.push(j);
            Ok(PartialTour { cost, path })
        } else {
            // Non-adjacent: the only bitonic continuation extends the
            // (i, j-1) path with the edge (j-1, j).
            let previous = self.entry(i, j - 1)?;
            let mut path = previous.path.clone();
            path.push(j);
            Ok(PartialTour {
                cost: previous.cost + self.distance(j - 1, j),
                path,
            })
        }
    }

    fn entry(&self, i: usize, j: usize) -> Result<&PartialTour> {
        if i >= j {
            return Err(Error::InvalidCall {
                i,
                j,
                max: self.points.len().saturating_sub(1),
            });
        }
        if j >= self.points.len() {
            return Err(Error::UnknownTour { i, j });
        }
        self.table[j * (j - 1) / 2 + i]
            .as_ref()
            .ok_or(Error::UnknownTour { i, j })
    }

    /// Record one cell. Rejects impossible pairs and non-positive costs;
    /// both indicate a broken recurrence, not bad user input.
    fn insert(&mut self, i: usize, j: usize, tour: PartialTour) -> Result<()> {
        if i >= j || j >= self.points.len() {
            return Err(Error::InvalidCall {
                i,
                j,
                max: self.points.len().saturating_sub(1),
            });
        }
        if tour.cost <= 0.0 {
            return Err(Error::InvalidCost {
                i,
                j,
                cost: tour.cost,
            });
        }
        self.table[j * (j - 1) / 2 + i] = Some(tour);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-6;

    fn set_from(coords: &[(f64, f64)]) -> PointSet {
        let mut set = PointSet::new();
        for &(x, y) in coords {
            set.add_point(x, y).unwrap();
        }
        set
    }

    /// The arrowhead scenario: (0,0),(1,1),(2,1),(3,0).
    fn arrowhead() -> BitonicSolver {
        BitonicSolver::new(&set_from(&[(0.0, 0.0), (1.0, 1.0), (2.0, 1.0), (3.0, 0.0)]))
    }

    /// The seven points of Cormen et al., Figure 15.9.
    fn cormen() -> BitonicSolver {
        BitonicSolver::new(&set_from(&[
            (0.0, 6.0),
            (1.0, 0.0),
            (2.0, 3.0),
            (5.0, 4.0),
            (6.0, 1.0),
            (7.0, 5.0),
            (8.0, 2.0),
        ]))
    }

    #[test]
    fn test_empty_problem() {
        let mut solver = BitonicSolver::new(&PointSet::new());
        assert!(matches!(solver.solve(), Err(Error::EmptyProblem)));
    }

    #[test]
    fn test_single_point_degenerate_tour() {
        let mut solver = BitonicSolver::new(&set_from(&[(2.0, 5.0)]));
        let solution = solver.solve().unwrap();
        assert_eq!(solution.length, 0.0);
        assert_eq!(solution.tour, vec![0]);
    }

    #[test]
    fn test_two_points_out_and_back() {
        let mut solver = BitonicSolver::new(&set_from(&[(0.0, 0.0), (3.0, 4.0)]));
        let solution = solver.solve().unwrap();
        assert!((solution.length - 10.0).abs() < EPS);
        assert_eq!(solution.tour, vec![0, 1, 0]);
    }

    #[test]
    fn test_distance_symmetric_and_zero_on_diagonal() {
        let solver = arrowhead();
        for a in 0..4 {
            assert_eq!(solver.distance(a, a), 0.0);
            for b in 0..4 {
                assert!((solver.distance(a, b) - solver.distance(b, a)).abs() < EPS);
            }
        }
    }

    #[test]
    fn test_arrowhead_partial_costs() {
        let mut solver = arrowhead();
        solver.solve().unwrap();

        let expected = [
            ((0, 1), 1.414214),
            ((0, 2), 2.414214),
            ((0, 3), 3.828427),
            ((1, 2), 3.650282),
            ((1, 3), 5.064495),
            ((2, 3), 5.414214),
        ];
        for ((i, j), cost) in expected {
            assert!(
                (solver.cost(i, j).unwrap() - cost).abs() < EPS,
                "cost({}, {}) = {}, expected {}",
                i,
                j,
                solver.cost(i, j).unwrap(),
                cost
            );
        }
    }

    #[test]
    fn test_arrowhead_tie_break_path() {
        // (2,3) has two candidates; x = 0 wins, so the path turns back
        // through 1 before reaching 0: 2 -> 1 -> 0 -> 3.
        let mut solver = arrowhead();
        solver.solve().unwrap();
        assert_eq!(solver.path(2, 3).unwrap(), &[2, 1, 0, 3]);
        assert_eq!(solver.path(1, 2).unwrap(), &[1, 0, 2]);
    }

    #[test]
    fn test_arrowhead_solution() {
        let mut solver = arrowhead();
        let solution = solver.solve().unwrap();
        assert!((solution.length - 6.828427).abs() < EPS);
        assert_eq!(solution.tour, vec![0, 1, 2, 3, 0]);
        assert!(solution.is_closed());
        assert!(solution.visits_all(4));
    }

    #[test]
    fn test_cormen_figure_15_9() {
        let mut solver = cormen();
        let solution = solver.solve().unwrap();
        assert!((solution.length - 25.584025).abs() < EPS);
        // Turn point is (6,1): descend 4 -> 1 -> 0, ascend 0 -> 2 -> 3 -> 5 -> 6.
        assert_eq!(solution.tour, vec![4, 1, 0, 2, 3, 5, 6, 4]);
    }

    #[test]
    fn test_partial_tour_defining_invariant() {
        let mut solver = cormen();
        solver.solve().unwrap();

        for j in 1..7 {
            for i in 0..j {
                let path = solver.path(i, j).unwrap();
                assert_eq!(path.len(), j + 1, "path({}, {}) length", i, j);
                assert_eq!(path[0], i, "path({}, {}) head", i, j);
                assert_eq!(*path.last().unwrap(), j, "path({}, {}) tail", i, j);
                // Exactly the indices 0..=j, no repeats.
                let mut seen = vec![false; j + 1];
                for &p in path {
                    assert!(p <= j);
                    assert!(!seen[p], "repeated index {} in path({}, {})", p, i, j);
                    seen[p] = true;
                }
            }
        }
    }

    #[test]
    fn test_unpopulated_pair_is_unknown() {
        let solver = arrowhead();
        assert!(matches!(solver.cost(0, 2), Err(Error::UnknownTour { i: 0, j: 2 })));
        assert!(matches!(solver.path(1, 3), Err(Error::UnknownTour { .. })));
        // Out of table bounds is also unknown, never stale or zero.
        assert!(matches!(solver.cost(0, 99), Err(Error::UnknownTour { .. })));
    }

    #[test]
    fn test_reversed_pair_is_invalid_call() {
        let mut solver = arrowhead();
        solver.solve().unwrap();
        assert!(matches!(solver.cost(2, 1), Err(Error::InvalidCall { .. })));
        assert!(matches!(solver.cost(1, 1), Err(Error::InvalidCall { .. })));
    }

    #[test]
    fn test_solve_is_idempotent() {
        let mut solver = cormen();
        let first = solver.solve().unwrap();
        let second = solver.solve().unwrap();
        assert_eq!(first.length, second.length);
        assert_eq!(first.tour, second.tour);
    }

    #[test]
    fn test_insert_rejects_non_positive_cost() {
        let mut solver = arrowhead();
        let bogus = PartialTour {
            cost: 0.0,
            path: vec![0, 1],
        };
        assert!(matches!(
            solver.insert(0, 1, bogus),
            Err(Error::InvalidCost { cost, .. }) if cost == 0.0
        ));
        let misplaced = PartialTour {
            cost: 1.0,
            path: vec![1, 0],
        };
        assert!(matches!(solver.insert(1, 0, misplaced), Err(Error::InvalidCall { .. })));
    }

    /// Reference fill without the parallel row dispatch, used to pin the
    /// wide-row path to the serial semantics.
    fn reference_costs(points: &[Point]) -> Vec<Vec<f64>> {
        let n = points.len();
        let d = |a: usize, b: usize| points[a].distance(points[b]);
        let mut cost = vec![vec![f64::NAN; n]; n];
        cost[0][1] = d(0, 1);
        for j in 2..n {
            for i in 0..j {
                cost[i][j] = if i + 1 == j {
                    (0..i)
                        .map(|x| cost[x][i] + d(x, j))
                        .fold(f64::INFINITY, f64::min)
                } else {
                    cost[i][j - 1] + d(j - 1, j)
                };
            }
        }
        cost
    }

    #[test]
    fn test_parallel_rows_match_serial_reference() {
        // 100 points puts every row past PARALLEL_ROW_THRESHOLD eventually.
        let set = PointSet::random(100, 42, 1000.0);
        let mut solver = BitonicSolver::new(&set);
        solver.solve().unwrap();

        let reference = reference_costs(set.sorted_points());
        for j in 1..100 {
            for i in 0..j {
                assert!(
                    (solver.cost(i, j).unwrap() - reference[i][j]).abs() < 1e-7,
                    "cost({}, {}) diverged from serial reference",
                    i,
                    j
                );
            }
        }
    }
}
