//! Point storage and ingestion for the bitonic tour solver.
//!
//! The [`PointSet`] holds the unsorted input points, rejects duplicate
//! x-coordinates (the left-to-right order must be a strict total order for
//! a bitonic tour to be well defined), and produces a cached x-sorted view
//! that every other component uses as its index space: index 0 is the
//! leftmost point, index N-1 the rightmost.

use crate::error::{Error, Result};
use ordered_float::OrderedFloat;
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::cell::OnceCell;
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

/// A point in the plane. Identity is defined by the x-coordinate: no two
/// stored points may share one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// X coordinate
    pub x: f64,
    /// Y coordinate
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }

    /// Squared Euclidean distance to another point.
    #[inline]
    pub fn distance_squared(self, other: Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    /// Euclidean distance to another point.
    #[inline]
    pub fn distance(self, other: Point) -> f64 {
        self.distance_squared(other).sqrt()
    }
}

/// The set of input points, with a lazily computed x-sorted view.
///
/// The sorted view is cached until the next successful [`PointSet::add_point`];
/// a cache hit is O(1), a recompute O(N log N).
#[derive(Debug, Default)]
pub struct PointSet {
    /// Points in insertion order.
    points: Vec<Point>,
    /// Maps each stored x-coordinate to its y, for duplicate rejection.
    by_x: HashMap<OrderedFloat<f64>, f64>,
    /// Cached x-sorted view, cleared on every mutation.
    sorted: OnceCell<Vec<Point>>,
}

impl PointSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a point, enforcing x-coordinate uniqueness.
    ///
    /// On success the cached sorted view is invalidated and the inserted
    /// point is returned. Fails with [`Error::DuplicateCoordinate`] if a
    /// point with the same x is already stored, naming both y-values.
    pub fn add_point(&mut self, x: f64, y: f64) -> Result<Point> {
        if let Some(&existing_y) = self.by_x.get(&OrderedFloat(x)) {
            return Err(Error::DuplicateCoordinate {
                x,
                existing_y,
                new_y: y,
            });
        }

        let point = Point::new(x, y);
        self.by_x.insert(OrderedFloat(x), y);
        self.points.push(point);
        self.sorted.take();
        Ok(point)
    }

    /// Number of distinct points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Points in insertion order.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// The points ordered by ascending x. Cached until the next mutation.
    pub fn sorted_points(&self) -> &[Point] {
        self.sorted.get_or_init(|| {
            let mut sorted = self.points.clone();
            sorted.sort_by_key(|p| OrderedFloat(p.x));
            sorted
        })
    }

    /// Coordinates of the point at `index` in the sorted sequence.
    ///
    /// Negative indices count from the end: -1 is the rightmost point.
    /// Fails with [`Error::IndexOutOfRange`] when `|index| >= len`.
    pub fn coordinate(&self, index: isize) -> Result<(f64, f64)> {
        let len = self.len();
        if index.unsigned_abs() >= len {
            return Err(Error::IndexOutOfRange { index, len });
        }
        let resolved = if index < 0 {
            len - index.unsigned_abs()
        } else {
            index as usize
        };
        let p = self.sorted_points()[resolved];
        Ok((p.x, p.y))
    }

    /// Parse a point set from a whitespace-separated coordinate file.
    ///
    /// One `x y` pair per line; blank lines and lines starting with `#`
    /// are skipped.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(&path).map_err(|e| Error::Io {
            path: path.as_ref().to_path_buf(),
            source: e,
        })?;
        let reader = BufReader::new(file);

        let mut set = PointSet::new();

        for (line_no, line) in reader.lines().enumerate() {
            let line = line.map_err(|e| Error::Io {
                path: path.as_ref().to_path_buf(),
                source: e,
            })?;
            let line = line.trim();

            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let parts: Vec<&str> = line.split_whitespace().collect();
            if parts.len() != 2 {
                return Err(Error::InvalidFormat {
                    line: line_no + 1,
                    message: format!("expected two coordinates, found {}", parts.len()),
                });
            }

            let x: f64 = parts[0].parse().map_err(|_| Error::InvalidFormat {
                line: line_no + 1,
                message: format!("invalid x coordinate {:?}", parts[0]),
            })?;
            let y: f64 = parts[1].parse().map_err(|_| Error::InvalidFormat {
                line: line_no + 1,
                message: format!("invalid y coordinate {:?}", parts[1]),
            })?;

            set.add_point(x, y)?;
        }

        Ok(set)
    }

    /// Write the points (insertion order) to a coordinate file readable by
    /// [`PointSet::from_file`].
    pub fn write_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut file = File::create(&path).map_err(|e| Error::Io {
            path: path.as_ref().to_path_buf(),
            source: e,
        })?;
        let mut contents = format!("# {} points\n", self.len());
        for p in &self.points {
            contents.push_str(&format!("{} {}\n", p.x, p.y));
        }
        file.write_all(contents.as_bytes()).map_err(|e| Error::Io {
            path: path.as_ref().to_path_buf(),
            source: e,
        })
    }

    /// Generate a deterministic random instance with `n` points in
    /// `[0, extent) x [0, extent)`. X-coordinates are guaranteed unique.
    pub fn random(n: usize, seed: u64, extent: f64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut set = PointSet::new();

        while set.len() < n {
            let x = rng.gen_range(0.0..extent);
            let y = rng.gen_range(0.0..extent);
            // Collisions are essentially impossible for f64 draws, but the
            // uniqueness contract is enforced by add_point regardless.
            let _ = set.add_point(x, y);
        }

        set
    }

    /// Summary statistics used by the `analyze` command.
    pub fn statistics(&self) -> PointSetStatistics {
        let sorted = self.sorted_points();
        let n = sorted.len();

        let (mut min_x, mut max_x) = (f64::INFINITY, f64::NEG_INFINITY);
        let (mut min_y, mut max_y) = (f64::INFINITY, f64::NEG_INFINITY);
        for p in sorted {
            min_x = min_x.min(p.x);
            max_x = max_x.max(p.x);
            min_y = min_y.min(p.y);
            max_y = max_y.max(p.y);
        }

        let gaps: Vec<f64> = sorted.windows(2).map(|w| w[1].x - w[0].x).collect();
        let min_gap = gaps.iter().cloned().fold(f64::INFINITY, f64::min);
        let avg_gap = if gaps.is_empty() {
            0.0
        } else {
            gaps.iter().sum::<f64>() / gaps.len() as f64
        };

        PointSetStatistics {
            count: n,
            min_x,
            max_x,
            min_y,
            max_y,
            min_x_gap: if gaps.is_empty() { 0.0 } else { min_gap },
            avg_x_gap: avg_gap,
        }
    }
}

/// Statistics about a point set
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PointSetStatistics {
    pub count: usize,
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
    /// Smallest x-distance between neighbouring points in sorted order.
    pub min_x_gap: f64,
    pub avg_x_gap: f64,
}

impl std::fmt::Display for PointSetStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Points: {}", self.count)?;
        writeln!(f, "  X range: [{:.2}, {:.2}]", self.min_x, self.max_x)?;
        writeln!(f, "  Y range: [{:.2}, {:.2}]", self.min_y, self.max_y)?;
        writeln!(f, "  Min x gap: {:.4}", self.min_x_gap)?;
        writeln!(f, "  Avg x gap: {:.4}", self.avg_x_gap)
    }
}
