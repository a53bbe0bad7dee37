//! Benchmarking module for the bitonic tour solver.
//!
//! Times the O(n^2) fill over deterministic random instances of growing
//! size, collects per-size statistics, and exports results.

use crate::error::Result;
use crate::points::PointSet;
use crate::solver::BitonicSolver;

use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::Path;

/// Result of solving a single random instance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunResult {
    /// Number of points
    pub size: usize,
    /// Seed the instance was generated from
    pub seed: u64,
    /// Optimal bitonic tour length
    pub length: f64,
    /// Computation time in seconds
    pub time: f64,
}

/// Aggregated statistics for one instance size
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SizeStatistics {
    pub size: usize,
    pub runs: usize,
    pub avg_time: f64,
    pub min_time: f64,
    pub max_time: f64,
    pub std_time: f64,
    pub avg_length: f64,
}

/// Benchmark configuration
#[derive(Debug, Clone)]
pub struct BenchmarkConfig {
    /// Instance sizes to solve
    pub sizes: Vec<usize>,
    /// Number of random instances per size
    pub runs: usize,
    /// Base seed; run r of size s uses seed `base + r`
    pub seed: u64,
    /// Side length of the square the points are drawn from
    pub extent: f64,
}

impl Default for BenchmarkConfig {
    fn default() -> Self {
        BenchmarkConfig {
            sizes: vec![10, 50, 100, 250],
            runs: 5,
            seed: 42,
            extent: 1000.0,
        }
    }
}

/// Benchmarking engine
pub struct Benchmark {
    config: BenchmarkConfig,
    results: Vec<RunResult>,
}

impl Benchmark {
    pub fn new(config: BenchmarkConfig) -> Self {
        Benchmark {
            config,
            results: Vec::new(),
        }
    }

    /// Solve every configured (size, run) pair, recording lengths and times.
    pub fn run(&mut self) -> Result<()> {
        for &size in &self.config.sizes.clone() {
            log::info!("benchmarking size {}", size);

            for run in 0..self.config.runs {
                let seed = self.config.seed + run as u64;
                let points = PointSet::random(size, seed, self.config.extent);
                let solution = BitonicSolver::new(&points).solve()?;

                self.results.push(RunResult {
                    size,
                    seed,
                    length: solution.length,
                    time: solution.computation_time,
                });
            }
        }
        Ok(())
    }

    /// Per-size aggregates, in increasing size order.
    pub fn compute_statistics(&self) -> Vec<SizeStatistics> {
        let mut statistics = Vec::new();

        for &size in &self.config.sizes {
            let runs: Vec<&RunResult> = self.results.iter().filter(|r| r.size == size).collect();
            if runs.is_empty() {
                continue;
            }

            let times: Vec<f64> = runs.iter().map(|r| r.time).collect();
            let avg_time = times.iter().sum::<f64>() / times.len() as f64;
            let min_time = times.iter().cloned().fold(f64::INFINITY, f64::min);
            let max_time = times.iter().cloned().fold(0.0, f64::max);
            let variance = times
                .iter()
                .map(|t| (t - avg_time).powi(2))
                .sum::<f64>()
                / times.len() as f64;
            let avg_length =
                runs.iter().map(|r| r.length).sum::<f64>() / runs.len() as f64;

            statistics.push(SizeStatistics {
                size,
                runs: runs.len(),
                avg_time,
                min_time,
                max_time,
                std_time: variance.sqrt(),
                avg_length,
            });
        }

        statistics
    }

    /// Export raw results to CSV
    pub fn export_to_csv<P: AsRef<Path>>(&self, path: P) -> std::io::Result<()> {
        let file = File::create(path)?;
        let mut writer = csv::Writer::from_writer(file);

        for result in &self.results {
            writer.serialize(result)?;
        }

        writer.flush()?;
        Ok(())
    }

    /// Generate summary report
    pub fn generate_report(&self) -> String {
        let mut report = String::new();

        report.push_str("========================================\n");
        report.push_str("     Bitonic Tour Benchmark Report\n");
        report.push_str("========================================\n\n");
        report.push_str(&format!(
            "{:<8} {:>6} {:>12} {:>12} {:>12} {:>14}\n",
            "Size", "Runs", "Avg Time", "Min Time", "Max Time", "Avg Length"
        ));
        report.push_str("-".repeat(68).as_str());
        report.push('\n');

        for stat in self.compute_statistics() {
            report.push_str(&format!(
                "{:<8} {:>6} {:>12.4} {:>12.4} {:>12.4} {:>14.2}\n",
                stat.size, stat.runs, stat.avg_time, stat.min_time, stat.max_time, stat.avg_length
            ));
        }

        report.push_str("-".repeat(68).as_str());
        report.push('\n');

        report
    }

    /// Get all results
    pub fn results(&self) -> &[RunResult] {
        &self.results
    }
}
