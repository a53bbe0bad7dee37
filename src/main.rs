//! Bitonic Tour Solver - Command Line Interface

use clap::{Parser, Subcommand};
use bitonic_tsp_solver::benchmark::{Benchmark, BenchmarkConfig};
use bitonic_tsp_solver::points::PointSet;
use bitonic_tsp_solver::solver::BitonicSolver;
use bitonic_tsp_solver::visualization::Visualizer;

use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "bitonic-tsp-solver")]
#[command(version = "1.0")]
#[command(about = "Exact O(n^2) solver for the minimum-length bitonic tour through planar points")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve the bitonic tour for a coordinate file
    Solve {
        /// Path to the coordinate file (one "x y" pair per line; blank
        /// lines and lines starting with '#' are skipped)
        #[arg(short, long)]
        instance: PathBuf,

        /// Output solution to a JSON file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Generate an SVG visualization next to the instance file
        #[arg(long)]
        visualize: bool,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Analyze a coordinate file without solving it
    Analyze {
        /// Path to the coordinate file
        #[arg(short, long)]
        instance: PathBuf,
    },

    /// Generate a random coordinate file
    Generate {
        /// Number of points
        #[arg(short, long)]
        n: usize,

        /// Random seed
        #[arg(short, long, default_value = "42")]
        seed: u64,

        /// Side length of the square the points are drawn from
        #[arg(long, default_value = "1000")]
        extent: f64,

        /// Output file
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Benchmark solve times over random instances of growing size
    Benchmark {
        /// Instance sizes to run
        #[arg(long, value_delimiter = ',', default_values_t = vec![10, 50, 100, 250])]
        sizes: Vec<usize>,

        /// Number of runs per size
        #[arg(short, long, default_value = "5")]
        runs: usize,

        /// Base random seed
        #[arg(short, long, default_value = "42")]
        seed: u64,

        /// Output CSV file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Solve {
            instance,
            output,
            visualize,
            verbose,
        } => {
            solve_instance(&instance, output, visualize, verbose);
        }

        Commands::Analyze { instance } => {
            analyze_instance(&instance);
        }

        Commands::Generate {
            n,
            seed,
            extent,
            output,
        } => {
            generate_instance(n, seed, extent, &output);
        }

        Commands::Benchmark {
            sizes,
            runs,
            seed,
            output,
        } => {
            run_benchmark(sizes, runs, seed, output);
        }
    }
}

fn load_points(path: &PathBuf) -> PointSet {
    match PointSet::from_file(path) {
        Ok(points) => points,
        Err(e) => {
            eprintln!("Error loading instance: {}", e);
            std::process::exit(1);
        }
    }
}

fn solve_instance(path: &PathBuf, output: Option<PathBuf>, visualize: bool, verbose: bool) {
    println!("Loading instance from {:?}...", path);
    let points = load_points(path);

    if verbose {
        println!("{}", points.statistics());
    }

    let mut solver = BitonicSolver::new(&points);
    let solution = match solver.solve() {
        Ok(solution) => solution,
        Err(e) => {
            eprintln!("Solver error: {}", e);
            std::process::exit(1);
        }
    };

    println!("\n========== Results ==========");
    println!("Tour length: {:.4}", solution.length);
    println!("Time: {:.4}s", solution.computation_time);

    if verbose {
        println!("Tour (sorted-order indices): {:?}", solution.tour);
        match solution.coordinates(&points) {
            Ok(coords) => println!("Tour coordinates: {:?}", coords),
            Err(e) => eprintln!("Cannot resolve tour coordinates: {}", e),
        }
    }

    if let Some(out_path) = output {
        let json = serde_json::to_string_pretty(&solution).expect("Failed to serialize solution");
        std::fs::write(&out_path, json).expect("Failed to write output");
        println!("\nSolution saved to {:?}", out_path);
    }

    if visualize {
        let viz = Visualizer::new();
        let svg_path = path.with_extension("svg");
        match viz
            .generate_svg(&points, &solution)
            .and_then(|svg| viz.save_svg(&svg, &svg_path))
        {
            Ok(()) => println!("Visualization saved to {:?}", svg_path),
            Err(e) => eprintln!("Visualization failed: {}", e),
        }
    }
}

fn analyze_instance(path: &PathBuf) {
    let points = load_points(path);

    println!("========== Instance Analysis ==========\n");
    println!("{}", points.statistics());

    if let (Ok(leftmost), Ok(rightmost)) = (points.coordinate(0), points.coordinate(-1)) {
        println!("  Leftmost point: {:?}", leftmost);
        println!("  Rightmost point: {:?}", rightmost);
    }
}

fn generate_instance(n: usize, seed: u64, extent: f64, output: &PathBuf) {
    let points = PointSet::random(n, seed, extent);

    if let Err(e) = points.write_file(output) {
        eprintln!("Error writing instance: {}", e);
        std::process::exit(1);
    }

    println!("Wrote {} points to {:?}", points.len(), output);
}

fn run_benchmark(sizes: Vec<usize>, runs: usize, seed: u64, output: Option<PathBuf>) {
    let config = BenchmarkConfig {
        sizes,
        runs,
        seed,
        ..Default::default()
    };

    let mut benchmark = Benchmark::new(config);
    if let Err(e) = benchmark.run() {
        eprintln!("Benchmark failed: {}", e);
        std::process::exit(1);
    }

    println!("{}", benchmark.generate_report());

    if let Some(out_path) = output {
        benchmark
            .export_to_csv(&out_path)
            .expect("Failed to export results");
        println!("Results exported to {:?}", out_path);
    }
}
