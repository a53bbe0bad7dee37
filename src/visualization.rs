//! SVG visualization of bitonic tours.
//!
//! Renders the two monotonic chains of a tour in distinct colors so the
//! "any vertical line crosses at most twice" structure is visible.

use crate::error::{Error, Result};
use crate::points::PointSet;
use crate::solution::Solution;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// SVG visualization generator
pub struct Visualizer {
    /// Canvas width
    pub width: f64,
    /// Canvas height
    pub height: f64,
    /// Margin
    pub margin: f64,
    /// Node radius
    pub node_radius: f64,
}

impl Default for Visualizer {
    fn default() -> Self {
        Visualizer {
            width: 800.0,
            height: 800.0,
            margin: 50.0,
            node_radius: 6.0,
        }
    }
}

impl Visualizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Generate an SVG rendering of a solved tour.
    pub fn generate_svg(&self, points: &PointSet, solution: &Solution) -> Result<String> {
        let coords = solution.coordinates(points)?;
        let sorted = points.sorted_points();
        let rightmost = sorted.len().saturating_sub(1);

        let (min_x, max_x, min_y, max_y) = self.bounds(points);
        let scale_x = (self.width - 2.0 * self.margin) / (max_x - min_x).max(1.0);
        let scale_y = (self.height - 2.0 * self.margin) / (max_y - min_y).max(1.0);
        let scale = scale_x.min(scale_y);

        let transform = |x: f64, y: f64| -> (f64, f64) {
            let tx = self.margin + (x - min_x) * scale;
            let ty = self.height - self.margin - (y - min_y) * scale;
            (tx, ty)
        };

        let mut svg = String::new();
        svg.push_str(&format!(
            r##"<?xml version="1.0" encoding="UTF-8"?>
<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="0 0 {} {}">
<style>
    .node {{ fill: #3498db; stroke: #2c3e50; stroke-width: 2; }}
    .endpoint {{ fill: #e74c3c; stroke: #c0392b; stroke-width: 2; }}
    .outbound {{ stroke: #27ae60; stroke-width: 2; fill: none; }}
    .return {{ stroke: #8e44ad; stroke-width: 2; fill: none; stroke-dasharray: 6 3; }}
    .label {{ font-family: Arial; font-size: 10px; fill: #2c3e50; }}
    .title {{ font-family: Arial; font-size: 14px; fill: #2c3e50; font-weight: bold; }}
</style>
<rect width="100%" height="100%" fill="#ecf0f1"/>
"##,
            self.width, self.height, self.width, self.height
        ));

        svg.push_str(&format!(
            r##"<text x="{}" y="25" class="title">Bitonic tour | {} points | Length: {:.2}</text>
"##,
            self.margin,
            sorted.len(),
            solution.length
        ));

        // Split the cyclic tour at the rightmost point: edges before it
        // belong to one monotonic chain, edges after it to the other.
        if solution.tour.len() > 1 {
            let turn = solution
                .tour
                .iter()
                .position(|&i| i == rightmost)
                .unwrap_or(0);

            for k in 0..solution.tour.len() - 1 {
                let (x1, y1) = transform(coords[k].0, coords[k].1);
                let (x2, y2) = transform(coords[k + 1].0, coords[k + 1].1);
                let class = if k < turn { "outbound" } else { "return" };
                svg.push_str(&format!(
                    r#"<line x1="{:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}" class="{}"/>
"#,
                    x1, y1, x2, y2, class
                ));
            }
        }

        for (index, point) in sorted.iter().enumerate() {
            let (x, y) = transform(point.x, point.y);
            let class = if index == 0 || index == rightmost {
                "endpoint"
            } else {
                "node"
            };
            svg.push_str(&format!(
                r#"<circle cx="{:.2}" cy="{:.2}" r="{}" class="{}"/>
<text x="{:.2}" y="{:.2}" class="label">{}</text>
"#,
                x,
                y,
                self.node_radius,
                class,
                x + self.node_radius + 2.0,
                y - self.node_radius - 2.0,
                index
            ));
        }

        svg.push_str("</svg>\n");
        Ok(svg)
    }

    /// Save an SVG string to a file.
    pub fn save_svg<P: AsRef<Path>>(&self, svg: &str, path: P) -> Result<()> {
        let mut file = File::create(&path).map_err(|e| Error::Io {
            path: path.as_ref().to_path_buf(),
            source: e,
        })?;
        file.write_all(svg.as_bytes()).map_err(|e| Error::Io {
            path: path.as_ref().to_path_buf(),
            source: e,
        })
    }

    fn bounds(&self, points: &PointSet) -> (f64, f64, f64, f64) {
        let mut min_x = f64::INFINITY;
        let mut max_x = f64::NEG_INFINITY;
        let mut min_y = f64::INFINITY;
        let mut max_y = f64::NEG_INFINITY;

        for p in points.points() {
            min_x = min_x.min(p.x);
            max_x = max_x.max(p.x);
            min_y = min_y.min(p.y);
            max_y = max_y.max(p.y);
        }

        (min_x, max_x, min_y, max_y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::BitonicSolver;

    #[test]
    fn test_svg_contains_both_chains_and_all_nodes() {
        let mut points = PointSet::new();
        for (x, y) in [(0.0, 0.0), (1.0, 1.0), (2.0, 1.0), (3.0, 0.0)] {
            points.add_point(x, y).unwrap();
        }
        let solution = BitonicSolver::new(&points).solve().unwrap();

        let svg = Visualizer::new().generate_svg(&points, &solution).unwrap();
        assert!(svg.starts_with("<?xml"));
        assert!(svg.contains("class=\"outbound\""));
        assert!(svg.contains("class=\"return\""));
        assert_eq!(svg.matches("<circle").count(), 4);
        // Tour has 4 edges: 0-1, 1-2, 2-3 outbound to the rightmost, 3-0 back.
        assert_eq!(svg.matches("<line").count(), 4);
    }
}
