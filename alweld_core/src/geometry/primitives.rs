//! Primitive section shapes: the rectangular hollow tube and the circle used
//! to model a weld heat-affected zone.

use std::f64::consts::{FRAC_PI_2, PI, TAU};

use geo::{Coord, LineString, Polygon};

use super::Region;
use crate::materials::Material;

/// Points of a quarter-circle fillet centered at `center`, starting at angle
/// `theta` and sweeping counter-clockwise. A zero radius collapses to the
/// center point (a sharp corner).
fn corner_arc(center: Coord<f64>, radius: f64, theta: f64, n: usize) -> Vec<Coord<f64>> {
    if radius <= 0.0 || n <= 1 {
        return vec![center];
    }
    (0..n)
        .map(|i| {
            let angle = theta + (i as f64) / ((n - 1) as f64) * FRAC_PI_2;
            Coord {
                x: center.x + radius * angle.cos(),
                y: center.y + radius * angle.sin(),
            }
        })
        .collect()
}

/// Closed ring of a rounded rectangle spanning `(x0, y0)`-`(x1, y1)`,
/// counter-clockwise from the bottom-left corner.
fn rounded_rectangle(x0: f64, y0: f64, x1: f64, y1: f64, radius: f64, n_r: usize) -> LineString<f64> {
    let corners = [
        (Coord { x: x0 + radius, y: y0 + radius }, PI),
        (Coord { x: x1 - radius, y: y0 + radius }, 1.5 * PI),
        (Coord { x: x1 - radius, y: y1 - radius }, 0.0),
        (Coord { x: x0 + radius, y: y1 - radius }, FRAC_PI_2),
    ];
    let points: Vec<Coord<f64>> = corners
        .iter()
        .flat_map(|&(center, theta)| corner_arc(center, radius, theta, n_r))
        .collect();
    LineString::new(points)
}

/// Rectangular hollow section with its bottom-left outer corner at the origin.
///
/// ```text
///        b
///   ╭─────────╮
///   │ ╭─────╮ │
/// d │ │     │ │  wall thickness t
///   │ ╰─────╯ │  outer radius r_out, inner radius max(r_out - t, 0)
///   ╰─────────╯
/// ```
///
/// `n_r` is the number of points used for each rounded corner.
pub fn rectangular_hollow_section(
    d: f64,
    b: f64,
    t: f64,
    r_out: f64,
    n_r: usize,
    material: Material,
) -> Region {
    let r_in = (r_out - t).max(0.0);
    let outer = rounded_rectangle(0.0, 0.0, b, d, r_out, n_r);
    // Holes run clockwise
    let mut inner = rounded_rectangle(t, t, b - t, d - t, r_in, n_r);
    inner.0.reverse();
    Region::new(Polygon::new(outer, vec![inner]), material)
}

/// Circle of the given diameter discretized with `n` points, centered on the origin.
pub fn circular_section(diameter: f64, n: usize, material: Material) -> Region {
    let radius = diameter / 2.0;
    let points: Vec<Coord<f64>> = (0..n)
        .map(|i| {
            let angle = (i as f64) * TAU / (n as f64);
            Coord {
                x: radius * angle.cos(),
                y: radius * angle.sin(),
            }
        })
        .collect();
    Region::new(Polygon::new(LineString::new(points), vec![]), material)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::materials::AlloyCatalog;

    fn unwelded() -> Material {
        AlloyCatalog::builtin().unwrap().lookup("6061-T6").unwrap().0
    }

    #[test]
    fn test_sharp_tube_area() {
        // 3 x 2 outer, 2.75 x 1.75 inner
        let tube = rectangular_hollow_section(2.0, 3.0, 0.125, 0.0, 12, unwelded());
        let expected = 3.0 * 2.0 - 2.75 * 1.75;
        assert!((tube.area() - expected).abs() < 1e-12);
    }

    #[test]
    fn test_rounded_tube_area() {
        let r = 0.25;
        let t = 0.125;
        let tube = rectangular_hollow_section(2.0, 3.0, t, r, 12, unwelded());
        // Rounded rectangle area = w*h - (4 - π) r²; polygonal corners lose a little.
        let ri: f64 = r - t;
        let outer = 6.0 - (4.0 - PI) * r * r;
        let inner = 2.75 * 1.75 - (4.0 - PI) * ri * ri;
        assert!((tube.area() - (outer - inner)).abs() < 1e-3);

        let bounds = tube.bounds().unwrap();
        assert!(bounds.min().x.abs() < 1e-12);
        assert!(bounds.min().y.abs() < 1e-12);
        assert!((bounds.max().x - 3.0).abs() < 1e-12);
        assert!((bounds.max().y - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_tube_has_one_hole() {
        let tube = rectangular_hollow_section(2.0, 3.0, 0.125, 0.05, 12, unwelded());
        assert_eq!(tube.polygon.0.len(), 1);
        assert_eq!(tube.polygon.0[0].interiors().len(), 1);
        // 4 corners x 12 points, plus the closing point
        assert_eq!(tube.polygon.0[0].exterior().0.len(), 4 * 12 + 1);
        // r_out < t gives sharp inner corners
        assert_eq!(tube.polygon.0[0].interiors()[0].0.len(), 4 + 1);
    }

    #[test]
    fn test_circle() {
        let circle = circular_section(2.0, 24, unwelded());
        // Regular 24-gon inscribed in a unit circle: (n/2) sin(2π/n)
        let expected = 12.0 * (TAU / 24.0).sin();
        assert!((circle.area() - expected).abs() < 1e-12);
        let b = circle.bounds().unwrap();
        assert!((b.max().x - 1.0).abs() < 1e-12);
        assert!((b.min().y + 1.0).abs() < 1e-12);
    }
}
