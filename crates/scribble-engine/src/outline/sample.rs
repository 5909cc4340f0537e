//! Uniform arc-length sampling of vector paths.
//!
//! The guide outline is scored against a fixed number of evenly spaced
//! points, so hit indices stay stable for a whole round regardless of how
//! the path was built (contour polyline, font glyph, hand-authored
//! curve).

use glam::Vec2;
use lyon::geom::{CubicBezierSegment, QuadraticBezierSegment};
use lyon::path::{Event, Path};

/// Uniform parameter steps when flattening a cubic Bezier segment.
pub const CUBIC_FLATTEN_STEPS: u32 = 30;
/// Uniform parameter steps when flattening a quadratic Bezier segment.
pub const QUAD_FLATTEN_STEPS: u32 = 20;

fn to_vec2(p: lyon::math::Point) -> Vec2 {
    Vec2::new(p.x, p.y)
}

/// Flatten a path into a dense polyline. Line segments contribute their
/// endpoints; curve segments are evaluated at fixed uniform parameter
/// steps. A closed subpath loops back to its first point.
pub fn flatten_path(path: &Path) -> Vec<Vec2> {
    let mut out = Vec::new();
    for event in path.iter() {
        match event {
            Event::Begin { at } => out.push(to_vec2(at)),
            Event::Line { to, .. } => out.push(to_vec2(to)),
            Event::Quadratic { from, ctrl, to } => {
                let seg = QuadraticBezierSegment { from, ctrl, to };
                for i in 1..=QUAD_FLATTEN_STEPS {
                    out.push(to_vec2(seg.sample(i as f32 / QUAD_FLATTEN_STEPS as f32)));
                }
            }
            Event::Cubic {
                from,
                ctrl1,
                ctrl2,
                to,
            } => {
                let seg = CubicBezierSegment {
                    from,
                    ctrl1,
                    ctrl2,
                    to,
                };
                for i in 1..=CUBIC_FLATTEN_STEPS {
                    out.push(to_vec2(seg.sample(i as f32 / CUBIC_FLATTEN_STEPS as f32)));
                }
            }
            Event::End { first, close, .. } => {
                if close {
                    out.push(to_vec2(first));
                }
            }
        }
    }
    out
}

/// Resample a polyline to exactly `n` points at uniform arc-length
/// spacing.
///
/// Degenerate inputs pass through unchanged: a polyline with one point or
/// less cannot be interpolated, and a zero-length polyline has no arc to
/// walk. `n < 2` likewise returns the input as-is.
pub fn resample(points: &[Vec2], n: usize) -> Vec<Vec2> {
    if points.len() <= 1 || n < 2 {
        return points.to_vec();
    }

    let mut cumulative = Vec::with_capacity(points.len());
    cumulative.push(0.0f32);
    let mut total = 0.0f32;
    for pair in points.windows(2) {
        total += pair[0].distance(pair[1]);
        cumulative.push(total);
    }
    if total <= f32::EPSILON {
        return points.to_vec();
    }

    let mut out = Vec::with_capacity(n);
    let mut seg = 0usize;
    for k in 0..n {
        let target = total * k as f32 / (n - 1) as f32;
        while seg + 2 < cumulative.len() && cumulative[seg + 1] < target {
            seg += 1;
        }
        let span = cumulative[seg + 1] - cumulative[seg];
        let t = if span > 0.0 {
            ((target - cumulative[seg]) / span).clamp(0.0, 1.0)
        } else {
            0.0
        };
        out.push(points[seg].lerp(points[seg + 1], t));
    }
    out
}

/// Flatten and resample in one go; this is what runs right after
/// extraction on the worker.
pub fn sample_path(path: &Path, n: usize) -> Vec<Vec2> {
    resample(&flatten_path(path), n)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lyon::math::point;

    /// Circle of radius `r` around `c`, approximated by 4 cubic segments.
    fn circle_path(c: Vec2, r: f32) -> Path {
        // Kappa for a quarter-circle cubic approximation.
        let k = 0.5522848 * r;
        let mut b = Path::builder();
        b.begin(point(c.x + r, c.y));
        b.cubic_bezier_to(
            point(c.x + r, c.y + k),
            point(c.x + k, c.y + r),
            point(c.x, c.y + r),
        );
        b.cubic_bezier_to(
            point(c.x - k, c.y + r),
            point(c.x - r, c.y + k),
            point(c.x - r, c.y),
        );
        b.cubic_bezier_to(
            point(c.x - r, c.y - k),
            point(c.x - k, c.y - r),
            point(c.x, c.y - r),
        );
        b.cubic_bezier_to(
            point(c.x + k, c.y - r),
            point(c.x + r, c.y - k),
            point(c.x + r, c.y),
        );
        b.close();
        b.build()
    }

    #[test]
    fn line_flattens_to_endpoints() {
        let mut b = Path::builder();
        b.begin(point(0.0, 0.0));
        b.line_to(point(10.0, 0.0));
        b.end(false);
        let flat = flatten_path(&b.build());
        assert_eq!(flat, vec![Vec2::ZERO, Vec2::new(10.0, 0.0)]);
    }

    #[test]
    fn closed_path_loops_back() {
        let mut b = Path::builder();
        b.begin(point(0.0, 0.0));
        b.line_to(point(10.0, 0.0));
        b.line_to(point(10.0, 10.0));
        b.close();
        let flat = flatten_path(&b.build());
        assert_eq!(flat.first(), flat.last());
    }

    #[test]
    fn cubic_flattens_at_fixed_steps() {
        let mut b = Path::builder();
        b.begin(point(0.0, 0.0));
        b.cubic_bezier_to(point(0.0, 10.0), point(10.0, 10.0), point(10.0, 0.0));
        b.end(false);
        let flat = flatten_path(&b.build());
        // begin point + 30 curve samples
        assert_eq!(flat.len(), 1 + CUBIC_FLATTEN_STEPS as usize);
        assert_eq!(*flat.last().unwrap(), Vec2::new(10.0, 0.0));
    }

    #[test]
    fn quadratic_flattens_at_fixed_steps() {
        let mut b = Path::builder();
        b.begin(point(0.0, 0.0));
        b.quadratic_bezier_to(point(5.0, 10.0), point(10.0, 0.0));
        b.end(false);
        let flat = flatten_path(&b.build());
        assert_eq!(flat.len(), 1 + QUAD_FLATTEN_STEPS as usize);
    }

    #[test]
    fn resample_returns_exact_count() {
        for n in [2usize, 3, 10, 400] {
            let samples = sample_path(&circle_path(Vec2::new(50.0, 50.0), 40.0), n);
            assert_eq!(samples.len(), n, "n={n}");
        }
    }

    #[test]
    fn circle_samples_are_uniformly_spaced() {
        let samples = sample_path(&circle_path(Vec2::new(0.0, 0.0), 100.0), 200);
        let gaps: Vec<f32> = samples.windows(2).map(|w| w[0].distance(w[1])).collect();
        let mean = gaps.iter().sum::<f32>() / gaps.len() as f32;
        for gap in &gaps {
            assert!(
                (gap - mean).abs() / mean < 1e-3,
                "gap {gap} deviates from mean {mean}"
            );
        }
    }

    #[test]
    fn first_and_last_samples_are_path_ends() {
        let samples = sample_path(&circle_path(Vec2::new(0.0, 0.0), 10.0), 50);
        // Closed path: both ends sit on the start point.
        assert!(samples[0].distance(Vec2::new(10.0, 0.0)) < 1e-3);
        assert!(samples[49].distance(Vec2::new(10.0, 0.0)) < 1e-3);
    }

    #[test]
    fn degenerate_inputs_pass_through() {
        assert!(resample(&[], 10).is_empty());

        let single = vec![Vec2::new(3.0, 4.0)];
        assert_eq!(resample(&single, 10), single);

        // zero-length polyline (all points identical)
        let stuck = vec![Vec2::ONE, Vec2::ONE, Vec2::ONE];
        assert_eq!(resample(&stuck, 10), stuck);
    }

    #[test]
    fn duplicate_interior_points_are_tolerated() {
        let points = vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(5.0, 0.0),
            Vec2::new(5.0, 0.0),
            Vec2::new(10.0, 0.0),
        ];
        let out = resample(&points, 5);
        assert_eq!(out.len(), 5);
        assert_eq!(out[0], Vec2::new(0.0, 0.0));
        assert_eq!(out[4], Vec2::new(10.0, 0.0));
        assert!((out[2].x - 5.0).abs() < 1e-4);
    }
}
