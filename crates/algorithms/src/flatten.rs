//! Approximate quadratic and cubic bézier spans with a fixed number of line segments.
//!
//! The analyzer never needs curves to be exact: their polylines are only used to count
//! crossings and to answer containment queries. A fixed point count keeps the output
//! size predictable, which matters because intersection counting is quadratic in the
//! number of edges of a sub-path.

use crate::geom::{CubicBezierSegment, LineSegment, QuadraticBezierSegment};
use crate::math::Point;
use crate::path::PointIndex;

/// Appends `num_segments` points approximating the curve to `output`.
///
/// The start of the curve is not added (it is the end of the previous segment), the last
/// added point is exactly the curve's end point.
pub fn flatten_quadratic(
    curve: &QuadraticBezierSegment<f64>,
    num_segments: u32,
    output: &mut Vec<Point>,
) {
    let n = num_segments.max(1);
    let step = 1.0 / n as f64;
    for i in 1..n {
        output.push(curve.sample(i as f64 * step));
    }
    output.push(curve.to);
}

/// Appends `num_segments` points approximating the curve to `output`.
///
/// See [`flatten_quadratic`].
pub fn flatten_cubic(curve: &CubicBezierSegment<f64>, num_segments: u32, output: &mut Vec<Point>) {
    let n = num_segments.max(1);
    let step = 1.0 / n as f64;
    for i in 1..n {
        output.push(curve.sample(i as f64 * step));
    }
    output.push(curve.to);
}

/// The polyline approximation of a curved segment, keyed by the index of its end point.
#[derive(Clone, Debug, PartialEq)]
pub struct FlattenedSpan {
    index: PointIndex,
    // Starts with the span's start point.
    points: Vec<Point>,
}

impl FlattenedSpan {
    pub fn quadratic(index: PointIndex, curve: &QuadraticBezierSegment<f64>, num_segments: u32) -> Self {
        let mut points = Vec::with_capacity(num_segments as usize + 1);
        points.push(curve.from);
        flatten_quadratic(curve, num_segments, &mut points);

        FlattenedSpan { index, points }
    }

    pub fn cubic(index: PointIndex, curve: &CubicBezierSegment<f64>, num_segments: u32) -> Self {
        let mut points = Vec::with_capacity(num_segments as usize + 1);
        points.push(curve.from);
        flatten_cubic(curve, num_segments, &mut points);

        FlattenedSpan { index, points }
    }

    /// A single straight segment.
    pub fn line(index: PointIndex, segment: &LineSegment<f64>) -> Self {
        FlattenedSpan {
            index,
            points: vec![segment.from, segment.to],
        }
    }

    #[inline]
    pub fn index(&self) -> PointIndex {
        self.index
    }

    /// Moves the span to another key, used when a closing curve ends on the first point of
    /// its sub-path.
    pub(crate) fn set_index(&mut self, index: PointIndex) {
        self.index = index;
    }

    /// The points of the polyline, start and end points included.
    #[inline]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// The points after the start point.
    #[inline]
    pub fn tail(&self) -> &[Point] {
        &self.points[1..]
    }

    pub fn from(&self) -> Point {
        self.points[0]
    }

    pub fn to(&self) -> Point {
        self.points[self.points.len() - 1]
    }

    pub fn edges(&self) -> impl Iterator<Item = LineSegment<f64>> + '_ {
        self.points.windows(2).map(|pair| LineSegment {
            from: pair[0],
            to: pair[1],
        })
    }
}

#[test]
fn flatten_quadratic_fixed_count() {
    use crate::math::point;

    let curve = QuadraticBezierSegment {
        from: point(0.0, 0.0),
        ctrl: point(1.0, 1.0),
        to: point(2.0, 0.0),
    };

    let mut points = Vec::new();
    flatten_quadratic(&curve, 4, &mut points);

    assert_eq!(points.len(), 4);
    assert_eq!(points[1], point(1.0, 0.5));
    assert_eq!(points[3], point(2.0, 0.0));
}

#[test]
fn flatten_zero_segments_is_a_line() {
    use crate::math::point;

    let curve = CubicBezierSegment {
        from: point(0.0, 0.0),
        ctrl1: point(0.0, 1.0),
        ctrl2: point(1.0, 1.0),
        to: point(1.0, 0.0),
    };

    let mut points = Vec::new();
    flatten_cubic(&curve, 0, &mut points);
    assert_eq!(points, vec![point(1.0, 0.0)]);
}

#[test]
fn flattened_span_edges() {
    use crate::math::point;

    let span = FlattenedSpan::cubic(
        PointIndex(3),
        &CubicBezierSegment {
            from: point(0.0, 0.0),
            ctrl1: point(0.0, 1.0),
            ctrl2: point(1.0, 1.0),
            to: point(1.0, 0.0),
        },
        8,
    );

    assert_eq!(span.index(), PointIndex(3));
    assert_eq!(span.points().len(), 9);
    assert_eq!(span.tail().len(), 8);
    assert_eq!(span.from(), point(0.0, 0.0));
    assert_eq!(span.to(), point(1.0, 0.0));

    let edges: Vec<LineSegment<f64>> = span.edges().collect();
    assert_eq!(edges.len(), 8);
    for pair in edges.windows(2) {
        assert_eq!(pair[0].to, pair[1].from);
    }
}
