//! Straight-edged stand-in for a sub-path, used for containment queries.

use crate::geom::LineSegment;
use crate::math::{Box2D, Point};
use crate::path::FillRule;

/// A polyline approximating one sub-path, with its curves flattened.
///
/// The polygon is only meant to answer "is this point inside?" queries and is never used
/// as exact geometry. If the sub-path was closed, the last point equals the first one.
/// Open polygons are treated as implicitly closed by containment queries.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct ApproximationPolygon {
    points: Vec<Point>,
    closed: bool,
}

impl ApproximationPolygon {
    pub fn new() -> Self {
        ApproximationPolygon {
            points: Vec::new(),
            closed: false,
        }
    }

    #[inline]
    pub fn push(&mut self, point: Point) {
        self.points.push(point);
    }

    pub fn extend_from_slice(&mut self, points: &[Point]) {
        self.points.extend_from_slice(points);
    }

    /// Closes the polygon, appending the first point if the last one differs.
    pub fn close(&mut self) {
        if let (Some(&first), Some(&last)) = (self.points.first(), self.points.last()) {
            if first != last {
                self.points.push(first);
            }
        }
        self.closed = true;
    }

    #[inline]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    #[inline]
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn bounding_box(&self) -> Box2D {
        Box2D::from_points(self.points.iter())
    }

    /// Iterates over the edges of the polygon, including the implicit closing edge of
    /// open polygons.
    pub fn edges(&self) -> impl Iterator<Item = LineSegment<f64>> + '_ {
        let closing = match (self.points.first(), self.points.last()) {
            (Some(&first), Some(&last)) if first != last => Some(LineSegment {
                from: last,
                to: first,
            }),
            _ => None,
        };

        self.points
            .windows(2)
            .map(|pair| LineSegment {
                from: pair[0],
                to: pair[1],
            })
            .chain(closing)
    }

    /// Compute the winding number of a given position with respect to the polygon.
    pub fn winding_number_at(&self, point: Point) -> i32 {
        // Accumulate the winding of all edges crossing the horizontal line passing
        // through the point on its left.
        let mut winding = 0;
        for edge in self.edges() {
            test_segment(point, &edge, &mut winding);
        }

        winding
    }

    /// Returns whether the point is inside the polygon.
    pub fn contains(&self, point: Point, fill_rule: FillRule) -> bool {
        fill_rule.is_in(self.winding_number_at(point))
    }
}

fn test_segment(point: Point, segment: &LineSegment<f64>, winding: &mut i32) {
    let y0 = segment.from.y;
    let y1 = segment.to.y;
    let min_y = f64::min(y0, y1);
    let max_y = f64::max(y0, y1);

    if min_y > point.y || max_y <= point.y || f64::min(segment.from.x, segment.to.x) > point.x {
        return;
    }

    if y0 == y1 {
        return;
    }

    let d = y1 - y0;
    let t = (point.y - y0) / d;
    let x = segment.sample(t).x;

    if x > point.x {
        return;
    }

    *winding += if d > 0.0 { 1 } else { -1 };
}

#[cfg(test)]
use crate::math::point;

#[cfg(test)]
fn polygon(points: &[Point], closed: bool) -> ApproximationPolygon {
    let mut poly = ApproximationPolygon::new();
    poly.extend_from_slice(points);
    if closed {
        poly.close();
    }
    poly
}

#[test]
fn close_appends_first_point_once() {
    let mut poly = polygon(&[point(0.0, 0.0), point(1.0, 0.0), point(1.0, 1.0)], false);
    assert!(!poly.is_closed());
    assert_eq!(poly.edges().count(), 3);

    poly.close();
    assert!(poly.is_closed());
    assert_eq!(poly.len(), 4);
    assert_eq!(poly.points()[3], point(0.0, 0.0));

    poly.close();
    assert_eq!(poly.len(), 4);
    assert_eq!(poly.edges().count(), 3);
}

#[test]
fn contains_square() {
    let poly = polygon(
        &[
            point(0.0, 0.0),
            point(10.0, 0.0),
            point(10.0, 10.0),
            point(0.0, 10.0),
        ],
        true,
    );

    assert!(poly.contains(point(5.0, 5.0), FillRule::EvenOdd));
    assert!(poly.contains(point(0.5, 9.5), FillRule::NonZero));
    assert!(!poly.contains(point(-1.0, 5.0), FillRule::EvenOdd));
    assert!(!poly.contains(point(11.0, 5.0), FillRule::EvenOdd));
    assert!(!poly.contains(point(5.0, -0.5), FillRule::EvenOdd));
    assert!(!poly.contains(point(5.0, 10.5), FillRule::EvenOdd));
    assert_eq!(poly.winding_number_at(point(5.0, 5.0)), -1);
}

#[test]
fn contains_open_polygon() {
    let poly = polygon(&[point(0.0, 0.0), point(10.0, 0.0), point(0.0, 10.0)], false);

    assert!(poly.contains(point(2.0, 2.0), FillRule::EvenOdd));
    assert!(!poly.contains(point(8.0, 8.0), FillRule::EvenOdd));
}

#[test]
fn contains_double_loop() {
    // The same square traversed twice.
    let poly = polygon(
        &[
            point(0.0, 0.0),
            point(1.0, 0.0),
            point(1.0, 1.0),
            point(0.0, 1.0),
            point(0.0, 0.0),
            point(1.0, 0.0),
            point(1.0, 1.0),
            point(0.0, 1.0),
        ],
        true,
    );

    assert_eq!(poly.winding_number_at(point(0.5, 0.5)), -2);
    assert!(!poly.contains(point(0.5, 0.5), FillRule::EvenOdd));
    assert!(poly.contains(point(0.5, 0.5), FillRule::NonZero));
}

#[test]
fn contains_point_aligned_with_vertex() {
    let poly = polygon(
        &[
            point(-10.0, 10.0),
            point(10.0, 10.0),
            point(10.0, 5.0),
            point(10.0, -10.0),
            point(-10.0, -10.0),
        ],
        true,
    );

    assert!(poly.contains(point(0.0, 5.0), FillRule::NonZero));
    assert!(!poly.contains(point(15.0, 5.0), FillRule::NonZero));
}

#[test]
fn bounding_box() {
    let poly = polygon(&[point(1.0, 2.0), point(5.0, -1.0), point(3.0, 7.0)], true);
    let bb = poly.bounding_box();
    assert_eq!(bb.min, point(1.0, -1.0));
    assert_eq!(bb.max, point(5.0, 7.0));
}
