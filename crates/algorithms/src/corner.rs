//! Corners: the local turn of a path at one of its vertices.

use crate::geom::LineSegment;
use crate::math::{vector, Angle, Point, Rotation, Vector};
use crate::path::{PointIndex, RotationDirection};

use arrayvec::ArrayVec;

/// Number of probe points generated per corner and per probe distance.
pub const PROBES_PER_DISTANCE: usize = 4;

// Where the probes sit within the corner's wedge, as a fraction of the wedge's half angle.
const PROBE_SPREAD: [f64; PROBES_PER_DISTANCE] = [-0.5, -1.0 / 6.0, 1.0 / 6.0, 0.5];

/// Two edges meeting at a vertex.
///
/// The edges are `prev -> at` and `at -> next`. A corner can be viewed in inverted
/// form (see [`Corner::inverse`]) which swaps the roles of `prev` and `next` for
/// everything related to orientation without changing the points it references.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct Corner {
    index: PointIndex,
    prev: Point,
    at: Point,
    next: Point,
    turn: RotationDirection,
    inverted: bool,
}

impl Corner {
    /// Builds the corner at `at` and classifies its turn.
    pub fn new(index: PointIndex, prev: Point, at: Point, next: Point) -> Self {
        let turn = RotationDirection::from_cross((at - prev).cross(next - at));
        Corner {
            index,
            prev,
            at,
            next,
            turn,
            inverted: false,
        }
    }

    /// Index of the corner's vertex in the path.
    #[inline]
    pub fn index(&self) -> PointIndex {
        self.index
    }

    /// The corner's vertex.
    #[inline]
    pub fn at(&self) -> Point {
        self.at
    }

    /// The point before the vertex, in the orientation of this view.
    #[inline]
    pub fn prev(&self) -> Point {
        if self.inverted {
            self.next
        } else {
            self.prev
        }
    }

    /// The point after the vertex, in the orientation of this view.
    #[inline]
    pub fn next(&self) -> Point {
        if self.inverted {
            self.prev
        } else {
            self.next
        }
    }

    /// The incoming edge `prev -> at`.
    #[inline]
    pub fn first_edge(&self) -> LineSegment<f64> {
        LineSegment {
            from: self.prev(),
            to: self.at,
        }
    }

    /// The outgoing edge `at -> next`.
    #[inline]
    pub fn second_edge(&self) -> LineSegment<f64> {
        LineSegment {
            from: self.at,
            to: self.next(),
        }
    }

    /// Cross product of the incoming and outgoing edge vectors.
    pub fn cross(&self) -> f64 {
        self.first_edge()
            .to_vector()
            .cross(self.second_edge().to_vector())
    }

    /// Turn classification of this view.
    #[inline]
    pub fn turn(&self) -> RotationDirection {
        if self.inverted {
            self.turn.reversed()
        } else {
            self.turn
        }
    }

    /// Turn classification of the corner as it was traversed in the path.
    #[inline]
    pub fn intrinsic_turn(&self) -> RotationDirection {
        self.turn
    }

    #[inline]
    pub fn is_inverted(&self) -> bool {
        self.inverted
    }

    /// Returns the same corner with `prev` and `next` logically swapped.
    #[inline]
    pub fn inverse(&self) -> Self {
        Corner {
            inverted: !self.inverted,
            ..*self
        }
    }

    /// Signed angle from the incoming direction to the outgoing direction.
    pub fn turn_angle(&self) -> Angle {
        self.first_edge()
            .to_vector()
            .angle_to(self.second_edge().to_vector())
    }

    /// Returns true if one of the edges has zero length.
    pub fn is_degenerate(&self) -> bool {
        self.prev == self.at || self.next == self.at
    }

    /// Unit vector bisecting the wedge on the left-hand side of this view.
    ///
    /// The left-hand side is the interior of a counter-clockwise contour in y-up
    /// coordinates. Returns `None` for degenerate corners and for spikes where the path
    /// folds back onto itself.
    pub fn bisector(&self) -> Option<Vector> {
        if self.is_degenerate() {
            return None;
        }

        let n1 = left_normal(self.first_edge().to_vector().normalize());
        let n2 = left_normal(self.second_edge().to_vector().normalize());
        let sum = n1 + n2;
        if sum.square_length() < 1e-12 {
            return None;
        }

        Some(sum.normalize())
    }

    /// Half of the angle of the wedge on the left-hand side of this view, in `[0, pi]`.
    pub fn half_wedge_angle(&self) -> Option<Angle> {
        let bisector = self.bisector()?;
        let outgoing = self.second_edge().to_vector().normalize();

        Some(Angle::radians(bisector.angle_to(outgoing).radians.abs()))
    }

    /// Computes the probe points at a given distance from the vertex, spread across the
    /// wedge on the left-hand side of this view.
    ///
    /// Returns `None` if the corner has no well defined wedge.
    pub fn probes(&self, distance: f64) -> Option<ArrayVec<Point, PROBES_PER_DISTANCE>> {
        let bisector = self.bisector()?;
        let half_angle = self.half_wedge_angle()?;

        let mut probes = ArrayVec::new();
        for fraction in &PROBE_SPREAD {
            let rotation = Rotation::new(half_angle * *fraction);
            let direction = rotation.transform_vector(bisector);
            probes.push(self.at + direction * distance);
        }

        Some(probes)
    }
}

#[inline]
fn left_normal(v: Vector) -> Vector {
    vector(-v.y, v.x)
}

#[cfg(test)]
use crate::math::point;

#[test]
fn corner_turns() {
    let ccw = Corner::new(
        PointIndex(1),
        point(0.0, 0.0),
        point(10.0, 0.0),
        point(10.0, 10.0),
    );
    assert_eq!(ccw.turn(), RotationDirection::CounterClockwise);
    assert_eq!(ccw.inverse().turn(), RotationDirection::Clockwise);
    assert_eq!(
        ccw.inverse().intrinsic_turn(),
        RotationDirection::CounterClockwise
    );

    let cw = Corner::new(
        PointIndex(1),
        point(0.0, 0.0),
        point(0.0, 10.0),
        point(10.0, 10.0),
    );
    assert_eq!(cw.turn(), RotationDirection::Clockwise);

    let straight = Corner::new(
        PointIndex(1),
        point(0.0, 0.0),
        point(5.0, 0.0),
        point(10.0, 0.0),
    );
    assert_eq!(straight.turn(), RotationDirection::None);
}

#[test]
fn corner_edges_share_vertex() {
    let corner = Corner::new(
        PointIndex(4),
        point(0.0, 0.0),
        point(10.0, 0.0),
        point(10.0, 10.0),
    );

    assert_eq!(corner.first_edge().to, corner.at());
    assert_eq!(corner.second_edge().from, corner.at());

    let inverse = corner.inverse();
    assert_eq!(inverse.index(), PointIndex(4));
    assert_eq!(inverse.first_edge().from, point(10.0, 10.0));
    assert_eq!(inverse.second_edge().to, point(0.0, 0.0));
    assert_eq!(inverse.first_edge().to, inverse.at());
    assert_eq!(inverse.inverse(), corner);
    assert_eq!(inverse.cross(), -corner.cross());
}

#[test]
fn corner_turn_angle() {
    let corner = Corner::new(
        PointIndex(1),
        point(0.0, 0.0),
        point(10.0, 0.0),
        point(10.0, 10.0),
    );

    let angle = corner.turn_angle().to_degrees();
    assert!((angle - 90.0).abs() < 1e-9);
    assert!((corner.inverse().turn_angle().to_degrees() + 90.0).abs() < 1e-9);
}

#[test]
fn corner_bisector() {
    let corner = Corner::new(
        PointIndex(1),
        point(0.0, 0.0),
        point(10.0, 0.0),
        point(10.0, 10.0),
    );

    let bisector = corner.bisector().unwrap();
    let expected = vector(-1.0, 1.0).normalize();
    assert!((bisector - expected).length() < 1e-9);

    let inverted = corner.inverse().bisector().unwrap();
    assert!((inverted + expected).length() < 1e-9);

    let half = corner.half_wedge_angle().unwrap().to_degrees();
    assert!((half - 45.0).abs() < 1e-9);
    let half = corner.inverse().half_wedge_angle().unwrap().to_degrees();
    assert!((half - 135.0).abs() < 1e-9);
}

#[test]
fn corner_probes_stay_in_wedge() {
    let corner = Corner::new(
        PointIndex(1),
        point(0.0, 0.0),
        point(10.0, 0.0),
        point(10.0, 10.0),
    );

    let probes = corner.probes(2.0).unwrap();
    assert_eq!(probes.len(), PROBES_PER_DISTANCE);
    for p in &probes {
        assert!(p.x < 10.0);
        assert!(p.y > 0.0);
        assert!(((*p - point(10.0, 0.0)).length() - 2.0).abs() < 1e-9);
    }

    for p in &corner.inverse().probes(2.0).unwrap() {
        assert!(p.x > 10.0 || p.y < 0.0);
    }
}

#[test]
fn degenerate_corners_have_no_probes() {
    let repeated = Corner::new(
        PointIndex(1),
        point(0.0, 0.0),
        point(0.0, 0.0),
        point(10.0, 10.0),
    );
    assert!(repeated.is_degenerate());
    assert!(repeated.bisector().is_none());

    let spike = Corner::new(
        PointIndex(1),
        point(0.0, 0.0),
        point(10.0, 0.0),
        point(0.0, 0.0),
    );
    assert_eq!(spike.turn(), RotationDirection::None);
    assert!(spike.probes(1.0).is_none());
}
