//! Decide on which side of a corner the shape lies.
//!
//! On self-intersecting or strongly non-convex sub-paths the local turn of a vertex says
//! little about whether the wedge on its left-hand side is inside the overall shape. We
//! probe the approximation polygon on both sides of the corner instead, at increasing
//! distances, and report the corner inverted when its left-hand side is less often inside
//! than the opposite side.

use crate::approximation::ApproximationPolygon;
use crate::corner::Corner;
use crate::math::Point;
use crate::options::AnalyzerOptions;

/// Outcome of sampling a corner.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum Sampling {
    /// The left-hand side of the corner is the inside.
    Forward,
    /// The right-hand side of the corner is the inside.
    Inverted,
    /// No probe distance gave a conclusive answer.
    Ambiguous,
    /// The corner has a zero-length edge or folds back onto itself.
    Degenerate,
}

impl Sampling {
    #[inline]
    pub fn is_inverted(self) -> bool {
        self == Sampling::Inverted
    }
}

/// Probe counts at one distance.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct SampleCounts {
    /// Probes inside the shape on the corner's left-hand side.
    pub forward: u32,
    /// Probes inside the shape on the opposite side.
    pub inverted: u32,
}

impl SampleCounts {
    pub fn is_conclusive(&self, majority: u32) -> bool {
        self.forward >= majority || self.inverted >= majority
    }
}

/// Counts the probes at `distance` that fall inside the polygon on each side of the corner.
///
/// Returns `None` if the corner has no well defined wedge.
pub fn sample_at(
    corner: &Corner,
    polygon: &ApproximationPolygon,
    distance: f64,
    options: &AnalyzerOptions,
) -> Option<SampleCounts> {
    let forward = corner.probes(distance)?;
    let inverted = corner.inverse().probes(distance)?;

    let count = |probes: &[Point]| {
        probes
            .iter()
            .filter(|&&p| polygon.contains(p, options.fill_rule))
            .count() as u32
    };

    Some(SampleCounts {
        forward: count(forward.as_slice()),
        inverted: count(inverted.as_slice()),
    })
}

/// Decides whether a corner must be reported inverted.
pub fn sample_corner(
    corner: &Corner,
    polygon: &ApproximationPolygon,
    options: &AnalyzerOptions,
) -> Sampling {
    for &distance in &options.probe_distances {
        let counts = match sample_at(corner, polygon, distance, options) {
            Some(counts) => counts,
            None => {
                return Sampling::Degenerate;
            }
        };

        if counts.is_conclusive(options.sampling_majority) {
            return if counts.forward < counts.inverted {
                Sampling::Inverted
            } else {
                Sampling::Forward
            };
        }
    }

    log::warn!(
        "Ambiguous sampling at corner {:?} ({:?}), keeping its orientation",
        corner.index(),
        corner.at(),
    );

    Sampling::Ambiguous
}

#[cfg(test)]
use crate::math::point;
#[cfg(test)]
use crate::path::PointIndex;

#[cfg(test)]
fn closed(points: &[Point]) -> ApproximationPolygon {
    let mut poly = ApproximationPolygon::new();
    poly.extend_from_slice(points);
    poly.close();
    poly
}

#[test]
fn sample_convex_corner() {
    let square = closed(&[
        point(0.0, 0.0),
        point(10.0, 0.0),
        point(10.0, 10.0),
        point(0.0, 10.0),
    ]);
    let options = AnalyzerOptions::DEFAULT;

    let ccw = Corner::new(
        PointIndex(1),
        point(0.0, 0.0),
        point(10.0, 0.0),
        point(10.0, 10.0),
    );
    assert_eq!(
        sample_at(&ccw, &square, 1.5, &options),
        Some(SampleCounts {
            forward: 4,
            inverted: 0
        })
    );
    assert_eq!(sample_corner(&ccw, &square, &options), Sampling::Forward);

    // The same corner traversed clockwise has the shape on its right-hand side.
    let cw = Corner::new(
        PointIndex(3),
        point(10.0, 10.0),
        point(10.0, 0.0),
        point(0.0, 0.0),
    );
    assert_eq!(sample_corner(&cw, &square, &options), Sampling::Inverted);
    assert_eq!(sample_corner(&cw.inverse(), &square, &options), Sampling::Forward);
}

#[test]
fn sample_reflex_corner() {
    // L-shape, counter-clockwise, with the reflex vertex at (5, 5).
    let shape = closed(&[
        point(0.0, 0.0),
        point(20.0, 0.0),
        point(20.0, 5.0),
        point(5.0, 5.0),
        point(5.0, 20.0),
        point(0.0, 20.0),
    ]);
    let reflex = Corner::new(
        PointIndex(3),
        point(20.0, 5.0),
        point(5.0, 5.0),
        point(5.0, 20.0),
    );

    assert_eq!(
        reflex.intrinsic_turn(),
        crate::path::RotationDirection::Clockwise
    );
    assert_eq!(
        sample_corner(&reflex, &shape, &AnalyzerOptions::DEFAULT),
        Sampling::Forward
    );
}

#[test]
fn sample_falls_back_to_larger_distances() {
    let square = closed(&[
        point(0.0, 0.0),
        point(10.0, 0.0),
        point(10.0, 10.0),
        point(0.0, 10.0),
    ]);
    // A corner left of the square, opening towards it. Only the larger probes reach it.
    let corner = Corner::new(
        PointIndex(0),
        point(-1.0, 6.0),
        point(-2.0, 5.0),
        point(-1.0, 4.0),
    );
    assert_eq!(
        corner.intrinsic_turn(),
        crate::path::RotationDirection::CounterClockwise
    );

    let options = AnalyzerOptions::DEFAULT;
    assert_eq!(
        sample_at(&corner, &square, 0.5, &options),
        Some(SampleCounts::default())
    );
    assert_eq!(
        sample_at(&corner, &square, 1.5, &options),
        Some(SampleCounts::default())
    );
    assert_eq!(
        sample_at(&corner, &square, 3.0, &options),
        Some(SampleCounts {
            forward: 4,
            inverted: 0
        })
    );
    assert_eq!(sample_corner(&corner, &square, &options), Sampling::Forward);
    assert_eq!(
        sample_corner(&corner.inverse(), &square, &options),
        Sampling::Inverted
    );
}

#[test]
fn sample_ambiguous() {
    let _ = env_logger::builder().is_test(true).try_init();

    let far_away = closed(&[
        point(100.0, 100.0),
        point(110.0, 100.0),
        point(110.0, 110.0),
    ]);
    let corner = Corner::new(
        PointIndex(1),
        point(0.0, 0.0),
        point(10.0, 0.0),
        point(10.0, 10.0),
    );

    let sampling = sample_corner(&corner, &far_away, &AnalyzerOptions::DEFAULT);
    assert_eq!(sampling, Sampling::Ambiguous);
    assert!(!sampling.is_inverted());
}

#[test]
fn sample_degenerate() {
    let square = closed(&[
        point(0.0, 0.0),
        point(10.0, 0.0),
        point(10.0, 10.0),
        point(0.0, 10.0),
    ]);
    let spike = Corner::new(
        PointIndex(1),
        point(0.0, 0.0),
        point(10.0, 0.0),
        point(0.0, 0.0),
    );

    assert_eq!(
        sample_corner(&spike, &square, &AnalyzerOptions::DEFAULT),
        Sampling::Degenerate
    );
}
