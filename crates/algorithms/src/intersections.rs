//! Count crossings between the edges of a sub-path.
//!
//! Each edge of a sub-path is represented exactly once: straight edges by the corner they
//! lead into (the corner's first edge), curves by their flattened polyline which takes the
//! place of the chord.

use std::collections::BTreeMap;

use crate::corner::Corner;
use crate::flatten::FlattenedSpan;
use crate::geom::LineSegment;
use crate::path::PointIndex;

/// Something an edge can cross.
#[derive(Clone, Debug, PartialEq)]
pub enum Intersectable {
    /// A straight edge, stored as the corner it leads into.
    Corner(Corner),
    /// The polyline approximation of a curve.
    FlattenedSpan(FlattenedSpan),
}

impl Intersectable {
    /// Index of the point the edge ends at.
    pub fn index(&self) -> PointIndex {
        match self {
            Intersectable::Corner(corner) => corner.index(),
            Intersectable::FlattenedSpan(span) => span.index(),
        }
    }

    /// Number of times the edge crosses `probe`.
    ///
    /// Segments that share an endpoint with the probe are not considered crossing.
    pub fn intersections_with(&self, probe: &LineSegment<f64>) -> u32 {
        match self {
            Intersectable::Corner(corner) => corner.first_edge().intersects(probe) as u32,
            Intersectable::FlattenedSpan(span) => {
                span.edges().filter(|edge| edge.intersects(probe)).count() as u32
            }
        }
    }
}

/// Collects the intersectables of a sub-path, one per edge.
///
/// `corners` must not be inverted views.
pub fn collect_intersectables<'l, Corners, Spans>(corners: Corners, spans: Spans) -> Vec<Intersectable>
where
    Corners: IntoIterator<Item = &'l Corner>,
    Spans: IntoIterator<Item = &'l FlattenedSpan>,
{
    let mut by_index: BTreeMap<PointIndex, Intersectable> = BTreeMap::new();
    for corner in corners {
        debug_assert!(!corner.is_inverted());
        by_index.insert(corner.index(), Intersectable::Corner(*corner));
    }
    // A curve replaces the chord stored in the corner at its end point.
    for span in spans {
        by_index.insert(span.index(), Intersectable::FlattenedSpan(span.clone()));
    }

    by_index.into_iter().map(|(_, item)| item).collect()
}

/// Per-corner intersection counts of a sub-path.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct IntersectionCounts {
    counts: BTreeMap<PointIndex, u32>,
    // Running totals, in ascending point index order, including the corner's own count.
    prefix: Vec<(PointIndex, u32)>,
}

impl IntersectionCounts {
    /// Counts, for each corner, the crossings of its first edge with every other edge of
    /// the sub-path.
    pub fn compute<'l, Corners>(corners: Corners, intersectables: &[Intersectable]) -> Self
    where
        Corners: IntoIterator<Item = &'l Corner>,
    {
        let mut counts = BTreeMap::new();
        for corner in corners {
            let probe = corner.first_edge();
            let count = intersectables
                .iter()
                .filter(|item| item.index() != corner.index())
                .map(|item| item.intersections_with(&probe))
                .sum();

            let previous = counts.insert(corner.index(), count);
            assert!(previous.is_none(), "Two corners at {:?}", corner.index());
        }

        let mut total = 0;
        let prefix = counts
            .iter()
            .map(|(&idx, &count)| {
                total += count;
                (idx, total)
            })
            .collect();

        IntersectionCounts { counts, prefix }
    }

    /// Number of crossings of the first edge of the corner at `index`.
    ///
    /// Returns zero if there is no corner at this index.
    pub fn count(&self, index: PointIndex) -> u32 {
        self.counts.get(&index).copied().unwrap_or(0)
    }

    /// Sum of the counts of all corners strictly before `index`.
    pub fn before(&self, index: PointIndex) -> u32 {
        match self.prefix.binary_search_by_key(&index, |&(idx, _)| idx) {
            Ok(0) => 0,
            Ok(i) => self.prefix[i - 1].1,
            Err(0) => 0,
            Err(i) => self.prefix[i - 1].1,
        }
    }

    /// Sum of the counts of all corners.
    pub fn total(&self) -> u32 {
        self.prefix.last().map(|&(_, total)| total).unwrap_or(0)
    }
}

#[cfg(test)]
use crate::math::{point, Point};

#[cfg(test)]
fn closed_corners(points: &[Point], first_index: u32) -> Vec<Corner> {
    let n = points.len();
    (0..n)
        .map(|i| {
            Corner::new(
                PointIndex(first_index + i as u32),
                points[(i + n - 1) % n],
                points[i],
                points[(i + 1) % n],
            )
        })
        .collect()
}

#[test]
fn square_has_no_intersections() {
    let corners = closed_corners(
        &[
            point(0.0, 0.0),
            point(10.0, 0.0),
            point(10.0, 10.0),
            point(0.0, 10.0),
        ],
        0,
    );
    let items = collect_intersectables(&corners, &[]);
    assert_eq!(items.len(), 4);

    let counts = IntersectionCounts::compute(&corners, &items);
    for corner in &corners {
        assert_eq!(counts.count(corner.index()), 0);
    }
    assert_eq!(counts.total(), 0);
}

#[test]
fn bow_tie_intersections() {
    let corners = closed_corners(
        &[
            point(0.0, 0.0),
            point(10.0, 10.0),
            point(10.0, 0.0),
            point(0.0, 10.0),
        ],
        0,
    );
    let items = collect_intersectables(&corners, &[]);
    let counts = IntersectionCounts::compute(&corners, &items);

    assert_eq!(counts.count(PointIndex(0)), 0);
    assert_eq!(counts.count(PointIndex(1)), 1);
    assert_eq!(counts.count(PointIndex(2)), 0);
    assert_eq!(counts.count(PointIndex(3)), 1);

    assert_eq!(counts.before(PointIndex(0)), 0);
    assert_eq!(counts.before(PointIndex(1)), 0);
    assert_eq!(counts.before(PointIndex(2)), 1);
    assert_eq!(counts.before(PointIndex(3)), 1);
    assert_eq!(counts.before(PointIndex(10)), 2);
    assert_eq!(counts.total(), 2);
}

#[test]
fn flattened_span_replaces_chord() {
    use crate::geom::QuadraticBezierSegment;

    // A square whose right edge is a curve bulging far to the left, across the left edge.
    // The chord of the curve does not cross anything.
    let corners = vec![
        Corner::new(
            PointIndex(0),
            point(0.0, 10.0),
            point(0.0, 0.0),
            point(10.0, 0.0),
        ),
        Corner::new(
            PointIndex(1),
            point(0.0, 0.0),
            point(10.0, 0.0),
            point(10.0, 10.0),
        ),
        Corner::new(
            PointIndex(3),
            point(10.0, 0.0),
            point(10.0, 10.0),
            point(0.0, 10.0),
        ),
        Corner::new(
            PointIndex(4),
            point(10.0, 10.0),
            point(0.0, 10.0),
            point(0.0, 0.0),
        ),
    ];
    let span = FlattenedSpan::quadratic(
        PointIndex(3),
        &QuadraticBezierSegment {
            from: point(10.0, 0.0),
            ctrl: point(-20.0, 0.0),
            to: point(10.0, 10.0),
        },
        16,
    );

    let items = collect_intersectables(&corners, std::iter::once(&span));
    assert_eq!(items.len(), 4);
    assert!(matches!(items[2], Intersectable::FlattenedSpan(_)));

    let counts = IntersectionCounts::compute(&corners, &items);
    // The left edge is crossed twice by the curve.
    assert_eq!(counts.count(PointIndex(0)), 2);
    assert_eq!(counts.count(PointIndex(1)), 0);
    // The probe of #3 is the chord and the curve itself is excluded.
    assert_eq!(counts.count(PointIndex(3)), 0);
    assert_eq!(counts.count(PointIndex(4)), 0);
}
