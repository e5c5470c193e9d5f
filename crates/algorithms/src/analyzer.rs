//! Winding and corner classification of paths.
//!
//! ## Overview
//!
//! The analyzer walks a path once, builds the corners of each sub-path and resolves
//! for each sub-path:
//!
//! - its rotation direction, by majority vote of the local turns of its corners. A corner
//!   whose incoming edge crosses the rest of the sub-path an odd number of times votes
//!   for the opposite direction, since every crossing flips which side of the contour is
//!   inside.
//! - the orientation of each corner: a corner is reported inverted when sampling the
//!   approximation polygon shows that its left-hand side is outside of the shape.
//!
//! Corners are then handed to a [`CornerVisitor`] in ascending point index order, one
//! sub-path after the other.
//!
//! Only vertices at the end of segments form corners. Control points consume point
//! indices but never produce corners, and curves are represented by their chords when
//! computing turns.
//!
//! ## Example
//!
//! ```
//! use cornerwise_algorithms::analyzer::{CornerAnalyzer, CornerVisit};
//! use cornerwise_algorithms::options::AnalyzerOptions;
//! use cornerwise_algorithms::path::{Path, RotationDirection};
//! use cornerwise_algorithms::math::point;
//!
//! let mut builder = Path::builder();
//! builder.begin(point(0.0, 0.0));
//! builder.line_to(point(10.0, 0.0));
//! builder.line_to(point(10.0, 10.0));
//! builder.line_to(point(0.0, 10.0));
//! builder.close();
//! let path = builder.build();
//!
//! let mut analyzer = CornerAnalyzer::new();
//! let mut indices = Vec::new();
//! let direction = analyzer.analyze_with_visitor(
//!     &path,
//!     &AnalyzerOptions::default(),
//!     &mut |visit: &CornerVisit| indices.push(visit.index.0),
//! ).unwrap();
//!
//! assert_eq!(direction, RotationDirection::CounterClockwise);
//! assert_eq!(indices, vec![0, 1, 2, 3]);
//! ```

use crate::approximation::ApproximationPolygon;
use crate::corner::Corner;
use crate::error::AnalysisResult;
use crate::intersections::{collect_intersectables, IntersectionCounts};
use crate::options::AnalyzerOptions;
use crate::path::{PathCommand, PointIndex, RotationDirection};
use crate::rotation::{self, Votes, MIN_CORNERS};
use crate::sampling::{sample_corner, Sampling};
use crate::walk::{walk_corners, WalkedSubpath};

/// A corner handed to a [`CornerVisitor`].
#[derive(Copy, Clone, Debug)]
pub struct CornerVisit<'l> {
    /// Index of the corner's vertex in the path.
    pub index: PointIndex,
    /// The corner, inverted if sampling showed that its right-hand side is the inside.
    pub corner: Corner,
    /// Position of the sub-path in the path, counting empty sub-paths.
    pub subpath: usize,
    /// Rotation direction of the sub-path.
    pub direction: RotationDirection,
    /// The sub-path's approximation polygon.
    pub approximation: &'l ApproximationPolygon,
    /// Index of the previous corner in emission order, swapped with `next` if the
    /// corner is inverted.
    pub prev: PointIndex,
    /// Index of the next corner in emission order, swapped with `prev` if the
    /// corner is inverted.
    pub next: PointIndex,
}

/// Receives the corners of an analyzed path.
///
/// Implemented for every `FnMut(&CornerVisit)`. A panic in `visit` propagates to the
/// caller of the analyzer.
pub trait CornerVisitor {
    fn visit(&mut self, visit: &CornerVisit);
}

impl<F> CornerVisitor for F
where
    F: FnMut(&CornerVisit),
{
    fn visit(&mut self, visit: &CornerVisit) {
        self(visit)
    }
}

/// A corner along with what the analyzer found out about it.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct AnalyzedCorner {
    corner: Corner,
    sampling: Sampling,
    intersections: u32,
}

impl AnalyzedCorner {
    #[inline]
    pub fn index(&self) -> PointIndex {
        self.corner.index()
    }

    /// The corner as traversed in the path.
    #[inline]
    pub fn corner(&self) -> &Corner {
        &self.corner
    }

    /// The corner as reported to visitors.
    pub fn oriented(&self) -> Corner {
        if self.sampling.is_inverted() {
            self.corner.inverse()
        } else {
            self.corner
        }
    }

    #[inline]
    pub fn sampling(&self) -> Sampling {
        self.sampling
    }

    /// Number of times the corner's incoming edge crosses the rest of its sub-path.
    #[inline]
    pub fn intersections(&self) -> u32 {
        self.intersections
    }

    #[inline]
    pub fn is_inverted(&self) -> bool {
        self.sampling.is_inverted()
    }
}

/// The analysis of one sub-path.
#[derive(Clone, Debug, PartialEq)]
pub struct SubpathCorners {
    index: usize,
    closed: bool,
    direction: RotationDirection,
    votes: Votes,
    // Sorted by point index.
    corners: Vec<AnalyzedCorner>,
    counts: IntersectionCounts,
    approximation: ApproximationPolygon,
}

impl SubpathCorners {
    fn new(walked: WalkedSubpath, options: &AnalyzerOptions) -> Self {
        let WalkedSubpath {
            subpath,
            corners,
            spans,
            approximation,
            closed,
        } = walked;

        if corners.len() < MIN_CORNERS {
            log::debug!(
                "Sub-path {} has {} corner(s), no rotation direction",
                subpath,
                corners.len()
            );

            return SubpathCorners {
                index: subpath,
                closed,
                direction: RotationDirection::None,
                votes: Votes::new(),
                corners: Vec::new(),
                counts: IntersectionCounts::default(),
                approximation,
            };
        }

        let intersectables = collect_intersectables(corners.values(), &spans);
        let counts = IntersectionCounts::compute(corners.values(), &intersectables);
        let votes = rotation::vote(corners.values(), &counts, options.parity_correction);
        let direction = votes.direction();

        let corners: Vec<AnalyzedCorner> = corners
            .values()
            .map(|corner| AnalyzedCorner {
                corner: *corner,
                sampling: sample_corner(corner, &approximation, options),
                intersections: counts.count(corner.index()),
            })
            .collect();

        log::debug!(
            "Sub-path {}: {} corners, {} intersection(s), {:?} ({} cw / {} ccw)",
            subpath,
            corners.len(),
            counts.total(),
            direction,
            votes.clockwise,
            votes.counter_clockwise,
        );

        SubpathCorners {
            index: subpath,
            closed,
            direction,
            votes,
            corners,
            counts,
            approximation,
        }
    }

    /// Position of the sub-path in the path.
    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    #[inline]
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    #[inline]
    pub fn direction(&self) -> RotationDirection {
        self.direction
    }

    #[inline]
    pub fn votes(&self) -> Votes {
        self.votes
    }

    /// The corners in ascending point index order.
    ///
    /// Empty if the sub-path has fewer than three corners.
    #[inline]
    pub fn corners(&self) -> &[AnalyzedCorner] {
        &self.corners
    }

    pub fn is_empty(&self) -> bool {
        self.corners.is_empty()
    }

    pub fn corner(&self, index: PointIndex) -> Option<&AnalyzedCorner> {
        self.corners
            .binary_search_by_key(&index, |c| c.index())
            .ok()
            .map(|i| &self.corners[i])
    }

    /// The corners as reported to visitors.
    pub fn oriented_corners(&self) -> impl Iterator<Item = Corner> + '_ {
        self.corners.iter().map(AnalyzedCorner::oriented)
    }

    pub fn intersection_count(&self, index: PointIndex) -> u32 {
        self.counts.count(index)
    }

    /// Sum of the intersection counts of the corners before `index`.
    pub fn intersections_before(&self, index: PointIndex) -> u32 {
        self.counts.before(index)
    }

    pub fn sampling(&self, index: PointIndex) -> Option<Sampling> {
        self.corner(index).map(AnalyzedCorner::sampling)
    }

    #[inline]
    pub fn approximation(&self) -> &ApproximationPolygon {
        &self.approximation
    }

    /// Hands the corners to the visitor in ascending point index order.
    pub fn visit(&self, visitor: &mut dyn CornerVisitor) {
        let n = self.corners.len();
        for (i, entry) in self.corners.iter().enumerate() {
            let mut prev = self.corners[(i + n - 1) % n].index();
            let mut next = self.corners[(i + 1) % n].index();
            if entry.is_inverted() {
                std::mem::swap(&mut prev, &mut next);
            }

            let visit = CornerVisit {
                index: entry.index(),
                corner: entry.oriented(),
                subpath: self.index,
                direction: self.direction,
                approximation: &self.approximation,
                prev,
                next,
            };

            log::trace!(
                "Corner {:?} of sub-path {}: {:?} turn, prev {:?}, next {:?}",
                visit.index,
                visit.subpath,
                visit.corner.turn(),
                visit.prev,
                visit.next,
            );

            visitor.visit(&visit);
        }
    }
}

/// Analyzes the winding and the corners of paths.
///
/// The analyzer keeps the results of the last analysis until the next one.
///
/// ## Example
///
/// ```
/// use cornerwise_algorithms::analyzer::CornerAnalyzer;
/// use cornerwise_algorithms::options::AnalyzerOptions;
/// use cornerwise_algorithms::path::{Polygon, RotationDirection};
/// use cornerwise_algorithms::math::point;
///
/// let points = [point(0.0, 0.0), point(0.0, 10.0), point(10.0, 10.0), point(10.0, 0.0)];
/// let polygon = Polygon { points: &points, closed: true };
///
/// let mut analyzer = CornerAnalyzer::new();
/// let direction = analyzer.analyze(polygon, &AnalyzerOptions::default()).unwrap();
/// assert_eq!(direction, RotationDirection::Clockwise);
/// ```
#[derive(Clone, Debug, Default)]
pub struct CornerAnalyzer {
    subpaths: Vec<SubpathCorners>,
}

impl CornerAnalyzer {
    pub fn new() -> Self {
        CornerAnalyzer {
            subpaths: Vec::new(),
        }
    }

    /// Returns the rotation direction of the path.
    ///
    /// This is the direction of the first sub-path that has one, or
    /// `RotationDirection::None` if no sub-path has one.
    pub fn analyze<Iter>(&mut self, path: Iter, options: &AnalyzerOptions) -> AnalysisResult<RotationDirection>
    where
        Iter: IntoIterator<Item = PathCommand>,
    {
        self.analyze_path(path, options)?;

        Ok(self.direction())
    }

    /// Returns the rotation direction of the path like [`CornerAnalyzer::analyze`] and
    /// hands every corner to the visitor.
    ///
    /// Invalid input is reported before the visitor is called.
    pub fn analyze_with_visitor<Iter>(
        &mut self,
        path: Iter,
        options: &AnalyzerOptions,
        visitor: &mut dyn CornerVisitor,
    ) -> AnalysisResult<RotationDirection>
    where
        Iter: IntoIterator<Item = PathCommand>,
    {
        self.analyze_path(path, options)?;

        for subpath in &self.subpaths {
            subpath.visit(visitor);
        }

        Ok(self.direction())
    }

    /// Analyzes the path and returns the result of each sub-path.
    pub fn analyze_subpaths<Iter>(&mut self, path: Iter, options: &AnalyzerOptions) -> AnalysisResult<&[SubpathCorners]>
    where
        Iter: IntoIterator<Item = PathCommand>,
    {
        self.analyze_path(path, options)?;

        Ok(&self.subpaths[..])
    }

    /// The result of the last analysis.
    pub fn subpaths(&self) -> &[SubpathCorners] {
        &self.subpaths
    }

    fn analyze_path<Iter>(&mut self, path: Iter, options: &AnalyzerOptions) -> AnalysisResult<()>
    where
        Iter: IntoIterator<Item = PathCommand>,
    {
        self.subpaths.clear();
        options.validate()?;

        let walked = walk_corners(path, options.curve_points)?;
        self.subpaths.reserve(walked.len());
        for subpath in walked {
            self.subpaths.push(SubpathCorners::new(subpath, options));
        }

        Ok(())
    }

    fn direction(&self) -> RotationDirection {
        self.subpaths
            .iter()
            .map(SubpathCorners::direction)
            .find(|direction| !direction.is_none())
            .unwrap_or(RotationDirection::None)
    }
}
