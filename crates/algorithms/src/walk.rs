//! Walk a command stream and collect the raw corners of each sub-path.
//!
//! A corner needs a successor, so the walker always recognizes the corner one step behind
//! the newest point. The corners at the end points of a closed sub-path can only be
//! built once the `Close` command is reached, since the start vertex had no predecessor
//! when it was traversed.

use std::collections::BTreeMap;

use crate::approximation::ApproximationPolygon;
use crate::corner::Corner;
use crate::error::{AnalysisResult, UnsupportedParameter};
use crate::flatten::FlattenedSpan;
use crate::geom::{CubicBezierSegment, LineSegment, QuadraticBezierSegment};
use crate::math::Point;
use crate::path::{IndexedCommands, PathCommand, PointIndex};

/// The raw result of walking one sub-path.
#[derive(Clone, Debug, Default)]
pub(crate) struct WalkedSubpath {
    /// Position of the sub-path in the command stream.
    pub subpath: usize,
    pub corners: BTreeMap<PointIndex, Corner>,
    pub spans: Vec<FlattenedSpan>,
    pub approximation: ApproximationPolygon,
    pub closed: bool,
}

/// Walks the commands and returns the sub-paths in encounter order, including empty ones.
pub(crate) fn walk_corners<Iter>(commands: Iter, curve_points: u32) -> AnalysisResult<Vec<WalkedSubpath>>
where
    Iter: IntoIterator<Item = PathCommand>,
{
    let mut walker = CornerWalker::new(curve_points);
    for (idx, cmd) in IndexedCommands::new(commands.into_iter()) {
        if !cmd.is_finite() {
            return Err(UnsupportedParameter::PositionIsNaN(idx).into());
        }
        walker.command(idx, cmd);
    }

    Ok(walker.build())
}

#[derive(Copy, Clone, Debug)]
struct Vertex {
    index: PointIndex,
    position: Point,
}

/// The sub-path being walked.
struct OpenSubpath {
    walked: WalkedSubpath,
    start: Vertex,
    second: Option<Vertex>,
    before_last: Option<Vertex>,
    last: Vertex,
    num_points: u32,
}

impl OpenSubpath {
    fn new(subpath: usize, start: Vertex) -> Self {
        let mut walked = WalkedSubpath {
            subpath,
            ..WalkedSubpath::default()
        };
        walked.approximation.push(start.position);

        OpenSubpath {
            walked,
            start,
            second: None,
            before_last: None,
            last: start,
            num_points: 1,
        }
    }

    fn add_corner(&mut self, index: PointIndex, prev: Point, at: Point, next: Point) {
        let previous = self
            .walked
            .corners
            .insert(index, Corner::new(index, prev, at, next));
        assert!(previous.is_none(), "Two corners at {:?}", index);
    }

    fn edge_to(&mut self, to: Vertex, span: Option<FlattenedSpan>) {
        if let Some(before_last) = self.before_last {
            let last = self.last;
            self.add_corner(last.index, before_last.position, last.position, to.position);
        } else if self.second.is_none() {
            self.second = Some(to);
        }

        match span {
            Some(span) => {
                self.walked.approximation.extend_from_slice(span.tail());
                self.walked.spans.push(span);
            }
            None => {
                self.walked.approximation.push(to.position);
            }
        }

        self.before_last = Some(self.last);
        self.last = to;
        self.num_points += 1;
    }

    fn close(mut self) -> WalkedSubpath {
        if self.num_points >= 3 {
            self.stitch();
        }

        self.walked.approximation.close();
        self.walked.closed = true;
        self.walked
    }

    // Builds the corners around the start vertex of a closed sub-path.
    fn stitch(&mut self) {
        let (before_last, second) = match (self.before_last, self.second) {
            (Some(before_last), Some(second)) => (before_last, second),
            _ => {
                return;
            }
        };
        let start = self.start;
        let last = self.last;

        if last.position != start.position {
            self.add_corner(last.index, before_last.position, last.position, start.position);
            self.add_corner(start.index, last.position, start.position, second.position);
        } else {
            // The start coordinate was repeated before closing: the last vertex is the start
            // vertex, and the edge that reaches it is the start corner's incoming edge.
            self.add_corner(start.index, before_last.position, start.position, second.position);
            for span in &mut self.walked.spans {
                if span.index() == last.index {
                    span.set_index(start.index);
                }
            }
        }
    }

    fn end(mut self) -> WalkedSubpath {
        // Open sub-paths have no corner at their last vertex, so the final edge is
        // registered on its own to keep it visible to intersection counting.
        if let Some(before_last) = self.before_last {
            let last = self.last;
            let has_span = self.walked.spans.iter().any(|span| span.index() == last.index);
            if !has_span {
                self.walked.spans.push(FlattenedSpan::line(
                    last.index,
                    &LineSegment {
                        from: before_last.position,
                        to: last.position,
                    },
                ));
            }
        }

        self.walked
    }
}

struct CornerWalker {
    curve_points: u32,
    current: Option<OpenSubpath>,
    subpaths: Vec<WalkedSubpath>,
}

impl CornerWalker {
    fn new(curve_points: u32) -> Self {
        CornerWalker {
            curve_points,
            current: None,
            subpaths: Vec::new(),
        }
    }

    fn command(&mut self, idx: PointIndex, cmd: PathCommand) {
        match cmd {
            PathCommand::MoveTo { to } => {
                self.begin(idx, to);
            }
            PathCommand::LineTo { to } => {
                self.line_to(idx, to);
            }
            PathCommand::QuadraticTo { ctrl, to } => {
                self.quadratic_bezier_to(idx, ctrl, to);
            }
            PathCommand::CubicTo { ctrl1, ctrl2, to } => {
                self.cubic_bezier_to(idx, ctrl1, ctrl2, to);
            }
            PathCommand::Close => {
                self.close();
            }
        }
    }

    fn begin(&mut self, idx: PointIndex, at: Point) {
        self.end();
        let subpath = self.subpaths.len();
        self.current = Some(OpenSubpath::new(
            subpath,
            Vertex {
                index: idx,
                position: at,
            },
        ));
    }

    // A segment that does not continue a sub-path starts a new one at its end point.
    fn current_from(&mut self, idx: PointIndex, to: Point) -> Option<&mut OpenSubpath> {
        if self.current.is_none() {
            self.begin(idx, to);
            return None;
        }

        self.current.as_mut()
    }

    fn line_to(&mut self, idx: PointIndex, to: Point) {
        if let Some(current) = self.current_from(idx, to) {
            current.edge_to(
                Vertex {
                    index: idx,
                    position: to,
                },
                None,
            );
        }
    }

    fn quadratic_bezier_to(&mut self, idx: PointIndex, ctrl: Point, to: Point) {
        let curve_points = self.curve_points;
        if let Some(current) = self.current_from(idx, to) {
            let curve = QuadraticBezierSegment {
                from: current.last.position,
                ctrl,
                to,
            };
            let span = FlattenedSpan::quadratic(idx, &curve, curve_points);
            current.edge_to(
                Vertex {
                    index: idx,
                    position: to,
                },
                Some(span),
            );
        }
    }

    fn cubic_bezier_to(&mut self, idx: PointIndex, ctrl1: Point, ctrl2: Point, to: Point) {
        let curve_points = self.curve_points;
        if let Some(current) = self.current_from(idx, to) {
            let curve = CubicBezierSegment {
                from: current.last.position,
                ctrl1,
                ctrl2,
                to,
            };
            let span = FlattenedSpan::cubic(idx, &curve, curve_points);
            current.edge_to(
                Vertex {
                    index: idx,
                    position: to,
                },
                Some(span),
            );
        }
    }

    fn close(&mut self) {
        if let Some(current) = self.current.take() {
            self.subpaths.push(current.close());
        }
    }

    fn end(&mut self) {
        if let Some(current) = self.current.take() {
            self.subpaths.push(current.end());
        }
    }

    fn build(mut self) -> Vec<WalkedSubpath> {
        self.end();
        self.subpaths
    }
}

#[cfg(test)]
use crate::error::AnalysisError;
#[cfg(test)]
use crate::math::point;
#[cfg(test)]
use crate::path::Path;

#[cfg(test)]
fn corner_indices(subpath: &WalkedSubpath) -> Vec<u32> {
    subpath.corners.keys().map(|idx| idx.0).collect()
}

#[test]
fn walk_closed_square() {
    let mut builder = Path::builder();
    builder.begin(point(0.0, 0.0));
    builder.line_to(point(10.0, 0.0));
    builder.line_to(point(10.0, 10.0));
    builder.line_to(point(0.0, 10.0));
    builder.close();
    let path = builder.build();

    let subpaths = walk_corners(&path, 10).unwrap();
    assert_eq!(subpaths.len(), 1);

    let square = &subpaths[0];
    assert!(square.closed);
    assert_eq!(corner_indices(square), vec![0, 1, 2, 3]);

    let start = &square.corners[&PointIndex(0)];
    assert_eq!(start.prev(), point(0.0, 10.0));
    assert_eq!(start.next(), point(10.0, 0.0));

    let last = &square.corners[&PointIndex(3)];
    assert_eq!(last.prev(), point(10.0, 10.0));
    assert_eq!(last.next(), point(0.0, 0.0));

    assert_eq!(square.approximation.len(), 5);
    assert!(square.approximation.is_closed());
    assert!(square.spans.is_empty());
}

#[test]
fn walk_repeated_start() {
    let mut builder = Path::builder();
    builder.begin(point(0.0, 0.0));
    builder.line_to(point(10.0, 0.0));
    builder.line_to(point(10.0, 10.0));
    builder.line_to(point(0.0, 10.0));
    builder.line_to(point(0.0, 0.0));
    builder.close();
    let path = builder.build();

    let subpaths = walk_corners(&path, 10).unwrap();
    let square = &subpaths[0];
    assert_eq!(corner_indices(square), vec![0, 1, 2, 3]);

    let start = &square.corners[&PointIndex(0)];
    assert_eq!(start.prev(), point(0.0, 10.0));
    assert_eq!(start.next(), point(10.0, 0.0));
    assert_eq!(square.approximation.len(), 5);
}

#[test]
fn walk_curves() {
    let mut builder = Path::builder();
    builder.begin(point(0.0, 0.0));
    builder.quadratic_bezier_to(point(5.0, -5.0), point(10.0, 0.0));
    builder.cubic_bezier_to(point(15.0, 5.0), point(5.0, 15.0), point(10.0, 10.0));
    builder.line_to(point(0.0, 10.0));
    builder.close();
    let path = builder.build();

    let subpaths = walk_corners(&path, 4).unwrap();
    let shape = &subpaths[0];

    // Control points consume indices but never become corners.
    assert_eq!(corner_indices(shape), vec![0, 2, 5, 6]);

    // Corners use the chord of the curves.
    let corner = &shape.corners[&PointIndex(2)];
    assert_eq!(corner.prev(), point(0.0, 0.0));
    assert_eq!(corner.next(), point(10.0, 10.0));

    let span_indices: Vec<u32> = shape.spans.iter().map(|span| span.index().0).collect();
    assert_eq!(span_indices, vec![2, 5]);

    // start + 4 + 4 + 1 + closing point.
    assert_eq!(shape.approximation.len(), 11);
    assert_eq!(shape.approximation.points()[4], point(10.0, 0.0));
}

#[test]
fn walk_repeated_start_with_curve() {
    let mut builder = Path::builder();
    builder.begin(point(0.0, 0.0));
    builder.line_to(point(10.0, 0.0));
    builder.line_to(point(10.0, 10.0));
    builder.quadratic_bezier_to(point(-5.0, 10.0), point(0.0, 0.0));
    builder.close();
    let path = builder.build();

    let subpaths = walk_corners(&path, 4).unwrap();
    let shape = &subpaths[0];
    assert_eq!(corner_indices(shape), vec![0, 1, 2]);
    assert_eq!(shape.spans.len(), 1);
    assert_eq!(shape.spans[0].index(), PointIndex(0));

    let start = &shape.corners[&PointIndex(0)];
    assert_eq!(start.prev(), point(10.0, 10.0));
    assert_eq!(start.next(), point(10.0, 0.0));
}

#[test]
fn walk_multiple_sub_paths() {
    let mut builder = Path::builder();
    builder.begin(point(0.0, 0.0));
    builder.line_to(point(1.0, 0.0));
    builder.line_to(point(1.0, 1.0));
    builder.close();
    // Degenerate.
    builder.begin(point(5.0, 5.0));
    builder.close();
    builder.begin(point(10.0, 0.0));
    builder.line_to(point(11.0, 0.0));
    builder.line_to(point(11.0, 1.0));
    builder.line_to(point(10.0, 2.0));
    builder.end(false);
    let path = builder.build();

    let subpaths = walk_corners(&path, 10).unwrap();
    assert_eq!(subpaths.len(), 3);

    assert_eq!(subpaths[0].subpath, 0);
    assert_eq!(corner_indices(&subpaths[0]), vec![0, 1, 2]);

    assert_eq!(subpaths[1].subpath, 1);
    assert!(subpaths[1].corners.is_empty());
    assert!(subpaths[1].closed);

    // Open: only the interior corners.
    assert_eq!(subpaths[2].subpath, 2);
    assert!(!subpaths[2].closed);
    assert_eq!(corner_indices(&subpaths[2]), vec![5, 6]);
    assert_eq!(subpaths[2].spans.len(), 1);
    assert_eq!(subpaths[2].spans[0].index(), PointIndex(7));
    assert!(!subpaths[2].approximation.is_closed());
}

#[test]
fn walk_two_points() {
    let mut builder = Path::builder();
    builder.begin(point(0.0, 0.0));
    builder.line_to(point(1.0, 0.0));
    builder.close();
    let path = builder.build();

    let subpaths = walk_corners(&path, 10).unwrap();
    assert_eq!(subpaths.len(), 1);
    assert!(subpaths[0].corners.is_empty());
}

#[test]
fn walk_implicit_start() {
    let commands = vec![
        PathCommand::LineTo {
            to: point(0.0, 0.0),
        },
        PathCommand::LineTo {
            to: point(1.0, 0.0),
        },
        PathCommand::LineTo {
            to: point(1.0, 1.0),
        },
        PathCommand::Close,
    ];

    let subpaths = walk_corners(commands, 10).unwrap();
    assert_eq!(subpaths.len(), 1);
    assert_eq!(corner_indices(&subpaths[0]), vec![0, 1, 2]);
}

#[test]
fn walk_rejects_nan() {
    let commands = vec![
        PathCommand::MoveTo {
            to: point(0.0, 0.0),
        },
        PathCommand::QuadraticTo {
            ctrl: point(std::f64::NAN, 0.0),
            to: point(1.0, 1.0),
        },
    ];

    assert_eq!(
        walk_corners(commands, 10).unwrap_err(),
        AnalysisError::from(UnsupportedParameter::PositionIsNaN(PointIndex(2)))
    );
}
