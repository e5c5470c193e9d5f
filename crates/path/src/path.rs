//! The default path data structure.
//!

use crate::geom::traits::Transformation;
use crate::iterator::IndexedCommands;
use crate::math::*;
use crate::{PathCommand, PointIndex};

use std::fmt;
use std::iter::{FromIterator, IntoIterator};

/// Enumeration corresponding to the [`PathCommand`] enum without the parameters.
///
/// This is used by the [`Path`] data structure to store commands a tad more efficiently.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub(crate) enum Verb {
    MoveTo,
    LineTo,
    QuadraticTo,
    CubicTo,
    Close,
}

/// A simple path data structure.
///
/// # Representation
///
/// Paths contain two buffers:
/// - a buffer of verbs (MoveTo, LineTo, QuadraticTo, CubicTo or Close),
/// - and a buffer of points that can be endpoints or control points.
///
/// The position of a point in the point buffer is its [`PointIndex`]. `Close` does not
/// push any point.
///
/// ```ascii
///  __________________________________
/// |        |        |           |
/// | MoveTo | LineTo |QuadraticTo| ...
/// |________|________|___________|_
///  ________________________________________
/// |          |         |         |         |
/// | start x,y| to x, y |ctrl x,y | to x, y | ...
/// |__________|_________|_________|_________|_
/// ```
///
#[derive(Clone, Default, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct Path {
    points: Box<[Point]>,
    verbs: Box<[Verb]>,
}

impl Path {
    /// Creates a [Builder](struct.Builder.html) to build a path.
    pub fn builder() -> Builder {
        Builder::new()
    }

    /// Creates an empty `Path`.
    #[inline]
    pub fn new() -> Path {
        Path {
            points: Box::new([]),
            verbs: Box::new([]),
        }
    }

    /// Builds a path out of any sequence of commands.
    pub fn from_commands<Iter>(commands: Iter) -> Path
    where
        Iter: IntoIterator<Item = PathCommand>,
    {
        let mut builder = Builder::new();
        for cmd in commands {
            builder.command(cmd);
        }

        builder.build()
    }

    /// Iterates over the commands of the path.
    pub fn iter(&self) -> Iter {
        Iter::new(&self.points[..], &self.verbs[..])
    }

    /// Iterates over the commands of the path along with the index of their end point.
    pub fn indexed(&self) -> IndexedCommands<Iter> {
        IndexedCommands::new(self.iter())
    }

    /// Returns the point stored at a given index.
    ///
    /// Control points are addressable as well.
    #[inline]
    pub fn point(&self, idx: PointIndex) -> Point {
        self.points[idx.to_usize()]
    }

    /// Number of point slots, control points included.
    #[inline]
    pub fn num_points(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.verbs.is_empty()
    }

    /// Applies a transform to all endpoints and control points of this path and
    /// returns the result.
    pub fn transformed<T: Transformation<f64>>(mut self, transform: &T) -> Self {
        for p in self.points.iter_mut() {
            *p = transform.transform_point(*p);
        }

        self
    }

    /// Returns a path with the same sub-paths traversed in the opposite direction.
    ///
    /// Sub-paths keep their order and their closed/open status. The first point of each
    /// reversed sub-path is the last point of the original one.
    pub fn reversed(&self) -> Path {
        let mut builder = Builder::with_capacity(self.points.len(), self.verbs.len());
        let mut sub_path: Vec<PathCommand> = Vec::new();
        let flush = |sub_path: &mut Vec<PathCommand>, close: bool, builder: &mut Builder| {
            reverse_sub_path(sub_path, close, builder);
            sub_path.clear();
        };

        for cmd in self.iter() {
            match cmd {
                PathCommand::MoveTo { .. } => {
                    flush(&mut sub_path, false, &mut builder);
                    sub_path.push(cmd);
                }
                PathCommand::Close => {
                    flush(&mut sub_path, true, &mut builder);
                }
                _ => {
                    sub_path.push(cmd);
                }
            }
        }
        flush(&mut sub_path, false, &mut builder);

        builder.build()
    }
}

fn reverse_sub_path(sub_path: &[PathCommand], close: bool, builder: &mut Builder) {
    let last = match sub_path.last().and_then(|cmd| cmd.to()) {
        Some(p) => p,
        None => return,
    };

    builder.begin(last);
    for i in (1..sub_path.len()).rev() {
        // The segment stored at `i` ends where the command at `i - 1` ends.
        let to = match sub_path[i - 1].to() {
            Some(p) => p,
            None => continue,
        };
        match sub_path[i] {
            PathCommand::LineTo { .. } => {
                builder.line_to(to);
            }
            PathCommand::QuadraticTo { ctrl, .. } => {
                builder.quadratic_bezier_to(ctrl, to);
            }
            PathCommand::CubicTo { ctrl1, ctrl2, .. } => {
                builder.cubic_bezier_to(ctrl2, ctrl1, to);
            }
            PathCommand::MoveTo { .. } | PathCommand::Close => {}
        }
    }
    builder.end(close);
}

impl fmt::Debug for Path {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.debug_list().entries(self.iter()).finish()
    }
}

impl<'l> IntoIterator for &'l Path {
    type Item = PathCommand;
    type IntoIter = Iter<'l>;

    fn into_iter(self) -> Iter<'l> {
        self.iter()
    }
}

impl FromIterator<PathCommand> for Path {
    fn from_iter<T: IntoIterator<Item = PathCommand>>(iter: T) -> Path {
        Path::from_commands(iter)
    }
}

/// Builds a [`Path`].
///
/// Every method that adds an endpoint returns its [`PointIndex`], which is the key the
/// analyzer uses for the corner at that endpoint.
///
/// ```
/// use cornerwise_path::{Path, PointIndex};
/// use cornerwise_path::math::point;
///
/// let mut builder = Path::builder();
/// assert_eq!(builder.begin(point(0.0, 0.0)), PointIndex(0));
/// assert_eq!(builder.quadratic_bezier_to(point(1.0, 0.0), point(1.0, 1.0)), PointIndex(2));
/// assert_eq!(builder.line_to(point(0.0, 1.0)), PointIndex(3));
/// builder.close();
/// let path = builder.build();
/// assert_eq!(path.num_points(), 4);
/// ```
#[derive(Clone, Default)]
pub struct Builder {
    points: Vec<Point>,
    verbs: Vec<Verb>,
    in_sub_path: bool,
}

impl Builder {
    pub fn new() -> Self {
        Builder {
            points: Vec::new(),
            verbs: Vec::new(),
            in_sub_path: false,
        }
    }

    pub fn with_capacity(points: usize, commands: usize) -> Self {
        Builder {
            points: Vec::with_capacity(points),
            verbs: Vec::with_capacity(commands),
            in_sub_path: false,
        }
    }

    /// Starts a new sub-path at a given position.
    ///
    /// An unfinished sub-path is left open.
    pub fn begin(&mut self, at: Point) -> PointIndex {
        nan_check(at);
        let id = self.next_index();
        self.points.push(at);
        self.verbs.push(Verb::MoveTo);
        self.in_sub_path = true;

        id
    }

    /// Ends the current sub-path, closing it if `close` is true.
    pub fn end(&mut self, close: bool) {
        debug_assert!(self.in_sub_path, "end() called without begin()");
        if close {
            self.verbs.push(Verb::Close);
        }
        self.in_sub_path = false;
    }

    /// Closes the current sub-path.
    #[inline]
    pub fn close(&mut self) {
        self.end(true)
    }

    pub fn line_to(&mut self, to: Point) -> PointIndex {
        self.edge_check();
        nan_check(to);
        let id = self.next_index();
        self.points.push(to);
        self.verbs.push(Verb::LineTo);

        id
    }

    pub fn quadratic_bezier_to(&mut self, ctrl: Point, to: Point) -> PointIndex {
        self.edge_check();
        nan_check(ctrl);
        nan_check(to);
        self.points.push(ctrl);
        let id = self.next_index();
        self.points.push(to);
        self.verbs.push(Verb::QuadraticTo);

        id
    }

    pub fn cubic_bezier_to(&mut self, ctrl1: Point, ctrl2: Point, to: Point) -> PointIndex {
        self.edge_check();
        nan_check(ctrl1);
        nan_check(ctrl2);
        nan_check(to);
        self.points.push(ctrl1);
        self.points.push(ctrl2);
        let id = self.next_index();
        self.points.push(to);
        self.verbs.push(Verb::CubicTo);

        id
    }

    /// Appends a command as-is.
    ///
    /// Unlike the other methods, this does not check that segments are preceded by
    /// a `MoveTo`, so that arbitrary command streams can be stored.
    pub fn command(&mut self, cmd: PathCommand) {
        match cmd {
            PathCommand::MoveTo { to } => {
                self.points.push(to);
                self.verbs.push(Verb::MoveTo);
                self.in_sub_path = true;
            }
            PathCommand::LineTo { to } => {
                self.points.push(to);
                self.verbs.push(Verb::LineTo);
            }
            PathCommand::QuadraticTo { ctrl, to } => {
                self.points.push(ctrl);
                self.points.push(to);
                self.verbs.push(Verb::QuadraticTo);
            }
            PathCommand::CubicTo { ctrl1, ctrl2, to } => {
                self.points.push(ctrl1);
                self.points.push(ctrl2);
                self.points.push(to);
                self.verbs.push(Verb::CubicTo);
            }
            PathCommand::Close => {
                self.verbs.push(Verb::Close);
                self.in_sub_path = false;
            }
        }
    }

    /// The index the next point slot will receive.
    #[inline]
    pub fn next_index(&self) -> PointIndex {
        PointIndex::from_usize(self.points.len())
    }

    pub fn build(self) -> Path {
        Path {
            points: self.points.into_boxed_slice(),
            verbs: self.verbs.into_boxed_slice(),
        }
    }

    #[inline]
    fn edge_check(&self) {
        debug_assert!(self.in_sub_path, "Segment added without begin()");
    }
}

#[inline]
fn nan_check(p: Point) {
    debug_assert!(p.x.is_finite());
    debug_assert!(p.y.is_finite());
}

/// An iterator over the commands of a `Path`.
#[derive(Clone)]
pub struct Iter<'l> {
    points: std::slice::Iter<'l, Point>,
    verbs: std::slice::Iter<'l, Verb>,
}

impl<'l> Iter<'l> {
    fn new(points: &'l [Point], verbs: &'l [Verb]) -> Self {
        Iter {
            points: points.iter(),
            verbs: verbs.iter(),
        }
    }
}

impl<'l> Iterator for Iter<'l> {
    type Item = PathCommand;

    #[inline]
    fn next(&mut self) -> Option<PathCommand> {
        let verb = self.verbs.next()?;
        let mut next_point = || self.points.next().copied().unwrap_or_else(Point::origin);
        Some(match verb {
            Verb::MoveTo => PathCommand::MoveTo { to: next_point() },
            Verb::LineTo => PathCommand::LineTo { to: next_point() },
            Verb::QuadraticTo => {
                let ctrl = next_point();
                let to = next_point();
                PathCommand::QuadraticTo { ctrl, to }
            }
            Verb::CubicTo => {
                let ctrl1 = next_point();
                let ctrl2 = next_point();
                let to = next_point();
                PathCommand::CubicTo { ctrl1, ctrl2, to }
            }
            Verb::Close => PathCommand::Close,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.verbs.size_hint()
    }
}

#[test]
fn test_path_iter() {
    let mut builder = Path::builder();
    builder.begin(point(0.0, 0.0));
    builder.line_to(point(1.0, 0.0));
    builder.cubic_bezier_to(point(2.0, 0.0), point(2.0, 1.0), point(2.0, 2.0));
    builder.close();
    builder.begin(point(5.0, 5.0));
    builder.line_to(point(6.0, 5.0));
    builder.end(false);
    let path = builder.build();

    let commands: Vec<PathCommand> = path.iter().collect();
    assert_eq!(
        commands,
        vec![
            PathCommand::MoveTo { to: point(0.0, 0.0) },
            PathCommand::LineTo { to: point(1.0, 0.0) },
            PathCommand::CubicTo {
                ctrl1: point(2.0, 0.0),
                ctrl2: point(2.0, 1.0),
                to: point(2.0, 2.0)
            },
            PathCommand::Close,
            PathCommand::MoveTo { to: point(5.0, 5.0) },
            PathCommand::LineTo { to: point(6.0, 5.0) },
        ]
    );
    assert_eq!(path.num_points(), 7);
    assert_eq!(path.point(PointIndex(4)), point(2.0, 2.0));
}

#[test]
fn test_path_from_commands() {
    let commands = vec![
        PathCommand::MoveTo { to: point(0.0, 0.0) },
        PathCommand::QuadraticTo {
            ctrl: point(1.0, 0.0),
            to: point(1.0, 1.0),
        },
        PathCommand::Close,
    ];
    let path: Path = commands.iter().cloned().collect();

    assert_eq!(path.iter().collect::<Vec<_>>(), commands);
}

#[test]
fn test_reversed() {
    let mut builder = Path::builder();
    builder.begin(point(0.0, 0.0));
    builder.line_to(point(10.0, 0.0));
    builder.quadratic_bezier_to(point(10.0, 10.0), point(0.0, 10.0));
    builder.close();
    let path = builder.build();

    let reversed: Vec<PathCommand> = path.reversed().iter().collect();
    assert_eq!(
        reversed,
        vec![
            PathCommand::MoveTo { to: point(0.0, 10.0) },
            PathCommand::QuadraticTo {
                ctrl: point(10.0, 10.0),
                to: point(10.0, 0.0)
            },
            PathCommand::LineTo { to: point(0.0, 0.0) },
            PathCommand::Close,
        ]
    );

    assert_eq!(path.reversed().reversed(), path);
}

#[test]
fn test_transformed() {
    let mut builder = Path::builder();
    builder.begin(point(1.0, 1.0));
    builder.line_to(point(2.0, 1.0));
    builder.end(false);
    let path = builder.build().transformed(&Transform::scale(2.0, 3.0));

    assert_eq!(path.point(PointIndex(1)), point(4.0, 3.0));
}
