//! Specific path types for polygons.

use crate::math::Point;
use crate::PathCommand;

/// A view over a sequence of endpoints forming a polygon.
///
/// ## Example
///
/// ```
/// use cornerwise_path::polygon::Polygon;
/// use cornerwise_path::math::point;
///
/// let polygon = Polygon {
///     points: &[
///         point(0.0, 0.0),
///         point(10.0, 10.0),
///         point(0.0, 10.0),
///     ],
///     closed: true,
/// };
///
/// for command in polygon.commands() {
///     // same as iterating a regular `Path` object.
/// }
/// ```
#[derive(Copy, Clone, Debug)]
pub struct Polygon<'l> {
    pub points: &'l [Point],
    pub closed: bool,
}

impl<'l> Polygon<'l> {
    /// Returns an iterator of `PathCommand`.
    pub fn commands(&self) -> PolygonCommands<'l> {
        PolygonCommands {
            points: self.points.iter(),
            started: false,
            closed: self.closed,
        }
    }
}

impl<'l> IntoIterator for Polygon<'l> {
    type Item = PathCommand;
    type IntoIter = PolygonCommands<'l>;

    fn into_iter(self) -> PolygonCommands<'l> {
        self.commands()
    }
}

/// An iterator of `PathCommand` for polygons.
#[derive(Clone)]
pub struct PolygonCommands<'l> {
    points: std::slice::Iter<'l, Point>,
    started: bool,
    closed: bool,
}

impl<'l> Iterator for PolygonCommands<'l> {
    type Item = PathCommand;
    fn next(&mut self) -> Option<PathCommand> {
        match (self.started, self.points.next()) {
            (false, Some(&to)) => {
                self.started = true;
                Some(PathCommand::MoveTo { to })
            }
            (true, Some(&to)) => Some(PathCommand::LineTo { to }),
            (true, None) if self.closed => {
                self.closed = false;
                Some(PathCommand::Close)
            }
            _ => None,
        }
    }
}

#[test]
fn polygon_commands() {
    use crate::math::point;

    let points = &[point(0.0, 0.0), point(1.0, 0.0), point(1.0, 1.0)];
    let commands: Vec<PathCommand> = Polygon {
        points,
        closed: true,
    }
    .commands()
    .collect();

    assert_eq!(
        commands,
        vec![
            PathCommand::MoveTo { to: point(0.0, 0.0) },
            PathCommand::LineTo { to: point(1.0, 0.0) },
            PathCommand::LineTo { to: point(1.0, 1.0) },
            PathCommand::Close,
        ]
    );

    let open: Vec<PathCommand> = Polygon {
        points,
        closed: false,
    }
    .commands()
    .collect();
    assert_eq!(open.len(), 3);

    let empty: Vec<PathCommand> = Polygon {
        points: &[],
        closed: true,
    }
    .commands()
    .collect();
    assert!(empty.is_empty());
}
