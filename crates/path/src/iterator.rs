//! Tools to iterate over path commands along with their absolute point indices.
//!
//! ## Examples
//!
//! ```
//! use cornerwise_path::{Path, PathCommand, PointIndex};
//! use cornerwise_path::math::point;
//!
//! let mut builder = Path::builder();
//! builder.begin(point(0.0, 0.0));
//! builder.cubic_bezier_to(point(1.0, 0.0), point(1.0, 1.0), point(0.0, 1.0));
//! builder.line_to(point(0.0, 2.0));
//! builder.close();
//! let path = builder.build();
//!
//! let indices: Vec<PointIndex> = path.indexed().map(|(idx, _)| idx).collect();
//! // The cubic consumes three slots (two control points and its end point).
//! assert_eq!(indices, vec![PointIndex(0), PointIndex(3), PointIndex(4), PointIndex(0)]);
//! ```

use crate::{PathCommand, PointIndex};

/// Pairs each command with the index of its end point.
///
/// `Close` commands are paired with the index of the first point of the sub-path they
/// close, since that is where the closing edge ends.
pub struct IndexedCommands<Iter> {
    inner: Iter,
    next_slot: u32,
    first: PointIndex,
    in_sub_path: bool,
}

impl<Iter> IndexedCommands<Iter>
where
    Iter: Iterator<Item = PathCommand>,
{
    pub fn new(inner: Iter) -> Self {
        IndexedCommands {
            inner,
            next_slot: 0,
            first: PointIndex(0),
            in_sub_path: false,
        }
    }

    /// The index the next point slot will receive.
    pub fn next_index(&self) -> PointIndex {
        PointIndex(self.next_slot)
    }
}

impl<Iter> Iterator for IndexedCommands<Iter>
where
    Iter: Iterator<Item = PathCommand>,
{
    type Item = (PointIndex, PathCommand);

    fn next(&mut self) -> Option<(PointIndex, PathCommand)> {
        let cmd = self.inner.next()?;
        let slots = cmd.point_slots();
        if slots == 0 {
            self.in_sub_path = false;
            return Some((self.first, cmd));
        }

        let idx = PointIndex(self.next_slot + slots - 1);
        self.next_slot += slots;
        // A segment without an open sub-path starts one at its own end point.
        if !self.in_sub_path || matches!(cmd, PathCommand::MoveTo { .. }) {
            self.first = idx;
        }
        self.in_sub_path = true;

        Some((idx, cmd))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

#[test]
fn indexed_multiple_sub_paths() {
    use crate::math::point;

    let commands = vec![
        PathCommand::MoveTo { to: point(0.0, 0.0) },
        PathCommand::QuadraticTo {
            ctrl: point(1.0, 0.0),
            to: point(1.0, 1.0),
        },
        PathCommand::Close,
        PathCommand::MoveTo { to: point(5.0, 5.0) },
        PathCommand::LineTo { to: point(6.0, 5.0) },
        PathCommand::Close,
    ];

    let mut iter = IndexedCommands::new(commands.into_iter());
    assert_eq!(iter.next().map(|(i, _)| i), Some(PointIndex(0)));
    assert_eq!(iter.next().map(|(i, _)| i), Some(PointIndex(2)));
    assert_eq!(iter.next().map(|(i, _)| i), Some(PointIndex(0)));
    assert_eq!(iter.next().map(|(i, _)| i), Some(PointIndex(3)));
    assert_eq!(iter.next().map(|(i, _)| i), Some(PointIndex(4)));
    assert_eq!(iter.next().map(|(i, _)| i), Some(PointIndex(3)));
    assert_eq!(iter.next_index(), PointIndex(5));
    assert!(iter.next().is_none());
}

#[test]
fn indexed_implicit_sub_path_start() {
    use crate::math::point;

    let commands = vec![
        PathCommand::MoveTo { to: point(0.0, 0.0) },
        PathCommand::LineTo { to: point(1.0, 0.0) },
        PathCommand::LineTo { to: point(1.0, 1.0) },
        PathCommand::Close,
        PathCommand::LineTo { to: point(5.0, 5.0) },
        PathCommand::LineTo { to: point(6.0, 5.0) },
        PathCommand::LineTo { to: point(6.0, 6.0) },
        PathCommand::Close,
    ];

    let indices: Vec<PointIndex> = IndexedCommands::new(commands.into_iter())
        .map(|(idx, _)| idx)
        .collect();

    let expected: Vec<PointIndex> = [0, 1, 2, 0, 3, 4, 5, 3].iter().map(|&i| PointIndex(i)).collect();
    assert_eq!(indices, expected);
}
