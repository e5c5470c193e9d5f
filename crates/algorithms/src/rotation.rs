//! Resolve the rotation direction of a sub-path from its corners.

use crate::corner::Corner;
use crate::intersections::IntersectionCounts;
use crate::path::RotationDirection;

/// Minimum number of corners a sub-path needs to have a rotation direction.
pub const MIN_CORNERS: usize = 3;

/// Tally of the corner votes of a sub-path.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct Votes {
    pub clockwise: u32,
    pub counter_clockwise: u32,
}

impl Votes {
    pub fn new() -> Self {
        Votes::default()
    }

    /// Adds a vote. `RotationDirection::None` is not counted.
    pub fn add(&mut self, vote: RotationDirection) {
        match vote {
            RotationDirection::Clockwise => self.clockwise += 1,
            RotationDirection::CounterClockwise => self.counter_clockwise += 1,
            RotationDirection::None => {}
        }
    }

    pub fn total(&self) -> u32 {
        self.clockwise + self.counter_clockwise
    }

    /// Clockwise if it has strictly more votes, otherwise counter-clockwise.
    ///
    /// Returns `RotationDirection::None` if nothing was voted.
    pub fn direction(&self) -> RotationDirection {
        if self.total() == 0 {
            RotationDirection::None
        } else if self.clockwise > self.counter_clockwise {
            RotationDirection::Clockwise
        } else {
            RotationDirection::CounterClockwise
        }
    }
}

/// The vote of a corner whose incoming edge crosses the rest of the sub-path
/// `intersections` times.
///
/// An odd number of crossings means the corner sits on a part of the contour that
/// runs against the overall direction, so its turn counts for the opposite side.
pub fn corrected_vote(turn: RotationDirection, intersections: u32, parity_correction: bool) -> RotationDirection {
    if parity_correction && intersections % 2 == 1 {
        turn.reversed()
    } else {
        turn
    }
}

/// Tallies the votes of the corners of a sub-path.
pub fn vote<'l, Corners>(corners: Corners, counts: &IntersectionCounts, parity_correction: bool) -> Votes
where
    Corners: IntoIterator<Item = &'l Corner>,
{
    let mut votes = Votes::new();
    for corner in corners {
        votes.add(corrected_vote(
            corner.intrinsic_turn(),
            counts.count(corner.index()),
            parity_correction,
        ));
    }

    votes
}

#[cfg(test)]
use crate::intersections::collect_intersectables;
#[cfg(test)]
use crate::math::{point, Point};
#[cfg(test)]
use crate::path::PointIndex;

#[cfg(test)]
fn closed_corners(points: &[Point]) -> Vec<Corner> {
    let n = points.len();
    (0..n)
        .map(|i| {
            Corner::new(
                PointIndex(i as u32),
                points[(i + n - 1) % n],
                points[i],
                points[(i + 1) % n],
            )
        })
        .collect()
}

#[cfg(test)]
fn votes_of(points: &[Point], parity_correction: bool) -> Votes {
    let corners = closed_corners(points);
    let items = collect_intersectables(&corners, &[]);
    let counts = IntersectionCounts::compute(&corners, &items);
    vote(&corners, &counts, parity_correction)
}

#[test]
fn votes_direction() {
    let mut votes = Votes::new();
    assert_eq!(votes.direction(), RotationDirection::None);

    votes.add(RotationDirection::None);
    assert_eq!(votes.direction(), RotationDirection::None);

    votes.add(RotationDirection::Clockwise);
    assert_eq!(votes.direction(), RotationDirection::Clockwise);

    votes.add(RotationDirection::CounterClockwise);
    assert_eq!(votes.direction(), RotationDirection::CounterClockwise);
    assert_eq!(votes.total(), 2);
}

#[test]
fn parity() {
    use RotationDirection::*;
    assert_eq!(corrected_vote(Clockwise, 0, true), Clockwise);
    assert_eq!(corrected_vote(Clockwise, 1, true), CounterClockwise);
    assert_eq!(corrected_vote(Clockwise, 2, true), Clockwise);
    assert_eq!(corrected_vote(CounterClockwise, 3, true), Clockwise);
    assert_eq!(corrected_vote(CounterClockwise, 3, false), CounterClockwise);
    assert_eq!(corrected_vote(None, 1, true), None);
}

#[test]
fn square_votes() {
    let ccw = [
        point(0.0, 0.0),
        point(10.0, 0.0),
        point(10.0, 10.0),
        point(0.0, 10.0),
    ];
    let votes = votes_of(&ccw, true);
    assert_eq!(
        votes,
        Votes {
            clockwise: 0,
            counter_clockwise: 4
        }
    );
    assert_eq!(votes.direction(), RotationDirection::CounterClockwise);

    let mut cw = ccw;
    cw.reverse();
    assert_eq!(votes_of(&cw, true).direction(), RotationDirection::Clockwise);
}

#[test]
fn bow_tie_votes() {
    let bow_tie = [
        point(0.0, 0.0),
        point(10.0, 10.0),
        point(10.0, 0.0),
        point(0.0, 10.0),
    ];

    // Intrinsic turns: ccw, cw, cw, ccw. Corners #1 and #3 are crossed once.
    let votes = votes_of(&bow_tie, true);
    assert_eq!(
        votes,
        Votes {
            clockwise: 2,
            counter_clockwise: 2
        }
    );
    // Ties go counter-clockwise.
    assert_eq!(votes.direction(), RotationDirection::CounterClockwise);

    let votes = votes_of(&bow_tie, false);
    assert_eq!(votes.clockwise, 2);
    assert_eq!(votes.counter_clockwise, 2);
}

#[test]
fn collinear_corners_do_not_vote() {
    let points = [
        point(0.0, 0.0),
        point(5.0, 0.0),
        point(10.0, 0.0),
        point(10.0, 10.0),
        point(0.0, 10.0),
    ];
    let votes = votes_of(&points, true);
    assert_eq!(votes.total(), 4);
    assert_eq!(votes.direction(), RotationDirection::CounterClockwise);
}
