use crate::geom::traits::Transformation;
use crate::math::Point;

/// A single drawing command of a path.
///
/// Commands only carry the points they introduce: the start of a
/// segment is implicitly the end of the previous command.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum PathCommand {
    MoveTo {
        to: Point,
    },
    LineTo {
        to: Point,
    },
    QuadraticTo {
        ctrl: Point,
        to: Point,
    },
    CubicTo {
        ctrl1: Point,
        ctrl2: Point,
        to: Point,
    },
    Close,
}

impl PathCommand {
    /// The end point of the command, `None` for `Close`.
    pub fn to(&self) -> Option<Point> {
        match *self {
            PathCommand::MoveTo { to }
            | PathCommand::LineTo { to }
            | PathCommand::QuadraticTo { to, .. }
            | PathCommand::CubicTo { to, .. } => Some(to),
            PathCommand::Close => None,
        }
    }

    /// Number of point slots consumed by the command (control points included).
    pub fn point_slots(&self) -> u32 {
        match self {
            PathCommand::MoveTo { .. } | PathCommand::LineTo { .. } => 1,
            PathCommand::QuadraticTo { .. } => 2,
            PathCommand::CubicTo { .. } => 3,
            PathCommand::Close => 0,
        }
    }

    /// Returns false if any of the command's coordinates is NaN or infinite.
    pub fn is_finite(&self) -> bool {
        let finite = |p: &Point| p.x.is_finite() && p.y.is_finite();
        match self {
            PathCommand::MoveTo { to } | PathCommand::LineTo { to } => finite(to),
            PathCommand::QuadraticTo { ctrl, to } => finite(ctrl) && finite(to),
            PathCommand::CubicTo { ctrl1, ctrl2, to } => {
                finite(ctrl1) && finite(ctrl2) && finite(to)
            }
            PathCommand::Close => true,
        }
    }

    pub fn transformed<T: Transformation<f64>>(&self, mat: &T) -> Self {
        match self {
            PathCommand::MoveTo { to } => PathCommand::MoveTo {
                to: mat.transform_point(*to),
            },
            PathCommand::LineTo { to } => PathCommand::LineTo {
                to: mat.transform_point(*to),
            },
            PathCommand::QuadraticTo { ctrl, to } => PathCommand::QuadraticTo {
                ctrl: mat.transform_point(*ctrl),
                to: mat.transform_point(*to),
            },
            PathCommand::CubicTo { ctrl1, ctrl2, to } => PathCommand::CubicTo {
                ctrl1: mat.transform_point(*ctrl1),
                ctrl2: mat.transform_point(*ctrl2),
                to: mat.transform_point(*to),
            },
            PathCommand::Close => PathCommand::Close,
        }
    }
}

#[test]
fn command_point_slots() {
    use crate::math::point;

    let p = point(1.0, 2.0);
    assert_eq!(PathCommand::MoveTo { to: p }.point_slots(), 1);
    assert_eq!(PathCommand::LineTo { to: p }.point_slots(), 1);
    assert_eq!(PathCommand::QuadraticTo { ctrl: p, to: p }.point_slots(), 2);
    assert_eq!(
        PathCommand::CubicTo {
            ctrl1: p,
            ctrl2: p,
            to: p
        }
        .point_slots(),
        3
    );
    assert_eq!(PathCommand::Close.point_slots(), 0);
    assert_eq!(PathCommand::Close.to(), None);
}

#[test]
fn command_transformed() {
    use crate::math::{point, Transform};

    let cmd = PathCommand::QuadraticTo {
        ctrl: point(1.0, 0.0),
        to: point(1.0, 1.0),
    };
    let t = Transform::translation(2.0, 3.0);

    assert_eq!(
        cmd.transformed(&t),
        PathCommand::QuadraticTo {
            ctrl: point(3.0, 3.0),
            to: point(3.0, 4.0),
        }
    );
}

#[test]
fn command_is_finite() {
    use crate::math::point;

    assert!(PathCommand::LineTo { to: point(0.0, 1.0) }.is_finite());
    assert!(!PathCommand::LineTo {
        to: point(std::f64::NAN, 1.0)
    }
    .is_finite());
    assert!(!PathCommand::CubicTo {
        ctrl1: point(0.0, 0.0),
        ctrl2: point(std::f64::INFINITY, 0.0),
        to: point(1.0, 1.0),
    }
    .is_finite());
}
