#![deny(bare_trait_objects)]
#![deny(unconditional_recursion)]
#![allow(clippy::match_like_matches_macro)]

//! Data structures to describe and iterate over 2D paths for corner analysis.
//!
//! Paths are sequences of [`PathCommand`]s. Every endpoint and every control point
//! consumes one slot in the path's point numbering, so a [`PointIndex`] stays a stable
//! identifier of a vertex even though control points never become corners.
//!
//! This crate is reexported in [cornerwise](https://docs.rs/cornerwise/).
//!
//! # Examples
//!
//! ```
//! use cornerwise_path::Path;
//! use cornerwise_path::math::point;
//!
//! let mut builder = Path::builder();
//! builder.begin(point(0.0, 0.0));
//! builder.line_to(point(10.0, 0.0));
//! builder.quadratic_bezier_to(point(10.0, 10.0), point(0.0, 10.0));
//! builder.close();
//!
//! let path = builder.build();
//!
//! for (index, command) in path.indexed() {
//!     println!("{:?}: {:?}", index, command);
//! }
//! ```

pub use lyon_geom as geom;

#[cfg(feature = "serialization")]
#[macro_use]
pub extern crate serde;

mod commands;
pub mod iterator;
pub mod path;
pub mod polygon;

pub use crate::commands::*;
#[doc(inline)]
pub use crate::iterator::IndexedCommands;
#[doc(inline)]
pub use crate::path::{Builder, Path};
#[doc(inline)]
pub use crate::polygon::Polygon;

use std::fmt;

pub mod math {
    //! f64 version of the lyon_geom types used everywhere in cornerwise.

    use crate::geom::euclid;

    /// Alias for ```euclid::default::Point2D<f64>```.
    pub type Point = euclid::default::Point2D<f64>;

    /// Alias for ```euclid::default::Vector2D<f64>```.
    pub type Vector = euclid::default::Vector2D<f64>;

    /// Alias for ```euclid::default::Box2D<f64>```.
    pub type Box2D = euclid::default::Box2D<f64>;

    /// Alias for ```euclid::default::Transform2D<f64>```.
    pub type Transform = euclid::default::Transform2D<f64>;

    /// Alias for ```euclid::default::Rotation2D<f64>```.
    pub type Rotation = euclid::default::Rotation2D<f64>;

    /// An angle in radians (f64).
    pub type Angle = euclid::Angle<f64>;

    /// Shorthand for `Vector::new(x, y)`.
    #[inline]
    pub fn vector(x: f64, y: f64) -> Vector {
        Vector::new(x, y)
    }

    /// Shorthand for `Point::new(x, y)`.
    #[inline]
    pub fn point(x: f64, y: f64) -> Point {
        Point::new(x, y)
    }
}

/// The fill rule defines how to determine what is inside and what is outside of the shape.
///
/// See the SVG specification.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum FillRule {
    EvenOdd,
    NonZero,
}

impl FillRule {
    #[inline]
    pub fn is_in(&self, winding_number: i32) -> bool {
        match *self {
            FillRule::EvenOdd => winding_number % 2 != 0,
            FillRule::NonZero => winding_number != 0,
        }
    }

    #[inline]
    pub fn is_out(&self, winding_number: i32) -> bool {
        !self.is_in(winding_number)
    }
}

/// The rotational direction of a turn or of a whole contour.
///
/// Directions are expressed in the standard mathematical convention (x pointing right,
/// y pointing up). In a y-down coordinate system the names are swapped.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum RotationDirection {
    Clockwise,
    CounterClockwise,
    /// Not enough information: a collinear turn or a contour with fewer than three corners.
    None,
}

impl RotationDirection {
    /// Classifies the sign of a cross product.
    ///
    /// Positive is counter-clockwise, negative is clockwise and zero is `None`.
    #[inline]
    pub fn from_cross(cross: f64) -> Self {
        if cross > 0.0 {
            RotationDirection::CounterClockwise
        } else if cross < 0.0 {
            RotationDirection::Clockwise
        } else {
            RotationDirection::None
        }
    }

    /// Returns the opposite direction. `None` stays `None`.
    #[inline]
    pub fn reversed(self) -> Self {
        match self {
            RotationDirection::Clockwise => RotationDirection::CounterClockwise,
            RotationDirection::CounterClockwise => RotationDirection::Clockwise,
            RotationDirection::None => RotationDirection::None,
        }
    }

    #[inline]
    pub fn is_none(self) -> bool {
        self == RotationDirection::None
    }
}

/// Absolute index of a point slot in a path.
///
/// Endpoints and control points each consume one slot: a `MoveTo` or `LineTo` advances
/// the numbering by one, a `QuadraticTo` by two and a `CubicTo` by three. The index of a
/// command is the index of its end point.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct PointIndex(pub u32);

impl PointIndex {
    pub fn to_usize(self) -> usize {
        self.0 as usize
    }
    pub fn from_usize(val: usize) -> Self {
        debug_assert!(val < u32::MAX as usize);
        PointIndex(val as u32)
    }
}

impl fmt::Debug for PointIndex {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl fmt::Display for PointIndex {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[test]
fn rotation_direction_from_cross() {
    assert_eq!(
        RotationDirection::from_cross(1.0),
        RotationDirection::CounterClockwise
    );
    assert_eq!(
        RotationDirection::from_cross(-0.5),
        RotationDirection::Clockwise
    );
    assert_eq!(RotationDirection::from_cross(0.0), RotationDirection::None);
    assert_eq!(
        RotationDirection::Clockwise.reversed(),
        RotationDirection::CounterClockwise
    );
    assert_eq!(RotationDirection::None.reversed(), RotationDirection::None);
}

#[test]
fn fill_rule_winding_numbers() {
    assert!(FillRule::EvenOdd.is_in(1));
    assert!(FillRule::EvenOdd.is_out(2));
    assert!(FillRule::EvenOdd.is_in(-1));
    assert!(FillRule::NonZero.is_in(2));
    assert!(FillRule::NonZero.is_out(0));
}

#[test]
#[cfg(debug_assertions)]
#[should_panic]
fn point_index_overflow() {
    let _ = PointIndex::from_usize(u32::MAX as usize);
}
