#![deny(bare_trait_objects)]
#![allow(clippy::float_cmp)]

//! Winding and corner classification of 2D paths.
//!
//! Given a path made of lines, quadratic and cubic bézier curves, possibly with several
//! sub-paths and self-intersections, the [`analyzer`](analyzer/index.html) determines
//! the rotation direction of each sub-path and hands every corner, correctly oriented,
//! to a visitor.
//!
//! This crate is reexported in [cornerwise](https://docs.rs/cornerwise/).
//!
//! # Crate overview
//!
//! - [`analyzer`](analyzer/index.html): the entry point, see [`CornerAnalyzer`].
//! - [`corner`](corner/index.html): the turn at a vertex and its probe points.
//! - [`flatten`](flatten/index.html): fixed-count polyline approximation of curves.
//! - [`approximation`](approximation/index.html): per sub-path containment queries.
//! - [`intersections`](intersections/index.html): crossings between the edges of a sub-path.
//! - [`sampling`](sampling/index.html): which side of a corner is the inside.
//! - [`rotation`](rotation/index.html): the majority vote.
//!
//! Logging goes through the [log](https://docs.rs/log/) facade. No logger is installed
//! by this crate.

pub extern crate cornerwise_path as path;

#[cfg(feature = "serialization")]
#[macro_use]
pub extern crate serde;

pub mod analyzer;
pub mod approximation;
pub mod corner;
pub mod error;
pub mod flatten;
pub mod intersections;
pub mod options;
pub mod rotation;
pub mod sampling;

mod walk;

#[cfg(test)]
mod analyzer_tests;

pub use crate::path::geom;
pub use crate::path::math;

#[doc(inline)]
pub use crate::analyzer::{CornerAnalyzer, CornerVisit, CornerVisitor, SubpathCorners};
#[doc(inline)]
pub use crate::error::{AnalysisError, AnalysisResult, UnsupportedParameter};
#[doc(inline)]
pub use crate::options::AnalyzerOptions;
pub use crate::path::{FillRule, PointIndex, RotationDirection};
