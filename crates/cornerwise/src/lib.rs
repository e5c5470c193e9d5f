#![deny(bare_trait_objects)]

//! Winding direction and corner classification of 2D paths.
//!
//! # Crates
//!
//! This meta-crate (`cornerwise`) reexports the following sub-crates for convenience:
//!
//! * **cornerwise_path** - Tools to build and iterate over paths, with stable point indices.
//! * **cornerwise_algorithms** - The corner analyzer.
//! * **lyon_geom** - 2d utilities for line segments and bézier curves.
//!
//! Each `cornerwise_<name>` crate is reexported as a `<name>` module in `cornerwise`. For
//! example:
//!
//! ```ignore
//! extern crate cornerwise_algorithms;
//! use cornerwise_algorithms::analyzer::CornerAnalyzer;
//! ```
//!
//! Is equivalent to:
//!
//! ```ignore
//! extern crate cornerwise;
//! use cornerwise::algorithms::analyzer::CornerAnalyzer;
//! ```
//!
//! # Feature flags
//!
//! serialization using serde can be enabled on each crate using the
//! `serialization` feature flag (disabled by default).
//!
//! # Examples
//!
//! ## Orienting the corners of a shape
//!
//! ```
//! use cornerwise::math::point;
//! use cornerwise::path::{Path, RotationDirection};
//! use cornerwise::{AnalyzerOptions, CornerAnalyzer, CornerVisit};
//!
//! // A square traversed clockwise, with its top edge bent by a curve.
//! let mut builder = Path::builder();
//! builder.begin(point(0.0, 0.0));
//! builder.line_to(point(0.0, 10.0));
//! builder.quadratic_bezier_to(point(5.0, 15.0), point(10.0, 10.0));
//! builder.line_to(point(10.0, 0.0));
//! builder.close();
//! let path = builder.build();
//!
//! let mut analyzer = CornerAnalyzer::new();
//! let mut corners = Vec::new();
//! let direction = analyzer.analyze_with_visitor(
//!     &path,
//!     &AnalyzerOptions::default(),
//!     &mut |visit: &CornerVisit| {
//!         // Oriented corners always have the inside of the shape on their left.
//!         corners.push((visit.index, visit.corner.turn()));
//!     },
//! ).unwrap();
//!
//! assert_eq!(direction, RotationDirection::Clockwise);
//! assert_eq!(corners.len(), 4);
//! for (_, turn) in corners {
//!     assert_eq!(turn, RotationDirection::CounterClockwise);
//! }
//! ```
//!
//! ## Per sub-path results
//!
//! ```
//! use cornerwise::math::point;
//! use cornerwise::path::{Path, PointIndex, RotationDirection};
//! use cornerwise::{AnalyzerOptions, CornerAnalyzer};
//!
//! let mut builder = Path::builder();
//! builder.begin(point(0.0, 0.0));
//! builder.line_to(point(10.0, 0.0));
//! builder.line_to(point(0.0, 10.0));
//! builder.close();
//! builder.begin(point(20.0, 0.0));
//! builder.line_to(point(20.0, 10.0));
//! builder.line_to(point(30.0, 0.0));
//! builder.close();
//! let path = builder.build();
//!
//! let mut analyzer = CornerAnalyzer::new();
//! let subpaths = analyzer.analyze_subpaths(&path, &AnalyzerOptions::default()).unwrap();
//!
//! assert_eq!(subpaths[0].direction(), RotationDirection::CounterClockwise);
//! assert_eq!(subpaths[1].direction(), RotationDirection::Clockwise);
//! assert!(subpaths[1].corner(PointIndex(4)).unwrap().is_inverted());
//! ```

pub extern crate cornerwise_algorithms;

pub use cornerwise_algorithms as algorithms;
pub use cornerwise_algorithms::path;

pub use cornerwise_algorithms::geom;
pub use cornerwise_algorithms::math;

pub use cornerwise_algorithms::{
    AnalysisError, AnalysisResult, AnalyzerOptions, CornerAnalyzer, CornerVisit, CornerVisitor,
    FillRule, PointIndex, RotationDirection, SubpathCorners, UnsupportedParameter,
};
