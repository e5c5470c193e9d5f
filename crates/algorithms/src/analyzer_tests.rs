use crate::analyzer::{CornerAnalyzer, CornerVisit, CornerVisitor};
use crate::approximation::ApproximationPolygon;
use crate::corner::Corner;
use crate::math::*;
use crate::options::AnalyzerOptions;
use crate::path::{Path, PathCommand, PointIndex, Polygon, RotationDirection};
use crate::rotation::corrected_vote;
use crate::sampling::Sampling;
use crate::{AnalysisError, UnsupportedParameter};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::f64::consts::TAU;

#[derive(Clone, Debug, PartialEq)]
struct Visited {
    index: PointIndex,
    corner: Corner,
    subpath: usize,
    direction: RotationDirection,
    approximation: ApproximationPolygon,
    prev: PointIndex,
    next: PointIndex,
}

#[derive(Default)]
struct Recorder {
    visits: Vec<Visited>,
}

impl CornerVisitor for Recorder {
    fn visit(&mut self, visit: &CornerVisit) {
        self.visits.push(Visited {
            index: visit.index,
            corner: visit.corner,
            subpath: visit.subpath,
            direction: visit.direction,
            approximation: visit.approximation.clone(),
            prev: visit.prev,
            next: visit.next,
        });
    }
}

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn analyze<Iter>(path: Iter) -> (RotationDirection, Vec<Visited>)
where
    Iter: IntoIterator<Item = PathCommand>,
{
    init_logger();

    let mut recorder = Recorder::default();
    let mut analyzer = CornerAnalyzer::new();
    let direction = analyzer
        .analyze_with_visitor(path, &AnalyzerOptions::default(), &mut recorder)
        .unwrap();

    (direction, recorder.visits)
}

fn polygon_path(points: &[Point]) -> Path {
    Polygon {
        points,
        closed: true,
    }
    .into_iter()
    .collect()
}

fn square() -> Vec<Point> {
    vec![
        point(0.0, 0.0),
        point(10.0, 0.0),
        point(10.0, 10.0),
        point(0.0, 10.0),
    ]
}

// Points on a circle at increasing angles, so counter-clockwise and convex.
fn random_convex_polygon(rng: &mut StdRng) -> Vec<Point> {
    let n = rng.gen_range(3..12);
    let center = point(rng.gen_range(-100.0..100.0), rng.gen_range(-100.0..100.0));
    let radius = rng.gen_range(10.0..50.0);

    let gaps: Vec<f64> = (0..n).map(|_| rng.gen_range(0.5..1.5)).collect();
    let total: f64 = gaps.iter().sum();
    let mut angle = rng.gen_range(0.0..TAU);

    let mut points = Vec::with_capacity(n);
    for gap in gaps {
        points.push(center + vector(angle.cos(), angle.sin()) * radius);
        angle += gap / total * TAU;
    }

    points
}

fn rotated(points: &[Point], first: usize) -> Vec<Point> {
    let mut points = points.to_vec();
    points.rotate_left(first);
    points
}

#[test]
fn square_counter_clockwise() {
    let (direction, visits) = analyze(&polygon_path(&square()));

    assert_eq!(direction, RotationDirection::CounterClockwise);
    assert_eq!(visits.len(), 4);

    let indices: Vec<u32> = visits.iter().map(|v| v.index.0).collect();
    assert_eq!(indices, vec![0, 1, 2, 3]);

    for visit in &visits {
        assert_eq!(visit.subpath, 0);
        assert_eq!(visit.direction, RotationDirection::CounterClockwise);
        assert!(!visit.corner.is_inverted());
        assert_eq!(visit.corner.turn(), RotationDirection::CounterClockwise);
        assert!((visit.corner.turn_angle().to_degrees().abs() - 90.0).abs() < 1e-9);
        assert_eq!(visit.approximation.len(), 5);
        assert!(visit.approximation.is_closed());
    }

    assert_eq!(visits[0].prev, PointIndex(3));
    assert_eq!(visits[0].next, PointIndex(1));
    assert_eq!(visits[3].prev, PointIndex(2));
    assert_eq!(visits[3].next, PointIndex(0));
}

#[test]
fn square_clockwise() {
    let points = [
        point(0.0, 0.0),
        point(0.0, 10.0),
        point(10.0, 10.0),
        point(10.0, 0.0),
    ];
    let (direction, visits) = analyze(&polygon_path(&points));

    assert_eq!(direction, RotationDirection::Clockwise);
    assert_eq!(visits.len(), 4);

    for visit in &visits {
        assert_eq!(visit.direction, RotationDirection::Clockwise);
        // The inside is on the right-hand side of every corner.
        assert!(visit.corner.is_inverted());
        assert_eq!(visit.corner.intrinsic_turn(), RotationDirection::Clockwise);
        assert_eq!(visit.corner.turn(), RotationDirection::CounterClockwise);
    }

    // Neighbours are swapped for inverted corners.
    assert_eq!(visits[0].index, PointIndex(0));
    assert_eq!(visits[0].prev, PointIndex(1));
    assert_eq!(visits[0].next, PointIndex(3));

    // The oriented corner of #1 goes from (10, 10) to (0, 0) through (0, 10).
    assert_eq!(visits[1].corner.prev(), point(10.0, 10.0));
    assert_eq!(visits[1].corner.at(), point(0.0, 10.0));
    assert_eq!(visits[1].corner.next(), point(0.0, 0.0));
}

#[test]
fn direction_does_not_depend_on_first_vertex() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    let mut analyzer = CornerAnalyzer::new();
    let options = AnalyzerOptions::default();

    for _ in 0..200 {
        let points = random_convex_polygon(&mut rng);
        for first in 0..points.len() {
            let ccw = rotated(&points, first);
            let path = polygon_path(&ccw);

            let subpaths = analyzer.analyze_subpaths(&path, &options).unwrap();
            assert_eq!(
                subpaths[0].direction(),
                RotationDirection::CounterClockwise,
                "{:?}",
                ccw
            );
            for corner in subpaths[0].corners() {
                assert!(!corner.is_inverted(), "{:?} in {:?}", corner, ccw);
            }

            let reversed = path.reversed();
            let subpaths = analyzer.analyze_subpaths(&reversed, &options).unwrap();
            assert_eq!(
                subpaths[0].direction(),
                RotationDirection::Clockwise,
                "{:?}",
                ccw
            );
            for corner in subpaths[0].corners() {
                assert!(corner.is_inverted(), "{:?} in {:?}", corner, ccw);
            }
        }
    }
}

#[test]
fn reflex_corner() {
    let l_shape = [
        point(0.0, 0.0),
        point(20.0, 0.0),
        point(20.0, 5.0),
        point(5.0, 5.0),
        point(5.0, 20.0),
        point(0.0, 20.0),
    ];

    let mut analyzer = CornerAnalyzer::new();
    let options = AnalyzerOptions::default();
    for first in 0..l_shape.len() {
        let points = rotated(&l_shape, first);
        let path = polygon_path(&points);

        assert_eq!(
            analyzer.analyze(&path, &options).unwrap(),
            RotationDirection::CounterClockwise
        );
        let votes = analyzer.subpaths()[0].votes();
        assert_eq!(votes.counter_clockwise, 5);
        assert_eq!(votes.clockwise, 1);
        for corner in analyzer.subpaths()[0].corners() {
            assert!(!corner.is_inverted());
        }

        assert_eq!(
            analyzer.analyze(&path.reversed(), &options).unwrap(),
            RotationDirection::Clockwise
        );
    }
}

#[test]
fn repeated_start_point() {
    let mut builder = Path::builder();
    builder.begin(point(0.0, 0.0));
    builder.line_to(point(10.0, 0.0));
    builder.line_to(point(10.0, 10.0));
    builder.line_to(point(0.0, 10.0));
    builder.close();
    let implicit = builder.build();

    let mut builder = Path::builder();
    builder.begin(point(0.0, 0.0));
    builder.line_to(point(10.0, 0.0));
    builder.line_to(point(10.0, 10.0));
    builder.line_to(point(0.0, 10.0));
    builder.line_to(point(0.0, 0.0));
    builder.close();
    let repeated = builder.build();

    let (d1, v1) = analyze(&implicit);
    let (d2, v2) = analyze(&repeated);

    assert_eq!(d1, RotationDirection::CounterClockwise);
    assert_eq!(d1, d2);
    assert_eq!(v1.len(), 4);
    assert_eq!(v1, v2);
}

#[test]
fn repeated_start_point_with_curves() {
    let build = |repeat: bool| {
        let mut builder = Path::builder();
        builder.begin(point(0.0, 0.0));
        builder.quadratic_bezier_to(point(5.0, -3.0), point(10.0, 0.0));
        builder.line_to(point(10.0, 10.0));
        builder.cubic_bezier_to(point(7.0, 13.0), point(3.0, 13.0), point(0.0, 10.0));
        if repeat {
            builder.line_to(point(0.0, 0.0));
        }
        builder.close();
        builder.build()
    };

    let (d1, v1) = analyze(&build(false));
    let (d2, v2) = analyze(&build(true));

    assert_eq!(d1, RotationDirection::CounterClockwise);
    assert_eq!(d1, d2);

    let indices: Vec<u32> = v1.iter().map(|v| v.index.0).collect();
    assert_eq!(indices, vec![0, 2, 3, 6]);
    assert_eq!(v1, v2);
}

#[test]
fn two_points() {
    let mut builder = Path::builder();
    builder.begin(point(0.0, 0.0));
    builder.line_to(point(10.0, 0.0));
    builder.close();
    let path = builder.build();

    let (direction, visits) = analyze(&path);
    assert_eq!(direction, RotationDirection::None);
    assert!(visits.is_empty());
}

#[test]
fn empty_path() {
    let (direction, visits) = analyze(&Path::new());
    assert_eq!(direction, RotationDirection::None);
    assert!(visits.is_empty());

    let mut analyzer = CornerAnalyzer::new();
    let subpaths = analyzer
        .analyze_subpaths(&Path::new(), &AnalyzerOptions::default())
        .unwrap();
    assert!(subpaths.is_empty());
}

#[test]
fn figure_eight() {
    // Two triangles sharing the crossing at (5, 5).
    let points = [
        point(0.0, 0.0),
        point(10.0, 10.0),
        point(10.0, 0.0),
        point(0.0, 10.0),
    ];
    let path = polygon_path(&points);

    let mut analyzer = CornerAnalyzer::new();
    let options = AnalyzerOptions::default();
    let subpaths = analyzer.analyze_subpaths(&path, &options).unwrap().to_vec();
    let subpath = &subpaths[0];

    // Each lobe has one corner whose incoming edge goes through the crossing.
    for &idx in &[1, 3] {
        let corner = subpath.corner(PointIndex(idx)).unwrap();
        assert_eq!(corner.intersections(), 1);
        let naive = corner.corner().intrinsic_turn();
        assert_ne!(corrected_vote(naive, corner.intersections(), true), naive);
    }
    assert_eq!(subpath.intersection_count(PointIndex(0)), 0);
    assert_eq!(subpath.intersection_count(PointIndex(2)), 0);
    assert_eq!(subpath.intersections_before(PointIndex(2)), 1);
    assert_eq!(subpath.intersections_before(PointIndex(4)), 2);

    // Two votes each way, ties go counter-clockwise.
    assert_eq!(subpath.votes().clockwise, 2);
    assert_eq!(subpath.votes().counter_clockwise, 2);
    assert_eq!(subpath.direction(), RotationDirection::CounterClockwise);

    // Once oriented, every corner has its lobe on its left-hand side.
    assert_eq!(subpath.sampling(PointIndex(0)), Some(Sampling::Forward));
    assert_eq!(subpath.sampling(PointIndex(1)), Some(Sampling::Inverted));
    assert_eq!(subpath.sampling(PointIndex(2)), Some(Sampling::Inverted));
    assert_eq!(subpath.sampling(PointIndex(3)), Some(Sampling::Forward));
    for corner in subpath.oriented_corners() {
        assert_eq!(corner.turn(), RotationDirection::CounterClockwise);
    }

    // Deterministic.
    let again = analyzer.analyze_subpaths(&path, &options).unwrap();
    assert_eq!(again, &subpaths[..]);

    // Without parity correction the votes are the intrinsic turns.
    let uncorrected = analyzer
        .analyze_subpaths(&path, &options.with_parity_correction(false))
        .unwrap();
    assert_eq!(uncorrected[0].votes(), subpath.votes());
    assert_eq!(uncorrected[0].corners(), subpath.corners());
}

#[test]
fn two_triangles() {
    let mut builder = Path::builder();
    builder.begin(point(0.0, 0.0));
    builder.line_to(point(10.0, 0.0));
    builder.line_to(point(0.0, 10.0));
    builder.close();
    builder.begin(point(20.0, 0.0));
    builder.line_to(point(20.0, 10.0));
    builder.line_to(point(30.0, 0.0));
    builder.close();
    let path = builder.build();

    let (direction, visits) = analyze(&path);
    assert_eq!(direction, RotationDirection::CounterClockwise);
    assert_eq!(visits.len(), 6);

    let max_first = visits
        .iter()
        .filter(|v| v.subpath == 0)
        .map(|v| v.index)
        .max()
        .unwrap();
    for visit in visits.iter().filter(|v| v.subpath == 1) {
        assert!(visit.index > max_first);
        assert_eq!(visit.direction, RotationDirection::Clockwise);
    }
    for visit in visits.iter().filter(|v| v.subpath == 0) {
        assert_eq!(visit.direction, RotationDirection::CounterClockwise);
    }

    let indices: Vec<(usize, u32)> = visits.iter().map(|v| (v.subpath, v.index.0)).collect();
    assert_eq!(
        indices,
        vec![(0, 0), (0, 1), (0, 2), (1, 3), (1, 4), (1, 5)]
    );

    // Neighbours wrap around within each sub-path.
    assert_eq!(visits[3].index, PointIndex(3));
    assert!(visits[3].corner.is_inverted());
    assert_eq!(visits[3].prev, PointIndex(4));
    assert_eq!(visits[3].next, PointIndex(5));

    let mut analyzer = CornerAnalyzer::new();
    let subpaths = analyzer
        .analyze_subpaths(&path, &AnalyzerOptions::default())
        .unwrap();
    assert_eq!(subpaths.len(), 2);
    assert_eq!(subpaths[0].index(), 0);
    assert_eq!(subpaths[1].index(), 1);
    assert_eq!(subpaths[1].direction(), RotationDirection::Clockwise);
}

#[test]
fn empty_sub_paths_are_skipped() {
    let mut builder = Path::builder();
    builder.begin(point(50.0, 50.0));
    builder.close();
    builder.begin(point(0.0, 0.0));
    builder.line_to(point(10.0, 0.0));
    builder.end(false);
    builder.begin(point(0.0, 0.0));
    builder.line_to(point(10.0, 0.0));
    builder.line_to(point(0.0, 10.0));
    builder.close();
    let path = builder.build();

    let (direction, visits) = analyze(&path);
    assert_eq!(direction, RotationDirection::CounterClockwise);
    assert_eq!(visits.len(), 3);
    for visit in &visits {
        assert_eq!(visit.subpath, 2);
    }

    let mut analyzer = CornerAnalyzer::new();
    let subpaths = analyzer
        .analyze_subpaths(&path, &AnalyzerOptions::default())
        .unwrap();
    assert_eq!(subpaths.len(), 3);
    assert!(subpaths[0].is_empty());
    assert_eq!(subpaths[0].direction(), RotationDirection::None);
    assert!(subpaths[1].is_empty());
    assert!(!subpaths[1].is_closed());
}

#[test]
fn open_sub_path() {
    let points = [
        point(0.0, 0.0),
        point(10.0, 0.0),
        point(10.0, 10.0),
        point(0.0, 10.0),
        point(0.0, 5.0),
    ];
    let polygon = Polygon {
        points: &points,
        closed: false,
    };

    let (direction, visits) = analyze(polygon);
    assert_eq!(direction, RotationDirection::CounterClockwise);

    let indices: Vec<u32> = visits.iter().map(|v| v.index.0).collect();
    assert_eq!(indices, vec![1, 2, 3]);
    assert_eq!(visits[0].prev, PointIndex(3));
    assert!(!visits[0].approximation.is_closed());
}

#[test]
fn collinear_corner() {
    let points = [
        point(0.0, 0.0),
        point(5.0, 0.0),
        point(10.0, 0.0),
        point(10.0, 10.0),
        point(0.0, 10.0),
    ];
    let (direction, visits) = analyze(&polygon_path(&points));

    assert_eq!(direction, RotationDirection::CounterClockwise);
    assert_eq!(visits.len(), 5);
    assert_eq!(visits[1].corner.turn(), RotationDirection::None);
    assert!(!visits[1].corner.is_inverted());
}

#[test]
fn all_collinear_corners() {
    let points = [point(0.0, 0.0), point(5.0, 0.0), point(10.0, 0.0)];
    let path = polygon_path(&points);
    let (direction, visits) = analyze(&path);

    // Three corners are formed but none of them votes.
    assert_eq!(direction, RotationDirection::None);
    assert_eq!(visits.len(), 3);
    for visit in &visits {
        assert_eq!(visit.direction, RotationDirection::None);
        assert_eq!(visit.corner.turn(), RotationDirection::None);
        assert!(!visit.corner.is_inverted());
    }

    let mut analyzer = CornerAnalyzer::new();
    let subpaths = analyzer
        .analyze_subpaths(&path, &AnalyzerOptions::default())
        .unwrap();
    assert_eq!(subpaths[0].votes().total(), 0);
    // The path folds back onto itself at both ends.
    assert_eq!(subpaths[0].sampling(PointIndex(0)), Some(Sampling::Degenerate));
    assert_eq!(subpaths[0].sampling(PointIndex(2)), Some(Sampling::Degenerate));
    // Nothing is inside a flat polygon.
    assert_eq!(subpaths[0].sampling(PointIndex(1)), Some(Sampling::Ambiguous));
}

#[test]
fn curves() {
    // A circle made of four cubic arcs.
    let k = 0.5522847498 * 10.0;
    let mut builder = Path::builder();
    builder.begin(point(10.0, 0.0));
    builder.cubic_bezier_to(point(10.0, k), point(k, 10.0), point(0.0, 10.0));
    builder.cubic_bezier_to(point(-k, 10.0), point(-10.0, k), point(-10.0, 0.0));
    builder.cubic_bezier_to(point(-10.0, -k), point(-k, -10.0), point(0.0, -10.0));
    builder.cubic_bezier_to(point(k, -10.0), point(10.0, -k), point(10.0, 0.0));
    builder.close();
    let circle = builder.build();

    let (direction, visits) = analyze(&circle);
    assert_eq!(direction, RotationDirection::CounterClockwise);

    // The last arc ends on the start point: its end point is not a corner.
    let indices: Vec<u32> = visits.iter().map(|v| v.index.0).collect();
    assert_eq!(indices, vec![0, 3, 6, 9]);
    for visit in &visits {
        assert!(!visit.corner.is_inverted());
        // start + 4 arcs
        assert_eq!(
            visit.approximation.len(),
            1 + 4 * AnalyzerOptions::DEFAULT_CURVE_POINTS as usize
        );
    }

    let (direction, visits) = analyze(&circle.reversed());
    assert_eq!(direction, RotationDirection::Clockwise);
    assert_eq!(visits.len(), 4);
    for visit in &visits {
        assert!(visit.corner.is_inverted());
    }
}

#[test]
fn curve_crossing_an_edge() {
    // A square whose top edge is a curve dipping below the bottom edge.
    let mut builder = Path::builder();
    builder.begin(point(0.0, 0.0));
    builder.line_to(point(10.0, 0.0));
    builder.line_to(point(10.0, 10.0));
    builder.quadratic_bezier_to(point(5.0, -30.0), point(0.0, 10.0));
    builder.close();
    let path = builder.build();

    let mut analyzer = CornerAnalyzer::new();
    let subpaths = analyzer
        .analyze_subpaths(&path, &AnalyzerOptions::default())
        .unwrap();

    // The chord of the curve does not cross anything, its polyline crosses the
    // bottom edge twice.
    assert_eq!(subpaths[0].intersection_count(PointIndex(1)), 2);
    assert_eq!(subpaths[0].intersection_count(PointIndex(4)), 0);
}

#[test]
fn transformed_path() {
    let path = polygon_path(&square());
    let flipped = path.clone().transformed(&Transform::scale(1.0, -1.0));

    let (direction, _) = analyze(&path);
    assert_eq!(direction, RotationDirection::CounterClockwise);

    let (direction, _) = analyze(&flipped);
    assert_eq!(direction, RotationDirection::Clockwise);

    let commands: Vec<PathCommand> = path
        .iter()
        .map(|cmd| cmd.transformed(&Transform::translation(100.0, -50.0)))
        .collect();
    let (direction, visits) = analyze(commands);
    assert_eq!(direction, RotationDirection::CounterClockwise);
    assert_eq!(visits[0].corner.at(), point(100.0, -50.0));
}

#[test]
fn closure_visitor() {
    let path = polygon_path(&square());
    let mut analyzer = CornerAnalyzer::new();

    let mut indices = Vec::new();
    analyzer
        .analyze_with_visitor(
            &path,
            &AnalyzerOptions::default(),
            &mut |visit: &CornerVisit| indices.push(visit.index),
        )
        .unwrap();

    assert_eq!(
        indices,
        vec![PointIndex(0), PointIndex(1), PointIndex(2), PointIndex(3)]
    );
}

#[test]
#[should_panic(expected = "visitor failure")]
fn visitor_panics_propagate() {
    let path = polygon_path(&square());
    let mut analyzer = CornerAnalyzer::new();
    let _ = analyzer.analyze_with_visitor(
        &path,
        &AnalyzerOptions::default(),
        &mut |visit: &CornerVisit| {
            if visit.index == PointIndex(2) {
                panic!("visitor failure");
            }
        },
    );
}

#[test]
fn nan_position() {
    let commands = vec![
        PathCommand::MoveTo {
            to: point(0.0, 0.0),
        },
        PathCommand::LineTo {
            to: point(10.0, 0.0),
        },
        PathCommand::LineTo {
            to: point(10.0, 10.0),
        },
        PathCommand::LineTo {
            to: point(std::f64::NAN, 10.0),
        },
        PathCommand::Close,
    ];

    let mut visits = 0;
    let mut analyzer = CornerAnalyzer::new();
    let result = analyzer.analyze_with_visitor(
        commands,
        &AnalyzerOptions::default(),
        &mut |_: &CornerVisit| visits += 1,
    );

    assert_eq!(
        result,
        Err(AnalysisError::UnsupportedParameter(
            UnsupportedParameter::PositionIsNaN(PointIndex(3))
        ))
    );
    assert_eq!(visits, 0);
    assert!(analyzer.subpaths().is_empty());
}

#[test]
fn invalid_options() {
    let path = polygon_path(&square());
    let mut analyzer = CornerAnalyzer::new();

    let mut visits = 0;
    let result = analyzer.analyze_with_visitor(
        &path,
        &AnalyzerOptions::default().with_curve_points(0),
        &mut |_: &CornerVisit| visits += 1,
    );

    assert_eq!(
        result,
        Err(AnalysisError::UnsupportedParameter(
            UnsupportedParameter::CurvePointsIsZero
        ))
    );
    assert_eq!(visits, 0);
}

#[test]
fn analyzer_reuse() {
    let mut analyzer = CornerAnalyzer::new();
    let options = AnalyzerOptions::default();

    let mut builder = Path::builder();
    builder.begin(point(0.0, 0.0));
    builder.line_to(point(10.0, 0.0));
    builder.line_to(point(0.0, 10.0));
    builder.close();
    builder.begin(point(20.0, 0.0));
    builder.line_to(point(30.0, 0.0));
    builder.line_to(point(20.0, 10.0));
    builder.close();
    let two = builder.build();

    assert_eq!(analyzer.analyze_subpaths(&two, &options).unwrap().len(), 2);
    assert_eq!(
        analyzer.analyze_subpaths(&polygon_path(&square()), &options).unwrap().len(),
        1
    );
    assert_eq!(analyzer.subpaths()[0].corners().len(), 4);
}

#[test]
fn non_zero_fill_rule() {
    // The same square traversed twice: under the even-odd rule nothing is inside.
    let mut points = square();
    points.extend(square());
    let path = polygon_path(&points);

    let mut analyzer = CornerAnalyzer::new();
    let options = AnalyzerOptions::default().with_fill_rule(crate::FillRule::NonZero);
    let subpaths = analyzer.analyze_subpaths(&path, &options).unwrap();
    assert_eq!(subpaths[0].direction(), RotationDirection::CounterClockwise);
    assert_eq!(subpaths[0].sampling(PointIndex(1)), Some(Sampling::Forward));
}
