extern crate cornerwise;
#[macro_use]
extern crate bencher;

use cornerwise::math::{point, vector, Point};
use cornerwise::path::Path;
use cornerwise::{AnalyzerOptions, CornerAnalyzer, CornerVisit};

use bencher::Bencher;

#[cfg(feature = "profiling")]
const N: usize = 100;
#[cfg(not(feature = "profiling"))]
const N: usize = 1;

fn star(center: Point, num_branches: u32) -> Path {
    let mut builder = Path::builder();
    let step = std::f64::consts::PI / num_branches as f64;
    for i in 0..(num_branches * 2) {
        let radius = if i % 2 == 0 { 10.0 } else { 4.0 };
        let angle = step * i as f64;
        let p = center + vector(angle.cos(), angle.sin()) * radius;
        if i == 0 {
            builder.begin(p);
        } else {
            builder.line_to(p);
        }
    }
    builder.close();

    builder.build()
}

fn many_polygons() -> Path {
    let mut builder = Path::builder();
    for i in 0..100 {
        let x = (i % 10) as f64 * 30.0;
        let y = (i / 10) as f64 * 30.0;
        builder.begin(point(x, y));
        builder.line_to(point(x + 20.0, y));
        builder.quadratic_bezier_to(point(x + 25.0, y + 10.0), point(x + 20.0, y + 20.0));
        builder.cubic_bezier_to(
            point(x + 15.0, y + 25.0),
            point(x + 5.0, y + 15.0),
            point(x, y + 20.0),
        );
        builder.close();
    }

    builder.build()
}

// A self-intersecting polygram: every edge crosses several others.
fn polygram(num_points: u32) -> Path {
    let mut builder = Path::builder();
    let step = std::f64::consts::PI * 2.0 * 3.0 / num_points as f64;
    for i in 0..num_points {
        let angle = step * i as f64;
        let p = point(angle.cos() * 50.0, angle.sin() * 50.0);
        if i == 0 {
            builder.begin(p);
        } else {
            builder.line_to(p);
        }
    }
    builder.close();

    builder.build()
}

fn analyze_star(bench: &mut Bencher) {
    let path = star(point(0.0, 0.0), 50);
    let options = AnalyzerOptions::default();
    let mut analyzer = CornerAnalyzer::new();

    bench.iter(|| {
        for _ in 0..N {
            let _ = analyzer.analyze(&path, &options);
        }
    })
}

fn analyze_many_polygons(bench: &mut Bencher) {
    let path = many_polygons();
    let options = AnalyzerOptions::default();
    let mut analyzer = CornerAnalyzer::new();

    bench.iter(|| {
        for _ in 0..N {
            let _ = analyzer.analyze(&path, &options);
        }
    })
}

fn analyze_polygram(bench: &mut Bencher) {
    let path = polygram(101);
    let options = AnalyzerOptions::default();
    let mut analyzer = CornerAnalyzer::new();

    bench.iter(|| {
        for _ in 0..N {
            let _ = analyzer.analyze(&path, &options);
        }
    })
}

fn visit_many_polygons(bench: &mut Bencher) {
    let path = many_polygons();
    let options = AnalyzerOptions::default();
    let mut analyzer = CornerAnalyzer::new();

    bench.iter(|| {
        let mut count = 0;
        for _ in 0..N {
            let _ = analyzer.analyze_with_visitor(&path, &options, &mut |_: &CornerVisit| {
                count += 1;
            });
        }
        count
    })
}

fn analyze_many_polygons_coarse_curves(bench: &mut Bencher) {
    let path = many_polygons();
    let options = AnalyzerOptions::default().with_curve_points(2);
    let mut analyzer = CornerAnalyzer::new();

    bench.iter(|| {
        for _ in 0..N {
            let _ = analyzer.analyze(&path, &options);
        }
    })
}

benchmark_group!(
    analyze,
    analyze_star,
    analyze_many_polygons,
    analyze_many_polygons_coarse_curves,
    analyze_polygram,
);

benchmark_group!(visit, visit_many_polygons);

benchmark_main!(analyze, visit);
