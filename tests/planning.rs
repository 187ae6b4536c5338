#![allow(clippy::unwrap_used)]

use beznav::geometry::{ControlPoint, CubicBezier, Polygon};
use beznav::math::Point2;
use beznav::operations::collision::ScanCollisions;
use beznav::operations::planning::{PathOptimizer, PlannerConfig, SearchStrategy, Termination};
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn blocking_square() -> Polygon {
    Polygon::new(vec![
        Point2::new(0.0, 0.0),
        Point2::new(0.0, 4.0),
        Point2::new(4.0, 4.0),
        Point2::new(4.0, 0.0),
    ])
}

fn avoidance_config() -> PlannerConfig {
    PlannerConfig {
        resolution: 0.01,
        half_width: 0.5,
        search_radius: 3.0,
        radius_decay: 0.95,
        candidates: 16,
        max_iterations: 400,
        stagnation_limit: 400,
        strategy: SearchStrategy::Circle,
    }
}

/// A hand-built curve that arcs well above the blocking square.
fn detour() -> CubicBezier {
    CubicBezier::new(
        Point2::new(-5.0, 2.0),
        Point2::new(-1.5, 9.0),
        Point2::new(5.5, 9.0),
        Point2::new(9.0, 2.0),
    )
}

#[test]
fn straight_line_without_obstacles_is_already_optimal() {
    init_tracing();
    let optimizer = PathOptimizer::new(PlannerConfig::default(), &[]).unwrap();
    let start = Point2::new(-3.0, 1.0);
    let end = Point2::new(12.0, -4.0);
    let result = optimizer.execute(start, end);

    assert_eq!(result.termination, Termination::Converged);
    assert_eq!(result.collisions, 0);
    assert_eq!(result.moves, 0);
    assert_eq!(result.spline, CubicBezier::straight(start, end));
}

#[test]
fn detours_around_a_blocking_square() {
    init_tracing();
    let obstacles = [blocking_square()];
    let optimizer = PathOptimizer::new(avoidance_config(), &obstacles).unwrap();
    let start = Point2::new(-5.0, 2.0);
    let end = Point2::new(9.0, 2.0);
    let result = optimizer.execute(start, end);

    assert_eq!(result.initial_collisions, 1);
    assert_eq!(result.spline.start(), start);
    assert_eq!(result.spline.end(), end);

    let config = optimizer.config();
    let report = ScanCollisions::new(
        &result.spline,
        &obstacles,
        config.resolution,
        config.half_width,
    )
    .execute();
    assert_eq!(report.len(), result.collisions);
    match result.termination {
        Termination::Converged => assert!(report.is_empty()),
        Termination::Exhausted | Termination::Stalled(_) => {
            assert!(
                result.collisions < result.initial_collisions,
                "result={result:?}"
            );
        }
    }
}

#[test]
fn converged_curve_is_left_alone() {
    init_tracing();
    let obstacles = [blocking_square()];
    let optimizer = PathOptimizer::new(avoidance_config(), &obstacles).unwrap();

    let first = optimizer.execute_from(detour());
    assert_eq!(first.termination, Termination::Converged);
    assert_eq!(first.moves, 0);
    assert_eq!(first.spline, detour());

    let second = optimizer.execute_from(first.spline);
    assert_eq!(second.termination, Termination::Converged);
    assert_eq!(second.iterations, 0);
    assert_eq!(second.moves, 0);
    assert_eq!(second.spline, first.spline);
}

#[test]
fn search_starts_from_the_given_curve() {
    init_tracing();
    let obstacles = [blocking_square()];
    let optimizer = PathOptimizer::new(avoidance_config(), &obstacles).unwrap();
    let straight = CubicBezier::straight(Point2::new(-5.0, 2.0), Point2::new(9.0, 2.0));
    let search = optimizer.search(straight);

    assert_eq!(*search.spline(), straight);
    assert_eq!(search.report().len(), 1);
    assert_eq!(search.iterations(), 0);
    assert!((search.radius() - 3.0).abs() < f64::EPSILON);
}

#[test]
fn grid_search_only_places_controls_on_lattice_nodes() {
    init_tracing();
    let origin = Point2::new(-4.0, -4.0);
    let cell_size = 1.5;
    let config = PlannerConfig {
        strategy: SearchStrategy::Grid {
            origin,
            cell_size,
            columns: 10,
            rows: 10,
        },
        max_iterations: 40,
        ..avoidance_config()
    };
    let obstacles = [blocking_square()];
    let optimizer = PathOptimizer::new(config, &obstacles).unwrap();
    let start = Point2::new(-5.0, 2.0);
    let end = Point2::new(9.0, 2.0);
    let straight = CubicBezier::straight(start, end);
    let result = optimizer.execute(start, end);

    assert!(result.collisions <= result.initial_collisions);
    let on_lattice = |p: Point2| {
        let (i, j) = ((p.x - origin.x) / cell_size, (p.y - origin.y) / cell_size);
        (i - i.round()).abs() < 1e-9 && (j - j.round()).abs() < 1e-9
    };
    for which in [ControlPoint::P1, ControlPoint::P2] {
        let p = result.spline.control(which);
        assert!(
            p == straight.control(which) || on_lattice(p),
            "{which:?} at {p:?}"
        );
    }
}

#[test]
fn stepping_matches_a_full_run() {
    init_tracing();
    let obstacles = [blocking_square()];
    let config = PlannerConfig {
        max_iterations: 30,
        ..avoidance_config()
    };
    let optimizer = PathOptimizer::new(config, &obstacles).unwrap();
    let straight = CubicBezier::straight(Point2::new(-5.0, 2.0), Point2::new(9.0, 2.0));

    let mut search = optimizer.search(straight);
    let termination = loop {
        if let Some(termination) = search.step() {
            break termination;
        }
    };
    // Stepping past the end changes nothing.
    assert_eq!(search.step(), Some(termination));
    let stepped = *search.spline();

    let result = optimizer.execute_from(straight);
    assert_eq!(result.termination, termination);
    assert_eq!(result.spline, stepped);
}
