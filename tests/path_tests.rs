// Host-side tests for the path model.

mod common;

use common::assert_close;
use common::core::constants::TUBE_HEIGHT;
use common::core::error::SceneError;
use common::core::path::{Path, PathName};
use glam::Vec3;

fn all_paths() -> Vec<Path> {
    PathName::ALL
        .iter()
        .map(|n| Path::named(*n).expect("built-in path"))
        .collect()
}

#[test]
fn point_at_is_finite_over_unit_interval() {
    for path in all_paths() {
        for i in 0..=1000 {
            let t = i as f32 / 1000.0;
            let p = path.point_at(t);
            assert!(p.is_finite(), "non-finite point at t={t}: {p:?}");
        }
    }
}

#[test]
fn endpoints_match_first_and_last_control_points() {
    for path in all_paths() {
        let pts = path.control_points();
        let first = pts[0];
        let last = pts[pts.len() - 1];
        assert!(path.point_at(0.0).distance(first) < 1e-4);
        assert!(path.point_at(1.0).distance(last) < 1e-4);
    }
}

#[test]
fn curve_passes_near_interior_control_points() {
    for path in all_paths() {
        let samples = path.spaced_points(2000);
        for cp in &path.control_points()[1..path.control_points().len() - 1] {
            let nearest = samples
                .iter()
                .map(|s| s.distance(*cp))
                .fold(f32::MAX, f32::min);
            assert!(nearest < 0.05, "control point {cp:?} missed by {nearest}");
        }
    }
}

#[test]
fn built_in_paths_stay_at_tube_height() {
    for path in all_paths() {
        let n = path.control_points().len();
        assert!((3..=4).contains(&n), "expected 3-4 control points, got {n}");
        for i in 0..=100 {
            assert_close(path.point_at(i as f32 / 100.0).y, TUBE_HEIGHT, 1e-4);
        }
    }
}

#[test]
fn point_at_is_continuous() {
    for path in all_paths() {
        let step = 1.0 / 4000.0;
        let max_jump = path.length() * step * 4.0;
        let mut prev = path.point_at(0.0);
        for i in 1..=4000 {
            let p = path.point_at(i as f32 * step);
            assert!(
                p.distance(prev) <= max_jump,
                "jump of {} at sample {i}",
                p.distance(prev)
            );
            prev = p;
        }
    }
}

#[test]
fn point_at_is_arc_length_parameterized() {
    let path = Path::named(PathName::FactoryToSilo).unwrap();
    let samples = path.spaced_points(20);
    let expected = path.length() / 20.0;
    for w in samples.windows(2) {
        // Chord is never longer than the arc it spans, and close to it here.
        let chord = w[0].distance(w[1]);
        assert!(chord <= expected * 1.01, "chord {chord} > arc {expected}");
        assert!(chord >= expected * 0.95, "chord {chord} much shorter than arc {expected}");
    }
}

#[test]
fn out_of_range_parameters_are_clamped() {
    let path = Path::named(PathName::SiloToWarehouse).unwrap();
    assert_eq!(path.point_at(-0.5), path.point_at(0.0));
    assert_eq!(path.point_at(1.5), path.point_at(1.0));
    assert_eq!(path.point_at(f32::NAN), path.point_at(0.0));
}

#[test]
fn tangent_is_unit_length() {
    for path in all_paths() {
        for i in 0..=50 {
            let t = path.tangent_at(i as f32 / 50.0);
            assert_close(t.length(), 1.0, 1e-4);
        }
    }
}

#[test]
fn two_point_path_is_a_straight_line() {
    let a = Vec3::new(0.0, 0.1, 0.0);
    let b = Vec3::new(4.0, 0.1, 0.0);
    let path = Path::new(vec![a, b]).unwrap();
    assert_close(path.length(), 4.0, 1e-3);
    let mid = path.point_at(0.5);
    assert!(mid.distance(Vec3::new(2.0, 0.1, 0.0)) < 1e-3, "{mid:?}");
}

#[test]
fn fewer_than_two_points_is_rejected() {
    assert_eq!(
        Path::new(vec![Vec3::ZERO]).unwrap_err(),
        SceneError::TooFewControlPoints(1)
    );
    assert_eq!(
        Path::new(Vec::new()).unwrap_err(),
        SceneError::TooFewControlPoints(0)
    );
}

#[test]
fn coincident_points_do_not_produce_nan() {
    let p = Vec3::new(1.0, 0.1, 1.0);
    let path = Path::new(vec![p, p, p]).unwrap();
    for i in 0..=10 {
        let q = path.point_at(i as f32 / 10.0);
        assert!(q.is_finite());
        assert!(q.distance(p) < 1e-5);
    }
}
