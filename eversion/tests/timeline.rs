//! Integration tests for evaluating the eversion timeline onto grids
use eversion::{
    eval::{
        GeometryConfig, Grid, PhaseSchedule, SampleRange, SurfacePoint,
        ThreadPool, print_scene,
    },
    jet::{ThreeJet, TwoJet},
    surface::Phase,
};

fn norm(v: [f32; 3]) -> f32 {
    (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt()
}

fn dot(a: [f32; 3], b: [f32; 3]) -> f32 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

fn is_finite(p: &SurfacePoint) -> bool {
    p.vertex.iter().chain(&p.normal).all(|x| x.is_finite())
}

#[test]
fn concrete_scenario() {
    let cfg = GeometryConfig {
        time: 0.05,
        num_strips: 8,
        u: SampleRange::new(0.0, 1.0, 12),
        v: SampleRange::new(0.0, 1.0, 12),
        bend_time: None,
        schedule: PhaseSchedule::new(0.0, 0.10, 0.23, 0.60, 0.93).unwrap(),
        threads: None,
    };
    let mut grid = Grid::new(13, 13);
    let (phase, t) = cfg.run(&mut grid).unwrap().unwrap();
    assert_eq!(phase, Phase::Corrugate);
    assert!((t - 0.5).abs() < 1e-12, "bad local time {t}");
    assert_eq!(grid.len(), 169);
    for (i, p) in grid.iter().enumerate() {
        assert!(is_finite(p), "non-finite point {i}: {p:?}");
        let n = norm(p.normal);
        assert!((n - 1.0).abs() < 1e-4, "normal {i} has length {n}");
    }
}

/// Evaluates one phase at a few local times over both hemispheres, checking
/// that every normal is either a unit vector or exactly zero
fn unit_normals(phase: Phase) {
    let u = SampleRange::new(0.0, 2.0, 24);
    let v = SampleRange::new(0.0, 1.0, 12);
    let mut grid = Grid::for_ranges(&u, &v);
    for t in [0.0, 0.3, 0.7, 1.0] {
        print_scene(phase.function(), &u, &v, t, &mut grid, 8, None).unwrap();
        for (i, p) in grid.iter().enumerate() {
            assert!(is_finite(p), "{phase} (t = {t}): bad point {i}: {p:?}");
            let n = norm(p.normal);
            assert!(
                n == 0.0 || (n - 1.0).abs() < 1e-4,
                "{phase} (t = {t}): normal {i} has length {n}"
            );
        }
    }
}

/// Checks that `num_strips` copies of a strip tile a full turn: shifting `v`
/// by whole strips is the same as rotating about `z`
fn rotational_tiling(phase: Phase) {
    for n in [1, 3, 8] {
        for (u, v) in [(0.3, 0.2), (0.8, 0.65), (1.4, 0.9)] {
            let t = 0.4;
            let base = phase.eval(ThreeJet::u(u), ThreeJet::v(v), t, n);
            for k in 0..n {
                let shifted = phase.eval(
                    ThreeJet::u(u),
                    ThreeJet::v(v + k as f64),
                    t,
                    n,
                );
                let turn = TwoJet::constant(k as f64 / n as f64);
                let rotated = base.rotate_z(turn);
                for (a, b) in shifted.value().iter().zip(rotated.value()) {
                    assert!(
                        (a - b).abs() < 1e-9,
                        "{phase}: strip {k} of {n} at ({u}, {v}): {a} != {b}"
                    );
                }
                for (a, b) in shifted.du().iter().zip(rotated.du()) {
                    assert!((a - b).abs() < 1e-8, "{phase}: ∂u mismatch");
                }
                for (a, b) in shifted.dv().iter().zip(rotated.dv()) {
                    assert!((a - b).abs() < 1e-8, "{phase}: ∂v mismatch");
                }
            }
        }
    }
}

/// Compares the analytic `∂p/∂u` and `∂p/∂v` of the corrugated surface
/// against central differences of its position
fn derivatives_match_finite_differences(phase: Phase) {
    const H: f64 = 1e-6;
    let value = |u: f64, v: f64, t: f64| {
        phase.eval(ThreeJet::u(u), ThreeJet::v(v), t, 8).value()
    };
    for t in [0.0, 0.35, 0.8] {
        for (u, v) in [(0.3, 0.2), (0.8, 0.65), (1.4, 0.9), (1.75, 0.35)] {
            let p = phase.eval(ThreeJet::u(u), ThreeJet::v(v), t, 8);
            let (u0, u1) = (value(u - H, v, t), value(u + H, v, t));
            let (v0, v1) = (value(u, v - H, t), value(u, v + H, t));
            for i in 0..3 {
                for (name, analytic, numeric) in [
                    ("∂u", p.du()[i], (u1[i] - u0[i]) / (2.0 * H)),
                    ("∂v", p.dv()[i], (v1[i] - v0[i]) / (2.0 * H)),
                ] {
                    let err = (analytic - numeric).abs();
                    assert!(
                        err < 1e-6 * analytic.abs().max(1.0),
                        "{phase} (t = {t}) at ({u}, {v}): {name}[{i}] is \
                         {analytic}, expected {numeric}"
                    );
                }
            }
        }
    }
}

macro_rules! phase_tests {
    ($i:ident, $phase:expr) => {
        mod $i {
            #[test]
            fn unit_normals() {
                super::unit_normals($phase);
            }

            #[test]
            fn rotational_tiling() {
                super::rotational_tiling($phase);
            }

            #[test]
            fn derivatives_match_finite_differences() {
                super::derivatives_match_finite_differences($phase);
            }
        }
    };
}

phase_tests!(bend_in, eversion::surface::Phase::BendIn);
phase_tests!(corrugate, eversion::surface::Phase::Corrugate);
phase_tests!(push_through, eversion::surface::Phase::PushThrough);
phase_tests!(twist, eversion::surface::Phase::Twist);
phase_tests!(un_push, eversion::surface::Phase::UnPush);
phase_tests!(un_corrugate, eversion::surface::Phase::UnCorrugate);

fn run_at(time: f64) -> Grid {
    let cfg = GeometryConfig {
        time,
        threads: None,
        ..Default::default()
    };
    let mut grid = cfg.grid();
    cfg.run(&mut grid).unwrap().unwrap();
    grid
}

#[test]
fn phase_boundaries_are_seamless() {
    let eps = 1e-7;
    for threshold in &PhaseSchedule::default().thresholds()[1..] {
        let before = run_at(threshold - eps);
        let after = run_at(threshold + eps);
        for (a, b) in before.iter().zip(after.iter()) {
            for i in 0..3 {
                let d = (a.vertex[i] - b.vertex[i]).abs();
                assert!(d < 1e-3, "seam of size {d} at time {threshold}");
            }
        }
    }
}

#[test]
fn eversion_turns_sphere_inside_out() {
    let start = run_at(0.0);
    let end = run_at(1.0);
    for (j, (a, b)) in start.iter().zip(end.iter()).enumerate() {
        // Both ends are the unit sphere, mirrored through the origin
        assert!((norm(a.vertex) - 1.0).abs() < 1e-5);
        for i in 0..3 {
            assert!((a.vertex[i] + b.vertex[i]).abs() < 1e-5, "point {j}");
        }
        // ...with the normal facing out at the start and in at the end
        assert!(dot(a.normal, a.vertex) > 0.9, "point {j}: {a:?}");
        assert!(dot(b.normal, b.vertex) < -0.9, "point {j}: {b:?}");
    }
}

#[test]
fn bend_in_starts_as_cylinder() {
    let cfg = GeometryConfig {
        bend_time: Some(0.0),
        threads: None,
        ..Default::default()
    };
    let mut grid = cfg.grid();
    let (phase, t) = cfg.run(&mut grid).unwrap().unwrap();
    assert_eq!((phase, t), (Phase::BendIn, 0.0));
    for p in &grid {
        let r = p.vertex[0].hypot(p.vertex[1]);
        assert!((r - 1.0).abs() < 1e-5, "radius {r}");
    }
}

#[test]
fn parallel_matches_sequential() {
    let pool = ThreadPool::Custom(
        rayon::ThreadPoolBuilder::new()
            .num_threads(4)
            .build()
            .unwrap(),
    );
    for time in [0.05, 0.4, 0.95] {
        let mut grids = vec![];
        for threads in [None, Some(&ThreadPool::Global), Some(&pool)] {
            let cfg = GeometryConfig {
                time,
                u: SampleRange::new(0.0, 2.0, 37),
                v: SampleRange::new(0.0, 1.0, 11),
                threads,
                ..Default::default()
            };
            let mut grid = cfg.grid();
            cfg.run(&mut grid).unwrap();
            grids.push(grid);
        }
        for g in &grids[1..] {
            assert!(g.iter().eq(grids[0].iter()), "mismatch at time {time}");
        }
    }
}
