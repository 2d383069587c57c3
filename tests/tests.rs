use rk4sim::simulation::forces::{AccelSet, Acceleration, CentralGravity, NewtonianGravity};
use rk4sim::simulation::integrator::{rk4_integrator, Rk4Scratch};
use rk4sim::simulation::params::Parameters;
use rk4sim::simulation::scenario::{
    single_orbit_preset, three_body_preset, Scenario, SOLAR_MASS,
};
use rk4sim::simulation::states::{Body, NVec2, System};
use rk4sim::simulation::trail::TrailSet;
use rk4sim::ForceConfig;

use approx::assert_relative_eq;

/// Build a simple 2-body System separated along the x-axis, at rest
pub fn two_body_system(dist: f64, m1: f64, m2: f64) -> System {
    let b1 = Body {
        x: [-dist / 2.0, 0.0].into(),
        v: [0.0, 0.0].into(),
        m: m1,
    };
    let b2 = Body {
        x: [dist / 2.0, 0.0].into(),
        v: [0.0, 0.0].into(),
        m: m2,
    };
    System {
        bodies: vec![b1, b2],
        t: 0.0,
    }
}

/// Two equal masses on a circular orbit about their barycenter at the origin
pub fn circular_pair(dist: f64, m: f64, g: f64) -> System {
    // Each body circles the barycenter at radius dist/2 with v = sqrt(g m / (2 dist))
    let speed = (g * m / (2.0 * dist)).sqrt();
    let b1 = Body {
        x: [-dist / 2.0, 0.0].into(),
        v: [0.0, -speed].into(),
        m,
    };
    let b2 = Body {
        x: [dist / 2.0, 0.0].into(),
        v: [0.0, speed].into(),
        m,
    };
    System {
        bodies: vec![b1, b2],
        t: 0.0,
    }
}

/// Default physics parameters for tests (unit-scale G, not SI)
pub fn test_params(h0: f64) -> Parameters {
    Parameters {
        t_end: 1.0,
        h0,
        g: 1.0,
    }
}

/// Build a gravity term + AccelSet
pub fn gravity_set(p: &Parameters) -> AccelSet {
    AccelSet::new().with(NewtonianGravity { g: p.g })
}

pub fn total_energy(sys: &System, forces: &AccelSet) -> f64 {
    sys.kinetic_energy() + forces.potential_energy(sys)
}

/// Uniform test field, for checking the stepper against the closed form
struct ConstantField {
    a: NVec2,
}

impl Acceleration for ConstantField {
    fn acceleration(&self, _t: f64, sys: &System, out: &mut [NVec2]) {
        for (i, _) in sys.bodies.iter().enumerate() {
            out[i] += self.a;
        }
    }
}

// ==================================================================================
// Gravity tests
// ==================================================================================

#[test]
fn gravity_newton_third_law() {
    let sys = two_body_system(1.0, 2.0, 3.0);
    let p = test_params(0.001);
    let forces = gravity_set(&p);

    let mut acc = vec![NVec2::zeros(); 2];
    forces.accumulate_accels(sys.t, &sys, &mut acc);

    let net = acc[0] * sys.bodies[0].m + acc[1] * sys.bodies[1].m;

    assert!(net.norm() < 1e-12, "Net momentum rate not zero: {:?}", net);
}

#[test]
fn gravity_points_toward_other_body() {
    let sys = two_body_system(2.0, 1.0, 1.0);
    let p = test_params(0.001);
    let forces = gravity_set(&p);

    let mut acc = vec![NVec2::zeros(); 2];
    forces.accumulate_accels(sys.t, &sys, &mut acc);

    let dx = sys.bodies[1].x - sys.bodies[0].x;

    assert!(dx.norm() > 0.0);
    assert!(acc[0].dot(&dx) > 0.0, "Acceleration is not toward second body");
}

#[test]
fn gravity_inverse_square_law() {
    let sys_r = two_body_system(1.0, 1.0, 1.0);
    let sys_2r = two_body_system(2.0, 1.0, 1.0);
    let p = test_params(0.001);
    let forces = gravity_set(&p);

    let mut acc_r = vec![NVec2::zeros(); 2];
    let mut acc_2r = vec![NVec2::zeros(); 2];

    forces.accumulate_accels(sys_r.t, &sys_r, &mut acc_r);
    forces.accumulate_accels(sys_2r.t, &sys_2r, &mut acc_2r);

    let ratio = acc_r[0].norm() / acc_2r[0].norm();

    assert!((ratio - 4.0).abs() < 1e-12, "Expected ~4x, got {}", ratio);
}

#[test]
fn gravity_zero_separation_contributes_nothing() {
    // Two bodies at the identical position: the pair is defined to
    // contribute zero acceleration, not NaN/Inf and not a panic
    let b = Body {
        x: [1.0, 2.0].into(),
        v: [0.0, 0.0].into(),
        m: 1.0e24,
    };
    let sys = System {
        bodies: vec![b.clone(), b],
        t: 0.0,
    };
    let p = test_params(0.001);
    let forces = gravity_set(&p);

    let mut acc = vec![NVec2::zeros(); 2];
    forces.accumulate_accels(sys.t, &sys, &mut acc);

    assert_eq!(acc[0], NVec2::zeros());
    assert_eq!(acc[1], NVec2::zeros());
}

#[test]
fn central_gravity_points_to_origin_with_inverse_square_magnitude() {
    let sys = System {
        bodies: vec![Body {
            x: [2.0, 0.0].into(),
            v: [0.0, 0.0].into(),
            m: 1.0,
        }],
        t: 0.0,
    };
    let central = CentralGravity { g: 1.0, mass: 8.0 };

    let mut acc = vec![NVec2::zeros(); 1];
    central.acceleration(sys.t, &sys, &mut acc);

    // a = -g M / r^2 along +x, with r = 2 and M = 8: magnitude 2
    assert_relative_eq!(acc[0].x, -2.0, epsilon = 1e-12);
    assert_relative_eq!(acc[0].y, 0.0, epsilon = 1e-12);
}

#[test]
fn central_gravity_zero_on_anchor() {
    // A body sitting exactly on the anchor feels no pull
    let sys = System {
        bodies: vec![Body {
            x: [0.0, 0.0].into(),
            v: [0.0, 0.0].into(),
            m: 1.0,
        }],
        t: 0.0,
    };
    let central = CentralGravity { g: 1.0, mass: 1.0e30 };

    let mut acc = vec![NVec2::zeros(); 1];
    central.acceleration(sys.t, &sys, &mut acc);

    assert_eq!(acc[0], NVec2::zeros());
}

// ==================================================================================
// Integrator tests
// ==================================================================================

#[test]
fn rk4_constant_field_matches_closed_form() {
    // RK4 is exact for constant acceleration, so one step must reproduce
    // x = x0 + v0 h + g h^2 / 2 and v = v0 + g h to rounding
    let g_field = NVec2::new(0.5, -0.25);
    let x0 = NVec2::new(3.0, 4.0);
    let v0 = NVec2::new(2.0, -1.0);

    let mut sys = System {
        bodies: vec![Body { x: x0, v: v0, m: 1.0 }],
        t: 0.0,
    };
    let p = test_params(0.1);
    let forces = AccelSet::new().with(ConstantField { a: g_field });
    let mut scratch = Rk4Scratch::new(&sys);

    rk4_integrator(&mut sys, &forces, &p, &mut scratch);

    let h = p.h0;
    let expect_x = x0 + v0 * h + g_field * (0.5 * h * h);
    let expect_v = v0 + g_field * h;

    assert_relative_eq!(sys.bodies[0].x.x, expect_x.x, epsilon = 1e-14);
    assert_relative_eq!(sys.bodies[0].x.y, expect_x.y, epsilon = 1e-14);
    assert_relative_eq!(sys.bodies[0].v.x, expect_v.x, epsilon = 1e-14);
    assert_relative_eq!(sys.bodies[0].v.y, expect_v.y, epsilon = 1e-14);
}

#[test]
fn rk4_step_completes_at_zero_separation() {
    // Coincident pair: the step must finish with finite state
    let b = Body {
        x: [1.0, 1.0].into(),
        v: [0.5, -0.5].into(),
        m: 1.0,
    };
    let mut sys = System {
        bodies: vec![
            b.clone(),
            Body {
                v: [-0.5, 0.5].into(),
                ..b
            },
        ],
        t: 0.0,
    };
    let p = test_params(0.01);
    let forces = gravity_set(&p);
    let mut scratch = Rk4Scratch::new(&sys);

    rk4_integrator(&mut sys, &forces, &p, &mut scratch);

    for b in &sys.bodies {
        assert!(b.x.x.is_finite() && b.x.y.is_finite(), "position not finite");
        assert!(b.v.x.is_finite() && b.v.y.is_finite(), "velocity not finite");
    }
}

#[test]
fn rk4_advances_time_one_step_at_a_time() {
    let mut sys = circular_pair(1.0, 1.0, 1.0);
    let p = test_params(0.5);
    let forces = gravity_set(&p);
    let mut scratch = Rk4Scratch::new(&sys);

    sys.advance(&forces, &p, &mut scratch);
    assert_eq!(sys.t, 0.5);
    sys.advance(&forces, &p, &mut scratch);
    sys.advance(&forces, &p, &mut scratch);
    assert_eq!(sys.t, 1.5);
}

#[test]
fn rk4_two_body_energy_bounded() {
    // Total mechanical energy of an isolated pair must stay near its
    // initial value over the whole run, with no monotonic drift
    let p = test_params(0.01);
    let mut sys = circular_pair(1.0, 1.0, p.g);
    let forces = gravity_set(&p);
    let mut scratch = Rk4Scratch::new(&sys);

    let e0 = total_energy(&sys, &forces);
    let mut worst = 0.0_f64;

    for _ in 0..100 {
        for _ in 0..10 {
            rk4_integrator(&mut sys, &forces, &p, &mut scratch);
        }
        let err = ((total_energy(&sys, &forces) - e0) / e0).abs();
        worst = worst.max(err);
    }

    assert!(worst < 1e-6, "Energy drifted by {:.2e}", worst);
}

#[test]
fn rk4_energy_error_shrinks_as_h4() {
    // Fourth-order method: halving the step over the same time span must
    // shrink the final energy error by about 2^4
    let span = 10.0;

    let run = |h0: f64| -> f64 {
        let p = test_params(h0);
        let mut sys = circular_pair(1.0, 1.0, p.g);
        let forces = gravity_set(&p);
        let mut scratch = Rk4Scratch::new(&sys);

        let e0 = total_energy(&sys, &forces);
        let steps = (span / h0).round() as usize;
        for _ in 0..steps {
            rk4_integrator(&mut sys, &forces, &p, &mut scratch);
        }
        ((total_energy(&sys, &forces) - e0) / e0).abs()
    };

    let err_h = run(0.05);
    let err_half = run(0.025);

    assert!(err_h < 1e-3, "Coarse-step error too large: {:.2e}", err_h);
    assert!(
        err_h / err_half > 8.0,
        "Expected ~16x shrink, got {:.1}x ({:.2e} -> {:.2e})",
        err_h / err_half,
        err_h,
        err_half
    );
}

#[test]
fn rk4_trajectories_are_deterministic() {
    // Identical initial state and step must reproduce bit-identical
    // trajectories: no hidden randomness, no uninitialized reads
    let p = test_params(0.01);
    let mut sys_a = circular_pair(1.0, 1.0, p.g);
    let mut sys_b = circular_pair(1.0, 1.0, p.g);
    let forces = gravity_set(&p);
    let mut scratch_a = Rk4Scratch::new(&sys_a);
    let mut scratch_b = Rk4Scratch::new(&sys_b);

    for _ in 0..500 {
        rk4_integrator(&mut sys_a, &forces, &p, &mut scratch_a);
        rk4_integrator(&mut sys_b, &forces, &p, &mut scratch_b);

        for (a, b) in sys_a.bodies.iter().zip(sys_b.bodies.iter()) {
            assert_eq!(a.x, b.x, "positions diverged");
            assert_eq!(a.v, b.v, "velocities diverged");
        }
    }
}

#[test]
fn rk4_mirrored_pair_stays_mirrored() {
    // Equal masses placed symmetrically about the origin with mirrored
    // velocities must produce mirrored trajectories at every step
    let mut sys = System {
        bodies: vec![
            Body {
                x: [1.0, 0.0].into(),
                v: [0.0, 0.5].into(),
                m: 1.0,
            },
            Body {
                x: [-1.0, 0.0].into(),
                v: [0.0, -0.5].into(),
                m: 1.0,
            },
        ],
        t: 0.0,
    };
    let p = test_params(0.01);
    let forces = gravity_set(&p);
    let mut scratch = Rk4Scratch::new(&sys);

    for step in 0..200 {
        rk4_integrator(&mut sys, &forces, &p, &mut scratch);

        let (b0, b1) = (&sys.bodies[0], &sys.bodies[1]);
        assert!(
            (b0.x + b1.x).norm() < 1e-12,
            "positions lost mirror symmetry at step {step}"
        );
        assert!(
            (b0.v + b1.v).norm() < 1e-12,
            "velocities lost mirror symmetry at step {step}"
        );
    }
}

// ==================================================================================
// Construction and preset tests
// ==================================================================================

#[test]
fn system_rejects_empty_body_set() {
    assert!(System::new(Vec::new()).is_err());
}

#[test]
fn system_rejects_nonpositive_mass() {
    let body = |m: f64| Body {
        x: [0.0, 0.0].into(),
        v: [0.0, 0.0].into(),
        m,
    };
    assert!(System::new(vec![body(0.0)]).is_err());
    assert!(System::new(vec![body(-1.0)]).is_err());
    assert!(System::new(vec![body(1.0)]).is_ok());
}

#[test]
fn scenario_rejects_nonpositive_step() {
    let mut cfg = three_body_preset();
    cfg.parameters.h0 = 0.0;
    assert!(Scenario::build_scenario(cfg).is_err());
}

#[test]
fn scenario_rejects_central_without_positive_anchor_mass() {
    let mut cfg = single_orbit_preset(1.0, 24.0, 0.0);
    cfg.engine.central_mass = Some(0.0);
    assert!(Scenario::build_scenario(cfg).is_err());
}

#[test]
fn scenario_rejects_wrong_vector_arity() {
    let mut cfg = three_body_preset();
    cfg.bodies[0].x = vec![0.0, 0.0, 0.0];
    assert!(Scenario::build_scenario(cfg).is_err());
}

#[test]
fn three_body_preset_instantiates_exact_values() {
    let scenario = Scenario::build_scenario(three_body_preset()).expect("preset must build");
    let bodies = &scenario.system.bodies;
    assert_eq!(bodies.len(), 3);

    // Body 0: solar-mass primary at rest at the origin
    assert_eq!(bodies[0].m, 1.989e30);
    assert_eq!(bodies[0].x, NVec2::zeros());
    assert_eq!(bodies[0].v, NVec2::zeros());

    // Body 1: 5e26 kg at 1 AU with 29.78 km/s tangential velocity
    assert_eq!(bodies[1].m, 5e26);
    assert_eq!(bodies[1].x, NVec2::new(1.496e11, 0.0));
    assert_eq!(bodies[1].v, NVec2::new(0.0, 29_780.0));

    // Body 2: 5e26 kg at 1.2 AU offset by 45 degrees, 27 km/s tangential
    let angle = 45.0_f64.to_radians();
    assert_eq!(bodies[2].m, 5e26);
    assert_relative_eq!(bodies[2].x.x, 1.2 * 1.496e11 * angle.cos(), epsilon = 1e-3);
    assert_relative_eq!(bodies[2].x.y, 1.2 * 1.496e11 * angle.sin(), epsilon = 1e-3);
    assert_relative_eq!(bodies[2].v.x, -27_000.0 * angle.sin(), epsilon = 1e-9);
    assert_relative_eq!(bodies[2].v.y, 27_000.0 * angle.cos(), epsilon = 1e-9);

    assert_eq!(scenario.engine.force, ForceConfig::Pairwise);
    assert_eq!(scenario.engine.trail_cap, 3000);
    assert_eq!(scenario.parameters.h0, 70_000.0);
}

#[test]
fn single_orbit_preset_builds_central_variant() {
    let scenario =
        Scenario::build_scenario(single_orbit_preset(1.0, 24.0, 0.0)).expect("preset must build");

    assert_eq!(scenario.engine.force, ForceConfig::Central);
    assert_eq!(scenario.engine.central_mass, SOLAR_MASS);
    assert_eq!(scenario.engine.trail_cap, 8000);
    assert_eq!(scenario.parameters.h0, 100_000.0);

    let body = &scenario.system.bodies[0];
    assert_eq!(body.x, NVec2::new(1.496e11, 0.0));
    assert_eq!(body.v, NVec2::new(0.0, 24_000.0));
}

// ==================================================================================
// Trail tests
// ==================================================================================

#[test]
fn trail_appends_and_evicts_oldest() {
    let mut sys = System {
        bodies: vec![Body {
            x: [0.0, 0.0].into(),
            v: [0.0, 0.0].into(),
            m: 1.0,
        }],
        t: 0.0,
    };
    let mut trails = TrailSet::new(1, 5);

    for i in 0..8 {
        sys.bodies[0].x = NVec2::new(i as f64, 0.0);
        trails.record(&sys);
    }

    let trail = trails.iter().next().expect("one trail per body");
    assert_eq!(trail.len(), 5, "capacity must bound the trail");
    assert_eq!(trail.front(), Some(&NVec2::new(3.0, 0.0)), "oldest kept entry");
    assert_eq!(trail.back(), Some(&NVec2::new(7.0, 0.0)), "latest entry");
}
