//! Wall-clock probes for the force models and the RK4 stepper
//!
//! Not wired into the test suite; invoked by hand through the `--bench`
//! CLI flag when eyeballing how the direct pairwise sum scales against the
//! O(1)-per-body central variant, and what one RK4 step costs across N.

use std::time::Instant;

use crate::simulation::forces::{AccelSet, Acceleration, CentralGravity, NewtonianGravity};
use crate::simulation::integrator::{rk4_integrator, Rk4Scratch};
use crate::simulation::params::{Parameters, GRAVITATIONAL_CONSTANT};
use crate::simulation::scenario::SOLAR_MASS;
use crate::simulation::states::{Body, NVec2, System};

/// Deterministic synthetic system, no rand needed
fn synthetic_system(n: usize) -> System {
    let mut bodies = Vec::with_capacity(n);
    for i in 0..n {
        let i_f = i as f64;
        bodies.push(Body {
            x: NVec2::new((i_f * 0.37).sin() * 2.0e11, (i_f * 0.13).cos() * 2.0e11),
            v: NVec2::zeros(),
            m: 1.0e24,
        });
    }
    System { bodies, t: 0.0 }
}

fn bench_params() -> Parameters {
    Parameters {
        t_end: 7.0e6,
        h0: 70_000.0,
        g: GRAVITATIONAL_CONSTANT,
    }
}

pub fn bench_gravity() {
    // Different system sizes to test
    let ns = [200, 400, 800, 1600, 3200, 6400];

    for n in ns {
        let sys = synthetic_system(n);
        let params = bench_params();

        let mut out = vec![NVec2::zeros(); n];

        let pairwise = NewtonianGravity { g: params.g };
        let central = CentralGravity {
            g: params.g,
            mass: SOLAR_MASS,
        };

        // Warm up
        pairwise.acceleration(0.0, &sys, &mut out);
        central.acceleration(0.0, &sys, &mut out);

        // Time the direct pairwise sum
        let t0 = Instant::now();
        pairwise.acceleration(0.0, &sys, &mut out);
        let dt_pairwise = t0.elapsed().as_secs_f64();

        // Time the fixed-anchor evaluation
        let t1 = Instant::now();
        central.acceleration(0.0, &sys, &mut out);
        let dt_central = t1.elapsed().as_secs_f64();

        println!(
            "N = {n:5}, pairwise = {:8.6} s, central = {:8.6} s",
            dt_pairwise, dt_central
        );
    }
}

pub fn bench_rk4() {
    let ns = [200, 400, 800];

    for n in ns {
        let mut sys = synthetic_system(n);
        let params = bench_params();
        // integrate to t_end (four force evaluations per step)
        let steps = (params.t_end / params.h0).round() as usize;
        let forces = AccelSet::new().with(NewtonianGravity { g: params.g });
        let mut scratch = Rk4Scratch::new(&sys);

        // Warm up one step so scratch and caches are hot
        rk4_integrator(&mut sys, &forces, &params, &mut scratch);

        let t0 = Instant::now();
        for _ in 0..steps {
            rk4_integrator(&mut sys, &forces, &params, &mut scratch);
        }
        let per_step = t0.elapsed().as_secs_f64() / steps as f64;

        println!("N = {n:5}, rk4 step = {:8.6} s", per_step);
    }
}

pub fn bench_rk4_curve() {
    // Step-count sweep at fixed N: steady-state stepping should be flat
    // per step (no allocation churn between steps)
    let n = 800;
    let params = bench_params();
    let step_counts = [1usize, 2, 4, 8, 16];

    for steps in step_counts {
        let mut sys = synthetic_system(n);
        let forces = AccelSet::new().with(NewtonianGravity { g: params.g });
        let mut scratch = Rk4Scratch::new(&sys);

        rk4_integrator(&mut sys, &forces, &params, &mut scratch);

        let t0 = Instant::now();
        for _ in 0..steps {
            rk4_integrator(&mut sys, &forces, &params, &mut scratch);
        }
        let total = t0.elapsed().as_secs_f64();

        println!(
            "N = {n}, steps = {steps:3}, total = {:8.6} s, per step = {:8.6} s",
            total,
            total / steps as f64
        );
    }
}
