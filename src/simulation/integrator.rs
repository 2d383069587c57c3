//! Fixed-step classical RK4 integrator for the n-body system
//!
//! Advances the coupled first-order system dx/dt = v, dv/dt = a(x) for all
//! bodies at once. Each of the four stages evaluates the force set across
//! the *whole* system before any next-stage position is constructed; a
//! body's update never reads another body's already-updated state within
//! the same step. The final combine writes every body's new (x, v) from the
//! step-initial snapshot in one pass, then bumps `sys.t`.
//!
//! Stage temporaries live in a preallocated [`Rk4Scratch`] reused across
//! steps, so steady-state stepping performs no allocation.

use super::forces::AccelSet;
use super::params::Parameters;
use super::states::{NVec2, System};

/// Preallocated stage buffers for [`rk4_integrator`]
///
/// `stage` is a full [`System`] whose positions/velocities are overwritten
/// each stage so force terms see an ordinary system snapshot; masses are
/// copied once and stay valid because masses never change after creation.
pub struct Rk4Scratch {
    stage: System,  // stage-state snapshot handed to force evaluations
    v2: Vec<NVec2>, // stage-2 velocities
    v3: Vec<NVec2>, // stage-3 velocities
    v4: Vec<NVec2>, // stage-4 velocities
    a1: Vec<NVec2>, // accelerations at x0
    a2: Vec<NVec2>, // accelerations at stage-2 positions
    a3: Vec<NVec2>, // accelerations at stage-3 positions
    a4: Vec<NVec2>, // accelerations at stage-4 positions
}

impl Rk4Scratch {
    /// Size the scratch for `sys`; call once at scenario build time
    pub fn new(sys: &System) -> Self {
        let n = sys.bodies.len();
        Self {
            stage: sys.clone(),
            v2: vec![NVec2::zeros(); n],
            v3: vec![NVec2::zeros(); n],
            v4: vec![NVec2::zeros(); n],
            a1: vec![NVec2::zeros(); n],
            a2: vec![NVec2::zeros(); n],
            a3: vec![NVec2::zeros(); n],
            a4: vec![NVec2::zeros(); n],
        }
    }

    /// Regrow the buffers if the body count ever differs from the scratch.
    /// Bodies are never added or removed mid-run, so this is a cheap length
    /// check in steady state.
    fn ensure(&mut self, sys: &System) {
        if self.stage.bodies.len() != sys.bodies.len() {
            *self = Self::new(sys);
        }
    }
}

/// Advance the system by one fixed step `params.h0` using classical RK4
///
/// Four force evaluations per step:
/// 1. a1 = F(x0)
/// 2. x2 = x0 + v0*h/2, v2 = v0 + a1*h/2, a2 = F(x2)
/// 3. x3 = x0 + v2*h/2, v3 = v0 + a2*h/2, a3 = F(x3)
/// 4. x4 = x0 + v3*h,   v4 = v0 + a3*h,   a4 = F(x4)
///
/// then x += h*(v0 + 2v2 + 2v3 + v4)/6 and v += h*(a1 + 2a2 + 2a3 + a4)/6.
/// Deterministic and fixed-size: no error control, no rejection, no retry.
pub fn rk4_integrator(
    sys: &mut System,
    forces: &AccelSet,
    params: &Parameters,
    scratch: &mut Rk4Scratch,
) {
    let n = sys.bodies.len();
    if n == 0 {
        // no bodies, return
        return;
    }

    let h = params.h0; // time step
    let half_h = 0.5 * h; // half step

    scratch.ensure(sys);
    let Rk4Scratch {
        stage,
        v2,
        v3,
        v4,
        a1,
        a2,
        a3,
        a4,
    } = scratch;

    // Stage 1: accelerations at the initial positions x0
    forces.accumulate_accels(sys.t, sys, a1);

    // Stage 2 state for every body before any stage-2 force evaluation:
    // x2 = x0 + v0*h/2, v2 = v0 + a1*h/2
    for (i, b) in sys.bodies.iter().enumerate() {
        v2[i] = b.v + half_h * a1[i];
        stage.bodies[i].x = b.x + half_h * b.v;
        stage.bodies[i].v = v2[i];
    }
    stage.t = sys.t + half_h;
    forces.accumulate_accels(stage.t, stage, a2);

    // Stage 3: x3 = x0 + v2*h/2, v3 = v0 + a2*h/2
    for (i, b) in sys.bodies.iter().enumerate() {
        v3[i] = b.v + half_h * a2[i];
        stage.bodies[i].x = b.x + half_h * v2[i];
        stage.bodies[i].v = v3[i];
    }
    forces.accumulate_accels(stage.t, stage, a3);

    // Stage 4: x4 = x0 + v3*h, v4 = v0 + a3*h
    for (i, b) in sys.bodies.iter().enumerate() {
        v4[i] = b.v + h * a3[i];
        stage.bodies[i].x = b.x + h * v3[i];
        stage.bodies[i].v = v4[i];
    }
    stage.t = sys.t + h;
    forces.accumulate_accels(stage.t, stage, a4);

    // Combine: weighted average of the stage slopes, written back from the
    // untouched step-initial state in a single pass
    for (i, b) in sys.bodies.iter_mut().enumerate() {
        b.x += h * (b.v + 2.0 * v2[i] + 2.0 * v3[i] + v4[i]) / 6.0;
        b.v += h * (a1[i] + 2.0 * a2[i] + 2.0 * a3[i] + a4[i]) / 6.0;
    }

    // Advance time by one full step
    sys.t += h;
}
