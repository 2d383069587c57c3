//! Core state types for the RK4 n-body simulation.
//!
//! Defines the body/system structs evolved by the integrator:
//! - `Body`   – one point mass (SI units: meters, meters/second, kilograms)
//! - `System` – the ordered body collection plus the current simulation time `t`
//!
//! A body's identity is its index into `System::bodies`; insertion order is
//! significant only for rendering (color/ID), never for the physics.

use anyhow::{ensure, Result};
use nalgebra::Vector2;

use crate::simulation::forces::AccelSet;
use crate::simulation::integrator::{rk4_integrator, Rk4Scratch};
use crate::simulation::params::Parameters;

pub type NVec2 = Vector2<f64>;

#[derive(Debug, Clone)]
pub struct Body {
    pub x: NVec2, // position (m)
    pub v: NVec2, // velocity (m/s)
    pub m: f64,   // mass (kg), fixed after construction
}

#[derive(Debug, Clone)]
pub struct System {
    pub bodies: Vec<Body>, // collection of bodies, index = body identity
    pub t: f64,            // time (s)
}

impl System {
    /// Build a system at t = 0, rejecting invalid configurations:
    /// an empty body set or any non-positive mass is an error, never coerced.
    pub fn new(bodies: Vec<Body>) -> Result<Self> {
        ensure!(!bodies.is_empty(), "system must contain at least one body");
        for (i, b) in bodies.iter().enumerate() {
            ensure!(b.m > 0.0, "body {i}: mass must be positive, got {}", b.m);
        }
        Ok(Self { bodies, t: 0.0 })
    }

    /// Advance the system by exactly one fixed step, delegating to the
    /// RK4 integrator. The whole state is replaced atomically; a renderer
    /// never observes a partially-updated body.
    pub fn advance(&mut self, forces: &AccelSet, params: &Parameters, scratch: &mut Rk4Scratch) {
        rk4_integrator(self, forces, params, scratch);
    }

    /// Read-only position snapshot for the renderer.
    pub fn positions(&self) -> impl Iterator<Item = NVec2> + '_ {
        self.bodies.iter().map(|b| b.x)
    }

    /// Total kinetic energy, sum of (1/2) m |v|^2 over all bodies.
    pub fn kinetic_energy(&self) -> f64 {
        self.bodies
            .iter()
            .map(|b| 0.5 * b.m * b.v.norm_squared())
            .sum()
    }
}
