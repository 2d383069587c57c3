//! Build fully-initialized simulation scenarios from configuration
//!
//! Takes a `ScenarioConfig` (YAML- or prompt-facing) and produces the
//! runtime bundle (`Scenario`) containing:
//! - engine settings (`Engine`)
//! - numerical parameters (`Parameters`)
//! - system state (`System` with bodies at t = 0)
//! - active force set (`AccelSet`)
//! - trail history and preallocated RK4 scratch
//!
//! All invalid-configuration rejection happens here or in `System::new`;
//! the integrator only ever sees validated numeric state. The scenario is
//! inserted into Bevy as a `Resource` and consumed by the integration and
//! visualization systems.
//!
//! This module also owns the built-in presets selectable by token.

use bevy::prelude::Resource;

use anyhow::{bail, ensure, Result};

use crate::configuration::config::{
    BodyConfig, EngineConfig, ForceConfig, ParametersConfig, ScenarioConfig,
};
use crate::simulation::engine::Engine;
use crate::simulation::forces::{AccelSet, CentralGravity, NewtonianGravity};
use crate::simulation::integrator::Rk4Scratch;
use crate::simulation::params::{Parameters, GRAVITATIONAL_CONSTANT};
use crate::simulation::states::{Body, NVec2, System};
use crate::simulation::trail::TrailSet;

/// One astronomical unit in meters
pub const ASTRONOMICAL_UNIT: f64 = 1.496e11;

/// Solar mass in kilograms, the anchor mass of the single-orbit variant
pub const SOLAR_MASS: f64 = 1.989e30;

/// Bevy resource representing a fully-initialized simulation scenario
///
/// This is the main runtime bundle constructed from a [`ScenarioConfig`]:
/// engine settings, parameters, current system state, the active force set,
/// the bounded trail history, and the integrator scratch reused every step.
#[derive(Resource)]
pub struct Scenario {
    pub engine: Engine,
    pub parameters: Parameters,
    pub system: System,
    pub forces: AccelSet,
    pub trails: TrailSet,
    pub scratch: Rk4Scratch,
}

impl Scenario {
    pub fn build_scenario(cfg: ScenarioConfig) -> Result<Self> {
        let p_cfg = cfg.parameters;
        ensure!(p_cfg.h0 > 0.0, "step size h0 must be positive, got {}", p_cfg.h0);

        // Parameters (runtime) from ParametersConfig
        let parameters = Parameters {
            t_end: p_cfg.t_end,
            h0: p_cfg.h0,
            g: p_cfg.g,
        };

        // Bodies: map `BodyConfig` -> runtime `Body` using nalgebra vectors
        let mut bodies = Vec::with_capacity(cfg.bodies.len());
        for (i, bc) in cfg.bodies.iter().enumerate() {
            ensure!(
                bc.x.len() == 2 && bc.v.len() == 2,
                "body {i}: x and v must each have 2 components"
            );
            bodies.push(Body {
                x: NVec2::new(bc.x[0], bc.x[1]),
                v: NVec2::new(bc.v[0], bc.v[1]),
                m: bc.m,
            });
        }

        // Initial system state: bodies at t = 0 (rejects empty set and
        // non-positive masses)
        let system = System::new(bodies)?;

        // Engine (runtime) from EngineConfig
        let e_cfg = cfg.engine;
        let engine = Engine {
            force: e_cfg.force.clone(),
            central_mass: e_cfg.central_mass.unwrap_or(SOLAR_MASS),
            trail_cap: e_cfg.trail_cap.unwrap_or(3000),
            meters_per_pixel: e_cfg.meters_per_pixel.unwrap_or(1e9),
        };

        // Forces: register the configured gravity variant
        let forces = match engine.force {
            ForceConfig::Pairwise => AccelSet::new().with(NewtonianGravity { g: parameters.g }),
            ForceConfig::Central => {
                ensure!(
                    engine.central_mass > 0.0,
                    "central force requires a positive anchor mass, got {}",
                    engine.central_mass
                );
                AccelSet::new().with(CentralGravity {
                    g: parameters.g,
                    mass: engine.central_mass,
                })
            }
        };

        let trails = TrailSet::new(system.bodies.len(), engine.trail_cap);
        let scratch = Rk4Scratch::new(&system);

        Ok(Self {
            engine,
            parameters,
            system,
            forces,
            trails,
            scratch,
        })
    }
}

/// Resolve a preset token from the CLI or the interactive setup
pub fn preset_by_token(token: &str) -> Result<ScenarioConfig> {
    match token.to_ascii_lowercase().as_str() {
        "default" | "three-body" => Ok(three_body_preset()),
        "orbit" | "single-orbit" => Ok(single_orbit_preset(1.0, 24.0, 0.0)),
        other => bail!("unknown preset '{other}' (expected 'default' or 'orbit')"),
    }
}

/// The fixed three-body preset: a solar-mass primary at rest at the origin
/// and two 5e26 kg companions, one on a circular-ish orbit at 1 AU, one at
/// 1.2 AU offset by 45 degrees with an inward-leaning tangential velocity.
pub fn three_body_preset() -> ScenarioConfig {
    let angle = 45.0_f64.to_radians();

    ScenarioConfig {
        engine: EngineConfig {
            force: ForceConfig::Pairwise,
            central_mass: None,
            trail_cap: Some(3000),
            meters_per_pixel: Some(1e9),
        },
        parameters: ParametersConfig {
            t_end: 1.0e9,
            h0: 70_000.0,
            g: GRAVITATIONAL_CONSTANT,
        },
        bodies: vec![
            BodyConfig {
                x: vec![0.0, 0.0],
                v: vec![0.0, 0.0],
                m: 1.989e30,
            },
            BodyConfig {
                x: vec![1.496e11, 0.0],
                v: vec![0.0, 29_780.0],
                m: 5e26,
            },
            BodyConfig {
                x: vec![
                    1.2 * 1.496e11 * angle.cos(),
                    1.2 * 1.496e11 * angle.sin(),
                ],
                v: vec![-27_000.0 * angle.sin(), 27_000.0 * angle.cos()],
                m: 5e26,
            },
        ],
    }
}

/// The restricted single-orbit preset: one 1e24 kg body around a fixed
/// solar-mass anchor at the origin. Inputs are the setup-boundary units
/// (AU, km/s); conversion to SI happens here.
pub fn single_orbit_preset(dist_au: f64, tan_kms: f64, rad_kms: f64) -> ScenarioConfig {
    ScenarioConfig {
        engine: EngineConfig {
            force: ForceConfig::Central,
            central_mass: Some(SOLAR_MASS),
            trail_cap: Some(8000),
            meters_per_pixel: Some(8e8),
        },
        parameters: ParametersConfig {
            t_end: 1.0e9,
            h0: 100_000.0,
            g: GRAVITATIONAL_CONSTANT,
        },
        bodies: vec![BodyConfig {
            x: vec![dist_au * ASTRONOMICAL_UNIT, 0.0],
            v: vec![rad_kms * 1e3, tan_kms * 1e3],
            m: 1e24,
        }],
    }
}
