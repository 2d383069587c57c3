//! Configuration types for loading simulation scenarios from YAML.
//!
//! This module defines a thin, `serde`-deserializable representation of a
//! simulation scenario. A scenario consists of:
//!
//! - [`EngineConfig`]     – force-model variant and display knobs
//! - [`ParametersConfig`] – numerical parameters and physical constants
//! - [`BodyConfig`]       – initial state for each body
//! - [`ScenarioConfig`]   – top-level wrapper used to load a scenario from YAML
//!
//! # YAML format
//! An example scenario YAML matching these types:
//!
//! ```yaml
//! engine:
//!   force: "pairwise"         # or "central" for the fixed-anchor variant
//!   central_mass: 1.989e30    # anchor mass (kg), central variant only
//!   trail_cap: 3000           # retained trail positions per body
//!   meters_per_pixel: 1.0e9   # world-to-screen scale
//!
//! parameters:
//!   t_end: 1.0e9              # total simulation time (s), batch runs
//!   h0: 70000.0               # fixed step size (s)
//!   g: 6.674e-11              # gravitational constant
//!
//! bodies:
//!   - x: [ 0.0, 0.0 ]         # position (m)
//!     v: [ 0.0, 0.0 ]         # velocity (m/s)
//!     m: 1.989e30             # mass (kg)
//!   - x: [ 1.496e11, 0.0 ]
//!     v: [ 0.0, 29780.0 ]
//!     m: 5.0e26
//! ```
//!
//! The engine then maps this configuration into its internal runtime scenario
//! representation, which may use different structs optimized for performance.

use serde::Deserialize;

/// Which force-model variant the engine builds
/// `force: "pairwise"` or `force: "central"`
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub enum ForceConfig {
    #[serde(rename = "pairwise")] // Direct n^2 sum over all body pairs
    Pairwise,

    #[serde(rename = "central")] // Single fixed anchor mass at the origin, O(1) per body
    Central,
}

/// High-level engine configuration
/// Controls the structure of the simulation
#[derive(Deserialize, Debug)]
pub struct EngineConfig {
    pub force: ForceConfig,            // pairwise n-body or fixed-anchor gravity
    pub central_mass: Option<f64>,     // anchor mass (kg), defaults to one solar mass
    pub trail_cap: Option<usize>,      // retained trail positions per body, default 3000
    pub meters_per_pixel: Option<f64>, // viewer scale, default 1e9
}

/// Global numerical and physical parameters for a scenario
#[derive(Deserialize, Debug, Clone)]
pub struct ParametersConfig {
    pub t_end: f64, // time end for batch runs (s)
    pub h0: f64,    // fixed step size (s)
    pub g: f64,     // gravitational constant
}

/// Configuration for a single body's initial state
#[derive(Deserialize, Debug)]
pub struct BodyConfig {
    pub x: Vec<f64>, // initial position (m)
    pub v: Vec<f64>, // initial velocity (m/s)
    pub m: f64,      // mass (kg)
}

/// Top-level scenario configuration loaded from YAML.
#[derive(Deserialize, Debug)]
pub struct ScenarioConfig {
    pub engine: EngineConfig,             // force variant and display knobs
    pub parameters: ParametersConfig,     // global numerical and physical parameters
    pub bodies: Vec<BodyConfig>,          // initial state of the system
}
