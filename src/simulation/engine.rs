//! High-level runtime engine settings
//!
//! Selects the force-model variant (pairwise n-body vs. fixed anchor) and
//! carries the display knobs used when building and running a `Scenario`

use crate::configuration::config::ForceConfig;

#[derive(Debug, Clone)]
pub struct Engine {
    pub force: ForceConfig,    // pairwise or central (fixed anchor at origin)
    pub central_mass: f64,     // anchor mass (kg), meaningful for the central variant
    pub trail_cap: usize,      // retained trail positions per body
    pub meters_per_pixel: f64, // world-to-screen scale for the viewer
}
