//! Prompt-driven scenario setup on stdin
//!
//! Asks for a body count and per-body orbital parameters, falling back to a
//! documented default whenever the input is empty, 'd', or malformed; the
//! core never sees anything but valid numeric state. Typing `default` at the
//! body-count prompt selects the built-in three-body preset.
//!
//! Per-body inputs are polar and in setup units (mass kg, distance AU,
//! angle degrees, tangential speed km/s); this boundary converts them to SI
//! cartesian state before anything reaches the simulation.

use std::io::{self, BufRead, Write};

use anyhow::Result;

use crate::configuration::config::{
    BodyConfig, EngineConfig, ForceConfig, ParametersConfig, ScenarioConfig,
};
use crate::simulation::params::GRAVITATIONAL_CONSTANT;
use crate::simulation::scenario::{three_body_preset, ASTRONOMICAL_UNIT};

/// Read one line from stdin after printing `prompt`
fn prompt_line(prompt: &str) -> Result<String> {
    print!("{prompt}");
    io::stdout().flush()?;
    let mut raw = String::new();
    io::stdin().lock().read_line(&mut raw)?;
    Ok(raw.trim().to_string())
}

/// Prompt for one number; empty input or 'd' accepts the fallback, and a
/// malformed value falls back too (with a notice) instead of failing
fn get_numeric_input(message: &str, fallback: f64) -> Result<f64> {
    let raw = prompt_line(&format!("{message} [default = {fallback}, type 'd' for default]: "))?;
    if raw.is_empty() || raw.eq_ignore_ascii_case("d") {
        return Ok(fallback);
    }
    match raw.parse::<f64>() {
        Ok(value) => Ok(value),
        Err(_) => {
            println!("Invalid input, using default.");
            Ok(fallback)
        }
    }
}

/// Run the interactive setup flow and produce a scenario configuration
pub fn prompt_scenario() -> Result<ScenarioConfig> {
    println!();
    println!("SETUP");

    let first = prompt_line("Number of bodies [or 'default' for the preset system]: ")?;
    if first.eq_ignore_ascii_case("default") {
        return Ok(three_body_preset());
    }

    let total_bodies = if first.is_empty() {
        3
    } else {
        match first.parse::<f64>() {
            Ok(value) if value >= 1.0 => value as usize,
            _ => {
                println!("Invalid input, using default.");
                3
            }
        }
    };

    let mut bodies = Vec::with_capacity(total_bodies);
    for body_index in 0..total_bodies {
        println!();
        println!("Body {body_index}");
        let mass = get_numeric_input("mass (kg)", 1.0e24)?;
        let distance = get_numeric_input("distance from origin (AU)", 0.0)? * ASTRONOMICAL_UNIT;
        let angle = get_numeric_input("angle (deg)", 0.0)?.to_radians();
        let speed = get_numeric_input("tangential speed (kms-1)", 0.0)? * 1e3;

        // Polar setup values to SI cartesian state; the tangential velocity
        // is perpendicular to the radius vector
        bodies.push(BodyConfig {
            x: vec![distance * angle.cos(), distance * angle.sin()],
            v: vec![-speed * angle.sin(), speed * angle.cos()],
            m: mass,
        });
    }

    Ok(ScenarioConfig {
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
        bodies,
    })
}
