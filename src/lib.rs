pub mod simulation;
pub mod configuration;
pub mod visualization;
pub mod benchmark;

pub use simulation::states::{Body, System, NVec2};
pub use simulation::forces::{Acceleration, AccelSet, NewtonianGravity, CentralGravity};
pub use simulation::integrator::{rk4_integrator, Rk4Scratch};
pub use simulation::params::{Parameters, GRAVITATIONAL_CONSTANT};
pub use simulation::trail::TrailSet;
pub use simulation::scenario::{
    preset_by_token, single_orbit_preset, three_body_preset, Scenario, ASTRONOMICAL_UNIT,
    SOLAR_MASS,
};

pub use configuration::config::{
    BodyConfig, EngineConfig, ForceConfig, ParametersConfig, ScenarioConfig,
};
pub use configuration::interactive::prompt_scenario;

pub use visualization::vis2d::run_2d;

pub use benchmark::benchmark::{bench_gravity, bench_rk4, bench_rk4_curve};
