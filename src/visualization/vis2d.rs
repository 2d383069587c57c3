//! Bevy 2D viewer for the RK4 simulation
//!
//! Frame-driven execution: every `Update` tick performs exactly one
//! integration step, records the trails, then syncs body transforms, so the
//! renderer only ever sees a fully-materialized state. The window's vsync
//! pacing is the frame cap, and it deliberately throttles simulation speed;
//! there is no decoupling between simulation time and wall-clock frame rate.
//! Quitting is a cooperative keyboard poll (Q or Escape) once per frame.

use bevy::app::AppExit;
use bevy::math::primitives::Circle;
use bevy::prelude::*;
use bevy::sprite::{MaterialMesh2dBundle, Mesh2dHandle};

use crate::configuration::config::ForceConfig;
use crate::simulation::integrator::rk4_integrator;
use crate::simulation::scenario::Scenario;

/// Component tagging each circle with its body index into Scenario.system.bodies
#[derive(Component)]
struct BodyIndex(pub usize);

const WINDOW_WIDTH: f32 = 900.0;
const WINDOW_HEIGHT: f32 = 700.0;

/// Screen radius of the anchor disc in the central-force variant
const ANCHOR_RADIUS_PX: f32 = 30.0;

pub fn run_2d(scenario: Scenario) {
    println!(
        "run_2d: starting Bevy 2D viewer with {} bodies",
        scenario.system.bodies.len()
    );

    App::new()
        .insert_resource(scenario)
        .insert_resource(ClearColor(Color::BLACK))
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "n-Body RK4 Simulation".into(),
                resolution: (WINDOW_WIDTH, WINDOW_HEIGHT).into(),
                ..Default::default()
            }),
            ..Default::default()
        }))
        .add_systems(Startup, setup_bodies_system)
        .add_systems(
            Update,
            (
                physics_step_system,
                sync_transforms_system,
                draw_trails_system,
                quit_on_keypress_system,
            )
                .chain(),
        )
        .run();
}

/// Screen radius from mass: a few pixels per decade above 1e20 kg,
/// clamped so tiny bodies are still visible
fn draw_radius_px(mass: f64) -> f32 {
    (mass.log10() - 20.0).floor().max(3.0) as f32
}

fn setup_bodies_system(
    mut commands: Commands,
    scenario: Res<Scenario>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
) {
    // 2D camera, origin at window center
    commands.spawn(Camera2dBundle::default());

    // Fixed anchor disc for the central-force variant; it has no body row
    // and never moves
    if scenario.engine.force == ForceConfig::Central {
        commands.spawn(MaterialMesh2dBundle {
            mesh: Mesh2dHandle(meshes.add(Circle::new(ANCHOR_RADIUS_PX))),
            material: materials.add(ColorMaterial::from(Color::srgb_u8(255, 190, 0))),
            transform: Transform::from_xyz(0.0, 0.0, 0.0),
            ..Default::default()
        });
    }

    let mpp = scenario.engine.meters_per_pixel;
    for (i, body) in scenario.system.bodies.iter().enumerate() {
        let x = (body.x.x / mpp) as f32;
        let y = (body.x.y / mpp) as f32;

        commands.spawn((
            MaterialMesh2dBundle {
                mesh: Mesh2dHandle(meshes.add(Circle::new(draw_radius_px(body.m)))),
                material: materials.add(ColorMaterial::from(Color::srgb_u8(
                    200,
                    (200 - (i * 20) % 200) as u8,
                    255,
                ))),
                transform: Transform::from_xyz(x, y, 1.0),
                ..Default::default()
            },
            BodyIndex(i),
        ));
    }
}

/// One fixed integration step per frame, then record the trails while the
/// new state is current
fn physics_step_system(mut scenario: ResMut<Scenario>) {
    // Split &mut Scenario into &mut fields in one destructuring step
    let Scenario {
        system,
        parameters,
        forces,
        trails,
        scratch,
        ..
    } = &mut *scenario;

    rk4_integrator(system, forces, parameters, scratch);
    trails.record(system);
}

fn sync_transforms_system(scenario: Res<Scenario>, mut query: Query<(&BodyIndex, &mut Transform)>) {
    let mpp = scenario.engine.meters_per_pixel;
    for (BodyIndex(i), mut transform) in &mut query {
        if let Some(b) = scenario.system.bodies.get(*i) {
            transform.translation.x = (b.x.x / mpp) as f32;
            transform.translation.y = (b.x.y / mpp) as f32;
        }
    }
}

/// Gizmo polyline per body over its retained trail positions
fn draw_trails_system(scenario: Res<Scenario>, mut gizmos: Gizmos) {
    let mpp = scenario.engine.meters_per_pixel;
    for trail in scenario.trails.iter() {
        if trail.len() > 1 {
            gizmos.linestrip_2d(
                trail
                    .iter()
                    .map(|p| Vec2::new((p.x / mpp) as f32, (p.y / mpp) as f32)),
                Color::srgb_u8(120, 120, 120),
            );
        }
    }
}

/// Cooperative quit: polled once per frame, so the loop terminates before
/// the next step is scheduled, never mid-step
fn quit_on_keypress_system(keys: Res<ButtonInput<KeyCode>>, mut exit: EventWriter<AppExit>) {
    if keys.just_pressed(KeyCode::KeyQ) || keys.just_pressed(KeyCode::Escape) {
        exit.send(AppExit::Success);
    }
}
