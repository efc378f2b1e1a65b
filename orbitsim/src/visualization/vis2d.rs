use bevy::log::LogPlugin;
use bevy::math::primitives::Circle;
use bevy::prelude::*;
use bevy::sprite::{MaterialMesh2dBundle, Mesh2dHandle};
use log::{error, info};

use crate::simulation::render::RenderedBody;
use crate::simulation::scenario::Scenario;
use crate::simulation::states::Rgb;

#[derive(Component)]
struct BodyIndex(pub usize);

/// Last frame handed over by the scenario, in active-set order
#[derive(Resource, Default)]
struct Frame(Vec<RenderedBody>);

// world units map 1:1 to pixels, both y-up
const SCALE: f32 = 1.0;

/// Open a window showing the scenario's bodies. Space starts the run;
/// after that the scenario takes one tick per frame.
pub fn run_2d(scenario: Scenario) {
    info!("run_2d: starting Bevy 2D viewer with {} bodies", scenario.body_count());

    App::new()
        .insert_resource(scenario)
        .init_resource::<Frame>()
        // env_logger already owns the global logger
        .add_plugins(DefaultPlugins.build().disable::<LogPlugin>())
        .add_systems(Startup, setup_bodies_system)
        .add_systems(Update, (start_system, physics_step_system, sync_transforms_system).chain())
        .run();
}

fn to_color(c: Rgb) -> Color {
    Color::srgb_u8(c.r, c.g, c.b)
}

fn setup_bodies_system(mut commands: Commands, scenario: Res<Scenario>, mut meshes: ResMut<Assets<Mesh>>, mut materials: ResMut<Assets<ColorMaterial>>) {
    commands.spawn(Camera2dBundle::default());

    for (i, body) in scenario.bodies().enumerate() {
        let radius_screen = (body.radius() as f32).max(1.0) * SCALE;
        let position = body.position();

        commands.spawn((
            MaterialMesh2dBundle {
                mesh: Mesh2dHandle(meshes.add(Circle::new(radius_screen))),
                material: materials.add(ColorMaterial::from(to_color(body.color()))),
                transform: Transform::from_xyz(position.x as f32 * SCALE, position.y as f32 * SCALE, 0.0),
                ..Default::default()
            },
            BodyIndex(i),
        ));
    }
}

fn start_system(keys: Res<ButtonInput<KeyCode>>, mut scenario: ResMut<Scenario>) {
    if keys.just_pressed(KeyCode::Space) && !scenario.is_running() {
        if let Err(e) = scenario.start() {
            error!("could not start simulation: {e}");
        }
    }
}

fn physics_step_system(mut scenario: ResMut<Scenario>, mut frame: ResMut<Frame>) {
    if !scenario.is_running() {
        return;
    }

    frame.0.clear();
    if let Err(e) = scenario.step(&mut frame.0) {
        error!("simulation step failed: {e}");
    }
}

fn sync_transforms_system(frame: Res<Frame>, mut query: Query<(&BodyIndex, &mut Transform)>) {
    for (BodyIndex(i), mut transform) in &mut query {
        if let Some(b) = frame.0.get(*i) {
            transform.translation.x = b.position.x as f32 * SCALE;
            transform.translation.y = b.position.y as f32 * SCALE;
        }
    }
}
