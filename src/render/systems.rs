use super::components::OrbitCamera;
use super::draw::spawn_primitive;
use super::resources::{MassSceneRes, ScenePalette, SceneRegistry};
use crate::synth::synthesize;
use bevy::input::mouse::{MouseMotion, MouseWheel};
use bevy::prelude::*;

/// Rebuild the mass/overlay nodes whenever the description changes.
///
/// Every previously installed node is despawned before the new set is
/// spawned, so the live node set always corresponds exactly to the most
/// recent description. Ground, lights, and camera are untouched. Running
/// this twice for the same description is a full teardown + identical
/// rebuild: no duplication, no leak.
pub fn rebuild_mass_nodes(
    mut commands: Commands,
    scene: Res<MassSceneRes>,
    mut registry: ResMut<SceneRegistry>,
    palette: Option<Res<ScenePalette>>,
    mut meshes: ResMut<Assets<Mesh>>,
) {
    if !scene.is_changed() {
        return;
    }
    let Some(palette) = palette else {
        return;
    };

    for entity in registry.nodes.drain(..) {
        commands.entity(entity).try_despawn();
    }

    for prim in synthesize(scene.0.as_ref()) {
        if let Some(entity) = spawn_primitive(&mut commands, &prim, &palette, &mut meshes) {
            registry.nodes.push(entity);
        }
    }
}

/// Turn pointer input into orbit goals: left-drag orbits, right-drag pans,
/// wheel zooms. Clamps are applied here, at goal-write time.
pub fn handle_orbit_input(
    mut cameras: Query<&mut OrbitCamera>,
    mouse: Res<ButtonInput<MouseButton>>,
    mut wheel: MessageReader<MouseWheel>,
    mut motion: MessageReader<MouseMotion>,
) {
    let mut scroll = 0.0;
    for event in wheel.read() {
        scroll += event.y;
    }

    let mut drag = Vec2::ZERO;
    for event in motion.read() {
        drag += event.delta;
    }

    if scroll == 0.0 && drag == Vec2::ZERO {
        return;
    }

    for mut cam in cameras.iter_mut() {
        if scroll != 0.0 {
            cam.zoom(scroll);
        }
        if drag != Vec2::ZERO && mouse.pressed(MouseButton::Left) {
            cam.orbit(drag);
        }
        if drag != Vec2::ZERO && mouse.pressed(MouseButton::Right) {
            cam.pan(drag);
        }
    }
}

/// Move each camera pose a fixed fraction toward its input goals and
/// write the transform.
pub fn damp_orbit_camera(mut cameras: Query<(&mut OrbitCamera, &mut Transform)>) {
    for (mut cam, mut transform) in cameras.iter_mut() {
        let position = cam.step();
        *transform = Transform::from_translation(position).looking_at(cam.target, Vec3::Y);
    }
}
