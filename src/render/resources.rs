use super::components::{GroundPlane, OrbitCamera};
use crate::core::{MeshDescription, ViewerConfig};
use bevy::prelude::*;
use bevy_camera::{PerspectiveProjection, Projection};

/// The massing option currently on display. Replaced wholesale (never
/// mutated in place) when the user selects a different option; the rebuild
/// system reacts to the change.
#[derive(Resource, Clone, Default)]
pub struct MassSceneRes(pub Option<MeshDescription>);

#[derive(Resource, Clone, Default)]
pub struct ViewerConfigRes(pub ViewerConfig);

/// The only strong references to the mass/overlay entities of the most
/// recent rebuild. Ground, lights, and camera are not registered here and
/// survive rebuilds untouched.
#[derive(Resource, Default)]
pub struct SceneRegistry {
    pub nodes: Vec<Entity>,
}

/// Shared material handles, one per material tag, created once at startup.
#[derive(Resource)]
pub struct ScenePalette {
    pub mass: Handle<StandardMaterial>,
    pub site_fill: Handle<StandardMaterial>,
    pub site_edge: Handle<StandardMaterial>,
    pub ground: Handle<StandardMaterial>,
}

/// Build the fixed part of the scene: palette, ground plane, lights, and
/// the orbit camera. Runs once; rebuilds never touch these entities.
pub fn setup_scene(
    mut commands: Commands,
    config: Res<ViewerConfigRes>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let config = &config.0;

    let palette = ScenePalette {
        mass: materials.add(StandardMaterial {
            base_color: config.mass_color.into(),
            perceptual_roughness: 0.8,
            ..default()
        }),
        site_fill: materials.add(StandardMaterial {
            base_color: config.site_fill_color.into(),
            alpha_mode: AlphaMode::Blend,
            perceptual_roughness: 1.0,
            ..default()
        }),
        site_edge: materials.add(StandardMaterial {
            base_color: config.site_edge_color.into(),
            unlit: true,
            ..default()
        }),
        ground: materials.add(StandardMaterial {
            base_color: config.ground_color.into(),
            perceptual_roughness: 1.0,
            ..default()
        }),
    };

    commands.spawn((
        Name::new("ground"),
        GroundPlane,
        Mesh3d(meshes.add(Plane3d::default().mesh().size(config.ground_extent, config.ground_extent))),
        MeshMaterial3d(palette.ground.clone()),
        Transform::default(),
    ));

    commands.spawn((
        Name::new("key_light"),
        DirectionalLight {
            illuminance: 12_000.0,
            ..default()
        },
        Transform::from_xyz(25.0, 48.0, 22.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));
    commands.insert_resource(AmbientLight {
        brightness: 300.0,
        ..default()
    });

    let rig = OrbitCamera::from_rig(&config.rig);
    let position = OrbitCamera::position(rig.target, rig.radius, rig.yaw, rig.polar);
    commands.spawn((
        Name::new("orbit_cam"),
        rig,
        Camera3d::default(),
        Projection::from(PerspectiveProjection {
            fov: config.rig.fov_deg.to_radians(),
            near: 0.1,
            far: 1000.0,
            ..default()
        }),
        Transform::from_translation(position).looking_at(rig.target, Vec3::Y),
    ));

    commands.insert_resource(palette);
}
