pub mod components;
pub mod draw;
pub mod resources;
pub mod systems;

pub use components::*;
pub use draw::spawn_primitive;
pub use resources::*;
use systems::*;

use bevy::input::mouse::{MouseMotion, MouseWheel};
use bevy::prelude::*;

/// Scene lifecycle and interaction for one massing viewer: fixed ground /
/// lights / orbit camera at startup, then mass-node rebuilds driven by
/// `MassSceneRes` changes and damped orbit input every frame.
///
/// Message and input resources are registered guardedly so the plugin
/// works both under `DefaultPlugins` and in a headless app.
#[derive(Default)]
pub struct MassRenderPlugin;

impl Plugin for MassRenderPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<MassSceneRes>()
            .init_resource::<ViewerConfigRes>()
            .init_resource::<SceneRegistry>()
            .init_resource::<ButtonInput<MouseButton>>()
            .add_message::<MouseWheel>()
            .add_message::<MouseMotion>()
            .add_systems(Startup, setup_scene)
            .add_systems(
                Update,
                (
                    rebuild_mass_nodes,
                    (handle_orbit_input, damp_orbit_camera).chain(),
                ),
            );
    }
}
