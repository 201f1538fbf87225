//! Viewport lifecycle: surface ownership, the per-frame loop, and
//! teardown.
//!
//! A `Viewport` owns exactly one Bevy `App` (scene graph, render surface,
//! input bindings). Frame advancement is an explicit operation (`tick`),
//! which is what makes the rebuild/dispose logic testable without a real
//! display; the windowed runners hand the same app to the platform event
//! loop instead.

use crate::MassviewError;
use crate::core::{MeshDescription, ViewerConfig};
use crate::render::{MassNode, MassRenderPlugin, MassSceneRes, ViewerConfigRes};
use bevy::asset::{AssetApp, AssetPlugin};
use bevy::image::Image;
use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use error_stack::Report;

/// Surface parameters for a windowed viewer.
#[derive(Clone, Debug)]
pub struct ViewportConfig {
    pub viewer: ViewerConfig,
    /// Initial surface size in logical pixels.
    pub width: f32,
    pub height: f32,
    /// Canvas element id to bind to (wasm targets; ignored elsewhere).
    pub canvas: Option<String>,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            viewer: ViewerConfig::default(),
            width: 960.0,
            height: 540.0,
            canvas: None,
        }
    }
}

/// One live visualization. States: created (windowed or headless) ->
/// disposed (terminal). All operations after disposal are no-ops.
pub struct Viewport {
    app: Option<App>,
}

impl Viewport {
    /// Create a windowed viewport sized to the given surface and showing
    /// the initial description.
    ///
    /// Invalid surface parameters fail here with nothing acquired; surface
    /// loss after a successful initialize surfaces through the render
    /// backend. Retrying is the caller's concern.
    pub fn initialize(
        config: ViewportConfig,
        initial_mesh: Option<MeshDescription>,
    ) -> crate::Result<Self> {
        if !config.width.is_finite()
            || !config.height.is_finite()
            || config.width <= 0.0
            || config.height <= 0.0
        {
            return Err(Report::new(MassviewError).attach_printable(format!(
                "invalid surface size {}x{}",
                config.width, config.height
            )));
        }

        let bg = config.viewer.background;
        let mut app = App::new();
        app.insert_resource(ClearColor(bg.into()))
            .insert_resource(ViewerConfigRes(config.viewer))
            .insert_resource(MassSceneRes(initial_mesh))
            .add_plugins((
                DefaultPlugins.set(WindowPlugin {
                    primary_window: Some(Window {
                        title: "massview".into(),
                        resolution: (config.width as u32, config.height as u32).into(),
                        canvas: config.canvas.map(|id| format!("#{id}")),
                        fit_canvas_to_parent: true,
                        ..default()
                    }),
                    ..default()
                }),
                MassRenderPlugin,
            ));

        Ok(Self { app: Some(app) })
    }

    /// Create a viewport with no window or GPU attached: the same scene,
    /// rebuild, and camera systems, driven purely by `tick`. This is the
    /// deterministic form used by tests and CI.
    pub fn headless(initial_mesh: Option<MeshDescription>) -> Self {
        let mut app = App::new();
        app.insert_resource(ViewerConfigRes(ViewerConfig::default()))
            .insert_resource(MassSceneRes(initial_mesh))
            .add_plugins((MinimalPlugins, AssetPlugin::default()))
            .init_asset::<Mesh>()
            .init_asset::<Image>()
            .init_asset::<StandardMaterial>()
            .add_plugins(MassRenderPlugin);

        Self { app: Some(app) }
    }

    /// Replace the displayed description. Synchronous: the next `tick`
    /// tears down the previous nodes and installs the new ones.
    pub fn update_mesh(&mut self, mesh: Option<MeshDescription>) {
        if let Some(app) = self.app.as_mut() {
            app.insert_resource(MassSceneRes(mesh));
        }
    }

    /// Reconcile the surface with a new container size. Camera aspect
    /// follows the window resolution.
    pub fn resize(&mut self, width: f32, height: f32) {
        let Some(app) = self.app.as_mut() else {
            return;
        };
        if !width.is_finite() || !height.is_finite() || width <= 0.0 || height <= 0.0 {
            return;
        }
        let mut windows = app
            .world_mut()
            .query_filtered::<&mut Window, With<PrimaryWindow>>();
        if let Ok(mut window) = windows.single_mut(app.world_mut()) {
            window.resolution.set(width, height);
        }
    }

    /// Advance exactly one frame: input, camera damping, rebuild, render.
    /// No-op once disposed, so no frame ever runs after teardown.
    pub fn tick(&mut self) {
        if let Some(app) = self.app.as_mut() {
            app.update();
        }
    }

    /// Hand the app to the platform event loop (winit window or wasm
    /// canvas), consuming the viewport. Returns when the loop exits.
    pub fn run(mut self) {
        if let Some(mut app) = self.app.take() {
            app.run();
        }
    }

    /// Release everything this viewport owns: scene nodes and their GPU
    /// buffers, the render surface, and input bindings. Idempotent;
    /// calling it again (or dropping afterwards) is a no-op.
    pub fn dispose(&mut self) {
        self.app = None;
    }

    pub fn is_disposed(&self) -> bool {
        self.app.is_none()
    }

    /// Number of live mass/overlay nodes. Zero before the first tick and
    /// after disposal.
    pub fn mass_node_count(&mut self) -> usize {
        let Some(app) = self.app.as_mut() else {
            return 0;
        };
        let mut nodes = app.world_mut().query_filtered::<(), With<MassNode>>();
        nodes.iter(app.world()).count()
    }
}

/// Open a native viewer window for one massing option and block on its
/// event loop.
#[cfg(not(target_arch = "wasm32"))]
pub fn run_viewer(config: ViewerConfig, mesh: Option<MeshDescription>) -> crate::Result<()> {
    let viewport = Viewport::initialize(
        ViewportConfig {
            viewer: config,
            ..ViewportConfig::default()
        },
        mesh,
    )?;
    viewport.run();
    Ok(())
}

/// Attach a viewer to the given canvas element and start its frame loop.
#[cfg(target_arch = "wasm32")]
pub fn run_viewer(
    config: ViewerConfig,
    mesh: Option<MeshDescription>,
    canvas_id: &str,
) -> crate::Result<()> {
    let viewport = Viewport::initialize(
        ViewportConfig {
            viewer: config,
            canvas: Some(canvas_id.to_string()),
            ..ViewportConfig::default()
        },
        mesh,
    )?;
    viewport.run();
    Ok(())
}
