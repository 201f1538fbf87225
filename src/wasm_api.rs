//! WASM API exports for JavaScript interop
//!
//! This module provides `#[wasm_bindgen]` exports for embedding the
//! massing viewer in a web page. It is only compiled when targeting
//! wasm32.

#![cfg(target_arch = "wasm32")]

use parking_lot::Mutex;
use std::sync::Arc;
use wasm_bindgen::prelude::*;

use crate::core::{MeshDescription, ViewerConfig};
use crate::metrics;
use crate::runtime::run_viewer;

/// JavaScript-accessible viewer wrapper
#[wasm_bindgen]
pub struct JsViewer {
    /// The massing option awaiting display
    mesh: Arc<Mutex<Option<MeshDescription>>>,
    /// Canvas ID for rendering
    canvas_id: String,
    /// Whether the Bevy app has started
    started: bool,
}

#[wasm_bindgen]
impl JsViewer {
    /// Create a new JsViewer from a mesh payload
    ///
    /// # Arguments
    /// * `mesh_json` - JSON string of the `mesh_payload`, or null for an
    ///   empty scene (ground and lights only)
    /// * `canvas_id` - HTML canvas element ID (without #)
    #[wasm_bindgen(constructor)]
    pub fn new(mesh_json: Option<String>, canvas_id: &str) -> Result<JsViewer, JsValue> {
        let mesh = match mesh_json {
            Some(json) => Some(
                serde_json::from_str(&json)
                    .map_err(|e| JsValue::from_str(&format!("Failed to parse mesh JSON: {}", e)))?,
            ),
            None => None,
        };

        Ok(JsViewer {
            mesh: Arc::new(Mutex::new(mesh)),
            canvas_id: canvas_id.to_string(),
            started: false,
        })
    }

    /// Start the Bevy render loop
    ///
    /// This should only be called once; the frame loop then runs until the
    /// page releases the canvas.
    #[wasm_bindgen]
    pub fn start(&mut self) {
        if self.started {
            web_sys::console::warn_1(&"Viewer already started".into());
            return;
        }

        let mesh = self.mesh.lock().clone();
        self.started = true;

        if let Err(report) = run_viewer(ViewerConfig::default(), mesh, &self.canvas_id) {
            web_sys::console::warn_1(&format!("Viewer failed to start: {report:?}").into());
        }
    }

    /// Replace the displayed massing option
    #[wasm_bindgen]
    pub fn set_mesh(&mut self, mesh_json: Option<String>) -> Result<(), JsValue> {
        let mesh = match mesh_json {
            Some(json) => Some(
                serde_json::from_str(&json)
                    .map_err(|e| JsValue::from_str(&format!("Failed to parse mesh JSON: {}", e)))?,
            ),
            None => None,
        };

        *self.mesh.lock() = mesh;

        if self.started {
            // TODO: route hot swaps into the running app via a channel so
            // an option change does not need a viewer restart
            web_sys::console::log_1(&"Mesh updated (requires restart to take effect)".into());
        }

        Ok(())
    }

    /// Get the canvas ID
    #[wasm_bindgen(getter)]
    pub fn canvas_id(&self) -> String {
        self.canvas_id.clone()
    }

    /// Check if the viewer has been started
    #[wasm_bindgen(getter)]
    pub fn is_started(&self) -> bool {
        self.started
    }
}

/// Measure a drawn site polygon ring
///
/// # Arguments
/// * `coords` - Flat array of [lon1, lat1, lon2, lat2, ...] forming a
///   closed ring (last pair repeating the first)
///
/// Returns `{"vertices": N, "areaM2": A}` as JSON.
#[wasm_bindgen]
pub fn measure_site_polygon(coords: &[f64]) -> Result<String, JsValue> {
    if coords.len() % 2 != 0 {
        return Err(JsValue::from_str(
            "Coordinate array length must be even (lon,lat pairs)",
        ));
    }

    let ring: Vec<[f64; 2]> = coords.chunks(2).map(|pair| [pair[0], pair[1]]).collect();
    let facts = metrics::measure(&ring);

    serde_json::to_string(&facts)
        .map_err(|e| JsValue::from_str(&format!("Failed to serialize metrics: {}", e)))
}
