use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }
    pub const fn with_a(self, a: f32) -> Self {
        Self { a, ..self }
    }

    // The default viewer palette (slate / sky tones)
    pub const BACKGROUND: Self = Self::rgb(0.945, 0.961, 0.976);
    pub const GROUND: Self = Self::rgb(0.859, 0.886, 0.918);
    pub const MASS: Self = Self::rgb(0.055, 0.647, 0.914);
    pub const SITE_FILL: Self = Self::rgb(0.812, 0.847, 0.875);
    pub const SITE_EDGE: Self = Self::rgb(0.059, 0.090, 0.165);
}

impl From<Color> for bevy::prelude::Color {
    #[inline]
    fn from(c: Color) -> Self {
        bevy::prelude::Color::srgba(c.r, c.g, c.b, c.a)
    }
}

/// One vertically placed volume of a stacked massing option.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub width: f32,
    pub depth: f32,
    pub height: f32,
    pub base_y: f32,
}

/// One rectangular mass of a multi-block massing option, at an explicit
/// plan position.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub x: f32,
    pub z: f32,
    pub width: f32,
    pub depth: f32,
    pub height: f32,
}

/// Typed description of one building-massing option, exactly as the
/// evaluation service delivers it (`mesh_payload`). A description is
/// immutable once received; selecting a different option replaces it
/// wholesale.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MeshDescription {
    /// Single rectangular mass.
    Box {
        width: f32,
        depth: f32,
        height: f32,
        #[serde(default)]
        origin: [f32; 3],
    },
    /// Vertically stacked volumes, each at its own base elevation.
    Stacked {
        segments: Vec<Segment>,
        #[serde(default)]
        origin: [f32; 3],
    },
    /// Outer rectangle with a concentric rectangular void.
    Courtyard {
        outer_width: f32,
        outer_depth: f32,
        inner_width: f32,
        inner_depth: f32,
        height: f32,
        #[serde(default)]
        origin: [f32; 3],
    },
    /// Independent masses at explicit plan positions, optionally overlaid
    /// on a site outline ring.
    MultiBlock {
        blocks: Vec<Block>,
        #[serde(default)]
        site_outline: Vec<[f32; 2]>,
        #[serde(default)]
        origin: [f32; 3],
    },
}

/// Orbit camera configuration: where the camera starts, what it circles,
/// and how far/low it is allowed to go.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct CameraRig {
    /// Vertical field of view in degrees.
    pub fov_deg: f32,
    pub position: [f32; 3],
    pub target: [f32; 3],
    pub min_distance: f32,
    pub max_distance: f32,
    /// Polar angle ceiling in radians, measured from straight up.
    pub max_polar_angle: f32,
    /// Per-frame interpolation factor toward the latest input goals.
    pub damping: f32,
}

impl Default for CameraRig {
    fn default() -> Self {
        Self {
            fov_deg: 44.0,
            position: [36.0, 34.0, 52.0],
            target: [0.0, 12.0, 0.0],
            min_distance: 18.0,
            max_distance: 180.0,
            max_polar_angle: std::f32::consts::PI / 2.05,
            damping: 0.08,
        }
    }
}

/// Visual configuration for a viewer instance. All fields have defaults
/// matching the hosted planning dashboard, so `ViewerConfig::default()`
/// is the common case.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ViewerConfig {
    pub background: Color,
    pub ground_color: Color,
    pub mass_color: Color,
    pub site_fill_color: Color,
    pub site_edge_color: Color,
    /// Side length of the square ground plane, in meters.
    pub ground_extent: f32,
    pub rig: CameraRig,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            background: Color::BACKGROUND,
            ground_color: Color::GROUND,
            mass_color: Color::MASS,
            site_fill_color: Color::SITE_FILL.with_a(0.9),
            site_edge_color: Color::SITE_EDGE,
            ground_extent: 180.0,
            rig: CameraRig::default(),
        }
    }
}
