use crate::core::CameraRig;
use bevy::prelude::*;

/// Marker for every scene node installed by a rebuild (mass volumes, site
/// overlay, outline loop). The registry in `resources.rs` holds the only
/// strong references; nothing else may retain these entities.
#[derive(Component)]
pub struct MassNode;

/// Marker for the ground plane, built once at startup and never rebuilt.
#[derive(Component)]
pub struct GroundPlane;

/// Orbit camera state: the damped current pose plus the goal pose the
/// latest pointer input asked for. Clamps are applied when goals are
/// written, so the current pose can never settle outside them.
#[derive(Component, Clone, Copy, Debug)]
pub struct OrbitCamera {
    pub target: Vec3,
    pub radius: f32,
    pub yaw: f32,
    /// Polar angle from straight up, radians.
    pub polar: f32,
    pub goal_target: Vec3,
    pub goal_radius: f32,
    pub goal_yaw: f32,
    pub goal_polar: f32,
    pub min_radius: f32,
    pub max_radius: f32,
    pub max_polar: f32,
    pub damping: f32,
    pub orbit_speed: f32,
    pub pan_speed: f32,
}

impl OrbitCamera {
    /// Build the orbit state whose pose matches the rig's configured
    /// position and target.
    pub fn from_rig(rig: &CameraRig) -> Self {
        let target = Vec3::from_array(rig.target);
        let offset = Vec3::from_array(rig.position) - target;
        let radius = offset.length().max(f32::EPSILON);
        let polar = (offset.y / radius).clamp(-1.0, 1.0).acos();
        let yaw = offset.x.atan2(offset.z);

        Self {
            target,
            radius,
            yaw,
            polar,
            goal_target: target,
            goal_radius: radius,
            goal_yaw: yaw,
            goal_polar: polar,
            min_radius: rig.min_distance,
            max_radius: rig.max_distance,
            max_polar: rig.max_polar_angle,
            damping: rig.damping,
            orbit_speed: 0.005,
            pan_speed: 0.002,
        }
    }

    /// Camera position for a given pose around the target.
    pub fn position(target: Vec3, radius: f32, yaw: f32, polar: f32) -> Vec3 {
        let dir = Vec3::new(polar.sin() * yaw.sin(), polar.cos(), polar.sin() * yaw.cos());
        target + dir * radius
    }

    /// Wheel zoom: scales the goal distance, clamped to the rig's range.
    pub fn zoom(&mut self, scroll: f32) {
        self.goal_radius =
            (self.goal_radius * (1.0 - scroll * 0.1)).clamp(self.min_radius, self.max_radius);
    }

    /// Left-drag orbit around the target. The polar goal is clamped to
    /// (0, max_polar]; the tiny floor keeps look_at well-defined at the
    /// pole.
    pub fn orbit(&mut self, delta: Vec2) {
        self.goal_yaw -= delta.x * self.orbit_speed;
        self.goal_polar = (self.goal_polar - delta.y * self.orbit_speed).clamp(1e-3, self.max_polar);
    }

    /// Right-drag pan: moves the orbit target in the ground plane,
    /// scaled by distance so screen-space speed stays constant.
    pub fn pan(&mut self, delta: Vec2) {
        let right = Vec3::new(self.goal_yaw.cos(), 0.0, -self.goal_yaw.sin());
        let forward = Vec3::new(self.goal_yaw.sin(), 0.0, self.goal_yaw.cos());
        self.goal_target += (-right * delta.x + forward * delta.y) * self.pan_speed * self.goal_radius;
    }

    /// Advance the damped pose one frame toward the goals and return the
    /// new camera position. A fixed per-frame factor, like the source
    /// viewer's controls: smoothness independent of input frequency.
    pub fn step(&mut self) -> Vec3 {
        let k = self.damping;
        self.yaw += (self.goal_yaw - self.yaw) * k;
        self.polar += (self.goal_polar - self.polar) * k;
        self.radius += (self.goal_radius - self.radius) * k;
        self.target = self.target.lerp(self.goal_target, k);
        Self::position(self.target, self.radius, self.yaw, self.polar)
    }
}
