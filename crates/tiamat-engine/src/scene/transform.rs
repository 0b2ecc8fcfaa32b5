use glam::{EulerRot, Mat4, Quat, Vec3};

use super::TransformId;

/// Local position / rotation / scale with an optional parent link.
///
/// The parent is only set through [`TransformArena::set_parent`](super::TransformArena::set_parent),
/// which validates the handle and rejects cycles.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
    pub(super) parent: Option<TransformId>,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
            parent: None,
        }
    }
}

impl Transform {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn from_position(position: Vec3) -> Self {
        Self { position, ..Self::default() }
    }

    #[inline]
    pub fn parent(&self) -> Option<TransformId> {
        self.parent
    }

    /// `translation * rotation * scale`.
    #[inline]
    pub fn local_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.position)
    }

    /// Replaces the rotation with `angle` radians around `axis`.
    pub fn set_rotation(&mut self, axis: Vec3, angle: f32) {
        self.rotation = Quat::from_axis_angle(axis.normalize_or_zero(), angle);
    }

    /// Replaces the rotation from Euler angles in radians.
    ///
    /// Applied as yaw (Y), then pitch (X), then roll (Z).
    pub fn set_rotation_euler(&mut self, pitch: f32, yaw: f32, roll: f32) {
        self.rotation = Quat::from_euler(EulerRot::YXZ, yaw, pitch, roll);
    }

    /// Pre-multiplies the current rotation by `angle` radians around `axis`.
    pub fn rotate(&mut self, axis: Vec3, angle: f32) {
        let delta = Quat::from_axis_angle(axis.normalize_or_zero(), angle);
        self.rotation = (delta * self.rotation).normalize();
    }
}
