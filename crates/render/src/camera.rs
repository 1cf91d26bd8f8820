use glam::{Mat4, Vec3};

use crate::renderer::RenderView;
use crate::uniform::UniformSink;

/// Fly camera with position, yaw, pitch and projection parameters.
/// Angles are in radians.
#[derive(Debug, Clone, PartialEq)]
pub struct FlyCamera {
    pub position: Vec3,
    pub world_up: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    pub sensitivity: f32,
}

impl Default for FlyCamera {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            world_up: Vec3::Y,
            yaw: -90.0_f32.to_radians(),
            pitch: 0.0,
            fov: 45.0_f32.to_radians(),
            aspect: 16.0 / 9.0,
            near: 0.1,
            far: 1000.0,
            sensitivity: 0.003,
        }
    }
}

impl FlyCamera {
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    pub fn front(&self) -> Vec3 {
        Vec3::new(
            self.yaw.cos() * self.pitch.cos(),
            self.pitch.sin(),
            self.yaw.sin() * self.pitch.cos(),
        )
        .normalize()
    }

    /// Front direction projected onto the ground plane, unit length.
    pub fn horizontal_front(&self) -> Vec3 {
        Vec3::new(self.yaw.cos(), 0.0, self.yaw.sin())
    }

    pub fn right(&self) -> Vec3 {
        self.front().cross(self.world_up).normalize()
    }

    pub fn up(&self) -> Vec3 {
        self.right().cross(self.front()).normalize()
    }

    pub fn translate(&mut self, delta: Vec3) {
        self.position += delta;
    }

    pub fn rotate(&mut self, dx: f32, dy: f32) {
        self.yaw += dx * self.sensitivity;
        self.pitch -= dy * self.sensitivity;
        self.pitch = self
            .pitch
            .clamp(-89.0_f32.to_radians(), 89.0_f32.to_radians());
    }

    pub fn set_aspect(&mut self, width: u32, height: u32) {
        if height > 0 {
            self.aspect = width as f32 / height as f32;
        }
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.position + self.front(), self.world_up)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov, self.aspect, self.near, self.far)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Write `view`, `projection` and `camera_position`.
    pub fn apply(&self, sink: &mut impl UniformSink) {
        sink.set_mat4("view", self.view_matrix());
        sink.set_mat4("projection", self.projection_matrix());
        sink.set_vec3("camera_position", self.position);
    }

    pub fn view(&self) -> RenderView {
        RenderView {
            eye: self.position,
            target: self.position + self.front(),
            fov_degrees: self.fov.to_degrees(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::uniform::{RecordingSink, UniformValue};

    #[test]
    fn default_camera_looks_down_negative_z() {
        let cam = FlyCamera::default();
        assert!((cam.front() - Vec3::NEG_Z).length() < 1e-6);
        assert!((cam.right() - Vec3::X).length() < 1e-6);
        let vp = cam.view_projection();
        assert!(!vp.col(0).x.is_nan());
    }

    #[test]
    fn horizontal_front_ignores_pitch() {
        let mut cam = FlyCamera::default();
        cam.pitch = 60.0_f32.to_radians();
        let flat = cam.horizontal_front();
        assert_eq!(flat.y, 0.0);
        assert!((flat.length() - 1.0).abs() < 1e-6);
        assert!((flat - Vec3::NEG_Z).length() < 1e-6);
    }

    #[test]
    fn pitch_is_clamped() {
        let mut cam = FlyCamera::default();
        cam.rotate(0.0, -100_000.0);
        assert!(cam.pitch <= 89.0_f32.to_radians());
    }

    #[test]
    fn apply_writes_camera_uniforms() {
        let cam = FlyCamera::at(Vec3::new(1.0, 2.0, 3.0));
        let mut sink = RecordingSink::new();
        cam.apply(&mut sink);
        assert_eq!(
            sink.get("camera_position"),
            Some(UniformValue::Vec3(Vec3::new(1.0, 2.0, 3.0)))
        );
        assert_eq!(sink.get("view"), Some(UniformValue::Mat4(cam.view_matrix())));
        assert!(sink.get("projection").is_some());
    }
}
