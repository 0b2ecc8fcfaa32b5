use glam::{Mat4, Vec3};

use crate::coords::Viewport;
use crate::scene::{Transform, TransformArena};

/// Projection parameters. Angles are in radians.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Projection {
    Orthographic {
        left: f32,
        right: f32,
        bottom: f32,
        top: f32,
        near: f32,
        far: f32,
    },
    Perspective {
        fov_y: f32,
        aspect: f32,
        near: f32,
        far: f32,
    },
}

/// View + projection source for batch draws.
///
/// `proj` and `view` are cached. They change only through
/// [`update_projection`](Self::update_projection) and
/// [`update_view`](Self::update_view), which callers run after editing
/// `projection` or `transform` and before flushing.
#[derive(Debug, Clone)]
pub struct Camera {
    pub transform: Transform,
    pub projection: Projection,
    proj: Mat4,
    view: Mat4,
}

impl Camera {
    pub fn new(projection: Projection) -> Self {
        let mut camera = Self {
            transform: Transform::new(),
            projection,
            proj: Mat4::IDENTITY,
            view: Mat4::IDENTITY,
        };
        camera.update_projection();
        camera
    }

    /// Screen-space camera: `(0, 0)` top-left, `(width, height)` bottom-right.
    pub fn orthographic_2d(width: f32, height: f32) -> Self {
        Self::new(Projection::Orthographic {
            left: 0.0,
            right: width,
            bottom: height,
            top: 0.0,
            near: -1.0,
            far: 1.0,
        })
    }

    pub fn perspective(fov_y: f32, aspect: f32, near: f32, far: f32) -> Self {
        Self::new(Projection::Perspective { fov_y, aspect, near, far })
    }

    pub fn update_projection(&mut self) {
        self.proj = match self.projection {
            Projection::Orthographic { left, right, bottom, top, near, far } => {
                Mat4::orthographic_rh(left, right, bottom, top, near, far)
            }
            Projection::Perspective { fov_y, aspect, near, far } => {
                Mat4::perspective_rh(fov_y, aspect, near, far)
            }
        };
    }

    /// Recomputes the view matrix from the camera transform.
    ///
    /// `scene` resolves the transform's parent chain; pass an empty arena for
    /// a free-standing camera.
    pub fn update_view(&mut self, scene: &TransformArena) {
        let eye = scene.global_position(&self.transform);
        let forward = scene.forward(&self.transform);
        let up = scene.up(&self.transform);
        self.view = Mat4::look_at_rh(eye, eye + forward, up);
    }

    /// Refits the projection to a new framebuffer size.
    ///
    /// Orthographic cameras span the viewport in pixels; perspective cameras
    /// only take the new aspect ratio.
    pub fn resize(&mut self, viewport: Viewport) {
        if !viewport.is_valid() {
            return;
        }

        match &mut self.projection {
            Projection::Orthographic { right, bottom, .. } => {
                *right = viewport.width;
                *bottom = viewport.height;
            }
            Projection::Perspective { aspect, .. } => *aspect = viewport.aspect(),
        }
        self.update_projection();
    }

    #[inline]
    pub fn proj(&self) -> Mat4 {
        self.proj
    }

    #[inline]
    pub fn view(&self) -> Mat4 {
        self.view
    }

    #[inline]
    pub fn view_proj(&self) -> Mat4 {
        self.proj * self.view
    }

    /// Eye position used by the last `update_view`.
    pub fn eye(&self) -> Vec3 {
        self.view.inverse().w_axis.truncate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-4
    }

    // ── orthographic ──────────────────────────────────────────────────────

    #[test]
    fn ortho_2d_maps_pixels_to_clip_space() {
        let mut cam = Camera::orthographic_2d(800.0, 600.0);
        cam.update_view(&TransformArena::new());

        let vp = cam.view_proj();
        assert!(approx(vp.project_point3(Vec3::new(0.0, 0.0, 0.0)), Vec3::new(-1.0, 1.0, 0.5)));
        assert!(approx(vp.project_point3(Vec3::new(800.0, 600.0, 0.0)), Vec3::new(1.0, -1.0, 0.5)));
    }

    #[test]
    fn matrices_change_only_on_explicit_update() {
        let mut cam = Camera::orthographic_2d(100.0, 100.0);
        let before = cam.proj();

        cam.projection = Projection::Orthographic {
            left: 0.0,
            right: 200.0,
            bottom: 200.0,
            top: 0.0,
            near: -1.0,
            far: 1.0,
        };
        assert_eq!(cam.proj(), before);

        cam.update_projection();
        assert_ne!(cam.proj(), before);
    }

    #[test]
    fn resize_refits_orthographic_extent() {
        let mut cam = Camera::orthographic_2d(100.0, 100.0);
        cam.resize(Viewport::new(320.0, 240.0));
        assert_eq!(
            cam.projection,
            Projection::Orthographic {
                left: 0.0,
                right: 320.0,
                bottom: 240.0,
                top: 0.0,
                near: -1.0,
                far: 1.0,
            }
        );

        cam.resize(Viewport::new(0.0, 10.0));
        assert!(matches!(cam.projection, Projection::Orthographic { right, .. } if right == 320.0));
    }

    // ── view ──────────────────────────────────────────────────────────────

    #[test]
    fn view_follows_transform_position() {
        let mut cam = Camera::perspective(1.0, 1.5, 0.1, 100.0);
        cam.transform.position = Vec3::new(3.0, 4.0, 5.0);
        cam.update_view(&TransformArena::new());

        assert!(approx(cam.eye(), Vec3::new(3.0, 4.0, 5.0)));
        // Points straight ahead (-Z) land on the view axis.
        let ahead = cam.view().transform_point3(Vec3::new(3.0, 4.0, 0.0));
        assert!(approx(ahead, Vec3::new(0.0, 0.0, -5.0)));
    }

    #[test]
    fn view_resolves_parent_chain() {
        let mut scene = TransformArena::new();
        let rig = scene.insert(Transform::from_position(Vec3::new(10.0, 0.0, 0.0)));

        let mut cam = Camera::perspective(1.0, 1.0, 0.1, 100.0);
        let mut t = Transform::from_position(Vec3::new(0.0, 2.0, 0.0));
        let child = scene.insert(t);
        scene.set_parent(child, Some(rig));
        t = *scene.get(child).unwrap();
        cam.transform = t;

        cam.update_view(&scene);
        assert!(approx(cam.eye(), Vec3::new(10.0, 2.0, 0.0)));
    }
}
