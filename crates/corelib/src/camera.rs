use asset::Bounds;

use crate::{Mat4, Vec3, vec3};

/// Simple perspective camera (right-handed).
#[derive(Clone, Copy, Debug)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub fov_y_rad: f32,
    pub z_near: f32,
    pub z_far: f32,
    pub aspect: f32,
}

impl Camera {
    pub const DEFAULT_FOV_Y_DEG: f32 = 45.0;
    pub const Z_NEAR: f32 = 0.1;

    #[allow(clippy::too_many_arguments)]
    pub fn new_perspective(
        eye: Vec3,
        target: Vec3,
        up: Vec3,
        fov_y_rad: f32,
        z_near: f32,
        z_far: f32,
        aspect: f32,
    ) -> Self {
        Self {
            eye,
            target,
            up,
            fov_y_rad,
            z_near,
            z_far,
            aspect,
        }
    }

    /// Camera on +Z looking at the origin, far enough back that a mesh with
    /// these bounds (recentered on the origin) fits comfortably.
    pub fn framing(bounds: &Bounds, fov_y_rad: f32, aspect: f32) -> Self {
        let distance = framing_distance(bounds, fov_y_rad);
        Self::new_perspective(
            vec3(0.0, 0.0, distance),
            Vec3::ZERO,
            Vec3::Y,
            fov_y_rad,
            Self::Z_NEAR,
            (distance * 3.0).max(Self::Z_NEAR * 10.0),
            aspect,
        )
    }

    #[inline]
    pub fn distance(&self) -> f32 {
        self.eye.distance(self.target)
    }

    #[inline]
    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    /// OpenGL-style projection (z in [-1, 1]).
    #[inline]
    pub fn proj(&self) -> Mat4 {
        Mat4::perspective_rh_gl(
            self.fov_y_rad,
            self.aspect.max(1e-6),
            self.z_near,
            self.z_far,
        )
    }

    #[inline]
    pub fn proj_view(&self) -> Mat4 {
        self.proj() * self.view()
    }

    #[inline]
    pub fn with_aspect(mut self, aspect: f32) -> Self {
        self.aspect = aspect;
        self
    }
}

/// `height * 4 / tan(fov)`, where height is the Y extent (or the largest
/// extent for meshes flat in Y, or 1). The fov is clamped to [1, 89] degrees
/// and the eye never sits closer than twice the bounding radius, so the mesh
/// stays in front of the near plane for wide angles.
fn framing_distance(bounds: &Bounds, fov_y_rad: f32) -> f32 {
    let extent = bounds.extent();
    let height = if extent.y > 0.0 {
        extent.y
    } else if extent.max_element() > 0.0 {
        extent.max_element()
    } else {
        1.0
    };
    let fov = fov_y_rad.clamp(1f32.to_radians(), 89f32.to_radians());
    let radius = extent.length() * 0.5;
    (height * 4.0 / fov.tan()).max(2.0 * radius + Camera::Z_NEAR)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fov() -> f32 {
        Camera::DEFAULT_FOV_Y_DEG.to_radians()
    }

    #[test]
    fn framing_distance_scales_with_height() {
        let b = Bounds::new(vec3(-1.0, -0.5, -1.0), vec3(1.0, 0.5, 1.0));
        let cam = Camera::framing(&b, fov(), 4.0 / 3.0);
        // tan(45 deg) == 1, so distance is 4 * height.
        assert!((cam.distance() - 4.0).abs() < 1e-4);
        assert!((cam.z_far - 12.0).abs() < 1e-3);
        assert_eq!(cam.target, Vec3::ZERO);
    }

    #[test]
    fn flat_mesh_falls_back_to_widest_extent() {
        let b = Bounds::new(vec3(0.0, 0.0, 0.0), vec3(2.0, 0.0, 1.0));
        assert!((framing_distance(&b, fov()) - 8.0).abs() < 1e-3);
        assert!((framing_distance(&Bounds::default(), fov()) - 4.0).abs() < 1e-3);
    }

    #[test]
    fn view_is_pull_back_along_z() {
        let b = Bounds::new(Vec3::splat(-0.5), Vec3::splat(0.5));
        let cam = Camera::framing(&b, fov(), 1.0);
        let p = cam.view().transform_point3(Vec3::ZERO);
        assert!(p.abs_diff_eq(vec3(0.0, 0.0, -cam.distance()), 1e-5));
    }

    #[test]
    fn wide_fov_keeps_mesh_in_front_of_camera() {
        let b = Bounds::new(Vec3::splat(-0.5), Vec3::splat(0.5));
        for deg in [89.0f32, 90.0, 120.0, 179.0] {
            let cam = Camera::framing(&b, deg.to_radians(), 1.0);
            assert!(cam.eye.z > 0.0, "{deg}: eye {}", cam.eye);
            assert!(cam.distance().is_finite());
            // Every corner of the box lands inside the depth range.
            for corner in [b.min, b.max, vec3(0.5, -0.5, 0.5), vec3(-0.5, 0.5, -0.5)] {
                let ndc = cam.proj_view().project_point3(corner);
                assert!(ndc.z > -1.0 && ndc.z < 1.0, "{deg}: {corner} -> {ndc}");
            }
        }
    }

    #[test]
    fn camera_pv_is_finite() {
        let cam = Camera::framing(&Bounds::default(), fov(), 16.0 / 9.0).with_aspect(0.0);
        let a = cam.proj_view().to_cols_array();
        assert!(a.iter().all(|f| f.is_finite()));
    }
}
