//! Incremental model transform anchored at a movable pivot.
//!
//! Every operation is left-multiplied onto the accumulated matrix
//! (`model = op * model`), so each one acts in world space after all the
//! previous ones. Scale and rotation are applied about the current pivot.

use bytemuck::{Pod, Zeroable};

use crate::{Mat3, Mat4, Vec3};

/// Elementary rotation axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    #[inline]
    pub fn unit(self) -> Vec3 {
        match self {
            Axis::X => Vec3::X,
            Axis::Y => Vec3::Y,
            Axis::Z => Vec3::Z,
        }
    }

    /// Right-handed rotation about this axis.
    #[inline]
    pub fn rotation(self, angle_rad: f32) -> Mat4 {
        match self {
            Axis::X => Mat4::from_rotation_x(angle_rad),
            Axis::Y => Mat4::from_rotation_y(angle_rad),
            Axis::Z => Mat4::from_rotation_z(angle_rad),
        }
    }
}

/// Model matrix plus the pivot that scale/rotate act about.
///
/// The pivot only moves with translations; it is never read back out of the
/// matrix.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TransformState {
    model: Mat4,
    pivot: Vec3,
}

impl TransformState {
    /// Start with a translation that moves `center` to the origin, pivot at the origin.
    pub fn new(center: Vec3) -> Self {
        Self {
            model: Mat4::from_translation(-center) * Mat4::IDENTITY,
            pivot: Vec3::ZERO,
        }
    }

    #[inline]
    pub fn model(&self) -> Mat4 {
        self.model
    }

    #[inline]
    pub fn pivot(&self) -> Vec3 {
        self.pivot
    }

    pub fn translate(&mut self, dx: f32, dy: f32, dz: f32) {
        let d = Vec3::new(dx, dy, dz);
        self.apply(Mat4::from_translation(d));
        self.pivot += d;
        log::trace!("translate {d} -> pivot {}", self.pivot);
    }

    pub fn scale(&mut self, sx: f32, sy: f32, sz: f32) {
        log::trace!("scale ({sx}, {sy}, {sz}) about {}", self.pivot);
        self.about_pivot(Mat4::from_scale(Vec3::new(sx, sy, sz)));
    }

    pub fn rotate(&mut self, axis: Axis, angle_deg: f32) {
        log::trace!("rotate {angle_deg} deg about {axis:?} at {}", self.pivot);
        self.about_pivot(axis.rotation(angle_deg.to_radians()));
    }

    /// Move the pivot to the origin, apply `m`, move it back.
    fn about_pivot(&mut self, m: Mat4) {
        let p = self.pivot;
        self.translate(-p.x, -p.y, -p.z);
        self.apply(m);
        self.translate(p.x, p.y, p.z);
    }

    #[inline]
    fn apply(&mut self, m: Mat4) {
        self.model = m * self.model;
    }

    /// Where the model maps an object-space point.
    #[inline]
    pub fn transform_point(&self, p: Vec3) -> Vec3 {
        self.model.transform_point3(p)
    }

    /// Column-major, as glam stores it and GLSL/WGSL expect.
    #[inline]
    pub fn model_cols(&self) -> [[f32; 4]; 4] {
        self.model.to_cols_array_2d()
    }

    /// Row-major, for consumers that upload matrices transposed.
    #[inline]
    pub fn model_rows(&self) -> [[f32; 4]; 4] {
        self.model.transpose().to_cols_array_2d()
    }

    /// Inverse-transpose of the upper 3x3, for transforming normals.
    pub fn normal_matrix(&self) -> Mat3 {
        Mat3::from_mat4(self.model).inverse().transpose()
    }

    pub fn uniform(&self) -> ModelUniform {
        ModelUniform {
            model: self.model_cols(),
            normal: Mat4::from_mat3(self.normal_matrix()).to_cols_array_2d(),
        }
    }
}

impl Default for TransformState {
    fn default() -> Self {
        Self::new(Vec3::ZERO)
    }
}

/// Model UBO (16-byte aligned). The normal matrix is widened to a mat4 so the
/// block has no std140 padding.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct ModelUniform {
    pub model: [[f32; 4]; 4],
    pub normal: [[f32; 4]; 4],
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vec3;

    const EPS: f32 = 1e-5;

    fn assert_near(a: Vec3, b: Vec3) {
        assert!(a.abs_diff_eq(b, EPS), "{a} != {b}");
    }

    #[test]
    fn new_moves_center_to_origin() {
        let t = TransformState::new(vec3(0.5, 2.0, 0.0));
        assert_near(t.transform_point(vec3(0.5, 2.0, 0.0)), Vec3::ZERO);
        assert_eq!(t.pivot(), Vec3::ZERO);
    }

    #[test]
    fn translate_accumulates_pivot() {
        let mut t = TransformState::default();
        t.translate(1.0, 0.0, 0.0);
        t.translate(0.0, 2.0, 0.0);
        assert_eq!(t.pivot(), vec3(1.0, 2.0, 0.0));
    }

    #[test]
    fn scale_and_rotate_keep_pivot_at_origin() {
        let mut t = TransformState::new(vec3(3.0, -1.0, 7.0));
        t.scale(2.0, 0.5, 1.5);
        t.rotate(Axis::X, 33.0);
        t.rotate(Axis::Y, -120.0);
        t.scale(0.1, 0.1, 0.1);
        t.rotate(Axis::Z, 270.0);
        assert_eq!(t.pivot(), Vec3::ZERO);
    }

    #[test]
    fn scale_and_rotate_round_trip_pivot() {
        let mut t = TransformState::default();
        t.translate(1.25, -3.5, 0.75);
        let pivot = t.pivot();
        t.rotate(Axis::Y, 45.0);
        t.scale(3.0, 1.0, 1.0);
        assert_eq!(t.pivot(), pivot);
    }

    #[test]
    fn translation_acts_in_world_frame() {
        let mut t = TransformState::default();
        t.translate(1.0, 0.0, 0.0);
        t.rotate(Axis::Z, 90.0);
        assert_near(t.transform_point(Vec3::ZERO), vec3(1.0, 0.0, 0.0));
        let h = t.model() * glam::Vec4::new(0.0, 0.0, 0.0, 1.0);
        assert!(h.abs_diff_eq(glam::Vec4::new(1.0, 0.0, 0.0, 1.0), EPS));
    }

    #[test]
    fn rotation_orbits_pivot_not_origin() {
        let mut t = TransformState::default();
        t.translate(1.0, 0.0, 0.0);
        t.rotate(Axis::Z, 90.0);
        // One unit right of the pivot swings to one unit above it.
        assert_near(t.transform_point(vec3(1.0, 0.0, 0.0)), vec3(1.0, 1.0, 0.0));
    }

    #[test]
    fn later_translation_is_not_rotated() {
        let mut t = TransformState::default();
        t.rotate(Axis::Z, 90.0);
        t.translate(1.0, 0.0, 0.0);
        assert_near(t.transform_point(Vec3::ZERO), vec3(1.0, 0.0, 0.0));
        assert_eq!(t.pivot(), vec3(1.0, 0.0, 0.0));
    }

    #[test]
    fn scale_about_pivot() {
        let mut t = TransformState::default();
        t.translate(2.0, 0.0, 0.0);
        // Object-space (1,0,0) sits at world (3,0,0), one unit right of the pivot.
        assert_near(t.transform_point(vec3(1.0, 0.0, 0.0)), vec3(3.0, 0.0, 0.0));
        t.scale(2.0, 1.0, 1.0);
        assert_near(t.transform_point(vec3(1.0, 0.0, 0.0)), vec3(4.0, 0.0, 0.0));
    }

    #[test]
    fn rotations_are_right_handed() {
        let mut t = TransformState::default();
        t.rotate(Axis::X, 90.0);
        assert_near(t.transform_point(Vec3::Y), Vec3::Z);

        let mut t = TransformState::default();
        t.rotate(Axis::Y, 90.0);
        assert_near(t.transform_point(Vec3::Z), Vec3::X);
    }

    #[test]
    fn row_major_is_transpose() {
        let mut t = TransformState::default();
        t.translate(4.0, 5.0, 6.0);
        let rows = t.model_rows();
        assert_eq!(rows[0][3], 4.0);
        assert_eq!(rows[1][3], 5.0);
        assert_eq!(rows[2][3], 6.0);
        assert_eq!(t.model_cols()[3][0], 4.0);
    }

    #[test]
    fn normal_matrix_undoes_nonuniform_scale() {
        let mut t = TransformState::default();
        t.scale(2.0, 1.0, 1.0);
        let n = t.normal_matrix() * vec3(1.0, 1.0, 0.0);
        assert_near(n, vec3(0.5, 1.0, 0.0));
    }

    #[test]
    fn uniform_is_two_mat4() {
        assert_eq!(std::mem::size_of::<ModelUniform>(), 128);
        let u = TransformState::default().uniform();
        assert_eq!(bytemuck::bytes_of(&u).len(), 128);
        assert_eq!(u.normal, Mat4::IDENTITY.to_cols_array_2d());
    }
}
