use glam::{Mat4, Vec3};

/// Placement of one cube in view space.
///
/// Rotation is Euler angles in radians, applied X then Y then Z in the
/// cube's local frame.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Transform {
    pub const fn at(position: Vec3) -> Self {
        Self {
            position,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }

    /// Local-to-view matrix: translate * rotX * rotY * rotZ * scale.
    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_translation(self.position)
            * Mat4::from_rotation_x(self.rotation.x)
            * Mat4::from_rotation_y(self.rotation.y)
            * Mat4::from_rotation_z(self.rotation.z)
            * Mat4::from_scale(self.scale)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::at(Vec3::ZERO)
    }
}

/// Perspective camera parameters.
///
/// The camera sits at the origin looking down -Z (right-handed), so the view
/// matrix is the identity and cube positions are already in view space.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Projection {
    /// Vertical field of view in radians.
    pub fov_y: f32,
    pub near: f32,
    pub far: f32,
}

impl Projection {
    /// Right-handed perspective mapping view depth `near..far` to `0..1`.
    pub fn matrix(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh(self.fov_y, aspect, self.near, self.far)
    }
}

impl Default for Projection {
    fn default() -> Self {
        Self {
            fov_y: 2.0 * std::f32::consts::PI / 5.0,
            near: 1.0,
            far: 100.0,
        }
    }
}

/// Builds the model-view-projection matrix for `transform`.
///
/// Returns the 16 floats in column-major order, ready for a WGSL `mat4x4<f32>`.
pub fn mvp_matrix(projection: &Projection, aspect: f32, transform: &Transform) -> [f32; 16] {
    (projection.matrix(aspect) * transform.model_matrix()).to_cols_array()
}

#[cfg(test)]
mod tests {
    use super::*;

    type Cols = [[f32; 4]; 4];

    const EPS: f32 = 1e-5;

    fn mul(a: &Cols, b: &Cols) -> Cols {
        let mut out = [[0.0; 4]; 4];
        for col in 0..4 {
            for row in 0..4 {
                out[col][row] = (0..4).map(|k| a[k][row] * b[col][k]).sum();
            }
        }
        out
    }

    fn flatten(m: &Cols) -> [f32; 16] {
        let mut out = [0.0; 16];
        for (i, col) in m.iter().enumerate() {
            out[i * 4..i * 4 + 4].copy_from_slice(col);
        }
        out
    }

    fn reference_projection(aspect: f32) -> Cols {
        let p = Projection::default();
        let f = 1.0 / (p.fov_y / 2.0).tan();
        let r = p.far / (p.near - p.far);
        [
            [f / aspect, 0.0, 0.0, 0.0],
            [0.0, f, 0.0, 0.0],
            [0.0, 0.0, r, -1.0],
            [0.0, 0.0, r * p.near, 0.0],
        ]
    }

    fn translation(x: f32, y: f32, z: f32) -> Cols {
        [
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [x, y, z, 1.0],
        ]
    }

    fn rot_x(a: f32) -> Cols {
        let (s, c) = a.sin_cos();
        [
            [1.0, 0.0, 0.0, 0.0],
            [0.0, c, s, 0.0],
            [0.0, -s, c, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ]
    }

    fn rot_y(a: f32) -> Cols {
        let (s, c) = a.sin_cos();
        [
            [c, 0.0, -s, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [s, 0.0, c, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ]
    }

    fn assert_close(actual: &[f32; 16], expected: &[f32; 16]) {
        for (i, (a, e)) in actual.iter().zip(expected).enumerate() {
            assert!((a - e).abs() <= EPS, "element {i}: {a} != {e}");
        }
    }

    fn project(m: &[f32; 16], p: Vec3) -> glam::Vec4 {
        Mat4::from_cols_array(m) * p.extend(1.0)
    }

    #[test]
    fn bottom_row_is_perspective_divide() {
        for aspect in [0.5, 1.0, 16.0 / 9.0, 3.0] {
            let m = mvp_matrix(&Projection::default(), aspect, &Transform::default());
            // Row 3 of a column-major matrix: elements 3, 7, 11, 15.
            assert_eq!([m[3], m[7], m[11], m[15]], [0.0, 0.0, -1.0, 0.0]);
        }
    }

    #[test]
    fn nearer_points_get_smaller_depth() {
        let proj = Projection::default();
        let near_cube = mvp_matrix(&proj, 1.5, &Transform::at(Vec3::new(0.0, 0.0, -3.0)));
        let far_cube = mvp_matrix(&proj, 1.5, &Transform::at(Vec3::new(0.0, 0.0, -50.0)));

        let a = project(&near_cube, Vec3::ZERO);
        let b = project(&far_cube, Vec3::ZERO);
        assert!(a.w > 0.0 && b.w > 0.0);

        let (da, db) = (a.z / a.w, b.z / b.w);
        assert!((0.0..=1.0).contains(&da));
        assert!((0.0..=1.0).contains(&db));
        assert!(da < db);
    }

    #[test]
    fn near_and_far_planes_map_to_depth_range() {
        let proj = Projection::default();
        let m = mvp_matrix(&proj, 1.0, &Transform::default());

        let n = project(&m, Vec3::new(0.0, 0.0, -proj.near));
        let f = project(&m, Vec3::new(0.0, 0.0, -proj.far));
        assert!((n.z / n.w).abs() <= EPS);
        assert!((f.z / f.w - 1.0).abs() <= EPS);
    }

    #[test]
    fn first_frame_matrices_match_reference() {
        let aspect = 4.0 / 3.0;
        let proj = Projection::default();

        let cube1 = Transform {
            position: Vec3::new(2.0, 0.0, -7.0),
            rotation: Vec3::new(0.0, 1.0, 0.0),
            scale: Vec3::ONE,
        };
        let cube2 = Transform {
            position: Vec3::new(-2.0, 0.0, -7.0),
            rotation: Vec3::new(1.0, 0.0, 0.0),
            scale: Vec3::ONE,
        };

        let p = reference_projection(aspect);
        let expected1 = flatten(&mul(&p, &mul(&translation(2.0, 0.0, -7.0), &rot_y(1.0))));
        let expected2 = flatten(&mul(&p, &mul(&translation(-2.0, 0.0, -7.0), &rot_x(1.0))));

        assert_close(&mvp_matrix(&proj, aspect, &cube1), &expected1);
        assert_close(&mvp_matrix(&proj, aspect, &cube2), &expected2);
    }

    #[test]
    fn scale_stretches_model_axes() {
        let t = Transform {
            scale: Vec3::new(2.0, 3.0, 4.0),
            ..Transform::default()
        };
        let m = t.model_matrix();
        assert!((m.x_axis.x - 2.0).abs() <= EPS);
        assert!((m.y_axis.y - 3.0).abs() <= EPS);
        assert!((m.z_axis.z - 4.0).abs() <= EPS);
    }
}
