use glam::Vec3;

use crate::math::Projection;

/// Fixed scene parameters: camera and the two cubes' placement.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneConfig {
    pub projection: Projection,

    /// View-space positions of the first and second cube.
    pub positions: [Vec3; 2],

    pub scale: Vec3,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            projection: Projection::default(),
            positions: [Vec3::new(2.0, 0.0, -7.0), Vec3::new(-2.0, 0.0, -7.0)],
            scale: Vec3::ONE,
        }
    }
}
