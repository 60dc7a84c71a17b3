//! Math utilities and types
//!
//! Thin aliases over nalgebra plus the local transform stored on scene nodes.

pub use nalgebra::{Matrix4, Quaternion, Unit, Vector3};

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// Quaternion type for rotations
pub type Quat = Unit<Quaternion<f32>>;

/// Local transform representing position, rotation, and scale
///
/// Composes as `translation * rotation * scale` when converted to a matrix.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    /// Position relative to the parent
    pub position: Vec3,

    /// Rotation quaternion
    pub rotation: Quat,

    /// Scale factors
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::zeros(),
            rotation: Quat::identity(),
            scale: Vec3::new(1.0, 1.0, 1.0),
        }
    }
}

impl Transform {
    /// Create a new identity transform
    pub fn identity() -> Self {
        Self::default()
    }

    /// Create a transform with only position
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Create a transform with position and rotation
    pub fn from_position_rotation(position: Vec3, rotation: Quat) -> Self {
        Self {
            position,
            rotation,
            ..Default::default()
        }
    }

    /// Replace the scale, builder style
    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    /// Convert to a transformation matrix
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::new_translation(&self.position)
            * self.rotation.to_homogeneous()
            * Mat4::new_nonuniform_scaling(&self.scale)
    }

    /// Whether this transform leaves every point where it is
    pub fn is_identity(&self) -> bool {
        *self == Self::identity()
    }
}

/// Math utility functions
pub mod utils {
    /// Convert degrees to radians
    pub fn deg_to_rad(degrees: f32) -> f32 {
        degrees.to_radians()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn identity_converts_to_identity_matrix() {
        assert!(Transform::identity().is_identity());
        assert_relative_eq!(Transform::identity().to_matrix(), Mat4::identity());
    }

    #[test]
    fn matrix_applies_scale_then_rotation_then_translation() {
        let rotation = Quat::from_axis_angle(&Vec3::z_axis(), utils::deg_to_rad(90.0));
        let transform = Transform::from_position_rotation(Vec3::new(10.0, 0.0, 0.0), rotation)
            .with_scale(Vec3::new(2.0, 2.0, 2.0));

        let point = transform
            .to_matrix()
            .transform_point(&nalgebra::Point3::new(1.0, 0.0, 0.0));

        assert_relative_eq!(point.coords, Vec3::new(10.0, 2.0, 0.0), epsilon = 1e-5);
    }
}
