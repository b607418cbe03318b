/// Model matrices for the animated wireframe
use nalgebra::{Matrix4, Vector3};

use crate::float::FloatPose;
use crate::orientation::Orientation;

/// Transform builder for 3D transformations
pub struct Transform;

impl Transform {
    /// XYZ Euler rotation (X applied last to the object frame)
    pub fn euler_xyz(x: f32, y: f32, z: f32) -> Matrix4<f32> {
        let rx = Matrix4::new_rotation(Vector3::new(x, 0.0, 0.0));
        let ry = Matrix4::new_rotation(Vector3::new(0.0, y, 0.0));
        let rz = Matrix4::new_rotation(Vector3::new(0.0, 0.0, z));
        rx * ry * rz
    }

    /// Rotation for an orientation: pitch about X, yaw about Y
    pub fn rotation_matrix(orientation: &Orientation) -> Matrix4<f32> {
        Self::euler_xyz(orientation.pitch as f32, orientation.yaw as f32, 0.0)
    }

    pub fn float_matrix(pose: &FloatPose) -> Matrix4<f32> {
        Self::translation_matrix(0.0, pose.offset_y as f32, 0.0)
            * Self::euler_xyz(
                pose.rotation_x as f32,
                pose.rotation_y as f32,
                pose.rotation_z as f32,
            )
    }

    pub fn translation_matrix(x: f32, y: f32, z: f32) -> Matrix4<f32> {
        Matrix4::new_translation(&Vector3::new(x, y, z))
    }

    pub fn scale_matrix(s: f32) -> Matrix4<f32> {
        Matrix4::new_scaling(s)
    }

    /// Float group, then the object's own rotation, then its scale
    pub fn model_matrix(orientation: &Orientation, float: &FloatPose, scale: f32) -> Matrix4<f32> {
        Self::float_matrix(float) * Self::rotation_matrix(orientation) * Self::scale_matrix(scale)
    }
}
