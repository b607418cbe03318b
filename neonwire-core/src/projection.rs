/// Camera and projection utilities
use nalgebra::{Matrix4, Point3, Vector3};

/// Perspective camera looking at the origin
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    pub position: Point3<f32>,
    pub target: Point3<f32>,
    pub up: Vector3<f32>,
    /// Vertical field of view, radians
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Camera {
    /// Camera for a `width × height` grid whose cells are `cell_aspect`
    /// times taller than wide (about 2.0 for terminal cells, 1.0 for pixels).
    pub fn new(width: u32, height: u32, cell_aspect: f32, fov_deg: f32) -> Self {
        Self {
            position: Point3::new(0.0, 0.0, 5.0),
            target: Point3::origin(),
            up: Vector3::y(),
            fov: fov_deg.to_radians(),
            aspect: width.max(1) as f32 / (height.max(1) as f32 * cell_aspect),
            near: 0.1,
            far: 1000.0,
        }
    }

    pub fn view_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_at_rh(&self.position, &self.target, &self.up)
    }

    pub fn projection_matrix(&self) -> Matrix4<f32> {
        Matrix4::new_perspective(self.aspect, self.fov, self.near, self.far)
    }

    /// Combined view-projection, computed once per frame by callers
    pub fn view_projection(&self) -> Matrix4<f32> {
        self.projection_matrix() * self.view_matrix()
    }

    /// Project a 3D point to screen space.
    ///
    /// Returns `(x, y, depth)` with depth in NDC `[-1, 1]` (smaller is
    /// closer), or `None` if the point is behind the camera or outside the
    /// depth range. Points off the sides of the screen are still returned so
    /// lines crossing the border can be clipped by the rasterizer.
    pub fn project_to_screen(
        &self,
        point: &Point3<f32>,
        mvp: &Matrix4<f32>,
        width: u32,
        height: u32,
    ) -> Option<(f32, f32, f32)> {
        let clip = mvp * point.to_homogeneous();
        if clip.w <= 1e-6 {
            return None;
        }

        let ndc_x = clip.x / clip.w;
        let ndc_y = clip.y / clip.w;
        let ndc_z = clip.z / clip.w;
        if !(-1.0..=1.0).contains(&ndc_z) {
            return None;
        }

        let screen_x = (ndc_x + 1.0) * 0.5 * width as f32;
        let screen_y = (1.0 - ndc_y) * 0.5 * height as f32;
        Some((screen_x, screen_y, ndc_z))
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(800, 600, 1.0, 75.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camera_creation() {
        let camera = Camera::new(80, 24, 2.0, 75.0);
        assert!((camera.aspect - 80.0 / 48.0).abs() < 1e-6);
        assert!((camera.fov - 75f32.to_radians()).abs() < 1e-6);
    }

    #[test]
    fn test_origin_lands_in_center() {
        let camera = Camera::new(100, 50, 1.0, 75.0);
        let vp = camera.view_projection();
        let (x, y, z) = camera
            .project_to_screen(&Point3::origin(), &vp, 100, 50)
            .unwrap();
        assert!((x - 50.0).abs() < 1e-3);
        assert!((y - 25.0).abs() < 1e-3);
        assert!(z > -1.0 && z < 1.0);
    }

    #[test]
    fn test_up_is_up_on_screen() {
        let camera = Camera::default();
        let vp = camera.view_projection();
        let (_, y_up, _) = camera
            .project_to_screen(&Point3::new(0.0, 1.0, 0.0), &vp, 800, 600)
            .unwrap();
        assert!(y_up < 300.0);
    }

    #[test]
    fn test_nearer_points_have_smaller_depth() {
        let camera = Camera::default();
        let vp = camera.view_projection();
        let (_, _, near) = camera
            .project_to_screen(&Point3::new(0.0, 0.0, 1.0), &vp, 800, 600)
            .unwrap();
        let (_, _, far) = camera
            .project_to_screen(&Point3::new(0.0, 0.0, -1.0), &vp, 800, 600)
            .unwrap();
        assert!(near < far);
    }

    #[test]
    fn test_behind_camera_is_rejected() {
        let camera = Camera::default();
        let vp = camera.view_projection();
        assert!(camera
            .project_to_screen(&Point3::new(0.0, 0.0, 10.0), &vp, 800, 600)
            .is_none());
    }
}
