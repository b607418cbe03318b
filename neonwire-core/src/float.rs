/// Idle "floating" motion wrapped around the wireframe
use crate::config::FloatConfig;

/// Extra rotation and vertical offset applied outside the orientation
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FloatPose {
    pub rotation_x: f64,
    pub rotation_y: f64,
    pub rotation_z: f64,
    pub offset_y: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FloatMotion {
    config: FloatConfig,
}

impl FloatMotion {
    pub fn new(config: &FloatConfig) -> Self {
        Self {
            config: config.clone(),
        }
    }

    /// Pose at `elapsed` seconds. Periodic with period `8π / speed`.
    pub fn pose(&self, elapsed: f64) -> FloatPose {
        let t = self.config.phase + elapsed;
        let s = t / 4.0 * self.config.speed;
        let ri = self.config.rotation_intensity;
        FloatPose {
            rotation_x: s.cos() / 8.0 * ri,
            rotation_y: s.sin() / 8.0 * ri,
            rotation_z: s.sin() / 20.0 * ri,
            offset_y: s.sin() / 10.0 * self.config.float_intensity,
        }
    }
}

impl Default for FloatMotion {
    fn default() -> Self {
        Self::new(&FloatConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_rest_pose() {
        let pose = FloatMotion::default().pose(0.0);
        assert!((pose.rotation_x - 0.0625).abs() < 1e-12);
        assert_eq!(pose.rotation_y, 0.0);
        assert_eq!(pose.offset_y, 0.0);
    }

    #[test]
    fn test_bounded_and_periodic() {
        let motion = FloatMotion::default();
        let period = 8.0 * PI / 2.0;
        for i in 0..200 {
            let t = i as f64 * 0.137;
            let a = motion.pose(t);
            let b = motion.pose(t + period);
            assert!(a.offset_y.abs() <= 0.05 + 1e-12);
            assert!(a.rotation_x.abs() <= 0.0625 + 1e-12);
            assert!((a.offset_y - b.offset_y).abs() < 1e-9);
            assert!((a.rotation_z - b.rotation_z).abs() < 1e-9);
        }
    }

    #[test]
    fn test_phase_shifts_motion() {
        let config = FloatConfig {
            phase: 3.0,
            ..FloatConfig::default()
        };
        let shifted = FloatMotion::new(&config);
        let base = FloatMotion::default();
        assert_eq!(shifted.pose(0.0), base.pose(3.0));
    }
}
