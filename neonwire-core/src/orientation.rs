/// Smoothed orientation: time-driven spin blended with a pointer offset
use std::f64::consts::TAU;

use crate::config::MotionConfig;
use crate::pointer::PointerVector;

/// Rotation of the animated object, in radians.
///
/// Angles are not wrapped; the time-driven component keeps growing for the
/// lifetime of the session. Use [`Orientation::wrapped`] when a consumer
/// needs values in `[0, 2π)`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Orientation {
    /// Rotation about the X axis
    pub pitch: f64,
    /// Rotation about the Y axis
    pub yaw: f64,
}

impl Orientation {
    pub fn new(pitch: f64, yaw: f64) -> Self {
        Self { pitch, yaw }
    }

    pub fn zero() -> Self {
        Self::default()
    }

    /// Same rotation with both angles reduced to `[0, 2π)`.
    pub fn wrapped(&self) -> Self {
        Self {
            pitch: self.pitch.rem_euclid(TAU),
            yaw: self.yaw.rem_euclid(TAU),
        }
    }
}

/// One step of first-order exponential smoothing.
pub fn smooth(previous: f64, target: f64, alpha: f64) -> f64 {
    previous + (target - previous) * alpha
}

/// Advances an [`Orientation`] once per rendered frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrientationIntegrator {
    /// Base pitch rate (radians per second)
    pub pitch_speed: f64,
    /// Base yaw rate (radians per second)
    pub yaw_speed: f64,
    /// Pointer deflection per unit of normalized pointer
    pub sensitivity: f64,
    /// Smoothing factor α in (0, 1]
    pub smoothing: f64,
}

impl OrientationIntegrator {
    pub fn new(pitch_speed: f64, yaw_speed: f64, sensitivity: f64, smoothing: f64) -> Self {
        Self {
            pitch_speed,
            yaw_speed,
            sensitivity,
            smoothing,
        }
    }

    pub fn from_config(config: &MotionConfig) -> Self {
        Self::new(
            config.pitch_speed,
            config.yaw_speed,
            config.sensitivity,
            config.smoothing,
        )
    }

    /// The value each axis is pulled toward at `elapsed_seconds`.
    pub fn target(&self, elapsed_seconds: f64, pointer: PointerVector) -> Orientation {
        Orientation {
            pitch: elapsed_seconds * self.pitch_speed + pointer.y * self.sensitivity,
            yaw: elapsed_seconds * self.yaw_speed + pointer.x * self.sensitivity,
        }
    }

    /// Compute the next orientation.
    ///
    /// Pure: identical inputs give identical output. `elapsed_seconds` must
    /// not decrease between calls within a session.
    pub fn tick(
        &self,
        elapsed_seconds: f64,
        pointer: PointerVector,
        previous: Orientation,
    ) -> Orientation {
        let target = self.target(elapsed_seconds, pointer);
        Orientation {
            pitch: smooth(previous.pitch, target.pitch, self.smoothing),
            yaw: smooth(previous.yaw, target.yaw, self.smoothing),
        }
    }
}

impl Default for OrientationIntegrator {
    fn default() -> Self {
        Self::from_config(&MotionConfig::default())
    }
}
