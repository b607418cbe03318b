//! Damped spring simulation
//!
//! Drives the cursor ring toward the pointer with physical-feeling overshoot.
//! The cursor spring is stiff and very light, so a single Euler step per
//! frame would blow up at 30 fps; [`SpringState::step`] splits the frame into
//! fixed substeps.

use crate::config::CursorConfig;

/// Longest integration step, in seconds
pub const MAX_SUBSTEP: f64 = 1.0 / 500.0;

/// Spring constants
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringParams {
    pub stiffness: f64,
    pub damping: f64,
    pub mass: f64,
}

impl SpringParams {
    pub fn from_config(config: &CursorConfig) -> Self {
        Self {
            stiffness: config.stiffness,
            damping: config.damping,
            mass: config.mass,
        }
    }
}

impl Default for SpringParams {
    fn default() -> Self {
        Self::from_config(&CursorConfig::default())
    }
}

/// 1D spring state tracking position and velocity
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringState {
    pub position: f64,
    pub velocity: f64,
}

impl SpringState {
    pub fn new(initial: f64) -> Self {
        Self {
            position: initial,
            velocity: 0.0,
        }
    }

    /// Advance by `dt` seconds toward `target`.
    ///
    /// Semi-implicit Euler on F = -k x - c v, in substeps of at most
    /// [`MAX_SUBSTEP`]. Cost grows with `dt`; callers driven by wall-clock
    /// frames cap it first (see `CursorFollower::step`).
    pub fn step(&mut self, target: f64, params: &SpringParams, dt: f64) {
        if dt <= 0.0 {
            return;
        }
        let substeps = (dt / MAX_SUBSTEP).ceil().max(1.0) as usize;
        let h = dt / substeps as f64;
        for _ in 0..substeps {
            let displacement = self.position - target;
            let spring_force = -params.stiffness * displacement;
            let damping_force = -params.damping * self.velocity;
            let acceleration = (spring_force + damping_force) / params.mass;

            self.velocity += acceleration * h;
            self.position += self.velocity * h;
        }
    }

    pub fn is_settled(&self, target: f64, threshold: f64) -> bool {
        (self.position - target).abs() < threshold && self.velocity.abs() < threshold
    }
}

/// 2D spring for a screen position
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spring2D {
    pub x: SpringState,
    pub y: SpringState,
}

impl Spring2D {
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x: SpringState::new(x),
            y: SpringState::new(y),
        }
    }

    pub fn step(&mut self, target_x: f64, target_y: f64, params: &SpringParams, dt: f64) {
        self.x.step(target_x, params, dt);
        self.y.step(target_y, params, dt);
    }

    pub fn position(&self) -> (f64, f64) {
        (self.x.position, self.y.position)
    }

    /// Jump to a new position with zero velocity
    pub fn reset(&mut self, x: f64, y: f64) {
        self.x = SpringState::new(x);
        self.y = SpringState::new(y);
    }

    pub fn is_settled(&self, target_x: f64, target_y: f64, threshold: f64) -> bool {
        self.x.is_settled(target_x, threshold) && self.y.is_settled(target_y, threshold)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_spring_converges_at_terminal_rate() {
        let params = SpringParams::default();
        let mut state = SpringState::new(0.0);

        // One second at 30 fps
        for _ in 0..30 {
            state.step(100.0, &params, 1.0 / 30.0);
            assert!(state.position.is_finite());
        }

        assert!(
            state.is_settled(100.0, 0.5),
            "position {} velocity {}",
            state.position,
            state.velocity
        );
    }

    #[test]
    fn test_zero_dt_is_noop() {
        let params = SpringParams::default();
        let mut state = SpringState::new(3.0);
        state.step(100.0, &params, 0.0);
        assert_eq!(state, SpringState::new(3.0));
    }

    #[test]
    fn test_spring_2d() {
        let params = SpringParams::default();
        let mut spring = Spring2D::new(0.0, 0.0);
        for _ in 0..60 {
            spring.step(100.0, 200.0, &params, 1.0 / 60.0);
        }
        let (x, y) = spring.position();
        assert!((x - 100.0).abs() < 1.0, "x {}", x);
        assert!((y - 200.0).abs() < 1.0, "y {}", y);
    }

    #[test]
    fn test_spring_reset() {
        let params = SpringParams::default();
        let mut spring = Spring2D::new(0.0, 0.0);
        for _ in 0..5 {
            spring.step(100.0, 100.0, &params, 1.0 / 60.0);
        }
        spring.reset(500.0, 500.0);

        assert_eq!(spring.position(), (500.0, 500.0));
        assert_eq!(spring.x.velocity, 0.0);
        assert_eq!(spring.y.velocity, 0.0);
    }
}
