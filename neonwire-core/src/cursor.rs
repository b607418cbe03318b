//! Custom cursor ring that trails the pointer
//!
//! The ring position springs toward the raw pointer, and its scale, rotation
//! and corner roundness spring toward the style of the current
//! [`HoverState`]: a small circle when idle, a larger square turned 45° when
//! over something interactive.

use crate::config::CursorConfig;
use crate::hover::HoverState;
use crate::spring::{Spring2D, SpringParams, SpringState};

/// Longest frame the springs integrate; longer gaps (hidden tab, suspend)
/// are treated as this long
pub const MAX_FRAME_DT: f64 = 0.1;

/// Target appearance for one hover state
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CursorStyle {
    pub scale: f64,
    pub rotation_deg: f64,
    /// 1.0 is a circle, 0.0 a square
    pub roundness: f64,
}

impl CursorStyle {
    pub fn for_state(state: HoverState, config: &CursorConfig) -> Self {
        match state {
            HoverState::Idle => Self {
                scale: 1.0,
                rotation_deg: 0.0,
                roundness: 1.0,
            },
            HoverState::Hovering => Self {
                scale: config.hover_scale,
                rotation_deg: config.hover_rotation_deg,
                roundness: 0.0,
            },
        }
    }
}

/// Rendered cursor for one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CursorPose {
    pub x: f64,
    pub y: f64,
    pub scale: f64,
    pub rotation_deg: f64,
    pub roundness: f64,
    /// Show the inner dot (only while hovering)
    pub dot: bool,
}

#[derive(Debug, Clone)]
pub struct CursorFollower {
    params: SpringParams,
    config: CursorConfig,
    position: Spring2D,
    scale: SpringState,
    rotation: SpringState,
    roundness: SpringState,
    last_target: Option<(f64, f64)>,
}

impl CursorFollower {
    pub fn new(config: &CursorConfig) -> Self {
        let idle = CursorStyle::for_state(HoverState::Idle, config);
        Self {
            params: SpringParams::from_config(config),
            config: config.clone(),
            position: Spring2D::new(0.0, 0.0),
            scale: SpringState::new(idle.scale),
            rotation: SpringState::new(idle.rotation_deg),
            roundness: SpringState::new(idle.roundness),
            last_target: None,
        }
    }

    /// Advance all springs by `dt` seconds, capped at [`MAX_FRAME_DT`].
    ///
    /// The first target, and any jump longer than the teleport threshold,
    /// places the ring directly instead of springing across the screen.
    pub fn step(&mut self, dt: f64, target_x: f64, target_y: f64, hover: HoverState) -> CursorPose {
        let dt = dt.min(MAX_FRAME_DT);
        let jump = match self.last_target {
            None => true,
            Some((lx, ly)) => {
                let (dx, dy) = (target_x - lx, target_y - ly);
                (dx * dx + dy * dy).sqrt() > self.config.teleport_threshold
            }
        };
        if jump {
            self.position.reset(target_x, target_y);
        } else {
            self.position.step(target_x, target_y, &self.params, dt);
        }
        self.last_target = Some((target_x, target_y));

        let style = CursorStyle::for_state(hover, &self.config);
        self.scale.step(style.scale, &self.params, dt);
        self.rotation.step(style.rotation_deg, &self.params, dt);
        self.roundness.step(style.roundness, &self.params, dt);

        self.pose(hover)
    }

    pub fn pose(&self, hover: HoverState) -> CursorPose {
        let (x, y) = self.position.position();
        CursorPose {
            x,
            y,
            scale: self.scale.position,
            rotation_deg: self.rotation.position,
            roundness: self.roundness.position.clamp(0.0, 1.0),
            dot: hover.is_hovering(),
        }
    }
}
