//! Animation session and render loop
//!
//! An [`AnimationSession`] owns every piece of per-page animation state and
//! is fed by its host: pointer moves and pointer-over targets as they arrive,
//! and one [`FrameClock`] per rendered frame from a [`RenderLoop`].
//!
//! Everything runs on the host's main thread. The pointer cell is written by
//! the event side and read once per frame by the tick; neither side holds a
//! lock.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use tracing::{debug, info, trace};

use crate::config::{MotionConfig, SceneConfig};
use crate::cursor::{CursorFollower, CursorPose};
use crate::float::{FloatMotion, FloatPose};
use crate::hover::{CursorProximity, HoverState, Interactive};
use crate::orientation::{Orientation, OrientationIntegrator};
use crate::pointer::{PointerCell, PointerVector};

/// Shared cancellation flag for a render loop.
///
/// Clones observe the same flag. Cancelling is permanent.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Rc<Cell<bool>>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.set(true);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.get()
    }
}

/// Timing for one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameClock {
    /// Seconds of animation time since the loop started (pauses excluded)
    pub elapsed: f64,
    /// Seconds since the previous frame
    pub delta: f64,
    /// Frame counter, starting at 0
    pub frame: u64,
}

/// Explicitly started, explicitly cancelled frame source.
///
/// Hosts call [`RenderLoop::next_frame`] from their display callback; once
/// the token is cancelled it returns `None` and the host drops its
/// subscription. Pausing freezes animation time without stopping the loop.
///
/// Times are positions on the host's own timeline (a monotonic epoch in the
/// terminal, the `requestAnimationFrame` timestamp in a browser).
#[derive(Debug)]
pub struct RenderLoop {
    token: CancelToken,
    origin: Duration,
    last: Duration,
    paused_total: Duration,
    paused_at: Option<Duration>,
    frame: u64,
}

impl RenderLoop {
    pub fn start(origin: Duration) -> Self {
        debug!("render loop started");
        Self {
            token: CancelToken::new(),
            origin,
            last: Duration::ZERO,
            paused_total: Duration::ZERO,
            paused_at: None,
            frame: 0,
        }
    }

    /// A handle that can stop this loop from an event handler
    pub fn token(&self) -> CancelToken {
        self.token.clone()
    }

    pub fn is_running(&self) -> bool {
        !self.token.is_cancelled()
    }

    pub fn cancel(&self) {
        if !self.token.is_cancelled() {
            debug!(frames = self.frame, "render loop cancelled");
        }
        self.token.cancel();
    }

    pub fn is_paused(&self) -> bool {
        self.paused_at.is_some()
    }

    pub fn toggle_pause(&mut self, now: Duration) {
        let wall = now.saturating_sub(self.origin);
        match self.paused_at.take() {
            Some(at) => self.paused_total += wall.saturating_sub(at),
            None => self.paused_at = Some(wall),
        }
    }

    /// Clock for the frame presented at `now`, or `None` once cancelled.
    ///
    /// Elapsed time never goes backwards, even if `now` does.
    pub fn next_frame(&mut self, now: Duration) -> Option<FrameClock> {
        if self.token.is_cancelled() {
            return None;
        }

        let wall = now.saturating_sub(self.origin);
        let frozen = self.paused_at.unwrap_or(wall);
        let animated = frozen.saturating_sub(self.paused_total).max(self.last);

        let clock = FrameClock {
            elapsed: animated.as_secs_f64(),
            delta: (animated - self.last).as_secs_f64(),
            frame: self.frame,
        };
        self.last = animated;
        self.frame += 1;
        Some(clock)
    }
}

/// Everything the renderer needs for one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameState {
    pub clock: FrameClock,
    pub orientation: Orientation,
    pub float: FloatPose,
    pub hover: HoverState,
    pub cursor: CursorPose,
}

/// Per-page animation state
#[derive(Debug)]
pub struct AnimationSession {
    pointer: PointerCell,
    raw_pointer: (f64, f64),
    orientation: Orientation,
    integrator: OrientationIntegrator,
    motion: MotionConfig,
    proximity: CursorProximity,
    cursor: CursorFollower,
    float: FloatMotion,
}

impl AnimationSession {
    pub fn new(config: &SceneConfig) -> Self {
        info!(
            smoothing = config.motion.smoothing,
            sensitivity = config.motion.sensitivity,
            "animation session created"
        );
        Self {
            pointer: PointerCell::new(),
            raw_pointer: (0.0, 0.0),
            orientation: Orientation::zero(),
            integrator: OrientationIntegrator::from_config(&config.motion),
            motion: config.motion.clone(),
            proximity: CursorProximity::new(),
            cursor: CursorFollower::new(&config.cursor),
            float: FloatMotion::new(&config.float),
        }
    }

    /// Handle to the shared pointer slot, for hosts that write it directly
    pub fn pointer_cell(&self) -> PointerCell {
        self.pointer.clone()
    }

    pub fn pointer(&self) -> PointerVector {
        self.pointer.get()
    }

    /// Pointer-move event in host units
    pub fn on_pointer_move(&mut self, x: f64, y: f64, viewport_width: f64, viewport_height: f64) -> PointerVector {
        self.raw_pointer = (x, y);
        let pointer = self.pointer.update(x, y, viewport_width, viewport_height);
        trace!(x = pointer.x, y = pointer.y, "pointer moved");
        pointer
    }

    /// Pointer-over event with whatever the host hit-test found
    pub fn on_pointer_over<T: Interactive + ?Sized>(&mut self, target: Option<&T>) -> HoverState {
        self.proximity.on_pointer_event(target)
    }

    pub fn hover(&self) -> HoverState {
        self.proximity.state()
    }

    /// Orientation state, never wrapped
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Advance one rendered frame
    pub fn frame(&mut self, clock: FrameClock) -> FrameState {
        self.orientation = self
            .integrator
            .tick(clock.elapsed, self.pointer.get(), self.orientation);

        let hover = self.proximity.state();
        let (cx, cy) = self.raw_pointer;
        let cursor = self.cursor.step(clock.delta, cx, cy, hover);

        let orientation = if self.motion.wrap_angles {
            self.orientation.wrapped()
        } else {
            self.orientation
        };

        FrameState {
            clock,
            orientation,
            float: self.float.pose(clock.elapsed),
            hover,
            cursor,
        }
    }
}
