//! NeonWire Core Library - pointer-reactive wireframe animation
//!
//! This library provides the host-independent pieces: pointer tracking,
//! smoothed orientation, the cursor hover state machine, the cursor spring,
//! wireframe geometry, projection and the scene configuration. Hosts (the
//! terminal and web crates) feed it events and draw what it returns.

pub mod color;
pub mod config;
pub mod cursor;
pub mod error;
pub mod float;
pub mod geometry;
pub mod hover;
pub mod marquee;
pub mod orientation;
pub mod pointer;
pub mod projection;
pub mod session;
pub mod spring;
pub mod stars;
pub mod transform;

// Re-export commonly used types
pub use color::Rgb;
pub use config::{SceneConfig, Shape};
pub use cursor::{CursorFollower, CursorPose};
pub use error::{ColorError, ConfigError};
pub use geometry::Wireframe;
pub use hover::{CursorProximity, Element, HoverState, Interactive};
pub use orientation::{Orientation, OrientationIntegrator};
pub use pointer::{track, PointerCell, PointerVector};
pub use projection::Camera;
pub use session::{AnimationSession, CancelToken, FrameClock, FrameState, RenderLoop};
pub use transform::Transform;
