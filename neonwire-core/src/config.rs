//! Scene configuration
//!
//! Every section has working defaults, so an empty file (or no file at all)
//! reproduces the reference animation. Values are loaded from TOML and then
//! checked by [`SceneConfig::validate`].

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::color::Rgb;
use crate::error::ConfigError;

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Orientation integrator parameters
    pub motion: MotionConfig,
    /// Cursor ring spring and hover styling
    pub cursor: CursorConfig,
    /// Idle bobbing of the wireframe
    pub float: FloatConfig,
    /// Background starfield
    pub stars: StarsConfig,
    /// Scrolling ticker strip
    pub marquee: MarqueeConfig,
    /// Geometry, camera and frame rate
    pub render: RenderConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionConfig {
    pub pitch_speed: f64,
    pub yaw_speed: f64,
    pub sensitivity: f64,
    pub smoothing: f64,
    /// Hand wrapped `[0, 2π)` angles to the renderer. The integrator state
    /// itself is never wrapped.
    pub wrap_angles: bool,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            pitch_speed: 0.2,
            yaw_speed: 0.3,
            sensitivity: 0.5,
            smoothing: 0.1,
            wrap_angles: false,
        }
    }
}

/// Spring constants for the cursor ring
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CursorConfig {
    pub stiffness: f64,
    pub damping: f64,
    pub mass: f64,
    pub hover_scale: f64,
    pub hover_rotation_deg: f64,
    /// Jumps longer than this (in host units) snap instead of springing
    pub teleport_threshold: f64,
}

impl Default for CursorConfig {
    fn default() -> Self {
        Self {
            stiffness: 150.0,
            damping: 15.0,
            mass: 0.1,
            hover_scale: 2.5,
            hover_rotation_deg: 45.0,
            teleport_threshold: 2000.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FloatConfig {
    pub speed: f64,
    pub rotation_intensity: f64,
    pub float_intensity: f64,
    /// Time offset so several floating objects do not bob in lockstep
    pub phase: f64,
}

impl Default for FloatConfig {
    fn default() -> Self {
        Self {
            speed: 2.0,
            rotation_intensity: 0.5,
            float_intensity: 0.5,
            phase: 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StarsConfig {
    pub count: usize,
    pub radius: f64,
    pub depth: f64,
    pub speed: f64,
}

impl Default for StarsConfig {
    fn default() -> Self {
        Self {
            count: 400,
            radius: 100.0,
            depth: 50.0,
            speed: 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarqueeConfig {
    pub text: String,
    pub repeat: usize,
    /// Distance travelled per period, in host units
    pub distance: f64,
    pub period_secs: f64,
}

impl Default for MarqueeConfig {
    fn default() -> Self {
        Self {
            text: "WEB3 • NFT • DEFI • METAVERSE • SMART CONTRACTS • DAO •".to_string(),
            repeat: 10,
            distance: 1000.0,
            period_secs: 20.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Shape {
    TorusKnot,
    Cube,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub fps: u32,
    pub shape: Shape,
    pub scale: f64,
    pub tubular_segments: usize,
    pub radial_segments: usize,
    pub fov_deg: f64,
    /// Accent color as `#rgb` or `#rrggbb`
    pub accent: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            fps: 30,
            shape: Shape::TorusKnot,
            scale: 2.2,
            tubular_segments: 128,
            radial_segments: 16,
            fov_deg: 75.0,
            accent: Rgb::ACCENT.to_hex(),
        }
    }
}

impl RenderConfig {
    pub fn accent_color(&self) -> Result<Rgb, ConfigError> {
        Ok(Rgb::parse(&self.accent)?)
    }
}

impl SceneConfig {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml(&content)?;
        tracing::debug!(path = %path.display(), "loaded scene config");
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: SceneConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges that would freeze or destabilize the animation
    pub fn validate(&self) -> Result<(), ConfigError> {
        let motion = &self.motion;
        if !(motion.pitch_speed > 0.0) {
            return Err(ConfigError::invalid("motion.pitch_speed", "must be positive"));
        }
        if !(motion.yaw_speed > 0.0) {
            return Err(ConfigError::invalid("motion.yaw_speed", "must be positive"));
        }
        if !motion.sensitivity.is_finite() {
            return Err(ConfigError::invalid("motion.sensitivity", "must be finite"));
        }
        if !(motion.smoothing > 0.0 && motion.smoothing <= 1.0) {
            return Err(ConfigError::invalid(
                "motion.smoothing",
                format!("{} is outside (0, 1]", motion.smoothing),
            ));
        }

        let cursor = &self.cursor;
        if !(cursor.mass > 0.0) {
            return Err(ConfigError::invalid("cursor.mass", "must be positive"));
        }
        if cursor.stiffness < 0.0 || cursor.damping < 0.0 {
            return Err(ConfigError::invalid(
                "cursor.stiffness",
                "stiffness and damping must not be negative",
            ));
        }

        let float = &self.float;
        if !(float.speed > 0.0 && float.speed.is_finite()) {
            return Err(ConfigError::invalid("float.speed", "must be positive"));
        }
        if !(float.rotation_intensity.is_finite() && float.float_intensity.is_finite()) {
            return Err(ConfigError::invalid("float.rotation_intensity", "intensities must be finite"));
        }

        let stars = &self.stars;
        for (field, value) in [
            ("stars.speed", stars.speed),
            ("stars.radius", stars.radius),
            ("stars.depth", stars.depth),
        ] {
            if !(value > 0.0 && value.is_finite()) {
                return Err(ConfigError::invalid(field, "must be positive"));
            }
        }

        let marquee = &self.marquee;
        if !(marquee.period_secs > 0.0 && marquee.period_secs.is_finite()) {
            return Err(ConfigError::invalid("marquee.period_secs", "must be positive"));
        }
        if !marquee.distance.is_finite() {
            return Err(ConfigError::invalid("marquee.distance", "must be finite"));
        }

        let render = &self.render;
        if render.fps == 0 {
            return Err(ConfigError::invalid("render.fps", "must be at least 1"));
        }
        if render.tubular_segments < 3 || render.radial_segments < 3 {
            return Err(ConfigError::invalid(
                "render.tubular_segments",
                "tubular and radial segments must be at least 3",
            ));
        }
        if !(render.scale > 0.0 && render.scale.is_finite()) {
            return Err(ConfigError::invalid("render.scale", "must be positive"));
        }
        if !(render.fov_deg > 0.0 && render.fov_deg < 180.0) {
            return Err(ConfigError::invalid("render.fov_deg", "must be in (0, 180)"));
        }
        render.accent_color()?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_are_valid() {
        let config = SceneConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.motion.smoothing, 0.1);
        assert_eq!(config.render.accent_color().unwrap(), Rgb::ACCENT);
    }

    #[test]
    fn test_empty_file_gives_defaults() {
        let config = SceneConfig::from_toml("").unwrap();
        assert_eq!(config, SceneConfig::default());
    }

    #[test]
    fn test_partial_override() {
        let config = SceneConfig::from_toml(
            r##"
            [motion]
            smoothing = 0.25

            [render]
            shape = "cube"
            accent = "#f0f"
            "##,
        )
        .unwrap();
        assert_eq!(config.motion.smoothing, 0.25);
        assert_eq!(config.motion.yaw_speed, 0.3);
        assert_eq!(config.render.shape, Shape::Cube);
        assert_eq!(config.render.accent_color().unwrap(), Rgb::new(255, 0, 255));
    }

    #[test]
    fn test_rejects_bad_smoothing() {
        let err = SceneConfig::from_toml("[motion]\nsmoothing = 1.5\n").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "motion.smoothing",
                ..
            }
        ));
    }

    #[test]
    fn test_rejects_nan_period() {
        let err = SceneConfig::from_toml("[marquee]\nperiod_secs = nan\n").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "marquee.period_secs",
                ..
            }
        ));
    }

    #[test]
    fn test_rejects_non_finite_and_non_positive() {
        let cases = [
            ("[float]\nspeed = 0.0\n", "float.speed"),
            ("[float]\nspeed = inf\n", "float.speed"),
            ("[stars]\nspeed = -1.0\n", "stars.speed"),
            ("[stars]\nradius = nan\n", "stars.radius"),
            ("[stars]\ndepth = inf\n", "stars.depth"),
            ("[render]\nscale = nan\n", "render.scale"),
            ("[marquee]\ndistance = -inf\n", "marquee.distance"),
        ];
        for (toml, expected) in cases {
            match SceneConfig::from_toml(toml) {
                Err(ConfigError::Invalid { field, .. }) => assert_eq!(field, expected, "{}", toml),
                other => panic!("{:?} accepted or wrong error: {:?}", toml, other),
            }
        }
    }

    #[test]
    fn test_rejects_bad_accent() {
        let err = SceneConfig::from_toml("[render]\naccent = \"lime\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Color(_)));
    }

    #[test]
    fn test_rejects_unknown_shape() {
        let err = SceneConfig::from_toml("[render]\nshape = \"teapot\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[cursor]\nstiffness = 300.0").unwrap();

        let config = SceneConfig::load(file.path()).unwrap();
        assert_eq!(config.cursor.stiffness, 300.0);
        assert_eq!(config.cursor.mass, 0.1);
    }

    #[test]
    fn test_load_missing_file() {
        let err = SceneConfig::load("/nonexistent/neonwire.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
