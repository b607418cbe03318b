/// Background starfield
use nalgebra::{Point3, Rotation3, Vector3};
use std::f64::consts::PI;

use crate::config::StarsConfig;

/// Golden angle in radians, the azimuth step of a Fibonacci sphere
const GOLDEN_ANGLE: f64 = PI * (3.0 - 2.236_067_977_499_79);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Star {
    pub position: Point3<f32>,
    /// Twinkle phase offset, radians
    pub phase: f32,
}

#[derive(Debug, Clone)]
pub struct Starfield {
    stars: Vec<Star>,
    speed: f64,
}

impl Starfield {
    /// Spread `count` stars evenly over shells from `radius` to
    /// `radius + depth`. Deterministic: the same config gives the same sky.
    pub fn new(config: &StarsConfig) -> Self {
        let n = config.count.max(1) as f64;
        let stars = (0..config.count)
            .map(|i| {
                let k = i as f64 + 0.5;
                let y = 1.0 - 2.0 * k / n;
                let ring = (1.0 - y * y).max(0.0).sqrt();
                let theta = GOLDEN_ANGLE * i as f64;
                // Fractional part of a Weyl sequence picks the shell
                let shell = (i as f64 * 0.618_033_988_749_895).fract();
                let r = config.radius + shell * config.depth;
                Star {
                    position: Point3::new(
                        (r * ring * theta.cos()) as f32,
                        (r * y) as f32,
                        (r * ring * theta.sin()) as f32,
                    ),
                    phase: (theta % (2.0 * PI)) as f32,
                }
            })
            .collect();

        Self {
            stars,
            speed: config.speed,
        }
    }

    pub fn stars(&self) -> &[Star] {
        &self.stars
    }

    pub fn len(&self) -> usize {
        self.stars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stars.is_empty()
    }

    /// Slow drift of the whole sky around the Y axis
    pub fn rotation(&self, elapsed: f64) -> Rotation3<f32> {
        Rotation3::from_axis_angle(&Vector3::y_axis(), (elapsed * self.speed * 0.01) as f32)
    }

    /// Brightness in `[0.3, 1.0]` for star `star` at `elapsed`
    pub fn twinkle(&self, star: &Star, elapsed: f64) -> f32 {
        let wave = ((elapsed * self.speed) as f32 + star.phase).sin();
        0.65 + 0.35 * wave
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(count: usize) -> StarsConfig {
        StarsConfig {
            count,
            ..StarsConfig::default()
        }
    }

    #[test]
    fn test_stars_lie_in_shell() {
        let field = Starfield::new(&config(500));
        assert_eq!(field.len(), 500);
        for star in field.stars() {
            let r = star.position.coords.norm();
            assert!(r >= 100.0 - 1e-2 && r <= 150.0 + 1e-2, "r {}", r);
        }
    }

    #[test]
    fn test_deterministic() {
        let a = Starfield::new(&config(64));
        let b = Starfield::new(&config(64));
        assert_eq!(a.stars(), b.stars());
    }

    #[test]
    fn test_both_hemispheres_covered() {
        let field = Starfield::new(&config(100));
        let above = field.stars().iter().filter(|s| s.position.y > 0.0).count();
        assert_eq!(above, 50);
    }

    #[test]
    fn test_twinkle_range() {
        let field = Starfield::new(&config(10));
        for star in field.stars() {
            for step in 0..50 {
                let b = field.twinkle(star, step as f64 * 0.3);
                assert!((0.3 - 1e-6..=1.0 + 1e-6).contains(&b));
            }
        }
    }

    #[test]
    fn test_empty_sky() {
        let field = Starfield::new(&config(0));
        assert!(field.is_empty());
    }
}
