/// Horizontally scrolling ticker text
use crate::config::MarqueeConfig;

#[derive(Debug, Clone)]
pub struct Marquee {
    strip: Vec<char>,
    distance: f64,
    period: f64,
}

impl Marquee {
    pub fn new(config: &MarqueeConfig) -> Self {
        let unit = format!("{} ", config.text.trim());
        let strip = unit.repeat(config.repeat.max(1)).chars().collect();
        Self {
            strip,
            distance: config.distance,
            period: config.period_secs,
        }
    }

    /// Horizontal offset at `elapsed` seconds, linear from 0 to `-distance`,
    /// then restarting.
    pub fn offset(&self, elapsed: f64) -> f64 {
        let progress = elapsed.rem_euclid(self.period) / self.period;
        -self.distance * progress
    }

    /// The `width` cells visible at `elapsed`, wrapping around the strip.
    pub fn window(&self, elapsed: f64, width: usize) -> String {
        let len = self.strip.len();
        if len == 0 {
            return " ".repeat(width);
        }
        let start = (-self.offset(elapsed)).floor() as usize % len;
        self.strip
            .iter()
            .cycle()
            .skip(start)
            .take(width)
            .collect()
    }
}

impl Default for Marquee {
    fn default() -> Self {
        Self::new(&MarqueeConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn marquee(text: &str) -> Marquee {
        Marquee::new(&MarqueeConfig {
            text: text.to_string(),
            repeat: 2,
            distance: 10.0,
            period_secs: 5.0,
        })
    }

    #[test]
    fn test_offset_is_linear_and_repeats() {
        let m = marquee("AB");
        assert_eq!(m.offset(0.0), 0.0);
        assert!((m.offset(2.5) + 5.0).abs() < 1e-12);
        assert!((m.offset(7.5) + 5.0).abs() < 1e-12);
        assert!(m.offset(4.999) > -10.0);
    }

    #[test]
    fn test_window_scrolls_left() {
        // strip is "AB AB "
        let m = marquee("AB");
        assert_eq!(m.window(0.0, 4), "AB A");
        assert_eq!(m.window(0.5, 4), "B AB");
        assert_eq!(m.window(1.0, 8), " AB AB A");
    }

    #[test]
    fn test_window_with_wide_glyphs_counts_chars() {
        let m = Marquee::default();
        let window = m.window(3.3, 40);
        assert_eq!(window.chars().count(), 40);
    }
}
