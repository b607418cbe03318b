/// ASCII line renderer for terminal output
use crossterm::{
    style::{Color, Print, ResetColor, SetForegroundColor},
    QueueableCommand,
};
use nalgebra::Matrix4;
use neonwire_core::stars::Starfield;
use neonwire_core::{Camera, CursorPose, Rgb, Wireframe};
use std::f64::consts::TAU;
use std::io::Write;

/// Character ramp for wire depth (farthest to nearest)
const DEPTH_RAMP: &[char] = &['.', ':', '-', '=', '+', '*', '#', '%', '@'];

/// Number of sample points around the cursor ring
const RING_SAMPLES: usize = 16;

pub fn to_color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

fn scale_color(rgb: Rgb, factor: f32) -> Color {
    let f = factor.clamp(0.0, 1.0);
    Color::Rgb {
        r: (rgb.r as f32 * f) as u8,
        g: (rgb.g as f32 * f) as u8,
        b: (rgb.b as f32 * f) as u8,
    }
}

/// Cell canvas with a depth buffer
pub struct AsciiRenderer {
    width: usize,
    height: usize,
    depth_buffer: Vec<f32>,
    char_buffer: Vec<char>,
    color_buffer: Vec<Color>,
    /// Scratch space for projected vertices, reused between frames
    projected: Vec<Option<(f32, f32, f32, f32)>>,
}

impl AsciiRenderer {
    pub fn new(width: usize, height: usize) -> Self {
        let size = width * height;
        Self {
            width,
            height,
            depth_buffer: vec![f32::INFINITY; size],
            char_buffer: vec![' '; size],
            color_buffer: vec![Color::Reset; size],
            projected: Vec::new(),
        }
    }

    pub fn resize(&mut self, width: usize, height: usize) {
        *self = Self::new(width, height);
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn clear(&mut self) {
        self.depth_buffer.fill(f32::INFINITY);
        self.char_buffer.fill(' ');
        self.color_buffer.fill(Color::Reset);
    }

    /// Character at a cell, for inspection
    pub fn cell(&self, x: usize, y: usize) -> Option<char> {
        (x < self.width && y < self.height).then(|| self.char_buffer[y * self.width + x])
    }

    fn plot(&mut self, x: i32, y: i32, depth: f32, c: char, color: Color) {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return;
        }
        let idx = y as usize * self.width + x as usize;
        if depth < self.depth_buffer[idx] {
            self.depth_buffer[idx] = depth;
            self.char_buffer[idx] = c;
            self.color_buffer[idx] = color;
        }
    }

    /// Overwrite a cell regardless of depth (overlay layer)
    fn put(&mut self, x: i32, y: i32, c: char, color: Color) {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return;
        }
        let idx = y as usize * self.width + x as usize;
        self.depth_buffer[idx] = f32::NEG_INFINITY;
        self.char_buffer[idx] = c;
        self.color_buffer[idx] = color;
    }

    /// Background stars, always behind everything else
    pub fn render_stars(&mut self, stars: &Starfield, camera: &Camera, elapsed: f64) {
        let mvp = camera.view_projection() * stars.rotation(elapsed).to_homogeneous();
        for star in stars.stars() {
            let Some((x, y, _)) =
                camera.project_to_screen(&star.position, &mvp, self.width as u32, self.height as u32)
            else {
                continue;
            };
            let brightness = stars.twinkle(star, elapsed);
            let c = if brightness > 0.9 { '*' } else { '.' };
            let level = (brightness * 200.0) as u8;
            self.plot(
                x as i32,
                y as i32,
                f32::MAX,
                c,
                Color::Rgb {
                    r: level,
                    g: level,
                    b: level,
                },
            );
        }
    }

    /// Draw every edge of `mesh`; nearer wires get denser glyphs
    pub fn render_wireframe(&mut self, mesh: &Wireframe, model: &Matrix4<f32>, camera: &Camera, accent: Rgb) {
        let view_model = camera.view_matrix() * model;
        let mvp = camera.projection_matrix() * view_model;
        let (w, h) = (self.width as u32, self.height as u32);

        // View distance range covered by the mesh, for shading
        let reach = mesh.bounding_radius() * model.fixed_view::<3, 1>(0, 0).norm();
        let distance = (camera.position - camera.target).norm();
        let (near, far) = (distance - reach, distance + reach);

        self.projected.clear();
        self.projected.extend(mesh.vertices.iter().map(|v| {
            camera.project_to_screen(v, &mvp, w, h).map(|(x, y, z)| {
                let view_distance = -view_model.transform_point(v).z;
                let shade = ((far - view_distance) / (far - near).max(1e-6)).clamp(0.0, 1.0);
                (x, y, z, shade)
            })
        }));

        for &(a, b) in &mesh.edges {
            if let (Some(p0), Some(p1)) = (self.projected[a], self.projected[b]) {
                self.rasterize_line(p0, p1, accent);
            }
        }
    }

    /// DDA line with per-step depth and shade interpolation
    fn rasterize_line(&mut self, p0: (f32, f32, f32, f32), p1: (f32, f32, f32, f32), accent: Rgb) {
        let (dx, dy) = (p1.0 - p0.0, p1.1 - p0.1);
        let steps = dx.abs().max(dy.abs()).ceil().max(1.0);
        // Lines far off screen are not worth walking
        if steps > 4.0 * (self.width + self.height) as f32 {
            return;
        }
        let steps = steps as usize;

        for i in 0..=steps {
            let t = i as f32 / steps as f32;
            let x = p0.0 + dx * t;
            let y = p0.1 + dy * t;
            let depth = p0.2 + (p1.2 - p0.2) * t;
            let shade = p0.3 + (p1.3 - p0.3) * t;

            let idx = ((shade * (DEPTH_RAMP.len() - 1) as f32).round() as usize).min(DEPTH_RAMP.len() - 1);
            self.plot(
                x.floor() as i32,
                y.floor() as i32,
                depth,
                DEPTH_RAMP[idx],
                scale_color(accent, 0.35 + 0.65 * shade),
            );
        }
    }

    /// Text drawn over the scene
    pub fn draw_text(&mut self, x: u16, y: u16, text: &str, color: Color) {
        for (i, c) in text.chars().enumerate() {
            self.put(x as i32 + i as i32, y as i32, c, color);
        }
    }

    /// Cursor ring: samples of a circle/square blend, scaled and turned by
    /// the pose, with a center dot while hovering. Drawn with `o` while
    /// mostly round and `◇` once it has turned square.
    pub fn draw_cursor(&mut self, pose: &CursorPose, accent: Rgb) {
        let color = to_color(accent);
        let radius = pose.scale;
        let turn = pose.rotation_deg.to_radians();
        let glyph = if pose.roundness < 0.5 { '◇' } else { 'o' };

        for k in 0..RING_SAMPLES {
            let angle = k as f64 / RING_SAMPLES as f64 * TAU;
            let (s, c) = angle.sin_cos();
            // Point on the square with the same angle
            let stretch = 1.0 / s.abs().max(c.abs());
            let r = radius * (pose.roundness + (1.0 - pose.roundness) * stretch);
            let (rs, rc) = (angle + turn).sin_cos();
            // Cells are about twice as tall as wide
            let x = pose.x + r * rc * 2.0;
            let y = pose.y + r * rs;
            self.put(x.round() as i32, y.round() as i32, glyph, color);
        }

        if pose.dot {
            self.put(pose.x.floor() as i32, pose.y.floor() as i32, '■', color);
        }
    }

    pub fn draw<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        let mut current: Option<Color> = None;
        for y in 0..self.height {
            for x in 0..self.width {
                let idx = y * self.width + x;
                let color = self.color_buffer[idx];
                if current != Some(color) {
                    writer.queue(SetForegroundColor(color))?;
                    current = Some(color);
                }
                writer.queue(Print(self.char_buffer[idx]))?;
            }
            if y + 1 < self.height {
                writer.queue(Print("\r\n"))?;
            }
        }
        writer.queue(ResetColor)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use neonwire_core::float::FloatPose;
    use neonwire_core::{HoverState, Orientation, Transform};

    fn accent() -> Rgb {
        Rgb::ACCENT
    }

    #[test]
    fn test_wireframe_lands_on_canvas() {
        let mut renderer = AsciiRenderer::new(80, 24);
        let camera = Camera::new(80, 24, 2.0, 75.0);
        let mesh = Wireframe::cube(1.6);
        let model = Transform::model_matrix(&Orientation::new(0.4, 0.7), &FloatPose::default(), 2.2);

        renderer.render_wireframe(&mesh, &model, &camera, accent());
        let drawn = renderer.char_buffer.iter().filter(|&&c| c != ' ').count();
        assert!(drawn > 20, "only {} cells drawn", drawn);
        assert_eq!(renderer.cell(0, 0), Some(' '));
    }

    #[test]
    fn test_text_wins_over_wires() {
        let mut renderer = AsciiRenderer::new(40, 10);
        let camera = Camera::new(40, 10, 2.0, 75.0);
        let model = Matrix4::new_scaling(2.2);
        renderer.render_wireframe(&Wireframe::cube(1.6), &model, &camera, accent());
        renderer.draw_text(10, 5, "HELLO", Color::White);
        assert_eq!(renderer.cell(10, 5), Some('H'));
        assert_eq!(renderer.cell(14, 5), Some('O'));
    }

    #[test]
    fn test_cursor_dot_only_when_hovering() {
        let mut renderer = AsciiRenderer::new(40, 20);
        let mut follower = neonwire_core::CursorFollower::new(&Default::default());
        let idle = follower.step(0.0, 20.0, 10.0, HoverState::Idle);
        renderer.draw_cursor(&idle, accent());
        assert_ne!(renderer.cell(20, 10), Some('■'));
        assert_eq!(renderer.cell(22, 10), Some('o'));

        renderer.clear();
        let hovering = CursorPose {
            dot: true,
            ..idle
        };
        renderer.draw_cursor(&hovering, accent());
        assert_eq!(renderer.cell(20, 10), Some('■'));
    }

    #[test]
    fn test_square_ring_uses_diamonds() {
        let mut renderer = AsciiRenderer::new(40, 20);
        let pose = CursorPose {
            x: 20.0,
            y: 10.0,
            scale: 2.5,
            rotation_deg: 45.0,
            roundness: 0.0,
            dot: true,
        };
        renderer.draw_cursor(&pose, accent());
        assert!(renderer.char_buffer.contains(&'◇'));
        assert!(!renderer.char_buffer.contains(&'o'));
    }

    #[test]
    fn test_draw_writes_every_cell() {
        let mut renderer = AsciiRenderer::new(5, 2);
        renderer.draw_text(0, 0, "ab", Color::White);
        let mut out = Vec::new();
        renderer.draw(&mut out).unwrap();
        let text = String::from_utf8_lossy(&out);
        assert!(text.contains("ab"));
        assert!(text.contains("\r\n"));
    }

    #[test]
    fn test_stars_render_behind() {
        let mut renderer = AsciiRenderer::new(80, 24);
        let camera = Camera::new(80, 24, 2.0, 75.0);
        let stars = Starfield::new(&Default::default());
        renderer.render_stars(&stars, &camera, 0.0);
        let drawn = renderer.char_buffer.iter().filter(|&&c| c != ' ').count();
        assert!(drawn > 0);

        // Wires drawn later still cover stars
        let before = renderer.char_buffer.clone();
        renderer.render_wireframe(&Wireframe::cube(1.6), &Matrix4::new_scaling(2.2), &camera, accent());
        assert_ne!(before, renderer.char_buffer);
    }
}
