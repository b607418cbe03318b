/// Terminal host for the NeonWire animation
use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseEvent, MouseEventKind,
    },
    execute, queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{self},
};
use neonwire_core::marquee::Marquee;
use neonwire_core::stars::Starfield;
use neonwire_core::{
    AnimationSession, Camera, FrameState, HoverState, RenderLoop, Rgb, SceneConfig, Transform,
    Wireframe,
};
use neonwire_core::config::MarqueeConfig;
use std::io::{self, stdout, Write};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

pub mod overlay;
pub mod renderer;

pub use overlay::{Layout, RegionStyle};
pub use renderer::AsciiRenderer;

/// Terminal cells are roughly twice as tall as they are wide
const CELL_ASPECT: f32 = 2.0;

/// Marquee distances are configured in pixels
const PIXELS_PER_CELL: f64 = 10.0;

/// Raw mode, alternate screen and mouse capture, released on drop.
///
/// Holding the guard is the event subscription: once it is dropped the
/// terminal stops reporting pointer events and is restored, including when
/// the frame loop exits with an error.
pub struct TerminalGuard {
    _private: (),
}

impl TerminalGuard {
    pub fn enter() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        let guard = Self { _private: () };
        execute!(
            stdout(),
            terminal::EnterAlternateScreen,
            EnableMouseCapture,
            cursor::Hide
        )?;
        debug!("terminal captured");
        Ok(guard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if let Err(e) = execute!(
            stdout(),
            DisableMouseCapture,
            terminal::LeaveAlternateScreen,
            cursor::Show
        ) {
            warn!("failed to restore terminal screen: {}", e);
        }
        if let Err(e) = terminal::disable_raw_mode() {
            warn!("failed to leave raw mode: {}", e);
        }
        debug!("terminal released");
    }
}

/// Main application struct for the terminal animation
pub struct TerminalApp {
    config: SceneConfig,
    mesh: Wireframe,
    stars: Starfield,
    marquee: Marquee,
    accent: Rgb,
    session: AnimationSession,
    camera: Camera,
    renderer: AsciiRenderer,
    layout: Layout,
    width: u16,
    height: u16,
    /// Origin of the render loop timeline
    epoch: Instant,
    last_fps_sample: Instant,
    frames_since_sample: u32,
    fps: f32,
}

impl TerminalApp {
    pub fn new(config: SceneConfig) -> io::Result<Self> {
        let (width, height) = terminal::size()?;
        Self::with_size(config, width, height)
    }

    /// Build the app for a known terminal size
    pub fn with_size(config: SceneConfig, width: u16, height: u16) -> io::Result<Self> {
        let accent = config
            .render
            .accent_color()
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
        let mesh = Wireframe::from_config(&config.render);
        info!(
            vertices = mesh.vertices.len(),
            edges = mesh.edges.len(),
            width,
            height,
            "terminal app ready"
        );

        Ok(Self {
            mesh,
            stars: Starfield::new(&config.stars),
            marquee: Marquee::new(&MarqueeConfig {
                distance: config.marquee.distance / PIXELS_PER_CELL,
                ..config.marquee.clone()
            }),
            accent,
            session: AnimationSession::new(&config),
            camera: Camera::new(width as u32, height as u32, CELL_ASPECT, config.render.fov_deg as f32),
            renderer: AsciiRenderer::new(width as usize, height as usize),
            layout: Layout::hero(width, height),
            width,
            height,
            epoch: Instant::now(),
            last_fps_sample: Instant::now(),
            frames_since_sample: 0,
            fps: 0.0,
            config,
        })
    }

    pub fn run(&mut self) -> io::Result<()> {
        let _guard = TerminalGuard::enter()?;
        let mut render_loop = RenderLoop::start(self.epoch.elapsed());
        let result = self.main_loop(&mut render_loop);
        render_loop.cancel();
        result
    }

    fn main_loop(&mut self, render_loop: &mut RenderLoop) -> io::Result<()> {
        let target_frame_time = Duration::from_secs_f64(1.0 / self.config.render.fps as f64);

        loop {
            let frame_start = Instant::now();

            // Drain pending input before the tick reads the pointer
            while event::poll(Duration::from_millis(0))? {
                let event = event::read()?;
                self.handle_event(event, render_loop);
            }

            let Some(clock) = render_loop.next_frame(self.epoch.elapsed()) else {
                break;
            };
            let state = self.session.frame(clock);
            self.render(&state, render_loop.is_paused())?;

            self.frames_since_sample += 1;
            let since = self.last_fps_sample.elapsed();
            if since >= Duration::from_secs(1) {
                self.fps = self.frames_since_sample as f32 / since.as_secs_f32();
                self.frames_since_sample = 0;
                self.last_fps_sample = Instant::now();
            }

            let elapsed = frame_start.elapsed();
            if elapsed < target_frame_time {
                std::thread::sleep(target_frame_time - elapsed);
            }
        }

        info!("render loop finished");
        Ok(())
    }

    /// Route one terminal event into the session
    pub fn handle_event(&mut self, event: Event, render_loop: &mut RenderLoop) {
        match event {
            Event::Key(key) => self.handle_key(key, render_loop),
            Event::Mouse(mouse) => self.handle_mouse(mouse),
            Event::Resize(width, height) => self.resize(width, height),
            _ => {}
        }
    }

    fn handle_key(&mut self, key: KeyEvent, render_loop: &mut RenderLoop) {
        if key.kind == KeyEventKind::Release {
            return;
        }
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => render_loop.cancel(),
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                render_loop.cancel()
            }
            KeyCode::Char('p') => {
                render_loop.toggle_pause(self.epoch.elapsed());
                debug!(paused = render_loop.is_paused(), "pause toggled");
            }
            _ => {}
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        match mouse.kind {
            MouseEventKind::Moved | MouseEventKind::Drag(_) => {
                // Cell centers, so the middle column maps to 0
                self.session.on_pointer_move(
                    mouse.column as f64 + 0.5,
                    mouse.row as f64 + 0.5,
                    self.width as f64,
                    self.height as f64,
                );
                let target = self.layout.hit_test(mouse.column, mouse.row);
                self.session.on_pointer_over(target);
            }
            MouseEventKind::Down(_) => {
                if let Some(element) = self.layout.hit_test(mouse.column, mouse.row) {
                    debug!(element = element.label(), "click");
                }
            }
            _ => {}
        }
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        debug!(width, height, "terminal resized");
        self.width = width;
        self.height = height;
        self.camera = Camera::new(
            width as u32,
            height as u32,
            CELL_ASPECT,
            self.config.render.fov_deg as f32,
        );
        self.renderer.resize(width as usize, height as usize);
        self.layout = Layout::hero(width, height);
    }

    /// Paint one frame into the renderer without touching the terminal
    pub fn compose(&mut self, state: &FrameState) {
        let elapsed = state.clock.elapsed;
        self.renderer.clear();
        self.renderer.render_stars(&self.stars, &self.camera, elapsed);

        let model = Transform::model_matrix(
            &state.orientation,
            &state.float,
            self.config.render.scale as f32,
        );
        self.renderer
            .render_wireframe(&self.mesh, &model, &self.camera, self.accent);

        let accent = renderer::to_color(self.accent);
        for region in self.layout.regions() {
            let hovered = state.hover == HoverState::Hovering
                && region.contains(state.cursor.x as u16, state.cursor.y as u16);
            let color = match region.style {
                RegionStyle::Accent => accent,
                RegionStyle::Headline => Color::White,
                RegionStyle::Button if hovered => Color::White,
                RegionStyle::Button => accent,
            };
            self.renderer.draw_text(region.x, region.y, &region.text, color);
        }

        self.renderer.draw_cursor(&state.cursor, self.accent);
    }

    fn render(&mut self, state: &FrameState, paused: bool) -> io::Result<()> {
        self.compose(state);

        let mut stdout = stdout();
        queue!(stdout, cursor::MoveTo(0, 0))?;
        self.renderer.draw(&mut stdout)?;

        if let Some(row) = self.layout.marquee_row() {
            // Ticker strip sits on an accent band
            let text = self.marquee.window(state.clock.elapsed, self.width as usize);
            queue!(
                stdout,
                cursor::MoveTo(0, row),
                SetBackgroundColor(renderer::to_color(self.accent)),
                SetForegroundColor(Color::Black),
                Print(text),
                ResetColor
            )?;
        }

        let status = format!(
            "FPS {:.1} | pitch {:.2} yaw {:.2} | {:?}{} | q quit  p pause",
            self.fps,
            state.orientation.pitch,
            state.orientation.yaw,
            state.hover,
            if paused { " | PAUSED" } else { "" },
        );
        queue!(
            stdout,
            cursor::MoveTo(0, self.height.saturating_sub(1)),
            SetForegroundColor(Color::DarkGrey),
            Print(status),
            ResetColor
        )?;

        stdout.flush()?;
        Ok(())
    }

    pub fn renderer(&self) -> &AsciiRenderer {
        &self.renderer
    }

    pub fn session(&self) -> &AnimationSession {
        &self.session
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEventState, MouseButton};
    use neonwire_core::FrameClock;

    fn app() -> TerminalApp {
        TerminalApp::with_size(SceneConfig::default(), 80, 24).unwrap()
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        })
    }

    fn cta(app: &TerminalApp) -> (u16, u16) {
        let region = app
            .layout
            .regions()
            .iter()
            .find(|r| r.element.label() == "cta")
            .unwrap();
        (region.x + 1, region.y)
    }

    #[test]
    fn test_mouse_move_over_cta_hovers() {
        let mut app = app();
        let mut render_loop = RenderLoop::start(Duration::ZERO);
        let (x, y) = cta(&app);

        app.handle_event(mouse(MouseEventKind::Moved, x, y), &mut render_loop);
        assert_eq!(app.session().hover(), HoverState::Hovering);

        app.handle_event(mouse(MouseEventKind::Moved, 0, 0), &mut render_loop);
        assert_eq!(app.session().hover(), HoverState::Idle);
        let pointer = app.session().pointer();
        assert!(pointer.x < -0.95 && pointer.y > 0.9);
    }

    #[test]
    fn test_drag_also_tracks() {
        let mut app = app();
        let mut render_loop = RenderLoop::start(Duration::ZERO);
        app.handle_event(
            mouse(MouseEventKind::Drag(MouseButton::Left), 79, 23),
            &mut render_loop,
        );
        let pointer = app.session().pointer();
        assert!(pointer.x > 0.95 && pointer.y < -0.9);
    }

    #[test]
    fn test_quit_cancels_loop() {
        let mut app = app();
        let mut render_loop = RenderLoop::start(Duration::ZERO);
        app.handle_event(key(KeyCode::Char('p')), &mut render_loop);
        assert!(render_loop.is_paused());
        app.handle_event(key(KeyCode::Char('q')), &mut render_loop);
        assert!(render_loop.next_frame(Duration::from_secs(1)).is_none());
    }

    #[test]
    fn test_resize_rebuilds_layout() {
        let mut app = app();
        let mut render_loop = RenderLoop::start(Duration::ZERO);
        app.handle_event(Event::Resize(120, 40), &mut render_loop);
        assert_eq!(app.renderer().width(), 120);
        assert_eq!(app.renderer().height(), 40);
        assert_eq!(app.layout.marquee_row(), Some(38));
    }

    #[test]
    fn test_compose_draws_scene_and_cursor() {
        let mut app = app();
        let mut render_loop = RenderLoop::start(Duration::ZERO);
        let (x, y) = cta(&app);
        app.handle_event(mouse(MouseEventKind::Moved, x, y), &mut render_loop);

        let state = app.session.frame(FrameClock {
            elapsed: 1.0,
            delta: 1.0 / 30.0,
            frame: 0,
        });
        app.compose(&state);
        assert_eq!(app.renderer().cell(x as usize, y as usize), Some('■'));
        assert_eq!(app.renderer().cell(2, 1), Some('W'));
    }
}
