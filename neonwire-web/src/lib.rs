/// NeonWire Web - browser host for the animation core
///
/// `WebScene` can be driven by hand (call `pointer_move`, `pointer_over` and
/// `frame` from your own handlers) or mounted on a canvas, in which case it
/// registers its own listeners and `requestAnimationFrame` loop and hands
/// back a `Mount` that releases them.
use std::cell::{Cell, RefCell};
use std::f64::consts::TAU;
use std::rc::Rc;
use std::time::Duration;

use neonwire_core::{
    AnimationSession, Camera, CancelToken, ConfigError, FrameClock, FrameState, RenderLoop, Rgb,
    SceneConfig, Transform, Wireframe,
};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, Element, HtmlCanvasElement, MouseEvent, Window};

macro_rules! console_log {
    ($($t:tt)*) => (web_sys::console::log_1(&format!($($t)*).into()))
}

/// Elements carrying this attribute turn the cursor into its hover shape
pub const INTERACTIVE_ATTR: &str = "data-interactive";

/// Cursor ring radius at scale 1, in CSS pixels
const CURSOR_RADIUS: f64 = 16.0;

fn js_error(message: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&message.to_string())
}

struct Scene {
    session: AnimationSession,
    mesh: Wireframe,
    accent: Rgb,
    scale: f32,
    fov_deg: f32,
    last: Option<FrameState>,
    /// A `Mount` currently drives this scene
    mounted: bool,
}

impl Scene {
    fn from_toml(config: &str) -> Result<Self, ConfigError> {
        let config = SceneConfig::from_toml(config)?;
        let accent = config.render.accent_color()?;
        Ok(Self {
            session: AnimationSession::new(&config),
            mesh: Wireframe::from_config(&config.render),
            accent,
            scale: config.render.scale as f32,
            fov_deg: config.render.fov_deg as f32,
            last: None,
            mounted: false,
        })
    }

    /// Reserve the scene for one mount; `false` if another holds it
    fn claim_mount(&mut self) -> bool {
        !std::mem::replace(&mut self.mounted, true)
    }

    fn release_mount(&mut self) {
        self.mounted = false;
    }

    /// One rAF tick; `false` once the loop has been cancelled
    fn animate(
        &mut self,
        render_loop: &mut RenderLoop,
        now: Duration,
        context: &CanvasRenderingContext2d,
        canvas: &HtmlCanvasElement,
    ) -> Result<bool, JsValue> {
        let Some(clock) = render_loop.next_frame(now) else {
            return Ok(false);
        };
        let state = self.session.frame(clock);
        self.last = Some(state);
        self.draw(context, canvas, &state)?;
        Ok(true)
    }

    fn draw(
        &self,
        context: &CanvasRenderingContext2d,
        canvas: &HtmlCanvasElement,
        state: &FrameState,
    ) -> Result<(), JsValue> {
        let (width, height) = (canvas.width(), canvas.height());
        context.clear_rect(0.0, 0.0, width as f64, height as f64);

        let camera = Camera::new(width, height, 1.0, self.fov_deg);
        let model = Transform::model_matrix(&state.orientation, &state.float, self.scale);
        let mvp = camera.view_projection() * model;
        let projected: Vec<_> = self
            .mesh
            .vertices
            .iter()
            .map(|v| camera.project_to_screen(v, &mvp, width, height))
            .collect();

        let accent = JsValue::from_str(&self.accent.to_hex());
        context.set_stroke_style(&accent);
        context.set_global_alpha(0.8);
        context.set_line_width(1.0);
        context.begin_path();
        for &(a, b) in &self.mesh.edges {
            if let (Some(p0), Some(p1)) = (projected[a], projected[b]) {
                context.move_to(p0.0 as f64, p0.1 as f64);
                context.line_to(p1.0 as f64, p1.1 as f64);
            }
        }
        context.stroke();
        context.set_global_alpha(1.0);

        // Cursor ring: circle when idle, turned square while hovering
        let cursor = &state.cursor;
        let r = CURSOR_RADIUS * cursor.scale;
        context.save();
        context.translate(cursor.x, cursor.y)?;
        context.rotate(cursor.rotation_deg.to_radians())?;
        context.set_line_width(2.0);
        context.begin_path();
        if cursor.roundness > 0.5 {
            context.arc(0.0, 0.0, r, 0.0, TAU)?;
        } else {
            context.rect(-r, -r, 2.0 * r, 2.0 * r);
        }
        context.stroke();
        if cursor.dot {
            context.set_fill_style(&accent);
            context.fill_rect(-4.0, -4.0, 8.0, 8.0);
        }
        context.restore();
        Ok(())
    }
}

/// Whether `start` or any of its ancestors carries the interactive flag,
/// so text inside a flagged button still counts as the button
fn flagged_in_ancestry<N>(
    start: Option<N>,
    is_flagged: impl Fn(&N) -> bool,
    parent: impl Fn(&N) -> Option<N>,
) -> bool {
    let mut node = start;
    while let Some(current) = node {
        if is_flagged(&current) {
            return true;
        }
        node = parent(&current);
    }
    false
}

/// Animation state for one page
#[wasm_bindgen]
pub struct WebScene {
    scene: Rc<RefCell<Scene>>,
}

#[wasm_bindgen]
impl WebScene {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<WebScene, JsValue> {
        Self::from_toml("")
    }

    /// Build a scene from a TOML config string
    pub fn from_toml(config: &str) -> Result<WebScene, JsValue> {
        let scene = Scene::from_toml(config).map_err(js_error)?;
        Ok(WebScene {
            scene: Rc::new(RefCell::new(scene)),
        })
    }

    /// Pointer moved to `(x, y)` CSS pixels in a `width × height` viewport
    pub fn pointer_move(&self, x: f64, y: f64, width: f64, height: f64) {
        self.scene
            .borrow_mut()
            .session
            .on_pointer_move(x, y, width, height);
    }

    /// Pointer entered an element; returns whether the cursor now hovers
    pub fn pointer_over(&self, interactive: bool) -> bool {
        self.scene
            .borrow_mut()
            .session
            .on_pointer_over(Some(&interactive))
            .is_hovering()
    }

    /// Advance one frame by hand, for hosts running their own loop
    pub fn frame(&self, elapsed: f64, delta: f64) {
        let mut scene = self.scene.borrow_mut();
        let frame = scene.last.map_or(0, |s| s.clock.frame + 1);
        let state = scene.session.frame(FrameClock {
            elapsed,
            delta,
            frame,
        });
        scene.last = Some(state);
    }

    #[wasm_bindgen(getter)]
    pub fn pitch(&self) -> f64 {
        self.last_state().map_or(0.0, |s| s.orientation.pitch)
    }

    #[wasm_bindgen(getter)]
    pub fn yaw(&self) -> f64 {
        self.last_state().map_or(0.0, |s| s.orientation.yaw)
    }

    #[wasm_bindgen(getter)]
    pub fn hovering(&self) -> bool {
        self.scene.borrow().session.hover().is_hovering()
    }

    #[wasm_bindgen(getter)]
    pub fn cursor_x(&self) -> f64 {
        self.last_state().map_or(0.0, |s| s.cursor.x)
    }

    #[wasm_bindgen(getter)]
    pub fn cursor_y(&self) -> f64 {
        self.last_state().map_or(0.0, |s| s.cursor.y)
    }

    #[wasm_bindgen(getter)]
    pub fn cursor_scale(&self) -> f64 {
        self.last_state().map_or(1.0, |s| s.cursor.scale)
    }

    #[wasm_bindgen(getter)]
    pub fn cursor_rotation(&self) -> f64 {
        self.last_state().map_or(0.0, |s| s.cursor.rotation_deg)
    }

    /// Attach to `<canvas id=canvas_id>` and start animating.
    ///
    /// A scene drives at most one canvas; mounting again before `unmount()`
    /// is an error.
    pub fn mount(&self, canvas_id: &str) -> Result<Mount, JsValue> {
        if self.scene.borrow().mounted {
            return Err(js_error("scene is already mounted"));
        }
        let window = web_sys::window().ok_or_else(|| js_error("no global window"))?;
        let document = window.document().ok_or_else(|| js_error("no document"))?;
        let canvas = document
            .get_element_by_id(canvas_id)
            .ok_or_else(|| js_error(format!("no element with id {canvas_id}")))?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| js_error(format!("#{canvas_id} is not a canvas")))?;
        let context = canvas
            .get_context("2d")?
            .ok_or_else(|| js_error("2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| js_error("unexpected context type"))?;

        let on_move = {
            let scene = self.scene.clone();
            let window = window.clone();
            Closure::<dyn FnMut(MouseEvent)>::new(move |event: MouseEvent| {
                let width = window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(1.0);
                let height = window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(1.0);
                scene.borrow_mut().session.on_pointer_move(
                    event.client_x() as f64,
                    event.client_y() as f64,
                    width,
                    height,
                );
            })
        };
        let on_over = {
            let scene = self.scene.clone();
            Closure::<dyn FnMut(MouseEvent)>::new(move |event: MouseEvent| {
                let interactive = flagged_in_ancestry(
                    event.target().and_then(|t| t.dyn_into::<Element>().ok()),
                    |el| el.has_attribute(INTERACTIVE_ATTR),
                    |el: &Element| el.parent_element(),
                );
                scene
                    .borrow_mut()
                    .session
                    .on_pointer_over(Some(&interactive));
            })
        };
        window.add_event_listener_with_callback("mousemove", on_move.as_ref().unchecked_ref())?;
        window.add_event_listener_with_callback("mouseover", on_over.as_ref().unchecked_ref())?;

        let origin = window.performance().map_or(0.0, |p| p.now());
        let mut render_loop = RenderLoop::start(Duration::from_secs_f64(origin / 1000.0));
        let token = render_loop.token();

        let frame_callback: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>> = Rc::new(RefCell::new(None));
        let frame_id = Rc::new(Cell::new(None));
        {
            let scene = self.scene.clone();
            let callback = frame_callback.clone();
            let id = frame_id.clone();
            let window = window.clone();
            *frame_callback.borrow_mut() = Some(Closure::<dyn FnMut(f64)>::new(move |timestamp: f64| {
                let now = Duration::from_secs_f64(timestamp.max(0.0) / 1000.0);
                let running = scene
                    .borrow_mut()
                    .animate(&mut render_loop, now, &context, &canvas)
                    .unwrap_or_else(|e| {
                        console_log!("neonwire: frame failed: {:?}", e);
                        false
                    });
                if !running {
                    id.set(None);
                    return;
                }
                if let Some(next) = callback.borrow().as_ref() {
                    match window.request_animation_frame(next.as_ref().unchecked_ref()) {
                        Ok(handle) => id.set(Some(handle)),
                        Err(e) => {
                            console_log!("neonwire: requestAnimationFrame failed: {:?}", e);
                            id.set(None);
                        }
                    }
                }
            }));
        }
        if let Some(first) = frame_callback.borrow().as_ref() {
            frame_id.set(Some(window.request_animation_frame(first.as_ref().unchecked_ref())?));
        }

        self.scene.borrow_mut().claim_mount();
        console_log!("neonwire: mounted on #{}", canvas_id);
        Ok(Mount {
            window,
            scene: self.scene.clone(),
            on_move,
            on_over,
            frame_callback,
            frame_id,
            token,
            released: false,
        })
    }

    fn last_state(&self) -> Option<FrameState> {
        self.scene.borrow().last
    }
}

/// Live listeners and frame loop of a mounted scene.
///
/// `unmount()` (or dropping the handle) removes both listeners, cancels the
/// pending animation frame and stops the render loop.
#[wasm_bindgen]
pub struct Mount {
    window: Window,
    scene: Rc<RefCell<Scene>>,
    on_move: Closure<dyn FnMut(MouseEvent)>,
    on_over: Closure<dyn FnMut(MouseEvent)>,
    frame_callback: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>,
    frame_id: Rc<Cell<Option<i32>>>,
    token: CancelToken,
    released: bool,
}

#[wasm_bindgen]
impl Mount {
    pub fn unmount(&mut self) {
        if self.released {
            return;
        }
        self.released = true;
        self.token.cancel();

        if let Some(id) = self.frame_id.take() {
            if let Err(e) = self.window.cancel_animation_frame(id) {
                console_log!("neonwire: cancelAnimationFrame failed: {:?}", e);
            }
        }
        for (kind, listener) in [("mousemove", &self.on_move), ("mouseover", &self.on_over)] {
            if let Err(e) = self
                .window
                .remove_event_listener_with_callback(kind, listener.as_ref().unchecked_ref())
            {
                console_log!("neonwire: removing {} listener failed: {:?}", kind, e);
            }
        }

        // Breaks the callback's reference to itself
        self.frame_callback.borrow_mut().take();
        self.scene.borrow_mut().release_mount();
        console_log!("neonwire: unmounted");
    }

    #[wasm_bindgen(getter)]
    pub fn mounted(&self) -> bool {
        !self.released
    }
}

impl Drop for Mount {
    fn drop(&mut self) {
        self.unmount();
    }
}
