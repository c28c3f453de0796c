//! Particle network rendering module

use std::cell::RefCell;
use std::f64::consts::TAU;
use std::rc::Rc;

use gloo::events::EventListener;
use js_sys::Math;
use wasm_bindgen::prelude::*;
use web_sys::{console, CanvasRenderingContext2d, HtmlCanvasElement};

use crate::constants::*;
use crate::dom;
use crate::frame::FrameLoop;
use crate::particles::ParticleField;

#[wasm_bindgen]
pub struct RenderResult {
    pub fps: u32,
    pub time: f64,
    pub particle_count: u32,
    pub connections: u32,
}

/// Full-viewport 2D canvas showing a `ParticleField` and its connectors.
#[wasm_bindgen]
pub struct NetworkRenderer {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    field: ParticleField,

    time: f64,
    last_time: Option<f64>,

    frame_count: u32,
    fps_last_time: f64,
    current_fps: u32,
    last_connections: u32,
}

#[wasm_bindgen]
impl NetworkRenderer {
    #[wasm_bindgen(constructor)]
    pub fn new(particle_count: u32, connection_distance: f64) -> Result<NetworkRenderer, JsValue> {
        let canvas: HtmlCanvasElement =
            dom::append_to_body("canvas", "particle-canvas")?.dyn_into()?;

        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or("2D context is not supported")?
            .dyn_into()?;

        let (width, height) = dom::viewport_size()?;
        canvas.set_width(width as u32);
        canvas.set_height(height as u32);

        let field = ParticleField::new(
            particle_count as usize,
            canvas.width() as f64,
            canvas.height() as f64,
            connection_distance,
            Math::random,
        );

        dom::log(&format!(
            "Particle network initialized with {} particles on {}x{}",
            field.len(),
            canvas.width(),
            canvas.height()
        ));

        Ok(Self {
            canvas,
            ctx,
            field,
            time: 0.0,
            last_time: None,
            frame_count: 0,
            fps_last_time: 0.0,
            current_fps: 0,
            last_connections: 0,
        })
    }

    /// Matches the canvas to the viewport. Particles keep their positions.
    pub fn resize(&mut self) -> Result<(), JsValue> {
        let (width, height) = dom::viewport_size()?;
        self.canvas.set_width(width as u32);
        self.canvas.set_height(height as u32);
        self.field
            .resize(self.canvas.width() as f64, self.canvas.height() as f64);
        Ok(())
    }

    pub fn render(&mut self, current_time: f64) -> RenderResult {
        let delta = self
            .last_time
            .map_or(0.0, |last| (current_time - last) * 0.001);
        self.last_time = Some(current_time);

        self.frame_count += 1;
        if current_time - self.fps_last_time >= 1000.0 {
            self.current_fps = self.frame_count;
            self.frame_count = 0;
            self.fps_last_time = current_time;
        }
        self.time += delta;

        let (width, height) = self.field.size();
        self.ctx.clear_rect(0.0, 0.0, width, height);

        self.field.step();
        self.draw_particles();
        self.last_connections = self.draw_connectors();

        RenderResult {
            fps: self.current_fps,
            time: self.time,
            particle_count: self.field.len() as u32,
            connections: self.last_connections,
        }
    }

    fn draw_particles(&self) {
        self.ctx.set_fill_style_str(PARTICLE_FILL);
        for p in self.field.particles() {
            self.ctx.begin_path();
            if self.ctx.arc(p.x, p.y, p.radius, 0.0, TAU).is_ok() {
                self.ctx.fill();
            }
        }
    }

    fn draw_connectors(&self) -> u32 {
        let particles = self.field.particles();
        self.ctx.set_line_width(CONNECTION_LINE_WIDTH);

        let mut drawn = 0;
        for connector in self.field.connectors() {
            let (from, to) = (&particles[connector.a], &particles[connector.b]);
            self.ctx.begin_path();
            self.ctx.move_to(from.x, from.y);
            self.ctx.line_to(to.x, to.y);
            self.ctx
                .set_stroke_style_str(&format!("rgba({CONNECTION_RGB}, {})", connector.alpha));
            self.ctx.stroke();
            drawn += 1;
        }
        drawn
    }

    #[cfg(feature = "configurable")]
    pub fn set_connection_distance(&mut self, value: f64) {
        self.field.set_connection_distance(value);
    }

    pub fn get_fps(&self) -> u32 {
        self.current_fps
    }
    pub fn get_time(&self) -> f64 {
        self.time
    }
    pub fn get_particle_count(&self) -> u32 {
        self.field.len() as u32
    }
    pub fn get_connection_distance(&self) -> f64 {
        self.field.connection_distance()
    }
    pub fn get_connections(&self) -> u32 {
        self.last_connections
    }
}

impl Drop for NetworkRenderer {
    fn drop(&mut self) {
        dom::detach(&self.canvas);
    }
}

/// Runs a `NetworkRenderer` every frame and keeps it sized to the window.
pub struct ParticleNetwork {
    renderer: Rc<RefCell<NetworkRenderer>>,
    frames: FrameLoop,
    _resize: EventListener,
}

impl ParticleNetwork {
    pub fn mount(particle_count: u32, connection_distance: f64) -> Result<Self, JsValue> {
        let renderer = Rc::new(RefCell::new(NetworkRenderer::new(
            particle_count,
            connection_distance,
        )?));

        let frame_renderer = Rc::clone(&renderer);
        let frames = FrameLoop::start(move |timestamp| {
            frame_renderer.borrow_mut().render(timestamp);
        });

        let resize_renderer = Rc::clone(&renderer);
        let resize = EventListener::new(dom::window()?.as_ref(), "resize", move |_| {
            if let Err(err) = resize_renderer.borrow_mut().resize() {
                console::warn_2(&format!("{LOG_PREFIX} Canvas resize failed:").into(), &err);
            }
        });

        Ok(Self {
            renderer,
            frames,
            _resize: resize,
        })
    }

    pub fn stop(&self) {
        self.frames.stop();
    }

    pub fn is_running(&self) -> bool {
        self.frames.is_running()
    }

    pub fn fps(&self) -> u32 {
        self.renderer.borrow().get_fps()
    }

    pub fn particle_count(&self) -> u32 {
        self.renderer.borrow().get_particle_count()
    }

    #[cfg(feature = "configurable")]
    pub fn set_connection_distance(&self, value: f64) {
        self.renderer.borrow_mut().set_connection_distance(value);
    }
}
