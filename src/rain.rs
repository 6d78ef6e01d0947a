use crate::constants::*;
use crate::css;
use crate::dom;
use crate::input;
use glam::Vec2;
use monsoon_core::constants::RAIN_LAYER_FADE_SEC;
use monsoon_core::{layer_opacity, RainPool, RainSurface, TransientPool, WeatherState};
use std::cell::RefCell;
use std::f64::consts::TAU;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

/// `RainSurface` over a 2D canvas context. Coordinates are CSS pixels; the
/// context transform carries the device pixel ratio.
pub struct CanvasSurface {
    ctx: web::CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub fn new(ctx: web::CanvasRenderingContext2d) -> Self {
        Self { ctx }
    }
}

impl RainSurface for CanvasSurface {
    fn clear(&mut self, width: f32, height: f32) {
        self.ctx.clear_rect(0.0, 0.0, width as f64, height as f64);
    }

    fn stroke_segment(&mut self, from: Vec2, to: Vec2, alpha: f32) {
        let ctx = &self.ctx;
        ctx.set_stroke_style_str(&css::rgba(RAIN_STROKE_RGB, alpha));
        ctx.set_line_width(RAIN_LINE_WIDTH_PX);
        ctx.begin_path();
        ctx.move_to(from.x as f64, from.y as f64);
        ctx.line_to(to.x as f64, to.y as f64);
        ctx.stroke();
    }

    fn stroke_ring(&mut self, center: Vec2, radius: f32, alpha: f32) {
        let ctx = &self.ctx;
        ctx.set_stroke_style_str(&css::rgba(RAIN_STROKE_RGB, alpha));
        ctx.set_line_width(RING_LINE_WIDTH_PX);
        ctx.begin_path();
        _ = ctx.arc(center.x as f64, center.y as f64, radius.max(0.0) as f64, 0.0, TAU);
        ctx.stroke();
    }
}

/// The fixed full-viewport rain canvas and the particle pool drawn into it.
pub struct RainLayer {
    canvas: web::HtmlCanvasElement,
    created: bool,
    surface: CanvasSurface,
    pool: RainPool,
    effects: Rc<RefCell<TransientPool>>,
    shown: Option<bool>,
}

impl RainLayer {
    pub fn mount(
        document: &web::Document,
        pool_size: usize,
        seed: u64,
        effects: Rc<RefCell<TransientPool>>,
    ) -> anyhow::Result<Self> {
        let (canvas, created) = find_or_create_canvas(document)?;
        let ctx = canvas
            .get_context("2d")
            .map_err(|e| anyhow::anyhow!("{:?}", e))?
            .ok_or_else(|| anyhow::anyhow!("2d context unavailable"))?
            .dyn_into::<web::CanvasRenderingContext2d>()
            .map_err(|e| anyhow::anyhow!("{:?}", e))?;

        let el: &web::HtmlElement = canvas.as_ref();
        dom::set_style(el, "transition", &format!("opacity {}s ease", RAIN_LAYER_FADE_SEC));
        dom::set_style(el, "opacity", "0");

        let mut layer = Self {
            canvas,
            created,
            surface: CanvasSurface::new(ctx),
            pool: RainPool::new(pool_size, 1.0, 1.0, seed),
            effects,
            shown: None,
        };
        layer.resize();
        log::info!("[rain] pool={} created_canvas={}", pool_size, created);
        Ok(layer)
    }

    /// Match the backing store to the CSS box and rescale the context.
    pub fn resize(&mut self) {
        let dpr = dom::sync_canvas_backing_size(&self.canvas);
        _ = self.surface.ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0);
        let rect = self.canvas.get_bounding_client_rect();
        self.pool.resize(rect.width() as f32, rect.height() as f32);
    }

    pub fn frame(&mut self, weather: &WeatherState, now_sec: f64) {
        self.pool.frame(weather, &mut self.surface);

        let effects = self.effects.borrow();
        let live = effects.live_count(now_sec);
        effects.draw(now_sec, &mut self.surface);

        let show = layer_opacity(weather.intensity) > 0.0 || live > 0;
        if self.shown != Some(show) {
            self.shown = Some(show);
            let el: &web::HtmlElement = self.canvas.as_ref();
            dom::set_style(el, "opacity", if show { "1" } else { "0" });
        }
    }

    /// Local pointer position on the canvas.
    pub fn local_point(&self, client_x: f64, client_y: f64) -> Vec2 {
        let rect = self.canvas.get_bounding_client_rect();
        input::client_to_local(client_x, client_y, rect.left(), rect.top())
    }

    pub fn release(&mut self) {
        let (w, h) = self.pool.size();
        self.surface.clear(w, h);
        if self.created {
            self.canvas.remove();
        } else {
            let el: &web::HtmlElement = self.canvas.as_ref();
            dom::clear_style(el, "opacity");
            dom::clear_style(el, "transition");
        }
    }
}

fn find_or_create_canvas(
    document: &web::Document,
) -> anyhow::Result<(web::HtmlCanvasElement, bool)> {
    if let Some(el) = document.get_element_by_id(RAIN_CANVAS_ID) {
        let canvas = el
            .dyn_into::<web::HtmlCanvasElement>()
            .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;
        return Ok((canvas, false));
    }
    let canvas = document
        .create_element("canvas")
        .map_err(|e| anyhow::anyhow!("{:?}", e))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    canvas.set_id(RAIN_CANVAS_ID);
    let el: &web::HtmlElement = canvas.as_ref();
    for (prop, value) in [
        ("position", "fixed"),
        ("inset", "0"),
        ("width", "100vw"),
        ("height", "100vh"),
        ("pointer-events", "none"),
    ] {
        dom::set_style(el, prop, value);
    }
    dom::set_style(el, "z-index", &RAIN_CANVAS_Z_INDEX.to_string());
    let body = document
        .body()
        .ok_or_else(|| anyhow::anyhow!("no body"))?;
    body.append_child(&canvas)
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    Ok((canvas, true))
}
