use crate::constants::MAX_FRAME_DT_SEC;
use crate::dom;
use crate::input;
use glam::Vec2;
use instant::Instant;
use monsoon_core::{ScrollTelemetry, TelemetryAdapter, TelemetryChannel};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// What every subscriber sees for one animation frame.
#[derive(Clone, Copy, Debug)]
pub struct FrameTick {
    pub telemetry: ScrollTelemetry,
    pub dt: Duration,
    /// Seconds since mount.
    pub now_sec: f64,
    /// Smoothed scroll offset in px.
    pub scroll_y: f32,
    pub viewport: Vec2,
}

pub struct FrameContext {
    pub window: web::Window,
    pub document: web::Document,
    pub telemetry: TelemetryAdapter,
    pub channel: TelemetryChannel<FrameTick>,
    pub epoch: Instant,
    pub last_instant: Instant,
}

impl FrameContext {
    pub fn new(
        window: web::Window,
        document: web::Document,
        smoothing_tau_sec: f32,
        epoch: Instant,
    ) -> Self {
        let mut telemetry = TelemetryAdapter::new(smoothing_tau_sec);
        telemetry.jump_to(dom::scroll_y(&window) as f32);
        Self {
            window,
            document,
            telemetry,
            channel: TelemetryChannel::new(),
            epoch,
            last_instant: epoch,
        }
    }

    /// Sample the page once, then notify subscribers in order.
    pub fn frame(&mut self) {
        let now = Instant::now();
        let dt = (now - self.last_instant).min(Duration::from_secs_f32(MAX_FRAME_DT_SEC));
        self.last_instant = now;

        let (vw, vh) = dom::viewport_size(&self.window);
        let raw = dom::scroll_y(&self.window) as f32;
        let extent = input::scroll_extent(dom::scroll_height(&self.document), vh);
        let telemetry = self.telemetry.sample(raw, extent, dt);

        let tick = FrameTick {
            telemetry,
            dt,
            now_sec: (now - self.epoch).as_secs_f64(),
            scroll_y: self.telemetry.position(),
            viewport: Vec2::new(vw as f32, vh as f32),
        };
        self.channel.publish(&tick);
    }
}

/// A running requestAnimationFrame loop. Dropping or cancelling it stops
/// further frames.
pub struct FrameLoop {
    tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>>,
    pending: Rc<Cell<Option<i32>>>,
}

impl FrameLoop {
    pub fn start(frame_ctx: Rc<RefCell<FrameContext>>) -> FrameLoop {
        let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
        let pending: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(None));

        let tick_clone = tick.clone();
        let pending_tick = pending.clone();
        *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
            pending_tick.set(None);
            frame_ctx.borrow_mut().frame();
            request(&tick_clone, &pending_tick);
        }) as Box<dyn FnMut()>));
        request(&tick, &pending);

        FrameLoop { tick, pending }
    }

    /// Cancel the pending frame and drop the callback.
    pub fn cancel(&mut self) {
        if let Some(id) = self.pending.take() {
            if let Some(w) = web::window() {
                _ = w.cancel_animation_frame(id);
            }
        }
        if self.tick.borrow_mut().take().is_some() {
            log::info!("[frame] loop cancelled");
        }
    }
}

impl Drop for FrameLoop {
    fn drop(&mut self) {
        self.cancel();
    }
}

fn request(tick: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>, pending: &Rc<Cell<Option<i32>>>) {
    let slot = tick.borrow();
    let cb = match slot.as_ref() {
        Some(cb) => cb,
        None => return,
    };
    if let Some(w) = web::window() {
        match w.request_animation_frame(cb.as_ref().unchecked_ref()) {
            Ok(id) => pending.set(Some(id)),
            Err(e) => log::error!("[frame] requestAnimationFrame failed: {:?}", e),
        }
    }
}
