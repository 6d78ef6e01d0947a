#![cfg(target_arch = "wasm32")]
use crate::audio::AudioDeck;
use crate::chrome::{AudioToggleView, PointerFollow, ProgressIndicator};
use crate::constants::AUDIO_TOGGLE_SELECTOR;
use crate::dom::EventListener;
use crate::frame::{FrameContext, FrameLoop};
use crate::rain::RainLayer;
use crate::rollback::Rollback;
use crate::scenes::SceneLayer;
use crate::sky::Sky;
use glam::Vec2;
use instant::Instant;
use monsoon_core::{
    progress_percent, AtmosphereConfig, CrossfadeMixer, EffectKind, PlaybackCommand,
    SpawnThrottle, SubscriptionId, TrackId, TransientPool, WeatherState,
};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys as web;

mod audio;
mod chrome;
mod constants;
mod css;
mod dom;
mod frame;
mod input;
mod rain;
mod rollback;
mod scenes;
mod sky;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("monsoon-web loaded");
    Ok(())
}

/// Snapshot of the current weather for JS callers.
#[wasm_bindgen]
#[derive(Clone, Copy, Debug, Default)]
pub struct WeatherView {
    #[wasm_bindgen(readonly)]
    pub intensity: f32,
    #[wasm_bindgen(readonly)]
    pub wind: f32,
    #[wasm_bindgen(readonly)]
    pub flash: bool,
    #[wasm_bindgen(readonly)]
    pub blur_px: f32,
}

impl From<WeatherState> for WeatherView {
    fn from(w: WeatherState) -> Self {
        Self {
            intensity: w.intensity,
            wind: w.wind,
            flash: w.flash,
            blur_px: w.blur_px,
        }
    }
}

/// Mute state shared by the toggle button and the exported handle.
#[derive(Clone)]
struct SoundControl {
    mixer: Rc<RefCell<CrossfadeMixer>>,
    deck: Rc<RefCell<AudioDeck>>,
    view: Rc<AudioToggleView>,
}

impl SoundControl {
    fn toggle(&self) -> bool {
        let cmd = self.mixer.borrow_mut().toggle_mute();
        let mixer = self.mixer.borrow();
        if cmd == PlaybackCommand::PlayAll {
            self.deck.borrow().play_all(&mixer);
        }
        let muted = mixer.is_muted();
        self.view.render(muted);
        log::info!("[audio] muted={}", muted);
        muted
    }
}

struct Mounted {
    frame_loop: FrameLoop,
    frame_ctx: Rc<RefCell<FrameContext>>,
    subscriptions: Vec<SubscriptionId>,
    listeners: Vec<EventListener>,
    weather: Rc<Cell<WeatherState>>,
    sky: Rc<RefCell<Sky>>,
    rain: Rc<RefCell<RainLayer>>,
    effects: Rc<RefCell<TransientPool>>,
    scenes: Rc<RefCell<SceneLayer>>,
    pointer: Rc<RefCell<PointerFollow>>,
    sound: SoundControl,
}

impl Mounted {
    fn now_sec(&self) -> f64 {
        self.frame_ctx.borrow().epoch.elapsed().as_secs_f64()
    }

    fn teardown(mut self) {
        self.frame_loop.cancel();
        {
            let mut ctx = self.frame_ctx.borrow_mut();
            for id in self.subscriptions.drain(..) {
                ctx.channel.unsubscribe(id);
            }
            ctx.channel.clear();
        }
        self.listeners.clear();
        self.sound.deck.borrow_mut().release();
        self.sound.view.render(true);
        self.rain.borrow_mut().release();
        self.effects.borrow_mut().clear();
        self.scenes.borrow_mut().release();
        self.sky.borrow_mut().release();
        self.pointer.borrow_mut().release();
        log::info!("[atmosphere] disposed");
    }
}

/// Handle to a mounted atmosphere. Dropping it (or `free()` from JS) tears
/// everything down.
#[wasm_bindgen]
pub struct Atmosphere {
    mounted: Option<Mounted>,
}

#[wasm_bindgen]
impl Atmosphere {
    /// Mount over the current document with default settings.
    pub fn mount() -> Result<Atmosphere, JsValue> {
        Self::mount_config(AtmosphereConfig::default())
    }

    pub fn mount_with(pool_size: usize, seed: u32) -> Result<Atmosphere, JsValue> {
        Self::mount_config(AtmosphereConfig {
            pool_size,
            seed: seed as u64,
            ..AtmosphereConfig::default()
        })
    }

    /// Stop the loop, remove listeners, release audio and reset styles.
    /// Calling it again does nothing.
    pub fn dispose(&mut self) {
        if let Some(m) = self.mounted.take() {
            m.teardown();
        }
    }

    pub fn weather(&self) -> WeatherView {
        self.mounted
            .as_ref()
            .map(|m| WeatherView::from(m.weather.get()))
            .unwrap_or_default()
    }

    /// Flip sound on or off. Returns the new muted state.
    pub fn toggle_mute(&self) -> bool {
        match &self.mounted {
            Some(m) => m.sound.toggle(),
            None => true,
        }
    }

    pub fn is_muted(&self) -> bool {
        self.mounted
            .as_ref()
            .map_or(true, |m| m.sound.mixer.borrow().is_muted())
    }

    pub fn progress_percent(&self) -> f32 {
        self.mounted
            .as_ref()
            .map_or(0.0, |m| progress_percent(&m.frame_ctx.borrow().telemetry.last()))
    }

    /// Strike lightning now. False while a flash is lit or cooling down.
    pub fn strike_lightning(&self) -> bool {
        match &self.mounted {
            Some(m) => {
                let now = m.now_sec();
                m.sky.borrow_mut().strike(now)
            }
            None => false,
        }
    }
}

impl Atmosphere {
    fn mount_config(config: AtmosphereConfig) -> Result<Atmosphere, JsValue> {
        match mount_inner(config) {
            Ok(m) => Ok(Atmosphere { mounted: Some(m) }),
            Err(e) => {
                log::error!("mount error: {:?}", e);
                Err(JsValue::from_str(&format!("{:#}", e)))
            }
        }
    }
}

impl Drop for Atmosphere {
    fn drop(&mut self) {
        self.dispose();
    }
}

fn mount_inner(config: AtmosphereConfig) -> anyhow::Result<Mounted> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;
    let epoch = Instant::now();

    let effects = Rc::new(RefCell::new(TransientPool::with_capacity(
        config.transient_capacity,
    )));
    let rain = Rc::new(RefCell::new(RainLayer::mount(
        &document,
        config.pool_size,
        config.sub_seed(1),
        effects.clone(),
    )?));
    let sky = Rc::new(RefCell::new(Sky::mount(&document, &config)));
    let scenes = Rc::new(RefCell::new(SceneLayer::mount(&document, &window)));
    let pointer = Rc::new(RefCell::new(PointerFollow::mount(&document)));

    // Undone in reverse if anything below fails.
    let mut rollback = Rollback::new();
    let (rain_u, effects_u) = (rain.clone(), effects.clone());
    rollback.push("rain", move || {
        rain_u.borrow_mut().release();
        effects_u.borrow_mut().clear();
    });
    let sky_u = sky.clone();
    rollback.push("sky", move || sky_u.borrow_mut().release());
    let scenes_u = scenes.clone();
    rollback.push("scenes", move || scenes_u.borrow_mut().release());
    let pointer_u = pointer.clone();
    rollback.push("pointer", move || pointer_u.borrow_mut().release());
    let progress = Rc::new(RefCell::new(ProgressIndicator::mount(&document)));
    let weather = Rc::new(Cell::new(WeatherState::default()));

    let mixer = Rc::new(RefCell::new(CrossfadeMixer::new()));
    let deck = match AudioDeck::mount(mixer.clone()) {
        Ok(d) => d,
        Err(e) => {
            log::warn!("[audio] ambience unavailable: {:?}", e);
            for id in TrackId::ALL {
                mixer.borrow_mut().mark_failed(id);
            }
            AudioDeck::silent()
        }
    };
    let sound = SoundControl {
        mixer: mixer.clone(),
        deck: Rc::new(RefCell::new(deck)),
        view: Rc::new(AudioToggleView::mount(&document)),
    };
    sound.view.render(true);
    let deck_u = sound.deck.clone();
    rollback.push("audio", move || deck_u.borrow_mut().release());

    let frame_ctx = Rc::new(RefCell::new(FrameContext::new(
        window.clone(),
        document.clone(),
        config.smoothing_tau_sec,
        epoch,
    )));

    // Subscribers run in this order every frame.
    let mut subscriptions = Vec::new();
    {
        let mut ctx = frame_ctx.borrow_mut();

        let (sky_s, weather_s) = (sky.clone(), weather.clone());
        subscriptions.push(ctx.channel.subscribe(move |tick| {
            weather_s.set(sky_s.borrow_mut().on_tick(&tick.telemetry, tick.now_sec));
        }));

        let (rain_s, effects_s, weather_s) = (rain.clone(), effects.clone(), weather.clone());
        subscriptions.push(ctx.channel.subscribe(move |tick| {
            effects_s.borrow_mut().sweep(tick.now_sec);
            rain_s.borrow_mut().frame(&weather_s.get(), tick.now_sec);
        }));

        let sound_s = sound.clone();
        subscriptions.push(ctx.channel.subscribe(move |tick| {
            let (volumes, cmd) = {
                let mut mixer = sound_s.mixer.borrow_mut();
                mixer.update(tick.telemetry.progress);
                mixer.advance(tick.dt)
            };
            let deck = sound_s.deck.borrow();
            deck.apply(&volumes);
            if cmd == PlaybackCommand::PauseAll {
                deck.pause_all();
            }
        }));

        let scenes_s = scenes.clone();
        subscriptions.push(ctx.channel.subscribe(move |tick| {
            scenes_s.borrow_mut().update(tick.scroll_y, tick.viewport.y);
        }));

        let (progress_s, pointer_s) = (progress.clone(), pointer.clone());
        subscriptions.push(ctx.channel.subscribe(move |tick| {
            progress_s
                .borrow_mut()
                .update(progress_percent(&tick.telemetry));
            pointer_s.borrow_mut().tick(tick.dt, tick.viewport);
        }));
    }

    let listeners = wire_listeners(
        &window,
        &sound,
        epoch,
        &rain,
        &scenes,
        &sky,
        &effects,
        &pointer,
    )
    .map_err(|e| anyhow::anyhow!("{:?}", e))?;

    rollback.commit();
    let frame_loop = FrameLoop::start(frame_ctx.clone());
    log::info!(
        "[atmosphere] mounted pool={} seed={} subscribers={}",
        config.pool_size,
        config.seed,
        subscriptions.len()
    );

    Ok(Mounted {
        frame_loop,
        frame_ctx,
        subscriptions,
        listeners,
        weather,
        sky,
        rain,
        effects,
        scenes,
        pointer,
        sound,
    })
}

#[allow(clippy::too_many_arguments)]
fn wire_listeners(
    window: &web::Window,
    sound: &SoundControl,
    epoch: Instant,
    rain: &Rc<RefCell<RainLayer>>,
    scenes: &Rc<RefCell<SceneLayer>>,
    sky: &Rc<RefCell<Sky>>,
    effects: &Rc<RefCell<TransientPool>>,
    pointer: &Rc<RefCell<PointerFollow>>,
) -> Result<Vec<EventListener>, JsValue> {
    let mut listeners = Vec::new();

    let (rain_r, scenes_r, window_r) = (rain.clone(), scenes.clone(), window.clone());
    listeners.push(EventListener::new(window.as_ref(), "resize", move |_| {
        rain_r.borrow_mut().resize();
        scenes_r.borrow_mut().relayout(&window_r);
    })?);

    let (rain_p, effects_p, pointer_p) = (rain.clone(), effects.clone(), pointer.clone());
    let mut throttle = SpawnThrottle::default();
    listeners.push(EventListener::typed(
        window.as_ref(),
        "pointermove",
        move |ev: web::PointerEvent| {
            let (cx, cy) = (ev.client_x() as f64, ev.client_y() as f64);
            pointer_p
                .borrow_mut()
                .set_pointer(Vec2::new(cx as f32, cy as f32));
            let now = epoch.elapsed().as_secs_f64();
            if throttle.allow(now) {
                let at = rain_p.borrow().local_point(cx, cy);
                effects_p.borrow_mut().spawn(EffectKind::Ripple, at, now);
            }
        },
    )?);

    let (rain_c, effects_c, sky_c, mixer_c) =
        (rain.clone(), effects.clone(), sky.clone(), sound.mixer.clone());
    listeners.push(EventListener::typed(
        window.as_ref(),
        "click",
        move |ev: web::MouseEvent| {
            if on_audio_toggle(&ev) {
                return;
            }
            mixer_c.borrow_mut().note_interaction();
            let now = epoch.elapsed().as_secs_f64();
            let at = rain_c
                .borrow()
                .local_point(ev.client_x() as f64, ev.client_y() as f64);
            effects_c.borrow_mut().spawn(EffectKind::Shockwave, at, now);
            sky_c.borrow_mut().strike(now);
        },
    )?);

    if let Some(button) = sound.view.button() {
        let sound_b = sound.clone();
        listeners.push(EventListener::new(button.as_ref(), "click", move |_| {
            sound_b.toggle();
        })?);
    }

    Ok(listeners)
}

fn on_audio_toggle(ev: &web::MouseEvent) -> bool {
    ev.target()
        .and_then(|t| t.dyn_into::<web::Element>().ok())
        .and_then(|el| el.closest(AUDIO_TOGGLE_SELECTOR).ok().flatten())
        .is_some()
}
