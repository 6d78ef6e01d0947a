use crate::constants::*;
use crate::css;
use crate::dom;
use monsoon_core::constants::LIGHTNING_PEAK_OPACITY;
use monsoon_core::{
    derive_weather, AtmosphereConfig, Lightning, LightningTriggers, ScrollTelemetry,
    WeatherState,
};
use web_sys as web;

/// Weather derivation plus everything drawn from it outside the rain canvas:
/// lightning flash, bolt and page blur.
pub struct Sky {
    lightning: Lightning,
    triggers: LightningTriggers,
    flash_el: Option<web::HtmlElement>,
    bolt_el: Option<web::HtmlElement>,
    bolt_path: Option<web::Element>,
    body: Option<web::HtmlElement>,
    last_flash: Option<f32>,
    last_blur: Option<f32>,
}

impl Sky {
    pub fn mount(document: &web::Document, config: &AtmosphereConfig) -> Self {
        let bolt_el = dom::query(document, LIGHTNING_BOLT_SELECTOR);
        let bolt_path = bolt_el
            .as_ref()
            .and_then(|b| b.query_selector("path").ok().flatten());
        let flash_el = dom::query(document, LIGHTNING_FLASH_SELECTOR);
        if flash_el.is_none() {
            log::info!("[sky] no {} overlay; flashes are not drawn", LIGHTNING_FLASH_SELECTOR);
        }
        Self {
            lightning: Lightning::new(config.sub_seed(2)),
            triggers: LightningTriggers::new(
                &config.lightning_thresholds,
                config.lightning_surge_velocity,
                config.lightning_surge_window,
            ),
            flash_el,
            bolt_el,
            bolt_path,
            body: document.body(),
            last_flash: None,
            last_blur: None,
        }
    }

    /// Strike now unless a flash is lit or cooling down.
    pub fn strike(&mut self, now_sec: f64) -> bool {
        if !self.lightning.strike(now_sec) {
            return false;
        }
        self.show_bolt();
        true
    }

    fn show_bolt(&self) {
        let bolt = self.lightning.bolt();
        if let Some(path) = &self.bolt_path {
            _ = path.set_attribute("d", BOLT_PATHS[bolt.variant % BOLT_PATHS.len()]);
        }
        if let Some(el) = &self.bolt_el {
            dom::set_style(el, "left", &css::percent(bolt.left_pct));
            dom::set_style(el, "transform", &css::bolt_transform(bolt.scale));
        }
    }

    /// Derive this frame's weather and apply flash and blur.
    pub fn on_tick(&mut self, t: &ScrollTelemetry, now_sec: f64) -> WeatherState {
        // Scroll triggers queue until the cooldown ends.
        if self.triggers.observe(t) {
            self.lightning.request();
        }
        if self.lightning.fire_pending(now_sec) {
            self.show_bolt();
        }
        let flash = self.lightning.opacity(now_sec);
        let weather = derive_weather(t).with_flash(flash > 0.0);

        if self.last_flash != Some(flash) {
            self.last_flash = Some(flash);
            if let Some(el) = &self.flash_el {
                dom::set_style(el, "opacity", &css::opacity(flash));
            }
            if let Some(el) = &self.bolt_el {
                dom::set_style(el, "opacity", &css::opacity(flash / LIGHTNING_PEAK_OPACITY));
            }
        }

        if self.last_blur != Some(weather.blur_px) {
            self.last_blur = Some(weather.blur_px);
            if let Some(body) = &self.body {
                dom::set_style(body, "filter", &css::blur_filter(weather.blur_px));
            }
        }
        weather
    }

    pub fn release(&mut self) {
        for el in [&self.flash_el, &self.bolt_el].into_iter().flatten() {
            dom::clear_style(el, "opacity");
        }
        if let Some(el) = &self.bolt_el {
            dom::clear_style(el, "left");
            dom::clear_style(el, "transform");
        }
        if let Some(body) = &self.body {
            dom::clear_style(body, "filter");
        }
        self.last_flash = None;
        self.last_blur = None;
    }
}
