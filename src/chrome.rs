use crate::constants::*;
use crate::css;
use crate::dom;
use crate::input;
use glam::Vec2;
use std::time::Duration;
use web_sys as web;

/// `.progress-bar-fill` width and `.progress-text` label.
pub struct ProgressIndicator {
    fill: Option<web::HtmlElement>,
    text: Option<web::HtmlElement>,
    last_label: Option<i32>,
    last_width: Option<f32>,
}

impl ProgressIndicator {
    pub fn mount(document: &web::Document) -> Self {
        Self {
            fill: dom::query(document, PROGRESS_FILL_SELECTOR),
            text: dom::query(document, PROGRESS_TEXT_SELECTOR),
            last_label: None,
            last_width: None,
        }
    }

    pub fn update(&mut self, percent: f32) {
        if let Some(fill) = &self.fill {
            if self.last_width.map_or(true, |w| (w - percent).abs() > 0.05) {
                self.last_width = Some(percent);
                dom::set_style(fill, "width", &css::percent(percent));
            }
        }
        let label = percent.round() as i32;
        if let Some(text) = &self.text {
            if self.last_label != Some(label) {
                self.last_label = Some(label);
                text.set_text_content(Some(&css::progress_label(percent)));
            }
        }
    }
}

/// The sound on/off button, if the page has one.
pub struct AudioToggleView {
    button: Option<web::HtmlElement>,
    label: Option<web::HtmlElement>,
}

impl AudioToggleView {
    pub fn mount(document: &web::Document) -> Self {
        let button = dom::query(document, AUDIO_TOGGLE_SELECTOR);
        let label = button
            .as_ref()
            .and_then(|b| dom::query_in(b, AUDIO_LABEL_SELECTOR));
        Self { button, label }
    }

    pub fn button(&self) -> Option<&web::HtmlElement> {
        self.button.as_ref()
    }

    pub fn render(&self, muted: bool) {
        if let Some(b) = &self.button {
            _ = b.class_list().toggle_with_force(ACTIVE_CLASS, !muted);
            b.set_title(if muted {
                "Unmute Ambient Sound"
            } else {
                "Mute Sound"
            });
        }
        if let Some(l) = &self.label {
            l.set_text_content(Some(if muted { "SOUND OFF" } else { "SOUND ON" }));
        }
    }
}

/// Cursor glow and `.mouse-parallax` elements easing toward the pointer.
pub struct PointerFollow {
    glow: Option<web::HtmlElement>,
    layers: Vec<web::HtmlElement>,
    pointer: Option<Vec2>,
    glow_pos: Vec2,
    parallax: Vec2,
}

impl PointerFollow {
    pub fn mount(document: &web::Document) -> Self {
        Self {
            glow: dom::query(document, CURSOR_GLOW_SELECTOR),
            layers: dom::query_all(document, MOUSE_PARALLAX_SELECTOR),
            pointer: None,
            glow_pos: Vec2::ZERO,
            parallax: Vec2::ZERO,
        }
    }

    pub fn set_pointer(&mut self, client: Vec2) {
        if self.pointer.is_none() {
            self.glow_pos = client;
        }
        self.pointer = Some(client);
    }

    pub fn tick(&mut self, dt: Duration, viewport: Vec2) {
        let pointer = match self.pointer {
            Some(p) => p,
            None => return,
        };
        let dt_sec = dt.as_secs_f32();

        if let Some(glow) = &self.glow {
            let next = input::follow(self.glow_pos, pointer, dt_sec, CURSOR_FOLLOW_TAU_SEC);
            if next.distance_squared(self.glow_pos) > 0.01 {
                dom::set_style(glow, "transform", &css::translate(next.x, next.y));
            }
            self.glow_pos = next;
        }

        if !self.layers.is_empty() {
            let target = input::mouse_parallax_target(pointer, viewport, MOUSE_PARALLAX_RANGE_PX);
            let next = input::follow(self.parallax, target, dt_sec, MOUSE_PARALLAX_TAU_SEC);
            if next.distance_squared(self.parallax) > 1e-4 {
                let value = css::translate(next.x, next.y);
                for el in &self.layers {
                    dom::set_style(el, "transform", &value);
                }
            }
            self.parallax = next;
        }
    }

    pub fn release(&mut self) {
        for el in self.glow.iter().chain(self.layers.iter()) {
            dom::clear_style(el, "transform");
        }
        self.pointer = None;
    }
}
