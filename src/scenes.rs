use crate::constants::*;
use crate::css;
use crate::dom;
use monsoon_core::{parallax_offset, parse_speed, SceneBounds, SceneTransition, TransitionLayer};
use web_sys as web;

struct SceneEls {
    root: web::HtmlElement,
    bg: Option<web::HtmlElement>,
    content: Option<web::HtmlElement>,
}

struct ParallaxEl {
    el: web::HtmlElement,
    speed: f32,
    /// Index of the enclosing `.scene`, if any.
    scene: Option<usize>,
    own_bounds: SceneBounds,
    last_offset: Option<f32>,
}

/// Scene entrances, bleed transitions and `data-speed` parallax, styled straight from
/// the smoothed scroll offset.
pub struct SceneLayer {
    scenes: Vec<SceneEls>,
    layer: TransitionLayer,
    parallax: Vec<ParallaxEl>,
}

impl SceneLayer {
    pub fn mount(document: &web::Document, window: &web::Window) -> Self {
        let scroll_y = dom::scroll_y(window);
        let scenes: Vec<SceneEls> = dom::query_all(document, SCENE_SELECTOR)
            .into_iter()
            .map(|root| SceneEls {
                bg: dom::query_in(&root, SCENE_BG_SELECTOR),
                content: dom::query_in(&root, SCENE_CONTENT_SELECTOR),
                root,
            })
            .collect();
        let layer = TransitionLayer::new(scenes.iter().map(|s| measure(&s.root, scroll_y)));
        for (els, slot) in scenes.iter().zip(layer.scenes()) {
            dom::set_style(&els.root, "z-index", &slot.z_index.to_string());
        }

        let parallax = dom::query_all(document, PARALLAX_SELECTOR)
            .into_iter()
            .map(|el| {
                let speed = parse_speed(el.get_attribute(PARALLAX_SPEED_ATTR).as_deref());
                let scene = el
                    .closest(SCENE_SELECTOR)
                    .ok()
                    .flatten()
                    .and_then(|s| scenes.iter().position(|e| *e.root == s));
                let own_bounds = measure(&el, scroll_y);
                ParallaxEl {
                    el,
                    speed,
                    scene,
                    own_bounds,
                    last_offset: None,
                }
            })
            .collect::<Vec<_>>();

        log::info!(
            "[scenes] scenes={} parallax_layers={}",
            scenes.len(),
            parallax.len()
        );
        Self {
            scenes,
            layer,
            parallax,
        }
    }

    /// Re-measure after a resize. Parallax layers are measured with their
    /// current transform removed.
    pub fn relayout(&mut self, window: &web::Window) {
        let scroll_y = dom::scroll_y(window);
        self.layer
            .relayout(self.scenes.iter().map(|s| measure(&s.root, scroll_y)));
        for p in self.parallax.iter_mut() {
            dom::clear_style(&p.el, "transform");
            p.own_bounds = measure(&p.el, scroll_y);
            p.last_offset = None;
        }
    }

    pub fn update(&mut self, scroll_y: f32, viewport_h: f32) {
        for u in self.layer.update(scroll_y, viewport_h) {
            if let Some(els) = self.scenes.get(u.index) {
                apply_style(els, &u.style);
            }
        }

        let slots = self.layer.scenes();
        for p in self.parallax.iter_mut() {
            let bounds = p
                .scene
                .and_then(|i| slots.get(i))
                .map(|s| s.bounds)
                .unwrap_or(p.own_bounds);
            let offset = parallax_offset(bounds, scroll_y, viewport_h, p.speed);
            if p.last_offset.map_or(true, |last| (last - offset).abs() > 0.01) {
                p.last_offset = Some(offset);
                dom::set_style(&p.el, "transform", &css::translate_y(offset));
            }
        }
    }

    /// Drop every inline style this layer wrote.
    pub fn release(&mut self) {
        for els in &self.scenes {
            dom::clear_style(&els.root, "z-index");
            for el in els.bg.iter().chain(els.content.iter()) {
                dom::clear_style(el, "opacity");
                dom::clear_style(el, "transform");
            }
        }
        for p in &self.parallax {
            dom::clear_style(&p.el, "transform");
        }
        self.scenes.clear();
        self.parallax.clear();
    }
}

fn measure(el: &web::Element, scroll_y: f64) -> SceneBounds {
    let rect = el.get_bounding_client_rect();
    SceneBounds::new(dom::page_top(el, scroll_y) as f32, rect.height() as f32)
}

fn apply_style(els: &SceneEls, s: &SceneTransition) {
    if let Some(bg) = &els.bg {
        dom::set_style(bg, "opacity", &css::opacity(s.bg_opacity));
        dom::set_style(bg, "transform", &css::scale(s.bg_scale));
    }
    if let Some(content) = &els.content {
        dom::set_style(content, "opacity", &css::opacity(s.content_opacity));
        dom::set_style(content, "transform", &css::translate_y(s.content_offset_y));
    }
}
