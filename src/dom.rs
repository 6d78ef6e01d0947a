use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

/// An event listener that is removed from its target when dropped.
pub struct EventListener {
    target: web::EventTarget,
    kind: &'static str,
    closure: Closure<dyn FnMut(web::Event)>,
}

impl EventListener {
    pub fn new(
        target: &web::EventTarget,
        kind: &'static str,
        handler: impl FnMut(web::Event) + 'static,
    ) -> Result<Self, JsValue> {
        let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(web::Event)>);
        target.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())?;
        Ok(Self {
            target: target.clone(),
            kind,
            closure,
        })
    }

    /// Listener with a typed event; events of another type are ignored.
    pub fn typed<E: JsCast + 'static>(
        target: &web::EventTarget,
        kind: &'static str,
        mut handler: impl FnMut(E) + 'static,
    ) -> Result<Self, JsValue> {
        Self::new(target, kind, move |ev: web::Event| {
            if let Ok(ev) = ev.dyn_into::<E>() {
                handler(ev);
            }
        })
    }
}

impl Drop for EventListener {
    fn drop(&mut self) {
        _ = self
            .target
            .remove_event_listener_with_callback(self.kind, self.closure.as_ref().unchecked_ref());
    }
}

pub fn query(document: &web::Document, selector: &str) -> Option<web::HtmlElement> {
    document
        .query_selector(selector)
        .ok()
        .flatten()
        .and_then(|el| el.dyn_into::<web::HtmlElement>().ok())
}

pub fn query_in(parent: &web::Element, selector: &str) -> Option<web::HtmlElement> {
    parent
        .query_selector(selector)
        .ok()
        .flatten()
        .and_then(|el| el.dyn_into::<web::HtmlElement>().ok())
}

pub fn query_all(document: &web::Document, selector: &str) -> Vec<web::HtmlElement> {
    let list = match document.query_selector_all(selector) {
        Ok(l) => l,
        Err(_) => return Vec::new(),
    };
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|n| n.dyn_into::<web::HtmlElement>().ok())
        .collect()
}

#[inline]
pub fn set_style(el: &web::HtmlElement, prop: &str, value: &str) {
    _ = el.style().set_property(prop, value);
}

#[inline]
pub fn clear_style(el: &web::HtmlElement, prop: &str) {
    _ = el.style().remove_property(prop);
}

/// Page-space top of an element: viewport rect plus current scroll.
pub fn page_top(el: &web::Element, scroll_y: f64) -> f64 {
    el.get_bounding_client_rect().top() + scroll_y
}

pub fn scroll_y(window: &web::Window) -> f64 {
    window.scroll_y().unwrap_or(0.0)
}

pub fn viewport_size(window: &web::Window) -> (f64, f64) {
    let w = window
        .inner_width()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);
    let h = window
        .inner_height()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);
    (w, h)
}

pub fn scroll_height(document: &web::Document) -> f64 {
    document
        .document_element()
        .map(|el| el.scroll_height() as f64)
        .unwrap_or(0.0)
}

pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement) -> f64 {
    let dpr = web::window().map(|w| w.device_pixel_ratio()).unwrap_or(1.0);
    let rect = canvas.get_bounding_client_rect();
    let (w_px, h_px) = crate::input::backing_size(rect.width(), rect.height(), dpr);
    canvas.set_width(w_px);
    canvas.set_height(h_px);
    dpr
}
