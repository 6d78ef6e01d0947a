use crate::constants::AUDIO_PATHS;
use crate::dom::EventListener;
use monsoon_core::{AtmosError, CrossfadeMixer, LoadState, TrackId};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

struct DeckTrack {
    id: TrackId,
    src: &'static str,
    el: web::HtmlAudioElement,
}

/// The four looping ambience elements. Volumes come from the mixer; the deck
/// only applies them.
pub struct AudioDeck {
    tracks: Vec<DeckTrack>,
    listeners: Vec<EventListener>,
}

impl AudioDeck {
    pub fn mount(mixer: Rc<RefCell<CrossfadeMixer>>) -> anyhow::Result<Self> {
        let mut tracks = Vec::with_capacity(TrackId::ALL.len());
        let mut listeners = Vec::new();

        for (id, src) in TrackId::ALL.into_iter().zip(AUDIO_PATHS) {
            let el = web::HtmlAudioElement::new_with_src(src)
                .map_err(|e| anyhow::anyhow!("{:?}", e))?;
            el.set_loop(true);
            el.set_preload("auto");
            el.set_volume(0.0);

            let mixer_err = mixer.clone();
            let el_err = el.clone();
            let on_error = EventListener::new(el.as_ref(), "error", move |_| {
                let reason = el_err
                    .error()
                    .map(|e| format!("media error code {}", e.code()))
                    .unwrap_or_else(|| "unknown media error".to_string());
                log::warn!(
                    "[audio] {}",
                    AtmosError::AudioLoad {
                        track: id,
                        src: src.to_string(),
                        reason,
                    }
                );
                mixer_err.borrow_mut().mark_failed(id);
            })
            .map_err(|e| anyhow::anyhow!("{:?}", e))?;

            let mixer_ok = mixer.clone();
            let on_ready = EventListener::new(el.as_ref(), "canplaythrough", move |_| {
                mixer_ok.borrow_mut().mark_ready(id);
            })
            .map_err(|e| anyhow::anyhow!("{:?}", e))?;

            listeners.push(on_error);
            listeners.push(on_ready);
            tracks.push(DeckTrack { id, src, el });
        }

        log::info!("[audio] {} tracks preloading", tracks.len());
        Ok(Self { tracks, listeners })
    }

    /// A deck with no tracks, used when the elements could not be created.
    pub fn silent() -> Self {
        Self {
            tracks: Vec::new(),
            listeners: Vec::new(),
        }
    }

    pub fn apply(&self, volumes: &[f32; 4]) {
        for t in &self.tracks {
            let v = volumes[t.id.index()].clamp(0.0, 1.0) as f64;
            if (t.el.volume() - v).abs() > 1e-4 {
                t.el.set_volume(v);
            }
        }
    }

    /// Start every loadable track together. Autoplay rejections are expected
    /// before a gesture and are only logged.
    pub fn play_all(&self, mixer: &CrossfadeMixer) {
        for t in &self.tracks {
            if mixer.track(t.id).load == LoadState::Failed || !t.el.paused() {
                continue;
            }
            let id = t.id;
            let played: Result<js_sys::Promise, _> = t.el.play();
            match played {
                Ok(promise) => spawn_local(async move {
                    if let Err(e) = JsFuture::from(promise).await {
                        log::debug!(
                            "[audio] {}",
                            AtmosError::PlaybackRejected {
                                track: id,
                                reason: format!("{:?}", e),
                            }
                        );
                    }
                }),
                Err(e) => log::debug!("[audio] play() threw for {}: {:?}", id.name(), e),
            }
        }
    }

    pub fn pause_all(&self) {
        for t in &self.tracks {
            _ = t.el.pause();
        }
    }

    /// Stop playback and drop the sources. Listeners go first so clearing
    /// `src` does not report a load error.
    pub fn release(&mut self) {
        self.listeners.clear();
        for t in self.tracks.drain(..) {
            _ = t.el.pause();
            t.el.set_src("");
            log::debug!("[audio] released {}", t.src);
        }
    }
}
