//! Ambient audio crossfades driven by scroll progress.
//!
//! All four loops play at once while sound is on; the story position only
//! decides their volumes. Targets come from per-track envelopes and are
//! eased over a short ramp so scrolling never produces audible steps.

use crate::constants::*;
use crate::curve::{ease_out_quad, finite_or, piecewise_linear};
use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TrackId {
    DryWind,
    Thunder,
    HeavyRain,
    Conclusion,
}

impl TrackId {
    pub const ALL: [TrackId; TRACK_COUNT] = [
        TrackId::DryWind,
        TrackId::Thunder,
        TrackId::HeavyRain,
        TrackId::Conclusion,
    ];

    #[inline]
    pub fn index(self) -> usize {
        match self {
            TrackId::DryWind => 0,
            TrackId::Thunder => 1,
            TrackId::HeavyRain => 2,
            TrackId::Conclusion => 3,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            TrackId::DryWind => "dry wind",
            TrackId::Thunder => "thunder",
            TrackId::HeavyRain => "heavy rain",
            TrackId::Conclusion => "conclusion",
        }
    }

    pub fn envelope(self) -> Envelope {
        match self {
            TrackId::DryWind => Envelope::new(DRY_WIND_ENVELOPE),
            TrackId::Thunder => Envelope::new(THUNDER_ENVELOPE),
            TrackId::HeavyRain => Envelope::new(HEAVY_RAIN_ENVELOPE),
            TrackId::Conclusion => Envelope::new(CONCLUSION_ENVELOPE),
        }
    }
}

/// Volume-vs-progress curve through authored knots.
#[derive(Clone, Copy, Debug)]
pub struct Envelope {
    knots: &'static [(f32, f32)],
}

impl Envelope {
    pub const fn new(knots: &'static [(f32, f32)]) -> Self {
        Self { knots }
    }

    pub fn volume_at(&self, progress: f32) -> f32 {
        let p = finite_or(progress, 0.0).clamp(0.0, 1.0);
        piecewise_linear(self.knots, p).clamp(0.0, 1.0)
    }

    /// Highest authored level.
    pub fn peak(&self) -> f32 {
        self.knots
            .iter()
            .map(|&(_, v)| v)
            .fold(0.0_f32, f32::max)
            .clamp(0.0, 1.0)
    }
}

/// Eased tween from the current value to a target. Retargeting restarts
/// from wherever the value is now.
#[derive(Clone, Copy, Debug, Default)]
pub struct VolumeRamp {
    from: f32,
    to: f32,
    elapsed: f32,
    duration: f32,
    value: f32,
}

impl VolumeRamp {
    pub fn retarget(&mut self, target: f32, duration_sec: f32) {
        let target = finite_or(target, 0.0).clamp(0.0, 1.0);
        if (target - self.to).abs() <= f32::EPSILON && !self.is_settled() {
            return;
        }
        self.from = self.value;
        self.to = target;
        self.elapsed = 0.0;
        self.duration = duration_sec.max(0.0);
        if self.duration == 0.0 {
            self.value = target;
        }
    }

    pub fn advance(&mut self, dt: Duration) -> f32 {
        if self.duration > 0.0 && self.elapsed < self.duration {
            self.elapsed = (self.elapsed + dt.as_secs_f32()).min(self.duration);
            let t = ease_out_quad(self.elapsed / self.duration);
            self.value = (self.from + (self.to - self.from) * t).clamp(0.0, 1.0);
        } else {
            self.value = self.to;
        }
        self.value
    }

    #[inline]
    pub fn value(&self) -> f32 {
        self.value
    }

    #[inline]
    pub fn target(&self) -> f32 {
        self.to
    }

    pub fn is_settled(&self) -> bool {
        self.duration == 0.0 || self.elapsed >= self.duration
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    Loading,
    Ready,
    Failed,
}

#[derive(Clone, Debug)]
pub struct TrackMix {
    pub id: TrackId,
    pub envelope: Envelope,
    pub load: LoadState,
    ramp: VolumeRamp,
}

impl TrackMix {
    fn new(id: TrackId) -> Self {
        Self {
            id,
            envelope: id.envelope(),
            load: LoadState::Loading,
            ramp: VolumeRamp::default(),
        }
    }

    #[inline]
    pub fn volume(&self) -> f32 {
        self.ramp.value()
    }
}

/// What the audio elements should do after a mixer call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlaybackCommand {
    None,
    PlayAll,
    PauseAll,
}

pub struct CrossfadeMixer {
    tracks: [TrackMix; TRACK_COUNT],
    muted: bool,
    has_interacted: bool,
    pause_pending: bool,
    last_progress: f32,
}

impl Default for CrossfadeMixer {
    fn default() -> Self {
        Self::new()
    }
}

impl CrossfadeMixer {
    /// Starts muted: audio can only begin after a user gesture.
    pub fn new() -> Self {
        Self {
            tracks: TrackId::ALL.map(TrackMix::new),
            muted: true,
            has_interacted: false,
            pause_pending: false,
            last_progress: 0.0,
        }
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    pub fn has_interacted(&self) -> bool {
        self.has_interacted
    }

    pub fn track(&self, id: TrackId) -> &TrackMix {
        &self.tracks[id.index()]
    }

    pub fn volumes(&self) -> [f32; TRACK_COUNT] {
        [
            self.tracks[0].volume(),
            self.tracks[1].volume(),
            self.tracks[2].volume(),
            self.tracks[3].volume(),
        ]
    }

    /// Record a user gesture that satisfies the autoplay policy.
    pub fn note_interaction(&mut self) {
        self.has_interacted = true;
    }

    pub fn mark_ready(&mut self, id: TrackId) {
        let t = &mut self.tracks[id.index()];
        if t.load != LoadState::Failed {
            t.load = LoadState::Ready;
        }
    }

    /// A track that failed to load goes silent and ignores automation.
    pub fn mark_failed(&mut self, id: TrackId) {
        let t = &mut self.tracks[id.index()];
        t.load = LoadState::Failed;
        t.ramp = VolumeRamp::default();
    }

    fn audible(&self) -> bool {
        !self.muted && self.has_interacted
    }

    /// One audio derivation pass for a telemetry update.
    pub fn update(&mut self, progress: f32) {
        self.last_progress = finite_or(progress, self.last_progress).clamp(0.0, 1.0);
        if !self.audible() {
            return;
        }
        let p = self.last_progress;
        for t in self.tracks.iter_mut() {
            if t.load == LoadState::Failed {
                continue;
            }
            let target = t.envelope.volume_at(p);
            t.ramp.retarget(target, VOLUME_RAMP_SEC);
        }
    }

    /// Flip mute. Unmuting counts as the user gesture and asks for all loops
    /// to start together.
    pub fn toggle_mute(&mut self) -> PlaybackCommand {
        self.set_muted(!self.muted)
    }

    pub fn set_muted(&mut self, muted: bool) -> PlaybackCommand {
        if muted == self.muted {
            return PlaybackCommand::None;
        }
        self.muted = muted;
        if muted {
            for t in self.tracks.iter_mut() {
                if t.load != LoadState::Failed {
                    t.ramp.retarget(0.0, MUTE_FADE_SEC);
                }
            }
            self.pause_pending = true;
            PlaybackCommand::None
        } else {
            self.has_interacted = true;
            self.pause_pending = false;
            let p = self.last_progress;
            self.update(p);
            PlaybackCommand::PlayAll
        }
    }

    /// Step the ramps. Once a mute fade has fully landed, asks once for
    /// playback to stop.
    pub fn advance(&mut self, dt: Duration) -> ([f32; TRACK_COUNT], PlaybackCommand) {
        for t in self.tracks.iter_mut() {
            if t.load == LoadState::Failed {
                continue;
            }
            t.ramp.advance(dt);
        }
        let volumes = self.volumes();
        let mut cmd = PlaybackCommand::None;
        if self.muted && self.pause_pending && self.tracks.iter().all(|t| t.ramp.is_settled()) {
            self.pause_pending = false;
            cmd = PlaybackCommand::PauseAll;
        }
        (volumes, cmd)
    }
}
