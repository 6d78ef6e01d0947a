// Host-side tests for the audio crossfade mixer.

use monsoon_core::*;
use std::time::Duration;

fn ms(v: u64) -> Duration {
    Duration::from_millis(v)
}

fn unmuted_at(progress: f32) -> CrossfadeMixer {
    let mut mixer = CrossfadeMixer::new();
    for id in TrackId::ALL {
        mixer.mark_ready(id);
    }
    mixer.update(progress);
    assert_eq!(mixer.toggle_mute(), PlaybackCommand::PlayAll);
    mixer
}

#[test]
fn dry_wind_envelope_peaks_early_and_is_gone_by_mid_arc() {
    let env = TrackId::DryWind.envelope();
    assert!((env.volume_at(0.05) - env.peak()).abs() < 1e-6);
    assert!(env.peak() > 0.7);
    assert_eq!(env.volume_at(0.4), 0.0);
}

#[test]
fn envelopes_tell_the_story_in_order() {
    let peak_at = |id: TrackId| {
        let env = id.envelope();
        (0..=100)
            .map(|i| i as f32 / 100.0)
            .fold((0.0_f32, -1.0_f32), |(bp, bv), p| {
                let v = env.volume_at(p);
                if v > bv {
                    (p, v)
                } else {
                    (bp, bv)
                }
            })
            .0
    };
    let a = peak_at(TrackId::DryWind);
    let b = peak_at(TrackId::Thunder);
    let c = peak_at(TrackId::HeavyRain);
    let d = peak_at(TrackId::Conclusion);
    assert!(a < b && b < c && c < d, "peaks out of order: {a} {b} {c} {d}");
    assert_eq!(TrackId::Conclusion.envelope().volume_at(0.5), 0.0);
    assert!(TrackId::Conclusion.envelope().volume_at(1.0) > 0.5);
}

#[test]
fn muted_mixer_stays_silent() {
    let mut mixer = CrossfadeMixer::new();
    assert!(mixer.is_muted());
    mixer.update(0.45);
    let (volumes, cmd) = mixer.advance(ms(1000));
    assert_eq!(volumes, [0.0; 4]);
    assert_eq!(cmd, PlaybackCommand::None);
}

#[test]
fn unmute_records_interaction_and_eases_in() {
    let mut mixer = unmuted_at(0.05);
    assert!(mixer.has_interacted());
    let (half, _) = mixer.advance(ms(250));
    assert!(half[0] > 0.0 && half[0] < 0.8, "not eased: {}", half[0]);
    let (full, _) = mixer.advance(ms(250));
    assert!((full[0] - 0.8).abs() < 1e-6);
    assert_eq!(full[1], 0.0);
    assert_eq!(full[2], 0.0);
    assert_eq!(full[3], 0.0);
}

#[test]
fn retarget_starts_from_the_current_volume() {
    let mut mixer = unmuted_at(0.05);
    let (mid, _) = mixer.advance(ms(200));
    mixer.update(0.4);
    assert!((mixer.track(TrackId::DryWind).volume() - mid[0]).abs() < 1e-6);
    let (next, _) = mixer.advance(ms(16));
    assert!(next[0] < mid[0] && next[0] > 0.0);
    let (done, _) = mixer.advance(ms(600));
    assert_eq!(done[0], 0.0);
}

#[test]
fn mute_fades_out_then_pauses_once() {
    let mut mixer = unmuted_at(0.5);
    mixer.advance(ms(600));
    assert!(mixer.track(TrackId::HeavyRain).volume() > 0.9);

    assert_eq!(mixer.toggle_mute(), PlaybackCommand::None);
    let (v, cmd) = mixer.advance(ms(500));
    assert!(v[2] > 0.0 && v[2] < 1.0);
    assert_eq!(cmd, PlaybackCommand::None);

    let (v, cmd) = mixer.advance(ms(500));
    assert_eq!(v, [0.0; 4]);
    assert_eq!(cmd, PlaybackCommand::PauseAll);

    let (_, cmd) = mixer.advance(ms(16));
    assert_eq!(cmd, PlaybackCommand::None);

    // Scrolling while muted does not bring sound back.
    mixer.update(0.5);
    let (v, _) = mixer.advance(ms(600));
    assert_eq!(v, [0.0; 4]);
}

#[test]
fn failed_track_is_silent_and_does_not_disturb_others() {
    let mut mixer = CrossfadeMixer::new();
    mixer.mark_failed(TrackId::Thunder);
    mixer.mark_ready(TrackId::Thunder);
    assert_eq!(mixer.track(TrackId::Thunder).load, LoadState::Failed);
    mixer.update(0.3);
    assert_eq!(mixer.toggle_mute(), PlaybackCommand::PlayAll);
    let (v, _) = mixer.advance(ms(600));
    assert_eq!(v[1], 0.0);
    assert!(v[0] > 0.2 && v[0] < 0.3, "dry wind {}", v[0]);
}

#[test]
fn volumes_are_always_in_range() {
    let mut mixer = unmuted_at(0.0);
    for i in 0..=200 {
        let p = match i % 7 {
            0 => f32::NAN,
            1 => 5.0,
            2 => -3.0,
            _ => i as f32 / 200.0,
        };
        mixer.update(p);
        let (v, _) = mixer.advance(ms(7));
        for x in v {
            assert!((0.0..=1.0).contains(&x), "volume {x} at step {i}");
        }
    }
}

#[test]
fn volume_ramp_snaps_with_zero_duration() {
    let mut ramp = VolumeRamp::default();
    ramp.retarget(0.6, 0.0);
    assert_eq!(ramp.value(), 0.6);
    assert!(ramp.is_settled());
    ramp.retarget(2.0, 0.5);
    assert_eq!(ramp.target(), 1.0);
    assert_eq!(ramp.advance(ms(500)), 1.0);
}
