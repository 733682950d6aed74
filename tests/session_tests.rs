// End-to-end scene flows driven through Session without a browser.

use rand::rngs::StdRng;
use rand::SeedableRng;
use verse_stage::constants::{AMBIENCE_LEVEL, AMPLITUDE_MAX, AMPLITUDE_MIN, DEFAULT_AMPLITUDE};
use verse_stage::core::loader::LoadStatus;
use verse_stage::core::playback::PlaybackState;
use verse_stage::core::route::EntryMode;
use verse_stage::core::session::{Effect, FrameEvent, FrameInput, RenderPath, Session, UiAction};
use verse_stage::core::theme::RAVE;
use verse_stage::core::track::parse_tracks;
use verse_stage::core::{SceneAction, SceneState, Selection, ThemeName, TransitionError, TRACKS_JSON};

const DT: f32 = 1.0 / 60.0;

fn session(mode: EntryMode) -> Session {
    let tracks = parse_tracks(TRACKS_JSON).unwrap();
    Session::new(tracks, mode, &["model", "ambience"], StdRng::seed_from_u64(42)).unwrap()
}

fn tick(s: &mut Session, dt: f32) -> (RenderPath, Vec<FrameEvent>) {
    let out = s.frame(FrameInput {
        dt,
        ..Default::default()
    });
    (out.path, out.events.into_vec())
}

fn run_for(s: &mut Session, secs: f32) -> Vec<FrameEvent> {
    let frames = (secs / DT).ceil() as usize;
    (0..frames).flat_map(|_| tick(s, DT).1).collect()
}

fn ready_menu() -> Session {
    let mut s = session(EntryMode::Normal);
    s.asset_loaded("model");
    s.asset_loaded("ambience");
    s.dispatch(UiAction::Enter).unwrap();
    run_for(&mut s, 1.1);
    assert_eq!(s.state(), SceneState::Menu);
    s
}

fn launched(index: usize) -> Session {
    let mut s = ready_menu();
    let selection = s.carousel().tracks()[index].selection();
    s.dispatch(UiAction::Select { index, selection }).unwrap();
    s.dispatch(UiAction::Launch).unwrap();
    run_for(&mut s, 1.1);
    assert_eq!(s.state(), SceneState::Stage);
    s
}

#[test]
fn debug_entry_goes_straight_to_stage_with_base_theme() {
    let mut s = session(EntryMode::Debug);
    assert_eq!(s.state(), SceneState::Stage);
    assert_eq!(s.load_status(), LoadStatus::Ready);
    assert_eq!(s.stage().unwrap().theme, ThemeName::Base);

    let fx = s.start();
    assert!(fx.contains(&Effect::ShowScene(SceneState::Stage)));
    assert!(fx.contains(&Effect::PlayTrack {
        src: "audio/night-drive.mp3".into(),
        restart: true,
    }));

    let (path, events) = tick(&mut s, DT);
    assert_eq!(path, RenderPath::Stage);
    assert!(events.is_empty());
}

#[test]
fn normal_entry_requests_asset_fetch() {
    let mut s = session(EntryMode::Normal);
    assert_eq!(s.state(), SceneState::Intro);
    let fx = s.start();
    assert!(fx.contains(&Effect::FetchAssets(vec!["ambience".into(), "model".into()])));
    assert!(!fx.iter().any(|e| matches!(e, Effect::PlayTrack { .. })));
    assert_eq!(tick(&mut s, DT).0, RenderPath::Intro);
}

#[test]
fn intro_to_stage_with_rave_theme_reveals_verse_once() {
    let mut s = session(EntryMode::Normal);
    s.asset_loaded("model");
    assert_eq!(s.asset_loaded("ambience"), LoadStatus::Ready);

    let fx = s.dispatch(UiAction::Enter).unwrap();
    assert!(fx.contains(&Effect::ShowScene(SceneState::Menu)));
    let events = run_for(&mut s, 1.1);
    assert!(events.contains(&FrameEvent::TransitionCompleted(SceneState::Menu)));

    let strobe =
        Selection::from_attributes(Some("audio/strobe.mp3"), Some("32"), Some("rave")).unwrap();
    s.dispatch(UiAction::Select {
        index: 1,
        selection: strobe,
    })
    .unwrap();
    let fx = s.dispatch(UiAction::Launch).unwrap();
    assert!(fx.contains(&Effect::PlayTrack {
        src: "audio/strobe.mp3".into(),
        restart: true,
    }));
    s.playback_started("audio/strobe.mp3");
    let stage = s.stage().unwrap();
    assert_eq!(stage.theme, ThemeName::Rave);
    assert_eq!(stage.particle_tint, RAVE.particle_tint);
    assert!(stage.middle_visible && !stage.verse_visible);

    let mut reveals = 0;
    let mut revealed_at = None;
    for _ in 0..(40.0 / DT) as usize {
        let (_, events) = tick(&mut s, DT);
        if events.contains(&FrameEvent::VerseRevealed) {
            reveals += 1;
            revealed_at.get_or_insert(s.clock().unwrap().elapsed());
        }
    }
    assert_eq!(reveals, 1);
    let at = revealed_at.unwrap();
    assert!(at >= 32.0 && at < 32.0 + DT + 1e-3, "revealed at {}", at);

    let stage = s.stage().unwrap();
    assert!(!stage.middle_visible);
    assert!(stage.verse_visible);
    assert_eq!(s.state(), SceneState::Stage);
}

#[test]
fn stage_clock_follows_media_position_when_available() {
    let mut s = session(EntryMode::Debug);
    s.start();
    s.playback_started("audio/night-drive.mp3");
    let out = s.frame(FrameInput {
        dt: DT,
        spectrum: None,
        playback_time: Some(10.0),
    });
    assert!(!out.events.contains(&FrameEvent::VerseRevealed));
    let out = s.frame(FrameInput {
        dt: DT,
        spectrum: None,
        playback_time: Some(21.4),
    });
    assert!(out.events.contains(&FrameEvent::VerseRevealed));
    assert_eq!(s.clock().unwrap().elapsed(), 21.4);
    assert!((s.uniforms().time - 0.214).abs() < 1e-6);
}

#[test]
fn second_launch_during_transition_is_rejected() {
    let mut s = ready_menu();
    s.dispatch(UiAction::Launch).unwrap();
    assert!(s.is_transitioning());
    assert_eq!(
        s.dispatch(UiAction::Launch).unwrap_err(),
        TransitionError::InFlight(SceneState::Stage)
    );
    assert_eq!(
        s.dispatch(UiAction::Back).unwrap_err(),
        TransitionError::InFlight(SceneState::Stage)
    );
}

#[test]
fn actions_invalid_for_the_current_state_are_rejected() {
    let mut s = session(EntryMode::Normal);
    assert_eq!(
        s.dispatch(UiAction::Launch).unwrap_err(),
        TransitionError::Invalid {
            from: SceneState::Intro,
            action: SceneAction::Launch,
        }
    );
    assert_eq!(
        s.dispatch(UiAction::Back).unwrap_err(),
        TransitionError::Invalid {
            from: SceneState::Intro,
            action: SceneAction::Back,
        }
    );
    assert_eq!(
        s.dispatch(UiAction::Enter).unwrap_err(),
        TransitionError::AssetsPending
    );
}

#[test]
fn back_from_stage_pauses_and_tears_down() {
    let mut s = launched(2);
    let fx = s.dispatch(UiAction::Back).unwrap();
    assert!(fx.contains(&Effect::ShowScene(SceneState::Menu)));
    assert!(fx.contains(&Effect::PauseTrack));
    // still drawn while the camera flies back
    assert_eq!(tick(&mut s, DT).0, RenderPath::Stage);

    let events = run_for(&mut s, 1.1);
    assert!(events.contains(&FrameEvent::TransitionCompleted(SceneState::Menu)));
    assert!(events.contains(&FrameEvent::StageTornDown));
    assert!(s.stage().is_none());
    assert!(s.clock().is_none());
    assert_eq!(s.playback().state(), &PlaybackState::Idle);
    assert_eq!(tick(&mut s, DT).0, RenderPath::Intro);
}

#[test]
fn pause_freezes_stage_and_resume_continues_track() {
    let mut s = launched(3);
    let fx = s.dispatch(UiAction::TogglePause).unwrap();
    assert_eq!(fx.as_slice(), &[Effect::PauseTrack]);
    assert!(s.paused());

    let z_before = s.stage().unwrap().particles[0].position.z;
    let elapsed_before = s.clock().unwrap().elapsed();
    let bins = vec![200u8; 512];
    s.frame(FrameInput {
        dt: 0.1,
        spectrum: Some(&bins),
        playback_time: None,
    });
    assert_eq!(s.stage().unwrap().particles[0].position.z, z_before);
    assert_eq!(s.clock().unwrap().elapsed(), elapsed_before);
    assert_eq!(s.uniforms().spectrum[0], 0.0);

    let fx = s.dispatch(UiAction::TogglePause).unwrap();
    assert_eq!(
        fx.as_slice(),
        &[Effect::PlayTrack {
            src: "audio/aerodynamic.mp3".into(),
            restart: false,
        }]
    );
    assert!(!s.paused());
}

#[test]
fn pause_is_ignored_outside_a_settled_stage() {
    let mut s = ready_menu();
    assert!(s.dispatch(UiAction::TogglePause).unwrap().is_empty());
    s.dispatch(UiAction::Launch).unwrap();
    assert!(s.dispatch(UiAction::TogglePause).unwrap().is_empty());
    assert!(!s.paused());
}

#[test]
fn stage_frames_forward_spectrum_and_scaled_time() {
    let mut s = launched(0);
    let bins: Vec<u8> = (0..=255).collect();
    let out = s.frame(FrameInput {
        dt: DT,
        spectrum: Some(&bins),
        playback_time: None,
    });
    assert_eq!(out.path, RenderPath::Stage);
    assert_eq!(s.uniforms().spectrum[10], 10.0);
    assert_eq!(s.uniforms().spectrum[63], 63.0);
    let elapsed = s.clock().unwrap().elapsed();
    assert!((s.uniforms().time - elapsed * 0.01).abs() < 1e-6);
}

#[test]
fn blocked_autoplay_retries_on_next_gesture() {
    let mut s = ready_menu();
    s.dispatch(UiAction::Launch).unwrap();
    let src = s.carousel().current().src.clone();
    s.playback_blocked(&src);
    assert_eq!(s.playback().state(), &PlaybackState::Blocked { src: src.clone() });

    let fx = s.dispatch(UiAction::Gesture).unwrap();
    assert_eq!(
        fx.as_slice(),
        &[Effect::PlayTrack {
            src: src.clone(),
            restart: false,
        }]
    );
    assert!(s.dispatch(UiAction::Gesture).unwrap().is_empty());
    s.playback_started(&src);
    assert_eq!(s.playback().state(), &PlaybackState::Playing { src });
}

#[test]
fn audio_toggle_survives_visibility_changes() {
    let mut s = session(EntryMode::Normal);
    assert_eq!(s.ambience_volume(), AMBIENCE_LEVEL);

    let fx = s.dispatch(UiAction::ToggleAudio).unwrap();
    assert!(fx.contains(&Effect::SetAmbienceVolume(0.0)));
    assert!(fx.contains(&Effect::SetMuted(true)));
    assert!(!s.audio_enabled());

    s.dispatch(UiAction::Visibility { hidden: true }).unwrap();
    let fx = s.dispatch(UiAction::Visibility { hidden: false }).unwrap();
    assert_eq!(fx.as_slice(), &[Effect::SetAmbienceVolume(0.0)]);

    let fx = s.dispatch(UiAction::ToggleAudio).unwrap();
    assert!(fx.contains(&Effect::SetAmbienceVolume(AMBIENCE_LEVEL)));
    assert!(fx.contains(&Effect::SetMuted(false)));

    let fx = s.dispatch(UiAction::Visibility { hidden: true }).unwrap();
    assert_eq!(fx.as_slice(), &[Effect::SetAmbienceVolume(0.0)]);
    let fx = s.dispatch(UiAction::Visibility { hidden: false }).unwrap();
    assert_eq!(fx.as_slice(), &[Effect::SetAmbienceVolume(AMBIENCE_LEVEL)]);
}

#[test]
fn carousel_moves_in_menu_but_not_on_stage() {
    let mut s = ready_menu();
    let fx = s.dispatch(UiAction::Next).unwrap();
    assert_eq!(fx.as_slice(), &[Effect::MoveCarousel { index: 1 }]);
    assert_eq!(s.carousel().selection().theme, ThemeName::Rave);
    s.dispatch(UiAction::Prev).unwrap();
    let fx = s.dispatch(UiAction::Prev).unwrap();
    assert_eq!(fx.as_slice(), &[Effect::MoveCarousel { index: 4 }]);

    s.dispatch(UiAction::Launch).unwrap();
    run_for(&mut s, 1.1);
    assert!(s.dispatch(UiAction::Next).unwrap().is_empty());
    assert_eq!(s.carousel().index(), 4);
}

#[test]
fn advance_key_follows_the_scene_flow() {
    let mut s = session(EntryMode::Normal);
    s.dispatch(UiAction::SkipAssets).unwrap();
    s.dispatch(UiAction::Advance).unwrap();
    run_for(&mut s, 1.1);
    assert_eq!(s.state(), SceneState::Menu);
    s.dispatch(UiAction::Advance).unwrap();
    run_for(&mut s, 1.1);
    assert_eq!(s.state(), SceneState::Stage);
    assert!(s.dispatch(UiAction::Advance).unwrap().is_empty());
}

#[test]
fn failed_assets_block_enter_until_retried_or_skipped() {
    let mut s = session(EntryMode::Normal);
    assert_eq!(
        s.asset_failed("model"),
        LoadStatus::Loading { progress: 0.0 }
    );
    assert_eq!(
        s.asset_loaded("ambience"),
        LoadStatus::Failed {
            assets: vec!["model".into()]
        }
    );
    assert_eq!(
        s.dispatch(UiAction::Enter).unwrap_err(),
        TransitionError::AssetsPending
    );

    let fx = s.dispatch(UiAction::RetryAssets).unwrap();
    assert_eq!(fx.as_slice(), &[Effect::FetchAssets(vec!["model".into()])]);
    assert_eq!(s.load_status(), LoadStatus::Loading { progress: 0.5 });
    assert_eq!(s.asset_failed("model"), LoadStatus::Failed { assets: vec!["model".into()] });

    s.dispatch(UiAction::SkipAssets).unwrap();
    assert_eq!(s.load_status(), LoadStatus::Ready);
    assert!(s.dispatch(UiAction::Enter).is_ok());
}

#[test]
fn amplitude_nudges_only_in_debug_mode() {
    let mut s = session(EntryMode::Normal);
    s.dispatch(UiAction::NudgeAmplitude(1)).unwrap();
    assert_eq!(s.uniforms().amplitude, DEFAULT_AMPLITUDE);

    let mut s = session(EntryMode::Debug);
    s.dispatch(UiAction::NudgeAmplitude(1)).unwrap();
    assert_eq!(s.uniforms().amplitude, DEFAULT_AMPLITUDE + 0.5);
    for _ in 0..40 {
        s.dispatch(UiAction::NudgeAmplitude(1)).unwrap();
    }
    assert_eq!(s.uniforms().amplitude, AMPLITUDE_MAX);
    for _ in 0..40 {
        s.dispatch(UiAction::NudgeAmplitude(-1)).unwrap();
    }
    assert_eq!(s.uniforms().amplitude, AMPLITUDE_MIN);
}

#[test]
fn menu_entry_opens_on_carousel() {
    let mut s = session(EntryMode::Menu);
    assert_eq!(s.state(), SceneState::Menu);
    assert!(s.stage().is_none());
    // launching does not wait for the intro assets
    assert!(s.dispatch(UiAction::Launch).is_ok());
}

#[test]
fn back_from_menu_returns_to_intro() {
    let mut s = ready_menu();
    let fx = s.dispatch(UiAction::Back).unwrap();
    assert_eq!(fx.as_slice(), &[Effect::ShowScene(SceneState::Intro)]);
    let events = run_for(&mut s, 1.1);
    assert_eq!(events, vec![FrameEvent::TransitionCompleted(SceneState::Intro)]);
    assert_eq!(s.state(), SceneState::Intro);
    // assets stay loaded, so the intro can be left again right away
    assert!(s.dispatch(UiAction::Enter).is_ok());
}

#[test]
fn stage_clock_holds_while_autoplay_is_blocked() {
    let mut s = ready_menu();
    s.dispatch(UiAction::Launch).unwrap();
    let src = s.carousel().current().src.clone();
    s.playback_blocked(&src);

    // well past the 21.4 s verse offset of the first track
    let events = run_for(&mut s, 30.0);
    assert_eq!(s.state(), SceneState::Stage);
    assert!(!events.contains(&FrameEvent::VerseRevealed));
    let clock = s.clock().unwrap();
    assert_eq!(clock.elapsed(), 0.0);
    assert!(!clock.verse_revealed());
    assert!(s.stage().unwrap().middle_visible);

    // the retry is still pending until the play promise resolves
    s.dispatch(UiAction::Gesture).unwrap();
    run_for(&mut s, 1.0);
    assert_eq!(s.clock().unwrap().elapsed(), 0.0);

    s.playback_started(&src);
    let out = s.frame(FrameInput {
        dt: DT,
        spectrum: None,
        playback_time: Some(0.5),
    });
    assert!(!out.events.contains(&FrameEvent::VerseRevealed));
    assert_eq!(s.clock().unwrap().elapsed(), 0.5);

    let out = s.frame(FrameInput {
        dt: DT,
        spectrum: None,
        playback_time: Some(21.5),
    });
    assert!(out.events.contains(&FrameEvent::VerseRevealed));
}

#[test]
fn debug_stage_waits_for_first_play() {
    let mut s = session(EntryMode::Debug);
    s.start();
    let events = run_for(&mut s, 25.0);
    assert!(!events.contains(&FrameEvent::VerseRevealed));
    assert_eq!(s.clock().unwrap().elapsed(), 0.0);
    assert_eq!(s.uniforms().time, 0.0);
}

#[test]
fn wireframe_toggles_only_in_debug_mode() {
    let mut s = session(EntryMode::Normal);
    assert!(s.wireframe());
    assert!(s.dispatch(UiAction::ToggleWireframe).unwrap().is_empty());
    assert!(s.wireframe());

    let mut s = session(EntryMode::Debug);
    assert!(s.wireframe());
    s.dispatch(UiAction::ToggleWireframe).unwrap();
    assert!(!s.wireframe());
    s.dispatch(UiAction::ToggleWireframe).unwrap();
    assert!(s.wireframe());
}
