// Keyboard bindings, pointer mapping and URL fragment routing.

use verse_stage::core::input::{action_for_key, pointer_ndc};
use verse_stage::core::route::EntryMode;
use verse_stage::core::{SceneState, UiAction};

#[test]
fn keys_map_to_actions() {
    assert_eq!(action_for_key("ArrowRight", false), Some(UiAction::Next));
    assert_eq!(action_for_key("ArrowLeft", false), Some(UiAction::Prev));
    assert_eq!(action_for_key("Enter", false), Some(UiAction::Advance));
    assert_eq!(action_for_key(" ", false), Some(UiAction::TogglePause));
    assert_eq!(action_for_key("Escape", false), Some(UiAction::Back));
    assert_eq!(action_for_key("Backspace", false), Some(UiAction::Back));
    assert_eq!(action_for_key("M", false), Some(UiAction::ToggleAudio));
    assert_eq!(action_for_key("f", false), Some(UiAction::ToggleFullscreen));
    assert_eq!(action_for_key("x", false), None);
    assert_eq!(action_for_key("Shift", true), None);
}

#[test]
fn amplitude_keys_only_in_debug() {
    assert_eq!(action_for_key("[", false), None);
    assert_eq!(action_for_key("]", false), None);
    assert_eq!(action_for_key("[", true), Some(UiAction::NudgeAmplitude(-1)));
    assert_eq!(action_for_key("]", true), Some(UiAction::NudgeAmplitude(1)));
}

#[test]
fn wireframe_key_only_in_debug() {
    assert_eq!(action_for_key("w", false), None);
    assert_eq!(action_for_key("w", true), Some(UiAction::ToggleWireframe));
    assert_eq!(action_for_key("W", true), Some(UiAction::ToggleWireframe));
}

#[test]
fn pointer_maps_to_ndc_with_y_up() {
    assert_eq!(pointer_ndc(0.0, 0.0, 100.0, 50.0), [-1.0, 1.0]);
    assert_eq!(pointer_ndc(50.0, 25.0, 100.0, 50.0), [0.0, 0.0]);
    assert_eq!(pointer_ndc(100.0, 50.0, 100.0, 50.0), [1.0, -1.0]);
    assert_eq!(pointer_ndc(-40.0, 500.0, 100.0, 50.0), [-1.0, -1.0]);
    assert_eq!(pointer_ndc(10.0, 10.0, 0.0, 50.0), [0.0, 0.0]);
}

#[test]
fn fragment_selects_entry_mode() {
    assert_eq!(EntryMode::from_hash("#debug"), EntryMode::Debug);
    assert_eq!(EntryMode::from_hash("#menu"), EntryMode::Menu);
    assert_eq!(EntryMode::from_hash("menu"), EntryMode::Menu);
    assert_eq!(EntryMode::from_hash(""), EntryMode::Normal);
    assert_eq!(EntryMode::from_hash("#stage"), EntryMode::Normal);

    assert_eq!(EntryMode::Normal.initial_state(), SceneState::Intro);
    assert_eq!(EntryMode::Menu.initial_state(), SceneState::Menu);
    assert_eq!(EntryMode::Debug.initial_state(), SceneState::Stage);
    assert!(EntryMode::Debug.skips_loader());
    assert!(!EntryMode::Menu.skips_loader());
}
