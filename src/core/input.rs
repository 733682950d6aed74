use crate::core::session::UiAction;

/// Keyboard binding for the carousel, stage and debug controls.
pub fn action_for_key(key: &str, debug: bool) -> Option<UiAction> {
    match key {
        "ArrowRight" => Some(UiAction::Next),
        "ArrowLeft" => Some(UiAction::Prev),
        "Enter" => Some(UiAction::Advance),
        " " => Some(UiAction::TogglePause),
        "Escape" | "Backspace" => Some(UiAction::Back),
        "m" | "M" => Some(UiAction::ToggleAudio),
        "f" | "F" => Some(UiAction::ToggleFullscreen),
        "[" if debug => Some(UiAction::NudgeAmplitude(-1)),
        "]" if debug => Some(UiAction::NudgeAmplitude(1)),
        "w" | "W" if debug => Some(UiAction::ToggleWireframe),
        _ => None,
    }
}

/// Map a pointer position in CSS pixels to [-1, 1] on both axes (+Y up).
#[inline]
pub fn pointer_ndc(x: f32, y: f32, width: f32, height: f32) -> [f32; 2] {
    if width <= 0.0 || height <= 0.0 {
        return [0.0, 0.0];
    }
    [
        ((x / width) * 2.0 - 1.0).clamp(-1.0, 1.0),
        (1.0 - (y / height) * 2.0).clamp(-1.0, 1.0),
    ]
}
