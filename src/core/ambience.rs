/// Audio on/off toggle combined with tab visibility.
///
/// The user's toggle is remembered across visibility changes: coming back to a
/// visible tab only restores the level if audio was enabled.
#[derive(Clone, Copy, Debug)]
pub struct AmbienceGate {
    level: f32,
    enabled: bool,
    hidden: bool,
}

impl AmbienceGate {
    pub fn new(level: f32) -> Self {
        Self {
            level: level.clamp(0.0, 1.0),
            enabled: true,
            hidden: false,
        }
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    pub fn volume(&self) -> f32 {
        if self.enabled && !self.hidden {
            self.level
        } else {
            0.0
        }
    }

    pub fn toggle(&mut self) -> f32 {
        self.enabled = !self.enabled;
        self.volume()
    }

    pub fn set_hidden(&mut self, hidden: bool) -> f32 {
        self.hidden = hidden;
        self.volume()
    }
}
