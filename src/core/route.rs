use crate::core::state::SceneState;

/// Entry mode selected by the URL fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EntryMode {
    #[default]
    Normal,
    /// `#debug`: skip loader and intro, go straight to the stage.
    Debug,
    /// `#menu`: open on the carousel.
    Menu,
}

impl EntryMode {
    pub fn from_hash(hash: &str) -> Self {
        match hash.trim().trim_start_matches('#') {
            "debug" => EntryMode::Debug,
            "menu" => EntryMode::Menu,
            _ => EntryMode::Normal,
        }
    }

    pub fn initial_state(self) -> SceneState {
        match self {
            EntryMode::Normal => SceneState::Intro,
            EntryMode::Debug => SceneState::Stage,
            EntryMode::Menu => SceneState::Menu,
        }
    }

    pub fn skips_loader(self) -> bool {
        self == EntryMode::Debug
    }
}
