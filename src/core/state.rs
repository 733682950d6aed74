use crate::core::error::TransitionError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SceneState {
    Intro,
    Menu,
    Stage,
}

impl SceneState {
    pub fn key(self) -> &'static str {
        match self {
            SceneState::Intro => "intro",
            SceneState::Menu => "menu",
            SceneState::Stage => "stage",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneAction {
    Enter,
    Launch,
    Back,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition {
    pub from: SceneState,
    pub to: SceneState,
    pub started_at: f64,
    pub duration: f64,
}

/// Target of `action` from `from`, if the pair is legal.
pub fn target(from: SceneState, action: SceneAction) -> Option<SceneState> {
    match (from, action) {
        (SceneState::Intro, SceneAction::Enter) => Some(SceneState::Menu),
        (SceneState::Menu, SceneAction::Launch) => Some(SceneState::Stage),
        (SceneState::Stage, SceneAction::Back) => Some(SceneState::Menu),
        (SceneState::Menu, SceneAction::Back) => Some(SceneState::Intro),
        _ => None,
    }
}

/// Intro → menu → stage sequencing. A transition commits only after its
/// duration; while one is in flight every further request is rejected.
#[derive(Debug, Clone)]
pub struct SceneMachine {
    state: SceneState,
    in_flight: Option<Transition>,
    assets_ready: bool,
    duration: f64,
}

impl SceneMachine {
    pub fn new(initial: SceneState, duration: f64) -> Self {
        Self {
            state: initial,
            in_flight: None,
            assets_ready: false,
            duration,
        }
    }

    /// Committed state; this selects the render path.
    pub fn state(&self) -> SceneState {
        self.state
    }

    pub fn in_flight(&self) -> Option<&Transition> {
        self.in_flight.as_ref()
    }

    pub fn set_assets_ready(&mut self, ready: bool) {
        self.assets_ready = ready;
    }

    pub fn assets_ready(&self) -> bool {
        self.assets_ready
    }

    pub fn request(&mut self, action: SceneAction, now: f64) -> Result<Transition, TransitionError> {
        if let Some(t) = &self.in_flight {
            return Err(TransitionError::InFlight(t.to));
        }
        let to = target(self.state, action).ok_or(TransitionError::Invalid {
            from: self.state,
            action,
        })?;
        if action == SceneAction::Enter && !self.assets_ready {
            return Err(TransitionError::AssetsPending);
        }
        let t = Transition {
            from: self.state,
            to,
            started_at: now,
            duration: self.duration,
        };
        self.in_flight = Some(t);
        Ok(t)
    }

    /// Commit the in-flight transition once its duration has elapsed.
    pub fn poll(&mut self, now: f64) -> Option<SceneState> {
        let t = self.in_flight?;
        if now - t.started_at < t.duration {
            return None;
        }
        self.in_flight = None;
        self.state = t.to;
        Some(t.to)
    }
}
