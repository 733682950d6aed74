use crate::constants::*;
use crate::core::ambience::AmbienceGate;
use crate::core::camera::Camera;
use crate::core::carousel::Carousel;
use crate::core::error::{ConfigError, TransitionError};
use crate::core::loader::{LoadStatus, LoadTracker};
use crate::core::motion::LookOffset;
use crate::core::playback::{PlaybackGate, PlaybackState};
use crate::core::route::EntryMode;
use crate::core::scene::{pose_for, IntroScene, StageScene};
use crate::core::stage::StageClock;
use crate::core::state::{SceneAction, SceneMachine, SceneState};
use crate::core::theme::ThemeName;
use crate::core::track::{Selection, Track};
use crate::core::tween::{PoseTween, ScenePose};
use crate::core::uniforms::UniformBundle;
use glam::{Vec2, Vec3};
use rand::rngs::StdRng;
use smallvec::SmallVec;

#[derive(Debug, Clone, PartialEq)]
pub enum UiAction {
    Enter,
    Launch,
    /// Enter-key behavior: intro→menu, menu→stage.
    Advance,
    Back,
    TogglePause,
    Next,
    Prev,
    Select { index: usize, selection: Selection },
    ToggleAudio,
    ToggleFullscreen,
    Visibility { hidden: bool },
    NudgeAmplitude(i8),
    /// Debug only: stage planes as lines or filled triangles.
    ToggleWireframe,
    RetryAssets,
    SkipAssets,
    /// Any pointer/key gesture; lets blocked autoplay retry.
    Gesture,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// A transition toward this state started; swap UI classes.
    ShowScene(SceneState),
    PlayTrack { src: String, restart: bool },
    PauseTrack,
    SetAmbienceVolume(f32),
    SetMuted(bool),
    MoveCarousel { index: usize },
    ToggleFullscreen,
    FetchAssets(Vec<String>),
}

pub type Effects = SmallVec<[Effect; 4]>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderPath {
    Intro,
    Stage,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameEvent {
    TransitionCompleted(SceneState),
    VerseRevealed,
    StageTornDown,
}

#[derive(Debug, Clone)]
pub struct FrameOutcome {
    pub path: RenderPath,
    pub events: SmallVec<[FrameEvent; 2]>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct FrameInput<'a> {
    pub dt: f32,
    /// Latest analyser bins, when the pipeline is live.
    pub spectrum: Option<&'a [u8]>,
    /// Media element position; preferred over `dt` for the stage clock.
    pub playback_time: Option<f32>,
}

/// Application state shared by the render loop and the UI handlers.
///
/// UI actions go in through [`Session::dispatch`] and come back as [`Effect`]s
/// for the browser layer. Frame ticks go through [`Session::frame`].
pub struct Session {
    now: f64,
    mode: EntryMode,
    machine: SceneMachine,
    carousel: Carousel,
    loader: LoadTracker,
    intro: IntroScene,
    stage: Option<StageScene>,
    clock: Option<StageClock>,
    intro_camera: Camera,
    stage_camera: Camera,
    look: LookOffset,
    pose: ScenePose,
    tween: Option<PoseTween>,
    uniforms: UniformBundle,
    ambience: AmbienceGate,
    playback: PlaybackGate,
    paused: bool,
    wireframe: bool,
    rng: StdRng,
}

impl Session {
    pub fn new(
        tracks: Vec<Track>,
        mode: EntryMode,
        assets: &[&str],
        mut rng: StdRng,
    ) -> Result<Self, ConfigError> {
        let carousel = Carousel::new(tracks)?;
        let initial = mode.initial_state();
        let mut loader = LoadTracker::new(assets.iter().copied());
        if mode.skips_loader() {
            loader.skip();
        }
        let mut machine = SceneMachine::new(initial, TRANSITION_SEC);
        machine.set_assets_ready(loader.status() == LoadStatus::Ready);
        let pose = pose_for(initial);
        let intro = IntroScene::build(&mut rng);
        let mut session = Self {
            now: 0.0,
            mode,
            machine,
            carousel,
            loader,
            intro,
            stage: None,
            clock: None,
            intro_camera: Camera::new(pose.eye, pose.look_at),
            stage_camera: Camera::new(pose.eye, pose.look_at),
            look: LookOffset::new(LOOK_OFFSET_TAU_SEC),
            pose,
            tween: None,
            uniforms: UniformBundle::default(),
            ambience: AmbienceGate::new(AMBIENCE_LEVEL),
            playback: PlaybackGate::default(),
            paused: false,
            wireframe: true,
            rng,
        };
        if initial == SceneState::Stage {
            // Debug entry: no track was chosen, so the stage uses the default theme.
            let selection = Selection {
                theme: ThemeName::default(),
                ..session.carousel.selection().clone()
            };
            session.build_stage(&selection);
        }
        Ok(session)
    }

    /// Effects to run once the page is wired up.
    pub fn start(&mut self) -> Effects {
        let mut fx = Effects::new();
        fx.push(Effect::ShowScene(self.machine.state()));
        fx.push(Effect::SetAmbienceVolume(self.ambience.volume()));
        let pending = self.loader.pending();
        if !pending.is_empty() {
            fx.push(Effect::FetchAssets(pending));
        }
        if self.stage.is_some() {
            let src = self.carousel.current().src.clone();
            self.playback.request(&src);
            fx.push(Effect::PlayTrack { src, restart: true });
        }
        fx
    }

    pub fn dispatch(&mut self, action: UiAction) -> Result<Effects, TransitionError> {
        let mut fx = Effects::new();
        match action {
            UiAction::Enter => return self.transition(SceneAction::Enter),
            UiAction::Launch => return self.transition(SceneAction::Launch),
            UiAction::Back => return self.transition(SceneAction::Back),
            UiAction::Advance => match self.machine.state() {
                SceneState::Intro => return self.transition(SceneAction::Enter),
                SceneState::Menu => return self.transition(SceneAction::Launch),
                SceneState::Stage => {}
            },
            UiAction::TogglePause => {
                if self.machine.state() == SceneState::Stage && self.machine.in_flight().is_none() {
                    self.set_paused(!self.paused, &mut fx);
                }
            }
            UiAction::Next => self.step_carousel(1, &mut fx),
            UiAction::Prev => self.step_carousel(-1, &mut fx),
            UiAction::Select { index, selection } => {
                if self.carousel.select(index, selection) {
                    log::debug!("[carousel] selected {} ({:?})", index, self.carousel.selection().theme);
                }
            }
            UiAction::ToggleAudio => {
                let volume = self.ambience.toggle();
                fx.push(Effect::SetAmbienceVolume(volume));
                fx.push(Effect::SetMuted(!self.ambience.enabled()));
            }
            UiAction::ToggleFullscreen => fx.push(Effect::ToggleFullscreen),
            UiAction::Visibility { hidden } => {
                fx.push(Effect::SetAmbienceVolume(self.ambience.set_hidden(hidden)));
            }
            UiAction::NudgeAmplitude(dir) => {
                if self.mode == EntryMode::Debug {
                    let a = self.uniforms.amplitude + dir as f32 * AMPLITUDE_STEP;
                    self.uniforms.amplitude = a.clamp(AMPLITUDE_MIN, AMPLITUDE_MAX);
                    log::info!("[debug] amplitude={:.1}", self.uniforms.amplitude);
                }
            }
            UiAction::ToggleWireframe => {
                if self.mode == EntryMode::Debug {
                    self.wireframe = !self.wireframe;
                    log::info!("[debug] wireframe={}", self.wireframe);
                }
            }
            UiAction::RetryAssets => {
                let names = self.loader.retry();
                if !names.is_empty() {
                    fx.push(Effect::FetchAssets(names));
                }
            }
            UiAction::SkipAssets => {
                self.loader.skip();
                self.machine.set_assets_ready(true);
            }
            UiAction::Gesture => {
                if let Some(src) = self.playback.take_retry() {
                    fx.push(Effect::PlayTrack {
                        src,
                        restart: false,
                    });
                }
            }
        }
        Ok(fx)
    }

    fn transition(&mut self, action: SceneAction) -> Result<Effects, TransitionError> {
        let t = self.machine.request(action, self.now)?;
        log::info!("[scene] {:?} -> {:?}", t.from, t.to);
        self.tween = Some(PoseTween {
            from: self.pose,
            to: pose_for(t.to),
            started_at: t.started_at,
            duration: t.duration,
        });
        let mut fx = Effects::new();
        fx.push(Effect::ShowScene(t.to));
        match (t.from, t.to) {
            (SceneState::Menu, SceneState::Stage) => {
                let selection = self.carousel.selection().clone();
                self.build_stage(&selection);
                self.playback.request(&selection.src);
                fx.push(Effect::PlayTrack {
                    src: selection.src,
                    restart: true,
                });
            }
            (SceneState::Stage, SceneState::Menu) => {
                if let Some(clock) = &mut self.clock {
                    clock.set_paused(true);
                }
                self.playback.pause();
                fx.push(Effect::PauseTrack);
            }
            _ => {}
        }
        Ok(fx)
    }

    fn step_carousel(&mut self, delta: i32, fx: &mut Effects) {
        if self.machine.state() != SceneState::Stage {
            let index = self.carousel.go(delta);
            fx.push(Effect::MoveCarousel { index });
        }
    }

    fn build_stage(&mut self, selection: &Selection) {
        log::info!(
            "[scene] building stage theme={} verse_start={:.2}",
            selection.theme.key(),
            selection.verse_start
        );
        self.stage = Some(StageScene::build(selection.theme, &mut self.rng));
        self.clock = Some(StageClock::new(selection.verse_start));
        self.uniforms.clear_spectrum();
        self.uniforms.time = 0.0;
        self.paused = false;
    }

    fn set_paused(&mut self, paused: bool, fx: &mut Effects) {
        self.paused = paused;
        if let Some(clock) = &mut self.clock {
            clock.set_paused(paused);
        }
        if paused {
            self.playback.pause();
            fx.push(Effect::PauseTrack);
        } else if let Some(src) = self.playback.resume() {
            fx.push(Effect::PlayTrack {
                src,
                restart: false,
            });
        }
        log::info!("[keys] paused={}", paused);
    }

    pub fn frame(&mut self, input: FrameInput<'_>) -> FrameOutcome {
        let dt = input.dt.max(0.0);
        self.now += dt as f64;
        let mut events = SmallVec::new();

        if let Some(tween) = self.tween {
            self.pose = tween.sample(self.now);
            if tween.is_done(self.now) {
                self.tween = None;
            }
        }
        if let Some(state) = self.machine.poll(self.now) {
            events.push(FrameEvent::TransitionCompleted(state));
            if state != SceneState::Stage && self.stage.is_some() {
                self.stage = None;
                self.clock = None;
                self.paused = false;
                self.playback.stop();
                events.push(FrameEvent::StageTornDown);
            }
        }

        // the clock only counts audible playback; pending or blocked play holds it
        let playing = matches!(self.playback.state(), PlaybackState::Playing { .. });
        if let (Some(stage), Some(clock)) = (&mut self.stage, &mut self.clock) {
            let verse_now = match (playing, input.playback_time) {
                (false, _) => false,
                (true, Some(t)) => clock.advance_to(t),
                (true, None) => clock.advance(dt),
            };
            if !clock.paused() {
                stage.advance(dt);
            }
            if verse_now && stage.reveal_verse() {
                log::info!("[scene] verse at {:.2}s", clock.elapsed());
                events.push(FrameEvent::VerseRevealed);
            }
        }

        let path = match (self.machine.state(), &self.stage) {
            (SceneState::Stage, Some(_)) => RenderPath::Stage,
            _ => RenderPath::Intro,
        };
        match path {
            RenderPath::Intro => {
                let offset = self.look.step(dt) * LOOK_OFFSET_RANGE;
                self.intro.advance(dt);
                self.intro_camera.eye = self.pose.eye;
                self.intro_camera.target = self.pose.look_at + Vec3::new(offset.x, offset.y, 0.0);
            }
            RenderPath::Stage => {
                if !self.paused {
                    if let Some(bins) = input.spectrum {
                        self.uniforms.push_spectrum(bins);
                    }
                }
                if let Some(clock) = &self.clock {
                    self.uniforms.time = clock.elapsed() * SHADER_TIME_SCALE;
                }
                self.stage_camera.eye = self.pose.eye;
                self.stage_camera.target = self.pose.look_at;
            }
        }
        FrameOutcome { path, events }
    }

    /// Pointer position in [-1, 1]; the intro camera eases toward it.
    pub fn pointer(&mut self, ndc: [f32; 2]) {
        self.look.set_target(Vec2::from(ndc));
    }

    pub fn asset_loaded(&mut self, name: &str) -> LoadStatus {
        self.loader.loaded(name);
        self.sync_loader()
    }

    pub fn asset_failed(&mut self, name: &str) -> LoadStatus {
        self.loader.failed(name);
        self.sync_loader()
    }

    fn sync_loader(&mut self) -> LoadStatus {
        let status = self.loader.status();
        self.machine.set_assets_ready(status == LoadStatus::Ready);
        status
    }

    pub fn playback_started(&mut self, src: &str) {
        self.playback.started(src);
    }

    pub fn playback_blocked(&mut self, src: &str) {
        log::warn!("[audio] autoplay blocked for {}; waiting for a gesture", src);
        self.playback.blocked(src);
    }

    pub fn state(&self) -> SceneState {
        self.machine.state()
    }

    pub fn is_transitioning(&self) -> bool {
        self.machine.in_flight().is_some()
    }

    pub fn mode(&self) -> EntryMode {
        self.mode
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn wireframe(&self) -> bool {
        self.wireframe
    }

    pub fn audio_enabled(&self) -> bool {
        self.ambience.enabled()
    }

    pub fn ambience_volume(&self) -> f32 {
        self.ambience.volume()
    }

    pub fn load_status(&self) -> LoadStatus {
        self.loader.status()
    }

    pub fn pose(&self) -> ScenePose {
        self.pose
    }

    pub fn carousel(&self) -> &Carousel {
        &self.carousel
    }

    pub fn playback(&self) -> &PlaybackGate {
        &self.playback
    }

    pub fn intro(&self) -> &IntroScene {
        &self.intro
    }

    pub fn stage(&self) -> Option<&StageScene> {
        self.stage.as_ref()
    }

    pub fn clock(&self) -> Option<&StageClock> {
        self.clock.as_ref()
    }

    pub fn uniforms(&self) -> &UniformBundle {
        &self.uniforms
    }

    pub fn camera(&self, path: RenderPath) -> &Camera {
        match path {
            RenderPath::Intro => &self.intro_camera,
            RenderPath::Stage => &self.stage_camera,
        }
    }

    pub fn cameras_mut(&mut self) -> [&mut Camera; 2] {
        [&mut self.intro_camera, &mut self.stage_camera]
    }
}
