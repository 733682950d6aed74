use crate::audio::AudioHost;
use crate::core::viewport::{Surface, Viewport};
use crate::core::{Effect, Session};
use crate::overlay;
use crate::render::GpuState;
use web_sys as web;

/// Everything the rAF loop and the DOM listeners share.
pub struct App {
    pub session: Session,
    pub audio: AudioHost,
    pub gpu: Option<GpuState<'static>>,
    pub canvas: web::HtmlCanvasElement,
    pub document: web::Document,
    surface: Surface,
}

/// Work that must run after the `App` borrow is released.
#[derive(Debug, Default)]
pub struct Deferred {
    pub carousel_index: Option<usize>,
    pub fullscreen: bool,
    pub fetch: Vec<String>,
    pub play: Vec<(String, js_sys::Promise)>,
}

impl App {
    pub fn new(
        session: Session,
        audio: AudioHost,
        gpu: Option<GpuState<'static>>,
        canvas: web::HtmlCanvasElement,
        document: web::Document,
    ) -> Self {
        Self {
            session,
            audio,
            gpu,
            canvas,
            document,
            surface: Surface::default(),
        }
    }

    /// Apply a new viewport to the cameras and the GPU targets. Unchanged
    /// viewports are ignored.
    pub fn resize(&mut self, viewport: Viewport) {
        let mut cameras = self.session.cameras_mut();
        if !self.surface.resize(viewport, &mut cameras) {
            return;
        }
        let (w, h) = viewport.backing_size();
        if let Some(gpu) = &mut self.gpu {
            gpu.resize_if_needed(w, h);
        }
    }

    /// Carry out the session's effects that only touch state owned here.
    pub fn apply(&mut self, effects: impl IntoIterator<Item = Effect>) -> Deferred {
        let mut deferred = Deferred::default();
        for effect in effects {
            match effect {
                Effect::ShowScene(state) => overlay::show_scene(&self.document, state),
                Effect::PlayTrack { src, restart } => match self.audio.play(&src, restart) {
                    Ok(promise) => deferred.play.push((src, promise)),
                    Err(e) => {
                        log::error!("[audio] {:?}", e);
                        self.session.playback_blocked(&src);
                    }
                },
                Effect::PauseTrack => self.audio.pause(),
                Effect::SetAmbienceVolume(v) => self.audio.set_ambience_volume(v),
                Effect::SetMuted(muted) => self.audio.set_muted(muted),
                Effect::MoveCarousel { index } => deferred.carousel_index = Some(index),
                Effect::ToggleFullscreen => deferred.fullscreen = true,
                Effect::FetchAssets(names) => deferred.fetch.extend(names),
            }
        }
        self.sync_overlay();
        deferred
    }

    /// Mirror the session's flags onto the UI controls.
    pub fn sync_overlay(&self) {
        overlay::set_paused(&self.document, self.session.paused());
        overlay::set_audio_enabled(&self.document, self.session.audio_enabled());
        overlay::update_loader(&self.document, &self.session.load_status());
    }
}
