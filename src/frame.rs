use crate::app::App;
use crate::constants::INTRO_BLOOM;
use crate::core::session::{FrameEvent, FrameInput, RenderPath};
use crate::overlay;
use crate::render;
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

// Frames longer than this are treated as a stall (tab switch, debugger)
const MAX_FRAME_DT: f32 = 0.25;

/// Per-loop state that is not part of the session.
pub struct FrameContext {
    pub app: Rc<RefCell<App>>,
    pub last_instant: Instant,
    spectrum: Vec<u8>,
}

impl FrameContext {
    pub fn new(app: Rc<RefCell<App>>) -> Self {
        Self {
            app,
            last_instant: Instant::now(),
            spectrum: Vec::new(),
        }
    }

    pub fn frame(&mut self) {
        let now = Instant::now();
        let dt_sec = (now - self.last_instant).as_secs_f32().min(MAX_FRAME_DT);
        self.last_instant = now;

        let mut guard = self.app.borrow_mut();
        let app = &mut *guard;

        let live = match app.audio.refresh() {
            Some(bins) => {
                self.spectrum.clear();
                self.spectrum.extend_from_slice(bins);
                true
            }
            None => false,
        };
        let outcome = app.session.frame(FrameInput {
            dt: dt_sec,
            spectrum: live.then_some(self.spectrum.as_slice()),
            playback_time: app.audio.playback_time(),
        });

        for event in &outcome.events {
            match event {
                FrameEvent::TransitionCompleted(state) => {
                    log::info!("[scene] now {}", state.key());
                    overlay::show_scene(&app.document, *state);
                }
                FrameEvent::VerseRevealed => log::debug!("[scene] verse grid visible"),
                FrameEvent::StageTornDown => {
                    log::info!("[scene] stage torn down");
                    app.sync_overlay();
                }
            }
        }
        overlay::set_opacity(&app.document, app.session.pose().overlay_opacity);

        let Some(gpu) = &mut app.gpu else {
            return;
        };
        let session = &app.session;
        let camera = session.camera(outcome.path);
        let result = match (outcome.path, session.stage()) {
            (RenderPath::Stage, Some(stage)) => {
                gpu.render_stage(stage, camera, session.uniforms(), session.wireframe())
            }
            _ => gpu.render_intro(session.intro(), camera, session.uniforms(), INTRO_BLOOM),
        };
        match result {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::warn!("[gpu] surface lost; resyncing canvas");
                if let Some(viewport) = crate::dom::sync_canvas_backing_size(&app.canvas) {
                    let (w, h) = viewport.backing_size();
                    gpu.resize_if_needed(w, h);
                }
            }
            Err(e) => log::error!("render error: {:?}", e),
        }
    }
}

pub async fn init_gpu(canvas: &web::HtmlCanvasElement) -> Option<render::GpuState<'static>> {
    // leak a canvas clone to satisfy 'static lifetime for surface
    let leaked_canvas = Box::leak(Box::new(canvas.clone()));
    match render::GpuState::new(leaked_canvas).await {
        Ok(g) => Some(g),
        Err(e) => {
            log::error!("WebGPU init error: {:?}", e);
            None
        }
    }
}

fn request_frame(tick: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>) {
    let (Some(w), Some(cb)) = (web::window(), tick.borrow().as_ref().map(|c| c.as_ref().clone()))
    else {
        return;
    };
    _ = w.request_animation_frame(cb.unchecked_ref());
}

pub fn start_loop(app: Rc<RefCell<App>>) {
    let mut ctx = FrameContext::new(app);
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        ctx.frame();
        request_frame(&tick_clone);
    }) as Box<dyn FnMut()>));
    request_frame(&tick);
}
