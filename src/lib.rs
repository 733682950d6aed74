pub mod constants;
pub mod core;

#[cfg(target_arch = "wasm32")]
mod app;
#[cfg(target_arch = "wasm32")]
mod assets;
#[cfg(target_arch = "wasm32")]
mod audio;
#[cfg(target_arch = "wasm32")]
mod carousel;
#[cfg(target_arch = "wasm32")]
mod dom;
#[cfg(target_arch = "wasm32")]
mod events;
#[cfg(target_arch = "wasm32")]
mod frame;
#[cfg(target_arch = "wasm32")]
mod overlay;
#[cfg(target_arch = "wasm32")]
mod render;

#[cfg(target_arch = "wasm32")]
pub use web_entry::start;

#[cfg(target_arch = "wasm32")]
mod web_entry {
    use crate::app::App;
    use crate::constants::AMBIENCE_SRC;
    use crate::core::route::EntryMode;
    use crate::core::{track, Session, TRACKS_JSON};
    use crate::{assets, audio, carousel, dom, events, frame};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use wasm_bindgen::JsCast;
    use wasm_bindgen_futures::spawn_local;
    use web_sys as web;

    #[wasm_bindgen(start)]
    pub fn start() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).ok();
        log::info!("verse-stage starting");

        spawn_local(async move {
            if let Err(e) = init().await {
                log::error!("init error: {:?}", e);
            }
        });
        Ok(())
    }

    async fn init() -> anyhow::Result<()> {
        let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| anyhow::anyhow!("no document"))?;

        let canvas: web::HtmlCanvasElement = dom::require(&document, "app-canvas")?
            .dyn_into::<web::HtmlCanvasElement>()
            .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;
        let slides_root = dom::require(&document, "carousel")?;

        let mode = EntryMode::from_hash(&window.location().hash().unwrap_or_default());
        let tracks = track::parse_tracks(TRACKS_JSON)?;
        log::info!("[config] {} tracks, entry mode {:?}", tracks.len(), mode);

        dom::build_slides(&document, &slides_root, &tracks)?;
        let widget = Rc::new(carousel::CarouselWidget::mount(&slides_root));

        let session = Session::new(
            tracks,
            mode,
            &[assets::MODEL, assets::AMBIENCE],
            StdRng::from_entropy(),
        )?;

        let audio = audio::AudioHost::new(AMBIENCE_SRC)?;
        let viewport = dom::sync_canvas_backing_size(&canvas);
        let gpu = frame::init_gpu(&canvas).await;

        let app = Rc::new(RefCell::new(App::new(
            session,
            audio,
            gpu,
            canvas.clone(),
            document.clone(),
        )));
        if let Some(vp) = viewport {
            app.borrow_mut().resize(vp);
        }

        events::wire_all(&app, &widget, &document, &canvas);
        carousel::wire_change(&app, &widget);

        let initial = app.borrow_mut().session.start();
        events::apply(&app, &widget, initial);

        frame::start_loop(app);
        Ok(())
    }
}
