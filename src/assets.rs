use crate::app::App;
use crate::constants::{AMBIENCE_SRC, MODEL_SRC};
use crate::core::model::ModelMesh;
use crate::overlay;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

// Names tracked by the session's loader
pub const MODEL: &str = "model";
pub const AMBIENCE: &str = "ambience";

fn url_for(name: &str) -> Option<&'static str> {
    match name {
        MODEL => Some(MODEL_SRC),
        AMBIENCE => Some(AMBIENCE_SRC),
        _ => None,
    }
}

async fn fetch_bytes(url: &str) -> anyhow::Result<Vec<u8>> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let resp: web::Response = JsFuture::from(window.fetch_with_str(url))
        .await
        .map_err(|e| anyhow::anyhow!("fetch {}: {:?}", url, e))?
        .dyn_into()
        .map_err(|e| anyhow::anyhow!("fetch {}: not a Response: {:?}", url, e))?;
    if !resp.ok() {
        anyhow::bail!("fetch {}: HTTP {}", url, resp.status());
    }
    let buf = JsFuture::from(
        resp.array_buffer()
            .map_err(|e| anyhow::anyhow!("read {}: {:?}", url, e))?,
    )
    .await
    .map_err(|e| anyhow::anyhow!("read {}: {:?}", url, e))?;
    Ok(js_sys::Uint8Array::new(&buf).to_vec())
}

async fn load_one(app: &Rc<RefCell<App>>, name: &str) -> anyhow::Result<()> {
    let url = url_for(name).ok_or_else(|| anyhow::anyhow!("unknown asset {}", name))?;
    let bytes = fetch_bytes(url).await?;
    if name == MODEL {
        let mesh = ModelMesh::from_obj_bytes(&bytes)?;
        log::info!(
            "[loader] model: {} vertices, {} triangles",
            mesh.positions.len(),
            mesh.indices.len() / 3
        );
        if let Some(gpu) = &mut app.borrow_mut().gpu {
            gpu.set_model(&mesh);
        }
    }
    Ok(())
}

/// Fetch the named assets concurrently, reporting each outcome to the session.
pub fn fetch(app: &Rc<RefCell<App>>, names: Vec<String>) {
    for name in names {
        let app = app.clone();
        spawn_local(async move {
            let result = load_one(&app, &name).await;
            let mut a = app.borrow_mut();
            let status = match result {
                Ok(()) => {
                    log::info!("[loader] {} ready", name);
                    a.session.asset_loaded(&name)
                }
                Err(e) => {
                    log::error!("[loader] {} failed: {:?}", name, e);
                    a.session.asset_failed(&name)
                }
            };
            overlay::update_loader(&a.document, &status);
        });
    }
}
