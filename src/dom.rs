use crate::core::track::Track;
use crate::core::viewport::Viewport;
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

/// Look up an element the page cannot work without.
pub fn require(document: &web::Document, element_id: &str) -> anyhow::Result<web::Element> {
    document
        .get_element_by_id(element_id)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", element_id))
}

#[inline]
pub fn add_click_listener(
    document: &web::Document,
    element_id: &str,
    mut handler: impl FnMut() + 'static,
) {
    match document.get_element_by_id(element_id) {
        Some(el) => {
            let closure = wasm_bindgen::closure::Closure::wrap(
                Box::new(move || handler()) as Box<dyn FnMut()>
            );
            _ = el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        None => log::warn!("[dom] no #{} to bind", element_id),
    }
}

/// Resize the canvas backing store to CSS size × capped pixel ratio.
pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement) -> Option<Viewport> {
    let w = web::window()?;
    let rect = canvas.get_bounding_client_rect();
    let viewport = Viewport {
        css_width: rect.width(),
        css_height: rect.height(),
        device_pixel_ratio: w.device_pixel_ratio(),
    };
    let (w_px, h_px) = viewport.backing_size();
    if canvas.width() != w_px {
        canvas.set_width(w_px);
    }
    if canvas.height() != h_px {
        canvas.set_height(h_px);
    }
    Some(viewport)
}

pub fn set_class(el: &web::Element, class: &str, on: bool) {
    let cl = el.class_list();
    _ = if on { cl.add_1(class) } else { cl.remove_1(class) };
}

fn create_element(
    document: &web::Document,
    tag: &str,
    class: &str,
    text: Option<&str>,
) -> anyhow::Result<web::Element> {
    let el = document
        .create_element(tag)
        .map_err(|e| anyhow::anyhow!("create <{}>: {:?}", tag, e))?;
    _ = el.class_list().add_1(class);
    if let Some(t) = text {
        el.set_text_content(Some(t));
    }
    Ok(el)
}

/// One carousel cell per track, carrying the data attributes the stage reads back.
pub fn build_slides(
    document: &web::Document,
    root: &web::Element,
    tracks: &[Track],
) -> anyhow::Result<()> {
    root.set_inner_html("");
    for (i, t) in tracks.iter().enumerate() {
        let cell = create_element(document, "div", "carousel-cell", None)?;
        let attr = |name: &str, value: &str| {
            cell.set_attribute(name, value)
                .map_err(|e| anyhow::anyhow!("set {}: {:?}", name, e))
        };
        attr("data-index", &i.to_string())?;
        attr("data-src", &t.src)?;
        attr("data-verse-start", &t.verse_start.to_string())?;
        if let Some(shader) = &t.shader {
            attr("data-shader", shader)?;
        }

        let cover = create_element(document, "img", "cover", None)?;
        _ = cover.set_attribute("src", &t.cover);
        _ = cover.set_attribute("alt", &t.title);
        _ = cell.append_child(&cover);
        _ = cell.append_child(&create_element(document, "h2", "title", Some(&t.title))?);
        _ = cell.append_child(&create_element(document, "p", "author", Some(&t.author))?);
        _ = root.append_child(&cell);
    }
    Ok(())
}
