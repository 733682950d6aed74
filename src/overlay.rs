use crate::core::loader::LoadStatus;
use crate::core::SceneState;
use crate::dom::set_class;
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
fn html(document: &web::Document, id: &str) -> Option<web::HtmlElement> {
    document
        .get_element_by_id(id)
        .and_then(|el| el.dyn_into::<web::HtmlElement>().ok())
}

/// Tag `<main>` with the scene the UI should show; CSS does the rest.
pub fn show_scene(document: &web::Document, state: SceneState) {
    if let Some(main) = document.query_selector("main").ok().flatten() {
        for s in [SceneState::Intro, SceneState::Menu, SceneState::Stage] {
            set_class(&main, s.key(), s == state);
        }
        _ = main.set_attribute("data-scene", state.key());
    }
}

/// Dim overlay driven by the transition tween.
pub fn set_opacity(document: &web::Document, opacity: f32) {
    if let Some(el) = html(document, "overlay") {
        _ = el
            .style()
            .set_property("opacity", &format!("{:.3}", opacity.clamp(0.0, 1.0)));
    }
}

pub fn update_loader(document: &web::Document, status: &LoadStatus) {
    let Some(loader) = document.get_element_by_id("loader") else {
        return;
    };
    let failed = matches!(status, LoadStatus::Failed { .. });
    set_class(&loader, "failed", failed);
    set_class(&loader, "done", *status == LoadStatus::Ready);
    let progress = match status {
        LoadStatus::Loading { progress } => *progress,
        _ => 1.0,
    };
    if let Some(bar) = html(document, "loader-bar") {
        _ = bar
            .style()
            .set_property("width", &format!("{:.1}%", progress * 100.0));
    }
    if let Some(msg) = document.get_element_by_id("loader-message") {
        let text = match status {
            LoadStatus::Failed { assets } => format!("Could not load {}", assets.join(", ")),
            _ => String::new(),
        };
        msg.set_text_content(Some(&text));
    }
    if let Some(enter) = document.get_element_by_id("enter") {
        set_class(&enter, "ready", *status == LoadStatus::Ready);
    }
}

pub fn set_paused(document: &web::Document, paused: bool) {
    if let Some(el) = document.get_element_by_id("pause") {
        set_class(&el, "paused", paused);
    }
}

pub fn set_audio_enabled(document: &web::Document, enabled: bool) {
    if let Some(el) = document.get_element_by_id("audio-toggle") {
        set_class(&el, "muted", !enabled);
    }
}

pub fn set_autoplay_hint(document: &web::Document, blocked: bool) {
    if let Some(el) = document.get_element_by_id("autoplay-hint") {
        set_class(&el, "hidden", !blocked);
    }
}
