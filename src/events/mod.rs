pub mod keyboard;
pub mod pointer;

use crate::app::App;
use crate::carousel::{self, CarouselWidget};
use crate::core::session::Effects;
use crate::core::UiAction;
use crate::{assets, dom, overlay};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

pub fn wire_all(
    app: &Rc<RefCell<App>>,
    widget: &Rc<CarouselWidget>,
    document: &web::Document,
    canvas: &web::HtmlCanvasElement,
) {
    keyboard::wire_keydown(app, widget);
    pointer::wire_pointer(app, widget, canvas);
    wire_buttons(app, widget, document);
    wire_visibility(app, widget, document);
    wire_resize(app, canvas);
}

fn wire_buttons(app: &Rc<RefCell<App>>, widget: &Rc<CarouselWidget>, document: &web::Document) {
    let buttons: [(&str, UiAction); 10] = [
        ("enter", UiAction::Enter),
        ("launch", UiAction::Launch),
        ("back", UiAction::Back),
        ("pause", UiAction::TogglePause),
        ("fullscreen", UiAction::ToggleFullscreen),
        ("audio-toggle", UiAction::ToggleAudio),
        ("prev", UiAction::Prev),
        ("next", UiAction::Next),
        ("loader-retry", UiAction::RetryAssets),
        ("loader-skip", UiAction::SkipAssets),
    ];
    for (id, action) in buttons {
        let app = app.clone();
        let widget = widget.clone();
        dom::add_click_listener(document, id, move || {
            gesture(&app, &widget);
            dispatch(&app, &widget, action.clone());
        });
    }
}

fn wire_visibility(app: &Rc<RefCell<App>>, widget: &Rc<CarouselWidget>, document: &web::Document) {
    let app = app.clone();
    let widget = widget.clone();
    let doc = document.clone();
    let closure = Closure::wrap(Box::new(move || {
        let hidden = doc.hidden();
        log::debug!("[audio] page hidden={}", hidden);
        dispatch(&app, &widget, UiAction::Visibility { hidden });
    }) as Box<dyn FnMut()>);
    _ = document
        .add_event_listener_with_callback("visibilitychange", closure.as_ref().unchecked_ref());
    closure.forget();
}

fn wire_resize(app: &Rc<RefCell<App>>, canvas: &web::HtmlCanvasElement) {
    let Some(window) = web::window() else {
        return;
    };
    let app = app.clone();
    let canvas = canvas.clone();
    let closure = Closure::wrap(Box::new(move || {
        if let Some(viewport) = dom::sync_canvas_backing_size(&canvas) {
            app.borrow_mut().resize(viewport);
        }
    }) as Box<dyn FnMut()>);
    _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
    closure.forget();
}

/// A user gesture: unlocks audio and lets a blocked track retry.
pub fn gesture(app: &Rc<RefCell<App>>, widget: &CarouselWidget) {
    app.borrow().audio.wake();
    dispatch(app, widget, UiAction::Gesture);
}

/// Every listener funnels its action through here.
pub fn dispatch(app: &Rc<RefCell<App>>, widget: &CarouselWidget, action: UiAction) {
    let result = app.borrow_mut().session.dispatch(action.clone());
    match result {
        Ok(effects) => apply(app, widget, effects),
        Err(e) => log::debug!("[scene] {:?} rejected: {}", action, e),
    }
}

/// Run effects. Widget and fullscreen calls happen after the `App` borrow is
/// released: the widget fires its change event synchronously.
pub fn apply(app: &Rc<RefCell<App>>, widget: &CarouselWidget, effects: Effects) {
    if effects.is_empty() {
        return;
    }
    let deferred = app.borrow_mut().apply(effects);

    if let Some(index) = deferred.carousel_index {
        widget.select(index);
        if let Some(selection) = carousel::plain_selection(widget, index) {
            dispatch(app, widget, UiAction::Select { index, selection });
        }
    }
    if deferred.fullscreen {
        toggle_fullscreen();
    }
    if !deferred.fetch.is_empty() {
        assets::fetch(app, deferred.fetch);
    }
    for (src, promise) in deferred.play {
        let app = app.clone();
        spawn_local(async move {
            let outcome = JsFuture::from(promise).await;
            let mut a = app.borrow_mut();
            match outcome {
                Ok(_) => {
                    log::info!("[audio] playing {}", src);
                    a.session.playback_started(&src);
                    overlay::set_autoplay_hint(&a.document, false);
                }
                Err(e) => {
                    log::debug!("[audio] play() rejected: {:?}", e);
                    a.session.playback_blocked(&src);
                    overlay::set_autoplay_hint(&a.document, true);
                }
            }
        });
    }
}

fn toggle_fullscreen() {
    let Some(doc) = dom::window_document() else {
        return;
    };
    if doc.fullscreen_element().is_some() {
        doc.exit_fullscreen();
    } else if let Some(root) = doc.document_element() {
        if let Err(e) = root.request_fullscreen() {
            log::warn!("[dom] fullscreen refused: {:?}", e);
        }
    }
}
