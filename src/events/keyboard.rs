use crate::app::App;
use crate::carousel::CarouselWidget;
use crate::core::input::action_for_key;
use crate::core::route::EntryMode;
use crate::core::UiAction;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

pub fn handle_keydown(ev: &web::KeyboardEvent, app: &Rc<RefCell<App>>, widget: &CarouselWidget) {
    if ev.repeat() || ev.ctrl_key() || ev.meta_key() || ev.alt_key() {
        return;
    }
    let debug = app.borrow().session.mode() == EntryMode::Debug;
    let Some(action) = action_for_key(&ev.key(), debug) else {
        return;
    };
    if matches!(
        action,
        UiAction::TogglePause | UiAction::Back | UiAction::Next | UiAction::Prev
    ) {
        // keep Space/arrows/Backspace from scrolling or navigating
        ev.prevent_default();
    }
    log::debug!("[keys] {:?} -> {:?}", ev.key(), action);
    super::gesture(app, widget);
    super::dispatch(app, widget, action);
}

pub fn wire_keydown(app: &Rc<RefCell<App>>, widget: &Rc<CarouselWidget>) {
    if let Some(window) = web::window() {
        let app = app.clone();
        let widget = widget.clone();
        let closure =
            wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::KeyboardEvent| {
                handle_keydown(&ev, &app, &widget);
            }) as Box<dyn FnMut(_)>);
        _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}
