use crate::app::App;
use crate::carousel::CarouselWidget;
use crate::core::input::pointer_ndc;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

pub fn wire_pointer(
    app: &Rc<RefCell<App>>,
    widget: &Rc<CarouselWidget>,
    canvas: &web::HtmlCanvasElement,
) {
    wire_pointermove(app, canvas);
    wire_pointerdown(app, widget);
}

fn wire_pointermove(app: &Rc<RefCell<App>>, canvas: &web::HtmlCanvasElement) {
    let app = app.clone();
    let canvas = canvas.clone();
    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        let rect = canvas.get_bounding_client_rect();
        let ndc = pointer_ndc(
            (ev.client_x() as f64 - rect.left()) as f32,
            (ev.client_y() as f64 - rect.top()) as f32,
            rect.width() as f32,
            rect.height() as f32,
        );
        app.borrow_mut().session.pointer(ndc);
    }) as Box<dyn FnMut(_)>);
    if let Some(wnd) = web::window() {
        _ = wnd.add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref());
    }
    closure.forget();
}

fn wire_pointerdown(app: &Rc<RefCell<App>>, widget: &Rc<CarouselWidget>) {
    let app = app.clone();
    let widget = widget.clone();
    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |_ev: web::PointerEvent| {
        super::gesture(&app, &widget);
    }) as Box<dyn FnMut(_)>);
    if let Some(wnd) = web::window() {
        _ = wnd.add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
    }
    closure.forget();
}
