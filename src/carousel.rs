use crate::app::App;
use crate::core::{Selection, UiAction};
use crate::events;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys as web;

#[wasm_bindgen]
extern "C" {
    /// The Flickity slider, loaded by the page as a plain script.
    pub type Flickity;

    #[wasm_bindgen(constructor, catch)]
    fn new(element: &web::Element, options: &JsValue) -> Result<Flickity, JsValue>;

    #[wasm_bindgen(method)]
    fn select(this: &Flickity, index: u32);

    #[wasm_bindgen(method)]
    fn on(this: &Flickity, event: &str, handler: &js_sys::Function);

    #[wasm_bindgen(method, getter, js_name = selectedIndex)]
    fn selected_index(this: &Flickity) -> u32;

    #[wasm_bindgen(method, getter, js_name = selectedElement)]
    fn selected_element(this: &Flickity) -> Option<web::Element>;
}

/// Slider facade: Flickity when the page provides it, otherwise a plain list
/// whose selected cell is marked with `is-selected`.
pub enum CarouselWidget {
    Flickity(Flickity),
    Plain(Vec<web::Element>),
}

fn cells(root: &web::Element) -> Vec<web::Element> {
    let list = root.children();
    (0..list.length()).filter_map(|i| list.item(i)).collect()
}

impl CarouselWidget {
    pub fn mount(root: &web::Element) -> Self {
        let options = js_sys::Object::new();
        for (key, value) in [
            ("wrapAround", JsValue::TRUE),
            ("pageDots", JsValue::FALSE),
            ("prevNextButtons", JsValue::FALSE),
            ("accessibility", JsValue::FALSE),
        ] {
            _ = js_sys::Reflect::set(&options, &JsValue::from_str(key), &value);
        }
        match Flickity::new(root, &options) {
            Ok(f) => {
                log::info!("[carousel] using Flickity");
                CarouselWidget::Flickity(f)
            }
            Err(e) => {
                log::warn!("[carousel] Flickity unavailable ({:?}); using plain list", e);
                let cells = cells(root);
                if let Some(first) = cells.first() {
                    crate::dom::set_class(first, "is-selected", true);
                }
                CarouselWidget::Plain(cells)
            }
        }
    }

    /// Move the widget. May synchronously fire its change event, so callers
    /// must not hold the `App` borrow.
    pub fn select(&self, index: usize) {
        match self {
            CarouselWidget::Flickity(f) => f.select(index as u32),
            CarouselWidget::Plain(cells) => {
                for (i, c) in cells.iter().enumerate() {
                    crate::dom::set_class(c, "is-selected", i == index);
                }
            }
        }
    }
}

/// Read the centered slide's data attributes.
fn read_selection(cell: &web::Element) -> Option<Selection> {
    match Selection::from_attributes(
        cell.get_attribute("data-src").as_deref(),
        cell.get_attribute("data-verse-start").as_deref(),
        cell.get_attribute("data-shader").as_deref(),
    ) {
        Ok(s) => Some(s),
        Err(e) => {
            log::error!("[carousel] bad slide: {}", e);
            None
        }
    }
}

/// Forward the widget's slide changes into the session.
pub fn wire_change(app: &Rc<RefCell<App>>, widget: &Rc<CarouselWidget>) {
    let CarouselWidget::Flickity(f) = widget.as_ref() else {
        return;
    };
    let app_c = app.clone();
    let widget_c = widget.clone();
    let closure = Closure::wrap(Box::new(move || {
        let CarouselWidget::Flickity(f) = widget_c.as_ref() else {
            return;
        };
        let index = f.selected_index() as usize;
        let Some(selection) = f.selected_element().as_ref().and_then(read_selection) else {
            return;
        };
        events::dispatch(&app_c, &widget_c, UiAction::Select { index, selection });
    }) as Box<dyn FnMut()>);
    f.on("change", closure.as_ref().unchecked_ref());
    closure.forget();
}

/// Selection for the plain list, read the same way as from Flickity.
pub fn plain_selection(widget: &CarouselWidget, index: usize) -> Option<Selection> {
    match widget {
        CarouselWidget::Plain(cells) => cells.get(index).and_then(read_selection),
        CarouselWidget::Flickity(_) => None,
    }
}
