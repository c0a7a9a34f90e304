//! DOM-backed `Host` and the document-level `date-select` bridge.

use crate::widgets::{ColumnChart, RangePicker, SortableTable};
use chrono::{NaiveDate, NaiveDateTime};
use dash_core::{DateRange, Error, RangeBus, Result};
use dash_page::layout::SLOT_ATTRIBUTE;
use dash_page::{Host, Widget, WidgetSpec};
use std::collections::BTreeMap;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CustomEvent, Document, Element, Event, EventTarget};

/// Custom event the range picker dispatches on the document.
pub const DATE_SELECT_EVENT: &str = "date-select";

/// Convert a thrown JS value into a host error.
pub fn js_error(value: JsValue) -> Error {
    Error::Host(
        value
            .as_string()
            .unwrap_or_else(|| format!("{:?}", value)),
    )
}

/// A DOM event listener that is removed when dropped.
pub struct EventListener {
    target: EventTarget,
    event_type: String,
    callback: Closure<dyn FnMut(Event)>,
}

impl EventListener {
    pub fn new(
        target: EventTarget,
        event_type: &str,
        handler: impl FnMut(Event) + 'static,
    ) -> Result<Self> {
        let callback = Closure::<dyn FnMut(Event)>::new(handler);
        target
            .add_event_listener_with_callback(event_type, callback.as_ref().unchecked_ref())
            .map_err(js_error)?;
        Ok(Self {
            target,
            event_type: event_type.to_string(),
            callback,
        })
    }
}

impl Drop for EventListener {
    fn drop(&mut self) {
        let _ = self.target.remove_event_listener_with_callback(
            &self.event_type,
            self.callback.as_ref().unchecked_ref(),
        );
    }
}

/// The browser document as a page host.
#[derive(Clone)]
pub struct WebHost {
    document: Document,
}

impl WebHost {
    pub fn new() -> Result<Self> {
        let document = web_sys::window()
            .and_then(|window| window.document())
            .ok_or_else(|| Error::Host("no document available".to_string()))?;
        Ok(Self { document })
    }

    pub fn document(&self) -> &Document {
        &self.document
    }
}

impl Host for WebHost {
    type Node = Element;
    type Listener = EventListener;

    fn create_root(&self, markup: &str) -> Result<Element> {
        let wrapper = self.document.create_element("div").map_err(js_error)?;
        wrapper.set_inner_html(markup);
        wrapper
            .first_element_child()
            .ok_or_else(|| Error::Host("page template has no root element".to_string()))
    }

    fn sub_elements(&self, root: &Element) -> Result<BTreeMap<String, Element>> {
        let nodes = root
            .query_selector_all(&format!("[{SLOT_ATTRIBUTE}]"))
            .map_err(js_error)?;
        let mut elements = BTreeMap::new();
        for index in 0..nodes.length() {
            let Some(element) = nodes.item(index).and_then(|n| n.dyn_into::<Element>().ok()) else {
                continue;
            };
            if let Some(key) = element.get_attribute(SLOT_ATTRIBUTE) {
                elements.insert(key, element);
            }
        }
        Ok(elements)
    }

    fn append(&self, container: &Element, child: &Element) -> Result<()> {
        container.append_child(child).map_err(js_error)?;
        Ok(())
    }

    fn remove(&self, node: &Element) {
        node.remove();
    }

    fn bind_toggle(&self, selector: &str, body_class: &str) -> Option<EventListener> {
        let control = self.document.query_selector(selector).ok().flatten()?;
        let body = self.document.body()?;
        let class = body_class.to_string();
        let listener = EventListener::new(control.into(), "pointerdown", move |_| {
            let _ = body.class_list().toggle(&class);
        });
        match listener {
            Ok(listener) => Some(listener),
            Err(e) => {
                log::warn!("Sidebar toggle not bound: {}", e);
                None
            }
        }
    }

    fn build_widget(&self, spec: WidgetSpec) -> Result<Box<dyn Widget<Element>>> {
        let widget: Box<dyn Widget<Element>> = match spec {
            WidgetSpec::RangePicker(config) => Box::new(RangePicker::new(&self.document, config)?),
            WidgetSpec::Chart(config) => Box::new(ColumnChart::new(&self.document, config)?),
            WidgetSpec::Table(config) => Box::new(SortableTable::new(&self.document, config)?),
        };
        Ok(widget)
    }
}

/// Forwards document-level `date-select` events into a `RangeBus`.
///
/// Listening stops when this is dropped.
pub struct DocumentRangeSource {
    _listener: EventListener,
}

impl DocumentRangeSource {
    pub fn attach(document: &Document, bus: RangeBus) -> Result<Self> {
        let listener = EventListener::new(document.clone().into(), DATE_SELECT_EVENT, move |event| {
            match range_from_event(&event) {
                Some(range) => {
                    bus.publish(range);
                }
                None => log::warn!("Ignoring {} event without a {{from, to}} detail", DATE_SELECT_EVENT),
            }
        })?;
        Ok(Self {
            _listener: listener,
        })
    }
}

fn range_from_event(event: &Event) -> Option<DateRange> {
    let detail = event.dyn_ref::<CustomEvent>()?.detail();
    let from = js_sys::Reflect::get(&detail, &JsValue::from_str("from")).ok()?;
    let to = js_sys::Reflect::get(&detail, &JsValue::from_str("to")).ok()?;
    // Validation is the page's call, so keep the order as sent.
    Some(DateRange::unchecked(local_date_time(&from)?, local_date_time(&to)?))
}

/// Read a JS `Date` as local wall-clock time.
fn local_date_time(value: &JsValue) -> Option<NaiveDateTime> {
    let date = value.dyn_ref::<js_sys::Date>()?;
    if date.get_time().is_nan() {
        return None;
    }
    NaiveDate::from_ymd_opt(
        date.get_full_year() as i32,
        date.get_month() + 1,
        date.get_date(),
    )?
    .and_hms_milli_opt(
        date.get_hours(),
        date.get_minutes(),
        date.get_seconds(),
        date.get_milliseconds(),
    )
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use dash_core::Subscription;
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen_test::*;
    use web_sys::CustomEventInit;

    wasm_bindgen_test_configure!(run_in_browser);

    fn document() -> Document {
        WebHost::new().unwrap().document().clone()
    }

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    /// A JS `Date` in local time. `month` is zero-based, as in JS.
    fn js_date(year: u32, month: i32, day: i32, hours: i32, minutes: i32) -> JsValue {
        js_sys::Date::new_with_year_month_day_hr_min_sec(year, month, day, hours, minutes, 0).into()
    }

    fn detail(from: &JsValue, to: &JsValue) -> JsValue {
        let detail = js_sys::Object::new();
        js_sys::Reflect::set(&detail, &JsValue::from_str("from"), from).unwrap();
        js_sys::Reflect::set(&detail, &JsValue::from_str("to"), to).unwrap();
        detail.into()
    }

    fn dispatch(document: &Document, detail: &JsValue) {
        let init = CustomEventInit::new();
        init.set_detail(detail);
        let event = CustomEvent::new_with_event_init_dict(DATE_SELECT_EVENT, &init).unwrap();
        document.dispatch_event(&event).unwrap();
    }

    fn record(bus: &RangeBus) -> (Rc<RefCell<Vec<DateRange>>>, Subscription) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let subscription = {
            let seen = Rc::clone(&seen);
            bus.subscribe(move |range| seen.borrow_mut().push(range))
        };
        (seen, subscription)
    }

    #[wasm_bindgen_test]
    fn test_date_select_publishes_local_wall_time() {
        let document = document();
        let bus = RangeBus::new();
        let (seen, _subscription) = record(&bus);
        let _source = DocumentRangeSource::attach(&document, bus.clone()).unwrap();

        dispatch(
            &document,
            &detail(&js_date(2024, 5, 1, 8, 30), &js_date(2024, 5, 15, 17, 45)),
        );

        assert_eq!(
            *seen.borrow(),
            vec![DateRange::unchecked(at(2024, 6, 1, 8, 30), at(2024, 6, 15, 17, 45))]
        );
    }

    #[wasm_bindgen_test]
    fn test_inverted_dates_keep_their_order() {
        let document = document();
        let bus = RangeBus::new();
        let (seen, _subscription) = record(&bus);
        let _source = DocumentRangeSource::attach(&document, bus.clone()).unwrap();

        dispatch(
            &document,
            &detail(&js_date(2024, 0, 31, 0, 0), &js_date(2023, 11, 1, 0, 0)),
        );

        let seen = seen.borrow();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].from, at(2024, 1, 31, 0, 0));
        assert!(!seen[0].is_ordered());
    }

    #[wasm_bindgen_test]
    fn test_non_date_detail_publishes_nothing() {
        let document = document();
        let bus = RangeBus::new();
        let (seen, _subscription) = record(&bus);
        let _source = DocumentRangeSource::attach(&document, bus.clone()).unwrap();

        dispatch(
            &document,
            &detail(&JsValue::from_str("2024-06-01"), &JsValue::from_str("2024-06-15")),
        );
        dispatch(&document, &JsValue::NULL);
        let invalid: JsValue = js_sys::Date::new(&JsValue::from_f64(f64::NAN)).into();
        dispatch(&document, &detail(&invalid, &js_date(2024, 5, 15, 0, 0)));

        assert!(seen.borrow().is_empty());
    }

    #[wasm_bindgen_test]
    fn test_plain_event_publishes_nothing() {
        let document = document();
        let bus = RangeBus::new();
        let (seen, _subscription) = record(&bus);
        let _source = DocumentRangeSource::attach(&document, bus.clone()).unwrap();

        let event = Event::new(DATE_SELECT_EVENT).unwrap();
        document.dispatch_event(&event).unwrap();

        assert!(seen.borrow().is_empty());
    }

    #[wasm_bindgen_test]
    fn test_dropped_source_stops_forwarding() {
        let document = document();
        let bus = RangeBus::new();
        let (seen, _subscription) = record(&bus);
        let source = DocumentRangeSource::attach(&document, bus.clone()).unwrap();
        drop(source);

        dispatch(
            &document,
            &detail(&js_date(2024, 5, 1, 0, 0), &js_date(2024, 5, 15, 0, 0)),
        );

        assert!(seen.borrow().is_empty());
    }
}
