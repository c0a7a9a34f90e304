//! Browser widgets: a root element plus a JS renderer from `assets/js`.

use crate::dom::js_error;
use crate::js_bridge;
use dash_core::{DateRange, Result};
use dash_page::widget::{ChartConfig, RangePickerConfig, TableConfig};
use dash_page::Widget;
use serde_json::json;
use std::sync::atomic::{AtomicU32, Ordering};
use web_sys::{Document, Element};

static NEXT_WIDGET_ID: AtomicU32 = AtomicU32::new(0);

/// The element a widget renders into.
struct Mount {
    id: String,
    element: Element,
}

impl Mount {
    fn new(document: &Document, kind: &str, class: &str) -> Result<Self> {
        let id = format!(
            "dash-{}-{}",
            kind,
            NEXT_WIDGET_ID.fetch_add(1, Ordering::Relaxed)
        );
        let element = document.create_element("div").map_err(js_error)?;
        element.set_id(&id);
        element.set_class_name(class);
        Ok(Self { id, element })
    }

    fn unmount(&self) {
        js_bridge::destroy_widget(&self.id);
        self.element.remove();
    }
}

pub struct RangePicker {
    mount: Mount,
}

impl RangePicker {
    pub fn new(document: &Document, config: RangePickerConfig) -> Result<Self> {
        let mount = Mount::new(document, "range-picker", "rangepicker")?;
        let config_json = serde_json::to_string(&config)?;
        js_bridge::render_widget("renderRangePicker", &mount.id, &config_json, "");
        Ok(Self { mount })
    }
}

impl Widget<Element> for RangePicker {
    fn element(&self) -> &Element {
        &self.mount.element
    }

    fn update(&mut self, range: DateRange) {
        let range_json = json!({ "from": range.from, "to": range.to }).to_string();
        js_bridge::update_widget("updateRangePicker", &self.mount.id, &range_json);
    }

    fn destroy(&mut self) {
        self.mount.unmount();
    }
}

pub struct ColumnChart {
    mount: Mount,
    config: ChartConfig,
}

impl ColumnChart {
    pub fn new(document: &Document, config: ChartConfig) -> Result<Self> {
        let mount = Mount::new(document, &format!("{}-chart", config.label), "column-chart")?;
        let config_json = serde_json::to_string(&config)?;
        let data_url = config.request_url(&config.range);
        js_bridge::render_widget("renderColumnChart", &mount.id, &config_json, data_url.as_str());
        Ok(Self { mount, config })
    }
}

impl Widget<Element> for ColumnChart {
    fn element(&self) -> &Element {
        &self.mount.element
    }

    fn update(&mut self, range: DateRange) {
        let data_url = self.config.request_url(&range);
        log::debug!("{} chart loading {}", self.config.label, data_url);
        js_bridge::update_widget("updateColumnChart", &self.mount.id, data_url.as_str());
    }

    fn destroy(&mut self) {
        self.mount.unmount();
    }
}

pub struct SortableTable {
    mount: Mount,
    config: TableConfig,
}

impl SortableTable {
    pub fn new(document: &Document, config: TableConfig) -> Result<Self> {
        let mount = Mount::new(document, "sortable-table", "sortable-table")?;
        let config_json = serde_json::to_string(&config)?;
        let data_url = config.request_url(&config.range);
        js_bridge::render_widget("renderSortableTable", &mount.id, &config_json, data_url.as_str());
        Ok(Self { mount, config })
    }
}

impl Widget<Element> for SortableTable {
    fn element(&self) -> &Element {
        &self.mount.element
    }

    fn update(&mut self, range: DateRange) {
        let data_url = self.config.request_url(&range);
        js_bridge::update_widget("updateSortableTable", &self.mount.id, data_url.as_str());
    }

    fn destroy(&mut self) {
        self.mount.unmount();
    }
}
