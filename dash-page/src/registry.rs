//! Which widget goes in which slot, and what each one is configured with.

use crate::config::PageConfig;
use crate::layout::Slot;
use crate::widget::{
    bestsellers_header, ChartConfig, HeadingFormat, RangePickerConfig, TableConfig, WidgetSpec,
};
use dash_core::{DateRange, Result};

pub const ORDERS_ENDPOINT: &str = "api/dashboard/orders";
pub const SALES_ENDPOINT: &str = "api/dashboard/sales";
pub const CUSTOMERS_ENDPOINT: &str = "api/dashboard/customers";
pub const BESTSELLERS_ENDPOINT: &str = "api/dashboard/bestsellers";

/// One widget spec per slot, in `Slot::ALL` order, all starting at `range`.
pub fn widget_specs(range: DateRange, config: &PageConfig) -> Result<Vec<(Slot, WidgetSpec)>> {
    Slot::ALL
        .into_iter()
        .map(|slot| Ok((slot, widget_spec(slot, range, config)?)))
        .collect()
}

fn widget_spec(slot: Slot, range: DateRange, config: &PageConfig) -> Result<WidgetSpec> {
    let spec = match slot {
        Slot::RangePicker => WidgetSpec::RangePicker(RangePickerConfig { range }),
        Slot::OrdersChart => WidgetSpec::Chart(ChartConfig {
            range,
            url: config.endpoint(ORDERS_ENDPOINT)?,
            label: "orders".to_string(),
            link: Some("#".to_string()),
            heading: HeadingFormat::Plain,
        }),
        Slot::SalesChart => WidgetSpec::Chart(ChartConfig {
            range,
            url: config.endpoint(SALES_ENDPOINT)?,
            label: "sales".to_string(),
            link: None,
            heading: HeadingFormat::Currency,
        }),
        Slot::CustomersChart => WidgetSpec::Chart(ChartConfig {
            range,
            url: config.endpoint(CUSTOMERS_ENDPOINT)?,
            label: "customers".to_string(),
            link: None,
            heading: HeadingFormat::Plain,
        }),
        Slot::SortableTable => WidgetSpec::Table(TableConfig {
            range,
            url: config.endpoint(BESTSELLERS_ENDPOINT)?,
            columns: bestsellers_header(),
            sort: config.table_sort.clone(),
            page_size: config.table_page_size,
        }),
    };
    Ok(spec)
}
