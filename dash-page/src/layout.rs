//! Static markup skeleton of the dashboard and its named slots.

use std::fmt;

/// Attribute that names a slot container in the page markup.
pub const SLOT_ATTRIBUTE: &str = "data-element";

/// A named placeholder where one child widget's root node is mounted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Slot {
    RangePicker,
    OrdersChart,
    SalesChart,
    CustomersChart,
    SortableTable,
}

impl Slot {
    /// All slots in mount order.
    pub const ALL: [Slot; 5] = [
        Slot::RangePicker,
        Slot::OrdersChart,
        Slot::SalesChart,
        Slot::CustomersChart,
        Slot::SortableTable,
    ];

    /// Value of the slot's `data-element` attribute.
    pub fn key(self) -> &'static str {
        match self {
            Slot::RangePicker => "rangePicker",
            Slot::OrdersChart => "ordersChart",
            Slot::SalesChart => "salesChart",
            Slot::CustomersChart => "customersChart",
            Slot::SortableTable => "sortableTable",
        }
    }

    pub fn class(self) -> &'static str {
        match self {
            Slot::RangePicker => "rangepicker",
            Slot::OrdersChart => "column-chart dashboard__chart_orders",
            Slot::SalesChart => "column-chart dashboard__chart_sales",
            Slot::CustomersChart => "column-chart dashboard__chart_customers",
            Slot::SortableTable => "sortable-table",
        }
    }

    /// Whether the widget in this slot is refreshed when the range changes.
    /// The picker is the source of the change, so it is left alone.
    pub fn follows_range(self) -> bool {
        !matches!(self, Slot::RangePicker)
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

fn slot_div(slot: Slot) -> String {
    format!(
        r#"<div {SLOT_ATTRIBUTE}="{}" class="{}"></div>"#,
        slot.key(),
        slot.class()
    )
}

/// Markup of the whole page. The first element is the page root.
pub fn template() -> String {
    format!(
        r#"<div class="dashboard full-height flex-column">
  <div class="content__top-panel">
    <h2 class="page-title">Dashboard</h2>
    {range_picker}
  </div>
  <div class="dashboard__charts">
    {orders}
    {sales}
    {customers}
  </div>
  <h3 class="block-title">Best sellers</h3>
  {table}
</div>"#,
        range_picker = slot_div(Slot::RangePicker),
        orders = slot_div(Slot::OrdersChart),
        sales = slot_div(Slot::SalesChart),
        customers = slot_div(Slot::CustomersChart),
        table = slot_div(Slot::SortableTable),
    )
}
