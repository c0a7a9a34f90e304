//! Child widget contract and the configuration records widgets are built from.
//!
//! Configs are plain values: each widget receives its own copy of the range,
//! so one widget cannot change what another was constructed with.

use dash_core::DateRange;
use serde::{Deserialize, Serialize};
use url::Url;

/// A child widget mounted into one page slot.
///
/// `N` is the host's node type (`web_sys::Element` in the browser).
pub trait Widget<N> {
    /// Root node appended into the widget's slot.
    fn element(&self) -> &N;

    /// Reload the widget's data for `range`.
    fn update(&mut self, range: DateRange);

    /// Release listeners and pending work and detach the root node.
    fn destroy(&mut self);
}

/// How a chart renders its headline total.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum HeadingFormat {
    #[default]
    Plain,
    /// Dollar-prefixed, used by the sales chart.
    Currency,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_str(self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

/// Column and direction a table is sorted by.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortState {
    pub id: String,
    #[serde(default)]
    pub order: SortOrder,
}

impl Default for SortState {
    fn default() -> Self {
        Self {
            id: "title".to_string(),
            order: SortOrder::Asc,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortType {
    String,
    Number,
}

/// Custom cell renderers understood by the table widget.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CellTemplate {
    /// First product image as a thumbnail.
    Image,
    /// `category.title / subcategory.title` with the category on hover.
    Category,
    /// Dollar-prefixed amount.
    Currency,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnDef {
    pub id: String,
    pub title: String,
    pub sortable: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_type: Option<SortType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template: Option<CellTemplate>,
}

impl ColumnDef {
    fn new(id: &str, title: &str) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            sortable: false,
            sort_type: None,
            template: None,
        }
    }

    fn sorted_as(mut self, sort_type: SortType) -> Self {
        self.sortable = true;
        self.sort_type = Some(sort_type);
        self
    }

    fn rendered_as(mut self, template: CellTemplate) -> Self {
        self.template = Some(template);
        self
    }
}

/// Columns of the best sellers table.
pub fn bestsellers_header() -> Vec<ColumnDef> {
    vec![
        ColumnDef::new("images", "Image").rendered_as(CellTemplate::Image),
        ColumnDef::new("title", "Name").sorted_as(SortType::String),
        ColumnDef::new("subcategory", "Category").rendered_as(CellTemplate::Category),
        ColumnDef::new("quantity", "Quantity").sorted_as(SortType::Number),
        ColumnDef::new("price", "Price")
            .sorted_as(SortType::Number)
            .rendered_as(CellTemplate::Currency),
        ColumnDef::new("sales", "Sales").sorted_as(SortType::Number),
    ]
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RangePickerConfig {
    pub range: DateRange,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartConfig {
    pub range: DateRange,
    pub url: Url,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    pub heading: HeadingFormat,
}

impl ChartConfig {
    /// Data request for `range`.
    pub fn request_url(&self, range: &DateRange) -> Url {
        let mut url = self.url.clone();
        url.query_pairs_mut()
            .append_pair("from", &range.from_param())
            .append_pair("to", &range.to_param());
        url
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableConfig {
    pub range: DateRange,
    pub url: Url,
    pub columns: Vec<ColumnDef>,
    pub sort: SortState,
    pub page_size: usize,
}

impl TableConfig {
    /// Server-sorted first page for `range`.
    pub fn request_url(&self, range: &DateRange) -> Url {
        let mut url = self.url.clone();
        url.query_pairs_mut()
            .append_pair("_embed", "subcategory.category")
            .append_pair("_sort", &self.sort.id)
            .append_pair("_order", self.sort.order.as_str())
            .append_pair("_start", "0")
            .append_pair("_end", &self.page_size.to_string())
            .append_pair("from", &range.from_param())
            .append_pair("to", &range.to_param());
        url
    }
}

/// What the page asks its host to construct for a slot.
#[derive(Clone, Debug, PartialEq)]
pub enum WidgetSpec {
    RangePicker(RangePickerConfig),
    Chart(ChartConfig),
    Table(TableConfig),
}

impl WidgetSpec {
    pub fn range(&self) -> DateRange {
        match self {
            WidgetSpec::RangePicker(config) => config.range,
            WidgetSpec::Chart(config) => config.range,
            WidgetSpec::Table(config) => config.range,
        }
    }
}
