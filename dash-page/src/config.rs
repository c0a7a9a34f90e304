//! Page configuration.
//!
//! Every field has a default, so an empty JSON object is a valid config.

use crate::widget::SortState;
use dash_core::Result;
use serde::{Deserialize, Serialize};
use url::Url;

/// What to do with a published range whose `from` lies after `to`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RangeValidation {
    /// Forward it to the widgets unchanged.
    #[default]
    Tolerate,
    /// Log it and refresh nothing.
    Reject,
}

/// Settings for one dashboard page instance.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    /// Base URL the widget endpoints are resolved against. Keep the
    /// trailing slash: a last path segment without one gets replaced.
    pub backend_url: String,
    pub range_validation: RangeValidation,
    /// Rows requested per page by the best sellers table.
    pub table_page_size: usize,
    /// Initial server-side sort of the best sellers table.
    pub table_sort: SortState,
    /// Selector of the optional sidebar toggle control.
    pub sidebar_toggle: String,
    /// Body class flipped by the sidebar toggle.
    pub collapsed_sidebar_class: String,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            backend_url: "http://localhost:3001/".to_string(),
            range_validation: RangeValidation::Tolerate,
            table_page_size: 30,
            table_sort: SortState::default(),
            sidebar_toggle: ".sidebar__toggler".to_string(),
            collapsed_sidebar_class: "is-collapsed-sidebar".to_string(),
        }
    }
}

impl PageConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Resolve an API path such as `api/dashboard/orders` against `backend_url`.
    pub fn endpoint(&self, path: &str) -> Result<Url> {
        Ok(Url::parse(&self.backend_url)?.join(path)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widget::SortOrder;
    use dash_core::Error;

    #[test]
    fn test_empty_json_gives_defaults() {
        let config = PageConfig::from_json("{}").unwrap();
        assert_eq!(config, PageConfig::default());
    }

    #[test]
    fn test_partial_json_overrides_fields() {
        let config = PageConfig::from_json(
            r#"{
                "backend_url": "https://shop.example.com/admin/",
                "range_validation": "reject",
                "table_sort": { "id": "sales", "order": "desc" }
            }"#,
        )
        .unwrap();
        assert_eq!(config.backend_url, "https://shop.example.com/admin/");
        assert_eq!(config.range_validation, RangeValidation::Reject);
        assert_eq!(config.table_sort.id, "sales");
        assert_eq!(config.table_sort.order, SortOrder::Desc);
        assert_eq!(config.table_page_size, 30);
    }

    #[test]
    fn test_malformed_json_is_a_config_error() {
        let result = PageConfig::from_json("{ \"table_page_size\": \"lots\" }");
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_endpoint_joins_base() {
        let config = PageConfig {
            backend_url: "https://shop.example.com/admin/".to_string(),
            ..PageConfig::default()
        };
        let url = config.endpoint("api/dashboard/orders").unwrap();
        assert_eq!(url.as_str(), "https://shop.example.com/admin/api/dashboard/orders");
    }

    #[test]
    fn test_relative_backend_url_is_rejected() {
        let config = PageConfig {
            backend_url: "not a url".to_string(),
            ..PageConfig::default()
        };
        assert!(matches!(
            config.endpoint("api/dashboard/orders"),
            Err(Error::InvalidUrl(_))
        ));
    }
}
