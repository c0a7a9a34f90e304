//! Dashboard page controller.
//!
//! This crate provides:
//! - `layout`: the page markup and its named slots
//! - `widget`: the `Widget` trait and widget configuration records
//! - `registry`: which widget is built for which slot
//! - `host`: the `Host` trait the page renders through
//! - `page`: `Page`, the lifecycle and range-change bridge
//! - `config`: `PageConfig`
//!
//! Nothing here depends on a browser; `dash-web` supplies the DOM host.

pub mod config;
pub mod host;
pub mod layout;
pub mod page;
pub mod registry;
pub mod widget;

#[cfg(test)]
mod test_support;

pub use config::{PageConfig, RangeValidation};
pub use host::Host;
pub use layout::Slot;
pub use page::{Lifecycle, Page};
pub use widget::{Widget, WidgetSpec};
