//! The environment a page renders into.
//!
//! In the browser this is the DOM plus the concrete widget kinds; in tests
//! it is an in-memory fake. The page never touches either directly.

use crate::widget::{Widget, WidgetSpec};
use dash_core::Result;
use std::collections::BTreeMap;

pub trait Host {
    /// Handle to a node of the host's tree.
    type Node: Clone + 'static;

    /// Keeps an event listener attached; dropping it detaches the listener.
    type Listener;

    /// Build a detached tree from `markup` and return its first element.
    fn create_root(&self, markup: &str) -> Result<Self::Node>;

    /// Every descendant of `root` carrying a `data-element` attribute,
    /// keyed by that attribute's value.
    fn sub_elements(&self, root: &Self::Node) -> Result<BTreeMap<String, Self::Node>>;

    fn append(&self, container: &Self::Node, child: &Self::Node) -> Result<()>;

    /// Detach `node` from wherever it is mounted.
    fn remove(&self, node: &Self::Node);

    /// Make the control matching `selector` toggle `body_class` on the
    /// document body on pointer down. `None` when no such control exists.
    fn bind_toggle(&self, selector: &str, body_class: &str) -> Option<Self::Listener>;

    fn build_widget(&self, spec: WidgetSpec) -> Result<Box<dyn Widget<Self::Node>>>;
}
