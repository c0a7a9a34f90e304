//! In-memory host and recording widgets for page tests.

use crate::host::Host;
use crate::widget::{Widget, WidgetSpec};
use dash_core::{DateRange, Error, Result};
use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, BTreeSet};
use std::rc::Rc;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

#[derive(Clone, Debug, PartialEq)]
pub enum Call {
    Update(String, DateRange),
    Destroy(String),
}

#[derive(Default)]
struct Dom {
    next_node: usize,
    children: BTreeMap<NodeId, Vec<NodeId>>,
    removed: Vec<NodeId>,
    body_classes: BTreeSet<String>,
    widgets: Vec<String>,
    built_ranges: Vec<DateRange>,
}

impl Dom {
    fn node(&mut self) -> NodeId {
        self.next_node += 1;
        NodeId(self.next_node)
    }
}

/// Fake DOM. Clones share the same tree.
#[derive(Clone, Default)]
pub struct FakeHost {
    dom: Rc<RefCell<Dom>>,
    slots: Rc<RefCell<BTreeMap<NodeId, BTreeMap<String, NodeId>>>>,
    calls: Rc<RefCell<Vec<Call>>>,
    has_toggle: bool,
    toggle_bound: Rc<Cell<usize>>,
    missing_slot: Option<&'static str>,
}

impl FakeHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_toggle() -> Self {
        Self {
            has_toggle: true,
            ..Self::default()
        }
    }

    /// A host whose markup parsing loses the container for `key`.
    pub fn without_slot(key: &'static str) -> Self {
        Self {
            missing_slot: Some(key),
            ..Self::default()
        }
    }

    pub fn children_of(&self, node: NodeId) -> Vec<NodeId> {
        self.dom
            .borrow()
            .children
            .get(&node)
            .cloned()
            .unwrap_or_default()
    }

    pub fn node_count(&self) -> usize {
        self.dom.borrow().next_node
    }

    pub fn removed(&self) -> Vec<NodeId> {
        self.dom.borrow().removed.clone()
    }

    pub fn widget_names(&self) -> Vec<String> {
        self.dom.borrow().widgets.clone()
    }

    pub fn built_ranges(&self) -> Vec<DateRange> {
        self.dom.borrow().built_ranges.clone()
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    /// Simulate a pointer press on the sidebar toggle.
    pub fn pointerdown(&self) {
        if self.toggle_bound.get() == 0 {
            return;
        }
        let mut dom = self.dom.borrow_mut();
        let class = "is-collapsed-sidebar".to_string();
        if !dom.body_classes.remove(&class) {
            dom.body_classes.insert(class);
        }
    }

    pub fn body_has_class(&self, class: &str) -> bool {
        self.dom.borrow().body_classes.contains(class)
    }
}

/// Listener handle; dropping it unbinds the toggle.
pub struct FakeListener {
    bound: Rc<Cell<usize>>,
}

impl Drop for FakeListener {
    fn drop(&mut self) {
        self.bound.set(self.bound.get() - 1);
    }
}

impl Host for FakeHost {
    type Node = NodeId;
    type Listener = FakeListener;

    fn create_root(&self, markup: &str) -> Result<NodeId> {
        let mut dom = self.dom.borrow_mut();
        let root = dom.node();
        let mut slots = BTreeMap::new();
        for key in markup
            .split("data-element=\"")
            .skip(1)
            .filter_map(|rest| rest.split('"').next())
        {
            if Some(key) == self.missing_slot {
                continue;
            }
            slots.insert(key.to_string(), dom.node());
        }
        self.slots.borrow_mut().insert(root, slots);
        Ok(root)
    }

    fn sub_elements(&self, root: &NodeId) -> Result<BTreeMap<String, NodeId>> {
        self.slots
            .borrow()
            .get(root)
            .cloned()
            .ok_or_else(|| Error::Host("unknown root".to_string()))
    }

    fn append(&self, container: &NodeId, child: &NodeId) -> Result<()> {
        self.dom
            .borrow_mut()
            .children
            .entry(*container)
            .or_default()
            .push(*child);
        Ok(())
    }

    fn remove(&self, node: &NodeId) {
        self.dom.borrow_mut().removed.push(*node);
    }

    fn bind_toggle(&self, _selector: &str, _body_class: &str) -> Option<FakeListener> {
        if !self.has_toggle {
            return None;
        }
        self.toggle_bound.set(self.toggle_bound.get() + 1);
        Some(FakeListener {
            bound: Rc::clone(&self.toggle_bound),
        })
    }

    fn build_widget(&self, spec: WidgetSpec) -> Result<Box<dyn Widget<NodeId>>> {
        let name = match &spec {
            WidgetSpec::RangePicker(_) => "rangePicker".to_string(),
            WidgetSpec::Chart(config) => format!("{}Chart", config.label),
            WidgetSpec::Table(_) => "sortableTable".to_string(),
        };
        let mut dom = self.dom.borrow_mut();
        let element = dom.node();
        dom.widgets.push(name.clone());
        dom.built_ranges.push(spec.range());
        Ok(Box::new(RecordingWidget {
            name,
            element,
            calls: Rc::clone(&self.calls),
        }))
    }
}

struct RecordingWidget {
    name: String,
    element: NodeId,
    calls: Rc<RefCell<Vec<Call>>>,
}

impl Widget<NodeId> for RecordingWidget {
    fn element(&self) -> &NodeId {
        &self.element
    }

    fn update(&mut self, range: DateRange) {
        self.calls
            .borrow_mut()
            .push(Call::Update(self.name.clone(), range));
    }

    fn destroy(&mut self) {
        self.calls.borrow_mut().push(Call::Destroy(self.name.clone()));
    }
}
