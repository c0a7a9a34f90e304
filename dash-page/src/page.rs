//! The dashboard page controller.
//!
//! Lifecycle is linear: `Unmounted -> Mounted -> Destroyed`. A page renders
//! once; a new page is built for the next visit.

use crate::config::{PageConfig, RangeValidation};
use crate::host::Host;
use crate::layout::{self, Slot};
use crate::registry;
use crate::widget::Widget;
use chrono::NaiveDateTime;
use dash_core::{DateRange, Error, RangeBus, Result, Subscription};
use log::{debug, info, warn};
use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::rc::Rc;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Lifecycle {
    Unmounted,
    Mounted,
    Destroyed,
}

type Components<N> = Vec<(Slot, Box<dyn Widget<N>>)>;

pub struct Page<H: Host> {
    host: H,
    bus: RangeBus,
    config: PageConfig,
    state: Lifecycle,
    element: Option<H::Node>,
    sub_elements: BTreeMap<String, H::Node>,
    components: Rc<RefCell<Components<H::Node>>>,
    range: Rc<Cell<Option<DateRange>>>,
    subscription: Option<Subscription>,
    toggle: Option<H::Listener>,
}

impl<H: Host> Page<H> {
    /// A page that will render into `host` and follow ranges published on `bus`.
    pub fn new(host: H, bus: RangeBus, config: PageConfig) -> Self {
        Self {
            host,
            bus,
            config,
            state: Lifecycle::Unmounted,
            element: None,
            sub_elements: BTreeMap::new(),
            components: Rc::new(RefCell::new(Vec::new())),
            range: Rc::new(Cell::new(None)),
            subscription: None,
            toggle: None,
        }
    }

    pub fn state(&self) -> Lifecycle {
        self.state
    }

    /// The range the widgets were last built or refreshed with.
    pub fn range(&self) -> Option<DateRange> {
        self.range.get()
    }

    pub fn root(&self) -> Option<&H::Node> {
        self.element.as_ref()
    }

    pub fn sub_elements(&self) -> &BTreeMap<String, H::Node> {
        &self.sub_elements
    }

    /// Render with the default range ending now.
    pub fn render(&mut self) -> Result<H::Node> {
        self.render_range(DateRange::default_ending_now())
    }

    /// Render with the default range ending at `to`.
    pub fn render_ending_at(&mut self, to: NaiveDateTime) -> Result<H::Node> {
        self.render_range(DateRange::default_ending_at(to))
    }

    /// Build the page, mount every widget and start following range changes.
    ///
    /// Returns the detached root node for the caller to insert.
    fn render_range(&mut self, range: DateRange) -> Result<H::Node> {
        match self.state {
            Lifecycle::Unmounted => {}
            Lifecycle::Mounted => return Err(Error::AlreadyRendered),
            Lifecycle::Destroyed => return Err(Error::Destroyed),
        }

        let element = self.host.create_root(&layout::template())?;
        let sub_elements = self.host.sub_elements(&element)?;
        let components = self.initialize(range, &sub_elements)?;

        *self.components.borrow_mut() = components;
        self.sub_elements = sub_elements;
        self.element = Some(element.clone());
        self.range.set(Some(range));
        self.attach_event_listeners();
        self.state = Lifecycle::Mounted;

        info!(
            "Dashboard rendered for {} .. {}",
            range.from.format("%Y-%m-%d %H:%M"),
            range.to.format("%Y-%m-%d %H:%M")
        );
        Ok(element)
    }

    fn initialize(
        &self,
        range: DateRange,
        sub_elements: &BTreeMap<String, H::Node>,
    ) -> Result<Components<H::Node>> {
        let mut components: Components<H::Node> = Vec::with_capacity(Slot::ALL.len());
        for (slot, spec) in registry::widget_specs(range, &self.config)? {
            match self.host.build_widget(spec) {
                Ok(widget) => components.push((slot, widget)),
                Err(e) => {
                    dispose(&mut components);
                    return Err(e);
                }
            }
        }

        if let Err(e) = self.render_components(&components, sub_elements) {
            dispose(&mut components);
            return Err(e);
        }
        Ok(components)
    }

    fn render_components(
        &self,
        components: &Components<H::Node>,
        sub_elements: &BTreeMap<String, H::Node>,
    ) -> Result<()> {
        for (slot, widget) in components {
            let container = sub_elements
                .get(slot.key())
                .ok_or_else(|| Error::MissingSlot(slot.key().to_string()))?;
            self.host.append(container, widget.element())?;
        }
        Ok(())
    }

    fn attach_event_listeners(&mut self) {
        let components = Rc::downgrade(&self.components);
        let current = Rc::clone(&self.range);
        let validation = self.config.range_validation;

        self.subscription = Some(self.bus.subscribe(move |range| {
            if validation == RangeValidation::Reject && !range.is_ordered() {
                warn!("Ignoring inverted range {} .. {}", range.from, range.to);
                return;
            }
            let Some(components) = components.upgrade() else {
                return;
            };
            current.set(Some(range));
            update_components(&components, range);
        }));

        self.toggle = self
            .host
            .bind_toggle(&self.config.sidebar_toggle, &self.config.collapsed_sidebar_class);
    }

    /// Stop following range changes, dispose every widget and detach the root.
    pub fn destroy(&mut self) -> Result<()> {
        match self.state {
            Lifecycle::Mounted => {
                self.teardown();
                Ok(())
            }
            Lifecycle::Unmounted => Err(Error::NotRendered),
            Lifecycle::Destroyed => Err(Error::Destroyed),
        }
    }

    fn teardown(&mut self) {
        self.subscription = None;
        self.toggle = None;
        dispose(&mut self.components.borrow_mut());
        if let Some(element) = self.element.take() {
            self.host.remove(&element);
        }
        self.sub_elements.clear();
        self.state = Lifecycle::Destroyed;
        info!("Dashboard destroyed");
    }
}

impl<H: Host> Drop for Page<H> {
    fn drop(&mut self) {
        if self.state == Lifecycle::Mounted {
            self.teardown();
        }
    }
}

fn update_components<N: 'static>(components: &RefCell<Components<N>>, range: DateRange) {
    let Ok(mut components) = components.try_borrow_mut() else {
        warn!("Range change arrived while widgets were busy; dropped");
        return;
    };
    for (slot, widget) in components.iter_mut().filter(|(slot, _)| slot.follows_range()) {
        debug!("Refreshing {slot} for {} .. {}", range.from, range.to);
        widget.update(range);
    }
}

fn dispose<N: 'static>(components: &mut Components<N>) {
    for (_, mut widget) in components.drain(..) {
        widget.destroy();
    }
}
