//! Dashboard page
//!
//! Renders the analytics dashboard: a date-range picker, orders / sales /
//! customers column charts and a best sellers table.
//!
//! Data flow:
//! 1. `config/dashboard.json` is embedded with `include_str!` and parsed
//!    into a `PageConfig`.
//! 2. On mount: the widget scripts are loaded, a `RangeBus` is created and
//!    fed by the document-level `date-select` listener, and the page is
//!    rendered and appended to the outlet.
//! 3. Each `date-select` refreshes the charts and the table.
//! 4. On unmount (navigation away): the page is destroyed and the listener
//!    removed.

mod components;
mod dom;
mod js_bridge;
mod widgets;

use anyhow::{anyhow, Context};
use components::{ErrorDisplay, PageOutlet, Sidebar};
use dash_core::RangeBus;
use dash_page::{Page, PageConfig};
use dioxus::prelude::*;
use dom::{DocumentRangeSource, WebHost};
use std::cell::RefCell;
use std::rc::Rc;

/// Page settings, embedded at compile time.
const CONFIG_JSON: &str = include_str!("../config/dashboard.json");

/// DOM id of the element the page root is appended to.
const OUTLET_ID: &str = "dashboard-outlet";

fn main() {
    dioxus_logger::init(dioxus_logger::tracing::Level::INFO).expect("failed to init logger");
    dioxus::LaunchBuilder::new()
        .with_cfg(dioxus::web::Config::new().rootname("dashboard-root"))
        .launch(App);
}

/// A rendered page plus the bridge feeding it range changes.
struct Dashboard {
    page: Page<WebHost>,
    _source: DocumentRangeSource,
}

impl Dashboard {
    fn mount() -> anyhow::Result<Self> {
        let config = PageConfig::from_json(CONFIG_JSON).context("invalid dashboard config")?;
        let host = WebHost::new()?;
        let document = host.document().clone();
        let outlet = document
            .get_element_by_id(OUTLET_ID)
            .ok_or_else(|| anyhow!("missing #{} outlet", OUTLET_ID))?;

        js_bridge::init_widgets();

        let bus = RangeBus::new();
        let source = DocumentRangeSource::attach(&document, bus.clone())?;
        let mut page = Page::new(host, bus, config);
        let root = page.render()?;
        outlet
            .append_child(&root)
            .map_err(|e| anyhow!("failed to insert dashboard: {:?}", e))?;

        Ok(Self {
            page,
            _source: source,
        })
    }

    fn unmount(mut self) {
        if let Err(e) = self.page.destroy() {
            log::warn!("Dashboard teardown: {}", e);
        }
    }
}

#[component]
fn App() -> Element {
    let mut error_msg = use_signal(|| None::<String>);
    let dashboard = use_hook(|| Rc::new(RefCell::new(None::<Dashboard>)));

    // ─── Mount the page once the outlet exists ───
    let mounted = dashboard.clone();
    use_effect(move || match Dashboard::mount() {
        Ok(page) => {
            *mounted.borrow_mut() = Some(page);
        }
        Err(e) => {
            log::error!("Failed to render dashboard: {:#}", e);
            error_msg.set(Some(format!("{:#}", e)));
        }
    });

    // ─── Tear it down on navigation ───
    let mounted = dashboard.clone();
    use_drop(move || {
        if let Some(page) = mounted.borrow_mut().take() {
            page.unmount();
        }
    });

    rsx! {
        div {
            style: "display: flex; min-height: 100vh; font-family: system-ui, -apple-system, sans-serif;",
            Sidebar {}
            div {
                style: "flex: 1; padding: 8px;",
                if let Some(err) = error_msg() {
                    ErrorDisplay { message: err }
                }
                PageOutlet { id: OUTLET_ID.to_string() }
            }
        }
    }
}
