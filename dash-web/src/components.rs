//! RSX pieces around the imperatively rendered page.

use dioxus::prelude::*;

#[derive(Props, Clone, PartialEq)]
pub struct ErrorDisplayProps {
    pub message: String,
}

/// Shown in place of the dashboard when it could not be mounted.
#[component]
pub fn ErrorDisplay(props: ErrorDisplayProps) -> Element {
    rsx! {
        section {
            class: "dashboard-error",
            role: "alert",
            style: "padding: 16px 20px; margin: 16px; border-left: 4px solid #d32f2f; background: #fdf3f3; color: #5f2120;",
            h3 {
                style: "margin: 0 0 6px; font-size: 15px;",
                "The dashboard could not be loaded"
            }
            p {
                style: "margin: 0; font-family: monospace; font-size: 13px;",
                "{props.message}"
            }
        }
    }
}

/// Admin sidebar. Its toggler is picked up by the page through the
/// configured selector, not through RSX.
#[component]
pub fn Sidebar() -> Element {
    rsx! {
        aside {
            class: "sidebar",
            h2 {
                class: "sidebar__title",
                a { href: "/", "shop admin" }
            }
            ul {
                class: "sidebar__nav",
                li { a { href: "/", "Dashboard" } }
                li { a { href: "/products", "Products" } }
                li { a { href: "/categories", "Categories" } }
                li { a { href: "/sales", "Sales" } }
            }
            ul {
                class: "sidebar__nav sidebar__nav_bottom",
                li {
                    button {
                        r#type: "button",
                        class: "sidebar__toggler",
                        "Toggle sidebar"
                    }
                }
            }
        }
    }
}

#[derive(Props, Clone, PartialEq)]
pub struct PageOutletProps {
    /// DOM id the page root is appended to
    pub id: String,
}

/// Empty container the dashboard root is mounted into. Dioxus never renders
/// children here, so the imperatively inserted tree is left alone.
#[component]
pub fn PageOutlet(props: PageOutletProps) -> Element {
    rsx! {
        main {
            class: "main",
            id: "{props.id}",
        }
    }
}
