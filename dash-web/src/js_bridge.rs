//! Typed wrappers around JS interop via `js_sys::eval()`.
//!
//! The widget renderers live in `assets/js/*.js`. They are evaluated as
//! globals (no ES modules) and exposed via `window.*`. This module provides
//! Rust wrappers that serialize arguments and call those globals once the
//! target element is in the document.

use std::sync::Once;

// Embed all widget JS files at compile time
static RANGE_PICKER_JS: &str = include_str!("../assets/js/range-picker.js");
static COLUMN_CHART_JS: &str = include_str!("../assets/js/column-chart.js");
static SORTABLE_TABLE_JS: &str = include_str!("../assets/js/sortable-table.js");

/// Give up waiting for an element after this many 100ms polls.
const MAX_POLLS: u32 = 100;

static INIT: Once = Once::new();

/// Evaluate `code`, logging anything it throws instead of propagating it.
pub fn call_js(code: &str) {
    if let Err(e) = js_sys::eval(code) {
        log::warn!("Widget script threw: {:?}", e);
    }
}

/// Quote `value` as a JS string literal.
fn js_string(value: &str) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| "''".to_string())
}

/// Evaluate the widget scripts at global scope and promote their entry
/// points to `window.*`. Safe to call repeatedly; only the first call runs.
pub fn init_widgets() {
    INIT.call_once(|| {
        let all_js = [RANGE_PICKER_JS, COLUMN_CHART_JS, SORTABLE_TABLE_JS].join("\n");
        let store_js = format!("window.__dashWidgetScripts = {};", js_string(&all_js));
        call_js(&store_js);

        let init_js = r#"
            (function() {
                // Eval at global scope via indirect eval
                (0, eval)(window.__dashWidgetScripts);
                delete window.__dashWidgetScripts;
                if (typeof renderRangePicker !== 'undefined') window.renderRangePicker = renderRangePicker;
                if (typeof updateRangePicker !== 'undefined') window.updateRangePicker = updateRangePicker;
                if (typeof renderColumnChart !== 'undefined') window.renderColumnChart = renderColumnChart;
                if (typeof updateColumnChart !== 'undefined') window.updateColumnChart = updateColumnChart;
                if (typeof renderSortableTable !== 'undefined') window.renderSortableTable = renderSortableTable;
                if (typeof updateSortableTable !== 'undefined') window.updateSortableTable = updateSortableTable;
                if (typeof destroyDashWidget !== 'undefined') window.destroyDashWidget = destroyDashWidget;
                window.__dashWidgetsReady = true;
                console.log('Dashboard widgets initialized');
            })();
        "#;
        call_js(init_js);
    });
}

/// Call `window[function](container_id, ...args)` once the widget scripts are
/// loaded and `container_id` exists in the document.
///
/// Widgets are built detached and only land in the document when the page
/// root is inserted, so the call is deferred with a polling loop.
fn call_when_mounted(function: &str, container_id: &str, args: &[String]) {
    let id = js_string(container_id);
    let name = js_string(function);
    let args = args.join(", ");
    call_js(&format!(
        r#"
        (function() {{
            var polls = 0;
            var poll = setInterval(function() {{
                if (++polls > {MAX_POLLS}) {{
                    clearInterval(poll);
                    console.warn('[Dashboard] gave up waiting for', {id});
                    return;
                }}
                if (window.__dashWidgetsReady &&
                    typeof window[{name}] !== 'undefined' &&
                    document.getElementById({id})) {{
                    clearInterval(poll);
                    try {{
                        window[{name}]({id}, {args});
                    }} catch(e) {{ console.error('[Dashboard] ' + {name} + ' error:', e); }}
                }}
            }}, 100);
        }})();
        "#,
    ));
}

/// Render a widget into its container: `renderer(id, config, dataUrl)`.
pub fn render_widget(renderer: &str, container_id: &str, config_json: &str, data_url: &str) {
    call_when_mounted(
        renderer,
        container_id,
        &[js_string(config_json), js_string(data_url)],
    );
}

/// Hand a rendered widget its new range: `updater(id, payload)`. Charts and
/// tables take their next data URL, the range picker takes the range as JSON.
pub fn update_widget(updater: &str, container_id: &str, payload: &str) {
    call_when_mounted(updater, container_id, &[js_string(payload)]);
}

/// Drop the JS-side state of a widget.
pub fn destroy_widget(container_id: &str) {
    call_js(&format!(
        "if (window.destroyDashWidget) window.destroyDashWidget({});",
        js_string(container_id)
    ));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_js_string_escapes_quotes_and_newlines() {
        assert_eq!(js_string("it's \"x\"\n"), r#""it's \"x\"\n""#);
    }

    #[test]
    fn test_scripts_define_promoted_functions() {
        for (script, function) in [
            (RANGE_PICKER_JS, "function renderRangePicker("),
            (RANGE_PICKER_JS, "function updateRangePicker("),
            (COLUMN_CHART_JS, "function renderColumnChart("),
            (COLUMN_CHART_JS, "function updateColumnChart("),
            (SORTABLE_TABLE_JS, "function renderSortableTable("),
            (SORTABLE_TABLE_JS, "function updateSortableTable("),
            (SORTABLE_TABLE_JS, "function destroyDashWidget("),
        ] {
            assert!(script.contains(function), "missing {function}");
        }
    }
}
