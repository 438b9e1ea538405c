//! Typed wrappers around JS interop via `js_sys::eval()`.
//!
//! The Plotly and Leaflet glue lives in `assets/js/*.js`. Both scripts are
//! evaluated as globals once their libraries are loaded and exposed via
//! `window.*`. Engine values cross the boundary as JSON literals.

use sra_engine::render::ChartSpec;
use sra_engine::MapCommand;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};

static PLOT_BRIDGE_JS: &str = include_str!("../assets/js/plot-bridge.js");
static MAP_BRIDGE_JS: &str = include_str!("../assets/js/map-bridge.js");

/// DOM id of the Leaflet container.
pub const MAP_CONTAINER_ID: &str = "map";

/// Execute arbitrary JS, wrapping in try/catch to avoid panics.
pub fn call_js(code: &str) {
    let wrapped = format!(
        "try {{ {} }} catch(e) {{ console.warn('SRA JS call failed:', e); }}",
        code
    );
    let _ = js_sys::eval(&wrapped);
}

/// Evaluate the bridge scripts once Plotly and Leaflet are available.
///
/// The scripts are stashed on `window` and evaluated at global scope with
/// an indirect eval so their function declarations become globals.
pub fn init_bridges() {
    let all_js = [PLOT_BRIDGE_JS, MAP_BRIDGE_JS].join("\n");
    let store_js = format!(
        "window.__sraBridgeScripts = {};",
        serde_json::to_string(&all_js).unwrap_or_default()
    );
    let _ = js_sys::eval(&store_js);

    let init_js = r#"
        (function() {
            var waitForLibs = setInterval(function() {
                if (typeof Plotly !== 'undefined' && typeof L !== 'undefined') {
                    clearInterval(waitForLibs);
                    (0, eval)(window.__sraBridgeScripts);
                    delete window.__sraBridgeScripts;
                    if (typeof renderSraChart !== 'undefined') window.renderSraChart = renderSraChart;
                    if (typeof clearSraChart !== 'undefined') window.clearSraChart = clearSraChart;
                    if (typeof initSraMap !== 'undefined') window.initSraMap = initSraMap;
                    if (typeof flushSraMapQueue !== 'undefined') window.flushSraMapQueue = flushSraMapQueue;
                    window.__sraBridgesReady = true;
                    console.log('SRA bridges initialized');
                }
            }, 100);
        })();
    "#;
    let _ = js_sys::eval(init_js);
}

/// Draw a chart once the bridge and its container exist.
pub fn render_chart(spec: &ChartSpec) {
    let container = &spec.container;
    let spec_json = spec.to_json();
    call_js(&format!(
        r#"
        (function() {{
            var poll = setInterval(function() {{
                if (window.__sraBridgesReady && document.getElementById('{container}')) {{
                    clearInterval(poll);
                    try {{
                        window.renderSraChart({spec_json});
                    }} catch(e) {{ console.error('[SRA] renderSraChart error:', e); }}
                }}
            }}, 100);
        }})();
        "#,
    ));
}

/// Remove a drawn chart.
pub fn clear_chart(container_id: &str) {
    call_js(&format!(
        "if (window.clearSraChart) {{ window.clearSraChart('{0}'); }} else {{ var el = document.getElementById('{0}'); if (el) el.innerHTML = ''; }}",
        container_id
    ));
}

/// Create the Leaflet map once the bridge and the container exist, then
/// apply any map commands queued before it was ready.
pub fn init_map(center: (f64, f64), zoom: u8) {
    let (lat, lon) = center;
    let id = MAP_CONTAINER_ID;
    call_js(&format!(
        r#"
        (function() {{
            var poll = setInterval(function() {{
                if (window.__sraBridgesReady && document.getElementById('{id}')) {{
                    clearInterval(poll);
                    if (!window.__sraMap) window.initSraMap('{id}', {lat}, {lon}, {zoom});
                    window.flushSraMapQueue();
                }}
            }}, 100);
        }})();
        "#,
    ));
}

/// Queue a map command; it runs immediately if the map exists.
pub fn map_command(command: &MapCommand) {
    let json = serde_json::to_string(command).unwrap_or_default();
    call_js(&format!(
        "(window.__sraMapQueue = window.__sraMapQueue || []).push({json}); if (window.flushSraMapQueue) window.flushSraMapQueue();"
    ));
}

/// Route Leaflet interaction (`hover_in`, `hover_out`, `click`,
/// `tile_error`) to `handler(kind, station)`.
pub fn register_map_events(handler: impl FnMut(String, String) + 'static) {
    let Some(window) = web_sys::window() else {
        log::error!("No window: map events not registered");
        return;
    };
    let closure = Closure::<dyn FnMut(String, String)>::new(handler);
    if let Err(e) = js_sys::Reflect::set(
        &window,
        &JsValue::from_str("__sraMapEvent"),
        closure.as_ref().unchecked_ref(),
    ) {
        log::error!("Failed to register map events: {:?}", e);
        return;
    }
    // The window keeps the callback for the lifetime of the page.
    closure.forget();
}
