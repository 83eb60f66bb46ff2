//! WASM bindings for the book sidebar
//!
//! Attaches the navigator to a live container element: the markup is
//! rendered in Rust, written into the page, and the scroll decision and
//! event listeners are applied to the real DOM. `sessionStorage` backs the
//! scroll offset.

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, Event, HtmlElement, ScrollIntoViewOptions, ScrollLogicalPosition, Storage};

use crate::links::validate_path_to_root;
use crate::prelude::*;
use crate::store::record_scroll;

// Use wee_alloc for smaller WASM binary
#[cfg(feature = "wasm")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

/// Initialize panic hook for better error messages in browser console
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// `window.sessionStorage`. Storage failures (privacy mode, quota) are ignored.
struct BrowserSessionStore(Option<Storage>);

impl BrowserSessionStore {
    fn open() -> Self {
        let storage = web_sys::window().and_then(|window| window.session_storage().ok().flatten());
        Self(storage)
    }
}

impl SessionStore for BrowserSessionStore {
    fn get_item(&self, key: &str) -> Option<String> {
        self.0.as_ref()?.get_item(key).ok().flatten()
    }

    fn set_item(&mut self, key: &str, value: &str) {
        if let Some(storage) = &self.0 {
            let _ = storage.set_item(key, value);
        }
    }

    fn remove_item(&mut self, key: &str) {
        if let Some(storage) = &self.0 {
            let _ = storage.remove_item(key);
        }
    }
}

fn to_js_error(err: SidebarError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Attach the compiled-in book sidebar to `container`
#[wasm_bindgen(js_name = "attachSidebar")]
pub fn attach_sidebar(container: HtmlElement, path_to_root: &str) -> Result<(), JsValue> {
    attach_with(&SidebarNavigator::book(), &container, path_to_root)
}

/// Attach a sidebar for a tree given in its JSON form
#[wasm_bindgen(js_name = "attachSidebarWithTree")]
pub fn attach_sidebar_with_tree(
    container: HtmlElement,
    path_to_root: &str,
    tree_json: &str,
) -> Result<(), JsValue> {
    let tree = NavigationTree::from_json(tree_json).map_err(to_js_error)?;
    let navigator = SidebarNavigator::new(tree, SidebarConfig::default());
    attach_with(&navigator, &container, path_to_root)
}

fn attach_with(
    navigator: &SidebarNavigator,
    container: &HtmlElement,
    path_to_root: &str,
) -> Result<(), JsValue> {
    validate_path_to_root(path_to_root).map_err(to_js_error)?;

    let location = web_sys::window().and_then(|window| window.location().href().ok());
    let page = PageContext {
        location,
        path_to_root: path_to_root.to_string(),
    };

    // Scrolling is decided against a detached panel and applied once the
    // markup is in the page.
    let mut store = BrowserSessionStore::open();
    let mut panel = PanelState {
        scroll_top: f64::from(container.scroll_top()),
        centered_on: None,
    };
    let sidebar = navigator.attach(&page, &mut store, &mut panel);
    container.set_inner_html(&sidebar.html());

    match sidebar.scroll_outcome() {
        ScrollOutcome::Restored(offset) => container.set_scroll_top(offset as i32),
        ScrollOutcome::CenteredOn(_) => {
            if let Some(active) = container.query_selector(".active")? {
                let options = ScrollIntoViewOptions::new();
                options.set_block(ScrollLogicalPosition::Center);
                active.scroll_into_view_with_scroll_into_view_options(&options);
            }
        }
        ScrollOutcome::Unchanged => {}
    }

    bind_scroll_tracking(container, navigator.config().storage_key.clone())?;
    bind_toggles(container)?;
    Ok(())
}

fn bind_scroll_tracking(container: &HtmlElement, key: String) -> Result<(), JsValue> {
    let panel = container.clone();
    let on_click = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
        let clicked_link = event
            .target()
            .and_then(|target| target.dyn_into::<Element>().ok())
            .is_some_and(|element| element.tag_name().eq_ignore_ascii_case("a"));
        if clicked_link {
            let mut store = BrowserSessionStore::open();
            record_scroll(&mut store, &key, f64::from(panel.scroll_top()));
        }
    });
    let callback: &js_sys::Function = on_click.as_ref().unchecked_ref();
    container.add_event_listener_with_callback("click", callback)?;
    on_click.forget();
    Ok(())
}

fn bind_toggles(container: &HtmlElement) -> Result<(), JsValue> {
    let toggles = container.query_selector_all("a.toggle")?;
    for i in 0..toggles.length() {
        let Some(toggle) = toggles.item(i) else {
            continue;
        };
        let on_toggle = Closure::<dyn FnMut(Event)>::new(|event: Event| {
            let section = event
                .current_target()
                .and_then(|target| target.dyn_into::<Element>().ok())
                .and_then(|element| element.parent_element());
            if let Some(section) = section {
                let _ = section.class_list().toggle("expanded");
            }
        });
        let callback: &js_sys::Function = on_toggle.as_ref().unchecked_ref();
        toggle.add_event_listener_with_callback("click", callback)?;
        on_toggle.forget();
    }
    Ok(())
}

/// Get version information
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
