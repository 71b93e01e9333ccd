//! The slice of a page the widget is allowed to touch.
//!
//! These traits stand in for the browser's global document so the vote flow
//! can run against an in-memory page in tests and in the headless driver.

mod memory;

pub use memory::{MemoryDocument, MemoryElement};

use std::sync::Arc;

pub type ClickHandler = Arc<dyn Fn() + Send + Sync>;
pub type ReadyCallback = Box<dyn FnOnce() + Send>;

/// A single node in the page.
pub trait Element: Send + Sync {
    fn id(&self) -> Option<String>;

    /// Value of the `data-<key>` attribute.
    fn data(&self, key: &str) -> Option<String>;

    fn text(&self) -> String;

    fn set_text(&self, text: &str);

    fn style(&self, property: &str) -> Option<String>;

    fn set_style(&self, property: &str, value: &str);

    fn add_click_listener(&self, handler: ClickHandler);
}

/// Query and lifecycle access to the page.
pub trait Document: Send + Sync {
    /// Supports `.class` and `#id` selectors.
    fn query_selector_all(&self, selector: &str) -> Vec<Arc<dyn Element>>;

    fn get_element_by_id(&self, id: &str) -> Option<Arc<dyn Element>>;

    /// Runs `callback` once the document has loaded, or right away if it
    /// already has.
    fn on_ready(&self, callback: ReadyCallback);
}
