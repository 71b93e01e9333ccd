use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard};

use log::debug;

use super::{ClickHandler, Document, Element, ReadyCallback};

#[derive(Default)]
struct ElementState {
    text: String,
    styles: HashMap<String, String>,
    handlers: Vec<ClickHandler>,
}

/// An element living in a [`MemoryDocument`].
pub struct MemoryElement {
    id: Option<String>,
    classes: HashSet<String>,
    data: HashMap<String, String>,
    state: Mutex<ElementState>,
}

impl MemoryElement {
    pub fn new(id: Option<&str>) -> Self {
        Self {
            id: id.map(str::to_string),
            classes: HashSet::new(),
            data: HashMap::new(),
            state: Mutex::new(ElementState::default()),
        }
    }

    pub fn with_class(mut self, class: &str) -> Self {
        self.classes.insert(class.to_string());
        self
    }

    pub fn with_data(mut self, key: &str, value: &str) -> Self {
        self.data.insert(key.to_string(), value.to_string());
        self
    }

    pub fn with_text(self, text: &str) -> Self {
        self.lock().text = text.to_string();
        self
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.contains(class)
    }

    /// Fires every registered click listener, in registration order.
    pub fn click(&self) {
        // Handlers run outside the lock so they may touch this element.
        let handlers = self.lock().handlers.clone();
        for handler in handlers {
            handler();
        }
    }

    pub fn listener_count(&self) -> usize {
        self.lock().handlers.len()
    }

    fn lock(&self) -> MutexGuard<'_, ElementState> {
        // A panicking listener must not brick the page.
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Element for MemoryElement {
    fn id(&self) -> Option<String> {
        self.id.clone()
    }

    fn data(&self, key: &str) -> Option<String> {
        self.data.get(key).cloned()
    }

    fn text(&self) -> String {
        self.lock().text.clone()
    }

    fn set_text(&self, text: &str) {
        self.lock().text = text.to_string();
    }

    fn style(&self, property: &str) -> Option<String> {
        self.lock().styles.get(property).cloned()
    }

    fn set_style(&self, property: &str, value: &str) {
        self.lock()
            .styles
            .insert(property.to_string(), value.to_string());
    }

    fn add_click_listener(&self, handler: ClickHandler) {
        self.lock().handlers.push(handler);
    }
}

#[derive(Default)]
struct ReadyState {
    loaded: bool,
    pending: Vec<ReadyCallback>,
}

/// A page held entirely in memory.
#[derive(Default)]
pub struct MemoryDocument {
    elements: Mutex<Vec<Arc<MemoryElement>>>,
    ready: Mutex<ReadyState>,
}

impl MemoryDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the markup the vote page renders: one `.vote-button` carrying
    /// `data-company` and one `count-<company>` counter per company.
    pub fn voting_page<S: AsRef<str>>(companies: &[(S, i64)]) -> Self {
        let document = Self::new();
        for (company, votes) in companies {
            let company = company.as_ref();
            document.insert(
                MemoryElement::new(Some(&format!("vote-{}", company)))
                    .with_class("vote-button")
                    .with_data("company", company),
            );
            document.insert(
                MemoryElement::new(Some(&format!("count-{}", company))).with_text(&votes.to_string()),
            );
        }
        document
    }

    pub fn insert(&self, element: MemoryElement) -> Arc<MemoryElement> {
        let element = Arc::new(element);
        self.lock_elements().push(Arc::clone(&element));
        element
    }

    /// Concrete handle, for driving clicks.
    pub fn element(&self, id: &str) -> Option<Arc<MemoryElement>> {
        self.lock_elements()
            .iter()
            .find(|el| el.id.as_deref() == Some(id))
            .cloned()
    }

    /// Equivalent of `DOMContentLoaded`; later calls are ignored.
    pub fn mark_ready(&self) {
        let pending = {
            let mut ready = self.lock_ready();
            if ready.loaded {
                return;
            }
            ready.loaded = true;
            std::mem::take(&mut ready.pending)
        };
        debug!("Document ready, running {} callback(s)", pending.len());
        for callback in pending {
            callback();
        }
    }

    pub fn is_ready(&self) -> bool {
        self.lock_ready().loaded
    }

    fn lock_elements(&self) -> MutexGuard<'_, Vec<Arc<MemoryElement>>> {
        self.elements.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn lock_ready(&self) -> MutexGuard<'_, ReadyState> {
        self.ready.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Document for MemoryDocument {
    fn query_selector_all(&self, selector: &str) -> Vec<Arc<dyn Element>> {
        let elements = self.lock_elements();
        let matches: Vec<&Arc<MemoryElement>> = if let Some(class) = selector.strip_prefix('.') {
            elements.iter().filter(|el| el.has_class(class)).collect()
        } else if let Some(id) = selector.strip_prefix('#') {
            elements
                .iter()
                .filter(|el| el.id.as_deref() == Some(id))
                .collect()
        } else {
            Vec::new()
        };
        matches
            .into_iter()
            .map(|el| Arc::clone(el) as Arc<dyn Element>)
            .collect()
    }

    fn get_element_by_id(&self, id: &str) -> Option<Arc<dyn Element>> {
        self.element(id).map(|el| el as Arc<dyn Element>)
    }

    fn on_ready(&self, callback: ReadyCallback) {
        {
            let mut ready = self.lock_ready();
            if !ready.loaded {
                ready.pending.push(callback);
                return;
            }
        }
        callback();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn voting_page_has_buttons_and_counters() {
        let doc = MemoryDocument::voting_page(&[("google", 3), ("meta", 0)]);

        let buttons = doc.query_selector_all(".vote-button");
        assert_eq!(buttons.len(), 2);
        assert_eq!(buttons[0].data("company").as_deref(), Some("google"));

        let counter = doc.get_element_by_id("count-google").unwrap();
        assert_eq!(counter.text(), "3");
        assert!(doc.get_element_by_id("count-apple").is_none());
    }

    #[test]
    fn id_selector_and_unknown_selector() {
        let doc = MemoryDocument::voting_page(&[("apple", 1)]);
        assert_eq!(doc.query_selector_all("#count-apple").len(), 1);
        assert!(doc.query_selector_all("button").is_empty());
    }

    #[test]
    fn click_runs_every_listener() {
        let doc = MemoryDocument::new();
        let button = doc.insert(MemoryElement::new(Some("b")).with_class("vote-button"));
        let hits = Arc::new(AtomicUsize::new(0));

        for _ in 0..2 {
            let hits = Arc::clone(&hits);
            button.add_click_listener(Arc::new(move || {
                hits.fetch_add(1, Ordering::SeqCst);
            }));
        }
        button.click();

        assert_eq!(button.listener_count(), 2);
        assert_eq!(hits.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn ready_callbacks_wait_for_load() {
        let doc = MemoryDocument::new();
        let hits = Arc::new(AtomicUsize::new(0));

        let early = Arc::clone(&hits);
        doc.on_ready(Box::new(move || {
            early.fetch_add(1, Ordering::SeqCst);
        }));
        assert_eq!(hits.load(Ordering::SeqCst), 0);

        doc.mark_ready();
        doc.mark_ready();
        assert_eq!(hits.load(Ordering::SeqCst), 1);

        let late = Arc::clone(&hits);
        doc.on_ready(Box::new(move || {
            late.fetch_add(1, Ordering::SeqCst);
        }));
        assert_eq!(hits.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn styles_round_trip() {
        let el = MemoryElement::new(None);
        assert!(el.style("opacity").is_none());
        el.set_style("opacity", "0.5");
        assert_eq!(el.style("opacity").as_deref(), Some("0.5"));
    }
}
