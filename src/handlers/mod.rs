mod pulse;
mod vote;

pub use pulse::{apply_final_values, settle, SETTLED_TRANSITION};

use std::sync::{Arc, Weak};

use log::{debug, error, info, warn};
use tokio::runtime::Handle;
use tokio::sync::watch;

use crate::config::WidgetConfig;
use crate::dom::{Document, Element};
use crate::http::HttpClient;
use crate::tasks::Scheduler;

/// Binds vote buttons on a page to the vote server.
///
/// Every click becomes its own task. Clicks are not de-duplicated and buttons
/// stay enabled while a request is in flight, so two quick clicks on the same
/// company race and the counter shows whichever response lands last.
pub struct VoteWidget {
    document: Arc<dyn Document>,
    http: Arc<dyn HttpClient>,
    scheduler: Arc<dyn Scheduler>,
    config: WidgetConfig,
    in_flight: Arc<watch::Sender<usize>>,
}

impl VoteWidget {
    pub fn new(
        document: Arc<dyn Document>,
        http: Arc<dyn HttpClient>,
        scheduler: Arc<dyn Scheduler>,
        config: WidgetConfig,
    ) -> Arc<Self> {
        let (in_flight, _) = watch::channel(0);
        Arc::new(Self {
            document,
            http,
            scheduler,
            config,
            in_flight: Arc::new(in_flight),
        })
    }

    /// Defers [`VoteWidget::initialize`] until the document is ready.
    pub fn attach(self: &Arc<Self>) {
        let widget = Arc::clone(self);
        self.document.on_ready(Box::new(move || widget.initialize()));
    }

    /// Registers a click listener on every vote button currently on the page.
    ///
    /// Listeners keep the widget alive for as long as the page holds them, so
    /// callers may drop the handle returned by [`VoteWidget::new`].
    pub fn initialize(self: &Arc<Self>) {
        let buttons = self.document.query_selector_all(&self.config.button_selector);
        info!(
            "Binding {} vote button(s) matching '{}'",
            buttons.len(),
            self.config.button_selector
        );

        for button in buttons {
            let widget = Arc::clone(self);
            // The element owns its listeners, so it is only borrowed weakly here.
            let trigger: Weak<dyn Element> = Arc::downgrade(&button);
            button.add_click_listener(Arc::new(move || match trigger.upgrade() {
                Some(trigger) => widget.handle_click(trigger.as_ref()),
                None => warn!("Vote button was removed from the page, ignoring click"),
            }));
        }
    }

    /// Reads the button's company and fires off a vote on the current tokio
    /// runtime. Outside a runtime the click is logged and dropped.
    pub fn handle_click(self: &Arc<Self>, button: &dyn Element) {
        let Some(company) = button.data(&self.config.data_key) else {
            warn!(
                "Vote button {:?} has no data-{} attribute, ignoring click",
                button.id(),
                self.config.data_key
            );
            return;
        };

        let runtime = match Handle::try_current() {
            Ok(runtime) => runtime,
            Err(e) => {
                error!("Cannot send vote for '{}' without an async runtime: {}", company, e);
                return;
            }
        };

        debug!("Vote clicked for '{}'", company);
        let guard = InFlightGuard::begin(&self.in_flight);
        let widget = Arc::clone(self);
        runtime.spawn(async move {
            let _guard = guard;
            widget.submit_vote(&company).await;
        });
    }

    /// Number of vote requests that have not completed yet.
    pub fn in_flight(&self) -> usize {
        *self.in_flight.borrow()
    }

    /// Resolves once no vote request is outstanding.
    pub async fn settled(&self) {
        let mut rx = self.in_flight.subscribe();
        // The sender lives in self, so the channel cannot close under us.
        let _ = rx.wait_for(|count| *count == 0).await;
    }
}

struct InFlightGuard {
    counter: Arc<watch::Sender<usize>>,
}

impl InFlightGuard {
    fn begin(counter: &Arc<watch::Sender<usize>>) -> Self {
        counter.send_modify(|count| *count += 1);
        Self {
            counter: Arc::clone(counter),
        }
    }
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.counter.send_modify(|count| *count = count.saturating_sub(1));
    }
}
