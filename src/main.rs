use std::env;
use std::sync::Arc;

use log::{error, info, warn};
use vote_widget::dom::{Document, MemoryDocument};
use vote_widget::http::ReqwestClient;
use vote_widget::models::counter_id;
use vote_widget::tasks::TokioScheduler;
use vote_widget::{VoteWidget, WidgetConfig};

const DEFAULT_COMPANIES: [&str; 6] = ["google", "microsoft", "apple", "amazon", "nvidia", "meta"];

#[tokio::main]
async fn main() {
    // Initialize logging
    dotenvy::dotenv().ok();
    env_logger::init();

    let config = match WidgetConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            return;
        }
    };

    let http = match ReqwestClient::new(&config) {
        Ok(client) => Arc::new(client),
        Err(e) => {
            error!("Failed to build HTTP client: {}", e);
            return;
        }
    };

    // Companies to vote for come from the command line
    let mut companies: Vec<String> = env::args().skip(1).collect();
    if companies.is_empty() {
        companies = DEFAULT_COMPANIES.iter().map(|c| c.to_string()).collect();
    }

    let page: Vec<(&str, i64)> = companies.iter().map(|c| (c.as_str(), 0)).collect();
    let document = Arc::new(MemoryDocument::voting_page(&page));

    info!("Voting for {} company(ies) against {}", companies.len(), config.server_url);
    let widget = VoteWidget::new(
        document.clone(),
        http,
        Arc::new(TokioScheduler),
        config.clone(),
    );
    widget.attach();
    document.mark_ready();

    for company in &companies {
        match document.element(&format!("vote-{}", company)) {
            Some(button) => button.click(),
            None => warn!("No vote button for '{}'", company),
        }
    }

    widget.settled().await;

    for company in &companies {
        let id = counter_id(&config.counter_prefix, company);
        if let Some(counter) = document.get_element_by_id(&id) {
            info!("{}: {}", company, counter.text());
        }
    }
}
