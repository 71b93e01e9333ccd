use log::{debug, error, info};

use super::{pulse, VoteWidget};
use crate::error::{Result, VoteError};
use crate::models::{counter_id, VoteRequest, VoteResult};

impl VoteWidget {
    /// Posts one vote and, on success, shows the server's new tally.
    ///
    /// Failures are logged and swallowed; the page is left as it was.
    pub async fn submit_vote(&self, company: &str) {
        match self.send_vote(company).await {
            Ok(result) => {
                info!("Vote recorded for '{}', new count {}", result.company, result.new_count);
                self.update_display(&result.company, result.new_count);
            }
            Err(e) => error!("Error sending vote for '{}': {}", company, e),
        }
    }

    async fn send_vote(&self, company: &str) -> Result<VoteResult> {
        let body = serde_json::to_value(VoteRequest::new(company))?;
        let response = self.http.post_json(&self.config.vote_path, &body).await?;

        if !response.is_success() {
            return Err(VoteError::Status(response.status));
        }

        Ok(serde_json::from_str(&response.body)?)
    }

    /// Writes `new_count` into `count-<company>` and schedules the pulse to
    /// settle. A missing counter is ignored.
    pub fn update_display(&self, company: &str, new_count: i64) {
        let id = counter_id(&self.config.counter_prefix, company);
        let Some(counter) = self.document.get_element_by_id(&id) else {
            debug!("No counter element '{}' on the page, skipping update", id);
            return;
        };

        pulse::apply_final_values(counter.as_ref(), new_count);

        self.scheduler
            .defer(self.config.pulse_delay, Box::new(move || pulse::settle(counter.as_ref())));
    }
}
