use serde::{Deserialize, Serialize};

/// Body of `POST /vote`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteRequest {
    pub company: String,
}

impl VoteRequest {
    pub fn new(company: impl Into<String>) -> Self {
        Self { company: company.into() }
    }
}

/// What the server answers with after counting a vote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteResult {
    pub company: String,
    pub new_count: i64,
}

/// Id of the counter element that displays `company`'s tally.
pub fn counter_id(prefix: &str, company: &str) -> String {
    format!("{}{}", prefix, company)
}
