//! Client side of the company vote page.
//!
//! [`VoteWidget`] wires `.vote-button` clicks to `POST /vote` and refreshes
//! the matching `count-<company>` element with the server's new tally. The
//! page, the HTTP client and the timer are injected, see [`dom`], [`http`]
//! and [`tasks`].

pub mod config;
pub mod dom;
pub mod error;
pub mod handlers;
pub mod http;
pub mod models;
pub mod tasks;

pub use config::WidgetConfig;
pub use error::{Result, VoteError};
pub use handlers::VoteWidget;
pub use models::{VoteRequest, VoteResult};
