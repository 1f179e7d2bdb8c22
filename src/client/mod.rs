//! Client Module
//!
//! Everything the upload page needs to talk to `POST /api/search`:
//!
//! - [`SearchSession`]: the view state machine (select, preview, search,
//!   caption resubmit, load more, reset). It never performs I/O itself;
//!   each `begin_*` call hands back the [`SearchRequest`] to send.
//! - [`SearchTransport`]: how a request reaches the server.
//!   [`ProxyClient`] implements it over HTTP.
//! - [`SearchController`]: drives a session through a transport.

pub mod connection;
mod controller;
mod reply;
mod request;
mod session;

pub use connection::ProxyClient;
pub use controller::SearchController;
pub use reply::SearchReply;
pub use request::{SearchFields, SearchRequest};
pub use session::{
    CaptionEditor, ClientMode, Pending, ResultsView, ScrollMetrics, SearchSession, SessionState,
    LOAD_MORE_THRESHOLD_PX,
};

use async_trait::async_trait;
use thiserror::Error;

/// Generic message shown when a search could not be completed
pub const SEARCH_FAILED_MESSAGE: &str = "Search failed. Please try again with another image.";

/// Errors that can occur when sending a search
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    /// The request did not complete
    #[error("Connection failed: {0}")]
    Network(String),

    /// The server answered with a non-2xx status
    #[error("Search request returned status {status}")]
    Status {
        status: u16,
        /// Error text supplied by the server, if any
        message: Option<String>,
    },

    /// The response body was not a search reply
    #[error("Unexpected response: {0}")]
    Decode(String),

    /// The request could not be built
    #[error("Invalid request: {0}")]
    Request(String),
}

impl ClientError {
    /// Text to show the user.
    ///
    /// Server-provided messages are surfaced; everything else falls back to
    /// the generic retry hint.
    pub fn user_message(&self) -> String {
        match self {
            Self::Status {
                message: Some(message),
                ..
            } if !message.trim().is_empty() => message.clone(),
            _ => SEARCH_FAILED_MESSAGE.to_string(),
        }
    }
}

/// Sends a search request and decodes the reply
#[async_trait]
pub trait SearchTransport: Send + Sync {
    async fn send(&self, request: &SearchRequest) -> Result<SearchReply, ClientError>;
}
