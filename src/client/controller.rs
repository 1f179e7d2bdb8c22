//! Drives a [`SearchSession`] through a [`SearchTransport`]

use tracing::{debug, warn};

use super::session::{ClientMode, ScrollMetrics, SearchSession};
use super::{ClientError, SearchReply, SearchRequest, SearchTransport};
use crate::upload::{UploadError, UploadedImage};

/// Session plus the transport its requests go out on.
///
/// Each action returns `true` if it sent a request. The outcome is
/// reflected in [`session`](Self::session).
pub struct SearchController<T: SearchTransport> {
    transport: T,
    session: SearchSession,
}

impl<T: SearchTransport> SearchController<T> {
    pub fn new(transport: T, mode: ClientMode) -> Self {
        Self {
            transport,
            session: SearchSession::new(mode),
        }
    }

    pub fn session(&self) -> &SearchSession {
        &self.session
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn select_image(&mut self, image: UploadedImage) -> Result<(), UploadError> {
        self.session.select_image(image)
    }

    pub fn reset(&mut self) {
        self.session.reset();
    }

    pub fn edit_caption(&mut self, text: impl Into<String>) -> bool {
        self.session.edit_caption(text)
    }

    async fn send(&self, request: &SearchRequest) -> Result<SearchReply, ClientError> {
        let outcome = self.transport.send(request).await;
        if let Err(e) = &outcome {
            warn!("Search request failed: {}", e);
        }
        outcome
    }

    /// Search with the selected image
    pub async fn search(&mut self) -> bool {
        let Some(request) = self.session.begin_search() else {
            return false;
        };
        let outcome = self.send(&request).await;
        self.session.finish_search(&request, outcome);
        true
    }

    /// Resend the image with the edited caption
    pub async fn submit_caption(&mut self) -> bool {
        let Some(request) = self.session.begin_caption_submit() else {
            return false;
        };
        let outcome = self.send(&request).await;
        self.session.finish_caption_submit(&request, outcome);
        true
    }

    /// Fetch the next catalog page
    pub async fn load_more(&mut self) -> bool {
        let Some(request) = self.session.begin_load_more() else {
            return false;
        };
        debug!("Loading page {:?}", request.page());
        let outcome = self.send(&request).await;
        self.session.finish_load_more(&request, outcome);
        true
    }

    /// Handle a scroll event; loads the next page when near the bottom
    pub async fn on_scroll(&mut self, metrics: ScrollMetrics) -> bool {
        if !self.session.wants_next_page(metrics) {
            return false;
        }
        self.load_more().await
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::client::SessionState;
    use crate::types::SearchResultItem;

    /// Records requests and replays canned outcomes
    #[derive(Default)]
    struct FakeTransport {
        sent: Mutex<Vec<SearchRequest>>,
        replies: Mutex<VecDeque<Result<SearchReply, ClientError>>>,
    }

    impl FakeTransport {
        fn with(replies: Vec<Result<SearchReply, ClientError>>) -> Self {
            Self {
                sent: Mutex::new(Vec::new()),
                replies: Mutex::new(replies.into()),
            }
        }

        fn sent(&self) -> Vec<SearchRequest> {
            self.sent.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl SearchTransport for FakeTransport {
        async fn send(&self, request: &SearchRequest) -> Result<SearchReply, ClientError> {
            self.sent.lock().unwrap().push(request.clone());
            self.replies
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(ClientError::Network("no reply queued".into())))
        }
    }

    fn page(ids: std::ops::Range<u32>, has_more: bool, page: u32) -> SearchReply {
        SearchReply {
            items: ids
                .map(|i| SearchResultItem::new(i.to_string(), "t", "p", "", ""))
                .collect(),
            caption: None,
            has_more: Some(has_more),
            page: Some(page),
            total_results: Some(20),
        }
    }

    fn jpeg() -> UploadedImage {
        UploadedImage::new(vec![1u8; 2048], "image/jpeg", "shoe.jpg")
    }

    fn bottom() -> ScrollMetrics {
        ScrollMetrics {
            scroll_top: 2500.0,
            viewport_height: 900.0,
            document_height: 3000.0,
        }
    }

    #[tokio::test]
    async fn one_search_sends_exactly_one_request() {
        let transport = FakeTransport::with(vec![Ok(SearchReply::default())]);
        let mut controller = SearchController::new(transport, ClientMode::Passthrough);
        controller.select_image(jpeg()).unwrap();

        assert!(controller.search().await);
        let sent = controller.transport().sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].image_field(), "file");
        assert_eq!(sent[0].image, jpeg());
    }

    #[tokio::test]
    async fn rejected_file_sends_nothing() {
        let mut controller =
            SearchController::new(FakeTransport::default(), ClientMode::Passthrough);
        let big = UploadedImage::new(vec![0u8; 6 * 1024 * 1024], "image/png", "big.png");
        assert!(controller.select_image(big).is_err());
        assert!(!controller.search().await);
        assert!(controller.transport().sent().is_empty());
    }

    #[tokio::test]
    async fn scrolling_loads_until_exhausted() {
        let transport = FakeTransport::with(vec![
            Ok(page(0..8, true, 1)),
            Ok(page(8..16, true, 2)),
            Ok(page(16..20, false, 3)),
        ]);
        let mut controller = SearchController::new(transport, ClientMode::Catalog);
        controller.select_image(jpeg()).unwrap();
        assert!(controller.search().await);

        assert!(controller.on_scroll(bottom()).await);
        assert!(controller.on_scroll(bottom()).await);
        assert!(!controller.on_scroll(bottom()).await, "no more pages");

        let pages: Vec<_> = controller.transport().sent().iter().map(|r| r.page()).collect();
        assert_eq!(pages, vec![Some(1), Some(2), Some(3)]);
        assert_eq!(controller.session().results().len(), 20);
        assert_eq!(
            controller.session().status_message(),
            Some("You've reached the end of the results")
        );
    }

    #[tokio::test]
    async fn scroll_away_from_bottom_does_nothing() {
        let transport = FakeTransport::with(vec![Ok(page(0..8, true, 1))]);
        let mut controller = SearchController::new(transport, ClientMode::Catalog);
        controller.select_image(jpeg()).unwrap();
        controller.search().await;

        let top = ScrollMetrics { scroll_top: 0.0, ..bottom() };
        assert!(!controller.on_scroll(top).await);
        assert_eq!(controller.transport().sent().len(), 1);
    }

    #[tokio::test]
    async fn failed_load_more_can_be_retried() {
        let transport = FakeTransport::with(vec![
            Ok(page(0..8, true, 1)),
            Err(ClientError::Network("reset".into())),
            Ok(page(8..16, false, 2)),
        ]);
        let mut controller = SearchController::new(transport, ClientMode::Catalog);
        controller.select_image(jpeg()).unwrap();
        controller.search().await;

        assert!(controller.load_more().await);
        assert_eq!(controller.session().results().len(), 8);
        assert!(controller.session().error().is_some());

        assert!(controller.load_more().await);
        assert_eq!(controller.session().results().len(), 16);
        let pages: Vec<_> = controller.transport().sent().iter().map(|r| r.page()).collect();
        assert_eq!(pages, vec![Some(1), Some(2), Some(2)]);
    }

    #[tokio::test]
    async fn caption_submit_round_trip() {
        let mut first = page(0..3, false, 1);
        first.caption = Some("green sofa".into());
        let mut second = page(3..5, false, 1);
        second.caption = Some("green velvet sofa".into());

        let transport = FakeTransport::with(vec![Ok(first), Ok(second)]);
        let mut controller = SearchController::new(transport, ClientMode::Passthrough);
        controller.select_image(jpeg()).unwrap();
        controller.search().await;

        assert!(!controller.submit_caption().await, "unchanged caption");
        assert!(controller.edit_caption("green velvet sofa"));
        assert!(controller.submit_caption().await);

        let sent = controller.transport().sent();
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[1].caption(), Some("green velvet sofa"));
        assert_eq!(controller.session().results().len(), 2);
        assert!(matches!(controller.session().state(), SessionState::Results(_)));
    }
}
