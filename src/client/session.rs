//! Search session state machine
//!
//! One explicit [`SessionState`] replaces a handful of independent flags.
//! While a request is outstanding the state says so (`Searching`, or a
//! [`Pending`] action on the results), and every `begin_*` call returns
//! `None` instead of a second request.
//!
//! Replies carry the ticket of the request they answer. Selecting a new
//! image or resetting bumps the ticket, so late replies for an old image
//! are dropped instead of overwriting the new session.

use super::reply::SearchReply;
use super::request::{SearchFields, SearchRequest};
use super::ClientError;
use crate::types::SearchResultItem;
use crate::upload::{UploadError, UploadedImage};

/// Distance from the document bottom at which the next page is requested
pub const LOAD_MORE_THRESHOLD_PX: f64 = 1000.0;

/// Which backend contract the client speaks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientMode {
    /// Single result set plus an editable caption
    Passthrough,
    /// Paged results with infinite scroll
    Catalog,
}

/// Viewport position reported by scroll events
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollMetrics {
    pub scroll_top: f64,
    pub viewport_height: f64,
    pub document_height: f64,
}

impl ScrollMetrics {
    pub fn near_bottom(&self) -> bool {
        self.viewport_height + self.scroll_top >= self.document_height - LOAD_MORE_THRESHOLD_PX
    }
}

/// Caption returned by the search plus the user's edited copy
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptionEditor {
    received: String,
    draft: String,
}

impl CaptionEditor {
    fn new(received: String) -> Self {
        Self {
            draft: received.clone(),
            received,
        }
    }

    pub fn received(&self) -> &str {
        &self.received
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    /// Non-empty and different from what the server sent
    pub fn is_submittable(&self) -> bool {
        !self.draft.is_empty() && self.draft != self.received
    }
}

/// A follow-up request in flight while results are shown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pending {
    LoadingMore { page: u32 },
    SubmittingCaption,
}

/// Results currently on screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultsView {
    items: Vec<SearchResultItem>,
    page: u32,
    has_more: bool,
    caption: Option<CaptionEditor>,
    pending: Option<Pending>,
    notice: Option<String>,
}

impl ResultsView {
    pub fn items(&self) -> &[SearchResultItem] {
        &self.items
    }

    /// Last page merged into `items`
    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    pub fn caption(&self) -> Option<&CaptionEditor> {
        self.caption.as_ref()
    }

    pub fn pending(&self) -> Option<Pending> {
        self.pending
    }

    /// Error from a failed follow-up request; the results stay visible
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    /// Upload prompt, nothing selected
    Idle,
    /// Image selected and previewed, not searched yet
    Previewing,
    Searching,
    Results(ResultsView),
    Failed { message: String },
}

#[derive(Debug, Clone)]
struct Selection {
    image: UploadedImage,
    preview: String,
}

/// Client-side view state for one browser session
#[derive(Debug, Clone)]
pub struct SearchSession {
    mode: ClientMode,
    selection: Option<Selection>,
    state: SessionState,
    /// Message for the last rejected file; shown in every state
    rejection: Option<String>,
    ticket: u64,
}

impl SearchSession {
    pub fn new(mode: ClientMode) -> Self {
        Self {
            mode,
            selection: None,
            state: SessionState::Idle,
            rejection: None,
            ticket: 0,
        }
    }

    pub fn mode(&self) -> ClientMode {
        self.mode
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn image(&self) -> Option<&UploadedImage> {
        self.selection.as_ref().map(|s| &s.image)
    }

    /// `data:` URL of the selected image
    pub fn preview(&self) -> Option<&str> {
        self.selection.as_ref().map(|s| s.preview.as_str())
    }

    pub fn results(&self) -> &[SearchResultItem] {
        match &self.state {
            SessionState::Results(view) => view.items(),
            _ => &[],
        }
    }

    pub fn results_view(&self) -> Option<&ResultsView> {
        match &self.state {
            SessionState::Results(view) => Some(view),
            _ => None,
        }
    }

    pub fn caption(&self) -> Option<&CaptionEditor> {
        self.results_view().and_then(|v| v.caption())
    }

    /// Message to show the user, if any
    pub fn error(&self) -> Option<&str> {
        if let Some(rejection) = &self.rejection {
            return Some(rejection);
        }
        match &self.state {
            SessionState::Failed { message } => Some(message),
            SessionState::Results(view) => view.notice(),
            _ => None,
        }
    }

    /// Whether a request is outstanding
    pub fn is_busy(&self) -> bool {
        match &self.state {
            SessionState::Searching => true,
            SessionState::Results(view) => view.pending.is_some(),
            _ => false,
        }
    }

    /// Validate and hold a newly picked file.
    ///
    /// A rejected file keeps the current image and results, records the
    /// message for [`error`](Self::error) and issues no request.
    pub fn select_image(&mut self, image: UploadedImage) -> Result<(), UploadError> {
        if let Err(e) = image.validate() {
            self.rejection = Some(e.to_string());
            return Err(e);
        }

        let preview = image.preview_data_url();
        self.selection = Some(Selection { image, preview });
        self.rejection = None;
        self.ticket += 1;
        self.state = SessionState::Previewing;
        Ok(())
    }

    /// Drop the image and all results, back to the upload prompt
    pub fn reset(&mut self) {
        self.selection = None;
        self.rejection = None;
        self.ticket += 1;
        self.state = SessionState::Idle;
    }

    fn request(&self, image: &UploadedImage, fields: SearchFields) -> SearchRequest {
        SearchRequest {
            ticket: self.ticket,
            image: image.clone(),
            fields,
        }
    }

    /// Start a fresh search for the selected image
    pub fn begin_search(&mut self) -> Option<SearchRequest> {
        let selection = self.selection.as_ref()?;
        let ready = match &self.state {
            SessionState::Previewing | SessionState::Failed { .. } => true,
            SessionState::Results(view) => view.pending.is_none(),
            SessionState::Idle | SessionState::Searching => false,
        };
        if !ready {
            return None;
        }

        let fields = match self.mode {
            ClientMode::Passthrough => SearchFields::Passthrough { caption: None },
            ClientMode::Catalog => SearchFields::Catalog { page: 1 },
        };
        let request = self.request(&selection.image, fields);
        self.rejection = None;
        self.state = SessionState::Searching;
        Some(request)
    }

    /// Apply the outcome of [`begin_search`](Self::begin_search).
    ///
    /// Returns `false` when the reply is stale and was ignored.
    pub fn finish_search(
        &mut self,
        request: &SearchRequest,
        outcome: Result<SearchReply, ClientError>,
    ) -> bool {
        if request.ticket != self.ticket || self.state != SessionState::Searching {
            return false;
        }

        self.state = match outcome {
            Ok(reply) => {
                let (page, has_more) = match self.mode {
                    // The external API has no paging
                    ClientMode::Passthrough => (1, false),
                    ClientMode::Catalog => (
                        reply.page.unwrap_or(1),
                        reply.has_more.unwrap_or(false),
                    ),
                };
                SessionState::Results(ResultsView {
                    items: reply.items,
                    page,
                    has_more,
                    caption: reply.caption.map(CaptionEditor::new),
                    pending: None,
                    notice: None,
                })
            }
            Err(e) => SessionState::Failed {
                message: e.user_message(),
            },
        };
        true
    }

    /// Update the caption draft. Ignored while a caption submit is running.
    pub fn edit_caption(&mut self, text: impl Into<String>) -> bool {
        match &mut self.state {
            SessionState::Results(view) if view.pending != Some(Pending::SubmittingCaption) => {
                match view.caption.as_mut() {
                    Some(editor) => {
                        editor.draft = text.into();
                        true
                    }
                    None => false,
                }
            }
            _ => false,
        }
    }

    pub fn can_submit_caption(&self) -> bool {
        self.mode == ClientMode::Passthrough
            && matches!(
                &self.state,
                SessionState::Results(view)
                    if view.pending.is_none()
                        && view.caption.as_ref().is_some_and(CaptionEditor::is_submittable)
            )
    }

    /// Resend the image with the edited caption
    pub fn begin_caption_submit(&mut self) -> Option<SearchRequest> {
        if !self.can_submit_caption() {
            return None;
        }
        let image = self.selection.as_ref()?.image.clone();
        let SessionState::Results(view) = &mut self.state else {
            return None;
        };
        let draft = view.caption.as_ref()?.draft.clone();
        view.pending = Some(Pending::SubmittingCaption);

        Some(SearchRequest {
            ticket: self.ticket,
            image,
            fields: SearchFields::Passthrough {
                caption: Some(draft),
            },
        })
    }

    /// Apply the outcome of a caption resubmit.
    ///
    /// On failure the previous caption and results stay as they were.
    pub fn finish_caption_submit(
        &mut self,
        request: &SearchRequest,
        outcome: Result<SearchReply, ClientError>,
    ) -> bool {
        if request.ticket != self.ticket {
            return false;
        }
        let SessionState::Results(view) = &mut self.state else {
            return false;
        };
        if view.pending != Some(Pending::SubmittingCaption) {
            return false;
        }

        view.pending = None;
        if let Ok(reply) = outcome {
            let caption = reply
                .caption
                .or_else(|| request.caption().map(str::to_owned))
                .unwrap_or_default();
            view.caption = Some(CaptionEditor::new(caption));
            view.items = reply.items;
            view.notice = None;
        }
        true
    }

    /// Whether a scroll to `metrics` should fetch the next page
    pub fn wants_next_page(&self, metrics: ScrollMetrics) -> bool {
        self.mode == ClientMode::Catalog
            && matches!(
                &self.state,
                SessionState::Results(view)
                    if !view.items.is_empty() && view.has_more && view.pending.is_none()
            )
            && metrics.near_bottom()
    }

    /// Request the page after the last one shown
    pub fn begin_load_more(&mut self) -> Option<SearchRequest> {
        if self.mode != ClientMode::Catalog {
            return None;
        }
        let image = self.selection.as_ref()?.image.clone();
        let SessionState::Results(view) = &mut self.state else {
            return None;
        };
        if !view.has_more || view.pending.is_some() {
            return None;
        }

        let page = view.page + 1;
        view.pending = Some(Pending::LoadingMore { page });
        Some(SearchRequest {
            ticket: self.ticket,
            image,
            fields: SearchFields::Catalog { page },
        })
    }

    /// Append a loaded page, or record why it failed
    pub fn finish_load_more(
        &mut self,
        request: &SearchRequest,
        outcome: Result<SearchReply, ClientError>,
    ) -> bool {
        if request.ticket != self.ticket {
            return false;
        }
        let SessionState::Results(view) = &mut self.state else {
            return false;
        };
        let Some(Pending::LoadingMore { page }) = view.pending else {
            return false;
        };
        if request.page() != Some(page) {
            return false;
        }

        view.pending = None;
        match outcome {
            Ok(reply) => {
                view.items.extend(reply.items);
                view.has_more = reply.has_more.unwrap_or(false);
                view.page = page;
                view.notice = None;
            }
            Err(e) => view.notice = Some(e.user_message()),
        }
        true
    }

    /// Results heading, e.g. "3 results found"
    pub fn headline(&self) -> Option<String> {
        let count = self.results().len();
        match count {
            0 => None,
            1 => Some("1 result found".to_string()),
            n => Some(format!("{} results found", n)),
        }
    }

    /// Progress or end-of-list hint for the current state
    pub fn status_message(&self) -> Option<&'static str> {
        match &self.state {
            SessionState::Searching => Some("Finding most similar products..."),
            SessionState::Results(view) => match view.pending {
                Some(Pending::LoadingMore { .. }) => Some("Loading more products..."),
                Some(Pending::SubmittingCaption) => Some("Updating..."),
                None if view.items.is_empty() => Some("No similar products found."),
                None if !view.has_more => Some("You've reached the end of the results"),
                None => None,
            },
            _ => None,
        }
    }
}
