// src/widget/controller.rs
use tracing::{debug, info, warn};

use super::{
    backend::ChatBackend,
    session::{Message, PromptSuggestion, RequestState, Session, WidgetState},
    view::WidgetView,
};
use crate::{
    config::WidgetConfig,
    error::BackendError,
    message::{ChatRequest, ChatResponse},
};

/// Result of a send attempt, as seen by the caller.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SendOutcome {
    /// Empty text or a request already pending; nothing happened.
    Ignored,
    Delivered,
    Unreachable,
}

/// A request admitted by [`Controller::begin_send`]. The controller stays
/// in-flight until this is handed back to [`Controller::complete`].
#[must_use = "a pending send keeps the controller in-flight until completed"]
#[derive(Debug)]
pub struct PendingSend {
    request: ChatRequest,
}

impl PendingSend {
    pub fn request(&self) -> &ChatRequest {
        &self.request
    }
}

/// Mediates every send, enforces single-flight and keeps the view in step
/// with the backend outcome.
pub struct Controller<B, V> {
    config: WidgetConfig,
    backend: B,
    view: V,
    state: WidgetState,
}

impl<B: ChatBackend, V: WidgetView> Controller<B, V> {
    pub fn new(config: WidgetConfig, backend: B, view: V) -> Self {
        Self::with_session(config, backend, view, Session::new())
    }

    pub fn with_session(config: WidgetConfig, backend: B, view: V, session: Session) -> Self {
        Self { config, backend, view, state: WidgetState::new(session) }
    }

    pub fn state(&self) -> &WidgetState {
        &self.state
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    /// Replace the input field content (what the user has typed so far).
    pub fn set_input(&mut self, text: impl Into<String>) {
        self.state.set_input(text.into());
    }

    pub fn open(&mut self) {
        self.state.set_panel_visible(true);
        self.view.set_panel_visible(true);

        if self.state.session().greeting_shown {
            return;
        }
        let greeting = Message::bot(self.config.greeting.clone());
        self.view.append_message(&greeting);
        self.state.push_message(greeting);
        self.show_suggestions(self.config.initial_suggestions.clone());
        self.state.mark_greeted();
        debug!(session = %self.state.session().id, "greeting shown");
    }

    pub fn close(&mut self) {
        self.state.set_panel_visible(false);
        self.view.set_panel_visible(false);
    }

    /// Send `text` verbatim, or the trimmed input field when `None`.
    pub async fn send(&mut self, text: Option<&str>) -> SendOutcome {
        let Some(pending) = self.begin_send(text) else {
            return SendOutcome::Ignored;
        };
        let outcome = self.backend.post(&pending.request).await;
        self.complete(pending, outcome)
    }

    pub async fn activate_suggestion(&mut self, label: &str) -> SendOutcome {
        self.send(Some(label)).await
    }

    /// Admit a send: echo the user text and go in-flight.
    ///
    /// Returns `None` without touching any state when the effective text is
    /// blank or a request is already pending.
    pub fn begin_send(&mut self, text: Option<&str>) -> Option<PendingSend> {
        if self.state.request_state() == RequestState::InFlight {
            debug!("send ignored: request already in flight");
            return None;
        }

        let effective = match text {
            Some(literal) => literal.to_string(),
            None => self.state.input().trim().to_string(),
        };
        if effective.trim().is_empty() {
            return None;
        }

        self.state.set_suggestions(Vec::new());
        self.view.clear_suggestions();

        let echo = Message::user(effective.clone());
        self.view.append_message(&echo);
        self.state.push_message(echo);
        self.state.take_input();
        self.view.clear_input();

        self.state.set_request_state(RequestState::InFlight);
        self.view.set_send_enabled(false);
        self.view.set_typing(true);

        info!(session = %self.state.session().id, "sending message");
        Some(PendingSend {
            request: ChatRequest {
                message: effective,
                session_id: Some(self.state.session().id.clone()),
            },
        })
    }

    /// Render the backend outcome and return to idle, whatever the outcome.
    pub fn complete(
        &mut self,
        pending: PendingSend,
        outcome: Result<ChatResponse, BackendError>,
    ) -> SendOutcome {
        debug_assert_eq!(
            pending.request.session_id.as_deref(),
            Some(self.state.session().id.as_str()),
            "pending send belongs to another session"
        );
        self.view.set_typing(false);

        let result = match outcome.and_then(validate) {
            Ok(response) => {
                self.render_reply(response);
                SendOutcome::Delivered
            }
            Err(err) => {
                warn!(kind = err.kind(), error = %err, url = %self.config.api_url, "chat backend unreachable");
                let apology = Message::bot(self.config.failure_text());
                self.view.append_message(&apology);
                self.state.push_message(apology);
                self.show_suggestions(self.config.fallback_suggestions.clone());
                SendOutcome::Unreachable
            }
        };

        self.state.set_request_state(RequestState::Idle);
        self.view.set_send_enabled(true);
        result
    }

    fn render_reply(&mut self, response: ChatResponse) {
        let reply = Message::bot(response.reply);
        self.view.append_message(&reply);
        let index = self.state.push_message(reply);

        if !response.products.is_empty() {
            self.view.render_products(&response.products);
            self.state.attach_products(index, response.products);
        }
        if !response.suggested_prompts.is_empty() {
            self.show_suggestions(response.suggested_prompts);
        }
    }

    fn show_suggestions(&mut self, labels: Vec<String>) {
        let suggestions: Vec<PromptSuggestion> =
            labels.into_iter().map(PromptSuggestion::from).collect();
        self.view.render_suggestions(&suggestions);
        self.state.set_suggestions(suggestions);
    }
}

/// A response only counts as delivered when every product is renderable.
fn validate(response: ChatResponse) -> Result<ChatResponse, BackendError> {
    if let Some(bad) = response.products.iter().find(|p| !p.price.is_finite() || p.price < 0.0) {
        return Err(BackendError::Malformed(format!(
            "product {:?} has invalid price {}",
            bad.name, bad.price
        )));
    }
    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{message::Product, widget::view::RecordingView};

    struct Canned(ChatResponse);

    impl ChatBackend for Canned {
        async fn post(&self, _request: &ChatRequest) -> Result<ChatResponse, BackendError> {
            Ok(self.0.clone())
        }
    }

    fn controller(response: ChatResponse) -> Controller<Canned, RecordingView> {
        Controller::with_session(
            WidgetConfig::default(),
            Canned(response),
            RecordingView::new(),
            Session::with_id("test-session"),
        )
    }

    #[test]
    fn begin_send_carries_session_and_text() {
        let mut c = controller(ChatResponse::text("ok"));
        c.set_input("  hello  ");
        let pending = c.begin_send(None).unwrap();
        assert_eq!(pending.request().message, "hello");
        assert_eq!(pending.request().session_id.as_deref(), Some("test-session"));
        assert_eq!(c.state().input(), "");
        assert!(!c.state().send_enabled());
        let _ = c.complete(pending, Ok(ChatResponse::text("ok")));
        assert!(c.state().send_enabled());
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "another session")]
    fn completing_a_foreign_pending_send_is_caught() {
        let mut ours = controller(ChatResponse::text("ok"));
        let mut theirs = Controller::with_session(
            WidgetConfig::default(),
            Canned(ChatResponse::text("ok")),
            RecordingView::new(),
            Session::with_id("other-session"),
        );
        let foreign = theirs.begin_send(Some("hi")).unwrap();
        let _ = ours.complete(foreign, Ok(ChatResponse::text("ok")));
    }

    #[tokio::test]
    async fn negative_price_counts_as_unreachable() {
        let mut response = ChatResponse::text("cheap!");
        response.products.push(Product {
            name: "Broken".into(),
            price: -1.0,
            image: String::new(),
            link: String::new(),
        });
        let mut c = controller(response);

        assert_eq!(c.send(Some("helmet")).await, SendOutcome::Unreachable);
        assert_eq!(c.state().products().count(), 0);
        assert_eq!(c.state().request_state(), RequestState::Idle);
    }

    #[tokio::test]
    async fn empty_suggestion_list_leaves_suggestions_cleared() {
        let mut c = controller(ChatResponse::text("plain"));
        c.open();
        assert_eq!(c.state().suggestions().len(), 3);
        c.send(Some("hi")).await;
        assert!(c.state().suggestions().is_empty());
    }
}
