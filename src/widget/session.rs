// src/widget/session.rs
use uuid::Uuid;

use crate::message::Product;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MessageRole {
    User,
    Bot,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Message {
    pub role: MessageRole,
    pub text: String,
}

impl Message {
    pub fn user(text: impl Into<String>) -> Self {
        Self { role: MessageRole::User, text: text.into() }
    }

    pub fn bot(text: impl Into<String>) -> Self {
        Self { role: MessageRole::Bot, text: text.into() }
    }
}

/// A clickable shortcut; activating it sends `label` as if typed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PromptSuggestion {
    pub label: String,
}

impl From<&str> for PromptSuggestion {
    fn from(label: &str) -> Self {
        Self { label: label.to_string() }
    }
}

impl From<String> for PromptSuggestion {
    fn from(label: String) -> Self {
        Self { label }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RequestState {
    #[default]
    Idle,
    InFlight,
}

/// One widget lifetime.
#[derive(Clone, Debug)]
pub struct Session {
    pub id: String,
    pub greeting_shown: bool,
}

impl Session {
    pub fn new() -> Self {
        Self::with_id(Uuid::new_v4().to_string())
    }

    pub fn with_id(id: impl Into<String>) -> Self {
        Self { id: id.into(), greeting_shown: false }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

/// Everything the conversation controller owns.
///
/// The message log is append-only. Product lists are attached to the bot
/// message that produced them, by index into the log.
#[derive(Debug, Default)]
pub struct WidgetState {
    session: Session,
    messages: Vec<Message>,
    attachments: Vec<(usize, Vec<Product>)>,
    suggestions: Vec<PromptSuggestion>,
    input: String,
    panel_visible: bool,
    request: RequestState,
}

impl WidgetState {
    pub fn new(session: Session) -> Self {
        Self { session, ..Default::default() }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn products_for(&self, message_index: usize) -> &[Product] {
        self.attachments
            .iter()
            .find(|(idx, _)| *idx == message_index)
            .map(|(_, products)| products.as_slice())
            .unwrap_or(&[])
    }

    /// All rendered product cards, in conversation order.
    pub fn products(&self) -> impl Iterator<Item = &Product> {
        self.attachments.iter().flat_map(|(_, products)| products.iter())
    }

    pub fn suggestions(&self) -> &[PromptSuggestion] {
        &self.suggestions
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn is_panel_visible(&self) -> bool {
        self.panel_visible
    }

    pub fn request_state(&self) -> RequestState {
        self.request
    }

    /// Send button and Enter key are usable only while no request is pending.
    pub fn send_enabled(&self) -> bool {
        self.request == RequestState::Idle
    }

    pub(crate) fn push_message(&mut self, message: Message) -> usize {
        self.messages.push(message);
        self.messages.len() - 1
    }

    pub(crate) fn attach_products(&mut self, message_index: usize, products: Vec<Product>) {
        self.attachments.push((message_index, products));
    }

    pub(crate) fn set_suggestions(&mut self, suggestions: Vec<PromptSuggestion>) {
        self.suggestions = suggestions;
    }

    pub(crate) fn set_input(&mut self, text: String) {
        self.input = text;
    }

    pub(crate) fn take_input(&mut self) -> String {
        std::mem::take(&mut self.input)
    }

    pub(crate) fn set_panel_visible(&mut self, visible: bool) {
        self.panel_visible = visible;
    }

    pub(crate) fn mark_greeted(&mut self) {
        self.session.greeting_shown = true;
    }

    pub(crate) fn set_request_state(&mut self, state: RequestState) {
        self.request = state;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_sessions_get_distinct_ids() {
        let a = Session::new();
        let b = Session::new();
        assert!(!a.id.is_empty());
        assert_ne!(a.id, b.id);
        assert!(!a.greeting_shown);
    }

    #[test]
    fn attachments_follow_their_message() {
        let mut state = WidgetState::new(Session::with_id("s1"));
        state.push_message(Message::user("helmets"));
        let idx = state.push_message(Message::bot("Here you go"));
        state.attach_products(
            idx,
            vec![Product {
                name: "Aero X".into(),
                price: 4999.0,
                image: "/a.png".into(),
                link: "/p/1".into(),
            }],
        );

        assert!(state.products_for(0).is_empty());
        assert_eq!(state.products_for(idx)[0].name, "Aero X");
        assert_eq!(state.products().count(), 1);
        assert!(state.send_enabled());
    }
}
