// src/widget/view.rs
use std::io::Write;

use super::session::{Message, MessageRole, PromptSuggestion};
use crate::message::Product;

/// Rendering seam between the controller and whatever draws the widget.
pub trait WidgetView {
    fn set_panel_visible(&mut self, visible: bool);
    fn append_message(&mut self, message: &Message);
    fn render_products(&mut self, products: &[Product]);
    fn render_suggestions(&mut self, suggestions: &[PromptSuggestion]);
    fn clear_suggestions(&mut self);
    fn clear_input(&mut self);
    fn set_typing(&mut self, visible: bool);
    fn set_send_enabled(&mut self, enabled: bool);
}

#[derive(Clone, Debug, PartialEq)]
pub enum ViewEvent {
    PanelVisible(bool),
    Message(Message),
    Products(Vec<Product>),
    Suggestions(Vec<String>),
    SuggestionsCleared,
    InputCleared,
    Typing(bool),
    SendEnabled(bool),
}

/// Keeps every render call so the effect sequence can be inspected.
#[derive(Debug, Default)]
pub struct RecordingView {
    pub events: Vec<ViewEvent>,
}

impl RecordingView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn take(&mut self) -> Vec<ViewEvent> {
        std::mem::take(&mut self.events)
    }
}

impl WidgetView for RecordingView {
    fn set_panel_visible(&mut self, visible: bool) {
        self.events.push(ViewEvent::PanelVisible(visible));
    }

    fn append_message(&mut self, message: &Message) {
        self.events.push(ViewEvent::Message(message.clone()));
    }

    fn render_products(&mut self, products: &[Product]) {
        self.events.push(ViewEvent::Products(products.to_vec()));
    }

    fn render_suggestions(&mut self, suggestions: &[PromptSuggestion]) {
        self.events.push(ViewEvent::Suggestions(
            suggestions.iter().map(|s| s.label.clone()).collect(),
        ));
    }

    fn clear_suggestions(&mut self) {
        self.events.push(ViewEvent::SuggestionsCleared);
    }

    fn clear_input(&mut self) {
        self.events.push(ViewEvent::InputCleared);
    }

    fn set_typing(&mut self, visible: bool) {
        self.events.push(ViewEvent::Typing(visible));
    }

    fn set_send_enabled(&mut self, enabled: bool) {
        self.events.push(ViewEvent::SendEnabled(enabled));
    }
}

/// Plain-text rendering for a terminal.
pub struct TerminalView<W: Write> {
    out: W,
}

impl<W: Write> TerminalView<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    // A closed stdout is not worth failing a conversation over.
    fn line(&mut self, text: &str) {
        let _ = writeln!(self.out, "{text}");
        let _ = self.out.flush();
    }
}

impl<W: Write> WidgetView for TerminalView<W> {
    fn set_panel_visible(&mut self, visible: bool) {
        let text = if visible { "── Roadies Gear Expert ──" } else { "── chat closed ──" };
        self.line(text);
    }

    fn append_message(&mut self, message: &Message) {
        let who = match message.role {
            MessageRole::User => "you",
            MessageRole::Bot => "roadies",
        };
        self.line(&format!("{who}> {}", message.text));
    }

    fn render_products(&mut self, products: &[Product]) {
        for product in products {
            self.line(&format!("  [{}] ₹{} — {}", product.name, product.price, product.link));
        }
    }

    fn render_suggestions(&mut self, suggestions: &[PromptSuggestion]) {
        for (i, s) in suggestions.iter().enumerate() {
            self.line(&format!("  /{} {}", i + 1, s.label));
        }
    }

    fn clear_suggestions(&mut self) {}

    fn clear_input(&mut self) {}

    fn set_typing(&mut self, visible: bool) {
        if visible {
            self.line("roadies is typing...");
        }
    }

    fn set_send_enabled(&mut self, _enabled: bool) {}
}
