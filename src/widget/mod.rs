// src/widget/mod.rs
pub mod backend;
pub mod controller;
pub mod session;
pub mod view;

pub use backend::{ChatBackend, HttpBackend};
pub use controller::{Controller, PendingSend, SendOutcome};
pub use session::{Message, MessageRole, PromptSuggestion, RequestState, Session, WidgetState};
pub use view::{RecordingView, TerminalView, ViewEvent, WidgetView};
