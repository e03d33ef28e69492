// src/services/mod.rs
pub mod catalog;
pub mod chatbot;
pub mod session_manager;
