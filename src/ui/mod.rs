//! Terminal front end: setup, event pump, input routing and rendering for
//! card flows, plus the demo application that drives them.

pub mod app;
pub mod events;
pub mod input;
pub mod layout;
pub mod mvi;
pub mod render;
pub mod runtime;
pub mod terminal_guard;
pub mod theme;
