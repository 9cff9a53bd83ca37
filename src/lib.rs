//! Modal card flows for terminal user interfaces.
//!
//! A [`flow::Flow`] presents a stack of cards inside a bottom sheet
//! ([`container::Container`]) and moves between them with fade and slide
//! transitions. Cards share a typed context and talk to their flow through a
//! weak [`flow::FlowHandle`]. The container adds drag to dismiss, backdrop
//! taps and keyboard avoidance.

pub mod config;
pub mod container;
pub mod demo;
pub mod flow;
pub mod ui;
