//! Model-View-Intent primitives shared by the interaction state machines.
//!
//! ```text
//! Intent ──→ Reducer ──→ State ──→ Container
//!    ↑                                │
//!    └────────── pointer / keyboard ──┘
//! ```
//!
//! - **State**: immutable snapshot of one interaction (drag, keyboard)
//! - **Intent**: a raw input event or notification
//! - **Reducer**: pure `(State, Intent) -> State`; side effects stay in the
//!   container that owns the state

mod intent;
mod reducer;
mod state;

pub use intent::Intent;
pub use reducer::Reducer;
pub use state::UiState;
