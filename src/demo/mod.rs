//! The quantity picker shipped with the `cardflow` binary.
//!
//! A landing screen starts a flow whose first card shows the chosen
//! quantity. The second card edits it with a slider and a numeric field and
//! hands the new value back through the shared context.

mod child;
mod context;
mod keypad;
mod landing;
mod parent;

pub use child::{ChildCard, ChildFocus, MAX_QUANTITY};
pub use context::ExampleContext;
pub use keypad::{Keypad, KeypadView, KEYPAD_ANIMATION, KEYPAD_ROWS};
pub use landing::LandingScreen;
pub use parent::{ParentCard, QUANTITY_PLACEHOLDER};
