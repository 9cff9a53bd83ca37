//! Drag-to-dismiss gesture.
//!
//! Translation based: the sheet follows the cumulative vertical displacement
//! of the pointer since the gesture began, and a release more than
//! [`DISMISS_THRESHOLD`] points below the starting touch dismisses the flow.

use crate::container::geometry::Point;
use crate::ui::mvi::{Intent, Reducer, UiState};

/// Downward travel, in points, past which a release dismisses.
pub const DISMISS_THRESHOLD: f32 = 100.0;
/// Downward travel needed before a pending gesture starts tracking.
pub const MIN_DOWNWARD_TRAVEL: f32 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragIntent {
    Began { at: Point, sheet_offset: f32 },
    Moved { at: Point },
    Ended { at: Point },
    Cancelled { at: Point },
}

impl Intent for DragIntent {}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DragState {
    #[default]
    Idle,
    /// Pressed on the sheet, direction not known yet.
    Pending { touch_origin: Point, sheet_origin: f32 },
    /// Moving downward; the sheet follows.
    Tracking {
        touch_origin: Point,
        sheet_origin: f32,
        displacement: f32,
    },
    /// Started upward; ignored until the pointer is released.
    Rejected,
    /// Gesture over. The owner acts on `dismiss` and resets to `Idle`.
    Released {
        sheet_origin: f32,
        displacement: f32,
        dismiss: bool,
    },
}

impl UiState for DragState {}

impl DragState {
    pub fn is_tracking(&self) -> bool {
        matches!(self, Self::Tracking { .. })
    }

    /// Where the sheet should sit while tracking. Never above where it started.
    pub fn sheet_offset(&self) -> Option<f32> {
        match self {
            Self::Tracking {
                sheet_origin,
                displacement,
                ..
            } => Some(sheet_origin + displacement.max(0.0)),
            _ => None,
        }
    }
}

pub struct DragReducer;

impl Reducer for DragReducer {
    type State = DragState;
    type Intent = DragIntent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            DragIntent::Began { at, sheet_offset } => DragState::Pending {
                touch_origin: at,
                sheet_origin: sheet_offset,
            },
            DragIntent::Moved { at } => match state {
                DragState::Pending {
                    touch_origin,
                    sheet_origin,
                } => {
                    let dy = at.y - touch_origin.y;
                    if dy >= MIN_DOWNWARD_TRAVEL {
                        DragState::Tracking {
                            touch_origin,
                            sheet_origin,
                            displacement: dy,
                        }
                    } else if dy < 0.0 {
                        DragState::Rejected
                    } else {
                        state
                    }
                }
                DragState::Tracking {
                    touch_origin,
                    sheet_origin,
                    ..
                } => DragState::Tracking {
                    touch_origin,
                    sheet_origin,
                    displacement: at.y - touch_origin.y,
                },
                other => other,
            },
            DragIntent::Ended { at } | DragIntent::Cancelled { at } => match state {
                DragState::Pending {
                    touch_origin,
                    sheet_origin,
                }
                | DragState::Tracking {
                    touch_origin,
                    sheet_origin,
                    ..
                } => {
                    let displacement = at.y - touch_origin.y;
                    DragState::Released {
                        sheet_origin,
                        displacement,
                        dismiss: displacement > DISMISS_THRESHOLD,
                    }
                }
                DragState::Rejected => DragState::Idle,
                other => other,
            },
        }
    }
}
