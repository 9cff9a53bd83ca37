//! The on-screen host of a card flow.
//!
//! A [`Container`] owns the chrome around the cards (backdrop, sheet, title),
//! mounts whichever card the flow asks it to, runs the fade and slide
//! transitions, and turns pointer and keyboard input into the close signal.
//! It never owns the flow: the close signal goes through a weak
//! [`ClosingHandler`].

pub mod animation;
pub mod geometry;
pub mod gesture;
pub mod keyboard;

use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::time::Duration;

use crate::config::CardConfig;
use crate::flow::{Card, CardId, Context};
use crate::ui::mvi::Reducer;
use animation::{
    AnimationKind, Animator, Easing, Property, Track, TransitionId, SNAP_BACK_DURATION,
    TRANSITION_DURATION,
};
use geometry::{Frame, Point};
use gesture::{DragIntent, DragReducer, DragState};
use keyboard::{KeyboardAvoidance, KeyboardNotifier, KeyboardTopic, ObserverToken};

/// Receiver of the container's close signal.
pub trait ClosingHandler {
    fn close_flow(&self);
}

/// Phase of a pan gesture as reported by the input layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanPhase {
    Began,
    Changed,
    Ended,
    Cancelled,
}

/// Screen size the container lays out against until told otherwise.
const DEFAULT_BOUNDS: Frame = Frame::new(0.0, 0.0, 80.0 * 8.0, 24.0 * 16.0);

pub struct Container {
    config: CardConfig,
    bounds: Frame,
    /// Vertical displacement of the sheet from its resting place.
    sheet_offset: f32,
    /// Offset the sheet is heading for once every running animation lands.
    sheet_target: f32,
    settling: Option<TransitionId>,
    backdrop_opacity: f32,
    card_opacity: f32,
    animator: Animator,
    drag: DragState,
    keyboard: Rc<RefCell<KeyboardAvoidance>>,
    notifier: Rc<KeyboardNotifier>,
    subscriptions: Vec<ObserverToken>,
    closing_handler: Option<Weak<dyn ClosingHandler>>,
    mounted: Option<CardId>,
    children: Vec<CardId>,
}

impl Container {
    pub fn new(config: CardConfig, notifier: &Rc<KeyboardNotifier>) -> Self {
        let keyboard = Rc::new(RefCell::new(KeyboardAvoidance::default()));
        let subscriptions = [KeyboardTopic::WillShow, KeyboardTopic::WillHide]
            .into_iter()
            .map(|topic| {
                let keyboard = Rc::downgrade(&keyboard);
                notifier.add_observer(topic, move |notification| {
                    if let Some(keyboard) = keyboard.upgrade() {
                        keyboard.borrow_mut().handle(notification);
                    }
                })
            })
            .collect();

        Self {
            config,
            bounds: DEFAULT_BOUNDS,
            sheet_offset: 0.0,
            sheet_target: 0.0,
            settling: None,
            backdrop_opacity: 1.0,
            card_opacity: 1.0,
            animator: Animator::new(),
            drag: DragState::default(),
            keyboard,
            notifier: Rc::clone(notifier),
            subscriptions,
            closing_handler: None,
            mounted: None,
            children: Vec::new(),
        }
    }

    pub fn config(&self) -> &CardConfig {
        &self.config
    }

    pub fn set_closing_handler(&mut self, handler: Weak<dyn ClosingHandler>) {
        self.closing_handler = Some(handler);
    }

    pub fn bounds(&self) -> Frame {
        self.bounds
    }

    /// Lay out against a new screen size.
    pub fn set_bounds(&mut self, bounds: Frame) {
        self.bounds = bounds;
    }

    /// Where the sheet rests when nothing moves it: bottom-anchored and
    /// horizontally centered.
    pub fn home_frame(&self) -> Frame {
        let width = self.bounds.width * f32::from(self.config.sheet_width_percent.min(100)) / 100.0;
        let height =
            self.bounds.height * f32::from(self.config.sheet_height_percent.min(100)) / 100.0;
        Frame::new(
            self.bounds.x + (self.bounds.width - width) / 2.0,
            self.bounds.bottom() - height,
            width,
            height,
        )
    }

    /// Current on-screen sheet frame, including slide, drag and keyboard lift.
    pub fn sheet_frame(&self) -> Frame {
        self.home_frame()
            .offset_y(self.sheet_offset - self.root_lift())
    }

    pub fn sheet_offset(&self) -> f32 {
        self.sheet_offset
    }

    pub fn backdrop_opacity(&self) -> f32 {
        self.backdrop_opacity
    }

    pub fn card_opacity(&self) -> f32 {
        self.card_opacity
    }

    /// Upward translation of the whole root view for keyboard avoidance.
    pub fn root_lift(&self) -> f32 {
        self.keyboard.borrow().lift()
    }

    pub fn is_keyboard_visible(&self) -> bool {
        self.keyboard.borrow().is_visible()
    }

    pub fn drag_state(&self) -> DragState {
        self.drag
    }

    /// True while any container animation runs, including a drag snap-back.
    pub fn is_animating(&self) -> bool {
        self.animator.is_running()
    }

    /// True while a released drag is easing the sheet back into place.
    ///
    /// A snap-back belongs to the container alone. It has no continuation in
    /// the flow, so `Flow::is_transitioning` stays false while it runs.
    pub fn is_settling(&self) -> bool {
        self.settling.is_some()
    }

    pub fn mounted_card(&self) -> Option<CardId> {
        self.mounted
    }

    pub fn child_cards(&self) -> &[CardId] {
        &self.children
    }

    /// Replace whatever sits in the card slot with `card`.
    ///
    /// The card's view is attached before `apply_context` runs, since
    /// rendering may depend on the view already being in place.
    pub fn mount<C: Context>(&mut self, card: &mut dyn Card<C>) {
        self.mounted = None;
        self.children.clear();

        let view = card.binding_mut().load_view();
        view.attach();
        let id = view.id();
        self.mounted = Some(id);
        self.children.push(id);
        tracing::trace!(card = id.value(), "card mounted");

        card.apply_context();
    }

    pub fn unmount(&mut self) {
        self.mounted = None;
        self.children.clear();
    }

    pub fn animate(&mut self, kind: AnimationKind) -> TransitionId {
        let tracks = match kind {
            AnimationKind::Fade { fade_in } => {
                let from = if fade_in { 0.0 } else { 1.0 };
                self.card_opacity = from;
                vec![Track {
                    property: Property::CardOpacity,
                    from,
                    to: 1.0 - from,
                }]
            }
            AnimationKind::Slide { slide_in } => {
                let height = self.home_frame().height;
                let (from, to) = if slide_in {
                    (height, 0.0)
                } else {
                    (self.sheet_offset, self.sheet_offset + height)
                };
                let backdrop_from = if slide_in { 0.0 } else { 1.0 };
                // The slide owns the sheet from here on.
                self.drag = DragState::Idle;
                self.settling = None;
                self.sheet_offset = from;
                self.sheet_target = to;
                self.backdrop_opacity = backdrop_from;
                vec![
                    Track {
                        property: Property::SheetOffset,
                        from,
                        to,
                    },
                    Track {
                        property: Property::BackdropOpacity,
                        from: backdrop_from,
                        to: 1.0 - backdrop_from,
                    },
                ]
            }
        };
        let id = self
            .animator
            .start(tracks, TRANSITION_DURATION, Easing::EaseInOut);
        tracing::debug!(id = id.value(), ?kind, "container animation started");
        id
    }

    /// Move time forward. Returns the transitions that finished, oldest first.
    pub fn advance(&mut self, elapsed: Duration) -> Vec<TransitionId> {
        self.keyboard.borrow_mut().advance(elapsed);

        let tick = self.animator.advance(elapsed);
        if self.settling.is_some_and(|id| tick.finished.contains(&id)) {
            self.settling = None;
        }
        for (property, value) in tick.values {
            match property {
                Property::CardOpacity => self.card_opacity = value,
                Property::BackdropOpacity => self.backdrop_opacity = value,
                Property::SheetOffset if !self.drag.is_tracking() => self.sheet_offset = value,
                Property::SheetOffset | Property::RootLift => {}
            }
        }
        tick.finished
    }

    /// Feed one pan event to the drag-to-dismiss gesture.
    ///
    /// Returns whether the event was consumed. Nothing is consumed while drag
    /// to dismiss is disabled or the keyboard is up, and a gesture only begins
    /// on the sheet itself. A gesture cut off by the keyboard coming up is
    /// settled without dismissing.
    pub fn handle_pan(&mut self, phase: PanPhase, at: Point) -> bool {
        if !self.config.drag_to_dismiss_enabled || self.is_keyboard_visible() {
            self.abandon_drag();
            return false;
        }

        let intent = match phase {
            PanPhase::Began => {
                if !self.sheet_frame().contains(at) {
                    return false;
                }
                DragIntent::Began {
                    at,
                    sheet_offset: self.sheet_target,
                }
            }
            _ if matches!(self.drag, DragState::Idle | DragState::Released { .. }) => {
                return false;
            }
            PanPhase::Changed => DragIntent::Moved { at },
            PanPhase::Ended => DragIntent::Ended { at },
            PanPhase::Cancelled => DragIntent::Cancelled { at },
        };

        self.drag = DragReducer::reduce(self.drag, intent);
        tracing::trace!(?phase, state = ?self.drag, "drag gesture");

        match self.drag {
            DragState::Tracking { .. } => {
                if let Some(offset) = self.drag.sheet_offset() {
                    self.sheet_offset = offset;
                }
            }
            DragState::Released {
                sheet_origin,
                dismiss,
                ..
            } => {
                self.drag = DragState::Idle;
                if dismiss {
                    self.request_close();
                } else {
                    self.snap_back(sheet_origin);
                }
            }
            _ => {}
        }
        true
    }

    fn snap_back(&mut self, to: f32) {
        let id = self.animator.start(
            vec![Track {
                property: Property::SheetOffset,
                from: self.sheet_offset,
                to,
            }],
            SNAP_BACK_DURATION,
            Easing::EaseInOut,
        );
        self.sheet_target = to;
        self.settling = Some(id);
    }

    fn abandon_drag(&mut self) {
        if matches!(self.drag, DragState::Idle) {
            return;
        }
        tracing::debug!(state = ?self.drag, "drag abandoned");
        self.drag = DragState::Idle;
        self.snap_back(self.sheet_target);
    }

    /// A tap anywhere outside the sheet is a tap on the backdrop.
    pub fn handle_tap(&mut self, at: Point) -> bool {
        if self.sheet_frame().contains(at) {
            return false;
        }
        self.request_close();
        true
    }

    /// Raise the close signal.
    pub fn request_close(&self) {
        match self.closing_handler.as_ref().and_then(Weak::upgrade) {
            Some(handler) => {
                tracing::debug!("close requested");
                handler.close_flow();
            }
            None => tracing::trace!("close requested with no live handler"),
        }
    }

    /// Drop the keyboard subscriptions. Safe to call more than once.
    pub fn teardown(&mut self) {
        for token in self.subscriptions.drain(..) {
            self.notifier.remove_observer(token);
        }
    }
}

impl Drop for Container {
    fn drop(&mut self) {
        self.teardown();
    }
}
