//! Software keyboard notifications and the avoidance state machine.
//!
//! [`KeyboardNotifier`] is the process-wide event source: whoever owns the
//! on-screen keyboard posts will-show/will-hide notifications on it. A
//! container subscribes for its own lifetime and lifts its root view by the
//! keyboard height while the keyboard is up.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

use crate::container::animation::{Animator, Easing, Property, Track};
use crate::ui::mvi::{Intent, Reducer, UiState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyboardTopic {
    WillShow,
    WillHide,
}

/// A keyboard notification with its user info.
///
/// Both fields are optional the way a loosely typed payload would be; a
/// container ignores notifications that lack what it needs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeyboardNotification {
    pub topic: KeyboardTopic,
    pub frame_height: Option<f32>,
    pub animation_duration: Option<Duration>,
}

impl KeyboardNotification {
    pub fn will_show(frame_height: f32, animation_duration: Duration) -> Self {
        Self {
            topic: KeyboardTopic::WillShow,
            frame_height: Some(frame_height),
            animation_duration: Some(animation_duration),
        }
    }

    pub fn will_hide(animation_duration: Duration) -> Self {
        Self {
            topic: KeyboardTopic::WillHide,
            frame_height: None,
            animation_duration: Some(animation_duration),
        }
    }

    fn into_intent(self) -> Option<KeyboardIntent> {
        match self.topic {
            KeyboardTopic::WillShow => Some(KeyboardIntent::WillShow {
                frame_height: self.frame_height?,
                duration: self.animation_duration?,
            }),
            KeyboardTopic::WillHide => Some(KeyboardIntent::WillHide {
                duration: self.animation_duration?,
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverToken(u64);

type Observer = Rc<dyn Fn(&KeyboardNotification)>;

/// Single-threaded observer registry for keyboard notifications.
#[derive(Default)]
pub struct KeyboardNotifier {
    observers: RefCell<Vec<(ObserverToken, KeyboardTopic, Observer)>>,
    next_token: Cell<u64>,
}

impl KeyboardNotifier {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    /// The notifier shared by everything on the current thread.
    pub fn current() -> Rc<Self> {
        thread_local! {
            static CURRENT: Rc<KeyboardNotifier> = KeyboardNotifier::new();
        }
        CURRENT.with(Rc::clone)
    }

    pub fn add_observer<F>(&self, topic: KeyboardTopic, observer: F) -> ObserverToken
    where
        F: Fn(&KeyboardNotification) + 'static,
    {
        let token = ObserverToken(self.next_token.get() + 1);
        self.next_token.set(token.0);
        self.observers
            .borrow_mut()
            .push((token, topic, Rc::new(observer)));
        token
    }

    /// Returns false when the token was not registered (already removed).
    pub fn remove_observer(&self, token: ObserverToken) -> bool {
        let mut observers = self.observers.borrow_mut();
        let before = observers.len();
        observers.retain(|(registered, _, _)| *registered != token);
        observers.len() != before
    }

    pub fn observer_count(&self) -> usize {
        self.observers.borrow().len()
    }

    pub fn post(&self, notification: KeyboardNotification) {
        // Snapshot first so observers may (un)subscribe while being notified.
        let targets: Vec<Observer> = self
            .observers
            .borrow()
            .iter()
            .filter(|(_, topic, _)| *topic == notification.topic)
            .map(|(_, _, observer)| Rc::clone(observer))
            .collect();
        tracing::trace!(topic = ?notification.topic, observers = targets.len(), "keyboard notification");
        for observer in targets {
            observer(&notification);
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum KeyboardIntent {
    WillShow { frame_height: f32, duration: Duration },
    WillHide { duration: Duration },
}

impl Intent for KeyboardIntent {}

impl KeyboardIntent {
    fn duration(&self) -> Duration {
        match self {
            Self::WillShow { duration, .. } | Self::WillHide { duration } => *duration,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct KeyboardState {
    pub visible: bool,
    /// How far the root view should sit above its resting position.
    pub lift: f32,
}

impl UiState for KeyboardState {}

pub struct KeyboardReducer;

impl Reducer for KeyboardReducer {
    type State = KeyboardState;
    type Intent = KeyboardIntent;

    fn reduce(_state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            KeyboardIntent::WillShow { frame_height, .. } => KeyboardState {
                visible: true,
                lift: frame_height.max(0.0),
            },
            KeyboardIntent::WillHide { .. } => KeyboardState {
                visible: false,
                lift: 0.0,
            },
        }
    }
}

/// Keyboard state plus the animated root lift that follows it.
#[derive(Debug, Default)]
pub struct KeyboardAvoidance {
    state: KeyboardState,
    lift: f32,
    animator: Animator,
}

impl KeyboardAvoidance {
    pub fn is_visible(&self) -> bool {
        self.state.visible
    }

    pub fn lift(&self) -> f32 {
        self.lift
    }

    pub fn handle(&mut self, notification: &KeyboardNotification) {
        let Some(intent) = notification.into_intent() else {
            tracing::trace!(topic = ?notification.topic, "keyboard notification without user info ignored");
            return;
        };
        let duration = intent.duration();
        self.state = KeyboardReducer::reduce(self.state, intent);
        // The newest notification owns the lift; drop any lift still in flight.
        self.animator = Animator::new();
        self.animator.start(
            vec![Track {
                property: Property::RootLift,
                from: self.lift,
                to: self.state.lift,
            }],
            duration,
            Easing::EaseIn,
        );
    }

    pub fn advance(&mut self, elapsed: Duration) {
        for (property, value) in self.animator.advance(elapsed).values {
            if property == Property::RootLift {
                self.lift = value;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn post_reaches_only_matching_topic() {
        let notifier = KeyboardNotifier::new();
        let shown = Rc::new(Cell::new(0));
        let hidden = Rc::new(Cell::new(0));
        {
            let shown = Rc::clone(&shown);
            notifier.add_observer(KeyboardTopic::WillShow, move |_| shown.set(shown.get() + 1));
        }
        {
            let hidden = Rc::clone(&hidden);
            notifier.add_observer(KeyboardTopic::WillHide, move |_| hidden.set(hidden.get() + 1));
        }

        notifier.post(KeyboardNotification::will_show(100.0, Duration::ZERO));
        assert_eq!((shown.get(), hidden.get()), (1, 0));
    }

    #[test]
    fn current_is_shared_per_thread() {
        assert!(Rc::ptr_eq(&KeyboardNotifier::current(), &KeyboardNotifier::current()));
    }

    #[test]
    fn remove_observer_is_idempotent() {
        let notifier = KeyboardNotifier::new();
        let token = notifier.add_observer(KeyboardTopic::WillShow, |_| {});
        assert!(notifier.remove_observer(token));
        assert!(!notifier.remove_observer(token));
        assert_eq!(notifier.observer_count(), 0);
    }

    #[test]
    fn show_then_hide_animates_lift() {
        let mut avoidance = KeyboardAvoidance::default();
        avoidance.handle(&KeyboardNotification::will_show(
            96.0,
            Duration::from_millis(250),
        ));
        assert!(avoidance.is_visible());
        avoidance.advance(Duration::from_millis(250));
        assert_eq!(avoidance.lift(), 96.0);

        avoidance.handle(&KeyboardNotification::will_hide(Duration::from_millis(250)));
        assert!(!avoidance.is_visible());
        avoidance.advance(Duration::from_millis(250));
        assert_eq!(avoidance.lift(), 0.0);
    }

    #[test]
    fn hide_during_show_settles_at_rest() {
        let mut avoidance = KeyboardAvoidance::default();
        avoidance.handle(&KeyboardNotification::will_show(
            96.0,
            Duration::from_millis(500),
        ));
        avoidance.advance(Duration::from_millis(250));
        avoidance.handle(&KeyboardNotification::will_hide(Duration::from_millis(100)));
        avoidance.advance(Duration::from_millis(100));
        avoidance.advance(Duration::from_millis(300));
        assert_eq!(avoidance.lift(), 0.0);
    }

    #[test]
    fn will_show_without_height_is_ignored() {
        let mut avoidance = KeyboardAvoidance::default();
        avoidance.handle(&KeyboardNotification {
            topic: KeyboardTopic::WillShow,
            frame_height: None,
            animation_duration: Some(Duration::ZERO),
        });
        assert!(!avoidance.is_visible());
    }
}
