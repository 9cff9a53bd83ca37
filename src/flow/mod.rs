//! Stack-based navigation over cards.
//!
//! A [`Flow`] owns an ordered stack of cards (last = visible), the shared
//! context, and the [`Container`] it presents them in. Every stack change is
//! bracketed by container transitions: the outgoing card animates out, the
//! stack changes when that transition finishes, then the new top animates in.
//!
//! Transitions finish asynchronously. [`Flow::advance`] drives time and runs
//! each transition's continuation in the order the transitions started.
//! Starting a second stack-changing operation before the first one's
//! transition has finished is a caller error; the flow does not guard it.

mod card;
mod context;
mod factory;
mod host;
mod mailbox;

pub use card::{Card, CardBinding, CardId, CardView};
pub use context::{Context, DefaultContext};
pub use factory::FlowFactory;
pub use host::PresentationHost;
pub use mailbox::FlowHandle;

use std::collections::VecDeque;
use std::rc::{Rc, Weak};
use std::time::Duration;

use crossterm::event::KeyEvent;

use crate::config::CardConfig;
use crate::container::animation::{AnimationKind, TransitionId};
use crate::container::geometry::Point;
use crate::container::keyboard::KeyboardNotifier;
use crate::container::{ClosingHandler, Container, PanPhase};
use mailbox::{FlowCommand, Mailbox};

/// Caller-supplied callback run once a `finish` has fully completed.
pub type Completion = Box<dyn FnOnce()>;

type Step<C> = Box<dyn FnOnce(&mut Flow<C>)>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FlowPhase {
    /// Not presented, empty stack.
    #[default]
    Idle,
    /// Container on screen, at least one card pushed.
    Presenting,
}

pub struct Flow<C: Context> {
    container: Container,
    stack: Vec<Box<dyn Card<C>>>,
    context: Rc<C>,
    mailbox: Rc<Mailbox<C>>,
    host: Option<Rc<dyn PresentationHost>>,
    phase: FlowPhase,
    pending: VecDeque<(TransitionId, Option<Step<C>>)>,
}

impl<C: Context> Flow<C> {
    /// Build a flow listening to the thread's shared keyboard notifier.
    pub fn new(context: C, config: CardConfig) -> Self {
        Self::with_notifier(context, config, &KeyboardNotifier::current())
    }

    pub fn with_notifier(context: C, config: CardConfig, notifier: &Rc<KeyboardNotifier>) -> Self {
        let mut container = Container::new(config, notifier);
        let mailbox = Rc::new(Mailbox::new());
        let handler = Rc::downgrade(&mailbox);
        let handler: Weak<dyn ClosingHandler> = handler;
        container.set_closing_handler(handler);

        Self {
            container,
            stack: Vec::new(),
            context: Rc::new(context),
            mailbox,
            host: None,
            phase: FlowPhase::Idle,
            pending: VecDeque::new(),
        }
    }

    pub fn phase(&self) -> FlowPhase {
        self.phase
    }

    pub fn context(&self) -> &C {
        &self.context
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    pub fn current_card(&self) -> Option<&dyn Card<C>> {
        self.stack.last().map(|card| &**card)
    }

    pub fn container(&self) -> &Container {
        &self.container
    }

    pub fn container_mut(&mut self) -> &mut Container {
        &mut self.container
    }

    /// True while any flow transition is waiting to finish.
    pub fn is_transitioning(&self) -> bool {
        !self.pending.is_empty()
    }

    pub fn handle(&self) -> FlowHandle<C> {
        FlowHandle::new(Rc::downgrade(&self.mailbox))
    }

    /// Present the container on `host` and slide `card` in.
    ///
    /// Only meaningful while idle. Without a host, or when the host refuses,
    /// nothing happens.
    pub fn start(&mut self, card: impl Card<C> + 'static, host: Option<Rc<dyn PresentationHost>>) {
        if self.phase == FlowPhase::Presenting {
            tracing::warn!("start ignored: flow is already presenting");
            return;
        }
        let Some(host) = host else {
            tracing::debug!("start ignored: no host to present on");
            return;
        };
        if !host.present() {
            tracing::warn!("start ignored: host refused presentation");
            return;
        }

        tracing::debug!(card = card.id().value(), "flow started");
        self.host = Some(host);
        self.phase = FlowPhase::Presenting;
        self.stack.push(Box::new(card));
        self.show_current_card(AnimationKind::Slide { slide_in: true });
    }

    pub fn push(&mut self, card: impl Card<C> + 'static) {
        self.push_boxed(Box::new(card));
    }

    /// Fade the current card out, then push `card` and fade it in.
    pub fn push_boxed(&mut self, card: Box<dyn Card<C>>) {
        tracing::debug!(card = card.id().value(), depth = self.depth(), "push");
        self.dismiss_current_card(AnimationKind::Fade { fade_in: false }, move |flow| {
            flow.stack.push(card);
            flow.show_current_card(AnimationKind::Fade { fade_in: true });
        });
    }

    /// Fade the current card out, then drop it and fade the new top in.
    ///
    /// Popping the last card leaves an empty stack and an empty slot.
    pub fn pop(&mut self) {
        tracing::debug!(depth = self.depth(), "pop");
        self.dismiss_current_card(AnimationKind::Fade { fade_in: false }, |flow| {
            flow.stack.pop();
            if flow.stack.is_empty() {
                flow.container.unmount();
            }
            flow.show_current_card(AnimationKind::Fade { fade_in: true });
        });
    }

    /// Slide the container out, clear the stack, dismiss from the host, then
    /// run `completion`.
    pub fn finish(&mut self, completion: Option<Completion>) {
        tracing::debug!(depth = self.depth(), "finish");
        let id = self.container.animate(AnimationKind::Slide { slide_in: false });
        let step: Step<C> = Box::new(move |flow: &mut Flow<C>| {
            flow.stack.clear();
            flow.container.unmount();
            if let Some(host) = flow.host.take() {
                host.dismiss();
            }
            flow.phase = FlowPhase::Idle;
            tracing::debug!("flow finished");
            if let Some(completion) = completion {
                completion();
            }
        });
        self.pending.push_back((id, Some(step)));
    }

    /// Replace the shared context. `None` is ignored.
    ///
    /// The visible card is not refreshed: a card sees the new context the
    /// next time it is shown.
    pub fn update(&mut self, context: Option<C>) {
        if let Some(context) = context {
            self.context = Rc::new(context);
        }
    }

    /// Bind the top card to this flow and the current context, mount it and
    /// run `kind`. Does nothing on an empty stack.
    pub fn show_current_card(&mut self, kind: AnimationKind) {
        let handle = self.handle();
        let context = Rc::clone(&self.context);
        let Some(card) = self.stack.last_mut() else {
            return;
        };
        card.binding_mut().bind(handle, context);
        self.container.mount(&mut **card);
        let id = self.container.animate(kind);
        self.pending.push_back((id, None));
    }

    /// Animate the current card with `kind`, then run `completion`.
    ///
    /// On an empty stack there is nothing to animate and `completion` runs
    /// right away.
    pub fn dismiss_current_card<F>(&mut self, kind: AnimationKind, completion: F)
    where
        F: FnOnce(&mut Flow<C>) + 'static,
    {
        if self.stack.is_empty() {
            completion(self);
            return;
        }
        let id = self.container.animate(kind);
        let step: Step<C> = Box::new(completion);
        self.pending.push_back((id, Some(step)));
    }

    /// Move time forward: carry out queued requests, advance the container,
    /// and run the continuations of finished transitions.
    pub fn advance(&mut self, elapsed: Duration) {
        self.process_commands();
        for id in self.container.advance(elapsed) {
            let Some(index) = self.pending.iter().position(|(pending, _)| *pending == id) else {
                continue;
            };
            if let Some((_, Some(step))) = self.pending.remove(index) {
                step(self);
            }
        }
        self.process_commands();
    }

    /// Offer a key to the visible card.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        let handled = match self.stack.last_mut() {
            Some(card) => card.handle_key(key),
            None => false,
        };
        self.process_commands();
        handled
    }

    pub fn handle_pan(&mut self, phase: PanPhase, at: Point) -> bool {
        let handled = self.container.handle_pan(phase, at);
        self.process_commands();
        handled
    }

    pub fn handle_tap(&mut self, at: Point) -> bool {
        let handled = self.container.handle_tap(at);
        self.process_commands();
        handled
    }

    /// Same as a backdrop tap, for keyboard-driven closing.
    pub fn request_close(&mut self) {
        self.container.request_close();
        self.process_commands();
    }

    /// Carry out requests posted by cards and the container, oldest first.
    pub fn process_commands(&mut self) {
        while let Some(command) = self.mailbox.take() {
            match command {
                FlowCommand::Push(card) => self.push_boxed(card),
                FlowCommand::Pop => self.pop(),
                FlowCommand::Finish => self.finish(None),
                FlowCommand::Update(context) => self.update(Some(context)),
            }
        }
    }
}
