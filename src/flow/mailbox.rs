//! Requests posted back to a flow from the things it hands references to.
//!
//! Cards and the container only ever hold a `Weak` to the mailbox. The flow
//! owns the only strong reference and drains it on the control thread, so a
//! card asking for `pop()` from inside its own key handler never re-enters
//! the flow while it is busy.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::fmt;
use std::rc::Weak;

use crate::container::ClosingHandler;
use crate::flow::card::Card;
use crate::flow::context::Context;

pub(crate) enum FlowCommand<C: Context> {
    Push(Box<dyn Card<C>>),
    Pop,
    Finish,
    Update(C),
}

pub(crate) struct Mailbox<C: Context> {
    queue: RefCell<VecDeque<FlowCommand<C>>>,
}

impl<C: Context> Mailbox<C> {
    pub(crate) fn new() -> Self {
        Self {
            queue: RefCell::new(VecDeque::new()),
        }
    }

    pub(crate) fn post(&self, command: FlowCommand<C>) {
        self.queue.borrow_mut().push_back(command);
    }

    pub(crate) fn take(&self) -> Option<FlowCommand<C>> {
        self.queue.borrow_mut().pop_front()
    }
}

impl<C: Context> ClosingHandler for Mailbox<C> {
    fn close_flow(&self) {
        self.post(FlowCommand::Finish);
    }
}

/// A card's non-owning handle to its flow.
///
/// Every call is queued and carried out by the flow in order. Calls on a
/// handle whose flow has been dropped do nothing.
pub struct FlowHandle<C: Context> {
    mailbox: Weak<Mailbox<C>>,
}

impl<C: Context> FlowHandle<C> {
    pub(crate) fn new(mailbox: Weak<Mailbox<C>>) -> Self {
        Self { mailbox }
    }

    pub fn is_alive(&self) -> bool {
        self.mailbox.strong_count() > 0
    }

    pub fn push(&self, card: impl Card<C> + 'static) {
        self.send(FlowCommand::Push(Box::new(card)));
    }

    pub fn pop(&self) {
        self.send(FlowCommand::Pop);
    }

    pub fn finish(&self) {
        self.send(FlowCommand::Finish);
    }

    /// Replace the flow's context. `None` is ignored.
    pub fn update(&self, context: Option<C>) {
        if let Some(context) = context {
            self.send(FlowCommand::Update(context));
        }
    }

    fn send(&self, command: FlowCommand<C>) {
        match self.mailbox.upgrade() {
            Some(mailbox) => mailbox.post(command),
            None => tracing::warn!("flow handle used after its flow was dropped"),
        }
    }
}

impl<C: Context> Clone for FlowHandle<C> {
    fn clone(&self) -> Self {
        Self {
            mailbox: Weak::clone(&self.mailbox),
        }
    }
}

impl<C: Context> fmt::Debug for FlowHandle<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FlowHandle")
            .field("alive", &self.is_alive())
            .finish()
    }
}
