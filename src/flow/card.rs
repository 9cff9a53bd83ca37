use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

use crossterm::event::KeyEvent;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;

use crate::flow::context::Context;
use crate::flow::mailbox::FlowHandle;

static NEXT_CARD_ID: AtomicU64 = AtomicU64::new(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CardId(u64);

impl CardId {
    fn next() -> Self {
        Self(NEXT_CARD_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn value(self) -> u64 {
        self.0
    }
}

/// A card's rendered-content handle. Created on first mount.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardView {
    id: CardId,
    mounts: usize,
}

impl CardView {
    fn new(id: CardId) -> Self {
        Self { id, mounts: 0 }
    }

    pub fn id(&self) -> CardId {
        self.id
    }

    /// How many times this view has been attached to a container.
    pub fn mount_count(&self) -> usize {
        self.mounts
    }

    pub(crate) fn attach(&mut self) {
        self.mounts += 1;
    }
}

/// The flow-facing half of every card: the back-reference to the owning
/// flow, the context last handed over, and the lazily created view.
pub struct CardBinding<C: Context> {
    id: CardId,
    flow: Option<FlowHandle<C>>,
    context: Option<Rc<C>>,
    view: Option<CardView>,
}

impl<C: Context> CardBinding<C> {
    pub fn new() -> Self {
        Self {
            id: CardId::next(),
            flow: None,
            context: None,
            view: None,
        }
    }

    pub fn id(&self) -> CardId {
        self.id
    }

    pub fn flow(&self) -> Option<&FlowHandle<C>> {
        self.flow.as_ref()
    }

    pub fn context(&self) -> Option<&C> {
        self.context.as_deref()
    }

    pub fn view(&self) -> Option<&CardView> {
        self.view.as_ref()
    }

    pub(crate) fn bind(&mut self, flow: FlowHandle<C>, context: Rc<C>) {
        self.flow = Some(flow);
        self.context = Some(context);
    }

    pub(crate) fn load_view(&mut self) -> &mut CardView {
        let id = self.id;
        self.view.get_or_insert_with(|| CardView::new(id))
    }
}

impl<C: Context> Default for CardBinding<C> {
    fn default() -> Self {
        Self::new()
    }
}

/// A unit of content presented by a flow.
///
/// Implementors embed a [`CardBinding`] and override [`Card::apply_context`]
/// to project the context onto what they render. A card never edits the
/// stack itself; it asks its flow through [`Card::flow`].
pub trait Card<C: Context> {
    fn binding(&self) -> &CardBinding<C>;

    fn binding_mut(&mut self) -> &mut CardBinding<C>;

    /// Called every time the card is mounted, after the flow has refreshed
    /// its context.
    fn apply_context(&mut self) {}

    fn render(&self, _area: Rect, _buf: &mut Buffer) {}

    /// Returns whether the key was consumed.
    fn handle_key(&mut self, _key: KeyEvent) -> bool {
        false
    }

    fn id(&self) -> CardId {
        self.binding().id()
    }

    fn flow(&self) -> Option<&FlowHandle<C>> {
        self.binding().flow()
    }

    fn context(&self) -> Option<&C> {
        self.binding().context()
    }
}
