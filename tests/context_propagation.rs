use cardflow::config::CardConfig;
use cardflow::container::animation::{AnimationKind, TRANSITION_DURATION};
use cardflow::demo::{ExampleContext, ParentCard, QUANTITY_PLACEHOLDER};
use cardflow::flow::{Card, CardBinding, Flow, FlowFactory, PresentationHost};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

#[derive(Default)]
struct Host {
    dismissed: Cell<usize>,
}

impl PresentationHost for Host {
    fn present(&self) -> bool {
        true
    }

    fn dismiss(&self) {
        self.dismissed.set(self.dismissed.get() + 1);
    }
}

/// Records the quantity it sees every time it is shown.
struct Recorder {
    binding: CardBinding<ExampleContext>,
    applied: Rc<RefCell<Vec<Option<i64>>>>,
}

impl Card<ExampleContext> for Recorder {
    fn binding(&self) -> &CardBinding<ExampleContext> {
        &self.binding
    }

    fn binding_mut(&mut self) -> &mut CardBinding<ExampleContext> {
        &mut self.binding
    }

    fn apply_context(&mut self) {
        let quantity = self.context().and_then(|context| context.quantity);
        self.applied.borrow_mut().push(quantity);
    }
}

fn settle(flow: &mut Flow<ExampleContext>) {
    for _ in 0..16 {
        if !flow.is_transitioning() {
            return;
        }
        flow.advance(TRANSITION_DURATION);
    }
    panic!("flow never settled");
}

fn press(flow: &mut Flow<ExampleContext>, code: KeyCode) {
    flow.handle_key(KeyEvent::from(code));
}

fn visible_text(flow: &Flow<ExampleContext>) -> String {
    let area = Rect::new(0, 0, 60, 10);
    let mut buf = Buffer::empty(area);
    if let Some(card) = flow.current_card() {
        card.render(area, &mut buf);
    }
    buf.content.iter().map(|cell| cell.symbol()).collect()
}

#[test]
fn child_update_then_pop_shows_new_quantity_on_parent() {
    let mut flow = FlowFactory::make_flow_with_context(ExampleContext::default(), CardConfig::default());
    flow.start(ParentCard::new(), Some(Rc::new(Host::default())));
    settle(&mut flow);
    assert!(visible_text(&flow).contains(QUANTITY_PLACEHOLDER));

    press(&mut flow, KeyCode::Enter);
    settle(&mut flow);
    assert_eq!(flow.depth(), 2);

    for _ in 0..5 {
        press(&mut flow, KeyCode::Right);
    }
    press(&mut flow, KeyCode::Enter);
    settle(&mut flow);

    assert_eq!(flow.depth(), 1);
    assert_eq!(flow.context().quantity, Some(5));
    let text = visible_text(&flow);
    assert!(text.contains('5'));
    assert!(!text.contains(QUANTITY_PLACEHOLDER));
}

#[test]
fn child_starts_from_shared_quantity() {
    let mut flow =
        FlowFactory::make_flow_with_context(ExampleContext::new(Some(7)), CardConfig::default());
    flow.start(ParentCard::new(), Some(Rc::new(Host::default())));
    settle(&mut flow);

    press(&mut flow, KeyCode::Enter);
    settle(&mut flow);
    press(&mut flow, KeyCode::Left);
    press(&mut flow, KeyCode::Enter);
    settle(&mut flow);

    assert_eq!(flow.context().quantity, Some(6));
}

#[test]
fn typed_quantity_is_handed_back() {
    let mut flow = FlowFactory::make_flow_with_context(ExampleContext::default(), CardConfig::default());
    flow.start(ParentCard::new(), Some(Rc::new(Host::default())));
    settle(&mut flow);
    press(&mut flow, KeyCode::Enter);
    settle(&mut flow);

    press(&mut flow, KeyCode::Tab);
    assert!(flow.container().is_keyboard_visible());
    press(&mut flow, KeyCode::Char('1'));
    press(&mut flow, KeyCode::Char('2'));
    press(&mut flow, KeyCode::Enter);
    assert!(!flow.container().is_keyboard_visible());
    settle(&mut flow);

    assert_eq!(flow.context().quantity, Some(12));
}

#[test]
fn update_alone_does_not_reapply_context_to_visible_card() {
    let mut flow = FlowFactory::make_flow_with_context(ExampleContext::default(), CardConfig::default());
    let applied = Rc::new(RefCell::new(Vec::new()));
    flow.start(
        Recorder {
            binding: CardBinding::new(),
            applied: Rc::clone(&applied),
        },
        Some(Rc::new(Host::default())),
    );
    settle(&mut flow);
    assert_eq!(*applied.borrow(), vec![None]);

    flow.update(Some(ExampleContext::new(Some(3))));
    assert_eq!(*applied.borrow(), vec![None]);
    assert_eq!(
        flow.current_card().and_then(|card| card.context().copied()),
        Some(ExampleContext::default())
    );

    flow.show_current_card(AnimationKind::Fade { fade_in: true });
    assert_eq!(*applied.borrow(), vec![None, Some(3)]);
}

#[test]
fn absent_update_keeps_context() {
    let mut flow =
        FlowFactory::make_flow_with_context(ExampleContext::new(Some(2)), CardConfig::default());
    flow.update(None);
    assert_eq!(flow.context().quantity, Some(2));

    let handle = flow.handle();
    handle.update(None);
    flow.advance(TRANSITION_DURATION);
    assert_eq!(flow.context().quantity, Some(2));
}
