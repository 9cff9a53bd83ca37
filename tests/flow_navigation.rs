use cardflow::config::CardConfig;
use cardflow::container::animation::TRANSITION_DURATION;
use cardflow::flow::{
    Card, CardBinding, CardId, DefaultContext, Flow, FlowFactory, FlowPhase, PresentationHost,
};
use crossterm::event::{KeyCode, KeyEvent};
use std::cell::Cell;
use std::rc::Rc;

#[derive(Default)]
struct Host {
    refuse: bool,
    presented: Cell<usize>,
    dismissed: Cell<usize>,
}

impl PresentationHost for Host {
    fn present(&self) -> bool {
        if self.refuse {
            return false;
        }
        self.presented.set(self.presented.get() + 1);
        true
    }

    fn dismiss(&self) {
        self.dismissed.set(self.dismissed.get() + 1);
    }
}

/// Pops on `p`, finishes on `f`, pushes another card on `n`.
#[derive(Default)]
struct StepCard {
    binding: CardBinding<DefaultContext>,
}

impl Card<DefaultContext> for StepCard {
    fn binding(&self) -> &CardBinding<DefaultContext> {
        &self.binding
    }

    fn binding_mut(&mut self) -> &mut CardBinding<DefaultContext> {
        &mut self.binding
    }

    fn handle_key(&mut self, key: KeyEvent) -> bool {
        let Some(flow) = self.flow() else {
            return false;
        };
        match key.code {
            KeyCode::Char('p') => flow.pop(),
            KeyCode::Char('f') => flow.finish(),
            KeyCode::Char('n') => flow.push(StepCard::default()),
            _ => return false,
        }
        true
    }
}

fn card() -> (StepCard, CardId) {
    let card = StepCard::default();
    let id = card.id();
    (card, id)
}

fn settle(flow: &mut Flow<DefaultContext>) {
    for _ in 0..16 {
        if !flow.is_transitioning() {
            return;
        }
        flow.advance(TRANSITION_DURATION);
    }
    panic!("flow never settled");
}

fn started() -> (Flow<DefaultContext>, Rc<Host>, CardId) {
    let mut flow = FlowFactory::make_flow(CardConfig::default());
    let host = Rc::new(Host::default());
    let (first, id) = card();
    flow.start(first, Some(host.clone()));
    settle(&mut flow);
    (flow, host, id)
}

fn current(flow: &Flow<DefaultContext>) -> Option<CardId> {
    flow.current_card().map(|card| card.id())
}

#[test]
fn push_push_pop_pop_finish_scenario() {
    let (mut flow, host, a) = started();
    assert_eq!((flow.depth(), current(&flow)), (1, Some(a)));

    let (card_b, b) = card();
    flow.push(card_b);
    settle(&mut flow);
    assert_eq!((flow.depth(), current(&flow)), (2, Some(b)));

    let (card_c, c) = card();
    flow.push(card_c);
    settle(&mut flow);
    assert_eq!((flow.depth(), current(&flow)), (3, Some(c)));

    flow.pop();
    settle(&mut flow);
    assert_eq!((flow.depth(), current(&flow)), (2, Some(b)));

    flow.pop();
    settle(&mut flow);
    assert_eq!((flow.depth(), current(&flow)), (1, Some(a)));

    flow.finish(None);
    settle(&mut flow);
    assert_eq!(flow.depth(), 0);
    assert_eq!(flow.phase(), FlowPhase::Idle);
    assert_eq!(host.dismissed.get(), 1);
}

#[test]
fn n_pushes_leave_last_card_on_top() {
    let (mut flow, _host, _) = started();
    let mut last = None;
    for _ in 0..5 {
        let (next, id) = card();
        flow.push(next);
        settle(&mut flow);
        last = Some(id);
    }
    assert_eq!(flow.depth(), 6);
    assert_eq!(current(&flow), last);
    assert_eq!(flow.container().mounted_card(), last);
}

#[test]
fn outgoing_card_stays_mounted_until_fade_out_completes() {
    let (mut flow, _host, a) = started();
    let (next, b) = card();
    flow.push(next);
    assert_eq!(flow.container().mounted_card(), Some(a));
    assert_eq!(flow.depth(), 1);

    flow.advance(TRANSITION_DURATION);
    assert_eq!(flow.container().mounted_card(), Some(b));
    assert_eq!(flow.depth(), 2);
}

#[test]
fn popping_last_card_leaves_empty_slot() {
    let (mut flow, host, _) = started();
    flow.pop();
    settle(&mut flow);
    assert_eq!(flow.depth(), 0);
    assert!(flow.current_card().is_none());
    assert!(flow.container().mounted_card().is_none());
    assert_eq!(host.dismissed.get(), 0);
}

#[test]
fn finish_on_empty_stack_still_dismisses() {
    let (mut flow, host, _) = started();
    flow.pop();
    settle(&mut flow);

    flow.finish(None);
    settle(&mut flow);
    assert_eq!(host.dismissed.get(), 1);
    assert_eq!(flow.phase(), FlowPhase::Idle);
}

#[test]
fn finish_completion_fires_once_after_dismiss() {
    let (mut flow, host, _) = started();
    let (next, _) = card();
    flow.push(next);
    settle(&mut flow);

    let fired = Rc::new(Cell::new(0));
    let dismissed_at_completion = Rc::new(Cell::new(0));
    {
        let fired = Rc::clone(&fired);
        let seen = Rc::clone(&dismissed_at_completion);
        let host = Rc::clone(&host);
        flow.finish(Some(Box::new(move || {
            fired.set(fired.get() + 1);
            seen.set(host.dismissed.get());
        })));
    }
    assert_eq!(fired.get(), 0);

    settle(&mut flow);
    flow.advance(TRANSITION_DURATION);
    assert_eq!(fired.get(), 1);
    assert_eq!(dismissed_at_completion.get(), 1);
    assert_eq!(flow.depth(), 0);
}

#[test]
fn start_without_host_or_with_refusing_host_is_noop() {
    let mut flow = FlowFactory::make_flow(CardConfig::default());
    flow.start(StepCard::default(), None);
    assert_eq!(flow.phase(), FlowPhase::Idle);

    let host = Rc::new(Host {
        refuse: true,
        ..Host::default()
    });
    flow.start(StepCard::default(), Some(host.clone()));
    assert_eq!(flow.depth(), 0);
    assert_eq!(flow.phase(), FlowPhase::Idle);
    assert!(!flow.is_transitioning());
}

#[test]
fn second_start_while_presenting_is_ignored() {
    let (mut flow, host, a) = started();
    flow.start(StepCard::default(), Some(host.clone()));
    assert_eq!(host.presented.get(), 1);
    assert_eq!((flow.depth(), current(&flow)), (1, Some(a)));
}

#[test]
fn flow_can_start_again_after_finish() {
    let (mut flow, host, _) = started();
    flow.finish(None);
    settle(&mut flow);

    let (again, id) = card();
    flow.start(again, Some(host.clone()));
    settle(&mut flow);
    assert_eq!(host.presented.get(), 2);
    assert_eq!(current(&flow), Some(id));
    assert_eq!(flow.container().sheet_offset(), 0.0);
}

#[test]
fn cards_navigate_through_their_handle() {
    let (mut flow, host, a) = started();
    let n = KeyEvent::from(KeyCode::Char('n'));
    assert!(flow.handle_key(n));
    settle(&mut flow);
    assert_eq!(flow.depth(), 2);

    assert!(flow.handle_key(KeyEvent::from(KeyCode::Char('p'))));
    settle(&mut flow);
    assert_eq!(current(&flow), Some(a));

    assert!(flow.handle_key(KeyEvent::from(KeyCode::Char('f'))));
    settle(&mut flow);
    assert_eq!(host.dismissed.get(), 1);
}

#[test]
fn unhandled_keys_are_reported() {
    let (mut flow, _host, _) = started();
    assert!(!flow.handle_key(KeyEvent::from(KeyCode::Char('x'))));
}

#[test]
fn handle_outliving_flow_is_harmless() {
    let (flow, _host, _) = started();
    let handle = flow.handle();
    assert!(handle.is_alive());
    drop(flow);
    assert!(!handle.is_alive());
    handle.pop();
    handle.finish();
    handle.update(Some(DefaultContext));
}
