use std::rc::Rc;
use std::time::Duration;

use crossterm::event::{KeyEvent, MouseEvent};
use ratatui::layout::Rect;

use crate::config::CardConfig;
use crate::container::geometry::Frame;
use crate::demo::{ExampleContext, LandingScreen, ParentCard};
use crate::flow::{Flow, FlowFactory, PresentationHost};
use crate::ui::input::PointerRouter;

/// State of the demo application: the landing screen and, once started,
/// the flow presented on it.
pub struct App {
    config: CardConfig,
    landing: Rc<LandingScreen>,
    flow: Option<Flow<ExampleContext>>,
    pointer: PointerRouter,
    screen: Rect,
    should_quit: bool,
}

impl App {
    pub fn new(config: CardConfig) -> Self {
        Self {
            config,
            landing: Rc::new(LandingScreen::new()),
            flow: None,
            pointer: PointerRouter::default(),
            screen: Rect::new(0, 0, 80, 24),
            should_quit: false,
        }
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn request_quit(&mut self) {
        self.should_quit = true;
    }

    pub fn landing(&self) -> &LandingScreen {
        &self.landing
    }

    pub fn flow(&self) -> Option<&Flow<ExampleContext>> {
        self.flow.as_ref()
    }

    pub fn is_presenting(&self) -> bool {
        self.landing.is_presenting()
    }

    /// Start a new picker flow with an empty context.
    pub fn start_flow(&mut self) {
        if self.is_presenting() {
            return;
        }
        let mut flow =
            FlowFactory::make_flow_with_context(ExampleContext::default(), self.config.clone());
        flow.container_mut().set_bounds(Frame::from_cells(self.screen));
        let host: Rc<dyn PresentationHost> = self.landing.clone();
        flow.start(ParentCard::new(), Some(host));
        self.flow = Some(flow);
    }

    /// Offer a key to the visible card.
    pub fn on_key(&mut self, key: KeyEvent) -> bool {
        match self.flow.as_mut() {
            Some(flow) => flow.handle_key(key),
            None => false,
        }
    }

    pub fn close_flow(&mut self) {
        if let Some(flow) = self.flow.as_mut() {
            flow.request_close();
        }
    }

    pub fn on_mouse(&mut self, mouse: MouseEvent) -> bool {
        if !self.is_presenting() {
            return false;
        }
        match self.flow.as_mut() {
            Some(flow) => self.pointer.route(flow, mouse),
            None => false,
        }
    }

    pub fn on_resize(&mut self, cols: u16, rows: u16) {
        self.screen = Rect::new(0, 0, cols, rows);
        if let Some(flow) = self.flow.as_mut() {
            flow.container_mut().set_bounds(Frame::from_cells(self.screen));
        }
    }

    pub fn on_tick(&mut self, elapsed: Duration) {
        if let Some(flow) = self.flow.as_mut() {
            flow.advance(elapsed);
        }
    }
}
