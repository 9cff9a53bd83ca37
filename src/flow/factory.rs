use crate::config::CardConfig;
use crate::flow::context::{Context, DefaultContext};
use crate::flow::Flow;

/// Convenience constructors for [`Flow`].
pub struct FlowFactory;

impl FlowFactory {
    /// A flow whose cards share no data.
    pub fn make_flow(config: CardConfig) -> Flow<DefaultContext> {
        Flow::new(DefaultContext, config)
    }

    pub fn make_flow_with_context<C: Context>(context: C, config: CardConfig) -> Flow<C> {
        Flow::new(context, config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flow::FlowPhase;

    #[derive(Debug, Clone, PartialEq)]
    struct Counter(u32);

    impl Context for Counter {}

    #[test]
    fn make_flow_is_idle() {
        let flow = FlowFactory::make_flow(CardConfig::default());
        assert_eq!(flow.phase(), FlowPhase::Idle);
        assert_eq!(flow.depth(), 0);
    }

    #[test]
    fn make_flow_with_context_keeps_context_and_config() {
        let config = CardConfig::default().with_title("Order");
        let flow = FlowFactory::make_flow_with_context(Counter(3), config);
        assert_eq!(flow.context(), &Counter(3));
        assert_eq!(flow.container().config().title.as_deref(), Some("Order"));
    }
}
