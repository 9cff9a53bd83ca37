use crate::flow::Context;

/// Data shared by the quantity picker's cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ExampleContext {
    pub quantity: Option<i64>,
}

impl Context for ExampleContext {}

impl ExampleContext {
    pub fn new(quantity: Option<i64>) -> Self {
        Self { quantity }
    }

    pub fn with_quantity(&self, quantity: i64) -> Self {
        self.update(|context| context.quantity = Some(quantity))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn with_quantity_leaves_original_untouched() {
        let empty = ExampleContext::default();
        let chosen = empty.with_quantity(5);
        assert_eq!(empty.quantity, None);
        assert_eq!(chosen, ExampleContext::new(Some(5)));
    }
}
