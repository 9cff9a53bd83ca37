/// Shared, immutable-by-replacement state handed to every card of a flow.
///
/// A flow never mutates its context in place. Cards derive a new value with
/// [`Context::update`] (or a domain-specific `with_*` method built on it) and
/// hand it to the flow, which swaps its held value.
pub trait Context: Clone + 'static {
    /// Copy-on-write update: returns a modified copy, `self` is untouched.
    fn update(&self, change: impl FnOnce(&mut Self)) -> Self {
        let mut next = self.clone();
        change(&mut next);
        next
    }
}

/// Context for flows whose cards share nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DefaultContext;

impl Context for DefaultContext {}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq, Default)]
    struct Basket {
        quantity: Option<i64>,
    }

    impl Context for Basket {}

    #[test]
    fn update_returns_new_value_and_keeps_original() {
        let original = Basket::default();
        let updated = original.update(|basket| basket.quantity = Some(5));
        assert_eq!(original.quantity, None);
        assert_eq!(updated.quantity, Some(5));
    }
}
