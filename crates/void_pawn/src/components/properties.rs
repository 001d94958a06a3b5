//! Tuning values that actions select between

use super::{AsAny, HookContext};
use std::fmt;

/// A set of action parameters. An action uses the first active set among
/// its attached children; it is notified when that choice changes.
pub trait ActionProperties: AsAny + fmt::Debug {
    fn on_activate(&mut self, _ctx: &mut HookContext<'_>) {}
    fn on_deactivate(&mut self, _ctx: &mut HookContext<'_>) {}
}

/// Arbitrary values wrapped as a property component
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertySet<T> {
    values: T,
    in_use: bool,
    activations: u32,
}

impl<T> PropertySet<T> {
    pub fn new(values: T) -> Self {
        Self {
            values,
            in_use: false,
            activations: 0,
        }
    }

    pub fn values(&self) -> &T {
        &self.values
    }

    pub fn values_mut(&mut self) -> &mut T {
        &mut self.values
    }

    /// Whether an action currently uses this set
    pub fn in_use(&self) -> bool {
        self.in_use
    }

    /// How many times an action switched to this set
    pub fn activations(&self) -> u32 {
        self.activations
    }
}

impl<T: fmt::Debug + 'static> ActionProperties for PropertySet<T> {
    fn on_activate(&mut self, _ctx: &mut HookContext<'_>) {
        self.in_use = true;
        self.activations += 1;
    }

    fn on_deactivate(&mut self, _ctx: &mut HookContext<'_>) {
        self.in_use = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::ComponentTree;
    use crate::pawn::PawnState;

    #[test]
    fn test_activation_bookkeeping() {
        let mut tree = ComponentTree::new("Hero");
        let state = PawnState::default();
        let root = tree.root();
        let mut ctx = HookContext::new(&mut tree, &state, root);

        let mut set = PropertySet::new(4.5f32);
        assert!(!set.in_use());

        set.on_activate(&mut ctx);
        assert!(set.in_use());
        set.on_deactivate(&mut ctx);
        set.on_activate(&mut ctx);

        assert_eq!(set.activations(), 2);
        assert_eq!(*set.values(), 4.5);

        *set.values_mut() = 6.0;
        assert_eq!(*set.values(), 6.0);
    }
}
