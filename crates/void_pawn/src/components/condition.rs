//! Conditions gate the components they are attached to

use super::{AsAny, ComponentId, Scope};
use std::fmt;

/// A component that enables or disables its parent component.
///
/// Use [`Scope::evaluate`] rather than calling [`Condition::check`]
/// directly: an inactive condition is irrelevant and evaluates true.
pub trait Condition: AsAny + fmt::Debug {
    /// Condition-specific test, only consulted while the condition is active
    fn check(&self, _scope: &Scope<'_>) -> bool {
        true
    }
}

/// True when every operand is true
#[derive(Debug, Clone, Default)]
pub struct AndCondition {
    pub operands: Vec<ComponentId>,
}

impl AndCondition {
    pub fn new(operands: impl IntoIterator<Item = ComponentId>) -> Self {
        Self {
            operands: operands.into_iter().collect(),
        }
    }
}

impl Condition for AndCondition {
    fn check(&self, scope: &Scope<'_>) -> bool {
        self.operands.iter().all(|id| scope.evaluate(*id))
    }
}

/// True when at least one operand is true
#[derive(Debug, Clone, Default)]
pub struct OrCondition {
    pub operands: Vec<ComponentId>,
}

impl OrCondition {
    pub fn new(operands: impl IntoIterator<Item = ComponentId>) -> Self {
        Self {
            operands: operands.into_iter().collect(),
        }
    }
}

impl Condition for OrCondition {
    fn check(&self, scope: &Scope<'_>) -> bool {
        self.operands.iter().any(|id| scope.evaluate(*id))
    }
}

/// True when no operand is true
#[derive(Debug, Clone, Default)]
pub struct NotCondition {
    pub operands: Vec<ComponentId>,
}

impl NotCondition {
    pub fn new(operands: impl IntoIterator<Item = ComponentId>) -> Self {
        Self {
            operands: operands.into_iter().collect(),
        }
    }
}

impl Condition for NotCondition {
    fn check(&self, scope: &Scope<'_>) -> bool {
        !self.operands.iter().any(|id| scope.evaluate(*id))
    }
}

/// True when exactly one operand is true
#[derive(Debug, Clone, Default)]
pub struct XorCondition {
    pub operands: Vec<ComponentId>,
}

impl XorCondition {
    pub fn new(operands: impl IntoIterator<Item = ComponentId>) -> Self {
        Self {
            operands: operands.into_iter().collect(),
        }
    }
}

impl Condition for XorCondition {
    fn check(&self, scope: &Scope<'_>) -> bool {
        let mut matched = false;
        for id in &self.operands {
            if scope.evaluate(*id) {
                if matched {
                    return false;
                }
                matched = true;
            }
        }
        matched
    }
}

/// Mirrors another condition, optionally negated. True when unset.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConditionReference {
    pub reference: Option<ComponentId>,
    pub negate: bool,
}

impl ConditionReference {
    pub fn new(reference: ComponentId) -> Self {
        Self {
            reference: Some(reference),
            negate: false,
        }
    }

    pub fn negated(reference: ComponentId) -> Self {
        Self {
            reference: Some(reference),
            negate: true,
        }
    }
}

impl Condition for ConditionReference {
    fn check(&self, scope: &Scope<'_>) -> bool {
        match self.reference {
            Some(id) => scope.evaluate(id) != self.negate,
            None => true,
        }
    }
}

/// A fixed value the host can flip
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToggleCondition {
    pub value: bool,
}

impl ToggleCondition {
    pub fn new(value: bool) -> Self {
        Self { value }
    }
}

impl Condition for ToggleCondition {
    fn check(&self, _scope: &Scope<'_>) -> bool {
        self.value
    }
}

type Predicate = Box<dyn Fn(&Scope<'_>) -> bool>;

/// A closure over the pawn, e.g. "standing on ground"
pub struct PredicateCondition {
    predicate: Predicate,
}

impl PredicateCondition {
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&Scope<'_>) -> bool + 'static,
    {
        Self {
            predicate: Box::new(predicate),
        }
    }
}

impl Condition for PredicateCondition {
    fn check(&self, scope: &Scope<'_>) -> bool {
        (self.predicate)(scope)
    }
}

impl fmt::Debug for PredicateCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PredicateCondition").finish_non_exhaustive()
    }
}
