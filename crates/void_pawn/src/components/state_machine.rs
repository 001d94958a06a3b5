//! State machines run ahead of the actions in every phase

use super::{AsAny, HookContext, Scope};
use crate::error::{PawnError, Result};
use std::any::Any;
use std::fmt;

/// A borrowed state of any type, for untyped entry and comparison
#[derive(Clone, Copy)]
pub struct AnyState<'a> {
    value: &'a dyn Any,
    type_name: &'static str,
}

impl<'a> AnyState<'a> {
    pub fn new<T: Any>(value: &'a T) -> Self {
        Self {
            value,
            type_name: std::any::type_name::<T>(),
        }
    }

    pub fn downcast<T: Any>(&self) -> Option<&'a T> {
        self.value.downcast_ref::<T>()
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }
}

impl fmt::Debug for AnyState<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnyState")
            .field("type_name", &self.type_name)
            .finish_non_exhaustive()
    }
}

/// A component with pre-hooks for all four update phases
pub trait StateMachine: AsAny + fmt::Debug {
    fn name(&self) -> &str;

    /// Type name of the states this machine holds
    fn state_type_name(&self) -> &'static str;

    /// Enter a state given as any type. A state of the wrong type is a
    /// [`PawnError::StateTypeMismatch`].
    fn enter_any(&mut self, state: AnyState<'_>) -> Result<()>;

    /// Compare the current state against a state of any type
    fn is_in_any(&self, state: AnyState<'_>) -> Result<bool>;

    fn pre_update_properties(&mut self, _delta: f32, _ctx: &mut HookContext<'_>) {}
    fn pre_update_speed(&mut self, _delta: f32, _ctx: &mut HookContext<'_>) {}
    fn pre_update_movement(&mut self, _delta: f32, _ctx: &mut HookContext<'_>) {}
    fn pre_update_face_direction(&mut self, _delta: f32, _ctx: &mut HookContext<'_>) {}
}

/// Transition condition
pub type TransitionCondition = Box<dyn Fn(&Scope<'_>) -> bool>;

/// A guarded move to another state
pub struct StateTransition<T> {
    /// Source state (`None` = any state)
    pub from: Option<T>,
    /// Target state
    pub to: T,
    /// Condition function
    pub condition: TransitionCondition,
    /// Priority (higher = checked first)
    pub priority: i32,
}

impl<T> StateTransition<T> {
    pub fn new<F>(from: Option<T>, to: T, condition: F) -> Self
    where
        F: Fn(&Scope<'_>) -> bool + 'static,
    {
        Self {
            from,
            to,
            condition: Box::new(condition),
            priority: 0,
        }
    }

    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }
}

type EnterCallback<T> = Box<dyn FnMut(&T, &T)>;

/// State machine over one state type.
///
/// Transitions are checked once per sub-step, in the properties phase.
pub struct TypedStateMachine<T> {
    name: String,
    current: T,
    previous: Option<T>,
    transitions: Vec<StateTransition<T>>,
    pre_enter: Option<EnterCallback<T>>,
    post_enter: Option<EnterCallback<T>>,
}

/// A state machine over `bool`
pub type BoolStateMachine = TypedStateMachine<bool>;

/// A state machine over `i32`
pub type IntStateMachine = TypedStateMachine<i32>;

/// A state machine over `String`
pub type StringStateMachine = TypedStateMachine<String>;

impl<T> TypedStateMachine<T>
where
    T: Clone + PartialEq + fmt::Debug + 'static,
{
    pub fn new(name: impl Into<String>, initial: T) -> Self {
        Self {
            name: name.into(),
            current: initial,
            previous: None,
            transitions: Vec::new(),
            pre_enter: None,
            post_enter: None,
        }
    }

    pub fn current(&self) -> &T {
        &self.current
    }

    pub fn previous(&self) -> Option<&T> {
        self.previous.as_ref()
    }

    pub fn is_in(&self, state: &T) -> bool {
        self.current == *state
    }

    /// Enter a state. Entering the current state runs the callbacks again.
    pub fn enter(&mut self, state: T) {
        if let Some(callback) = self.pre_enter.as_mut() {
            callback(&self.current, &state);
        }

        log::trace!("State machine '{}': {:?} -> {:?}", self.name, self.current, state);
        let previous = std::mem::replace(&mut self.current, state);

        if let Some(callback) = self.post_enter.as_mut() {
            callback(&previous, &self.current);
        }
        self.previous = Some(previous);
    }

    /// Called with (current, next) before a state is entered
    pub fn on_pre_enter<F>(mut self, callback: F) -> Self
    where
        F: FnMut(&T, &T) + 'static,
    {
        self.pre_enter = Some(Box::new(callback));
        self
    }

    /// Called with (previous, current) after a state is entered
    pub fn on_post_enter<F>(mut self, callback: F) -> Self
    where
        F: FnMut(&T, &T) + 'static,
    {
        self.post_enter = Some(Box::new(callback));
        self
    }

    /// Add a transition from `from` to `to`
    pub fn with_transition<F>(self, from: T, to: T, condition: F) -> Self
    where
        F: Fn(&Scope<'_>) -> bool + 'static,
    {
        self.with(StateTransition::new(Some(from), to, condition))
    }

    /// Add a transition that can occur from any state
    pub fn with_global_transition<F>(self, to: T, condition: F) -> Self
    where
        F: Fn(&Scope<'_>) -> bool + 'static,
    {
        self.with(StateTransition::new(None, to, condition))
    }

    pub fn with(mut self, transition: StateTransition<T>) -> Self {
        self.transitions.push(transition);
        // Stable: equal priorities keep insertion order.
        self.transitions.sort_by(|a, b| b.priority.cmp(&a.priority));
        self
    }

    /// Enter the target of the first transition that applies. Transitions
    /// into the current state are skipped.
    pub fn update_transitions(&mut self, scope: &Scope<'_>) -> bool {
        let next = self
            .transitions
            .iter()
            .filter(|t| t.from.as_ref().map_or(true, |from| *from == self.current))
            .filter(|t| t.to != self.current)
            .find(|t| (t.condition)(scope))
            .map(|t| t.to.clone());

        match next {
            Some(state) => {
                self.enter(state);
                true
            }
            None => false,
        }
    }

    fn mismatch(&self, state: &AnyState<'_>) -> PawnError {
        log::error!(
            "The state machine '{}' does not accept states of type '{}'",
            self.name,
            state.type_name()
        );
        PawnError::StateTypeMismatch {
            machine: self.name.clone(),
            expected: std::any::type_name::<T>(),
            found: state.type_name(),
        }
    }
}

impl<T> StateMachine for TypedStateMachine<T>
where
    T: Clone + PartialEq + fmt::Debug + 'static,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn state_type_name(&self) -> &'static str {
        std::any::type_name::<T>()
    }

    fn enter_any(&mut self, state: AnyState<'_>) -> Result<()> {
        match state.downcast::<T>() {
            Some(value) => {
                self.enter(value.clone());
                Ok(())
            }
            None => Err(self.mismatch(&state)),
        }
    }

    fn is_in_any(&self, state: AnyState<'_>) -> Result<bool> {
        match state.downcast::<T>() {
            Some(value) => Ok(self.is_in(value)),
            None => Err(self.mismatch(&state)),
        }
    }

    fn pre_update_properties(&mut self, _delta: f32, ctx: &mut HookContext<'_>) {
        self.update_transitions(&ctx.scope());
    }
}

impl<T: fmt::Debug> fmt::Debug for TypedStateMachine<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypedStateMachine")
            .field("name", &self.name)
            .field("current", &self.current)
            .field("previous", &self.previous)
            .field("transitions", &self.transitions.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::ComponentTree;
    use crate::pawn::PawnState;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Stance {
        Standing,
        Crouching,
        Jumping,
    }

    #[test]
    fn test_enter_tracks_previous() {
        let mut machine = TypedStateMachine::new("Stance", Stance::Standing);
        assert_eq!(machine.previous(), None);

        machine.enter(Stance::Crouching);
        assert!(machine.is_in(&Stance::Crouching));
        assert_eq!(machine.previous(), Some(&Stance::Standing));
    }

    #[test]
    fn test_enter_callbacks() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let (pre, post) = (log.clone(), log.clone());

        let mut machine = BoolStateMachine::new("Grounded", false)
            .on_pre_enter(move |from, to| pre.borrow_mut().push(("pre", *from, *to)))
            .on_post_enter(move |from, to| post.borrow_mut().push(("post", *from, *to)));
        machine.enter(true);

        assert_eq!(*log.borrow(), vec![("pre", false, true), ("post", false, true)]);
    }

    #[test]
    fn test_untyped_access() {
        let mut machine = IntStateMachine::new("Combo", 0);

        machine.enter_any(AnyState::new(&3)).unwrap();
        assert_eq!(*machine.current(), 3);
        assert!(machine.is_in_any(AnyState::new(&3)).unwrap());
        assert!(!machine.is_in_any(AnyState::new(&4)).unwrap());
    }

    #[test]
    fn test_wrong_state_type_is_an_error() {
        let mut machine = StringStateMachine::new("Mode", "idle".to_string());

        let err = machine.enter_any(AnyState::new(&5u8)).unwrap_err();
        match err {
            PawnError::StateTypeMismatch { machine: name, found, .. } => {
                assert_eq!(name, "Mode");
                assert_eq!(found, "u8");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(machine.is_in_any(AnyState::new(&true)).is_err());
        assert_eq!(machine.current(), "idle");
    }

    #[test]
    fn test_transitions_by_priority() {
        let tree = ComponentTree::new("Hero");
        let state = PawnState::default();
        let scope = Scope::new(&tree, &state);

        let mut machine = TypedStateMachine::new("Stance", Stance::Standing)
            .with_transition(Stance::Standing, Stance::Crouching, |_| true)
            .with(StateTransition::new(None, Stance::Jumping, |_| true).with_priority(5));

        assert!(machine.update_transitions(&scope));
        assert_eq!(*machine.current(), Stance::Jumping);

        // Global transition into the current state is skipped; nothing
        // else leaves Jumping.
        assert!(!machine.update_transitions(&scope));
        assert_eq!(*machine.current(), Stance::Jumping);
    }

    #[test]
    fn test_transition_guard_reads_scope() {
        let tree = ComponentTree::new("Hero");
        let state = PawnState::default();
        let scope = Scope::new(&tree, &state);

        let mut machine = BoolStateMachine::new("Grounded", true)
            .with_global_transition(false, |scope| scope.surroundings().below_adjacent().is_air());

        assert!(machine.update_transitions(&scope));
        assert!(!*machine.current());
    }
}
