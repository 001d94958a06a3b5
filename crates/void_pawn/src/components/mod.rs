//! Pawn components
//!
//! A pawn is configured as a tree of named nodes. Plain groups organise the
//! tree; component nodes carry exactly one [`Role`]:
//!
//! - **Condition**: gates the component it is attached to
//! - **Probe**: a [`Raycaster`] the pawn senses its surroundings with
//! - **Trigger**: reacts to events before action properties update
//! - **StateMachine**: pre-hooks for every update phase
//! - **Properties**: tuning values an action selects from its children
//! - **Action**: produces speed, movement and facing
//! - **Modifier**: post-hooks for every update phase
//!
//! Components reference each other by [`ComponentId`], never by pointer.

mod action;
mod condition;
mod list;
mod modifier;
mod pipeline;
mod properties;
mod scope;
mod state_machine;
mod tree;
mod trigger;
mod walk;

pub use action::{Action, ActionMotion, Axis, AxisAction, DirectionalAction, PlanarAction};
pub use condition::{
    AndCondition, Condition, ConditionReference, NotCondition, OrCondition, PredicateCondition,
    ToggleCondition, XorCondition,
};
pub use list::ComponentList;
pub use modifier::{HookModifier, Modifier};
pub use pipeline::{ComponentPipeline, DiscoveryOptions};
pub use properties::{ActionProperties, PropertySet};
pub use scope::{HookContext, Scope};
pub use state_machine::{
    AnyState, BoolStateMachine, IntStateMachine, StateMachine, StateTransition,
    StringStateMachine, TypedStateMachine,
};
pub use tree::{ComponentId, ComponentTree, NodeKind};
pub use trigger::{EventTrigger, Trigger};
pub use walk::{WalkAction, WalkProperties};

use crate::raycast::Raycaster;
use std::any::Any;
use std::fmt;

/// Upcast to [`Any`] for typed component access
pub trait AsAny: Any {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
    fn type_name(&self) -> &'static str;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn type_name(&self) -> &'static str {
        std::any::type_name::<T>()
    }
}

/// Role discriminant, used to sort discovered components into lists
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoleTag {
    Condition,
    Probe,
    Trigger,
    StateMachine,
    Properties,
    Action,
    Modifier,
}

impl RoleTag {
    pub const ALL: [RoleTag; 7] = [
        RoleTag::Condition,
        RoleTag::Probe,
        RoleTag::Trigger,
        RoleTag::StateMachine,
        RoleTag::Properties,
        RoleTag::Action,
        RoleTag::Modifier,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            RoleTag::Condition => "condition",
            RoleTag::Probe => "probe",
            RoleTag::Trigger => "trigger",
            RoleTag::StateMachine => "state machine",
            RoleTag::Properties => "action properties",
            RoleTag::Action => "action",
            RoleTag::Modifier => "modifier",
        }
    }
}

impl fmt::Display for RoleTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The behaviour carried by a component node
pub enum Role {
    Condition(Box<dyn Condition>),
    Probe(Box<dyn Raycaster>),
    Trigger(Box<dyn Trigger>),
    StateMachine(Box<dyn StateMachine>),
    Properties(Box<dyn ActionProperties>),
    Action(Box<dyn Action>),
    Modifier(Box<dyn Modifier>),
}

impl Role {
    pub fn condition(condition: impl Condition) -> Self {
        Role::Condition(Box::new(condition))
    }

    pub fn probe(probe: impl Raycaster) -> Self {
        Role::Probe(Box::new(probe))
    }

    pub fn trigger(trigger: impl Trigger) -> Self {
        Role::Trigger(Box::new(trigger))
    }

    pub fn state_machine(machine: impl StateMachine) -> Self {
        Role::StateMachine(Box::new(machine))
    }

    pub fn properties(properties: impl ActionProperties) -> Self {
        Role::Properties(Box::new(properties))
    }

    pub fn action(action: impl Action) -> Self {
        Role::Action(Box::new(action))
    }

    pub fn modifier(modifier: impl Modifier) -> Self {
        Role::Modifier(Box::new(modifier))
    }

    pub fn tag(&self) -> RoleTag {
        match self {
            Role::Condition(_) => RoleTag::Condition,
            Role::Probe(_) => RoleTag::Probe,
            Role::Trigger(_) => RoleTag::Trigger,
            Role::StateMachine(_) => RoleTag::StateMachine,
            Role::Properties(_) => RoleTag::Properties,
            Role::Action(_) => RoleTag::Action,
            Role::Modifier(_) => RoleTag::Modifier,
        }
    }

    /// The concrete component behind the role
    pub fn as_any(&self) -> &dyn Any {
        match self {
            Role::Condition(c) => (**c).as_any(),
            Role::Probe(p) => (**p).as_any(),
            Role::Trigger(t) => (**t).as_any(),
            Role::StateMachine(s) => (**s).as_any(),
            Role::Properties(p) => (**p).as_any(),
            Role::Action(a) => (**a).as_any(),
            Role::Modifier(m) => (**m).as_any(),
        }
    }

    pub fn as_any_mut(&mut self) -> &mut dyn Any {
        match self {
            Role::Condition(c) => (**c).as_any_mut(),
            Role::Probe(p) => (**p).as_any_mut(),
            Role::Trigger(t) => (**t).as_any_mut(),
            Role::StateMachine(s) => (**s).as_any_mut(),
            Role::Properties(p) => (**p).as_any_mut(),
            Role::Action(a) => (**a).as_any_mut(),
            Role::Modifier(m) => (**m).as_any_mut(),
        }
    }

    /// Type name of the concrete component
    pub fn type_name(&self) -> &'static str {
        match self {
            Role::Condition(c) => (**c).type_name(),
            Role::Probe(p) => (**p).type_name(),
            Role::Trigger(t) => (**t).type_name(),
            Role::StateMachine(s) => (**s).type_name(),
            Role::Properties(p) => (**p).type_name(),
            Role::Action(a) => (**a).type_name(),
            Role::Modifier(m) => (**m).type_name(),
        }
    }
}

impl fmt::Debug for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Condition(c) => f.debug_tuple("Condition").field(c).finish(),
            Role::Probe(p) => f.debug_tuple("Probe").field(p).finish(),
            Role::Trigger(t) => f.debug_tuple("Trigger").field(t).finish(),
            Role::StateMachine(s) => f.debug_tuple("StateMachine").field(s).finish(),
            Role::Properties(p) => f.debug_tuple("Properties").field(p).finish(),
            Role::Action(a) => f.debug_tuple("Action").field(a).finish(),
            Role::Modifier(m) => f.debug_tuple("Modifier").field(m).finish(),
        }
    }
}
