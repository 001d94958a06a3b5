//! Modifiers adjust actions after each update phase

use super::{AsAny, HookContext};
use std::fmt;

/// A component with post-hooks for all four update phases, run in list
/// order once every action has finished the phase
pub trait Modifier: AsAny + fmt::Debug {
    fn post_update_properties(&mut self, _delta: f32, _ctx: &mut HookContext<'_>) {}
    fn post_update_speed(&mut self, _delta: f32, _ctx: &mut HookContext<'_>) {}
    fn post_update_movement(&mut self, _delta: f32, _ctx: &mut HookContext<'_>) {}
    fn post_update_face_direction(&mut self, _delta: f32, _ctx: &mut HookContext<'_>) {}
}

/// Post-hook callback
pub type PhaseHook = Box<dyn FnMut(f32, &mut HookContext<'_>)>;

/// A modifier assembled from closures, one per phase
#[derive(Default)]
pub struct HookModifier {
    properties: Option<PhaseHook>,
    speed: Option<PhaseHook>,
    movement: Option<PhaseHook>,
    face_direction: Option<PhaseHook>,
}

impl HookModifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_properties<F>(mut self, hook: F) -> Self
    where
        F: FnMut(f32, &mut HookContext<'_>) + 'static,
    {
        self.properties = Some(Box::new(hook));
        self
    }

    pub fn on_speed<F>(mut self, hook: F) -> Self
    where
        F: FnMut(f32, &mut HookContext<'_>) + 'static,
    {
        self.speed = Some(Box::new(hook));
        self
    }

    pub fn on_movement<F>(mut self, hook: F) -> Self
    where
        F: FnMut(f32, &mut HookContext<'_>) + 'static,
    {
        self.movement = Some(Box::new(hook));
        self
    }

    pub fn on_face_direction<F>(mut self, hook: F) -> Self
    where
        F: FnMut(f32, &mut HookContext<'_>) + 'static,
    {
        self.face_direction = Some(Box::new(hook));
        self
    }
}

impl Modifier for HookModifier {
    fn post_update_properties(&mut self, delta: f32, ctx: &mut HookContext<'_>) {
        if let Some(hook) = self.properties.as_mut() {
            hook(delta, ctx);
        }
    }

    fn post_update_speed(&mut self, delta: f32, ctx: &mut HookContext<'_>) {
        if let Some(hook) = self.speed.as_mut() {
            hook(delta, ctx);
        }
    }

    fn post_update_movement(&mut self, delta: f32, ctx: &mut HookContext<'_>) {
        if let Some(hook) = self.movement.as_mut() {
            hook(delta, ctx);
        }
    }

    fn post_update_face_direction(&mut self, delta: f32, ctx: &mut HookContext<'_>) {
        if let Some(hook) = self.face_direction.as_mut() {
            hook(delta, ctx);
        }
    }
}

impl fmt::Debug for HookModifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HookModifier")
            .field("properties", &self.properties.is_some())
            .field("speed", &self.speed.is_some())
            .field("movement", &self.movement.is_some())
            .field("face_direction", &self.face_direction.is_some())
            .finish()
    }
}
