//! Horizontal walking with acceleration, turning and wall stops

use super::{Action, ActionMotion, ComponentId, HookContext};
use crate::facing::FaceDirection;
use crate::surface::{ClassifiedSurface, SurfaceType};
use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Walk tuning, used as `PropertySet<WalkProperties>`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WalkProperties {
    /// Speed on the first sub-step of a walk
    pub start_speed: f32,
    pub top_speed: f32,
    /// Seconds from start speed to top speed
    pub acceleration_time: f32,
    /// Seconds from top speed to standing still
    pub deceleration_time: f32,
    /// Seconds from top speed one way to top speed the other way
    pub turn_time: f32,
}

impl Default for WalkProperties {
    fn default() -> Self {
        Self {
            start_speed: 10.0,
            top_speed: 20.0,
            acceleration_time: 0.05,
            deceleration_time: 0.2,
            turn_time: 0.1,
        }
    }
}

/// Rate that takes `from` to `to` in `time` seconds; instant for `time <= 0`
fn rate(from: f32, to: f32, time: f32) -> f32 {
    if time > 0.0 {
        ((to - from) / time).abs()
    } else {
        f32::INFINITY
    }
}

/// Move `value` towards `target` by at most `step`
fn approach(value: f32, target: f32, step: f32) -> f32 {
    if value < target {
        (value + step).min(target)
    } else {
        (value - step).max(target)
    }
}

/// Surfaces a walk cannot push into
fn blocks_walking(surface: &ClassifiedSurface) -> bool {
    surface.is_wall()
        || matches!(
            surface.surface_type(),
            SurfaceType::SteepGround | SurfaceType::SteepCeiling
        )
}

/// Host-driven horizontal walk. Descends slopes.
#[derive(Debug, Clone, Default)]
pub struct WalkAction {
    walk_factor: f32,
    speed: f32,
    motion: ActionMotion,
}

impl WalkAction {
    pub fn new() -> Self {
        Self::default()
    }

    /// Walk input in [-1, 1]: negative walks left. Inputs are normalized by
    /// clamping, so a stick overshoot never exceeds the top speed.
    pub fn walk(&mut self, factor: f32) {
        self.walk_factor = factor.clamp(-1.0, 1.0);
    }

    pub fn walk_factor(&self) -> f32 {
        self.walk_factor
    }

    fn next_speed(&self, props: &WalkProperties, delta: f32) -> f32 {
        let current = self.speed;
        let target = self.walk_factor * props.top_speed;

        if current == 0.0 && target == 0.0 {
            0.0
        } else if current * target < 0.0 {
            let step = rate(props.top_speed, -props.top_speed, props.turn_time) * delta;
            approach(current, target, step)
        } else if current == 0.0 {
            self.walk_factor * props.start_speed
        } else if current.abs() < target.abs() {
            let step = rate(props.start_speed, props.top_speed, props.acceleration_time) * delta;
            approach(current, target, step)
        } else if current.abs() > target.abs() {
            let step = rate(props.top_speed, 0.0, props.deceleration_time) * delta;
            approach(current, 0.0, step)
        } else {
            current
        }
    }
}

impl Action for WalkAction {
    fn descends_slopes(&self) -> bool {
        true
    }

    fn force_stop(&mut self) {
        self.motion.stop();
        self.speed = 0.0;
        self.walk_factor = 0.0;
    }

    fn update_properties(&mut self, _delta: f32, ctx: &mut HookContext<'_>) {
        self.motion.select_properties(ctx);
    }

    fn update_speed(&mut self, delta: f32, ctx: &mut HookContext<'_>) {
        let props = self
            .motion
            .properties
            .and_then(|id| ctx.property_values::<WalkProperties>(id))
            .copied();

        self.speed = match props {
            Some(props) => self.next_speed(&props, delta),
            None => 0.0,
        };

        let surroundings = ctx.surroundings();
        if (self.speed < 0.0 && blocks_walking(&surroundings.left_adjacent()))
            || (self.speed > 0.0 && blocks_walking(&surroundings.right_adjacent()))
        {
            self.speed = 0.0;
        }

        self.motion.set_speed(Vec2::new(self.speed, 0.0));
    }

    fn update_movement(&mut self, delta: f32, _ctx: &mut HookContext<'_>) {
        self.motion.integrate(delta);
    }

    fn update_face_direction(&mut self, _delta: f32, _ctx: &mut HookContext<'_>) {
        self.motion.face_along_movement();
    }

    fn properties(&self) -> Option<ComponentId> {
        self.motion.properties
    }

    fn speed(&self) -> Vec2 {
        self.motion.speed
    }

    fn movement(&self) -> Vec2 {
        self.motion.movement
    }

    fn face_direction(&self) -> FaceDirection {
        self.motion.face
    }

    /// Walking means the host asks for it, even against a wall
    fn is_moving(&self) -> bool {
        self.walk_factor != 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adjacency::{NearestSurface, Surroundings};
    use crate::components::{ComponentTree, PropertySet, Role};
    use crate::config::AngleThresholds;
    use crate::pawn::PawnState;
    use approx::assert_relative_eq;

    const DT: f32 = 0.01;

    fn fixture() -> (ComponentTree, ComponentId) {
        let mut tree = ComponentTree::new("Hero");
        let root = tree.root();
        let walk = tree.add_group(root, "Walk").unwrap();
        tree.add_component(walk, "Normal", Role::properties(PropertySet::new(WalkProperties::default())))
            .unwrap();
        (tree, walk)
    }

    fn step(action: &mut WalkAction, tree: &mut ComponentTree, id: ComponentId, state: &PawnState) {
        let mut ctx = HookContext::new(tree, state, id);
        action.update_properties(DT, &mut ctx);
        action.update_speed(DT, &mut ctx);
        action.update_movement(DT, &mut ctx);
        action.update_face_direction(DT, &mut ctx);
    }

    #[test]
    fn test_starts_then_accelerates() {
        let (mut tree, id) = fixture();
        let state = PawnState::default();
        let mut walk = WalkAction::new();
        walk.walk(1.0);

        step(&mut walk, &mut tree, id, &state);
        assert_relative_eq!(walk.speed().x, 10.0);

        // (20 - 10) / 0.05 = 200 per second
        step(&mut walk, &mut tree, id, &state);
        assert_relative_eq!(walk.speed().x, 12.0, epsilon = 1e-4);

        for _ in 0..10 {
            step(&mut walk, &mut tree, id, &state);
        }
        assert_relative_eq!(walk.speed().x, 20.0);
        assert_relative_eq!(walk.movement().x, 0.2, epsilon = 1e-6);
    }

    #[test]
    fn test_decelerates_and_turns() {
        let (mut tree, id) = fixture();
        let state = PawnState::default();
        let mut walk = WalkAction::new();
        walk.walk(1.0);
        for _ in 0..10 {
            step(&mut walk, &mut tree, id, &state);
        }

        walk.walk(0.0);
        step(&mut walk, &mut tree, id, &state);
        // 20 / 0.2 = 100 per second
        assert_relative_eq!(walk.speed().x, 19.0, epsilon = 1e-4);
        assert!(!walk.is_moving());

        walk.walk(-1.0);
        step(&mut walk, &mut tree, id, &state);
        // 40 / 0.1 = 400 per second
        assert_relative_eq!(walk.speed().x, 15.0, epsilon = 1e-4);
        assert!(walk.is_moving());
    }

    #[test]
    fn test_stops_at_wall() {
        let (mut tree, id) = fixture();
        let wall = NearestSurface::new(
            ClassifiedSurface::classify(true, Vec2::NEG_X, Vec2::Y, &AngleThresholds::default()),
            0.0,
            true,
        );
        let state = PawnState::default().with_surroundings(Surroundings::new(
            NearestSurface::NOTHING,
            wall,
            NearestSurface::NOTHING,
            NearestSurface::NOTHING,
        ));

        let mut walk = WalkAction::new();
        walk.walk(1.0);
        step(&mut walk, &mut tree, id, &state);

        assert_eq!(walk.speed(), Vec2::ZERO);
        assert!(walk.is_moving());

        walk.walk(-1.0);
        step(&mut walk, &mut tree, id, &state);
        assert_relative_eq!(walk.speed().x, -10.0);
    }

    #[test]
    fn test_force_stop_clears_input() {
        let (mut tree, id) = fixture();
        let state = PawnState::default();
        let mut walk = WalkAction::new();
        walk.walk(2.0);
        assert_eq!(walk.walk_factor(), 1.0);
        step(&mut walk, &mut tree, id, &state);

        walk.force_stop();
        assert_eq!(walk.walk_factor(), 0.0);
        assert_eq!(walk.speed(), Vec2::ZERO);
        assert!(!walk.is_moving());
    }

    #[test]
    fn test_walk_input_is_normalized() {
        let mut walk = WalkAction::new();
        walk.walk(-3.0);
        assert_eq!(walk.walk_factor(), -1.0);
        walk.walk(0.5);
        assert_eq!(walk.walk_factor(), 0.5);
    }

    #[test]
    fn test_helpers() {
        assert_eq!(approach(1.0, 5.0, 10.0), 5.0);
        assert_eq!(approach(1.0, -5.0, 2.0), -1.0);
        assert_eq!(rate(10.0, 20.0, 0.0), f32::INFINITY);
    }
}
