//! Minimal arcade physics: velocity integration, world-bound clamping and
//! horizontal bouncing, plus the bounding-box test used for collisions.

use crate::entities::{Entity, EntityGroup};

/// The rectangular play area. The origin is the top-left corner and y grows downward.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldBounds {
    pub width: f32,
    pub height: f32,
}

impl WorldBounds {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn top(&self) -> f32 {
        0.0
    }
}

/// Axis-aligned bounding box in world units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min_x: f32,
    pub min_y: f32,
    pub max_x: f32,
    pub max_y: f32,
}

impl Aabb {
    /// Touching edges count as an overlap on both axes.
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min_x <= other.max_x
            && self.max_x >= other.min_x
            && self.min_y <= other.max_y
            && self.max_y >= other.min_y
    }
}

/// Advances one live entity by `dt` seconds.
pub fn step_entity(entity: &mut Entity, bounds: &WorldBounds, dt: f32) {
    if !entity.alive {
        return;
    }

    entity.x += entity.vx * dt;
    entity.y += entity.vy * dt;

    if !entity.collide_world_bounds {
        return;
    }

    let half_w = entity.width / 2.0;
    let half_h = entity.height / 2.0;
    // A body wider than the world is pinned to its left edge instead of panicking in clamp
    let max_x = (bounds.width - half_w).max(half_w);
    let max_y = (bounds.height - half_h).max(half_h);

    let hit_left = entity.x <= half_w;
    let hit_right = entity.x >= max_x;
    entity.x = entity.x.clamp(half_w, max_x);
    entity.y = entity.y.clamp(half_h, max_y);

    if entity.bounce_x {
        if hit_left && entity.vx < 0.0 {
            entity.vx = -entity.vx;
        } else if hit_right && entity.vx > 0.0 {
            entity.vx = -entity.vx;
        }
    }
}

pub fn step_group<K>(group: &mut EntityGroup<K>, bounds: &WorldBounds, dt: f32) {
    for entity in group.iter_mut() {
        step_entity(entity, bounds, dt);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    fn bouncer(x: f32, vx: f32) -> Entity {
        let mut entity = Entity::new(x, 50.0, 20.0, 10.0).with_velocity(vx, 0.0);
        entity.collide_world_bounds = true;
        entity.bounce_x = true;
        entity
    }

    #[test]
    fn test_step_integrates_velocity() {
        let mut entity = Entity::new(100.0, 100.0, 10.0, 10.0).with_velocity(60.0, -120.0);
        step_entity(&mut entity, &WorldBounds::new(800.0, 600.0), DT);
        assert!((entity.x - 101.0).abs() < 1e-4);
        assert!((entity.y - 98.0).abs() < 1e-4);
    }

    #[test]
    fn test_unbounded_entity_can_leave_world() {
        let mut entity = Entity::new(100.0, 2.0, 10.0, 10.0).with_velocity(0.0, -600.0);
        step_entity(&mut entity, &WorldBounds::new(800.0, 600.0), DT);
        assert!(entity.y < 0.0);
    }

    #[test]
    fn test_dead_entity_does_not_move() {
        let mut entity = Entity::new(100.0, 100.0, 10.0, 10.0).with_velocity(60.0, 60.0);
        entity.alive = false;
        step_entity(&mut entity, &WorldBounds::new(800.0, 600.0), DT);
        assert_eq!(entity.x, 100.0);
        assert_eq!(entity.y, 100.0);
    }

    #[test]
    fn test_clamped_to_left_wall() {
        let mut entity = Entity::new(12.0, 50.0, 20.0, 10.0).with_velocity(-600.0, 0.0);
        entity.collide_world_bounds = true;
        step_entity(&mut entity, &WorldBounds::new(800.0, 600.0), DT);
        assert_eq!(entity.left(), 0.0);
        // No bounce without bounce_x
        assert_eq!(entity.vx, -600.0);
    }

    #[test]
    fn test_bounce_reverses_on_left_wall() {
        let mut entity = bouncer(12.0, -250.0);
        step_entity(&mut entity, &WorldBounds::new(800.0, 600.0), DT);
        assert_eq!(entity.left(), 0.0);
        assert_eq!(entity.vx, 250.0);
    }

    #[test]
    fn test_bounce_reverses_on_right_wall() {
        let mut entity = bouncer(788.0, 250.0);
        step_entity(&mut entity, &WorldBounds::new(800.0, 600.0), DT);
        assert_eq!(entity.right(), 800.0);
        assert_eq!(entity.vx, -250.0);
    }

    #[test]
    fn test_no_bounce_away_from_wall() {
        let mut entity = bouncer(400.0, -250.0);
        step_entity(&mut entity, &WorldBounds::new(800.0, 600.0), DT);
        assert_eq!(entity.vx, -250.0);
    }

    #[test]
    fn test_aabb_intersects_is_symmetric_on_touch() {
        let a = Aabb { min_x: 0.0, min_y: 0.0, max_x: 10.0, max_y: 10.0 };
        let b = Aabb { min_x: 0.0, min_y: 10.0, max_x: 10.0, max_y: 20.0 };
        assert!(a.intersects(&b));
        assert!(b.intersects(&a));

        let c = Aabb { min_x: 10.1, min_y: 0.0, max_x: 20.0, max_y: 10.0 };
        assert!(!a.intersects(&c));
    }

    // Property-based tests
    #[cfg(test)]
    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn test_bouncer_never_leaves_world(
                start_x in 10.0f32..790.0,
                speed in 1.0f32..2000.0,
                leftward in prop::bool::ANY,
                frames in 1usize..600
            ) {
                let bounds = WorldBounds::new(800.0, 600.0);
                let vx = if leftward { -speed } else { speed };
                let mut entity = bouncer(start_x, vx);

                for _ in 0..frames {
                    let before = entity.vx;
                    step_entity(&mut entity, &bounds, DT);

                    prop_assert!(entity.left() >= 0.0);
                    prop_assert!(entity.right() <= bounds.width);
                    prop_assert_eq!(entity.vx.abs(), speed);

                    // Sign flips only when the body sits on a wall
                    if entity.vx.signum() != before.signum() {
                        let on_wall = entity.left() == 0.0 || entity.right() == bounds.width;
                        prop_assert!(on_wall);
                    }
                }
            }
        }
    }
}
