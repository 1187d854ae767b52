use super::{ENEMY_TEXTURE, EntityKind};
use super::entity::Entity;
use super::group::{EntityGroup, EntityRef};

/// Marker for the enemy group
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Enemy;

impl EntityKind for Enemy {
    const TEXTURE: &'static str = ENEMY_TEXTURE;
}

pub type EnemyRef = EntityRef<Enemy>;

/// Layout of the enemy wave spawned at session start: `count` ships starting
/// at `(start_x, start_y)`, each one `step_x` further right (and `step_y`
/// further down) than the previous.
#[derive(Debug, Clone, PartialEq)]
pub struct EnemyRow {
    pub count: usize,
    pub start_x: f32,
    pub start_y: f32,
    pub step_x: f32,
    pub step_y: f32,
    /// Initial horizontal velocity shared by every ship
    pub velocity_x: f32,
}

impl EnemyRow {
    /// Spawn positions in row order
    pub fn positions(&self) -> Vec<(f32, f32)> {
        (0..self.count)
            .map(|i| {
                let i = i as f32;
                (self.start_x + self.step_x * i, self.start_y + self.step_y * i)
            })
            .collect()
    }

    /// Spawns the row into `group`. Every ship clamps to the world and bounces off the side walls.
    pub fn spawn_into(
        &self,
        group: &mut EntityGroup<Enemy>,
        width: f32,
        height: f32,
    ) -> Vec<EnemyRef> {
        self.positions()
            .into_iter()
            .filter_map(|(x, y)| {
                let mut ship = Entity::new(x, y, width, height).with_velocity(self.velocity_x, 0.0);
                ship.collide_world_bounds = true;
                ship.bounce_x = true;
                group.insert(ship)
            })
            .collect()
    }
}
