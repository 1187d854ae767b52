mod enemy;
mod entity;
mod group;
mod player;
mod projectile;

// Re-export all public types
pub use enemy::{Enemy, EnemyRef, EnemyRow};
pub use entity::Entity;
pub use group::{EntityGroup, EntityRef, Visit};
pub use player::Player;
pub use projectile::{Laser, LaserRef, fire_laser, is_off_screen};

/// Texture key drawn for every member of a group of this kind
pub trait EntityKind {
    const TEXTURE: &'static str;
}

pub const PLAYER_TEXTURE: &str = "red";
pub const LASER_TEXTURE: &str = "redLaser";
pub const ENEMY_TEXTURE: &str = "blue";
