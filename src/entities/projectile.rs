use super::{EntityKind, LASER_TEXTURE};
use super::entity::Entity;
use super::group::{EntityGroup, EntityRef};
use crate::physics::WorldBounds;

/// Marker for the player's laser group
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Laser;

impl EntityKind for Laser {
    const TEXTURE: &'static str = LASER_TEXTURE;
}

pub type LaserRef = EntityRef<Laser>;

/// Spawns a laser centred on `origin` travelling straight up at `speed`.
/// Returns `None` if the group is already holding its maximum.
pub fn fire_laser(
    group: &mut EntityGroup<Laser>,
    origin: (f32, f32),
    speed: f32,
    width: f32,
    height: f32,
) -> Option<LaserRef> {
    let (x, y) = origin;
    group.spawn(x, y, 0.0, -speed.abs(), width, height)
}

/// A laser is done once its top edge reaches the top of the world
pub fn is_off_screen(laser: &Entity, bounds: &WorldBounds) -> bool {
    laser.top() <= bounds.top()
}
