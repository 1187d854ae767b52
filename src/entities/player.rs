use super::entity::Entity;

/// The player's ship. Lives for the whole session and is clamped to the world.
#[derive(Debug, Clone)]
pub struct Player {
    pub body: Entity,
    /// Horizontal speed magnitude in world units per second
    pub speed: f32,
}

impl Player {
    pub fn new(x: f32, y: f32, width: f32, height: f32, speed: f32) -> Self {
        let mut body = Entity::new(x, y, width, height);
        body.collide_world_bounds = true;
        Self { body, speed }
    }

    pub fn stop(&mut self) {
        self.body.set_velocity_x(0.0);
    }

    pub fn move_left(&mut self) {
        self.body.set_velocity_x(-self.speed);
    }

    pub fn move_right(&mut self) {
        self.body.set_velocity_x(self.speed);
    }

    /// Lasers leave from the horizontal centre of the ship's top edge
    pub fn fire_origin(&self) -> (f32, f32) {
        (self.body.x, self.body.top())
    }
}
