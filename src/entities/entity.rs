use crate::physics::Aabb;

/// A positioned, velocity-bearing body. Position is the centre of the body.
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub width: f32,
    pub height: f32,
    pub alive: bool,
    /// Clamp the body inside the world after each physics step
    pub collide_world_bounds: bool,
    /// Reflect horizontal velocity when the body touches a side wall
    pub bounce_x: bool,
}

impl Entity {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            vx: 0.0,
            vy: 0.0,
            width,
            height,
            alive: true,
            collide_world_bounds: false,
            bounce_x: false,
        }
    }

    pub fn with_velocity(mut self, vx: f32, vy: f32) -> Self {
        self.vx = vx;
        self.vy = vy;
        self
    }

    pub fn set_velocity(&mut self, vx: f32, vy: f32) {
        self.vx = vx;
        self.vy = vy;
    }

    pub fn set_velocity_x(&mut self, vx: f32) {
        self.vx = vx;
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn left(&self) -> f32 {
        self.x - self.width / 2.0
    }

    pub fn right(&self) -> f32 {
        self.x + self.width / 2.0
    }

    pub fn top(&self) -> f32 {
        self.y - self.height / 2.0
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height / 2.0
    }

    pub fn bounds(&self) -> Aabb {
        Aabb {
            min_x: self.left(),
            min_y: self.top(),
            max_x: self.right(),
            max_y: self.bottom(),
        }
    }

    /// Dead bodies never overlap anything.
    pub fn overlaps(&self, other: &Entity) -> bool {
        self.alive && other.alive && self.bounds().intersects(&other.bounds())
    }
}
