// Library exports for testing
pub use config::GameConfig;
pub use engine::{FixedTimestep, FrameReport, Scene};
pub use entities::{Enemy, EnemyRef, Entity, EntityGroup, EntityRef, Laser, LaserRef, Player};
pub use game::{GameLoopController, GamePhase, GameState};
pub use input::{InputSampler, InputState, RawKeys};

pub mod app;
pub mod assets;
#[cfg(feature = "audio")]
pub mod audio;
pub mod collision;
pub mod config;
pub mod engine;
pub mod entities;
pub mod game;
pub mod input;
pub mod physics;
pub mod renderer;
