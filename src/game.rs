use crate::assets::AssetCatalog;
use crate::collision;
use crate::config::GameConfig;
use crate::engine::{FrameReport, Scene};
use crate::entities::{
    Enemy, EnemyRow, EntityGroup, EntityKind, Laser, PLAYER_TEXTURE, Player, Visit, fire_laser,
    is_off_screen,
};
use crate::input::InputState;
use crate::physics::{self, WorldBounds};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    Playing,
    /// Terminal: never left once entered
    Won,
}

/// Everything one round of the game owns. Built by [`GameState::new_game`]
/// and mutated only by [`GameLoopController`].
#[derive(Debug, Clone)]
pub struct GameState {
    pub phase: GamePhase,
    pub player: Player,
    pub enemies: EntityGroup<Enemy>,
    pub lasers: EntityGroup<Laser>,
    pub bounds: WorldBounds,
    pub win_text_visible: bool,
    pub frame_count: u64,
    /// Body size given to every new laser
    pub laser_size: (f32, f32),
}

impl GameState {
    pub fn new_game(config: &GameConfig, assets: &AssetCatalog) -> Self {
        let bounds = WorldBounds::new(config.world.width, config.world.height);

        let (player_x, player_y) = config.player_start();
        let (player_w, player_h) = assets.size_of(PLAYER_TEXTURE);
        let player = Player::new(player_x, player_y, player_w, player_h, config.player.speed);

        let row = EnemyRow {
            count: config.enemies.count,
            start_x: config.enemies.start_x,
            start_y: config.enemies.start_y,
            step_x: config.enemy_step_x(),
            step_y: config.enemies.step_y,
            velocity_x: -config.enemies.speed.abs(),
        };
        let (enemy_w, enemy_h) = assets.size_of(Enemy::TEXTURE);
        let mut enemies = EntityGroup::with_capacity(config.enemies.count);
        row.spawn_into(&mut enemies, enemy_w, enemy_h);

        Self {
            phase: GamePhase::Playing,
            player,
            enemies,
            lasers: EntityGroup::with_capacity(config.laser.capacity),
            bounds,
            win_text_visible: false,
            frame_count: 0,
            laser_size: assets.size_of(Laser::TEXTURE),
        }
    }

    pub fn is_won(&self) -> bool {
        self.phase == GamePhase::Won
    }
}

/// Runs the per-frame rules of the game on a [`GameState`].
pub struct GameLoopController {
    config: GameConfig,
    state: GameState,
}

impl GameLoopController {
    /// Controller with a fresh round laid out using the built-in sprite sizes.
    /// [`Scene::initialize`] rebuilds it with the loaded ones.
    pub fn new(config: GameConfig) -> Self {
        let state = GameState::new_game(&config, &AssetCatalog::builtin());
        Self { config, state }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    /// Returns `true` on the frame the round is won
    fn check_win(&mut self) -> bool {
        if self.state.phase == GamePhase::Won || self.state.enemies.live_count() > 0 {
            return false;
        }

        self.state.phase = GamePhase::Won;
        self.state.win_text_visible = true;
        tracing::info!(frame = self.state.frame_count, "all enemies destroyed");
        true
    }

    fn steer_player(&mut self, input: &InputState) {
        let player = &mut self.state.player;
        player.stop();
        // Left wins when both are held
        if input.move_left {
            player.move_left();
        } else if input.move_right {
            player.move_right();
        }
    }

    fn try_fire(&mut self) -> bool {
        if self.state.lasers.live_count() >= self.config.laser.capacity {
            tracing::debug!(
                live = self.state.lasers.live_count(),
                "laser capacity reached, shot dropped"
            );
            return false;
        }

        let (width, height) = self.state.laser_size;
        let origin = self.state.player.fire_origin();
        let fired = fire_laser(
            &mut self.state.lasers,
            origin,
            self.config.laser.speed,
            width,
            height,
        );
        fired.is_some()
    }

    /// Frees the slots of lasers that left the top of the screen
    fn cull_lasers(&mut self) -> usize {
        let bounds = self.state.bounds;
        let mut culled = 0;
        self.state.lasers.for_each_live(|_, laser| {
            if is_off_screen(laser, &bounds) {
                culled += 1;
                Visit::Destroy
            } else {
                Visit::Keep
            }
        });
        culled
    }

    fn resolve_hits(&mut self) -> usize {
        let hits = collision::resolve(
            &mut self.state.lasers,
            &mut self.state.enemies,
            |lasers, laser, enemies, enemy| {
                tracing::debug!(laser = laser.id(), enemy = enemy.id(), "laser hit");
                collision::destroy_both(lasers, laser, enemies, enemy);
            },
        );
        if hits > 0 {
            tracing::info!(
                hits,
                remaining = self.state.enemies.live_count(),
                "enemy destroyed"
            );
        }
        hits
    }

    fn integrate(&mut self, dt: f32) {
        let bounds = self.state.bounds;
        physics::step_entity(&mut self.state.player.body, &bounds, dt);
        physics::step_group(&mut self.state.enemies, &bounds, dt);
        physics::step_group(&mut self.state.lasers, &bounds, dt);
    }
}

impl Scene for GameLoopController {
    fn load_assets(&self, assets: &mut AssetCatalog) {
        let files = &self.config.assets;
        assets.load_image(PLAYER_TEXTURE, &self.config.asset_path(&files.player));
        assets.load_image(Laser::TEXTURE, &self.config.asset_path(&files.laser));
        assets.load_image(Enemy::TEXTURE, &self.config.asset_path(&files.enemy));
    }

    fn initialize(&mut self, assets: &AssetCatalog) {
        self.state = GameState::new_game(&self.config, assets);
        tracing::info!(
            enemies = self.state.enemies.live_count(),
            width = self.state.bounds.width,
            height = self.state.bounds.height,
            "round started"
        );
    }

    /// One simulation tick. The order of the steps is part of the game rules:
    /// the win check sees the previous tick's collisions, and culling runs
    /// before collisions so a freed slot is never hit-tested.
    fn advance_frame(&mut self, input: InputState, dt: f32) -> FrameReport {
        let won = self.check_win();
        self.steer_player(&input);
        let fired = input.fire_edge && self.try_fire();
        let culled = self.cull_lasers();
        let hits = self.resolve_hits();
        self.integrate(dt);
        self.state.frame_count += 1;

        FrameReport {
            fired,
            culled,
            hits,
            won,
        }
    }
}
