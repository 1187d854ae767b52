use color_eyre::Result;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::time::{Duration, Instant};

use crate::assets::AssetCatalog;
#[cfg(feature = "audio")]
use crate::audio::AudioManager;
use crate::config::GameConfig;
use crate::engine::{FixedTimestep, FrameReport, Scene};
use crate::game::GameLoopController;
use crate::input::{InputAction, InputManager};
use crate::renderer::{GameRenderer, RenderView};

/// The main application: owns the scene and drives it at a fixed tick rate.
pub struct App {
    running: bool,
    scene: GameLoopController,
    assets: AssetCatalog,
    /// Frames info
    timestep: FixedTimestep,
    last_frame_time: Instant,
    fps: u32,
    /// internal components
    input_manager: InputManager,
    renderer: GameRenderer,
    #[cfg(feature = "audio")]
    audio_manager: Option<AudioManager>,
}

impl App {
    /// Registers the scene, loads its assets and starts the round.
    pub fn new(config: GameConfig, release_events: bool) -> Self {
        let timestep = FixedTimestep::from_fps(config.tick_rate);

        #[cfg(feature = "audio")]
        let audio_manager = {
            let path = config.asset_path(&config.assets.laser_sound);
            match AudioManager::new(&path) {
                Ok(manager) => Some(manager),
                Err(err) => {
                    tracing::warn!(%err, "no audio output, continuing without sound");
                    None
                }
            }
        };

        let started = Instant::now();
        let mut scene = GameLoopController::new(config);
        let mut assets = AssetCatalog::new();
        scene.load_assets(&mut assets);
        tracing::info!(
            sprites = assets.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "assets loaded"
        );
        scene.initialize(&assets);
        tracing::info!(elapsed_ms = started.elapsed().as_millis() as u64, "scene initialized");

        Self {
            running: true,
            scene,
            assets,
            timestep,
            last_frame_time: Instant::now(),
            fps: 0,
            input_manager: InputManager::new(release_events),
            renderer: GameRenderer::new(),
            #[cfg(feature = "audio")]
            audio_manager,
        }
    }

    /// Run the application's main loop.
    pub fn run(mut self, terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>) -> Result<()> {
        while self.running {
            // Calculate FPS
            let now = Instant::now();
            let frame_time = now.duration_since(self.last_frame_time);
            self.last_frame_time = now;
            if frame_time.as_micros() > 0 {
                self.fps = (1_000_000 / frame_time.as_micros()) as u32;
            }
            self.timestep.accumulate(frame_time.as_secs_f32());

            terminal.draw(|frame| {
                let view = RenderView {
                    state: self.scene.state(),
                    assets: &self.assets,
                    area: frame.area(),
                    fps: self.fps,
                };
                self.renderer.render(frame, &view);
            })?;

            self.input_manager.poll_events()?;
            self.process_actions();
            if !self.running {
                break;
            }

            let step = self.timestep.step_seconds();
            while self.timestep.should_step() {
                let input = self.input_manager.sample();
                let report = self.scene.advance_frame(input, step);
                self.on_frame(report);
            }

            // Small sleep to prevent CPU spinning
            std::thread::sleep(Duration::from_millis(8));
        }

        tracing::info!(frames = self.scene.state().frame_count, "shutting down");
        Ok(())
    }

    fn process_actions(&mut self) {
        for action in self.input_manager.actions() {
            match action {
                InputAction::Quit => {
                    self.running = false;
                }
            }
        }
    }

    fn on_frame(&mut self, report: FrameReport) {
        if report.fired {
            #[cfg(feature = "audio")]
            if let Some(audio) = &self.audio_manager {
                audio.play_laser();
            }
            tracing::debug!(frame = self.scene.state().frame_count, "laser fired");
        }
        if report.hits > 0 {
            tracing::debug!(
                hits = report.hits,
                remaining = self.scene.state().enemies.live_count(),
                "enemies destroyed"
            );
        }
        if report.won {
            tracing::info!(frames = self.scene.state().frame_count, "round won, showing banner");
        }
    }
}
