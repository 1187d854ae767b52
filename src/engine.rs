use crate::assets::AssetCatalog;
use crate::input::InputState;

/// What happened during one simulation tick, for the driver's side effects
/// (sound, logging). The game state itself is read through the scene.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameReport {
    pub fired: bool,
    pub culled: usize,
    pub hits: usize,
    /// Set only on the tick the win transition happens
    pub won: bool,
}

/// The three capabilities a driver needs from a scene. Registered once with
/// [`App`](crate::app::App), which calls them in order: assets, init, then
/// one `advance_frame` per fixed tick.
pub trait Scene {
    fn load_assets(&self, assets: &mut AssetCatalog);

    fn initialize(&mut self, assets: &AssetCatalog);

    fn advance_frame(&mut self, input: InputState, dt: f32) -> FrameReport;
}

/// Accumulates wall-clock time and releases it in fixed steps
#[derive(Debug, Clone)]
pub struct FixedTimestep {
    frame_duration: f32,
    accumulator: f32,
    /// Upper bound on banked time so a stall does not trigger a long catch-up burst
    max_backlog: f32,
}

impl FixedTimestep {
    pub fn from_fps(fps: u32) -> Self {
        let frame_duration = 1.0 / fps.max(1) as f32;
        Self {
            frame_duration,
            accumulator: 0.0,
            max_backlog: frame_duration * 5.0,
        }
    }

    pub fn step_seconds(&self) -> f32 {
        self.frame_duration
    }

    pub fn accumulate(&mut self, delta: f32) {
        self.accumulator = (self.accumulator + delta).min(self.max_backlog);
    }

    pub fn should_step(&mut self) -> bool {
        if self.accumulator >= self.frame_duration {
            self.accumulator -= self.frame_duration;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(timestep: &mut FixedTimestep) -> usize {
        let mut steps = 0;
        while timestep.should_step() {
            steps += 1;
        }
        steps
    }

    #[test]
    fn test_no_step_before_full_frame() {
        let mut timestep = FixedTimestep::from_fps(60);
        timestep.accumulate(0.01);
        assert_eq!(drain(&mut timestep), 0);
        timestep.accumulate(0.01);
        assert_eq!(drain(&mut timestep), 1);
    }

    #[test]
    fn test_multiple_steps_per_delta() {
        let mut timestep = FixedTimestep::from_fps(10);
        timestep.accumulate(0.35);
        assert_eq!(drain(&mut timestep), 3);
    }

    #[test]
    fn test_backlog_is_capped() {
        let mut timestep = FixedTimestep::from_fps(4);
        timestep.accumulate(10.0);
        assert_eq!(drain(&mut timestep), 5);
    }

    #[test]
    fn test_zero_fps_does_not_divide_by_zero() {
        let timestep = FixedTimestep::from_fps(0);
        assert_eq!(timestep.step_seconds(), 1.0);
    }
}
