use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::{Duration, Instant};

/// How long a key stays held after its last press when the terminal cannot
/// report key releases. Must outlast the OS auto-repeat delay (commonly
/// 250-600 ms), since every repeat arrives as another press.
const LATCH_WINDOW: Duration = Duration::from_millis(650);

/// Per-frame input snapshot handed to the game loop
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputState {
    pub move_left: bool,
    pub move_right: bool,
    /// True only on the frame the fire control goes from released to pressed
    pub fire_edge: bool,
}

/// Level state of the controls as seen by the device layer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RawKeys {
    pub left: bool,
    pub right: bool,
    pub fire: bool,
}

/// Turns level key state into an [`InputState`], tracking the fire edge.
#[derive(Debug, Default)]
pub struct InputSampler {
    fire_was_down: bool,
}

impl InputSampler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sample(&mut self, keys: RawKeys) -> InputState {
        let fire_edge = keys.fire && !self.fire_was_down;
        self.fire_was_down = keys.fire;

        InputState {
            move_left: keys.left,
            move_right: keys.right,
            fire_edge,
        }
    }
}

/// One-shot requests that bypass the game loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    Quit,
}

#[derive(Debug, Default, Clone, Copy)]
struct HeldKey {
    down: bool,
    /// Pressed since the last sample, so a tap shorter than a tick still counts
    tapped: bool,
    /// Last press or repeat; drives the latch when there are no release events
    last_seen: Option<Instant>,
}

impl HeldKey {
    /// A press while already held is a repeat, not a new press
    fn press(&mut self, now: Instant) {
        if !self.down {
            self.tapped = true;
        }
        self.refresh(now);
    }

    fn refresh(&mut self, now: Instant) {
        self.down = true;
        self.last_seen = Some(now);
    }

    fn is_down(&self) -> bool {
        self.down || self.tapped
    }

    fn release(&mut self) {
        self.down = false;
        self.last_seen = None;
    }

    fn expire(&mut self, now: Instant) {
        if let Some(last_seen) = self.last_seen {
            if now.saturating_duration_since(last_seen) >= LATCH_WINDOW {
                self.release();
            }
        }
    }
}

#[derive(Debug, Default)]
struct KeyState {
    left: HeldKey,
    right: HeldKey,
    fire: HeldKey,
}

impl KeyState {
    fn expire(&mut self, now: Instant) {
        self.left.expire(now);
        self.right.expire(now);
        self.fire.expire(now);
    }

    fn raw(&self) -> RawKeys {
        RawKeys {
            left: self.left.is_down(),
            right: self.right.is_down(),
            fire: self.fire.is_down(),
        }
    }

    fn clear_taps(&mut self) {
        self.left.tapped = false;
        self.right.tapped = false;
        self.fire.tapped = false;
    }
}

/// Polls crossterm and translates raw key events into game input
pub struct InputManager {
    key_state: KeyState,
    /// Terminal reports key releases (keyboard enhancement active)
    release_events: bool,
    oneshot_actions: Vec<InputAction>,
    sampler: InputSampler,
}

impl InputManager {
    pub fn new(release_events: bool) -> Self {
        Self {
            key_state: KeyState::default(),
            release_events,
            oneshot_actions: Vec::new(),
            sampler: InputSampler::new(),
        }
    }

    /// Drains pending terminal events without blocking.
    /// Should be called once per driver iteration before sampling.
    pub fn poll_events(&mut self) -> color_eyre::Result<()> {
        self.oneshot_actions.clear();
        if !self.release_events {
            self.key_state.expire(Instant::now());
        }

        while event::poll(Duration::from_millis(0))? {
            if let Event::Key(key_event) = event::read()? {
                self.handle_key_event(key_event);
            }
        }

        Ok(())
    }

    /// Processes a key event and updates key state and one-shot actions
    pub fn handle_key_event(&mut self, key_event: KeyEvent) {
        self.handle_key_event_at(key_event, Instant::now());
    }

    fn handle_key_event_at(&mut self, key_event: KeyEvent, now: Instant) {
        match key_event.kind {
            KeyEventKind::Press => self.handle_key_press(key_event, false, now),
            KeyEventKind::Repeat => self.handle_key_press(key_event, true, now),
            KeyEventKind::Release => self.handle_key_release(key_event.code),
        }
    }

    fn handle_key_press(&mut self, key_event: KeyEvent, repeat: bool, now: Instant) {
        if matches!(
            key_event.code,
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc
        ) || (key_event.code == KeyCode::Char('c')
            && key_event.modifiers.contains(KeyModifiers::CONTROL))
        {
            self.oneshot_actions.push(InputAction::Quit);
            return;
        }

        let key = match key_event.code {
            KeyCode::Char('a') | KeyCode::Char('A') | KeyCode::Left => &mut self.key_state.left,
            KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Right => &mut self.key_state.right,
            KeyCode::Char(' ') => &mut self.key_state.fire,
            _ => return,
        };
        if repeat {
            key.refresh(now);
        } else {
            key.press(now);
        }
    }

    fn handle_key_release(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('a') | KeyCode::Char('A') | KeyCode::Left => {
                self.key_state.left.release();
            }
            KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Right => {
                self.key_state.right.release();
            }
            KeyCode::Char(' ') => {
                self.key_state.fire.release();
            }
            _ => {}
        }
    }

    pub fn actions(&self) -> &[InputAction] {
        &self.oneshot_actions
    }

    /// Snapshot for one simulation tick. Sampling again in the same poll
    /// keeps movement but never repeats the fire edge.
    pub fn sample(&mut self) -> InputState {
        let keys = self.key_state.raw();
        self.key_state.clear_taps();
        self.sampler.sample(keys)
    }
}
