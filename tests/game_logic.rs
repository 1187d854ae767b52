/// Integration tests for game logic
///
/// These drive whole rounds through the public controller API, the same way
/// the application loop does.
use space_lasers::{
    GameConfig, GameLoopController, GamePhase, InputSampler, InputState, RawKeys, Scene,
    assets::AssetCatalog,
};

const DT: f32 = 1.0 / 60.0;

fn idle() -> InputState {
    InputState::default()
}

fn fire() -> InputState {
    InputState {
        fire_edge: true,
        ..InputState::default()
    }
}

fn started_game() -> GameLoopController {
    let mut game = GameLoopController::new(GameConfig::default());
    let mut assets = AssetCatalog::new();
    game.load_assets(&mut assets);
    game.initialize(&assets);
    game
}

fn freeze_enemies(game: &mut GameLoopController) {
    for enemy in game.state_mut().enemies.iter_mut() {
        enemy.set_velocity_x(0.0);
    }
}

#[test]
fn test_round_is_won_the_frame_after_the_last_hit() {
    let mut game = started_game();
    freeze_enemies(&mut game);

    let targets: Vec<f32> = game.state().enemies.iter().map(|(_, e)| e.x).collect();
    assert_eq!(targets.len(), 3);

    for (shot, x) in targets.iter().enumerate() {
        game.state_mut().player.body.x = *x;
        assert!(game.advance_frame(fire(), DT).fired);

        let remaining = 3 - shot - 1;
        let mut frames = 0;
        while game.state().enemies.live_count() > remaining {
            let report = game.advance_frame(idle(), DT);
            assert!(!report.won, "won before every enemy was destroyed");
            assert_eq!(game.state().phase, GamePhase::Playing);
            frames += 1;
            assert!(frames < 300, "laser never reached enemy {shot}");
        }
        assert_eq!(game.state().enemies.live_count(), remaining);
        assert_eq!(game.state().lasers.live_count(), 0);
    }

    // The hit frame itself still reports Playing
    assert_eq!(game.state().phase, GamePhase::Playing);
    assert!(!game.state().win_text_visible);

    let report = game.advance_frame(idle(), DT);
    assert!(report.won);
    assert_eq!(game.state().phase, GamePhase::Won);
    assert!(game.state().win_text_visible);

    // Reported once, state is terminal
    for _ in 0..10 {
        assert!(!game.advance_frame(idle(), DT).won);
        assert!(game.state().is_won());
    }
}

#[test]
fn test_rapid_fire_never_exceeds_capacity() {
    let mut game = started_game();
    let mut sampler = InputSampler::new();
    let mut fired = 0;

    for frame in 0..60 {
        // Tap fire every other frame
        let input = sampler.sample(RawKeys {
            fire: frame % 2 == 0,
            ..RawKeys::default()
        });
        if game.advance_frame(input, DT).fired {
            fired += 1;
        }
        assert!(game.state().lasers.live_count() <= 3);
        if frame == 5 {
            assert_eq!(fired, 3);
        }
    }
}

#[test]
fn test_held_fire_shoots_once() {
    let mut game = started_game();
    let mut sampler = InputSampler::new();
    let held = RawKeys {
        fire: true,
        ..RawKeys::default()
    };

    let mut fired = 0;
    for _ in 0..60 {
        if game.advance_frame(sampler.sample(held), DT).fired {
            fired += 1;
        }
        assert!(game.state().lasers.live_count() <= 3);
    }
    assert_eq!(fired, 1);
}

#[test]
fn test_missed_laser_frees_its_slot() {
    let mut game = started_game();
    freeze_enemies(&mut game);
    // Fire from the far right, clear of every enemy column
    game.state_mut().player.body.x = 760.0;
    assert!(game.advance_frame(fire(), DT).fired);

    let mut frames = 0;
    let mut culled = 0;
    while game.state().lasers.live_count() > 0 {
        culled += game.advance_frame(idle(), DT).culled;
        frames += 1;
        assert!(frames < 300, "laser never left the screen");
    }
    assert_eq!(culled, 1);
    assert_eq!(game.state().enemies.live_count(), 3);

    // Slot is usable again
    assert!(game.advance_frame(fire(), DT).fired);
}

#[test]
fn test_destroy_is_idempotent_through_public_api() {
    let mut game = started_game();
    let enemy = game.state().enemies.iter().next().map(|(r, _)| r).unwrap();

    assert!(game.state_mut().enemies.destroy(enemy));
    assert!(!game.state_mut().enemies.destroy(enemy));
    assert_eq!(game.state().enemies.live_count(), 2);
    assert!(!game.state().enemies.is_alive(enemy));
}

#[test]
fn test_enemies_bounce_off_the_walls() {
    let mut game = started_game();
    let width = game.state().bounds.width;

    let mut turned = false;
    for _ in 0..120 {
        game.advance_frame(idle(), DT);
        for (_, enemy) in game.state().enemies.iter() {
            assert!(enemy.left() >= 0.0 && enemy.right() <= width);
            assert_eq!(enemy.vx.abs(), 250.0);
            turned |= enemy.vx > 0.0;
        }
    }
    assert!(turned);
}

#[test]
fn test_player_moves_and_stays_on_screen() {
    let mut game = started_game();
    let left = InputState {
        move_left: true,
        ..idle()
    };
    for _ in 0..600 {
        game.advance_frame(left, DT);
    }
    let body = &game.state().player.body;
    assert!(body.left() >= 0.0);
    assert!(body.x < 400.0);
}
