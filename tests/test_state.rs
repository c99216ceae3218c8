use rand::rngs::StdRng;
use rand::SeedableRng;

use boss_rush::constants::*;
use boss_rush::entities::{FrameInput, PlayerShot, PlayerShotKind};
use boss_rush::geometry::Vec2;
use boss_rush::progression::card_rects;
use boss_rush::state::{Command, Game, Phase};

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

fn playing() -> Game {
    let mut game = Game::new();
    assert!(game.handle(Command::Start));
    game
}

/// Drive a fresh run into the Upgrade phase by landing a killing shot.
fn at_upgrade(rng: &mut StdRng) -> Game {
    let mut game = playing();
    let world = game.world_mut().unwrap();
    world.boss.hp = 1;
    let boss_pos = world.boss.pos;
    world
        .player_shots
        .push(PlayerShot::new(boss_pos, Vec2::ZERO, PlayerShotKind::Normal));
    game.step(&FrameInput::default(), rng);
    assert_eq!(game.phase(), Phase::Upgrade);
    game
}

// ── Title ─────────────────────────────────────────────────────────────────────

#[test]
fn starts_on_title_without_a_run() {
    let game = Game::new();
    assert_eq!(game.phase(), Phase::Title);
    assert!(game.world().is_none());
    assert!(game.offer().is_none());
}

#[test]
fn start_creates_fresh_run() {
    let game = playing();
    assert_eq!(game.phase(), Phase::Playing);
    let world = game.world().unwrap();
    assert_eq!(world.level, 1);
    assert_eq!(world.score, 0);
    assert_eq!(world.player.hp, PLAYER_MAX_HP);
}

#[test]
fn out_of_phase_commands_are_ignored() {
    let mut game = Game::new();
    assert!(!game.handle(Command::Pause));
    assert!(!game.handle(Command::Resume));
    assert!(!game.handle(Command::Special));
    assert!(!game.handle(Command::Choose(0)));
    assert_eq!(game.phase(), Phase::Title);

    let mut game = playing();
    assert!(!game.handle(Command::Start));
    assert!(!game.handle(Command::Abort));
    assert!(!game.handle(Command::Acknowledge));
    assert_eq!(game.phase(), Phase::Playing);
}

#[test]
fn title_does_not_tick() {
    let mut game = Game::new();
    game.step(&FrameInput::default(), &mut seeded_rng());
    assert!(game.world().is_none());
}

// ── Pause ─────────────────────────────────────────────────────────────────────

#[test]
fn pause_freezes_simulation() {
    let mut rng = seeded_rng();
    let mut game = playing();
    game.step(&FrameInput::default(), &mut rng);
    assert!(game.handle(Command::Pause));
    assert_eq!(game.phase(), Phase::Paused);

    let frame = game.world().unwrap().frame;
    let boss_x = game.world().unwrap().boss.pos.x;
    for _ in 0..30 {
        game.step(&FrameInput::default(), &mut rng);
    }
    assert_eq!(game.world().unwrap().frame, frame);
    assert_eq!(game.world().unwrap().boss.pos.x, boss_x);

    assert!(game.handle(Command::Resume));
    game.step(&FrameInput::default(), &mut rng);
    assert_eq!(game.world().unwrap().frame, frame + 1);
}

#[test]
fn special_only_fires_while_playing() {
    let mut game = playing();
    game.handle(Command::Pause);
    assert!(!game.handle(Command::Special));
    assert!(game.world().unwrap().beams.is_empty());

    game.handle(Command::Resume);
    assert!(game.handle(Command::Special));
    let world = game.world().unwrap();
    assert_eq!(world.beams.len(), 1);
    assert_eq!(world.player.special_charges, PLAYER_SPECIAL_CHARGES - 1);

    // Cooldown blocks an immediate second beam.
    assert!(!game.handle(Command::Special));
}

#[test]
fn abort_returns_to_title_and_next_start_is_fresh() {
    let mut rng = seeded_rng();
    let mut game = playing();
    game.world_mut().unwrap().score = 500;
    game.step(&FrameInput::default(), &mut rng);
    game.handle(Command::Pause);
    assert!(game.handle(Command::Abort));
    assert_eq!(game.phase(), Phase::Title);
    assert!(game.world().is_none());

    game.handle(Command::Start);
    assert_eq!(game.world().unwrap().score, 0);
    assert_eq!(game.world().unwrap().frame, 0);
}

// ── Game over ─────────────────────────────────────────────────────────────────

#[test]
fn zero_hp_ends_run_on_next_step() {
    let mut game = playing();
    game.world_mut().unwrap().player.hp = 0;
    game.step(&FrameInput::default(), &mut seeded_rng());
    assert_eq!(game.phase(), Phase::GameOver);
    // The final world stays around for the results screen.
    assert!(game.world().is_some());
}

#[test]
fn acknowledge_leaves_game_over() {
    let mut game = playing();
    game.world_mut().unwrap().player.hp = 0;
    game.step(&FrameInput::default(), &mut seeded_rng());

    assert!(!game.handle(Command::Start));
    assert!(game.handle(Command::Acknowledge));
    assert_eq!(game.phase(), Phase::Title);
    assert!(game.world().is_none());
}

// ── Upgrade ───────────────────────────────────────────────────────────────────

#[test]
fn boss_kill_opens_upgrade_screen() {
    let mut rng = seeded_rng();
    let game = at_upgrade(&mut rng);
    let world = game.world().unwrap();
    assert_eq!(world.level, 2);
    assert_eq!(game.offer().unwrap().options.len(), UPGRADE_CHOICES);
}

#[test]
fn upgrade_phase_does_not_tick() {
    let mut rng = seeded_rng();
    let mut game = at_upgrade(&mut rng);
    let frame = game.world().unwrap().frame;
    game.step(&FrameInput::default(), &mut rng);
    assert_eq!(game.world().unwrap().frame, frame);
}

#[test]
fn click_on_card_applies_upgrade_and_resumes() {
    let mut rng = seeded_rng();
    let mut game = at_upgrade(&mut rng);
    let second = game.offer().unwrap().options[1];
    let centre = card_rects(UPGRADE_CHOICES)[1].center();

    assert!(game.handle(Command::Click(centre)));

    assert_eq!(game.phase(), Phase::Playing);
    assert!(game.offer().is_none());
    let world = game.world().unwrap();
    assert_eq!(world.boss.level, 2);
    assert_eq!(world.boss.hp, world.boss.max_hp);
    let mut expected = boss_rush::entities::Player::new();
    second.apply(&mut expected);
    assert_eq!(world.player.max_hp, expected.max_hp);
    assert_eq!(world.player.special_charges, expected.special_charges);
    assert_eq!(world.player.shoot_cooldown_max, expected.shoot_cooldown_max);
}

#[test]
fn click_outside_cards_keeps_waiting() {
    let mut rng = seeded_rng();
    let mut game = at_upgrade(&mut rng);
    assert!(!game.handle(Command::Click(Vec2::new(400.0, 50.0))));
    assert_eq!(game.phase(), Phase::Upgrade);
    assert!(game.offer().is_some());
}

#[test]
fn choose_by_index() {
    let mut rng = seeded_rng();
    let mut game = at_upgrade(&mut rng);
    assert!(!game.handle(Command::Choose(3)));
    assert!(game.handle(Command::Choose(2)));
    assert_eq!(game.phase(), Phase::Playing);
}
