use std::collections::HashMap;

use approx::assert_relative_eq;
use rand::rngs::StdRng;
use rand::SeedableRng;

use boss_rush::constants::*;
use boss_rush::entities::*;
use boss_rush::geometry::Vec2;
use boss_rush::patterns::next_pattern;

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

/// Boss at level 1 ready to fire the given pattern right now.
fn armed_boss(pattern: Pattern) -> Boss {
    let mut boss = Boss::new(1);
    boss.pattern = pattern;
    boss.shoot_timer = 0;
    boss
}

// ── Boss::new ─────────────────────────────────────────────────────────────────

#[test]
fn boss_stats_scale_with_level() {
    let b1 = Boss::new(1);
    assert_eq!(b1.max_hp, 170);
    assert_eq!(b1.hp, 170);
    assert_relative_eq!(b1.speed_x, 3.0);
    assert_eq!(b1.shoot_interval, 23);
    assert_eq!(b1.pattern_duration, 180);
    assert_eq!(b1.pattern, Pattern::AimedTriple);
    assert_eq!(b1.pos, Vec2::new(400.0, BOSS_HOME_Y));
    assert!(!b1.enraged);

    let b10 = Boss::new(10);
    assert_eq!(b10.max_hp, 620);
    assert_eq!(b10.shoot_interval, 8);
}

// ── Movement ──────────────────────────────────────────────────────────────────

#[test]
fn boss_bounces_off_right_wall() {
    let mut boss = Boss::new(1);
    boss.pos.x = WIDTH - BOSS_WIDTH / 2.0 - 1.0;
    boss.update(&mut seeded_rng());
    assert_eq!(boss.pos.x, WIDTH - BOSS_WIDTH / 2.0);
    assert!(boss.speed_x < 0.0);
}

#[test]
fn boss_bounces_off_left_wall() {
    let mut boss = Boss::new(1);
    boss.pos.x = BOSS_WIDTH / 2.0 + 1.0;
    boss.speed_x = -3.0;
    boss.update(&mut seeded_rng());
    assert_eq!(boss.pos.x, BOSS_WIDTH / 2.0);
    assert!(boss.speed_x > 0.0);
}

#[test]
fn boss_stays_inside_arena_and_near_home() {
    let mut boss = Boss::new(5);
    let mut rng = seeded_rng();
    for _ in 0..2_000 {
        boss.update(&mut rng);
        let hb = boss.hitbox();
        assert!(hb.left() >= 0.0 && hb.right() <= WIDTH);
        assert!((boss.pos.y - BOSS_HOME_Y).abs() <= BOSS_BOB_AMPLITUDE);
    }
}

// ── Enrage ────────────────────────────────────────────────────────────────────

#[test]
fn enrage_waits_for_half_health() {
    let mut boss = Boss::new(1);
    boss.hp = 86;
    assert!(!boss.check_enrage());
    assert!(!boss.enraged);

    boss.hp = 85;
    assert!(boss.check_enrage());
    assert!(boss.enraged);
}

#[test]
fn enrage_tightens_boss_exactly_once() {
    let mut boss = Boss::new(1);
    boss.hp = 40;
    assert!(boss.check_enrage());
    assert_relative_eq!(boss.speed_x, 4.5);
    assert_eq!(boss.shoot_interval, 13);
    assert_eq!(boss.pattern_duration, (180.0_f64 * 0.7) as u32);

    let (speed, interval, duration) = (boss.speed_x, boss.shoot_interval, boss.pattern_duration);
    boss.hp = 1;
    assert!(!boss.check_enrage());
    assert_eq!(boss.speed_x, speed);
    assert_eq!(boss.shoot_interval, interval);
    assert_eq!(boss.pattern_duration, duration);
}

#[test]
fn enraged_interval_has_floor() {
    let mut boss = Boss::new(10);
    boss.hp = 0;
    boss.check_enrage();
    assert_eq!(boss.shoot_interval, 5);
}

#[test]
fn update_triggers_enrage() {
    let mut boss = Boss::new(2);
    boss.hp = boss.max_hp / 2;
    boss.update(&mut seeded_rng());
    assert!(boss.enraged);
}

// ── Pattern cycle ─────────────────────────────────────────────────────────────

#[test]
fn pattern_holds_until_duration_elapses() {
    let mut boss = Boss::new(1);
    let mut rng = seeded_rng();
    for _ in 0..boss.pattern_duration - 1 {
        boss.advance_pattern(&mut rng);
    }
    assert_eq!(boss.pattern, Pattern::AimedTriple);
    boss.advance_pattern(&mut rng);
    assert_ne!(boss.pattern, Pattern::AimedTriple);
    assert_eq!(boss.pattern_time, 0);
}

#[test]
fn consecutive_patterns_always_differ() {
    let mut boss = Boss::new(1);
    let mut rng = seeded_rng();
    let mut seen: HashMap<Pattern, usize> = HashMap::new();
    for _ in 0..400 {
        let before = boss.pattern;
        boss.pattern_time = boss.pattern_duration - 1;
        boss.advance_pattern(&mut rng);
        assert_ne!(boss.pattern, before);
        *seen.entry(boss.pattern).or_default() += 1;
    }
    assert_eq!(seen.len(), Pattern::ALL.len());
}

#[test]
fn next_pattern_never_repeats_current() {
    let mut rng = seeded_rng();
    for current in Pattern::ALL {
        for _ in 0..100 {
            assert_ne!(next_pattern(current, &mut rng), current);
        }
    }
}

// ── Firing ────────────────────────────────────────────────────────────────────

#[test]
fn no_fire_while_timer_running() {
    let mut boss = armed_boss(Pattern::Wall);
    boss.shoot_timer = 3;
    let (mut shots, mut minions) = (Vec::new(), Vec::new());
    boss.maybe_shoot(None, &mut shots, &mut minions, &mut seeded_rng());
    assert!(shots.is_empty());
    assert_eq!(boss.shoot_timer, 3);
}

#[test]
fn aimed_triple_targets_player_from_boss_bottom() {
    let mut boss = armed_boss(Pattern::AimedTriple);
    let player = Player::new();
    let (mut shots, mut minions) = (Vec::new(), Vec::new());
    boss.maybe_shoot(Some(&player), &mut shots, &mut minions, &mut seeded_rng());

    assert_eq!(shots.len(), 3);
    assert_eq!(boss.shoot_timer, boss.shoot_interval);
    let xs: Vec<f32> = shots.iter().map(|s| s.pos.x).collect();
    assert_eq!(xs, vec![400.0, 370.0, 430.0]);
    for s in &shots {
        assert_eq!(s.kind(), EnemyShotKind::Normal);
        assert_eq!(s.pos.y, BOSS_HOME_Y + BOSS_HEIGHT / 2.0);
        assert_relative_eq!(s.vel.length(), AIMED_SHOT_SPEED, epsilon = 1e-4);
    }
    assert_relative_eq!(shots[0].vel.x, 0.0, epsilon = 1e-5);
    assert!(shots[1].vel.x > 0.0 && shots[2].vel.x < 0.0);
}

#[test]
fn aimed_triple_without_player_only_resets_timer() {
    let mut boss = armed_boss(Pattern::AimedTriple);
    let (mut shots, mut minions) = (Vec::new(), Vec::new());
    boss.maybe_shoot(None, &mut shots, &mut minions, &mut seeded_rng());
    assert!(shots.is_empty());
    assert_eq!(boss.shoot_timer, boss.shoot_interval);
}

#[test]
fn wall_spans_screen_evenly() {
    let mut boss = armed_boss(Pattern::Wall);
    let (mut shots, mut minions) = (Vec::new(), Vec::new());
    boss.maybe_shoot(None, &mut shots, &mut minions, &mut seeded_rng());

    assert_eq!(shots.len(), WALL_SHOTS);
    let xs: Vec<f32> = shots.iter().map(|s| s.pos.x).collect();
    assert_eq!(
        xs,
        vec![80.0, 160.0, 240.0, 320.0, 400.0, 480.0, 560.0, 640.0, 720.0]
    );
    for s in &shots {
        assert_eq!(s.kind(), EnemyShotKind::SlowOrb);
        assert_eq!(s.vel, Vec2::new(0.0, WALL_SHOT_SPEED));
    }
}

#[test]
fn radial_ring_turns_between_volleys() {
    let mut boss = armed_boss(Pattern::RadialSpin);
    let (mut shots, mut minions) = (Vec::new(), Vec::new());
    let mut rng = seeded_rng();

    boss.maybe_shoot(None, &mut shots, &mut minions, &mut rng);
    assert_eq!(shots.len(), RADIAL_SHOTS);
    assert_relative_eq!(boss.spin_angle, 0.3);
    let first = shots[0].vel;
    assert_relative_eq!(first.y.atan2(first.x), 0.3, epsilon = 1e-5);
    for s in &shots {
        assert_eq!(s.kind(), EnemyShotKind::Wave);
        assert_eq!(s.pos, boss.pos);
        assert_relative_eq!(s.vel.length(), RADIAL_SHOT_SPEED, epsilon = 1e-4);
    }

    boss.shoot_timer = 0;
    boss.maybe_shoot(None, &mut shots, &mut minions, &mut rng);
    assert_eq!(shots.len(), RADIAL_SHOTS * 2);
    assert_relative_eq!(boss.spin_angle, 0.6, epsilon = 1e-6);
}

#[test]
fn summon_spawns_three_minions_below_boss() {
    let mut boss = armed_boss(Pattern::Summon);
    let (mut shots, mut minions) = (Vec::new(), Vec::new());
    boss.maybe_shoot(None, &mut shots, &mut minions, &mut seeded_rng());

    assert!(shots.is_empty());
    let xs: Vec<f32> = minions.iter().map(|m| m.pos.x).collect();
    assert_eq!(xs, vec![320.0, 400.0, 480.0]);
    for m in &minions {
        assert_eq!(m.pos.y, boss.hitbox().bottom() + 10.0);
        assert_eq!(m.hp, 25);
    }
}

#[test]
fn summon_skips_positions_near_the_edge() {
    let mut boss = armed_boss(Pattern::Summon);
    boss.pos.x = BOSS_WIDTH / 2.0;
    let (mut shots, mut minions) = (Vec::new(), Vec::new());
    boss.maybe_shoot(None, &mut shots, &mut minions, &mut seeded_rng());

    let xs: Vec<f32> = minions.iter().map(|m| m.pos.x).collect();
    assert_eq!(xs, vec![80.0, 160.0]);
}
