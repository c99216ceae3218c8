/// Per-tick simulation: movement, boss fire, then collision resolution.
///
/// `tick` takes an immutable reference to the current `World` (plus the held
/// keys and an RNG handle) and returns a brand-new `World` together with what
/// happened.  All randomness comes through the injected RNG so callers control
/// determinism.
use rand::Rng;
use tracing::info;

use crate::constants::*;
use crate::entities::{FrameInput, World};
use crate::motion::{advance_beams, advance_enemy_shots, advance_minions, advance_player_shots};
use crate::progression::{advance_level, UpgradeOffer};

/// What a tick means for the phase machine.
#[derive(Clone, Debug, PartialEq)]
pub enum TickOutcome {
    Continue,
    /// The boss died this tick; the world has already moved to the next level.
    BossDefeated(UpgradeOffer),
    PlayerDied,
}

/// Advance the simulation by one frame.
pub fn tick(world: &World, input: &FrameInput, rng: &mut impl Rng) -> (World, TickOutcome) {
    let mut next = world.clone();
    update_entities(&mut next, input, rng);
    let outcome = resolve_combat(&mut next, rng);
    (next, outcome)
}

/// Move everything and let the player and boss fire.
pub fn update_entities(world: &mut World, input: &FrameInput, rng: &mut impl Rng) {
    world.frame += 1;
    world.shake.advance(rng);

    let World {
        player,
        boss,
        player_shots,
        enemy_shots,
        beams,
        minions,
        ..
    } = world;

    player.update(input);
    if input.fire && player.can_shoot() {
        player_shots.extend(player.shoot(Some(boss.pos)));
    }

    boss.update(rng);
    boss.maybe_shoot(Some(&*player), enemy_shots, minions, rng);

    advance_player_shots(player_shots);
    advance_enemy_shots(enemy_shots);
    advance_beams(beams);
    advance_minions(minions);
}

/// Collision and damage pass.  The order of the steps matters: a boss killed
/// this tick ends the pass before the player can be hurt.
pub fn resolve_combat(world: &mut World, rng: &mut impl Rng) -> TickOutcome {
    let World {
        player,
        boss,
        player_shots,
        enemy_shots,
        beams,
        minions,
        score,
        shake,
        ..
    } = world;

    // ── 1. Player shots & beams ↔ boss ───────────────────────────────────────
    let boss_box = boss.hitbox();
    let hits = take_hits(player_shots, |s| s.hitbox().overlaps(&boss_box));
    if hits > 0 {
        boss.hp -= player.bullet_damage * hits as i32;
        *score += SCORE_PER_SHOT_HIT * hits as u32;
        boss.flash_timer = 6;
        shake.bump(3, 14);
    }

    let beam_hits = beams
        .iter()
        .filter(|b| b.hitbox().overlaps(&boss_box))
        .count();
    if beam_hits > 0 {
        boss.hp -= BEAM_DAMAGE * beam_hits as i32;
        *score += SCORE_PER_BEAM_TICK * beam_hits as u32;
        boss.flash_timer = 4;
        shake.bump(2, 14);
    }

    // ── 2. Beams sweep enemy shots ───────────────────────────────────────────
    if !beams.is_empty() {
        let beam_boxes: Vec<_> = beams.iter().map(|b| b.hitbox()).collect();
        enemy_shots.retain(|s| {
            let hb = s.hitbox();
            !beam_boxes.iter().any(|b| b.overlaps(&hb))
        });
    }

    // ── 3. Player shots ↔ minions ────────────────────────────────────────────
    for minion in minions.iter_mut() {
        let mbox = minion.hitbox();
        let hits = take_hits(player_shots, |s| s.hitbox().overlaps(&mbox));
        if hits > 0 {
            minion.hp -= player.bullet_damage * hits as i32;
            minion.flash_timer = 6;
            shake.bump(2, 12);
        }
    }
    let before = minions.len();
    minions.retain(|m| m.hp > 0);
    *score += SCORE_PER_MINION * (before - minions.len()) as u32;

    // ── 4. Boss death ends the tick ──────────────────────────────────────────
    if boss.is_dead() {
        let offer = advance_level(world, rng);
        return TickOutcome::BossDefeated(offer);
    }

    // ── 5. Enemy shots ↔ player ──────────────────────────────────────────────
    // Shots touching the player are consumed even during invincibility.
    let player_box = player.hitbox();
    let hits = take_hits(enemy_shots, |s| s.hitbox().overlaps(&player_box));
    if hits > 0 && player.invincible == 0 {
        player.hp -= ENEMY_SHOT_DAMAGE * hits as i32;
        player.invincible = INVINCIBLE_TICKS;
        player.flash_timer = 10;
        shake.bump(6, 18);
    }

    // ── 6. Minion contact ────────────────────────────────────────────────────
    let touching = minions
        .iter()
        .any(|m| m.hitbox().overlaps(&player_box));
    if touching && player.invincible == 0 {
        player.hp -= MINION_CONTACT_DAMAGE;
        player.invincible = INVINCIBLE_TICKS;
        player.flash_timer = 12;
        shake.bump(8, 20);
        minions.retain(|m| !m.hitbox().overlaps(&player_box));
    }

    // ── 7. Flash timers ──────────────────────────────────────────────────────
    boss.flash_timer = boss.flash_timer.saturating_sub(1);
    player.flash_timer = player.flash_timer.saturating_sub(1);
    for m in minions.iter_mut() {
        m.flash_timer = m.flash_timer.saturating_sub(1);
    }

    // ── 8. Player death ──────────────────────────────────────────────────────
    if player.hp <= 0 {
        info!(level = world.level, score = world.score, "player died");
        return TickOutcome::PlayerDied;
    }

    TickOutcome::Continue
}

/// Remove every item matching `hit` and return how many were removed.
fn take_hits<T>(pool: &mut Vec<T>, hit: impl Fn(&T) -> bool) -> usize {
    let before = pool.len();
    pool.retain(|item| !hit(item));
    before - pool.len()
}
