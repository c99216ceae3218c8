/// Boss behaviour: drift and bob, the enrage phase, and the attack-pattern cycle.
///
/// The pattern engine is a small state machine on `Boss`:
/// `pattern_time` counts up every tick and, on reaching `pattern_duration`,
/// a different pattern is drawn at random. Enrage is independent of the timer
/// and depends only on the boss's remaining health.
use std::f32::consts::TAU;

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, info};

use crate::constants::*;
use crate::entities::{Boss, EnemyShot, EnemyShotKind, Minion, Pattern, Player};
use crate::geometry::{aim, Vec2};

impl Boss {
    /// One tick of movement, enrage check, pattern timer and fire timer.
    pub fn update(&mut self, rng: &mut impl Rng) {
        self.drift();

        self.bob_ticks = self.bob_ticks.wrapping_add(1);
        let bob = (BOSS_BOB_AMPLITUDE * (self.bob_ticks as f32 * BOSS_BOB_STEP).sin()).trunc();
        self.pos.y = BOSS_HOME_Y + bob;

        self.check_enrage();
        self.advance_pattern(rng);

        self.shoot_timer = self.shoot_timer.saturating_sub(1);
    }

    /// Slide sideways and reverse on touching either wall.
    fn drift(&mut self) {
        self.pos.x += self.speed_x;
        let half = BOSS_WIDTH / 2.0;
        if self.pos.x - half <= 0.0 {
            self.pos.x = half;
            self.speed_x = self.speed_x.abs();
        } else if self.pos.x + half >= WIDTH {
            self.pos.x = WIDTH - half;
            self.speed_x = -self.speed_x.abs();
        }
    }

    /// Enter the enraged phase once health drops to half. Fires at most once.
    pub fn check_enrage(&mut self) -> bool {
        if self.enraged || self.hp * 2 > self.max_hp {
            return false;
        }
        self.enraged = true;
        self.speed_x *= 1.5;
        self.shoot_interval = ((self.shoot_interval as f64 * 0.6) as u32).max(5);
        self.pattern_duration = (self.pattern_duration as f64 * 0.7) as u32;
        info!(
            level = self.level,
            hp = self.hp,
            shoot_interval = self.shoot_interval,
            pattern_duration = self.pattern_duration,
            "boss enraged"
        );
        true
    }

    /// Count the pattern timer and switch pattern when it runs out.
    pub fn advance_pattern(&mut self, rng: &mut impl Rng) {
        self.pattern_time += 1;
        if self.pattern_time >= self.pattern_duration {
            self.pattern_time = 0;
            let next = next_pattern(self.pattern, rng);
            debug!(from = ?self.pattern, to = ?next, "boss pattern switch");
            self.pattern = next;
        }
    }

    /// Fire the active pattern if the shoot timer has run out.
    pub fn maybe_shoot(
        &mut self,
        player: Option<&Player>,
        enemy_shots: &mut Vec<EnemyShot>,
        minions: &mut Vec<Minion>,
        rng: &mut impl Rng,
    ) {
        if self.shoot_timer > 0 {
            return;
        }
        self.shoot_timer = self.shoot_interval;

        match self.pattern {
            Pattern::AimedTriple => {
                if let Some(player) = player {
                    enemy_shots.extend(self.aimed_triple(player.pos));
                }
            }
            Pattern::Wall => enemy_shots.extend(self.wall()),
            Pattern::RadialSpin => {
                self.spin_angle += RADIAL_SPIN_STEP;
                enemy_shots.extend(self.radial());
            }
            Pattern::Summon => minions.extend(self.summon(rng)),
        }
    }

    fn aimed_triple(&self, target: Vec2) -> Vec<EnemyShot> {
        let sy = self.hitbox().bottom();
        AIMED_SHOT_OFFSETS
            .iter()
            .map(|off| {
                let origin = Vec2::new(self.pos.x + off, sy);
                EnemyShot::new(
                    origin,
                    aim(origin, target, AIMED_SHOT_SPEED),
                    EnemyShotKind::Normal,
                )
            })
            .collect()
    }

    fn wall(&self) -> Vec<EnemyShot> {
        let y = self.hitbox().bottom();
        let span = WIDTH - WALL_MARGIN * 2.0;
        (0..WALL_SHOTS)
            .map(|i| {
                let x = WALL_MARGIN + (span * i as f32 / (WALL_SHOTS - 1) as f32).trunc();
                EnemyShot::new(
                    Vec2::new(x, y),
                    Vec2::new(0.0, WALL_SHOT_SPEED),
                    EnemyShotKind::SlowOrb,
                )
            })
            .collect()
    }

    fn radial(&self) -> Vec<EnemyShot> {
        (0..RADIAL_SHOTS)
            .map(|i| {
                let angle = self.spin_angle + TAU / RADIAL_SHOTS as f32 * i as f32;
                EnemyShot::new(
                    self.pos,
                    Vec2::from_angle(angle, RADIAL_SHOT_SPEED),
                    EnemyShotKind::Wave,
                )
            })
            .collect()
    }

    fn summon(&self, rng: &mut impl Rng) -> Vec<Minion> {
        let y = self.hitbox().bottom() + 10.0;
        SUMMON_OFFSETS
            .iter()
            .map(|off| self.pos.x + off)
            .filter(|&x| x > SUMMON_EDGE_MARGIN && x < WIDTH - SUMMON_EDGE_MARGIN)
            .map(|x| Minion::new(Vec2::new(x, y), self.level, rng))
            .collect()
    }
}

/// Uniform pick among the patterns other than `current`.
pub fn next_pattern(current: Pattern, rng: &mut impl Rng) -> Pattern {
    let others: Vec<Pattern> = Pattern::ALL
        .into_iter()
        .filter(|p| *p != current)
        .collect();
    others.choose(rng).copied().unwrap_or(current)
}
