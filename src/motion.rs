/// Per-tick movement and firing for the player, projectiles, minions and beams.
///
/// Every step works in whole ticks; nothing here reads a clock.
use std::f32::consts::FRAC_PI_2;

use tracing::debug;

use crate::constants::*;
use crate::entities::{
    Beam, EnemyShot, EnemyShotKind, FireMode, FrameInput, Minion, Player, PlayerShot,
    PlayerShotKind,
};
use crate::geometry::{aim, arena, Vec2};

// ── Player ────────────────────────────────────────────────────────────────────

impl Player {
    /// Move from held keys, keep the hitbox on screen and run down timers.
    pub fn update(&mut self, input: &FrameInput) {
        let mut dir = Vec2::ZERO;
        if input.left {
            dir.x -= 1.0;
        }
        if input.right {
            dir.x += 1.0;
        }
        if input.up {
            dir.y -= 1.0;
        }
        if input.down {
            dir.y += 1.0;
        }

        if let Some(unit) = dir.normalized() {
            let speed = if input.slow {
                self.slow_speed
            } else if input.fast {
                self.fast_speed
            } else {
                self.base_speed
            };
            self.pos = self.pos + unit * speed;
        }

        let half = PLAYER_SIZE / 2.0;
        self.pos.x = self.pos.x.clamp(half, WIDTH - half);
        self.pos.y = self.pos.y.clamp(half, HEIGHT - half);

        self.shoot_cooldown = self.shoot_cooldown.saturating_sub(1);
        self.special_cooldown = self.special_cooldown.saturating_sub(1);
        self.invincible = self.invincible.saturating_sub(1);
    }

    pub fn can_shoot(&self) -> bool {
        self.shoot_cooldown == 0
    }

    /// Spawn this tick's volley aimed at `target` (the boss centre, if any).
    ///
    /// Always restarts the shoot cooldown; gate calls with [`Player::can_shoot`].
    pub fn shoot(&mut self, target: Option<Vec2>) -> Vec<PlayerShot> {
        self.shoot_cooldown = self.shoot_cooldown_max;

        let origin = self.pos;
        let aimed = || {
            let vel = match target {
                Some(t) => aim(origin, t, self.bullet_speed),
                None => Vec2::from_angle(-FRAC_PI_2, self.bullet_speed),
            };
            PlayerShot::new(origin, vel, PlayerShotKind::Normal)
        };

        match self.fire_mode {
            FireMode::Single => vec![aimed()],
            FireMode::Triple => {
                let theta = target.map_or(-FRAC_PI_2, |t| origin.angle_to(t));
                [theta, theta - TRIPLE_SPREAD, theta + TRIPLE_SPREAD]
                    .into_iter()
                    .map(|angle| {
                        PlayerShot::new(
                            origin,
                            Vec2::from_angle(angle, self.bullet_speed),
                            PlayerShotKind::Spread,
                        )
                    })
                    .collect()
            }
            FireMode::TripleWave => {
                let wave_vel = Vec2::new(0.0, -(self.bullet_speed - 1.0));
                vec![
                    aimed(),
                    PlayerShot::new(
                        Vec2::new(origin.x - WAVE_SHOT_OFFSET, origin.y),
                        wave_vel,
                        PlayerShotKind::Wave,
                    ),
                    PlayerShot::new(
                        Vec2::new(origin.x + WAVE_SHOT_OFFSET, origin.y),
                        wave_vel,
                        PlayerShotKind::Wave,
                    ),
                ]
            }
        }
    }

    pub fn can_use_special(&self) -> bool {
        self.special_charges > 0 && self.special_cooldown == 0
    }

    /// Fire the beam if a charge is ready.
    pub fn use_special(&mut self) -> Option<Beam> {
        if !self.can_use_special() {
            return None;
        }
        self.special_charges -= 1;
        self.special_cooldown = SPECIAL_COOLDOWN;
        debug!(x = self.pos.x, charges_left = self.special_charges, "special beam fired");
        Some(Beam::new(self.pos.x))
    }
}

// ── Projectiles ───────────────────────────────────────────────────────────────

impl PlayerShot {
    pub fn step(&mut self) {
        match self.kind() {
            PlayerShotKind::Wave => {
                self.pos.y += self.vel.y;
                self.wave_t += WAVE_SHOT_PHASE_STEP;
                self.pos.x = self.base_x + (self.wave_t * 4.0).sin() * WAVE_SHOT_AMPLITUDE;
            }
            PlayerShotKind::Normal | PlayerShotKind::Spread => {
                self.pos = self.pos + self.vel;
            }
        }
    }

    fn record_trail(&mut self) {
        self.trail.push_back(self.pos);
        while self.trail.len() > TRAIL_LEN {
            self.trail.pop_front();
        }
    }
}

impl EnemyShot {
    /// Wave shots only fall by `vel.y`; their x comes from the sway alone.
    pub fn step(&mut self) {
        match self.kind() {
            EnemyShotKind::Wave => {
                self.pos.y += self.vel.y;
                self.wave_t += ENEMY_WAVE_PHASE_STEP;
                self.pos.x += (self.wave_t * 4.0).sin() * ENEMY_WAVE_AMPLITUDE;
            }
            EnemyShotKind::Normal | EnemyShotKind::SlowOrb => {
                self.pos = self.pos + self.vel;
            }
        }
    }
}

impl Minion {
    pub fn step(&mut self) {
        self.pos.y += self.speed_y;
        self.phase += MINION_PHASE_STEP;
        self.pos.x += (self.phase * 2.0).sin() * MINION_SWAY;
    }

    /// Fell far enough below the arena to be forgotten.
    pub fn is_gone(&self) -> bool {
        self.hitbox().top() > HEIGHT + MINION_CULL_MARGIN
    }
}

impl Beam {
    /// Count down; returns `false` once the beam has expired.
    pub fn step(&mut self) -> bool {
        self.lifetime = self.lifetime.saturating_sub(1);
        self.lifetime > 0
    }
}

// ── Pool updates ──────────────────────────────────────────────────────────────

/// Move player shots, drop the ones that left the arena, extend trails.
pub fn advance_player_shots(shots: &mut Vec<PlayerShot>) {
    let bounds = arena();
    shots.retain_mut(|shot| {
        shot.step();
        if shot.hitbox().is_outside(&bounds) {
            return false;
        }
        shot.record_trail();
        true
    });
}

pub fn advance_enemy_shots(shots: &mut Vec<EnemyShot>) {
    let bounds = arena();
    shots.retain_mut(|shot| {
        shot.step();
        !shot.hitbox().is_outside(&bounds)
    });
}

pub fn advance_minions(minions: &mut Vec<Minion>) {
    minions.retain_mut(|m| {
        m.step();
        !m.is_gone()
    });
}

pub fn advance_beams(beams: &mut Vec<Beam>) {
    beams.retain_mut(Beam::step);
}
