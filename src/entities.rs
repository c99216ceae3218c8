/// All game entity types: data plus their spawn constructors.
///
/// Behaviour lives elsewhere: movement in `motion`, boss firing in
/// `patterns`, damage in `compute`.
use std::collections::VecDeque;
use std::f32::consts::TAU;

use rand::Rng;

use crate::constants::*;
use crate::geometry::{Rect, Vec2};

// ── Modes & kinds ─────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FireMode {
    /// One auto-aimed shot.
    Single,
    /// Three-shot fan around the aim angle.
    Triple,
    /// One aimed shot plus two vertical wave shots.
    TripleWave,
}

impl FireMode {
    /// Fire mode unlocked on reaching `level` (1 → Single, 2 → Triple, 3+ → TripleWave).
    pub fn for_level(level: u32) -> FireMode {
        match level.saturating_sub(1).min(2) {
            0 => FireMode::Single,
            1 => FireMode::Triple,
            _ => FireMode::TripleWave,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlayerShotKind {
    Normal,
    Spread,
    Wave,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EnemyShotKind {
    Normal,
    SlowOrb,
    Wave,
}

/// Boss attack patterns, cycled on a timer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Pattern {
    AimedTriple,
    Wall,
    RadialSpin,
    Summon,
}

impl Pattern {
    pub const ALL: [Pattern; 4] = [
        Pattern::AimedTriple,
        Pattern::Wall,
        Pattern::RadialSpin,
        Pattern::Summon,
    ];
}

// ── Input ─────────────────────────────────────────────────────────────────────

/// Held-key snapshot for one tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameInput {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    /// Slow-movement modifier; wins over `fast` when both are held.
    pub slow: bool,
    pub fast: bool,
    pub fire: bool,
}

// ── Player ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Player {
    /// Hitbox centre.
    pub pos: Vec2,
    pub hp: i32,
    pub max_hp: i32,
    pub shoot_cooldown: u32,
    pub shoot_cooldown_max: u32,
    pub special_charges: u32,
    pub special_cooldown: u32,
    /// Remaining ticks of damage immunity.
    pub invincible: u32,
    pub fire_mode: FireMode,
    pub bullet_speed: f32,
    pub bullet_damage: i32,
    pub slow_speed: f32,
    pub base_speed: f32,
    pub fast_speed: f32,
    pub flash_timer: u32,
}

impl Player {
    pub fn new() -> Self {
        Player {
            pos: Vec2::new(WIDTH / 2.0, HEIGHT - PLAYER_SPAWN_FROM_BOTTOM),
            hp: PLAYER_MAX_HP,
            max_hp: PLAYER_MAX_HP,
            shoot_cooldown: 0,
            shoot_cooldown_max: PLAYER_SHOOT_COOLDOWN,
            special_charges: PLAYER_SPECIAL_CHARGES,
            special_cooldown: 0,
            invincible: 0,
            fire_mode: FireMode::Single,
            bullet_speed: PLAYER_BULLET_SPEED,
            bullet_damage: PLAYER_BULLET_DAMAGE,
            slow_speed: PLAYER_SLOW_SPEED,
            base_speed: PLAYER_BASE_SPEED,
            fast_speed: PLAYER_FAST_SPEED,
            flash_timer: 0,
        }
    }

    pub fn hitbox(&self) -> Rect {
        Rect::centered(self.pos, PLAYER_SIZE, PLAYER_SIZE)
    }

    /// Health fraction in `[0, 1]` for bars.
    pub fn hp_ratio(&self) -> f32 {
        hp_ratio(self.hp, self.max_hp)
    }
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}

// ── Boss ──────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Boss {
    pub pos: Vec2,
    pub level: u32,
    pub hp: i32,
    pub max_hp: i32,
    /// Signed horizontal speed; the sign flips on wall contact.
    pub speed_x: f32,
    pub shoot_timer: u32,
    pub shoot_interval: u32,
    pub pattern: Pattern,
    pub pattern_time: u32,
    pub pattern_duration: u32,
    pub enraged: bool,
    /// Base angle of the radial pattern; keeps turning across volleys.
    pub spin_angle: f32,
    pub bob_ticks: u32,
    pub flash_timer: u32,
}

impl Boss {
    pub fn new(level: u32) -> Self {
        let max_hp = 120 + level as i32 * 50;
        Boss {
            pos: Vec2::new(WIDTH / 2.0, BOSS_HOME_Y),
            level,
            hp: max_hp,
            max_hp,
            speed_x: 2.0 + level as f32,
            shoot_timer: 0,
            shoot_interval: 25u32.saturating_sub(level * 2).max(8),
            pattern: Pattern::AimedTriple,
            pattern_time: 0,
            pattern_duration: FPS * BOSS_PATTERN_SECONDS,
            enraged: false,
            spin_angle: 0.0,
            bob_ticks: 0,
            flash_timer: 0,
        }
    }

    pub fn hitbox(&self) -> Rect {
        Rect::centered(self.pos, BOSS_WIDTH, BOSS_HEIGHT)
    }

    pub fn hp_ratio(&self) -> f32 {
        hp_ratio(self.hp, self.max_hp)
    }

    pub fn is_dead(&self) -> bool {
        self.hp <= 0
    }
}

// ── Minion ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Minion {
    pub pos: Vec2,
    pub hp: i32,
    pub max_hp: i32,
    pub speed_y: f32,
    /// Lateral sway phase, randomised at spawn so a group does not move in lockstep.
    pub phase: f32,
    pub flash_timer: u32,
}

impl Minion {
    pub fn new(pos: Vec2, level: u32, rng: &mut impl Rng) -> Self {
        let max_hp = 20 + level as i32 * 5;
        Minion {
            pos,
            hp: max_hp,
            max_hp,
            speed_y: 2.0 + level as f32 * 0.2,
            phase: rng.gen_range(0.0..TAU),
            flash_timer: 0,
        }
    }

    pub fn hitbox(&self) -> Rect {
        Rect::centered(self.pos, MINION_SIZE, MINION_SIZE)
    }
}

// ── Projectiles ───────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct PlayerShot {
    pub pos: Vec2,
    pub vel: Vec2,
    kind: PlayerShotKind,
    /// Column a wave shot oscillates around.
    pub base_x: f32,
    pub wave_t: f32,
    /// Most recent positions, oldest first.
    pub trail: VecDeque<Vec2>,
}

impl PlayerShot {
    pub fn new(pos: Vec2, vel: Vec2, kind: PlayerShotKind) -> Self {
        PlayerShot {
            pos,
            vel,
            kind,
            base_x: pos.x,
            wave_t: 0.0,
            trail: VecDeque::with_capacity(TRAIL_LEN),
        }
    }

    pub fn kind(&self) -> PlayerShotKind {
        self.kind
    }

    pub fn hitbox(&self) -> Rect {
        Rect::centered(self.pos, PLAYER_SHOT_SIZE, PLAYER_SHOT_SIZE)
    }
}

#[derive(Clone, Debug)]
pub struct EnemyShot {
    pub pos: Vec2,
    pub vel: Vec2,
    kind: EnemyShotKind,
    pub wave_t: f32,
}

impl EnemyShot {
    pub fn new(pos: Vec2, vel: Vec2, kind: EnemyShotKind) -> Self {
        EnemyShot {
            pos,
            vel,
            kind,
            wave_t: 0.0,
        }
    }

    pub fn kind(&self) -> EnemyShotKind {
        self.kind
    }

    pub fn hitbox(&self) -> Rect {
        Rect::centered(self.pos, ENEMY_SHOT_SIZE, ENEMY_SHOT_SIZE)
    }
}

/// Full-height laser from the player's special attack.
#[derive(Clone, Debug)]
pub struct Beam {
    pub x: f32,
    pub lifetime: u32,
}

impl Beam {
    pub fn new(x: f32) -> Self {
        Beam {
            x,
            lifetime: BEAM_LIFETIME,
        }
    }

    pub fn hitbox(&self) -> Rect {
        Rect::new(self.x - BEAM_WIDTH / 2.0, 0.0, BEAM_WIDTH, HEIGHT)
    }
}

// ── Camera shake ──────────────────────────────────────────────────────────────

/// World-layer jitter triggered by hits.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Shake {
    pub intensity: u32,
    /// Offset applied to the world layer this tick.
    pub offset: Vec2,
}

impl Shake {
    /// Raise the intensity by `amount`, never above `cap`.
    pub fn bump(&mut self, amount: u32, cap: u32) {
        self.intensity = (self.intensity + amount).min(cap);
    }

    /// Roll this tick's offset and decay by one.
    pub fn advance(&mut self, rng: &mut impl Rng) {
        if self.intensity > 0 {
            let s = self.intensity as i32;
            self.offset = Vec2::new(rng.gen_range(-s..=s) as f32, rng.gen_range(-s..=s) as f32);
            self.intensity -= 1;
        } else {
            self.offset = Vec2::ZERO;
        }
    }
}

// ── Master game state ─────────────────────────────────────────────────────────

/// Everything that exists while a run is in progress.  Cloneable so the
/// per-tick update can return a fresh copy.
#[derive(Clone, Debug)]
pub struct World {
    pub player: Player,
    pub boss: Boss,
    pub player_shots: Vec<PlayerShot>,
    pub enemy_shots: Vec<EnemyShot>,
    pub beams: Vec<Beam>,
    pub minions: Vec<Minion>,
    pub level: u32,
    pub score: u32,
    pub shake: Shake,
    pub frame: u64,
}

impl World {
    pub fn new() -> Self {
        World {
            player: Player::new(),
            boss: Boss::new(1),
            player_shots: Vec::new(),
            enemy_shots: Vec::new(),
            beams: Vec::new(),
            minions: Vec::new(),
            level: 1,
            score: 0,
            shake: Shake::default(),
            frame: 0,
        }
    }

    /// Drop every projectile, beam and minion.
    pub fn clear_pools(&mut self) {
        self.player_shots.clear();
        self.enemy_shots.clear();
        self.beams.clear();
        self.minions.clear();
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

fn hp_ratio(hp: i32, max_hp: i32) -> f32 {
    if max_hp <= 0 {
        return 0.0;
    }
    hp.max(0) as f32 / max_hp as f32
}
