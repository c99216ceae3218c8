//! Arena dimensions and entity tuning.

// ── Arena ─────────────────────────────────────────────────────────────────────

pub const WIDTH: f32 = 800.0;
pub const HEIGHT: f32 = 600.0;
pub const FPS: u32 = 60;

// ── Player ────────────────────────────────────────────────────────────────────

pub const PLAYER_SIZE: f32 = 32.0;
/// Spawn height, measured from the bottom edge.
pub const PLAYER_SPAWN_FROM_BOTTOM: f32 = 80.0;
pub const PLAYER_MAX_HP: i32 = 100;
pub const PLAYER_SLOW_SPEED: f32 = 2.0;
pub const PLAYER_BASE_SPEED: f32 = 5.0;
pub const PLAYER_FAST_SPEED: f32 = 8.0;
pub const PLAYER_SHOOT_COOLDOWN: u32 = 10;
pub const PLAYER_BULLET_SPEED: f32 = 9.0;
pub const PLAYER_BULLET_DAMAGE: i32 = 8;
pub const PLAYER_SPECIAL_CHARGES: u32 = 3;
pub const SPECIAL_COOLDOWN: u32 = FPS * 2;
pub const INVINCIBLE_TICKS: u32 = FPS;

/// Angle between the centre shot and each side shot in triple mode (~16°).
pub const TRIPLE_SPREAD: f32 = 0.28;
pub const WAVE_SHOT_OFFSET: f32 = 8.0;
pub const WAVE_SHOT_AMPLITUDE: f32 = 18.0;
pub const WAVE_SHOT_PHASE_STEP: f32 = 0.18;
pub const TRAIL_LEN: usize = 6;

// ── Projectiles ───────────────────────────────────────────────────────────────

pub const PLAYER_SHOT_SIZE: f32 = 12.0;
pub const ENEMY_SHOT_SIZE: f32 = 10.0;
pub const ENEMY_WAVE_PHASE_STEP: f32 = 0.15;
pub const ENEMY_WAVE_AMPLITUDE: f32 = 2.5;

// ── Beam ──────────────────────────────────────────────────────────────────────

pub const BEAM_WIDTH: f32 = 60.0;
pub const BEAM_LIFETIME: u32 = 20;
pub const BEAM_DAMAGE: i32 = 4;

// ── Boss ──────────────────────────────────────────────────────────────────────

pub const BOSS_WIDTH: f32 = 160.0;
pub const BOSS_HEIGHT: f32 = 90.0;
pub const BOSS_HOME_Y: f32 = 100.0;
pub const BOSS_BOB_AMPLITUDE: f32 = 10.0;
/// Bob phase advanced per tick (0.002 rad/ms at 60 Hz).
pub const BOSS_BOB_STEP: f32 = 0.002 * 1000.0 / FPS as f32;
pub const BOSS_PATTERN_SECONDS: u32 = 3;

pub const AIMED_SHOT_SPEED: f32 = 5.0;
pub const AIMED_SHOT_OFFSETS: [f32; 3] = [0.0, -30.0, 30.0];
pub const WALL_SHOTS: usize = 9;
pub const WALL_MARGIN: f32 = 80.0;
pub const WALL_SHOT_SPEED: f32 = 3.0;
pub const RADIAL_SHOTS: usize = 14;
pub const RADIAL_SHOT_SPEED: f32 = 4.0;
pub const RADIAL_SPIN_STEP: f32 = 0.3;
pub const SUMMON_OFFSETS: [f32; 3] = [-80.0, 0.0, 80.0];
pub const SUMMON_EDGE_MARGIN: f32 = 20.0;

// ── Minion ────────────────────────────────────────────────────────────────────

pub const MINION_SIZE: f32 = 26.0;
pub const MINION_PHASE_STEP: f32 = 0.06;
pub const MINION_SWAY: f32 = 1.8;
/// Minions are culled once their top passes this far below the arena.
pub const MINION_CULL_MARGIN: f32 = 40.0;

// ── Combat ────────────────────────────────────────────────────────────────────

pub const ENEMY_SHOT_DAMAGE: i32 = 10;
pub const MINION_CONTACT_DAMAGE: i32 = 20;

pub const SCORE_PER_SHOT_HIT: u32 = 10;
pub const SCORE_PER_BEAM_TICK: u32 = 4;
pub const SCORE_PER_MINION: u32 = 50;
pub const SCORE_PER_BOSS_LEVEL: u32 = 200;

// ── Upgrade screen ────────────────────────────────────────────────────────────

pub const UPGRADE_CHOICES: usize = 3;
pub const CARD_WIDTH: f32 = 230.0;
pub const CARD_HEIGHT: f32 = 150.0;
pub const CARD_MARGIN: f32 = 40.0;
