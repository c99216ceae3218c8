/// Rendering layer.  All terminal I/O lives here.
///
/// Each function receives a mutable writer and an immutable view of the
/// game.  No game logic is performed; this module only translates arena
/// coordinates into terminal cells and queues the drawing commands.
pub mod screens;
pub mod stars;

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal, QueueableCommand,
};

use boss_rush::constants::{HEIGHT, WIDTH};
use boss_rush::entities::{EnemyShotKind, PlayerShotKind, World};
use boss_rush::geometry::{Rect, Vec2};
use boss_rush::state::{Game, Phase};

use stars::{Layer, Starfield};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_HUD: Color = Color::White;
const C_HUD_LINE: Color = Color::DarkCyan;
const C_HP_PLAYER: Color = Color::Green;
const C_HP_BOSS: Color = Color::Red;
const C_HP_BOSS_LOW: Color = Color::DarkYellow;
const C_SCORE: Color = Color::Cyan;
const C_PLAYER: Color = Color::Green;
const C_BOSS: Color = Color::DarkRed;
const C_BOSS_ENRAGED: Color = Color::Red;
const C_FLASH: Color = Color::White;
const C_MINION: Color = Color::Blue;
const C_SHOT_NORMAL: Color = Color::Yellow;
const C_SHOT_SPREAD: Color = Color::DarkYellow;
const C_SHOT_WAVE: Color = Color::Cyan;
const C_TRAIL: Color = Color::DarkGrey;
const C_ENEMY_NORMAL: Color = Color::DarkYellow;
const C_ENEMY_ORB: Color = Color::Magenta;
const C_ENEMY_WAVE: Color = Color::Red;
const C_BEAM: Color = Color::Magenta;
const C_STAR_FAR: Color = Color::DarkGrey;
const C_STAR_NEAR: Color = Color::Grey;
pub(crate) const C_HINT: Color = Color::DarkGrey;

/// Rows reserved for the HUD above the play field.
const HUD_ROWS: u16 = 2;

// ── Viewport ──────────────────────────────────────────────────────────────────

/// Maps the 800×600 arena onto the terminal grid below the HUD.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub cols: u16,
    pub rows: u16,
}

impl Viewport {
    pub fn new(cols: u16, rows: u16) -> Self {
        Viewport { cols: cols.max(1), rows }
    }

    fn field_rows(&self) -> u16 {
        self.rows.saturating_sub(HUD_ROWS + 1).max(1)
    }

    /// Terminal cell holding arena point `p`, if it is on screen.
    pub fn to_cell(&self, p: Vec2) -> Option<(u16, u16)> {
        if !(0.0..WIDTH).contains(&p.x) || !(0.0..HEIGHT).contains(&p.y) {
            return None;
        }
        let col = (p.x / WIDTH * self.cols as f32) as u16;
        let row = HUD_ROWS + (p.y / HEIGHT * self.field_rows() as f32) as u16;
        Some((col, row))
    }

    /// Arena point at the centre of a terminal cell (used for mouse clicks).
    pub fn to_arena(&self, col: u16, row: u16) -> Option<Vec2> {
        let field = self.field_rows();
        if row < HUD_ROWS || row >= HUD_ROWS + field || col >= self.cols {
            return None;
        }
        Some(Vec2::new(
            (col as f32 + 0.5) / self.cols as f32 * WIDTH,
            ((row - HUD_ROWS) as f32 + 0.5) / field as f32 * HEIGHT,
        ))
    }

    /// Inclusive cell span `(col0, row0, col1, row1)` covered by `r`, clipped to the field.
    pub fn cell_span(&self, r: &Rect) -> Option<(u16, u16, u16, u16)> {
        let eps = 0.001;
        let tl = Vec2::new(r.left().max(0.0), r.top().max(0.0));
        let br = Vec2::new(
            (r.right() - eps).min(WIDTH - eps),
            (r.bottom() - eps).min(HEIGHT - eps),
        );
        if tl.x > br.x || tl.y > br.y {
            return None;
        }
        let (c0, r0) = self.to_cell(tl)?;
        let (c1, r1) = self.to_cell(br)?;
        Some((c0, r0, c1, r1))
    }
}

/// Everything the renderer needs for one frame.
pub struct Scene<'a> {
    pub game: &'a Game,
    pub stars: &'a Starfield,
    pub view: Viewport,
    /// Pointer position in arena coordinates, for card highlighting.
    pub hover: Option<Vec2>,
    pub music_muted: bool,
    /// Frame counter driving blink effects.
    pub frame: u64,
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(out: &mut W, scene: &Scene) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    let view = scene.view;

    draw_stars(out, view, scene.stars)?;

    match scene.game.phase() {
        Phase::Title => screens::draw_title(out, view)?,
        Phase::Playing | Phase::Paused => {
            if let Some(world) = scene.game.world() {
                let shaken = scene.game.phase() == Phase::Playing;
                draw_world(out, view, world, shaken, scene.frame)?;
                draw_hud(out, view, world)?;
            }
            if scene.game.phase() == Phase::Paused {
                screens::draw_pause(out, view)?;
            }
        }
        Phase::Upgrade => {
            if let Some(offer) = scene.game.offer() {
                screens::draw_upgrade(out, view, offer, scene.hover)?;
            }
        }
        Phase::GameOver => {
            let (level, score) = scene
                .game
                .world()
                .map_or((1, 0), |w| (w.level, w.score));
            screens::draw_game_over(out, view, level, score)?;
        }
    }

    draw_controls_hint(out, view, scene)?;

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, view.rows.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Background ────────────────────────────────────────────────────────────────

fn draw_stars<W: Write>(out: &mut W, view: Viewport, field: &Starfield) -> std::io::Result<()> {
    for star in &field.stars {
        let Some((col, row)) = view.to_cell(star.pos) else {
            continue;
        };
        let (glyph, color) = match star.layer {
            Layer::Far => ("·", C_STAR_FAR),
            Layer::Near => ("*", C_STAR_NEAR),
        };
        put(out, col, row, glyph, color)?;
    }
    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

/// Draw the world layer.  While playing, the camera-shake offset shifts
/// every entity; the HUD is drawn separately and never shakes.
fn draw_world<W: Write>(
    out: &mut W,
    view: Viewport,
    world: &World,
    shaken: bool,
    frame: u64,
) -> std::io::Result<()> {
    let offset = if shaken { world.shake.offset } else { Vec2::ZERO };
    let shift = |r: Rect| Rect::new(r.x + offset.x, r.y + offset.y, r.w, r.h);

    for beam in &world.beams {
        fill(out, view, &shift(beam.hitbox()), "┃", C_BEAM)?;
    }

    let boss = &world.boss;
    let boss_color = if boss.flash_timer > 0 {
        C_FLASH
    } else if boss.enraged {
        C_BOSS_ENRAGED
    } else {
        C_BOSS
    };
    let boss_box = shift(boss.hitbox());
    fill(out, view, &boss_box, "█", boss_color)?;
    if let Some((c0, r0, c1, r1)) = view.cell_span(&boss_box) {
        // Eyes on the middle row.
        let eye_row = r0 + (r1 - r0) / 2;
        let width = c1 - c0;
        let eye = if boss.enraged { "◉" } else { "●" };
        put(out, c0 + width / 3, eye_row, eye, Color::Black)?;
        put(out, c0 + width * 2 / 3, eye_row, eye, Color::Black)?;
    }

    for minion in &world.minions {
        let color = if minion.flash_timer > 0 { C_FLASH } else { C_MINION };
        fill(out, view, &shift(minion.hitbox()), "◆", color)?;
    }

    for shot in &world.player_shots {
        for p in &shot.trail {
            put_at(out, view, *p + offset, "·", C_TRAIL)?;
        }
        let (glyph, color) = match shot.kind() {
            PlayerShotKind::Normal => ("•", C_SHOT_NORMAL),
            PlayerShotKind::Spread => ("•", C_SHOT_SPREAD),
            PlayerShotKind::Wave => ("~", C_SHOT_WAVE),
        };
        put_at(out, view, shot.pos + offset, glyph, color)?;
    }

    for shot in &world.enemy_shots {
        let (glyph, color) = match shot.kind() {
            EnemyShotKind::Normal => ("●", C_ENEMY_NORMAL),
            EnemyShotKind::SlowOrb => ("o", C_ENEMY_ORB),
            EnemyShotKind::Wave => ("*", C_ENEMY_WAVE),
        };
        put_at(out, view, shot.pos + offset, glyph, color)?;
    }

    // Blink while invincible.
    let player = &world.player;
    let hidden = player.invincible > 0 && (frame / 5) % 2 == 0;
    if !hidden {
        let color = if player.flash_timer > 0 { C_FLASH } else { C_PLAYER };
        put_at(out, view, player.pos + offset, "▲", color)?;
    }

    Ok(())
}

// ── HUD (rows 0–1) ────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, view: Viewport, world: &World) -> std::io::Result<()> {
    let player = &world.player;
    let boss = &world.boss;

    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD))?;
    out.queue(Print("HP "))?;
    out.queue(style::SetForegroundColor(C_HP_PLAYER))?;
    out.queue(Print(bar(player.hp_ratio(), 16)))?;
    out.queue(style::SetForegroundColor(C_HUD))?;
    out.queue(Print(format!(" {:>3}/{}", player.hp.max(0), player.max_hp)))?;

    let boss_color = if boss.hp_ratio() > 0.3 {
        C_HP_BOSS
    } else {
        C_HP_BOSS_LOW
    };
    let boss_bar = format!("Boss {}", bar(boss.hp_ratio(), 20));
    let bx = (view.cols / 2).saturating_sub(boss_bar.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(bx, 0))?;
    out.queue(style::SetForegroundColor(boss_color))?;
    out.queue(Print(&boss_bar))?;

    let level = format!("Level {:>2}", world.level);
    out.queue(cursor::MoveTo(view.cols.saturating_sub(level.len() as u16 + 1), 0))?;
    out.queue(style::SetForegroundColor(C_HUD))?;
    out.queue(Print(&level))?;

    out.queue(cursor::MoveTo(1, 1))?;
    out.queue(Print(format!("Specials (X): {}", player.special_charges)))?;

    let score = format!("Score {:>7}", world.score);
    out.queue(cursor::MoveTo(view.cols.saturating_sub(score.len() as u16 + 1), 1))?;
    out.queue(style::SetForegroundColor(C_SCORE))?;
    out.queue(Print(&score))?;

    // Divider under the HUD, only where nothing else was printed.
    out.queue(style::SetForegroundColor(C_HUD_LINE))?;
    let divider_row = HUD_ROWS - 1;
    let gap_start = 18u16;
    let gap_end = view.cols.saturating_sub(score.len() as u16 + 2);
    if gap_end > gap_start {
        out.queue(cursor::MoveTo(gap_start, divider_row))?;
        out.queue(Print("─".repeat((gap_end - gap_start) as usize)))?;
    }
    Ok(())
}

/// Text health bar; the ratio is already clamped to `[0, 1]`.
fn bar(ratio: f32, width: usize) -> String {
    let filled = ((ratio * width as f32).round() as usize).min(width);
    format!("[{}{}]", "█".repeat(filled), "░".repeat(width - filled))
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(
    out: &mut W,
    view: Viewport,
    scene: &Scene,
) -> std::io::Result<()> {
    let hint = match scene.game.phase() {
        Phase::Title => "ENTER : Start   M : Mute   B : Pause music   Q : Quit",
        Phase::Playing => {
            "Arrows/WASD : Move   Shift : Slow   Ctrl : Fast   Z/Space : Fire   X : Beam   P : Pause"
        }
        Phase::Paused => "R : Resume   T : Title   M : Mute   B : Pause music",
        Phase::Upgrade => "Click a card (or 1 / 2 / 3)",
        Phase::GameOver => "ENTER : Back to title   Q : Quit",
    };
    out.queue(cursor::MoveTo(1, view.rows.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print(hint))?;
    if scene.music_muted {
        let tag = "♪ muted";
        out.queue(cursor::MoveTo(
            view.cols.saturating_sub(tag.chars().count() as u16 + 1),
            view.rows.saturating_sub(1),
        ))?;
        out.queue(Print(tag))?;
    }
    Ok(())
}

// ── Primitives ────────────────────────────────────────────────────────────────

fn put<W: Write>(out: &mut W, col: u16, row: u16, glyph: &str, color: Color) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(col, row))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(glyph))?;
    Ok(())
}

/// Draw a glyph at an arena point; off-screen points are skipped.
fn put_at<W: Write>(
    out: &mut W,
    view: Viewport,
    p: Vec2,
    glyph: &str,
    color: Color,
) -> std::io::Result<()> {
    match view.to_cell(p) {
        Some((col, row)) => put(out, col, row, glyph, color),
        None => Ok(()),
    }
}

/// Fill every cell an arena rectangle covers.
fn fill<W: Write>(
    out: &mut W,
    view: Viewport,
    r: &Rect,
    glyph: &str,
    color: Color,
) -> std::io::Result<()> {
    let Some((c0, r0, c1, r1)) = view.cell_span(r) else {
        return Ok(());
    };
    out.queue(style::SetForegroundColor(color))?;
    let line = glyph.repeat((c1 - c0 + 1) as usize);
    for row in r0..=r1 {
        out.queue(cursor::MoveTo(c0, row))?;
        out.queue(Print(&line))?;
    }
    Ok(())
}

/// Outline an arena rectangle with box-drawing characters.
pub(crate) fn frame_rect<W: Write>(
    out: &mut W,
    view: Viewport,
    r: &Rect,
    color: Color,
) -> std::io::Result<Option<(u16, u16, u16, u16)>> {
    let Some((c0, r0, c1, r1)) = view.cell_span(r) else {
        return Ok(None);
    };
    if c1 <= c0 || r1 <= r0 {
        return Ok(None);
    }
    let inner = (c1 - c0 - 1) as usize;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(cursor::MoveTo(c0, r0))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(inner))))?;
    for row in r0 + 1..r1 {
        out.queue(cursor::MoveTo(c0, row))?;
        out.queue(Print(format!("│{}│", " ".repeat(inner))))?;
    }
    out.queue(cursor::MoveTo(c0, r1))?;
    out.queue(Print(format!("└{}┘", "─".repeat(inner))))?;
    Ok(Some((c0, r0, c1, r1)))
}

/// Print `text` centred on `row`.
pub(crate) fn centered<W: Write>(
    out: &mut W,
    view: Viewport,
    row: u16,
    text: &str,
    color: Color,
) -> std::io::Result<()> {
    let col = (view.cols / 2).saturating_sub(text.chars().count() as u16 / 2);
    put(out, col, row, text, color)
}

/// Print `text` at a cell, in the given colour.
pub(crate) fn text_at<W: Write>(
    out: &mut W,
    col: u16,
    row: u16,
    text: &str,
    color: Color,
) -> std::io::Result<()> {
    put(out, col, row, text, color)
}
