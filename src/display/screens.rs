/// Title, pause, upgrade and game-over screens.
use std::io::Write;

use crossterm::style::Color;

use boss_rush::constants::{HEIGHT, WIDTH};
use boss_rush::geometry::{Rect, Vec2};
use boss_rush::progression::UpgradeOffer;

use super::{centered, frame_rect, text_at, Viewport, C_HINT};

/// Centred panel covering `w`×`h` of the arena.
fn panel(w: f32, h: f32) -> Rect {
    Rect::centered(Vec2::new(WIDTH / 2.0, HEIGHT / 2.0), WIDTH * w, HEIGHT * h)
}

pub fn draw_title<W: Write>(out: &mut W, view: Viewport) -> std::io::Result<()> {
    let Some((_, top, _, bottom)) = frame_rect(out, view, &panel(0.7, 0.7), Color::Cyan)? else {
        return Ok(());
    };

    let lines: &[(&str, Color)] = &[
        ("B O S S   R U S H", Color::Yellow),
        ("", Color::White),
        ("Arrows / WASD : move", Color::White),
        ("Shift : slow move    Ctrl : fast move", Color::White),
        ("Z / Space : auto-aimed fire", Color::White),
        ("X : special beam", Color::White),
        ("P / Esc : pause", Color::White),
        ("", Color::White),
        ("Press ENTER to start", Color::Green),
        ("M : mute music | B : pause music", C_HINT),
    ];
    draw_lines(out, view, top, bottom, lines)
}

pub fn draw_pause<W: Write>(out: &mut W, view: Viewport) -> std::io::Result<()> {
    let Some((_, top, _, bottom)) = frame_rect(out, view, &panel(0.5, 0.4), Color::Cyan)? else {
        return Ok(());
    };
    let lines: &[(&str, Color)] = &[
        ("PAUSE", Color::Yellow),
        ("", Color::White),
        ("R : resume", Color::White),
        ("T : back to title", Color::White),
        ("M : mute music | B : pause music", C_HINT),
    ];
    draw_lines(out, view, top, bottom, lines)
}

pub fn draw_game_over<W: Write>(
    out: &mut W,
    view: Viewport,
    level: u32,
    score: u32,
) -> std::io::Result<()> {
    let Some((_, top, _, bottom)) = frame_rect(out, view, &panel(0.5, 0.4), Color::Red)? else {
        return Ok(());
    };
    let reached = format!("You reached level {level}");
    let final_score = format!("Final score: {score}");
    let lines: &[(&str, Color)] = &[
        ("GAME OVER", Color::Red),
        ("", Color::White),
        (reached.as_str(), Color::White),
        (final_score.as_str(), Color::Yellow),
        ("", Color::White),
        ("Press ENTER to return to the title", Color::White),
    ];
    draw_lines(out, view, top, bottom, lines)
}

/// Three cards laid out by the offer's own geometry so clicks line up.
pub fn draw_upgrade<W: Write>(
    out: &mut W,
    view: Viewport,
    offer: &UpgradeOffer,
    hover: Option<Vec2>,
) -> std::io::Result<()> {
    let title_row = view.to_cell(Vec2::new(WIDTH / 2.0, 80.0)).map_or(2, |(_, r)| r);
    centered(out, view, title_row, "UPGRADE", Color::Cyan)?;
    centered(out, view, title_row + 1, "Pick one with the mouse", Color::White)?;

    for (i, (rect, upgrade)) in offer.card_rects().iter().zip(&offer.options).enumerate() {
        let hovered = hover.map_or(false, |p| rect.contains(p));
        let border = if hovered { Color::Yellow } else { Color::Cyan };
        let Some((c0, r0, c1, r1)) = frame_rect(out, view, rect, border)? else {
            continue;
        };
        let inner = (c1 - c0).saturating_sub(2) as usize;
        let heading = clip(&format!("{}. {}", i + 1, upgrade.name()), inner);
        text_at(out, c0 + 1, r0 + 1, &heading, Color::Yellow)?;
        for (k, line) in wrap(upgrade.description(), inner).iter().enumerate() {
            let row = r0 + 3 + k as u16;
            if row >= r1 {
                break;
            }
            text_at(out, c0 + 1, row, line, Color::White)?;
        }
    }
    Ok(())
}

fn draw_lines<W: Write>(
    out: &mut W,
    view: Viewport,
    top: u16,
    bottom: u16,
    lines: &[(&str, Color)],
) -> std::io::Result<()> {
    let room = bottom.saturating_sub(top + 1) as usize;
    let start = top + 1 + (room.saturating_sub(lines.len()) / 2) as u16;
    for (i, (text, color)) in lines.iter().take(room).enumerate() {
        if !text.is_empty() {
            centered(out, view, start + i as u16, text, *color)?;
        }
    }
    Ok(())
}

fn clip(text: &str, width: usize) -> String {
    text.chars().take(width).collect()
}

/// Greedy word wrap to `width` columns.
fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        let candidate = if current.is_empty() {
            word.to_string()
        } else {
            format!("{current} {word}")
        };
        if candidate.chars().count() <= width || current.is_empty() {
            current = candidate;
        } else {
            lines.push(std::mem::take(&mut current));
            current = word.to_string();
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}
