/// Keyboard decoding: held keys for movement/fire, discrete keys for commands.
///
/// Terminals differ in what they report.  Keyboard-enhancement capable ones
/// (kitty protocol) send proper Press / Repeat / Release events; classic ones
/// only send Press, with OS key-repeat showing up as repeated presses.  A key
/// therefore counts as held if it was seen within `HOLD_WINDOW` frames or
/// until its Release arrives, whichever the terminal supports.
use std::collections::HashMap;

use crossterm::event::{KeyCode, KeyModifiers, ModifierKeyCode};

use boss_rush::entities::FrameInput;
use boss_rush::state::{Command, Phase};

/// Frames a key stays "held" after its last press/repeat event.
/// The OS repeat rate is ≥ 15 Hz, so 8 frames at 60 Hz (≈133 ms) is always
/// refreshed before expiry.
const HOLD_WINDOW: u64 = 8;

#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
enum Held {
    Left,
    Right,
    Up,
    Down,
    Slow,
    Fast,
    Fire,
}

fn held_for(code: &KeyCode) -> Option<Held> {
    match code {
        KeyCode::Left | KeyCode::Char('a') => Some(Held::Left),
        KeyCode::Right | KeyCode::Char('d') => Some(Held::Right),
        KeyCode::Up | KeyCode::Char('w') => Some(Held::Up),
        KeyCode::Down | KeyCode::Char('s') => Some(Held::Down),
        KeyCode::Char('z') | KeyCode::Char(' ') => Some(Held::Fire),
        KeyCode::Modifier(ModifierKeyCode::LeftShift | ModifierKeyCode::RightShift) => {
            Some(Held::Slow)
        }
        KeyCode::Modifier(ModifierKeyCode::LeftControl | ModifierKeyCode::RightControl) => {
            Some(Held::Fast)
        }
        _ => None,
    }
}

/// Letters arrive upper-cased while Shift is down.
pub fn normalize(code: KeyCode) -> KeyCode {
    match code {
        KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
        other => other,
    }
}

/// Maps each held key → the frame it was last seen (press or repeat).
#[derive(Default)]
pub struct HeldKeys {
    last_seen: HashMap<Held, u64>,
}

impl HeldKeys {
    pub fn press(&mut self, code: &KeyCode, modifiers: KeyModifiers, frame: u64) {
        if let Some(h) = held_for(code) {
            self.last_seen.insert(h, frame);
        }
        // Classic terminals never report bare modifiers; read them off the key.
        if modifiers.contains(KeyModifiers::SHIFT) {
            self.last_seen.insert(Held::Slow, frame);
        }
        if modifiers.contains(KeyModifiers::CONTROL) {
            self.last_seen.insert(Held::Fast, frame);
        }
    }

    pub fn release(&mut self, code: &KeyCode) {
        if let Some(h) = held_for(code) {
            self.last_seen.remove(&h);
        }
    }

    fn is_held(&self, key: Held, frame: u64) -> bool {
        self.last_seen
            .get(&key)
            .map(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
            .unwrap_or(false)
    }

    pub fn snapshot(&self, frame: u64) -> FrameInput {
        FrameInput {
            left: self.is_held(Held::Left, frame),
            right: self.is_held(Held::Right, frame),
            up: self.is_held(Held::Up, frame),
            down: self.is_held(Held::Down, frame),
            slow: self.is_held(Held::Slow, frame),
            fast: self.is_held(Held::Fast, frame),
            fire: self.is_held(Held::Fire, frame),
        }
    }
}

/// One-shot key actions.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Action {
    Game(Command),
    ToggleMute,
    ToggleMusicPause,
    Quit,
}

/// Decode a key press into an action for the current phase.
pub fn decode(code: &KeyCode, modifiers: KeyModifiers, phase: Phase) -> Option<Action> {
    let action = match code {
        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => Action::Quit,
        KeyCode::Char('q') => Action::Quit,
        KeyCode::Enter if phase == Phase::GameOver => Action::Game(Command::Acknowledge),
        KeyCode::Enter => Action::Game(Command::Start),
        KeyCode::Char('p') | KeyCode::Esc => Action::Game(Command::Pause),
        KeyCode::Char('r') => Action::Game(Command::Resume),
        KeyCode::Char('t') => Action::Game(Command::Abort),
        KeyCode::Char('x') => Action::Game(Command::Special),
        KeyCode::Char(c @ '1'..='3') => Action::Game(Command::Choose(*c as usize - '1' as usize)),
        KeyCode::Char('m') => Action::ToggleMute,
        KeyCode::Char('b') => Action::ToggleMusicPause,
        _ => return None,
    };
    Some(action)
}
