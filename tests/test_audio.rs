use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use boss_rush::audio::{MusicBackend, MusicSession};
use boss_rush::config::{Settings, DEFAULT_MUSIC_VOLUME};
use boss_rush::error::Result;
use boss_rush::GameError;

/// Records every call so tests can inspect what the session asked for.
#[derive(Clone, Default)]
struct Recorder {
    calls: Rc<RefCell<Vec<String>>>,
    playing: Rc<RefCell<bool>>,
}

impl Recorder {
    fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }
}

impl MusicBackend for Recorder {
    fn play_looped(&mut self, path: &Path, volume: f32) -> Result<()> {
        self.calls
            .borrow_mut()
            .push(format!("play {} {volume}", path.display()));
        *self.playing.borrow_mut() = true;
        Ok(())
    }

    fn set_volume(&mut self, volume: f32) {
        self.calls.borrow_mut().push(format!("volume {volume}"));
    }

    fn pause(&mut self) {
        self.calls.borrow_mut().push("pause".into());
        *self.playing.borrow_mut() = false;
    }

    fn resume(&mut self) {
        self.calls.borrow_mut().push("resume".into());
        *self.playing.borrow_mut() = true;
    }

    fn stop(&mut self) {
        self.calls.borrow_mut().push("stop".into());
        *self.playing.borrow_mut() = false;
    }

    fn is_playing(&self) -> bool {
        *self.playing.borrow()
    }
}

fn settings_with(paths: Vec<PathBuf>) -> Settings {
    Settings {
        music_paths: paths,
        ..Settings::default()
    }
}

/// A session already playing a track that exists on disk.
fn playing_session() -> (MusicSession, Recorder, tempfile::NamedTempFile) {
    let track = tempfile::NamedTempFile::new().unwrap();
    let recorder = Recorder::default();
    let mut session = MusicSession::new(
        Some(Box::new(recorder.clone())),
        &settings_with(vec![track.path().to_path_buf()]),
    );
    session.start().unwrap();
    (session, recorder, track)
}

// ── start ─────────────────────────────────────────────────────────────────────

#[test]
fn start_plays_first_existing_track() {
    let track = tempfile::NamedTempFile::new().unwrap();
    let recorder = Recorder::default();
    let mut session = MusicSession::new(
        Some(Box::new(recorder.clone())),
        &settings_with(vec![
            PathBuf::from("/definitely/not/here.ogg"),
            track.path().to_path_buf(),
        ]),
    );

    session.start().unwrap();

    assert_eq!(
        recorder.calls(),
        vec![format!("play {} {DEFAULT_MUSIC_VOLUME}", track.path().display())]
    );
    assert!(!session.is_muted());
}

#[test]
fn start_without_track_reports_missing() {
    let recorder = Recorder::default();
    let mut session = MusicSession::new(
        Some(Box::new(recorder.clone())),
        &settings_with(vec![PathBuf::from("/definitely/not/here.ogg")]),
    );

    let err = session.start().unwrap_err();
    assert!(matches!(err, GameError::MusicMissing(ref p) if p == Path::new("/definitely/not/here.ogg")));
    assert!(recorder.calls().is_empty());
}

#[test]
fn silent_session_ignores_everything() {
    let mut session = MusicSession::silent();
    assert!(!session.has_backend());
    assert!(session.start().is_ok());
    session.toggle_mute();
    session.toggle_pause();
    assert!(!session.is_muted());
    assert!(!session.is_paused());
}

// ── mute / pause ──────────────────────────────────────────────────────────────

#[test]
fn mute_toggles_volume_and_restores_it() {
    let (mut session, recorder, _track) = playing_session();

    session.toggle_mute();
    assert!(session.is_muted());
    session.toggle_mute();
    assert!(!session.is_muted());

    let calls = recorder.calls();
    assert_eq!(calls[1], "volume 0");
    assert_eq!(calls[2], format!("volume {DEFAULT_MUSIC_VOLUME}"));
}

#[test]
fn mute_is_noop_when_nothing_plays() {
    let recorder = Recorder::default();
    let mut session = MusicSession::new(
        Some(Box::new(recorder.clone())),
        &settings_with(vec![PathBuf::from("/definitely/not/here.ogg")]),
    );
    let _ = session.start();

    session.toggle_mute();

    assert!(!session.is_muted());
    assert!(recorder.calls().is_empty());
}

#[test]
fn pause_and_resume_music() {
    let (mut session, recorder, _track) = playing_session();

    session.toggle_pause();
    assert!(session.is_paused());
    // Still allowed to mute while paused.
    session.toggle_mute();
    assert!(session.is_muted());
    session.toggle_pause();
    assert!(!session.is_paused());

    assert_eq!(&recorder.calls()[1..], ["pause", "volume 0", "resume"]);
}

// ── shutdown ──────────────────────────────────────────────────────────────────

#[test]
fn shutdown_stops_once() {
    let (mut session, recorder, _track) = playing_session();
    session.shutdown();
    session.shutdown();
    drop(session);
    let stops = recorder.calls().iter().filter(|c| *c == "stop").count();
    assert_eq!(stops, 1);
}

#[test]
fn drop_stops_playback() {
    let (session, recorder, _track) = playing_session();
    drop(session);
    assert_eq!(recorder.calls().last().map(String::as_str), Some("stop"));
    assert!(!recorder.is_playing());
}
