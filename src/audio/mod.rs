/// Background music session.
///
/// The game loop owns one [`MusicSession`] and only touches it on explicit
/// player commands (mute, pause music).  Playback goes through a
/// [`MusicBackend`] so the session logic does not depend on a sound device;
/// with no backend, or no track on disk, the game simply runs silent.
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::config::Settings;
use crate::error::{GameError, Result};

#[cfg(feature = "music")]
pub mod rodio_backend;

/// Something that can loop a single track.
pub trait MusicBackend {
    /// Start looping `path` at `volume`, replacing anything already playing.
    fn play_looped(&mut self, path: &Path, volume: f32) -> Result<()>;

    fn set_volume(&mut self, volume: f32);

    fn pause(&mut self);

    fn resume(&mut self);

    fn stop(&mut self);

    /// True while a track is loaded and not paused.
    fn is_playing(&self) -> bool;
}

/// Mute/pause state around an optional backend.
pub struct MusicSession {
    backend: Option<Box<dyn MusicBackend>>,
    paths: Vec<PathBuf>,
    volume: f32,
    muted: bool,
    paused: bool,
}

impl MusicSession {
    pub fn new(backend: Option<Box<dyn MusicBackend>>, settings: &Settings) -> Self {
        MusicSession {
            backend,
            paths: settings.music_paths.clone(),
            volume: settings.music_volume,
            muted: false,
            paused: false,
        }
    }

    /// A session with no sound device; every call is a no-op.
    pub fn silent() -> Self {
        Self::new(None, &Settings::default())
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn has_backend(&self) -> bool {
        self.backend.is_some()
    }

    /// Start the first track that exists on disk.  A missing track or a
    /// backend failure is logged and leaves the session silent.
    pub fn start(&mut self) -> Result<()> {
        self.muted = false;
        self.paused = false;
        let Some(backend) = self.backend.as_mut() else {
            return Ok(());
        };

        let Some(path) = self.paths.iter().find(|p| p.exists()) else {
            let missing = self
                .paths
                .first()
                .cloned()
                .unwrap_or_else(|| PathBuf::from("<none>"));
            warn!(paths = ?self.paths, "no music track found, continuing without sound");
            return Err(GameError::MusicMissing(missing));
        };

        backend.play_looped(path, self.volume).map_err(|e| {
            warn!(error = %e, "music playback failed");
            e
        })?;
        info!(path = %path.display(), "music playing");
        Ok(())
    }

    pub fn toggle_mute(&mut self) {
        let Some(backend) = self.backend.as_mut() else {
            return;
        };
        if !backend.is_playing() && !self.paused {
            return;
        }
        if self.muted {
            backend.set_volume(self.volume);
            self.muted = false;
            info!("music unmuted");
        } else {
            backend.set_volume(0.0);
            self.muted = true;
            info!("music muted");
        }
    }

    pub fn toggle_pause(&mut self) {
        let Some(backend) = self.backend.as_mut() else {
            return;
        };
        if self.paused {
            backend.resume();
            self.paused = false;
            info!("music resumed");
        } else {
            backend.pause();
            self.paused = true;
            info!("music paused");
        }
    }

    /// Stop playback and release the backend.
    pub fn shutdown(&mut self) {
        if let Some(mut backend) = self.backend.take() {
            backend.stop();
        }
    }
}

impl Drop for MusicSession {
    fn drop(&mut self) {
        self.shutdown();
    }
}
