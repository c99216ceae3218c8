/// Runtime settings: RNG seed, music and log output.
///
/// Settings come from an optional JSON file; command-line flags are applied on
/// top by the binary.  The tick rate is not a setting: every timer is counted
/// in ticks of `constants::FPS`.
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::warn;

use crate::error::{GameError, Result};

pub const DEFAULT_MUSIC_VOLUME: f32 = 0.6;

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Fixed RNG seed.  `None` seeds from entropy.
    pub seed: Option<u64>,
    /// Looping background track.  Tried in order; the first file that exists wins.
    pub music_paths: Vec<PathBuf>,
    pub music_volume: f32,
    pub muted: bool,
    /// Where tracing output goes while the terminal is in raw mode.
    pub log_file: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            seed: None,
            music_paths: vec![PathBuf::from("music_8bit.ogg"), PathBuf::from("music_8bit.mp3")],
            music_volume: DEFAULT_MUSIC_VOLUME,
            muted: false,
            log_file: Some(PathBuf::from("boss_rush.log")),
        }
    }
}

impl Settings {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|source| GameError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let settings: Settings =
            serde_json::from_str(&text).map_err(|source| GameError::ConfigParse {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(settings.sanitized())
    }

    /// Replace values the loop cannot run with.
    pub fn sanitized(mut self) -> Self {
        let defaults = Settings::default();
        if !(0.0..=1.0).contains(&self.music_volume) {
            warn!(
                volume = self.music_volume,
                "music volume out of range (0..=1), using {}", defaults.music_volume
            );
            self.music_volume = defaults.music_volume;
        }
        self
    }
}
