/// rodio-based music backend (feature `music`).
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink, Source};

use super::MusicBackend;
use crate::error::{GameError, Result};

/// Plays through the default output device.
pub struct RodioBackend {
    // The stream must outlive every sink created from its handle.
    _stream: OutputStream,
    handle: OutputStreamHandle,
    sink: Option<Sink>,
}

impl RodioBackend {
    pub fn new() -> Result<Self> {
        let (stream, handle) =
            OutputStream::try_default().map_err(|e| GameError::Audio(e.to_string()))?;
        Ok(RodioBackend {
            _stream: stream,
            handle,
            sink: None,
        })
    }
}

impl MusicBackend for RodioBackend {
    fn play_looped(&mut self, path: &Path, volume: f32) -> Result<()> {
        let file = File::open(path)
            .map_err(|e| GameError::Audio(format!("{}: {e}", path.display())))?;
        let source =
            Decoder::new(BufReader::new(file)).map_err(|e| GameError::Audio(e.to_string()))?;
        let sink = Sink::try_new(&self.handle).map_err(|e| GameError::Audio(e.to_string()))?;
        sink.set_volume(volume);
        sink.append(source.repeat_infinite());
        if let Some(old) = self.sink.replace(sink) {
            old.stop();
        }
        Ok(())
    }

    fn set_volume(&mut self, volume: f32) {
        if let Some(sink) = &self.sink {
            sink.set_volume(volume);
        }
    }

    fn pause(&mut self) {
        if let Some(sink) = &self.sink {
            sink.pause();
        }
    }

    fn resume(&mut self) {
        if let Some(sink) = &self.sink {
            sink.play();
        }
    }

    fn stop(&mut self) {
        if let Some(sink) = self.sink.take() {
            sink.stop();
        }
    }

    fn is_playing(&self) -> bool {
        self.sink
            .as_ref()
            .map_or(false, |s| !s.empty() && !s.is_paused())
    }
}
