/// rodio-backed audio output
///
/// One-shots each get their own detached sink so effects overlap freely;
/// music plays on a dedicated sink guarded by a mutex.
use std::io::Cursor;

use parking_lot::Mutex;
use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink, Source};

use super::AudioOutput;
use crate::clip::Clip;
use crate::error::OutputError;

pub struct RodioOutput {
    _stream: OutputStream,
    stream_handle: OutputStreamHandle,
    music_sink: Mutex<Sink>,
    music_volume: f32,
    muted: bool,
}

impl RodioOutput {
    /// Open the default output device
    pub fn new() -> Result<Self, OutputError> {
        let (stream, stream_handle) = OutputStream::try_default()
            .map_err(|e| OutputError::StreamInitFailed(Box::new(e)))?;
        let sink = Sink::try_new(&stream_handle)
            .map_err(|e| OutputError::StreamInitFailed(Box::new(e)))?;

        Ok(Self {
            _stream: stream,
            stream_handle,
            music_sink: Mutex::new(sink),
            music_volume: 1.0,
            muted: false,
        })
    }

    /// Set the music track volume (0.0-1.0). One-shot volume comes from the
    /// preset that fired it.
    pub fn set_music_volume(&mut self, volume: f32) {
        self.music_volume = volume.clamp(0.0, 1.0);
        if !self.muted {
            self.music_sink.lock().set_volume(self.music_volume);
        }
    }

    fn decoder_for(clip: &Clip) -> Result<Decoder<Cursor<Vec<u8>>>, OutputError> {
        // rodio's Decoder requires owned data with a 'static lifetime
        let cursor = Cursor::new(clip.data().as_ref().clone());
        Decoder::new(cursor).map_err(|e| OutputError::DecodeFailed {
            label: clip.label().to_string(),
            source: Box::new(e),
        })
    }
}

impl AudioOutput for RodioOutput {
    fn play_one_shot(&mut self, clip: &Clip, volume: f32) -> Result<(), OutputError> {
        let decoder = Self::decoder_for(clip)?;

        let sink = Sink::try_new(&self.stream_handle).map_err(|e| OutputError::PlaybackFailed {
            label: clip.label().to_string(),
            source: Box::new(e),
        })?;

        sink.set_volume(if self.muted { 0.0 } else { volume.clamp(0.0, 1.0) });
        sink.append(decoder);
        sink.detach();

        Ok(())
    }

    fn play_looping(&mut self, clip: &Clip, looping: bool) -> Result<(), OutputError> {
        let decoder = Self::decoder_for(clip)?;

        let new_sink =
            Sink::try_new(&self.stream_handle).map_err(|e| OutputError::PlaybackFailed {
                label: clip.label().to_string(),
                source: Box::new(e),
            })?;
        new_sink.set_volume(if self.muted { 0.0 } else { self.music_volume });
        if looping {
            new_sink.append(decoder.repeat_infinite());
        } else {
            new_sink.append(decoder);
        }
        new_sink.play();

        let mut sink = self.music_sink.lock();
        sink.stop();
        *sink = new_sink;

        Ok(())
    }

    fn stop(&mut self) {
        let mut sink = self.music_sink.lock();
        sink.stop();
        // Clear any queued audio
        if let Ok(new_sink) = Sink::try_new(&self.stream_handle) {
            *sink = new_sink;
        }
    }

    fn pause(&mut self) {
        self.music_sink.lock().pause();
    }

    fn unpause(&mut self) {
        self.music_sink.lock().play();
    }

    fn is_playing(&self) -> bool {
        let sink = self.music_sink.lock();
        !sink.empty() && !sink.is_paused()
    }

    fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
        let volume = if muted { 0.0 } else { self.music_volume };
        self.music_sink.lock().set_volume(volume);
    }
}

// Note: no unit tests here because rodio requires actual audio hardware.
// Dispatch logic is covered against a mock output in manager.rs and
// tests/integration_test.rs.
