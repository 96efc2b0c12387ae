pub mod rodio;

pub use self::rodio::RodioOutput;

use crate::clip::Clip;
use crate::error::OutputError;

/// The capability that actually renders sound.
///
/// The manager dispatches into this trait and never touches a playback
/// instance again once it is fired. Production code uses [`RodioOutput`];
/// tests substitute a recording mock.
pub trait AudioOutput {
    /// Fire-and-forget playback of one clip at the given volume (0.0-1.0).
    /// Concurrent one-shots overlap; none of them can be stopped afterwards.
    fn play_one_shot(&mut self, clip: &Clip, volume: f32) -> Result<(), OutputError>;

    /// Replace the current music track and start it immediately.
    fn play_looping(&mut self, clip: &Clip, looping: bool) -> Result<(), OutputError>;

    /// Stop the music track
    fn stop(&mut self);

    /// Pause the music track
    fn pause(&mut self);

    /// Resume the music track
    fn unpause(&mut self);

    /// Whether the music track is currently audible (started and not paused)
    fn is_playing(&self) -> bool;

    /// Silence or restore all output
    fn set_muted(&mut self, muted: bool);
}
