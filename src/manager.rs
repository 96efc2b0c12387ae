/// Sound manager service
///
/// Resolves presets by name and dispatches playback to the audio output.
/// Construct one at the application's composition root and pass it by
/// reference to anything that needs playback.
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::clip::Clip;
use crate::error::RegistryError;
use crate::output::AudioOutput;
use crate::preset::{MultiMode, SoundPreset, SoundShape};
use crate::registry::PresetRegistry;

/// Music and startup settings for the manager
#[derive(Debug, Clone, Default)]
pub struct SoundManagerConfig {
    /// Start the configured music track during initialization
    pub play_music_on_start: bool,

    /// Loop flag applied when music starts automatically
    pub music_loops: bool,

    /// Track used by `play_music`
    pub music_track: Option<Clip>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ManagerState {
    Uninitialized,
    Ready,
}

/// The sound manager.
///
/// Owns the audio output, a snapshot of the known presets, and the
/// enable/mute flags. Every public operation is synchronous; callers sharing
/// a manager across threads wrap it in a single mutex.
pub struct SoundManager<O: AudioOutput> {
    output: O,
    config: SoundManagerConfig,
    presets: Vec<SoundPreset>,
    state: ManagerState,
    sound_effects_enabled: bool,
    muted: bool,
    rng: StdRng,
}

impl<O: AudioOutput> SoundManager<O> {
    pub fn new(output: O, config: SoundManagerConfig) -> Self {
        Self::with_rng(output, config, StdRng::from_entropy())
    }

    /// Construct with a caller-seeded RNG, making clip selection and
    /// randomized volumes deterministic.
    pub fn with_rng(output: O, config: SoundManagerConfig, rng: StdRng) -> Self {
        Self {
            output,
            config,
            presets: Vec::new(),
            state: ManagerState::Uninitialized,
            sound_effects_enabled: true,
            muted: false,
            rng,
        }
    }

    /// One-time transition to the ready state: scans the registry for
    /// presets, then starts the configured music track if requested.
    ///
    /// Initializing an already-ready manager is ignored with a warning; the
    /// first initialization wins.
    pub fn initialize(&mut self, registry: &dyn PresetRegistry) -> Result<(), RegistryError> {
        if self.state == ManagerState::Ready {
            tracing::warn!("Sound manager already initialized; keeping existing presets");
            return Ok(());
        }

        self.presets = registry.find_all_presets()?;
        self.state = ManagerState::Ready;
        tracing::info!("Sound manager ready with {} presets", self.presets.len());

        if self.config.play_music_on_start && self.config.music_track.is_some() {
            self.play_music(self.config.music_loops);
        }

        Ok(())
    }

    /// Stop output, drop the preset snapshot, and return to the
    /// uninitialized state.
    pub fn shutdown(&mut self) {
        if self.state == ManagerState::Uninitialized {
            return;
        }
        self.output.stop();
        self.presets.clear();
        self.state = ManagerState::Uninitialized;
        tracing::info!("Sound manager shut down");
    }

    pub fn is_ready(&self) -> bool {
        self.state == ManagerState::Ready
    }

    /// Global sound effects switch. Music is unaffected.
    pub fn set_sound_effects_enabled(&mut self, enabled: bool) {
        self.sound_effects_enabled = enabled;
    }

    pub fn sound_effects_enabled(&self) -> bool {
        self.sound_effects_enabled
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    pub fn preset_count(&self) -> usize {
        self.presets.len()
    }

    /// Play a sound preset by name.
    ///
    /// Unknown names, duplicate names, and empty clip collections are logged
    /// and never fail; see the module tests for the exact dispatch rules.
    pub fn play_sound(&mut self, name: &str) {
        if !self.check_ready("play_sound") {
            return;
        }
        if !self.sound_effects_enabled {
            tracing::info!("Sound effects disabled; ignoring '{}'", name);
            return;
        }

        let Self {
            presets,
            output,
            rng,
            ..
        } = self;

        let mut matches = presets.iter().filter(|p| p.name() == name);
        let Some(preset) = matches.next() else {
            tracing::error!("Sound '{}' not found", name);
            return;
        };
        let duplicates = matches.count();
        if duplicates > 0 {
            tracing::warn!(
                "{} presets named '{}'; playing the first registered",
                duplicates + 1,
                name
            );
        }

        match preset.shape() {
            SoundShape::Single(clip) => {
                let volume = preset.volume().sample(rng);
                dispatch_one_shot(output, clip, volume);
            }
            SoundShape::Multi {
                mode: MultiMode::RandomPick,
                ..
            } => {
                let volume = preset.volume().sample(rng);
                match preset.pick_one(rng) {
                    Some(clip) => dispatch_one_shot(output, clip, volume),
                    None => tracing::error!("Sound '{}' has no clips", name),
                }
            }
            SoundShape::Multi {
                mode: MultiMode::PlayAll,
                clips,
            } => {
                if clips.is_empty() {
                    tracing::error!("Sound '{}' has no clips", name);
                    return;
                }
                // Volume is re-sampled per clip when the policy is randomized
                for clip in clips {
                    let volume = preset.volume().sample(rng);
                    dispatch_one_shot(output, clip, volume);
                }
            }
        }
    }

    /// Start the configured music track, replacing any current music
    /// immediately. No fade, no queueing.
    pub fn play_music(&mut self, looping: bool) {
        if !self.check_ready("play_music") {
            return;
        }
        self.config.music_loops = looping;

        match &self.config.music_track {
            Some(clip) => {
                tracing::info!("Playing music '{}' (looping: {})", clip.label(), looping);
                if let Err(e) = self.output.play_looping(clip, looping) {
                    tracing::error!("Failed to start music: {}", e);
                }
            }
            None => tracing::warn!("No music track configured"),
        }
    }

    /// Stop the music track
    pub fn stop_music(&mut self) {
        if !self.check_ready("stop_music") {
            return;
        }
        self.output.stop();
    }

    /// Pause the music track
    pub fn pause(&mut self) {
        if !self.check_ready("pause") {
            return;
        }
        self.output.pause();
    }

    /// Resume the music track
    pub fn unpause(&mut self) {
        if !self.check_ready("unpause") {
            return;
        }
        self.output.unpause();
    }

    /// Pause the music if it is playing, resume it otherwise
    pub fn toggle_pause(&mut self) {
        if !self.check_ready("toggle_pause") {
            return;
        }
        if self.output.is_playing() {
            self.output.pause();
        } else {
            self.output.unpause();
        }
    }

    /// Mute all output
    pub fn mute(&mut self) {
        if !self.check_ready("mute") {
            return;
        }
        self.muted = true;
        self.output.set_muted(true);
    }

    /// Restore all output
    pub fn unmute(&mut self) {
        if !self.check_ready("unmute") {
            return;
        }
        self.muted = false;
        self.output.set_muted(false);
    }

    /// Flip the manager-owned mute flag and forward it to the output
    pub fn toggle_mute(&mut self) {
        if !self.check_ready("toggle_mute") {
            return;
        }
        self.muted = !self.muted;
        self.output.set_muted(self.muted);
    }

    pub fn output(&self) -> &O {
        &self.output
    }

    pub fn output_mut(&mut self) -> &mut O {
        &mut self.output
    }

    fn check_ready(&self, operation: &str) -> bool {
        if self.state != ManagerState::Ready {
            tracing::info!("Sound manager not ready; ignoring {}", operation);
            return false;
        }
        true
    }
}

fn dispatch_one_shot<O: AudioOutput>(output: &mut O, clip: &Clip, volume: f32) {
    if let Err(e) = output.play_one_shot(clip, volume) {
        tracing::error!("Failed to play clip '{}': {}", clip.label(), e);
    }
}
