//! Preset-driven sound playback.
//!
//! Plays one-shot sound effects selected by name from authored presets and
//! manages a single looping music track (play/pause/mute).
//!
//! ## Architecture
//!
//! ```text
//! SoundManager
//!   ├── presets: Vec<SoundPreset>   (one-time registry scan)
//!   ├── AudioOutput                 (trait seam; RodioOutput in production)
//!   └── flags: effects-enabled, muted
//!
//! Each SoundPreset is either:
//!   └── Single(Clip)
//!   └── Multi { RandomPick | PlayAll, clips }
//!       with a Fixed or Range volume policy
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use soundbank::{DirectoryRegistry, RodioOutput, SoundManager, SoundManagerConfig};
//!
//! let output = RodioOutput::new()?;
//! let registry = DirectoryRegistry::new("presets");
//!
//! let mut manager = SoundManager::new(output, SoundManagerConfig::default());
//! manager.initialize(&registry)?;
//!
//! manager.play_sound("coin");
//! manager.play_music(true);
//! ```

pub mod clip;
pub mod config;
pub mod error;
pub mod manager;
pub mod output;
pub mod preset;
pub mod registry;

// Re-export commonly used types
pub use clip::Clip;
pub use config::Config;
pub use error::{AppResult, ConfigError, OutputError, RegistryError};
pub use manager::{SoundManager, SoundManagerConfig};
pub use output::{AudioOutput, RodioOutput};
pub use preset::{MultiMode, SoundPreset, SoundShape, VolumePolicy};
pub use registry::{DirectoryRegistry, PresetRegistry, StaticRegistry};
