/// Preset discovery
///
/// Presets are authored outside the manager and discovered, not owned, by it.
/// The manager asks a registry for every known preset exactly once during
/// initialization; presets added to the backing store afterwards stay
/// invisible until the next initialization.
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::clip::Clip;
use crate::error::RegistryError;
use crate::preset::{MultiMode, SoundPreset, VolumePolicy};

/// Source of authored sound presets
pub trait PresetRegistry {
    /// Enumerate every preset the registry knows about, in registry order.
    ///
    /// Registry order is the duplicate-name resolution order: when several
    /// presets share a name, the manager plays the first one returned here.
    fn find_all_presets(&self) -> Result<Vec<SoundPreset>, RegistryError>;
}

/// Fixed in-memory preset list. Registry order is insertion order.
#[derive(Debug, Clone, Default)]
pub struct StaticRegistry {
    presets: Vec<SoundPreset>,
}

impl StaticRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_presets(presets: Vec<SoundPreset>) -> Self {
        Self { presets }
    }

    pub fn add(&mut self, preset: SoundPreset) -> &mut Self {
        self.presets.push(preset);
        self
    }

    pub fn len(&self) -> usize {
        self.presets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.presets.is_empty()
    }
}

impl PresetRegistry for StaticRegistry {
    fn find_all_presets(&self) -> Result<Vec<SoundPreset>, RegistryError> {
        Ok(self.presets.clone())
    }
}

/// One preset file: name, optional volume policy, and the clip source.
///
/// ```json
/// {"name": "hit", "volume": 0.8, "single": {"clip": "hit.wav"}}
/// {"name": "step", "volume": {"min": 0.4, "max": 0.6},
///  "multi": {"mode": "play_all", "clips": ["s1.wav", "s2.wav"]}}
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
struct PresetEntry {
    name: String,

    #[serde(default)]
    volume: VolumePolicy,

    #[serde(flatten)]
    shape: ShapeEntry,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
enum ShapeEntry {
    Single { clip: PathBuf },
    Multi { mode: MultiMode, clips: Vec<PathBuf> },
}

impl PresetEntry {
    fn validate(&self) -> Result<(), RegistryError> {
        let in_bounds = |v: f32| (0.0..=1.0).contains(&v);
        let valid = match self.volume {
            VolumePolicy::Fixed(level) => in_bounds(level),
            VolumePolicy::Range { min, max } => in_bounds(min) && in_bounds(max) && min <= max,
        };
        if !valid {
            return Err(RegistryError::InvalidPreset {
                name: self.name.clone(),
                reason: format!("volume {:?} outside 0.0-1.0", self.volume),
            });
        }
        Ok(())
    }

    /// Materialize the entry, loading clip files relative to `base_dir`.
    fn into_preset(self, base_dir: &Path) -> Result<SoundPreset, RegistryError> {
        let load = |path: &Path| -> Result<Clip, RegistryError> {
            let full = base_dir.join(path);
            Clip::from_file(&full).map_err(|e| RegistryError::ClipLoadFailed {
                path: full.display().to_string(),
                source: e,
            })
        };

        let preset = match self.shape {
            ShapeEntry::Single { clip } => SoundPreset::single(self.name, load(&clip)?),
            ShapeEntry::Multi { mode, clips } => {
                if clips.is_empty() {
                    tracing::warn!("Preset '{}' has an empty clip list", self.name);
                }
                let clips = clips
                    .iter()
                    .map(|p| load(p))
                    .collect::<Result<Vec<_>, _>>()?;
                SoundPreset::multi(self.name, mode, clips)
            }
        };

        Ok(preset.with_volume(self.volume))
    }
}

/// Scans a directory for `*.json` preset files, one preset per file.
///
/// Files are visited in file-name order so the registry order, and therefore
/// duplicate-name resolution, is deterministic. Unreadable or invalid files
/// are logged and skipped; only an unreadable directory is an error.
#[derive(Debug, Clone)]
pub struct DirectoryRegistry {
    dir: PathBuf,
}

impl DirectoryRegistry {
    pub fn new<P: Into<PathBuf>>(dir: P) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl PresetRegistry for DirectoryRegistry {
    fn find_all_presets(&self) -> Result<Vec<SoundPreset>, RegistryError> {
        let entries = fs::read_dir(&self.dir).map_err(|e| RegistryError::ScanFailed {
            path: self.dir.display().to_string(),
            source: e,
        })?;

        let mut files: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.extension().map_or(false, |ext| ext == "json"))
            .collect();
        files.sort();

        let mut presets = Vec::new();
        for path in &files {
            match load_preset_file(path) {
                Ok(preset) => {
                    tracing::debug!("Loaded preset '{}' from {}", preset.name(), path.display());
                    presets.push(preset);
                }
                Err(e) => {
                    tracing::error!("Skipping preset file {}: {}", path.display(), e);
                }
            }
        }

        tracing::info!(
            "Discovered {} sound presets in {}",
            presets.len(),
            self.dir.display()
        );
        Ok(presets)
    }
}

fn load_preset_file(path: &Path) -> Result<SoundPreset, RegistryError> {
    let content = fs::read_to_string(path).map_err(|e| RegistryError::ParseFailed {
        path: path.display().to_string(),
        source: Box::new(e),
    })?;

    let entry: PresetEntry = serde_json::from_str(&content).map_err(|e| RegistryError::ParseFailed {
        path: path.display().to_string(),
        source: Box::new(e),
    })?;

    entry.validate()?;

    let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
    entry.into_preset(base_dir)
}
